mod common;

use common::{harness, harness_with_settings, live_settings_without_credentials, Harness};
use payment_profiles::domain::requests::ChargeRequest;
use payment_profiles::domain::transaction::TransactionStatus;
use payment_profiles::error::ServiceError;
use payment_profiles::gateways::executor::GatewayCallError;
use payment_profiles::gateways::outcome::ChargeOutcome;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::Ordering;

fn charge_request(amount: Decimal) -> ChargeRequest {
    ChargeRequest {
        payment_provider: "acme".to_string(),
        email: "a@b.com".to_string(),
        amount,
    }
}

fn seed_bound_customer(h: &Harness) {
    let provider = h.store.add_provider("acme");
    let customer = h.store.seed_customer("a@b.com", provider.id, "CP100");
    h.store.seed_payment_profile(customer.id, provider.id, "PP200");
}

#[tokio::test]
async fn approved_charge_records_transaction_and_notifies() {
    let h = harness();
    seed_bound_customer(&h);
    h.gateway.script_charge(Ok(ChargeOutcome::Approved {
        transaction_id: "TX123".to_string(),
    }));

    let record = h.service.charge(charge_request(dec!(50.00))).await.unwrap();

    assert_eq!(record.status, TransactionStatus::Approved);
    assert_eq!(record.gateway_transaction_id, "TX123");
    assert_eq!(record.amount, dec!(50.00));

    let rows = h.store.transactions();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, TransactionStatus::Approved);
    assert_eq!(h.notifier.transaction_payloads.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn declined_charge_records_audit_row() {
    let h = harness();
    seed_bound_customer(&h);
    h.gateway.script_charge(Ok(ChargeOutcome::Declined {
        transaction_id: Some("TX9".to_string()),
    }));

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();

    assert!(matches!(err, ServiceError::Declined));
    let rows = h.store.transactions();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, TransactionStatus::Declined);
    assert_eq!(rows[0].gateway_transaction_id, "TX9");
    // the declined attempt is surfaced directly; the orchestrator never retries it
    assert_eq!(h.gateway.charge_calls.load(Ordering::SeqCst), 1);
    assert!(h.notifier.transaction_payloads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn gateway_error_and_held_outcomes_are_audited_with_placeholder_id() {
    let h = harness();
    seed_bound_customer(&h);
    h.gateway.script_charge(Ok(ChargeOutcome::GatewayError {
        transaction_id: None,
    }));
    h.gateway.script_charge(Ok(ChargeOutcome::HeldForReview {
        transaction_id: Some("TX4".to_string()),
    }));

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();
    assert!(matches!(err, ServiceError::GatewayProcessing));

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();
    assert!(matches!(err, ServiceError::HeldForReview));

    let rows = h.store.transactions();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].status, TransactionStatus::Error);
    assert_eq!(rows[0].gateway_transaction_id, "GATEWAY_NO_TRANSACTION_ID");
    assert_eq!(rows[1].status, TransactionStatus::HeldForReview);
    assert_eq!(rows[1].gateway_transaction_id, "TX4");
}

#[tokio::test]
async fn duplicate_submission_creates_no_row_and_conflicts() {
    let h = harness();
    seed_bound_customer(&h);
    h.gateway.script_charge(Ok(ChargeOutcome::DuplicateSubmission {
        transaction_id: Some("TX11".to_string()),
    }));

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(h.store.transactions().is_empty());
}

#[tokio::test]
async fn amount_below_minimum_is_rejected_before_any_remote_call() {
    let h = harness();
    seed_bound_customer(&h);

    let err = h.service.charge(charge_request(dec!(0.50))).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(h.gateway.charge_calls.load(Ordering::SeqCst), 0);
    assert!(h.store.transactions().is_empty());
}

#[tokio::test]
async fn cross_provider_charge_is_rejected_before_any_remote_call() {
    let h = harness();
    seed_bound_customer(&h);
    h.store.add_provider("other");

    let err = h
        .service
        .charge(ChargeRequest {
            payment_provider: "other".to_string(),
            email: "a@b.com".to_string(),
            amount: dec!(50.00),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(h.gateway.charge_calls.load(Ordering::SeqCst), 0);
    assert!(h.store.transactions().is_empty());
}

#[tokio::test]
async fn unknown_customer_is_not_found() {
    let h = harness();
    h.store.add_provider("acme");

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(h.gateway.charge_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unregistered_provider_is_rejected() {
    let h = harness();

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(h.gateway.charge_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_live_credentials_fail_closed_before_the_remote_call() {
    let h = harness_with_settings(live_settings_without_credentials());
    seed_bound_customer(&h);

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();

    assert!(matches!(err, ServiceError::Configuration(_)));
    assert_eq!(h.gateway.charge_calls.load(Ordering::SeqCst), 0);
    assert!(h.store.transactions().is_empty());
}

#[tokio::test]
async fn timeout_surfaces_generic_failure_without_audit_row() {
    let h = harness();
    seed_bound_customer(&h);
    h.gateway.script_charge(Err(GatewayCallError::Timeout));

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();

    assert!(matches!(err, ServiceError::GatewayTimeout));
    assert!(h.store.transactions().is_empty());
}

#[tokio::test]
async fn malformed_and_unknown_outcomes_leave_no_audit_row() {
    let h = harness();
    seed_bound_customer(&h);
    h.gateway.script_charge(Ok(ChargeOutcome::MalformedResponse));
    h.gateway.script_charge(Ok(ChargeOutcome::Unknown {
        response_code: "7".to_string(),
    }));

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();
    assert!(matches!(err, ServiceError::MalformedGatewayResponse));

    let err = h.service.charge(charge_request(dec!(50.00))).await.unwrap_err();
    assert!(matches!(err, ServiceError::UnknownGatewayOutcome));

    assert!(h.store.transactions().is_empty());
}
