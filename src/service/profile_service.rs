use crate::config::GatewaySettings;
use crate::domain::profile::{
    BillingAddress, CustomerProfile, OpaquePaymentToken, PaymentProfile, Provider,
};
use crate::domain::requests::{
    AddPaymentMethodRequest, ChargeRequest, DeleteProfileRequest, UpdatePaymentMethodRequest,
};
use crate::domain::transaction::{TransactionRecord, TransactionStatus};
use crate::error::ServiceError;
use crate::gateways::executor::GatewayCallError;
use crate::gateways::outcome::{
    ChargeOutcome, ProfileCreateOutcome, ProfileDeleteOutcome, ProfileUpdateOutcome,
};
use crate::gateways::{
    ChargeProfileRequest, CreateProfileRequest, InitialPaymentProfile, ProfileGateway,
    UpdateProfileRequest,
};
use crate::service::partner_notifier::PartnerNotifier;
use crate::store::{LocalStore, NewCustomerProfile, NewPaymentProfile, NewTransaction, PaymentProfileUpdate};
use crate::util::email;
use anyhow::anyhow;
use rand::Rng;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

const NO_TRANSACTION_ID: &str = "GATEWAY_NO_TRANSACTION_ID";

/// Use-case layer for customer/payment profiles and charges. Every operation
/// runs strictly in the order validate -> resolve credentials -> remote call
/// -> persist -> notify; local rows are only written after the gateway
/// confirmed the corresponding remote state.
#[derive(Clone)]
pub struct ProfileService {
    pub store: Arc<dyn LocalStore>,
    pub gateway: Arc<dyn ProfileGateway>,
    pub notifier: Arc<dyn PartnerNotifier>,
    pub gateway_settings: GatewaySettings,
}

impl ProfileService {
    pub async fn list_payment_methods(
        &self,
        email: &str,
    ) -> Result<Vec<PaymentProfile>, ServiceError> {
        validate_email(email)?;

        let mut methods = Vec::new();
        for customer in self.store.list_customer_profiles(email).await? {
            methods.extend(self.store.list_payment_profiles(customer.id).await?);
        }
        Ok(methods)
    }

    /// Idempotent upsert of the (email, provider) customer profile. When no
    /// local row exists the gateway profile is created first; any outcome
    /// short of a confirmed remote creation leaves the local store untouched.
    /// Returns the profile plus the remote payment profile id when the
    /// gateway bundled one into a fresh creation.
    pub async fn ensure_customer_profile(
        &self,
        provider: &Provider,
        email: &str,
        token: Option<&OpaquePaymentToken>,
        billing: &BillingAddress,
    ) -> Result<(CustomerProfile, Option<String>), ServiceError> {
        if let Some(existing) = self.store.find_customer_profile(email, provider.id).await? {
            return Ok((existing, None));
        }

        let credentials = self.gateway_settings.credentials_for(&provider.name)?;
        let request = CreateProfileRequest {
            merchant_customer_id: merchant_customer_id(),
            email: email.to_string(),
            description: "Primary customer profile".to_string(),
            payment: token.map(|token| InitialPaymentProfile {
                token: token.clone(),
                bill_to: billing.clone(),
            }),
        };

        let outcome = match self.gateway.create_customer_profile(credentials, request).await {
            Ok(outcome) => outcome,
            Err(GatewayCallError::Timeout) => return Err(ServiceError::GatewayTimeout),
            Err(err) => return Err(ServiceError::Internal(anyhow!("profile creation failed: {err}"))),
        };

        match outcome {
            ProfileCreateOutcome::Created {
                gateway_customer_profile_id,
                gateway_payment_profile_id,
            } => {
                let profile = self
                    .store
                    .create_customer_profile(NewCustomerProfile {
                        user_email: email.to_string(),
                        provider_id: provider.id,
                        gateway_customer_profile_id,
                    })
                    .await?;
                Ok((profile, gateway_payment_profile_id))
            }
            ProfileCreateOutcome::Rejected { code, text } => {
                Err(ServiceError::GatewayRejected(format!("{code}: {text}")))
            }
            ProfileCreateOutcome::Malformed => Err(ServiceError::MalformedGatewayResponse),
        }
    }

    pub async fn add_payment_method(
        &self,
        request: AddPaymentMethodRequest,
    ) -> Result<PaymentProfile, ServiceError> {
        validate_email(&request.email)?;
        let token = request.opaque_data.as_ref().ok_or_else(|| {
            ServiceError::Validation("Missing payment token".to_string())
        })?;
        let provider = self.registered_provider(&request.payment_provider).await?;

        if self
            .store
            .find_customer_profile(&request.email, provider.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(
                "A customer profile already exists with this payment provider".to_string(),
            ));
        }

        let mut billing = request.billing.clone();
        billing.email.get_or_insert_with(|| request.email.clone());

        let (customer, gateway_payment_profile_id) = self
            .ensure_customer_profile(&provider, &request.email, Some(token), &billing)
            .await?;

        let gateway_payment_profile_id = gateway_payment_profile_id.ok_or_else(|| {
            ServiceError::GatewayRejected(
                "gateway did not return a payment profile id".to_string(),
            )
        })?;

        let profile = self
            .store
            .create_payment_profile(NewPaymentProfile {
                customer_profile_id: customer.id,
                provider_id: provider.id,
                gateway_payment_profile_id,
                card_last4: request.card_last4.clone(),
                card_brand: None,
                billing,
            })
            .await?;

        self.notifier
            .notify_payment_profile_created(payment_profile_payload(&customer, &profile))
            .await;

        Ok(profile)
    }

    pub async fn charge(
        &self,
        request: ChargeRequest,
    ) -> Result<TransactionRecord, ServiceError> {
        validate_email(&request.email)?;
        if request.amount < Decimal::ONE {
            return Err(ServiceError::Validation("amount must be >= 1".to_string()));
        }
        let provider = self.registered_provider(&request.payment_provider).await?;
        let (customer, payment) = self.bound_profiles(&request.email, &provider).await?;

        let credentials = self.gateway_settings.credentials_for(&provider.name)?;
        let outcome = match self
            .gateway
            .charge(
                credentials,
                ChargeProfileRequest {
                    gateway_customer_profile_id: customer.gateway_customer_profile_id.clone(),
                    gateway_payment_profile_id: payment.gateway_payment_profile_id.clone(),
                    amount: request.amount,
                },
            )
            .await
        {
            Ok(outcome) => outcome,
            Err(GatewayCallError::Timeout) => return Err(ServiceError::GatewayTimeout),
            Err(err) => return Err(ServiceError::Internal(anyhow!("charge failed: {err}"))),
        };

        match outcome {
            ChargeOutcome::Approved { transaction_id } => {
                let record = self
                    .record_attempt(
                        &request,
                        &provider,
                        &customer,
                        &payment,
                        TransactionStatus::Approved,
                        Some(transaction_id),
                    )
                    .await?;
                self.notifier
                    .notify_transaction_recorded(transaction_payload(&record, &payment))
                    .await;
                Ok(record)
            }
            ChargeOutcome::Declined { transaction_id } => {
                self.record_attempt(
                    &request,
                    &provider,
                    &customer,
                    &payment,
                    TransactionStatus::Declined,
                    transaction_id,
                )
                .await?;
                Err(ServiceError::Declined)
            }
            ChargeOutcome::GatewayError { transaction_id } => {
                self.record_attempt(
                    &request,
                    &provider,
                    &customer,
                    &payment,
                    TransactionStatus::Error,
                    transaction_id,
                )
                .await?;
                Err(ServiceError::GatewayProcessing)
            }
            ChargeOutcome::HeldForReview { transaction_id } => {
                self.record_attempt(
                    &request,
                    &provider,
                    &customer,
                    &payment,
                    TransactionStatus::HeldForReview,
                    transaction_id,
                )
                .await?;
                Err(ServiceError::HeldForReview)
            }
            // already processed remotely; no second audit row, surfaced as a conflict
            ChargeOutcome::DuplicateSubmission { .. } => Err(ServiceError::Conflict(
                "Duplicate transaction already submitted".to_string(),
            )),
            ChargeOutcome::MalformedResponse => Err(ServiceError::MalformedGatewayResponse),
            ChargeOutcome::Unknown { response_code } => {
                tracing::error!(%response_code, "unmapped gateway response code");
                Err(ServiceError::UnknownGatewayOutcome)
            }
        }
    }

    pub async fn update_payment_method(
        &self,
        request: UpdatePaymentMethodRequest,
    ) -> Result<PaymentProfile, ServiceError> {
        validate_email(&request.email)?;
        if request.billing.first_name.is_none() || request.billing.last_name.is_none() {
            return Err(ServiceError::Validation(
                "firstName and lastName are required".to_string(),
            ));
        }
        let token = request.opaque_data.as_ref().ok_or_else(|| {
            ServiceError::Validation("Missing payment token".to_string())
        })?;
        let provider = self.registered_provider(&request.payment_provider).await?;
        let (customer, payment) = self.bound_profiles(&request.email, &provider).await?;

        let mut billing = request.billing.clone();
        billing.email.get_or_insert_with(|| request.email.clone());

        let credentials = self.gateway_settings.credentials_for(&provider.name)?;
        let outcome = match self
            .gateway
            .update_payment_profile(
                credentials,
                UpdateProfileRequest {
                    gateway_customer_profile_id: customer.gateway_customer_profile_id.clone(),
                    gateway_payment_profile_id: payment.gateway_payment_profile_id.clone(),
                    bill_to: billing.clone(),
                    token: Some(token.clone()),
                },
            )
            .await
        {
            Ok(outcome) => outcome,
            Err(GatewayCallError::Timeout) => return Err(ServiceError::GatewayTimeout),
            Err(err) => return Err(ServiceError::Internal(anyhow!("profile update failed: {err}"))),
        };

        match outcome {
            ProfileUpdateOutcome::Updated { .. } => Ok(self
                .store
                .update_payment_profile(
                    payment.id,
                    PaymentProfileUpdate {
                        card_last4: request.card_last4.clone(),
                        billing,
                    },
                )
                .await?),
            ProfileUpdateOutcome::Rejected { code, text } => {
                Err(ServiceError::GatewayRejected(format!("{code}: {text}")))
            }
            ProfileUpdateOutcome::Malformed => Err(ServiceError::MalformedGatewayResponse),
        }
    }

    /// Removes the local rows only after the remote delete succeeded, so the
    /// store never claims "deleted" while the gateway still holds the profile.
    pub async fn delete_customer_profile(
        &self,
        request: DeleteProfileRequest,
    ) -> Result<(), ServiceError> {
        validate_email(&request.email)?;
        let provider = self.registered_provider(&request.payment_provider).await?;
        let customer = self.bound_customer(&request.email, &provider).await?;

        let credentials = self.gateway_settings.credentials_for(&provider.name)?;
        let outcome = match self
            .gateway
            .delete_customer_profile(credentials, &customer.gateway_customer_profile_id)
            .await
        {
            Ok(outcome) => outcome,
            Err(GatewayCallError::Timeout) => return Err(ServiceError::GatewayTimeout),
            Err(err) => return Err(ServiceError::Internal(anyhow!("profile delete failed: {err}"))),
        };

        match outcome {
            ProfileDeleteOutcome::Deleted => {
                self.store
                    .delete_customer_profile(&request.email, provider.id)
                    .await?;
                Ok(())
            }
            ProfileDeleteOutcome::Rejected { code, text } => {
                Err(ServiceError::GatewayRejected(format!("{code}: {text}")))
            }
            ProfileDeleteOutcome::Malformed => Err(ServiceError::MalformedGatewayResponse),
        }
    }

    async fn registered_provider(&self, name: &str) -> Result<Provider, ServiceError> {
        self.store.find_provider(name).await?.ok_or_else(|| {
            ServiceError::Validation(
                "This payment provider is not currently set up in our system".to_string(),
            )
        })
    }

    /// Resolves the customer profile for `email` and verifies it is bound to
    /// the requested provider. Cross-provider requests are rejected here,
    /// before any remote call.
    async fn bound_customer(
        &self,
        email: &str,
        provider: &Provider,
    ) -> Result<CustomerProfile, ServiceError> {
        let profiles = self.store.list_customer_profiles(email).await?;
        if profiles.is_empty() {
            return Err(ServiceError::NotFound("Customer profile not found".to_string()));
        }
        profiles
            .into_iter()
            .find(|p| p.provider_id == provider.id)
            .ok_or_else(|| {
                ServiceError::Conflict(
                    "This customer is not registered under the selected payment provider"
                        .to_string(),
                )
            })
    }

    async fn bound_profiles(
        &self,
        email: &str,
        provider: &Provider,
    ) -> Result<(CustomerProfile, PaymentProfile), ServiceError> {
        let customer = self.bound_customer(email, provider).await?;
        let payment = self
            .store
            .find_payment_profile(customer.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Payment profile not found".to_string()))?;
        Ok((customer, payment))
    }

    async fn record_attempt(
        &self,
        request: &ChargeRequest,
        provider: &Provider,
        customer: &CustomerProfile,
        payment: &PaymentProfile,
        status: TransactionStatus,
        transaction_id: Option<String>,
    ) -> Result<TransactionRecord, ServiceError> {
        Ok(self
            .store
            .create_transaction(NewTransaction {
                provider_id: provider.id,
                user_email: request.email.clone(),
                customer_profile_id: customer.id,
                payment_profile_id: payment.id,
                amount: request.amount,
                gateway_transaction_id: transaction_id
                    .unwrap_or_else(|| NO_TRANSACTION_ID.to_string()),
                status,
            })
            .await?)
    }
}

fn validate_email(email: &str) -> Result<(), ServiceError> {
    if !email::is_valid(email) {
        return Err(ServiceError::Validation("invalid email".to_string()));
    }
    Ok(())
}

/// Generated per remote profile creation; the gateway caps it at 20 chars.
fn merchant_customer_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(4)
        .map(char::from)
        .collect();
    let mut id = format!("c{:x}{}", chrono::Utc::now().timestamp_millis(), suffix);
    id.truncate(20);
    id
}

fn payment_profile_payload(
    customer: &CustomerProfile,
    profile: &PaymentProfile,
) -> serde_json::Value {
    json!({
        "data": {
            "customer_profile_id": customer.gateway_customer_profile_id,
            "authorize_payment_profile_id": profile.gateway_payment_profile_id,
            "card_last4": profile.card_last4,
            "card_brand": profile.card_brand.clone().unwrap_or_else(|| "Visa".to_string()),
            "first_name": profile.billing.first_name,
            "last_name": profile.billing.last_name,
            "email": profile.billing.email,
            "streetnumber": profile.billing.street_address,
            "city": profile.billing.city,
            "state_province": profile.billing.state,
            "zip_code": profile.billing.zip_code,
            "country": profile.billing.country,
            "phonenumber": profile.billing.phone_number,
            "created_at": profile.created_at.to_rfc3339(),
        }
    })
}

fn transaction_payload(
    record: &TransactionRecord,
    payment: &PaymentProfile,
) -> serde_json::Value {
    json!({
        "first_name": payment.billing.first_name,
        "last_name": payment.billing.last_name,
        "email": payment.billing.email,
        "paid_amount": record.amount,
        "payment_date": record.created_at.to_rfc3339(),
        "notes": format!("TRX_ID {}", record.gateway_transaction_id),
    })
}
