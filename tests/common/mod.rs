#![allow(dead_code)]

use anyhow::Result;
use chrono::Utc;
use payment_profiles::config::{GatewayCredentials, GatewayEnvironment, GatewaySettings};
use payment_profiles::domain::profile::{
    BillingAddress, CustomerProfile, OpaquePaymentToken, PaymentProfile, Provider,
};
use payment_profiles::domain::transaction::TransactionRecord;
use payment_profiles::gateways::executor::GatewayCallError;
use payment_profiles::gateways::outcome::{
    ChargeOutcome, ProfileCreateOutcome, ProfileDeleteOutcome, ProfileUpdateOutcome,
};
use payment_profiles::gateways::{
    ChargeProfileRequest, CreateProfileRequest, ProfileGateway, UpdateProfileRequest,
};
use payment_profiles::service::partner_notifier::PartnerNotifier;
use payment_profiles::service::profile_service::ProfileService;
use payment_profiles::store::{
    LocalStore, NewCustomerProfile, NewPaymentProfile, NewTransaction, PaymentProfileUpdate,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    providers: Vec<Provider>,
    customers: Vec<CustomerProfile>,
    payments: Vec<PaymentProfile>,
    transactions: Vec<TransactionRecord>,
    next_id: i64,
}

impl Inner {
    fn alloc(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_provider(&self, name: &str) -> Provider {
        let mut inner = self.inner.lock().unwrap();
        let provider = Provider {
            id: inner.alloc(),
            name: name.to_string(),
        };
        inner.providers.push(provider.clone());
        provider
    }

    pub fn seed_customer(
        &self,
        email: &str,
        provider_id: i64,
        gateway_customer_profile_id: &str,
    ) -> CustomerProfile {
        let mut inner = self.inner.lock().unwrap();
        let customer = CustomerProfile {
            id: inner.alloc(),
            user_email: email.to_string(),
            provider_id,
            gateway_customer_profile_id: gateway_customer_profile_id.to_string(),
            created_at: Utc::now(),
        };
        inner.customers.push(customer.clone());
        customer
    }

    pub fn seed_payment_profile(
        &self,
        customer_profile_id: i64,
        provider_id: i64,
        gateway_payment_profile_id: &str,
    ) -> PaymentProfile {
        let mut inner = self.inner.lock().unwrap();
        let profile = PaymentProfile {
            id: inner.alloc(),
            customer_profile_id,
            provider_id,
            gateway_payment_profile_id: gateway_payment_profile_id.to_string(),
            card_last4: Some("4242".to_string()),
            card_brand: None,
            billing: BillingAddress::default(),
            created_at: Utc::now(),
        };
        inner.payments.push(profile.clone());
        profile
    }

    pub fn customers(&self) -> Vec<CustomerProfile> {
        self.inner.lock().unwrap().customers.clone()
    }

    pub fn payment_profiles(&self) -> Vec<PaymentProfile> {
        self.inner.lock().unwrap().payments.clone()
    }

    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.inner.lock().unwrap().transactions.clone()
    }
}

#[async_trait::async_trait]
impl LocalStore for InMemoryStore {
    async fn find_provider(&self, name: &str) -> Result<Option<Provider>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.providers.iter().find(|p| p.name == name).cloned())
    }

    async fn find_customer_profile(
        &self,
        email: &str,
        provider_id: i64,
    ) -> Result<Option<CustomerProfile>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .customers
            .iter()
            .find(|c| c.user_email == email && c.provider_id == provider_id)
            .cloned())
    }

    async fn list_customer_profiles(&self, email: &str) -> Result<Vec<CustomerProfile>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .customers
            .iter()
            .filter(|c| c.user_email == email)
            .cloned()
            .collect())
    }

    async fn create_customer_profile(&self, new: NewCustomerProfile) -> Result<CustomerProfile> {
        let mut inner = self.inner.lock().unwrap();
        let customer = CustomerProfile {
            id: inner.alloc(),
            user_email: new.user_email,
            provider_id: new.provider_id,
            gateway_customer_profile_id: new.gateway_customer_profile_id,
            created_at: Utc::now(),
        };
        inner.customers.push(customer.clone());
        Ok(customer)
    }

    async fn find_payment_profile(
        &self,
        customer_profile_id: i64,
    ) -> Result<Option<PaymentProfile>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .payments
            .iter()
            .find(|p| p.customer_profile_id == customer_profile_id)
            .cloned())
    }

    async fn list_payment_profiles(&self, customer_profile_id: i64) -> Result<Vec<PaymentProfile>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .payments
            .iter()
            .filter(|p| p.customer_profile_id == customer_profile_id)
            .cloned()
            .collect())
    }

    async fn create_payment_profile(&self, new: NewPaymentProfile) -> Result<PaymentProfile> {
        let mut inner = self.inner.lock().unwrap();
        let profile = PaymentProfile {
            id: inner.alloc(),
            customer_profile_id: new.customer_profile_id,
            provider_id: new.provider_id,
            gateway_payment_profile_id: new.gateway_payment_profile_id,
            card_last4: new.card_last4,
            card_brand: new.card_brand,
            billing: new.billing,
            created_at: Utc::now(),
        };
        inner.payments.push(profile.clone());
        Ok(profile)
    }

    async fn update_payment_profile(
        &self,
        id: i64,
        update: PaymentProfileUpdate,
    ) -> Result<PaymentProfile> {
        let mut inner = self.inner.lock().unwrap();
        let profile = inner
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow::anyhow!("payment profile {id} not found"))?;
        if update.card_last4.is_some() {
            profile.card_last4 = update.card_last4;
        }
        profile.billing = update.billing;
        Ok(profile.clone())
    }

    async fn delete_customer_profile(&self, email: &str, provider_id: i64) -> Result<u64> {
        let mut inner = self.inner.lock().unwrap();
        let removed: Vec<i64> = inner
            .customers
            .iter()
            .filter(|c| c.user_email == email && c.provider_id == provider_id)
            .map(|c| c.id)
            .collect();
        inner
            .customers
            .retain(|c| !(c.user_email == email && c.provider_id == provider_id));
        inner
            .payments
            .retain(|p| !removed.contains(&p.customer_profile_id));
        Ok(removed.len() as u64)
    }

    async fn create_transaction(&self, new: NewTransaction) -> Result<TransactionRecord> {
        let mut inner = self.inner.lock().unwrap();
        let record = TransactionRecord {
            id: inner.alloc(),
            provider_id: new.provider_id,
            user_email: new.user_email,
            customer_profile_id: new.customer_profile_id,
            payment_profile_id: new.payment_profile_id,
            amount: new.amount,
            gateway_transaction_id: new.gateway_transaction_id,
            status: new.status,
            created_at: Utc::now(),
        };
        inner.transactions.push(record.clone());
        Ok(record)
    }
}

/// Gateway double that replays scripted outcomes and counts calls. A call
/// with nothing scripted panics, so tests that expect "no remote call" fail
/// loudly if one happens.
#[derive(Default)]
pub struct ScriptedGateway {
    create_outcomes: Mutex<VecDeque<Result<ProfileCreateOutcome, GatewayCallError>>>,
    charge_outcomes: Mutex<VecDeque<Result<ChargeOutcome, GatewayCallError>>>,
    update_outcomes: Mutex<VecDeque<Result<ProfileUpdateOutcome, GatewayCallError>>>,
    delete_outcomes: Mutex<VecDeque<Result<ProfileDeleteOutcome, GatewayCallError>>>,
    pub create_calls: AtomicU32,
    pub charge_calls: AtomicU32,
    pub update_calls: AtomicU32,
    pub delete_calls: AtomicU32,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_create(&self, outcome: Result<ProfileCreateOutcome, GatewayCallError>) {
        self.create_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn script_charge(&self, outcome: Result<ChargeOutcome, GatewayCallError>) {
        self.charge_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn script_update(&self, outcome: Result<ProfileUpdateOutcome, GatewayCallError>) {
        self.update_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn script_delete(&self, outcome: Result<ProfileDeleteOutcome, GatewayCallError>) {
        self.delete_outcomes.lock().unwrap().push_back(outcome);
    }
}

#[async_trait::async_trait]
impl ProfileGateway for ScriptedGateway {
    async fn create_customer_profile(
        &self,
        _credentials: &GatewayCredentials,
        _request: CreateProfileRequest,
    ) -> Result<ProfileCreateOutcome, GatewayCallError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.create_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted create_customer_profile call")
    }

    async fn charge(
        &self,
        _credentials: &GatewayCredentials,
        _request: ChargeProfileRequest,
    ) -> Result<ChargeOutcome, GatewayCallError> {
        self.charge_calls.fetch_add(1, Ordering::SeqCst);
        self.charge_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted charge call")
    }

    async fn update_payment_profile(
        &self,
        _credentials: &GatewayCredentials,
        _request: UpdateProfileRequest,
    ) -> Result<ProfileUpdateOutcome, GatewayCallError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.update_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted update_payment_profile call")
    }

    async fn delete_customer_profile(
        &self,
        _credentials: &GatewayCredentials,
        _gateway_customer_profile_id: &str,
    ) -> Result<ProfileDeleteOutcome, GatewayCallError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.delete_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted delete_customer_profile call")
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub profile_payloads: Mutex<Vec<serde_json::Value>>,
    pub transaction_payloads: Mutex<Vec<serde_json::Value>>,
}

#[async_trait::async_trait]
impl PartnerNotifier for RecordingNotifier {
    async fn notify_payment_profile_created(&self, payload: serde_json::Value) {
        self.profile_payloads.lock().unwrap().push(payload);
    }

    async fn notify_transaction_recorded(&self, payload: serde_json::Value) {
        self.transaction_payloads.lock().unwrap().push(payload);
    }
}

pub fn sandbox_settings() -> GatewaySettings {
    GatewaySettings {
        environment: GatewayEnvironment::Sandbox,
        endpoint: "http://127.0.0.1:0".to_string(),
        timeout_ms: 8_000,
        retries: 2,
        retry_delay_ms: 350,
        live_credentials: HashMap::new(),
        sandbox_credentials: Some(GatewayCredentials {
            login_id: "sandbox-login".to_string(),
            transaction_key: "sandbox-key".to_string(),
        }),
    }
}

pub fn live_settings_without_credentials() -> GatewaySettings {
    GatewaySettings {
        environment: GatewayEnvironment::Live,
        endpoint: "http://127.0.0.1:0".to_string(),
        timeout_ms: 8_000,
        retries: 2,
        retry_delay_ms: 350,
        live_credentials: HashMap::new(),
        sandbox_credentials: None,
    }
}

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub gateway: Arc<ScriptedGateway>,
    pub notifier: Arc<RecordingNotifier>,
    pub service: ProfileService,
}

pub fn harness() -> Harness {
    harness_with_settings(sandbox_settings())
}

pub fn harness_with_settings(settings: GatewaySettings) -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Arc::new(ScriptedGateway::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ProfileService {
        store: store.clone(),
        gateway: gateway.clone(),
        notifier: notifier.clone(),
        gateway_settings: settings,
    };
    Harness {
        store,
        gateway,
        notifier,
        service,
    }
}

pub fn token() -> OpaquePaymentToken {
    OpaquePaymentToken {
        data_descriptor: "COMMON.ACCEPT.INAPP.PAYMENT".to_string(),
        data_value: "opaque-token-value".to_string(),
    }
}

pub fn billing() -> BillingAddress {
    BillingAddress {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        street_address: Some("12 Main St".to_string()),
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
        zip_code: Some("73301".to_string()),
        country: Some("US".to_string()),
        phone_number: Some("5550100".to_string()),
        email: None,
    }
}
