use crate::domain::profile::{BillingAddress, CustomerProfile, PaymentProfile, Provider};
use crate::domain::transaction::{TransactionRecord, TransactionStatus};
use crate::repo::customer_profiles_repo::CustomerProfilesRepo;
use crate::repo::payment_profiles_repo::PaymentProfilesRepo;
use crate::repo::providers_repo::ProvidersRepo;
use crate::repo::transactions_repo::TransactionsRepo;
use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct NewCustomerProfile {
    pub user_email: String,
    pub provider_id: i64,
    pub gateway_customer_profile_id: String,
}

#[derive(Debug, Clone)]
pub struct NewPaymentProfile {
    pub customer_profile_id: i64,
    pub provider_id: i64,
    pub gateway_payment_profile_id: String,
    pub card_last4: Option<String>,
    pub card_brand: Option<String>,
    pub billing: BillingAddress,
}

#[derive(Debug, Clone)]
pub struct PaymentProfileUpdate {
    pub card_last4: Option<String>,
    pub billing: BillingAddress,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub provider_id: i64,
    pub user_email: String,
    pub customer_profile_id: i64,
    pub payment_profile_id: i64,
    pub amount: Decimal,
    pub gateway_transaction_id: String,
    pub status: TransactionStatus,
}

/// Persistence primitives consumed by the orchestration layer. Each call is
/// one independently committed write; the orchestrator sequences remote
/// success before local writes rather than spanning multi-row transactions.
#[async_trait::async_trait]
pub trait LocalStore: Send + Sync {
    async fn find_provider(&self, name: &str) -> Result<Option<Provider>>;

    async fn find_customer_profile(
        &self,
        email: &str,
        provider_id: i64,
    ) -> Result<Option<CustomerProfile>>;

    async fn list_customer_profiles(&self, email: &str) -> Result<Vec<CustomerProfile>>;

    async fn create_customer_profile(&self, new: NewCustomerProfile) -> Result<CustomerProfile>;

    async fn find_payment_profile(
        &self,
        customer_profile_id: i64,
    ) -> Result<Option<PaymentProfile>>;

    async fn list_payment_profiles(&self, customer_profile_id: i64) -> Result<Vec<PaymentProfile>>;

    async fn create_payment_profile(&self, new: NewPaymentProfile) -> Result<PaymentProfile>;

    async fn update_payment_profile(
        &self,
        id: i64,
        update: PaymentProfileUpdate,
    ) -> Result<PaymentProfile>;

    /// Cascades to the customer's payment profiles. Returns the number of
    /// customer profile rows removed.
    async fn delete_customer_profile(&self, email: &str, provider_id: i64) -> Result<u64>;

    async fn create_transaction(&self, new: NewTransaction) -> Result<TransactionRecord>;
}

#[derive(Clone)]
pub struct PgLocalStore {
    pub providers: ProvidersRepo,
    pub customer_profiles: CustomerProfilesRepo,
    pub payment_profiles: PaymentProfilesRepo,
    pub transactions: TransactionsRepo,
}

impl PgLocalStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            providers: ProvidersRepo { pool: pool.clone() },
            customer_profiles: CustomerProfilesRepo { pool: pool.clone() },
            payment_profiles: PaymentProfilesRepo { pool: pool.clone() },
            transactions: TransactionsRepo { pool },
        }
    }
}

#[async_trait::async_trait]
impl LocalStore for PgLocalStore {
    async fn find_provider(&self, name: &str) -> Result<Option<Provider>> {
        self.providers.find_by_name(name).await
    }

    async fn find_customer_profile(
        &self,
        email: &str,
        provider_id: i64,
    ) -> Result<Option<CustomerProfile>> {
        self.customer_profiles
            .find_by_email_and_provider(email, provider_id)
            .await
    }

    async fn list_customer_profiles(&self, email: &str) -> Result<Vec<CustomerProfile>> {
        self.customer_profiles.list_by_email(email).await
    }

    async fn create_customer_profile(&self, new: NewCustomerProfile) -> Result<CustomerProfile> {
        self.customer_profiles
            .insert(
                &new.user_email,
                new.provider_id,
                &new.gateway_customer_profile_id,
            )
            .await
    }

    async fn find_payment_profile(
        &self,
        customer_profile_id: i64,
    ) -> Result<Option<PaymentProfile>> {
        self.payment_profiles
            .find_first_by_customer_profile(customer_profile_id)
            .await
    }

    async fn list_payment_profiles(&self, customer_profile_id: i64) -> Result<Vec<PaymentProfile>> {
        self.payment_profiles
            .list_by_customer_profile(customer_profile_id)
            .await
    }

    async fn create_payment_profile(&self, new: NewPaymentProfile) -> Result<PaymentProfile> {
        self.payment_profiles.insert(&new).await
    }

    async fn update_payment_profile(
        &self,
        id: i64,
        update: PaymentProfileUpdate,
    ) -> Result<PaymentProfile> {
        self.payment_profiles.update(id, &update).await
    }

    async fn delete_customer_profile(&self, email: &str, provider_id: i64) -> Result<u64> {
        self.customer_profiles
            .delete_by_email_and_provider(email, provider_id)
            .await
    }

    async fn create_transaction(&self, new: NewTransaction) -> Result<TransactionRecord> {
        self.transactions.insert(&new).await
    }
}
