use crate::config::GatewayCredentials;
use crate::domain::profile::{BillingAddress, OpaquePaymentToken};
use crate::gateways::executor::GatewayCallError;
use crate::gateways::outcome::{
    ChargeOutcome, ProfileCreateOutcome, ProfileDeleteOutcome, ProfileUpdateOutcome,
};
use rust_decimal::Decimal;

pub mod authorize_net;
pub mod executor;
pub mod mock;
pub mod outcome;

#[derive(Debug, Clone)]
pub struct CreateProfileRequest {
    pub merchant_customer_id: String,
    pub email: String,
    pub description: String,
    pub payment: Option<InitialPaymentProfile>,
}

#[derive(Debug, Clone)]
pub struct InitialPaymentProfile {
    pub token: OpaquePaymentToken,
    pub bill_to: BillingAddress,
}

#[derive(Debug, Clone)]
pub struct ChargeProfileRequest {
    pub gateway_customer_profile_id: String,
    pub gateway_payment_profile_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileRequest {
    pub gateway_customer_profile_id: String,
    pub gateway_payment_profile_id: String,
    pub bill_to: BillingAddress,
    pub token: Option<OpaquePaymentToken>,
}

/// Remote gateway operations consumed by the orchestration layer. Credentials
/// are resolved per provider by the caller and passed in; adapters never read
/// ambient configuration.
#[async_trait::async_trait]
pub trait ProfileGateway: Send + Sync {
    async fn create_customer_profile(
        &self,
        credentials: &GatewayCredentials,
        request: CreateProfileRequest,
    ) -> Result<ProfileCreateOutcome, GatewayCallError>;

    async fn charge(
        &self,
        credentials: &GatewayCredentials,
        request: ChargeProfileRequest,
    ) -> Result<ChargeOutcome, GatewayCallError>;

    async fn update_payment_profile(
        &self,
        credentials: &GatewayCredentials,
        request: UpdateProfileRequest,
    ) -> Result<ProfileUpdateOutcome, GatewayCallError>;

    async fn delete_customer_profile(
        &self,
        credentials: &GatewayCredentials,
        gateway_customer_profile_id: &str,
    ) -> Result<ProfileDeleteOutcome, GatewayCallError>;
}
