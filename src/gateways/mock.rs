use crate::config::GatewayCredentials;
use crate::gateways::executor::GatewayCallError;
use crate::gateways::outcome::{
    ChargeOutcome, ProfileCreateOutcome, ProfileDeleteOutcome, ProfileUpdateOutcome,
};
use crate::gateways::{
    ChargeProfileRequest, CreateProfileRequest, ProfileGateway, UpdateProfileRequest,
};

/// Stand-in adapter for local runs without gateway credentials. Behavior is
/// fixed per instance: approve everything, decline charges, or time out.
pub struct MockGateway {
    pub behavior: String,
}

#[async_trait::async_trait]
impl ProfileGateway for MockGateway {
    async fn create_customer_profile(
        &self,
        _credentials: &GatewayCredentials,
        _request: CreateProfileRequest,
    ) -> Result<ProfileCreateOutcome, GatewayCallError> {
        if self.behavior == "ALWAYS_TIMEOUT" {
            return Err(GatewayCallError::Timeout);
        }
        Ok(ProfileCreateOutcome::Created {
            gateway_customer_profile_id: format!("mock_cp_{}", uuid::Uuid::new_v4()),
            gateway_payment_profile_id: Some(format!("mock_pp_{}", uuid::Uuid::new_v4())),
        })
    }

    async fn charge(
        &self,
        _credentials: &GatewayCredentials,
        _request: ChargeProfileRequest,
    ) -> Result<ChargeOutcome, GatewayCallError> {
        match self.behavior.as_str() {
            "ALWAYS_TIMEOUT" => Err(GatewayCallError::Timeout),
            "ALWAYS_DECLINE" => Ok(ChargeOutcome::Declined {
                transaction_id: Some(format!("mock_txn_{}", uuid::Uuid::new_v4())),
            }),
            _ => Ok(ChargeOutcome::Approved {
                transaction_id: format!("mock_txn_{}", uuid::Uuid::new_v4()),
            }),
        }
    }

    async fn update_payment_profile(
        &self,
        _credentials: &GatewayCredentials,
        _request: UpdateProfileRequest,
    ) -> Result<ProfileUpdateOutcome, GatewayCallError> {
        if self.behavior == "ALWAYS_TIMEOUT" {
            return Err(GatewayCallError::Timeout);
        }
        Ok(ProfileUpdateOutcome::Updated {
            message: "I00001: Successful.".to_string(),
        })
    }

    async fn delete_customer_profile(
        &self,
        _credentials: &GatewayCredentials,
        _gateway_customer_profile_id: &str,
    ) -> Result<ProfileDeleteOutcome, GatewayCallError> {
        if self.behavior == "ALWAYS_TIMEOUT" {
            return Err(GatewayCallError::Timeout);
        }
        Ok(ProfileDeleteOutcome::Deleted)
    }
}
