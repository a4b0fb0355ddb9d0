use crate::domain::profile::{BillingAddress, OpaquePaymentToken};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AddPaymentMethodRequest {
    pub payment_provider: String,
    pub email: String,
    #[serde(rename = "cardlast4")]
    pub card_last4: Option<String>,
    #[serde(rename = "opaqueData")]
    pub opaque_data: Option<OpaquePaymentToken>,
    #[serde(flatten)]
    pub billing: BillingAddress,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChargeRequest {
    pub payment_provider: String,
    pub email: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentMethodRequest {
    pub payment_provider: String,
    pub email: String,
    #[serde(rename = "cardlast4")]
    pub card_last4: Option<String>,
    #[serde(rename = "opaqueData")]
    pub opaque_data: Option<OpaquePaymentToken>,
    #[serde(flatten)]
    pub billing: BillingAddress,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteProfileRequest {
    pub payment_provider: String,
    pub email: String,
}
