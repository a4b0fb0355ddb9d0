use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Provider {
    pub id: i64,
    pub name: String,
}

/// One user's relationship with one provider at the gateway. The row only
/// exists once the remote profile was created; `gateway_customer_profile_id`
/// is never empty.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub id: i64,
    pub user_email: String,
    pub provider_id: i64,
    pub gateway_customer_profile_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentProfile {
    pub id: i64,
    pub customer_profile_id: i64,
    pub provider_id: i64,
    pub gateway_payment_profile_id: String,
    pub card_last4: Option<String>,
    pub card_brand: Option<String>,
    #[serde(flatten)]
    pub billing: BillingAddress,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Accept.js tokenized card data. The value is sensitive and is never logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaquePaymentToken {
    pub data_descriptor: String,
    pub data_value: String,
}
