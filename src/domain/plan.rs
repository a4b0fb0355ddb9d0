use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VendorPlan {
    pub id: i64,
    pub vendor_name: String,
    pub plan_name: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}
