use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Terminal status of one charge attempt. Rows never transition between
/// statuses; a held-for-review transaction is not later promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Approved,
    Declined,
    Error,
    HeldForReview,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Approved => "approved",
            TransactionStatus::Declined => "declined",
            TransactionStatus::Error => "error",
            TransactionStatus::HeldForReview => "held_for_review",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(TransactionStatus::Approved),
            "declined" => Some(TransactionStatus::Declined),
            "error" => Some(TransactionStatus::Error),
            "held_for_review" => Some(TransactionStatus::HeldForReview),
            _ => None,
        }
    }
}

/// Append-only audit record of one charge attempt.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub provider_id: i64,
    pub user_email: String,
    pub customer_profile_id: i64,
    pub payment_profile_id: i64,
    pub amount: Decimal,
    pub gateway_transaction_id: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}
