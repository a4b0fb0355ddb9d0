use crate::domain::transaction::{TransactionRecord, TransactionStatus};
use crate::store::NewTransaction;
use anyhow::{anyhow, Result};
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct TransactionsRepo {
    pub pool: PgPool,
}

impl TransactionsRepo {
    pub async fn insert(&self, new: &NewTransaction) -> Result<TransactionRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO payment_transactions (
                user_email, customer_profile_id, payment_profile_id, payment_provider_id,
                amount, gateway_transaction_id, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_email, customer_profile_id, payment_profile_id,
                      payment_provider_id, amount, gateway_transaction_id, status, created_at
            "#,
        )
        .bind(&new.user_email)
        .bind(new.customer_profile_id)
        .bind(new.payment_profile_id)
        .bind(new.provider_id)
        .bind(new.amount)
        .bind(&new.gateway_transaction_id)
        .bind(new.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        let status: String = row.get("status");
        Ok(TransactionRecord {
            id: row.get("id"),
            user_email: row.get("user_email"),
            customer_profile_id: row.get("customer_profile_id"),
            payment_profile_id: row.get("payment_profile_id"),
            provider_id: row.get("payment_provider_id"),
            amount: row.get("amount"),
            gateway_transaction_id: row.get("gateway_transaction_id"),
            status: TransactionStatus::parse(&status)
                .ok_or_else(|| anyhow!("unknown transaction status '{status}'"))?,
            created_at: row.get("created_at"),
        })
    }
}
