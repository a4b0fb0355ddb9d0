use crate::domain::profile::CustomerProfile;
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct CustomerProfilesRepo {
    pub pool: PgPool,
}

const COLUMNS: &str = "id, user_email, payment_provider_id, gateway_customer_profile_id, created_at";

fn from_row(row: &PgRow) -> CustomerProfile {
    CustomerProfile {
        id: row.get("id"),
        user_email: row.get("user_email"),
        provider_id: row.get("payment_provider_id"),
        gateway_customer_profile_id: row.get("gateway_customer_profile_id"),
        created_at: row.get("created_at"),
    }
}

impl CustomerProfilesRepo {
    pub async fn find_by_email_and_provider(
        &self,
        email: &str,
        provider_id: i64,
    ) -> Result<Option<CustomerProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_customer_profiles WHERE user_email = $1 AND payment_provider_id = $2"
        ))
        .bind(email)
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(from_row))
    }

    pub async fn list_by_email(&self, email: &str) -> Result<Vec<CustomerProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_customer_profiles WHERE user_email = $1 ORDER BY id"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn insert(
        &self,
        email: &str,
        provider_id: i64,
        gateway_customer_profile_id: &str,
    ) -> Result<CustomerProfile> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO payment_customer_profiles (user_email, payment_provider_id, gateway_customer_profile_id)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(email)
        .bind(provider_id)
        .bind(gateway_customer_profile_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(from_row(&row))
    }

    pub async fn delete_by_email_and_provider(&self, email: &str, provider_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM payment_customer_profiles WHERE user_email = $1 AND payment_provider_id = $2",
        )
        .bind(email)
        .bind(provider_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
