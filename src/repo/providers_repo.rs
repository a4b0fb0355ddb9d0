use crate::domain::profile::Provider;
use anyhow::Result;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct ProvidersRepo {
    pub pool: PgPool,
}

impl ProvidersRepo {
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Provider>> {
        let row = sqlx::query("SELECT id, provider_name FROM payment_providers WHERE provider_name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Provider {
            id: r.get("id"),
            name: r.get("provider_name"),
        }))
    }
}
