use crate::domain::plan::VendorPlan;
use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct VendorPlansRepo {
    pub pool: PgPool,
}

fn from_row(row: &PgRow) -> VendorPlan {
    VendorPlan {
        id: row.get("id"),
        vendor_name: row.get("vendor_name"),
        plan_name: row.get("plan_name"),
        price: row.get("price"),
        created_at: row.get("created_at"),
    }
}

impl VendorPlansRepo {
    pub async fn list_all(&self) -> Result<Vec<VendorPlan>> {
        let rows = sqlx::query(
            "SELECT id, vendor_name, plan_name, price, created_at FROM vendor_plans ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn find_by_plan_name(&self, plan_name: &str) -> Result<Option<VendorPlan>> {
        let row = sqlx::query(
            "SELECT id, vendor_name, plan_name, price, created_at FROM vendor_plans WHERE plan_name = $1",
        )
        .bind(plan_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(from_row))
    }

    pub async fn list_by_vendor(&self, vendor_name: &str) -> Result<Vec<VendorPlan>> {
        let rows = sqlx::query(
            "SELECT id, vendor_name, plan_name, price, created_at FROM vendor_plans WHERE vendor_name = $1 ORDER BY id",
        )
        .bind(vendor_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn insert(
        &self,
        vendor_name: &str,
        plan_name: &str,
        price: Decimal,
    ) -> Result<VendorPlan> {
        let row = sqlx::query(
            r#"
            INSERT INTO vendor_plans (vendor_name, plan_name, price)
            VALUES ($1, $2, $3)
            RETURNING id, vendor_name, plan_name, price, created_at
            "#,
        )
        .bind(vendor_name)
        .bind(plan_name)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(from_row(&row))
    }

    pub async fn update(
        &self,
        id: i64,
        vendor_name: Option<&str>,
        plan_name: Option<&str>,
        price: Option<Decimal>,
    ) -> Result<Option<VendorPlan>> {
        let row = sqlx::query(
            r#"
            UPDATE vendor_plans SET
                vendor_name = COALESCE($2, vendor_name),
                plan_name = COALESCE($3, plan_name),
                price = COALESCE($4, price)
            WHERE id = $1
            RETURNING id, vendor_name, plan_name, price, created_at
            "#,
        )
        .bind(id)
        .bind(vendor_name)
        .bind(plan_name)
        .bind(price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(from_row))
    }

    pub async fn exists(&self, vendor_name: &str, plan_name: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 AS one FROM vendor_plans WHERE vendor_name = $1 AND plan_name = $2")
            .bind(vendor_name)
            .bind(plan_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    pub async fn delete(&self, vendor_name: &str, plan_name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM vendor_plans WHERE vendor_name = $1 AND plan_name = $2")
            .bind(vendor_name)
            .bind(plan_name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
