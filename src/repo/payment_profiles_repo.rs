use crate::domain::profile::{BillingAddress, PaymentProfile};
use crate::store::{NewPaymentProfile, PaymentProfileUpdate};
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PaymentProfilesRepo {
    pub pool: PgPool,
}

const COLUMNS: &str = "id, customer_profile_id, payment_provider_id, gateway_payment_profile_id, \
    card_last4, card_brand, first_name, last_name, street_address, city, state_province, \
    zip_code, country, phone_number, email, created_at";

fn from_row(row: &PgRow) -> PaymentProfile {
    PaymentProfile {
        id: row.get("id"),
        customer_profile_id: row.get("customer_profile_id"),
        provider_id: row.get("payment_provider_id"),
        gateway_payment_profile_id: row.get("gateway_payment_profile_id"),
        card_last4: row.get("card_last4"),
        card_brand: row.get("card_brand"),
        billing: BillingAddress {
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            street_address: row.get("street_address"),
            city: row.get("city"),
            state: row.get("state_province"),
            zip_code: row.get("zip_code"),
            country: row.get("country"),
            phone_number: row.get("phone_number"),
            email: row.get("email"),
        },
        created_at: row.get("created_at"),
    }
}

impl PaymentProfilesRepo {
    pub async fn find_first_by_customer_profile(
        &self,
        customer_profile_id: i64,
    ) -> Result<Option<PaymentProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_profiles WHERE customer_profile_id = $1 ORDER BY id LIMIT 1"
        ))
        .bind(customer_profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(from_row))
    }

    pub async fn list_by_customer_profile(
        &self,
        customer_profile_id: i64,
    ) -> Result<Vec<PaymentProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM payment_profiles WHERE customer_profile_id = $1 ORDER BY id"
        ))
        .bind(customer_profile_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn insert(&self, new: &NewPaymentProfile) -> Result<PaymentProfile> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO payment_profiles (
                customer_profile_id, payment_provider_id, gateway_payment_profile_id,
                card_last4, card_brand, first_name, last_name, street_address, city,
                state_province, zip_code, country, phone_number, email
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new.customer_profile_id)
        .bind(new.provider_id)
        .bind(&new.gateway_payment_profile_id)
        .bind(&new.card_last4)
        .bind(&new.card_brand)
        .bind(&new.billing.first_name)
        .bind(&new.billing.last_name)
        .bind(&new.billing.street_address)
        .bind(&new.billing.city)
        .bind(&new.billing.state)
        .bind(&new.billing.zip_code)
        .bind(&new.billing.country)
        .bind(&new.billing.phone_number)
        .bind(&new.billing.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(from_row(&row))
    }

    pub async fn update(&self, id: i64, update: &PaymentProfileUpdate) -> Result<PaymentProfile> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE payment_profiles SET
                card_last4 = COALESCE($2, card_last4),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                street_address = COALESCE($5, street_address),
                city = COALESCE($6, city),
                state_province = COALESCE($7, state_province),
                zip_code = COALESCE($8, zip_code),
                country = COALESCE($9, country),
                phone_number = COALESCE($10, phone_number),
                email = COALESCE($11, email)
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.card_last4)
        .bind(&update.billing.first_name)
        .bind(&update.billing.last_name)
        .bind(&update.billing.street_address)
        .bind(&update.billing.city)
        .bind(&update.billing.state)
        .bind(&update.billing.zip_code)
        .bind(&update.billing.country)
        .bind(&update.billing.phone_number)
        .bind(&update.billing.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(from_row(&row))
    }
}
