use crate::config::GatewayCredentials;
use crate::domain::profile::{BillingAddress, OpaquePaymentToken};
use crate::gateways::executor::{self, ExecutorSettings, GatewayCallError};
use crate::gateways::outcome::{
    self, ChargeOutcome, ProfileCreateOutcome, ProfileDeleteOutcome, ProfileUpdateOutcome,
};
use crate::gateways::{
    ChargeProfileRequest, CreateProfileRequest, ProfileGateway, UpdateProfileRequest,
};
use serde_json::{json, Map, Value};

/// Adapter for the Authorize.Net JSON API. All calls go through the bounded
/// timeout/retry executor; raw replies are handed to the strict interpreters
/// in `outcome`.
pub struct AuthorizeNetGateway {
    pub endpoint: String,
    pub validation_mode: &'static str,
    pub executor: ExecutorSettings,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl ProfileGateway for AuthorizeNetGateway {
    async fn create_customer_profile(
        &self,
        credentials: &GatewayCredentials,
        request: CreateProfileRequest,
    ) -> Result<ProfileCreateOutcome, GatewayCallError> {
        let mut profile = json!({
            "merchantCustomerId": request.merchant_customer_id,
            "description": request.description,
            "email": request.email,
        });
        if let Some(payment) = &request.payment {
            profile["paymentProfiles"] = json!({
                "customerType": "individual",
                "billTo": bill_to_json(&payment.bill_to),
                "payment": payment_json(&payment.token),
            });
        }

        let body = json!({
            "createCustomerProfileRequest": {
                "merchantAuthentication": auth_json(credentials),
                "profile": profile,
                "validationMode": self.validation_mode,
            }
        });

        let raw = self.post(body).await?;
        Ok(outcome::interpret_create_profile(raw))
    }

    async fn charge(
        &self,
        credentials: &GatewayCredentials,
        request: ChargeProfileRequest,
    ) -> Result<ChargeOutcome, GatewayCallError> {
        let body = json!({
            "createTransactionRequest": {
                "merchantAuthentication": auth_json(credentials),
                "transactionRequest": {
                    "transactionType": "authCaptureTransaction",
                    "amount": request.amount.round_dp(2).to_string(),
                    "profile": {
                        "customerProfileId": request.gateway_customer_profile_id,
                        "paymentProfile": {
                            "paymentProfileId": request.gateway_payment_profile_id,
                        },
                    },
                }
            }
        });

        let raw = self.post(body).await?;
        Ok(outcome::interpret_charge(raw))
    }

    async fn update_payment_profile(
        &self,
        credentials: &GatewayCredentials,
        request: UpdateProfileRequest,
    ) -> Result<ProfileUpdateOutcome, GatewayCallError> {
        let mut payment_profile = json!({
            "customerPaymentProfileId": request.gateway_payment_profile_id,
            "billTo": bill_to_json(&request.bill_to),
        });
        if let Some(token) = &request.token {
            payment_profile["payment"] = payment_json(token);
        }

        let body = json!({
            "updateCustomerPaymentProfileRequest": {
                "merchantAuthentication": auth_json(credentials),
                "customerProfileId": request.gateway_customer_profile_id,
                "paymentProfile": payment_profile,
                "validationMode": self.validation_mode,
            }
        });

        let raw = self.post(body).await?;
        Ok(outcome::interpret_update_profile(raw))
    }

    async fn delete_customer_profile(
        &self,
        credentials: &GatewayCredentials,
        gateway_customer_profile_id: &str,
    ) -> Result<ProfileDeleteOutcome, GatewayCallError> {
        let body = json!({
            "deleteCustomerProfileRequest": {
                "merchantAuthentication": auth_json(credentials),
                "customerProfileId": gateway_customer_profile_id,
            }
        });

        let raw = self.post(body).await?;
        Ok(outcome::interpret_delete_profile(raw))
    }
}

impl AuthorizeNetGateway {
    async fn post(&self, body: Value) -> Result<Value, GatewayCallError> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        executor::execute(&self.executor, move || {
            post_json(client.clone(), endpoint.clone(), body.clone())
        })
        .await
    }
}

async fn post_json(
    client: reqwest::Client,
    endpoint: String,
    body: Value,
) -> Result<Value, GatewayCallError> {
    let response = client
        .post(&endpoint)
        .json(&body)
        .send()
        .await
        .map_err(classify_send_error)?;

    let status = response.status();
    if status.is_server_error() {
        return Err(GatewayCallError::Http(status.as_u16()));
    }
    if !status.is_success() {
        return Err(GatewayCallError::Fatal(format!(
            "gateway returned HTTP {status}"
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|e| GatewayCallError::Fatal(e.to_string()))?;

    // the gateway prefixes JSON replies with a UTF-8 BOM; a body that still
    // does not parse surfaces as a malformed outcome, not a transport error
    let trimmed = text.trim_start_matches('\u{feff}');
    Ok(serde_json::from_str(trimmed).unwrap_or(Value::Null))
}

fn classify_send_error(err: reqwest::Error) -> GatewayCallError {
    if err.is_timeout() {
        GatewayCallError::Timeout
    } else if err.is_connect() {
        GatewayCallError::Transport(err.to_string())
    } else {
        GatewayCallError::Fatal(err.to_string())
    }
}

fn auth_json(credentials: &GatewayCredentials) -> Value {
    json!({
        "name": credentials.login_id,
        "transactionKey": credentials.transaction_key,
    })
}

fn payment_json(token: &OpaquePaymentToken) -> Value {
    json!({
        "opaqueData": {
            "dataDescriptor": token.data_descriptor,
            "dataValue": token.data_value,
        }
    })
}

fn bill_to_json(bill_to: &BillingAddress) -> Value {
    let mut fields = Map::new();
    let mut put = |key: &str, value: &Option<String>| {
        if let Some(value) = value {
            fields.insert(key.to_string(), Value::String(value.clone()));
        }
    };
    put("firstName", &bill_to.first_name);
    put("lastName", &bill_to.last_name);
    put("address", &bill_to.street_address);
    put("city", &bill_to.city);
    put("state", &bill_to.state);
    put("zip", &bill_to.zip_code);
    put("country", &bill_to.country);
    put("phoneNumber", &bill_to.phone_number);
    put("email", &bill_to.email);
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_to_includes_only_present_fields() {
        let bill_to = BillingAddress {
            first_name: Some("Ada".to_string()),
            zip_code: Some("94105".to_string()),
            ..Default::default()
        };
        let value = bill_to_json(&bill_to);
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["firstName"], "Ada");
        assert_eq!(obj["zip"], "94105");
    }
}
