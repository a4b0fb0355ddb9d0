use serde_json::Value;

/// Best-effort push of profile/transaction data to the partner system. Both
/// calls are fire-and-forget: failures are logged and never fail or reverse
/// the operation that triggered them.
#[async_trait::async_trait]
pub trait PartnerNotifier: Send + Sync {
    async fn notify_payment_profile_created(&self, payload: Value);
    async fn notify_transaction_recorded(&self, payload: Value);
}

#[derive(Clone)]
pub struct HttpPartnerNotifier {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl HttpPartnerNotifier {
    async fn post(&self, path: &str, payload: &Value) {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        match self.client.post(&url).json(payload).send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(
                    %url,
                    status = response.status().as_u16(),
                    "partner notification rejected"
                );
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%url, error = %err, "partner notification failed");
            }
        }
    }
}

#[async_trait::async_trait]
impl PartnerNotifier for HttpPartnerNotifier {
    async fn notify_payment_profile_created(&self, payload: Value) {
        self.post("payment-profiles", &payload).await;
    }

    async fn notify_transaction_recorded(&self, payload: Value) {
        self.post("payments", &payload).await;
    }
}
