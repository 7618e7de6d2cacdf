use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use kernel::notification::{Notification, Notifier};
use reqwest::Client;
use shared::{
    config::MailConfig,
    error::{AppError, AppResult},
};

/// Sends mail through an HTTP mail API that accepts a base64url encoded
/// RFC 822 message as `{"raw": ...}` (the Gmail send endpoint).
pub struct MailApiNotifier {
    client: Client,
    config: MailConfig,
}

impl MailApiNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn encode_message(&self, notification: &Notification) -> String {
        let from = self
            .config
            .sender
            .as_ref()
            .map(|s| format!("From: {s}\r\n"))
            .unwrap_or_default();
        let message = format!(
            "{}To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            from, notification.to, notification.subject, notification.body
        );
        general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes())
    }
}

#[async_trait]
impl Notifier for MailApiNotifier {
    async fn send(&self, notification: Notification) -> AppResult<()> {
        let raw = self.encode_message(&notification);
        let res = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.access_token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "mail API responded {status}: {body}"
            )));
        }

        tracing::debug!(to = %notification.to, "mail sent");
        Ok(())
    }
}
