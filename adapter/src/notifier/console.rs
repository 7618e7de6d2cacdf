use async_trait::async_trait;
use kernel::notification::{Notification, Notifier};
use shared::error::AppResult;

/// Writes notifications to the log instead of sending them.
#[derive(Clone, Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: Notification) -> AppResult<()> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            body = %notification.body,
            "notification (not delivered)"
        );
        Ok(())
    }
}
