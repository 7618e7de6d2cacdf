use async_trait::async_trait;
use derive_new::new;
use shared::error::AppResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> AppResult<()>;
}

/// Sends notifications in the background. Failures are logged and dropped;
/// they never reach the caller that triggered the notification.
#[derive(Clone, new)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn dispatch(&self, notification: Notification) -> JoinHandle<()> {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            let to = notification.to.clone();
            if let Err(e) = notifier.send(notification).await {
                tracing::warn!(
                    error.message = %e,
                    to = %to,
                    "failed to send notification"
                );
            }
        })
    }
}
