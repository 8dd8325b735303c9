use async_trait::async_trait;

use crate::error::PollError;

/// Delivers text to the single destination chat.
///
/// Implementations must map every failure to
/// [`PollError::NotificationDelivery`].
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), PollError>;
}
