use crate::DomainEvent;
use async_trait::async_trait;

pub type PublishError = Box<dyn std::error::Error + Send + Sync>;

/// Outbound port for store change notifications.
///
/// Publishing is best effort: callers log a failure and keep the mutation.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DomainEvent) -> Result<(), PublishError>;
}
