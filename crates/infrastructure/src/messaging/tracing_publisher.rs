use async_trait::async_trait;
use domain::DomainEvent;
use domain::event::{EventPublisher, PublishError};

/// Writes every store change to the log
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), PublishError> {
        tracing::info!(
            kind = event.kind().as_str(),
            record_id = event.record_id(),
            "{}",
            event.event_type()
        );
        Ok(())
    }
}
