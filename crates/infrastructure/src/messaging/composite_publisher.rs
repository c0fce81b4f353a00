use async_trait::async_trait;
use domain::DomainEvent;
use domain::event::{EventPublisher, PublishError};
use std::sync::Arc;

pub struct CompositeEventPublisher {
    publishers: Vec<Arc<dyn EventPublisher>>,
}

impl CompositeEventPublisher {
    pub fn new(publishers: Vec<Arc<dyn EventPublisher>>) -> Self {
        Self { publishers }
    }
}

#[async_trait]
impl EventPublisher for CompositeEventPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), PublishError> {
        for publisher in &self.publishers {
            // One failing sink must not starve the others
            if let Err(e) = publisher.publish(event.clone()).await {
                tracing::error!("Failed to deliver {} to a publisher: {}", event.event_type(), e);
            }
        }
        Ok(())
    }
}
