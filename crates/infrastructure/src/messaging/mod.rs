pub mod broadcast_publisher;
pub mod composite_publisher;
pub mod tracing_publisher;

pub use broadcast_publisher::BroadcastEventPublisher;
pub use composite_publisher::CompositeEventPublisher;
pub use tracing_publisher::TracingEventPublisher;
