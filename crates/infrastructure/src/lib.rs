//! Infrastructure layer - Stores, fixtures, configuration and event sinks

pub mod config;
pub mod fixtures;
pub mod messaging;
pub mod repositories;

pub use config::DashboardConfig;
pub use fixtures::SeedData;
pub use messaging::{BroadcastEventPublisher, CompositeEventPublisher, TracingEventPublisher};
pub use repositories::InMemoryRepository;
