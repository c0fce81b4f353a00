//! Application layer - Use cases and the dashboard controller

pub mod dashboard;
pub mod identity;
pub mod repositories;
pub mod service;

pub use dashboard::{Command, Dashboard, StoreSummary};
pub use identity::{FarmerIdGenerator, IdGenerator, PrefixedIdGenerator};
pub use repositories::Repositories;
pub use service::RecordService;
