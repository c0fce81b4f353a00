use domain::record::{
    District, Employee, EntityRepository, Farmer, Mandal, ProcurementBatch, ProcurementCenter,
    Village,
};
use domain::Result;
use infrastructure::{InMemoryRepository, SeedData};
use std::sync::Arc;

/// One store per entity type
#[derive(Clone)]
pub struct Repositories {
    pub districts: Arc<dyn EntityRepository<District>>,
    pub mandals: Arc<dyn EntityRepository<Mandal>>,
    pub villages: Arc<dyn EntityRepository<Village>>,
    pub centers: Arc<dyn EntityRepository<ProcurementCenter>>,
    pub employees: Arc<dyn EntityRepository<Employee>>,
    pub farmers: Arc<dyn EntityRepository<Farmer>>,
    pub batches: Arc<dyn EntityRepository<ProcurementBatch>>,
}

impl Repositories {
    /// Session stores seeded from fixtures
    pub fn in_memory(seed: SeedData) -> Result<Self> {
        Ok(Self {
            districts: Arc::new(InMemoryRepository::with_records(seed.districts)?),
            mandals: Arc::new(InMemoryRepository::with_records(seed.mandals)?),
            villages: Arc::new(InMemoryRepository::with_records(seed.villages)?),
            centers: Arc::new(InMemoryRepository::with_records(seed.centers)?),
            employees: Arc::new(InMemoryRepository::with_records(seed.employees)?),
            farmers: Arc::new(InMemoryRepository::with_records(seed.farmers)?),
            batches: Arc::new(InMemoryRepository::with_records(seed.batches)?),
        })
    }
}
