use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use domain::record::{District, EntityRepository, Farmer, Mandal, Village};
use domain::{FarmerId, FormValues, LocationIndex, Record, Result};
use std::marker::PhantomData;
use std::sync::Arc;

/// Issues the identifier of a record about to be created.
///
/// Runs after field validation, so `values` already passed every rule.
#[async_trait]
pub trait IdGenerator<E: Record>: Send + Sync {
    async fn next_id(&self, values: &FormValues, existing: &[E], now: DateTime<Utc>)
    -> Result<String>;
}

/// `<PREFIX><unix millis>`, as in `DIST1706700000000`.
///
/// Two creates in the same millisecond produce the same id; the store
/// rejects the second one.
pub struct PrefixedIdGenerator<E> {
    prefix: &'static str,
    _record: PhantomData<fn() -> E>,
}

impl<E> PrefixedIdGenerator<E> {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Record> IdGenerator<E> for PrefixedIdGenerator<E> {
    async fn next_id(
        &self,
        _values: &FormValues,
        _existing: &[E],
        now: DateTime<Utc>,
    ) -> Result<String> {
        Ok(format!("{}{}", self.prefix, now.timestamp_millis()))
    }
}

/// Composite farmer ids, with location codes read from the location stores
pub struct FarmerIdGenerator {
    districts: Arc<dyn EntityRepository<District>>,
    mandals: Arc<dyn EntityRepository<Mandal>>,
    villages: Arc<dyn EntityRepository<Village>>,
}

impl FarmerIdGenerator {
    pub fn new(
        districts: Arc<dyn EntityRepository<District>>,
        mandals: Arc<dyn EntityRepository<Mandal>>,
        villages: Arc<dyn EntityRepository<Village>>,
    ) -> Self {
        Self {
            districts,
            mandals,
            villages,
        }
    }

    /// Current district > mandal > village hierarchy
    pub async fn location_index(&self) -> Result<LocationIndex> {
        let districts = self.districts.find_all().await?;
        let mandals = self.mandals.find_all().await?;
        let villages = self.villages.find_all().await?;
        Ok(LocationIndex::build(&districts, &mandals, &villages))
    }
}

#[async_trait]
impl IdGenerator<Farmer> for FarmerIdGenerator {
    async fn next_id(
        &self,
        values: &FormValues,
        existing: &[Farmer],
        now: DateTime<Utc>,
    ) -> Result<String> {
        let codes = self.location_index().await?.resolve(values)?;
        let id = FarmerId::next(codes, now.year(), existing.iter().map(|f| f.id()))?;
        tracing::debug!(farmer_id = %id, "Issued farmer id");
        Ok(id.to_string())
    }
}
