use std::collections::HashMap;
use std::sync::RwLock;

use parceltrack_core::{AggregateRoot, ExpectedVersion};
use parceltrack_delivery::{Delivery, DeliveryId};

use super::r#trait::{DeliveryRepository, Page, RepositoryError};

/// In-memory delivery repository.
///
/// Intended for tests/dev and as the default store while no relational
/// backend is in scope. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryDeliveryRepository {
    deliveries: RwLock<HashMap<DeliveryId, Delivery>>,
}

impl InMemoryDeliveryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeliveryRepository for InMemoryDeliveryRepository {
    fn find(&self, id: &DeliveryId) -> Result<Option<Delivery>, RepositoryError> {
        let deliveries = self
            .deliveries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(deliveries.get(id).cloned())
    }

    fn save(
        &self,
        delivery: Delivery,
        expected_version: ExpectedVersion,
    ) -> Result<(), RepositoryError> {
        let mut deliveries = self
            .deliveries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        // An absent aggregate counts as version 0, so an insert races like
        // any other write.
        let current = deliveries
            .get(&delivery.id_typed())
            .map(|stored| stored.version())
            .unwrap_or(0);

        if !expected_version.matches(current) {
            return Err(RepositoryError::Conflict(format!(
                "expected {expected_version:?}, found {current}"
            )));
        }

        deliveries.insert(delivery.id_typed(), delivery);
        Ok(())
    }

    fn list(&self, page: u64, per_page: u64) -> Result<Page<Delivery>, RepositoryError> {
        let deliveries = self
            .deliveries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut all: Vec<Delivery> = deliveries.values().cloned().collect();
        all.sort_by_key(|d| *d.id_typed().0.as_uuid());

        let total = all.len() as u64;
        let page = page.max(1);
        let start = (page - 1).saturating_mul(per_page) as usize;
        let items = all
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }
}
