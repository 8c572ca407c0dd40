//! Service wiring: the repository and payout policy behind one handle.

use std::sync::Arc;

use thiserror::Error;

use parceltrack_core::{AggregateRoot, DomainError, DomainResult, ExpectedVersion};
use parceltrack_courier::PayoutPolicy;
use parceltrack_delivery::{Delivery, DeliveryId};
use parceltrack_infra::{DeliveryRepository, InMemoryDeliveryRepository, Page, RepositoryError};

/// Failure of a service-level operation: either the domain refused it or
/// the persistence seam did.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Shared application services handed to every handler.
pub struct AppServices {
    repository: Arc<dyn DeliveryRepository>,
    payout_policy: PayoutPolicy,
}

impl AppServices {
    pub fn new(payout_policy: PayoutPolicy) -> Self {
        Self {
            repository: Arc::new(InMemoryDeliveryRepository::new()),
            payout_policy,
        }
    }

    pub fn payout_policy(&self) -> &PayoutPolicy {
        &self.payout_policy
    }

    /// Draft a new delivery and persist it.
    pub fn create_draft(&self) -> Result<Delivery, ServiceError> {
        let delivery = Delivery::draft();
        self.repository
            .save(delivery.clone(), ExpectedVersion::Exact(0))?;
        Ok(delivery)
    }

    pub fn get(&self, id: &DeliveryId) -> Result<Option<Delivery>, ServiceError> {
        Ok(self.repository.find(id)?)
    }

    pub fn list(&self, page: u64, per_page: u64) -> Result<Page<Delivery>, ServiceError> {
        Ok(self.repository.list(page, per_page)?)
    }

    /// Load, mutate through the aggregate root, and save with an optimistic
    /// version check. The mutation's domain error propagates unchanged.
    pub fn update<F, T>(&self, id: &DeliveryId, mutate: F) -> Result<(Delivery, T), ServiceError>
    where
        F: FnOnce(&mut Delivery) -> DomainResult<T>,
    {
        let mut delivery = self
            .repository
            .find(id)?
            .ok_or(DomainError::NotFound)?;
        let loaded_version = delivery.version();

        let out = mutate(&mut delivery)?;

        self.repository
            .save(delivery.clone(), ExpectedVersion::Exact(loaded_version))?;
        Ok((delivery, out))
    }
}
