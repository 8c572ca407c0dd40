use thiserror::Error;

use parceltrack_core::ExpectedVersion;
use parceltrack_delivery::{Delivery, DeliveryId};

/// Persistence failure at the repository seam.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The stored aggregate moved since it was loaded; the write was refused
    /// whole (no partial item writes).
    #[error("optimistic concurrency conflict: {0}")]
    Conflict(String),

    /// Shared state became unusable (a writer panicked mid-mutation).
    #[error("repository lock poisoned")]
    LockPoisoned,
}

/// One page of an ordered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Persistence collaborator for the delivery aggregate.
///
/// `save` persists the full aggregate graph (root + current items) in one
/// shot, replacing removed items and inserting added ones. Concurrent
/// mutations to the same identity are serialized through the
/// [`ExpectedVersion`] check: of two racing saves loaded from the same
/// state, only one can succeed.
pub trait DeliveryRepository: Send + Sync {
    fn find(&self, id: &DeliveryId) -> Result<Option<Delivery>, RepositoryError>;

    fn save(
        &self,
        delivery: Delivery,
        expected_version: ExpectedVersion,
    ) -> Result<(), RepositoryError>;

    /// Page through all deliveries, ordered by identity (time-ordered ids,
    /// so creation order). `page` is 1-based.
    fn list(&self, page: u64, per_page: u64) -> Result<Page<Delivery>, RepositoryError>;
}
