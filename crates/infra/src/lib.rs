//! Infrastructure adapters around the delivery domain.
//!
//! The domain crates stay IO-free; this crate supplies the persistence seam
//! (repository trait + in-memory implementation) the service layer wires in.

pub mod repository;

pub use repository::{
    DeliveryRepository, InMemoryDeliveryRepository, Page, RepositoryError,
};
