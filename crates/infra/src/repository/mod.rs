mod in_memory;
mod r#trait;

pub use in_memory::InMemoryDeliveryRepository;
pub use r#trait::{DeliveryRepository, Page, RepositoryError};
