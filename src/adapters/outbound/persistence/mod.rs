// In-memory implementations
pub mod in_memory_contact_repository;
pub mod in_memory_image_repository;
pub mod in_memory_resource_repository;
pub mod in_memory_subscriber_repository;

// SQLite implementations
pub mod sql_contact_repository;
pub mod sql_image_repository;
pub mod sql_resource_repository;
pub mod sql_subscriber_repository;
mod sql_support;

pub use in_memory_contact_repository::InMemoryContactRepository;
pub use in_memory_image_repository::InMemoryImageRepository;
pub use in_memory_resource_repository::InMemoryResourceRepository;
pub use in_memory_subscriber_repository::InMemorySubscriberRepository;
pub use sql_contact_repository::SqlContactRepository;
pub use sql_image_repository::SqlImageRepository;
pub use sql_resource_repository::SqlResourceRepository;
pub use sql_subscriber_repository::SqlSubscriberRepository;
pub use sql_support::connect_sqlite;
