mod contact_repository;
mod image_repository;
mod resource_repository;
mod subscriber_repository;

pub use contact_repository::ContactRepository;
pub use image_repository::ImageRepository;
pub use resource_repository::ResourceRepository;
pub use subscriber_repository::SubscriberRepository;
