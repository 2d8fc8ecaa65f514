pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use repositories::{
    ContactRepository, ImageRepository, ResourceRepository, SubscriberRepository,
};
pub use services::{
    Authenticator, ContactService, ImageLibrary, NewsletterService, NotifyError, OrderingService,
    ResourceService, WelcomeNotifier,
};
pub use storage::{FetchedMedia, MediaError, MediaResult, MediaStore, StoredMedia};
