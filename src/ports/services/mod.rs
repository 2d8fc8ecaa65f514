mod authenticator;
mod contact_service;
mod image_library;
mod newsletter_service;
mod ordering_service;
mod resource_service;

pub use authenticator::Authenticator;
pub use contact_service::ContactService;
pub use image_library::ImageLibrary;
pub use newsletter_service::{NewsletterService, NotifyError, WelcomeNotifier};
pub use ordering_service::OrderingService;
pub use resource_service::ResourceService;
