mod contact_service_impl;
mod image_library_impl;
mod newsletter_service_impl;
mod ordering_service_impl;
mod resource_service_impl;

pub use contact_service_impl::ContactServiceImpl;
pub use image_library_impl::ImageLibraryImpl;
pub use newsletter_service_impl::NewsletterServiceImpl;
pub use ordering_service_impl::OrderingServiceImpl;
pub use resource_service_impl::{ResourceServiceBuilder, ResourceServiceImpl};
