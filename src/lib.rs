pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - content entities and value objects
pub use domain::{
    // Errors
    AuthError,
    // Models
    BulkAction,
    // Value objects
    Collection,
    Contact,
    ContactStatus,
    ContentError,
    ContentResult,
    EmailAddress,
    GalleryCategory,
    GalleryStats,
    LibraryImage,
    MediaRef,
    MediaUpload,
    Resource,
    ResourceDetails,
    ResourceFields,
    ResourceId,
    ResourcePage,
    ResourceQuery,
    ResourceStatus,
    Subscriber,
    ValidationError,
    YoutubeVideoId,
};

// Port types - interfaces for external systems
pub use ports::{
    Authenticator,
    // Repository ports
    ContactRepository,
    // Service ports
    ContactService,
    ImageLibrary,
    ImageRepository,
    // Storage ports
    MediaError,
    MediaStore,
    NewsletterService,
    OrderingService,
    ResourceRepository,
    ResourceService,
    StoredMedia,
    SubscriberRepository,
    WelcomeNotifier,
};

// Service implementations - business logic
pub use services::{
    ContactServiceImpl, ImageLibraryImpl, NewsletterServiceImpl, OrderingServiceImpl,
    ResourceServiceBuilder, ResourceServiceImpl,
};

// Application factory and configuration
pub use app::{
    create_app_from_env, create_in_memory_app, AdminPassword, AppBuilder, AppConfig,
    AppDependencies, AppError, AppServices, AuthConfig, RepositoryBackend, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::inbound::http::router::{create_router, AppState};
pub use adapters::outbound::storage::{MediaSettings, ObjectStoreMediaAdapter};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, AppBuilder, AppServices, Collection, ContentError, MediaStore,
        MediaUpload, Resource, ResourceFields, ResourceId, ResourceService, ResourceServiceImpl,
        ResourceStatus,
    };
}
