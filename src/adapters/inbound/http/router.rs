use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, patch, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    bulk, create_resource, delete_contact, delete_image, delete_resource, get_contact, get_image,
    get_resource, health, list_active, list_all, list_contacts, list_images, list_subscribers,
    login, record_view, reorder, replace_image, root, serve_media, set_contact_status, set_order,
    set_status, stats, submit_contact, subscribe, update_resource, upload_image,
};
use crate::{
    domain::{models::MAX_UPLOAD_BYTES, value_objects::Collection},
    ports::{
        services::{
            Authenticator, ContactService, ImageLibrary, NewsletterService, OrderingService,
            ResourceService,
        },
        storage::MediaStore,
    },
};

/// Multipart framing and text fields ride on top of the file itself
const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub resources: Arc<dyn ResourceService>,
    pub ordering: Arc<dyn OrderingService>,
    pub contacts: Arc<dyn ContactService>,
    pub newsletter: Arc<dyn NewsletterService>,
    pub images: Arc<dyn ImageLibrary>,
    pub authenticator: Arc<dyn Authenticator>,
    pub media: Arc<dyn MediaStore>,
}

/// Routes shared by every ordered collection
fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active).post(create_resource))
        .route("/admin/all", get(list_all))
        .route("/admin/order", put(reorder))
        .route(
            "/{id}",
            get(get_resource)
                .put(update_resource)
                .delete(delete_resource),
        )
        .route("/{id}/status", patch(set_status))
}

/// Router for one collection; handlers learn which one from the extension
pub fn create_collection_router(collection: Collection) -> Router<AppState> {
    let router = match collection {
        Collection::Services => collection_routes(),
        Collection::Gallery => collection_routes()
            .route("/stats", get(stats))
            .route("/bulk", post(bulk)),
        Collection::Videos => collection_routes()
            .route("/{id}/order", patch(set_order))
            .route("/{id}/view", post(record_view)),
    };
    router.layer(Extension(collection))
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_contact).get(list_contacts))
        .route("/{id}", get(get_contact).delete(delete_contact))
        .route("/{id}/status", patch(set_contact_status))
}

fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_images))
        .route("/upload", post(upload_image))
        .route(
            "/{id}",
            get(get_image).put(replace_image).delete(delete_image),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

/// Create the main application router with all endpoints.
///
/// An empty `cors_origins` allows any origin.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(
            "/api/services",
            create_collection_router(Collection::Services),
        )
        .nest("/api/gallery", create_collection_router(Collection::Gallery))
        .nest("/api/videos", create_collection_router(Collection::Videos))
        .nest("/api/contacts", contact_routes())
        .nest("/api/images", image_routes())
        .route("/api/newsletter", post(subscribe).get(list_subscribers))
        .route("/api/auth/login", post(login))
        .route("/media/{*storage_id}", get(serve_media))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
