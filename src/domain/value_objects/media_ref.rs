use serde::{Deserialize, Serialize};

/// A resource's link to a blob held by the media store.
///
/// `url` is publicly fetchable; `storage_id` is the store's handle used to
/// replace or delete the blob. Both are always set together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
    pub storage_id: String,
}
