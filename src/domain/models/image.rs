use chrono::{DateTime, Utc};

use crate::domain::value_objects::{MediaRef, ResourceId};

/// Media store folder holding library images
pub const IMAGE_LIBRARY_FOLDER: &str = "images";

/// A standalone uploaded image, outside any ordered collection.
///
/// Always owns exactly one blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryImage {
    pub id: ResourceId,
    pub media: MediaRef,
    pub file_size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Newest first, ties broken by id
pub fn sort_newest_first(images: &mut [LibraryImage]) {
    images.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn image(id: &str, created_secs: i64) -> LibraryImage {
        let created_at = Utc.timestamp_opt(created_secs, 0).unwrap();
        LibraryImage {
            id: ResourceId::new(id.to_string()).unwrap(),
            media: MediaRef {
                url: format!("/media/digiora/images/{}.png", id),
                storage_id: format!("digiora/images/{}.png", id),
            },
            file_size: 1,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_sort_newest_first_breaks_ties_by_id() {
        let mut images = vec![image("b", 10), image("c", 20), image("a", 10)];
        sort_newest_first(&mut images);

        let ids: Vec<&str> = images.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
