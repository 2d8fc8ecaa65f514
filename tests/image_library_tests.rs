use agency_content_server::{
    adapters::outbound::{
        persistence::InMemoryImageRepository,
        storage::{create_memory_store, MediaSettings, ObjectStoreMediaAdapter},
    },
    domain::models::MediaUpload,
    ports::{
        services::ImageLibrary,
        storage::{FetchedMedia, MediaError, MediaResult, MediaStore, StoredMedia},
    },
    ContentError, ImageLibraryImpl, ResourceId, ValidationError,
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

/// Media store that records deletes and can be told to fail them
struct TrackingMediaStore {
    inner: ObjectStoreMediaAdapter,
    fail_deletes: AtomicBool,
    deletes: Mutex<Vec<String>>,
}

impl TrackingMediaStore {
    fn new() -> Self {
        Self {
            inner: ObjectStoreMediaAdapter::new(create_memory_store(), MediaSettings::default()),
            fail_deletes: AtomicBool::new(false),
            deletes: Mutex::new(Vec::new()),
        }
    }

    fn deleted(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for TrackingMediaStore {
    async fn upload(&self, upload: MediaUpload, folder: &str) -> MediaResult<StoredMedia> {
        self.inner.upload(upload, folder).await
    }

    async fn delete(&self, storage_id: &str) -> MediaResult<()> {
        self.deletes.lock().unwrap().push(storage_id.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(MediaError::Backend("delete request timed out".to_string()));
        }
        self.inner.delete(storage_id).await
    }

    async fn fetch(&self, storage_id: &str) -> MediaResult<FetchedMedia> {
        self.inner.fetch(storage_id).await
    }
}

fn library() -> (ImageLibraryImpl, Arc<TrackingMediaStore>) {
    let media = Arc::new(TrackingMediaStore::new());
    let library = ImageLibraryImpl::new(Arc::new(InMemoryImageRepository::new()), media.clone());
    (library, media)
}

fn jpeg(bytes: &'static [u8]) -> MediaUpload {
    MediaUpload::new(bytes, "image/jpeg").with_file_name("hero.jpg")
}

#[tokio::test]
async fn test_upload_stores_blob_under_images_folder() {
    let (library, media) = library();

    let image = library.upload(jpeg(b"hero shot")).await.unwrap();
    assert!(image.media.storage_id.starts_with("digiora/images/"));
    assert!(image.media.storage_id.ends_with(".jpg"));
    assert_eq!(image.file_size, 9);
    assert_eq!(image.created_at, image.updated_at);

    let fetched = media.fetch(&image.media.storage_id).await.unwrap();
    assert_eq!(fetched.data.as_ref(), b"hero shot");
    assert_eq!(library.get(&image.id).await.unwrap(), image);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (library, _) = library();

    let first = library.upload(jpeg(b"one")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    let second = library.upload(jpeg(b"two")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    let third = library.upload(jpeg(b"three")).await.unwrap();

    let ids: Vec<ResourceId> = library
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|image| image.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_non_image_is_rejected_before_storage() {
    let (library, _) = library();

    let result = library
        .upload(MediaUpload::new(&b"%PDF-1.7"[..], "application/pdf"))
        .await;
    assert!(matches!(
        result,
        Err(ContentError::Validation(ValidationError::UnsupportedMediaType(_)))
    ));
    assert!(library.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replace_swaps_blob_and_deletes_old_one() {
    let (library, media) = library();
    let image = library.upload(jpeg(b"old")).await.unwrap();

    let replaced = library
        .replace(&image.id, MediaUpload::new(&b"newer"[..], "image/png"))
        .await
        .unwrap();

    assert_eq!(replaced.id, image.id);
    assert_eq!(replaced.created_at, image.created_at);
    assert!(replaced.updated_at > image.updated_at);
    assert_eq!(replaced.file_size, 5);
    assert_ne!(replaced.media.storage_id, image.media.storage_id);
    assert!(replaced.media.storage_id.ends_with(".png"));

    assert_eq!(media.deleted(), vec![image.media.storage_id.clone()]);
    assert!(matches!(
        media.fetch(&image.media.storage_id).await,
        Err(MediaError::NotFound(_))
    ));
    assert_eq!(
        media.fetch(&replaced.media.storage_id).await.unwrap().data.as_ref(),
        b"newer"
    );
}

#[tokio::test]
async fn test_failed_old_blob_delete_keeps_image() {
    let (library, media) = library();
    let image = library.upload(jpeg(b"old")).await.unwrap();
    media.fail_deletes.store(true, Ordering::SeqCst);

    let result = library.replace(&image.id, jpeg(b"new")).await;
    assert!(matches!(
        result,
        Err(ContentError::Storage { ref operation, .. }) if operation == "delete"
    ));
    assert_eq!(library.get(&image.id).await.unwrap(), image);
}

#[tokio::test]
async fn test_delete_removes_record_and_blob() {
    let (library, media) = library();
    let image = library.upload(jpeg(b"bye")).await.unwrap();

    library.delete(&image.id).await.unwrap();

    assert!(matches!(
        library.get(&image.id).await,
        Err(ContentError::ImageNotFound { .. })
    ));
    assert!(matches!(
        media.fetch(&image.media.storage_id).await,
        Err(MediaError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_tolerates_missing_blob() {
    let (library, media) = library();
    let image = library.upload(jpeg(b"gone")).await.unwrap();
    media.inner.delete(&image.media.storage_id).await.unwrap();

    library.delete(&image.id).await.unwrap();
    assert!(library.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_blob_delete_keeps_image() {
    let (library, media) = library();
    let image = library.upload(jpeg(b"stay")).await.unwrap();
    media.fail_deletes.store(true, Ordering::SeqCst);

    assert!(matches!(
        library.delete(&image.id).await,
        Err(ContentError::Storage { .. })
    ));
    assert_eq!(library.list().await.unwrap(), vec![image]);
}

#[tokio::test]
async fn test_unknown_image_is_not_found() {
    let (library, media) = library();
    let missing = ResourceId::generate();

    assert!(matches!(
        library.get(&missing).await,
        Err(ContentError::ImageNotFound { .. })
    ));
    assert!(matches!(
        library.replace(&missing, jpeg(b"x")).await,
        Err(ContentError::ImageNotFound { .. })
    ));
    assert!(matches!(
        library.delete(&missing).await,
        Err(ContentError::ImageNotFound { .. })
    ));
    assert!(media.deleted().is_empty());
}
