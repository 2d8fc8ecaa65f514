use agency_content_server::{
    adapters::outbound::persistence::{
        connect_sqlite, SqlContactRepository, SqlImageRepository, SqlResourceRepository,
        SqlSubscriberRepository,
    },
    domain::models::{
        ContactStatus, ContactSubmission, GalleryCategory, NewContact, NewResource, PageRequest,
        ResourceDetails, ResourceFilter,
    },
    ports::repositories::{
        ContactRepository, ImageRepository, ResourceRepository, SubscriberRepository,
    },
    Collection, ContentError, EmailAddress, MediaRef, ResourceId, ResourceStatus,
    ValidationError, YoutubeVideoId,
};

async fn resource_repo() -> SqlResourceRepository {
    let pool = connect_sqlite("sqlite::memory:").await.unwrap();
    let repo = SqlResourceRepository::new(pool);
    repo.migrate().await.unwrap();
    repo
}

fn gallery_image(title: &str, order: u32, category: GalleryCategory) -> NewResource {
    NewResource {
        collection: Collection::Gallery,
        title: title.to_string(),
        description: String::new(),
        media: Some(MediaRef {
            url: format!("http://localhost:3000/media/digiora/gallery/{}.png", order),
            storage_id: format!("digiora/gallery/{}.png", order),
        }),
        order,
        status: ResourceStatus::Active,
        details: ResourceDetails::Gallery {
            category,
            tags: vec!["Studio".to_string(), "50%_off".to_string()],
            file_size: Some(1024),
        },
    }
}

fn video(title: &str, order: u32) -> NewResource {
    let youtube_id = YoutubeVideoId::from_url("https://youtu.be/dQw4w9WgXcQ").unwrap();
    NewResource {
        collection: Collection::Videos,
        title: title.to_string(),
        description: "Behind the scenes".to_string(),
        media: None,
        order,
        status: ResourceStatus::Active,
        details: ResourceDetails::Video {
            youtube_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            thumbnail_url: youtube_id.thumbnail_url(),
            youtube_id,
            views: 0,
        },
    }
}

#[tokio::test]
async fn test_insert_and_get_round_trip() {
    let repo = resource_repo().await;
    let created = repo
        .insert(gallery_image("Studio", 3, GalleryCategory::BrandDesignProject))
        .await
        .unwrap();

    let fetched = repo
        .get(Collection::Gallery, &created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, created);
    assert_eq!(repo.max_order(Collection::Gallery).await.unwrap(), Some(3));
    assert_eq!(repo.max_order(Collection::Videos).await.unwrap(), None);
    assert!(repo
        .get(Collection::Videos, &created.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_list_uses_canonical_order_and_pages() {
    let repo = resource_repo().await;
    let b = repo.insert(video("B", 1)).await.unwrap();
    let a = repo.insert(video("A", 0)).await.unwrap();
    let c = repo.insert(video("C", 2)).await.unwrap();

    let all = repo
        .list(Collection::Videos, &ResourceFilter::default(), None)
        .await
        .unwrap();
    let ids: Vec<ResourceId> = all.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![a.id.clone(), b.id.clone(), c.id.clone()]);

    let second_page = repo
        .list(
            Collection::Videos,
            &ResourceFilter::default(),
            Some(PageRequest::new(Some(2), 2).unwrap()),
        )
        .await
        .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].id, c.id);
    assert_eq!(
        repo.count(Collection::Videos, &ResourceFilter::default())
            .await
            .unwrap(),
        3
    );
}

#[tokio::test]
async fn test_filters_match_in_memory_semantics() {
    let repo = resource_repo().await;
    repo.insert(gallery_image("Brand kit", 0, GalleryCategory::BrandDesignProject))
        .await
        .unwrap();
    let mut hidden = gallery_image("Mailer", 1, GalleryCategory::EmailMarketing);
    hidden.status = ResourceStatus::Inactive;
    repo.insert(hidden).await.unwrap();

    let by_category = ResourceFilter {
        category: Some(GalleryCategory::EmailMarketing),
        ..Default::default()
    };
    assert_eq!(
        repo.count(Collection::Gallery, &by_category).await.unwrap(),
        1
    );
    assert_eq!(
        repo.count(Collection::Gallery, &ResourceFilter::active())
            .await
            .unwrap(),
        1
    );

    // LIKE wildcards in the term are literal
    let literal = ResourceFilter {
        search: Some("50%_".to_string()),
        ..Default::default()
    };
    assert_eq!(repo.count(Collection::Gallery, &literal).await.unwrap(), 2);
    let wildcard = ResourceFilter {
        search: Some("5%f".to_string()),
        ..Default::default()
    };
    assert_eq!(repo.count(Collection::Gallery, &wildcard).await.unwrap(), 0);

    let by_tag = ResourceFilter {
        search: Some("studio".to_string()),
        ..Default::default()
    };
    assert_eq!(repo.count(Collection::Gallery, &by_tag).await.unwrap(), 2);
}

#[tokio::test]
async fn test_apply_orders_is_atomic() {
    let repo = resource_repo().await;
    let a = repo.insert(video("A", 0)).await.unwrap();
    let b = repo.insert(video("B", 1)).await.unwrap();

    let result = repo
        .apply_orders(
            Collection::Videos,
            &[(b.id.clone(), 0), (ResourceId::generate(), 1), (a.id.clone(), 2)],
        )
        .await;
    assert!(matches!(result, Err(ContentError::NotFound { .. })));
    assert_eq!(
        repo.get(Collection::Videos, &b.id).await.unwrap().unwrap(),
        b
    );

    repo.apply_orders(Collection::Videos, &[(b.id.clone(), 0), (a.id.clone(), 1)])
        .await
        .unwrap();
    let b_after = repo.get(Collection::Videos, &b.id).await.unwrap().unwrap();
    assert_eq!(b_after.order, 0);
    assert!(b_after.updated_at > b.updated_at);
}

#[tokio::test]
async fn test_update_and_delete() {
    let repo = resource_repo().await;
    let mut resource = repo.insert(video("Reel", 0)).await.unwrap();
    let original = resource.clone();

    resource.title = "Reel v2".to_string();
    let updated = repo.update(&resource).await.unwrap();
    assert_eq!(updated.title, "Reel v2");
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);

    assert_eq!(
        repo.increment_views(Collection::Videos, &resource.id)
            .await
            .unwrap(),
        Some(1)
    );

    assert!(repo.delete(Collection::Videos, &resource.id).await.unwrap());
    assert!(!repo.delete(Collection::Videos, &resource.id).await.unwrap());
    assert!(matches!(
        repo.update(&resource).await,
        Err(ContentError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_contacts_and_subscribers() {
    let pool = connect_sqlite("sqlite::memory:").await.unwrap();
    let contacts = SqlContactRepository::new(pool.clone());
    let subscribers = SqlSubscriberRepository::new(pool);
    contacts.migrate().await.unwrap();
    subscribers.migrate().await.unwrap();

    let submission = ContactSubmission {
        first_name: Some("Grace".to_string()),
        last_name: Some("Hopper".to_string()),
        email: Some("grace@example.com".to_string()),
        message: Some("Can you run our ads?".to_string()),
        ..Default::default()
    };
    let contact = contacts
        .insert(NewContact::try_from(submission).unwrap())
        .await
        .unwrap();
    assert_eq!(contact.status, ContactStatus::New);

    let read = contacts
        .set_status(&contact.id, ContactStatus::Read)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read.status, ContactStatus::Read);
    assert_eq!(contacts.list().await.unwrap().len(), 1);
    assert!(contacts.delete(&contact.id).await.unwrap());
    assert!(contacts.get(&contact.id).await.unwrap().is_none());

    let email = EmailAddress::new("reader@example.com").unwrap();
    subscribers.insert(email.clone()).await.unwrap();
    let duplicate = subscribers.insert(email).await;
    assert!(matches!(
        duplicate,
        Err(ContentError::Validation(ValidationError::AlreadySubscribed(_)))
    ));
    assert_eq!(subscribers.list().await.unwrap().len(), 1);
}

fn library_image(name: &str) -> MediaRef {
    MediaRef {
        url: format!("http://localhost:3000/media/digiora/images/{}.jpg", name),
        storage_id: format!("digiora/images/{}.jpg", name),
    }
}

#[tokio::test]
async fn test_image_library_rows() {
    let pool = connect_sqlite("sqlite::memory:").await.unwrap();
    let repo = SqlImageRepository::new(pool);
    repo.migrate().await.unwrap();

    let older = repo.insert(library_image("older"), 2048).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let newer = repo.insert(library_image("newer"), 512).await.unwrap();

    assert_eq!(repo.get(&older.id).await.unwrap(), Some(older.clone()));
    let listed = repo.list().await.unwrap();
    assert_eq!(listed, vec![newer.clone(), older.clone()]);

    let replaced = repo
        .replace_media(&older.id, library_image("swapped"), 4096)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.media.storage_id, "digiora/images/swapped.jpg");
    assert_eq!(replaced.file_size, 4096);
    assert_eq!(replaced.created_at, older.created_at);
    assert!(replaced.updated_at > older.updated_at);

    let missing = ResourceId::generate();
    assert!(repo
        .replace_media(&missing, library_image("nowhere"), 1)
        .await
        .unwrap()
        .is_none());

    assert!(repo.delete(&newer.id).await.unwrap());
    assert!(!repo.delete(&newer.id).await.unwrap());
    assert_eq!(repo.list().await.unwrap(), vec![replaced]);
}
