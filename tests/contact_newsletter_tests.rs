use agency_content_server::{
    create_in_memory_app,
    domain::models::{ContactStatus, ContactSubmission},
    ports::services::{ContactService, NewsletterService, NotifyError, WelcomeNotifier},
    AppBuilder, ContentError, EmailAddress, ResourceId, ValidationError,
};
use async_trait::async_trait;
use std::sync::Arc;

struct UnreachableMailer;

#[async_trait]
impl WelcomeNotifier for UnreachableMailer {
    async fn send_welcome(&self, _email: &EmailAddress) -> Result<(), NotifyError> {
        Err(NotifyError("smtp relay unreachable".to_string()))
    }
}

fn submission(first_name: &str) -> ContactSubmission {
    ContactSubmission {
        first_name: Some(first_name.to_string()),
        last_name: Some("Client".to_string()),
        email: Some(format!("{}@example.com", first_name.to_lowercase())),
        company: Some("  ".to_string()),
        message: Some("Please call me back.".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_contacts_are_listed_newest_first() {
    let app = create_in_memory_app().await.unwrap();

    let first = app.contacts.submit(submission("Ann")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = app.contacts.submit(submission("Bob")).await.unwrap();
    assert_eq!(first.status, ContactStatus::New);
    assert_eq!(first.company, None);

    let listed: Vec<ResourceId> = app
        .contacts
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(listed, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_contact_status_transitions() {
    let app = create_in_memory_app().await.unwrap();
    let contact = app.contacts.submit(submission("Cy")).await.unwrap();

    let archived = app
        .contacts
        .set_status(&contact.id, "archived")
        .await
        .unwrap();
    assert_eq!(archived.status, ContactStatus::Archived);
    assert!(archived.updated_at > contact.updated_at);

    let invalid = app.contacts.set_status(&contact.id, "spam").await;
    assert!(matches!(
        invalid,
        Err(ContentError::Validation(ValidationError::InvalidContactStatus(_)))
    ));

    app.contacts.delete(&contact.id).await.unwrap();
    let gone = app.contacts.get(&contact.id).await;
    assert!(matches!(gone, Err(ContentError::ContactNotFound { .. })));
}

#[tokio::test]
async fn test_contact_requires_message() {
    let app = create_in_memory_app().await.unwrap();
    let mut incomplete = submission("Di");
    incomplete.message = None;

    let result = app.contacts.submit(incomplete).await;
    assert!(matches!(result, Err(ContentError::Validation(_))));
    assert!(app.contacts.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_subscribe_normalizes_and_rejects_duplicates() {
    let app = create_in_memory_app().await.unwrap();

    let subscription = app
        .newsletter
        .subscribe("  Fan@Example.COM ")
        .await
        .unwrap();
    assert!(subscription.notified);
    assert_eq!(subscription.subscriber.email.as_str(), "fan@example.com");

    let duplicate = app.newsletter.subscribe("fan@example.com").await;
    assert!(matches!(
        duplicate,
        Err(ContentError::Validation(ValidationError::AlreadySubscribed(_)))
    ));
    assert_eq!(app.newsletter.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_welcome_notice_still_subscribes() {
    let app = AppBuilder::new()
        .with_notifier(Arc::new(UnreachableMailer))
        .build()
        .await
        .unwrap();

    let subscription = app.newsletter.subscribe("quiet@example.com").await.unwrap();
    assert!(!subscription.notified);
    assert_eq!(app.newsletter.list().await.unwrap().len(), 1);
}
