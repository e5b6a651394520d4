//! File engine behavior: create/delete flows, quota, pagination.

mod helpers;

use std::sync::atomic::Ordering;

use chrono::{Duration, Utc};
use uuid::Uuid;

use helpers::{MEDIA_BUCKET, UPLOAD_BUCKET};
use mediastore_core::error::ErrorKind;
use mediastore_core::events::EventType;
use mediastore_core::traits::bucket::BucketStore;
use mediastore_core::types::pagination::{next_token, PageRequest};
use mediastore_entity::file::FileFilters;

const GIB: i64 = 1 << 30;

#[tokio::test]
async fn test_create_moves_object_and_updates_counters() {
    let t = helpers::engines(GIB);
    let customer_id = Uuid::new_v4();
    t.accounts.create(customer_id).await.unwrap();
    helpers::seed_upload(&t.bucket, "staging/call.wav", 1024).await;

    let file = t
        .files
        .create(helpers::create_request(customer_id, "staging/call.wav", "call.wav"))
        .await
        .unwrap();

    assert_eq!(file.filesize, 1024);
    assert_eq!(file.bucket_name, MEDIA_BUCKET);
    assert_eq!(file.filepath, format!("files/{}/call.wav", file.id));
    assert!(!file.uri_download.is_empty());

    // Ten-year download link.
    let expected = Utc::now() + Duration::days(3650);
    assert!((file.download_expires_at - expected).num_minutes().abs() < 5);

    // Object moved out of the upload bucket.
    assert!(!t.bucket.exists(UPLOAD_BUCKET, "staging/call.wav").await.unwrap());
    assert!(t.bucket.exists(MEDIA_BUCKET, &file.filepath).await.unwrap());

    let account = t.accounts.get(file.account_id).await.unwrap();
    assert_eq!(account.total_file_count, 1);
    assert_eq!(account.total_file_size, 1024);

    assert_eq!(t.notifier.count_of(EventType::FileCreated), 1);
}

#[tokio::test]
async fn test_create_event_payload_hides_bucket_coordinates() {
    let t = helpers::engines(GIB);
    let customer_id = Uuid::new_v4();
    t.accounts.create(customer_id).await.unwrap();
    helpers::seed_upload(&t.bucket, "staging/a.wav", 10).await;

    t.files
        .create(helpers::create_request(customer_id, "staging/a.wav", "a.wav"))
        .await
        .unwrap();

    let events = t.notifier.events();
    let (_, _, payload) = events
        .iter()
        .find(|(_, ty, _)| *ty == EventType::FileCreated)
        .unwrap();
    assert!(payload.get("filepath").is_none());
    assert!(payload.get("bucket_name").is_none());
    assert!(payload.get("uri_download").is_some());
}

#[tokio::test]
async fn test_create_missing_source_is_not_found() {
    let t = helpers::engines(GIB);
    let customer_id = Uuid::new_v4();
    t.accounts.create(customer_id).await.unwrap();

    let err = t
        .files
        .create(helpers::create_request(customer_id, "staging/missing.wav", "m.wav"))
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_create_over_quota_leaves_no_trace() {
    let t = helpers::engines(1000);
    let customer_id = Uuid::new_v4();
    let account = t.accounts.create(customer_id).await.unwrap();
    t.accounts
        .increase_file_info(account.id, 1, 500)
        .await
        .unwrap();
    helpers::seed_upload(&t.bucket, "staging/big.wav", 600).await;

    let err = t
        .files
        .create(helpers::create_request(customer_id, "staging/big.wav", "big.wav"))
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::QuotaExceeded));

    // No row, unchanged counters, source untouched.
    let files = t
        .files
        .list(&PageRequest::default(), &FileFilters::for_customer(customer_id))
        .await
        .unwrap();
    assert!(files.is_empty());

    let account = t.accounts.get(account.id).await.unwrap();
    assert_eq!(account.total_file_count, 1);
    assert_eq!(account.total_file_size, 500);

    assert!(t.bucket.exists(UPLOAD_BUCKET, "staging/big.wav").await.unwrap());
}

#[tokio::test]
async fn test_create_collision_leaves_source_untouched() {
    let t = helpers::engines(GIB);
    let customer_id = Uuid::new_v4();
    t.accounts.create(customer_id).await.unwrap();
    helpers::seed_upload(&t.bucket, "staging/c.wav", 64).await;
    t.bucket.collide_on_move.store(true, Ordering::SeqCst);

    let err = t
        .files
        .create(helpers::create_request(customer_id, "staging/c.wav", "c.wav"))
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::AlreadyExists));

    assert!(t.bucket.exists(UPLOAD_BUCKET, "staging/c.wav").await.unwrap());
    let files = t
        .files
        .list(&PageRequest::default(), &FileFilters::for_customer(customer_id))
        .await
        .unwrap();
    assert!(files.is_empty());
}

#[tokio::test]
async fn test_validation_rejects_incomplete_requests() {
    let t = helpers::engines(GIB);
    let mut req = helpers::create_request(Uuid::new_v4(), "staging/x.wav", "x.wav");
    req.filename = String::new();

    let err = t.files.create(req).await.unwrap_err();
    assert!(err.is_kind(ErrorKind::Validation));
}

#[tokio::test]
async fn test_delete_removes_object_and_counters() {
    let t = helpers::engines(GIB);
    let customer_id = Uuid::new_v4();
    t.accounts.create(customer_id).await.unwrap();
    helpers::seed_upload(&t.bucket, "staging/d.wav", 256).await;

    let file = t
        .files
        .create(helpers::create_request(customer_id, "staging/d.wav", "d.wav"))
        .await
        .unwrap();

    let deleted = t.files.delete(file.id).await.unwrap();
    assert!(deleted.is_deleted());

    assert!(!t.bucket.exists(MEDIA_BUCKET, &file.filepath).await.unwrap());
    let account = t.accounts.get(file.account_id).await.unwrap();
    assert_eq!(account.total_file_count, 0);
    assert_eq!(account.total_file_size, 0);
    assert_eq!(t.notifier.count_of(EventType::FileDeleted), 1);
}

#[tokio::test]
async fn test_delete_is_not_blindly_idempotent() {
    let t = helpers::engines(GIB);
    let customer_id = Uuid::new_v4();
    t.accounts.create(customer_id).await.unwrap();
    helpers::seed_upload(&t.bucket, "staging/e.wav", 16).await;

    let file = t
        .files
        .create(helpers::create_request(customer_id, "staging/e.wav", "e.wav"))
        .await
        .unwrap();

    t.files.delete(file.id).await.unwrap();
    let err = t.files.delete(file.id).await.unwrap_err();
    assert!(err.is_kind(ErrorKind::NotFound));

    // Never-created ids behave the same.
    let err = t.files.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(err.is_kind(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_counter_conservation_across_create_delete() {
    let t = helpers::engines(GIB);
    let customer_id = Uuid::new_v4();
    let account = t.accounts.create(customer_id).await.unwrap();

    let mut ids = Vec::new();
    for (i, size) in [100usize, 200, 300].iter().enumerate() {
        let path = format!("staging/{i}.wav");
        helpers::seed_upload(&t.bucket, &path, *size).await;
        let file = t
            .files
            .create(helpers::create_request(customer_id, &path, &format!("{i}.wav")))
            .await
            .unwrap();
        ids.push(file.id);
    }
    t.files.delete(ids[1]).await.unwrap();

    let account = t.accounts.get(account.id).await.unwrap();
    assert_eq!(account.total_file_count, 2);
    assert_eq!(account.total_file_size, 400);
}

#[tokio::test]
async fn test_pagination_token_is_exclusive() {
    let t = helpers::engines(GIB);
    let customer_id = Uuid::new_v4();
    t.accounts.create(customer_id).await.unwrap();

    for i in 0..5 {
        let path = format!("staging/p{i}.wav");
        helpers::seed_upload(&t.bucket, &path, 8).await;
        t.files
            .create(helpers::create_request(customer_id, &path, &format!("p{i}.wav")))
            .await
            .unwrap();
    }

    let filters = FileFilters::for_customer(customer_id);
    let first = t
        .files
        .list(&PageRequest::new(None, 3), &filters)
        .await
        .unwrap();
    assert_eq!(first.len(), 3);

    let token = next_token(first.last().unwrap().created_at);
    let second = t
        .files
        .list(&PageRequest::new(Some(token), 3), &filters)
        .await
        .unwrap();
    assert_eq!(second.len(), 2);

    // No overlap between pages, newest first throughout.
    for newer in &first {
        for older in &second {
            assert!(older.created_at < newer.created_at);
            assert_ne!(older.id, newer.id);
        }
    }
}
