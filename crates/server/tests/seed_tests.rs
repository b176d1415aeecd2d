mod common;

use common::{create_test_db, create_test_server};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, ModelTrait, PaginatorTrait};
use time::OffsetDateTime;
use visitwatch::api::admins::AdminEntry;
use visitwatch::entity::telegram_admin;
use visitwatch::seed::{DEFAULT_ADMINS, seed_default_admins};

#[tokio::test]
async fn test_seed_fresh_database_creates_two_admins() {
    let db = create_test_db().await;

    let inserted = seed_default_admins(&db).await.expect("seed");
    assert_eq!(inserted, 2);

    let admins = telegram_admin::Entity::find().all(&db).await.expect("query");
    let ids: Vec<&str> = admins.iter().map(|a| a.telegram_id.as_str()).collect();
    assert_eq!(ids, vec!["123456789", "987654321"]);
    assert!(admins.iter().all(|a| a.is_active));
    let names: Vec<&str> = admins.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Главный Админ", "Модератор"]);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = create_test_db().await;

    seed_default_admins(&db).await.expect("first seed");
    let second = seed_default_admins(&db).await.expect("second seed");

    assert_eq!(second, 0);
    let count = telegram_admin::Entity::find().count(&db).await.expect("count");
    assert_eq!(count, DEFAULT_ADMINS.len() as u64);
}

#[tokio::test]
async fn test_seed_skipped_when_any_admin_exists() {
    let db = create_test_db().await;
    telegram_admin::ActiveModel {
        name: Set("Someone Else".into()),
        telegram_id: Set("1111".into()),
        created_at: Set(OffsetDateTime::now_utc()),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("insert admin");

    assert_eq!(seed_default_admins(&db).await.expect("seed"), 0);
    let count = telegram_admin::Entity::find().count(&db).await.expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_seed_does_not_restore_deleted_defaults() {
    let db = create_test_db().await;
    seed_default_admins(&db).await.expect("seed");

    let first = telegram_admin::Entity::find()
        .one(&db)
        .await
        .expect("query")
        .expect("an admin");
    first.delete(&db).await.expect("delete");

    assert_eq!(seed_default_admins(&db).await.expect("reseed"), 0);
    let count = telegram_admin::Entity::find().count(&db).await.expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_seeded_admins_listed_by_api() {
    let (server, resources) = create_test_server().await;
    seed_default_admins(resources.db.as_ref())
        .await
        .expect("seed");

    let admins: Vec<AdminEntry> = server.get("/api/admins").await.json();
    let ids: Vec<&str> = admins.iter().map(|a| a.telegram_id.as_str()).collect();
    assert_eq!(ids, vec!["123456789", "987654321"]);

    // Seeded id collides with a new registration.
    server
        .post("/api/admins")
        .json(&serde_json::json!({ "name": "Dup", "telegram_id": "123456789" }))
        .await
        .assert_status_bad_request();
}
