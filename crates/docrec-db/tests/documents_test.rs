//! Metadata persistence against a disposable PostgreSQL container.
//!
//! Needs a Docker daemon. When none is reachable the tests log why and return early.

use chrono::{DateTime, Utc};
use docrec_core::{Config, UploadRecord};
use docrec_db::{setup_pool, MetadataRepository, PgMetadataRepository};
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    filename: String,
    local_path: String,
    archive_locator: Option<String>,
    extracted_text: String,
    created_at: DateTime<Utc>,
}

/// Database with migrations applied, plus the container that owns it.
struct TestDb {
    pool: PgPool,
    _container: ContainerAsync<Postgres>,
}

async fn setup_test_db() -> Option<TestDb> {
    let container = match Postgres::default().start().await {
        Ok(container) => container,
        Err(e) => {
            eprintln!("skipping: could not start postgres container: {}", e);
            return None;
        }
    };

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "DB_TIMEOUT_SECONDS" => Some("30".to_string()),
        _ => None,
    })
    .unwrap();

    let pool = setup_pool(&config).await.unwrap();

    Some(TestDb {
        pool,
        _container: container,
    })
}

async fn fetch_document(pool: &PgPool, id: Uuid) -> DocumentRow {
    sqlx::query_as::<_, DocumentRow>(
        r#"
        SELECT id, filename, local_path, archive_locator, extracted_text, created_at
        FROM documents
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_persist_round_trips_every_field() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let repository = PgMetadataRepository::new(db.pool.clone());

    let mut record = UploadRecord::new("Reçu scanné.JPG", "/tmp/docrec_uploads/4f1c.JPG");
    record.extracted_text = format!("TOTAL 12,00 €\n{}", "ligne ".repeat(400));
    assert!(record.extracted_text.chars().count() > 600);

    let id = repository.persist(&record).await.unwrap();
    let id = Uuid::parse_str(&id).unwrap();

    let row = fetch_document(&db.pool, id).await;
    assert_eq!(row.id, id);
    assert_eq!(row.filename, record.original_filename);
    assert_eq!(row.local_path, record.staged_path);
    assert_eq!(row.archive_locator, None);
    assert_eq!(row.extracted_text, record.extracted_text);
    // TIMESTAMPTZ keeps microseconds.
    assert_eq!(
        row.created_at.timestamp_micros(),
        record.created_at().timestamp_micros()
    );
}

#[tokio::test]
async fn test_persist_stores_archive_locator_and_assigns_new_ids() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let repository = PgMetadataRepository::new(db.pool.clone());

    let mut record = UploadRecord::new("page.png", "/tmp/docrec_uploads/a.png");
    record.archive_locator = Some("gs://captures-test/captures/a.png".to_string());

    let first = repository.persist(&record).await.unwrap();
    let second = repository.persist(&record).await.unwrap();
    assert_ne!(first, second);

    let row = fetch_document(&db.pool, Uuid::parse_str(&first).unwrap()).await;
    assert_eq!(
        row.archive_locator.as_deref(),
        Some("gs://captures-test/captures/a.png")
    );
    assert_eq!(row.extracted_text, "");
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let Some(db) = setup_test_db().await else {
        return;
    };

    sqlx::migrate!("./migrations").run(&db.pool).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
