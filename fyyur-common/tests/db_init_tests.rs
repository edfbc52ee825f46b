//! Database initialization tests
//!
//! Covers first-run creation, reopening an existing file and migration
//! bookkeeping.

use fyyur_common::db::init::init_database;
use fyyur_common::db::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use fyyur_common::db::models::VenueInput;
use fyyur_common::db::venues;
use tempfile::TempDir;

async fn table_names(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("fyyur.db");
    assert!(!db_path.exists());

    let pool = init_database(&db_path).await.unwrap();

    assert!(db_path.exists(), "Database file was not created");
    assert_eq!(
        table_names(&pool).await,
        vec!["artists", "schema_version", "shows", "venues"]
    );
}

#[tokio::test]
async fn test_database_creation_in_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("data").join("fyyur.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists());
}

#[tokio::test]
async fn test_reopen_keeps_rows_and_version() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("fyyur.db");

    let pool = init_database(&db_path).await.unwrap();
    venues::insert(
        &pool,
        &VenueInput {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: "914-003-1132".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(versions, 1, "Migrations must not be recorded twice");
    assert_eq!(get_schema_version(&pool).await.unwrap(), CURRENT_SCHEMA_VERSION);
}

#[tokio::test]
async fn test_show_indexes_created() {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("fyyur.db")).await.unwrap();

    let indexes: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='shows' AND name LIKE 'idx_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(indexes, vec!["idx_shows_artist_id", "idx_shows_venue_id"]);
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("fyyur.db")).await.unwrap();

    let result = sqlx::query(
        "INSERT INTO shows (venue_id, artist_id, start_time) VALUES (1, 1, '2030-01-01 20:00:00')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "Show without venue/artist must be rejected");
}
