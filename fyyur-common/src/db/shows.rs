//! Show queries

use sqlx::SqlitePool;
use tracing::info;

use crate::db::models::{ShowInput, ShowListing};
use crate::Result;

/// Every show with its venue and artist, soonest first
pub async fn list(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let shows = sqlx::query_as::<_, ShowListing>(
        r#"
        SELECT s.venue_id, v.name AS venue_name,
               s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Insert a show, returning its id
///
/// Unknown venue or artist ids fail on the foreign keys.
pub async fn insert(pool: &SqlitePool, input: &ShowInput) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
        .bind(input.venue_id)
        .bind(input.artist_id)
        .bind(input.start_time)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;

    info!(
        "Created show {} (venue {}, artist {}, {})",
        id, input.venue_id, input.artist_id, input.start_time
    );
    Ok(id)
}
