//! Artist queries

use chrono::NaiveDateTime;
use sqlx::types::Json;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;

use crate::db::models::{
    name_matches, partition_shows, Artist, ArtistDetail, ArtistInput, ArtistShow, EntitySummary,
    SearchResults,
};
use crate::time::is_past;
use crate::{Error, Result};

const ARTIST_COLUMNS: &str = "id, name, genres, city, state, phone, image_link, facebook_link, \
     website, seeking_venue, seeking_description";

/// Load one artist
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Artist> {
    sqlx::query_as::<_, Artist>(&format!("SELECT {} FROM artists WHERE id = ?", ARTIST_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::not_found("artist", id))
}

/// Every artist with its upcoming show count, in id order
pub async fn list(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<EntitySummary>> {
    let artists: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;
    let starts: Vec<(i64, NaiveDateTime)> =
        sqlx::query_as("SELECT artist_id, start_time FROM shows")
            .fetch_all(pool)
            .await?;

    let mut upcoming: HashMap<i64, i64> = HashMap::new();
    for (artist_id, start_time) in starts {
        if !is_past(start_time, now) {
            *upcoming.entry(artist_id).or_insert(0) += 1;
        }
    }

    Ok(artists
        .into_iter()
        .map(|(id, name)| EntitySummary {
            id,
            name,
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
        })
        .collect())
}

/// Artists whose name contains `search_term`, ignoring case
pub async fn search(
    pool: &SqlitePool,
    search_term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let matches = list(pool, now)
        .await?
        .into_iter()
        .filter(|artist| name_matches(&artist.name, search_term))
        .collect();

    Ok(SearchResults::new(matches))
}

/// Artist page data: the row plus past and upcoming shows
pub async fn detail(pool: &SqlitePool, id: i64, now: NaiveDateTime) -> Result<ArtistDetail> {
    let artist = get(pool, id).await?;

    let shows = sqlx::query_as::<_, ArtistShow>(
        r#"
        SELECT s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(ArtistDetail {
        artist,
        shows: partition_shows(shows, now),
    })
}

/// Insert an artist, returning its id
pub async fn insert(pool: &SqlitePool, input: &ArtistInput) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO artists (name, genres, city, state, phone, image_link, facebook_link,
                             website, seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(Json(&input.genres))
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(&input.website)
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    info!("Created artist {} ({})", id, input.name);
    Ok(id)
}

/// Replace every editable field of an artist
pub async fn update(pool: &SqlitePool, id: i64, input: &ArtistInput) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, genres = ?, city = ?, state = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(Json(&input.genres))
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(&input.website)
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found("artist", id));
    }

    tx.commit().await?;

    info!("Updated artist {} ({})", id, input.name);
    Ok(())
}
