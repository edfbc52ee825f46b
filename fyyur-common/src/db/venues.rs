//! Venue queries
//!
//! Writes run inside a transaction; dropping an uncommitted transaction on
//! the error path rolls it back.

use chrono::NaiveDateTime;
use sqlx::types::Json;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::db::models::{
    group_by_area, name_matches, partition_shows, Area, EntitySummary, SearchResults, Venue,
    VenueDetail, VenueInput, VenueLocation, VenueShow,
};
use crate::time::is_past;
use crate::{Error, Result};

const VENUE_COLUMNS: &str = "id, name, genres, city, state, address, phone, image_link, \
     facebook_link, website, seeking_talent, seeking_description";

/// Load one venue
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Venue> {
    sqlx::query_as::<_, Venue>(&format!("SELECT {} FROM venues WHERE id = ?", VENUE_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::not_found("venue", id))
}

/// Count upcoming shows per venue
///
/// Venues without upcoming shows are absent from the map.
async fn upcoming_show_counts(pool: &SqlitePool, now: NaiveDateTime) -> Result<HashMap<i64, i64>> {
    let rows: Vec<(i64, NaiveDateTime)> = sqlx::query_as("SELECT venue_id, start_time FROM shows")
        .fetch_all(pool)
        .await?;

    let mut counts = HashMap::new();
    for (venue_id, start_time) in rows {
        if !is_past(start_time, now) {
            *counts.entry(venue_id).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Venues grouped by city and state
pub async fn list_areas(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<Area>> {
    let venues = sqlx::query_as::<_, VenueLocation>(
        "SELECT id, name, city, state FROM venues ORDER BY state, city, id",
    )
    .fetch_all(pool)
    .await?;

    let counts = upcoming_show_counts(pool, now).await?;
    let areas = group_by_area(venues, |id| counts.get(&id).copied().unwrap_or(0));

    debug!("Listed {} venue areas", areas.len());
    Ok(areas)
}

/// Venues whose name contains `search_term`, ignoring case
pub async fn search(
    pool: &SqlitePool,
    search_term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let venues: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM venues ORDER BY id")
        .fetch_all(pool)
        .await?;

    let counts = upcoming_show_counts(pool, now).await?;
    let data = venues
        .into_iter()
        .filter(|(_, name)| name_matches(name, search_term))
        .map(|(id, name)| EntitySummary {
            id,
            name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        })
        .collect();

    Ok(SearchResults::new(data))
}

/// Venue page data: the row plus past and upcoming shows
pub async fn detail(pool: &SqlitePool, id: i64, now: NaiveDateTime) -> Result<VenueDetail> {
    let venue = get(pool, id).await?;

    let shows = sqlx::query_as::<_, VenueShow>(
        r#"
        SELECT s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(VenueDetail {
        venue,
        shows: partition_shows(shows, now),
    })
}

/// Insert a venue, returning its id
pub async fn insert(pool: &SqlitePool, input: &VenueInput) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO venues (name, genres, city, state, address, phone, image_link,
                            facebook_link, website, seeking_talent, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(Json(&input.genres))
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(&input.website)
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    info!("Created venue {} ({})", id, input.name);
    Ok(id)
}

/// Replace every editable field of a venue
pub async fn update(pool: &SqlitePool, id: i64, input: &VenueInput) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, genres = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, facebook_link = ?, website = ?, seeking_talent = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(Json(&input.genres))
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(&input.website)
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found("venue", id));
    }

    tx.commit().await?;

    info!("Updated venue {} ({})", id, input.name);
    Ok(())
}

/// Delete a venue together with its shows
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found("venue", id));
    }

    tx.commit().await?;

    info!("Deleted venue {}", id);
    Ok(())
}
