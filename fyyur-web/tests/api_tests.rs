//! Integration tests for fyyur-web read-only pages
//!
//! Tests cover:
//! - Health endpoint and stylesheet
//! - Venue areas, venue and artist detail pages
//! - Venue and artist search
//! - Show listing
//! - 404 handling for unknown routes and ids

mod helpers;

use axum::http::{header, StatusCode};
use helpers::*;

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let state = test_state().await;

    let response = get(&state, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "fyyur-web");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn test_stylesheet_served_as_css() {
    let state = test_state().await;

    let response = get(&state, "/static/fyyur.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/css"));
    assert!(body_text(response).await.contains(".alert-success"));
}

#[tokio::test]
async fn test_home_page() {
    let state = test_state().await;

    let html = html_page(get(&state, "/").await).await;
    assert!(html.contains("Fyyur"));
    assert!(html.contains(r#"href="/venues/create""#));
}

#[tokio::test]
async fn test_file_backed_database_serves_pages() {
    let dir = tempfile::tempdir().unwrap();
    let db = fyyur_common::db::init_database(&dir.path().join("data").join("fyyur.db"))
        .await
        .unwrap();
    let state = fyyur_web::AppState::new(db);
    add_venue(&state, "The Musical Hop", "San Francisco", "CA").await;

    let html = html_page(get(&state, "/venues").await).await;
    assert!(html.contains("The Musical Hop"));
}

// =============================================================================
// 404 handling
// =============================================================================

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let state = test_state().await;

    let response = get(&state, "/no/such/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404"));
}

#[tokio::test]
async fn test_missing_ids_are_404() {
    let state = test_state().await;

    for uri in ["/venues/42", "/artists/42", "/venues/42/edit", "/artists/42/edit"] {
        let response = get(&state, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_non_numeric_id_is_404() {
    let state = test_state().await;

    let response = get(&state, "/venues/the-musical-hop").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Venues
// =============================================================================

#[tokio::test]
async fn test_venues_grouped_by_city_and_state() {
    let state = test_state().await;
    let hop = add_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&state, "The Dueling Pianos Bar", "New York", "NY").await;
    let park = add_venue(&state, "Park Square Live Music and Coffee", "San Francisco", "CA").await;
    let artist = add_artist(&state, "Guns N Petals").await;
    add_show(&state, park, artist, days_from_now(7)).await;
    add_show(&state, hop, artist, days_from_now(-7)).await;

    let html = html_page(get(&state, "/venues").await).await;

    assert_eq!(html.matches("San Francisco, CA").count(), 1);
    assert_eq!(html.matches("New York, NY").count(), 1);
    assert!(html.contains(&format!(r#"href="/venues/{}""#, hop)));
    assert!(html.contains(&format!(r#"href="/venues/{}""#, park)));
    assert!(html.contains("1 upcoming"));
}

#[tokio::test]
async fn test_venue_page_splits_past_and_upcoming() {
    let state = test_state().await;
    let venue = add_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    let petals = add_artist(&state, "Guns N Petals").await;
    let sax = add_artist(&state, "The Wild Sax Band").await;
    add_show(&state, venue, petals, days_from_now(-30)).await;
    add_show(&state, venue, sax, days_from_now(10)).await;
    add_show(&state, venue, sax, days_from_now(20)).await;

    let html = html_page(get(&state, &format!("/venues/{}", venue)).await).await;

    assert!(html.contains("2 Upcoming Shows"));
    assert!(html.contains("1 Past Show"));
    assert!(html.contains("Guns N Petals"));
    assert!(html.contains(&format!(r#"href="/artists/{}""#, sax)));
    assert!(html.contains(&format!(r#"href="/venues/{}/delete""#, venue)));
}

#[tokio::test]
async fn test_venue_search_is_case_insensitive() {
    let state = test_state().await;
    add_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&state, "Park Square Live Music and Coffee", "San Francisco", "CA").await;
    add_venue(&state, "The Dueling Pianos Bar", "New York", "NY").await;

    let html = html_page(post_form(&state, "/venues/search", "search_term=MUSIC").await).await;
    assert!(html.contains(r#"Number of search results for "MUSIC": 2"#));
    assert!(html.contains("The Musical Hop"));
    assert!(!html.contains("The Dueling Pianos Bar"));

    let html = html_page(post_form(&state, "/venues/search", "search_term=hop").await).await;
    assert!(html.contains(": 1</h3>"));
}

#[tokio::test]
async fn test_empty_search_matches_everything() {
    let state = test_state().await;
    add_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&state, "The Dueling Pianos Bar", "New York", "NY").await;

    let html = html_page(post_form(&state, "/venues/search", "search_term=").await).await;
    assert!(html.contains(": 2</h3>"));

    let html = html_page(post_form(&state, "/venues/search", "").await).await;
    assert!(html.contains(": 2</h3>"));
}

// =============================================================================
// Artists
// =============================================================================

#[tokio::test]
async fn test_artists_list_and_search() {
    let state = test_state().await;
    let petals = add_artist(&state, "Guns N Petals").await;
    add_artist(&state, "Matt Quevedo").await;
    let sax = add_artist(&state, "The Wild Sax Band").await;

    let html = html_page(get(&state, "/artists").await).await;
    assert!(html.contains(&format!(r#"href="/artists/{}""#, petals)));
    assert!(html.contains("Matt Quevedo"));

    let html = html_page(post_form(&state, "/artists/search", "search_term=band").await).await;
    assert!(html.contains(r#"Number of search results for "band": 1"#));
    assert!(html.contains(&format!(r#"href="/artists/{}""#, sax)));
    assert!(html.contains(r#"action="/artists/search""#));
}

#[tokio::test]
async fn test_artist_page_lists_venues() {
    let state = test_state().await;
    let venue = add_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    let artist = add_artist(&state, "Guns N Petals").await;
    add_show(&state, venue, artist, days_from_now(3)).await;

    let html = html_page(get(&state, &format!("/artists/{}", artist)).await).await;

    assert!(html.contains("1 Upcoming Show"));
    assert!(html.contains("0 Past Shows"));
    assert!(html.contains(&format!(r#"href="/venues/{}""#, venue)));
    assert!(html.contains("Not currently seeking performance venues"));
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn test_shows_page_joins_names() {
    let state = test_state().await;
    let venue = add_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    let artist = add_artist(&state, "The Wild Sax Band").await;
    add_show(&state, venue, artist, days_from_now(5)).await;

    let html = html_page(get(&state, "/shows").await).await;
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("The Wild Sax Band"));
    assert!(html.contains("playing at"));
}

#[tokio::test]
async fn test_show_form_prefills_start_time() {
    let state = test_state().await;

    let html = html_page(get(&state, "/shows/create").await).await;
    let year = chrono::Datelike::year(&fyyur_common::time::now()).to_string();
    assert!(html.contains(r#"name="start_time" value=""#));
    assert!(html.contains(&year));
}
