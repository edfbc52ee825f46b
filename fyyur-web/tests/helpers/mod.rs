//! Shared setup for fyyur-web router tests
//!
//! Every test gets its own in-memory database. Requests are driven through
//! the full router with `oneshot`, sharing one `AppState` so flashes parked
//! by a redirect are visible to the follow-up request.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
};
use chrono::{Duration, NaiveDateTime};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

use fyyur_common::db::{artists, init_memory_database, shows, venues};
use fyyur_common::db::{ArtistInput, ShowInput, VenueInput};
use fyyur_web::{build_router, AppState};

pub async fn test_state() -> AppState {
    let db = init_memory_database()
        .await
        .expect("Should create in-memory database");
    AppState::new(db)
}

pub async fn send(state: &AppState, request: Request<Body>) -> Response<Body> {
    build_router(state.clone())
        .oneshot(request)
        .await
        .expect("Router should respond")
}

pub async fn get(state: &AppState, uri: &str) -> Response<Body> {
    send(
        state,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// GET carrying the cookie a previous response set
pub async fn get_with_cookie(state: &AppState, uri: &str, set_cookie: &str) -> Response<Body> {
    let cookie = set_cookie.split(';').next().unwrap_or_default().to_string();
    send(
        state,
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_form(state: &AppState, uri: &str, body: &str) -> Response<Body> {
    send(
        state,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete(state: &AppState, uri: &str) -> Response<Body> {
    send(
        state,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Assert a 200 HTML page and return its body
pub async fn html_page(response: Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);
    body_text(response).await
}

pub fn days_from_now(days: i64) -> NaiveDateTime {
    fyyur_common::time::now() + Duration::days(days)
}

pub async fn add_venue(state: &AppState, name: &str, city: &str, st: &str) -> i64 {
    venues::insert(
        &state.db,
        &VenueInput {
            name: name.to_string(),
            genres: vec!["Jazz".to_string()],
            city: city.to_string(),
            state: st.to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("Should insert venue")
}

pub async fn add_artist(state: &AppState, name: &str) -> i64 {
    artists::insert(
        &state.db,
        &ArtistInput {
            name: name.to_string(),
            genres: vec!["Rock n Roll".to_string()],
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("Should insert artist")
}

pub async fn add_show(state: &AppState, venue_id: i64, artist_id: i64, start_time: NaiveDateTime) {
    shows::insert(
        &state.db,
        &ShowInput {
            venue_id,
            artist_id,
            start_time,
        },
    )
    .await
    .expect("Should insert show");
}
