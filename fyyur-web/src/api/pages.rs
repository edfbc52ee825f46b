//! Home page, stylesheet and the catch-all 404

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::error::{not_found_page, WebResult};
use crate::flash::IncomingFlashes;
use crate::templates::{render, HomeTemplate, PageContext};
use crate::AppState;

const FYYUR_CSS: &str = include_str!("../../static/fyyur.css");

/// GET /
pub async fn index(IncomingFlashes(flashes): IncomingFlashes) -> WebResult<Html<String>> {
    render(&HomeTemplate {
        page: PageContext::new(flashes),
    })
}

/// GET /static/fyyur.css
pub async fn serve_css() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        FYYUR_CSS,
    )
        .into_response()
}

/// Any unmatched route
pub async fn not_found() -> Response {
    not_found_page()
}

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/static/fyyur.css", get(serve_css))
}
