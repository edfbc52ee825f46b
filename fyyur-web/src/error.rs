//! Error handling for page handlers

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Response},
};
use askama::Template;
use thiserror::Error;
use tracing::{debug, error};

use crate::templates::{NotFoundTemplate, PageContext, ServerErrorTemplate};

/// Page handler errors
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Common(fyyur_common::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<fyyur_common::Error> for WebError {
    fn from(err: fyyur_common::Error) -> Self {
        match err {
            fyyur_common::Error::NotFound(what) => WebError::NotFound(what),
            other => WebError::Common(other),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;

fn error_page<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("Failed to render {} page: {}", status, e);
            (status, status.to_string()).into_response()
        }
    }
}

/// 404 page
pub fn not_found_page() -> Response {
    error_page(
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            page: PageContext::default(),
        },
    )
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound(what) => {
                debug!("Not found: {}", what);
                not_found_page()
            }
            other => {
                error!("Request failed: {}", other);
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ServerErrorTemplate {
                        page: PageContext::default(),
                    },
                )
            }
        }
    }
}

/// Numeric id taken from the first path segment parameter
///
/// Anything that is not an integer is treated as a missing page.
pub struct EntityId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| WebError::NotFound(e.to_string()))?;

        raw.parse()
            .map(EntityId)
            .map_err(|_| WebError::NotFound(format!("no page for id {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_not_found_maps_to_404() {
        let err: WebError = fyyur_common::Error::not_found("venue", 9).into();
        assert!(matches!(err, WebError::NotFound(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let err: WebError = fyyur_common::Error::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
