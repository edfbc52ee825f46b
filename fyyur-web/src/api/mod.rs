//! HTTP handlers for fyyur-web

pub mod artists;
pub mod health;
pub mod pages;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use pages::{not_found, page_routes};
pub use shows::show_routes;
pub use venues::venue_routes;

use serde::Deserialize;
use tracing::{error, warn};

/// Navbar search form
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Log a failed create/update/delete before the user sees the error flash
///
/// Rejected input is expected traffic; anything else is a server fault.
pub(crate) fn log_write_failure(action: &str, err: &fyyur_common::Error) {
    match err {
        fyyur_common::Error::InvalidInput(_) | fyyur_common::Error::NotFound(_) => {
            warn!("{} rejected: {}", action, err)
        }
        _ if err.is_constraint_violation() => warn!("{} rejected: {}", action, err),
        _ => error!("{} failed: {}", action, err),
    }
}
