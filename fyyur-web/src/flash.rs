//! One-shot flash messages
//!
//! Pages rendered straight from a POST receive their flash directly. A
//! redirect parks its flash server-side under a random id, hands the id to
//! the browser in a short-lived cookie, and the next page request takes it.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::AppState;

pub const FLASH_COOKIE: &str = "fyyur_flash";

/// Parked flashes not collected within this window are dropped
const FLASH_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Success => "alert-success",
            FlashLevel::Error => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Flashes waiting for the browser to follow a redirect
#[derive(Clone, Default)]
pub struct FlashStore {
    pending: Arc<RwLock<HashMap<Uuid, (Instant, Vec<Flash>)>>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park flashes and return the id to hand to the browser
    pub async fn stash(&self, flashes: Vec<Flash>) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();

        let mut pending = self.pending.write().await;
        pending.retain(|_, (parked_at, _)| now.duration_since(*parked_at) < FLASH_TTL);
        pending.insert(id, (now, flashes));
        id
    }

    /// Remove and return the flashes parked under `id`
    pub async fn take(&self, id: Uuid) -> Vec<Flash> {
        self.pending
            .write()
            .await
            .remove(&id)
            .map(|(_, flashes)| flashes)
            .unwrap_or_default()
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }
}

/// Find the flash id in the request's `Cookie` headers
pub fn cookie_flash_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(FLASH_COOKIE)?.strip_prefix('='))
        .find_map(|id| Uuid::parse_str(id).ok())
}

fn flash_cookie(id: Uuid) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        id,
        FLASH_TTL.as_secs()
    )
}

/// 303 redirect carrying a flash to the next page
pub async fn redirect_with_flash(store: &FlashStore, location: &str, flash: Flash) -> Response {
    let id = store.stash(vec![flash]).await;

    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, location.to_string()),
            (header::SET_COOKIE, flash_cookie(id)),
        ],
    )
        .into_response()
}

/// Flashes delivered to this request by a preceding redirect
pub struct IncomingFlashes(pub Vec<Flash>);

#[async_trait]
impl FromRequestParts<AppState> for IncomingFlashes {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let flashes = match cookie_flash_id(&parts.headers) {
            Some(id) => state.flashes.take(id).await,
            None => Vec::new(),
        };
        Ok(Self(flashes))
    }
}
