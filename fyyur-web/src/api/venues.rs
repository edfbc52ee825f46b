//! Venue pages

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;

use fyyur_common::db::venues;
use fyyur_common::time;

use crate::api::{log_write_failure, SearchForm};
use crate::error::{EntityId, WebResult};
use crate::flash::{redirect_with_flash, Flash, IncomingFlashes};
use crate::forms::{FormPairs, VenueForm};
use crate::templates::{
    render, EditVenueTemplate, HomeTemplate, NewVenueTemplate, PageContext, SearchTemplate,
    ShowVenueTemplate, VenuesTemplate,
};
use crate::AppState;

/// GET /venues
pub async fn list_venues(
    State(state): State<AppState>,
    IncomingFlashes(flashes): IncomingFlashes,
) -> WebResult<Html<String>> {
    let areas = venues::list_areas(&state.db, time::now()).await?;

    render(&VenuesTemplate {
        page: PageContext::new(flashes),
        areas,
    })
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> WebResult<Html<String>> {
    let results = venues::search(&state.db, &form.search_term, time::now()).await?;

    render(&SearchTemplate {
        page: PageContext::new(Vec::new()),
        results,
        search_term: form.search_term,
    })
}

/// GET /venues/:venue_id
pub async fn show_venue(
    State(state): State<AppState>,
    IncomingFlashes(flashes): IncomingFlashes,
    EntityId(venue_id): EntityId,
) -> WebResult<Html<String>> {
    let detail = venues::detail(&state.db, venue_id, time::now()).await?;

    render(&ShowVenueTemplate {
        page: PageContext::new(flashes),
        detail,
    })
}

/// GET /venues/create
pub async fn create_venue_form() -> WebResult<Html<String>> {
    render(&NewVenueTemplate::new(
        PageContext::default(),
        VenueForm::default(),
    ))
}

/// POST /venues/create
///
/// Renders the home page with a success or error flash.
pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): Form<FormPairs>,
) -> WebResult<Html<String>> {
    let form = VenueForm::from_pairs(pairs);

    let result = match form.to_input() {
        Ok(input) => venues::insert(&state.db, &input).await,
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(_) => Flash::success(format!("Venue {} was successfully listed!", form.name)),
        Err(e) => {
            log_write_failure("Create venue", &e);
            Flash::error(format!(
                "An error occurred. Venue {} could not be listed.",
                form.name
            ))
        }
    };

    render(&HomeTemplate {
        page: PageContext::new(vec![flash]),
    })
}

/// GET /venues/:venue_id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    EntityId(venue_id): EntityId,
) -> WebResult<Html<String>> {
    let venue = venues::get(&state.db, venue_id).await?;

    render(&EditVenueTemplate::new(
        PageContext::default(),
        venue_id,
        VenueForm::from_venue(&venue),
    ))
}

/// POST /venues/:venue_id/edit
///
/// Redirects back to the venue page with a flash either way.
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    EntityId(venue_id): EntityId,
    Form(pairs): Form<FormPairs>,
) -> Response {
    let form = VenueForm::from_pairs(pairs);

    let result = match form.to_input() {
        Ok(input) => venues::update(&state.db, venue_id, &input).await,
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(()) => Flash::success(format!("Venue {} was successfully updated!", form.name)),
        Err(e) => {
            log_write_failure("Update venue", &e);
            Flash::error(format!(
                "An error occurred. Venue {} could not be updated.",
                form.name
            ))
        }
    };

    redirect_with_flash(&state.flashes, &format!("/venues/{}", venue_id), flash).await
}

/// JSON body for scripted deletes
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// DELETE /venues/:venue_id
pub async fn delete_venue(
    State(state): State<AppState>,
    EntityId(venue_id): EntityId,
) -> Response {
    match venues::delete(&state.db, venue_id).await {
        Ok(()) => Json(DeleteResponse { success: true }).into_response(),
        Err(e) => {
            log_write_failure("Delete venue", &e);
            let status = match e {
                fyyur_common::Error::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(DeleteResponse { success: false })).into_response()
        }
    }
}

/// GET /venues/:venue_id/delete
///
/// Link target on the venue page; renders home with the outcome.
pub async fn delete_venue_link(
    State(state): State<AppState>,
    EntityId(venue_id): EntityId,
) -> WebResult<Html<String>> {
    let flash = match venues::delete(&state.db, venue_id).await {
        Ok(()) => Flash::success("The Venue has been successfully deleted!"),
        Err(e) => {
            log_write_failure("Delete venue", &e);
            Flash::error("Delete was unsuccessful. Try again!")
        }
    };

    render(&HomeTemplate {
        page: PageContext::new(vec![flash]),
    })
}

pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/:venue_id", get(show_venue).delete(delete_venue))
        .route("/venues/:venue_id/delete", get(delete_venue_link))
        .route(
            "/venues/:venue_id/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
}
