//! Show pages

use axum::{extract::State, response::Html, routing::get, Form, Router};

use fyyur_common::db::shows;

use crate::api::log_write_failure;
use crate::error::WebResult;
use crate::flash::{Flash, IncomingFlashes};
use crate::forms::{FormPairs, ShowForm};
use crate::templates::{render, HomeTemplate, NewShowTemplate, PageContext, ShowsTemplate};
use crate::AppState;

/// GET /shows
pub async fn list_shows(
    State(state): State<AppState>,
    IncomingFlashes(flashes): IncomingFlashes,
) -> WebResult<Html<String>> {
    let shows = shows::list(&state.db).await?;

    render(&ShowsTemplate {
        page: PageContext::new(flashes),
        shows,
    })
}

/// GET /shows/create
pub async fn create_show_form() -> WebResult<Html<String>> {
    render(&NewShowTemplate {
        page: PageContext::default(),
        form: ShowForm::starting_now(),
    })
}

/// POST /shows/create
///
/// Unknown venue or artist ids fail on the foreign keys and get the error
/// flash.
pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): Form<FormPairs>,
) -> WebResult<Html<String>> {
    let form = ShowForm::from_pairs(pairs);

    let result = match form.to_input() {
        Ok(input) => shows::insert(&state.db, &input).await,
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(_) => Flash::success("Show was successfully listed!"),
        Err(e) => {
            log_write_failure("Create show", &e);
            Flash::error("An error occurred, the show could not be listed.")
        }
    };

    render(&HomeTemplate {
        page: PageContext::new(vec![flash]),
    })
}

pub fn show_routes() -> Router<AppState> {
    Router::new().route("/shows", get(list_shows)).route(
        "/shows/create",
        get(create_show_form).post(create_show_submission),
    )
}
