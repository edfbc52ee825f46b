//! Artist pages

use axum::{
    extract::State,
    response::{Html, Response},
    routing::{get, post},
    Form, Router,
};

use fyyur_common::db::artists;
use fyyur_common::time;

use crate::api::{log_write_failure, SearchForm};
use crate::error::{EntityId, WebResult};
use crate::flash::{redirect_with_flash, Flash, IncomingFlashes};
use crate::forms::{ArtistForm, FormPairs};
use crate::templates::{
    render, ArtistsTemplate, EditArtistTemplate, HomeTemplate, NewArtistTemplate, PageContext,
    SearchTemplate, ShowArtistTemplate,
};
use crate::AppState;

/// GET /artists
pub async fn list_artists(
    State(state): State<AppState>,
    IncomingFlashes(flashes): IncomingFlashes,
) -> WebResult<Html<String>> {
    let artists = artists::list(&state.db, time::now()).await?;

    render(&ArtistsTemplate {
        page: PageContext::artists(flashes),
        artists,
    })
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> WebResult<Html<String>> {
    let results = artists::search(&state.db, &form.search_term, time::now()).await?;

    render(&SearchTemplate {
        page: PageContext::artists(Vec::new()),
        results,
        search_term: form.search_term,
    })
}

/// GET /artists/:artist_id
pub async fn show_artist(
    State(state): State<AppState>,
    IncomingFlashes(flashes): IncomingFlashes,
    EntityId(artist_id): EntityId,
) -> WebResult<Html<String>> {
    let detail = artists::detail(&state.db, artist_id, time::now()).await?;

    render(&ShowArtistTemplate {
        page: PageContext::artists(flashes),
        detail,
    })
}

/// GET /artists/:artist_id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    EntityId(artist_id): EntityId,
) -> WebResult<Html<String>> {
    let artist = artists::get(&state.db, artist_id).await?;

    render(&EditArtistTemplate::new(
        PageContext::artists(Vec::new()),
        artist_id,
        ArtistForm::from_artist(&artist),
    ))
}

/// POST /artists/:artist_id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    EntityId(artist_id): EntityId,
    Form(pairs): Form<FormPairs>,
) -> Response {
    let form = ArtistForm::from_pairs(pairs);

    let result = match form.to_input() {
        Ok(input) => artists::update(&state.db, artist_id, &input).await,
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(()) => Flash::success(format!("Artist {} was successfully updated!", form.name)),
        Err(e) => {
            log_write_failure("Update artist", &e);
            Flash::error(format!(
                "An error occurred. Artist {} could not be updated.",
                form.name
            ))
        }
    };

    redirect_with_flash(&state.flashes, &format!("/artists/{}", artist_id), flash).await
}

/// GET /artists/create
pub async fn create_artist_form() -> WebResult<Html<String>> {
    render(&NewArtistTemplate::new(
        PageContext::artists(Vec::new()),
        ArtistForm::default(),
    ))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): Form<FormPairs>,
) -> WebResult<Html<String>> {
    let form = ArtistForm::from_pairs(pairs);

    let result = match form.to_input() {
        Ok(input) => artists::insert(&state.db, &input).await,
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(_) => Flash::success(format!("Artist {} was successfully listed!", form.name)),
        Err(e) => {
            log_write_failure("Create artist", &e);
            Flash::error(format!(
                "An error occurred. Artist {} could not be listed.",
                form.name
            ))
        }
    };

    render(&HomeTemplate {
        page: PageContext::new(vec![flash]),
    })
}

pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/:artist_id", get(show_artist))
        .route(
            "/artists/:artist_id/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}
