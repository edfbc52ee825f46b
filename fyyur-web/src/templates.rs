//! Page templates
//!
//! Every page extends `layouts/main.html`, which reads the shared
//! [`PageContext`] for flashes and the navbar search box.

use askama::Template;
use axum::response::Html;

use fyyur_common::db::{ArtistDetail, Area, EntitySummary, SearchResults, ShowListing, VenueDetail};

use crate::error::WebError;
use crate::flash::Flash;
use crate::forms::{ArtistForm, ShowForm, VenueForm, GENRES, STATES};

/// Which collection the navbar search box queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    Venues,
    Artists,
}

impl SearchScope {
    /// URL prefix of the collection, also used for result links
    pub fn path(&self) -> &'static str {
        match self {
            SearchScope::Venues => "/venues",
            SearchScope::Artists => "/artists",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            SearchScope::Venues => "Find a venue",
            SearchScope::Artists => "Find an artist",
        }
    }
}

/// Data every page layout needs
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub flashes: Vec<Flash>,
    pub search: SearchScope,
}

impl PageContext {
    pub fn new(flashes: Vec<Flash>) -> Self {
        Self {
            flashes,
            search: SearchScope::Venues,
        }
    }

    pub fn artists(flashes: Vec<Flash>) -> Self {
        Self {
            flashes,
            search: SearchScope::Artists,
        }
    }
}

/// Render a template into an HTML response body
pub fn render<T: Template>(template: &T) -> Result<Html<String>, WebError> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesTemplate {
    pub page: PageContext,
    pub areas: Vec<Area>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsTemplate {
    pub page: PageContext,
    pub artists: Vec<EntitySummary>,
}

/// Venue and artist search results share one page; `page.search` picks the
/// collection the result links point into.
#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub page: PageContext,
    pub results: SearchResults,
    pub search_term: String,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
pub struct ShowVenueTemplate {
    pub page: PageContext,
    pub detail: VenueDetail,
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
pub struct ShowArtistTemplate {
    pub page: PageContext,
    pub detail: ArtistDetail,
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsTemplate {
    pub page: PageContext,
    pub shows: Vec<ShowListing>,
}

#[derive(Template)]
#[template(path = "forms/new_venue.html")]
pub struct NewVenueTemplate {
    pub page: PageContext,
    pub form: VenueForm,
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl NewVenueTemplate {
    pub fn new(page: PageContext, form: VenueForm) -> Self {
        Self {
            page,
            form,
            genres: GENRES,
            states: STATES,
        }
    }
}

#[derive(Template)]
#[template(path = "forms/edit_venue.html")]
pub struct EditVenueTemplate {
    pub page: PageContext,
    pub venue_id: i64,
    pub form: VenueForm,
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl EditVenueTemplate {
    pub fn new(page: PageContext, venue_id: i64, form: VenueForm) -> Self {
        Self {
            page,
            venue_id,
            form,
            genres: GENRES,
            states: STATES,
        }
    }
}

#[derive(Template)]
#[template(path = "forms/new_artist.html")]
pub struct NewArtistTemplate {
    pub page: PageContext,
    pub form: ArtistForm,
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl NewArtistTemplate {
    pub fn new(page: PageContext, form: ArtistForm) -> Self {
        Self {
            page,
            form,
            genres: GENRES,
            states: STATES,
        }
    }
}

#[derive(Template)]
#[template(path = "forms/edit_artist.html")]
pub struct EditArtistTemplate {
    pub page: PageContext,
    pub artist_id: i64,
    pub form: ArtistForm,
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl EditArtistTemplate {
    pub fn new(page: PageContext, artist_id: i64, form: ArtistForm) -> Self {
        Self {
            page,
            artist_id,
            form,
            genres: GENRES,
            states: STATES,
        }
    }
}

#[derive(Template)]
#[template(path = "forms/new_show.html")]
pub struct NewShowTemplate {
    pub page: PageContext,
    pub form: ShowForm,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "errors/500.html")]
pub struct ServerErrorTemplate {
    pub page: PageContext,
}

mod filters {
    use chrono::NaiveDateTime;
    use fyyur_common::time::{format_datetime, DateFormat};
    use std::borrow::Borrow;

    /// `Tuesday May, 21, 2019 at 9:30PM`
    pub fn datetime_full<T: Borrow<NaiveDateTime>>(value: T) -> askama::Result<String> {
        Ok(format_datetime(*value.borrow(), DateFormat::Full))
    }

    /// `Tue 05, 21, 2019 9:30PM`
    pub fn datetime_medium<T: Borrow<NaiveDateTime>>(value: T) -> askama::Result<String> {
        Ok(format_datetime(*value.borrow(), DateFormat::Medium))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fyyur_common::db::{Partitioned, Venue, VenueShow};

    fn sample_venue() -> Venue {
        Venue {
            id: 1,
            name: "The Musical Hop".to_string(),
            genres: vec!["Jazz".to_string(), "Reggae".to_string()],
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            image_link: None,
            facebook_link: None,
            website: Some("https://www.themusicalhop.com".to_string()),
            seeking_talent: true,
            seeking_description: Some("We are on the lookout for a local artist".to_string()),
        }
    }

    #[test]
    fn test_home_renders_flashes_escaped() {
        let html = HomeTemplate {
            page: PageContext::new(vec![Flash::success("Venue <Hop> was successfully listed!")]),
        }
        .render()
        .unwrap();

        assert!(html.contains("Venue &lt;Hop&gt; was successfully listed!"));
        assert!(html.contains("alert-success"));
    }

    #[test]
    fn test_venue_page_formats_show_times() {
        let start = NaiveDate::from_ymd_opt(2035, 4, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let detail = VenueDetail {
            venue: sample_venue(),
            shows: Partitioned {
                past_shows: Vec::new(),
                upcoming_shows: vec![VenueShow {
                    artist_id: 4,
                    artist_name: "Guns N Petals".to_string(),
                    artist_image_link: None,
                    start_time: start,
                }],
            },
        };

        let html = ShowVenueTemplate {
            page: PageContext::default(),
            detail,
        }
        .render()
        .unwrap();

        assert!(html.contains("Sunday April, 1, 2035 at 8:00PM"));
        assert!(html.contains("1 Upcoming Show"));
        assert!(html.contains("/artists/4"));
        assert!(html.contains("www.themusicalhop.com"));
        assert!(html.contains("Seeking Talent"));
    }

    #[test]
    fn test_edit_form_marks_selected_values() {
        let form = VenueForm::from_venue(&sample_venue());
        let html = EditVenueTemplate::new(PageContext::default(), 1, form)
            .render()
            .unwrap();

        assert!(html.contains(r#"<option value="Jazz" selected>"#));
        assert!(html.contains(r#"<option value="Folk">"#));
        assert!(html.contains(r#"<option value="CA" selected>"#));
        assert!(html.contains(r#"action="/venues/1/edit""#));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_search_page_links_into_scope() {
        let html = SearchTemplate {
            page: PageContext::artists(Vec::new()),
            results: SearchResults::new(vec![EntitySummary {
                id: 6,
                name: "The Wild Sax Band".to_string(),
                num_upcoming_shows: 2,
            }]),
            search_term: "band".to_string(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Number of search results for \"band\": 1"));
        assert!(html.contains(r#"href="/artists/6""#));
        assert!(html.contains(r#"action="/artists/search""#));
    }
}
