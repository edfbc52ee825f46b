//! Database models and page view-models

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::time::is_past;

/// A venue row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// An artist row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A show row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

/// Field values for inserting or replacing a venue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Field values for inserting or replacing an artist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Field values for a new show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

/// One line of a listing or search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing a city and state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// Search response: every match plus the match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

impl SearchResults {
    pub fn new(data: Vec<EntitySummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A show as listed on a venue page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// A show as listed on an artist page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// A show as listed on the shows page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// Anything with a start time can be split into past and upcoming.
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for NaiveDateTime {
    fn start_time(&self) -> NaiveDateTime {
        *self
    }
}

/// Shows split around the request time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partitioned<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
}

impl<T> Partitioned<T> {
    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }
}

/// Split shows into past and upcoming, preserving input order in each half
pub fn partition_shows<T: Scheduled>(shows: Vec<T>, now: NaiveDateTime) -> Partitioned<T> {
    let (past_shows, upcoming_shows) = shows
        .into_iter()
        .partition(|show| is_past(show.start_time(), now));

    Partitioned {
        past_shows,
        upcoming_shows,
    }
}

/// Venue page: the venue row plus its shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: Partitioned<VenueShow>,
}

/// Artist page: the artist row plus its shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: Partitioned<ArtistShow>,
}

/// Case-insensitive substring match; an empty term matches every name
pub fn name_matches(name: &str, search_term: &str) -> bool {
    name.to_uppercase().contains(&search_term.to_uppercase())
}

/// Row used to build the venues-by-area page
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VenueLocation {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
}

/// Group venues by `(city, state)`
///
/// Areas appear in order of first occurrence; venues keep their input order
/// within an area.
pub fn group_by_area(
    venues: Vec<VenueLocation>,
    upcoming: impl Fn(i64) -> i64,
) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();

    for venue in venues {
        let summary = EntitySummary {
            id: venue.id,
            num_upcoming_shows: upcoming(venue.id),
            name: venue.name,
        };

        match areas
            .iter()
            .position(|area| area.city == venue.city && area.state == venue.state)
        {
            Some(index) => areas[index].venues.push(summary),
            None => areas.push(Area {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }

    areas
}
