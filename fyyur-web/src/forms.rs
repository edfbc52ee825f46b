//! HTML form handling
//!
//! Submissions arrive as urlencoded key/value pairs so repeated `genres`
//! keys survive. Each form keeps the raw strings for re-rendering and
//! converts into the query layer's input types on submit.

use fyyur_common::db::{Artist, ArtistInput, ShowInput, Venue, VenueInput};
use fyyur_common::time::parse_start_time;
use fyyur_common::{Error, Result};

/// Genre choices offered by the venue and artist forms
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// State choices offered by the venue and artist forms
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub type FormPairs = Vec<(String, String)>;

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn contains<S: AsRef<str> + ?Sized>(values: &[String], candidate: &S) -> bool {
    values.iter().any(|value| value == candidate.as_ref())
}

/// Venue form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_pairs(pairs: FormPairs) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = value,
                "genres" => form.genres.push(value),
                "city" => form.city = value,
                "state" => form.state = value,
                "address" => form.address = value,
                "phone" => form.phone = value,
                "image_link" => form.image_link = value,
                "facebook_link" => form.facebook_link = value,
                "website" => form.website = value,
                // The checkbox is named `seeking_artist` on the page
                "seeking_talent" | "seeking_artist" => form.seeking_talent = true,
                "seeking_description" => form.seeking_description = value,
                _ => {}
            }
        }
        form
    }

    /// Prefill from a stored venue for the edit page
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            genres: venue.genres.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> Result<VenueInput> {
        Ok(VenueInput {
            name: required("name", &self.name)?,
            genres: self.genres.clone(),
            city: required("city", &self.city)?,
            state: required("state", &self.state)?,
            address: required("address", &self.address)?,
            phone: required("phone", &self.phone)?,
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            website: optional(&self.website),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(&self.seeking_description),
        })
    }

    pub fn has_genre<S: AsRef<str> + ?Sized>(&self, genre: &S) -> bool {
        contains(&self.genres, genre)
    }

    pub fn is_state<S: AsRef<str> + ?Sized>(&self, state: &S) -> bool {
        self.state == state.as_ref()
    }
}

/// Artist form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_pairs(pairs: FormPairs) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = value,
                "genres" => form.genres.push(value),
                "city" => form.city = value,
                "state" => form.state = value,
                "phone" => form.phone = value,
                "image_link" => form.image_link = value,
                "facebook_link" => form.facebook_link = value,
                "website" => form.website = value,
                "seeking_venue" => form.seeking_venue = true,
                "seeking_description" => form.seeking_description = value,
                _ => {}
            }
        }
        form
    }

    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            genres: artist.genres.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> Result<ArtistInput> {
        Ok(ArtistInput {
            name: required("name", &self.name)?,
            genres: self.genres.clone(),
            city: required("city", &self.city)?,
            state: required("state", &self.state)?,
            phone: optional(&self.phone),
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            website: optional(&self.website),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(&self.seeking_description),
        })
    }

    pub fn has_genre<S: AsRef<str> + ?Sized>(&self, genre: &S) -> bool {
        contains(&self.genres, genre)
    }

    pub fn is_state<S: AsRef<str> + ?Sized>(&self, state: &S) -> bool {
        self.state == state.as_ref()
    }
}

/// Show form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// Empty form with the start time defaulted to the current minute
    pub fn starting_now() -> Self {
        Self {
            start_time: fyyur_common::time::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            ..Default::default()
        }
    }

    pub fn from_pairs(pairs: FormPairs) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "artist_id" => form.artist_id = value,
                "venue_id" => form.venue_id = value,
                "start_time" => form.start_time = value,
                _ => {}
            }
        }
        form
    }

    pub fn to_input(&self) -> Result<ShowInput> {
        Ok(ShowInput {
            venue_id: parse_id("venue_id", &self.venue_id)?,
            artist_id: parse_id("artist_id", &self.artist_id)?,
            start_time: parse_start_time(&self.start_time)?,
        })
    }
}

fn parse_id(field: &str, value: &str) -> Result<i64> {
    let value = required(field, value)?;
    value
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{} is not a number: {}", field, value)))
}
