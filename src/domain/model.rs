use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::text::slugify;

/// One venue row from the by-country listing. Constructed fresh on every
/// successful parse and never mutated; a new fetch replaces the whole
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VenueRecord {
    pub id: String,
    pub name: String,
    pub country_code: String,
    /// "address, city" with empty parts elided.
    pub description_line: String,
    pub logo_url: Option<String>,
}

impl VenueRecord {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Full per-venue record from the detail endpoint, including the nested
/// live-tournament and picture sub-lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueDetail {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country_code: String,
    pub coordinates: Option<String>,
    pub contact: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub size: Option<String>,
    pub rank: Option<String>,
    pub image_url: Option<String>,
    pub live_tournaments: Vec<LiveTournament>,
    pub picture_urls: Vec<String>,
}

impl VenueDetail {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveTournament {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub buyin: Option<String>,
}

/// Flat tournament record from the events endpoint. The feed is string-typed
/// and fields go missing per record; render falls back field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(rename = "club_id")]
    pub venue_id: String,
    #[serde(rename = "club_name")]
    pub venue_name: Option<String>,
    pub title: Option<String>,
    pub city: Option<String>,
    pub img: Option<String>,
    pub img2: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub buyin: Option<String>,
    pub currency: Option<String>,
    pub guarantee: Option<String>,
}

impl Tournament {
    pub fn start_day(&self) -> Option<NaiveDate> {
        let raw = self.start_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

/// Client-side aggregate of tournaments grouped by owning venue id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Festival {
    pub venue_id: String,
    pub venue_name: String,
    pub city: String,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub tournaments: Vec<Tournament>,
}

/// Flat cash-game record from the cash-games endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashGame {
    pub id: String,
    #[serde(rename = "club_id")]
    pub venue_id: String,
    pub game_type: Option<String>,
    pub blinds: Option<String>,
    pub players: Option<u32>,
    pub currency: Option<String>,
    pub updated_at: Option<String>,
}

impl CashGame {
    pub fn updated(&self) -> Option<NaiveDateTime> {
        let raw = self.updated_at.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
    }
}
