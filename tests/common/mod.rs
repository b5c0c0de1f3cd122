#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use cardex::domain::error::DirectoryError;
use cardex::domain::model::{CashGame, Tournament};
use cardex::domain::traits::VenueSource;

/// Scripted `VenueSource` with per-endpoint call counters, so tests can
/// assert how many network round-trips a pipeline actually performed.
pub struct ScriptedSource {
    pub country_xml: String,
    pub details: HashMap<String, String>,
    pub fail_detail_ids: HashSet<String>,
    pub tournaments: Vec<Tournament>,
    pub cash_games: Vec<CashGame>,
    pub fail_cash_games: bool,
    pub country_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    country_failures_left: Mutex<usize>,
}

impl ScriptedSource {
    pub fn new(country_xml: &str) -> Self {
        Self {
            country_xml: country_xml.to_string(),
            details: HashMap::new(),
            fail_detail_ids: HashSet::new(),
            tournaments: Vec::new(),
            cash_games: Vec::new(),
            fail_cash_games: false,
            country_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            country_failures_left: Mutex::new(0),
        }
    }

    /// Make the next `n` country fetches fail with a retryable error.
    pub fn fail_country_times(self, n: usize) -> Self {
        *self.country_failures_left.lock().unwrap() = n;
        self
    }

    pub fn with_detail(mut self, id: &str, xml: &str) -> Self {
        self.details.insert(id.to_string(), xml.to_string());
        self
    }

    pub fn with_failing_detail(mut self, id: &str) -> Self {
        self.fail_detail_ids.insert(id.to_string());
        self
    }

    pub fn with_tournaments(mut self, tournaments: Vec<Tournament>) -> Self {
        self.tournaments = tournaments;
        self
    }

    pub fn with_cash_games(mut self, cash_games: Vec<CashGame>) -> Self {
        self.cash_games = cash_games;
        self
    }

    pub fn with_failing_cash_games(mut self) -> Self {
        self.fail_cash_games = true;
        self
    }
}

#[async_trait]
impl VenueSource for ScriptedSource {
    async fn venues_by_country(&self, _country: &str) -> Result<String, DirectoryError> {
        self.country_calls.fetch_add(1, Ordering::SeqCst);
        let mut failures = self.country_failures_left.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(DirectoryError::Transport("connection reset".to_string()));
        }
        Ok(self.country_xml.clone())
    }

    async fn venue_detail(&self, id: &str) -> Result<String, DirectoryError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_detail_ids.contains(id) {
            return Err(DirectoryError::Transport("connection reset".to_string()));
        }
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::Transport("no route to host".to_string()))
    }

    async fn tournaments(&self) -> Result<Vec<Tournament>, DirectoryError> {
        Ok(self.tournaments.clone())
    }

    async fn cash_games(&self) -> Result<Vec<CashGame>, DirectoryError> {
        if self.fail_cash_games {
            return Err(DirectoryError::Transport("connection reset".to_string()));
        }
        Ok(self.cash_games.clone())
    }
}

/// Listing XML with one venue per (id, title, city) triple.
pub fn country_xml(venues: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from("<CASINOS>");
    for (id, title, city) in venues {
        xml.push_str(&format!(
            r#"<CASINO ID="{id}" TITLE="{title}" ADDRESS="Main street 1" CITY="{city}" COUNTRY="SK"/>"#
        ));
    }
    xml.push_str("</CASINOS>");
    xml
}

/// Detail XML for a single venue, optionally carrying a logo attribute.
pub fn detail_xml(id: &str, title: &str, logo: Option<&str>) -> String {
    let logo_attr = logo
        .map(|url| format!(r#" LOGO="{url}""#))
        .unwrap_or_default();
    format!(
        r#"<CASINOS><CASINO ID="{id}" TITLE="{title}" ADDRESS="Main street 1" CITY="Bratislava" COUNTRY="SK"{logo_attr}/></CASINOS>"#
    )
}

pub fn tournament(venue_id: &str, venue_name: &str, city: &str, start_date: &str) -> Tournament {
    Tournament {
        venue_id: venue_id.to_string(),
        venue_name: Some(venue_name.to_string()),
        title: Some(format!("{venue_name} Main Event")),
        city: Some(city.to_string()),
        img: None,
        img2: None,
        duration: None,
        start_date: Some(start_date.to_string()),
        start_time: Some("18:00".to_string()),
        buyin: Some("150".to_string()),
        currency: Some("EUR".to_string()),
        guarantee: None,
    }
}

pub fn cash_game(id: &str, venue_id: &str) -> CashGame {
    CashGame {
        id: id.to_string(),
        venue_id: venue_id.to_string(),
        game_type: Some("NLH".to_string()),
        blinds: Some("1/2".to_string()),
        players: Some(6),
        currency: Some("EUR".to_string()),
        updated_at: Some("2026-08-01 20:15:00".to_string()),
    }
}
