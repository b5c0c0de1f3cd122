//! Festival listing: tournaments grouped client-side by owning venue.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::application::search::Searcher;
use crate::domain::error::DirectoryError;
use crate::domain::model::{Festival, Tournament};
use crate::domain::pagination::{
    controls_for, Page, PageMark, PaginationState, DEFAULT_WINDOW_RADIUS,
};
use crate::domain::traits::VenueSource;
use crate::infrastructure::network::retry::fetch_with_retry;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct FestivalView {
    pub query: Option<String>,
    pub page: Page<Festival>,
    pub window: Vec<PageMark>,
}

pub async fn festival_listing(
    source: &dyn VenueSource,
    state: &AppState,
    query: Option<&str>,
    requested_page: usize,
) -> Result<FestivalView, DirectoryError> {
    let (page_size, debounce, policy) = {
        let config = state.config.read().await;
        (
            config.page_size,
            config.search_debounce(),
            config.retry_policy(),
        )
    };

    let tournaments = fetch_with_retry(&policy, || source.tournaments()).await?;
    let festivals = group_festivals(tournaments);

    let filtered = match query {
        Some(q) if !q.trim().is_empty() => {
            let searcher = Searcher::new(debounce);
            searcher.search(q, &festivals).await.unwrap_or_default()
        }
        _ => festivals,
    };

    let mut pagination = PaginationState::new(page_size);
    pagination.collection_changed();
    pagination.set_page(requested_page);
    let page = pagination.page_of(&filtered);
    let window = controls_for(&page, page_size, DEFAULT_WINDOW_RADIUS);

    Ok(FestivalView {
        query: query.map(str::to_string),
        page,
        window,
    })
}

/// Group flat tournament records into per-venue festival aggregates. The
/// date span covers every dated tournament; venue name and city come from
/// the first record that carries them.
pub fn group_festivals(tournaments: Vec<Tournament>) -> Vec<Festival> {
    let mut by_venue: HashMap<String, Festival> = HashMap::new();
    for tournament in tournaments {
        let festival = by_venue
            .entry(tournament.venue_id.clone())
            .or_insert_with(|| Festival {
                venue_id: tournament.venue_id.clone(),
                venue_name: String::new(),
                city: String::new(),
                first_day: None,
                last_day: None,
                tournaments: Vec::new(),
            });
        if festival.venue_name.is_empty() {
            if let Some(name) = &tournament.venue_name {
                festival.venue_name = name.clone();
            }
        }
        if festival.city.is_empty() {
            if let Some(city) = &tournament.city {
                festival.city = city.clone();
            }
        }
        if let Some(day) = tournament.start_day() {
            festival.first_day = Some(festival.first_day.map_or(day, |d| d.min(day)));
            festival.last_day = Some(festival.last_day.map_or(day, |d| d.max(day)));
        }
        festival.tournaments.push(tournament);
    }

    let mut festivals: Vec<Festival> = by_venue.into_values().collect();
    for festival in &mut festivals {
        festival
            .tournaments
            .sort_by(|a, b| cmp_dates_none_last(a.start_day(), b.start_day()));
    }
    // earliest festival first, undated ones last
    festivals.sort_by(|a, b| {
        cmp_dates_none_last(a.first_day, b.first_day)
            .then_with(|| a.venue_name.cmp(&b.venue_name))
    });
    festivals
}

fn cmp_dates_none_last(a: Option<chrono::NaiveDate>, b: Option<chrono::NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
