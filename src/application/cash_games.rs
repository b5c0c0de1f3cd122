//! Cash-game listing, filterable by owning venue.

use serde::Serialize;

use crate::domain::error::DirectoryError;
use crate::domain::model::CashGame;
use crate::domain::pagination::{
    controls_for, Page, PageMark, PaginationState, DEFAULT_WINDOW_RADIUS,
};
use crate::domain::traits::VenueSource;
use crate::infrastructure::network::retry::fetch_with_retry;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct CashGameView {
    pub venue: Option<String>,
    pub page: Page<CashGame>,
    pub window: Vec<PageMark>,
}

pub async fn cash_game_listing(
    source: &dyn VenueSource,
    state: &AppState,
    venue: Option<&str>,
    requested_page: usize,
) -> Result<CashGameView, DirectoryError> {
    let (page_size, policy) = {
        let config = state.config.read().await;
        (config.page_size, config.retry_policy())
    };

    let games = fetch_with_retry(&policy, || source.cash_games()).await?;
    let filtered: Vec<CashGame> = match venue {
        Some(id) => games.into_iter().filter(|g| g.venue_id == id).collect(),
        None => games,
    };

    let mut pagination = PaginationState::new(page_size);
    pagination.collection_changed();
    pagination.set_page(requested_page);
    let page = pagination.page_of(&filtered);
    let window = controls_for(&page, page_size, DEFAULT_WINDOW_RADIUS);

    Ok(CashGameView {
        venue: venue.map(str::to_string),
        page,
        window,
    })
}
