//! Country-listing pipeline: fetch -> parse -> filter -> paginate -> enrich.

use futures_util::future::join_all;
use serde::Serialize;

use crate::application::search::Searcher;
use crate::domain::error::DirectoryError;
use crate::domain::model::VenueRecord;
use crate::domain::pagination::{
    controls_for, Page, PageMark, PaginationState, DEFAULT_WINDOW_RADIUS,
};
use crate::domain::traits::VenueSource;
use crate::infrastructure::network::retry::fetch_with_retry;
use crate::infrastructure::storage::detail_cache::DetailEntry;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub country: String,
    pub query: Option<String>,
    pub page: Page<VenueRecord>,
    /// Empty when the collection fits on one page.
    pub window: Vec<PageMark>,
}

pub async fn country_listing(
    source: &dyn VenueSource,
    state: &AppState,
    country: &str,
    query: Option<&str>,
    requested_page: usize,
) -> Result<ListingView, DirectoryError> {
    let (page_size, debounce, policy) = {
        let config = state.config.read().await;
        (
            config.page_size,
            config.search_debounce(),
            config.retry_policy(),
        )
    };
    let country = country.to_uppercase();
    // a new primary subject invalidates all per-venue detail from the old one
    state.detail_cache.set_context(&country);

    let raw = fetch_with_retry(&policy, || source.venues_by_country(&country)).await?;
    let venues = {
        let mut parser = state.parser.lock().unwrap_or_else(|e| e.into_inner());
        parser.parse_listing(&raw)?
    };

    let filtered = match query {
        Some(q) if !q.trim().is_empty() => {
            let searcher = Searcher::new(debounce);
            // a superseded search never applies; with a single call here the
            // ticket is always the newest
            searcher.search(q, &venues).await.unwrap_or_default()
        }
        _ => venues.as_ref().clone(),
    };

    let mut pagination = PaginationState::new(page_size);
    pagination.collection_changed();
    pagination.set_page(requested_page);
    let mut page = pagination.page_of(&filtered);

    // logos are supplementary: fetch lazily for the visible slice only, in
    // parallel, and render whatever resolved
    let lookups: Vec<_> = page
        .items
        .iter()
        .filter(|venue| venue.logo_url.is_none())
        .map(|venue| state.detail_cache.ensure_fetched(&venue.id, source))
        .collect();
    join_all(lookups).await;

    for venue in &mut page.items {
        if venue.logo_url.is_none() {
            if let Some(DetailEntry::Found(url)) = state.detail_cache.get(&venue.id) {
                venue.logo_url = Some(url);
            }
        }
    }

    let window = controls_for(&page, page_size, DEFAULT_WINDOW_RADIUS);

    Ok(ListingView {
        country,
        query: query.map(str::to_string),
        page,
        window,
    })
}
