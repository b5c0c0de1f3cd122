//! Single-venue detail view, with slug resolution against the country
//! listing and supplementary cash games.

use serde::Serialize;

use crate::domain::error::DirectoryError;
use crate::domain::model::{CashGame, VenueDetail};
use crate::domain::text::slugify;
use crate::domain::traits::VenueSource;
use crate::infrastructure::network::retry::{fetch_with_retry, RetryPolicy};
use crate::infrastructure::xml;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub detail: VenueDetail,
    /// Slug derived from the canonical venue name. When the caller arrived
    /// via a stale slug, render points at this one.
    pub canonical_slug: String,
    pub requested_slug: Option<String>,
    pub cash_games: Vec<CashGame>,
}

pub async fn venue_detail(
    source: &dyn VenueSource,
    state: &AppState,
    selector: &str,
    country: Option<&str>,
) -> Result<DetailView, DirectoryError> {
    let policy = state.config.read().await.retry_policy();

    let (id, requested_slug) = if is_venue_id(selector) {
        (selector.to_string(), None)
    } else {
        let country = country.ok_or_else(|| {
            DirectoryError::Config("looking a venue up by slug requires --country".to_string())
        })?;
        let id = resolve_slug(source, state, country, selector, &policy).await?;
        (id, Some(slugify(selector)))
    };

    let raw = fetch_with_retry(&policy, || source.venue_detail(&id)).await?;
    let detail = xml::parse_detail(&raw, &id)?;

    // supplementary section: a failure here leaves the detail view intact
    let cash_games = match source.cash_games().await {
        Ok(games) => games.into_iter().filter(|g| g.venue_id == id).collect(),
        Err(err) => {
            tracing::warn!(error = %err, venue = %id, "cash games unavailable, rendering empty section");
            Vec::new()
        }
    };

    Ok(DetailView {
        canonical_slug: detail.slug(),
        detail,
        requested_slug,
        cash_games,
    })
}

fn is_venue_id(selector: &str) -> bool {
    !selector.is_empty() && selector.chars().all(|c| c.is_ascii_digit())
}

/// Find the venue whose canonical slug matches the requested one. Slugifying
/// the request first makes stale-but-recognizable slugs (extra diacritics,
/// case drift) resolve to the same venue.
async fn resolve_slug(
    source: &dyn VenueSource,
    state: &AppState,
    country: &str,
    slug_text: &str,
    policy: &RetryPolicy,
) -> Result<String, DirectoryError> {
    let country = country.to_uppercase();
    let raw = fetch_with_retry(policy, || source.venues_by_country(&country)).await?;
    let venues = {
        let mut parser = state.parser.lock().unwrap_or_else(|e| e.into_inner());
        parser.parse_listing(&raw)?
    };
    let wanted = slugify(slug_text);
    venues
        .iter()
        .find(|venue| venue.slug() == wanted)
        .map(|venue| venue.id.clone())
        .ok_or_else(|| DirectoryError::NotFound(slug_text.to_string()))
}
