use crate::domain::error::DirectoryError;
use crate::domain::model::{CashGame, Tournament};
use async_trait::async_trait;

/// Trait for the remote directory backends.
///
/// The XML endpoints hand back the raw document so the memoizing record
/// parser downstream sees the exact payload string; the JSON endpoints are
/// shape-validated and typed at the source. Tests substitute a scripted
/// implementation to exercise retry, caching, and parse behavior offline.
#[async_trait]
pub trait VenueSource: Send + Sync {
    /// Raw venues-by-country XML document.
    async fn venues_by_country(&self, country: &str) -> Result<String, DirectoryError>;

    /// Raw single-venue detail XML document.
    async fn venue_detail(&self, id: &str) -> Result<String, DirectoryError>;

    /// Flat tournament records from the events endpoint.
    async fn tournaments(&self) -> Result<Vec<Tournament>, DirectoryError>;

    /// Flat cash-game records.
    async fn cash_games(&self) -> Result<Vec<CashGame>, DirectoryError>;
}
