// Lazy, id-keyed cache of supplementary venue data (logo URLs) using DashMap.
use dashmap::DashMap;
use std::sync::Mutex;

use crate::domain::traits::VenueSource;
use crate::infrastructure::xml;

/// Resolution of one logo lookup. `Absent` means the venue was fetched and
/// genuinely has no logo; `Failed` means the lookup errored. Both are
/// resolved states and are never refetched within the current context;
/// keeping them distinct only matters for logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEntry {
    Found(String),
    Absent,
    Failed,
}

impl DetailEntry {
    pub fn value(&self) -> Option<&str> {
        match self {
            DetailEntry::Found(url) => Some(url),
            _ => None,
        }
    }
}

/// Per-view logo cache. An entry, once present, is final for the lifetime of
/// the owning context; switching context (a different country, a refetch)
/// clears everything so stale detail never leaks across views. Concurrent
/// fetches for the same id are not deduplicated; the overwrite is
/// idempotent, each write only touches its own key.
#[derive(Debug, Default)]
pub struct DetailCache {
    context: Mutex<Option<String>>,
    map: DashMap<String, DetailEntry>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a new owning context, clearing the cache if it changed.
    pub fn set_context(&self, context: &str) {
        let mut current = self.context.lock().unwrap_or_else(|e| e.into_inner());
        if current.as_deref() != Some(context) {
            self.map.clear();
            *current = Some(context.to_string());
        }
    }

    pub fn get(&self, id: &str) -> Option<DetailEntry> {
        self.map.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// No-op when the id is already resolved; otherwise fetch the venue
    /// detail once and record the outcome. Errors degrade to `Failed`;
    /// a missing logo never bubbles up into the primary view.
    pub async fn ensure_fetched(&self, id: &str, source: &dyn VenueSource) {
        if self.map.contains_key(id) {
            return;
        }
        let entry = match source.venue_detail(id).await {
            Ok(raw) => match xml::parse_detail(&raw, id) {
                Ok(detail) => match detail.logo_url {
                    Some(url) => DetailEntry::Found(url),
                    None => DetailEntry::Absent,
                },
                Err(err) => {
                    tracing::warn!(id, error = %err, "venue detail unparsable, marking lookup failed");
                    DetailEntry::Failed
                }
            },
            Err(err) => {
                tracing::warn!(id, error = %err, "logo lookup failed");
                DetailEntry::Failed
            }
        };
        self.map.insert(id.to_string(), entry);
    }
}
