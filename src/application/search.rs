//! Debounced, diacritic-insensitive search over an in-memory collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::model::{Festival, VenueRecord};
use crate::domain::text::normalize_for_search;

/// Fields a collection item exposes to substring search.
pub trait Searchable {
    fn haystacks(&self) -> Vec<&str>;
}

impl Searchable for VenueRecord {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description_line.as_str()]
    }
}

impl Searchable for Festival {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.venue_name.as_str(), self.city.as_str()]
    }
}

/// Filter from the full, unfiltered collection; never from a previous
/// result, so narrowing and then widening a query is lossless.
pub fn filter_collection<T: Searchable + Clone>(query: &str, items: &[T]) -> Vec<T> {
    let needle = normalize_for_search(query.trim());
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            item.haystacks()
                .iter()
                .any(|hay| normalize_for_search(hay).contains(&needle))
        })
        .cloned()
        .collect()
}

/// Trailing-edge debouncer. Every call takes a ticket from a monotonically
/// increasing counter; after the delay, a call whose ticket is no longer the
/// newest resolves to `None` and its result must be discarded. Tickets
/// rather than timer cancellation make the ordering safe even when calls
/// overlap from reentrant call sites.
#[derive(Debug)]
pub struct Searcher {
    delay: Duration,
    seq: AtomicU64,
}

impl Searcher {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            seq: AtomicU64::new(0),
        }
    }

    /// `None` means this call was superseded by a newer one. An empty or
    /// whitespace-only query resolves immediately with the full collection;
    /// that path never waits out the debounce delay.
    pub async fn search<T: Searchable + Clone>(&self, query: &str, items: &[T]) -> Option<Vec<T>> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        if query.trim().is_empty() {
            return Some(items.to_vec());
        }
        tokio::time::sleep(self.delay).await;
        if self.seq.load(Ordering::SeqCst) != ticket {
            return None;
        }
        Some(filter_collection(query, items))
    }
}
