//! Client-side randomisation for backends without a "random" endpoint.
//!
//! Kept free of I/O so each strategy can be driven by a seeded RNG and a canned list.

use rand::Rng;

/// Pages considered when a backend only offers paginated listings.
pub const MAX_RANDOM_PAGE: u32 = 100;

/// Items requested per batch when sampling from a single listing page.
pub const BATCH_SIZE: u32 = 20;

/// Choose a page number in `1..=max_page`.
///
/// This does not sample the backend's corpus uniformly; deep pages past
/// `max_page` are never reached.
pub fn random_page<R: Rng + ?Sized>(rng: &mut R, max_page: u32) -> u32 {
    rng.random_range(1..=max_page.max(1))
}

/// The single item returned for a one-per-page request.
pub fn take_first<T>(items: Vec<T>) -> Option<T> {
    items.into_iter().next()
}

/// Pick one item uniformly from a fetched batch.
pub fn pick_one<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.random_range(0..items.len());
    Some(items.swap_remove(index))
}
