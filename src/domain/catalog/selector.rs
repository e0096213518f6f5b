//! Random chant selection

use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::{Bucket, Catalog, ChantEntry};

/// Default number of draws made by [`select_with_retry`]
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Draw one chant uniformly at random from a bucket.
///
/// Returns `None` for the `none` bucket, for an absent catalog, and for an
/// empty bucket.
pub fn pick_chanting<'a, R: Rng + ?Sized>(
    rng: &mut R,
    catalog: Option<&'a Catalog>,
    bucket: Bucket,
) -> Option<&'a ChantEntry> {
    if bucket.is_none() {
        return None;
    }
    catalog?.entries(bucket).choose(rng)
}

/// Call [`pick_chanting`] up to `max_attempts` times and return the first hit.
///
/// The catalog is immutable, so a miss on the first draw repeats on every
/// later one.
pub fn select_with_retry<'a, R: Rng + ?Sized>(
    rng: &mut R,
    catalog: Option<&'a Catalog>,
    bucket: Bucket,
    max_attempts: usize,
) -> Option<&'a ChantEntry> {
    for attempt in 1..=max_attempts {
        if let Some(entry) = pick_chanting(rng, catalog, bucket) {
            return Some(entry);
        }
        if !bucket.is_none() {
            tracing::debug!(%bucket, attempt, max_attempts, "no chant drawn");
        }
    }
    None
}

/// Whether the picker should offer a bucket
pub fn has_available(catalog: Option<&Catalog>, bucket: Bucket) -> bool {
    if bucket.is_none() {
        return true;
    }
    catalog.is_some_and(|c| !c.entries(bucket).is_empty())
}
