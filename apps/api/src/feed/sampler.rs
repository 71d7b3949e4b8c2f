//! Seeded Sampler — builds the mock social feed shown around a reference thumbnail.
//!
//! The feed is a pure function of `(pool, reference, context key, size)`. Server-prepared
//! previews and client-side recomputation therefore agree without shipping the feed.
//!
//! Algorithm:
//! 1. Dedup the pool (first occurrence wins) and drop the reference from the candidates
//! 2. Seed mulberry32 from the FNV-1a hash of the context key
//! 3. Partial Fisher–Yates over the candidates for the `size - 1` free slots
//! 4. Pad by cycling the shuffled candidates when the pool is too small
//! 5. Insert the reference at a position drawn from the same stream, truncate to `size`

use std::collections::HashSet;

use crate::feed::seed::{seed_for, Mulberry32};

pub const DEFAULT_FEED_SIZE: usize = 12;

/// Upper bound accepted for per-request feed sizes.
pub const MAX_FEED_SIZE: usize = 48;

/// Builds the context key that seeds a feed: `"{owner}|{reference}|{pool_len}"`.
pub fn context_key(owner: &str, reference: &str, pool_len: usize) -> String {
    format!("{owner}|{reference}|{pool_len}")
}

/// Removes duplicate references, keeping the first occurrence and the original order.
pub fn dedup_pool<S: AsRef<str>>(pool: &[S]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(pool.len());
    pool.iter()
        .map(AsRef::as_ref)
        .filter(|item| seen.insert(*item))
        .collect()
}

/// Deterministically samples a feed of exactly `size` items containing `reference`.
///
/// Returns an empty feed when the pool is empty or `size` is zero; callers render an empty
/// state for it.
pub fn sample<S: AsRef<str>>(
    pool: &[S],
    reference: &str,
    context_key: &str,
    size: usize,
) -> Vec<String> {
    let pool = dedup_pool(pool);
    if pool.is_empty() || size == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<&str> = pool.into_iter().filter(|item| *item != reference).collect();
    if candidates.is_empty() {
        return vec![reference.to_string(); size];
    }

    let mut rng = Mulberry32::new(seed_for(context_key));
    let slots = size - 1;
    let len = candidates.len();
    let take = slots.min(len);

    for i in 0..take.min(len - 1) {
        let j = i + rng.next_index(len - i);
        candidates.swap(i, j);
    }

    let mut feed: Vec<String> = candidates[..take].iter().map(|s| s.to_string()).collect();
    while feed.len() < slots {
        feed.push(candidates[feed.len() % len].to_string());
    }

    let position = rng.next_index(feed.len() + 1);
    feed.insert(position, reference.to_string());
    feed.truncate(size);
    feed
}
