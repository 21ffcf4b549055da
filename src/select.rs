// src/select.rs
use chrono::{Duration, NaiveDate};

use crate::extract::CandidatePost;
use crate::store::LinkStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionResult {
    Selected(String),
    NoNewPosts,
}

/// First non-pinned post whose url isn't in `store` wins.
///
/// On a hit the returned store is `store.record(url, today, window)`.
/// On a miss (including no candidates at all) the store comes back as-is,
/// without pruning.
pub fn select(
    candidates: &[CandidatePost],
    store: &LinkStore,
    today: NaiveDate,
    window: Duration,
) -> (SelectionResult, LinkStore) {
    let mut unpinned = candidates.iter().filter(|c| {
        if c.is_pinned { logd!("Skipping pinned post {}", c.url); }
        !c.is_pinned
    });

    match unpinned.find(|c| !store.contains(&c.url)) {
        Some(post) => {
            logf!("Selected {}", post.url);
            let next = store.record(&post.url, today, window);
            (SelectionResult::Selected(post.url.clone()), next)
        }
        None => {
            logf!("No new posts among {} candidate(s)", candidates.len());
            (SelectionResult::NoNewPosts, store.clone())
        }
    }
}
