/// Eviction victim selection.
///
/// When resident memory exceeds the budget, the manager builds one
/// [`EvictionCandidate`] per in-memory resource (minus the protected one)
/// and asks the active [`PriorityBehaviour`] which to unload first. Ties are
/// broken by lexical mapping name so the choice is deterministic.

use std::cmp::Reverse;
use serde::{Deserialize, Serialize};

/// Rule used to pick the next resource to evict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriorityBehaviour {
    /// Oldest last access first
    #[default]
    LeastRecentlyUsed,
    /// Fewest accesses first
    LeastFrequentlyUsed,
    /// Smallest resident size first
    SizeAscending,
    /// Largest resident size first
    SizeDescending,
}

/// Snapshot of one evictable resource
#[derive(Debug, Clone, Copy)]
pub struct EvictionCandidate<'a, K> {
    pub id: K,
    pub name: &'a str,
    /// Monotonic access stamp (larger is more recent)
    pub last_access: u64,
    pub access_count: u64,
    pub size: u64,
}

impl PriorityBehaviour {
    /// Pick the candidate to evict first, or `None` if there is none
    pub fn select_victim<'a, K: Copy>(
        &self,
        candidates: impl IntoIterator<Item = EvictionCandidate<'a, K>>,
    ) -> Option<K> {
        let candidates = candidates.into_iter();
        let victim = match self {
            PriorityBehaviour::LeastRecentlyUsed => candidates.min_by_key(|c| (c.last_access, c.name)),
            PriorityBehaviour::LeastFrequentlyUsed => candidates.min_by_key(|c| (c.access_count, c.name)),
            PriorityBehaviour::SizeAscending => candidates.min_by_key(|c| (c.size, c.name)),
            PriorityBehaviour::SizeDescending => candidates.min_by_key(|c| (Reverse(c.size), c.name)),
        };
        victim.map(|c| c.id)
    }
}

#[cfg(test)]
#[path = "eviction_tests.rs"]
mod tests;
