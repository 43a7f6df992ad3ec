use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Canonical path -> redirect paths that forward to it, in source order.
pub type RedirectMap = IndexMap<String, Vec<String>>;

/// Flat path -> hit count index from the count service.
pub type CountsIndex = HashMap<String, u64>;

/// Canonical path -> its per-redirect counts.
pub type CountsMap = IndexMap<String, PathCounts>;

/// Totals are `u128` so summing any number of `u64` counts cannot overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCounts {
    pub paths_counts: IndexMap<String, u64>,
    pub total_count: u128,
}

impl PathCounts {
    pub fn zeroed<'a>(paths: impl IntoIterator<Item = &'a String>) -> Self {
        Self {
            paths_counts: paths.into_iter().map(|p| (p.clone(), 0)).collect(),
            total_count: 0,
        }
    }

    /// Sets `total_count` to the sum of `paths_counts`.
    pub fn recompute_total(&mut self) {
        self.total_count = self.paths_counts.values().map(|&c| u128::from(c)).sum();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub canonical_paths: usize,
    pub redirect_paths: usize,
    pub total_hits: u128,
    pub counts_degraded: bool,
    pub output_file: PathBuf,
}
