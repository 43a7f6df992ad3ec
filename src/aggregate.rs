use crate::model::{CountsIndex, CountsMap, PathCounts, RedirectMap};

/// Builds one zero-filled `PathCounts` per canonical path.
pub fn transform_data_structure(redirect_map: &RedirectMap) -> CountsMap {
    redirect_map
        .iter()
        .map(|(canonical, paths)| (canonical.clone(), PathCounts::zeroed(paths)))
        .collect()
}

/// Fills every redirect path's count from `counts` (absent means 0) and sets
/// each canonical path's total.
pub fn apply_counts(data: &mut CountsMap, counts: &CountsIndex) {
    for path_counts in data.values_mut() {
        for (pathname, count) in path_counts.paths_counts.iter_mut() {
            *count = counts.get(pathname).copied().unwrap_or(0);
        }
        path_counts.recompute_total();
    }
}

/// Keeps only positive-count redirect paths, dropping canonical paths left
/// with none. Totals are recomputed over the kept subset.
pub fn filter_positive(data: &CountsMap) -> CountsMap {
    data.iter()
        .filter_map(|(canonical, path_counts)| {
            let mut kept = PathCounts {
                paths_counts: path_counts
                    .paths_counts
                    .iter()
                    .filter(|(_, count)| **count > 0)
                    .map(|(path, count)| (path.clone(), *count))
                    .collect(),
                total_count: 0,
            };
            if kept.paths_counts.is_empty() {
                return None;
            }
            kept.recompute_total();
            Some((canonical.clone(), kept))
        })
        .collect()
}
