use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::aggregate::filter_positive;
use crate::model::CountsMap;

/// Writes the redirect map body exactly as received, pretty-printed.
pub fn save_raw(path: &Path, raw: &Value) -> Result<()> {
    write_pretty(path, raw)
}

/// Writes the aggregated counts. With `filter_zero_counts`, only positive
/// counts are kept. Returns what was actually written.
pub fn save_counts(path: &Path, data: &CountsMap, filter_zero_counts: bool) -> Result<CountsMap> {
    let start_time = Instant::now();

    let written = if filter_zero_counts {
        filter_positive(data)
    } else {
        data.clone()
    };
    write_pretty(path, &written)?;

    info!(
        action = "complete",
        component = "counts_save",
        file_path = ?path,
        canonical_paths = written.len(),
        filtered = filter_zero_counts,
        duration_ms = start_time.elapsed().as_millis(),
        "Counts saved"
    );
    Ok(written)
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut body = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {:?}", path))?;
    body.push('\n');
    fs::write(path, body).with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathCounts;
    use indexmap::IndexMap;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> CountsMap {
        CountsMap::from([
            (
                "/home".to_string(),
                PathCounts {
                    paths_counts: IndexMap::from([
                        ("/old-home".to_string(), 5),
                        ("/home2".to_string(), 0),
                    ]),
                    total_count: 5,
                },
            ),
            (
                "/gone".to_string(),
                PathCounts {
                    paths_counts: IndexMap::from([("/older".to_string(), 0)]),
                    total_count: 0,
                },
            ),
        ])
    }

    #[test]
    fn unfiltered_output_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counts.json");
        let data = sample();

        let written = save_counts(&path, &data, false).unwrap();
        assert_eq!(written, data);

        let reread: CountsMap = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread, data);
        assert_eq!(
            reread.keys().collect::<Vec<_>>(),
            vec!["/home", "/gone"],
            "key order follows the redirect map"
        );
    }

    #[test]
    fn filtered_output_drops_zero_counts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counts.json");

        save_counts(&path, &sample(), true).unwrap();

        let reread: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            reread,
            json!({"/home": {"paths_counts": {"/old-home": 5}, "total_count": 5}})
        );
    }

    #[test]
    fn raw_file_is_pretty_printed_and_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.json");

        save_raw(&path, &json!({"/stale": ["/x"]})).unwrap();
        save_raw(&path, &json!({"/home": ["/old-home"]})).unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.contains("\n  \"/home\": [\n    \"/old-home\"\n  ]"));
        assert!(!body.contains("/stale"));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("counts.json");
        assert!(save_counts(&path, &sample(), false).is_err());
    }
}
