use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::model::{CountsIndex, RedirectMap};
use crate::persist;

pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("redirect-counts/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetches the redirect map, caches the raw body to `raw_file`, then decodes it.
/// Any failure here is fatal to the run.
pub async fn fetch_and_cache_redirect_map(
    client: &Client,
    url: &Url,
    raw_file: &Path,
) -> Result<RedirectMap> {
    let start_time = Instant::now();
    info!(action = "start", component = "redirect_map_fetch", url = %url, "Fetching redirect map");

    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Failed to request redirect map from {}", url))?;

    let status = response.status();
    if status != StatusCode::OK {
        anyhow::bail!("Redirect map request to {} returned {}", url, status);
    }

    let raw: Value = response
        .json()
        .await
        .context("Redirect map response is not valid JSON")?;

    persist::save_raw(raw_file, &raw)?;
    info!(action = "cache", component = "redirect_map_fetch", file_path = ?raw_file, "Redirect map saved");

    let redirect_map: RedirectMap = serde_json::from_value(raw)
        .context("Redirect map must be an object of path -> list of paths")?;

    info!(
        action = "complete",
        component = "redirect_map_fetch",
        canonical_paths = redirect_map.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Redirect map fetched"
    );
    Ok(redirect_map)
}

/// Outcome of asking the count service for hit counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountsFetch {
    Fetched(CountsIndex),
    /// The service could not be used; the run continues with no counts.
    Degraded { reason: String },
}

impl CountsFetch {
    pub fn is_degraded(&self) -> bool {
        matches!(self, CountsFetch::Degraded { .. })
    }

    pub fn into_index(self) -> CountsIndex {
        match self {
            CountsFetch::Fetched(index) => index,
            CountsFetch::Degraded { .. } => CountsIndex::new(),
        }
    }
}

/// Fetches the flat path -> count index. Never fails: every error is logged and
/// reported as `CountsFetch::Degraded`.
pub async fn fetch_all_counts(client: &Client, url: &Url) -> CountsFetch {
    let start_time = Instant::now();
    info!(action = "start", component = "counts_fetch", "Fetching hit counts");

    match try_fetch_counts(client, url).await {
        Ok(index) => {
            info!(
                action = "complete",
                component = "counts_fetch",
                path_count = index.len(),
                duration_ms = start_time.elapsed().as_millis(),
                "Hit counts fetched"
            );
            CountsFetch::Fetched(index)
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            warn!(
                action = "degrade",
                component = "counts_fetch",
                error = %reason,
                duration_ms = start_time.elapsed().as_millis(),
                "Count service unavailable, continuing with zero counts"
            );
            CountsFetch::Degraded { reason }
        }
    }
}

async fn try_fetch_counts(client: &Client, url: &Url) -> Result<CountsIndex> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .context("Count service request failed")?;

    let status = response.status();
    if status != StatusCode::OK {
        anyhow::bail!("Count service returned {}", status);
    }

    let body: Value = response
        .json()
        .await
        .context("Count service response is not valid JSON")?;
    parse_counts(&body)
}

/// Decodes a `{ "<path>": <count>, ... }` body, coercing each value with
/// [`coerce_count`].
pub fn parse_counts(body: &Value) -> Result<CountsIndex> {
    let object = body
        .as_object()
        .context("Count service body is not a JSON object")?;

    object
        .iter()
        .map(|(path, value)| {
            coerce_count(value)
                .map(|count| (path.clone(), count))
                .with_context(|| format!("Count for '{}' is not a non-negative integer: {}", path, value))
        })
        .collect()
}

/// Integers pass through, non-negative floats truncate, numeric strings parse,
/// and booleans count as 0 or 1.
pub fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(count) = n.as_u64() {
                return Some(count);
            }
            let f = n.as_f64()?;
            // 2^64 is exactly representable; anything at or above it does not fit
            if f.is_finite() && f >= 0.0 && f < 18_446_744_073_709_551_616.0 {
                Some(f.trunc() as u64)
            } else {
                None
            }
        }
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Bool(b) => Some(u64::from(*b)),
        _ => None,
    }
}
