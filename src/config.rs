use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::args::Args;

pub const DEFAULT_REDIRECT_MAP_URL: &str = "https://arnottferels.github.io/a/data/redirect.json";
pub const DEFAULT_RAW_FILE: &str = "raw.json";
pub const DEFAULT_OUTPUT_FILE: &str = "counts.json";
pub const API_URL_ENV: &str = "API_URL";

/// Validated run configuration, built once at process entry and handed to the
/// fetchers and persister.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub redirect_map_url: Url,
    pub raw_file: PathBuf,
    pub output_file: PathBuf,
    pub filter_zero_counts: bool,
    pub timeout: Duration,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        let api_url = match args.api_url.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_http_url(raw)
                .with_context(|| format!("{} is not a valid endpoint", API_URL_ENV))?,
            _ => anyhow::bail!("{} environment variable not set", API_URL_ENV),
        };

        let redirect_map_url = parse_http_url(args.redirect_map_url.trim())
            .context("Redirect map URL is not valid")?;

        if args.timeout_secs == 0 {
            anyhow::bail!("--timeout-secs must be greater than 0");
        }

        Ok(Self {
            api_url,
            redirect_map_url,
            raw_file: args.raw_file.clone(),
            output_file: args.output.clone(),
            filter_zero_counts: args.filter_zero_counts,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Failed to parse URL '{}'", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("Unsupported URL scheme '{}' in '{}'", other, raw),
    }
}
