use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::{DEFAULT_OUTPUT_FILE, DEFAULT_RAW_FILE, DEFAULT_REDIRECT_MAP_URL};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "redirect-counts",
    about = "Aggregate hit counts for every redirect path pointing at a canonical page",
    version,
    long_about = None
)]
pub struct Args {
    /// Endpoint of the hit-count service
    #[arg(long, env = "API_URL")]
    pub api_url: Option<String>,

    /// Location of the redirect map JSON
    #[arg(long, env = "REDIRECT_MAP_URL", default_value = DEFAULT_REDIRECT_MAP_URL)]
    pub redirect_map_url: String,

    /// Where to cache the raw redirect map
    #[arg(long, env = "RAW_FILE", default_value = DEFAULT_RAW_FILE)]
    pub raw_file: PathBuf,

    /// Where to write the aggregated counts
    #[arg(short, long, env = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Only write redirect paths with a positive count
    #[arg(long, env = "FILTER_ZERO_COUNTS", action = ArgAction::Set, value_parser = BoolishValueParser::new(), default_value = "false", num_args = 0..=1, default_missing_value = "true")]
    pub filter_zero_counts: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long, env = "VERBOSE", action = ArgAction::Set, value_parser = BoolishValueParser::new(), default_value = "false", num_args = 0..=1, default_missing_value = "true")]
    pub verbose: bool,
}
