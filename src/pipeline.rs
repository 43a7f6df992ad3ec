use anyhow::Result;
use std::time::Instant;
use tracing::info;

use crate::aggregate::{apply_counts, transform_data_structure};
use crate::config::Config;
use crate::fetch::{build_client, fetch_all_counts, fetch_and_cache_redirect_map};
use crate::model::RunSummary;
use crate::persist::save_counts;
use crate::utils::format_number;

/// Runs fetch -> reshape -> count -> persist once. The HTTP client lives only
/// for the duration of this call.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "pipeline", "Starting redirect count run");

    let client = build_client(config)?;

    let redirect_map =
        fetch_and_cache_redirect_map(&client, &config.redirect_map_url, &config.raw_file).await?;
    let mut data = transform_data_structure(&redirect_map);

    let counts = fetch_all_counts(&client, &config.api_url).await;
    let counts_degraded = counts.is_degraded();
    drop(client);

    apply_counts(&mut data, &counts.into_index());
    let written = save_counts(&config.output_file, &data, config.filter_zero_counts)?;

    let summary = RunSummary {
        canonical_paths: written.len(),
        redirect_paths: written.values().map(|p| p.paths_counts.len()).sum(),
        total_hits: written.values().map(|p| p.total_count).sum(),
        counts_degraded,
        output_file: config.output_file.clone(),
    };

    info!(
        action = "complete",
        component = "pipeline",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Run completed successfully"
    );
    Ok(summary)
}

pub fn print_summary(summary: &RunSummary) {
    println!("\n--- Redirect Counts ---");
    println!(
        "Canonical paths written: {}",
        format_number(summary.canonical_paths as u128)
    );
    println!(
        "Redirect paths written: {}",
        format_number(summary.redirect_paths as u128)
    );
    println!("Total hits: {}", format_number(summary.total_hits));
    if summary.counts_degraded {
        println!("Count service unavailable: all counts defaulted to zero");
    }
    println!("Saved to {}", summary.output_file.display());
}
