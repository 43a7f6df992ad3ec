use clap::Parser;
use tracing::error;

use redirect_counts::utils::setup_logging;
use redirect_counts::{print_summary, run, Args, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let reason = format!("{:#}", e);
            error!(action = "validate", component = "config", error = %reason, "Invalid configuration");
            std::process::exit(1);
        }
    };

    match run(&config).await {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            let reason = format!("{:#}", e);
            error!(action = "abort", component = "pipeline", error = %reason, "Run failed");
            std::process::exit(1);
        }
    }
}
