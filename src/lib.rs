pub mod aggregate;
pub mod args;
pub mod config;
pub mod fetch;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod utils;

pub use args::Args;
pub use config::Config;
pub use fetch::CountsFetch;
pub use model::{CountsIndex, CountsMap, PathCounts, RedirectMap, RunSummary};
pub use pipeline::{print_summary, run};
