#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod config;
mod error;
mod fetch;
mod parse;
mod report;
mod scrape;

use std::time::Instant;

use crate::{config::Config, fetch::make_client, scrape::scrape_inspections};

pub use error::Result;

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let config = Config::from_env()?;
    log::debug!("{config:?}");
    let client = make_client(config.request_timeout)?;

    let start = Instant::now();
    let (inspections, stats) = scrape_inspections(&client, &config).await?;
    report::print_inspections(&inspections)?;
    report::write_results(&config.results_path, &inspections).await?;
    log::info!(
        "Wrote {} of {} inspections to {} in {:?}",
        stats.ok,
        stats.total,
        config.results_path.display(),
        start.elapsed()
    );
    Ok(())
}
