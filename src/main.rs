use anyhow::{Context, Error, Result};
use team_ratios::{Report, SourceConfig, load_ratios};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    // Logs go to stderr; stdout carries only the result list.
    // Override with RUST_LOG, e.g. RUST_LOG=team_ratios=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = SourceConfig::default();
    info!("Reading {} from {:?}", config.table, config.db_path);

    let ratios = match load_ratios(config.clone()) {
        Ok(ratios) => ratios,
        Err(e) => {
            let kind = e.kind();
            debug!("{}: {}", kind, e);
            return Err(e).with_context(|| format!("{} reading {:?}", kind, config.db_path));
        }
    };

    println!("{}", Report(&ratios));
    Ok(())
}
