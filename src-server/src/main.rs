mod lifecycle;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use log::info;

/// Config file path: first CLI argument, else `JOBSETUP_CONFIG`. Without
/// either the server runs on defaults plus environment overrides.
fn config_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("JOBSETUP_CONFIG").ok())
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

#[actix_web::main]
async fn main() -> Result<()> {
    let path = config_path();
    let config = match jobsetup::load_config(path.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.logging.level, config.logging.format)?;
    info!("Starting jobsetup-server v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &path {
        info!("Loaded configuration from {}", path.display());
    }

    let state = lifecycle::bootstrap(&config)?;
    lifecycle::run(&config, state).await
}
