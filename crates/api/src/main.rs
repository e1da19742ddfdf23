//! NBA Career Predictor - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = Settings::load()?;
    init_logging(&settings)?;

    info!("=== NBA Career Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Artifacts: {}", settings.artifacts.dir.display());

    run_server(&settings).await?;

    Ok(())
}
