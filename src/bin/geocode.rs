use anyhow::Result;
use labmap::{
    config::Config, geocoder::Geocoder, pipeline, storage, telemetry, throttle::TokioSleep,
};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init();

    let config = Config::load().inspect_err(|e| error!("Error: {}", e))?;

    // Both checks happen before any request is made
    let api_key = config
        .require_api_key()
        .inspect_err(|e| error!("Error: {}", e))?;
    if !config.details_path().exists() {
        let err = storage::StorageError::MissingInput(config.details_path().display().to_string());
        error!("Error: {}", err);
        return Err(err.into());
    }

    let geocoder = Geocoder::new(config.geocode_endpoint().clone(), api_key);
    let summary = pipeline::geocode(&config, &geocoder, &TokioSleep).await?;
    info!(
        total = summary.total,
        located = summary.located,
        "geocoding finished"
    );
    Ok(())
}
