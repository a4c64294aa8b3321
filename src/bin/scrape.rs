use anyhow::Result;
use labmap::{config::Config, fetcher::Fetcher, pipeline, telemetry, throttle::TokioSleep};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init();

    let config = Config::load().inspect_err(|e| error!("Error: {}", e))?;

    let summary = pipeline::crawl(&config, &Fetcher::new(), &TokioSleep).await?;
    tracing::info!(
        discovered = summary.discovered,
        extracted = summary.extracted,
        "crawl finished"
    );
    Ok(())
}
