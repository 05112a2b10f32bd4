use mining_pipeline::framework::{PipelineError, TracingSink};
use mining_pipeline::lifecycle::{setup_tracing, MiningSystem};
use mining_pipeline::model::PipelineConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    setup_tracing();

    info!("Starting mining pipeline, press Ctrl-C to stop");
    let system = MiningSystem::start(PipelineConfig::default(), TracingSink::shared())?;

    // Fire-and-forget: workers still parked are dropped with the runtime.
    system.run_until_triggered().await?;

    Ok(())
}
