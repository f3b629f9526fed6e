use clap::Parser;
use pi_pipeline::cli::CliArgs;
use pi_pipeline::telemetry::init_tracing;
use pi_pipeline::PipelineConfig;
use std::time::Instant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let config = PipelineConfig::try_from(&args)?;

    let start = Instant::now();
    let report = pi_pipeline_async::run(&config, args.point_source()).await?;
    let elapsed = start.elapsed();

    println!("Monte Carlo Pi Estimation (Async)");
    println!("{report}");
    println!("Elapsed time: {:?}", elapsed);
    Ok(())
}
