use clap::Parser;
use pi_pipeline::cli::CliArgs;
use pi_pipeline::telemetry::init_tracing;
use pi_pipeline::PipelineConfig;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let config = PipelineConfig::try_from(&args)?;

    let start = Instant::now();
    let report = pi_pipeline::run(&config, args.point_source())?;
    let elapsed = start.elapsed();

    println!("Monte Carlo Pi Estimation");
    println!("{report}");
    println!("Elapsed time: {}ms", elapsed.as_millis());
    Ok(())
}
