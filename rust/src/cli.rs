//! Command line arguments shared by the threaded and async binaries.

use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::source::{LcgSource, PointSource, RngSource};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// `StdRng`, seeded from `--seed` or from OS entropy.
    Rng,
    /// The portable LCG, seeded from the low 32 bits of `--seed`.
    Lcg,
}

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Estimate pi with a generator, a worker pool and an aggregator")]
pub struct CliArgs {
    /// Number of workers classifying points
    #[arg(long, env = "PI_WORKERS", default_value_t = 5)]
    pub workers: usize,

    /// Total number of points to sample
    #[arg(long, env = "PI_SAMPLES", default_value_t = 1_000_000)]
    pub samples: u64,

    /// Capacity of the point queue feeding the workers
    #[arg(long, env = "PI_INPUT_CAPACITY", default_value_t = 10_000)]
    pub input_capacity: usize,

    /// Capacity of the classification queue feeding the aggregator
    #[arg(long, env = "PI_OUTPUT_CAPACITY", default_value_t = 10_000)]
    pub output_capacity: usize,

    #[arg(long, env = "PI_SOURCE", value_enum, default_value_t = SourceKind::Rng)]
    pub source: SourceKind,

    #[arg(long, env = "PI_SEED")]
    pub seed: Option<u64>,
}

impl CliArgs {
    pub fn point_source(&self) -> Box<dyn PointSource> {
        match (self.source, self.seed) {
            (SourceKind::Rng, Some(seed)) => Box::new(RngSource::seeded(seed)),
            (SourceKind::Rng, None) => Box::new(RngSource::from_entropy()),
            (SourceKind::Lcg, Some(seed)) => Box::new(LcgSource::new(seed as u32)),
            (SourceKind::Lcg, None) => Box::new(LcgSource::default()),
        }
    }
}

impl TryFrom<&CliArgs> for PipelineConfig {
    type Error = ConfigError;

    fn try_from(args: &CliArgs) -> Result<Self, Self::Error> {
        let config = PipelineConfig {
            workers: args.workers,
            samples: args.samples,
            input_capacity: args.input_capacity,
            output_capacity: args.output_capacity,
        };
        config.validate()?;
        Ok(config)
    }
}
