//! Tokio rendition of the Monte Carlo pi pipeline. Shares its data model,
//! point sources and configuration with `pi_pipeline`.

pub mod monte_carlo;

pub use monte_carlo::run;
pub use pi_pipeline::{
    classify, Classification, ConfigError, LcgSource, PipelineConfig, PipelineError, Point,
    PointSource, ReplaySource, RngSource, RunReport, RunStats,
};
