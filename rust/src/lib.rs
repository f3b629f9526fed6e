//! Monte Carlo estimation of pi through a generator → worker pool → aggregator
//! pipeline over bounded channels.

pub mod cli;
pub mod config;
pub mod error;
pub mod monte_carlo;
pub mod pipeline;
pub mod source;
pub mod telemetry;

pub use config::PipelineConfig;
pub use error::{ConfigError, PipelineError};
pub use monte_carlo::{classify, Classification, Point, RunReport, RunStats};
pub use pipeline::run;
pub use source::{LcgSource, PointSource, ReplaySource, RngSource};
