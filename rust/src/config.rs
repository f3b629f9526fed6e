//! Run parameters.
//!
//! Capacities bound memory use independently of the sample count: the
//! generator blocks once `input_capacity` points are waiting, and workers
//! block once `output_capacity` classifications are waiting.

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of workers pulling from the input queue.
    pub workers: usize,
    /// Total number of points to generate.
    pub samples: u64,
    pub input_capacity: usize,
    pub output_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            samples: 1_000_000,
            input_capacity: 10_000,
            output_capacity: 10_000,
        }
    }
}

impl PipelineConfig {
    pub fn new(workers: usize, samples: u64) -> Self {
        Self {
            workers,
            samples,
            ..Self::default()
        }
    }

    pub fn with_capacities(mut self, input_capacity: usize, output_capacity: usize) -> Self {
        self.input_capacity = input_capacity;
        self.output_capacity = output_capacity;
        self
    }

    /// Zero workers and zero samples are both legal and produce an empty run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { queue: "input" });
        }
        if self.output_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { queue: "output" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_workers_and_samples_are_valid() {
        assert!(PipelineConfig::new(0, 0).validate().is_ok());
    }

    #[test]
    fn rejects_zero_capacities() {
        let cfg = PipelineConfig::new(2, 10).with_capacities(0, 4);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCapacity { queue: "input" }));

        let cfg = PipelineConfig::new(2, 10).with_capacities(4, 0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCapacity { queue: "output" }));
    }
}
