//! Sample points, their classification, and the statistics reduced from them.

use std::fmt;

/// A sample drawn from the unit square, both coordinates in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Whether a point fell within distance 1.0 of the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Inside,
    Outside,
}

impl Classification {
    pub const fn as_u64(self) -> u64 {
        match self {
            Classification::Inside => 1,
            Classification::Outside => 0,
        }
    }
}

impl From<Classification> for u64 {
    fn from(c: Classification) -> u64 {
        c.as_u64()
    }
}

/// Classifies a point against the unit circle. The boundary counts as inside.
pub fn classify(p: Point) -> Classification {
    let val = (p.x * p.x + p.y * p.y).sqrt();
    if val <= 1.0 {
        Classification::Inside
    } else {
        Classification::Outside
    }
}

/// Running totals kept by the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub responses: u64,
    pub inside: u64,
}

impl RunStats {
    pub fn record(&mut self, c: Classification) {
        self.responses += 1;
        self.inside += c.as_u64();
    }

    /// `4 * inside / responses`, or `None` when nothing was received.
    pub fn estimate(&self) -> Option<f64> {
        if self.responses == 0 {
            return None;
        }
        Some(4.0 * (self.inside as f64 / self.responses as f64))
    }
}

/// Final statistics of a run plus how many points each worker handled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub stats: RunStats,
    pub worker_counts: Vec<u64>,
}

impl RunReport {
    pub fn estimate(&self) -> Option<f64> {
        self.stats.estimate()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (worker, processed) in self.worker_counts.iter().enumerate() {
            writeln!(f, "Worker {worker} processed {processed} points.")?;
        }
        writeln!(f, "Received {} responses.", self.stats.responses)?;
        writeln!(f, "{} points are inside circle.", self.stats.inside)?;
        match self.estimate() {
            Some(pi) => {
                writeln!(f, "Estimated pi = {:.20}", pi)?;
                write!(f, "Error: {:.6}", std::f64::consts::PI - pi)
            }
            None => write!(f, "Estimated pi = undefined (no samples)"),
        }
    }
}
