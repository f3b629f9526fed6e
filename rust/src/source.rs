//! Point sources handed to the generator.
//!
//! The generator never reaches for a process-wide RNG; whoever starts the run
//! decides where the coordinates come from and how they are seeded.

use crate::monte_carlo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces independent uniform coordinate pairs in `[0, 1)`.
pub trait PointSource: Send {
    fn next_point(&mut self) -> Point;
}

impl<S: PointSource + ?Sized> PointSource for Box<S> {
    fn next_point(&mut self) -> Point {
        (**self).next_point()
    }
}

/// Draws coordinates from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng + Send> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source: the same seed yields the same points.
    pub fn seeded(seed: u64) -> Self {
        RngSource::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RngSource::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> PointSource for RngSource<R> {
    fn next_point(&mut self) -> Point {
        Point::new(self.rng.gen::<f64>(), self.rng.gen::<f64>())
    }
}

/// Linear Congruential Generator with the multiplier and increment shared by
/// the other language ports. The output is scaled to the half-open `[0, 1)`
/// range, so values differ slightly from ports that divide by 2^31 - 1.
#[derive(Debug, Clone)]
pub struct LcgSource {
    seed: u32,
}

impl LcgSource {
    pub const DEFAULT_SEED: u32 = 12345;

    pub const fn new(seed: u32) -> Self {
        LcgSource { seed }
    }

    /// Divides by 2^31 rather than 2^31 - 1 so 1.0 is never produced.
    fn next_f64(&mut self) -> f64 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed & 0x7FFF_FFFF) as f64 / 2_147_483_648.0
    }
}

impl Default for LcgSource {
    fn default() -> Self {
        LcgSource::new(Self::DEFAULT_SEED)
    }
}

impl PointSource for LcgSource {
    fn next_point(&mut self) -> Point {
        let x = self.next_f64();
        let y = self.next_f64();
        Point::new(x, y)
    }
}

/// Replays a fixed list of points, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    points: Vec<Point>,
    cursor: usize,
}

impl ReplaySource {
    /// Returns `None` for an empty list, which has nothing to replay.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(ReplaySource { points, cursor: 0 })
    }
}

impl PointSource for ReplaySource {
    fn next_point(&mut self) -> Point {
        let p = self.points[self.cursor];
        self.cursor = (self.cursor + 1) % self.points.len();
        p
    }
}
