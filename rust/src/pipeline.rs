//! Thread-based generate → evaluate → reduce pipeline.
//!
//! ```text
//!  generator ──points──▶ [input queue] ──▶ worker 0..W ──▶ [output queue] ──▶ aggregator
//!                                              │                  ▲
//!                                              └─ WaitGroup ─▶ coordinator (closes)
//! ```
//!
//! Both queues are bounded `crossbeam_channel`s, so memory stays proportional
//! to the capacities no matter how many samples are requested. A channel is
//! closed when its last `Sender` drops:
//!
//! - the generator owns the only input `Sender` and drops it when done;
//! - every worker drops its output `Sender` clone before releasing its
//!   `WaitGroup` token, so the coordinator, which waits on the group before
//!   dropping the original `Sender`, always performs the final close.
//!
//! The aggregator runs on the calling thread and returns only once the output
//! queue is closed and drained.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::monte_carlo::{classify, Classification, Point, RunReport, RunStats};
use crate::source::PointSource;
use crossbeam_channel::{bounded, Receiver, Sender};
use crossbeam_utils::sync::WaitGroup;
use std::thread::{self, Scope, ScopedJoinHandle};
use tracing::{debug, info, trace};

/// Runs the whole pipeline to completion and returns the final statistics.
///
/// Spawns `config.workers` worker threads plus a generator and a coordinator
/// thread; all of them are joined before this returns.
pub fn run<S: PointSource>(
    config: &PipelineConfig,
    mut source: S,
) -> Result<RunReport, PipelineError> {
    config.validate()?;
    info!(
        workers = config.workers,
        samples = config.samples,
        input_capacity = config.input_capacity,
        output_capacity = config.output_capacity,
        "starting Monte Carlo run"
    );

    let source = &mut source;
    let report = thread::scope(|scope| -> Result<RunReport, PipelineError> {
        // Channel ends live inside the scope so an early return disconnects
        // them and lets already-spawned threads exit.
        let (point_tx, point_rx) = bounded::<Point>(config.input_capacity);
        let (result_tx, result_rx) = bounded::<Classification>(config.output_capacity);
        let done = WaitGroup::new();

        let mut workers = Vec::with_capacity(config.workers);
        for worker_id in 0..config.workers {
            let worker = Worker {
                id: worker_id,
                points: point_rx.clone(),
                results: result_tx.clone(),
                done: done.clone(),
            };
            workers.push(spawn(scope, format!("pi-worker-{worker_id}"), move || {
                worker.run()
            })?);
        }
        drop(point_rx);

        let coordinator = spawn(scope, "pi-coordinator".to_string(), move || {
            coordinate(done, result_tx)
        })?;

        let samples = config.samples;
        let generator = spawn(scope, "pi-generator".to_string(), move || {
            generate(source, samples, point_tx)
        })?;

        let stats = aggregate(result_rx);

        let mut worker_counts = Vec::with_capacity(workers.len());
        let mut panicked = None;
        for (worker_id, handle) in workers.into_iter().enumerate() {
            match handle.join() {
                Ok(processed) => worker_counts.push(processed),
                Err(_) => {
                    panicked.get_or_insert(worker_id);
                }
            }
        }
        let generated = generator.join();
        let coordinated = coordinator.join();

        if let Some(worker) = panicked {
            return Err(PipelineError::WorkerPanicked { worker });
        }
        let generated =
            generated.map_err(|_| PipelineError::StagePanicked { role: "generator" })?;
        coordinated.map_err(|_| PipelineError::StagePanicked {
            role: "coordinator",
        })?;
        debug!(generated, "all pipeline threads joined");

        Ok(RunReport {
            stats,
            worker_counts,
        })
    })?;

    info!(
        responses = report.stats.responses,
        inside = report.stats.inside,
        estimate = ?report.estimate(),
        "Monte Carlo run complete"
    );
    Ok(report)
}

fn spawn<'scope, 'env, T, F>(
    scope: &'scope Scope<'scope, 'env>,
    name: String,
    f: F,
) -> Result<ScopedJoinHandle<'scope, T>, PipelineError>
where
    F: FnOnce() -> T + Send + 'scope,
    T: Send + 'scope,
{
    thread::Builder::new()
        .name(name.clone())
        .spawn_scoped(scope, f)
        .map_err(|source| PipelineError::Spawn { role: name, source })
}

/// Sends exactly `samples` points, then closes the input queue by dropping
/// `points`. Stops early only if no worker is left to receive.
fn generate<S: PointSource + ?Sized>(source: &mut S, samples: u64, points: Sender<Point>) -> u64 {
    let mut sent = 0;
    for _ in 0..samples {
        if points.send(source.next_point()).is_err() {
            trace!(sent, "no workers receiving, stopping generator early");
            break;
        }
        sent += 1;
    }
    debug!(sent, "generator done, closing input queue");
    sent
}

// Fields drop in declaration order, so `results` is released before `done`
// on every exit path, unwinding included.
struct Worker {
    id: usize,
    points: Receiver<Point>,
    results: Sender<Classification>,
    done: WaitGroup,
}

impl Worker {
    /// Classifies points until the input queue is closed and empty, then
    /// signals completion. Returns how many points this worker handled.
    fn run(self) -> u64 {
        let id = self.id;
        debug!(worker = id, "worker started");
        let processed = self.drain();
        drop(self);
        info!(worker = id, processed, "Worker {id} processed {processed} points.");
        processed
    }

    fn drain(&self) -> u64 {
        let mut processed = 0;
        for p in self.points.iter() {
            if self.results.send(classify(p)).is_err() {
                break;
            }
            processed += 1;
        }
        processed
    }
}

/// Waits for every worker to finish, then closes the output queue.
fn coordinate(done: WaitGroup, results: Sender<Classification>) {
    done.wait();
    debug!("all workers finished, closing output queue");
    drop(results);
}

fn aggregate(results: Receiver<Classification>) -> RunStats {
    let mut stats = RunStats::default();
    for c in results.iter() {
        stats.record(c);
    }
    stats
}
