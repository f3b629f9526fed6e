//! Async generate → evaluate → reduce pipeline.
//!
//! Workers are Tokio tasks tracked by a [`TaskTracker`], which plays the role
//! of the completion counter: the coordinator task waits on it and is the only
//! place that calls `close()` on the output queue. Both queues are bounded
//! `async_channel`s so the input side can be shared by every worker.

use async_channel::{bounded, Receiver, Sender};
use pi_pipeline::{
    classify, Classification, PipelineConfig, PipelineError, Point, PointSource, RunReport,
    RunStats,
};
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, trace};

/// Runs the pipeline to completion on the current Tokio runtime.
///
/// The aggregator runs inside the calling task; generator, coordinator and
/// workers are spawned and all of them are awaited before returning.
pub async fn run<S: PointSource + 'static>(
    config: &PipelineConfig,
    source: S,
) -> Result<RunReport, PipelineError> {
    config.validate()?;
    info!(
        workers = config.workers,
        samples = config.samples,
        input_capacity = config.input_capacity,
        output_capacity = config.output_capacity,
        "starting async Monte Carlo run"
    );

    let (point_tx, point_rx) = bounded::<Point>(config.input_capacity);
    let (result_tx, result_rx) = bounded::<Classification>(config.output_capacity);

    let tracker = TaskTracker::new();
    let workers: Vec<JoinHandle<u64>> = (0..config.workers)
        .map(|worker_id| tracker.spawn(work(worker_id, point_rx.clone(), result_tx.clone())))
        .collect();
    tracker.close();
    drop(point_rx);

    let coordinator = tokio::spawn(coordinate(tracker, result_tx));
    let generator = tokio::spawn(generate(source, config.samples, point_tx));

    let stats = aggregate(result_rx).await;

    let mut worker_counts = Vec::with_capacity(workers.len());
    let mut panicked = None;
    for (worker_id, handle) in workers.into_iter().enumerate() {
        match handle.await {
            Ok(processed) => worker_counts.push(processed),
            Err(_) => {
                panicked.get_or_insert(worker_id);
            }
        }
    }
    let generated = generator.await;
    let coordinated = coordinator.await;

    if let Some(worker) = panicked {
        return Err(PipelineError::WorkerPanicked { worker });
    }
    let generated = generated.map_err(|e| PipelineError::TaskFailed(format!("generator: {e}")))?;
    coordinated.map_err(|e| PipelineError::TaskFailed(format!("coordinator: {e}")))?;
    debug!(generated, "all pipeline tasks joined");

    let report = RunReport {
        stats,
        worker_counts,
    };
    info!(
        responses = report.stats.responses,
        inside = report.stats.inside,
        estimate = ?report.estimate(),
        "async Monte Carlo run complete"
    );
    Ok(report)
}

/// Sends exactly `samples` points, then drops the only sender, closing the
/// input queue.
async fn generate<S: PointSource>(mut source: S, samples: u64, points: Sender<Point>) -> u64 {
    let mut sent = 0;
    for _ in 0..samples {
        if points.send(source.next_point()).await.is_err() {
            trace!(sent, "no workers receiving, stopping generator early");
            break;
        }
        sent += 1;
    }
    debug!(sent, "generator done, closing input queue");
    sent
}

async fn work(id: usize, points: Receiver<Point>, results: Sender<Classification>) -> u64 {
    debug!(worker = id, "worker started");
    let mut processed = 0;
    while let Ok(p) = points.recv().await {
        if results.send(classify(p)).await.is_err() {
            break;
        }
        processed += 1;
    }
    info!(worker = id, processed, "Worker {id} processed {processed} points.");
    processed
}

async fn coordinate(tracker: TaskTracker, results: Sender<Classification>) {
    tracker.wait().await;
    debug!("all workers finished, closing output queue");
    results.close();
}

async fn aggregate(results: Receiver<Classification>) -> RunStats {
    let mut stats = RunStats::default();
    while let Ok(c) = results.recv().await {
        stats.record(c);
    }
    stats
}
