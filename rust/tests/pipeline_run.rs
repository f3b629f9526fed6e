//! End-to-end runs of the threaded pipeline.

use pi_pipeline::{
    run, LcgSource, PipelineConfig, PipelineError, Point, PointSource, ReplaySource, RngSource,
    RunStats,
};

fn scenario_points() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.5, 0.5),
        Point::new(2.0, 2.0),
    ]
}

#[test]
fn four_point_scenario() {
    let config = PipelineConfig::new(1, 4);
    let report = run(&config, ReplaySource::new(scenario_points()).unwrap()).unwrap();

    assert_eq!(report.stats, RunStats { responses: 4, inside: 2 });
    assert_eq!(report.estimate(), Some(2.0));
    assert_eq!(report.worker_counts, vec![4]);
}

#[test]
fn report_prints_each_worker_count() {
    let config = PipelineConfig::new(3, 1_000);
    let report = run(&config, RngSource::seeded(1)).unwrap();
    let text = report.to_string();

    for (worker, processed) in report.worker_counts.iter().enumerate() {
        assert!(text.contains(&format!("Worker {worker} processed {processed} points.")));
    }
    assert_eq!(text.matches(" processed ").count(), 3);
}

#[test]
fn zero_samples_reaches_done_with_undefined_estimate() {
    let config = PipelineConfig::new(3, 0);
    let report = run(&config, RngSource::seeded(1)).unwrap();

    assert_eq!(report.stats, RunStats::default());
    assert_eq!(report.estimate(), None);
    assert_eq!(report.worker_counts, vec![0, 0, 0]);
}

#[test]
fn zero_workers_terminates() {
    let config = PipelineConfig::new(0, 1_000).with_capacities(4, 4);
    let report = run(&config, RngSource::seeded(1)).unwrap();

    assert_eq!(report.stats.responses, 0);
    assert_eq!(report.estimate(), None);
    assert!(report.worker_counts.is_empty());
}

#[test]
fn every_point_is_delivered_exactly_once() {
    for workers in [1, 2, 3, 8] {
        for samples in [0, 1, 7, 1_000, 25_000] {
            let config = PipelineConfig::new(workers, samples).with_capacities(3, 5);
            let report = run(&config, RngSource::seeded(samples)).unwrap();

            assert_eq!(report.stats.responses, samples);
            assert_eq!(report.worker_counts.len(), workers);
            assert_eq!(report.worker_counts.iter().sum::<u64>(), samples);
        }
    }
}

#[test]
fn tiny_queues_still_complete() {
    let config = PipelineConfig::new(4, 10_000).with_capacities(1, 1);
    let report = run(&config, LcgSource::default()).unwrap();
    assert_eq!(report.stats.responses, 10_000);
}

#[test]
fn result_does_not_depend_on_worker_count() {
    let stats: Vec<_> = [1, 2, 5, 8]
        .into_iter()
        .map(|workers| {
            let config = PipelineConfig::new(workers, 50_000);
            run(&config, RngSource::seeded(2024)).unwrap().stats
        })
        .collect();

    assert!(stats.windows(2).all(|w| w[0] == w[1]), "{stats:?}");
}

#[test]
fn inside_count_matches_direct_classification() {
    let mut reference = LcgSource::new(77);
    let expected = (0..20_000)
        .filter(|_| {
            let p = reference.next_point();
            (p.x * p.x + p.y * p.y).sqrt() <= 1.0
        })
        .count() as u64;

    let config = PipelineConfig::new(6, 20_000);
    let report = run(&config, LcgSource::new(77)).unwrap();
    assert_eq!(report.stats.inside, expected);
}

#[test]
fn seeded_million_samples_converge() {
    let config = PipelineConfig::new(8, 1_000_000);
    let report = run(&config, RngSource::seeded(42)).unwrap();

    let pi = report.estimate().unwrap();
    assert!((pi - std::f64::consts::PI).abs() < 0.01, "estimate {pi}");
}

#[test]
fn rejects_zero_capacity() {
    let config = PipelineConfig::new(2, 10).with_capacities(0, 1);
    let err = run(&config, RngSource::seeded(0)).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

struct FailingSource {
    remaining: u32,
}

impl PointSource for FailingSource {
    fn next_point(&mut self) -> Point {
        if self.remaining == 0 {
            panic!("source exhausted");
        }
        self.remaining -= 1;
        Point::new(0.25, 0.25)
    }
}

#[test]
fn generator_panic_is_reported() {
    let config = PipelineConfig::new(2, 100);
    let err = run(&config, FailingSource { remaining: 10 }).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::StagePanicked { role: "generator" }
    ));
}
