//! End-to-end aggregation over harness log files on disk.

use pretty_assertions::assert_eq;
use ring_bench_compare::diagnostics::Warning;
use ring_bench_compare::{
    AggregateError, Algorithm, ComparisonReport, Metric, Point, ReportOptions, SweepConfig,
    aggregate_file,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_log(lines: &[String]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    for l in lines {
        writeln!(f, "{}", l).unwrap();
    }
    f.flush().unwrap();
    f
}

/// Deterministic harness-like log: `trials` sweeps of `steps` pairs.
fn synthetic_log(steps: usize, trials: usize, scale: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for trial in 0..trials {
        for step in 0..steps {
            let base = (step * 7 + trial * 3) as f64;
            lines.push(format!(
                "{},{},{}",
                scale * (0.25 + base),
                scale * (1.0 + base / 4.0),
                scale * (10.0 + base)
            ));
            lines.push(format!(
                "{},{},{}",
                scale * (0.5 + base / 2.0),
                scale * (1.0 + base / 8.0),
                scale * (6.0 + base)
            ));
        }
    }
    lines
}

fn aggregate(lines: &[String], sweep: &SweepConfig) -> ComparisonReport {
    let f = write_log(lines);
    aggregate_file(f.path(), sweep, &ReportOptions::default()).unwrap()
}

#[test]
fn default_sweep_has_twenty_aligned_points_per_series() {
    let sweep = SweepConfig::default();
    let report = aggregate(&synthetic_log(20, 3, 1.0), &sweep);

    assert!(report.warnings.is_empty());
    assert_eq!(report.records, 120);
    assert_eq!(report.datasets.len(), 3);

    for metric in Metric::ALL {
        let ds = report.dataset(metric);
        assert_eq!(ds.metric, metric);
        assert_eq!(ds.baseline.points.len(), 20);
        assert_eq!(ds.alternative.points.len(), 20);
        for (i, (b, a)) in ds
            .baseline
            .points
            .iter()
            .zip(&ds.alternative.points)
            .enumerate()
        {
            assert_eq!(b.x, a.x);
            assert_eq!(b.x, i as u64 * 5000);
        }
    }
}

#[test]
fn averages_match_hand_computed_means() {
    let sweep = SweepConfig {
        num_sweep_steps: 4,
        step_size: 10,
        start_value: 0,
        trial_count: 2,
    };
    let report = aggregate(&synthetic_log(4, 2, 1.0), &sweep);

    // Step 1 baseline max_load: trial 0 -> 10 + 7, trial 1 -> 10 + 10.
    let max_load = report.dataset(Metric::MaxLoad);
    assert_eq!(max_load.baseline.points[1], Point { x: 10, y: 18.5 });
    // Step 1 alternative max_load: 6 + 7 and 6 + 10.
    assert_eq!(max_load.alternative.points[1], Point { x: 10, y: 14.5 });
}

#[test]
fn aggregation_is_idempotent() {
    let lines = synthetic_log(20, 3, 1.0);
    let f = write_log(&lines);
    let sweep = SweepConfig::default();
    let opts = ReportOptions::default();

    let first = aggregate_file(f.path(), &sweep, &opts).unwrap();
    let second = aggregate_file(f.path(), &sweep, &opts).unwrap();

    let bits = |r: &ComparisonReport| -> Vec<u64> {
        r.datasets
            .iter()
            .flat_map(|ds| Algorithm::ALL.map(|a| ds.series(a).clone()))
            .flat_map(|s| s.points.into_iter().map(|p| p.y.to_bits()))
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(first, second);
}

#[test]
fn scaling_inputs_scales_averages() {
    let sweep = SweepConfig::default();
    let plain = aggregate(&synthetic_log(20, 3, 1.0), &sweep);
    let doubled = aggregate(&synthetic_log(20, 3, 2.0), &sweep);

    for metric in Metric::ALL {
        for algorithm in Algorithm::ALL {
            let p = &plain.dataset(metric).series(algorithm).points;
            let d = &doubled.dataset(metric).series(algorithm).points;
            for (a, b) in p.iter().zip(d) {
                assert_eq!(b.y, a.y * 2.0, "{:?} {:?} x={}", metric, algorithm, a.x);
            }
        }
    }
}

#[test]
fn single_trial_reproduces_inputs_exactly() {
    let sweep = SweepConfig {
        trial_count: 1,
        ..SweepConfig::default()
    };
    let lines = synthetic_log(20, 1, 1.0);
    let report = aggregate(&lines, &sweep);

    assert!(report.warnings.is_empty());
    for (i, line) in lines.iter().enumerate() {
        let values: Vec<f64> = line.split(',').map(|v| v.parse().unwrap()).collect();
        let algorithm = if i % 2 == 0 {
            Algorithm::Baseline
        } else {
            Algorithm::Alternative
        };
        let step = i / 2;
        for metric in Metric::ALL {
            let got = report.dataset(metric).series(algorithm).points[step].y;
            assert_eq!(got, values[metric.index()]);
        }
    }
}

#[test]
fn two_step_scenario_from_file() {
    let sweep = SweepConfig {
        num_sweep_steps: 2,
        step_size: 1,
        start_value: 0,
        trial_count: 2,
    };
    let lines: Vec<String> = ["1.0,2.0,3.0", "4.0,5.0,6.0", "1.0,2.0,3.0", "4.0,5.0,6.0"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let report = aggregate(&lines, &sweep);

    // One full sweep on disk, two trials configured: each bin is halved.
    let time = report.dataset(Metric::Time);
    assert_eq!(
        time.baseline.points,
        vec![Point { x: 0, y: 0.5 }, Point { x: 1, y: 0.5 }]
    );
    assert_eq!(
        time.alternative.points,
        vec![Point { x: 0, y: 2.0 }, Point { x: 1, y: 2.0 }]
    );
    assert_eq!(
        report.warnings,
        vec![Warning::TrialCountMismatch {
            configured: 2,
            observed_sweeps: 1,
            partial_steps: 0,
        }]
    );
}

#[test]
fn odd_line_count_keeps_even_prefix() {
    let sweep = SweepConfig {
        trial_count: 1,
        ..SweepConfig::default()
    };
    let mut lines = synthetic_log(20, 1, 1.0);
    let complete = aggregate(&lines, &sweep);

    lines.push("123.0,456.0,789.0".to_string());
    let truncated = aggregate(&lines, &sweep);

    assert_eq!(
        truncated.warnings,
        vec![Warning::TruncatedStream { dropped_line: 41 }]
    );
    assert_eq!(truncated.records, 41);
    assert_eq!(truncated.datasets, complete.datasets);
}

#[test]
fn malformed_line_aborts_the_pass() {
    let mut lines = synthetic_log(20, 3, 1.0);
    lines[7] = "abc,2.0,3.0".to_string();
    let f = write_log(&lines);

    let err = aggregate_file(f.path(), &SweepConfig::default(), &ReportOptions::default())
        .unwrap_err();
    match err {
        AggregateError::MalformedRecord { line, content, .. } => {
            assert_eq!(line, 8);
            assert_eq!(content, "abc,2.0,3.0");
        }
        other => panic!("expected MalformedRecord, got {other}"),
    }
}

#[test]
fn extra_trials_are_flagged_but_divided_by_configured_count() {
    let sweep = SweepConfig {
        num_sweep_steps: 2,
        step_size: 1,
        start_value: 0,
        trial_count: 1,
    };
    let lines: Vec<String> = ["1,1,1", "2,2,2", "1,1,1", "2,2,2", "1,1,1", "2,2,2"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let report = aggregate(&lines, &sweep);

    assert_eq!(
        report.warnings,
        vec![Warning::TrialCountMismatch {
            configured: 1,
            observed_sweeps: 1,
            partial_steps: 1,
        }]
    );
    // Step 0 saw two trials, step 1 saw one; both divide by 1.
    let cost = report.dataset(Metric::Cost);
    assert_eq!(cost.baseline.points[0].y, 2.0);
    assert_eq!(cost.baseline.points[1].y, 1.0);
}
