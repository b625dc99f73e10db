//! Calc-mode bookkeeping: per-run (ratio, runtime) samples keyed by vertex count,
//! summarized into mean and population deviation at the end of the run.
//!
//! The ratio of an approximation is its cover size over the exact cover size of
//! the same cycle. When the exact solver timed out no exact sample is recorded at
//! all, and the approximations are logged with the `-1` sentinel so a run with an
//! unknown baseline is observable instead of being folded into the averages.

use std::io::{self, Write};
use std::time::Duration;

use crate::supervisor::{CycleReport, ExactOutcome, SolverRun};

/// Sentinel for "ratio undefined"; excluded from mean and deviation.
pub const UNDEFINED_RATIO: f64 = -1.0;

/// Ratio of an approximate cover size against the exact baseline.
/// Both empty counts as a perfect 1; a zero baseline alone is undefined.
pub fn approx_ratio(size: usize, base: usize) -> f64 {
    if base == 0 && size == 0 {
        1.0
    } else if base == 0 {
        UNDEFINED_RATIO
    } else {
        size as f64 / base as f64
    }
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    ratio: f64,
    /// Worker CPU time in microseconds.
    runtime: f64,
}

impl Sample {
    fn of_run(run: &SolverRun, ratio: f64) -> Self {
        Sample { ratio, runtime: micros(run.cpu_time) }
    }
}

fn micros(time: Option<Duration>) -> f64 {
    time.map(|t| t.as_secs_f64() * 1e6).unwrap_or_default()
}

/// All samples collected for one distinct vertex count.
#[derive(Debug, Default)]
struct Bucket {
    v_count: usize,
    exact: Vec<Sample>,
    approx_one: Vec<Sample>,
    approx_two: Vec<Sample>,
}

/// The accumulating sample log of one process run. Buckets keep first-seen order.
#[derive(Debug, Default)]
pub struct CalcLog {
    buckets: Vec<Bucket>,
}

impl CalcLog {

    /// Records the samples of one solve cycle under the given vertex count.
    pub fn record(&mut self, v_count: usize, report: &CycleReport) {
        let bucket = self.bucket_mut(v_count);
        match &report.exact {
            ExactOutcome::Cover(exact) => {
                // The exact cover is minimal by construction, its ratio is 1.
                bucket.exact.push(Sample::of_run(exact, 1.0));
                bucket.approx_one.push(Sample::of_run(
                    &report.approx_one,
                    approx_ratio(report.approx_one.cover.len(), exact.cover.len()),
                ));
                bucket.approx_two.push(Sample::of_run(
                    &report.approx_two,
                    approx_ratio(report.approx_two.cover.len(), exact.cover.len()),
                ));
            },
            ExactOutcome::TimedOut => {
                bucket.approx_one.push(Sample::of_run(&report.approx_one, UNDEFINED_RATIO));
                bucket.approx_two.push(Sample::of_run(&report.approx_two, UNDEFINED_RATIO));
            },
        }
    }

    fn bucket_mut(&mut self, v_count: usize) -> &mut Bucket {
        if let Some(at) = self.buckets.iter().position(|b| b.v_count == v_count) {
            return &mut self.buckets[at]
        }
        self.buckets.push(Bucket { v_count, ..Bucket::default() });
        self.buckets.last_mut().expect("was just pushed")
    }

    /// Writes the end-of-run report: per vertex count, ratio and runtime summaries
    /// for each of the three solvers.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), io::Error> {
        writeln!(out, "=================== Calc Mode Start ===================")?;
        writeln!(out, "========= Ratio =========")?;
        for bucket in &self.buckets {
            writeln!(out, "vertex count: {}", bucket.v_count)?;
            for (label, samples) in bucket.series() {
                writeln!(out, "\t{}:", label)?;
                let summary = summarize(samples);
                writeln!(out, "\tCount Ratio: {}", summary.count_ratio)?;
                writeln!(out, "\t\tAvg Ratio: {:.6}", summary.avg_ratio)?;
                writeln!(out, "\t\tDeviation Ratio: {:.6}", summary.dev_ratio)?;
                writeln!(out)?;
            }
            writeln!(out, "---------------")?;
        }
        writeln!(out, "========= Runtime =========")?;
        for bucket in &self.buckets {
            writeln!(out, "vertex count: {}", bucket.v_count)?;
            for (label, samples) in bucket.series() {
                writeln!(out, "\t{}:", label)?;
                let summary = summarize(samples);
                writeln!(out, "\tCount Runtime: {}", summary.count_runtime)?;
                writeln!(out, "\t\tAvg Runtime: {:.6}", summary.avg_runtime)?;
                writeln!(out, "\t\tDeviation Runtime: {:.6}", summary.dev_runtime)?;
                writeln!(out)?;
            }
            writeln!(out, "---------------")?;
        }
        writeln!(out, "=================== Calc Mode End ===================")?;
        Ok(())
    }

}

impl Bucket {
    fn series(&self) -> [(&'static str, &[Sample]); 3] {
        [
            ("CNF-SAT", self.exact.as_slice()),
            ("APPROX-1", self.approx_one.as_slice()),
            ("APPROX-2", self.approx_two.as_slice()),
        ]
    }
}

struct Summary {
    count_ratio: usize,
    avg_ratio: f64,
    dev_ratio: f64,
    count_runtime: usize,
    avg_runtime: f64,
    dev_runtime: f64,
}

/// Mean and population standard deviation of `values`.
fn mean_and_deviation(values: &[f64]) -> (f64, f64) {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    (mean, variance.sqrt())
}

fn summarize(samples: &[Sample]) -> Summary {
    if samples.is_empty() {
        return Summary {
            count_ratio: 0,
            avg_ratio: UNDEFINED_RATIO,
            dev_ratio: UNDEFINED_RATIO,
            count_runtime: 0,
            avg_runtime: UNDEFINED_RATIO,
            dev_runtime: UNDEFINED_RATIO,
        }
    }
    let ratios: Vec<f64> = samples.iter()
        .map(|s| s.ratio)
        .filter(|r| *r != UNDEFINED_RATIO)
        .collect();
    let (avg_ratio, dev_ratio) = if ratios.is_empty() {
        (UNDEFINED_RATIO, UNDEFINED_RATIO)
    } else {
        mean_and_deviation(&ratios)
    };
    let runtimes: Vec<f64> = samples.iter().map(|s| s.runtime).collect();
    let (avg_runtime, dev_runtime) = mean_and_deviation(&runtimes);
    Summary {
        count_ratio: ratios.len(),
        avg_ratio,
        dev_ratio,
        count_runtime: samples.len(),
        avg_runtime,
        dev_runtime,
    }
}
