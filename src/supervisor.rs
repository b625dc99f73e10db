//! Runs the three solvers of one solve cycle concurrently and reconciles their
//! results.
//!
//! Each cycle snapshots the canonical graph into three independent instances, one
//! per solver, so every worker may destructively mutate its own copy. The exact
//! solver runs under a wall-clock budget; its result travels over a channel owned
//! by the cycle, so a worker that outlives its deadline sends into a dropped
//! channel and can never leak a stale cover into a later cycle. The two
//! approximation workers always terminate and are joined unconditionally.

use std::process;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use cpu_time::ThreadTime;

use crate::approx_vc;
use crate::cust_error::SolveError;
use crate::graph::UGraph;
use crate::sat_vc;

/// Wall-clock budget for the exact solver, counted from the decision to launch.
pub const EXACT_BUDGET: Duration = Duration::from_secs(10);

/// The output of one solver within one cycle. `cpu_time` is the worker thread's
/// CPU time, present only when measurement was requested.
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub cover: Vec<usize>,
    pub cpu_time: Option<Duration>,
}

/// Terminal state of the exact solver within one cycle. A timeout is a recognized
/// outcome, categorically distinct from an empty cover.
#[derive(Debug, Clone)]
pub enum ExactOutcome {
    Cover(SolverRun),
    TimedOut,
}

impl ExactOutcome {
    pub fn timed_out(&self) -> bool {
        matches!(self, ExactOutcome::TimedOut)
    }
}

/// The reconciled results of one solve cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub exact: ExactOutcome,
    pub approx_one: SolverRun,
    pub approx_two: SolverRun,
}

/// Reads the CPU clock of the calling thread. An unreadable clock means the
/// measurement environment is unusable, so this terminates the process.
fn thread_clock() -> ThreadTime {
    ThreadTime::try_now().unwrap_or_else(|e| {
        eprintln!("thread cpu clock unavailable: {}", e);
        process::exit(1);
    })
}

fn elapsed(clock: &Option<ThreadTime>) -> Option<Duration> {
    clock.as_ref().map(|started| {
        started.try_elapsed().unwrap_or_else(|e| {
            eprintln!("thread cpu clock unavailable: {}", e);
            process::exit(1);
        })
    })
}

/// Runs all three solvers against snapshots of `graph` and joins them, bounding
/// the wait on the exact solver by `budget`. CPU times are measured per worker
/// when `measure` is set.
pub fn run_cycle(graph: &UGraph, budget: Duration, measure: bool) -> Result<CycleReport, SolveError> {
    let deadline = Instant::now() + budget;

    let exact_graph = graph.clone();
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let clock = measure.then(thread_clock);
        let run = sat_vc::minimum_vertex_cover(&exact_graph)
            .map(|cover| SolverRun { cover, cpu_time: elapsed(&clock) });
        // After a timeout the receiving side is gone and the result is discarded
        // together with the channel.
        let _ = sender.send(run);
    });

    let mut graph_one = graph.clone();
    let one = thread::spawn(move || {
        let clock = measure.then(thread_clock);
        let cover = approx_vc::max_degree_cover(&mut graph_one);
        SolverRun { cover, cpu_time: elapsed(&clock) }
    });

    let mut graph_two = graph.clone();
    let two = thread::spawn(move || {
        let clock = measure.then(thread_clock);
        let cover = approx_vc::degree_pair_cover(&mut graph_two);
        SolverRun { cover, cpu_time: elapsed(&clock) }
    });

    let remaining = deadline.saturating_duration_since(Instant::now());
    let exact = match receiver.recv_timeout(remaining) {
        Ok(run) => ExactOutcome::Cover(run?),
        // Stop waiting; the worker keeps running but can no longer publish.
        Err(RecvTimeoutError::Timeout) => ExactOutcome::TimedOut,
        Err(RecvTimeoutError::Disconnected) => return Err(SolveError::WorkerPanic("cnf-sat-vc")),
    };
    let approx_one = one.join().map_err(|_| SolveError::WorkerPanic("approx-vc-1"))?;
    let approx_two = two.join().map_err(|_| SolveError::WorkerPanic("approx-vc-2"))?;

    Ok(CycleReport { exact, approx_one, approx_two })
}
