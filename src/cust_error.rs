//! This module contains all custom errors used in this library.

use std::fmt;
use std::error::Error;
use std::io;

/// Errors raised while validating a single command from the input stream.
///
/// These are reported to the user and abort the current command, but never the
/// command loop itself. `Display` is the exact user-facing message.
#[derive(Debug, Eq, PartialEq)]
pub enum ProtocolError {
    /// An `E` token of the form `<i,i>`.
    SelfLoop,
    /// An `E` token naming a node id outside `[0, n)`.
    OutOfRange,
    /// An unknown leading token, or an unparseable `V` argument.
    InvalidArgument,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop => write!(f, "Error: a node can't get connected to itself"),
            Self::OutOfRange => write!(f, "Error: node number is out of range"),
            Self::InvalidArgument => write!(f, "Error: invalid argument"),
        }
    }
}

impl Error for ProtocolError {}

/// Errors raised by a solve cycle. Unlike a timeout, which is a recognized
/// terminal state of a cycle, these are not recoverable by the caller.
#[derive(Debug)]
pub enum SolveError {
    /// The SAT backend refused the formula or failed internally.
    Sat(splr::SolverError),
    /// A solver worker panicked before publishing its result.
    WorkerPanic(&'static str),
}

impl From<splr::SolverError> for SolveError {
    fn from(e: splr::SolverError) -> SolveError {
        SolveError::Sat(e)
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sat(e) => write!(f, "Solve: SAT backend failed: {}", e),
            Self::WorkerPanic(name) => write!(f, "Solve: worker '{}' panicked", name),
        }
    }
}

impl Error for SolveError {}

/// Errors that terminate the command loop.
#[derive(Debug)]
pub enum RunError {
    IoError(io::Error),
    SolveError(SolveError),
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> RunError {
        RunError::IoError(e)
    }
}

impl From<SolveError> for RunError {
    fn from(e: SolveError) -> RunError {
        RunError::SolveError(e)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "Run: IoError: {}", e),
            Self::SolveError(e) => write!(f, "Run: {}", e),
        }
    }
}

impl Error for RunError {}
