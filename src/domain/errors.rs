// Domain-level errors for run actions and worker startup.

use crate::domain::ports::WorkerRole;
use std::fmt;

/// A worker could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    // No async runtime is available to host the worker.
    NoRuntime,
}

/// Outcome of a fire attempt that did not launch an interceptor.
///
/// The first two variants are ordinary resource exhaustion and are skipped by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireError {
    NoLauncherReady,
    NoInterceptorSlot,
    RunTerminated,
    WorkerStart(SpawnError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnThreatError {
    QuotaReached,
    NoSlot,
    RunTerminated,
    WorkerStart(SpawnError),
}

/// Fatal: an auxiliary worker failed to start before gameplay began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    Worker { role: WorkerRole, source: SpawnError },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::NoRuntime => write!(f, "no async runtime available"),
        }
    }
}

impl fmt::Display for FireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireError::NoLauncherReady => write!(f, "no launcher ready"),
            FireError::NoInterceptorSlot => write!(f, "no interceptor slot free"),
            FireError::RunTerminated => write!(f, "run already terminated"),
            FireError::WorkerStart(e) => write!(f, "interceptor worker failed to start: {e}"),
        }
    }
}

impl fmt::Display for SpawnThreatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnThreatError::QuotaReached => write!(f, "threat quota reached"),
            SpawnThreatError::NoSlot => write!(f, "no threat slot free"),
            SpawnThreatError::RunTerminated => write!(f, "run already terminated"),
            SpawnThreatError::WorkerStart(e) => write!(f, "threat worker failed to start: {e}"),
        }
    }
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::Worker { role, source } => {
                write!(f, "failed to start {role} worker: {source}")
            }
        }
    }
}

impl std::error::Error for SpawnError {}

impl std::error::Error for FireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FireError::WorkerStart(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for SpawnThreatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpawnThreatError::WorkerStart(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for StartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartError::Worker { source, .. } => Some(source),
        }
    }
}
