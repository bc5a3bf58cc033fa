// Ports the core depends on: the presentation surface and the worker spawner.

use crate::domain::errors::SpawnError;
use crate::domain::state::{Frame, Intent};
use futures::future::BoxFuture;
use std::{fmt, io};
use tokio::task::JoinHandle;

/// Future driving one worker to completion.
pub type WorkerTask = BoxFuture<'static, ()>;

/// Presentation and input surface. Every call happens under the presentation lock.
pub trait Surface: Send {
    /// Drawable size in (columns, rows).
    fn size(&mut self) -> io::Result<(u16, u16)>;

    fn draw(&mut self, frame: &Frame) -> io::Result<()>;

    /// Returns the next decoded intent without blocking.
    fn poll_intent(&mut self) -> io::Result<Option<Intent>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRole {
    Threat,
    Interceptor,
    LauncherScheduler,
    InputCollector,
    Orchestrator,
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerRole::Threat => "threat",
            WorkerRole::Interceptor => "interceptor",
            WorkerRole::LauncherScheduler => "launcher scheduler",
            WorkerRole::InputCollector => "input collector",
            WorkerRole::Orchestrator => "orchestrator",
        };
        f.write_str(name)
    }
}

// Port for starting workers; failures are recovered by the caller.
pub trait WorkerSpawner: Send + Sync {
    fn spawn(&self, role: WorkerRole, task: WorkerTask) -> Result<JoinHandle<()>, SpawnError>;
}
