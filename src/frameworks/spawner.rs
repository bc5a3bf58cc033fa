// Worker spawner backed by the ambient tokio runtime.

use crate::domain::{SpawnError, WorkerRole, WorkerSpawner, WorkerTask};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::Instrument;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl WorkerSpawner for TokioSpawner {
    fn spawn(&self, role: WorkerRole, task: WorkerTask) -> Result<JoinHandle<()>, SpawnError> {
        let handle = Handle::try_current().map_err(|_| SpawnError::NoRuntime)?;
        let span = tracing::debug_span!("worker", %role);
        Ok(handle.spawn(task.instrument(span)))
    }
}
