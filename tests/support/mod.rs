// Shared fakes for driving whole sessions without a terminal.
#![allow(dead_code)]

use skyshield::domain::{
    Frame, Intent, SpawnError, Surface, WorkerRole, WorkerSpawner, WorkerTask,
};
use skyshield::frameworks::spawner::TokioSpawner;
use std::{
    // `Arc<Mutex<..>>` lets the test read frames the session drew.
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::task::JoinHandle;
use tokio::time::Instant;

// Surface whose intents are released at fixed offsets from its creation.
pub struct ScriptedSurface {
    started: Instant,
    // Pending (offset, intent) pairs in release order.
    script: Vec<(Duration, Intent)>,
    frames: Arc<Mutex<usize>>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            script: Vec::new(),
            frames: Arc::new(Mutex::new(0)),
        }
    }

    // Queue `intent` to be polled once `millis` have elapsed.
    pub fn at(mut self, millis: u64, intent: Intent) -> Self {
        self.script.push((Duration::from_millis(millis), intent));
        self.script.sort_by_key(|(offset, _)| *offset);
        self
    }

    // Counter of frames drawn so far.
    pub fn frame_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.frames)
    }
}

impl Surface for ScriptedSurface {
    fn size(&mut self) -> std::io::Result<(u16, u16)> {
        Ok((120, 32))
    }

    fn draw(&mut self, _frame: &Frame) -> std::io::Result<()> {
        *self.frames.lock().expect("frame counter poisoned") += 1;
        Ok(())
    }

    fn poll_intent(&mut self) -> std::io::Result<Option<Intent>> {
        let due = self
            .script
            .first()
            .is_some_and(|(offset, _)| self.started.elapsed() >= *offset);
        Ok(due.then(|| self.script.remove(0).1))
    }
}

// Spawner that refuses one worker role and runs every other role on tokio.
pub struct RefusingSpawner(pub WorkerRole);

impl WorkerSpawner for RefusingSpawner {
    fn spawn(&self, role: WorkerRole, task: WorkerTask) -> Result<JoinHandle<()>, SpawnError> {
        if role == self.0 {
            return Err(SpawnError::NoRuntime);
        }
        TokioSpawner.spawn(role, task)
    }
}
