// Shared fixtures for the use case tests.

use crate::domain::{
    Difficulty, Direction, Frame, Intent, Interceptor, Position, SpawnError, Surface, Threat,
    WorkerRole, WorkerSpawner, WorkerTask,
};
use crate::frameworks::spawner::TokioSpawner;
use crate::use_cases::ids::next_entity_id;
use crate::use_cases::interceptor::interceptor_worker;
use crate::use_cases::run_token::RunToken;
use crate::use_cases::threat::threat_worker;
use crate::use_cases::world::{World, WorldSettings};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// In-memory surface: fixed size, scripted intents, recorded frames.
pub struct ScriptedSurface {
    size: (u16, u16),
    intents: VecDeque<Intent>,
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self {
            size: (120, 32),
            intents: VecDeque::new(),
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_size(mut self, columns: u16, rows: u16) -> Self {
        self.size = (columns, rows);
        self
    }

    pub fn with_intents(mut self, intents: impl IntoIterator<Item = Intent>) -> Self {
        self.intents.extend(intents);
        self
    }

    pub fn frames(&self) -> Arc<Mutex<Vec<Frame>>> {
        Arc::clone(&self.frames)
    }
}

impl Surface for ScriptedSurface {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames
            .lock()
            .expect("frames mutex poisoned")
            .push(frame.clone());
        Ok(())
    }

    fn poll_intent(&mut self) -> io::Result<Option<Intent>> {
        Ok(self.intents.pop_front())
    }
}

/// Refuses to start workers of one role; every other role runs on tokio.
pub struct FailingSpawner {
    role: WorkerRole,
    inner: TokioSpawner,
}

impl FailingSpawner {
    pub fn for_role(role: WorkerRole) -> Self {
        Self {
            role,
            inner: TokioSpawner,
        }
    }
}

impl WorkerSpawner for FailingSpawner {
    fn spawn(&self, role: WorkerRole, task: WorkerTask) -> Result<JoinHandle<()>, SpawnError> {
        if role == self.role {
            return Err(SpawnError::NoRuntime);
        }
        self.inner.spawn(role, task)
    }
}

pub fn world_with(difficulty: Difficulty) -> (Arc<World>, RunToken) {
    world_with_settings(WorldSettings::new(difficulty))
}

pub fn world_with_settings(settings: WorldSettings) -> (Arc<World>, RunToken) {
    build(settings, ScriptedSurface::new(), TokioSpawner)
}

pub fn world_with_spawner(
    difficulty: Difficulty,
    spawner: impl WorkerSpawner + 'static,
) -> (Arc<World>, RunToken) {
    build(WorldSettings::new(difficulty), ScriptedSurface::new(), spawner)
}

pub fn world_with_surface(
    difficulty: Difficulty,
    surface: ScriptedSurface,
) -> (Arc<World>, RunToken) {
    build(WorldSettings::new(difficulty), surface, TokioSpawner)
}

fn build(
    settings: WorldSettings,
    surface: ScriptedSurface,
    spawner: impl WorkerSpawner + 'static,
) -> (Arc<World>, RunToken) {
    let world = World::new(settings, Box::new(surface), Arc::new(spawner));
    (Arc::new(world), RunToken::new())
}

pub fn load_launchers(world: &World, count: usize) {
    for launcher in world.launchers().iter_mut().take(count) {
        launcher.load(Direction::Straight);
    }
}

/// Threat record with a running descent worker. The handle is returned, not attached.
pub fn place_threat(world: &Arc<World>, token: &RunToken, position: Position) -> JoinHandle<()> {
    let (index, id) = park_threat(world, position);
    tokio::spawn(threat_worker(Arc::clone(world), token.clone(), index, id))
}

/// Threat record with no worker; only interceptors can act on it.
pub fn park_threat(world: &World, position: Position) -> (usize, u64) {
    let id = next_entity_id();
    let mut threats = world.threats();
    let index = threats.free_slot().expect("threat slot available");
    threats.occupy(index, Threat::new(id, position));
    (index, id)
}

/// Interceptor record with no worker; only threats can act on it.
pub fn place_interceptor(world: &World, position: Position, direction: Direction) -> (usize, u64) {
    let id = next_entity_id();
    let mut interceptors = world.interceptors();
    let index = interceptors.free_slot().expect("interceptor slot available");
    interceptors.occupy(index, Interceptor::new(id, position, direction, 0));
    (index, id)
}

pub fn place_flying_interceptor(
    world: &Arc<World>,
    token: &RunToken,
    position: Position,
    direction: Direction,
) -> JoinHandle<()> {
    let (index, id) = place_interceptor(world, position, direction);
    tokio::spawn(interceptor_worker(Arc::clone(world), token.clone(), index, id))
}
