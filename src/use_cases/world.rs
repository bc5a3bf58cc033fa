// Authoritative shared model for one run, partitioned into independently locked domains.
//
// Lock order whenever two domains are held at once:
//   threats / interceptors -> state -> launchers -> presentation
// Threats and interceptors are never held together.

use crate::domain::tuning::{CombatTuning, Difficulty};
use crate::domain::{
    Battery, ExplosionLog, Interceptor, InterceptorSnapshot, Launcher, Layout, Position, RunMetrics,
    RunReport, Surface, Threat, WorkerSpawner,
};
use crate::use_cases::pool::EntityPool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::debug;

/// Sizing and rules for a new world.
#[derive(Debug, Clone, Copy)]
pub struct WorldSettings {
    pub difficulty: Difficulty,
    pub combat: CombatTuning,
    /// Fixed number of threat slots.
    pub threat_capacity: usize,
    /// Fixed number of interceptor slots.
    pub interceptor_capacity: usize,
    /// Hard cap applied on top of the tier's launcher count.
    pub max_launchers: usize,
}

impl WorldSettings {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            combat: CombatTuning::default(),
            threat_capacity: 80,
            interceptor_capacity: 150,
            max_launchers: 15,
        }
    }
}

/// Everything guarded by the state lock: metrics, battery and playfield geometry.
#[derive(Debug)]
pub struct RunState {
    pub metrics: RunMetrics,
    pub battery: Battery,
    pub layout: Layout,
    started: Instant,
}

impl RunState {
    fn new(total: u32) -> Self {
        let layout = Layout::default();
        Self {
            metrics: RunMetrics::new(total),
            battery: Battery::centered(&layout),
            layout,
            started: Instant::now(),
        }
    }

    pub fn refresh_elapsed(&mut self) {
        self.metrics.elapsed_secs = self.started.elapsed().as_secs();
    }

    /// Publishes a surface measurement, keeping the battery on the playfield.
    pub fn apply_measurement(&mut self, columns: u16, rows: u16) {
        if self.layout.resize(columns, rows) {
            self.battery.shift(0, &self.layout);
            debug!(
                width = self.layout.width,
                height = self.layout.height,
                "playfield resized"
            );
        }
    }
}

struct Presentation {
    surface: Mutex<Box<dyn Surface>>,
    explosions: Mutex<ExplosionLog>,
}

pub struct World {
    difficulty: Difficulty,
    combat: CombatTuning,
    threats: Mutex<EntityPool<Threat>>,
    interceptors: Mutex<EntityPool<Interceptor>>,
    state: Mutex<RunState>,
    launchers: Mutex<Vec<Launcher>>,
    presentation: Presentation,
    // Signalled whenever a launcher is emptied.
    resupply: Notify,
    spawner: Arc<dyn WorkerSpawner>,
}

// A poisoned domain lock still holds plain counters and flags; keep using them.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl World {
    pub fn new(
        settings: WorldSettings,
        surface: Box<dyn Surface>,
        spawner: Arc<dyn WorkerSpawner>,
    ) -> Self {
        let difficulty = settings.difficulty;
        let launchers = (0..difficulty.launchers.min(settings.max_launchers))
            .map(Launcher::empty)
            .collect();

        Self {
            difficulty,
            combat: settings.combat,
            threats: Mutex::new(EntityPool::with_capacity(settings.threat_capacity)),
            interceptors: Mutex::new(EntityPool::with_capacity(settings.interceptor_capacity)),
            state: Mutex::new(RunState::new(difficulty.total_threats)),
            launchers: Mutex::new(launchers),
            presentation: Presentation {
                surface: Mutex::new(surface),
                explosions: Mutex::new(ExplosionLog::new(
                    settings.combat.max_explosions,
                    settings.combat.explosion_frames,
                )),
            },
            resupply: Notify::new(),
            spawner,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn combat(&self) -> CombatTuning {
        self.combat
    }

    pub(crate) fn threats(&self) -> MutexGuard<'_, EntityPool<Threat>> {
        lock(&self.threats)
    }

    pub(crate) fn interceptors(&self) -> MutexGuard<'_, EntityPool<Interceptor>> {
        lock(&self.interceptors)
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, RunState> {
        lock(&self.state)
    }

    pub(crate) fn launchers(&self) -> MutexGuard<'_, Vec<Launcher>> {
        lock(&self.launchers)
    }

    pub(crate) fn surface(&self) -> MutexGuard<'_, Box<dyn Surface>> {
        lock(&self.presentation.surface)
    }

    pub(crate) fn explosions(&self) -> MutexGuard<'_, ExplosionLog> {
        lock(&self.presentation.explosions)
    }

    pub(crate) fn resupply(&self) -> &Notify {
        &self.resupply
    }

    pub(crate) fn spawner(&self) -> &dyn WorkerSpawner {
        self.spawner.as_ref()
    }

    /// Side effects owed by the winner of an interception gate.
    pub(crate) fn credit_interception(&self, at: Position) {
        let streak = {
            let mut state = self.state();
            state.metrics.record_kill(self.combat.kill_points);
            state.metrics.current_streak
        };
        self.explosions().push(at);
        debug!(x = at.x, y = at.y, streak, "threat destroyed");
    }

    /// Side effects owed by the winner of a ground gate.
    pub(crate) fn credit_ground_impact(&self, at: Position) {
        self.state().metrics.record_ground_impact();
        debug!(x = at.x, y = at.y, "threat reached the ground");
    }

    pub fn metrics(&self) -> RunMetrics {
        self.state().metrics
    }

    pub fn layout(&self) -> Layout {
        self.state().layout
    }

    pub fn battery(&self) -> Battery {
        self.state().battery
    }

    pub fn launcher_states(&self) -> Vec<Launcher> {
        self.launchers().clone()
    }

    pub fn threat_positions(&self) -> Vec<Position> {
        self.threats().active().map(|t| t.position).collect()
    }

    pub fn interceptor_snapshots(&self) -> Vec<InterceptorSnapshot> {
        self.interceptors()
            .active()
            .map(InterceptorSnapshot::from)
            .collect()
    }

    pub fn active_threat_workers(&self) -> usize {
        self.threats().active_workers()
    }

    pub fn active_interceptor_workers(&self) -> usize {
        self.interceptors().active_workers()
    }

    pub fn report(&self) -> RunReport {
        RunReport::new(self.difficulty.name, &self.state().metrics)
    }
}
