// Session: wires the world, the run token and the auxiliary workers for one run.

use crate::domain::tuning::{CombatTuning, Difficulty};
use crate::domain::{RunReport, StartError, Surface, WorkerRole, WorkerSpawner, WorkerTask};
use crate::use_cases::input::input_collector;
use crate::use_cases::launcher::launcher_scheduler;
use crate::use_cases::orchestrator::orchestrator;
use crate::use_cases::run_token::RunToken;
use crate::use_cases::shutdown::{shutdown, signal_termination};
use crate::use_cases::world::{World, WorldSettings};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub difficulty: Difficulty,
    pub combat: CombatTuning,
    /// Orchestrator frame cadence.
    pub frame_interval: Duration,
    /// Pause between input polls.
    pub input_poll_interval: Duration,
    /// Seed for spawn columns and spawn intervals.
    pub seed: u64,
    pub threat_capacity: usize,
    pub interceptor_capacity: usize,
    pub max_launchers: usize,
}

impl SessionSettings {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let world = WorldSettings::new(difficulty);
        Self {
            difficulty,
            combat: world.combat,
            frame_interval: Duration::from_millis(33),
            input_poll_interval: Duration::from_millis(2),
            seed,
            threat_capacity: world.threat_capacity,
            interceptor_capacity: world.interceptor_capacity,
            max_launchers: world.max_launchers,
        }
    }

    fn world(&self) -> WorldSettings {
        WorldSettings {
            difficulty: self.difficulty,
            combat: self.combat,
            threat_capacity: self.threat_capacity,
            interceptor_capacity: self.interceptor_capacity,
            max_launchers: self.max_launchers,
        }
    }
}

pub struct Session {
    world: Arc<World>,
    token: RunToken,
    auxiliaries: Vec<(WorkerRole, JoinHandle<()>)>,
}

impl Session {
    /// Builds the world and starts the scheduler, input collector and orchestrator.
    ///
    /// If any of them cannot start, the ones already running are shut down and joined
    /// before the error is returned.
    pub async fn start(
        settings: SessionSettings,
        surface: Box<dyn Surface>,
        spawner: Arc<dyn WorkerSpawner>,
    ) -> Result<Self, StartError> {
        let token = RunToken::new();
        let world = Arc::new(World::new(settings.world(), surface, spawner));

        let workers: [(WorkerRole, WorkerTask); 3] = [
            (
                WorkerRole::LauncherScheduler,
                Box::pin(launcher_scheduler(Arc::clone(&world), token.clone())),
            ),
            (
                WorkerRole::InputCollector,
                Box::pin(input_collector(
                    Arc::clone(&world),
                    token.clone(),
                    settings.input_poll_interval,
                )),
            ),
            (
                WorkerRole::Orchestrator,
                Box::pin(orchestrator(
                    Arc::clone(&world),
                    token.clone(),
                    settings.frame_interval,
                    ChaCha8Rng::seed_from_u64(settings.seed),
                )),
            ),
        ];

        let mut auxiliaries = Vec::with_capacity(workers.len());
        for (role, task) in workers {
            match world.spawner().spawn(role, task) {
                Ok(handle) => auxiliaries.push((role, handle)),
                Err(source) => {
                    error!(%role, error = %source, "failed to start worker");
                    shutdown(&world, &token, auxiliaries).await;
                    return Err(StartError::Worker { role, source });
                }
            }
        }

        info!(seed = settings.seed, "session started");
        Ok(Self {
            world,
            token,
            auxiliaries,
        })
    }

    pub fn token(&self) -> &RunToken {
        &self.token
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// Ends the run early, as a quit intent would.
    pub fn terminate(&self) -> bool {
        signal_termination(&self.world, &self.token)
    }

    /// Waits for the run to terminate, joins every worker and reports the outcome.
    pub async fn finish(self) -> RunReport {
        self.token.terminated().await;
        shutdown(&self.world, &self.token, self.auxiliaries).await;

        let report = self.world.report();
        info!(
            verdict = ?report.verdict,
            score = report.score,
            destroyed = report.destroyed,
            reached = report.reached,
            "run finished"
        );
        report
    }
}
