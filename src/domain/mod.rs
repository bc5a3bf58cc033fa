// Domain layer: entities, rules and ports of the battery simulation.

pub mod effects;
pub mod errors;
pub mod outcome;
pub mod ports;
pub mod state;
pub mod tuning;

pub use effects::{Explosion, ExplosionLog};
pub use errors::{FireError, SpawnError, SpawnThreatError, StartError};
pub use outcome::{RunReport, Termination, Verdict};
pub use ports::{Surface, WorkerRole, WorkerSpawner, WorkerTask};
pub use state::{
    Battery, Direction, Frame, Intent, Interceptor, InterceptorSnapshot, Launcher, Layout,
    Position, RunMetrics, Threat,
};
pub use tuning::{CombatTuning, Difficulty};
