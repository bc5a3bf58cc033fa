// Threat spawning and the per-threat descent worker.

use crate::domain::{Position, SpawnThreatError, Threat, WorkerRole};
use crate::use_cases::ids::next_entity_id;
use crate::use_cases::run_token::RunToken;
use crate::use_cases::world::World;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThreatExit {
    GroundReached,
    Destroyed,
    // Another writer won the gate first.
    Retired,
    Cancelled,
}

/// Spawns one threat at `column` on the spawn row and starts its worker.
///
/// The quota check, slot reservation and worker start happen under the threat lock, so a
/// shutdown that has already collected worker handles never misses a late spawn.
pub fn spawn_threat(
    world: &Arc<World>,
    token: &RunToken,
    column: i32,
) -> Result<u64, SpawnThreatError> {
    let mut threats = world.threats();
    if token.is_terminated() {
        return Err(SpawnThreatError::RunTerminated);
    }

    let (index, layout) = {
        let mut state = world.state();
        if !state.metrics.quota_left() {
            return Err(SpawnThreatError::QuotaReached);
        }
        let Some(index) = threats.free_slot() else {
            return Err(SpawnThreatError::NoSlot);
        };
        state.metrics.spawned += 1;
        (index, state.layout)
    };

    let id = next_entity_id();
    let position = Position::new(column.clamp(0, layout.width - 1), layout.hud_height);
    threats.occupy(index, Threat::new(id, position));

    let task = threat_worker(Arc::clone(world), token.clone(), index, id);
    match world.spawner().spawn(WorkerRole::Threat, Box::pin(task)) {
        Ok(handle) => {
            threats.attach_worker(index, handle);
            debug!(threat_id = id, x = position.x, "threat spawned");
            Ok(id)
        }
        Err(e) => {
            threats.rollback(index);
            world.state().metrics.spawned -= 1;
            warn!(threat_id = id, error = %e, "threat worker failed to start");
            Err(SpawnThreatError::WorkerStart(e))
        }
    }
}

pub(crate) async fn threat_worker(world: Arc<World>, token: RunToken, index: usize, id: u64) {
    let exit = descend(&world, &token, index, id).await;
    world.threats().worker_exited();
    debug!(threat_id = id, ?exit, "threat worker exited");
}

async fn descend(world: &World, token: &RunToken, index: usize, id: u64) -> ThreatExit {
    let tick = world.difficulty().threat_tick;
    let tolerance = world.combat().hit_tolerance;

    while !token.is_terminated() {
        let position = {
            let mut threats = world.threats();
            match threats.get_mut(index, id) {
                Some(threat) if threat.alive => threat.descend(),
                _ => return ThreatExit::Retired,
            }
        };

        let ground = world.state().layout.ground_line();
        if position.y >= ground {
            let won = world
                .threats()
                .get_mut(index, id)
                .is_some_and(Threat::try_ground);
            if !won {
                return ThreatExit::Retired;
            }
            world.credit_ground_impact(position);
            return ThreatExit::GroundReached;
        }

        // Threat-side detection: retire the first interceptor inside the box.
        let struck = world
            .interceptors()
            .active_mut()
            .find(|rocket| rocket.position.within(position, tolerance))
            .and_then(|rocket| rocket.retire().then_some(rocket.id));

        if let Some(interceptor_id) = struck {
            let won = world
                .threats()
                .get_mut(index, id)
                .is_some_and(Threat::try_destroy);
            if !won {
                return ThreatExit::Retired;
            }
            debug!(threat_id = id, interceptor_id, "interception credited by threat");
            world.credit_interception(position);
            return ThreatExit::Destroyed;
        }

        if !token.pause(tick).await {
            break;
        }
    }
    ThreatExit::Cancelled
}
