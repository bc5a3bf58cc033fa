// Fire action and the per-interceptor flight worker.

use crate::domain::{FireError, Interceptor, Position, WorkerRole};
use crate::use_cases::ids::next_entity_id;
use crate::use_cases::run_token::RunToken;
use crate::use_cases::world::World;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterceptorExit {
    OutOfBounds,
    Hit,
    // The matched threat was retired by another writer first.
    Missed,
    // Retired by a threat-side detection.
    Retired,
    Cancelled,
}

/// Launches one interceptor from the battery along the current aim.
///
/// `NoLauncherReady` and `NoInterceptorSlot` are ordinary outcomes; callers skip the shot.
pub fn fire(world: &Arc<World>, token: &RunToken) -> Result<u64, FireError> {
    let (battery, layout) = {
        let state = world.state();
        (state.battery, state.layout)
    };

    let launcher = reserve_launcher(world).ok_or(FireError::NoLauncherReady)?;

    let mut interceptors = world.interceptors();
    let slot = if token.is_terminated() {
        Err(FireError::RunTerminated)
    } else {
        interceptors
            .free_slot()
            .ok_or(FireError::NoInterceptorSlot)
    };
    let index = match slot {
        Ok(index) => index,
        Err(e) => {
            drop(interceptors);
            restore_launcher(world, launcher);
            return Err(e);
        }
    };

    let id = next_entity_id();
    let origin = Position::new(battery.x.clamp(0, layout.width - 1), layout.ground_line());
    interceptors.occupy(index, Interceptor::new(id, origin, battery.aim, launcher));
    world.resupply().notify_one();
    world.state().metrics.record_shot();

    let task = interceptor_worker(Arc::clone(world), token.clone(), index, id);
    match world.spawner().spawn(WorkerRole::Interceptor, Box::pin(task)) {
        Ok(handle) => {
            interceptors.attach_worker(index, handle);
            debug!(interceptor_id = id, launcher, direction = ?battery.aim, "interceptor fired");
            Ok(id)
        }
        Err(e) => {
            // The launcher stays spent; the scheduler refills it like any other.
            interceptors.rollback(index);
            world.state().metrics.revoke_shot();
            warn!(interceptor_id = id, error = %e, "interceptor worker failed to start");
            Err(FireError::WorkerStart(e))
        }
    }
}

// Clears the first loaded launcher and returns its slot.
fn reserve_launcher(world: &World) -> Option<usize> {
    let mut launchers = world.launchers();
    let launcher = launchers.iter_mut().find(|l| l.loaded)?;
    launcher.loaded = false;
    Some(launcher.slot)
}

fn restore_launcher(world: &World, slot: usize) {
    if let Some(launcher) = world.launchers().get_mut(slot) {
        launcher.loaded = true;
    }
}

pub(crate) async fn interceptor_worker(world: Arc<World>, token: RunToken, index: usize, id: u64) {
    let exit = fly(&world, &token, index, id).await;
    world.interceptors().worker_exited();
    debug!(interceptor_id = id, ?exit, "interceptor worker exited");
}

async fn fly(world: &World, token: &RunToken, index: usize, id: u64) -> InterceptorExit {
    let tick = world.combat().interceptor_tick;
    let tolerance = world.combat().hit_tolerance;

    while !token.is_terminated() {
        let position = {
            let mut interceptors = world.interceptors();
            match interceptors.get_mut(index, id) {
                Some(rocket) if rocket.alive => rocket.advance(),
                _ => return InterceptorExit::Retired,
            }
        };

        // The playfield may have been resized since the last tick.
        let layout = world.state().layout;
        if !layout.contains(position) {
            if let Some(rocket) = world.interceptors().get_mut(index, id) {
                rocket.retire();
            }
            return InterceptorExit::OutOfBounds;
        }

        // Interceptor-side detection. Pick a candidate without flipping anything, then win this
        // interceptor's own gate before attempting the threat's.
        let candidate = world
            .threats()
            .active_slots()
            .find(|(_, threat)| threat.position.within(position, tolerance))
            .map(|(slot, threat)| (slot, threat.id));

        if let Some((slot, threat_id)) = candidate {
            let spent = world
                .interceptors()
                .get_mut(index, id)
                .is_some_and(Interceptor::retire);
            if !spent {
                // A threat worker already consumed this interceptor.
                return InterceptorExit::Retired;
            }

            let destroyed = world
                .threats()
                .get_mut(slot, threat_id)
                .and_then(|threat| threat.try_destroy().then_some(threat.position));
            let Some(at) = destroyed else {
                return InterceptorExit::Missed;
            };
            debug!(interceptor_id = id, threat_id, "interception credited by interceptor");
            world.credit_interception(at);
            return InterceptorExit::Hit;
        }

        if !token.pause(tick).await {
            break;
        }
    }
    InterceptorExit::Cancelled
}
