// Shutdown coordinator: terminate the run, wake every parked worker, join them all.

use crate::domain::WorkerRole;
use crate::use_cases::run_token::RunToken;
use crate::use_cases::world::World;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Flips the run to terminated and wakes the scheduler if it is parked.
/// Returns true for the call that performed the transition.
pub fn signal_termination(world: &World, token: &RunToken) -> bool {
    let first = token.terminate();
    world.resupply().notify_waiters();
    if first {
        // Run time stops at termination, not when the last worker is joined.
        let elapsed_secs = {
            let mut state = world.state();
            state.refresh_elapsed();
            state.metrics.elapsed_secs
        };
        info!(elapsed_secs, "run terminated");
    }
    first
}

/// Terminates the run and waits for every still-running worker, entity and auxiliary alike.
///
/// Entity workers that already retired are skipped; every handle is awaited at most once.
pub async fn shutdown(
    world: &World,
    token: &RunToken,
    auxiliaries: Vec<(WorkerRole, JoinHandle<()>)>,
) {
    signal_termination(world, token);

    // Spawns check the token under the pool lock, so nothing new appears after these takes.
    let mut entity_workers = world.threats().take_live_workers();
    entity_workers.extend(world.interceptors().take_live_workers());
    let entity_count = entity_workers.len();

    for result in join_all(entity_workers).await {
        if let Err(e) = result {
            warn!(error = %e, "entity worker ended abnormally");
        }
    }

    let (roles, handles): (Vec<WorkerRole>, Vec<JoinHandle<()>>) = auxiliaries.into_iter().unzip();
    for (role, result) in roles.into_iter().zip(join_all(handles).await) {
        if let Err(e) = result {
            warn!(%role, error = %e, "auxiliary worker ended abnormally");
        }
    }

    debug!(entity_workers = entity_count, "all workers joined");
}
