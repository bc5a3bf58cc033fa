// Launcher resupply scheduler: refills empty slots one at a time on the reload cadence.

use crate::use_cases::run_token::RunToken;
use crate::use_cases::world::World;
use std::sync::Arc;
use tracing::{debug, trace};

pub(crate) async fn launcher_scheduler(world: Arc<World>, token: RunToken) {
    let reload = world.difficulty().reload;
    debug!(reload_ms = reload.as_millis() as u64, "launcher scheduler started");

    while !token.is_terminated() {
        // Aim committed to the launcher is the one current when the reload begins.
        let aim = world.state().battery.aim;
        let empty = world.launchers().iter().position(|l| !l.loaded);

        match empty {
            Some(slot) => {
                if !token.pause(reload).await {
                    break;
                }
                let mut launchers = world.launchers();
                if !token.is_terminated() && !launchers[slot].loaded {
                    launchers[slot].load(aim);
                    trace!(slot, ?aim, "launcher reloaded");
                }
            }
            None => {
                // All full: park until a fire empties one. The loop re-checks on every wake.
                tokio::select! {
                    _ = world.resupply().notified() => {}
                    _ = token.terminated() => break,
                }
            }
        }
    }
    debug!("launcher scheduler exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, Direction, FireError};
    use crate::use_cases::interceptor::fire;
    use crate::use_cases::shutdown::signal_termination;
    use crate::use_cases::test_support::world_with;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn launchers_fill_in_slot_order() {
        let (world, token) = world_with(Difficulty::EASY);
        let scheduler = tokio::spawn(launcher_scheduler(Arc::clone(&world), token.clone()));

        tokio::time::sleep(Duration::from_millis(5100)).await;
        let loaded: Vec<bool> = world.launcher_states().iter().map(|l| l.loaded).collect();
        assert_eq!(loaded, vec![true, true, false, false]);

        signal_termination(&world, &token);
        scheduler.await.expect("scheduler should not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn fifth_shot_waits_for_reload_on_easy() {
        let (world, token) = world_with(Difficulty::EASY);
        let scheduler = tokio::spawn(launcher_scheduler(Arc::clone(&world), token.clone()));

        tokio::time::sleep(Duration::from_millis(10_100)).await;
        assert!(world.launcher_states().iter().all(|l| l.loaded));

        for _ in 0..4 {
            fire(&world, &token).expect("loaded launcher should fire");
        }
        assert_eq!(fire(&world, &token), Err(FireError::NoLauncherReady));

        tokio::time::sleep(Duration::from_millis(2600)).await;
        fire(&world, &token).expect("reloaded launcher should fire");

        let metrics = world.metrics();
        assert_eq!(metrics.shots_fired, 5);
        assert_eq!(metrics.shots_hit, 0);

        signal_termination(&world, &token);
        scheduler.await.expect("scheduler should not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn reload_commits_aim_read_before_the_wait() {
        let (world, token) = world_with(Difficulty::EASY);
        world.state().battery.aim = Direction::DiagonalLeft;
        let scheduler = tokio::spawn(launcher_scheduler(Arc::clone(&world), token.clone()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        world.state().battery.aim = Direction::HorizontalRight;
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(world.launcher_states()[0].direction, Direction::DiagonalLeft);

        signal_termination(&world, &token);
        scheduler.await.expect("scheduler should not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn parked_scheduler_exits_on_shutdown() {
        let (world, token) = world_with(Difficulty::HARD);
        for launcher in world.launchers().iter_mut() {
            launcher.load(Direction::Straight);
        }
        let scheduler = tokio::spawn(launcher_scheduler(Arc::clone(&world), token.clone()));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!scheduler.is_finished());

        signal_termination(&world, &token);
        tokio::time::timeout(Duration::from_secs(1), scheduler)
            .await
            .expect("scheduler should wake on shutdown")
            .expect("scheduler should not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn reload_in_progress_is_abandoned_on_shutdown() {
        let (world, token) = world_with(Difficulty::EASY);
        let scheduler = tokio::spawn(launcher_scheduler(Arc::clone(&world), token.clone()));
        tokio::time::sleep(Duration::from_millis(1000)).await;

        signal_termination(&world, &token);
        scheduler.await.expect("scheduler should not panic");
        assert!(world.launcher_states().iter().all(|l| !l.loaded));
    }
}
