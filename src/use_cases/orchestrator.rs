// Orchestrator: frame loop driving termination checks, threat spawning and rendering.

use crate::domain::Termination;
use crate::use_cases::render::render_pass;
use crate::use_cases::run_token::RunToken;
use crate::use_cases::shutdown::signal_termination;
use crate::use_cases::threat::spawn_threat;
use crate::use_cases::world::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

// Time until the next threat; the interval is redrawn after every spawn attempt.
struct SpawnClock {
    last: Instant,
    wait: Duration,
}

impl SpawnClock {
    fn due(&self) -> bool {
        self.last.elapsed() >= self.wait
    }
}

pub(crate) async fn orchestrator(
    world: Arc<World>,
    token: RunToken,
    frame_interval: Duration,
    mut rng: ChaCha8Rng,
) {
    let difficulty = world.difficulty();
    let mut clock = SpawnClock {
        last: Instant::now(),
        wait: difficulty.spawn_interval(&mut rng),
    };
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(
        difficulty = difficulty.name,
        total = difficulty.total_threats,
        launchers = difficulty.launchers,
        "run started"
    );

    loop {
        tokio::select! {
            _ = token.terminated() => break,
            _ = frames.tick() => {}
        }

        let (termination, quota_left, width) = {
            let mut state = world.state();
            state.refresh_elapsed();
            (
                state.metrics.termination(),
                state.metrics.quota_left(),
                state.layout.width,
            )
        };
        if termination != Termination::Continue {
            info!(?termination, "end condition reached");
            signal_termination(&world, &token);
            break;
        }

        if quota_left && clock.due() {
            let column = rng.gen_range(0..width);
            if let Err(e) = spawn_threat(&world, &token, column) {
                debug!(reason = %e, "threat spawn skipped");
            }
            clock.last = Instant::now();
            clock.wait = difficulty.spawn_interval(&mut rng);
        }

        render_pass(&world);
    }
    debug!("orchestrator exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;
    use crate::use_cases::test_support::{ScriptedSurface, world_with, world_with_surface};
    use rand::SeedableRng;

    const FRAME: Duration = Duration::from_millis(33);

    fn start(world: &Arc<World>, token: &RunToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(orchestrator(
            Arc::clone(world),
            token.clone(),
            FRAME,
            ChaCha8Rng::seed_from_u64(7),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn overrun_terminates_the_run() {
        let (world, token) = world_with(Difficulty::EASY);
        {
            let mut state = world.state();
            state.metrics.spawned = 16;
            state.metrics.reached = 16;
        }
        let worker = start(&world, &token);

        tokio::time::timeout(Duration::from_millis(100), worker)
            .await
            .expect("orchestrator should stop on the first frame")
            .expect("orchestrator should not panic");
        assert!(token.is_terminated());
        assert_eq!(world.metrics().spawned, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn exactly_half_reached_keeps_running() {
        let (world, token) = world_with(Difficulty::EASY);
        {
            let mut state = world.state();
            state.metrics.spawned = 15;
            state.metrics.reached = 15;
        }
        let worker = start(&world, &token);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!token.is_terminated());
        assert!(world.metrics().spawned > 15);

        signal_termination(&world, &token);
        worker.await.expect("orchestrator should not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn all_handled_ends_the_run() {
        let (world, token) = world_with(Difficulty::EASY);
        {
            let mut state = world.state();
            state.metrics.spawned = 30;
            state.metrics.destroyed = 20;
            state.metrics.reached = 10;
        }
        start(&world, &token)
            .await
            .expect("orchestrator should not panic");
        assert!(token.is_terminated());
    }

    #[tokio::test(start_paused = true)]
    async fn spawning_stops_at_the_quota() {
        let (world, token) = world_with(Difficulty::EASY);
        world.state().metrics.spawned = 28;
        let worker = start(&world, &token);

        tokio::time::sleep(Duration::from_secs(12)).await;
        assert_eq!(world.metrics().spawned, 30);

        signal_termination(&world, &token);
        worker.await.expect("orchestrator should not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn each_frame_is_drawn() {
        let surface = ScriptedSurface::new();
        let frames = surface.frames();
        let (world, token) = world_with_surface(Difficulty::MEDIUM, surface);
        let worker = start(&world, &token);

        tokio::time::sleep(Duration::from_millis(330)).await;
        signal_termination(&world, &token);
        worker.await.expect("orchestrator should not panic");

        let drawn = frames.lock().expect("frames mutex poisoned");
        assert!(drawn.len() >= 9, "drew {} frames", drawn.len());
        assert!(drawn.iter().all(|frame| frame.difficulty == "Medium"));
    }
}
