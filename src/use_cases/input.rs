// Input collector: polls the surface for decoded intents and applies them.

use crate::domain::Intent;
use crate::use_cases::interceptor::fire;
use crate::use_cases::run_token::RunToken;
use crate::use_cases::shutdown::signal_termination;
use crate::use_cases::world::World;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

pub fn apply_intent(world: &Arc<World>, token: &RunToken, intent: Intent) {
    match intent {
        Intent::MoveLeft | Intent::MoveRight => {
            let step = if intent == Intent::MoveLeft { -1 } else { 1 };
            let mut state = world.state();
            let layout = state.layout;
            state.battery.shift(step, &layout);
        }
        Intent::Aim(direction) => world.state().battery.aim = direction,
        Intent::Fire => match fire(world, token) {
            Ok(interceptor_id) => trace!(interceptor_id, "fire intent applied"),
            Err(e) => debug!(reason = %e, "shot skipped"),
        },
        Intent::Quit => {
            info!("quit requested");
            signal_termination(world, token);
        }
    }
}

pub(crate) async fn input_collector(world: Arc<World>, token: RunToken, poll_interval: Duration) {
    debug!("input collector started");
    while !token.is_terminated() {
        // The presentation lock is released before the intent is applied.
        let polled = world.surface().poll_intent();
        match polled {
            Ok(Some(intent)) => apply_intent(&world, &token, intent),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "input poll failed"),
        }
        if !token.pause(poll_interval).await {
            break;
        }
    }
    debug!("input collector exited");
}
