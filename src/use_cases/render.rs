// Render pass: snapshot the world domain by domain, then compose under the presentation lock.

use crate::domain::Frame;
use crate::use_cases::world::World;
use tracing::warn;

/// Point-in-time view of the world. Each domain lock is taken on its own, never nested.
pub fn snapshot(world: &World) -> Frame {
    let threats = world.threat_positions();
    let interceptors = world.interceptor_snapshots();
    let (metrics, battery, layout) = {
        let state = world.state();
        (state.metrics, state.battery, state.layout)
    };
    let launchers = world.launcher_states();
    let explosions = world.explosions().live();

    Frame {
        difficulty: world.difficulty().name,
        layout,
        metrics,
        battery,
        launchers,
        threats,
        interceptors,
        explosions,
    }
}

pub fn render_pass(world: &World) {
    let mut frame = snapshot(world);
    world.explosions().age();

    let measured = {
        let mut surface = world.surface();
        let measured = match surface.size() {
            Ok(size) => Some(size),
            Err(e) => {
                warn!(error = %e, "surface measurement failed");
                None
            }
        };
        if let Some((columns, rows)) = measured {
            frame.layout.resize(columns, rows);
        }
        if let Err(e) = surface.draw(&frame) {
            warn!(error = %e, "frame draw failed");
        }
        measured
    };

    if let Some((columns, rows)) = measured {
        world.state().apply_measurement(columns, rows);
    }
}
