use std::time::Duration;

/// Gameplay tuning shared by every difficulty tier.
///
/// Keep this separate from runtime configuration (frame cadence, pool sizes, etc.).
#[derive(Debug, Clone, Copy)]
pub struct CombatTuning {
    /// Half-width of the square collision box, in grid cells.
    pub hit_tolerance: i32,

    /// Points credited per destroyed threat.
    pub kill_points: u32,

    /// Idle time between interceptor ticks.
    pub interceptor_tick: Duration,

    /// Frames an explosion marker stays visible.
    pub explosion_frames: u8,

    /// Upper bound on simultaneously visible explosion markers.
    pub max_explosions: usize,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            hit_tolerance: 2,
            kill_points: 10,
            interceptor_tick: Duration::from_millis(35),
            explosion_frames: 5,
            max_explosions: 32,
        }
    }
}
