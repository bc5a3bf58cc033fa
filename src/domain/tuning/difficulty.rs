use rand::Rng;
use std::time::Duration;

/// One of the fixed difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    pub level: u8,
    pub name: &'static str,

    /// Number of launcher slots.
    pub launchers: usize,

    /// Time the scheduler needs to refill one launcher.
    pub reload: Duration,

    /// Threats spawned over the whole run.
    pub total_threats: u32,

    /// Idle time between threat descent ticks.
    pub threat_tick: Duration,

    /// Inter-spawn interval window; fixed when both ends are equal.
    pub spawn_min: Duration,
    pub spawn_max: Duration,
}

impl Difficulty {
    pub const EASY: Difficulty = Difficulty {
        level: 0,
        name: "Easy",
        launchers: 4,
        reload: Duration::from_millis(2500),
        total_threats: 30,
        threat_tick: Duration::from_millis(800),
        spawn_min: Duration::from_millis(2000),
        spawn_max: Duration::from_millis(3000),
    };

    pub const MEDIUM: Difficulty = Difficulty {
        level: 1,
        name: "Medium",
        launchers: 7,
        reload: Duration::from_millis(1500),
        total_threats: 40,
        threat_tick: Duration::from_millis(600),
        spawn_min: Duration::from_millis(2000),
        spawn_max: Duration::from_millis(2000),
    };

    pub const HARD: Difficulty = Difficulty {
        level: 2,
        name: "Hard",
        launchers: 12,
        reload: Duration::from_millis(800),
        total_threats: 60,
        threat_tick: Duration::from_millis(450),
        spawn_min: Duration::from_millis(1000),
        spawn_max: Duration::from_millis(2000),
    };

    pub const PRESETS: [Difficulty; 3] = [Self::EASY, Self::MEDIUM, Self::HARD];

    pub fn from_level(level: u8) -> Option<Difficulty> {
        Self::PRESETS.get(usize::from(level)).copied()
    }

    /// Draws the next inter-spawn interval uniformly from the tier's window.
    pub fn spawn_interval<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.spawn_min >= self.spawn_max {
            return self.spawn_min;
        }
        let min = self.spawn_min.as_millis() as u64;
        let max = self.spawn_max.as_millis() as u64;
        Duration::from_millis(rng.gen_range(min..=max))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::MEDIUM
    }
}
