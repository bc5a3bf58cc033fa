// Domain-level simulation entities, run metrics and snapshot types.

use crate::domain::effects::Explosion;
use serde::Serialize;

/// Firing direction shared by the battery aim, launchers and interceptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    #[default]
    Straight,
    DiagonalLeft,
    DiagonalRight,
    HorizontalLeft,
    HorizontalRight,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Straight,
        Direction::DiagonalLeft,
        Direction::DiagonalRight,
        Direction::HorizontalLeft,
        Direction::HorizontalRight,
    ];

    /// Per-tick step in grid units. Rows grow toward the ground, so "up" is negative.
    pub fn velocity(self) -> (i32, i32) {
        match self {
            Direction::Straight => (0, -1),
            Direction::DiagonalLeft => (-1, -1),
            Direction::DiagonalRight => (1, -1),
            Direction::HorizontalLeft => (-1, 0),
            Direction::HorizontalRight => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when `other` lies inside the square box of half-width `tolerance` around `self`.
    pub fn within(self, other: Position, tolerance: i32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// A descending hostile entity.
#[derive(Debug, Clone)]
pub struct Threat {
    pub id: u64,
    pub position: Position,
    pub alive: bool,
    pub destroyed: bool,
}

impl Threat {
    pub fn new(id: u64, position: Position) -> Self {
        Self {
            id,
            position,
            alive: true,
            destroyed: false,
        }
    }

    /// Moves one row toward the ground and returns the new position.
    pub fn descend(&mut self) -> Position {
        self.position.y += 1;
        self.position
    }

    /// Ground side of the attribution gate. Only the caller that flips `alive` gets `true`.
    pub fn try_ground(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        true
    }

    /// Interception side of the attribution gate. Only the caller that flips `alive` gets `true`.
    pub fn try_destroy(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.destroyed = true;
        true
    }
}

/// A fired projectile travelling along a fixed direction.
#[derive(Debug, Clone)]
pub struct Interceptor {
    pub id: u64,
    pub position: Position,
    pub direction: Direction,
    // Derived once from `direction`; never recomputed.
    pub velocity: (i32, i32),
    pub launcher: usize,
    pub alive: bool,
}

impl Interceptor {
    pub fn new(id: u64, position: Position, direction: Direction, launcher: usize) -> Self {
        Self {
            id,
            position,
            direction,
            velocity: direction.velocity(),
            launcher,
            alive: true,
        }
    }

    pub fn advance(&mut self) -> Position {
        self.position.x += self.velocity.0;
        self.position.y += self.velocity.1;
        self.position
    }

    /// Returns true if this call retired the interceptor.
    pub fn retire(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// A resupply slot holding at most one ready interceptor.
#[derive(Debug, Clone, Serialize)]
pub struct Launcher {
    pub slot: usize,
    pub loaded: bool,
    // Aim committed when the slot was last reloaded.
    pub direction: Direction,
}

impl Launcher {
    pub fn empty(slot: usize) -> Self {
        Self {
            slot,
            loaded: false,
            direction: Direction::Straight,
        }
    }

    pub fn load(&mut self, direction: Direction) {
        self.loaded = true;
        self.direction = direction;
    }
}

/// The player's firing position on the ground line.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Battery {
    pub x: i32,
    pub aim: Direction,
}

impl Battery {
    pub fn centered(layout: &Layout) -> Self {
        Self {
            x: layout.width / 2,
            aim: Direction::Straight,
        }
    }

    /// Shifts the battery by `step` columns, clamped to the playfield width.
    pub fn shift(&mut self, step: i32, layout: &Layout) {
        self.x = (self.x + step).clamp(0, (layout.width - 1).max(0));
    }
}

/// Playfield geometry as last measured by the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub hud_height: i32,
    pub controls_height: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 120,
            height: 32,
            hud_height: 3,
            controls_height: 2,
        }
    }
}

impl Layout {
    pub const MIN_WIDTH: i32 = 40;
    pub const MIN_HEIGHT: i32 = 8;

    /// Row threats must reach to count as a ground impact; interceptors launch from it.
    pub fn ground_line(&self) -> i32 {
        self.height - self.controls_height - 1
    }

    /// Playfield rectangle interceptors must stay inside.
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.x < self.width
            && position.y >= self.hud_height
            && position.y < self.height - self.controls_height
    }

    /// Applies a surface measurement, clamped to the minimum playable size.
    /// Returns true if the geometry changed.
    pub fn resize(&mut self, columns: u16, rows: u16) -> bool {
        let width = i32::from(columns).max(Self::MIN_WIDTH);
        let height = i32::from(rows).max(Self::MIN_HEIGHT);
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

/// Scoreboard and counters for one run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunMetrics {
    pub score: u32,
    pub total: u32,
    pub spawned: u32,
    pub destroyed: u32,
    pub reached: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub elapsed_secs: u64,
}

impl RunMetrics {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn quota_left(&self) -> bool {
        self.spawned < self.total
    }

    pub fn handled(&self) -> u32 {
        self.destroyed + self.reached
    }

    /// Side effects of a won interception gate.
    pub fn record_kill(&mut self, points: u32) {
        self.destroyed += 1;
        self.score += points;
        self.shots_hit += 1;
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
    }

    /// Side effects of a won ground gate.
    pub fn record_ground_impact(&mut self) {
        self.reached += 1;
        self.current_streak = 0;
    }

    pub fn record_shot(&mut self) {
        self.shots_fired += 1;
    }

    pub fn revoke_shot(&mut self) {
        self.shots_fired = self.shots_fired.saturating_sub(1);
    }

    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.shots_hit) / f64::from(self.shots_fired)
    }
}

/// Player intent decoded by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Aim(Direction),
    Fire,
    Quit,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InterceptorSnapshot {
    pub position: Position,
    pub direction: Direction,
}

impl From<&Interceptor> for InterceptorSnapshot {
    fn from(i: &Interceptor) -> Self {
        Self {
            position: i.position,
            direction: i.direction,
        }
    }
}

/// Point-in-time view handed to the presentation surface.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub difficulty: &'static str,
    pub layout: Layout,
    pub metrics: RunMetrics,
    pub battery: Battery,
    pub launchers: Vec<Launcher>,
    pub threats: Vec<Position>,
    pub interceptors: Vec<InterceptorSnapshot>,
    pub explosions: Vec<Explosion>,
}

impl Frame {
    pub fn loaded_launchers(&self) -> usize {
        self.launchers.iter().filter(|l| l.loaded).count()
    }
}
