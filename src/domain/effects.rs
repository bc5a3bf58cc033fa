// Transient presentation markers fed by the attribution gate.

use crate::domain::state::Position;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Explosion {
    pub position: Position,
    pub frames_left: u8,
}

/// Bounded set of live explosion markers, aged once per render pass.
#[derive(Debug)]
pub struct ExplosionLog {
    markers: Vec<Explosion>,
    capacity: usize,
    lifetime: u8,
}

impl ExplosionLog {
    pub fn new(capacity: usize, lifetime: u8) -> Self {
        Self {
            markers: Vec::with_capacity(capacity),
            capacity,
            lifetime,
        }
    }

    /// Records a marker; dropped silently when the log is full.
    pub fn push(&mut self, position: Position) {
        if self.markers.len() < self.capacity {
            self.markers.push(Explosion {
                position,
                frames_left: self.lifetime,
            });
        }
    }

    pub fn age(&mut self) {
        for marker in &mut self.markers {
            marker.frames_left = marker.frames_left.saturating_sub(1);
        }
        self.markers.retain(|m| m.frames_left > 0);
    }

    pub fn live(&self) -> Vec<Explosion> {
        self.markers.clone()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
