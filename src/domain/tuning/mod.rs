pub mod combat;
pub mod difficulty;

pub use combat::CombatTuning;
pub use difficulty::Difficulty;
