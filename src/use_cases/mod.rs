// Use cases layer: the concurrent simulation core and its workers.

pub mod ids;
pub mod input;
pub mod interceptor;
pub mod launcher;
pub mod orchestrator;
pub mod pool;
pub mod render;
pub mod run_token;
pub mod session;
pub mod shutdown;
pub mod threat;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

pub use input::apply_intent;
pub use interceptor::fire;
pub use run_token::RunToken;
pub use session::{Session, SessionSettings};
pub use shutdown::{shutdown, signal_termination};
pub use threat::spawn_threat;
pub use world::{World, WorldSettings};
