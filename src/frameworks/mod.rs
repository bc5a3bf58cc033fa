// Frameworks: process bootstrap, environment configuration and the tokio worker spawner.

pub mod config;
pub mod runtime;
pub mod spawner;
