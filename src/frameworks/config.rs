use crate::domain::tuning::Difficulty;
use std::env;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// Runtime constants (not gameplay tuning).

pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(2);
pub const THREAT_CAPACITY: usize = 80;
pub const INTERCEPTOR_CAPACITY: usize = 150;
pub const MAX_LAUNCHERS: usize = 15;

/// Resolves the tier from the first CLI argument, then `SKYSHIELD_DIFFICULTY`.
///
/// Unparseable or out-of-range selections fall back to Medium with a warning.
pub fn difficulty(arg: Option<&str>) -> Difficulty {
    let env_value = env::var("SKYSHIELD_DIFFICULTY").ok();
    let Some(raw) = arg.or(env_value.as_deref()) else {
        return Difficulty::default();
    };
    parse_difficulty(raw).unwrap_or_else(|| {
        tracing::warn!(value = raw, "unknown difficulty; using Medium");
        Difficulty::default()
    })
}

fn parse_difficulty(raw: &str) -> Option<Difficulty> {
    raw.trim().parse::<u8>().ok().and_then(Difficulty::from_level)
}

pub fn seed() -> u64 {
    env::var("SKYSHIELD_SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(clock_seed)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

pub fn json_report() -> bool {
    matches!(env::var("REPORT_FORMAT").as_deref(), Ok("json"))
}

pub fn json_logs() -> bool {
    matches!(env::var("LOG_FORMAT").as_deref(), Ok("json"))
}

pub fn log_file() -> Option<String> {
    env::var("SKYSHIELD_LOG_FILE")
        .ok()
        .filter(|path| !path.is_empty())
}
