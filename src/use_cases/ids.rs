use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-unique, monotonically increasing entity id.
///
/// Ids stay unique across concurrent runs in the same process, so a worker can tell its own
/// entity apart from a later occupant of the same pool slot.
pub fn next_entity_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}
