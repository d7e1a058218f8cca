//! Admission control.

/// Free slots under the concurrency cap: `max(0, cap - running)`.
///
/// The running count is a point-in-time snapshot; a cap overshoot (manual
/// intervention, a concurrent trigger) yields zero slots, never a negative
/// number.
pub fn available_slots(cap: i64, running: i64) -> i64 {
    (cap - running).max(0)
}
