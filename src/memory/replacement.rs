/*!
 * Victim Selection
 * Per-policy choice of the slot to evict from a full frame set
 */

use super::frames::Frame;
use super::types::ReplacementPolicy;
use std::cmp::Reverse;

/// Slot to evict, or `None` for an empty frame set
///
/// Ties go to the lowest slot. Under `Optimal` a page that is never
/// referenced again ranks after every page that is.
pub(super) fn select_victim(policy: ReplacementPolicy, frames: &[Frame]) -> Option<usize> {
    let slots = frames.iter().enumerate();
    let victim = match policy {
        ReplacementPolicy::Fifo => slots.min_by_key(|(_, f)| f.loaded_at),
        ReplacementPolicy::Lru => slots.min_by_key(|(_, f)| f.last_used),
        ReplacementPolicy::Optimal => {
            slots.min_by_key(|(_, f)| Reverse(f.next_use.unwrap_or(usize::MAX)))
        }
    };
    victim.map(|(slot, _)| slot)
}
