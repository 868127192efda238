/*!
 * Memory Manager
 * Drives a page-reference sequence through a bounded frame set
 */

use super::frames::FrameSet;
use super::replacement::select_victim;
use super::types::{FrameCount, HistoryStep, MemoryReport, ReplacementPolicy};
use crate::core::errors::SimError;
use crate::core::types::{PageId, SimResult};
use ahash::RandomState;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Page-replacement simulator for one policy and frame count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryManager {
    policy: ReplacementPolicy,
    frame_count: FrameCount,
}

impl MemoryManager {
    pub fn new(policy: ReplacementPolicy, frame_count: FrameCount) -> Self {
        Self {
            policy,
            frame_count,
        }
    }

    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count.get()
    }

    /// Simulate `references` left to right
    pub fn simulate(&self, references: &[PageId]) -> SimResult<MemoryReport> {
        if references.is_empty() {
            return Err(SimError::invalid_input("reference sequence is empty"));
        }

        let next_use = next_use_table(references);
        let mut frames = FrameSet::new(self.frame_count.get(), references.len());
        let mut history = Vec::with_capacity(references.len());
        let mut total_faults = 0;
        let mut total_hits = 0;

        for (step, &page) in references.iter().enumerate() {
            let mut evicted = None;
            let fault = match frames.slot_of(page) {
                Some(slot) => {
                    frames.touch(slot, step, next_use[step]);
                    total_hits += 1;
                    false
                }
                None => {
                    if frames.is_full() {
                        let slot = select_victim(self.policy, frames.frames()).ok_or_else(|| {
                            SimError::invalid_input("frame set has no slots to evict")
                        })?;
                        evicted = frames.replace(slot, page, step, next_use[step]);
                        trace!(step, page, slot, evicted = ?evicted, "page replaced");
                    } else {
                        frames.load(page, step, next_use[step]);
                    }
                    total_faults += 1;
                    true
                }
            };

            history.push(HistoryStep {
                step,
                page,
                frames: frames.snapshot(),
                fault,
                evicted,
            });
        }

        let total_references = references.len();
        debug!(
            algorithm = self.policy.as_str(),
            frames = self.frame_count.get(),
            faults = total_faults,
            hits = total_hits,
            "memory simulation finished"
        );

        Ok(MemoryReport {
            algorithm: self.policy,
            frame_count: self.frame_count.get(),
            total_references,
            total_faults,
            total_hits,
            hit_rate: total_hits as f64 / total_references as f64,
            history,
        })
    }
}

/// For each position, the index of the next reference to the same page
fn next_use_table(references: &[PageId]) -> Vec<Option<usize>> {
    let mut upcoming: HashMap<PageId, usize, RandomState> =
        HashMap::with_capacity_and_hasher(references.len(), RandomState::new());
    let mut table = vec![None; references.len()];

    for (index, page) in references.iter().enumerate().rev() {
        table[index] = upcoming.insert(*page, index);
    }
    table
}
