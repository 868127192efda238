/*!
 * Frame Set
 * Bounded slot array of resident pages with replacement metadata
 */

use crate::core::types::PageId;

/// One occupied frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Frame {
    pub page: PageId,
    /// Step at which the page was (re)loaded
    pub loaded_at: usize,
    /// Step of the most recent reference
    pub last_used: usize,
    /// Index of the next reference after `last_used`, if any
    pub next_use: Option<usize>,
}

/// Resident pages, never more than `capacity`
#[derive(Debug)]
pub(super) struct FrameSet {
    frames: Vec<Frame>,
    capacity: usize,
}

impl FrameSet {
    /// Empty set of `capacity` slots for a run of `references` steps
    ///
    /// At most one page is loaded per step, so storage is sized by the
    /// smaller of the two.
    pub fn new(capacity: usize, references: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity.min(references)),
            capacity,
        }
    }

    #[inline]
    pub fn slot_of(&self, page: PageId) -> Option<usize> {
        self.frames.iter().position(|f| f.page == page)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.capacity
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Record a hit on `slot`
    pub fn touch(&mut self, slot: usize, step: usize, next_use: Option<usize>) {
        if let Some(frame) = self.frames.get_mut(slot) {
            frame.last_used = step;
            frame.next_use = next_use;
        }
    }

    /// Load into the next free slot; the caller checks `is_full` first
    pub fn load(&mut self, page: PageId, step: usize, next_use: Option<usize>) {
        debug_assert!(!self.is_full(), "load into a full frame set");
        self.frames.push(Frame {
            page,
            loaded_at: step,
            last_used: step,
            next_use,
        });
    }

    /// Replace the page in `slot` and return the evicted page
    pub fn replace(
        &mut self,
        slot: usize,
        page: PageId,
        step: usize,
        next_use: Option<usize>,
    ) -> Option<PageId> {
        let frame = self.frames.get_mut(slot)?;
        let evicted = frame.page;
        *frame = Frame {
            page,
            loaded_at: step,
            last_used: step,
            next_use,
        };
        Some(evicted)
    }

    pub fn snapshot(&self) -> Vec<PageId> {
        self.frames.iter().map(|f| f.page).collect()
    }
}
