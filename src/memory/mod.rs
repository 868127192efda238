/*!
 * Memory Module
 * Page-replacement simulation over a fixed number of frames
 */

mod frames;
pub mod manager;
mod replacement;
pub mod types;

pub use manager::MemoryManager;
pub use types::{FrameCount, HistoryStep, MemoryReport, MemorySummary, ReplacementPolicy};
