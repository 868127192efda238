/*!
 * Memory Types
 * Page-replacement policies, history steps and reports
 */

use crate::core::errors::SimError;
use crate::core::limits::MIN_MEMORY_FRAMES;
use crate::core::types::{PageId, SimResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Page-replacement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplacementPolicy {
    /// Evict the page resident longest
    Fifo,
    /// Evict the page referenced least recently
    Lru,
    /// Evict the page whose next reference is furthest away (Belady)
    Optimal,
}

impl ReplacementPolicy {
    pub const ALL: [ReplacementPolicy; 3] = [
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Lru,
        ReplacementPolicy::Optimal,
    ];

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Optimal => "OPTIMAL",
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "lru" => Ok(Self::Lru),
            "optimal" | "opt" => Ok(Self::Optimal),
            _ => Err(SimError::unknown_policy(format!(
                "page replacement algorithm '{}' (valid: fifo, lru, optimal)",
                s
            ))),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReplacementPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReplacementPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Number of physical frames, at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrameCount(usize);

impl FrameCount {
    pub fn new(count: i64) -> SimResult<Self> {
        if count < MIN_MEMORY_FRAMES as i64 {
            return Err(SimError::invalid_input(format!(
                "frame count must be a positive integer (got {})",
                count
            )));
        }
        usize::try_from(count)
            .map(Self)
            .map_err(|_| SimError::invalid_input(format!("frame count {} is too large", count)))
    }

    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl<'de> Deserialize<'de> for FrameCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let count = i64::deserialize(deserializer)?;
        Self::new(count).map_err(serde::de::Error::custom)
    }
}

/// State after processing one reference
///
/// `frames` is indexed by slot: a page loaded on a fault takes the evicted
/// page's slot (or the first free one), so other slots keep their position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStep {
    pub step: usize,
    pub page: PageId,
    pub frames: Vec<PageId>,
    pub fault: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub evicted: Option<PageId>,
}

/// Result of one page-replacement simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryReport {
    pub algorithm: ReplacementPolicy,
    pub frame_count: usize,
    pub total_references: usize,
    pub total_faults: usize,
    pub total_hits: usize,
    /// hits ÷ references, in [0, 1]
    pub hit_rate: f64,
    pub history: Vec<HistoryStep>,
}

impl MemoryReport {
    pub fn summary(&self) -> MemorySummary {
        MemorySummary {
            algorithm: self.algorithm,
            total_faults: self.total_faults,
            total_hits: self.total_hits,
            hit_rate: self.hit_rate,
        }
    }
}

/// Fault/hit totals without the step history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemorySummary {
    pub algorithm: ReplacementPolicy,
    pub total_faults: usize,
    pub total_hits: usize,
    pub hit_rate: f64,
}
