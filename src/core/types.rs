/*!
 * Core Types
 * Common types used across the simulators
 */

use super::data_structures::InlineString;

/// Process identifier (caller-supplied, unique within a run)
pub type Pid = InlineString;

/// Resource identifier in a resource-allocation graph
pub type ResourceId = InlineString;

/// Simulated time instant or duration, in abstract ticks
pub type Ticks = u64;

/// Page identifier in a reference sequence
pub type PageId = i64;

/// Process priority (lower number = more urgent)
pub type Priority = i64;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;
