/*!
 * Metrics Module
 * Performance statistics derived from scheduler timelines
 */

mod calculator;
pub mod types;

pub use calculator::MetricsCalculator;
pub use types::{AggregateMetrics, ComparisonRow, MetricsReport, ProcessMetrics};
