/*!
 * Data Structures
 *
 * Specialized data structures shared by the simulators:
 * - Inline strings for process and resource identifiers
 */

mod inline_string;

pub use inline_string::InlineString;
