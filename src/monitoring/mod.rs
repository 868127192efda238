/*!
 * Monitoring
 * Structured tracing for simulator operations
 */

mod tracer;

pub use tracer::{generate_trace_id, init_tracing, span_operation, OperationSpan, TracingConfig};
