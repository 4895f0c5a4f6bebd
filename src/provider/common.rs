//! # Common Provider Utilities
//!
//! Span and metric bookkeeping shared by every remote call.

use crate::error::ApimError;
use crate::observability::metrics;
use std::time::{Duration, Instant};
use tracing::Span;

/// Tracks one remote operation from start to finish
///
/// The span is expected to declare `operation.success`,
/// `operation.duration_ms` and `error.message` as empty fields.
#[derive(Debug)]
pub struct OperationTracker {
    start: Instant,
    span: Span,
    resource: &'static str,
    operation: &'static str,
}

impl OperationTracker {
    #[must_use]
    pub fn new(span: Span, resource: &'static str, operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            span,
            resource,
            operation,
        }
    }

    /// Record a completed operation
    pub fn record_success(&self) {
        let duration = self.start.elapsed();
        self.record_span(true, duration);
        metrics::record_remote_operation(self.resource, self.operation, duration.as_secs_f64());
    }

    /// Record a failed operation. Not-found reads count as completed.
    pub fn record_error(&self, error: &ApimError) {
        let duration = self.start.elapsed();
        if error.is_not_found() {
            self.span.record("operation.found", false);
            self.record_span(true, duration);
            metrics::record_remote_operation(self.resource, self.operation, duration.as_secs_f64());
            return;
        }

        self.record_span(false, duration);
        self.span.record("error.message", error.to_string());
        metrics::increment_remote_operation_errors(self.resource);
    }

    /// Record the outcome of `result` and hand it back unchanged
    pub fn finish<T>(&self, result: Result<T, ApimError>) -> Result<T, ApimError> {
        match &result {
            Ok(_) => self.record_success(),
            Err(e) => self.record_error(e),
        }
        result
    }

    fn record_span(&self, success: bool, duration: Duration) {
        self.span.record("operation.success", success);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Remote calls never run for u64::MAX milliseconds"
        )]
        let duration_ms = duration.as_millis() as u64;
        self.span.record("operation.duration_ms", duration_ms);
    }
}
