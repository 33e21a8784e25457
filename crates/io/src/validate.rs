//! Accumulated validation.
//!
//! Provides [`ValidationCollector`] for gathering every problem found in an
//! input file into a single [`IoError::Validation`].

use crate::error::IoError;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}
