//! Evaluation error types.

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluateError {
    /// Actual and predicted sequences differ in length.
    #[error("length mismatch: {actual} actual values vs {predicted} predicted values")]
    LengthMismatch { actual: usize, predicted: usize },

    /// Both sequences are empty.
    #[error("cannot evaluate empty sequences")]
    EmptyInput,

    /// A value is NaN or infinite.
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
