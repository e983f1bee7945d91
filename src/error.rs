//! Error types for the cutting optimizer.

use thiserror::Error;

/// Error codes for optimizer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid configuration or request parameter (E100)
    InvalidInput = 100,
    /// No pieces were requested (E101)
    EmptyRequest = 101,
    /// A piece does not fit the stock sheet (E200)
    OversizedPiece = 200,
    /// A produced layout violates its own invariants (E900)
    InternalInconsistency = 900,
    /// The search was cancelled before producing a layout (E901)
    Cancelled = 901,
}

/// Main error type for the optimizer.
#[derive(Debug, Error)]
pub enum CutError {
    #[error("Invalid value for '{parameter}': {message}")]
    InvalidInput { parameter: String, message: String },

    #[error("No pieces requested")]
    EmptyRequest,

    #[error("Piece {piece} ({width} x {height}) does not fit the {sheet_w} x {sheet_h} sheet")]
    OversizedPiece {
        piece: String,
        width: i64,
        height: i64,
        sheet_w: i64,
        sheet_h: i64,
    },

    #[error("Inconsistent layout on sheet {sheet}: {message}")]
    InternalInconsistency { sheet: usize, message: String },

    #[error("Optimization cancelled before any attempt completed")]
    Cancelled,
}

impl CutError {
    /// Build an `InvalidInput` error for a named parameter.
    pub fn invalid(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        CutError::InvalidInput {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CutError::InvalidInput { .. } => ErrorCode::InvalidInput,
            CutError::EmptyRequest => ErrorCode::EmptyRequest,
            CutError::OversizedPiece { .. } => ErrorCode::OversizedPiece,
            CutError::InternalInconsistency { .. } => ErrorCode::InternalInconsistency,
            CutError::Cancelled => ErrorCode::Cancelled,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, CutError>;
