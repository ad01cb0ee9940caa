//! Errors raised by shape plugins

use thiserror::Error;

/// Shape plugin error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolygonError {
    /// Side length is negative, NaN or infinite
    #[error("invalid side length: {side_length}")]
    InvalidArgument { side_length: f64 },

    /// A measurement was requested before `initialize`
    #[error("{class_type} queried before initialize")]
    NotInitialized { class_type: &'static str },
}

pub type Result<T> = std::result::Result<T, PolygonError>;
