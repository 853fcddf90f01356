use thiserror::Error;

/// Errors raised by the trainer outside of the flip-flop transitions themselves.
///
/// Transitions never fail; these variants cover external data (numbers parsed
/// into bits, register indices from callers) and the I/O around configuration,
/// preferences and the front-ends.
#[derive(Debug, Error)]
pub enum LabError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid bit value {0}, expected 0 or 1")]
    InvalidBit(u8),
    #[error("register index {index} out of range for {len}-bit register")]
    BitIndex { index: usize, len: usize },
    #[error("failed to initialise logging: {0}")]
    Logging(String),
    #[error("front-end failure: {0}")]
    Frontend(String),
}

pub type Result<T> = std::result::Result<T, LabError>;
