//! Error type shared by every fallible core operation.
//!
//! Expected gameplay outcomes (bounces, walls, board edges) are *not* errors;
//! they are ordinary return values. `MazeError` covers caller mistakes,
//! malformed configuration, and supply exhaustion.

use crate::types::{KindId, Pos};

/// How the orchestrator should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The session can carry on (e.g. skip this slide).
    Recoverable,
    /// Bad wiring or bad configuration; halt or reset the session.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Fatal => "fatal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("position {pos} is outside the board")]
    OutOfBounds { pos: Pos },

    #[error("tile supply is empty")]
    EmptySupply,

    #[error("invalid direction value {0}")]
    InvalidDirection(u8),

    #[error("tile kind {0} is not in the catalog")]
    UnknownKind(KindId),

    #[error("tile kind {0} is defined twice")]
    DuplicateKind(KindId),

    #[error("layout has {actual} tiles, board needs {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("viewport {view_width}x{view_height} does not fit board {board_width}x{board_height}")]
    ViewportTooLarge {
        view_width: u16,
        view_height: u16,
        board_width: u16,
        board_height: u16,
    },

    #[error("start position {pos} is outside the board")]
    InvalidStart { pos: Pos },

    #[error("configuration error: {0}")]
    Config(String),
}

impl MazeError {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptySupply => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Fatal,
        }
    }
}
