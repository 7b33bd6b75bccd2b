//! Core maze logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the shifting maze: the tile catalog, the
//! tile supply, the board with its line slides, the viewport arithmetic and
//! the session state machine tying them together. It has no dependency on
//! terminal I/O, so it can run headless in tests and benchmarks.
//!
//! - **Deterministic**: the same seed deals the same board and the same slides
//! - **Testable**: bounces are values, not errors
//! - **Portable**: renderers only read a [`SessionSnapshot`]
//!
//! # Module Structure
//!
//! - [`tileset`]: door patterns per tile kind and the counts that fill the bag
//! - [`rng`]: seeded LCG behind every random choice
//! - [`supply`]: the shuffled bag new tiles are drawn from
//! - [`board`]: grid of placed tiles, door queries, line slides
//! - [`viewport`]: on-screen window and centered-move rules
//! - [`session`]: commands, moves, rotations, slides, the slide clock
//! - [`config`]: serde configuration with env overrides
//! - [`error`]: [`MazeError`] and its severity
//!
//! # Example
//!
//! ```
//! use shifting_maze_core::{GameSession, MazeConfig, MoveOutcome};
//! use shifting_maze_types::{Direction, MazeCommand};
//!
//! let mut session = GameSession::new(MazeConfig::standard()).unwrap();
//! let start = session.player();
//!
//! match session.try_move(Direction::North).unwrap() {
//!     MoveOutcome::Moved { .. } => assert_eq!(session.player(), start.step(Direction::North)),
//!     MoveOutcome::Bounced(_) => assert_eq!(session.player(), start),
//! }
//!
//! // Sliding the player's own row keeps the bag the same size.
//! let bag = session.supply().len();
//! session.apply(MazeCommand::SlidePlayerLine(Direction::East)).unwrap();
//! assert_eq!(session.supply().len(), bag);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](session::GameSession::tick) every frame with the
//! elapsed time; a random visible line slides every `slide_interval_ms`.

pub mod board;
pub mod config;
pub mod error;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod supply;
pub mod tileset;
pub mod viewport;

pub use shifting_maze_types as types;

// Re-export commonly used types for convenience
pub use board::{direction_from_u8, Board, DoorSide, SlidePatch};
pub use config::{MazeConfig, TileSetConfig};
pub use error::{ErrorSeverity, MazeError};
pub use rng::SimpleRng;
pub use session::{
    CommandOutcome, GameSession, MoveOutcome, SessionEvent, SessionStats, SlideReport,
};
pub use snapshot::{SessionSnapshot, VisibleTile};
pub use supply::TileSupply;
pub use tileset::{TileKind, TileSet};
pub use viewport::Viewport;
