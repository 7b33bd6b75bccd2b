//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::MazeCommand`]s. Key
//! bindings live here and nowhere else; the core only ever sees commands.

pub mod map;

pub use shifting_maze_types as types;

pub use map::{handle_key_event, should_quit};
