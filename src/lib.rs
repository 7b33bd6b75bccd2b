//! Shifting maze (workspace facade crate).
//!
//! Re-exports the workspace crates as `shifting_maze::{core, input, term, types}`
//! so the binary, benches and integration tests share one import path.

pub use shifting_maze_core as core;
pub use shifting_maze_input as input;
pub use shifting_maze_term as term;
pub use shifting_maze_types as types;
