//! Terminal maze renderer.
//!
//! Renders a [`core::SessionSnapshot`] into a character framebuffer and
//! flushes it to the terminal with `crossterm`. No widget library; tiles are
//! plain blocks of glyphs so their door gaps line up exactly.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use shifting_maze_core as core;
pub use shifting_maze_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_glyph, GameView, Screen};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
