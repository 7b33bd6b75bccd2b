//! Viewport - the window of the board that is on screen
//!
//! The viewport decides whether a player step is "centered" (the window
//! scrolls and the player stays in the middle) or "free" (the window stays put
//! and the player walks towards its edge). The decision is a point test
//! against the centered-move rectangle
//! `[vw/2, bw - vw + vw/2] x [vh/2, bh - vh + vh/2]`, using integer division.

use crate::error::MazeError;
use crate::types::{Direction, Pos, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    board_width: u16,
    board_height: u16,
    /// Board coordinate of the top-left visible tile.
    origin: Pos,
}

impl Viewport {
    /// A `width x height` window over a `board_width x board_height` board,
    /// centered on the board.
    pub fn new(
        width: u16,
        height: u16,
        board_width: u16,
        board_height: u16,
    ) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if board_width == 0 || board_height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: board_width,
                height: board_height,
            });
        }
        if width > board_width || height > board_height {
            return Err(MazeError::ViewportTooLarge {
                view_width: width,
                view_height: height,
                board_width,
                board_height,
            });
        }
        let origin = Pos::new(
            (board_width - width) as i32 / 2,
            (board_height - height) as i32 / 2,
        );
        Ok(Self {
            width,
            height,
            board_width,
            board_height,
            origin,
        })
    }

    /// Same window with an explicit origin. The whole window must stay on the
    /// board.
    pub fn with_origin(mut self, origin: Pos) -> Result<Self, MazeError> {
        if origin.x < 0 || origin.y < 0 || origin.x > self.max_x() || origin.y > self.max_y() {
            return Err(MazeError::OutOfBounds { pos: origin });
        }
        self.origin = origin;
        Ok(self)
    }

    /// Same window, placed so that `pos` is as close to the middle as the
    /// board edges allow.
    pub fn centered_on(mut self, pos: Pos) -> Self {
        let x = pos.x - (self.width / 2) as i32;
        let y = pos.y - (self.height / 2) as i32;
        self.origin = Pos::new(x.clamp(0, self.max_x()), y.clamp(0, self.max_y()));
        self
    }

    fn max_x(&self) -> i32 {
        (self.board_width - self.width) as i32
    }

    fn max_y(&self) -> i32 {
        (self.board_height - self.height) as i32
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    /// Board tiles currently on screen.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.width as u32,
            self.height as u32,
        )
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.visible_rect().contains(pos)
    }

    /// Player positions for which the window can scroll instead of the player
    /// moving on screen.
    pub fn centered_move_rect(&self) -> Rect {
        Rect::new(
            (self.width / 2) as i32,
            (self.height / 2) as i32,
            (self.board_width - self.width) as u32 + 1,
            (self.board_height - self.height) as u32 + 1,
        )
    }

    /// Would a step from `pos` towards `direction` scroll the window?
    ///
    /// Only the axis of movement is tested; the other coordinate is pinned to
    /// the board midpoint, so a player in a corner column can still scroll
    /// vertically.
    pub fn is_centered_move(&self, pos: Pos, direction: Direction) -> bool {
        let rect = self.centered_move_rect();
        let mid = Pos::new(
            (self.board_width / 2) as i32,
            (self.board_height / 2) as i32,
        );
        let next = pos.step(direction);
        if direction.is_horizontal() {
            rect.contains(Pos::new(pos.x, mid.y)) && rect.contains(Pos::new(next.x, mid.y))
        } else {
            rect.contains(Pos::new(mid.x, pos.y)) && rect.contains(Pos::new(mid.x, next.y))
        }
    }

    /// Scroll the window one tile towards `direction`. Returns `false` (and
    /// leaves the origin alone) if that would uncover space off the board.
    pub fn translate(&mut self, direction: Direction) -> bool {
        let next = self.origin.step(direction);
        if next.x < 0 || next.y < 0 || next.x > self.max_x() || next.y > self.max_y() {
            return false;
        }
        self.origin = next;
        true
    }

    /// Strip of board tiles that scrolls into view if the window moves one
    /// tile towards `direction`.
    pub fn exposed_by_translate(&self, direction: Direction) -> Rect {
        let Pos { x, y } = self.origin;
        let (w, h) = (self.width as i32, self.height as i32);
        match direction {
            Direction::North => Rect::new(x, y - 1, w as u32, 1),
            Direction::South => Rect::new(x, y + h, w as u32, 1),
            Direction::West => Rect::new(x - 1, y, 1, h as u32),
            Direction::East => Rect::new(x + w, y, 1, h as u32),
        }
    }

    /// Position of `pos` inside the window, or `None` if it is not visible.
    pub fn to_view_coord(&self, pos: Pos) -> Option<(u16, u16)> {
        if !self.contains(pos) {
            return None;
        }
        Some((
            (pos.x - self.origin.x) as u16,
            (pos.y - self.origin.y) as u16,
        ))
    }

    /// Inverse of [`Viewport::to_view_coord`].
    pub fn to_board_pos(&self, col: u16, row: u16) -> Pos {
        Pos::new(self.origin.x + col as i32, self.origin.y + row as i32)
    }
}
