//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the maze.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Coordinates
//!
//! Board coordinates are `(x, y)` with `x` growing east and `y` growing south.
//! `(0, 0)` is the north-west corner. Storage everywhere is row-major (`y` outer).
//!
//! # Doors and rotation
//!
//! A tile kind lists its doors by *slot*, starting north and proceeding clockwise
//! (`[north, east, south, west]`). A placed tile carries a clockwise [`Rotation`];
//! the door that physically faces direction `d` is slot `(d - rotation) mod 4`.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_SIZE` | 7 | Board width and height in tiles |
//! | `DEFAULT_VIEW_SIZE` | 5 | Viewport width and height in tiles |
//! | `TICK_MS` | 16 | Fixed frame interval of the terminal loop |
//! | `SLIDE_INTERVAL_MS` | 3000 | Time between random line slides |
//!
//! # Examples
//!
//! ```
//! use shifting_maze_types::{Direction, Pos, Rotation};
//!
//! assert_eq!(Direction::North.opposite(), Direction::South);
//! assert_eq!(Pos::new(2, 2).step(Direction::West), Pos::new(1, 2));
//!
//! // A door in slot 0 faces east once the tile is turned a quarter clockwise.
//! assert_eq!(Direction::from_slot(0, Rotation::R90), Direction::East);
//! ```

use std::fmt;

/// Default board width and height in tiles.
pub const DEFAULT_BOARD_SIZE: u16 = 7;

/// Default viewport width and height in tiles.
pub const DEFAULT_VIEW_SIZE: u16 = 5;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Interval between random line slides in milliseconds.
pub const SLIDE_INTERVAL_MS: u32 = 3000;

/// The four cardinal directions, numbered clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Clockwise index: north = 0, east = 1, south = 2, west = 3.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Direction for an index, reduced modulo 4.
    #[inline]
    pub const fn from_index(i: u8) -> Self {
        match i % 4 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    /// `(d + 2) mod 4`
    ///
    /// ```
    /// use shifting_maze_types::Direction;
    ///
    /// for d in Direction::ALL {
    ///     assert_eq!(d.opposite().opposite(), d);
    /// }
    /// assert_eq!(Direction::East.opposite(), Direction::West);
    /// ```
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Unit displacement `(dx, dy)`; north is `y - 1`.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// True for east/west, i.e. moves along a row.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Physical direction that door slot `slot` faces under `rotation`.
    #[inline]
    pub const fn from_slot(slot: u8, rotation: Rotation) -> Self {
        Self::from_index(rotate_index(slot, rotation))
    }

    /// Door slot of an unrotated tile that ends up facing `self` under `rotation`.
    ///
    /// This is `(d - rotation) mod 4`, the inverse of [`Direction::from_slot`].
    #[inline]
    pub const fn slot_under(self, rotation: Rotation) -> u8 {
        (self.index() + 4 - rotation.index()) % 4
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = u8;

    /// Strict conversion: only `0..=3` are directions.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 4 {
            Ok(Self::from_index(value))
        } else {
            Err(value)
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(slot + rotation) mod 4`: where a door slot points after rotating the tile.
#[inline]
pub const fn rotate_index(slot: u8, rotation: Rotation) -> u8 {
    (slot % 4 + rotation.index()) % 4
}

/// Clockwise quarter-turn orientation of a placed tile.
///
/// The rotation cycle goes: R0 → R90 → R180 → R270 → R0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    #[inline]
    pub const fn from_index(i: u8) -> Self {
        match i % 4 {
            0 => Rotation::R0,
            1 => Rotation::R90,
            2 => Rotation::R180,
            _ => Rotation::R270,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use shifting_maze_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotate_cw(), Rotation::R90);
    /// assert_eq!(Rotation::R270.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        self.turned(1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use shifting_maze_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotate_ccw(), Rotation::R270);
    /// assert_eq!(Rotation::R90.rotate_ccw(), Rotation::R0);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        self.turned(-1)
    }

    /// Add `delta` quarter turns, normalized into `0..=3` (negative deltas wrap).
    #[inline]
    pub fn turned(self, delta: i8) -> Self {
        let r = (self.index() as i16 + delta as i16).rem_euclid(4);
        Self::from_index(r as u8)
    }

    /// Degrees clockwise.
    pub const fn degrees(self) -> u16 {
        self.index() as u16 * 90
    }
}

/// Tile-kind identifier in a tile catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KindId(pub u16);

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed tile: kind plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileCell {
    pub kind: KindId,
    pub rotation: Rotation,
}

impl TileCell {
    pub const fn new(kind: KindId, rotation: Rotation) -> Self {
        Self { kind, rotation }
    }

    /// Unrotated cell of `kind`.
    pub const fn of(kind: KindId) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
        }
    }
}

/// Board coordinate. Signed so that steps off the board are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbor one tile away in `direction`.
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle of tiles. The origin may be negative (slide patches
/// start one tile outside the board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Half-open containment: `x <= p.x < x + w`, same for y.
    ///
    /// ```
    /// use shifting_maze_types::{Pos, Rect};
    ///
    /// let r = Rect::new(1, 1, 3, 3);
    /// assert!(r.contains(Pos::new(3, 1)));
    /// assert!(!r.contains(Pos::new(4, 1)));
    /// ```
    pub const fn contains(&self, p: Pos) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceReason {
    /// The target square is off the board.
    BoardEdge,
    /// The player's own tile has a wall in that direction.
    WallHere,
    /// The destination tile has a wall facing back at the player.
    WallBeyond,
}

impl BounceReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BounceReason::BoardEdge => "edge",
            BounceReason::WallHere => "wall_here",
            BounceReason::WallBeyond => "wall_beyond",
        }
    }
}

/// What happened to the player when a line slid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCarry {
    /// The player is not on the slid line.
    DoNotMove,
    /// The player rode their tile one step along the line.
    MoveWithTiles,
    /// The player's tile was pushed off; the player stays on the edge cell.
    StayAsTilesMove,
}

/// Abstract commands produced by an input collaborator.
///
/// These commands are used by both human input and scripted drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeCommand {
    /// Walk one tile if the doors line up
    Move(Direction),
    /// Turn the player's tile by ±1 quarter (positive is clockwise)
    Rotate(i8),
    /// Slide row/column `index` one tile in `direction`
    Slide { direction: Direction, index: u16 },
    /// Slide the row (east/west) or column (north/south) the player stands on
    SlidePlayerLine(Direction),
    /// Let the shift clock run out now
    Wait,
    /// Rebuild the board from the configuration
    Restart,
}

impl MazeCommand {
    /// Parse a command name for scripted drivers.
    ///
    /// # Examples
    ///
    /// ```
    /// use shifting_maze_types::{Direction, MazeCommand};
    ///
    /// assert_eq!(MazeCommand::from_str("moveNorth"), Some(MazeCommand::Move(Direction::North)));
    /// assert_eq!(MazeCommand::from_str("rotateCcw"), Some(MazeCommand::Rotate(-1)));
    /// assert_eq!(MazeCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movenorth" => Some(MazeCommand::Move(Direction::North)),
            "moveeast" => Some(MazeCommand::Move(Direction::East)),
            "movesouth" => Some(MazeCommand::Move(Direction::South)),
            "movewest" => Some(MazeCommand::Move(Direction::West)),
            "rotatecw" => Some(MazeCommand::Rotate(1)),
            "rotateccw" => Some(MazeCommand::Rotate(-1)),
            "wait" => Some(MazeCommand::Wait),
            "restart" => Some(MazeCommand::Restart),
            _ => None,
        }
    }
}
