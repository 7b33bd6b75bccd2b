//! Board module - manages the grid of placed tiles
//!
//! The board is a `width x height` grid where each cell holds a tile kind and
//! its rotation. Uses a flat row-major vector (`y * width + x`).
//! Coordinates: `(x, y)` with x growing east and y growing south.
//!
//! The signature operation is [`Board::slide_line`]: a whole row or column
//! moves one tile, a fresh tile from the supply enters at the edge the line
//! moves away from, and the tile pushed over the opposite edge goes back into
//! the supply.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::MazeError;
use crate::supply::TileSupply;
use crate::tileset::TileSet;
use crate::types::{Direction, KindId, Pos, Rect, Rotation, TileCell};

/// Which door a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorSide {
    /// The door of the tile at `pos`, facing `direction`.
    Here,
    /// The door of the neighbor in `direction`, facing back towards `pos`.
    /// Off the board there is no tile, so there is never a door.
    Beyond,
}

/// Result of a line slide, for renderers that animate the shifted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePatch {
    pub direction: Direction,
    /// Row for east/west slides, column for north/south slides.
    pub index: u16,
    /// Board-space rectangle of `cells`. One tile longer than the line, so it
    /// starts at -1 for east/south slides.
    pub rect: Rect,
    /// Line contents before the write-back, including the injected tile and
    /// the tile that was pushed off, ordered by increasing board coordinate.
    pub cells: Vec<TileCell>,
    /// Tile drawn from the supply.
    pub injected: TileCell,
    /// Tile pushed off the board and returned to the supply.
    pub ejected: TileCell,
}

/// Strict conversion of a raw direction value (`0..=3`, clockwise from north).
pub fn direction_from_u8(value: u8) -> Result<Direction, MazeError> {
    Direction::try_from(value).map_err(MazeError::InvalidDirection)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<TileCell>,
}

impl Board {
    fn check_dimensions(width: u16, height: u16) -> Result<(), MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// Fill a board from the supply, each tile with an independent random
    /// rotation.
    pub fn from_supply(
        width: u16,
        height: u16,
        supply: &mut TileSupply,
    ) -> Result<Self, MazeError> {
        Self::check_dimensions(width, height)?;
        let size = width as usize * height as usize;
        let kinds = supply.draw_many(size)?;
        let cells = kinds
            .into_iter()
            .map(|kind| TileCell::new(kind, supply.roll_rotation()))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Fixed layout of kind ids in row-major order, all unrotated.
    pub fn from_layout(width: u16, height: u16, layout: &[KindId]) -> Result<Self, MazeError> {
        Self::check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if layout.len() != expected {
            return Err(MazeError::DimensionMismatch {
                expected,
                actual: layout.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells: layout.iter().copied().map(TileCell::of).collect(),
        })
    }

    /// Fixed layout with explicit rotations, row-major.
    pub fn from_cells(width: u16, height: u16, cells: Vec<TileCell>) -> Result<Self, MazeError> {
        Self::check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(MazeError::DimensionMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Cell at `pos`, or `None` off the board.
    pub fn cell(&self, pos: Pos) -> Option<TileCell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[TileCell] {
        &self.cells
    }

    /// Overwrite a cell.
    pub fn place_tile(
        &mut self,
        pos: Pos,
        kind: KindId,
        rotation: Rotation,
    ) -> Result<(), MazeError> {
        let i = self.index(pos).ok_or(MazeError::OutOfBounds { pos })?;
        self.cells[i] = TileCell::new(kind, rotation);
        Ok(())
    }

    /// Turn the tile at `pos` by `delta` quarters (positive is clockwise) and
    /// return its new rotation.
    pub fn rotate_tile(&mut self, pos: Pos, delta: i8) -> Result<Rotation, MazeError> {
        let i = self.index(pos).ok_or(MazeError::OutOfBounds { pos })?;
        let cell = &mut self.cells[i];
        cell.rotation = cell.rotation.turned(delta);
        Ok(cell.rotation)
    }

    /// Is there a door facing `direction` at `pos` (or, for
    /// [`DoorSide::Beyond`], on the far side of that edge)?
    ///
    /// `pos` itself must be on the board. A neighbor off the board counts as
    /// solid wall.
    pub fn has_door(
        &self,
        tiles: &TileSet,
        pos: Pos,
        direction: Direction,
        side: DoorSide,
    ) -> Result<bool, MazeError> {
        let here = self.cell(pos).ok_or(MazeError::OutOfBounds { pos })?;
        let (cell, facing) = match side {
            DoorSide::Here => (here, direction),
            DoorSide::Beyond => match self.cell(pos.step(direction)) {
                Some(next) => (next, direction.opposite()),
                None => return Ok(false),
            },
        };
        Ok(tiles.get(cell.kind)?.has_door(cell.rotation, facing))
    }

    /// Flat indices of the row (east/west) or column (north/south) `index`,
    /// by increasing coordinate.
    fn line_indices(&self, direction: Direction, index: u16) -> Result<Vec<usize>, MazeError> {
        let w = self.width as usize;
        if direction.is_horizontal() {
            if index >= self.height {
                return Err(MazeError::OutOfBounds {
                    pos: Pos::new(0, index as i32),
                });
            }
            let start = index as usize * w;
            Ok((start..start + w).collect())
        } else {
            if index >= self.width {
                return Err(MazeError::OutOfBounds {
                    pos: Pos::new(index as i32, 0),
                });
            }
            Ok((0..self.height as usize)
                .map(|y| y * w + index as usize)
                .collect())
        }
    }

    /// Contents of the row (east/west) or column (north/south) `index`.
    pub fn line(&self, direction: Direction, index: u16) -> Result<Vec<TileCell>, MazeError> {
        Ok(self
            .line_indices(direction, index)?
            .into_iter()
            .map(|i| self.cells[i])
            .collect())
    }

    /// Slide row or column `index` one tile towards `direction`.
    ///
    /// The new tile is drawn before anything moves, so an empty supply leaves
    /// the board untouched. On a 1x1 board the single tile is simply swapped
    /// for a fresh one.
    pub fn slide_line(
        &mut self,
        direction: Direction,
        index: u16,
        supply: &mut TileSupply,
    ) -> Result<SlidePatch, MazeError> {
        let line = self.line_indices(direction, index)?;
        let len = line.len();
        let injected = supply.draw_placement()?;

        // West/north slides push the tile at coordinate 0 off and take the new
        // tile in at the far end; east/south is the mirror image.
        let toward_origin = matches!(direction, Direction::West | Direction::North);

        let mut buffer = Vec::with_capacity(len + 1);
        let ejected = if toward_origin {
            buffer.extend(line.iter().map(|&i| self.cells[i]));
            buffer.push(injected);
            for (slot, &i) in line.iter().enumerate() {
                self.cells[i] = buffer[slot + 1];
            }
            buffer[0]
        } else {
            buffer.push(injected);
            buffer.extend(line.iter().map(|&i| self.cells[i]));
            for (slot, &i) in line.iter().enumerate() {
                self.cells[i] = buffer[slot];
            }
            buffer[len]
        };

        supply.return_tile(ejected.kind);

        let start = if toward_origin { 0 } else { -1 };
        let rect = if direction.is_horizontal() {
            Rect::new(start, index as i32, len as u32 + 1, 1)
        } else {
            Rect::new(index as i32, start, 1, len as u32 + 1)
        };

        Ok(SlidePatch {
            direction,
            index,
            rect,
            cells: buffer,
            injected,
            ejected,
        })
    }

    /// Check that every cell refers to a kind in `tiles`.
    pub fn validate_kinds(&self, tiles: &TileSet) -> Result<(), MazeError> {
        for cell in &self.cells {
            tiles.get(cell.kind)?;
        }
        Ok(())
    }

    /// Number of placed tiles per kind.
    pub fn kind_counts(&self) -> BTreeMap<KindId, usize> {
        let mut counts = BTreeMap::new();
        for cell in &self.cells {
            *counts.entry(cell.kind).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board layout: {} x {} tiles", self.width, self.height)?;
        for row in self.cells.chunks(self.width as usize) {
            let kinds: Vec<String> = row.iter().map(|c| c.kind.to_string()).collect();
            let rots: String = row
                .iter()
                .map(|c| char::from(b'0' + c.rotation.index()))
                .collect();
            writeln!(f, "{} {}", kinds.join(""), rots)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u16, height: u16) -> Board {
        let layout: Vec<KindId> = (0..width * height).map(KindId).collect();
        Board::from_layout(width, height, &layout).unwrap()
    }

    fn kinds(cells: &[TileCell]) -> Vec<u16> {
        cells.iter().map(|c| c.kind.0).collect()
    }

    #[test]
    fn test_board_index_calculation() {
        let board = numbered(3, 2);
        assert_eq!(board.index(Pos::new(0, 0)), Some(0));
        assert_eq!(board.index(Pos::new(2, 0)), Some(2));
        assert_eq!(board.index(Pos::new(0, 1)), Some(3));
        assert_eq!(board.index(Pos::new(-1, 0)), None);
        assert_eq!(board.index(Pos::new(3, 0)), None);
        assert_eq!(board.index(Pos::new(0, 2)), None);
    }

    #[test]
    fn layout_length_must_match() {
        let err = Board::from_layout(2, 2, &[KindId(0); 3]).unwrap_err();
        assert_eq!(
            err,
            MazeError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn from_cells_keeps_rotations() {
        let cells = vec![
            TileCell::new(KindId(1), Rotation::R90),
            TileCell::new(KindId(2), Rotation::R180),
        ];
        let board = Board::from_cells(2, 1, cells.clone()).unwrap();
        assert_eq!(board.cells(), cells.as_slice());
        assert!(Board::from_cells(1, 1, cells).is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Board::from_layout(0, 3, &[]),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn slide_west_shifts_row_and_injects_at_east_end() {
        let mut board = numbered(3, 3);
        let mut supply = TileSupply::new([(KindId(99), 1)], 1);

        let patch = board.slide_line(Direction::West, 1, &mut supply).unwrap();

        assert_eq!(kinds(&board.line(Direction::West, 1).unwrap()), vec![4, 5, 99]);
        assert_eq!(patch.rect, Rect::new(0, 1, 4, 1));
        assert_eq!(kinds(&patch.cells), vec![3, 4, 5, 99]);
        assert_eq!(patch.ejected.kind, KindId(3));
        assert_eq!(supply.tiles(), &[KindId(3)]);
        // Other rows untouched.
        assert_eq!(kinds(&board.line(Direction::East, 0).unwrap()), vec![0, 1, 2]);
    }

    #[test]
    fn slide_east_injects_at_west_end() {
        let mut board = numbered(3, 3);
        let mut supply = TileSupply::new([(KindId(99), 1)], 1);

        let patch = board.slide_line(Direction::East, 0, &mut supply).unwrap();

        assert_eq!(kinds(&board.line(Direction::East, 0).unwrap()), vec![99, 0, 1]);
        assert_eq!(patch.rect, Rect::new(-1, 0, 4, 1));
        assert_eq!(patch.ejected.kind, KindId(2));
    }

    #[test]
    fn slide_north_and_south_move_columns() {
        let mut board = numbered(3, 3);
        let mut supply = TileSupply::new([(KindId(50), 1), (KindId(60), 0)], 1);

        let patch = board.slide_line(Direction::North, 2, &mut supply).unwrap();
        assert_eq!(kinds(&board.line(Direction::North, 2).unwrap()), vec![5, 8, 50]);
        assert_eq!(patch.rect, Rect::new(2, 0, 1, 4));
        assert_eq!(patch.ejected.kind, KindId(2));

        let patch = board.slide_line(Direction::South, 2, &mut supply).unwrap();
        // The bag only held the tile just pushed off.
        assert_eq!(patch.injected.kind, KindId(2));
        assert_eq!(kinds(&board.line(Direction::South, 2).unwrap()), vec![2, 5, 8]);
        assert_eq!(patch.rect, Rect::new(2, -1, 1, 4));
        assert_eq!(patch.ejected.kind, KindId(50));
    }

    #[test]
    fn slide_index_out_of_range() {
        let mut board = numbered(3, 2);
        let mut supply = TileSupply::new([(KindId(1), 4)], 1);
        assert!(matches!(
            board.slide_line(Direction::East, 2, &mut supply),
            Err(MazeError::OutOfBounds { .. })
        ));
        assert!(board.slide_line(Direction::South, 2, &mut supply).is_ok());
        assert!(board.slide_line(Direction::South, 3, &mut supply).is_err());
    }

    #[test]
    fn slide_with_empty_supply_leaves_board_alone() {
        let mut board = numbered(2, 2);
        let before = board.clone();
        let mut supply = TileSupply::new([(KindId(0), 0)], 1);
        assert_eq!(
            board.slide_line(Direction::West, 0, &mut supply),
            Err(MazeError::EmptySupply)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn one_by_one_board_cycles_through_supply() {
        let mut board = Board::from_layout(1, 1, &[KindId(7)]).unwrap();
        let mut supply = TileSupply::new([(KindId(8), 1)], 1);

        let patch = board.slide_line(Direction::North, 0, &mut supply).unwrap();

        assert_eq!(board.cell(Pos::new(0, 0)).unwrap().kind, KindId(8));
        assert_eq!(patch.cells.len(), 2);
        assert_eq!(supply.tiles(), &[KindId(7)]);
    }

    #[test]
    fn rotate_normalizes_negative_deltas() {
        let mut board = numbered(2, 2);
        let p = Pos::new(1, 1);
        assert_eq!(board.rotate_tile(p, -1).unwrap(), Rotation::R270);
        assert_eq!(board.rotate_tile(p, 1).unwrap(), Rotation::R0);
        assert!(board.rotate_tile(Pos::new(2, 0), 1).is_err());
    }

    #[test]
    fn display_lists_kinds_and_rotations() {
        let mut board = numbered(2, 1);
        board.rotate_tile(Pos::new(1, 0), 1).unwrap();
        assert_eq!(board.to_string(), "Board layout: 2 x 1 tiles\n01 01\n");
    }

    #[test]
    fn direction_from_u8_rejects_garbage() {
        assert_eq!(direction_from_u8(3), Ok(Direction::West));
        assert_eq!(direction_from_u8(9), Err(MazeError::InvalidDirection(9)));
    }
}
