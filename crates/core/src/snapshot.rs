//! Read-only projection of a session for renderers.

use crate::session::{SessionEvent, SessionStats};
use crate::types::{KindId, Pos, Rotation};

/// One on-screen tile with its doors already resolved for its rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleTile {
    pub pos: Pos,
    pub kind: KindId,
    pub rotation: Rotation,
    /// Open edges in `[N, E, S, W]` order.
    pub doors: [bool; 4],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub board_width: u16,
    pub board_height: u16,
    pub view_width: u16,
    pub view_height: u16,
    /// Board coordinate of the top-left visible tile.
    pub origin: Pos,
    pub player: Pos,
    /// Visible tiles, row-major within the window.
    pub tiles: Vec<VisibleTile>,
    pub supply_len: usize,
    pub stats: SessionStats,
    pub last_event: Option<SessionEvent>,
    pub episode: u32,
    pub seed: u32,
    /// Time left until the next random slide; `None` when slides are off.
    pub next_slide_ms: Option<u32>,
}

impl SessionSnapshot {
    /// Tile at window column `col`, row `row`.
    pub fn tile_at(&self, col: u16, row: u16) -> Option<&VisibleTile> {
        if col >= self.view_width || row >= self.view_height {
            return None;
        }
        self.tiles
            .get(row as usize * self.view_width as usize + col as usize)
    }

    /// Player position inside the window, if on screen.
    pub fn player_view_coord(&self) -> Option<(u16, u16)> {
        let x = self.player.x - self.origin.x;
        let y = self.player.y - self.origin.y;
        if x < 0 || y < 0 || x >= self.view_width as i32 || y >= self.view_height as i32 {
            return None;
        }
        Some((x as u16, y as u16))
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.stats = SessionStats::default();
        self.last_event = None;
        self.supply_len = 0;
        self.next_slide_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_outside_window_has_no_view_coord() {
        let snap = SessionSnapshot {
            view_width: 3,
            view_height: 3,
            origin: Pos::new(1, 1),
            player: Pos::new(0, 2),
            ..Default::default()
        };
        assert_eq!(snap.player_view_coord(), None);

        let snap = SessionSnapshot {
            player: Pos::new(3, 2),
            ..snap
        };
        assert_eq!(snap.player_view_coord(), Some((2, 1)));
    }

    #[test]
    fn tile_at_rejects_columns_past_the_window() {
        let snap = SessionSnapshot {
            view_width: 1,
            view_height: 1,
            tiles: vec![VisibleTile {
                pos: Pos::new(0, 0),
                kind: KindId(2),
                rotation: Rotation::R0,
                doors: [false, false, true, true],
            }],
            ..Default::default()
        };
        assert_eq!(snap.tile_at(0, 0).map(|t| t.kind), Some(KindId(2)));
        assert!(snap.tile_at(1, 0).is_none());
    }
}
