//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Every visible tile is drawn as a `tile_w x tile_h` block: the outer ring is
//! wall, the inside is floor, and each open door cuts a gap into the middle of
//! its wall.

use crate::core::{SessionEvent, SessionSnapshot, VisibleTile};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Direction, KindId, PlayerCarry};

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const WALL: char = '█';
const FLOOR: char = ' ';
const PLAYER: char = '@';

const FLOOR_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal renderer for the maze window.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 6x3 keeps tiles roughly square in most terminal fonts.
        Self {
            tile_w: 6,
            tile_h: 3,
        }
    }
}

impl GameView {
    /// Tiles smaller than 3x3 cannot show a door gap, so sizes are clamped.
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(3),
            tile_h: tile_h.max(3),
        }
    }

    /// Outer size of the framed maze window, border included.
    pub fn frame_size(&self, snap: &SessionSnapshot) -> (u16, u16) {
        (
            snap.view_width.saturating_mul(self.tile_w).saturating_add(2),
            snap.view_height.saturating_mul(self.tile_h).saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, resizing it to `screen`.
    pub fn render_into(&self, snap: &SessionSnapshot, screen: Screen, fb: &mut FrameBuffer) {
        fb.resize(screen.width, screen.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = screen.width.saturating_sub(frame_w.saturating_add(PANEL_MIN_W)) / 2;
        let start_y = screen.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::BLACK);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.view_height {
            let py = cell_origin(start_y, row, self.tile_h);
            if py >= screen.height {
                break;
            }
            for col in 0..snap.view_width {
                let px = cell_origin(start_x, col, self.tile_w);
                if px >= screen.width {
                    break;
                }
                match snap.tile_at(col, row) {
                    Some(tile) => self.draw_tile(fb, px, py, tile),
                    None => {
                        let style = CellStyle::plain(Rgb::new(90, 90, 100), FLOOR_BG).dim();
                        fb.fill_rect(px, py, self.tile_w, self.tile_h, '·', style);
                    }
                }
            }
        }

        if let Some((col, row)) = snap.player_view_coord() {
            let px = cell_origin(start_x, col, self.tile_w).saturating_add(self.tile_w / 2);
            let py = cell_origin(start_y, row, self.tile_h).saturating_add(self.tile_h / 2);
            let style = CellStyle::plain(Rgb::new(255, 255, 255), FLOOR_BG).bold();
            fb.put_char(px, py, PLAYER, style);
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, screen, panel_x, start_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, screen: Screen) -> FrameBuffer {
        let mut fb = FrameBuffer::new(screen.width, screen.height);
        self.render_into(snap, screen, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        // Clip to the buffer so oversized frames stay cheap.
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        for cx in x + 1..right.min(fb.width()) {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom.min(fb.height()) {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, px: u16, py: u16, tile: &VisibleTile) {
        let wall = CellStyle::plain(kind_color(tile.kind), FLOOR_BG);
        let floor = CellStyle::plain(Rgb::new(90, 90, 100), FLOOR_BG);
        for dy in 0..self.tile_h {
            for dx in 0..self.tile_w {
                let ch = tile_glyph(tile.doors, dx, dy, self.tile_w, self.tile_h);
                let style = if ch == WALL { wall } else { floor };
                fb.put_char(px.saturating_add(dx), py.saturating_add(dy), ch, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        screen: Screen,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= screen.width || screen.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::BLACK);
        let vx = panel_x + 7;
        let mut y = start_y;

        fb.put_str(panel_x, y, "MAZE", label);
        fb.put_u32(vx, y, snap.board_width as u32, value);
        let x = fb.put_str(vx + digits(snap.board_width as u32), y, "x", value);
        fb.put_u32(x, y, snap.board_height as u32, value);
        y += 2;

        fb.put_str(panel_x, y, "POS", label);
        let x = fb.put_i32(vx, y, snap.player.x, value);
        let x = fb.put_str(x, y, ",", value);
        fb.put_i32(x, y, snap.player.y, value);
        y += 1;

        fb.put_str(panel_x, y, "VIEW", label);
        let x = fb.put_i32(vx, y, snap.origin.x, value);
        let x = fb.put_str(x, y, ",", value);
        fb.put_i32(x, y, snap.origin.y, value);
        y += 1;

        fb.put_str(panel_x, y, "BAG", label);
        fb.put_u32(vx, y, snap.supply_len as u32, value);
        y += 2;

        for (name, n) in [
            ("MOVES", snap.stats.moves),
            ("BUMPS", snap.stats.bounces),
            ("TURNS", snap.stats.rotations),
            ("SLIDES", snap.stats.slides),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(vx, y, n, value);
            y += 1;
        }
        y += 1;

        fb.put_str(panel_x, y, "NEXT", label);
        match snap.next_slide_ms {
            Some(ms) => {
                let x = fb.put_u32(vx, y, ms, value);
                fb.put_str(x, y, "ms", value.dim());
            }
            None => {
                fb.put_str(vx, y, "off", value.dim());
            }
        }
        y += 2;

        if let Some(event) = snap.last_event {
            if y < screen.height {
                draw_event(fb, panel_x, y, event, value);
            }
        }
    }
}

/// Screen coordinate of tile `i` along one axis, inside the frame border.
fn cell_origin(start: u16, i: u16, tile: u16) -> u16 {
    start.saturating_add(1).saturating_add(i.saturating_mul(tile))
}

/// Narrowest side panel worth drawing.
const PANEL_MIN_W: u16 = 16;

/// Wall or floor for the cell at `(dx, dy)` inside a `w x h` tile.
///
/// Door gaps are centered: one cell wide on odd sides, two on even ones.
pub fn tile_glyph(doors: [bool; 4], dx: u16, dy: u16, w: u16, h: u16) -> char {
    let in_gap = |i: u16, len: u16| i >= (len - 1) / 2 && i <= len / 2;
    let top = dy == 0;
    let bottom = dy + 1 == h;
    let left = dx == 0;
    let right = dx + 1 == w;

    if (top || bottom) && (left || right) {
        return WALL;
    }
    let open = if top {
        doors[Direction::North.index() as usize] && in_gap(dx, w)
    } else if bottom {
        doors[Direction::South.index() as usize] && in_gap(dx, w)
    } else if left {
        doors[Direction::West.index() as usize] && in_gap(dy, h)
    } else if right {
        doors[Direction::East.index() as usize] && in_gap(dy, h)
    } else {
        true
    };
    if open {
        FLOOR
    } else {
        WALL
    }
}

fn kind_color(kind: KindId) -> Rgb {
    match kind.0 % 5 {
        0 => Rgb::new(100, 220, 120),
        1 => Rgb::new(80, 160, 220),
        2 => Rgb::new(240, 200, 80),
        3 => Rgb::new(200, 120, 220),
        _ => Rgb::new(220, 90, 80),
    }
}

fn digits(n: u32) -> u16 {
    let mut n = n;
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

fn draw_event(fb: &mut FrameBuffer, x: u16, y: u16, event: SessionEvent, style: CellStyle) {
    match event {
        SessionEvent::Moved {
            direction, centered, ..
        } => {
            let cx = fb.put_str(x, y, "moved ", style);
            let cx = fb.put_str(cx, y, direction.as_str(), style);
            if centered {
                fb.put_str(cx, y, " +scroll", style.dim());
            }
        }
        SessionEvent::Bounced { direction, reason } => {
            let cx = fb.put_str(x, y, "bump ", style);
            let cx = fb.put_str(cx, y, direction.as_str(), style);
            let cx = fb.put_str(cx, y, " ", style);
            fb.put_str(cx, y, reason.as_str(), style.dim());
        }
        SessionEvent::Rotated { rotation, .. } => {
            let cx = fb.put_str(x, y, "turned ", style);
            fb.put_u32(cx, y, rotation.degrees() as u32, style);
        }
        SessionEvent::Slid {
            direction,
            index,
            carry,
        } => {
            let cx = fb.put_str(x, y, "slid ", style);
            let cx = fb.put_str(cx, y, direction.as_str(), style);
            let cx = fb.put_str(cx, y, " #", style);
            let cx = fb.put_u32(cx, y, index as u32, style);
            let note = match carry {
                PlayerCarry::DoNotMove => "",
                PlayerCarry::MoveWithTiles => " carried",
                PlayerCarry::StayAsTilesMove => " held",
            };
            fb.put_str(cx, y, note, style.dim());
        }
        SessionEvent::Restarted { episode } => {
            let cx = fb.put_str(x, y, "new game ", style);
            fb.put_u32(cx, y, episode, style);
        }
    }
}
