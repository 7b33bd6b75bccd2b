//! Game session - the state machine that owns the board
//!
//! A [`GameSession`] owns the catalog, board, supply, viewport and player and
//! applies one [`MazeCommand`] at a time. Renderers only ever see a
//! [`SessionSnapshot`]; nothing outside the session mutates its parts.
//!
//! Move rules, checked in order:
//!
//! 1. target off the board: bounce ([`BounceReason::BoardEdge`])
//! 2. no door out of the current tile: bounce ([`BounceReason::WallHere`])
//! 3. no door into the target tile: bounce ([`BounceReason::WallBeyond`])
//! 4. otherwise the player steps; the viewport scrolls along if the step is a
//!    centered move
//!
//! Bounces are ordinary outcomes, not errors.

use tracing::{debug, info, warn};

use crate::board::{Board, DoorSide, SlidePatch};
use crate::config::MazeConfig;
use crate::error::{ErrorSeverity, MazeError};
use crate::rng::SimpleRng;
use crate::snapshot::{SessionSnapshot, VisibleTile};
use crate::supply::TileSupply;
use crate::tileset::TileSet;
use crate::types::{
    BounceReason, Direction, MazeCommand, PlayerCarry, Pos, Rotation, TileCell,
};
use crate::viewport::Viewport;

/// Random slides use their own stream so that they do not depend on how many
/// tiles the bag has shuffled.
const SLIDE_STREAM: u32 = 0x9e37_79b9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { centered: bool },
    Bounced(BounceReason),
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideReport {
    pub patch: SlidePatch,
    pub carry: PlayerCarry,
    /// Player position after the slide.
    pub player: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Move(MoveOutcome),
    Rotated(Rotation),
    Slid(SlideReport),
    Restarted,
}

/// Counters since the last (re)start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SessionStats {
    pub moves: u32,
    pub bounces: u32,
    pub rotations: u32,
    pub slides: u32,
}

/// Most recent thing that happened, for status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Moved {
        direction: Direction,
        to: Pos,
        centered: bool,
    },
    Bounced {
        direction: Direction,
        reason: BounceReason,
    },
    Rotated {
        pos: Pos,
        rotation: Rotation,
    },
    Slid {
        direction: Direction,
        index: u16,
        carry: PlayerCarry,
    },
    Restarted {
        episode: u32,
    },
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: MazeConfig,
    tiles: TileSet,
    board: Board,
    supply: TileSupply,
    viewport: Viewport,
    player: Pos,
    rng: SimpleRng,
    seed: u32,
    episode: u32,
    slide_timer_ms: u32,
    stats: SessionStats,
    last_event: Option<SessionEvent>,
}

impl GameSession {
    /// Validate `config` and deal a fresh board.
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;
        let seed = config.seed;
        Self::build(config, seed, 0)
    }

    fn build(config: MazeConfig, seed: u32, episode: u32) -> Result<Self, MazeError> {
        let tiles = config.tile_set.build()?;
        let mut supply = TileSupply::from_tileset(&tiles, seed);
        let board = match config.layout_kinds() {
            Some(layout) => Board::from_layout(config.board_width, config.board_height, &layout)?,
            None => Board::from_supply(config.board_width, config.board_height, &mut supply)?,
        };
        board.validate_kinds(&tiles)?;

        let player = config.start_pos();
        if !board.contains(player) {
            return Err(MazeError::InvalidStart { pos: player });
        }
        let viewport = Viewport::new(
            config.view_width,
            config.view_height,
            config.board_width,
            config.board_height,
        )?
        .centered_on(player);

        info!(
            seed,
            episode,
            width = board.width(),
            height = board.height(),
            supply = supply.len(),
            "session ready"
        );

        Ok(Self {
            config,
            tiles,
            board,
            supply,
            viewport,
            player,
            rng: SimpleRng::new(seed ^ SLIDE_STREAM),
            seed,
            episode,
            slide_timer_ms: 0,
            stats: SessionStats::default(),
            last_event: None,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn supply(&self) -> &TileSupply {
        &self.supply
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn last_event(&self) -> Option<SessionEvent> {
        self.last_event
    }

    /// Take and clear the last event.
    pub fn take_last_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }

    /// Milliseconds until the next random slide, or `None` if they are off.
    pub fn next_slide_ms(&self) -> Option<u32> {
        match self.config.slide_interval_ms {
            0 => None,
            interval => Some(interval.saturating_sub(self.slide_timer_ms)),
        }
    }

    /// Tile at `pos` if it is inside the viewport.
    pub fn visible_cell(&self, pos: Pos) -> Option<TileCell> {
        if !self.viewport.contains(pos) {
            return None;
        }
        self.board.cell(pos)
    }

    /// Open edges of the tile at `pos`, `[N, E, S, W]`.
    pub fn effective_doors(&self, pos: Pos) -> Result<[bool; 4], MazeError> {
        let cell = self.board.cell(pos).ok_or(MazeError::OutOfBounds { pos })?;
        Ok(self.tiles.get(cell.kind)?.effective_doors(cell.rotation))
    }

    pub fn apply(&mut self, command: MazeCommand) -> Result<CommandOutcome, MazeError> {
        match command {
            MazeCommand::Move(direction) => self.try_move(direction).map(CommandOutcome::Move),
            MazeCommand::Rotate(delta) => self.rotate(delta).map(CommandOutcome::Rotated),
            MazeCommand::Slide { direction, index } => {
                self.slide(direction, index).map(CommandOutcome::Slid)
            }
            MazeCommand::SlidePlayerLine(direction) => {
                self.slide_player_line(direction).map(CommandOutcome::Slid)
            }
            MazeCommand::Wait => {
                self.slide_timer_ms = 0;
                self.random_slide().map(CommandOutcome::Slid)
            }
            MazeCommand::Restart => {
                self.restart()?;
                Ok(CommandOutcome::Restarted)
            }
        }
    }

    /// Why a step from the player's tile towards `direction` would fail.
    fn blocked(&self, direction: Direction) -> Result<Option<BounceReason>, MazeError> {
        let from = self.player;
        if !self.board.contains(from.step(direction)) {
            return Ok(Some(BounceReason::BoardEdge));
        }
        if !self.board.has_door(&self.tiles, from, direction, DoorSide::Here)? {
            return Ok(Some(BounceReason::WallHere));
        }
        if !self.board.has_door(&self.tiles, from, direction, DoorSide::Beyond)? {
            return Ok(Some(BounceReason::WallBeyond));
        }
        Ok(None)
    }

    pub fn try_move(&mut self, direction: Direction) -> Result<MoveOutcome, MazeError> {
        if let Some(reason) = self.blocked(direction)? {
            self.stats.bounces += 1;
            self.last_event = Some(SessionEvent::Bounced { direction, reason });
            debug!(
                x = self.player.x,
                y = self.player.y,
                direction = %direction,
                reason = reason.as_str(),
                "bounce"
            );
            return Ok(MoveOutcome::Bounced(reason));
        }

        let centered = self.viewport.is_centered_move(self.player, direction);
        if centered {
            self.viewport.translate(direction);
        }
        self.player = self.player.step(direction);
        self.stats.moves += 1;
        self.last_event = Some(SessionEvent::Moved {
            direction,
            to: self.player,
            centered,
        });
        debug!(
            x = self.player.x,
            y = self.player.y,
            direction = %direction,
            centered,
            "move"
        );
        Ok(MoveOutcome::Moved { centered })
    }

    /// Turn the player's tile by `delta` quarters (positive is clockwise).
    pub fn rotate(&mut self, delta: i8) -> Result<Rotation, MazeError> {
        let rotation = self.board.rotate_tile(self.player, delta)?;
        self.stats.rotations += 1;
        self.last_event = Some(SessionEvent::Rotated {
            pos: self.player,
            rotation,
        });
        debug!(
            x = self.player.x,
            y = self.player.y,
            rotation = rotation.degrees(),
            "rotate"
        );
        Ok(rotation)
    }

    /// Slide row (east/west) or column (north/south) `index` one tile towards
    /// `direction`, carrying the player along if they stand on it.
    pub fn slide(&mut self, direction: Direction, index: u16) -> Result<SlideReport, MazeError> {
        let patch = self.board.slide_line(direction, index, &mut self.supply)?;

        let on_line = if direction.is_horizontal() {
            self.player.y == index as i32
        } else {
            self.player.x == index as i32
        };
        let carry = if !on_line {
            PlayerCarry::DoNotMove
        } else if self.board.contains(self.player.step(direction)) {
            if self.viewport.is_centered_move(self.player, direction) {
                self.viewport.translate(direction);
            }
            self.player = self.player.step(direction);
            PlayerCarry::MoveWithTiles
        } else {
            // The player's tile went over the edge; they stay on the edge cell.
            PlayerCarry::StayAsTilesMove
        };

        self.stats.slides += 1;
        self.last_event = Some(SessionEvent::Slid {
            direction,
            index,
            carry,
        });
        debug!(
            direction = %direction,
            index,
            x = self.player.x,
            y = self.player.y,
            carry = ?carry,
            "slide"
        );

        Ok(SlideReport {
            patch,
            carry,
            player: self.player,
        })
    }

    /// Slide the row (east/west) or column (north/south) under the player.
    pub fn slide_player_line(&mut self, direction: Direction) -> Result<SlideReport, MazeError> {
        let index = if direction.is_horizontal() {
            self.player.y
        } else {
            self.player.x
        };
        self.slide(direction, index as u16)
    }

    /// Slide a random visible row or column in a random direction.
    pub fn random_slide(&mut self) -> Result<SlideReport, MazeError> {
        let direction = self.rng.direction();
        let origin = self.viewport.origin();
        let index = if direction.is_horizontal() {
            origin.y as u32 + self.rng.next_range(self.viewport.height() as u32)
        } else {
            origin.x as u32 + self.rng.next_range(self.viewport.width() as u32)
        };
        self.slide(direction, index as u16)
    }

    /// Advance the slide clock. Returns the slide performed, if any.
    ///
    /// A slide that fails for lack of tiles is logged and skipped; the clock
    /// keeps running.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Option<SlideReport>, MazeError> {
        let interval = self.config.slide_interval_ms;
        if interval == 0 {
            return Ok(None);
        }
        self.slide_timer_ms = self.slide_timer_ms.saturating_add(elapsed_ms);
        if self.slide_timer_ms < interval {
            return Ok(None);
        }
        self.slide_timer_ms = 0;

        match self.random_slide() {
            Ok(report) => Ok(Some(report)),
            Err(err) if err.severity() == ErrorSeverity::Recoverable => {
                warn!(error = %err, "periodic slide skipped");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Deal a new board from the same config with the next seed.
    pub fn restart(&mut self) -> Result<(), MazeError> {
        let episode = self.episode.wrapping_add(1);
        let seed = self.seed.wrapping_add(1);
        *self = Self::build(self.config.clone(), seed, episode)?;
        self.last_event = Some(SessionEvent::Restarted { episode });
        Ok(())
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.clear();
        out.board_width = self.board.width();
        out.board_height = self.board.height();
        out.view_width = self.viewport.width();
        out.view_height = self.viewport.height();
        out.origin = self.viewport.origin();
        out.player = self.player;
        for row in 0..self.viewport.height() {
            for col in 0..self.viewport.width() {
                let pos = self.viewport.to_board_pos(col, row);
                let Some(cell) = self.board.cell(pos) else {
                    continue;
                };
                // Kinds are checked against the catalog at build time.
                let doors = match self.tiles.get(cell.kind) {
                    Ok(kind) => kind.effective_doors(cell.rotation),
                    Err(err) => {
                        warn!(error = %err, x = pos.x, y = pos.y, "tile drawn without doors");
                        [false; 4]
                    }
                };
                out.tiles.push(VisibleTile {
                    pos,
                    kind: cell.kind,
                    rotation: cell.rotation,
                    doors,
                });
            }
        }
        out.supply_len = self.supply.len();
        out.stats = self.stats;
        out.last_event = self.last_event;
        out.episode = self.episode;
        out.seed = self.seed;
        out.next_slide_ms = self.next_slide_ms();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snap = SessionSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
