//! Tile supply - the bag new tiles are drawn from
//!
//! The bag is a flat, shuffled `Vec` of kind ids. Draws pop from the end
//! (O(1)); returned tiles are appended and the whole bag is reshuffled so it
//! stays well mixed. Only kind ids live in the bag: a tile's rotation is
//! dropped on return and rolled fresh on every [`TileSupply::draw_placement`].

use std::fmt;

use crate::error::MazeError;
use crate::rng::SimpleRng;
use crate::tileset::TileSet;
use crate::types::{KindId, Rotation, TileCell};

#[derive(Debug, Clone)]
pub struct TileSupply {
    tiles: Vec<KindId>,
    rng: SimpleRng,
}

impl TileSupply {
    /// Expand a `{kind: count}` table into a bag and shuffle it.
    pub fn new<C>(counts: C, seed: u32) -> Self
    where
        C: IntoIterator<Item = (KindId, u32)>,
    {
        let mut tiles = Vec::new();
        for (kind, count) in counts {
            tiles.extend(std::iter::repeat(kind).take(count as usize));
        }
        let mut supply = Self {
            tiles,
            rng: SimpleRng::new(seed),
        };
        supply.mix();
        supply
    }

    /// A full bag for `tile_set`.
    pub fn from_tileset(tile_set: &TileSet, seed: u32) -> Self {
        Self::new(tile_set.counts(), seed)
    }

    fn mix(&mut self) {
        self.rng.shuffle(&mut self.tiles);
    }

    /// Remove and return the last tile in the bag.
    pub fn draw(&mut self) -> Result<KindId, MazeError> {
        self.tiles.pop().ok_or(MazeError::EmptySupply)
    }

    /// Draw `n` tiles.
    ///
    /// Not atomic: if the bag runs dry part-way, the tiles already drawn stay
    /// out of the bag and are not handed back to the caller.
    pub fn draw_many(&mut self, n: usize) -> Result<Vec<KindId>, MazeError> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            drawn.push(self.draw()?);
        }
        Ok(drawn)
    }

    /// Draw a tile and give it a uniformly random rotation.
    pub fn draw_placement(&mut self) -> Result<TileCell, MazeError> {
        let kind = self.draw()?;
        let rotation = self.rng.rotation();
        Ok(TileCell::new(kind, rotation))
    }

    /// Put a tile back and reshuffle.
    pub fn return_tile(&mut self, kind: KindId) {
        self.tiles.push(kind);
        self.mix();
    }

    /// Put several tiles back, reshuffling once.
    pub fn return_tiles<I>(&mut self, kinds: I)
    where
        I: IntoIterator<Item = KindId>,
    {
        self.tiles.extend(kinds);
        self.mix();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// How many tiles of `kind` are still in the bag.
    pub fn count_of(&self, kind: KindId) -> usize {
        self.tiles.iter().filter(|&&k| k == kind).count()
    }

    /// Bag contents in draw order (last element is drawn next).
    pub fn tiles(&self) -> &[KindId] {
        &self.tiles
    }

    /// Draw a random rotation from the bag's RNG without touching the tiles.
    pub(crate) fn roll_rotation(&mut self) -> Rotation {
        self.rng.rotation()
    }
}

impl fmt::Display for TileSupply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile bag:")?;
        for kind in &self.tiles {
            write!(f, " {}", kind)?;
        }
        Ok(())
    }
}
