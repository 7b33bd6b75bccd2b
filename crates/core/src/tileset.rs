//! Tile catalog - immutable door patterns shared by every placed tile
//!
//! A [`TileKind`] lists which of its four edges carry a door, by slot
//! (`[north, east, south, west]` before rotation). The [`TileSet`] owns the
//! kinds and the per-kind counts that fill the supply. Board cells refer to
//! kinds by [`KindId`] only.

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;

use crate::error::MazeError;
use crate::types::{Direction, KindId, Rotation};

/// Door pattern of one tile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKind {
    pub id: KindId,
    /// Door presence per slot, clockwise from north.
    pub doors: [bool; 4],
}

impl TileKind {
    pub const fn new(id: KindId, doors: [bool; 4]) -> Self {
        Self { id, doors }
    }

    /// Door facing `direction` once the tile is turned by `rotation`.
    ///
    /// `doors[(direction - rotation) mod 4]`
    #[inline]
    pub fn has_door(&self, rotation: Rotation, direction: Direction) -> bool {
        self.doors[direction.slot_under(rotation) as usize]
    }

    /// Doors by physical direction under `rotation`, in `[N, E, S, W]` order.
    pub fn effective_doors(&self, rotation: Rotation) -> [bool; 4] {
        Direction::ALL.map(|d| self.has_door(rotation, d))
    }

    /// Directions with an opening under `rotation`.
    pub fn open_directions(&self, rotation: Rotation) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.has_door(rotation, d))
            .collect()
    }

    pub fn door_count(&self) -> usize {
        self.doors.iter().filter(|&&d| d).count()
    }
}

/// Read-only catalog of tile kinds plus the count of each kind in a full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    name: String,
    kinds: BTreeMap<KindId, TileKind>,
    counts: BTreeMap<KindId, u32>,
}

impl TileSet {
    /// Build a catalog from a door table and a count table.
    ///
    /// Every kind named in `counts` must appear in `doors`; kinds without a
    /// count are allowed and simply never enter the supply.
    pub fn new<D, C>(name: impl Into<String>, doors: D, counts: C) -> Result<Self, MazeError>
    where
        D: IntoIterator<Item = (KindId, [bool; 4])>,
        C: IntoIterator<Item = (KindId, u32)>,
    {
        let mut kinds = BTreeMap::new();
        for (id, pattern) in doors {
            if kinds.insert(id, TileKind::new(id, pattern)).is_some() {
                return Err(MazeError::DuplicateKind(id));
            }
        }

        let mut count_table = BTreeMap::new();
        for (id, count) in counts {
            if !kinds.contains_key(&id) {
                return Err(MazeError::UnknownKind(id));
            }
            if count_table.insert(id, count).is_some() {
                return Err(MazeError::DuplicateKind(id));
            }
        }

        Ok(Self {
            name: name.into(),
            kinds,
            counts: count_table,
        })
    }

    /// The classic five-kind set: crossroads, T, corner, straight, dead end.
    pub fn standard() -> Self {
        let doors = [
            (KindId(0), [true, true, true, true]),
            (KindId(1), [false, true, true, true]),
            (KindId(2), [false, false, true, true]),
            (KindId(3), [false, true, false, true]),
            (KindId(4), [false, false, false, true]),
        ];
        let counts = [
            (KindId(0), 40),
            (KindId(1), 140),
            (KindId(2), 80),
            (KindId(3), 80),
            (KindId(4), 20),
        ];
        let mut kinds = BTreeMap::new();
        for (id, pattern) in doors {
            kinds.insert(id, TileKind::new(id, pattern));
        }
        Self {
            name: "standard".to_string(),
            kinds,
            counts: counts.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a kind. Failure means a cell refers to a kind this catalog
    /// never defined.
    pub fn get(&self, id: KindId) -> Result<&TileKind, MazeError> {
        self.kinds.get(&id).ok_or(MazeError::UnknownKind(id))
    }

    pub fn contains(&self, id: KindId) -> bool {
        self.kinds.contains_key(&id)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &TileKind> {
        self.kinds.values()
    }

    pub fn counts(&self) -> impl Iterator<Item = (KindId, u32)> + '_ {
        self.counts.iter().map(|(&id, &n)| (id, n))
    }

    pub fn count_of(&self, id: KindId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Number of tiles in a full supply.
    pub fn total_count(&self) -> usize {
        self.counts.values().map(|&n| n as usize).sum()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tile set: {}", self.name)?;
        for kind in self.kinds.values() {
            let pattern: String = kind
                .doors
                .iter()
                .map(|&d| if d { '1' } else { '0' })
                .collect();
            writeln!(f, " {}:[{}] x{}", kind.id, pattern, self.count_of(kind.id))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossroads_is_open_at_every_rotation() {
        let k = TileKind::new(KindId(0), [true; 4]);
        for r in Rotation::ALL {
            for d in Direction::ALL {
                assert!(k.has_door(r, d));
            }
        }
    }

    #[test]
    fn single_door_follows_rotation() {
        let k = TileKind::new(KindId(4), [true, false, false, false]);
        assert!(k.has_door(Rotation::R0, Direction::North));
        assert!(k.has_door(Rotation::R90, Direction::East));
        assert!(!k.has_door(Rotation::R90, Direction::North));
        assert!(k.has_door(Rotation::R180, Direction::South));
        assert!(k.has_door(Rotation::R270, Direction::West));
    }

    #[test]
    fn door_algebra_matches_slot_formula() {
        let set = TileSet::standard();
        for kind in set.kinds() {
            for r in Rotation::ALL {
                for d in Direction::ALL {
                    let slot = ((d.index() as i32 - r.index() as i32).rem_euclid(4)) as usize;
                    assert_eq!(kind.has_door(r, d), kind.doors[slot]);
                }
            }
        }
    }

    #[test]
    fn open_directions_lists_effective_doors() {
        let corner = TileKind::new(KindId(2), [false, false, true, true]);
        let open = corner.open_directions(Rotation::R90);
        assert_eq!(open.as_slice(), &[Direction::North, Direction::West]);
        assert_eq!(corner.door_count(), 2);
    }

    #[test]
    fn counts_must_reference_known_kinds() {
        let err = TileSet::new(
            "broken",
            [(KindId(0), [true; 4])],
            [(KindId(0), 3), (KindId(7), 1)],
        )
        .unwrap_err();
        assert_eq!(err, MazeError::UnknownKind(KindId(7)));
    }

    #[test]
    fn duplicate_kinds_are_rejected() {
        let err = TileSet::new(
            "dupes",
            [(KindId(1), [true; 4]), (KindId(1), [false; 4])],
            Vec::<(KindId, u32)>::new(),
        )
        .unwrap_err();
        assert_eq!(err, MazeError::DuplicateKind(KindId(1)));
    }

    #[test]
    fn standard_set_totals() {
        let set = TileSet::standard();
        assert_eq!(set.len(), 5);
        assert_eq!(set.total_count(), 360);
        assert_eq!(set.count_of(KindId(1)), 140);
        assert!(set.get(KindId(5)).is_err());
    }
}
