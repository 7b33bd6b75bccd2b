//! Board tests - door queries and line slides

use std::collections::BTreeMap;

use shifting_maze::core::{Board, DoorSide, MazeError, TileSet, TileSupply};
use shifting_maze::types::{Direction, KindId, Pos, Rotation};

/// Kind ids in the board plus the bag, as a multiset.
fn census(board: &Board, supply: &TileSupply) -> BTreeMap<KindId, usize> {
    let mut counts = board.kind_counts();
    for &k in supply.tiles() {
        *counts.entry(k).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_board_from_supply_draws_every_cell() {
    let tiles = TileSet::standard();
    let mut supply = TileSupply::from_tileset(&tiles, 5);
    let board = Board::from_supply(7, 7, &mut supply).unwrap();

    assert_eq!(board.size(), 49);
    assert_eq!(supply.len(), 360 - 49);
    assert!(board.validate_kinds(&tiles).is_ok());
    for (kind, n) in census(&board, &supply) {
        assert_eq!(n as u32, tiles.count_of(kind));
    }
}

#[test]
fn test_layout_tiles_start_unrotated() {
    let layout: Vec<KindId> = (0..9).map(|i| KindId(i % 5)).collect();
    let board = Board::from_layout(3, 3, &layout).unwrap();
    for y in 0..3 {
        for x in 0..3 {
            let cell = board.cell(Pos::new(x, y)).unwrap();
            assert_eq!(cell.rotation, Rotation::R0);
            assert_eq!(cell.kind, layout[(y * 3 + x) as usize]);
        }
    }
}

#[test]
fn test_place_tile_out_of_bounds() {
    let mut board = Board::from_layout(2, 2, &[KindId(0); 4]).unwrap();
    assert!(board
        .place_tile(Pos::new(1, 1), KindId(3), Rotation::R90)
        .is_ok());
    assert_eq!(board.cell(Pos::new(1, 1)).unwrap().kind, KindId(3));
    assert_eq!(
        board.place_tile(Pos::new(2, 0), KindId(3), Rotation::R0),
        Err(MazeError::OutOfBounds {
            pos: Pos::new(2, 0)
        })
    );
}

#[test]
fn test_has_door_here_and_beyond() {
    let tiles = TileSet::standard();
    // Row 0: straight (E/W), dead end (W only).
    let mut board = Board::from_layout(2, 1, &[KindId(3), KindId(4)]).unwrap();
    let left = Pos::new(0, 0);

    assert!(board.has_door(&tiles, left, Direction::East, DoorSide::Here).unwrap());
    assert!(board.has_door(&tiles, left, Direction::East, DoorSide::Beyond).unwrap());
    assert!(!board.has_door(&tiles, left, Direction::North, DoorSide::Here).unwrap());

    // Turn the dead end so its door faces north; the way east is now shut.
    board.rotate_tile(Pos::new(1, 0), 1).unwrap();
    assert!(!board.has_door(&tiles, left, Direction::East, DoorSide::Beyond).unwrap());
}

#[test]
fn test_has_door_beyond_board_edge_is_wall() {
    let tiles = TileSet::standard();
    let board = Board::from_layout(2, 2, &[KindId(0); 4]).unwrap();
    for d in [Direction::North, Direction::West] {
        assert!(board.has_door(&tiles, Pos::new(0, 0), d, DoorSide::Here).unwrap());
        assert!(!board.has_door(&tiles, Pos::new(0, 0), d, DoorSide::Beyond).unwrap());
    }
    assert!(matches!(
        board.has_door(&tiles, Pos::new(-1, 0), Direction::East, DoorSide::Here),
        Err(MazeError::OutOfBounds { .. })
    ));
}

#[test]
fn test_unknown_kind_in_layout_surfaces_on_query() {
    let tiles = TileSet::standard();
    let board = Board::from_layout(1, 1, &[KindId(42)]).unwrap();
    assert_eq!(
        board.has_door(&tiles, Pos::new(0, 0), Direction::North, DoorSide::Here),
        Err(MazeError::UnknownKind(KindId(42)))
    );
    assert!(board.validate_kinds(&tiles).is_err());
}

#[test]
fn test_slide_shifts_line_by_one() {
    let tiles = TileSet::standard();
    let mut supply = TileSupply::from_tileset(&tiles, 99);
    let mut board = Board::from_supply(5, 5, &mut supply).unwrap();

    for dir in Direction::ALL {
        let before = board.line(dir, 2).unwrap();
        let patch = board.slide_line(dir, 2, &mut supply).unwrap();
        let after = board.line(dir, 2).unwrap();

        match dir {
            Direction::West | Direction::North => {
                assert_eq!(&after[..4], &before[1..]);
                assert_eq!(after[4], patch.injected);
                assert_eq!(patch.ejected, before[0]);
            }
            Direction::East | Direction::South => {
                assert_eq!(&after[1..], &before[..4]);
                assert_eq!(after[0], patch.injected);
                assert_eq!(patch.ejected, before[4]);
            }
        }
        assert_eq!(patch.cells.len(), 6);
    }
}

#[test]
fn test_slides_conserve_tiles() {
    let tiles = TileSet::standard();
    let mut supply = TileSupply::from_tileset(&tiles, 3);
    let mut board = Board::from_supply(7, 7, &mut supply).unwrap();
    let start = census(&board, &supply);

    for i in 0..200u32 {
        let dir = Direction::from_index((i % 4) as u8);
        board.slide_line(dir, (i % 7) as u16, &mut supply).unwrap();
        assert_eq!(supply.len(), 360 - 49);
    }
    assert_eq!(census(&board, &supply), start);
}

#[test]
fn test_slide_other_lines_untouched() {
    let tiles = TileSet::standard();
    let mut supply = TileSupply::from_tileset(&tiles, 11);
    let mut board = Board::from_supply(4, 4, &mut supply).unwrap();
    let before = board.clone();

    board.slide_line(Direction::South, 1, &mut supply).unwrap();

    for y in 0..4 {
        for x in [0, 2, 3] {
            let p = Pos::new(x, y);
            assert_eq!(board.cell(p), before.cell(p));
        }
    }
}
