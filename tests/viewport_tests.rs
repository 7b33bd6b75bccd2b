//! Viewport tests - centered vs free movement arithmetic

use shifting_maze::core::{MazeError, Viewport};
use shifting_maze::types::{Direction, Pos, Rect};

#[test]
fn test_centered_move_rect_for_odd_and_even_sizes() {
    assert_eq!(
        Viewport::new(5, 5, 7, 7).unwrap().centered_move_rect(),
        Rect::new(2, 2, 3, 3)
    );
    // Even view: half is floored.
    assert_eq!(
        Viewport::new(4, 2, 9, 3).unwrap().centered_move_rect(),
        Rect::new(2, 1, 6, 2)
    );
    // View as large as the board: a single column/row of centered positions.
    assert_eq!(
        Viewport::new(3, 3, 3, 3).unwrap().centered_move_rect(),
        Rect::new(1, 1, 1, 1)
    );
}

#[test]
fn test_board_five_view_three_boundaries() {
    let view = Viewport::new(3, 3, 5, 5).unwrap();

    // Horizontal: x in [1, 3]
    let west: Vec<bool> = (0..5)
        .map(|x| view.is_centered_move(Pos::new(x, 2), Direction::West))
        .collect();
    assert_eq!(west, vec![false, false, true, true, false]);

    let east: Vec<bool> = (0..5)
        .map(|x| view.is_centered_move(Pos::new(x, 2), Direction::East))
        .collect();
    assert_eq!(east, vec![false, true, true, false, false]);

    // Vertical mirrors it.
    let north: Vec<bool> = (0..5)
        .map(|y| view.is_centered_move(Pos::new(2, y), Direction::North))
        .collect();
    assert_eq!(north, vec![false, false, true, true, false]);
}

#[test]
fn test_walking_keeps_player_centered_inside_rect() {
    let mut view = Viewport::new(5, 5, 9, 9).unwrap().centered_on(Pos::new(4, 4));
    let mut player = Pos::new(4, 4);
    let path = [
        Direction::East,
        Direction::East,
        Direction::East,
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::West,
        Direction::South,
        Direction::South,
        Direction::South,
        Direction::South,
    ];
    for dir in path {
        if view.is_centered_move(player, dir) {
            assert!(view.translate(dir));
        }
        player = player.step(dir);
        assert!(view.contains(player), "player {} left view", player);
        if view.centered_move_rect().contains(player) {
            assert_eq!(view.origin(), Pos::new(player.x - 2, player.y - 2));
        }
    }
}

#[test]
fn test_to_view_coord_outside_is_none() {
    let view = Viewport::new(3, 3, 5, 5).unwrap();
    let visible: usize = (0..5)
        .flat_map(|y| (0..5).map(move |x| Pos::new(x, y)))
        .filter(|&p| view.to_view_coord(p).is_some())
        .count();
    assert_eq!(visible, 9);
    assert_eq!(view.to_view_coord(Pos::new(-1, 1)), None);
}

#[test]
fn test_exposed_strip_matches_translate() {
    let mut view = Viewport::new(3, 3, 5, 5).unwrap();
    let strip = view.exposed_by_translate(Direction::West);
    assert!(view.translate(Direction::West));
    for y in strip.y..strip.bottom() {
        for x in strip.x..strip.right() {
            assert!(view.contains(Pos::new(x, y)));
        }
    }
    assert_eq!(view.visible_rect().x, strip.x);
}

#[test]
fn test_viewport_larger_than_board() {
    assert_eq!(
        Viewport::new(3, 9, 5, 5),
        Err(MazeError::ViewportTooLarge {
            view_width: 3,
            view_height: 9,
            board_width: 5,
            board_height: 5
        })
    );
}
