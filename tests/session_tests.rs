//! Session tests - the move/rotate/slide state machine end to end

use shifting_maze::core::{
    CommandOutcome, GameSession, MazeConfig, MoveOutcome, SessionEvent,
};
use shifting_maze::types::{BounceReason, Direction, MazeCommand, PlayerCarry, Pos, Rotation};

/// 5x5 crossroads with a T piece (no north door) at (1, 1).
fn scenario_config() -> MazeConfig {
    let mut layout = vec![0u16; 25];
    layout[6] = 1;
    MazeConfig {
        board_width: 5,
        board_height: 5,
        view_width: 3,
        view_height: 3,
        slide_interval_ms: 0,
        layout: Some(layout),
        start: Some([1, 1]),
        ..MazeConfig::standard()
    }
}

#[test]
fn test_bounce_then_rotate_then_move() {
    let mut session = GameSession::new(scenario_config()).unwrap();
    assert_eq!(session.player(), Pos::new(1, 1));
    assert_eq!(session.viewport().origin(), Pos::new(0, 0));

    let before = session.board().clone();
    assert_eq!(
        session.apply(MazeCommand::Move(Direction::North)).unwrap(),
        CommandOutcome::Move(MoveOutcome::Bounced(BounceReason::WallHere))
    );
    assert_eq!(session.player(), Pos::new(1, 1));
    assert_eq!(session.board(), &before);

    // Turning back a quarter brings slot 1 round to face north.
    assert_eq!(
        session.apply(MazeCommand::Rotate(-1)).unwrap(),
        CommandOutcome::Rotated(Rotation::R270)
    );
    assert_eq!(
        session.effective_doors(Pos::new(1, 1)).unwrap(),
        [true, true, true, false]
    );

    let outcome = session.apply(MazeCommand::Move(Direction::North)).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Move(MoveOutcome::Moved { centered: false })
    );
    assert_eq!(session.player(), Pos::new(1, 0));
    assert_eq!(session.viewport().origin(), Pos::new(0, 0));

    let stats = session.stats();
    assert_eq!((stats.moves, stats.bounces, stats.rotations), (1, 1, 1));
}

#[test]
fn test_board_edge_bounce_comes_first() {
    let mut config = scenario_config();
    config.start = Some([0, 0]);
    let mut session = GameSession::new(config).unwrap();
    assert_eq!(
        session.try_move(Direction::West).unwrap(),
        MoveOutcome::Bounced(BounceReason::BoardEdge)
    );
    assert_eq!(
        session.last_event(),
        Some(SessionEvent::Bounced {
            direction: Direction::West,
            reason: BounceReason::BoardEdge
        })
    );
}

#[test]
fn test_centered_moves_scroll_the_view() {
    let mut config = scenario_config();
    config.start = Some([2, 2]);
    let mut session = GameSession::new(config).unwrap();
    assert_eq!(session.viewport().origin(), Pos::new(1, 1));

    assert_eq!(
        session.try_move(Direction::East).unwrap(),
        MoveOutcome::Moved { centered: true }
    );
    assert_eq!(session.viewport().origin(), Pos::new(2, 1));

    assert_eq!(
        session.try_move(Direction::East).unwrap(),
        MoveOutcome::Moved { centered: false }
    );
    assert_eq!(session.player(), Pos::new(4, 2));
    assert_eq!(session.viewport().origin(), Pos::new(2, 1));
}

#[test]
fn test_slide_under_player_carries_view() {
    let mut config = scenario_config();
    config.start = Some([2, 2]);
    let mut session = GameSession::new(config).unwrap();

    let report = match session.apply(MazeCommand::SlidePlayerLine(Direction::West)).unwrap() {
        CommandOutcome::Slid(report) => report,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(report.carry, PlayerCarry::MoveWithTiles);
    assert_eq!(report.player, Pos::new(1, 2));
    assert_eq!(session.viewport().origin(), Pos::new(0, 1));
    assert_eq!(report.patch.index, 2);
}

#[test]
fn test_player_stays_visible_through_play() {
    let mut config = scenario_config();
    config.layout = Some(vec![0; 25]);
    config.seed = 77;
    let mut session = GameSession::new(config).unwrap();

    let commands = [
        MazeCommand::Move(Direction::East),
        MazeCommand::Wait,
        MazeCommand::Move(Direction::South),
        MazeCommand::Slide {
            direction: Direction::East,
            index: 1,
        },
        MazeCommand::Move(Direction::South),
        MazeCommand::Wait,
        MazeCommand::Move(Direction::West),
        MazeCommand::Move(Direction::West),
        MazeCommand::Wait,
        MazeCommand::SlidePlayerLine(Direction::North),
        MazeCommand::Rotate(1),
        MazeCommand::Move(Direction::North),
    ];
    for _ in 0..10 {
        for &command in &commands {
            session.apply(command).unwrap();
            assert!(session.board().contains(session.player()));
            assert!(session.viewport().contains(session.player()));
            assert_eq!(session.supply().len(), 360);
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut config = MazeConfig::standard();
    config.seed = 31337;
    config.slide_interval_ms = 50;

    let play = |config: MazeConfig| {
        let mut session = GameSession::new(config).unwrap();
        for i in 0..40u32 {
            session.tick(20).unwrap();
            let _ = session.try_move(Direction::from_index((i % 4) as u8)).unwrap();
        }
        session.snapshot()
    };

    assert_eq!(play(config.clone()), play(config));
}

#[test]
fn test_restart_deals_a_new_board() {
    let mut session = GameSession::new(MazeConfig::standard()).unwrap();
    let first = session.board().clone();
    assert_eq!(
        session.apply(MazeCommand::Restart).unwrap(),
        CommandOutcome::Restarted
    );
    assert_ne!(session.board(), &first);
    assert_eq!(session.player(), Pos::new(3, 3));
    assert_eq!(session.supply().len(), 360 - 49);
}

#[test]
fn test_snapshot_window_contents() {
    let session = GameSession::new(scenario_config()).unwrap();
    let snap = session.snapshot();
    assert_eq!(snap.tiles.len(), 9);
    assert_eq!(snap.player_view_coord(), Some((1, 1)));
    let t_piece = snap.tile_at(1, 1).unwrap();
    assert_eq!(t_piece.pos, Pos::new(1, 1));
    assert_eq!(t_piece.doors, [false, true, true, true]);
    assert_eq!(snap.next_slide_ms, None);
    assert!(session.visible_cell(Pos::new(3, 3)).is_none());
    assert!(session.visible_cell(Pos::new(2, 2)).is_some());
}
