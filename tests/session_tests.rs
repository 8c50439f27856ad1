//! Session tests - full games played through the public tick API

use tetris_clone::core::{GameConfig, ScriptedShapes, Session, TickReport};
use tetris_clone::types::{Command, Phase, ShapeKind};

fn session(config: GameConfig, shapes: &[ShapeKind]) -> Session<ScriptedShapes> {
    Session::with_source(config, ScriptedShapes::new(shapes.to_vec())).unwrap()
}

/// Shift the active piece by `dx`, optionally rotate first, hard drop, then
/// tick until it locks. Returns the lock report.
fn place(session: &mut Session<ScriptedShapes>, rotate: bool, dx: i16) -> TickReport {
    let mut commands = Vec::new();
    if rotate {
        commands.push(Command::RotateCw);
    }
    let step = if dx < 0 { Command::MoveLeft } else { Command::MoveRight };
    commands.extend(std::iter::repeat(step).take(dx.unsigned_abs() as usize));
    commands.push(Command::HardDrop);

    let mut report = session.tick(&commands).unwrap();
    let mut guard = 0;
    while !report.locked {
        report = session.tick(&[]).unwrap();
        guard += 1;
        assert!(guard <= 1000, "piece never locked");
    }
    report
}

fn no_bonus() -> GameConfig {
    GameConfig {
        bonus_threshold: 0,
        ..GameConfig::default()
    }
}

#[test]
fn test_hard_drop_i_lands_on_floor() {
    let mut s = session(GameConfig::default(), &[ShapeKind::I]);
    assert_eq!((s.active().x, s.active().y), (4, 0));

    s.tick(&[Command::HardDrop]).unwrap();
    assert_eq!(s.active().y, 19);
    assert_eq!(s.board().occupied_count(), 0);

    let report = place(&mut s, false, 0);
    assert!(report.locked);
    assert_eq!(report.lines_cleared, 0);
    assert_eq!(s.board().occupied_count(), 4);
    for x in 4..8 {
        assert!(s.board().get(x, 19).unwrap().is_some());
    }
    assert_eq!(s.score(), 0);
    assert_eq!(s.phase(), Phase::Playing);
}

#[test]
fn test_gravity_after_move_delay() {
    let mut s = session(GameConfig::default(), &[ShapeKind::T]);
    for _ in 0..399 {
        s.tick(&[]).unwrap();
    }
    assert_eq!(s.active().y, 0);
    assert_eq!(s.move_timer(), 399);
    s.tick(&[]).unwrap();
    assert_eq!(s.active().y, 1);
    assert_eq!(s.move_timer(), 0);
}

#[test]
fn test_single_clear_outside_window_scores_100() {
    let mut s = session(no_bonus(), &[ShapeKind::I, ShapeKind::I, ShapeKind::O]);
    place(&mut s, false, -4);
    place(&mut s, false, 0);
    let report = place(&mut s, false, 4);

    assert_eq!(report.lines_cleared, 1);
    assert_eq!(report.points, 100);
    assert!(!report.bonus_applied);
    assert_eq!(s.score(), 100);
    assert_eq!(s.lines(), 1);
    // The O's upper half drops into the bottom row.
    assert_eq!(s.board().occupied_count(), 2);
}

#[test]
fn test_double_clear_inside_window_scores_450() {
    let mut s = session(GameConfig::default(), &[ShapeKind::O]);
    for dx in [-4, -2, 0, 2] {
        assert_eq!(place(&mut s, false, dx).lines_cleared, 0);
    }
    let report = place(&mut s, false, 4);

    assert_eq!(report.lines_cleared, 2);
    assert!(report.bonus_applied);
    assert_eq!(report.points, 450);
    assert_eq!(s.score(), 450);
    assert_eq!(s.board().occupied_count(), 0);
}

#[test]
fn test_four_rows_outside_window_scores_800() {
    let config = GameConfig {
        columns: 5,
        ..no_bonus()
    };
    let mut s = session(
        config,
        &[ShapeKind::O, ShapeKind::O, ShapeKind::O, ShapeKind::O, ShapeKind::I],
    );
    for dx in [-1, 1, -1, 1] {
        place(&mut s, false, dx);
    }
    assert_eq!(s.active().kind, ShapeKind::I);

    // Vertical I into the one-wide well on the right.
    let report = place(&mut s, true, 3);
    assert_eq!(report.lines_cleared, 4);
    assert_eq!(report.points, 800);
    assert_eq!(s.score(), 800);
    assert_eq!(s.board().occupied_count(), 0);
}

#[test]
fn test_moves_stop_at_walls() {
    let mut s = session(GameConfig::default(), &[ShapeKind::O]);
    s.tick(&[Command::MoveLeft; 8]).unwrap();
    assert_eq!(s.active().x, 0);
    s.tick(&[Command::MoveRight; 8]).unwrap();
    assert_eq!(s.active().x, 8);
}

#[test]
fn test_stack_to_top_then_restart() {
    let mut s = session(GameConfig::default(), &[ShapeKind::O]);
    let mut locks = 0;
    while !s.is_game_over() {
        place(&mut s, false, 0);
        locks += 1;
        assert!(locks <= 10);
    }
    assert_eq!(locks, 10);
    assert_eq!(s.phase(), Phase::GameOver);

    // Only restart does anything now.
    let before = s.board().clone();
    let report = s.tick(&[Command::MoveLeft, Command::HardDrop]).unwrap();
    assert!(report.game_over);
    assert_eq!(s.board(), &before);

    let report = s.tick(&[Command::Restart]).unwrap();
    assert!(report.restarted);
    assert!(!report.game_over);
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.board().occupied_count(), 0);
    assert_eq!((s.score(), s.lines()), (0, 0));
    assert_eq!((s.move_timer(), s.bonus_timer()), (0, 0));
}

#[test]
fn test_restart_ignored_while_playing() {
    let mut s = session(GameConfig::default(), &[ShapeKind::O]);
    place(&mut s, false, 0);
    let report = s.tick(&[Command::Restart]).unwrap();
    assert!(!report.restarted);
    assert_eq!(s.board().occupied_count(), 4);
}

#[test]
fn test_quit_leaves_state_untouched() {
    let mut s = session(GameConfig::default(), &[ShapeKind::T]);
    s.tick(&[]).unwrap();
    let before = s.snapshot();

    let report = s.tick(&[Command::MoveLeft, Command::Quit]).unwrap();
    assert!(report.quit);
    assert_eq!(s.snapshot(), before);
    assert_eq!(s.last_report(), report);
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let config = GameConfig {
        move_delay: 2,
        ..GameConfig::default()
    };
    let mut a = Session::seeded(config.clone(), 99).unwrap();
    let mut b = Session::seeded(config, 99).unwrap();
    let script = [Command::MoveLeft, Command::RotateCw, Command::HardDrop];

    for i in 0..500 {
        let cmds = &script[i % 3..i % 3 + 1];
        assert_eq!(a.tick(cmds).unwrap(), b.tick(cmds).unwrap());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
