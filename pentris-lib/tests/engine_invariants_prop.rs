//! Invariants that must hold for any seed and any stream of commands:
//! cells stay in the palette, counters only grow, level follows lines,
//! and the phase tracks the engine's game-over flag.

use pentris_lib::common::{Prng, COLOR_COUNT};
use pentris_lib::engine::{drop_interval_for_level, level_for_lines};
use pentris_lib::input::{Command, Outcome};
use pentris_lib::pieces::PieceSet;
use pentris_lib::scheduler::Phase;
use pentris_lib::session::Session;
use proptest::prelude::*;

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::SoftDrop),
        Just(Command::Rotate),
        Just(Command::HardDrop),
        Just(Command::TogglePause),
        Just(Command::Confirm),
    ]
}

fn step() -> impl Strategy<Value = (Command, u32)> {
    (command(), 0u32..1200)
}

fn assert_session_consistent(session: &Session<Prng>) {
    let frame = session.frame();
    for row in frame.board.rows() {
        for &cell in row {
            assert!(cell <= COLOR_COUNT);
        }
    }
    assert!((1..=COLOR_COUNT).contains(&frame.active.color));
    assert!((1..=COLOR_COUNT).contains(&frame.next.color));
    assert_eq!(frame.stats.level, level_for_lines(frame.stats.lines));
    assert_eq!(
        session.engine().drop_interval(),
        drop_interval_for_level(frame.stats.level)
    );
    assert_eq!(
        frame.phase == Phase::GameOver,
        session.engine().is_game_over()
    );
    if frame.phase != Phase::GameOver {
        assert!(!session
            .engine()
            .collides(frame.active.origin, &frame.active.shape));
    }
}

#[test]
fn every_template_survives_four_turns() {
    for template in PieceSet::Extended.templates() {
        let mut shape = template.shape;
        for _ in 0..4 {
            shape = shape.rotate();
        }
        assert_eq!(shape, template.shape, "{}", template.name);
    }
}

proptest! {
    #[test]
    fn random_play_respects_invariants(
        seed in any::<u32>(),
        extended in any::<bool>(),
        steps in prop::collection::vec(step(), 1..300),
    ) {
        let pieces = if extended { PieceSet::Extended } else { PieceSet::Classic };
        let mut session = Session::new(pieces, Prng::new(seed));
        assert_session_consistent(&session);

        for (command, delta) in steps {
            let before = session.stats();
            let outcome = session.handle(command);
            session.tick(delta);
            let after = session.stats();

            if outcome == Outcome::Restarted {
                prop_assert_eq!(after.score, 0);
            } else {
                prop_assert!(after.score >= before.score);
                prop_assert!(after.lines >= before.lines);
                prop_assert!(after.level >= before.level);
            }
            assert_session_consistent(&session);
        }
    }

    #[test]
    fn hard_drop_cleared_lines_score_at_pre_lock_level(
        seed in any::<u32>(),
        steps in prop::collection::vec(command(), 1..200),
    ) {
        let mut session = Session::new(PieceSet::Classic, Prng::new(seed));
        for command in steps {
            let before = session.stats();
            if let Outcome::Locked(report) = session.handle(command) {
                let after = session.stats();
                prop_assert_eq!(report.points, report.cleared as u32 * 100 * before.level);
                prop_assert_eq!(after.score, before.score + report.points);
                prop_assert_eq!(after.lines, before.lines + report.cleared as u32);
            }
        }
    }
}
