use crate::common::RandomSource;
use crate::engine::{Engine, LockReport};
use crate::scheduler::{DropScheduler, Phase};

// Key input events
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Confirm,
}

impl Command {
    /// Maps a DOM-style key name to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
            "ArrowDown" | "s" | "S" => Some(Command::SoftDrop),
            "ArrowUp" | "w" | "W" => Some(Command::Rotate),
            " " => Some(Command::HardDrop),
            "p" | "P" => Some(Command::TogglePause),
            "Enter" => Some(Command::Confirm),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Not valid in the current phase.
    Ignored,
    /// Valid, but the piece could not move or turn.
    Blocked,
    Moved,
    Rotated,
    Locked(LockReport),
    Paused(bool),
    Restarted,
}

impl Outcome {
    /// Whether score, level or lines may have changed.
    pub fn stats_changed(&self) -> bool {
        match self {
            Outcome::Locked(report) => report.cleared > 0,
            Outcome::Restarted => true,
            _ => false,
        }
    }
}

/// Applies `command` to the engine if the scheduler's phase allows it.
pub fn dispatch<R: RandomSource>(
    command: Command,
    engine: &mut Engine<R>,
    scheduler: &mut DropScheduler,
) -> Outcome {
    let outcome = match (scheduler.phase(), command) {
        (Phase::GameOver, Command::Confirm) => {
            engine.restart();
            scheduler.reset();
            Outcome::Restarted
        }
        (Phase::GameOver, _) => Outcome::Ignored,
        (Phase::Running | Phase::Paused, Command::TogglePause) => {
            Outcome::Paused(scheduler.toggle_pause())
        }
        (Phase::Paused, _) => Outcome::Ignored,
        (Phase::Running, Command::MoveLeft) => step(engine.move_piece(-1, 0)),
        (Phase::Running, Command::MoveRight) => step(engine.move_piece(1, 0)),
        (Phase::Running, Command::SoftDrop) => step(engine.move_piece(0, 1)),
        (Phase::Running, Command::Rotate) => {
            if engine.rotate_piece() {
                Outcome::Rotated
            } else {
                Outcome::Blocked
            }
        }
        (Phase::Running, Command::HardDrop) => Outcome::Locked(engine.hard_drop()),
        (Phase::Running, Command::Confirm) => Outcome::Ignored,
    };
    scheduler.sync(engine);
    outcome
}

fn step(moved: bool) -> Outcome {
    if moved {
        Outcome::Moved
    } else {
        Outcome::Blocked
    }
}
