use crate::common::RandomSource;
use crate::engine::{Engine, LockReport};
use crate::log::debug;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Fixed-rate gravity. Accumulates frame time and pulls the active piece
/// down one row whenever the level's drop interval has passed.
#[derive(Clone, Debug)]
pub struct DropScheduler {
    phase: Phase,
    elapsed_ms: u32,
}

impl DropScheduler {
    pub fn new() -> Self {
        Self {
            phase: Phase::Running,
            elapsed_ms: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Running;
        self.elapsed_ms = 0;
    }

    /// Flips between running and paused. Returns whether the game is now
    /// paused; a finished game stays finished.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::GameOver => Phase::GameOver,
        };
        debug!("paused: {}", self.phase == Phase::Paused);
        self.phase == Phase::Paused
    }

    /// Picks up a game over reached through a command.
    pub fn sync<R: RandomSource>(&mut self, engine: &Engine<R>) {
        if engine.is_game_over() {
            self.phase = Phase::GameOver;
        }
    }

    /// Advances the clock by `delta_ms`. At most one automatic drop happens
    /// per tick; whatever time is left over past the interval is discarded.
    pub fn tick<R: RandomSource>(
        &mut self,
        engine: &mut Engine<R>,
        delta_ms: u32,
    ) -> Option<LockReport> {
        if self.phase != Phase::Running {
            return None;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.elapsed_ms < engine.drop_interval() {
            return None;
        }
        self.elapsed_ms = 0;

        let report = if engine.move_piece(0, 1) {
            None
        } else {
            Some(engine.lock())
        };
        self.sync(engine);
        report
    }
}

impl Default for DropScheduler {
    fn default() -> Self {
        Self::new()
    }
}
