use crate::board::Board;
use crate::common::{RandomSource, Stats};
use crate::engine::{ActivePiece, Engine, LockReport, NextPiece};
use crate::input::{dispatch, Command, Outcome};
use crate::pieces::PieceSet;
use crate::scheduler::{DropScheduler, Phase};

/// Everything a renderer may look at for one frame.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub active: &'a ActivePiece,
    pub next: &'a NextPiece,
    pub stats: Stats,
    pub phase: Phase,
}

/// One game: the engine plus the clock and input gating around it.
pub struct Session<R> {
    engine: Engine<R>,
    scheduler: DropScheduler,
}

impl<R: RandomSource> Session<R> {
    pub fn new(pieces: PieceSet, rng: R) -> Self {
        Self {
            engine: Engine::new(pieces, rng),
            scheduler: DropScheduler::new(),
        }
    }

    pub fn handle(&mut self, command: Command) -> Outcome {
        dispatch(command, &mut self.engine, &mut self.scheduler)
    }

    pub fn tick(&mut self, delta_ms: u32) -> Option<LockReport> {
        self.scheduler.tick(&mut self.engine, delta_ms)
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn stats(&self) -> Stats {
        self.engine.stats()
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            board: self.engine.board(),
            active: self.engine.active(),
            next: self.engine.next(),
            stats: self.engine.stats(),
            phase: self.scheduler.phase(),
        }
    }
}

#[cfg(test)]
impl<R> Session<R> {
    pub(crate) fn engine_mut_for_test(&mut self) -> &mut Engine<R> {
        &mut self.engine
    }
}
