use crate::board::Board;
use crate::common::{Dot, RandomSource, Stats, BOARD_WIDTH, COLOR_COUNT};
use crate::log::{debug, info, trace};
use crate::pieces::{PieceSet, Template};
use crate::shape::Shape;

pub const POINTS_PER_LINE: u32 = 100;
pub const LINES_PER_LEVEL: u32 = 10;
pub const BASE_DROP_INTERVAL_MS: u32 = 1000;
pub const DROP_INTERVAL_STEP_MS: u32 = 50;
pub const MIN_DROP_INTERVAL_MS: u32 = 50;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ActivePiece {
    pub name: &'static str,
    pub shape: Shape,
    pub color: u8,
    pub origin: Dot,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct NextPiece {
    pub name: &'static str,
    pub shape: Shape,
    pub color: u8,
}

/// What a lock did to the session.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct LockReport {
    pub cleared: u8,
    pub points: u32,
    pub game_over: bool,
}

pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

pub fn drop_interval_for_level(level: u32) -> u32 {
    BASE_DROP_INTERVAL_MS
        .saturating_sub(level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS))
        .max(MIN_DROP_INTERVAL_MS)
}

/// Board, pieces and counters, plus every rule that mutates them.
pub struct Engine<R> {
    board: Board,
    templates: &'static [Template],
    rng: R,
    active: ActivePiece,
    next: NextPiece,
    stats: Stats,
    game_over: bool,
}

impl<R: RandomSource> Engine<R> {
    pub fn new(pieces: PieceSet, rng: R) -> Self {
        let templates = pieces.templates();
        debug_assert!(!templates.is_empty());
        let placeholder = NextPiece {
            name: templates[0].name,
            shape: templates[0].shape,
            color: 1,
        };
        let mut engine = Self {
            board: Board::new(),
            templates,
            rng,
            active: ActivePiece {
                name: placeholder.name,
                shape: placeholder.shape,
                color: placeholder.color,
                origin: Dot::default(),
            },
            next: placeholder,
            stats: Stats::default(),
            game_over: false,
        };
        engine.restart();
        engine
    }

    /// Empties the board, zeroes the counters and deals a fresh
    /// (active, next) pair.
    pub fn restart(&mut self) {
        self.board.clear();
        self.stats = Stats::default();
        self.game_over = false;
        self.next = self.generate_next_piece();
        self.spawn_new_piece();
        info!("new game, {} templates", self.templates.len());
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next(&self) -> &NextPiece {
        &self.next
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn drop_interval(&self) -> u32 {
        drop_interval_for_level(self.stats.level)
    }

    /// Single authority on whether a placement can exist.
    pub fn collides(&self, origin: Dot, shape: &Shape) -> bool {
        self.board.collides(origin, shape)
    }

    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let origin = self.active.origin.move_by(Dot::new(dx, dy));
        if self.collides(origin, &self.active.shape) {
            return false;
        }
        self.active.origin = origin;
        true
    }

    /// Turns the active piece clockwise in place. There is no kick search:
    /// if the turned shape does not fit at the current origin the turn is
    /// dropped.
    pub fn rotate_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let rotated = self.active.shape.rotate();
        if self.collides(self.active.origin, &rotated) {
            trace!("rotation of {} rejected", self.active.name);
            return false;
        }
        self.active.shape = rotated;
        true
    }

    pub fn hard_drop(&mut self) -> LockReport {
        if self.game_over {
            return LockReport {
                game_over: true,
                ..LockReport::default()
            };
        }
        while self.move_piece(0, 1) {}
        self.lock()
    }

    /// Commits the active piece to the board, clears lines, scores and
    /// spawns the next piece.
    pub fn lock(&mut self) -> LockReport {
        if self.game_over {
            return LockReport {
                game_over: true,
                ..LockReport::default()
            };
        }
        let piece = self.active;
        self.board
            .draw_shape(piece.origin, &piece.shape, piece.color);

        let cleared = self.board.clear_lines();
        let points = self.score_lines(cleared);
        self.spawn_new_piece();

        LockReport {
            cleared,
            points,
            game_over: self.game_over,
        }
    }

    fn score_lines(&mut self, cleared: u8) -> u32 {
        if cleared == 0 {
            return 0;
        }
        let points = cleared as u32 * POINTS_PER_LINE * self.stats.level;
        self.stats.lines += cleared as u32;
        self.stats.score += points;
        self.stats.level = level_for_lines(self.stats.lines);
        info!(
            "cleared {} lines for {} points, level {}",
            cleared, points, self.stats.level
        );
        points
    }

    fn generate_next_piece(&mut self) -> NextPiece {
        let idx = self.rng.next_below(self.templates.len() as u8);
        let template = self.templates[idx as usize];
        let color = self.rng.next_below(COLOR_COUNT) + 1;
        NextPiece {
            name: template.name,
            shape: template.shape,
            color,
        }
    }

    fn spawn_new_piece(&mut self) {
        let next = self.next;
        let x = (BOARD_WIDTH / 2) as i8 - (next.shape.width() / 2) as i8;
        self.active = ActivePiece {
            name: next.name,
            shape: next.shape,
            color: next.color,
            origin: Dot::new(x, 0),
        };
        self.next = self.generate_next_piece();
        debug!("spawned {} at x {}", self.active.name, x);

        if self.collides(self.active.origin, &self.active.shape) {
            self.game_over = true;
            info!("game over, final score {}", self.stats.score);
        }
    }
}

#[cfg(test)]
impl<R> Engine<R> {
    pub(crate) fn board_mut_for_test(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn set_stats_for_test(&mut self, stats: Stats) {
        self.stats = stats;
    }
}
