use smart_leds::RGB8;

use crate::input::Command;
use crate::session::Frame;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Colors matching the desktop version
pub const EMPTY: RGB8 = RGB8::new(0x00, 0x00, 0x00);
pub const RED: RGB8 = RGB8::new(0xff, 0x00, 0x00);
pub const GREEN: RGB8 = RGB8::new(0x00, 0xff, 0x00);
pub const BLUE: RGB8 = RGB8::new(0x00, 0x00, 0xff);
pub const YELLOW: RGB8 = RGB8::new(0xff, 0xff, 0x00);
pub const MAGENTA: RGB8 = RGB8::new(0xff, 0x00, 0xff);
pub const CYAN: RGB8 = RGB8::new(0x00, 0xff, 0xff);
pub const ORANGE: RGB8 = RGB8::new(0xff, 0xa5, 0x00);
pub const PURPLE: RGB8 = RGB8::new(0x80, 0x00, 0x80);
pub const PINK: RGB8 = RGB8::new(0xff, 0xc0, 0xcb);
pub const BROWN: RGB8 = RGB8::new(0xa5, 0x2a, 0x2a);
pub const GRAY: RGB8 = RGB8::new(0x80, 0x80, 0x80);
pub const DARK_GREEN: RGB8 = RGB8::new(0x00, 0x80, 0x00);

pub const EMPTY_IDX: u8 = 0;

/// Index 0 is the empty cell, 1..=COLOR_COUNT are piece colors.
pub type PaletteType = [RGB8; 13];
pub const PALETTE: PaletteType = [
    EMPTY, RED, GREEN, BLUE, YELLOW, MAGENTA, CYAN, ORANGE, PURPLE, PINK, BROWN, GRAY, DARK_GREEN,
];
pub const COLOR_COUNT: u8 = PALETTE.len() as u8 - 1;

pub trait PaletteIndexer {
    fn at(&self, idx: u8) -> RGB8;
}

impl PaletteIndexer for PaletteType {
    fn at(&self, idx: u8) -> RGB8 {
        self.get(idx as usize).copied().unwrap_or(EMPTY)
    }
}

// Timer abstraction trait
pub trait Timer {
    async fn sleep_millis(&self, millis: u64);
    fn now_millis(&self) -> u64;
}

/// Source of uniform picks for piece and color selection.
pub trait RandomSource {
    /// Returns a value in `0..bound`, or 0 when `bound` is 0.
    fn next_below(&mut self, bound: u8) -> u8;
}

// Simple PRNG implementation
pub struct Prng {
    state: u32,
}

impl Prng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u8 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        (self.state >> 16) as u8
    }
}

impl RandomSource for Prng {
    fn next_below(&mut self, bound: u8) -> u8 {
        if bound == 0 {
            return 0;
        }
        // Redraw the top `256 % bound` values so every residue is equally likely.
        let limit = 256 - 256 % bound as u16;
        loop {
            let value = self.next();
            if (value as u16) < limit {
                return value % bound;
            }
        }
    }
}

// Point/Dot structure for grid coordinates
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Dot {
    pub x: i8,
    pub y: i8,
}

impl Dot {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn move_by(&self, direction: Dot) -> Dot {
        Dot::new(self.x + direction.x, self.y + direction.y)
    }
}

/// Read-only consumer of simulation state.
pub trait Renderer {
    async fn draw(&mut self, frame: &Frame<'_>);

    /// Called once at start and whenever score, level or lines change.
    fn update_stats(&mut self, stats: Stats);
}

/// Source of discrete input events. Drained once per frame.
pub trait GameController {
    fn poll(&mut self) -> Option<Command>;
}

/// Game trait for the frame loop - using generics to avoid dyn issues
pub trait Game {
    async fn run(&mut self);
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Stats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
        }
    }
}

#[cfg(test)]
pub(crate) struct ScriptedRandom {
    values: &'static [u8],
    pos: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    /// Replays `values` in a loop, each reduced modulo the requested bound.
    pub(crate) fn new(values: &'static [u8]) -> Self {
        Self { values, pos: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: u8) -> u8 {
        if bound == 0 || self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prng_stays_in_range() {
        let mut prng = Prng::new(42);
        for bound in 1..=17 {
            for _ in 0..50 {
                assert!(prng.next_below(bound) < bound);
            }
        }
        assert_eq!(prng.next_below(0), 0);
    }

    #[test]
    fn prng_is_deterministic_per_seed() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..20 {
            assert_eq!(a.next_below(12), b.next_below(12));
        }
    }

    fn spread(bound: u8, per_bucket: u32) -> (u32, u32) {
        let mut counts = [0u32; 17];
        let mut prng = Prng::new(0xC0FFEE);
        for _ in 0..per_bucket * bound as u32 {
            counts[prng.next_below(bound) as usize] += 1;
        }
        let counts = &counts[..bound as usize];
        let min = counts.iter().copied().min().unwrap_or(0);
        let max = counts.iter().copied().max().unwrap_or(0);
        (min, max)
    }

    #[test]
    fn prng_draws_are_uniform() {
        // A plain `% bound` on a byte favors the low residues by about 5%.
        for bound in [12, 17] {
            let per_bucket = 100_000;
            let (min, max) = spread(bound, per_bucket);
            assert!(
                max - min < per_bucket * 3 / 100,
                "bound {}: counts range {}..{}",
                bound,
                min,
                max
            );
        }
    }

    #[test]
    fn palette_lookup() {
        assert_eq!(COLOR_COUNT, 12);
        assert_eq!(PALETTE.at(EMPTY_IDX), EMPTY);
        assert_eq!(PALETTE.at(7), ORANGE);
        assert_eq!(PALETTE.at(200), EMPTY);
    }
}
