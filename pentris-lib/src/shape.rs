#![cfg_attr(not(test), allow(dead_code))]

use core::fmt;

use no_std_strings::str32;

/// Largest bounding box a template may use.
pub const MAX_SIDE: u8 = 5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShapeError {
    Empty,
    TooLarge { width: usize, height: usize },
    RaggedRows { row: usize, expected: usize, found: usize },
    InvalidCell(char),
    NoCells,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Empty => write!(f, "shape template is empty"),
            ShapeError::TooLarge { width, height } => write!(
                f,
                "shape template is {}x{}, larger than {}x{}",
                width, height, MAX_SIDE, MAX_SIDE
            ),
            ShapeError::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} of shape template has {} cells, expected {}",
                row, found, expected
            ),
            ShapeError::InvalidCell(ch) => write!(f, "unknown cell character {:?}", ch),
            ShapeError::NoCells => write!(f, "shape template has no occupied cells"),
        }
    }
}

impl core::error::Error for ShapeError {}

/// Boolean cell matrix of at most 5x5, packed row-major into `data`
/// (bit `row * width + col`). `wh` holds width in the high nibble and
/// height in the low nibble.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub struct Shape {
    pub data: u32,
    pub wh: u8,
}

impl Shape {
    /// Parses `#` (occupied) and `.` (empty) rows. Every row must have the
    /// same length.
    pub fn parse(text: &str) -> Result<Self, ShapeError> {
        let mut data = 0;
        let mut width = 0;
        let mut height = 0;
        for (row, line) in text.lines().enumerate() {
            let len = line.chars().count();
            if row == 0 {
                width = len;
            } else if len != width {
                return Err(ShapeError::RaggedRows {
                    row,
                    expected: width,
                    found: len,
                });
            }
            height += 1;
            if width > MAX_SIDE as usize || height > MAX_SIDE as usize {
                return Err(ShapeError::TooLarge { width, height });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => data |= 1 << (row * width + col),
                    '.' => {}
                    other => return Err(ShapeError::InvalidCell(other)),
                }
            }
        }
        if width == 0 || height == 0 {
            return Err(ShapeError::Empty);
        }
        if data == 0 {
            return Err(ShapeError::NoCells);
        }
        Ok(Self {
            data,
            wh: (width as u8) << 4 | height as u8,
        })
    }

    pub fn width(&self) -> u8 {
        self.wh >> 4
    }

    pub fn height(&self) -> u8 {
        self.wh & 0x0f
    }

    pub fn cell_count(&self) -> u32 {
        self.data.count_ones()
    }

    pub fn get_bit(&self, col: u8, row: u8) -> bool {
        if col >= self.width() || row >= self.height() {
            return false;
        }
        self.data & (1 << (row * self.width() + col)) != 0
    }

    /// Clockwise quarter turn: cell (r, c) of an RxC matrix lands on
    /// (c, R-1-r) of the CxR result.
    pub fn rotate(&self) -> Self {
        let height = self.height();
        let width = self.width();
        let mut rotated: u32 = 0;

        for row in 0..height {
            for col in 0..width {
                if self.get_bit(col, row) {
                    let new_row = col;
                    let new_col = height - 1 - row;
                    rotated |= 1 << (new_row * height + new_col);
                }
            }
        }

        Self {
            data: rotated,
            wh: height << 4 | width, // flip
        }
    }

    /// Iterates occupied cells as (col, row) offsets from the top-left.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..self.width())
                .filter(move |&col| self.get_bit(col, row))
                .map(move |col| (col, row))
        })
    }

    pub fn str(&self) -> str32 {
        let mut repr = str32::new();
        for row in 0..self.height() {
            for col in 0..self.width() {
                repr.push(if self.get_bit(col, row) { "#" } else { "." });
            }
            repr.push("\n");
        }
        repr
    }
}
