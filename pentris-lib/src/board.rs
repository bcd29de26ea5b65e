use crate::common::{Dot, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_IDX};
use crate::shape::Shape;

/// The playfield. Row 0 is the top.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY_IDX; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(EMPTY_IDX);
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < BOARD_WIDTH && y < BOARD_HEIGHT {
            self.cells[y][x]
        } else {
            EMPTY_IDX
        }
    }

    pub fn set(&mut self, x: usize, y: usize, color: u8) {
        if x < BOARD_WIDTH && y < BOARD_HEIGHT {
            self.cells[y][x] = color;
        }
    }

    pub fn rows(&self) -> &[[u8; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.cells
    }

    pub fn filled_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c != EMPTY_IDX)
            .count()
    }

    /// True when `shape` at `origin` leaves the well sideways or through the
    /// floor, or overlaps a filled cell. Rows above the top never collide.
    pub fn collides(&self, origin: Dot, shape: &Shape) -> bool {
        for (col, row) in shape.cells() {
            let x = origin.x as i32 + col as i32;
            let y = origin.y as i32 + row as i32;
            if x < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
                return true;
            }
            if y >= 0 && self.cells[y as usize][x as usize] != EMPTY_IDX {
                return true;
            }
        }
        false
    }

    /// Writes `color` under every occupied cell of `shape` that is on the
    /// board. Cells above the top are dropped.
    pub fn draw_shape(&mut self, origin: Dot, shape: &Shape, color: u8) {
        for (col, row) in shape.cells() {
            let x = origin.x as i32 + col as i32;
            let y = origin.y as i32 + row as i32;
            if x >= 0 && y >= 0 {
                self.set(x as usize, y as usize, color);
            }
        }
    }

    pub fn row_is_full(&self, row: usize) -> bool {
        row < BOARD_HEIGHT && self.cells[row].iter().all(|&c| c != EMPTY_IDX)
    }

    /// Removes `row`, shifts everything above it down by one and opens an
    /// empty row at the top.
    fn remove_row(&mut self, row: usize) {
        for y in (1..=row).rev() {
            self.cells[y] = self.cells[y - 1];
        }
        self.cells[0] = [EMPTY_IDX; BOARD_WIDTH];
    }

    /// Removes every full row, scanning from the bottom. Returns how many
    /// rows went away.
    pub fn clear_lines(&mut self) -> u8 {
        let mut cleared = 0;
        let mut row = self.height();
        while row > 0 {
            if self.row_is_full(row - 1) {
                self.remove_row(row - 1);
                cleared += 1;
                // The row above now sits at the same index.
                continue;
            }
            row -= 1;
        }
        cleared
    }

    /// Builds a board from rows of `#`/`.` aligned to the bottom; `#` cells
    /// get color 1.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let mut board = Board::new();
        let top = BOARD_HEIGHT - rows.len();
        for (dy, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    board.set(x, top + dy, 1);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "##########";
    const EMPTY_ROW: &str = "..........";

    fn shape(text: &str) -> Shape {
        Shape::parse(text).unwrap()
    }

    #[test]
    fn empty_board_accepts_in_bounds_placements() {
        let board = Board::new();
        let x = shape(".#.\n###\n.#.");
        for oy in 0..=(BOARD_HEIGHT as i8 - 3) {
            for ox in 0..=(BOARD_WIDTH as i8 - 3) {
                assert!(!board.collides(Dot::new(ox, oy), &x));
            }
        }
    }

    #[test]
    fn walls_and_floor_collide() {
        let board = Board::new();
        let i = shape("#####");
        assert!(board.collides(Dot::new(-1, 0), &i));
        assert!(board.collides(Dot::new(6, 0), &i));
        assert!(!board.collides(Dot::new(5, 0), &i));
        assert!(board.collides(Dot::new(0, BOARD_HEIGHT as i8), &i));
        assert!(!board.collides(Dot::new(0, BOARD_HEIGHT as i8 - 1), &i));
    }

    #[test]
    fn rows_above_top_never_collide() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH {
            board.set(x, 0, 3);
        }
        let v = shape("#..\n#..\n###");
        assert!(!board.collides(Dot::new(0, -3), &v));
        assert!(board.collides(Dot::new(0, -2), &v));
        // Still blocked sideways while above the top.
        assert!(board.collides(Dot::new(-1, -3), &v));
    }

    #[test]
    fn overlap_collides() {
        let mut board = Board::new();
        board.set(4, 10, 2);
        let p = shape("##\n##\n#.");
        assert!(board.collides(Dot::new(4, 8), &p));
        assert!(board.collides(Dot::new(3, 9), &p));
        assert!(!board.collides(Dot::new(5, 8), &p));
    }

    #[test]
    fn draw_shape_only_touches_occupied_cells() {
        let mut board = Board::from_rows(&["#........."]);
        let before = board.clone();
        let u = shape("#.#\n###");
        let origin = Dot::new(3, 5);
        board.draw_shape(origin, &u, 6);

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let col = x as i32 - 3;
                let row = y as i32 - 5;
                let inside = (0..3).contains(&col) && (0..2).contains(&row);
                if inside && u.get_bit(col as u8, row as u8) {
                    assert_eq!(board.get(x, y), 6);
                } else {
                    assert_eq!(board.get(x, y), before.get(x, y));
                }
            }
        }
    }

    #[test]
    fn draw_shape_drops_cells_above_top() {
        let mut board = Board::new();
        board.draw_shape(Dot::new(0, -2), &shape("#..\n#..\n###"), 4);
        assert_eq!(board.filled_cells(), 3);
        assert_eq!(board.get(0, 0), 4);
        assert_eq!(board.get(2, 0), 4);
    }

    #[test]
    fn clears_single_bottom_row() {
        let mut board = Board::from_rows(&["#...#.....", FULL]);
        let filled = board.filled_cells();
        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.filled_cells(), filled - BOARD_WIDTH);
        assert!(board.rows()[0].iter().all(|&c| c == EMPTY_IDX));
        assert_eq!(board.get(0, BOARD_HEIGHT - 1), 1);
        assert_eq!(board.get(4, BOARD_HEIGHT - 1), 1);
        assert_eq!(board.get(1, BOARD_HEIGHT - 1), EMPTY_IDX);
    }

    #[test]
    fn clears_non_contiguous_top_rows() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH {
            board.set(x, 0, 2);
            board.set(x, 2, 5);
        }
        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.filled_cells(), 0);
    }

    #[test]
    fn clears_adjacent_rows_and_keeps_order() {
        let mut board = Board::from_rows(&["..#.......", FULL, ".#........", FULL, FULL]);
        assert_eq!(board.clear_lines(), 3);
        assert_eq!(board.filled_cells(), 2);
        assert_eq!(board.get(1, BOARD_HEIGHT - 1), 1);
        assert_eq!(board.get(2, BOARD_HEIGHT - 2), 1);
        assert!(!board.row_is_full(BOARD_HEIGHT - 1));
    }

    #[test]
    fn nothing_to_clear() {
        let mut board = Board::from_rows(&[EMPTY_ROW, "#########."]);
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn dimensions_bound_collisions() {
        let board = Board::new();
        let dot = shape("#");
        let right = board.width() as i8 - 1;
        let bottom = board.height() as i8 - 1;
        assert!(!board.collides(Dot::new(right, bottom), &dot));
        assert!(board.collides(Dot::new(right + 1, bottom), &dot));
        assert!(board.collides(Dot::new(right, bottom + 1), &dot));
        assert_eq!(board.rows().len(), board.height());
        assert_eq!(board.rows()[0].len(), board.width());
    }
}
