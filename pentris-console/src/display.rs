use std::fmt::Write as _;
use std::io::{self, Write};

use pentris_lib::common::{PaletteIndexer, Renderer, Stats, BOARD_HEIGHT, BOARD_WIDTH, PALETTE};
use pentris_lib::scheduler::Phase;
use pentris_lib::session::Frame;
use smart_leds::RGB8;

const CELL: &str = "██";
const BLANK: &str = " .";
const PANEL_GAP: &str = "   ";

// Simple console display implementation
pub struct ConsoleDisplay {
    stats: Stats,
    cleared_screen: bool,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self {
            stats: Stats::default(),
            cleared_screen: false,
        }
    }
}

fn paint(out: &mut String, color: RGB8) {
    let _ = write!(
        out,
        "\x1b[38;2;{};{};{}m{}\x1b[0m",
        color.r, color.g, color.b, CELL
    );
}

/// Color index under (x, y), with the falling piece drawn over the stack.
fn cell_at(frame: &Frame<'_>, x: usize, y: usize) -> u8 {
    let active = frame.active;
    let col = x as i32 - active.origin.x as i32;
    let row = y as i32 - active.origin.y as i32;
    if col >= 0 && row >= 0 && active.shape.get_bit(col as u8, row as u8) {
        return active.color;
    }
    frame.board.get(x, y)
}

fn side_panel(frame: &Frame<'_>, stats: Stats, line: usize) -> String {
    let next = frame.next;
    let mut out = String::new();
    match line {
        0 => out.push_str("NEXT"),
        1..=5 => {
            let row = (line - 1) as u8;
            if row < next.shape.height() {
                for col in 0..next.shape.width() {
                    if next.shape.get_bit(col, row) {
                        paint(&mut out, PALETTE.at(next.color));
                    } else {
                        out.push_str("  ");
                    }
                }
            }
        }
        7 => {
            let _ = write!(out, "SCORE {}", stats.score);
        }
        8 => {
            let _ = write!(out, "LEVEL {}", stats.level);
        }
        9 => {
            let _ = write!(out, "LINES {}", stats.lines);
        }
        11 => match frame.phase {
            Phase::Running => {}
            Phase::Paused => out.push_str("PAUSED (P to resume)"),
            Phase::GameOver => {
                let _ = write!(out, "GAME OVER! Final score {}", stats.score);
            }
        },
        12 if frame.phase == Phase::GameOver => out.push_str("Press Enter to play again"),
        _ => {}
    }
    out
}

/// Full text of one frame, one entry per terminal line.
fn render_lines(frame: &Frame<'_>, stats: Stats) -> Vec<String> {
    let border = format!("+{}+", "-".repeat(BOARD_WIDTH * 2));
    let mut lines = Vec::with_capacity(BOARD_HEIGHT + 3);
    lines.push(border.clone());

    for y in 0..BOARD_HEIGHT {
        let mut line = String::from("|");
        for x in 0..BOARD_WIDTH {
            match cell_at(frame, x, y) {
                0 => line.push_str(BLANK),
                color => paint(&mut line, PALETTE.at(color)),
            }
        }
        line.push('|');
        line.push_str(PANEL_GAP);
        line.push_str(&side_panel(frame, stats, y));
        lines.push(line);
    }

    lines.push(border);
    lines.push(
        "Arrows/WASD = move, Up = rotate, Space = drop, P = pause, Enter = restart, Q = quit"
            .to_string(),
    );
    lines
}

impl Renderer for ConsoleDisplay {
    async fn draw(&mut self, frame: &Frame<'_>) {
        let mut stdout = io::stdout().lock();
        if !self.cleared_screen {
            let _ = stdout.write_all(b"\x1b[2J");
            self.cleared_screen = true;
        }
        // Move cursor home to overwrite previous frame
        let _ = stdout.write_all(b"\x1b[H");
        for line in render_lines(frame, self.stats) {
            let _ = stdout.write_all(line.as_bytes());
            // Wipe leftovers from a longer previous line.
            let _ = stdout.write_all(b"\x1b[K\n");
        }
        let _ = stdout.flush();
    }

    fn update_stats(&mut self, stats: Stats) {
        self.stats = stats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentris_lib::common::Prng;
    use pentris_lib::input::Command;
    use pentris_lib::pieces::PieceSet;
    use pentris_lib::session::Session;

    #[test]
    fn frame_has_border_rows_and_panel() {
        let session = Session::new(PieceSet::Classic, Prng::new(1));
        let lines = render_lines(&session.frame(), Stats::default());
        assert_eq!(lines.len(), BOARD_HEIGHT + 3);
        assert!(lines[0].starts_with("+--"));
        assert!(lines[1].ends_with("NEXT"));
        assert!(lines[8].ends_with("SCORE 0"));
        assert!(lines[9].ends_with("LEVEL 1"));
        assert!(lines[10].ends_with("LINES 0"));
    }

    #[test]
    fn active_piece_is_painted() {
        let session = Session::new(PieceSet::Classic, Prng::new(3));
        let frame = session.frame();
        let (col, row) = frame.active.shape.cells().next().unwrap();
        let x = frame.active.origin.x as usize + col as usize;
        let y = frame.active.origin.y as usize + row as usize;
        assert_eq!(cell_at(&frame, x, y), frame.active.color);
    }

    #[test]
    fn pause_banner() {
        let mut session = Session::new(PieceSet::Classic, Prng::new(5));
        session.handle(Command::TogglePause);
        let lines = render_lines(&session.frame(), Stats::default());
        assert!(lines[12].contains("PAUSED"));
    }
}
