use std::cell::RefCell;
use std::collections::VecDeque;

use pentris_lib::{
    common::{
        GameController, PaletteIndexer, Renderer, Stats, Timer, BOARD_HEIGHT, BOARD_WIDTH,
        PALETTE,
    },
    config::GameConfig,
    game::run_game,
    input::Command,
    scheduler::Phase,
    session::Frame,
    shape::Shape,
};
use smart_leds::RGB8;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

const CELL_SIZE: f64 = 30.0;
const NEXT_CELL_SIZE: f64 = 15.0;
const GRID_LINE: &str = "#333";

// Console logging macro
#[allow(unused_macros)]
macro_rules! log {
    ( $( $t:tt )* ) => {
        web_sys::console::log_1(&format!( $( $t )* ).into());
    }
}

fn css(color: RGB8) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

// Timer implementation for WASM
pub struct WasmTimer;

impl Timer for WasmTimer {
    async fn sleep_millis(&self, millis: u64) {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis as i32);
            }
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }

    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

// Display implementation for WASM
pub struct WasmDisplay {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    next_canvas: HtmlCanvasElement,
    next_context: CanvasRenderingContext2d,
}

impl WasmDisplay {
    pub fn new(canvas: HtmlCanvasElement, next_canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = context_2d(&canvas)?;
        let next_context = context_2d(&next_canvas)?;

        canvas.set_width((BOARD_WIDTH as f64 * CELL_SIZE) as u32);
        canvas.set_height((BOARD_HEIGHT as f64 * CELL_SIZE) as u32);

        Ok(Self {
            canvas,
            context,
            next_canvas,
            next_context,
        })
    }

    fn draw_grid(&self) {
        let ctx = &self.context;
        ctx.set_stroke_style_str(GRID_LINE);
        ctx.set_line_width(1.0);
        let width = BOARD_WIDTH as f64 * CELL_SIZE;
        let height = BOARD_HEIGHT as f64 * CELL_SIZE;

        for col in 0..=BOARD_WIDTH {
            ctx.begin_path();
            ctx.move_to(col as f64 * CELL_SIZE, 0.0);
            ctx.line_to(col as f64 * CELL_SIZE, height);
            ctx.stroke();
        }
        for row in 0..=BOARD_HEIGHT {
            ctx.begin_path();
            ctx.move_to(0.0, row as f64 * CELL_SIZE);
            ctx.line_to(width, row as f64 * CELL_SIZE);
            ctx.stroke();
        }
    }

    fn draw_cell(ctx: &CanvasRenderingContext2d, x: f64, y: f64, size: f64, color: u8) {
        ctx.set_fill_style_str(&css(PALETTE.at(color)));
        ctx.fill_rect(x, y, size, size);
        ctx.set_stroke_style_str(GRID_LINE);
        ctx.stroke_rect(x, y, size, size);
    }

    fn draw_shape(ctx: &CanvasRenderingContext2d, x: f64, y: f64, size: f64, shape: &Shape, color: u8) {
        for (col, row) in shape.cells() {
            Self::draw_cell(
                ctx,
                x + col as f64 * size,
                y + row as f64 * size,
                size,
                color,
            );
        }
    }

    fn draw_next(&self, frame: &Frame<'_>) {
        let ctx = &self.next_context;
        let width = self.next_canvas.width() as f64;
        let height = self.next_canvas.height() as f64;
        ctx.set_fill_style_str("#111");
        ctx.fill_rect(0.0, 0.0, width, height);

        let shape = &frame.next.shape;
        let offset_x = (width - shape.width() as f64 * NEXT_CELL_SIZE) / 2.0;
        let offset_y = (height - shape.height() as f64 * NEXT_CELL_SIZE) / 2.0;
        Self::draw_shape(ctx, offset_x, offset_y, NEXT_CELL_SIZE, shape, frame.next.color);
    }

    fn draw_banner(&self, title: &str, subtitle: &str) {
        let ctx = &self.context;
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        ctx.fill_rect(0.0, 0.0, width, height);
        ctx.set_fill_style_str("#fff");
        ctx.set_font("24px Arial");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(title, width / 2.0, height / 2.0);
        if !subtitle.is_empty() {
            ctx.set_font("14px Arial");
            let _ = ctx.fill_text(subtitle, width / 2.0, height / 2.0 + 28.0);
        }
    }
}

impl Renderer for WasmDisplay {
    async fn draw(&mut self, frame: &Frame<'_>) {
        let ctx = &self.context;
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.draw_grid();

        for (y, row) in frame.board.rows().iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                if color != 0 {
                    Self::draw_cell(ctx, x as f64 * CELL_SIZE, y as f64 * CELL_SIZE, CELL_SIZE, color);
                }
            }
        }

        let active = frame.active;
        Self::draw_shape(
            ctx,
            active.origin.x as f64 * CELL_SIZE,
            active.origin.y as f64 * CELL_SIZE,
            CELL_SIZE,
            &active.shape,
            active.color,
        );

        self.draw_next(frame);

        match frame.phase {
            Phase::Running => {}
            Phase::Paused => self.draw_banner("PAUSED", ""),
            Phase::GameOver => self.draw_banner(
                &format!("GAME OVER! Final score: {}", frame.stats.score),
                "Press Enter to play again",
            ),
        }
    }

    fn update_stats(&mut self, stats: Stats) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for (id, value) in [
            ("score", stats.score),
            ("level", stats.level),
            ("lines", stats.lines),
        ] {
            if let Some(element) = document.get_element_by_id(id) {
                element.set_text_content(Some(&value.to_string()));
            }
        }
    }
}

thread_local! {
    static PENDING: RefCell<VecDeque<Command>> = RefCell::new(VecDeque::new());
}

// Controller implementation for WASM
pub struct WasmController;

impl WasmController {
    pub fn new() -> Self {
        Self
    }

    /// Queues the command for `event`, returning whether the key was ours.
    pub fn handle_key_down(event: &KeyboardEvent) -> bool {
        match Command::from_key(event.key().as_str()) {
            Some(command) => {
                PENDING.with(|pending| pending.borrow_mut().push_back(command));
                true
            }
            None => false,
        }
    }
}

impl GameController for WasmController {
    fn poll(&mut self) -> Option<Command> {
        PENDING.with(|pending| pending.borrow_mut().pop_front())
    }
}

fn random_seed() -> u32 {
    let mut bytes = [0u8; 4];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u32::from_le_bytes(bytes),
        Err(err) => {
            log!("getrandom failed ({}), seeding from the clock", err);
            js_sys::Date::now() as u32
        }
    }
}

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

// Export the start_game function for JavaScript
#[wasm_bindgen]
pub async fn start_game(
    canvas: HtmlCanvasElement,
    next_canvas: HtmlCanvasElement,
) -> Result<(), JsValue> {
    let config = GameConfig::default();
    config
        .validate()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let mut display = WasmDisplay::new(canvas, next_canvas)?;
    let mut controller = WasmController::new();
    let timer = WasmTimer;

    run_game(&config, &mut display, &mut controller, &timer, random_seed).await;

    Ok(())
}

// Export key handling for JavaScript; the page should call
// `preventDefault` when this returns true so arrows and space don't scroll.
#[wasm_bindgen]
pub fn handle_key_down(event: KeyboardEvent) -> bool {
    WasmController::handle_key_down(&event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentris_lib::common::{EMPTY, ORANGE};

    #[test]
    fn css_colors() {
        assert_eq!(css(EMPTY), "#000000");
        assert_eq!(css(ORANGE), "#FFA500");
    }

    #[test]
    fn controller_drains_in_order() {
        PENDING.with(|pending| {
            let mut pending = pending.borrow_mut();
            pending.push_back(Command::MoveLeft);
            pending.push_back(Command::HardDrop);
        });
        let mut controller = WasmController::new();
        assert_eq!(controller.poll(), Some(Command::MoveLeft));
        assert_eq!(controller.poll(), Some(Command::HardDrop));
        assert_eq!(controller.poll(), None);
    }
}
