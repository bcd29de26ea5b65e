use crate::common::{Game, GameController, Prng, RandomSource, Renderer, Timer};
use crate::config::GameConfig;
use crate::log::debug;
use crate::session::Session;

pub struct PentrisGame<'a, D, C, T, R> {
    session: Session<R>,
    display: &'a mut D,
    controller: &'a mut C,
    timer: &'a T,
    frame_millis: u64,
    last_tick: u64,
}

impl<'a, D: Renderer, C: GameController, T: Timer, R: RandomSource> PentrisGame<'a, D, C, T, R> {
    pub fn new(
        config: &GameConfig,
        rng: R,
        display: &'a mut D,
        controller: &'a mut C,
        timer: &'a T,
    ) -> Self {
        let last_tick = timer.now_millis();
        display.update_stats(Default::default());
        Self {
            session: Session::new(config.pieces, rng),
            display,
            controller,
            timer,
            frame_millis: config.frame_millis,
            last_tick,
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    /// One pass of the loop: apply pending input, advance the clock,
    /// publish counters if they moved, draw.
    pub async fn step(&mut self) {
        let mut stats_changed = false;

        while let Some(command) = self.controller.poll() {
            let outcome = self.session.handle(command);
            debug!("input {:?} -> {:?}", command, outcome);
            stats_changed |= outcome.stats_changed();
        }

        let now = self.timer.now_millis();
        let delta = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        if let Some(report) = self.session.tick(delta.min(u32::MAX as u64) as u32) {
            stats_changed |= report.cleared > 0;
        }

        if stats_changed {
            self.display.update_stats(self.session.stats());
        }
        self.display.draw(&self.session.frame()).await;
    }
}

impl<'a, D: Renderer, C: GameController, T: Timer, R: RandomSource> Game
    for PentrisGame<'a, D, C, T, R>
{
    async fn run(&mut self) {
        loop {
            self.step().await;
            self.timer.sleep_millis(self.frame_millis).await;
        }
    }
}

/// Builds a game seeded from `seed_fn` and runs it forever.
pub async fn run_game<D, C, T, F>(
    config: &GameConfig,
    display: &mut D,
    controller: &mut C,
    timer: &T,
    seed_fn: F,
) where
    D: Renderer,
    C: GameController,
    T: Timer,
    F: Fn() -> u32,
{
    let prng = Prng::new(seed_fn());
    let mut game = PentrisGame::new(config, prng, display, controller, timer);
    game.run().await;
}
