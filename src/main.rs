//! Scrap Runner entry point
//!
//! On wasm32 this wires the kernel to a canvas, the keyboard, Web Audio
//! and LocalStorage. The native binary drives a scripted demo run of
//! the first level through the same fixed-step loop, useful for
//! profiling and for exercising the persistence paths.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use scrap_runner::audio::{AudioManager, cue_for_event};
    use scrap_runner::consts::*;
    use scrap_runner::input::InputTracker;
    use scrap_runner::levels;
    use scrap_runner::progress::{LeaderEntry, Leaderboard, ProgressData};
    use scrap_runner::render::{DrawCommand, build_frame};
    use scrap_runner::run::RunStats;
    use scrap_runner::sim::{GameEvent, GameState, Tile, tick};

    struct Game {
        state: GameState,
        levels: Vec<scrap_runner::LevelDefinition>,
        tracker: InputTracker,
        stats: RunStats,
        audio: AudioManager,
        progress: ProgressData,
        last_time: f64,
        finished: bool,
    }

    impl Game {
        fn new() -> Self {
            let levels = levels::builtin();
            let progress = ProgressData::load();
            let mut audio = AudioManager::new();
            audio.update_settings(&progress.settings);
            Self {
                state: GameState::new(&levels[0], None),
                levels,
                tracker: InputTracker::new(),
                stats: RunStats::new(),
                audio,
                progress,
                last_time: 0.0,
                finished: false,
            }
        }

        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                MAX_FRAME_DT
            };
            self.last_time = time;

            let input = self.tracker.snapshot();
            let events = tick(&mut self.state, &input, dt);
            for event in &events {
                self.stats.apply_event(event);
                if let Some(cue) = cue_for_event(event) {
                    self.audio.play(cue);
                }
                match *event {
                    GameEvent::Jumped => self.tracker.consume_jump(),
                    GameEvent::LevelComplete { time } => self.on_level_complete(time),
                    GameEvent::GameOver => self.on_game_over(),
                    _ => {}
                }
            }
        }

        fn on_level_complete(&mut self, time: f32) {
            let level = self.stats.level_index;
            let target = self.levels[level].time_target;
            let outcome = self.stats.finish_level(time, target);
            self.progress
                .record_level_result(level, outcome.level_score, time, self.levels.len());
            self.progress.save();

            if self.stats.level_index < self.levels.len() {
                let hearts = self.state.player.hearts;
                self.state =
                    GameState::new(&self.levels[self.stats.level_index], Some(hearts));
            } else {
                self.finish_run();
            }
        }

        fn on_game_over(&mut self) {
            log::info!("run over at level {}", self.stats.level_index + 1);
            self.finished = true;
        }

        fn finish_run(&mut self) {
            self.progress.record_run_total(self.stats.total_score);
            self.progress.save();
            let mut board = Leaderboard::load();
            if board.qualifies(self.stats.total_score) {
                board.add(LeaderEntry {
                    name: self.progress.player_name.clone(),
                    total_score: self.stats.total_score,
                    total_time: self.stats.total_time(),
                    date: format!("{:.0}", scrap_runner::platform::now_ms()),
                });
                board.save();
            }
            log::info!("run complete, total score {}", self.stats.total_score);
            self.finished = true;
        }

        fn draw(&self, ctx: &CanvasRenderingContext2d) {
            for command in build_frame(&self.state) {
                paint(ctx, &command);
            }
        }
    }

    fn paint(ctx: &CanvasRenderingContext2d, command: &DrawCommand) {
        match *command {
            DrawCommand::Background { width, height } => {
                ctx.set_fill_style_str("#101423");
                ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
            }
            DrawCommand::ParallaxStrip { layer, offset_x } => {
                ctx.set_fill_style_str(if layer == 0 { "#181f33" } else { "#202a44" });
                let base = (offset_x as f64).rem_euclid(VIEW_WIDTH as f64);
                for i in 0..6 {
                    let x = base + i as f64 * 140.0 - VIEW_WIDTH as f64;
                    ctx.fill_rect(x, 40.0 + layer as f64 * 30.0, 90.0, 200.0);
                }
            }
            DrawCommand::Tile { x, y, tile } => {
                ctx.set_fill_style_str(match tile {
                    Tile::Solid => "#5a6988",
                    Tile::Hazard => "#d04648",
                    Tile::Empty => return,
                });
                ctx.fill_rect(x as f64, y as f64, TILE_SIZE as f64, TILE_SIZE as f64);
            }
            DrawCommand::Platform { x, y, w, h } => {
                ctx.set_fill_style_str("#8a9bbd");
                ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
            }
            DrawCommand::Collectible {
                x,
                y,
                radius,
                scale,
                secret,
            } => {
                ctx.set_fill_style_str(if secret { "#c779e0" } else { "#f2c14e" });
                ctx.begin_path();
                let _ = ctx.arc(
                    x as f64,
                    y as f64,
                    (radius * scale) as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }
            DrawCommand::Enemy { x, y, w, h, .. } => {
                ctx.set_fill_style_str("#9e4770");
                ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
            }
            DrawCommand::Player {
                x, y, w, h, visible, ..
            } => {
                if visible {
                    ctx.set_fill_style_str("#6ccf7a");
                    ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
                }
            }
            DrawCommand::ExitZone { x, y, w, h } => {
                ctx.set_stroke_style_str("#f2f2f2");
                ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }
        log::info!("Scrap Runner starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("no canvas element, aborting");
            return;
        };
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::warn!("no 2d context, aborting");
            return;
        };

        let game = Rc::new(RefCell::new(Game::new()));
        setup_keyboard(&window, game.clone());
        request_frame(window, ctx, game);
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.tracker.press_left(down),
                    "ArrowRight" | "d" | "D" => g.tracker.press_right(down),
                    " " | "ArrowUp" | "w" | "W" => g.tracker.press_jump(down),
                    "Shift" => g.tracker.press_sprint(down),
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_frame(
        window: web_sys::Window,
        ctx: CanvasRenderingContext2d,
        game: Rc<RefCell<Game>>,
    ) {
        let closure = Closure::once(move |time: f64| {
            {
                let mut g = game.borrow_mut();
                g.update(time);
                g.draw(&ctx);
                if g.finished {
                    return;
                }
            }
            if let Some(window) = web_sys::window() {
                request_frame(window, ctx, game);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use scrap_runner::audio::{AudioManager, cue_for_event};
    use scrap_runner::consts::MAX_FRAME_DT;
    use scrap_runner::input::{InputState, InputTracker};
    use scrap_runner::levels;
    use scrap_runner::progress::{LeaderEntry, Leaderboard, ProgressData};
    use scrap_runner::run::RunStats;
    use scrap_runner::sim::{GameEvent, GamePhase, GameState, tick};

    env_logger::init();
    log::info!("Scrap Runner (native demo) starting...");

    let levels = levels::builtin();
    let mut progress = ProgressData::load();
    let mut audio = AudioManager::new();
    audio.update_settings(&progress.settings);

    let mut state = GameState::new(&levels[0], None);
    let mut tracker = InputTracker::new();
    let mut stats = RunStats::new();

    // Scripted input: run right, hop on a fixed cadence. Enough to see
    // the kernel, events and persistence working end to end.
    tracker.press_right(true);
    let dt = (1.0 / 60.0f32).min(MAX_FRAME_DT);
    let mut sim_time = 0.0f32;
    let mut next_hop = 0.8f32;

    while state.phase == GamePhase::Playing && sim_time < 120.0 {
        if sim_time >= next_hop {
            tracker.press_jump(true);
            tracker.press_jump(false);
            next_hop += 0.8;
        }
        let input: InputState = tracker.snapshot();
        let events = tick(&mut state, &input, dt);
        sim_time += dt;
        for event in &events {
            stats.apply_event(event);
            if let Some(cue) = cue_for_event(event) {
                audio.play(cue);
            }
            if let GameEvent::Jumped = event {
                tracker.consume_jump();
            }
            if let GameEvent::LevelComplete { time } = *event {
                let outcome = stats.finish_level(time, levels[0].time_target);
                log::info!(
                    "level complete in {time:.1}s, time bonus {}",
                    outcome.time_bonus
                );
                progress.record_level_result(0, outcome.level_score, time, levels.len());
            }
        }
    }

    progress.record_run_total(stats.total_score);
    progress.save();
    let mut board = Leaderboard::load();
    if board.qualifies(stats.total_score) {
        board.add(LeaderEntry {
            name: progress.player_name.clone(),
            total_score: stats.total_score,
            total_time: stats.total_time(),
            date: format!("{:.0}", scrap_runner::platform::now_ms()),
        });
        board.save();
    }
    log::info!(
        "demo finished: phase {:?}, score {}, elapsed {:.1}s",
        state.phase,
        stats.total_score,
        state.elapsed
    );
}
