//! Tap Rush entry point
//!
//! On the web: Canvas 2D drawing driven by requestAnimationFrame.
//! Natively: a headless autoplay run that logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::{PI, TAU};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use tap_rush::challenges::today_key;
    use tap_rush::highscores::format_date;
    use tap_rush::game::{Collaborators, Game};
    use tap_rush::sim::{FallingObject, GameEvent, GameMode, ObjectColor, ObjectType, SessionPhase};

    /// Browser-side wrapper: the game plus everything needed to draw it
    struct App {
        game: Game,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        dpr: f64,
    }

    impl App {
        fn resize(&mut self) {
            let w = self.canvas.client_width().max(1);
            let h = self.canvas.client_height().max(1);
            self.canvas.set_width((w as f64 * self.dpr) as u32);
            self.canvas.set_height((h as f64 * self.dpr) as u32);
            self.game.resize(w as f32, h as f32);
        }

        fn handle_notices(&mut self) {
            for notice in self.game.drain_notices() {
                match notice {
                    GameEvent::RuleChanged(text) => log::info!("New rule: {}", text),
                    GameEvent::FrenzyStarted => log::info!("FRENZY!"),
                    GameEvent::GameOver { score, .. } => {
                        let qualifies = self
                            .game
                            .last_result()
                            .is_some_and(|r| r.rank.is_some());
                        if qualifies {
                            self.prompt_leaderboard_name(score);
                        }
                    }
                    _ => {}
                }
            }
        }

        fn prompt_leaderboard_name(&mut self, score: u64) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let message = format!("Score {}! Enter your name for the leaderboard:", score);
            if let Ok(Some(name)) = window.prompt_with_message_and_default(&message, "Player") {
                if let Some(rank) = self.game.submit_leaderboard_name(&name, js_sys::Date::now()) {
                    log::info!("Leaderboard rank #{}", rank);
                }
            }
        }

        fn render(&self) {
            let ctx = &self.ctx;
            let state = self.game.state();
            let (w, h) = (state.viewport.width as f64, state.viewport.height as f64);
            let scale = state.viewport.scale() as f64;
            let skin = self.game.active_skin();

            ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0).ok();

            // Background
            ctx.set_fill_style_str(skin.background.base);
            ctx.fill_rect(0.0, 0.0, w, h);
            for (gx, gy, glow) in skin.background.glows {
                ctx.set_fill_style_str(glow);
                ctx.begin_path();
                ctx.arc(gx as f64 * w, gy as f64 * h, w.max(h) * 0.35, 0.0, TAU).ok();
                ctx.fill();
            }

            let shake = self.game.screen_shake() as f64;
            ctx.save();
            if shake > 0.0 {
                let dx = (js_sys::Math::random() - 0.5) * 20.0 * shake;
                let dy = (js_sys::Math::random() - 0.5) * 20.0 * shake;
                ctx.translate(dx, dy).ok();
            }

            for object in &state.objects {
                draw_object(ctx, object, skin.colors.get(object.color));
            }

            for p in &state.particles {
                ctx.set_global_alpha(p.life.max(0.0) as f64);
                ctx.set_fill_style_str(skin.colors.get(p.color));
                ctx.begin_path();
                ctx.arc(p.pos.x as f64, p.pos.y as f64, p.size as f64, 0.0, TAU).ok();
                ctx.fill();
            }

            ctx.set_line_width(3.0 * scale);
            for ring in &state.click_rings {
                ctx.set_global_alpha(ring.life.max(0.0) as f64);
                ctx.set_stroke_style_str(skin.colors.get(ring.color));
                ctx.begin_path();
                let r = 40.0 * scale * ring.scale as f64;
                ctx.arc(ring.pos.x as f64, ring.pos.y as f64, r, 0.0, TAU).ok();
                ctx.stroke();
            }

            ctx.set_fill_style_str("#ffffff");
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.set_font(&format!("bold {}px sans-serif", (24.0 * scale) as u32));
            for popup in &state.popups {
                ctx.set_global_alpha(popup.life.max(0.0) as f64);
                ctx.fill_text(&format!("+{}", popup.points), popup.pos.x as f64, popup.pos.y as f64)
                    .ok();
            }
            ctx.set_global_alpha(1.0);
            ctx.restore();

            self.draw_hud(w, h, scale);
        }

        fn draw_hud(&self, w: f64, h: f64, scale: f64) {
            let ctx = &self.ctx;
            let hud = self.game.snapshot();

            ctx.set_fill_style_str("#ffffff");
            ctx.set_text_baseline("top");
            ctx.set_font(&format!("bold {}px sans-serif", (22.0 * scale) as u32));
            ctx.set_text_align("left");
            ctx.fill_text(&format!("Score {}", hud.score), 16.0, 16.0).ok();
            ctx.fill_text(&format!("Combo x{}", hud.combo), 16.0, 16.0 + 28.0 * scale)
                .ok();
            ctx.set_text_align("right");
            ctx.fill_text(&format!("Best {}", hud.high_score), w - 16.0, 16.0).ok();
            if hud.frenzy_active {
                ctx.set_fill_style_str("#ff9900");
                ctx.fill_text(
                    &format!("FRENZY {:.1}s", hud.frenzy_time_remaining),
                    w - 16.0,
                    16.0 + 28.0 * scale,
                )
                .ok();
            }
            if hud.double_score_active {
                ctx.set_fill_style_str("#00ff85");
                ctx.fill_text(
                    &format!("2x {:.0}s", hud.double_score_time_remaining),
                    w - 16.0,
                    16.0 + 56.0 * scale,
                )
                .ok();
            }

            if let Some(rule) = &hud.rule_text {
                ctx.set_text_align("center");
                ctx.set_fill_style_str("#ffffff");
                ctx.set_font(&format!("bold {}px sans-serif", (30.0 * scale) as u32));
                ctx.fill_text(rule, w / 2.0, 90.0 * scale).ok();
                let bar_w = 240.0 * scale;
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.2)");
                ctx.fill_rect(w / 2.0 - bar_w / 2.0, 130.0 * scale, bar_w, 6.0);
                ctx.set_fill_style_str("#ffffff");
                let remaining = 1.0 - hud.rule_progress as f64;
                ctx.fill_rect(w / 2.0 - bar_w / 2.0, 130.0 * scale, bar_w * remaining, 6.0);
            }

            let overlay = match hud.phase {
                SessionPhase::Menu => Some((
                    "TAP RUSH".to_string(),
                    "Tap or press 1-4 to play (classic, blitz, zen, frenzy)".to_string(),
                )),
                SessionPhase::Paused => Some((
                    "PAUSED".to_string(),
                    "Esc to resume, R to restart, M for menu".to_string(),
                )),
                SessionPhase::Countdown => hud.countdown.map(|n| {
                    let label = if n == 0 { "GO!".to_string() } else { n.to_string() };
                    (label, String::new())
                }),
                SessionPhase::GameOver => Some((
                    format!("GAME OVER - {}", hud.score),
                    "Tap to restart, C to continue (ad), M for menu".to_string(),
                )),
                SessionPhase::Playing => None,
            };
            if let Some((title, subtitle)) = overlay {
                ctx.set_fill_style_str("rgba(0, 0, 0, 0.55)");
                ctx.fill_rect(0.0, 0.0, w, h);
                ctx.set_fill_style_str("#ffffff");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_font(&format!("bold {}px sans-serif", (56.0 * scale) as u32));
                ctx.fill_text(&title, w / 2.0, h / 2.0).ok();
                ctx.set_font(&format!("{}px sans-serif", (18.0 * scale) as u32));
                ctx.fill_text(&subtitle, w / 2.0, h / 2.0 + 56.0 * scale).ok();
            }

            match hud.phase {
                SessionPhase::Menu => {
                    self.draw_challenge(w, h, scale);
                    self.draw_skins(w, scale);
                    self.draw_leaderboard(scale);
                }
                SessionPhase::GameOver => self.draw_leaderboard(scale),
                _ => {}
            }
        }

        /// Top five runs, top-left
        fn draw_leaderboard(&self, scale: f64) {
            let ctx = &self.ctx;
            let scores = self.game.high_scores();
            let line = 22.0 * scale;
            let (x, mut y) = (16.0, 90.0 * scale);

            ctx.set_text_align("left");
            ctx.set_text_baseline("top");
            ctx.set_fill_style_str("#ffd84d");
            ctx.set_font(&format!("bold {}px sans-serif", (18.0 * scale) as u32));
            let title = match scores.top_score() {
                Some(top) => format!("LEADERBOARD (top {})", top),
                None => "LEADERBOARD".to_string(),
            };
            ctx.fill_text(&title, x, y).ok();
            y += line;

            ctx.set_fill_style_str("#ffffff");
            ctx.set_font(&format!("{}px sans-serif", (15.0 * scale) as u32));
            if scores.is_empty() {
                ctx.fill_text("No scores yet", x, y).ok();
                return;
            }
            let now = js_sys::Date::now();
            for (i, entry) in scores.entries.iter().take(5).enumerate() {
                let row = format!(
                    "{}. {}  {}  x{}  {}",
                    i + 1,
                    entry.name,
                    entry.score,
                    entry.combo,
                    format_date(now, entry.timestamp)
                );
                ctx.fill_text(&row, x, y).ok();
                y += line;
            }
        }

        /// Today's challenge and overall progress, bottom-centre
        fn draw_challenge(&self, w: f64, h: f64, scale: f64) {
            let ctx = &self.ctx;
            let Some(challenge) = self.game.today_challenge() else {
                return;
            };
            let progress = self.game.challenges().progress();

            ctx.set_text_align("center");
            ctx.set_text_baseline("bottom");
            ctx.set_fill_style_str(if challenge.completed { "#00ff85" } else { "#ffd84d" });
            ctx.set_font(&format!("bold {}px sans-serif", (16.0 * scale) as u32));
            let status = if challenge.completed { "DONE" } else { "DAILY" };
            let line = format!(
                "{}: {} - score {} combo {} in {}s (+{})",
                status,
                challenge.special_rule,
                challenge.target_score,
                challenge.target_combo,
                challenge.time_limit,
                challenge.reward
            );
            ctx.fill_text(&line, w / 2.0, h - 48.0 * scale).ok();
            ctx.set_fill_style_str("#ffffff");
            ctx.set_font(&format!("{}px sans-serif", (14.0 * scale) as u32));
            let summary = format!(
                "{} challenges completed, {} points",
                progress.completed, progress.total_points
            );
            ctx.fill_text(&summary, w / 2.0, h - 24.0 * scale).ok();
        }

        /// Skin list with lock state, top-right
        fn draw_skins(&self, w: f64, scale: f64) {
            let ctx = &self.ctx;
            let active = self.game.active_skin().id;
            let line = 22.0 * scale;
            let mut y = 90.0 * scale;

            ctx.set_text_align("right");
            ctx.set_text_baseline("top");
            ctx.set_fill_style_str("#ffd84d");
            ctx.set_font(&format!("bold {}px sans-serif", (18.0 * scale) as u32));
            ctx.fill_text("SKINS (S to cycle)", w - 16.0, y).ok();
            y += line;

            ctx.set_font(&format!("{}px sans-serif", (15.0 * scale) as u32));
            for (skin, unlocked) in self.game.skins().skins() {
                let label = if skin.id == active {
                    format!("> {}", skin.name)
                } else if unlocked {
                    skin.name.to_string()
                } else {
                    format!("{} ({} ad)", skin.name, skin.ad_cost)
                };
                ctx.set_fill_style_str(skin.colors.get(ObjectColor::Red));
                ctx.fill_text(&label, w - 16.0, y).ok();
                y += line;
            }
        }
    }

    fn draw_object(ctx: &CanvasRenderingContext2d, object: &FallingObject, color: &str) {
        let (x, y) = (object.pos.x as f64, object.pos.y as f64);
        let r = object.radius() as f64;

        if let Some(glyph) = object.object_type.glyph() {
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.set_font(&format!("{}px sans-serif", object.size as u32));
            ctx.fill_text(glyph, x, y).ok();
            return;
        }

        ctx.save();
        ctx.translate(x, y).ok();
        ctx.rotate(object.rotation as f64).ok();
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        match object.object_type {
            ObjectType::Circle => {
                ctx.arc(0.0, 0.0, r, 0.0, TAU).ok();
            }
            ObjectType::Square => ctx.rect(-r, -r, r * 2.0, r * 2.0),
            ObjectType::Triangle => {
                ctx.move_to(0.0, -r);
                ctx.line_to(r, r);
                ctx.line_to(-r, r);
            }
            ObjectType::Star => {
                for i in 0..10 {
                    let radius = if i % 2 == 0 { r } else { r * 0.45 };
                    let angle = i as f64 * PI / 5.0 - PI / 2.0;
                    let (px, py) = (radius * angle.cos(), radius * angle.sin());
                    if i == 0 {
                        ctx.move_to(px, py);
                    } else {
                        ctx.line_to(px, py);
                    }
                }
            }
            _ => {
                // Heart
                ctx.move_to(0.0, r * 0.9);
                ctx.bezier_curve_to(-r * 1.4, -r * 0.1, -r * 0.6, -r * 1.1, 0.0, -r * 0.35);
                ctx.bezier_curve_to(r * 0.6, -r * 1.1, r * 1.4, -r * 0.1, 0.0, r * 0.9);
            }
        }
        ctx.close_path();
        ctx.fill();
        ctx.restore();
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        log::info!("Tap Rush starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let viewport = tap_rush::sim::Viewport::new(
            canvas.client_width().max(1) as f32,
            canvas.client_height().max(1) as f32,
        );
        let mut game = Game::new(seed, viewport, Collaborators::browser());

        let challenge = game.set_today(&today_key());
        log::info!("Today's challenge: {} (reward {})", challenge.special_rule, challenge.reward);

        let app = Rc::new(RefCell::new(App {
            game,
            canvas: canvas.clone(),
            ctx,
            last_time: 0.0,
            dpr: window.device_pixel_ratio(),
        }));
        app.borrow_mut().resize();

        setup_input_handlers(&canvas, app.clone())?;
        setup_auto_pause(app.clone())?;
        start_loop(app);

        log::info!("Tap Rush running with seed {}", seed);
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Taps
        {
            let app = app.clone();
            let canvas_ref = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let rect = canvas_ref.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let y = event.client_y() as f64 - rect.top();
                let restarted = {
                    let mut a = app.borrow_mut();
                    match a.game.phase() {
                        SessionPhase::Menu => a.game.start(),
                        SessionPhase::GameOver => a.game.restart(),
                        _ => {
                            a.game.tap(x as f32, y as f32);
                            a.handle_notices();
                            false
                        }
                    }
                };
                if restarted {
                    start_loop(app.clone());
                }
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let new_chain = {
                    let mut a = app.borrow_mut();
                    let phase = a.game.phase();
                    match (event.key().as_str(), phase) {
                        ("Escape", _) => {
                            a.game.toggle_pause();
                            false
                        }
                        ("1", SessionPhase::Menu) => a.game.start_mode(GameMode::Classic),
                        ("2", SessionPhase::Menu) => a.game.start_mode(GameMode::Blitz),
                        ("3", SessionPhase::Menu) => a.game.start_mode(GameMode::Zen),
                        ("4", SessionPhase::Menu) => a.game.start_mode(GameMode::Frenzy),
                        (" " | "Enter", SessionPhase::Menu) => a.game.start(),
                        ("r" | "R", SessionPhase::Paused | SessionPhase::GameOver) => {
                            a.game.restart()
                        }
                        ("m" | "M", SessionPhase::Paused | SessionPhase::GameOver) => {
                            a.game.exit_to_menu()
                        }
                        ("c" | "C", SessionPhase::GameOver) => {
                            a.game.continue_with_ad();
                            false
                        }
                        ("d" | "D", SessionPhase::Playing) => {
                            a.game.double_score_with_ad();
                            false
                        }
                        ("s" | "S", SessionPhase::Menu) => {
                            cycle_skin(&mut a.game);
                            false
                        }
                        _ => false,
                    }
                };
                if new_chain {
                    start_loop(app.clone());
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Select the next skin, unlocking it with a rewarded ad when needed
    fn cycle_skin(game: &mut Game) {
        let skins = &tap_rush::skins::SKINS;
        let current = skins
            .iter()
            .position(|s| s.id == game.active_skin().id)
            .unwrap_or(0);
        let next = skins[(current + 1) % skins.len()].id;
        if !game.skins().is_unlocked(next) && !game.unlock_skin_with_ad(next) {
            return;
        }
        if game.select_skin(next) {
            log::info!("Skin: {}", game.active_skin().name);
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Tab switch or minimize
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                    && app.borrow_mut().game.pause()
                {
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if app.borrow_mut().game.pause() {
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Start a fresh frame chain; older chains stop on their next frame
    fn start_loop(app: Rc<RefCell<App>>) {
        let generation = {
            let mut a = app.borrow_mut();
            a.last_time = 0.0;
            a.game.generation()
        };
        request_animation_frame(app, generation);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, generation: u64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, generation, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, generation: u64, time: f64) {
        {
            let mut a = app.borrow_mut();
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            a.last_time = time;

            // A newer chain owns the game now
            if !a.game.frame(generation, dt) {
                return;
            }
            a.handle_notices();
            a.render();
        }

        request_animation_frame(app, generation);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tap_rush::challenges::today_key;
    use tap_rush::sim::{GameMode, SessionPhase, Viewport};
    use tap_rush::{Game, HudSnapshot};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = args
        .next()
        .map(|name| {
            GameMode::from_str(&name).unwrap_or_else(|| {
                log::warn!("Unknown mode '{}', using classic", name);
                GameMode::Classic
            })
        })
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    log::info!("Tap Rush (native) starting: headless autoplay, mode={} seed={}", mode.as_str(), seed);

    let mut game = Game::headless(seed, Viewport::default());
    let challenge = game.set_today(&today_key());
    println!("Today's challenge: {} (score {}, combo {})", challenge.special_rule, challenge.target_score, challenge.target_combo);

    game.start_mode(mode);
    let outcome = autoplay(&mut game, 90.0);

    let hud: &HudSnapshot = game.snapshot();
    println!(
        "{} after {:.1}s: score {} max combo {} best {}",
        if game.phase() == SessionPhase::GameOver { "Game over" } else { "Time up" },
        hud.elapsed,
        hud.score,
        hud.max_combo,
        hud.high_score
    );
    println!("Taps: {} hits, {} wrong", outcome.hits, outcome.wrong);
    let progress = game.challenges().progress();
    println!(
        "Daily challenge {}: {} completed, {} points",
        if game.today_challenge().is_some_and(|c| c.completed) { "done" } else { "open" },
        progress.completed,
        progress.total_points
    );
}

#[cfg(not(target_arch = "wasm32"))]
struct AutoplayStats {
    hits: u32,
    wrong: u32,
}

/// Bot that taps the lowest matching object every few frames, then starts
/// making mistakes once it gets "tired"
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(game: &mut tap_rush::Game, seconds: f32) -> AutoplayStats {
    use tap_rush::sim::{SessionPhase, TapOutcome};

    const DT: f32 = 1.0 / 60.0;
    const TAP_EVERY: u32 = 20;
    const TIRED_AFTER: f32 = 45.0;

    let mut stats = AutoplayStats { hits: 0, wrong: 0 };
    let frames = (seconds / DT) as u32;
    for frame in 0..frames {
        game.step(DT);
        if game.phase() != SessionPhase::Playing {
            break;
        }
        if frame % TAP_EVERY != 0 {
            continue;
        }

        let state = game.state();
        let Some(rule) = &state.rule else {
            continue;
        };
        let tired = state.session.elapsed > TIRED_AFTER;
        let target = state
            .objects
            .iter()
            .filter(|o| o.pos.y > 0.0)
            .filter(|o| rule.matches(o.object_type, o.color) != tired)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|o| o.pos);

        if let Some(pos) = target {
            match game.tap(pos.x, pos.y) {
                TapOutcome::Hit { frenzy_started, .. } => {
                    stats.hits += 1;
                    if frenzy_started {
                        log::info!("Autoplay reached frenzy at {:.1}s", game.state().session.elapsed);
                    }
                }
                TapOutcome::Wrong { .. } => stats.wrong += 1,
                _ => {}
            }
        }
    }
    stats
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
