//! Flappy Night entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_night::audio::AudioManager;
    use flappy_night::persistence::LocalStorageStore;
    use flappy_night::platform::{Collaborators, FrameRenderer, FrameView};
    use flappy_night::renderer::{RenderState, SceneBuilder};
    use flappy_night::sim::{GamePhase, Tuning};
    use flappy_night::{Game, Settings};

    /// Canvas renderer; frames are dropped until WebGPU is ready
    struct WebRenderer {
        render_state: Option<RenderState>,
        scene: SceneBuilder,
    }

    impl FrameRenderer for WebRenderer {
        fn draw(&mut self, view: &FrameView<'_>) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = self.scene.build(view);
            match render_state.render(vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        audio: AudioManager,
        store: LocalStorageStore,
        renderer: WebRenderer,
        settings: Settings,
        /// Last HUD contents, to skip redundant DOM writes
        hud: Option<(GamePhase, u32, u32)>,
    }

    impl App {
        fn action(&mut self) {
            self.audio.resume();
            let Self {
                game,
                audio,
                store,
                renderer,
                ..
            } = self;
            let mut io = Collaborators {
                audio,
                store,
                renderer,
            };
            game.primary_action(&mut io);
        }

        fn frame(&mut self, time: f64) {
            let Self {
                game,
                audio,
                store,
                renderer,
                ..
            } = self;
            let mut io = Collaborators {
                audio,
                store,
                renderer,
            };
            game.frame(time, &mut io);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let state = &self.game.state;
            let current = (state.phase, state.score, state.best_score);
            if self.hud == Some(current) {
                return;
            }
            self.hud = Some(current);

            if let Some(el) = document.get_element_by_id("score_card") {
                el.set_text_content(Some(&format!(
                    "Score: {} | High: {}",
                    state.score, state.best_score
                )));
            }

            if let Some(el) = document.get_element_by_id("overlay") {
                let text = match state.phase {
                    GamePhase::Idle => Some(("FLAPPY NIGHT", "Press SPACE to Start")),
                    GamePhase::Ended => Some(("GAME OVER", "Press SPACE to Restart")),
                    GamePhase::Playing => None,
                };
                match text {
                    Some((title, prompt)) => {
                        if let Some(t) = document.get_element_by_id("overlay_title") {
                            t.set_text_content(Some(title));
                        }
                        if let Some(p) = document.get_element_by_id("overlay_prompt") {
                            p.set_text_content(Some(prompt));
                        }
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Flappy Night starting...");

        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element, nothing to run");
            return;
        };

        let tuning = Tuning::default();
        let viewport = (tuning.viewport_width, tuning.viewport_height);
        canvas.set_width(viewport.0 as u32);
        canvas.set_height(viewport.1 as u32);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut store = LocalStorageStore;
        let game = Game::new(seed, tuning, &mut store);

        // Decoration RNG derived from, but independent of, the gameplay seed
        let mut scene = SceneBuilder::new(game.state.seed ^ 0x5eed, viewport.0);
        scene.reduced_motion = settings.reduced_motion;

        let app = Rc::new(RefCell::new(App {
            game,
            audio: AudioManager::new(settings.clone()),
            store,
            renderer: WebRenderer {
                render_state: None,
                scene,
            },
            settings,
            hud: None,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_focus_handlers(app.clone());

        // The loop runs without a GPU too: HUD and audio keep working
        request_animation_frame(app.clone());

        match init_gpu(canvas, viewport).await {
            Some(render_state) => {
                app.borrow_mut().renderer.render_state = Some(render_state);
                log::info!("Flappy Night running!");
            }
            None => log::error!("WebGPU unavailable, running without graphics"),
        }
    }

    async fn init_gpu(canvas: HtmlCanvasElement, viewport: (f32, f32)) -> Option<RenderState> {
        let (width, height) = (canvas.width(), canvas.height());
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, viewport)
            .await
            .map_err(|e| log::error!("Failed to create device: {}", e))
            .ok()
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().action();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().action();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut app = app.borrow_mut();
            match event.code().as_str() {
                "Space" => {
                    // Keep the page from scrolling
                    event.prevent_default();
                    if !event.repeat() {
                        app.action();
                    }
                }
                "KeyI" => {
                    app.game.autopilot = !app.game.autopilot;
                    log::info!("Autopilot: {}", app.game.autopilot);
                }
                "KeyM" => {
                    app.settings.muted = !app.settings.muted;
                    app.settings.save();
                    let settings = app.settings.clone();
                    app.audio.set_settings(settings);
                    log::info!("Muted: {}", app.settings.muted);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Window blur (click outside, tab switch)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut app = app.borrow_mut();
                if app.settings.mute_on_blur {
                    app.audio.set_suspended(true);
                    log::info!("Audio muted (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut app = app.borrow_mut();
            app.audio.set_suspended(false);
            app.audio.resume();
        });
        let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();
            app.frame(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                app.update_hud(&document);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_night::Game;
    use flappy_night::persistence::MemoryStore;
    use flappy_night::platform::{Collaborators, Cue, Headless};
    use flappy_night::sim::{GamePhase, Tuning};

    /// Headless frames per second
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const ROUNDS: u32 = 5;
    /// Give up on a round the autopilot survives this long
    const MAX_ROUND_FRAMES: u32 = 60 * 120;
    /// Frames to linger on the game-over screen before restarting
    const RESTART_DELAY_FRAMES: u32 = 45;

    /// Load tuning from the file named by `FLAPPY_NIGHT_TUNING`, if any
    pub fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("FLAPPY_NIGHT_TUNING") else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Play a few autopilot rounds at a fixed 60 Hz clock
    pub fn run(seed: u64, tuning: Tuning) {
        let mut store = MemoryStore::default();
        let mut audio = Headless::default();
        let mut screen = Headless::default();

        let mut game = Game::new(seed, tuning, &mut store);
        game.autopilot = true;

        let mut now = 0.0;
        let mut round_frames = 0;
        let mut ended_frames = 0;
        let mut scores = Vec::new();

        while scores.len() < ROUNDS as usize {
            let mut io = Collaborators {
                audio: &mut audio,
                store: &mut store,
                renderer: &mut screen,
            };
            let before = game.phase();
            game.frame(now, &mut io);
            now += FRAME_MS;

            match game.phase() {
                GamePhase::Playing => {
                    round_frames += 1;
                    if round_frames >= MAX_ROUND_FRAMES {
                        log::warn!("Round {} still alive, stopping", scores.len() + 1);
                        scores.push(game.state.score);
                        break;
                    }
                }
                GamePhase::Ended => {
                    if before == GamePhase::Playing {
                        log::info!(
                            "Round {}: score {} (best {})",
                            scores.len() + 1,
                            game.state.score,
                            game.state.best_score
                        );
                        scores.push(game.state.score);
                        ended_frames = 0;
                    }
                    ended_frames += 1;
                    if ended_frames >= RESTART_DELAY_FRAMES {
                        game.primary_action(&mut io);
                        round_frames = 0;
                    }
                }
                GamePhase::Idle => {}
            }
        }

        log::info!(
            "Session over (seed {}): scores {:?}, best {} (stored {:?}), {} frames, {} flaps, {} points, {} crashes",
            game.state.seed,
            scores,
            game.state.best_score,
            store.best,
            screen.frames_drawn,
            audio.cue_count(Cue::Jump),
            audio.cue_count(Cue::Score),
            audio.cue_count(Cue::Hit)
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Flappy Night (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    let tuning = headless::load_tuning();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    headless::run(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
