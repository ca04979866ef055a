//! Sky Gates entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

    use sky_gates::audio::{AudioManager, SoundEffect};
    use sky_gates::renderer::{RenderState, SceneOptions, build_scene};
    use sky_gates::sim::{self, GameEvent, GameState};
    use sky_gates::ui::Hud;
    use sky_gates::{Settings, Viewport};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        hud: Hud,
        settings: Settings,
    }

    impl Game {
        /// One animation frame: simulate, notify, draw
        fn frame(&mut self) {
            sim::advance(&mut self.state);
            self.dispatch_events();
            self.render();
        }

        /// Key, tap or click on the canvas
        fn press(&mut self) {
            sim::press(&mut self.state);
            // Still inside the user gesture, so music is allowed to start
            self.dispatch_events();
        }

        /// Restart button
        fn restart(&mut self) {
            if sim::start(&mut self.state) {
                self.dispatch_events();
            }
        }

        /// Forward engine notifications to the HUD and audio
        fn dispatch_events(&mut self) {
            for event in self.state.drain_events() {
                self.hud.apply(&event);
                match event {
                    GameEvent::RunStarted => {
                        if let Err(e) = self.audio.play_music() {
                            log::warn!("Background music not started: {}", e);
                        }
                    }
                    GameEvent::GameOver { .. } => {
                        self.audio.pause_music();
                        if let Err(e) = self.audio.play(SoundEffect::Hit) {
                            log::warn!("Hit sound not played: {}", e);
                        }
                    }
                    GameEvent::Scored { .. } => {}
                }
            }
            self.hud.sync_overlay(self.state.lifecycle);
        }

        /// Render the current frame
        fn render(&mut self) {
            let options = SceneOptions {
                reduced_motion: self.settings.reduced_motion,
            };
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, options);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Re-measure the window and propagate the new size
        fn resize(&mut self, window: &Window, canvas: &HtmlCanvasElement) {
            let viewport = window_viewport(window);
            if !self.state.resize(viewport) {
                return;
            }
            let (width, height) = size_canvas(window, canvas, &viewport);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(
                    width,
                    height,
                    (viewport.width as f32, viewport.height as f32),
                );
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_muted();
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }

        fn set_background(&mut self, background: bool) {
            if self.settings.mute_on_blur {
                self.audio.set_blurred(background);
            }
        }
    }

    /// Logical (CSS pixel) size of the window
    fn window_viewport(window: &Window) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
    }

    /// Size the canvas backing store for the device pixel ratio
    fn size_canvas(window: &Window, canvas: &HtmlCanvasElement, viewport: &Viewport) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = ((viewport.width * dpr) as u32).max(1);
        let height = ((viewport.height * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Gates starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let viewport = window_viewport(&window);
        let (width, height) = size_canvas(&window, &canvas, &viewport);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(viewport, seed),
            render_state: None,
            audio: AudioManager::new(&settings),
            hud: Hud::new(&document),
            settings,
        }));

        log::info!(
            "Game initialized with seed {} ({} tuning, {}x{})",
            seed,
            viewport.device_class().as_str(),
            viewport.width,
            viewport.height
        );

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let logical = (viewport.width as f32, viewport.height as f32);
        match RenderState::new(surface, &adapter, width, height, logical).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        {
            let mut g = game.borrow_mut();
            let lifecycle = g.state.lifecycle;
            g.hud.sync_overlay(lifecycle);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_resize(canvas, game.clone());
        setup_focus_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Sky Gates running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click on the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        g.press();
                    }
                    "KeyM" => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Restart button not found");
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                game.borrow_mut().resize(&window, &canvas);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                game.borrow_mut().set_background(hidden);
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().set_background(true);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().set_background(false);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Gates (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);
    run_headless_demo(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Fly one autopilot run on a desktop-sized viewport and print a summary
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo(seed: u64) {
    use sky_gates::Viewport;
    use sky_gates::sim::{self, GameEvent, GameState};
    use sky_gates::ui::score_label;

    // One minute at 60 fps
    const MAX_FRAMES: u32 = 60 * 60;

    let mut state = GameState::new(Viewport::new(800.0, 600.0), seed);
    sim::press(&mut state);

    for _ in 0..MAX_FRAMES {
        if sim::autopilot_wants_flap(&state) {
            sim::flap(&mut state);
        }
        sim::advance(&mut state);

        let mut finished = false;
        for event in state.drain_events() {
            match event {
                GameEvent::RunStarted => {}
                GameEvent::Scored { score } => log::debug!("{}", score_label(score)),
                GameEvent::GameOver { final_score } => {
                    log::info!("Crashed: {}", score_label(final_score));
                    finished = true;
                }
            }
        }
        if finished {
            break;
        }
    }

    let summary = serde_json::json!({
        "seed": seed,
        "frames": state.frame_counter,
        "score": state.score,
        "lifecycle": state.lifecycle,
        "gates": state.gates,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}
