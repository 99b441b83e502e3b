//! Galactic Asteroid Belt entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use asteroid_belt::consts::*;
    use asteroid_belt::renderer::{RenderState, scene};
    use asteroid_belt::sim::{GameEvent, GameState, TickInput, tick};
    use asteroid_belt::ui::{self, TextLine, TextStyle};
    use asteroid_belt::Settings;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: f32,
        /// Overlay lines currently in the DOM
        overlay: Vec<TextLine>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0.0,
                overlay: Vec::new(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in &self.state.events {
                    log_event(event);
                }

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.restart = false;
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (59000.0 / elapsed) as f32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene::build(&self.state, &self.settings);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Rebuild the text overlay in the DOM when its lines change. Each
        /// line is placed at its layout position as a share of the screen.
        fn update_hud(&mut self) {
            let fps = self.settings.show_fps.then_some(self.fps);
            let lines = ui::overlay(&self.state, fps);
            if lines == self.overlay {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(root) = document.get_element_by_id("overlay") else {
                return;
            };

            root.set_inner_html("");
            for line in &lines {
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                let class = match line.style {
                    TextStyle::Title => "overlay-title",
                    TextStyle::Normal => "overlay-text",
                    TextStyle::Debug => "overlay-debug",
                };
                // y is the baseline
                let top = line.y - line.style.size();
                let _ = el.set_attribute("class", class);
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{:.3}%;top:{:.3}%",
                        line.x / SCREEN_WIDTH * 100.0,
                        top / SCREEN_HEIGHT * 100.0
                    ),
                );
                el.set_text_content(Some(&line.text));
                let _ = root.append_child(&el);
            }

            self.overlay = lines;
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::ShipDestroyed { distance } => {
                log::info!("Ship destroyed after {} m", distance)
            }
            GameEvent::AsteroidDestroyed { .. } => log::debug!("{:?}", event),
            _ => log::info!("{:?}", event),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Galactic Asteroid Belt starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Settings::load())));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
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

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .unwrap_or_else(|err| panic!("Failed to create renderer: {err}"));
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Galactic Asteroid Belt running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Mouse button held = thrust
        for (name, held) in [("mousedown", true), ("mouseup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    game.borrow_mut().input.thrust = held;
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.input.start = true;
                        g.input.thrust = true;
                    }
                    "r" | "R" => g.input.restart = true,
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    "h" | "H" => {
                        g.settings.show_hitboxes = !g.settings.show_hitboxes;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    game.borrow_mut().input.thrust = false;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::Path;

    use asteroid_belt::renderer::scene;
    use asteroid_belt::sim::{GameEvent, GameState, Mode, TickInput, tick};
    use asteroid_belt::{Atlas, GameError, Settings, Tuning, consts, ui};

    const ATLAS_PATH: &str = "assets/atlas.json";
    const TUNING_PATH: &str = "tuning.json";
    const DEMO_SEED: u64 = 0x0a57_e401;
    /// Give up after five minutes of game time
    const MAX_DEMO_FRAMES: u64 = consts::FRAMES_PER_SECOND * 60 * 5;

    /// Load `path` if it exists, otherwise use the default
    fn load_or_default<T: Default>(
        path: &str,
        load: impl FnOnce(&Path) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let path = Path::new(path);
        if path.exists() {
            log::info!("Loading {}", path.display());
            load(path)
        } else {
            log::info!("No {}, using defaults", path.display());
            Ok(T::default())
        }
    }

    /// Fly one autopiloted run and report how far it got
    pub fn run() -> Result<(), GameError> {
        let atlas = load_or_default(ATLAS_PATH, |p| Atlas::load(p))?;
        let tuning = load_or_default(TUNING_PATH, |p| Tuning::load(p))?;
        let settings = Settings::load();

        let mut state = GameState::with_config(DEMO_SEED, tuning, atlas);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut frames = 0;
        while frames < MAX_DEMO_FRAMES {
            tick(&mut state, &input);
            frames += 1;
            for event in &state.events {
                match event {
                    GameEvent::AsteroidDestroyed { .. } => log::debug!("{:?}", event),
                    _ => log::info!("frame {}: {:?}", state.frame_count, event),
                }
            }
            if state.mode == Mode::GameOver {
                break;
            }
        }

        if state.mode == Mode::GameOver {
            log::info!("Demo run ended after {:.1}s", state.game_time_secs());
        } else {
            log::info!("Demo run survived {} frames", frames);
        }

        let vertices = scene::build(&state, &settings);
        log::info!(
            "Final frame: {} entities, {} vertices",
            state.entity_count(),
            vertices.len()
        );
        for line in ui::overlay(&state, None) {
            log::info!("[{:>4.0},{:>4.0}] {}", line.x, line.y, line.text);
        }
        println!("{}", ui::final_distance_text(state.distance));

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("Galactic Asteroid Belt (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the game");

    if let Err(err) = demo::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
