//! Madness Arena entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use madness_arena::ModSettings;
    use madness_arena::consts::*;
    use madness_arena::renderer::{RenderState, Viewport, build_frame};
    use madness_arena::sim::{GameState, TickInput, WaveHooks, WavePhase, dispatch, start_wave, tick};

    /// Held movement keys
    #[derive(Default)]
    struct Keys {
        up: bool,
        down: bool,
        left: bool,
        right: bool,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        keys: Keys,
        input: TickInput,
        /// Arena rectangle in canvas CSS pixels, for mapping the mouse
        css_viewport: Viewport,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = ModSettings::load();
            Self {
                state: GameState::with_resources(seed, Default::default(), settings.to_policy()),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                keys: Keys::default(),
                input: TickInput::default(),
                css_viewport: Viewport::letterbox(ARENA_WIDTH, ARENA_HEIGHT),
            }
        }

        fn start_wave(&mut self) {
            match start_wave(&mut self.state) {
                Ok(()) => {
                    self.accumulator = 0.0;
                    set_hidden("wave-prompt", true);
                    set_hidden("shop", true);
                    set_hidden("game-over", true);
                }
                Err(e) => log::debug!("Start ignored: {e}"),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.input.up = self.keys.up;
                self.input.down = self.keys.down;
                self.input.left = self.keys.left;
                self.input.right = self.keys.right;
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.fire = false;
                self.input.melee = false;
                self.input.swap_weapons = false;
                self.input.drop_weapon = false;
            }

            dispatch(&mut self.state, &mut DomHooks);
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&build_frame(&self.state)) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = document() else {
                return;
            };
            let state = &self.state;
            let running = matches!(state.phase, WavePhase::Active | WavePhase::Cleared { .. });
            let (health, max_health) = if running {
                (state.player.health, state.player.max_health)
            } else {
                (state.resources.health, state.resources.max_health)
            };
            let loadout = if running {
                &state.player.loadout
            } else {
                &state.resources.loadout
            };
            let durability = loadout
                .active()
                .map(|w| format!(" ({}/100)", w.durability))
                .unwrap_or_default();

            set_text(&document, "#hud-wave .hud-value", &state.wave.to_string());
            set_text(&document, "#hud-coins .hud-value", &state.resources.coins.to_string());
            set_text(
                &document,
                "#hud-health .hud-value",
                &format!("{:.0}/{:.0}", health, max_health),
            );
            set_text(
                &document,
                "#hud-weapon .hud-value",
                &format!("{}{}", loadout.current(), durability),
            );
            set_text(&document, "#hud-enemies .hud-value", &state.enemies.len().to_string());

            if state.phase == WavePhase::Idle {
                let label = if madness_arena::sim::is_boss_wave(state.wave) {
                    format!("Fight Boss Wave {}", state.wave)
                } else {
                    format!("Start Wave {}", state.wave)
                };
                set_text(&document, "#wave-prompt .label", &label);
            }
        }
    }

    /// Shows the shop and game-over overlays
    struct DomHooks;

    impl WaveHooks for DomHooks {
        fn on_game_over(&mut self, wave: u32, reward: u64) {
            if let Some(document) = document() {
                set_text(&document, "#final-wave", &wave.to_string());
                set_text(&document, "#final-reward", &reward.to_string());
            }
            set_hidden("game-over", false);
        }

        fn on_open_shop(&mut self, next_wave: u32, reward: u64) {
            if let Some(document) = document() {
                set_text(&document, "#shop-reward", &reward.to_string());
                set_text(&document, "#shop-next-wave", &next_wave.to_string());
            }
            set_hidden("shop", false);
            set_hidden("wave-prompt", false);
        }

        fn on_final_boss_defeated(&mut self) {
            set_hidden("final-boss", false);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Madness Arena starting...");

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
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().css_viewport = Viewport::letterbox(client_w as f32, client_h as f32);

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

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        set_hidden("hud", false);
        set_hidden("wave-prompt", false);

        request_animation_frame(game);

        log::info!("Madness Arena running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Aim follows the cursor
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.css_viewport = Viewport::letterbox(
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                let aim = g
                    .css_viewport
                    .to_arena(event.offset_x() as f32, event.offset_y() as f32);
                g.input.aim = Some(aim);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Left click fires, right click melees
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                match event.button() {
                    0 => g.input.fire = true,
                    2 => g.input.melee = true,
                    _ => {}
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "w" => g.keys.up = true,
                    "s" => g.keys.down = true,
                    "a" => g.keys.left = true,
                    "d" => g.keys.right = true,
                    "q" => g.input.swap_weapons = true,
                    "f" => g.input.drop_weapon = true,
                    "enter" => g.start_wave(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "w" => g.keys.up = false,
                    "s" => g.keys.down = false,
                    "a" => g.keys.left = false,
                    "d" => g.keys.right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
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

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-wave-btn", "continue-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().start_wave();
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Drop held keys when focus is lost so the player doesn't drift
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.keys = Keys::default();
            log::debug!("Window blurred, released movement keys");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
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
    log::info!("Madness Arena (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    headless::autoplay(0xA11E, 3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted play-through for smoke testing the simulation without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use madness_arena::catalog;
    use madness_arena::ModSettings;
    use madness_arena::consts::*;
    use madness_arena::sim::{GameState, TickInput, WaveHooks, WavePhase, dispatch, start_wave, tick};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Wave time limit before the bot gives up (two minutes)
    const MAX_TICKS_PER_WAVE: u32 = 60 * 120;

    struct LogHooks {
        over: bool,
        /// Host-side dice for shop stock, kept apart from the simulation rng
        shop_rng: Pcg32,
    }

    impl WaveHooks for LogHooks {
        fn on_game_over(&mut self, wave: u32, reward: u64) {
            log::info!("Game over on wave {wave}, earned {reward} coins");
            self.over = true;
        }

        fn on_open_shop(&mut self, next_wave: u32, reward: u64) {
            log::info!("Shop opens before wave {next_wave} (+{reward} coins)");
            let special = catalog::roll_special_stock(&mut self.shop_rng);
            let stock: Vec<&str> = catalog::shop_allies(special).map(|a| a.name).collect();
            log::info!("Allies for hire: {}", stock.join(", "));
        }

        fn on_final_boss_defeated(&mut self) {
            log::info!("Final boss defeated!");
        }
    }

    /// Aim at the nearest enemy, shoot, back away when crowded
    fn bot_input(state: &GameState) -> TickInput {
        let me = state.player.pos;
        let Some(target) = state
            .enemies
            .iter()
            .min_by(|a, b| a.pos.distance(me).total_cmp(&b.pos.distance(me)))
        else {
            return TickInput::default();
        };

        let away = (me - target.pos).normalize_or(Vec2::X);
        let close = target.pos.distance(me) < 120.0;
        let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
        let drift = if close { away } else { (center - me) * 0.01 };

        TickInput {
            up: drift.y < -0.1,
            down: drift.y > 0.1,
            left: drift.x < -0.1,
            right: drift.x > 0.1,
            aim: Some(target.pos),
            fire: true,
            ..Default::default()
        }
    }

    pub fn autoplay(seed: u64, waves: u32) {
        let settings = ModSettings::load();
        let mut state = GameState::with_resources(seed, Default::default(), settings.to_policy());
        let mut hooks = LogHooks {
            over: false,
            shop_rng: Pcg32::seed_from_u64(seed),
        };

        for _ in 0..waves {
            if let Err(e) = start_wave(&mut state) {
                log::warn!("Could not start wave: {e}");
                break;
            }

            let mut ticks = 0;
            while state.phase != WavePhase::Idle && !hooks.over && ticks < MAX_TICKS_PER_WAVE {
                let input = bot_input(&state);
                tick(&mut state, &input, SIM_DT);
                dispatch(&mut state, &mut hooks);
                ticks += 1;
            }
            if hooks.over || ticks >= MAX_TICKS_PER_WAVE {
                break;
            }
        }

        log::info!(
            "Finished at wave {} with {} coins, holding {}",
            state.wave,
            state.resources.coins,
            state.resources.loadout.current()
        );
    }
}
