//! Pixel Dino Run entry point
//!
//! Wires browser events into the simulation and runs one tick plus one
//! render pass per animation frame. The native binary is a headless smoke
//! run of the same simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use dino_run::facts;
    use dino_run::render::{Renderer, fact_button_rect};
    use dino_run::sim::{FactPanel, FieldConfig, GameState, Phase, TickInput, tick};

    /// Key for the generative-text endpoint. Left empty: the hosting page is
    /// expected to sit behind a keyless proxy.
    const API_KEY: &str = "";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        /// Commands gathered from events since the last frame
        input: TickInput,
        /// Hand-off slot filled by the fact fetch task, drained each frame
        fact_inbox: Rc<RefCell<Option<String>>>,
        fact_in_flight: bool,
    }

    impl Game {
        /// One animation frame: exactly one tick and one render pass
        fn frame(&mut self) {
            self.input.fact_result = self.fact_inbox.borrow_mut().take();
            if self.input.fact_result.is_some() {
                self.fact_in_flight = false;
            }

            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input);

            // A tick that flipped the panel to Loading wants a fetch fired.
            // At most one request is in flight at a time.
            if self.state.fact == FactPanel::Loading && !self.fact_in_flight {
                self.fact_in_flight = true;
                let inbox = self.fact_inbox.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let text = facts::fetch_fact(facts::DEFAULT_PROMPT, API_KEY).await;
                    *inbox.borrow_mut() = Some(text);
                });
            }

            if let Err(err) = self.renderer.draw(&self.state) {
                log::warn!("render error: {err:?}");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Pixel Dino Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no #game-canvas element")
            .dyn_into()
            .expect("not a canvas");

        let field = FieldConfig::default();
        canvas.set_width(field.width as u32);
        canvas.set_height(field.height as u32);

        let renderer = Renderer::new(&canvas).expect("failed to get 2d context");
        let seed = js_sys::Date::now() as u64;
        log::info!("session seeded with {seed}");

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, field),
            renderer,
            input: TickInput::default(),
            fact_inbox: Rc::new(RefCell::new(None)),
            fact_in_flight: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Pixel Dino Run running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: space/up-arrow starts or jumps, 'r' restarts
        {
            let game = game.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        g.input.jump_or_start = true;
                    }
                    "r" | "R" => g.input.restart = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer: the fact button only exists on the game-over screen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != Phase::GameOver {
                    return;
                }
                let click = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                if fact_button_rect(&g.state.field).contains(click) {
                    g.input.request_fact = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game.borrow_mut().frame();
            request_animation_frame(game.clone());
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_run::sim::{FieldConfig, GameState, Phase, TickInput, tick};

    env_logger::init();
    log::info!("Pixel Dino Run (native) starting...");
    log::info!("the playable build targets wasm32; running a headless smoke session");

    let mut state = GameState::new(42, FieldConfig::default());
    tick(
        &mut state,
        &TickInput {
            jump_or_start: true,
            ..Default::default()
        },
    );

    for i in 0..600u32 {
        let input = TickInput {
            jump_or_start: i % 45 == 0,
            ..Default::default()
        };
        tick(&mut state, &input);
        if state.phase == Phase::GameOver {
            break;
        }
    }

    println!(
        "headless session done: phase {:?}, score {}, speed {:.3}, high score {}",
        state.phase, state.score, state.speed, state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
