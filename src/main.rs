//! Pixel Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pixel_breakout::platform::InputState;
    use pixel_breakout::renderer::canvas::CanvasSink;
    use pixel_breakout::ui::UiSink;
    use pixel_breakout::{Game, Settings};

    /// HUD backed by DOM elements
    struct DomHud {
        document: web_sys::Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            {
                let display = if visible { "block" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
        }
    }

    impl UiSink for DomHud {
        fn set_score(&mut self, score: u64) {
            self.set_text("score", &score.to_string());
        }

        fn set_lives(&mut self, lives: u32) {
            self.set_text("lives", &lives.to_string());
        }

        fn set_level(&mut self, level: u32) {
            self.set_text("level", &level.to_string());
        }

        fn show_game_over(&mut self, final_score: u64) {
            self.set_text("finalScore", &final_score.to_string());
            self.set_visible("gameOver", true);
        }

        fn hide_game_over(&mut self) {
            self.set_visible("gameOver", false);
        }
    }

    /// Everything the frame callback touches
    struct App {
        game: Game,
        input: InputState,
        hud: DomHud,
        sink: CanvasSink,
    }

    impl App {
        fn frame(&mut self) {
            let input = self.input.snapshot();
            self.game.frame(&input, &mut self.hud, &mut self.sink);
        }

        fn restart(&mut self) {
            self.input = InputState::new();
            self.game.restart(&mut self.hud);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Pixel Breakout starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings_json = document
            .get_element_by_id("settings")
            .and_then(|el| el.text_content());
        let mut settings = Settings::load_or_default(settings_json.as_deref());
        settings.field_width = canvas.width() as f32;
        settings.field_height = canvas.height() as f32;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Game::start(settings);
        let field = game.state().field;
        let mut hud = DomHud {
            document: document.clone(),
        };
        hud.hide_game_over();

        let app = Rc::new(RefCell::new(App {
            game,
            input: InputState::new(),
            hud,
            sink: CanvasSink::new(ctx, field.width, field.height),
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_restart_button(app.clone());

        request_animation_frame(app);
        log::info!("Pixel Breakout running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let handled = app.borrow_mut().input.key_down(&event.code(), event.repeat());
                if handled {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_up(&event.code());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - position relative to the canvas
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                app.borrow_mut().input.pointer_moved(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - drop held keys so the paddle doesn't run away
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().input.release_all();
                log::info!("Window blur, keys released");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(btn) = document.get_element_by_id("restartButton") else {
            log::warn!("No restart button found");
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || {
            app.borrow_mut().restart();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move || {
            app.borrow_mut().frame();

            if let Some(cb) = f.borrow().as_ref() {
                let _ = web_sys::window()
                    .unwrap()
                    .request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }));

        if let Some(cb) = g.borrow().as_ref() {
            let _ = web_sys::window()
                .unwrap()
                .request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Breakout (native) starting...");
    log::info!("Native mode runs a headless autopilot session - serve the wasm build to play");

    let settings_json = std::env::args()
        .nth(1)
        .and_then(|path| match std::fs::read_to_string(&path) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                None
            }
        });
    let settings = pixel_breakout::Settings::load_or_default(settings_json.as_deref());

    autopilot::run(settings, autopilot::MAX_FRAMES);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session where the paddle chases the ball
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use pixel_breakout::renderer::DrawList;
    use pixel_breakout::sim::{GamePhase, GameState, HeldKeys, TickInput};
    use pixel_breakout::ui::Hud;
    use pixel_breakout::{Game, Settings};

    /// Two minutes at 60 fps
    pub const MAX_FRAMES: u32 = 60 * 120;

    /// Steer toward the ball, with a small dead zone to avoid jitter
    fn chase(state: &GameState) -> TickInput {
        let paddle = state.paddle.rect();
        let dx = state.ball.pos.x - paddle.center().x;
        let dead_zone = state.paddle.speed;
        TickInput {
            keys: HeldKeys {
                left: dx < -dead_zone,
                right: dx > dead_zone,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn run(settings: Settings, max_frames: u32) {
        let mut game = Game::start(settings);
        let mut hud = Hud::default();
        let mut frame = DrawList::default();

        let mut frames = 0;
        while frames < max_frames && game.phase() != GamePhase::GameOver {
            let input = chase(game.state());
            game.frame(&input, &mut hud, &mut frame);
            frames += 1;
        }

        log::info!(
            "Autopilot stopped after {} frames ({} draw calls in the last frame)",
            frames,
            frame.commands.len()
        );
        println!(
            "frames={} score={} lives={} level={} game_over={}",
            frames,
            hud.score,
            hud.lives,
            hud.level,
            hud.game_over.is_some()
        );
    }
}
