//! Canvas 2D presentation layer
//!
//! Draws the whole game with flat rectangles, ellipses and text in a
//! pixel-art look. The layout helpers at the top are pure and
//! target-independent; the `Renderer` itself only exists on wasm.

use crate::sim::geom::Rect;
use crate::sim::state::FieldConfig;

/// Greedy word wrap: pack words onto a line while `fits` accepts the
/// candidate, then break. A single over-long word still gets its own line.
pub fn wrap_lines(text: &str, fits: impl Fn(&str) -> bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && !fits(&candidate) {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Hit rectangle of the "Generate Dino Fact" button on the game-over screen
pub fn fact_button_rect(field: &FieldConfig) -> Rect {
    Rect::new(field.width / 2.0 - 100.0, field.height / 2.0 + 120.0, 200.0, 40.0)
}

#[cfg(target_arch = "wasm32")]
pub use canvas::Renderer;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use super::fact_button_rect;
    use super::wrap_lines;
    use crate::consts::BG_COLORS;
    use crate::sim::entity::{BackgroundLayer, Obstacle, ObstacleKind, Player};
    use crate::sim::state::{FactPanel, GameState, Phase};
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    pub struct Renderer {
        ctx: CanvasRenderingContext2d,
    }

    impl Renderer {
        pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("no 2d context"))?
                .dyn_into::<CanvasRenderingContext2d>()?;
            ctx.set_text_align("center");
            Ok(Self { ctx })
        }

        /// Draw one complete frame
        pub fn draw(&self, state: &GameState) -> Result<(), JsValue> {
            let field = &state.field;

            // Sky
            self.ctx.set_fill_style_str("rgb(20, 30, 40)");
            self.ctx
                .fill_rect(0.0, 0.0, field.width as f64, field.height as f64);

            for layer in &state.background {
                self.draw_background_layer(layer);
            }
            self.draw_ground(state);

            match state.phase {
                Phase::NotStarted => self.draw_start_screen(state)?,
                Phase::Running => {
                    self.draw_player(&state.player);
                    for obstacle in &state.obstacles {
                        self.draw_obstacle(obstacle)?;
                    }
                    self.draw_hud(state)?;
                }
                Phase::GameOver => {
                    self.draw_player(&state.player);
                    for obstacle in &state.obstacles {
                        self.draw_obstacle(obstacle)?;
                    }
                    self.draw_game_over(state)?;
                }
            }
            Ok(())
        }

        fn draw_background_layer(&self, layer: &BackgroundLayer) {
            self.ctx.set_fill_style_str(BG_COLORS[layer.color_index]);
            for &x in &layer.offsets {
                self.ctx.fill_rect(
                    x as f64,
                    layer.y as f64,
                    layer.element_size.x as f64,
                    layer.element_size.y as f64,
                );
            }
        }

        fn draw_ground(&self, state: &GameState) {
            let field = &state.field;
            let ground_y = field.ground_y() as f64;
            self.ctx.set_fill_style_str("rgb(80, 80, 80)");
            self.ctx.fill_rect(
                0.0,
                ground_y,
                field.width as f64,
                (field.height - field.ground_y()) as f64,
            );
            // Dashes for a little texture
            self.ctx.set_fill_style_str("rgb(100, 100, 100)");
            let mut x = 0.0;
            while x < field.width as f64 {
                self.ctx.fill_rect(x, ground_y + 5.0, 10.0, 5.0);
                x += 20.0;
            }
        }

        fn draw_player(&self, player: &Player) {
            let (x, y) = (player.pos.x as f64, player.pos.y as f64);
            let (w, h) = (player.size.x as f64, player.size.y as f64);

            self.ctx.set_fill_style_str("rgb(100, 200, 100)");
            // Body
            self.ctx.fill_rect(x, y + 10.0, w, h - 10.0);
            // Head
            self.ctx.fill_rect(x + w / 2.0, y, w / 2.0, h / 3.0);
            // Legs
            self.ctx.fill_rect(x + 5.0, y + h - 15.0, 10.0, 15.0);
            self.ctx.fill_rect(x + w - 15.0, y + h - 15.0, 10.0, 15.0);
            // Eye
            self.ctx.set_fill_style_str("rgb(0, 0, 0)");
            self.ctx.fill_rect(x + w - 10.0, y + 10.0, 5.0, 5.0);
        }

        fn draw_obstacle(&self, obstacle: &Obstacle) -> Result<(), JsValue> {
            let (x, y) = (obstacle.pos.x as f64, obstacle.pos.y as f64);
            let (w, h) = (obstacle.size.x as f64, obstacle.size.y as f64);

            match obstacle.kind {
                ObstacleKind::Cactus => {
                    self.ctx.set_fill_style_str("rgb(150, 100, 50)");
                    self.ctx.fill_rect(x, y, w, h);
                    // Arms
                    self.ctx.fill_rect(x - 5.0, y + h / 3.0, 10.0, 20.0);
                    self.ctx.fill_rect(x + w, y + h / 2.0, 10.0, 15.0);
                }
                ObstacleKind::Bird { wing_phase } => {
                    self.ctx.set_fill_style_str("rgb(150, 150, 250)");
                    self.ctx.begin_path();
                    self.ctx.ellipse(
                        x + w / 2.0,
                        y + h / 2.0,
                        w / 2.0,
                        h / 4.0,
                        0.0,
                        0.0,
                        std::f64::consts::TAU,
                    )?;
                    self.ctx.fill();

                    // Flapping wing
                    let wing_y = y + (wing_phase.sin() * 10.0) as f64;
                    self.triangle((x, y + h / 2.0), (x + w / 2.0, wing_y), (x + w, y + h / 2.0));

                    // Beak
                    self.ctx.set_fill_style_str("rgb(255, 165, 0)");
                    self.triangle(
                        (x + w, y + h / 2.0 - 5.0),
                        (x + w + 10.0, y + h / 2.0),
                        (x + w, y + h / 2.0 + 5.0),
                    );
                }
            }
            Ok(())
        }

        fn draw_hud(&self, state: &GameState) -> Result<(), JsValue> {
            let right = state.field.width as f64 - 100.0;
            self.ctx.set_fill_style_str("rgb(255, 255, 255)");
            self.set_font(20.0);
            self.ctx.fill_text(&format!("Score: {}", state.score), right, 30.0)?;
            self.ctx
                .fill_text(&format!("High Score: {}", state.high_score), right, 60.0)?;
            Ok(())
        }

        fn draw_start_screen(&self, state: &GameState) -> Result<(), JsValue> {
            let cx = state.field.width as f64 / 2.0;
            let cy = state.field.height as f64 / 2.0;

            self.ctx.set_fill_style_str("rgb(255, 255, 255)");
            self.set_font(32.0);
            self.ctx.fill_text("PIXEL DINO RUN", cx, cy - 50.0)?;
            self.set_font(20.0);
            self.ctx
                .fill_text("Press SPACE or UP ARROW to Start & Jump", cx, cy)?;
            self.ctx
                .fill_text("Press R to Restart (after Game Over)", cx, cy + 30.0)?;
            self.set_font(16.0);
            self.ctx.fill_text(
                &format!("Score: {} | High Score: {}", state.score, state.high_score),
                cx,
                state.field.height as f64 - 30.0,
            )?;
            Ok(())
        }

        fn draw_game_over(&self, state: &GameState) -> Result<(), JsValue> {
            let cx = state.field.width as f64 / 2.0;
            let cy = state.field.height as f64 / 2.0;

            self.ctx.set_fill_style_str("rgb(255, 0, 0)");
            self.set_font(48.0);
            self.ctx.fill_text("GAME OVER!", cx, cy - 30.0)?;

            self.ctx.set_fill_style_str("rgb(255, 255, 255)");
            self.set_font(24.0);
            self.ctx.fill_text(&format!("Score: {}", state.score), cx, cy + 20.0)?;
            self.ctx
                .fill_text(&format!("High Score: {}", state.high_score), cx, cy + 50.0)?;
            self.set_font(18.0);
            self.ctx.fill_text("Press R to Restart", cx, cy + 90.0)?;

            self.draw_fact_button(state)?;

            match &state.fact {
                FactPanel::Idle => {}
                FactPanel::Loading => {
                    self.set_font(16.0);
                    self.ctx.fill_text("Loading Dino Fact...", cx, cy + 180.0)?;
                }
                FactPanel::Ready(text) => {
                    self.set_font(16.0);
                    let max_width = state.field.width as f64 - 100.0;
                    let lines = wrap_lines(text, |candidate| {
                        self.ctx
                            .measure_text(candidate)
                            .map(|m| m.width() <= max_width)
                            .unwrap_or(true)
                    });
                    let mut y = cy + 180.0;
                    for line in lines {
                        self.ctx.fill_text(&line, cx, y)?;
                        y += 20.0;
                    }
                }
            }
            Ok(())
        }

        fn draw_fact_button(&self, state: &GameState) -> Result<(), JsValue> {
            let button = fact_button_rect(&state.field);
            self.ctx.set_fill_style_str("rgb(70, 130, 180)");
            self.ctx.begin_path();
            self.ctx.round_rect_with_f64(
                button.pos.x as f64,
                button.pos.y as f64,
                button.size.x as f64,
                button.size.y as f64,
                10.0,
            )?;
            self.ctx.fill();

            self.ctx.set_fill_style_str("rgb(255, 255, 255)");
            self.set_font(18.0);
            self.ctx.fill_text(
                "Generate Dino Fact \u{2728}",
                (button.pos.x + button.size.x / 2.0) as f64,
                (button.pos.y + button.size.y / 2.0 + 5.0) as f64,
            )?;
            Ok(())
        }

        fn triangle(&self, a: (f64, f64), b: (f64, f64), c: (f64, f64)) {
            self.ctx.begin_path();
            self.ctx.move_to(a.0, a.1);
            self.ctx.line_to(b.0, b.1);
            self.ctx.line_to(c.0, c.1);
            self.ctx.close_path();
            self.ctx.fill();
        }

        fn set_font(&self, size: f64) {
            self.ctx.set_font(&format!("{size}px Inter, sans-serif"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// A fake "fits" predicate measuring by character count
    fn fits_within(max_chars: usize) -> impl Fn(&str) -> bool {
        move |s: &str| s.len() <= max_chars
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = wrap_lines("tiny fact", fits_within(40));
        assert_eq!(lines, vec!["tiny fact"]);
    }

    #[test]
    fn test_wrap_breaks_on_word_boundaries() {
        let lines = wrap_lines("one two three four", fits_within(9));
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let lines = wrap_lines("a pneumonoultramicroscopic b", fits_within(10));
        assert_eq!(lines, vec!["a", "pneumonoultramicroscopic", "b"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_lines("", fits_within(10)).is_empty());
        assert!(wrap_lines("   ", fits_within(10)).is_empty());
    }

    #[test]
    fn test_fact_button_rect_is_centered() {
        let field = FieldConfig::default();
        let button = fact_button_rect(&field);
        assert_eq!(button.pos.x + button.size.x / 2.0, field.width / 2.0);
        assert_eq!(button.size, Vec2::new(200.0, 40.0));
        // Click hit test: center in, corner out
        assert!(button.contains(Vec2::new(field.width / 2.0, field.height / 2.0 + 140.0)));
        assert!(!button.contains(button.pos));
    }
}
