//! Gameplay entities: the player, the two obstacle variants, and the
//! cosmetic parallax background layers.
//!
//! All motion is per-tick (one tick per animation frame). Constructors take
//! the field configuration explicitly; nothing here reads globals.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::geom::Rect;
use super::state::FieldConfig;
use crate::consts::*;

/// The player-controlled dino
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity, px/tick (positive = downward)
    pub vy: f32,
    pub airborne: bool,
    pub size: Vec2,
}

impl Player {
    /// Spawn the player grounded at the fixed horizontal position
    pub fn new(field: &FieldConfig) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, field.ground_y() - PLAYER_HEIGHT),
            vy: 0.0,
            airborne: false,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    /// Start a jump. No-op while airborne: there is no double jump.
    pub fn jump(&mut self) {
        if !self.airborne {
            self.vy = JUMP_IMPULSE;
            self.airborne = true;
        }
    }

    /// Integrate gravity for one tick.
    ///
    /// Invariant: afterwards `0 <= y <= ground_y - height`, and `airborne`
    /// is false exactly when y sits at the lower bound.
    pub fn update(&mut self, field: &FieldConfig) {
        self.pos.y += self.vy;
        self.vy += GRAVITY;

        let floor = field.ground_y() - self.size.y;
        self.pos.y = self.pos.y.clamp(0.0, floor);
        self.airborne = self.pos.y < floor;
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle variant tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground obstacle, pinned to the ground line
    Cactus,
    /// Aerial obstacle; `wing_phase` drives the flapping animation only
    Bird { wing_phase: f32 },
}

/// A scrolling obstacle. Spawned at the right edge of the field, destroyed
/// once its right edge passes the left edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// A cactus sitting on the ground at the right edge of the field
    pub fn cactus(field: &FieldConfig) -> Self {
        Self {
            pos: Vec2::new(field.width, field.ground_y() - CACTUS_HEIGHT),
            size: Vec2::new(CACTUS_WIDTH, CACTUS_HEIGHT),
            kind: ObstacleKind::Cactus,
        }
    }

    /// A bird at the right edge, at a random height in the jump-under band:
    /// below one third of the field, above a grounded player plus clearance.
    pub fn bird(field: &FieldConfig, rng: &mut impl Rng) -> Self {
        let band_top = field.height / 3.0;
        let band_bottom = field.ground_y() - PLAYER_HEIGHT - BIRD_GROUND_CLEARANCE;
        Self {
            pos: Vec2::new(field.width, rng.random_range(band_top..band_bottom)),
            size: Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
            kind: ObstacleKind::Bird { wing_phase: 0.0 },
        }
    }

    /// Advance one tick at the given scroll speed
    pub fn update(&mut self, speed: f32) {
        match &mut self.kind {
            ObstacleKind::Cactus => self.pos.x -= speed,
            ObstacleKind::Bird { wing_phase } => {
                self.pos.x -= speed * BIRD_SPEED_FACTOR;
                *wing_phase = (*wing_phase + WING_STEP) % TAU;
            }
        }
    }

    /// True once the obstacle has fully left the field on the left
    pub fn is_offscreen(&self) -> bool {
        self.pos.x < -self.size.x
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// One parallax background layer: a randomized rectangle drawn at two
/// x-offsets for seamless wraparound. Purely cosmetic - no collision, no
/// scoring - and it survives session resets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundLayer {
    /// Two scroll offsets, recycled independently
    pub offsets: [f32; 2],
    pub speed_factor: f32,
    /// Index into [`crate::consts::BG_COLORS`]
    pub color_index: usize,
    pub y: f32,
    pub element_size: Vec2,
}

impl BackgroundLayer {
    pub fn new(index: usize, field: &FieldConfig, rng: &mut impl Rng) -> Self {
        Self {
            offsets: [0.0, field.width],
            speed_factor: BG_SPEED_FACTORS[index],
            color_index: index,
            y: rng.random_range(0.0..field.height / 2.0),
            element_size: random_element_size(rng),
        }
    }

    /// Scroll both offsets; recycle an offset that has fully left the field,
    /// re-randomizing the layer's y position and element size.
    pub fn update(&mut self, speed: f32, field: &FieldConfig, rng: &mut impl Rng) {
        for i in 0..self.offsets.len() {
            self.offsets[i] -= speed * self.speed_factor;
            if self.offsets[i] < -field.width {
                self.offsets[i] = field.width;
                self.y = rng.random_range(0.0..field.height / 2.0);
                self.element_size = random_element_size(rng);
            }
        }
    }
}

fn random_element_size(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.random_range(BG_ELEMENT_WIDTH_RANGE.0..BG_ELEMENT_WIDTH_RANGE.1),
        rng.random_range(BG_ELEMENT_HEIGHT_RANGE.0..BG_ELEMENT_HEIGHT_RANGE.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> FieldConfig {
        FieldConfig::default()
    }

    #[test]
    fn test_player_spawns_grounded() {
        let player = Player::new(&field());
        assert!(!player.airborne);
        assert_eq!(player.pos.y, field().ground_y() - PLAYER_HEIGHT);
    }

    #[test]
    fn test_jump_sets_impulse_and_airborne() {
        let mut player = Player::new(&field());
        player.jump();
        assert_eq!(player.vy, JUMP_IMPULSE);
        assert!(player.airborne);

        // Next tick the player leaves the ground
        let y_before = player.pos.y;
        player.update(&field());
        assert!(player.pos.y < y_before);
    }

    #[test]
    fn test_jump_while_airborne_is_a_noop() {
        let mut player = Player::new(&field());
        player.jump();
        player.update(&field());

        let vy_before = player.vy;
        player.jump();
        assert_eq!(player.vy, vy_before);
        assert!(player.airborne);
    }

    #[test]
    fn test_player_y_clamped_over_full_arc() {
        let field = field();
        let floor = field.ground_y() - PLAYER_HEIGHT;
        let mut player = Player::new(&field);
        player.jump();

        for _ in 0..200 {
            player.update(&field);
            assert!(player.pos.y >= 0.0);
            assert!(player.pos.y <= floor);
            assert_eq!(player.airborne, player.pos.y < floor);
        }
        // Gravity has brought the player back down by now
        assert!(!player.airborne);
    }

    #[test]
    fn test_cactus_scrolls_at_game_speed() {
        let mut cactus = Obstacle::cactus(&field());
        assert_eq!(cactus.pos.x, field().width);
        cactus.update(6.0);
        assert_eq!(cactus.pos.x, field().width - 6.0);
    }

    #[test]
    fn test_bird_scrolls_faster_and_flaps() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut bird = Obstacle::bird(&field(), &mut rng);
        bird.update(10.0);
        assert_eq!(bird.pos.x, field().width - 12.0);
        match bird.kind {
            ObstacleKind::Bird { wing_phase } => assert!((wing_phase - WING_STEP).abs() < 1e-6),
            _ => panic!("expected a bird"),
        }
    }

    #[test]
    fn test_bird_spawns_inside_band() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            let bird = Obstacle::bird(&field, &mut rng);
            assert!(bird.pos.y >= field.height / 3.0);
            assert!(bird.pos.y < field.ground_y() - PLAYER_HEIGHT - BIRD_GROUND_CLEARANCE);
        }
    }

    #[test]
    fn test_offscreen_boundary_is_exact() {
        let mut cactus = Obstacle::cactus(&field());
        cactus.pos.x = -CACTUS_WIDTH;
        assert!(!cactus.is_offscreen());
        cactus.pos.x = -CACTUS_WIDTH - 0.01;
        assert!(cactus.is_offscreen());
    }

    #[test]
    fn test_background_layer_recycles_past_left_edge() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut layer = BackgroundLayer::new(0, &field, &mut rng);
        layer.offsets = [-field.width - 1.0, 100.0];

        let old_y = layer.y;
        let old_size = layer.element_size;
        layer.update(6.0, &field, &mut rng);

        assert_eq!(layer.offsets[0], field.width);
        // The second offset just keeps scrolling
        assert!(layer.offsets[1] < 100.0);
        // y/size were re-rolled (astronomically unlikely to match)
        assert!(layer.y != old_y || layer.element_size != old_size);
    }
}
