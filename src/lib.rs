//! Pixel Dino Run - a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, session state)
//! - `facts`: Generative-text "dino fact" boundary for the game-over screen
//! - `render`: Canvas 2D presentation layer

pub mod facts;
pub mod render;
pub mod sim;

pub use sim::{FieldConfig, GameState, Phase, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Logical field size (canvas units)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Ground line sits this far above the bottom edge
    pub const GROUND_MARGIN: f32 = 80.0;

    /// Player (dino) dimensions and physics
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Fixed horizontal position of the player
    pub const PLAYER_X: f32 = 50.0;
    /// Downward acceleration, px/tick^2
    pub const GRAVITY: f32 = 0.8;
    /// Upward impulse applied on jump, px/tick
    pub const JUMP_IMPULSE: f32 = -15.0;

    /// Ground obstacle (cactus) dimensions
    pub const CACTUS_WIDTH: f32 = 20.0;
    pub const CACTUS_HEIGHT: f32 = 40.0;

    /// Aerial obstacle (bird) dimensions
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 30.0;
    /// Birds move this much faster than the ground scroll
    pub const BIRD_SPEED_FACTOR: f32 = 1.2;
    /// Wing animation advance per tick, radians
    pub const WING_STEP: f32 = 0.1;
    /// Aerial spawn band keeps this much clearance above a grounded player
    pub const BIRD_GROUND_CLEARANCE: f32 = 50.0;

    /// Scroll speed at session start, px/tick
    pub const BASE_SPEED: f32 = 6.0;
    /// Linear speed ramp per tick while running
    pub const SPEED_RAMP: f32 = 0.001;

    /// A spawn attempt happens every this many ticks
    pub const SPAWN_INTERVAL_TICKS: u64 = 90;
    /// Probability the attempt produces a cactus (else a bird)
    pub const CACTUS_CHANCE: f32 = 0.7;

    /// Parallax background layers, far to near
    pub const NUM_BG_LAYERS: usize = 3;
    pub const BG_SPEED_FACTORS: [f32; NUM_BG_LAYERS] = [0.5, 0.7, 0.9];
    pub const BG_COLORS: [&str; NUM_BG_LAYERS] = ["#4a5568", "#2d3748", "#1a202c"];
    pub const BG_ELEMENT_WIDTH_RANGE: (f32, f32) = (50.0, 150.0);
    pub const BG_ELEMENT_HEIGHT_RANGE: (f32, f32) = (20.0, 80.0);
}
