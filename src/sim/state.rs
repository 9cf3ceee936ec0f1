//! Session state and the start / running / game-over machine
//!
//! The session exclusively owns the player and the obstacle list; the
//! background layers live alongside them but survive resets. Nothing is
//! stored at module scope.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{BackgroundLayer, Obstacle, Player};
use super::spawn::Spawner;
use crate::consts::*;

/// Logical field dimensions, passed explicitly to spawner and entity
/// constructors
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Height of the ground strip at the bottom of the field
    pub ground_margin: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            ground_margin: GROUND_MARGIN,
        }
    }
}

impl FieldConfig {
    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_margin
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Initial screen, waiting for the first start command
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended on a collision; simulation frozen
    GameOver,
}

/// Dino-fact display state on the game-over screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FactPanel {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight; the UI shows a loading line
    Loading,
    /// Display text, either a fetched fact or a fallback message
    Ready(String),
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: FieldConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: Phase,
    /// One point per tick survived
    pub score: u64,
    /// Current scroll speed, px/tick
    pub speed: f32,
    /// Best score of any completed run this process
    pub high_score: u64,
    /// Ticks elapsed in the current run
    pub time_ticks: u64,
    pub player: Player,
    /// Insertion order = spawn order
    pub obstacles: Vec<Obstacle>,
    /// Cosmetic parallax layers; survive resets
    pub background: Vec<BackgroundLayer>,
    pub spawner: Spawner,
    pub fact: FactPanel,
}

impl GameState {
    /// Create a fresh session in the NotStarted phase
    pub fn new(seed: u64, field: FieldConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let background = (0..NUM_BG_LAYERS)
            .map(|i| BackgroundLayer::new(i, &field, &mut rng))
            .collect();

        Self {
            field,
            seed,
            rng,
            phase: Phase::NotStarted,
            score: 0,
            speed: BASE_SPEED,
            high_score: 0,
            time_ticks: 0,
            player: Player::new(&field),
            obstacles: Vec::new(),
            background,
            spawner: Spawner::default(),
            fact: FactPanel::Idle,
        }
    }

    /// Enter Running with a clean run: fresh player, empty obstacle list,
    /// score and speed back to base. High score and background layers are
    /// preserved.
    pub(crate) fn start_run(&mut self) {
        self.phase = Phase::Running;
        self.score = 0;
        self.speed = BASE_SPEED;
        self.time_ticks = 0;
        self.player = Player::new(&self.field);
        self.obstacles.clear();
        self.fact = FactPanel::Idle;
        log::info!("run started (high score {})", self.high_score);
    }

    /// Enter GameOver, folding the finished run into the high score
    pub(crate) fn end_run(&mut self) {
        self.phase = Phase::GameOver;
        self.high_score = self.high_score.max(self.score);
        log::info!(
            "run over: score {} (high score {})",
            self.score,
            self.high_score
        );
    }
}
