//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed cadence
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod geom;
pub mod spawn;
pub mod state;
pub mod tick;

pub use entity::{BackgroundLayer, Obstacle, ObstacleKind, Player};
pub use geom::{Rect, overlaps};
pub use spawn::Spawner;
pub use state::{FactPanel, FieldConfig, GameState, Phase};
pub use tick::{TickInput, tick};
