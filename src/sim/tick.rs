//! Per-frame simulation tick
//!
//! Exactly one tick runs per animation frame. The tick consumes the frame's
//! input commands, advances every entity, resolves collisions, and drives the
//! NotStarted / Running / GameOver machine.

use super::geom::overlaps;
use super::state::{FactPanel, GameState, Phase};
use crate::consts::SPEED_RAMP;

/// Input commands for a single tick
///
/// The host maps key and pointer events onto these; unset fields mean "no
/// command this frame". `fact_result` is the hand-off channel from the
/// asynchronous fact fetch: the completed request's display text is queued
/// here and applied at the start of the next tick, so the render pass never
/// observes a half-written panel.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Space / up-arrow: starts the session, or jumps while running
    pub jump_or_start: bool,
    /// 'R': restart after game over
    pub restart: bool,
    /// Game-over fact button clicked
    pub request_fact: bool,
    /// Completed fact fetch (already fallback-mapped to display text)
    pub fact_result: Option<String>,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // A finished fetch lands regardless of phase. A request started before a
    // restart is never aborted, so its result can arrive mid-run and will be
    // shown on the next game-over screen.
    if let Some(text) = &input.fact_result {
        state.fact = FactPanel::Ready(text.clone());
    }

    // Commands. Anything issued in the wrong phase is silently ignored, and
    // a phase transition consumes the whole tick: the first simulated tick of
    // a run is the one after the start command.
    match state.phase {
        Phase::NotStarted => {
            if input.jump_or_start {
                state.start_run();
            }
            scroll_background(state);
            return;
        }
        Phase::GameOver => {
            if input.restart {
                state.start_run();
            } else if input.request_fact && state.fact != FactPanel::Loading {
                state.fact = FactPanel::Loading;
            }
            return;
        }
        Phase::Running => {
            if input.jump_or_start {
                state.player.jump();
            }
        }
    }

    scroll_background(state);

    state.time_ticks += 1;

    state.player.update(&state.field);

    state.spawner.update(
        state.time_ticks,
        &state.field,
        &mut state.rng,
        &mut state.obstacles,
    );

    // Move every obstacle, testing against the player as we go. The first
    // hit ends the run on the spot: score and speed stay frozen at the
    // collision instant and no pruning happens that tick.
    let player_bounds = state.player.bounds();
    let speed = state.speed;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.update(speed);
        if overlaps(player_bounds, obstacle.bounds()) {
            state.end_run();
            return;
        }
    }

    state.obstacles.retain(|o| !o.is_offscreen());

    state.score += 1;
    state.speed += SPEED_RAMP;
}

/// Scroll the parallax layers. They move on the start screen too; everything
/// freezes together once the run is over.
fn scroll_background(state: &mut GameState) {
    let speed = state.speed;
    let field = state.field;
    for layer in state.background.iter_mut() {
        layer.update(speed, &field, &mut state.rng);
    }
}
