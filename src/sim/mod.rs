//! Deterministic simulation module
//!
//! All game logic lives here. This module must be pure and deterministic:
//! - Boards are read-only while rays are simulated
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod board;
pub mod ray;
pub mod score;
pub mod state;

pub use board::Board;
pub use ray::{
    Interaction, Neighborhood, Outcome, RayResult, Side, Turn, entry, ray_count, ray_id_at,
    simulate, step_limit, straight_through,
};
pub use score::{Score, ScoreRules, score_round};
pub use state::{BorderInfo, GamePhase, GameState, RngState};
