//! Blackbox - the classic atom-hunting deduction game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board, ray propagation, scoring, game state)
//! - `render`: Plain-text board and ray log
//! - `settings`: JSON-backed game settings
//! - `error`: Error types

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{GameError, GameResult, SettingsError, SimError, SimResult};
pub use settings::Settings;
pub use sim::{Board, GamePhase, GameState, Outcome, RayResult, simulate};

/// Game configuration constants
pub mod consts {
    /// Interior side length of the standard box
    pub const GRID_SIZE: usize = 8;
    /// Padded side length (interior plus border ring)
    pub const INTERNAL_SIZE: usize = GRID_SIZE + 2;
    /// Ray ids on the standard box (1..=RAY_COUNT)
    pub const RAY_COUNT: u32 = 4 * GRID_SIZE as u32;
    /// Largest interior side length a board may have
    pub const MAX_BOARD_SIZE: usize = 64;

    /// Atoms hidden per round unless configured
    pub const DEFAULT_ATOMS: usize = 4;
    pub const MIN_ATOMS: usize = 1;
    pub const MAX_ATOMS: usize = 10;
}
