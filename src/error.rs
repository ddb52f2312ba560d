//! Error types for the simulator, the game session and settings loading

use crate::sim::GamePhase;

/// Result type for board construction and ray simulation
pub type SimResult<T> = Result<T, SimError>;

/// Result type for game session operations
pub type GameResult<T> = Result<T, GameError>;

/// Errors raised by the board and the ray simulator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("Invalid ray id {id} (expected 1..={max})")]
    InvalidRayId { id: u32, max: u32 },

    #[error("Board size must be at least 1")]
    InvalidBoardSize,

    #[error("Board size {size} exceeds the maximum of {max}")]
    BoardTooLarge { size: usize, max: usize },

    #[error("Atom at ({x}, {y}) is outside the {size}x{size} interior")]
    AtomOutOfBounds { x: i32, y: i32, size: usize },

    #[error("Cannot place {requested} atoms on a board with {capacity} cells")]
    TooManyAtoms { requested: usize, capacity: usize },

    /// The step cap was hit. Only reachable with a broken interaction table.
    #[error("Ray {ray_id} did not terminate within {steps} steps")]
    InvariantViolation { ray_id: u32, steps: usize },
}

/// Errors raised by game session operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("Action not allowed during {0:?}")]
    WrongPhase(GamePhase),

    #[error("Ray {0} has already been used")]
    RayAlreadyUsed(u32),

    #[error("Cell ({x}, {y}) is not inside the box")]
    NotInterior { x: i32, y: i32 },

    #[error("Already holding the maximum of {limit} guesses")]
    TooManyGuesses { limit: usize },

    #[error("Need {need} guesses to submit, have {have}")]
    IncompleteGuesses { have: usize, need: usize },
}

/// Errors raised while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}
