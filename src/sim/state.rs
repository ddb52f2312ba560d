//! Game session state
//!
//! Wraps one board with the rays fired into it, the player's guesses and the
//! phase of the round. All randomness comes from the seeded RNG, so a seed
//! and round number reproduce the same board.

use glam::IVec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::ray::{RayResult, ray_id_at, simulate};
use super::score::{Score, score_round};
use crate::error::{GameError, GameResult};
use crate::settings::Settings;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Choosing settings, no board yet
    Setup,
    /// Firing rays and marking guesses
    Playing,
    /// Guesses submitted, board revealed
    GameOver,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Bumped every round so each board draws from its own stream
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// What a border cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderInfo {
    pub ray_id: u32,
    /// Index into `rays` of the ray fired from here
    pub fired: Option<usize>,
    /// Index into `rays` of the ray that exited here
    pub exit_of: Option<usize>,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub rng_state: RngState,
    pub phase: GamePhase,
    /// Hidden board for the current round
    pub board: Board,
    /// Rays in firing order
    pub rays: Vec<RayResult>,
    /// Interior cells marked as atoms
    pub guesses: Vec<IVec2>,
    /// Set once guesses are submitted
    pub score: Option<Score>,
}

impl GameState {
    /// Create a session in the Setup phase
    pub fn new(settings: Settings) -> GameResult<Self> {
        let board = Board::new(settings.board_size)?;
        let rng_state = RngState::new(settings.resolved_seed());
        Ok(Self {
            settings,
            rng_state,
            phase: GamePhase::Setup,
            board,
            rays: Vec::new(),
            guesses: Vec::new(),
            score: None,
        })
    }

    /// Hide a fresh set of atoms and start playing
    pub fn start(&mut self) -> GameResult<()> {
        if self.phase == GamePhase::Playing {
            return Err(GameError::WrongPhase(self.phase));
        }

        let mut rng = self.rng_state.to_rng();
        self.board = Board::random(
            self.settings.board_size,
            self.settings.atom_count,
            &mut rng,
        )?;
        self.rng_state.stream += 1;

        self.rays.clear();
        self.guesses.clear();
        self.score = None;
        self.phase = GamePhase::Playing;
        log::info!(
            "Round {} started with {} atoms (seed {})",
            self.rng_state.stream,
            self.settings.atom_count,
            self.rng_state.seed
        );
        Ok(())
    }

    /// Back to Setup, keeping the RNG position
    pub fn reset(&mut self) {
        self.phase = GamePhase::Setup;
        self.rays.clear();
        self.guesses.clear();
        self.score = None;
    }

    /// Whether a ray id already appears as an entry or an exit
    pub fn ray_used(&self, ray_id: u32) -> bool {
        self.rays
            .iter()
            .any(|r| r.entry == ray_id || r.exit() == Some(ray_id))
    }

    /// Fire a ray and record the result
    pub fn fire_ray(&mut self, ray_id: u32) -> GameResult<&RayResult> {
        self.require(GamePhase::Playing)?;
        if self.ray_used(ray_id) {
            return Err(GameError::RayAlreadyUsed(ray_id));
        }
        let result = simulate(&self.board, ray_id)?;

        log::debug!("Fired ray {}: {}", ray_id, result.outcome);
        self.rays.push(result);
        let last = self.rays.len() - 1;
        Ok(&self.rays[last])
    }

    /// Mark or unmark an interior cell. Returns whether it is now marked.
    pub fn toggle_guess(&mut self, x: i32, y: i32) -> GameResult<bool> {
        self.require(GamePhase::Playing)?;
        let cell = IVec2::new(x, y);
        if !self.board.is_interior(cell) {
            return Err(GameError::NotInterior { x, y });
        }

        if let Some(i) = self.guesses.iter().position(|&g| g == cell) {
            self.guesses.remove(i);
            return Ok(false);
        }
        if self.guesses.len() >= self.settings.atom_count {
            return Err(GameError::TooManyGuesses {
                limit: self.settings.atom_count,
            });
        }
        self.guesses.push(cell);
        Ok(true)
    }

    /// Score the round and reveal the board
    pub fn submit(&mut self) -> GameResult<Score> {
        self.require(GamePhase::Playing)?;
        let need = self.settings.atom_count;
        if self.guesses.len() != need {
            return Err(GameError::IncompleteGuesses {
                have: self.guesses.len(),
                need,
            });
        }

        let score = score_round(&self.settings.rules, &self.rays, &self.guesses, &self.board);
        self.score = Some(score);
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} ({} of {} atoms found)",
            score.total,
            score.correct_guesses,
            need
        );
        Ok(score)
    }

    /// Ray bookkeeping for a border cell; `None` for corners and the interior
    pub fn border_info(&self, pos: IVec2) -> Option<BorderInfo> {
        let ray_id = ray_id_at(self.board.size(), pos)?;
        Some(BorderInfo {
            ray_id,
            fired: self.rays.iter().position(|r| r.entry == ray_id),
            exit_of: self.rays.iter().position(|r| r.exit() == Some(ray_id)),
        })
    }

    fn require(&self, phase: GamePhase) -> GameResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::WrongPhase(self.phase))
        }
    }
}
