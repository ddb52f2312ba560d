//! Round scoring (lower is better)

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::ray::{Outcome, RayResult};

/// Cost of each ray kind and of a wrong guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub absorbed: u32,
    pub reflected: u32,
    pub exit: u32,
    pub wrong_guess: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            absorbed: 1,
            reflected: 1,
            exit: 2,
            wrong_guess: 5,
        }
    }
}

impl ScoreRules {
    /// Cost of firing a ray with this outcome
    pub fn ray_cost(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Absorbed => self.absorbed,
            Outcome::Reflected => self.reflected,
            Outcome::Exit { .. } => self.exit,
        }
    }
}

/// Final tally for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub ray_cost: u32,
    pub correct_guesses: usize,
    pub wrong_guesses: usize,
    pub penalty: u32,
    pub total: u32,
}

/// Score fired rays plus guesses against the hidden board. Missed atoms cost nothing extra.
pub fn score_round(
    rules: &ScoreRules,
    rays: &[RayResult],
    guesses: &[IVec2],
    board: &Board,
) -> Score {
    // Costs come from user settings, so totals saturate instead of overflowing
    let ray_cost = rays
        .iter()
        .fold(0u32, |acc, r| acc.saturating_add(rules.ray_cost(r.outcome)));
    let correct_guesses = guesses.iter().filter(|&&g| board.atom_at(g)).count();
    let wrong_guesses = guesses.len() - correct_guesses;
    let penalty = u32::try_from(wrong_guesses)
        .unwrap_or(u32::MAX)
        .saturating_mul(rules.wrong_guess);

    Score {
        ray_cost,
        correct_guesses,
        wrong_guesses,
        penalty,
        total: ray_cost.saturating_add(penalty),
    }
}
