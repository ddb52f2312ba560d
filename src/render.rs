//! Plain-text rendering of the box and the ray log
//!
//! Border cells show the ray id until used, then `A` (absorbed), `R`
//! (reflected) or the firing order number shared by an entry and its exit.
//! Interior cells show `?` for guesses while playing. Once the game is over:
//! `@` correct guess, `*` missed atom, `x` wrong guess.

use glam::IVec2;
use serde_json::json;

use crate::sim::{GamePhase, GameState, Outcome, RayResult};

/// One log entry, e.g. `Ray 3: Exit at 22`
pub fn log_line(ray: &RayResult) -> String {
    format!("Ray {}: {}", ray.entry, ray.outcome)
}

/// JSON snapshot of a round. The board is only included once the game is over.
pub fn json_view(state: &GameState) -> serde_json::Value {
    let mut view = json!({
        "phase": state.phase,
        "seed": state.rng_state.seed,
        "atom_count": state.settings.atom_count,
        "rays": state.rays,
        "guesses": state.guesses,
        "score": state.score,
    });
    if state.phase == GamePhase::GameOver {
        view["atoms"] = json!(state.board.atoms().collect::<Vec<_>>());
    }
    view
}

/// Text for a single cell, without padding
fn cell_text(state: &GameState, pos: IVec2) -> String {
    let board = &state.board;
    if let Some(info) = state.border_info(pos) {
        return match (info.fired, info.exit_of) {
            (Some(i), _) => match state.rays[i].outcome {
                Outcome::Absorbed => "A".to_string(),
                Outcome::Reflected => "R".to_string(),
                Outcome::Exit { .. } => format!("{}", i + 1),
            },
            (None, Some(i)) => format!("{}", i + 1),
            (None, None) => info.ray_id.to_string(),
        };
    }
    if !board.is_interior(pos) {
        // Corner
        return String::new();
    }

    let atom = board.atom_at(pos);
    let guessed = state.guesses.contains(&pos);
    let mark = match (state.phase, atom, guessed) {
        (GamePhase::GameOver, true, true) => "@",
        (GamePhase::GameOver, true, false) => "*",
        (GamePhase::GameOver, false, true) => "x",
        (_, _, true) => "?",
        _ => ".",
    };
    mark.to_string()
}

/// Render the padded grid, one row per line
pub fn render_board(state: &GameState) -> String {
    let side = state.board.side() as i32;
    let mut out = String::new();
    for y in 0..side {
        for x in 0..side {
            out.push_str(&format!("{:>3}", cell_text(state, IVec2::new(x, y))));
        }
        // Trailing spaces from empty corners are noise
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Board;

    fn playing_with(atoms: &[(i32, i32)]) -> GameState {
        let settings = Settings {
            seed: Some(3),
            atom_count: atoms.len(),
            ..Default::default()
        };
        let mut state = GameState::new(settings).unwrap();
        state.start().unwrap();
        state.board = Board::with_atoms(8, atoms.iter().copied()).unwrap();
        state
    }

    fn row(rendered: &str, y: usize) -> Vec<&str> {
        rendered.lines().nth(y).unwrap().split_whitespace().collect()
    }

    #[test]
    fn test_log_line() {
        let state = {
            let mut s = playing_with(&[(1, 1)]);
            s.fire_ray(1).unwrap();
            s.fire_ray(3).unwrap();
            s
        };
        assert_eq!(log_line(&state.rays[0]), "Ray 1: Absorbed");
        assert_eq!(log_line(&state.rays[1]), "Ray 3: Exit at 22");
    }

    #[test]
    fn test_fresh_board_shows_ray_ids() {
        let state = playing_with(&[(4, 4)]);
        let out = render_board(&state);
        assert_eq!(out.lines().count(), 10);
        assert_eq!(row(&out, 0), vec!["32", "31", "30", "29", "28", "27", "26", "25"]);
        assert_eq!(row(&out, 1), vec!["1", ".", ".", ".", ".", ".", ".", ".", ".", "24"]);
        assert_eq!(row(&out, 9), vec!["9", "10", "11", "12", "13", "14", "15", "16"]);
        // Atoms stay hidden while playing
        assert!(!out.contains('*'));
    }

    #[test]
    fn test_used_rays_marked() {
        let mut state = playing_with(&[(4, 4), (1, 2)]);
        state.fire_ray(4).unwrap(); // absorbed
        state.fire_ray(3).unwrap(); // reflected off (1,2)
        state.fire_ray(6).unwrap(); // straight across to 19
        let out = render_board(&state);
        assert_eq!(row(&out, 4)[0], "A");
        assert_eq!(row(&out, 3)[0], "R");
        assert_eq!(row(&out, 6)[0], "3");
        assert_eq!(row(&out, 6)[9], "3");
    }

    #[test]
    fn test_json_hides_atoms_while_playing() {
        let mut state = playing_with(&[(2, 2), (5, 5)]);
        state.fire_ray(2).unwrap();

        let view = json_view(&state);
        assert_eq!(view["phase"], "Playing");
        assert_eq!(view["rays"].as_array().map(Vec::len), Some(1));
        assert!(view.get("atoms").is_none());
        assert!(view.get("board").is_none());

        state.toggle_guess(2, 2).unwrap();
        state.toggle_guess(5, 5).unwrap();
        state.submit().unwrap();
        let view = json_view(&state);
        assert_eq!(view["phase"], "GameOver");
        assert_eq!(view["atoms"], json!([[2, 2], [5, 5]]));
        assert_eq!(view["score"]["correct_guesses"], 2);
    }

    #[test]
    fn test_game_over_reveal() {
        let mut state = playing_with(&[(2, 2), (5, 5)]);
        state.toggle_guess(2, 2).unwrap();
        state.toggle_guess(3, 3).unwrap();
        assert_eq!(row(&render_board(&state), 2)[2], "?");

        state.submit().unwrap();
        let out = render_board(&state);
        assert_eq!(row(&out, 2)[2], "@");
        assert_eq!(row(&out, 3)[3], "x");
        assert_eq!(row(&out, 5)[5], "*");
    }
}
