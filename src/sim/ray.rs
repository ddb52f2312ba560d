//! Ray propagation
//!
//! Ray ids run clockwise around the box in four bands of `N`:
//! left `1..=N` (top to bottom), bottom `N+1..=2N` (left to right),
//! right `2N+1..=3N` (bottom to top), top `3N+1..=4N` (right to left).
//! The same numbering names exit points.
//!
//! Each step looks at the cell ahead and its two flanks:
//! - atom ahead: absorbed (flanks don't matter)
//! - nothing: advance one cell
//! - one flank: turn 90° away from it, in place
//! - both flanks (funnel): turn as if only the first flank were occupied
//!
//! The first flank is the left cell when moving vertically and the upper cell
//! when moving horizontally.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use crate::consts::MAX_BOARD_SIZE;
use crate::error::{SimError, SimResult};

/// Side of the box a ray id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Bottom,
    Right,
    Top,
}

impl Side {
    /// Band a ray id falls in, or `None` if out of `1..=4N` or `size` is too big for a board
    pub fn of_ray(size: usize, id: u32) -> Option<Self> {
        if size > MAX_BOARD_SIZE {
            return None;
        }
        let n = size as u32;
        match id {
            0 => None,
            _ if id <= n => Some(Side::Left),
            _ if id <= 2 * n => Some(Side::Bottom),
            _ if id <= 3 * n => Some(Side::Right),
            _ if id <= 4 * n => Some(Side::Top),
            _ => None,
        }
    }

    /// Unit step pointing into the box from this side
    pub fn inward(self) -> IVec2 {
        match self {
            Side::Left => IVec2::X,
            Side::Bottom => IVec2::NEG_Y,
            Side::Right => IVec2::NEG_X,
            Side::Top => IVec2::Y,
        }
    }
}

/// Number of ray ids on a board with an `size`x`size` interior
#[inline]
pub fn ray_count(size: usize) -> u32 {
    4 * size.min(MAX_BOARD_SIZE) as u32
}

/// Border position and inward direction for a ray id
pub fn entry(size: usize, id: u32) -> SimResult<(IVec2, IVec2)> {
    let side = Side::of_ray(size, id).ok_or(SimError::InvalidRayId {
        id,
        max: ray_count(size),
    })?;
    let n = size as i32;
    let id = id as i32;
    let pos = match side {
        Side::Left => IVec2::new(0, id),
        Side::Bottom => IVec2::new(id - n, n + 1),
        Side::Right => IVec2::new(n + 1, 3 * n + 1 - id),
        Side::Top => IVec2::new(4 * n + 1 - id, 0),
    };
    Ok((pos, side.inward()))
}

/// Ray id of a border cell; `None` for corners, interior and off-grid cells
pub fn ray_id_at(size: usize, pos: IVec2) -> Option<u32> {
    if size > MAX_BOARD_SIZE {
        return None;
    }
    let n = size as i32;
    let interior = |v: i32| (1..=n).contains(&v);
    let id = if pos.x == 0 && interior(pos.y) {
        pos.y
    } else if pos.x == n + 1 && interior(pos.y) {
        3 * n + 1 - pos.y
    } else if pos.y == 0 && interior(pos.x) {
        4 * n + 1 - pos.x
    } else if pos.y == n + 1 && interior(pos.x) {
        n + pos.x
    } else {
        return None;
    };
    Some(id as u32)
}

/// Where a ray leaves a box with no atoms in it
pub fn straight_through(size: usize, id: u32) -> SimResult<u32> {
    let n = size as u32;
    match Side::of_ray(size, id) {
        Some(Side::Left | Side::Right) => Ok(3 * n + 1 - id),
        Some(Side::Bottom | Side::Top) => Ok(5 * n + 1 - id),
        None => Err(SimError::InvalidRayId {
            id,
            max: ray_count(size),
        }),
    }
}

/// Rotation sense of a deflection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// New direction component is +1
    Positive,
    /// New direction component is -1
    Negative,
}

impl Turn {
    /// Rotate `dir` a quarter turn: the moving axis goes still and the still axis takes the sign
    pub fn apply(self, dir: IVec2) -> IVec2 {
        let z = match self {
            Turn::Positive => 1,
            Turn::Negative => -1,
        };
        if dir.x == 0 {
            IVec2::new(z, 0)
        } else {
            IVec2::new(0, z)
        }
    }
}

/// Atoms around the next cell a ray would enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    pub ahead: bool,
    /// Left flank (vertical travel) or upper flank (horizontal travel)
    pub first: bool,
    /// Right flank (vertical travel) or lower flank (horizontal travel)
    pub second: bool,
}

impl Neighborhood {
    /// Read the candidate cell `pos + dir` and its flanks
    pub fn probe(board: &Board, pos: IVec2, dir: IVec2) -> Self {
        let next = pos + dir;
        let (first, second) = if dir.x == 0 {
            (next - IVec2::X, next + IVec2::X)
        } else {
            (next - IVec2::Y, next + IVec2::Y)
        };
        Self {
            ahead: board.atom_at(next),
            first: board.atom_at(first),
            second: board.atom_at(second),
        }
    }
}

/// What a ray does on one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Absorb,
    Advance,
    Deflect(Turn),
}

impl Interaction {
    pub fn classify(near: Neighborhood) -> Self {
        match near {
            Neighborhood { ahead: true, .. } => Interaction::Absorb,
            Neighborhood {
                first: false,
                second: false,
                ..
            } => Interaction::Advance,
            Neighborhood {
                first: true,
                second: false,
                ..
            } => Interaction::Deflect(Turn::Positive),
            Neighborhood {
                first: false,
                second: true,
                ..
            } => Interaction::Deflect(Turn::Negative),
            // Funnel: first flank wins
            Neighborhood {
                first: true,
                second: true,
                ..
            } => Interaction::Deflect(Turn::Positive),
        }
    }
}

/// Terminal state of a ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Absorbed,
    Reflected,
    Exit { exit: u32 },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Absorbed => write!(f, "Absorbed"),
            Outcome::Reflected => write!(f, "Reflected"),
            Outcome::Exit { exit } => write!(f, "Exit at {}", exit),
        }
    }
}

/// A completed ray: where it went in, how it ended, and every step in between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RayResult {
    pub entry: u32,
    pub outcome: Outcome,
    /// Entry position, then the ray's position after each non-absorbing step.
    /// A deflection repeats the unchanged position.
    pub path: Vec<IVec2>,
}

impl RayResult {
    /// Exit id, if the ray left from a different point
    pub fn exit(&self) -> Option<u32> {
        match self.outcome {
            Outcome::Exit { exit } => Some(exit),
            _ => None,
        }
    }
}

/// Upper bound on loop iterations: every (position, direction) state once
#[inline]
pub fn step_limit(board: &Board) -> usize {
    4 * board.side() * board.side()
}

/// Fire ray `ray_id` into `board` and follow it until it terminates
pub fn simulate(board: &Board, ray_id: u32) -> SimResult<RayResult> {
    let size = board.size();
    let (mut pos, mut dir) = entry(size, ray_id)?;
    let mut path = vec![pos];
    let limit = step_limit(board);

    for _ in 0..limit {
        match Interaction::classify(Neighborhood::probe(board, pos, dir)) {
            Interaction::Absorb => {
                log::debug!("Ray {} absorbed after {} steps", ray_id, path.len());
                return Ok(RayResult {
                    entry: ray_id,
                    outcome: Outcome::Absorbed,
                    path,
                });
            }
            Interaction::Advance => pos += dir,
            Interaction::Deflect(turn) => dir = turn.apply(dir),
        }
        path.push(pos);

        if let Some(exit) = ray_id_at(size, pos) {
            let outcome = if exit == ray_id {
                Outcome::Reflected
            } else {
                Outcome::Exit { exit }
            };
            log::debug!("Ray {}: {}", ray_id, outcome);
            return Ok(RayResult {
                entry: ray_id,
                outcome,
                path,
            });
        }
    }

    log::error!("Ray {} exceeded {} steps at {:?}", ray_id, limit, pos);
    Err(SimError::InvariantViolation {
        ray_id,
        steps: limit,
    })
}
