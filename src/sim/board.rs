//! The hidden board
//!
//! An `N`x`N` interior surrounded by a one-cell border that never holds an
//! atom. Coordinates are `(x, y)` with `x` the column and `y` the row, both in
//! `[0, N + 1]`; the interior is `[1, N]` on each axis.

use glam::IVec2;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_BOARD_SIZE;
use crate::error::{SimError, SimResult};

/// Padded atom grid, read-only once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Interior side length (N)
    size: usize,
    /// Row-major cells of the padded grid, `(N + 2)²` entries
    cells: Vec<bool>,
}

impl Board {
    /// Create an empty board with an `size`x`size` interior
    pub fn new(size: usize) -> SimResult<Self> {
        if size == 0 {
            return Err(SimError::InvalidBoardSize);
        }
        if size > MAX_BOARD_SIZE {
            return Err(SimError::BoardTooLarge {
                size,
                max: MAX_BOARD_SIZE,
            });
        }
        let side = size + 2;
        Ok(Self {
            size,
            cells: vec![false; side * side],
        })
    }

    /// Create a board with atoms at the given 1-based interior cells
    pub fn with_atoms<I>(size: usize, atoms: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut board = Self::new(size)?;
        for (x, y) in atoms {
            let pos = IVec2::new(x, y);
            if !board.is_interior(pos) {
                return Err(SimError::AtomOutOfBounds { x, y, size });
            }
            let i = board.index(pos);
            board.cells[i] = true;
        }
        Ok(board)
    }

    /// Place `count` distinct atoms uniformly over the interior
    pub fn random<R: Rng + ?Sized>(size: usize, count: usize, rng: &mut R) -> SimResult<Self> {
        let mut board = Self::new(size)?;
        let capacity = size * size;
        if count > capacity {
            return Err(SimError::TooManyAtoms {
                requested: count,
                capacity,
            });
        }

        for cell in index::sample(rng, capacity, count) {
            let pos = IVec2::new((cell % size) as i32 + 1, (cell / size) as i32 + 1);
            let i = board.index(pos);
            board.cells[i] = true;
        }

        log::debug!("Placed {} atoms on a {}x{} board", count, size, size);
        Ok(board)
    }

    /// Interior side length (N)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Padded side length (N + 2)
    #[inline]
    pub fn side(&self) -> usize {
        self.size + 2
    }

    /// Whether an atom sits at `pos`. Anything off the padded grid reads empty.
    #[inline]
    pub fn atom_at(&self, pos: IVec2) -> bool {
        self.in_grid(pos) && self.cells[self.index(pos)]
    }

    /// Whether `pos` lies inside the padded grid
    #[inline]
    pub fn in_grid(&self, pos: IVec2) -> bool {
        let last = self.size as i32 + 1;
        (0..=last).contains(&pos.x) && (0..=last).contains(&pos.y)
    }

    /// Whether `pos` is one of the atom-bearing cells
    #[inline]
    pub fn is_interior(&self, pos: IVec2) -> bool {
        let n = self.size as i32;
        (1..=n).contains(&pos.x) && (1..=n).contains(&pos.y)
    }

    /// Whether `pos` is on the outer ring (corners included)
    #[inline]
    pub fn is_border(&self, pos: IVec2) -> bool {
        self.in_grid(pos) && !self.is_interior(pos)
    }

    pub fn atom_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Atom positions in row-major order
    pub fn atoms(&self) -> impl Iterator<Item = IVec2> + '_ {
        let side = self.side();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(move |(i, _)| IVec2::new((i % side) as i32, (i / side) as i32))
    }

    #[inline]
    fn index(&self, pos: IVec2) -> usize {
        pos.y as usize * self.side() + pos.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_empty_board() {
        use crate::consts::{GRID_SIZE, INTERNAL_SIZE};

        let board = Board::new(GRID_SIZE).unwrap();
        assert_eq!(board.size(), 8);
        assert_eq!(board.side(), INTERNAL_SIZE);
        assert_eq!(board.atom_count(), 0);
        assert_eq!(board.atoms().count(), 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Board::new(0), Err(SimError::InvalidBoardSize));
    }

    #[test]
    fn test_oversized_board_rejected() {
        assert!(Board::new(MAX_BOARD_SIZE).is_ok());
        assert_eq!(
            Board::new(1 << 30),
            Err(SimError::BoardTooLarge {
                size: 1 << 30,
                max: MAX_BOARD_SIZE
            })
        );
        assert!(Board::random(MAX_BOARD_SIZE + 1, 1, &mut Pcg32::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_with_atoms() {
        let board = Board::with_atoms(8, [(1, 1), (8, 3), (1, 1)]).unwrap();
        assert_eq!(board.atom_count(), 2);
        assert!(board.atom_at(IVec2::new(1, 1)));
        assert!(board.atom_at(IVec2::new(8, 3)));
        assert!(!board.atom_at(IVec2::new(3, 8)));
        let atoms: Vec<_> = board.atoms().collect();
        assert_eq!(atoms, vec![IVec2::new(1, 1), IVec2::new(8, 3)]);
    }

    #[test]
    fn test_atom_on_border_rejected() {
        let err = Board::with_atoms(8, [(0, 4)]).unwrap_err();
        assert_eq!(err, SimError::AtomOutOfBounds { x: 0, y: 4, size: 8 });
        assert!(Board::with_atoms(8, [(9, 9)]).is_err());
    }

    #[test]
    fn test_out_of_grid_reads_empty() {
        let board = Board::with_atoms(8, [(1, 1)]).unwrap();
        assert!(!board.atom_at(IVec2::new(-1, 1)));
        assert!(!board.atom_at(IVec2::new(1, -1)));
        assert!(!board.atom_at(IVec2::new(10, 1)));
        assert!(!board.atom_at(IVec2::new(1, 42)));
    }

    #[test]
    fn test_border_classification() {
        let board = Board::new(8).unwrap();
        assert!(board.is_border(IVec2::new(0, 0)));
        assert!(board.is_border(IVec2::new(9, 4)));
        assert!(board.is_border(IVec2::new(4, 0)));
        assert!(!board.is_border(IVec2::new(4, 4)));
        assert!(!board.is_border(IVec2::new(10, 4)));
        assert!(board.is_interior(IVec2::new(8, 8)));
        assert!(!board.is_interior(IVec2::new(0, 8)));
    }

    #[test]
    fn test_random_placement() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let board = Board::random(8, 5, &mut rng).unwrap();
        assert_eq!(board.atom_count(), 5);
        assert!(board.atoms().all(|a| board.is_interior(a)));
    }

    #[test]
    fn test_random_placement_is_seeded() {
        let a = Board::random(8, 4, &mut Pcg32::seed_from_u64(7)).unwrap();
        let b = Board::random(8, 4, &mut Pcg32::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_fills_whole_board() {
        let mut rng = Pcg32::seed_from_u64(1);
        let board = Board::random(3, 9, &mut rng).unwrap();
        assert_eq!(board.atom_count(), 9);

        let err = Board::random(3, 10, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SimError::TooManyAtoms {
                requested: 10,
                capacity: 9
            }
        );
    }
}
