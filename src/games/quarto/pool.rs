//! The pool of pieces not yet placed or selected.

use super::error::QuartoError;
use super::piece::{PIECE_COUNT, Piece};
use serde::{Deserialize, Serialize};
use tracing::instrument;

const FULL_MASK: u16 = u16::MAX;

/// Set of unplaced, unselected pieces, stored as a 16-bit mask over
/// [`Piece::index`].
///
/// Serializes as the list of remaining piece codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Piece>", try_from = "Vec<Piece>")]
pub struct PiecePool {
    mask: u16,
}

/// Creates a pool holding all 16 pieces.
pub fn new_pool() -> PiecePool {
    PiecePool::full()
}

impl PiecePool {
    /// Pool holding all 16 pieces exactly once.
    pub fn full() -> Self {
        Self { mask: FULL_MASK }
    }

    /// Pool holding no pieces.
    pub fn empty() -> Self {
        Self { mask: 0 }
    }

    /// Builds a pool from a list of distinct pieces.
    ///
    /// # Errors
    ///
    /// Returns [`QuartoError::InvalidSnapshot`] if a piece is listed twice.
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Result<Self, QuartoError> {
        let mut pool = Self::empty();
        for piece in pieces {
            if pool.contains(piece) {
                return Err(QuartoError::InvalidSnapshot(format!(
                    "piece {} listed twice in pool",
                    piece
                )));
            }
            pool.mask |= Self::bit(piece);
        }
        Ok(pool)
    }

    fn bit(piece: Piece) -> u16 {
        1 << piece.index()
    }

    /// O(1) membership check.
    pub fn contains(&self, piece: Piece) -> bool {
        self.mask & Self::bit(piece) != 0
    }

    /// Withdraws a piece from the pool.
    ///
    /// # Errors
    ///
    /// Returns [`QuartoError::PieceNotInPool`] if the piece was already withdrawn.
    #[instrument(skip(self), fields(remaining = self.len()))]
    pub fn remove(&mut self, piece: Piece) -> Result<(), QuartoError> {
        if !self.contains(piece) {
            return Err(QuartoError::PieceNotInPool(piece));
        }
        self.mask &= !Self::bit(piece);
        Ok(())
    }

    /// Remaining pieces in index order. The order is stable across calls.
    pub fn remaining(&self) -> impl Iterator<Item = Piece> + '_ {
        let mask = self.mask;
        (0..PIECE_COUNT)
            .filter(move |&i| mask & (1u16 << i) != 0)
            .filter_map(Piece::from_index)
    }

    /// Number of remaining pieces.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// True if no pieces remain.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

impl Default for PiecePool {
    fn default() -> Self {
        Self::full()
    }
}

impl From<PiecePool> for Vec<Piece> {
    fn from(pool: PiecePool) -> Self {
        pool.remaining().collect()
    }
}

impl TryFrom<Vec<Piece>> for PiecePool {
    type Error = QuartoError;

    fn try_from(pieces: Vec<Piece>) -> Result<Self, Self::Error> {
        Self::from_pieces(pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_contains_every_piece_once() {
        let pool = new_pool();
        assert_eq!(pool.len(), PIECE_COUNT);
        for piece in Piece::all() {
            assert!(pool.contains(piece));
        }
        assert_eq!(pool.remaining().collect::<Vec<_>>(), Piece::all().collect::<Vec<_>>());
    }

    #[test]
    fn test_remove_withdraws_piece() {
        let mut pool = new_pool();
        let piece = Piece::from_index(5).unwrap();
        pool.remove(piece).unwrap();
        assert!(!pool.contains(piece));
        assert_eq!(pool.len(), 15);
        assert!(pool.remaining().all(|p| p != piece));
    }

    #[test]
    fn test_remove_twice_fails() {
        let mut pool = new_pool();
        let piece = Piece::from_index(0).unwrap();
        pool.remove(piece).unwrap();
        let before = pool;
        assert_eq!(pool.remove(piece), Err(QuartoError::PieceNotInPool(piece)));
        assert_eq!(pool, before);
    }

    #[test]
    fn test_remaining_is_restartable() {
        let mut pool = new_pool();
        pool.remove(Piece::from_index(3).unwrap()).unwrap();
        let first: Vec<_> = pool.remaining().collect();
        let second: Vec<_> = pool.remaining().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_pieces_rejects_duplicates() {
        let piece = Piece::from_index(9).unwrap();
        assert!(PiecePool::from_pieces([piece, piece]).is_err());
        assert_eq!(PiecePool::from_pieces([piece]).unwrap().len(), 1);
    }
}
