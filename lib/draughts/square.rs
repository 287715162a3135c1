use crate::draughts::Bitboard;
use crate::util::parsers::coord;
use nom::{IResult, Parser};
use std::fmt::{self, Display, Formatter};

/// A square on the draughts board.
///
/// Rows run 0–7 top to bottom, columns 0–7 left to right; the backing index
/// is `row * 8 + col`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square(#[cfg_attr(test, strategy(0..64u8))] u8);

impl Square {
    /// Constructs a [`Square`] from a pair of row and column.
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// This square's row.
    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    /// This square's column.
    #[inline(always)]
    pub const fn col(self) -> u8 {
        self.0 & 0b111
    }

    /// Returns a [`Bitboard`] that only contains this square.
    #[inline(always)]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1 << self.0)
    }

    /// Whether this is a dark square.
    ///
    /// Pieces only ever occupy dark squares.
    #[inline(always)]
    pub const fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// The square displaced by the given row and column deltas, if on the board.
    #[inline(always)]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;

        if row & !7 == 0 && col & !7 == 0 {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// An iterator over all squares in row-major order.
    #[inline(always)]
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..64).map(Square)
    }

    #[inline(always)]
    pub(crate) const fn from_index(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row(), self.col())
    }
}

/// Parses the two-digit wire form of a [`Square`].
pub(crate) fn wire(input: &str) -> IResult<&str, Square> {
    (coord, coord)
        .map(|(row, col)| Square::new(row, col))
        .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn new_constructs_square_from_pair_of_row_and_col(sq: Square) {
        assert_eq!(Square::new(sq.row(), sq.col()), sq);
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn square_has_an_equivalent_bitboard(sq: Square) {
        assert_eq!(Vec::from_iter(sq.bitboard()), vec![sq]);
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn offset_stays_within_the_board(sq: Square, #[strategy(-8..8i8)] dr: i8, #[strategy(-8..8i8)] dc: i8) {
        match sq.offset(dr, dc) {
            None => {}
            Some(other) => {
                assert_eq!(other.row() as i8, sq.row() as i8 + dr);
                assert_eq!(other.col() as i8, sq.col() as i8 + dc);
            }
        }
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn offset_by_zero_is_an_identity(sq: Square) {
        assert_eq!(sq.offset(0, 0), Some(sq));
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn iter_visits_all_squares_in_row_major_order() {
        let squares = Vec::from_iter(Square::iter());
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::new(0, 0));
        assert_eq!(squares[9], Square::new(1, 1));
        assert_eq!(squares[63], Square::new(7, 7));
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn diagonal_offsets_preserve_darkness(sq: Square, #[strategy(0..4usize)] dir: usize) {
        let (dr, dc) = [(-1, -1), (-1, 1), (1, -1), (1, 1)][dir];
        if let Some(other) = sq.offset(dr, dc) {
            assert_eq!(other.is_dark(), sq.is_dark());
        }
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(wire(&sq.to_string()), Ok(("", sq)));
    }
}
