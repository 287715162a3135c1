use crate::draughts::{piece, square, Bitboard, Color, Kind, Piece, Square};
use derive_more::{Display, Error};
use nom::combinator::all_consuming;
use nom::multi::many0;
use nom::{Finish, Parser};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt::{self, Debug, Formatter, Write};
use std::str::FromStr;

#[cfg(test)]
use proptest::prelude::*;

/// The number of pieces of each color and kind on a [`Board`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PieceCount {
    pub white_pawns: i8,
    pub black_pawns: i8,
    pub white_kings: i8,
    pub black_kings: i8,
}

impl PieceCount {
    /// The total number of white pieces.
    #[inline(always)]
    pub const fn white(self) -> i8 {
        self.white_pawns + self.white_kings
    }

    /// The total number of black pieces.
    #[inline(always)]
    pub const fn black(self) -> i8 {
        self.black_pawns + self.black_kings
    }
}

/// The draughts board.
///
/// Occupancy, color, and kind are held in one bitboard each. The color and
/// kind bits of a vacant square are meaningless and never inspected; [`Board::set`]
/// rewrites all three bits, while [`Board::clear`] drops occupancy alone.
#[derive(Copy, Clone, Default)]
pub struct Board {
    occupied: Bitboard,
    white: Bitboard,
    king: Bitboard,
}

impl Board {
    /// An empty board.
    #[inline(always)]
    pub const fn empty() -> Self {
        Board {
            occupied: Bitboard::empty(),
            white: Bitboard::empty(),
            king: Bitboard::empty(),
        }
    }

    /// The standard opening placement.
    ///
    /// Black pawns on the dark squares of rows 0–2, white pawns on the dark
    /// squares of rows 5–7.
    #[inline(always)]
    pub fn standard() -> Self {
        let mut board = Board::empty();

        for sq in Square::iter().filter(|sq| sq.is_dark()) {
            if sq.row() <= 2 {
                board.set(sq, Piece::BlackPawn);
            } else if sq.row() >= 5 {
                board.set(sq, Piece::WhitePawn);
            }
        }

        board
    }

    /// Whether a piece is on the given [`Square`].
    #[inline(always)]
    pub const fn is_occupied(&self, sq: Square) -> bool {
        self.occupied.contains(sq)
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if !self.is_occupied(sq) {
            return None;
        }

        let color = match self.white.contains(sq) {
            true => Color::White,
            false => Color::Black,
        };

        let kind = match self.king.contains(sq) {
            true => Kind::King,
            false => Kind::Pawn,
        };

        Some(Piece::new(color, kind))
    }

    /// Places a [`Piece`] on the given [`Square`].
    #[inline(always)]
    pub fn set(&mut self, sq: Square, piece: Piece) {
        self.occupied |= sq.bitboard();

        match piece.color() {
            Color::White => self.white |= sq.bitboard(),
            Color::Black => self.white &= !sq.bitboard(),
        }

        match piece.kind() {
            Kind::King => self.king |= sq.bitboard(),
            Kind::Pawn => self.king &= !sq.bitboard(),
        }
    }

    /// Vacates the given [`Square`].
    #[inline(always)]
    pub fn clear(&mut self, sq: Square) {
        self.occupied &= !sq.bitboard();
    }

    /// Moves the piece on `from` to `to`.
    #[inline(always)]
    pub fn move_piece(&mut self, from: Square, to: Square) {
        debug_assert!(self.is_occupied(from));

        if let Some(piece) = self.get(from) {
            self.clear(from);
            self.set(to, piece);
        }
    }

    /// Promotes the piece on the given [`Square`] to a king.
    #[inline(always)]
    pub fn crown(&mut self, sq: Square) {
        self.king |= sq.bitboard();
    }

    /// Demotes the piece on the given [`Square`] back to a pawn.
    #[inline(always)]
    pub fn uncrown(&mut self, sq: Square) {
        self.king &= !sq.bitboard();
    }

    /// [`Square`]s occupied by pieces of a [`Color`].
    #[inline(always)]
    pub fn by_color(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.occupied & self.white,
            Color::Black => self.occupied & !self.white,
        }
    }

    /// Counts the pieces on the board by color and kind.
    #[inline(always)]
    pub fn piece_count(&self) -> PieceCount {
        let kings = self.occupied & self.king;
        let pawns = self.occupied & !self.king;

        let white_pawns = (pawns & self.white).len() as i8;
        let white_kings = (kings & self.white).len() as i8;

        PieceCount {
            white_pawns,
            white_kings,
            black_pawns: pawns.len() as i8 - white_pawns,
            black_kings: kings.len() as i8 - white_kings,
        }
    }

    /// An iterator over the pieces on the board in row-major order.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied.iter().filter_map(|sq| Some((sq, self.get(sq)?)))
    }

    /// Decodes a board from an 8-line textual grid.
    ///
    /// The glyphs `x`, `#`, `o`, and `@` place a black pawn, black king,
    /// white pawn, and white king respectively; any other character leaves
    /// the square vacant. Lines are trimmed and blank lines skipped; missing
    /// or surplus rows and columns are silently ignored.
    pub fn parse_grid(s: &str) -> Self {
        let mut board = Board::empty();
        let lines = s.lines().map(str::trim).filter(|line| !line.is_empty());

        for (row, line) in lines.take(8).enumerate() {
            for (col, glyph) in line.chars().take(8).enumerate() {
                if let Ok(piece) = Piece::try_from(glyph) {
                    board.set(Square::new(row as u8, col as u8), piece);
                }
            }
        }

        board
    }
}

impl Eq for Board {}

impl PartialEq for Board {
    /// Compares occupancy and the color and kind of occupied squares; the
    /// meaningless bits of vacant squares are disregarded.
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.occupied == other.occupied
            && self.occupied & self.white == other.occupied & other.white
            && self.occupied & self.king == other.occupied & other.king
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("\n 01234567 \n")?;
        for sq in Square::iter() {
            if sq.col() == 0 {
                write!(f, "{}", sq.row())?;
            }

            match self.get(sq) {
                Some(piece) => write!(f, "{piece}")?,
                None if sq.is_dark() => f.write_char('_')?,
                None => f.write_char(' ')?,
            }

            if sq.col() == 7 {
                writeln!(f, "{}", sq.row())?;
            }
        }

        f.write_str(" 01234567 ")
    }
}

impl fmt::Display for Board {
    /// The compact wire form, one 4-byte record per occupied square in
    /// row-major order. The empty board prints as the empty string.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (sq, piece) in self.pieces() {
            write!(f, "{sq}{}{}", piece.color().letter(), piece.kind().letter())?;
        }

        Ok(())
    }
}

/// The reason why decoding a [`Board`] from its wire form failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
pub enum ParseBoardError {
    #[display("board string length is not a multiple of 4")]
    Length,
    #[display("invalid piece record")]
    Record,
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() % 4 != 0 {
            return Err(ParseBoardError::Length);
        }

        let record = (square::wire, piece::letters);
        let records = match all_consuming(many0(record)).parse(s).finish() {
            Ok((_, records)) => records,
            Err(_) => return Err(ParseBoardError::Record),
        };

        let mut board = Board::empty();
        for (sq, piece) in records {
            board.set(sq, piece);
        }

        Ok(board)
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BoardVisitor;

        impl Visitor<'_> for BoardVisitor {
            type Value = Board;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a board in its compact wire form")
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                s.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(BoardVisitor)
    }
}

#[cfg(test)]
impl Arbitrary for Board {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::collection::vec(any::<(Square, Piece)>(), 0..=24)
            .prop_map(|pieces| {
                let mut board = Board::empty();
                for (sq, piece) in pieces {
                    board.set(sq, piece);
                }

                board
            })
            .boxed()
    }
}
