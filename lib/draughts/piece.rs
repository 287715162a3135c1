use crate::draughts::{Color, Kind};
use nom::character::complete::one_of;
use nom::{IResult, Parser};
use std::fmt::{self, Display, Formatter, Write};

/// A draughts piece of a certain [`Color`] and [`Kind`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Piece {
    WhitePawn,
    WhiteKing,
    BlackPawn,
    BlackKing,
}

impl Piece {
    /// Constructs a [`Piece`] from a pair of [`Color`] and [`Kind`].
    #[inline(always)]
    pub const fn new(color: Color, kind: Kind) -> Self {
        match (color, kind) {
            (Color::White, Kind::Pawn) => Piece::WhitePawn,
            (Color::White, Kind::King) => Piece::WhiteKing,
            (Color::Black, Kind::Pawn) => Piece::BlackPawn,
            (Color::Black, Kind::King) => Piece::BlackKing,
        }
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub const fn color(self) -> Color {
        match self {
            Piece::WhitePawn | Piece::WhiteKing => Color::White,
            Piece::BlackPawn | Piece::BlackKing => Color::Black,
        }
    }

    /// This piece's [`Kind`].
    #[inline(always)]
    pub const fn kind(self) -> Kind {
        match self {
            Piece::WhitePawn | Piece::BlackPawn => Kind::Pawn,
            Piece::WhiteKing | Piece::BlackKing => Kind::King,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(match self {
            Piece::WhitePawn => 'o',
            Piece::WhiteKing => '@',
            Piece::BlackPawn => 'x',
            Piece::BlackKing => '#',
        })
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    #[inline(always)]
    fn try_from(glyph: char) -> Result<Self, Self::Error> {
        match glyph {
            'o' => Ok(Piece::WhitePawn),
            '@' => Ok(Piece::WhiteKing),
            'x' => Ok(Piece::BlackPawn),
            '#' => Ok(Piece::BlackKing),
            _ => Err(()),
        }
    }
}

/// Parses the two-letter wire form of a [`Piece`].
pub(crate) fn letters(input: &str) -> IResult<&str, Piece> {
    (one_of("wb"), one_of("pk"))
        .map(|(color, kind)| {
            let color = match color {
                'w' => Color::White,
                _ => Color::Black,
            };

            let kind = match kind {
                'p' => Kind::Pawn,
                _ => Kind::King,
            };

            Piece::new(color, kind)
        })
        .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn new_constructs_piece_from_pair_of_color_and_kind(p: Piece) {
        assert_eq!(Piece::new(p.color(), p.kind()), p);
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn piece_has_an_equivalent_glyph(p: Piece) {
        let glyph = p.to_string().chars().next().unwrap();
        assert_eq!(Piece::try_from(glyph), Ok(p));
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn unknown_glyphs_are_no_piece(#[filter(!"o@x#".contains(#c))] c: char) {
        assert_eq!(Piece::try_from(c), Err(()));
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn parsing_wire_form_is_an_identity(p: Piece) {
        let s = format!("{}{}", p.color().letter(), p.kind().letter());
        assert_eq!(letters(&s), Ok(("", p)));
    }
}
