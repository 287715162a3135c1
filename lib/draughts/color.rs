use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Not;

/// The color of a [`Piece`][`crate::draughts::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    #[display("white")]
    White,
    #[display("black")]
    Black,
}

impl Color {
    /// The direction this color's pawns advance along, as a row delta.
    #[inline(always)]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row on which this color's pawns crown.
    #[inline(always)]
    pub const fn crowning_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The single-letter wire form.
    #[inline(always)]
    pub(crate) const fn letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn color_implements_not_operator(c: Color) {
        assert_ne!(!c, c);
        assert_eq!(!!c, c);
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn forward_points_to_the_crowning_row(c: Color) {
        let steps = (c.crowning_row() as i8 - 4).signum();
        assert_eq!(c.forward().signum(), steps);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn color_displays_lowercase_name() {
        assert_eq!(Color::White.to_string(), "white");
        assert_eq!(Color::Black.to_string(), "black");
    }

    #[proptest]
    #[cfg_attr(miri, ignore)]
    fn color_round_trips_through_json(c: Color) {
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, format!("\"{c}\""));
        assert_eq!(serde_json::from_str::<Color>(&json).unwrap(), c);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn decoding_unknown_color_fails() {
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
        assert!(serde_json::from_str::<Color>("\"White\"").is_err());
    }
}
