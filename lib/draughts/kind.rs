use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The kind of a [`Piece`][`crate::draughts::Piece`].
///
/// Pawns advance one square diagonally toward the opposing side; kings are
/// flying kings and slide any distance along a diagonal.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Kind {
    #[display("pawn")]
    Pawn,
    #[display("king")]
    King,
}

impl Kind {
    /// The single-letter wire form.
    #[inline(always)]
    pub(crate) const fn letter(self) -> char {
        match self {
            Kind::Pawn => 'p',
            Kind::King => 'k',
        }
    }
}
