use crate::draughts::Color;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The result of a [`Game`][`crate::draughts::Game`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum GameResult {
    #[display("playing")]
    #[serde(rename = "playing")]
    Playing,
    #[display("white won")]
    #[serde(rename = "white won")]
    WhiteWon,
    #[display("black won")]
    #[serde(rename = "black won")]
    BlackWon,
    #[display("draw")]
    #[serde(rename = "draw")]
    Draw,
}

impl GameResult {
    /// Whether the game has ended.
    #[inline(always)]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameResult::Playing)
    }

    /// The winning [`Color`], if there is one.
    #[inline(always)]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWon => Some(Color::White),
            GameResult::BlackWon => Some(Color::Black),
            _ => None,
        }
    }

    /// Whether one of the sides won.
    #[inline(always)]
    pub const fn has_winner(self) -> bool {
        self.winner().is_some()
    }
}
