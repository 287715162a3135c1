use crate::draughts::{piece, square, Board, Piece, Square};
use derive_more::{Display, Error};
use nom::branch::alt;
use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::sequence::preceded;
use nom::{Finish, Parser};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// The discriminant of an [`Instruction`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum InstructionKind {
    #[display("move")]
    Move,
    #[display("capture")]
    Capture,
    #[display("crown")]
    Crown,
}

/// One atomic, self-reversible board edit.
///
/// A capture records the captured piece's full identity, so undoing it
/// restores a king as a king. A ply is an ordered sequence of instructions;
/// see [`Ply`][`crate::draughts::Ply`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Instruction {
    /// Moves the piece on `from` to `to`, color and kind unchanged.
    Move { from: Square, to: Square },
    /// Removes `piece` from the board at `at`.
    Capture { at: Square, piece: Piece },
    /// Promotes the piece at `at` to a king.
    Crown { at: Square },
}

/// The reason why performing an [`Instruction`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
pub enum InstructionError {
    #[display("square {_0} is vacant")]
    Vacant(#[error(not(source))] Square),
    #[display("square {_0} is occupied")]
    Blocked(#[error(not(source))] Square),
}

impl Instruction {
    /// This instruction's [`InstructionKind`].
    #[inline(always)]
    pub const fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Move { .. } => InstructionKind::Move,
            Instruction::Capture { .. } => InstructionKind::Capture,
            Instruction::Crown { .. } => InstructionKind::Crown,
        }
    }

    /// Applies this instruction to the board.
    ///
    /// Fails without touching the board if the edit is inconsistent with the
    /// board's occupancy.
    #[inline(always)]
    pub fn perform(&self, board: &mut Board) -> Result<(), InstructionError> {
        match *self {
            Instruction::Move { from, to } => {
                if !board.is_occupied(from) {
                    return Err(InstructionError::Vacant(from));
                }

                if to != from && board.is_occupied(to) {
                    return Err(InstructionError::Blocked(to));
                }

                board.move_piece(from, to);
            }

            Instruction::Capture { at, .. } => {
                if !board.is_occupied(at) {
                    return Err(InstructionError::Vacant(at));
                }

                board.clear(at);
            }

            Instruction::Crown { at } => {
                if !board.is_occupied(at) {
                    return Err(InstructionError::Vacant(at));
                }

                board.crown(at);
            }
        }

        Ok(())
    }

    /// Reverses a previously performed instruction.
    #[inline(always)]
    pub fn undo(&self, board: &mut Board) {
        match *self {
            Instruction::Move { from, to } => board.move_piece(to, from),
            Instruction::Capture { at, piece } => board.set(at, piece),
            Instruction::Crown { at } => board.uncrown(at),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Move { from, to } => write!(f, "m{from}{to}"),
            Instruction::Capture { at, piece } => {
                write!(f, "c{at}{}{}", piece.color().letter(), piece.kind().letter())
            }
            Instruction::Crown { at } => write!(f, "k{at}"),
        }
    }
}

/// The reason why parsing an [`Instruction`] failed.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Error)]
#[display("failed to parse instruction")]
pub struct ParseInstructionError;

impl FromStr for Instruction {
    type Err = ParseInstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shift = preceded(char('m'), (square::wire, square::wire))
            .map(|(from, to)| Instruction::Move { from, to });

        let capture = preceded(char('c'), (square::wire, piece::letters))
            .map(|(at, piece)| Instruction::Capture { at, piece });

        let crown = preceded(char('k'), square::wire).map(|at| Instruction::Crown { at });

        match all_consuming(alt((shift, capture, crown))).parse(s).finish() {
            Ok((_, instruction)) => Ok(instruction),
            Err(_) => Err(ParseInstructionError),
        }
    }
}

impl Serialize for Instruction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Instruction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InstructionVisitor;

        impl Visitor<'_> for InstructionVisitor {
            type Value = Instruction;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("an instruction token")
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                s.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(InstructionVisitor)
    }
}
