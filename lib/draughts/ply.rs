use crate::draughts::{Board, Instruction, InstructionError};
use arrayvec::ArrayVec;
use derive_more::{Deref, DerefMut, IntoIterator};
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt::{self, Display, Formatter, Write};

/// A player's complete turn as an ordered sequence of [`Instruction`]s.
///
/// A capture chain emits one capture per victim in the order they were
/// jumped, a single net move from the origin to the final landing square,
/// and a trailing crown when a pawn ends on its crowning row. Chains never
/// come close to the inline capacity, so a ply never allocates.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deref, DerefMut, IntoIterator)]
pub struct Ply(ArrayVec<Instruction, 16>);

impl Ply {
    /// An empty ply.
    #[inline(always)]
    pub fn new() -> Self {
        Ply(ArrayVec::new())
    }

    /// Applies the instructions left to right.
    ///
    /// If an instruction is inconsistent with the board, the already applied
    /// prefix is undone and the board is left as it was.
    #[inline(always)]
    pub fn perform(&self, board: &mut Board) -> Result<(), InstructionError> {
        for (i, instruction) in self.iter().enumerate() {
            if let Err(e) = instruction.perform(board) {
                for instruction in self[..i].iter().rev() {
                    instruction.undo(board);
                }

                return Err(e);
            }
        }

        Ok(())
    }

    /// Reverses a previously performed ply, right to left.
    #[inline(always)]
    pub fn undo(&self, board: &mut Board) {
        for instruction in self.iter().rev() {
            instruction.undo(board);
        }
    }

    /// The number of capture instructions in this ply.
    #[inline(always)]
    pub fn captures(&self) -> usize {
        self.iter()
            .filter(|i| matches!(i, Instruction::Capture { .. }))
            .count()
    }
}

impl FromIterator<Instruction> for Ply {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        let mut ply = Ply::new();
        for instruction in iter {
            ply.push(instruction);
        }

        ply
    }
}

impl Display for Ply {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }

            Display::fmt(instruction, f)?;
        }

        Ok(())
    }
}

impl Serialize for Ply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for Ply {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlyVisitor;

        impl<'de> Visitor<'de> for PlyVisitor {
            type Value = Ply;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of instruction tokens")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut ply = Ply::new();
                while let Some(instruction) = seq.next_element()? {
                    ply.0.try_push(instruction).map_err(de::Error::custom)?;
                }

                Ok(ply)
            }
        }

        deserializer.deserialize_seq(PlyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draughts::{Piece, Square};

    #[test]
    #[cfg_attr(miri, ignore)]
    fn performing_then_undoing_a_sequence_restores_the_board() {
        let mut board = Board::empty();
        board.set(Square::new(3, 5), Piece::WhitePawn);
        board.set(Square::new(1, 0), Piece::BlackKing);
        board.set(Square::new(2, 2), Piece::BlackPawn);
        let before = board;

        let ply = Ply::from_iter([
            Instruction::Move {
                from: Square::new(3, 5),
                to: Square::new(2, 4),
            },
            Instruction::Crown {
                at: Square::new(2, 4),
            },
            Instruction::Capture {
                at: Square::new(2, 4),
                piece: Piece::WhiteKing,
            },
            Instruction::Move {
                from: Square::new(1, 0),
                to: Square::new(4, 6),
            },
            Instruction::Move {
                from: Square::new(2, 2),
                to: Square::new(3, 5),
            },
            Instruction::Crown {
                at: Square::new(3, 5),
            },
        ]);

        ply.perform(&mut board).unwrap();

        assert_eq!(board.get(Square::new(3, 5)), Some(Piece::BlackKing));
        assert_eq!(board.get(Square::new(4, 6)), Some(Piece::BlackKing));
        assert_eq!(board.get(Square::new(1, 0)), None);
        assert_eq!(board.get(Square::new(2, 2)), None);
        assert_eq!(board.get(Square::new(2, 4)), None);

        ply.undo(&mut board);
        assert_eq!(board, before);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn failed_perform_leaves_the_board_untouched() {
        let mut board = Board::empty();
        board.set(Square::new(4, 1), Piece::BlackPawn);
        board.set(Square::new(5, 0), Piece::WhiteKing);
        let before = board;

        let ply = Ply::from_iter([
            Instruction::Capture {
                at: Square::new(4, 1),
                piece: Piece::BlackPawn,
            },
            Instruction::Move {
                from: Square::new(6, 3),
                to: Square::new(3, 2),
            },
        ]);

        assert_eq!(
            ply.perform(&mut board),
            Err(InstructionError::Vacant(Square::new(6, 3)))
        );

        assert_eq!(board, before);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn captures_counts_capture_instructions() {
        let ply = Ply::from_iter([
            Instruction::Capture {
                at: Square::new(4, 3),
                piece: Piece::BlackPawn,
            },
            Instruction::Capture {
                at: Square::new(2, 1),
                piece: Piece::BlackKing,
            },
            Instruction::Move {
                from: Square::new(5, 4),
                to: Square::new(1, 0),
            },
        ]);

        assert_eq!(ply.captures(), 2);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn ply_displays_comma_separated_tokens() {
        let ply = Ply::from_iter([
            Instruction::Capture {
                at: Square::new(1, 3),
                piece: Piece::BlackPawn,
            },
            Instruction::Move {
                from: Square::new(2, 4),
                to: Square::new(0, 2),
            },
            Instruction::Crown {
                at: Square::new(0, 2),
            },
        ]);

        assert_eq!(ply.to_string(), "c13bp,m2402,k02");
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn ply_round_trips_through_json_as_a_token_array() {
        let ply = Ply::from_iter([
            Instruction::Capture {
                at: Square::new(1, 3),
                piece: Piece::BlackPawn,
            },
            Instruction::Move {
                from: Square::new(2, 4),
                to: Square::new(0, 2),
            },
            Instruction::Crown {
                at: Square::new(0, 2),
            },
        ]);

        let json = serde_json::to_string(&ply).unwrap();
        assert_eq!(json, "[\"c13bp\",\"m2402\",\"k02\"]");
        assert_eq!(serde_json::from_str::<Ply>(&json).unwrap(), ply);
    }
}
