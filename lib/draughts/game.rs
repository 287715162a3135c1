use crate::draughts::{
    generate_plies, in_special_ending, Board, Color, GameResult, Instruction, InstructionError,
    Kind, Ply, Rules,
};
use derive_more::{Display, Error, From};

#[cfg(test)]
use proptest::{prelude::*, sample::Selector};

/// The reason why [`Game::do_ply`] rejected a ply.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error, From)]
pub enum GameError {
    #[display("empty ply")]
    EmptyPly,
    #[display("{_0}")]
    Instruction(InstructionError),
}

/// The counters that drive the draw clauses.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
struct Counters {
    turns_since_capture: i16,
    turns_since_pawn_move: i16,
    turns_in_special_ending: i16,
}

/// The token returned by [`Game::do_ply`] that [`Game::undo_ply`] consumes
/// to restore the previous position.
#[derive(Debug, Clone)]
pub struct UndoInfo {
    ply: Ply,
    counters: Counters,
}

/// A game of draughts.
///
/// Holds the live [`Board`], the side to move, the draw counters, and a lazy
/// cache of the legal plies. Search drivers make and unmake moves through
/// [`Game::do_ply`] and [`Game::undo_ply`] without ever copying the board;
/// [`Clone`] yields an independent game for use on another thread.
#[derive(Debug, Clone)]
pub struct Game {
    rules: Rules,
    stagnant_turns_to_draw: i16,
    board: Board,
    to_play: Color,
    counters: Counters,
    plies: Option<Vec<Ply>>,
}

impl Game {
    /// A game from the standard opening placement, white to move, with the
    /// default rules and a stagnation threshold of 20 turns.
    #[inline(always)]
    pub fn new() -> Self {
        Self::custom(Rules::default(), 20, None, Color::White)
    }

    /// A game from a custom position.
    pub fn custom(
        rules: Rules,
        stagnant_turns_to_draw: i16,
        initial_board: Option<Board>,
        first_player: Color,
    ) -> Self {
        let mut game = Game {
            rules,
            stagnant_turns_to_draw,
            board: initial_board.unwrap_or_else(Board::standard),
            to_play: first_player,
            counters: Counters::default(),
            plies: None,
        };

        game.board_changed(None);
        game
    }

    /// The live board.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn to_play(&self) -> Color {
        self.to_play
    }

    /// The configured rule variant.
    #[inline(always)]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Whether it is white's turn.
    #[inline(always)]
    pub fn white_to_play(&self) -> bool {
        self.to_play == Color::White
    }

    /// Whether it is black's turn.
    #[inline(always)]
    pub fn black_to_play(&self) -> bool {
        self.to_play == Color::Black
    }

    /// Turns since the last capture.
    #[inline(always)]
    pub fn turns_since_capture(&self) -> i16 {
        self.counters.turns_since_capture
    }

    /// Turns since the last pawn move.
    #[inline(always)]
    pub fn turns_since_pawn_move(&self) -> i16 {
        self.counters.turns_since_pawn_move
    }

    /// Consecutive turns the position has been a special ending.
    #[inline(always)]
    pub fn turns_in_special_ending(&self) -> i16 {
        self.counters.turns_in_special_ending
    }

    /// Performs a ply and flips the side to move.
    ///
    /// Fails on an empty ply or one whose instructions are inconsistent with
    /// the board, leaving the game untouched. Plies are not validated against
    /// the legal set; drivers are expected to pass plies obtained from
    /// [`Game::plies`].
    pub fn do_ply(&mut self, ply: &Ply) -> Result<UndoInfo, GameError> {
        if ply.is_empty() {
            return Err(GameError::EmptyPly);
        }

        ply.perform(&mut self.board)?;

        let counters = self.counters;
        self.to_play = !self.to_play;
        self.board_changed(Some(ply));

        Ok(UndoInfo {
            ply: ply.clone(),
            counters,
        })
    }

    /// Unmakes the ply that produced the given [`UndoInfo`], restoring the
    /// board, the side to move, and the counters.
    ///
    /// The ply cache is left empty and lazily regenerated.
    pub fn undo_ply(&mut self, undo: UndoInfo) {
        undo.ply.undo(&mut self.board);
        self.to_play = !self.to_play;
        self.counters = undo.counters;
        self.plies = None;
    }

    /// The legal plies for the side to move.
    ///
    /// Generated on demand, then cached until the next [`Game::do_ply`] or
    /// [`Game::undo_ply`]. An empty list means the side to move is blocked.
    pub fn plies(&mut self) -> &[Ply] {
        if self.plies.is_none() {
            self.plies = Some(generate_plies(&self.board, self.to_play, self.rules));
        }

        self.plies.as_deref().unwrap_or_default()
    }

    /// The result of the game.
    ///
    /// A side with no pieces has lost; a special ending that lasted 5 turns
    /// or stagnation past the configured threshold is a draw; a side with no
    /// legal ply has lost; anything else is still being played.
    pub fn result(&mut self) -> GameResult {
        let count = self.board.piece_count();

        if count.white() == 0 {
            return GameResult::BlackWon;
        } else if count.black() == 0 {
            return GameResult::WhiteWon;
        }

        if self.counters.turns_in_special_ending == 5 {
            return GameResult::Draw;
        }

        if self.counters.turns_since_pawn_move >= self.stagnant_turns_to_draw
            && self.counters.turns_since_capture >= self.stagnant_turns_to_draw
        {
            return GameResult::Draw;
        }

        if self.plies().is_empty() {
            return match self.to_play {
                Color::White => GameResult::BlackWon,
                Color::Black => GameResult::WhiteWon,
            };
        }

        GameResult::Playing
    }

    /// Recomputes the state derived from the board after a mutation.
    ///
    /// The capture and pawn-move counters are driven by inspecting the
    /// performed ply. The pawn-move scan reads the kind at each move's
    /// destination after the ply was performed, so a pawn that crowned is
    /// found to be a king and a crowning ply does not reset the counter.
    fn board_changed(&mut self, ply: Option<&Ply>) {
        if in_special_ending(self.board.piece_count()) {
            self.counters.turns_in_special_ending += 1;
        } else {
            self.counters.turns_in_special_ending = 0;
        }

        if let Some(ply) = ply {
            let capture = ply
                .iter()
                .any(|i| matches!(i, Instruction::Capture { .. }));

            let pawn_move = ply.iter().any(|i| match *i {
                Instruction::Move { to, .. } => {
                    matches!(self.board.get(to), Some(p) if p.kind() == Kind::Pawn)
                }
                _ => false,
            });

            if capture {
                self.counters.turns_since_capture = 0;
            } else {
                self.counters.turns_since_capture += 1;
            }

            if pawn_move {
                self.counters.turns_since_pawn_move = 0;
            } else {
                self.counters.turns_since_pawn_move += 1;
            }
        }

        self.plies = None;
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Game::new()
    }
}

impl Eq for Game {}

impl PartialEq for Game {
    /// Compares everything but the ply cache.
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
            && self.stagnant_turns_to_draw == other.stagnant_turns_to_draw
            && self.to_play == other.to_play
            && self.counters == other.counters
            && self.board == other.board
    }
}

#[cfg(test)]
impl Arbitrary for Game {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<Rules>(), 0..48usize, any::<Selector>())
            .prop_map(|(rules, moves, selector)| {
                let mut game = Game::custom(rules, 20, None, Color::White);

                for _ in 0..moves {
                    if game.result().is_over() {
                        break;
                    }

                    let ply = selector.select(game.plies().to_vec());
                    game.do_ply(&ply).unwrap();
                }

                game
            })
            .no_shrink()
            .boxed()
    }
}
