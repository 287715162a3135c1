use crate::draughts::{
    BestRule, Bitboard, Board, CaptureRule, Color, Instruction, Kind, Piece, Ply, Rules, Square,
};
use arrayvec::ArrayVec;

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Enumerates the legal plies for the side to move.
///
/// Every capture ply is a maximal chain: it only ends where no further
/// capture step exists. Under [`CaptureRule::Mandatory`] simple plies are
/// discarded whenever a capture exists, and under [`BestRule::Required`]
/// only the chains with the most captures survive. The output order is
/// unspecified.
pub fn generate_plies(board: &Board, turn: Color, rules: Rules) -> Vec<Ply> {
    let mut plies = Vec::with_capacity(10);

    for from in board.by_color(turn) {
        let Some(piece) = board.get(from) else { continue };
        let mut chain = Chain {
            board,
            piece,
            origin: from,
            captured: Bitboard::empty(),
            victims: ArrayVec::new(),
            plies: &mut plies,
        };

        chain.extend(from);
    }

    let captures = !plies.is_empty();
    if !captures || rules.capture == CaptureRule::Optional {
        for from in board.by_color(turn) {
            let Some(piece) = board.get(from) else { continue };
            simple_plies(board, piece, from, &mut plies);
        }
    }

    if captures && rules.best == BestRule::Required {
        let best = plies.iter().map(Ply::captures).max().unwrap_or(0);
        plies.retain(|ply| ply.captures() == 0 || ply.captures() == best);
    }

    plies
}

/// A capture chain in progress.
///
/// The chain is explored on an immutable board: victims are flagged in
/// `captured` rather than removed, and the moving piece's origin square is
/// treated as vacant since the piece has logically left it. Flagged victims
/// cannot be jumped again and still block a king's slide.
struct Chain<'a> {
    board: &'a Board,
    piece: Piece,
    origin: Square,
    captured: Bitboard,
    victims: ArrayVec<(Square, Piece), 14>,
    plies: &'a mut Vec<Ply>,
}

impl Chain<'_> {
    fn vacant(&self, sq: Square) -> bool {
        sq == self.origin || !self.board.is_occupied(sq)
    }

    fn victim(&self, sq: Square) -> Option<Piece> {
        if sq == self.origin || self.captured.contains(sq) {
            return None;
        }

        self.board
            .get(sq)
            .filter(|p| p.color() != self.piece.color())
    }

    /// Branches over every capture step available from `from`, emitting a
    /// ply once no further step exists.
    fn extend(&mut self, from: Square) {
        let mut extended = false;

        for (dr, dc) in DIAGONALS {
            match self.piece.kind() {
                Kind::Pawn => {
                    let Some(over) = from.offset(dr, dc) else { continue };
                    let Some(victim) = self.victim(over) else { continue };
                    let Some(to) = over.offset(dr, dc) else { continue };

                    if self.vacant(to) {
                        extended = true;
                        self.jump(over, victim, to);
                    }
                }

                Kind::King => {
                    let mut next = from.offset(dr, dc);
                    while let Some(sq) = next {
                        if !self.vacant(sq) {
                            break;
                        }

                        next = sq.offset(dr, dc);
                    }

                    let Some(over) = next else { continue };
                    let Some(victim) = self.victim(over) else { continue };

                    let mut next = over.offset(dr, dc);
                    while let Some(to) = next {
                        if !self.vacant(to) {
                            break;
                        }

                        extended = true;
                        self.jump(over, victim, to);
                        next = to.offset(dr, dc);
                    }
                }
            }
        }

        if !extended && !self.victims.is_empty() {
            self.emit(from);
        }
    }

    fn jump(&mut self, over: Square, victim: Piece, to: Square) {
        self.captured |= over.bitboard();
        self.victims.push((over, victim));
        self.extend(to);
        self.victims.pop();
        self.captured ^= over.bitboard();
    }

    fn emit(&mut self, last: Square) {
        let mut ply = Ply::new();
        for &(at, piece) in &self.victims {
            ply.push(Instruction::Capture { at, piece });
        }

        ply.push(Instruction::Move {
            from: self.origin,
            to: last,
        });

        if self.piece.kind() == Kind::Pawn && last.row() == self.piece.color().crowning_row() {
            ply.push(Instruction::Crown { at: last });
        }

        self.plies.push(ply);
    }
}

fn simple_plies(board: &Board, piece: Piece, from: Square, plies: &mut Vec<Ply>) {
    match piece.kind() {
        Kind::Pawn => {
            for dc in [-1, 1] {
                let Some(to) = from.offset(piece.color().forward(), dc) else { continue };
                if !board.is_occupied(to) {
                    emit_simple(piece, from, to, plies);
                }
            }
        }

        Kind::King => {
            for (dr, dc) in DIAGONALS {
                let mut next = from.offset(dr, dc);
                while let Some(to) = next {
                    if board.is_occupied(to) {
                        break;
                    }

                    emit_simple(piece, from, to, plies);
                    next = to.offset(dr, dc);
                }
            }
        }
    }
}

fn emit_simple(piece: Piece, from: Square, to: Square, plies: &mut Vec<Ply>) {
    let mut ply = Ply::new();
    ply.push(Instruction::Move { from, to });

    if piece.kind() == Kind::Pawn && to.row() == piece.color().crowning_row() {
        ply.push(Instruction::Crown { at: to });
    }

    plies.push(ply);
}
