mod bitboard;
mod board;
mod color;
mod ending;
mod game;
mod generator;
mod instruction;
mod kind;
mod outcome;
mod piece;
mod ply;
mod rules;
mod square;

pub use bitboard::*;
pub use board::*;
pub use color::*;
pub use ending::*;
pub use game::*;
pub use generator::*;
pub use instruction::*;
pub use kind::*;
pub use outcome::*;
pub use piece::*;
pub use ply::*;
pub use rules::*;
pub use square::*;
