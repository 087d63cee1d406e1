//! brain core - piece geometry and the transactional board.

mod board;
mod moves;
mod piece;
mod shapes;

pub use board::{Board, BoardError, PlaceResult};
pub use moves::Move;
pub use piece::{Body, Piece, Point, RotationCycle, ShapeError, MAX_COORD, MAX_ROTATIONS};
pub use shapes::{pieces, Shape};
