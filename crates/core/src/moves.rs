//! Search result - where a piece should go.

use serde::{Deserialize, Serialize};

use crate::Piece;

/// A placement picked by the search: which rotation, its column and the row
/// it lands on. `rotation` indexes the rotation cycle the search walked.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Move {
    pub piece: Piece,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl Move {
    pub fn new(piece: Piece, rotation: usize, x: i32, y: i32) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    #[test]
    fn test_move_new() {
        let m = Move::new(Shape::Pyramid.piece().clone(), 2, 4, 1);
        assert_eq!(&m.piece, Shape::Pyramid.piece());
        assert_eq!(m.rotation, 2);
        assert_eq!(m.x, 4);
        assert_eq!(m.y, 1);
    }
}
