//! The seven standard shapes.
//!
//! Both tables are built on first use and never mutated afterwards.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::piece::{Piece, RotationCycle};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Shape {
    Stick,
    L1,
    L2,
    S1,
    S2,
    Square,
    Pyramid,
}

static FIRST_ROTATIONS: Lazy<[Piece; 7]> = Lazy::new(|| {
    Shape::ALL.map(|shape| {
        shape
            .literal()
            .parse::<Piece>()
            .unwrap_or_else(|err| panic!("built-in shape {shape:?} is malformed: {err}"))
    })
});

static ROTATION_CYCLES: Lazy<[RotationCycle; 7]> =
    Lazy::new(|| Shape::ALL.map(|shape| shape.piece().rotations()));

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::Stick,
        Shape::L1,
        Shape::L2,
        Shape::S1,
        Shape::S2,
        Shape::Square,
        Shape::Pyramid,
    ];

    /// Body cells as `x y` digit pairs.
    pub const fn literal(self) -> &'static str {
        match self {
            Shape::Stick => "0 0 0 1 0 2 0 3",
            Shape::L1 => "0 0 0 1 0 2 1 0",
            Shape::L2 => "0 0 1 0 1 1 1 2",
            Shape::S1 => "0 0 1 0 1 1 2 1",
            Shape::S2 => "0 1 1 1 1 0 2 0",
            Shape::Square => "0 0 0 1 1 0 1 1",
            Shape::Pyramid => "0 0 1 0 1 1 2 0",
        }
    }

    pub const fn tag(self) -> char {
        match self {
            Shape::Stick => 'I',
            Shape::L1 => 'L',
            Shape::L2 => 'J',
            Shape::S1 => 'S',
            Shape::S2 => 'Z',
            Shape::Square => 'O',
            Shape::Pyramid => 'T',
        }
    }

    pub fn from_tag(tag: char) -> Option<Shape> {
        let tag = tag.to_ascii_uppercase();
        Shape::ALL.into_iter().find(|shape| shape.tag() == tag)
    }

    /// First rotation of this shape.
    pub fn piece(self) -> &'static Piece {
        &FIRST_ROTATIONS[self as usize]
    }

    /// Every distinct rotation, first rotation first.
    pub fn rotations(self) -> &'static [Piece] {
        &ROTATION_CYCLES[self as usize]
    }
}

/// First rotations of all shapes, in [`Shape::ALL`] order.
pub fn pieces() -> &'static [Piece; 7] {
    &FIRST_ROTATIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_all() {
        for (shape, piece) in Shape::ALL.iter().zip(pieces()) {
            assert_eq!(shape.piece(), piece);
        }
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for shape in Shape::ALL {
            assert_eq!(shape.piece().body().len(), 4, "{shape:?}");
        }
    }

    #[test]
    fn test_rotation_counts() {
        let counts: Vec<usize> = Shape::ALL.iter().map(|s| s.rotations().len()).collect();
        assert_eq!(counts, vec![2, 4, 4, 2, 2, 1, 4]);
    }

    #[test]
    fn test_cycles_start_at_first_rotation() {
        for shape in Shape::ALL {
            assert_eq!(&shape.rotations()[0], shape.piece());
        }
    }

    #[test]
    fn test_tags_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_tag(shape.tag()), Some(shape));
        }
        assert_eq!(Shape::from_tag('t'), Some(Shape::Pyramid));
        assert_eq!(Shape::from_tag('X'), None);
    }
}
