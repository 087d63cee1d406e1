//! Piece geometry - one immutable rotation of a shape.
//!
//! Derived fields (width, height, skirt) are computed once at construction.
//! The body is kept sorted and deduplicated, so two pieces compare equal when
//! their occupied cells are the same set, whatever order they were given in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// A rotation cycle never needs more than four entries.
pub const MAX_ROTATIONS: usize = 4;

/// Largest coordinate a body cell may use; the bounding box must fit a `u8`.
pub const MAX_COORD: u8 = u8::MAX - 1;

/// One occupied cell relative to the piece origin. `y` grows upward.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Malformed shape literal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("token {token:?} is not a single decimal digit")]
    InvalidToken { token: String },
    #[error("expected x,y pairs but found {count} coordinates")]
    OddCoordinateCount { count: usize },
    #[error("cell ({x}, {y}) lies past the largest coordinate {MAX_COORD}")]
    CoordinateOutOfRange { x: u8, y: u8 },
}

pub type Body = SmallVec<[Point; 4]>;

pub type RotationCycle = SmallVec<[Piece; MAX_ROTATIONS]>;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Body", into = "Body")]
pub struct Piece {
    body: Body,
    /// Lowest body `y` per column. A column with no cell holds `height`.
    skirt: SmallVec<[u8; 4]>,
    width: u8,
    height: u8,
}

impl Piece {
    /// Build a piece from its cells. Duplicates collapse.
    ///
    /// # Panics
    ///
    /// If a coordinate is above [`MAX_COORD`]. Use [`Piece::try_from_points`]
    /// for untrusted cells.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        Self::try_from_points(points).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_from_points<I>(points: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let body: Body = points.into_iter().collect();
        if let Some(p) = body.iter().find(|p| p.x > MAX_COORD || p.y > MAX_COORD) {
            return Err(ShapeError::CoordinateOutOfRange { x: p.x, y: p.y });
        }
        Ok(Self::build(body))
    }

    fn build(mut body: Body) -> Self {
        body.sort_unstable();
        body.dedup();

        let width = body.iter().map(|p| p.x + 1).max().unwrap_or(0);
        let height = body.iter().map(|p| p.y + 1).max().unwrap_or(0);

        let mut skirt: SmallVec<[u8; 4]> = SmallVec::from_elem(height, width as usize);
        for p in &body {
            let lowest = &mut skirt[p.x as usize];
            *lowest = (*lowest).min(p.y);
        }

        Self {
            body,
            skirt,
            width,
            height,
        }
    }

    #[inline]
    pub fn body(&self) -> &[Point] {
        &self.body
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    #[inline]
    pub fn skirt(&self) -> &[u8] {
        &self.skirt
    }

    /// Lowest occupied row of column `x`. Panics unless `x < width`.
    #[inline]
    pub fn skirt_at(&self, x: usize) -> u8 {
        self.skirt[x]
    }

    /// True when column `x` of the bounding box holds no cell.
    #[inline]
    pub fn is_gap_column(&self, x: usize) -> bool {
        self.skirt[x] == self.height
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Quarter turn counter-clockwise inside the bounding box: (x, y) -> (h-1-y, x).
    pub fn rotate_ccw(&self) -> Piece {
        let h = self.height;
        Piece::build(self.body.iter().map(|p| Point::new(h - 1 - p.y, p.x)).collect())
    }

    /// Every distinct rotation starting with `self`, in CCW order.
    ///
    /// Stops at the first rotation board-equal to `self`. Bodies that are not
    /// anchored at the origin may never come back, so the cycle is capped.
    pub fn rotations(&self) -> RotationCycle {
        let mut cycle = RotationCycle::new();
        cycle.push(self.clone());
        let mut next = self.rotate_ccw();
        while next != *self && cycle.len() < MAX_ROTATIONS {
            let following = next.rotate_ccw();
            cycle.push(next);
            next = following;
        }
        cycle
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        // width, height and skirt are functions of the body
        self.body == other.body
    }
}

impl Eq for Piece {}

impl std::hash::Hash for Piece {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.body.hash(state);
    }
}

impl TryFrom<Body> for Piece {
    type Error = ShapeError;

    fn try_from(body: Body) -> Result<Self, Self::Error> {
        Piece::try_from_points(body)
    }
}

impl From<Piece> for Body {
    fn from(piece: Piece) -> Self {
        piece.body
    }
}

impl FromStr for Piece {
    type Err = ShapeError;

    /// Parse `"x y x y ..."` where every coordinate is one decimal digit.
    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let mut coords = SmallVec::<[u8; 8]>::new();
        for token in literal.split_whitespace() {
            let mut chars = token.chars();
            let digit = match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                (Some(d), None) => d as u8,
                _ => {
                    return Err(ShapeError::InvalidToken {
                        token: token.to_owned(),
                    })
                }
            };
            coords.push(digit);
        }

        if coords.len() % 2 != 0 {
            return Err(ShapeError::OddCoordinateCount {
                count: coords.len(),
            });
        }

        Ok(Piece::build(
            coords
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1]))
                .collect(),
        ))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{} {}", p.x, p.y)?;
        }
        Ok(())
    }
}
