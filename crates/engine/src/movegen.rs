//! Candidate generation - every (rotation, column) pair and its landing row.

use smallvec::SmallVec;

use brain_core::{Board, Piece};

/// One candidate: index into the rotation cycle, column and landing row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Placement {
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

/// Four rotations on a wide board stay inline.
pub type PlacementList = SmallVec<[Placement; 64]>;

/// Enumerate placements in search order: rotation index first, then x.
///
/// The landing row comes from the skirt (`Board::drop_height`). Candidates
/// whose top would pass `max_search_height` are left out, as are rotations
/// wider than the board.
pub fn generate_placements(
    board: &Board,
    rotations: &[Piece],
    max_search_height: usize,
) -> PlacementList {
    let mut placements = PlacementList::new();
    for (rotation, piece) in rotations.iter().enumerate() {
        if piece.is_empty() || piece.width() > board.width() {
            continue;
        }
        for x in 0..=board.width() - piece.width() {
            let y = board.drop_height(piece, x);
            if y + piece.height() > max_search_height {
                continue;
            }
            placements.push(Placement {
                rotation,
                x: x as i32,
                y: y as i32,
            });
        }
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::Shape;

    #[test]
    fn test_counts_on_empty_board() {
        let board = Board::new(10, 20);
        let count = |shape: Shape| generate_placements(&board, shape.rotations(), 20).len();
        assert_eq!(count(Shape::Stick), 7 + 10);
        assert_eq!(count(Shape::Square), 9);
        assert_eq!(count(Shape::Pyramid), 8 + 9 + 8 + 9);
    }

    #[test]
    fn test_order_is_rotation_then_x() {
        let board = Board::new(6, 10);
        let placements = generate_placements(&board, Shape::S1.rotations(), 10);
        let keys: Vec<(usize, i32)> = placements.iter().map(|p| (p.rotation, p.x)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(placements[0], Placement { rotation: 0, x: 0, y: 0 });
    }

    #[test]
    fn test_landing_rows_follow_stack() {
        let board = Board::from_rows(4, 8, &["##..", "#..."]).expect("board");
        let placements = generate_placements(&board, Shape::Square.rotations(), 8);
        let rows: Vec<i32> = placements.iter().map(|p| p.y).collect();
        assert_eq!(rows, vec![2, 1, 0]);
    }

    #[test]
    fn test_height_limit_drops_tall_candidates() {
        let board = Board::from_rows(3, 6, &["#..", "#..", "#.."]).expect("board");
        let placements = generate_placements(&board, Shape::Stick.rotations(), 4);
        // vertical stick fits only in the empty columns; horizontal is too wide
        let xs: Vec<i32> = placements.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1, 2]);
    }

    #[test]
    fn test_piece_wider_than_board() {
        let board = Board::new(3, 10);
        let horizontal = Shape::Stick.piece().rotate_ccw();
        assert!(generate_placements(&board, &[horizontal], 10).is_empty());
    }
}
