//! collision detection - walls, floor, other blocks
//! the cell-by-cell drop here is the reference for Board::drop_height

use brain_core::{Board, Piece};

/// does piece collide with anything?
/// the rows above the board are open: pieces enter from there
pub fn collides(board: &Board, piece: &Piece, x: i32, y: i32) -> bool {
    let width = board.width() as i64;
    let height = board.height() as i64;
    piece.body().iter().any(|p| {
        let (cx, cy) = (i64::from(x) + i64::from(p.x), i64::from(y) + i64::from(p.y));
        if cx < 0 || cx >= width || cy < 0 {
            return true;
        }
        // inside the board both fit back into i32
        cy < height && board.is_filled(cx as i32, cy as i32)
    })
}

/// can we place here? (just !collides)
pub fn can_place(board: &Board, piece: &Piece, x: i32, y: i32) -> bool {
    !collides(board, piece, x, y)
}

/// Drop from the top row, one step at a time. O(board height x cells).
#[inline]
pub fn hard_drop_y(board: &Board, piece: &Piece, x: i32) -> i32 {
    let mut landing_y = board.height() as i32;
    while landing_y > 0 && !collides(board, piece, x, landing_y - 1) {
        landing_y -= 1;
    }
    landing_y
}
