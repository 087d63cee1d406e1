use thiserror::Error;
use tracing::warn;

use brain_core::{Board, BoardError, Move, Piece, PlaceResult};

/// What a successful placement did to the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub result: PlaceResult,
    pub rows_cleared: usize,
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("placement rejected with {0:?}")]
    Rejected(PlaceResult),
}

/// Place, clear, and hand the result to `inspect`, then roll back.
///
/// Runs inside one place/undo window, so `board` must be committed and is
/// committed again, unchanged, on return. `Ok(None)` means the placement
/// went out of bounds or collided.
pub fn with_placement<T>(
    board: &mut Board,
    piece: &Piece,
    x: i32,
    y: i32,
    inspect: impl FnOnce(&Board, Outcome) -> T,
) -> Result<Option<T>, BoardError> {
    let result = board.place(piece, x, y)?;
    if result.is_failure() {
        warn!(?result, x, y, "candidate rejected");
        board.undo();
        return Ok(None);
    }

    let rows_cleared = clear_if_filled(board, result);
    let value = inspect(board, Outcome {
        result,
        rows_cleared,
    });
    board.undo();
    Ok(Some(value))
}

/// Apply a placement to a copy and commit it there.
/// The copy starts from `board` as it currently stands.
pub fn apply_placement(
    board: &Board,
    piece: &Piece,
    x: i32,
    y: i32,
) -> Result<Option<(Board, Outcome)>, BoardError> {
    let mut next = board.clone();
    next.commit();

    let result = next.place(piece, x, y)?;
    if result.is_failure() {
        return Ok(None);
    }
    let rows_cleared = clear_if_filled(&mut next, result);
    next.commit();
    Ok(Some((
        next,
        Outcome {
            result,
            rows_cleared,
        },
    )))
}

/// Commit `mv` to a live board: place, clear filled rows, commit.
/// A rejected placement is undone before the error comes back.
pub fn play_move(board: &mut Board, mv: &Move) -> Result<Outcome, ApplyError> {
    let result = board.place(&mv.piece, mv.x, mv.y)?;
    if result.is_failure() {
        board.undo();
        return Err(ApplyError::Rejected(result));
    }
    let rows_cleared = clear_if_filled(board, result);
    board.commit();
    Ok(Outcome {
        result,
        rows_cleared,
    })
}

#[inline]
fn clear_if_filled(board: &mut Board, result: PlaceResult) -> usize {
    if result == PlaceResult::RowFilled {
        board.clear_rows()
    } else {
        0
    }
}
