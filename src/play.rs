//! Turn-by-turn piece dealing for autoplay.

use brain_core::{pieces, Board, Move, Shape};
use brain_eval::BoardRater;
use brain_search::{MoveSearch, SearchError};

/// How the next piece is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dealer {
    /// Cycle through the shapes in order. Must not be empty.
    Order(Vec<Shape>),
    /// Deal whatever piece the search likes least.
    Adversarial,
}

/// The shape dealt on `turn` and the search's reply to it.
///
/// `Ok(None)` means the dealt shape has nowhere to go: the game is over.
pub fn next_move<R>(
    search: &MoveSearch<R>,
    dealer: &Dealer,
    board: &Board,
    turn: usize,
    max_search_height: usize,
) -> Result<Option<(Shape, Move)>, SearchError>
where
    R: BoardRater + Sync,
{
    let (shape, reply) = match dealer {
        Dealer::Adversarial => match search.worst_piece(board, pieces(), max_search_height)? {
            Some(worst) => (Shape::ALL[worst.index], worst.reply),
            None => return Ok(None),
        },
        Dealer::Order(order) if order.is_empty() => return Ok(None),
        Dealer::Order(order) => {
            let shape = order[turn % order.len()];
            match search.best_move(board, shape.piece(), max_search_height) {
                Ok(mv) => (shape, Some(mv)),
                Err(SearchError::NoLegalMove) => (shape, None),
                Err(err) => return Err(err),
            }
        }
    };
    Ok(reply.map(|mv| (shape, mv)))
}
