use brain_core::{Board, Move, Piece};
use brain_eval::BoardRater;
use tracing::debug;

use crate::{MoveSearch, SearchError};

/// The piece that leaves the player worst off, and the player's answer to it.
#[derive(Clone, Debug, PartialEq)]
pub struct WorstPiece {
    /// Index into the offered pieces.
    pub index: usize,
    /// Rating of the board after the best reply.
    pub rating: f64,
    /// `None` when the piece cannot be placed at all.
    pub reply: Option<Move>,
}

impl<R> MoveSearch<R>
where
    R: BoardRater + Sync,
{
    /// Pick the piece whose best placement rates worst.
    ///
    /// A piece with no legal placement rates as badly as anything can, so it
    /// wins unless an earlier piece was already unplaceable. Equal ratings
    /// keep the earlier piece. Returns `Ok(None)` only for an empty slice.
    pub fn worst_piece(
        &self,
        board: &Board,
        pieces: &[Piece],
        max_search_height: usize,
    ) -> Result<Option<WorstPiece>, SearchError> {
        let polarity = self.config.polarity;
        let mut worst: Option<WorstPiece> = None;

        for (index, piece) in pieces.iter().enumerate() {
            let (reply, rating) = match self.find_best_move(board, piece, max_search_height) {
                Ok((mv, rating)) => (Some(mv), rating),
                Err(SearchError::NoLegalMove) => (None, polarity.worst_possible()),
                Err(err) => return Err(err),
            };

            let worse = match &worst {
                Some(incumbent) => polarity.improves(incumbent.rating, rating),
                None => true,
            };
            if worse {
                worst = Some(WorstPiece {
                    index,
                    rating,
                    reply,
                });
            }
        }

        if let Some(w) = &worst {
            debug!(index = w.index, rating = w.rating, placeable = w.reply.is_some(), "worst piece");
        }
        Ok(worst)
    }
}
