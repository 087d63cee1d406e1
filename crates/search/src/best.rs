use brain_core::{Board, Move, Piece};
use brain_engine::{generate_placements, with_placement, Placement};
use brain_eval::{BoardRater, EvalWeights};
use tracing::debug;

use crate::{SearchConfig, SearchError};

/// Tries every rotation in every column and keeps the best-rated result.
pub struct MoveSearch<R = EvalWeights> {
    pub rater: R,
    pub config: SearchConfig,
}

impl MoveSearch<EvalWeights> {
    pub fn new(weights: EvalWeights) -> Self {
        Self {
            rater: weights,
            config: SearchConfig::default(),
        }
    }
}

impl Default for MoveSearch<EvalWeights> {
    fn default() -> Self {
        Self::new(EvalWeights::default())
    }
}

impl<R> MoveSearch<R>
where
    R: BoardRater + Sync,
{
    pub fn with_rater(rater: R, config: SearchConfig) -> Self {
        Self { rater, config }
    }

    pub fn rate_board(&self, board: &Board) -> f64 {
        self.rater.rate_board(board)
    }

    pub fn best_move(
        &self,
        board: &Board,
        piece: &Piece,
        max_search_height: usize,
    ) -> Result<Move, SearchError> {
        self.find_best_move(board, piece, max_search_height)
            .map(|(mv, _)| mv)
    }

    /// Best placement of any rotation of `piece` and its rating.
    ///
    /// `board` is never touched; candidates run on a private copy. Equal
    /// ratings keep the earlier candidate: lower rotation index, then lower x.
    pub fn find_best_move(
        &self,
        board: &Board,
        piece: &Piece,
        max_search_height: usize,
    ) -> Result<(Move, f64), SearchError> {
        let rotations = piece.rotations();
        let scored = self.score_placements(board, &rotations, max_search_height)?;

        let mut best: Option<(Placement, f64)> = None;
        for (placement, score) in scored.iter().copied() {
            let better = match best {
                Some((_, incumbent)) => self.config.polarity.improves(score, incumbent),
                None => true,
            };
            if better {
                best = Some((placement, score));
            }
        }

        let (placement, score) = best.ok_or(SearchError::NoLegalMove)?;
        debug!(
            candidates = scored.len(),
            rotation = placement.rotation,
            x = placement.x,
            y = placement.y,
            score,
            "best move"
        );
        Ok((to_move(&rotations, placement), score))
    }

    /// Every feasible candidate with its rating, in search order.
    pub fn scored_candidates(
        &self,
        board: &Board,
        piece: &Piece,
        max_search_height: usize,
    ) -> Result<Vec<(Move, f64)>, SearchError> {
        let rotations = piece.rotations();
        let scored = self.score_placements(board, &rotations, max_search_height)?;
        Ok(scored
            .into_iter()
            .map(|(placement, score)| (to_move(&rotations, placement), score))
            .collect())
    }

    fn score_placements(
        &self,
        board: &Board,
        rotations: &[Piece],
        max_search_height: usize,
    ) -> Result<Vec<(Placement, f64)>, SearchError> {
        let placements = generate_placements(board, rotations, max_search_height);
        if self.config.parallel {
            self.score_parallel(board, rotations, &placements)
        } else {
            self.score_sequential(board, rotations, &placements)
        }
    }

    /// One scratch board, reused through place/undo for every candidate.
    fn score_sequential(
        &self,
        board: &Board,
        rotations: &[Piece],
        placements: &[Placement],
    ) -> Result<Vec<(Placement, f64)>, SearchError> {
        let mut scratch = board.clone();
        scratch.commit();

        let mut scored = Vec::with_capacity(placements.len());
        for &placement in placements {
            let piece = &rotations[placement.rotation];
            let rating = with_placement(&mut scratch, piece, placement.x, placement.y, |b, _| {
                self.rater.rate_board(b)
            })?;
            if let Some(score) = rating {
                scored.push((placement, score));
            }
        }
        Ok(scored)
    }

    /// One board copy per candidate; collect keeps search order.
    #[cfg(feature = "rayon")]
    fn score_parallel(
        &self,
        board: &Board,
        rotations: &[Piece],
        placements: &[Placement],
    ) -> Result<Vec<(Placement, f64)>, SearchError> {
        use brain_core::BoardError;
        use brain_engine::apply_placement;
        use rayon::prelude::*;

        let scored = placements
            .par_iter()
            .map(|&placement| {
                let piece = &rotations[placement.rotation];
                let next = apply_placement(board, piece, placement.x, placement.y)?;
                Ok(next.map(|(next, _)| (placement, self.rater.rate_board(&next))))
            })
            .collect::<Result<Vec<_>, BoardError>>()?;
        Ok(scored.into_iter().flatten().collect())
    }

    #[cfg(not(feature = "rayon"))]
    fn score_parallel(
        &self,
        board: &Board,
        rotations: &[Piece],
        placements: &[Placement],
    ) -> Result<Vec<(Placement, f64)>, SearchError> {
        self.score_sequential(board, rotations, placements)
    }
}

fn to_move(rotations: &[Piece], placement: Placement) -> Move {
    Move::new(
        rotations[placement.rotation].clone(),
        placement.rotation,
        placement.x,
        placement.y,
    )
}
