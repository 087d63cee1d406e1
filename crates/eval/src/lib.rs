//! brain-eval - board heuristics for move selection.
//!
//! Ratings are "higher is worse": a tall, holey, jagged stack scores more.

use brain_core::Board;
use serde::{Deserialize, Serialize};

/// Anything that can put a number on a board. The search needs nothing else.
pub trait BoardRater {
    fn rate_board(&self, board: &Board) -> f64;
}

impl<F> BoardRater for F
where
    F: Fn(&Board) -> f64,
{
    fn rate_board(&self, board: &Board) -> f64 {
        self(board)
    }
}

/// Tunable weights. Missing fields in a config file fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub max_height: f64,
    pub avg_height: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            max_height: 8.0,
            avg_height: 40.0,
            holes: 1.25,
            bumpiness: 1.0,
        }
    }
}

impl EvalWeights {
    /// Height and holes only, no bumpiness term.
    pub fn classic() -> Self {
        Self {
            bumpiness: 0.0,
            ..Self::default()
        }
    }
}

impl BoardRater for EvalWeights {
    fn rate_board(&self, board: &Board) -> f64 {
        rate_board(board, self)
    }
}

/// Raw measurements the rating is built from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoardFeatures {
    pub max_height: usize,
    pub aggregate_height: usize,
    pub avg_height: f64,
    pub holes: usize,
    pub bumpiness: usize,
}

impl BoardFeatures {
    pub fn of(board: &Board) -> Self {
        let heights = board.heights();
        let aggregate_height: usize = heights.iter().sum();
        let avg_height = if heights.is_empty() {
            0.0
        } else {
            aggregate_height as f64 / heights.len() as f64
        };

        Self {
            max_height: board.max_height(),
            aggregate_height,
            avg_height,
            holes: count_holes(board),
            bumpiness: bumpiness(board),
        }
    }
}

pub fn rate_board(board: &Board, weights: &EvalWeights) -> f64 {
    let f = BoardFeatures::of(board);
    weights.max_height * f.max_height as f64
        + weights.avg_height * f.avg_height
        + weights.holes * f.holes as f64
        + weights.bumpiness * f.bumpiness as f64
}

/// Count total holes in the board (empty cells below filled cells)
pub fn count_holes(board: &Board) -> usize {
    board
        .heights()
        .iter()
        .enumerate()
        .map(|(x, &h)| {
            (0..h.saturating_sub(1))
                .filter(|&y| !board.is_filled(x as i32, y as i32))
                .count()
        })
        .sum()
}

/// Sum of height differences between neighbouring columns.
pub fn bumpiness(board: &Board) -> usize {
    board
        .heights()
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: usize, height: usize, rows: &[&str]) -> Board {
        Board::from_rows(width, height, rows).expect("board")
    }

    #[test]
    fn test_empty_board_rates_zero() {
        let b = Board::new(10, 20);
        assert_eq!(BoardFeatures::of(&b), BoardFeatures::default());
        assert_eq!(rate_board(&b, &EvalWeights::default()), 0.0);
    }

    #[test]
    fn test_holes() {
        let b = board(4, 6, &["#.#.", "..#.", "#.##"]);
        // column 0: (0,1); column 3: (3,0), (3,1)
        assert_eq!(count_holes(&b), 3);
    }

    #[test]
    fn test_bumpiness() {
        let b = board(4, 6, &["####", "#.#.", "#..."]);
        // heights 3, 1, 2, 1
        assert_eq!(bumpiness(&b), 2 + 1 + 1);
    }

    #[test]
    fn test_features() {
        let b = board(4, 6, &["##..", "#..."]);
        let f = BoardFeatures::of(&b);
        assert_eq!(f.max_height, 2);
        assert_eq!(f.aggregate_height, 3);
        assert!((f.avg_height - 0.75).abs() < 1e-12);
        assert_eq!(f.holes, 0);
        assert_eq!(f.bumpiness, 1 + 1);
    }

    #[test]
    fn test_rating_combines_weights() {
        let b = board(4, 6, &["#.#.", "#..."]);
        // max 2, avg 0.75, holes 0, bumpiness 2 + 1 + 1
        let expected = 8.0 * 2.0 + 40.0 * 0.75 + 1.0 * 4.0;
        assert!((rate_board(&b, &EvalWeights::default()) - expected).abs() < 1e-9);
        let classic = 8.0 * 2.0 + 40.0 * 0.75;
        assert!((rate_board(&b, &EvalWeights::classic()) - classic).abs() < 1e-9);
    }

    #[test]
    fn test_hole_is_worse_than_flat() {
        let flat = board(4, 6, &["##..", "##.."]);
        let holey = board(4, 6, &["#...", "##.."]);
        let weights = EvalWeights::default();
        assert!(rate_board(&holey, &weights) > rate_board(&flat, &weights));
        assert!(count_holes(&holey) > count_holes(&flat));
    }

    #[test]
    fn test_closure_is_a_rater() {
        let tallest = |b: &Board| b.max_height() as f64;
        let b = board(3, 4, &["#..", "#.."]);
        assert_eq!(tallest.rate_board(&b), 2.0);
    }

    #[test]
    fn test_weights_partial_config() {
        let weights: EvalWeights = serde_json::from_str(r#"{"holes": 5.0}"#).expect("weights");
        assert_eq!(weights.holes, 5.0);
        assert_eq!(weights.avg_height, EvalWeights::default().avg_height);
    }
}
