//! brain-search - exhaustive placement search and piece selection.

mod adversary;
mod best;

pub use adversary::WorstPiece;
pub use best::MoveSearch;

use std::cmp::Ordering;

use brain_core::BoardError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of the rating scale is the good end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[default]
    LowerIsBetter,
    HigherIsBetter,
}

impl Polarity {
    /// Strictly better; equal scores never displace the incumbent.
    #[inline]
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        let wanted = match self {
            Polarity::LowerIsBetter => Ordering::Less,
            Polarity::HigherIsBetter => Ordering::Greater,
        };
        candidate.total_cmp(&incumbent) == wanted
    }

    /// Rating given to a position with no legal move at all.
    #[inline]
    pub fn worst_possible(self) -> f64 {
        match self {
            Polarity::LowerIsBetter => f64::INFINITY,
            Polarity::HigherIsBetter => f64::NEG_INFINITY,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub polarity: Polarity,
    /// Score candidates on a rayon pool. Ignored without the `rayon` feature.
    pub parallel: bool,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no legal placement for this piece")]
    NoLegalMove,
    #[error(transparent)]
    Board(#[from] BoardError),
}
