//! brain-tetris - a Tetris board with a greedy placement brain.
//!
//! The work lives in the member crates; this crate re-exports them and holds
//! the autoplay configuration.

pub mod config;
pub mod play;

pub use brain_core;
pub use brain_engine;
pub use brain_eval;
pub use brain_search;

pub use brain_core::{Board, Move, Piece, PlaceResult, Shape};
pub use brain_eval::EvalWeights;
pub use brain_search::{MoveSearch, SearchConfig};
pub use config::AutoplayConfig;
pub use play::{next_move, Dealer};
