//! brain-engine - placement candidates and their simulation on a board.
//!
//! Candidates come from the skirt-based drop; the cell-by-cell drop in
//! [`collision`] is kept as the reference it is checked against.

pub mod apply;
pub mod collision;
pub mod movegen;

pub use apply::{apply_placement, play_move, with_placement, ApplyError, Outcome};
pub use collision::{can_place, collides, hard_drop_y};
pub use movegen::{generate_placements, Placement, PlacementList};
