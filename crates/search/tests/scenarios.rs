use brain_core::{Board, Piece, Shape};
use brain_engine::{apply_placement, generate_placements, play_move};
use brain_eval::{count_holes, EvalWeights};
use brain_search::{MoveSearch, Polarity, SearchConfig, SearchError};
use proptest::prelude::*;

fn board(width: usize, height: usize, rows: &[&str]) -> Board {
    Board::from_rows(width, height, rows).expect("board")
}

fn holes_after(board: &Board, piece: &Piece, x: i32, y: i32) -> usize {
    let (next, _) = apply_placement(board, piece, x, y)
        .expect("committed")
        .expect("fits");
    count_holes(&next)
}

#[test]
fn spike_in_column_zero() {
    let b = board(
        10,
        20,
        &["#.........", "#.........", "#.........", "#........."],
    );
    let search = MoveSearch::default();
    let piece = Shape::L1.piece();

    let chosen = search.best_move(&b, piece, 20).expect("expected a move");
    let chosen_holes = holes_after(&b, &chosen.piece, chosen.x, chosen.y);

    let candidates = search.scored_candidates(&b, piece, 20).expect("search");
    let most_holes = candidates
        .iter()
        .map(|(mv, _)| holes_after(&b, &mv.piece, mv.x, mv.y))
        .max()
        .expect("candidates");
    assert!(chosen_holes < most_holes);
}

#[test]
fn search_agrees_with_candidate_list() {
    let b = board(8, 16, &["#.##.###", "#..#..##"]);
    let search = MoveSearch::default();
    for shape in Shape::ALL {
        let (mv, score) = search
            .find_best_move(&b, shape.piece(), 16)
            .expect("expected a move");
        let candidates = search.scored_candidates(&b, shape.piece(), 16).expect("search");
        let first_min = candidates
            .iter()
            .find(|(_, s)| *s == score)
            .map(|(m, _)| m.clone());
        assert_eq!(first_min, Some(mv), "{shape:?}");
        assert!(candidates.iter().all(|(_, s)| *s >= score));
    }
}

#[test]
fn greedy_game_keeps_board_consistent() {
    let search = MoveSearch::default();
    let mut b = Board::new(10, 20);
    let mut cleared = 0;

    for shape in Shape::ALL.iter().cycle().take(70) {
        let mv = match search.best_move(&b, shape.piece(), b.height()) {
            Ok(mv) => mv,
            Err(SearchError::NoLegalMove) => break,
            Err(err) => panic!("unexpected error: {err}"),
        };
        let outcome = play_move(&mut b, &mv).expect("search only returns legal moves");
        cleared += outcome.rows_cleared;
        assert!(b.is_committed());
        assert!(b.max_height() <= b.height());
    }

    assert!(cleared > 0, "a greedy player should clear some rows");
}

#[test]
fn higher_is_better_flips_choice() {
    let b = board(6, 12, &["#.....", "#....."]);
    let weights = EvalWeights::default();
    let low = MoveSearch::with_rater(weights.clone(), SearchConfig::default());
    let high = MoveSearch::with_rater(
        weights,
        SearchConfig {
            polarity: Polarity::HigherIsBetter,
            parallel: false,
        },
    );

    let (_, best) = low.find_best_move(&b, Shape::Pyramid.piece(), 12).expect("move");
    let (_, worst) = high.find_best_move(&b, Shape::Pyramid.piece(), 12).expect("move");
    assert!(best < worst);
}

#[test]
fn config_round_trips_through_json() {
    let config: SearchConfig =
        serde_json::from_str(r#"{"polarity": "higher_is_better"}"#).expect("config");
    assert_eq!(config.polarity, Polarity::HigherIsBetter);
    assert!(!config.parallel);
}

fn ragged_board() -> impl Strategy<Value = Board> {
    (4usize..=10).prop_flat_map(|width| {
        prop::collection::vec(0usize..=6, width).prop_map(move |heights| {
            let rows: Vec<String> = (0..6)
                .map(|y| {
                    heights
                        .iter()
                        .enumerate()
                        .map(|(x, &h)| if y < h && (x + y) % 5 != 0 { '#' } else { '.' })
                        .collect()
                })
                .collect();
            Board::from_rows(width, 16, rows.as_slice()).expect("board")
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chosen_move_is_generated_and_minimal(b in ragged_board(), shape in 0usize..7) {
        let shape = Shape::ALL[shape];
        let search = MoveSearch::default();
        let placements = generate_placements(&b, shape.rotations(), 16);
        match search.find_best_move(&b, shape.piece(), 16) {
            Ok((mv, score)) => {
                prop_assert!(placements
                    .iter()
                    .any(|p| p.rotation == mv.rotation && p.x == mv.x && p.y == mv.y));
                for (_, s) in search.scored_candidates(&b, shape.piece(), 16).expect("search") {
                    prop_assert!(score <= s);
                }
            }
            Err(SearchError::NoLegalMove) => prop_assert!(placements.is_empty()),
            Err(err) => prop_assert!(false, "unexpected error: {}", err),
        }
    }

    #[test]
    fn search_leaves_board_untouched(b in ragged_board(), shape in 0usize..7) {
        let before = b.clone();
        let _ = MoveSearch::default().best_move(&b, Shape::ALL[shape].piece(), 16);
        prop_assert_eq!(b, before);
    }
}
