//! Integration tests for the cutting optimizer.
//!
//! These tests check layouts through their invariants (bounds, kerf
//! clearance, conservation of the requested pieces) rather than exact
//! coordinates, which depend on the shuffled orderings.

use panel_cut::validation::{overlaps, validate_sheet};
use panel_cut::{
    move_piece, optimize, optimize_with, piece_at, rotate_piece, AttemptSeed, CutConfig,
    CutError, OptimizationResult, PieceRequest, PlacedPiece, Sheet, Strategy,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::AtomicBool;

// ==================== Helpers ====================

fn workshop_config() -> CutConfig {
    CutConfig::new(2800, 2070)
        .with_kerf(3)
        .with_rotation(true)
        .with_strategy(Strategy::Bssf)
        .with_attempts(10)
}

fn mixed_requests() -> Vec<PieceRequest> {
    vec![
        PieceRequest::new(600, 400, 6),
        PieceRequest::new(1200, 800, 3),
        PieceRequest::new(350, 350, 8),
        PieceRequest::new(2000, 300, 2),
        PieceRequest::new(720, 560, 5),
    ]
}

/// Assert bounds containment and pairwise kerf clearance on every sheet.
fn assert_layout_valid(result: &OptimizationResult) {
    for (idx, sheet) in result.sheets.iter().enumerate() {
        let validation = validate_sheet(sheet, idx + 1);
        assert!(validation.passed, "{:?}", validation.errors);

        let pieces = sheet.pieces();
        for (i, a) in pieces.iter().enumerate() {
            assert!(a.x >= 0 && a.y >= 0);
            assert!(a.x_max() <= sheet.sheet_w() && a.y_max() <= sheet.sheet_h());
            for b in &pieces[i + 1..] {
                assert!(!overlaps(&a.rect(), &b.rect(), sheet.kerf()));
            }
        }
    }
}

/// Sorted (width, height) pairs of placed pieces, turned back upright.
fn placed_sizes(result: &OptimizationResult) -> Vec<(i64, i64)> {
    let mut sizes: Vec<(i64, i64)> = result
        .sheets
        .iter()
        .flat_map(|s| s.pieces())
        .map(|p| {
            if p.rotated {
                (p.height, p.width)
            } else {
                (p.width, p.height)
            }
        })
        .collect();
    sizes.sort();
    sizes
}

fn requested_sizes(requests: &[PieceRequest]) -> Vec<(i64, i64)> {
    let mut sizes: Vec<(i64, i64)> = requests
        .iter()
        .flat_map(|r| std::iter::repeat((r.width, r.height)).take(r.quantity as usize))
        .collect();
    sizes.sort();
    sizes
}

// ==================== Scenarios ====================

#[test]
fn test_scenario_single_sheet_of_four() {
    let result = optimize(&workshop_config(), &[PieceRequest::new(600, 400, 4)]).unwrap();

    assert_eq!(result.sheet_count(), 1);
    assert_eq!(result.sheets[0].len(), 4);
    assert_eq!(result.sheets[0].used_area(), 960_000);
    assert_layout_valid(&result);
}

#[test]
fn test_scenario_oversized_piece() {
    let config = workshop_config().with_rotation(false);
    match optimize(&config, &[PieceRequest::new(3000, 100, 1)]) {
        Err(CutError::OversizedPiece {
            width,
            height,
            sheet_w,
            sheet_h,
            ..
        }) => {
            assert_eq!((width, height), (3000, 100));
            assert_eq!((sheet_w, sheet_h), (2800, 2070));
        }
        other => panic!("Expected OversizedPiece, got {:?}", other),
    }
}

#[test]
fn test_scenario_move_onto_neighbor_keeps_position() {
    let mut result = optimize(&workshop_config(), &[PieceRequest::new(600, 400, 2)]).unwrap();
    let sheet = &mut result.sheets[0];
    let (x0, y0) = (sheet.pieces()[0].x, sheet.pieces()[0].y);
    let (x1, y1) = (sheet.pieces()[1].x, sheet.pieces()[1].y);

    assert!(!move_piece(sheet, 0, x1 + 10, y1 + 10, None));
    assert_eq!((sheet.pieces()[0].x, sheet.pieces()[0].y), (x0, y0));
}

#[test]
fn test_scenario_rotate_out_of_bounds_rejected() {
    let mut result = optimize(&workshop_config(), &[PieceRequest::new(2500, 300, 1)]).unwrap();
    let sheet = &mut result.sheets[0];
    let before = sheet.pieces()[0].clone();
    assert!(!before.rotated);

    // Turned, the piece would be 2500 mm tall on a 2070 mm sheet.
    assert!(!rotate_piece(sheet, 0));
    assert_eq!(sheet.pieces()[0], before);
}

// ==================== Layout properties ====================

#[test]
fn test_layout_valid_for_every_strategy() {
    let requests = mixed_requests();
    for strategy in Strategy::ALL {
        for rotation in [true, false] {
            let config = workshop_config()
                .with_strategy(strategy)
                .with_rotation(rotation);
            let result = optimize(&config, &requests).unwrap();
            assert_layout_valid(&result);
            assert_eq!(placed_sizes(&result), requested_sizes(&requests));
        }
    }
}

#[test]
fn test_layout_valid_with_zero_kerf() {
    let requests = mixed_requests();
    let result = optimize(&workshop_config().with_kerf(0), &requests).unwrap();
    assert_layout_valid(&result);
    assert_eq!(placed_sizes(&result), requested_sizes(&requests));
}

#[test]
fn test_layout_valid_with_wide_kerf() {
    let requests = mixed_requests();
    let result = optimize(&workshop_config().with_kerf(25), &requests).unwrap();
    assert_layout_valid(&result);
}

#[test]
fn test_full_sheet_piece_ignores_kerf_at_edge() {
    let result = optimize(&workshop_config(), &[PieceRequest::new(2800, 2070, 2)]).unwrap();
    assert_eq!(result.sheet_count(), 2);
    assert!((result.utilization() - 1.0).abs() < 1e-12);
}

#[test]
fn test_used_area_and_scrap() {
    let requests = mixed_requests();
    let result = optimize(&workshop_config(), &requests).unwrap();
    let expected: i64 = requests
        .iter()
        .map(|r| r.width * r.height * r.quantity)
        .sum();
    assert_eq!(result.used_area(), expected);
    assert_eq!(result.scrap(), result.total_area() - expected);

    let summaries = result.summaries();
    assert_eq!(summaries.len(), result.sheet_count());
    let scrap: i64 = summaries.iter().map(|s| s.scrap).sum();
    assert_eq!(scrap, result.scrap());
}

#[test]
fn test_deterministic_output() {
    let requests = mixed_requests();
    let a = optimize(&workshop_config(), &requests).unwrap();
    let b = optimize(&workshop_config(), &requests).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_more_attempts_never_more_sheets() {
    let requests = mixed_requests();
    let mut previous = usize::MAX;
    for attempts in [1, 3, 10, 30] {
        let result = optimize(&workshop_config().with_attempts(attempts), &requests).unwrap();
        assert!(result.sheet_count() <= previous);
        previous = result.sheet_count();
    }
}

#[test]
fn test_seed_base_changes_search_but_stays_valid() {
    let requests = mixed_requests();
    let result = optimize_with(&workshop_config(), &requests, &AttemptSeed::new(99), None).unwrap();
    assert_layout_valid(&result);
    assert_eq!(placed_sizes(&result), requested_sizes(&requests));
}

#[test]
fn test_cancel_flag_before_start() {
    let flag = AtomicBool::new(true);
    let result = optimize_with(
        &workshop_config(),
        &mixed_requests(),
        &AttemptSeed::default(),
        Some(&flag),
    );
    assert!(matches!(result, Err(CutError::Cancelled)));
}

// ==================== Input errors ====================

#[test]
fn test_empty_request() {
    assert!(matches!(
        optimize(&workshop_config(), &[]),
        Err(CutError::EmptyRequest)
    ));
}

#[test]
fn test_invalid_inputs() {
    let requests = [PieceRequest::new(100, 100, 1)];
    let cases = [
        (CutConfig::new(0, 2070), "sheet_w"),
        (CutConfig::new(2800, -1), "sheet_h"),
        (workshop_config().with_kerf(-3), "kerf"),
        (workshop_config().with_attempts(0), "attempts"),
    ];
    for (config, expected) in cases {
        match optimize(&config, &requests) {
            Err(CutError::InvalidInput { parameter, .. }) => assert_eq!(parameter, expected),
            other => panic!("Expected InvalidInput for {}, got {:?}", expected, other),
        }
    }
}

#[test]
fn test_invalid_piece_request() {
    let result = optimize(&workshop_config(), &[PieceRequest::new(100, 100, -2)]);
    assert!(matches!(result, Err(CutError::InvalidInput { .. })));
}

#[test]
fn test_unknown_strategy_name() {
    let parsed = "BEST".parse::<Strategy>();
    assert!(matches!(parsed, Err(CutError::InvalidInput { .. })));
}

// ==================== Interactive edits ====================

#[test]
fn test_move_to_own_position_is_idempotent() {
    let mut result = optimize(&workshop_config(), &mixed_requests()).unwrap();
    let sheet = &mut result.sheets[0];
    let before = sheet.clone();
    for idx in 0..sheet.len() {
        let (x, y) = (sheet.pieces()[idx].x, sheet.pieces()[idx].y);
        assert!(move_piece(sheet, idx, x, y, None));
    }
    assert_eq!(*sheet, before);
}

#[test]
fn test_edits_preserve_layout_validity() {
    let mut result = optimize(&workshop_config(), &mixed_requests()).unwrap();
    let sheet: &mut Sheet = &mut result.sheets[0];

    for idx in 0..sheet.len() {
        move_piece(sheet, idx, 0, 0, Some(10));
        rotate_piece(sheet, idx);
        move_piece(sheet, idx, 5000, 5000, Some(50));
    }

    assert!(validate_sheet(sheet, 1).passed);
}

#[test]
fn test_hit_test_finds_placed_piece() {
    let result = optimize(&workshop_config(), &[PieceRequest::new(600, 400, 1)]).unwrap();
    let sheet = &result.sheets[0];
    let placed: &PlacedPiece = &sheet.pieces()[0];
    assert_eq!(piece_at(sheet, placed.x + 1, placed.y + 1), Some(0));
    assert_eq!(piece_at(sheet, 2799, 2069), None);
}
