use std::sync::{Arc, Mutex};

use crate::domain::Board;

#[test]
fn lock_succeeds_exactly_once_per_cell() {
    let mut board = Board::new(2);

    assert!(board.lock_cell(0, 0, 1));
    assert!(!board.lock_cell(0, 0, 2));
    assert!(!board.lock_cell(0, 0, 1));

    // Other cells are unaffected by the claim.
    assert!(board.lock_cell(0, 1, 2));
}

#[test]
fn reveal_pays_only_the_lock_owner() {
    let mut board = Board::new(2);
    assert!(board.lock_cell(0, 0, 1));

    // Wrong owner, unlocked cell, and out-of-bounds all pay nothing.
    assert_eq!(board.reveal_cell(0, 0, 2), None);
    assert_eq!(board.reveal_cell(1, 1, 1), None);
    assert_eq!(board.reveal_cell(9, 9, 1), None);
    assert!(!board.is_complete());

    let payout = board.reveal_cell(0, 0, 1);
    assert!(payout.is_some());

    // A duplicate reveal by the owner is a no-op too.
    assert_eq!(board.reveal_cell(0, 0, 1), None);
}

#[test]
fn reveal_after_reveal_does_not_bump_count() {
    let mut board = Board::new(2);
    assert!(board.lock_cell(1, 0, 7));
    assert!(board.reveal_cell(1, 0, 7).is_some());
    assert_eq!(board.reveal_cell(1, 0, 7), None);

    // One of four cells revealed; the board must not report completion.
    assert!(!board.is_complete());
}

#[test]
fn completion_exactly_at_full_reveal() {
    let mut board = Board::new(2);
    let coords = [(0, 0), (0, 1), (1, 0), (1, 1)];
    for (i, (row, col)) in coords.iter().enumerate() {
        assert!(!board.is_complete(), "complete after {i} reveals");
        assert!(board.lock_cell(*row, *col, 1));
        assert!(board.reveal_cell(*row, *col, 1).is_some());
    }
    assert!(board.is_complete());
}

#[test]
fn out_of_bounds_lock_is_rejected() {
    let mut board = Board::new(3);
    assert!(!board.lock_cell(3, 0, 1));
    assert!(!board.lock_cell(0, 3, 1));
    assert!(!board.lock_cell(usize::MAX, usize::MAX, 1));
}

#[test]
fn payouts_come_from_weighted_pool() {
    let board = Board::new(6);
    for row in board.layout() {
        for payout in row {
            assert!(matches!(payout, -1 | 1 | 2 | 3), "unexpected payout {payout}");
        }
    }
    assert_eq!(board.layout().len(), 6);
    assert_eq!(board.size(), 6);
}

#[test]
fn concurrent_claims_yield_a_single_owner() {
    let shared = Arc::new(Mutex::new(Board::new(4)));

    let handles: Vec<_> = (1..=8u64)
        .map(|player| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || shared.lock().unwrap().lock_cell(2, 2, player))
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|won| *won)
        .count();
    assert_eq!(successes, 1);
}
