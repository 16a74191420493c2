use crate::domain::scoring::{apply_reveal, leaderboard, LeaderboardEntry};

fn entry(player: u64, score: i64) -> LeaderboardEntry {
    LeaderboardEntry {
        player,
        name: format!("P{player}"),
        score,
    }
}

#[test]
fn third_consecutive_bomb_escalates_and_resets() {
    let (delta, streak) = apply_reveal(0, -1);
    assert_eq!((delta, streak), (-1, 1));

    let (delta, streak) = apply_reveal(streak, -1);
    assert_eq!((delta, streak), (-1, 2));

    let (delta, streak) = apply_reveal(streak, -1);
    assert_eq!((delta, streak), (-5, 0));
}

#[test]
fn escalation_restarts_the_count() {
    // Six bombs in a row: two full escalation cycles.
    let mut streak = 0;
    let mut deltas = Vec::new();
    for _ in 0..6 {
        let (delta, next) = apply_reveal(streak, -1);
        deltas.push(delta);
        streak = next;
    }
    assert_eq!(deltas, vec![-1, -1, -5, -1, -1, -5]);
    assert_eq!(streak, 0);
}

#[test]
fn non_negative_reveal_resets_streak_and_pays_face_value() {
    assert_eq!(apply_reveal(2, 3), (3, 0));
    assert_eq!(apply_reveal(2, 0), (0, 0));
    assert_eq!(apply_reveal(0, 2), (2, 0));

    // A bomb after the reset starts counting from one again.
    assert_eq!(apply_reveal(0, -1), (-1, 1));
}

#[test]
fn leaderboard_sorts_descending_with_stable_ties() {
    let (ranked, winners) = leaderboard(vec![entry(1, 5), entry(2, 7), entry(3, 7), entry(4, -2)]);

    let order: Vec<u64> = ranked.iter().map(|e| e.player).collect();
    assert_eq!(order, vec![2, 3, 1, 4]);
    assert_eq!(winners, vec![2, 3]);
}

#[test]
fn sole_player_is_sole_winner() {
    let (ranked, winners) = leaderboard(vec![entry(9, -4)]);
    assert_eq!(ranked.len(), 1);
    assert_eq!(winners, vec![9]);
}

#[test]
fn empty_leaderboard_has_no_winner() {
    let (ranked, winners) = leaderboard(Vec::new());
    assert!(ranked.is_empty());
    assert!(winners.is_empty());
}
