use proptest::prelude::*;

use crate::domain::scoring::{apply_reveal, leaderboard, LeaderboardEntry, STREAK_LIMIT};

proptest! {
    #[test]
    fn applied_delta_sign_follows_payout(streak in 0u8..STREAK_LIMIT, payout in -1i32..=3) {
        let (delta, next) = apply_reveal(streak, payout);
        prop_assert_eq!(delta < 0, payout < 0);
        prop_assert!(next < STREAK_LIMIT);
    }

    #[test]
    fn ranking_is_non_increasing_and_winners_are_argmax(
        scores in proptest::collection::vec(-20i64..50, 0..12),
    ) {
        let entries: Vec<LeaderboardEntry> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| LeaderboardEntry {
                player: (i + 1) as u64,
                name: format!("P{}", i + 1),
                score,
            })
            .collect();

        let (ranked, winners) = leaderboard(entries);

        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        match ranked.first() {
            Some(top) => {
                let expected: Vec<u64> = scores
                    .iter()
                    .enumerate()
                    .filter(|(_, &score)| score == top.score)
                    .map(|(i, _)| (i + 1) as u64)
                    .collect();
                prop_assert_eq!(winners, expected);
            }
            None => prop_assert!(winners.is_empty()),
        }
    }
}
