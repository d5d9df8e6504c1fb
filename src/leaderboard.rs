use crate::config::{COMMUNITY_COMPETITORS, PLAYER_NAME};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub weighted_score: f64,
    pub coins: u32,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub player_rank: usize,
    pub message: String,
}

// Descending, NaN last. Equal scores compare Equal so a stable sort keeps input order.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Rank `entries` (name, weighted score, coins) by weighted score.
/// The sort is stable: ties keep their input order.
pub fn rank_entries(entries: Vec<(String, f64, u32)>) -> Vec<LeaderboardEntry> {
    let mut sorted = entries;
    sorted.sort_by(|a, b| by_score_desc(a.1, b.1));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, (name, weighted_score, coins))| LeaderboardEntry {
            name,
            weighted_score,
            coins,
            rank: i + 1,
        })
        .collect()
}

pub fn rank_message(rank: usize, weighted_score: f64) -> String {
    match rank {
        1 => format!(
            "🎉 Congratulations! You're leading the leaderboard with a weighted score of {:.2}!",
            weighted_score
        ),
        2..=3 => format!(
            "👏 Great job! You're ranked #{}. Aim for the top spot by earning more coins!",
            rank
        ),
        _ => format!(
            "⚠️ You're ranked #{}. Improve your portfolio to climb higher!",
            rank
        ),
    }
}

/// Community board: the fixed competitors followed by the player.
pub fn build_leaderboard(weighted_score: f64, coins: u32) -> Leaderboard {
    let mut rows: Vec<(String, f64, u32)> = COMMUNITY_COMPETITORS
        .iter()
        .map(|&(name, score, coins)| (name.to_string(), score, coins))
        .collect();
    rows.push((PLAYER_NAME.to_string(), weighted_score, coins));

    let entries = rank_entries(rows);
    let player_rank = entries
        .iter()
        .find(|e| e.name == PLAYER_NAME)
        .map(|e| e.rank)
        .unwrap_or(entries.len());

    Leaderboard {
        message: rank_message(player_rank, weighted_score),
        entries,
        player_rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(board: &[LeaderboardEntry]) -> Vec<&str> {
        board.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn player_ranks_by_weighted_score() {
        let board = build_leaderboard(59.6, 0);
        assert_eq!(names(&board.entries), vec!["Alice", "John", "Nita", "You"]);
        assert_eq!(board.player_rank, 4);
        assert!(board.message.contains("ranked #4"));

        let board = build_leaderboard(86.0, 30);
        assert_eq!(board.player_rank, 2);
        assert!(board.message.starts_with("👏 Great job! You're ranked #2."));

        let board = build_leaderboard(91.234, 60);
        assert_eq!(board.player_rank, 1);
        assert!(board.message.contains("weighted score of 91.23!"));
    }

    #[test]
    fn player_is_last_among_ties() {
        let board = build_leaderboard(85.0, 99);
        assert_eq!(names(&board.entries), vec!["Alice", "John", "You", "Nita"]);
        assert_eq!(board.player_rank, 3);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let ranked = rank_entries(vec![
            ("Zed".to_string(), 70.0, 1),
            ("Amy".to_string(), 90.0, 2),
            ("Bob".to_string(), 70.0, 3),
            ("Cat".to_string(), 70.0, 4),
        ]);
        assert_eq!(names(&ranked), vec!["Amy", "Zed", "Bob", "Cat"]);
        let ranks: Vec<usize> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn missing_score_sorts_last() {
        let board = build_leaderboard(f64::NAN, 0);
        assert_eq!(board.player_rank, 4);
    }
}
