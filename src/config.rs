//! Scoring constants and command-line configuration.
//!
//! The constants mirror the published historical maxima of the ESG dataset
//! and the fixed reward table of the game. Everything deployment specific
//! (dataset location, placeholder image, session file) comes from [`Args`].

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Synthetic filter option that matches every industry
pub const ALL_INDUSTRIES: &str = "All";

/// Portfolio size slider bounds and default
pub const MIN_PORTFOLIO_SIZE: usize = 1;
pub const MAX_PORTFOLIO_SIZE: usize = 10;
pub const DEFAULT_PORTFOLIO_SIZE: usize = 3;

// Historical maxima used for normalization
pub const MAX_ENVIRONMENT_SCORE: f64 = 850.0;
pub const MAX_SOCIAL_SCORE: f64 = 750.0;
pub const MAX_GOVERNANCE_SCORE: f64 = 780.0;
pub const MAX_TOTAL_SCORE: f64 = 2380.0;

// Weighted composite (over normalized pillars)
pub const ENVIRONMENT_WEIGHT: f64 = 0.4;
pub const SOCIAL_WEIGHT: f64 = 0.3;
pub const GOVERNANCE_WEIGHT: f64 = 0.3;

// Raw-mean thresholds for the "Good" performance label (70% of max)
pub const GOOD_ENVIRONMENT_SCORE: f64 = 595.0;
pub const GOOD_SOCIAL_SCORE: f64 = 525.0;
pub const GOOD_GOVERNANCE_SCORE: f64 = 546.0;
pub const GOOD_TOTAL_SCORE: f64 = 1666.0;

/// Benchmark label shown next to every metric
pub const INDUSTRY_BENCHMARK_LABEL: &str = "≥ 70%";

// Static challenge thresholds (normalized percentages)
pub const ENVIRONMENTAL_LEADER_PCT: f64 = 75.0;
pub const SOCIAL_ADVOCATE_PCT: f64 = 70.0;
pub const GOVERNANCE_SPECIALIST_PCT: f64 = 70.0;
pub const PORTFOLIO_EXPERT_PCT: f64 = 80.0;

// Reward table
pub const STATIC_CHALLENGE_COINS: u32 = 10;
pub const DAILY_CHALLENGE_COINS: u32 = 20;
pub const PILLAR_IMPROVEMENT_BONUS: u32 = 5;
pub const TOTAL_IMPROVEMENT_BONUS: u32 = 10;

// Daily challenge target ranges (inclusive)
pub const ENVIRONMENTAL_TARGET_RANGE: (u32, u32) = (500, 800);
pub const SOCIAL_TARGET_RANGE: (u32, u32) = (300, 600);
pub const GOVERNANCE_TARGET_RANGE: (u32, u32) = (300, 600);

/// Fixed community competitors: (name, weighted score, coins)
pub const COMMUNITY_COMPETITORS: &[(&str, f64, u32)] = &[
    ("Alice", 88.0, 50),
    ("John", 85.0, 45),
    ("Nita", 80.0, 40),
];

/// Leaderboard name of the current user
pub const PLAYER_NAME: &str = "You";

/// How often the daily challenge is redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DailyChallengeMode {
    /// Fresh draw on every evaluation
    #[default]
    PerInteraction,
    /// One draw per local calendar day
    PerDay,
}

/// Gamified ESG portfolio scoring
#[derive(Parser, Debug, Clone)]
#[command(name = "esg_quest")]
#[command(about = "Build an ESG portfolio, earn coins and climb the leaderboard")]
pub struct Args {
    /// Company dataset: local CSV path or http(s) URL
    #[arg(long, env = "ESG_DATASET", default_value = "data.csv")]
    pub data: String,

    /// Image shown for companies without a logo
    #[arg(long, env = "ESG_PLACEHOLDER_IMAGE", default_value = "assets/no_logo_available.png")]
    pub placeholder: String,

    /// File holding the previous interaction's scores
    #[arg(long, env = "ESG_SESSION_FILE", default_value = ".esg_session.json")]
    pub session: PathBuf,

    /// Industry filter ("All" for no filtering)
    #[arg(long, default_value = ALL_INDUSTRIES)]
    pub industry: String,

    /// Number of companies pre-selected when no --select is given
    #[arg(
        long,
        default_value_t = DEFAULT_PORTFOLIO_SIZE,
        value_parser = parse_portfolio_size
    )]
    pub size: usize,

    /// Company to include in the portfolio (repeatable)
    #[arg(long = "select", value_name = "NAME")]
    pub select: Vec<String>,

    /// Daily challenge redraw policy
    #[arg(long, env = "ESG_DAILY_CHALLENGE", value_enum, default_value_t = DailyChallengeMode::PerInteraction)]
    pub daily_challenge: DailyChallengeMode,

    /// Print the dashboard as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Forget the stored scores before evaluating
    #[arg(long)]
    pub reset_session: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Timeout for remote dataset downloads, in seconds
    #[arg(long, env = "ESG_FETCH_TIMEOUT_SECS", default_value = "10")]
    pub fetch_timeout_secs: u64,
}

fn parse_portfolio_size(raw: &str) -> Result<usize, String> {
    let size: usize = raw
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", raw))?;
    if (MIN_PORTFOLIO_SIZE..=MAX_PORTFOLIO_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "portfolio size must be between {} and {}",
            MIN_PORTFOLIO_SIZE, MAX_PORTFOLIO_SIZE
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_size_is_bounded() {
        assert_eq!(parse_portfolio_size("1"), Ok(1));
        assert_eq!(parse_portfolio_size("10"), Ok(10));
        assert!(parse_portfolio_size("0").is_err());
        assert!(parse_portfolio_size("11").is_err());
        assert!(parse_portfolio_size("three").is_err());
    }

    #[test]
    fn defaults_parse_without_flags() {
        let args = Args::try_parse_from(["esg_quest"]).unwrap();
        assert_eq!(args.industry, ALL_INDUSTRIES);
        assert_eq!(args.size, DEFAULT_PORTFOLIO_SIZE);
        assert!(args.select.is_empty());
        assert!(!args.json);
    }

    #[test]
    fn repeated_select_flags_accumulate() {
        let args = Args::try_parse_from([
            "esg_quest",
            "--select",
            "Apple Inc",
            "--select",
            "Tesla Inc",
            "--daily-challenge",
            "per-day",
        ])
        .unwrap();
        assert_eq!(args.select, vec!["Apple Inc", "Tesla Inc"]);
        assert_eq!(args.daily_challenge, DailyChallengeMode::PerDay);
    }
}
