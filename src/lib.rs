//! Gamified ESG portfolio scoring
//!
//! Filter a table of ESG-rated companies by industry, pick a portfolio, and
//! score it: pillar means and normalized percentages, a weighted composite,
//! narrative insights, coin-earning challenges, a community leaderboard and
//! session-over-session improvement bonuses.

pub mod challenges;
pub mod companies;
pub mod config;
pub mod engine;
pub mod error;
pub mod insights;
pub mod leaderboard;
pub mod metrics;
pub mod points;
pub mod portfolio;
pub mod report;
