//! Challenge evaluation and coin tally
//!
//! Four fixed challenges over the normalized scores, worth 10 coins each,
//! plus a daily challenge on one raw pillar mean worth 20 coins.

use crate::config::*;
use crate::metrics::{Pillar, PortfolioMetrics};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::ops::RangeInclusive;
use tracing::debug;

/// A pillar and the raw mean it has to reach today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyChallenge {
    pub pillar: Pillar,
    pub target: u32,
}

impl DailyChallenge {
    pub fn new(pillar: Pillar, target: u32) -> Self {
        DailyChallenge { pillar, target }
    }

    /// Inclusive range the target is drawn from.
    pub fn target_range(pillar: Pillar) -> RangeInclusive<u32> {
        let (lo, hi) = match pillar {
            Pillar::Environmental => ENVIRONMENTAL_TARGET_RANGE,
            Pillar::Social => SOCIAL_TARGET_RANGE,
            Pillar::Governance => GOVERNANCE_TARGET_RANGE,
        };
        lo..=hi
    }

    /// Uniform draw of a pillar, then of a target within its range.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let pillar = Pillar::ALL
            .choose(rng)
            .copied()
            .unwrap_or(Pillar::Environmental);
        let target = rng.gen_range(Self::target_range(pillar));
        DailyChallenge { pillar, target }
    }

    /// Draw seeded by the calendar date: the same for every call on `date`.
    pub fn for_day(date: NaiveDate) -> Self {
        let mut rng = StdRng::seed_from_u64(date.num_days_from_ce() as u64);
        Self::draw(&mut rng)
    }

    /// Draw according to `mode`, using `rng` for per-interaction draws.
    pub fn select<R: Rng + ?Sized>(mode: DailyChallengeMode, today: NaiveDate, rng: &mut R) -> Self {
        let challenge = match mode {
            DailyChallengeMode::PerInteraction => Self::draw(rng),
            DailyChallengeMode::PerDay => Self::for_day(today),
        };
        debug!(
            "[CHALLENGE] Daily challenge ({:?}): {} >= {}",
            mode,
            challenge.pillar.impact_label(),
            challenge.target
        );
        challenge
    }

    pub fn is_met(&self, metrics: &PortfolioMetrics) -> bool {
        metrics.pillar_mean(self.pillar) >= f64::from(self.target)
    }

    pub fn description(&self) -> String {
        format!(
            "Today's challenge: Select a portfolio with {} ≥ {}. Earn {} bonus coins if you achieve this target!",
            self.pillar.impact_label(),
            self.target,
            DAILY_CHALLENGE_COINS
        )
    }
}

/// Pass/fail of one challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeResult {
    pub name: &'static str,
    pub completed: bool,
    pub coins: u32,
}

impl ChallengeResult {
    fn new(name: &'static str, completed: bool, reward: u32) -> Self {
        ChallengeResult {
            name,
            completed,
            coins: if completed { reward } else { 0 },
        }
    }
}

/// Everything the challenge tracker shows for one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeOutcome {
    pub daily: DailyChallenge,
    pub daily_met: bool,
    pub daily_coins: u32,
    pub challenges: Vec<ChallengeResult>,
    /// Daily coins plus coins from completed static challenges
    pub coins: u32,
}

/// The four fixed challenges in display order.
pub fn static_challenges(metrics: &PortfolioMetrics) -> Vec<ChallengeResult> {
    vec![
        ChallengeResult::new(
            "Environmental Leader (≥ 75%)",
            metrics.normalized_environment >= ENVIRONMENTAL_LEADER_PCT,
            STATIC_CHALLENGE_COINS,
        ),
        ChallengeResult::new(
            "Social Advocate (≥ 70%)",
            metrics.normalized_social >= SOCIAL_ADVOCATE_PCT,
            STATIC_CHALLENGE_COINS,
        ),
        ChallengeResult::new(
            "Governance Specialist (≥ 70%)",
            metrics.normalized_governance >= GOVERNANCE_SPECIALIST_PCT,
            STATIC_CHALLENGE_COINS,
        ),
        ChallengeResult::new(
            "Portfolio Expert (Weighted Score ≥ 80%)",
            metrics.weighted_total >= PORTFOLIO_EXPERT_PCT,
            STATIC_CHALLENGE_COINS,
        ),
    ]
}

pub fn evaluate_challenges(metrics: &PortfolioMetrics, daily: DailyChallenge) -> ChallengeOutcome {
    let daily_met = daily.is_met(metrics);
    let daily_coins = if daily_met { DAILY_CHALLENGE_COINS } else { 0 };
    let challenges = static_challenges(metrics);
    let coins = daily_coins + challenges.iter().map(|c| c.coins).sum::<u32>();

    ChallengeOutcome {
        daily,
        daily_met,
        daily_coins,
        challenges,
        coins,
    }
}
