//! Portfolio-level ESG metrics
//!
//! Means of the selected companies' scores, their normalization against the
//! dataset's historical maxima, the weighted composite and the
//! "Good"/"Below Average" classification shown in the impact table.

use crate::companies::CompanyRecord;
use crate::config::*;
use serde::Serialize;
use std::fmt;

/// The three ESG dimensions, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pillar {
    Environmental,
    Social,
    Governance,
}

impl Pillar {
    pub const ALL: [Pillar; 3] = [Pillar::Environmental, Pillar::Social, Pillar::Governance];

    pub fn label(&self) -> &'static str {
        match self {
            Pillar::Environmental => "Environmental",
            Pillar::Social => "Social",
            Pillar::Governance => "Governance",
        }
    }

    /// Label used by the impact table and the daily challenge
    pub fn impact_label(&self) -> &'static str {
        match self {
            Pillar::Environmental => "Environmental Impact",
            Pillar::Social => "Social Impact",
            Pillar::Governance => "Governance Impact",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Performance {
    Good,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl Performance {
    /// `Good` only when `value` reaches `threshold`; a missing (NaN) mean is below average.
    pub fn classify(value: f64, threshold: f64) -> Self {
        if value >= threshold {
            Performance::Good
        } else {
            Performance::BelowAverage
        }
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Performance::Good => f.write_str("Good"),
            Performance::BelowAverage => f.write_str("Below Average"),
        }
    }
}

/// Aggregates over a non-empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioMetrics {
    pub avg_environment: f64,
    pub avg_social: f64,
    pub avg_governance: f64,
    pub avg_total: f64,
    pub normalized_environment: f64,
    pub normalized_social: f64,
    pub normalized_governance: f64,
    /// Total-score mean against its own maximum. Independent of `weighted_total`.
    pub normalized_total: f64,
    pub weighted_total: f64,
}

/// One row of the "Portfolio Impact Scores" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactRow {
    pub metric: &'static str,
    pub score: f64,
    pub best_score: f64,
    pub industry_benchmark: &'static str,
    pub performance: Performance,
}

/// Arithmetic mean skipping missing values; NaN when nothing is left.
fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

fn normalize(value: f64, max: f64) -> f64 {
    (value / max) * 100.0
}

impl PortfolioMetrics {
    /// Compute metrics for `rows`. Returns `None` for an empty selection.
    pub fn compute(rows: &[&CompanyRecord]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Self::from_means(
            mean(rows.iter().map(|c| c.environment_score)),
            mean(rows.iter().map(|c| c.social_score)),
            mean(rows.iter().map(|c| c.governance_score)),
            mean(rows.iter().map(|c| c.total_score)),
        ))
    }

    /// Derive normalized and weighted figures from already-averaged scores.
    pub fn from_means(environment: f64, social: f64, governance: f64, total: f64) -> Self {
        let normalized_environment = normalize(environment, MAX_ENVIRONMENT_SCORE);
        let normalized_social = normalize(social, MAX_SOCIAL_SCORE);
        let normalized_governance = normalize(governance, MAX_GOVERNANCE_SCORE);
        let weighted_total = normalized_environment * ENVIRONMENT_WEIGHT
            + normalized_social * SOCIAL_WEIGHT
            + normalized_governance * GOVERNANCE_WEIGHT;

        PortfolioMetrics {
            avg_environment: environment,
            avg_social: social,
            avg_governance: governance,
            avg_total: total,
            normalized_environment,
            normalized_social,
            normalized_governance,
            normalized_total: normalize(total, MAX_TOTAL_SCORE),
            weighted_total,
        }
    }

    pub fn pillar_mean(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Environmental => self.avg_environment,
            Pillar::Social => self.avg_social,
            Pillar::Governance => self.avg_governance,
        }
    }

    /// Pillar means in [`Pillar::ALL`] order.
    pub fn pillar_means(&self) -> [f64; 3] {
        Pillar::ALL.map(|p| self.pillar_mean(p))
    }

    pub fn impact_table(&self) -> Vec<ImpactRow> {
        let row = |metric, score, best_score, threshold| ImpactRow {
            metric,
            score,
            best_score,
            industry_benchmark: INDUSTRY_BENCHMARK_LABEL,
            performance: Performance::classify(score, threshold),
        };
        vec![
            row(
                Pillar::Environmental.impact_label(),
                self.avg_environment,
                MAX_ENVIRONMENT_SCORE,
                GOOD_ENVIRONMENT_SCORE,
            ),
            row(
                Pillar::Social.impact_label(),
                self.avg_social,
                MAX_SOCIAL_SCORE,
                GOOD_SOCIAL_SCORE,
            ),
            row(
                Pillar::Governance.impact_label(),
                self.avg_governance,
                MAX_GOVERNANCE_SCORE,
                GOOD_GOVERNANCE_SCORE,
            ),
            row(
                "Overall Impact Score",
                self.avg_total,
                MAX_TOTAL_SCORE,
                GOOD_TOTAL_SCORE,
            ),
        ]
    }
}
