//! Plain-text rendering of a [`DashboardView`] for the terminal.

use crate::companies::LogoSource;
use crate::engine::{DashboardView, Evaluation, PortfolioReport};
use std::fmt::{self, Display, Formatter};

fn fmt_score(score: Option<f64>) -> String {
    match score {
        Some(v) if !v.is_nan() => format!("{:.0}", v),
        _ => "-".to_string(),
    }
}

impl Display for DashboardView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Explore Companies ({} listed) ==", self.catalog.len())?;
        writeln!(
            f,
            "{:<32} {:<10} {:>5} {:>5} {:>5} {:>6} {:>6} {:>6} {:>6}",
            "name", "exchange", "E", "S", "G", "E_sc", "S_sc", "G_sc", "total"
        )?;
        for row in &self.catalog {
            writeln!(
                f,
                "{:<32} {:<10} {:>5} {:>5} {:>5} {:>6} {:>6} {:>6} {:>6}",
                row.name,
                row.exchange,
                row.environment_grade,
                row.social_grade,
                row.governance_grade,
                fmt_score(row.environment_score),
                fmt_score(row.social_score),
                fmt_score(row.governance_score),
                fmt_score(row.total_score),
            )?;
        }
        writeln!(f)?;
        writeln!(f, "== Build Your ESG Portfolio ==")?;
        writeln!(f, "Industry: {} (options: {})", self.selected_industry, self.industries.join(", "))?;
        writeln!(f, "Companies offered: {}", self.options.len())?;
        writeln!(f)?;

        match &self.evaluation {
            Evaluation::NoPortfolio { message } => writeln!(f, "⚠️ {}", message),
            Evaluation::Scored(report) => Display::fmt(report.as_ref(), f),
        }
    }
}

impl Display for PortfolioReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Your Selected Portfolio ==")?;
        for row in &self.portfolio {
            writeln!(
                f,
                "  {} [{}] E:{} S:{} G:{} total:{} ({})",
                row.name,
                row.industry,
                row.environment_grade,
                row.social_grade,
                row.governance_grade,
                row.total_grade,
                row.currency
            )?;
        }
        for logo in &self.logos {
            let location = match &logo.image {
                LogoSource::Remote(url) => url.as_str(),
                LogoSource::Local(path) => path.as_str(),
                LogoSource::Placeholder(path) => path.as_str(),
            };
            writeln!(f, "  logo {}: {}", logo.caption, location)?;
        }

        writeln!(f, "\n== Portfolio Impact Scores ==")?;
        for row in &self.impact_table {
            writeln!(
                f,
                "  {:<22} {:>9.2} / {:<5} benchmark {}  {}",
                row.metric, row.score, row.best_score, row.industry_benchmark, row.performance
            )?;
        }
        writeln!(f, "  Weighted score: {:.2}", self.metrics.weighted_total)?;

        writeln!(f, "\n== ESG Breakdown ==")?;
        for slice in &self.pillar_breakdown.slices {
            writeln!(f, "  {:<14} {:>9.2} ({:.1}%)", slice.pillar, slice.score, slice.share_pct)?;
        }
        for line in &self.pillar_breakdown.narrative {
            writeln!(f, "  - {}", line)?;
        }

        writeln!(f, "\n== Company-wise ESG Contribution ==")?;
        for c in &self.contributions.companies {
            writeln!(
                f,
                "  {:<32} E:{:>5} S:{:>5} G:{:>5} sum:{:.2}",
                c.name,
                fmt_score(c.environment_score),
                fmt_score(c.social_score),
                fmt_score(c.governance_score),
                c.total
            )?;
        }
        for line in &self.contributions.narrative {
            writeln!(f, "  - {}", line)?;
        }

        writeln!(f, "\n== 🎯 Daily Challenge ==")?;
        writeln!(f, "  {}", self.daily_challenge)?;
        if self.challenges.daily_met {
            writeln!(
                f,
                "  🎉 Congratulations! You've met the daily challenge and earned {} bonus coins!",
                self.challenges.daily_coins
            )?;
        } else {
            writeln!(f, "  ❌ Keep trying to meet today's challenge for bonus rewards!")?;
        }

        writeln!(f, "\n== Challenges Tracker ==")?;
        for c in &self.challenges.challenges {
            if c.completed {
                writeln!(f, "  ✅ {} - Earned {} coins!", c.name, c.coins)?;
            } else {
                writeln!(f, "  ❌ {} - Not yet achieved.", c.name)?;
            }
        }
        writeln!(f, "  Total Coins Earned: {} 🪙", self.challenges.coins)?;

        writeln!(f, "\n== Community Leaderboard ==")?;
        for e in &self.leaderboard.entries {
            writeln!(f, "  #{} {:<6} {:>7.2} {:>4} coins", e.rank, e.name, e.weighted_score, e.coins)?;
        }
        writeln!(f, "  {}", self.leaderboard.message)?;

        writeln!(f, "\n== Bonus Rewards ==")?;
        for award in &self.bonus.awards {
            writeln!(f, "  {}: +{} bonus coins!", award.reason, award.coins)?;
        }
        writeln!(f, "  Total Coins (Including Bonuses): {} 🪙", self.total_coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_scores_render_as_dash() {
        assert_eq!(fmt_score(None), "-");
        assert_eq!(fmt_score(Some(f64::NAN)), "-");
        assert_eq!(fmt_score(Some(612.4)), "612");
    }
}
