//! One dashboard interaction
//!
//! `Engine::evaluate` runs the whole pipeline top to bottom: filter, select,
//! aggregate, narrate, challenge, rank and diff against the previous scores.
//! The score history is an explicit input and output; persisting it between
//! interactions is the caller's job.

use crate::challenges::{evaluate_challenges, ChallengeOutcome, DailyChallenge};
use crate::companies::{resolve_logo, CompanyLogo, CompanyRecord};
use crate::config::DailyChallengeMode;
use crate::insights::{company_contributions, pillar_breakdown, ContributionBreakdown, PillarBreakdown};
use crate::leaderboard::{build_leaderboard, Leaderboard};
use crate::metrics::{ImpactRow, PortfolioMetrics};
use crate::points::{award_improvements, BonusSummary, ScoreHistory};
use crate::portfolio::{filter_by_industry, CatalogRow, PortfolioRow, PortfolioSelection};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use tracing::info;

pub const NO_PORTFOLIO_MESSAGE: &str = "Please select at least one company to build your portfolio.";

/// User inputs for one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRequest {
    pub industry: String,
    pub portfolio_size: usize,
    /// `None` keeps the default pre-selection of `portfolio_size` companies
    pub selected: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub placeholder_image: String,
    pub daily_challenge: DailyChallengeMode,
}

/// Everything shown once a portfolio is selected.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReport {
    pub selection: PortfolioSelection,
    pub portfolio: Vec<PortfolioRow>,
    pub logos: Vec<CompanyLogo>,
    pub metrics: PortfolioMetrics,
    pub impact_table: Vec<ImpactRow>,
    pub pillar_breakdown: PillarBreakdown,
    pub contributions: ContributionBreakdown,
    pub daily_challenge: String,
    pub challenges: ChallengeOutcome,
    pub leaderboard: Leaderboard,
    pub bonus: BonusSummary,
    /// Challenge coins plus improvement bonus
    pub total_coins: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Evaluation {
    NoPortfolio { message: String },
    Scored(Box<PortfolioReport>),
}

impl Evaluation {
    pub fn report(&self) -> Option<&PortfolioReport> {
        match self {
            Evaluation::Scored(report) => Some(report.as_ref()),
            Evaluation::NoPortfolio { .. } => None,
        }
    }
}

/// Render-ready payload of one interaction.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub catalog: Vec<CatalogRow>,
    pub industries: Vec<String>,
    pub selected_industry: String,
    pub options: Vec<String>,
    pub default_selection: Vec<String>,
    pub evaluation: Evaluation,
}

pub struct Engine {
    settings: EngineSettings,
}

impl Engine {
    pub fn new(settings: EngineSettings) -> Self {
        Engine { settings }
    }

    /// Evaluate one interaction, drawing the daily challenge per the
    /// configured mode. Returns the view and the history for the next call.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        companies: &[CompanyRecord],
        request: &InteractionRequest,
        history: &ScoreHistory,
        today: NaiveDate,
        rng: &mut R,
    ) -> (DashboardView, ScoreHistory) {
        let mode = self.settings.daily_challenge;
        self.run(companies, request, history, || {
            DailyChallenge::select(mode, today, rng)
        })
    }

    /// Same as [`Engine::evaluate`] with a fixed daily challenge.
    pub fn evaluate_with_daily(
        &self,
        companies: &[CompanyRecord],
        request: &InteractionRequest,
        history: &ScoreHistory,
        daily: DailyChallenge,
    ) -> (DashboardView, ScoreHistory) {
        self.run(companies, request, history, || daily)
    }

    fn run(
        &self,
        companies: &[CompanyRecord],
        request: &InteractionRequest,
        history: &ScoreHistory,
        draw_daily: impl FnOnce() -> DailyChallenge,
    ) -> (DashboardView, ScoreHistory) {
        let catalog = filter_by_industry(companies, &request.industry, request.portfolio_size);
        let selection = catalog.select(&request.industry, request.selected.as_deref());
        let rows = catalog.portfolio_rows(&selection);

        let mut view = DashboardView {
            catalog: companies.iter().map(CatalogRow::from).collect(),
            industries: catalog.industries.clone(),
            selected_industry: request.industry.clone(),
            options: catalog.options.clone(),
            default_selection: catalog.default_selection.clone(),
            evaluation: Evaluation::NoPortfolio {
                message: NO_PORTFOLIO_MESSAGE.to_string(),
            },
        };

        let (Some(metrics), Some(contributions)) =
            (PortfolioMetrics::compute(&rows), company_contributions(&rows))
        else {
            info!("[ENGINE] Empty selection under '{}' - nothing to score", request.industry);
            return (view, *history);
        };

        let challenges = evaluate_challenges(&metrics, draw_daily());
        let leaderboard = build_leaderboard(metrics.weighted_total, challenges.coins);
        let (bonus, next_history) = award_improvements(history, &metrics);
        let total_coins = challenges.coins + bonus.total;

        info!(
            "[ENGINE] {} companies, weighted {:.2}, rank #{}, {} coins",
            rows.len(),
            metrics.weighted_total,
            leaderboard.player_rank,
            total_coins
        );

        view.evaluation = Evaluation::Scored(Box::new(PortfolioReport {
            portfolio: rows.iter().map(|c| PortfolioRow::from(*c)).collect(),
            logos: rows
                .iter()
                .map(|c| resolve_logo(c, &self.settings.placeholder_image))
                .collect(),
            impact_table: metrics.impact_table(),
            pillar_breakdown: pillar_breakdown(&metrics),
            contributions,
            daily_challenge: challenges.daily.description(),
            challenges,
            leaderboard,
            bonus,
            total_coins,
            metrics,
            selection,
        }));

        (view, next_history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Pillar;

    fn company(name: &str, industry: &str, e: f64, s: f64, g: f64) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            exchange: "NYSE".to_string(),
            industry: industry.to_string(),
            environment_grade: "A".to_string(),
            social_grade: "A".to_string(),
            governance_grade: "A".to_string(),
            environment_score: Some(e),
            social_score: Some(s),
            governance_score: Some(g),
            total_score: Some(e + s + g),
            total_grade: "A".to_string(),
            currency: "USD".to_string(),
            logo: None,
        }
    }

    fn engine() -> Engine {
        Engine::new(EngineSettings {
            placeholder_image: "placeholder.png".to_string(),
            daily_challenge: DailyChallengeMode::PerInteraction,
        })
    }

    #[test]
    fn empty_selection_short_circuits_and_keeps_history() {
        let companies = vec![company("Alpha", "Energy", 600.0, 400.0, 400.0)];
        let request = InteractionRequest {
            industry: "Energy".to_string(),
            portfolio_size: 3,
            selected: Some(Vec::new()),
        };
        let history = ScoreHistory { environment: 1.0, social: 2.0, governance: 3.0, total: 6.0 };
        let mut drawn = false;
        let (view, next) = engine().run(&companies, &request, &history, || {
            drawn = true;
            DailyChallenge::new(Pillar::Social, 300)
        });
        assert!(!drawn, "no daily challenge for an empty portfolio");
        assert!(view.evaluation.report().is_none());
        assert_eq!(next, history);
        assert_eq!(view.options, vec!["Alpha"]);
    }

    #[test]
    fn scored_interaction_wires_every_section() {
        let companies = vec![
            company("Alpha", "Energy", 600.0, 400.0, 400.0),
            company("Bravo", "Tech", 800.0, 700.0, 700.0),
        ];
        let request = InteractionRequest {
            industry: "Energy".to_string(),
            portfolio_size: 3,
            selected: None,
        };
        let (view, next) = engine().evaluate_with_daily(
            &companies,
            &request,
            &ScoreHistory::default(),
            DailyChallenge::new(Pillar::Environmental, 600),
        );
        let report = view.evaluation.report().expect("portfolio selected");
        assert_eq!(report.selection.companies, vec!["Alpha"]);
        assert_eq!(report.impact_table.len(), 4);
        assert!(report.challenges.daily_met);
        assert_eq!(report.challenges.coins, 20);
        assert_eq!(report.bonus.total, 25);
        assert_eq!(report.total_coins, 45);
        assert_eq!(report.leaderboard.player_rank, 4);
        assert_eq!(report.leaderboard.entries[3].coins, 20);
        assert_eq!(next.environment, 600.0);
        assert_eq!(view.catalog.len(), 2);
    }
}
