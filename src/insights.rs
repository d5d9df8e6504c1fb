use crate::companies::CompanyRecord;
use crate::metrics::{Pillar, PortfolioMetrics};
use serde::Serialize;

/// One slice of the ESG breakdown pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarShare {
    pub pillar: Pillar,
    pub score: f64,
    pub share_pct: f64,
}

/// Pie payload plus its narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarBreakdown {
    pub slices: Vec<PillarShare>,
    pub dominant: Pillar,
    pub weakest: Pillar,
    pub narrative: Vec<String>,
}

/// One company's bars in the contribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyContribution {
    pub name: String,
    pub environment_score: Option<f64>,
    pub social_score: Option<f64>,
    pub governance_score: Option<f64>,
    pub total: f64,
}

/// Bar payload plus its narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionBreakdown {
    pub companies: Vec<CompanyContribution>,
    pub top_company: String,
    pub top_score: f64,
    pub low_company: String,
    pub low_score: f64,
    pub narrative: Vec<String>,
}

// First index holding the extreme value; later equal values never win.
fn first_extreme(values: &[f64], better: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            None if !v.is_nan() => best = Some(i),
            Some(b) if better(v, values[b]) => best = Some(i),
            _ => {}
        }
    }
    best
}

fn first_max(values: &[f64]) -> Option<usize> {
    first_extreme(values, |a, b| a > b)
}

fn first_min(values: &[f64]) -> Option<usize> {
    first_extreme(values, |a, b| a < b)
}

/// Share of each pillar in the three-way sum and the strongest/weakest pillar.
pub fn pillar_breakdown(metrics: &PortfolioMetrics) -> PillarBreakdown {
    let values = metrics.pillar_means();
    let sum: f64 = values.iter().sum();
    let share = |v: f64| v / sum * 100.0;

    let dominant = Pillar::ALL[first_max(&values).unwrap_or(0)];
    let weakest = Pillar::ALL[first_min(&values).unwrap_or(0)];
    let dominant_pct = share(metrics.pillar_mean(dominant));
    let weak_pct = share(metrics.pillar_mean(weakest));

    let slices = Pillar::ALL
        .iter()
        .zip(values)
        .map(|(&pillar, score)| PillarShare {
            pillar,
            score,
            share_pct: share(score),
        })
        .collect();

    let narrative = vec![
        format!(
            "Your portfolio has the strongest focus on {}, comprising {:.2}% of the total scores.",
            dominant, dominant_pct
        ),
        format!(
            "The weakest area is {}, contributing only {:.2}%.",
            weakest, weak_pct
        ),
        format!(
            "Consider adding companies with higher {} scores to improve overall balance.",
            weakest
        ),
    ];

    PillarBreakdown {
        slices,
        dominant,
        weakest,
        narrative,
    }
}

/// Per-company pillar sums with the top and lowest contributor.
/// Returns `None` when `rows` is empty.
pub fn company_contributions(rows: &[&CompanyRecord]) -> Option<ContributionBreakdown> {
    let companies: Vec<CompanyContribution> = rows
        .iter()
        .map(|c| CompanyContribution {
            name: c.name.clone(),
            environment_score: c.environment_score,
            social_score: c.social_score,
            governance_score: c.governance_score,
            total: c.pillar_sum(),
        })
        .collect();

    let totals: Vec<f64> = companies.iter().map(|c| c.total).collect();
    let top = &companies[first_max(&totals)?];
    let low = &companies[first_min(&totals)?];

    let narrative = vec![
        format!(
            "The top contributor is {} with a total ESG score of {:.2}.",
            top.name, top.total
        ),
        format!(
            "The least contributor is {} with a total ESG score of {:.2}.",
            low.name, low.total
        ),
        format!(
            "Diversify or replace low-performing companies like {} to improve your portfolio.",
            low.name
        ),
    ];

    Some(ContributionBreakdown {
        top_company: top.name.clone(),
        top_score: top.total,
        low_company: low.name.clone(),
        low_score: low.total,
        companies,
        narrative,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str, e: f64, s: f64, g: f64) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            exchange: "NYSE".to_string(),
            industry: "Tech".to_string(),
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

    #[test]
    fn tied_maximum_goes_to_first_listed_pillar() {
        let m = PortfolioMetrics::from_means(500.0, 500.0, 300.0, 1300.0);
        let b = pillar_breakdown(&m);
        assert_eq!(b.dominant, Pillar::Environmental);
        assert_eq!(b.weakest, Pillar::Governance);
        assert!(b.narrative[0].contains("Environmental, comprising 38.46%"));
        assert!(b.narrative[1].contains("Governance, contributing only 23.08%"));
    }

    #[test]
    fn tied_minimum_goes_to_first_listed_pillar() {
        let m = PortfolioMetrics::from_means(700.0, 300.0, 300.0, 1300.0);
        let b = pillar_breakdown(&m);
        assert_eq!(b.dominant, Pillar::Environmental);
        assert_eq!(b.weakest, Pillar::Social);
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let m = PortfolioMetrics::from_means(600.0, 400.0, 400.0, 1400.0);
        let b = pillar_breakdown(&m);
        let total: f64 = b.slices.iter().map(|s| s.share_pct).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(b.slices.len(), 3);
    }

    #[test]
    fn contribution_extremes_prefer_first_in_table_order() {
        let a = company("Alpha", 100.0, 100.0, 100.0);
        let b = company("Bravo", 200.0, 200.0, 200.0);
        let c = company("Charlie", 300.0, 200.0, 100.0);
        let d = company("Delta", 50.0, 150.0, 100.0);
        let rows = vec![&a, &b, &c, &d];
        let out = company_contributions(&rows).unwrap();
        assert_eq!(out.top_company, "Bravo");
        assert_eq!(out.top_score, 600.0);
        assert_eq!(out.low_company, "Alpha");
        assert_eq!(out.low_score, 300.0);
        assert!(out.narrative[0].contains("Bravo with a total ESG score of 600.00"));
        assert!(out.narrative[2].contains("like Alpha"));
    }

    #[test]
    fn missing_pillar_counts_as_zero_in_company_sum() {
        let mut a = company("Alpha", 100.0, 100.0, 100.0);
        a.social_score = None;
        let rows = vec![&a];
        let out = company_contributions(&rows).unwrap();
        assert_eq!(out.top_score, 200.0);
        assert_eq!(out.top_company, out.low_company);
    }

    #[test]
    fn no_rows_no_contributions() {
        assert!(company_contributions(&[]).is_none());
    }
}
