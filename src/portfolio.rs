use crate::companies::CompanyRecord;
use crate::config::ALL_INDUSTRIES;
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Result of applying the industry filter to the full table.
#[derive(Debug, Clone)]
pub struct FilteredCatalog<'a> {
    /// "All" followed by every distinct industry in first-seen order
    pub industries: Vec<String>,
    /// Rows matching the filter, in table order
    pub rows: Vec<&'a CompanyRecord>,
    /// Distinct names of the matching rows (selectable options)
    pub options: Vec<String>,
    /// Names of the first N matching rows
    pub default_selection: Vec<String>,
}

/// The user's choice for one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioSelection {
    pub industry: String,
    pub companies: Vec<String>,
}

/// Row of the "Explore Companies" table.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow {
    pub name: String,
    pub exchange: String,
    pub environment_grade: String,
    pub social_grade: String,
    pub governance_grade: String,
    pub environment_score: Option<f64>,
    pub social_score: Option<f64>,
    pub governance_score: Option<f64>,
    pub total_score: Option<f64>,
}

/// Row of the "Your Selected Portfolio" table.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioRow {
    pub name: String,
    pub industry: String,
    pub environment_grade: String,
    pub social_grade: String,
    pub governance_grade: String,
    pub total_grade: String,
    pub currency: String,
}

/// Distinct industries in first-seen order, preceded by "All".
pub fn industry_options(companies: &[CompanyRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut industries = vec![ALL_INDUSTRIES.to_string()];
    for company in companies {
        if seen.insert(company.industry.as_str()) {
            industries.push(company.industry.clone());
        }
    }
    industries
}

fn matches_industry(company: &CompanyRecord, industry: &str) -> bool {
    industry == ALL_INDUSTRIES || company.industry == industry
}

/// Apply the industry filter and compute the default pre-selection of
/// `portfolio_size` companies. An industry with no rows yields empty lists.
pub fn filter_by_industry<'a>(
    companies: &'a [CompanyRecord],
    industry: &str,
    portfolio_size: usize,
) -> FilteredCatalog<'a> {
    let rows: Vec<&CompanyRecord> = companies
        .iter()
        .filter(|c| matches_industry(c, industry))
        .collect();

    let mut options: Vec<String> = Vec::new();
    for c in &rows {
        if !options.contains(&c.name) {
            options.push(c.name.clone());
        }
    }

    let default_selection = rows
        .iter()
        .take(portfolio_size)
        .map(|c| c.name.clone())
        .collect();

    FilteredCatalog {
        industries: industry_options(companies),
        rows,
        options,
        default_selection,
    }
}

impl<'a> FilteredCatalog<'a> {
    /// Build the selection for this interaction. `requested` of `None` means
    /// the user kept the default pre-selection. Names outside the filtered
    /// set are dropped so the selection stays a subset of the options.
    pub fn select(&self, industry: &str, requested: Option<&[String]>) -> PortfolioSelection {
        let companies = match requested {
            None => self.default_selection.clone(),
            Some(names) => {
                let mut chosen: Vec<String> = Vec::with_capacity(names.len());
                for name in names {
                    if !self.options.iter().any(|o| o == name) {
                        warn!(
                            "[SELECT] '{}' is not offered under industry '{}' - ignoring",
                            name, industry
                        );
                    } else if !chosen.contains(name) {
                        chosen.push(name.clone());
                    }
                }
                chosen
            }
        };
        PortfolioSelection {
            industry: industry.to_string(),
            companies,
        }
    }

    /// Filtered rows whose name is selected, in table order.
    pub fn portfolio_rows(&self, selection: &PortfolioSelection) -> Vec<&'a CompanyRecord> {
        self.rows
            .iter()
            .copied()
            .filter(|c| selection.companies.iter().any(|n| n == &c.name))
            .collect()
    }
}

impl From<&CompanyRecord> for CatalogRow {
    fn from(c: &CompanyRecord) -> Self {
        CatalogRow {
            name: c.name.clone(),
            exchange: c.exchange.clone(),
            environment_grade: c.environment_grade.clone(),
            social_grade: c.social_grade.clone(),
            governance_grade: c.governance_grade.clone(),
            environment_score: c.environment_score,
            social_score: c.social_score,
            governance_score: c.governance_score,
            total_score: c.total_score,
        }
    }
}

impl From<&CompanyRecord> for PortfolioRow {
    fn from(c: &CompanyRecord) -> Self {
        PortfolioRow {
            name: c.name.clone(),
            industry: c.industry.clone(),
            environment_grade: c.environment_grade.clone(),
            social_grade: c.social_grade.clone(),
            governance_grade: c.governance_grade.clone(),
            total_grade: c.total_grade.clone(),
            currency: c.currency.clone(),
        }
    }
}
