//! Company dataset loading and logo resolution
//!
//! This module handles:
//! - Reading the ESG ratings table from a local CSV file or an http(s) URL
//! - Tolerating blank or non-numeric score cells (treated as missing values)
//! - Resolving each company's logo to a remote URL, a local path or the placeholder

use crate::error::{EngineError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Columns every dataset must provide. `logo` is optional.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "name",
    "exchange",
    "industry",
    "environment_grade",
    "social_grade",
    "governance_grade",
    "environment_score",
    "social_score",
    "governance_score",
    "total_score",
    "total_grade",
    "currency",
];

static REMOTE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://\S+$").expect("static regex is valid")
});

/// One row of the ESG ratings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub exchange: String,
    pub industry: String,
    pub environment_grade: String,
    pub social_grade: String,
    pub governance_grade: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub environment_score: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub social_score: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub governance_score: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub total_score: Option<f64>,
    pub total_grade: String,
    pub currency: String,
    #[serde(default)]
    pub logo: Option<String>,
}

impl CompanyRecord {
    /// Sum of the three pillar scores, missing pillars counting as zero.
    pub fn pillar_sum(&self) -> f64 {
        [self.environment_score, self.social_score, self.governance_score]
            .into_iter()
            .map(|s| s.filter(|v| !v.is_nan()).unwrap_or(0.0))
            .sum()
    }

    /// Logo reference with surrounding whitespace removed, if any is set.
    pub fn logo_ref(&self) -> Option<&str> {
        self.logo
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Where a company's image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum LogoSource {
    Remote(String),
    Local(String),
    Placeholder(String),
}

/// Image payload for one portfolio company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyLogo {
    pub caption: String,
    pub image: LogoSource,
}

/// Resolve the image to display for `company`, substituting `placeholder`
/// when the logo field is blank or absent.
pub fn resolve_logo(company: &CompanyRecord, placeholder: &str) -> CompanyLogo {
    let image = match company.logo_ref() {
        Some(r) if REMOTE_REF.is_match(r) => LogoSource::Remote(r.to_string()),
        Some(r) => LogoSource::Local(r.to_string()),
        None => {
            warn!("[DATA] No logo for '{}' - using placeholder", company.name);
            LogoSource::Placeholder(placeholder.to_string())
        }
    };
    CompanyLogo {
        caption: company.name.clone(),
        image,
    }
}

/// Load the dataset from `source`, which may be a local path or an http(s) URL.
pub async fn load_companies(source: &str, timeout: Duration) -> Result<Vec<CompanyRecord>> {
    if REMOTE_REF.is_match(source) {
        let body = fetch_remote_dataset(source, timeout).await?;
        parse_companies(body.as_bytes(), source)
    } else {
        load_companies_from_path(Path::new(source))
    }
}

/// Load the dataset from a local CSV file.
pub fn load_companies_from_path(path: &Path) -> Result<Vec<CompanyRecord>> {
    let source_ref = path.display().to_string();
    let file = File::open(path).map_err(|e| EngineError::data_load(&source_ref, e))?;
    parse_companies(file, &source_ref)
}

async fn fetch_remote_dataset(url: &str, timeout: Duration) -> Result<String> {
    info!("[DATA] Fetching dataset from {}", url);
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let resp = client.get(url).send().await?;

    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(EngineError::data_load(
            url,
            format!("server responded with {}", status),
        ));
    }
    Ok(text)
}

/// Parse CSV rows from `reader`. `source_ref` only labels errors and logs.
pub fn parse_companies<R: Read>(reader: R, source_ref: &str) -> Result<Vec<CompanyRecord>> {
    // Short rows are allowed; a row may stop before the optional `logo` cell
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::data_load(
            source_ref,
            format!("missing required column(s): {}", missing.join(", ")),
        ));
    }

    let mut companies = Vec::new();
    for row in rdr.deserialize::<CompanyRecord>() {
        companies.push(row?);
    }

    let without_logo = companies.iter().filter(|c| c.logo_ref().is_none()).count();
    info!("[DATA] Loaded {} companies from {}", companies.len(), source_ref);
    if without_logo > 0 {
        debug!("[DATA] {} companies have no logo", without_logo);
    }
    Ok(companies)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,exchange,industry,environment_grade,social_grade,governance_grade,environment_score,social_score,governance_score,total_score,total_grade,currency,logo";

    fn parse(body: &str) -> Result<Vec<CompanyRecord>> {
        parse_companies(body.as_bytes(), "inline")
    }

    #[test]
    fn parses_rows_and_blank_logo() {
        let body = format!(
            "{}\nAcme,NYSE,Tech,A,BB,B,600,400,300,1300,BB,USD,\nBeta,NASDAQ,Energy,AA,A,A,500,450,350,1300,A,USD,https://cdn.example.com/beta.png\n",
            HEADER
        );
        let companies = parse(&body).unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].environment_score, Some(600.0));
        assert_eq!(companies[0].logo_ref(), None);
        assert_eq!(
            companies[1].logo_ref(),
            Some("https://cdn.example.com/beta.png")
        );
    }

    #[test]
    fn non_numeric_scores_become_missing() {
        let body = format!(
            "{}\nAcme,NYSE,Tech,A,BB,B,n/a,,300,1300,BB,USD,\n",
            HEADER
        );
        let companies = parse(&body).unwrap();
        assert_eq!(companies[0].environment_score, None);
        assert_eq!(companies[0].social_score, None);
        assert_eq!(companies[0].pillar_sum(), 300.0);
    }

    #[test]
    fn logo_column_is_optional() {
        let header = HEADER.trim_end_matches(",logo");
        let body = format!("{}\nAcme,NYSE,Tech,A,BB,B,600,400,300,1300,BB,USD\n", header);
        let companies = parse(&body).unwrap();
        assert!(companies[0].logo.is_none());
    }

    #[test]
    fn row_without_trailing_logo_cell_uses_placeholder() {
        let body = format!(
            "{}\nAcme,NYSE,Tech,A,BB,B,600,400,300,1300,BB,USD,logos/acme.png\nBeta,NYSE,Tech,A,BB,B,500,400,300,1200,BB,USD\n",
            HEADER
        );
        let companies = parse(&body).unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[1].total_score, Some(1200.0));
        assert!(companies[1].logo.is_none());
        assert_eq!(
            resolve_logo(&companies[1], "placeholder.png").image,
            LogoSource::Placeholder("placeholder.png".into())
        );
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let body = "name,exchange\nAcme,NYSE\n";
        match parse(body) {
            Err(EngineError::DataLoad { reason, .. }) => {
                assert!(reason.contains("industry"));
                assert!(reason.contains("total_score"));
            }
            other => panic!("expected DataLoad, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_companies_from_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, EngineError::DataLoad { .. }));
    }

    #[test]
    fn logo_resolution() {
        let body = format!(
            "{}\nA,X,T,A,A,A,1,1,1,3,A,USD,  \nB,X,T,A,A,A,1,1,1,3,A,USD,HTTPS://img.example.org/b.svg\nC,X,T,A,A,A,1,1,1,3,A,USD,logos/c.png\n",
            HEADER
        );
        let companies = parse(&body).unwrap();
        let logos: Vec<_> = companies
            .iter()
            .map(|c| resolve_logo(c, "placeholder.png").image)
            .collect();
        assert_eq!(logos[0], LogoSource::Placeholder("placeholder.png".into()));
        assert_eq!(
            logos[1],
            LogoSource::Remote("HTTPS://img.example.org/b.svg".into())
        );
        assert_eq!(logos[2], LogoSource::Local("logos/c.png".into()));
    }
}
