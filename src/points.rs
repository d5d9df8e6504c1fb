use crate::config::{PILLAR_IMPROVEMENT_BONUS, TOTAL_IMPROVEMENT_BONUS};
use crate::error::Result;
use crate::metrics::PortfolioMetrics;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Mean scores of the previous interaction in this session.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreHistory {
    #[serde(with = "nan_as_null", default)]
    pub environment: f64,
    #[serde(with = "nan_as_null", default)]
    pub social: f64,
    #[serde(with = "nan_as_null", default)]
    pub governance: f64,
    #[serde(with = "nan_as_null", default)]
    pub total: f64,
}

// JSON has no NaN; a mean over missing values is stored as null.
mod nan_as_null {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f64, s: S) -> std::result::Result<S::Ok, S::Error> {
        if value.is_nan() {
            s.serialize_none()
        } else {
            s.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
    }
}

impl ScoreHistory {
    pub fn from_metrics(metrics: &PortfolioMetrics) -> Self {
        ScoreHistory {
            environment: metrics.avg_environment,
            social: metrics.avg_social,
            governance: metrics.avg_governance,
            total: metrics.avg_total,
        }
    }
}

/// One improvement award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusAward {
    pub reason: &'static str,
    pub coins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct BonusSummary {
    pub awards: Vec<BonusAward>,
    pub total: u32,
}

/// Compare this interaction's means with the previous ones and return the
/// bonus together with the snapshot to carry into the next interaction.
///
/// Only strict increases earn coins. The returned snapshot always holds the
/// current means, so a drop is never penalized and an unchanged portfolio
/// earns nothing the next time.
pub fn award_improvements(
    previous: &ScoreHistory,
    metrics: &PortfolioMetrics,
) -> (BonusSummary, ScoreHistory) {
    let current = ScoreHistory::from_metrics(metrics);
    let checks = [
        (current.environment > previous.environment, "🌱 Environmental Score Improved", PILLAR_IMPROVEMENT_BONUS),
        (current.social > previous.social, "🤝 Social Score Improved", PILLAR_IMPROVEMENT_BONUS),
        (current.governance > previous.governance, "🏛️ Governance Score Improved", PILLAR_IMPROVEMENT_BONUS),
        (current.total > previous.total, "✨ Total Impact Score Improved", TOTAL_IMPROVEMENT_BONUS),
    ];

    let awards: Vec<BonusAward> = checks
        .into_iter()
        .filter(|(improved, _, _)| *improved)
        .map(|(_, reason, coins)| BonusAward { reason, coins })
        .collect();
    let total: u32 = awards.iter().map(|a| a.coins).sum();

    debug!("[SESSION] {} improvement bonus(es), {} coins", awards.len(), total);
    (BonusSummary { awards, total }, current)
}

/// Score history persisted between CLI invocations.
#[derive(Debug)]
pub struct SessionStore {
    pub history: ScoreHistory,
    path: PathBuf,
}

impl SessionStore {
    /// Load the store from `path`. If missing or invalid, starts from zero.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let history = match fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<ScoreHistory>(&s) {
                Ok(history) => history,
                Err(e) => {
                    warn!(
                        "[SESSION] Could not parse session file '{}': {} - starting fresh",
                        path.display(),
                        e
                    );
                    ScoreHistory::default()
                }
            },
            Err(_) => {
                debug!("[SESSION] No session file at '{}' - starting fresh", path.display());
                ScoreHistory::default()
            }
        };
        SessionStore { history, path }
    }

    /// A store at `path` that ignores whatever was saved there.
    pub fn fresh(path: impl AsRef<Path>) -> Self {
        SessionStore {
            history: ScoreHistory::default(),
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the store to disk.
    pub fn save(&self) -> Result<()> {
        let body = serde_json::to_string_pretty(&self.history)?;
        let mut f = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        f.write_all(body.as_bytes())?;
        info!("[SESSION] Saved scores to '{}'", self.path.display());
        Ok(())
    }
}
