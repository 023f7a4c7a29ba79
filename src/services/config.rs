use crate::domain::constants::*;
use crate::domain::errors::ScoringError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weight of each governance indicator in the governance score.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorWeights {
    pub digital_procurement: f64,
    pub open_contracting: f64,
    pub ai_policy: f64,
    pub vendor_transparency: f64,
}

impl Default for IndicatorWeights {
    fn default() -> Self {
        Self {
            digital_procurement: 0.30,
            open_contracting: 0.25,
            ai_policy: 0.20,
            vendor_transparency: 0.25,
        }
    }
}

impl IndicatorWeights {
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            (DIGITAL_PROCUREMENT, self.digital_procurement),
            (OPEN_CONTRACTING, self.open_contracting),
            (AI_POLICY, self.ai_policy),
            (VENDOR_TRANSPARENCY, self.vendor_transparency),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, w) in self.entries() {
            if !w.is_finite() || w < 0.0 {
                return Err(ScoringError::Config(format!(
                    "weight for {} must be a non-negative number, got {}",
                    name, w
                )));
            }
        }
        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringError::Config(format!(
                "indicator weights must sum to 1.0, got {}",
                total
            )));
        }
        Ok(())
    }
}

/// Bonus points and sector sets used by the readiness score.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReadinessRules {
    pub governance_bonus: u32,
    pub ai_index_bonus: u32,
    pub sector_bonus: u32,
    /// The AI bonus applies strictly above this value.
    pub ai_index_threshold: f64,
    /// Used for rows with no AI procurement index.
    pub default_ai_index: f64,
    /// One opportunity row is emitted per merged row for each of these.
    pub scored_sectors: Vec<String>,
    /// Sectors that earn the sector bonus.
    pub procurement_sectors: Vec<String>,
}

impl Default for ReadinessRules {
    fn default() -> Self {
        Self {
            governance_bonus: 30,
            ai_index_bonus: 40,
            sector_bonus: 20,
            ai_index_threshold: 0.7,
            default_ai_index: 0.5,
            scored_sectors: vec![AVIATION.to_string(), TOURISM_HOSPITALITY.to_string()],
            procurement_sectors: vec![
                AVIATION.to_string(),
                TOURISM.to_string(),
                TOURISM_HOSPITALITY.to_string(),
            ],
        }
    }
}

impl ReadinessRules {
    pub fn is_procurement_sector(&self, sector: &str) -> bool {
        self.procurement_sectors.iter().any(|s| s == sector)
    }
}

fn default_sector_scores() -> BTreeMap<String, f64> {
    [
        (AVIATION, 0.85),
        (TOURISM_HOSPITALITY, 0.75),
        ("Health", 0.90),
        ("Education", 0.80),
        ("Agriculture", 0.65),
        ("Finance", 0.88),
        ("Public Services", 0.70),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Immutable scoring configuration, built once per process.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub weights: IndicatorWeights,
    /// Replaces the built-in table entirely when present.
    pub sectors: BTreeMap<String, f64>,
    pub default_sector_score: f64,
    pub readiness: ReadinessRules,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: IndicatorWeights::default(),
            sectors: default_sector_scores(),
            default_sector_score: 0.50,
            readiness: ReadinessRules::default(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.weights.validate()?;
        for (sector, score) in &self.sectors {
            if !score.is_finite() || *score < 0.0 {
                return Err(ScoringError::Config(format!(
                    "sector score for {} must be a non-negative number, got {}",
                    sector, score
                )));
            }
        }
        if !self.default_sector_score.is_finite() || self.default_sector_score < 0.0 {
            return Err(ScoringError::Config(
                "default_sector_score must be a non-negative number".to_string(),
            ));
        }
        let r = &self.readiness;
        if !r.ai_index_threshold.is_finite() || !r.default_ai_index.is_finite() {
            return Err(ScoringError::Config(
                "ai_index_threshold and default_ai_index must be finite".to_string(),
            ));
        }
        let max = r
            .governance_bonus
            .checked_add(r.ai_index_bonus)
            .and_then(|v| v.checked_add(r.sector_bonus));
        if max.is_none() {
            return Err(ScoringError::Config(
                "readiness bonuses overflow when combined".to_string(),
            ));
        }
        if r.scored_sectors.is_empty() {
            return Err(ScoringError::Config(
                "readiness.scored_sectors must name at least one sector".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_toml(raw: &str) -> Result<Self, ScoringError> {
        let cfg: ScoringConfig =
            toml::from_str(raw).map_err(|e| ScoringError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// `--config` wins; otherwise `<data-dir>/scoring.toml` when present;
/// otherwise the built-in defaults.
pub fn load_config(data_dir: &Path, explicit: Option<&Path>) -> anyhow::Result<ScoringConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(ScoringError::Config(format!(
                    "config file not found: {}",
                    p.display()
                ))
                .into());
            }
            p.to_path_buf()
        }
        None => {
            let p = data_dir.join(CONFIG_FILE_NAME);
            if !p.exists() {
                tracing::debug!("no scoring config found, using defaults");
                return Ok(ScoringConfig::default());
            }
            p
        }
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| ScoringError::Config(format!("{}: {}", path.display(), e)))?;
    let cfg = ScoringConfig::from_toml(&raw)?;
    tracing::info!(path = %path.display(), "scoring config loaded");
    Ok(cfg)
}
