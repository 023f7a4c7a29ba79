use crate::domain::errors::ScoringError;
use crate::domain::models::{
    AiIndexRecord, GovernanceFlag, GovernanceRecord, MergedIndicators, OpportunityScore,
    TrafficRecord,
};
use crate::services::config::ReadinessRules;
use std::collections::BTreeMap;

type Key = (String, i32);

/// Typed input tables for one scoring run.
pub struct ScoringInputs {
    pub passenger: Vec<TrafficRecord>,
    pub cargo: Vec<TrafficRecord>,
    pub tourism: Vec<TrafficRecord>,
    pub ai_index: Option<Vec<AiIndexRecord>>,
}

#[derive(Debug, Clone)]
pub struct ScoringOutput {
    pub merged: Vec<MergedIndicators>,
    pub median_passenger_volume: Option<f64>,
    pub governance: Vec<GovernanceRecord>,
    pub opportunity: Vec<OpportunityScore>,
}

/// Fields `score_entry` looks at for one (row, sector) pair.
pub struct ScoreEntry<'a> {
    pub governance_flag: &'a str,
    pub ai_procurement_index: f64,
    pub sector: &'a str,
}

/// Additive readiness score: governance, AI index and sector bonuses.
pub fn score_entry(entry: &ScoreEntry<'_>, rules: &ReadinessRules) -> u32 {
    let mut score: u32 = 0;
    if GovernanceFlag::parse(entry.governance_flag) == Some(GovernanceFlag::High) {
        score = score.saturating_add(rules.governance_bonus);
    }
    if entry.ai_procurement_index > rules.ai_index_threshold {
        score = score.saturating_add(rules.ai_index_bonus);
    }
    if rules.is_procurement_sector(entry.sector) {
        score = score.saturating_add(rules.sector_bonus);
    }
    score
}

pub struct ScoringEngine<'a> {
    rules: &'a ReadinessRules,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(rules: &'a ReadinessRules) -> Self {
        Self { rules }
    }

    pub fn score(&self, inputs: &ScoringInputs) -> Result<ScoringOutput, ScoringError> {
        let merged = merge_indicators(&inputs.passenger, &inputs.cargo, &inputs.tourism)?;
        let (median, governance) = classify_governance(&merged);
        let ai_index = attach_ai_index(
            &merged,
            inputs.ai_index.as_deref(),
            self.rules.default_ai_index,
        )?;

        let mut opportunity =
            Vec::with_capacity(merged.len() * self.rules.scored_sectors.len());
        for ((row, flag), index) in merged.iter().zip(&governance).zip(&ai_index) {
            for sector in &self.rules.scored_sectors {
                let entry = ScoreEntry {
                    governance_flag: flag.governance_flag.as_str(),
                    ai_procurement_index: *index,
                    sector,
                };
                opportunity.push(OpportunityScore {
                    country: row.country.clone(),
                    year: row.year,
                    sector: sector.clone(),
                    procurement_readiness_score: score_entry(&entry, self.rules),
                });
            }
        }

        tracing::info!(
            merged = merged.len(),
            median = ?median,
            opportunity = opportunity.len(),
            "scoring complete"
        );
        Ok(ScoringOutput {
            merged,
            median_passenger_volume: median,
            governance,
            opportunity,
        })
    }
}

fn keyed(table: &str, rows: &[TrafficRecord]) -> Result<BTreeMap<Key, f64>, ScoringError> {
    let mut out = BTreeMap::new();
    for r in rows {
        if out.insert((r.country.clone(), r.year), r.value).is_some() {
            return Err(ScoringError::DuplicateKey {
                table: table.to_string(),
                country: r.country.clone(),
                year: r.year,
            });
        }
    }
    Ok(out)
}

/// Full outer join on (country, year). Absent volumes are zero-filled and
/// rows come out ordered by country, then year.
pub fn merge_indicators(
    passenger: &[TrafficRecord],
    cargo: &[TrafficRecord],
    tourism: &[TrafficRecord],
) -> Result<Vec<MergedIndicators>, ScoringError> {
    let passenger = keyed("passenger_flow", passenger)?;
    let cargo = keyed("cargo_flow", cargo)?;
    let tourism = keyed("tourism_inbound", tourism)?;

    let mut keys: Vec<&Key> = passenger
        .keys()
        .chain(cargo.keys())
        .chain(tourism.keys())
        .collect();
    keys.sort();
    keys.dedup();

    Ok(keys
        .into_iter()
        .map(|k| MergedIndicators {
            country: k.0.clone(),
            year: k.1,
            passenger_volume: passenger.get(k).copied().unwrap_or(0.0),
            cargo_tonnage: cargo.get(k).copied().unwrap_or(0.0),
            inbound_tourists: tourism.get(k).copied().unwrap_or(0.0),
        })
        .collect())
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// HIGH when passenger volume is strictly above the median of all merged
/// rows. The threshold moves with the dataset, so adding rows can flip
/// existing classifications.
pub fn classify_governance(merged: &[MergedIndicators]) -> (Option<f64>, Vec<GovernanceRecord>) {
    let volumes: Vec<f64> = merged.iter().map(|r| r.passenger_volume).collect();
    let Some(threshold) = median(&volumes) else {
        return (None, Vec::new());
    };
    let flags = merged
        .iter()
        .map(|r| GovernanceRecord {
            country: r.country.clone(),
            year: r.year,
            governance_flag: if r.passenger_volume > threshold {
                GovernanceFlag::High
            } else {
                GovernanceFlag::Low
            },
        })
        .collect();
    (Some(threshold), flags)
}

/// Left join of the AI index onto merged rows, one value per row.
pub fn attach_ai_index(
    merged: &[MergedIndicators],
    table: Option<&[AiIndexRecord]>,
    default: f64,
) -> Result<Vec<f64>, ScoringError> {
    let Some(table) = table else {
        return Ok(vec![default; merged.len()]);
    };
    let mut by_key = BTreeMap::new();
    for r in table {
        if by_key
            .insert((r.country.clone(), r.year), r.ai_procurement_index)
            .is_some()
        {
            return Err(ScoringError::DuplicateKey {
                table: "ai_procurement_index".to_string(),
                country: r.country.clone(),
                year: r.year,
            });
        }
    }
    Ok(merged
        .iter()
        .map(|m| {
            by_key
                .get(&(m.country.clone(), m.year))
                .copied()
                .unwrap_or(default)
        })
        .collect())
}
