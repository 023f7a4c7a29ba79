use crate::domain::constants::*;
use crate::domain::models::{
    GovernanceFlag, GovernanceRecord, ScoreView, SectorReadiness, SummaryReport, TrafficRecord,
};
use crate::services::storage;
use crate::table::TableKind;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// `None` and `All` select every country; anything else is an exact match.
pub fn country_matches(filter: Option<&str>, country: &str) -> bool {
    match filter {
        None => true,
        Some(f) if f == ALL_COUNTRIES => true,
        Some(f) => f == country,
    }
}

pub fn filter_governance(rows: Vec<GovernanceRecord>, country: Option<&str>) -> Vec<GovernanceRecord> {
    rows.into_iter()
        .filter(|r| country_matches(country, &r.country))
        .collect()
}

pub fn filter_scores(
    rows: Vec<ScoreView>,
    country: Option<&str>,
    sector: Option<&str>,
) -> Vec<ScoreView> {
    rows.into_iter()
        .filter(|r| country_matches(country, &r.country))
        .filter(|r| sector.map_or(true, |s| s == r.sector))
        .collect()
}

fn total(rows: &[TrafficRecord], country: Option<&str>) -> u64 {
    let sum: f64 = rows
        .iter()
        .filter(|r| country_matches(country, &r.country))
        .map(|r| r.value)
        .sum();
    sum.trunc() as u64
}

/// Mean score per sector, sectors in name order.
pub fn sector_readiness(scores: &[ScoreView]) -> Vec<SectorReadiness> {
    let mut acc: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for s in scores {
        let e = acc.entry(s.sector.as_str()).or_insert((0, 0.0));
        e.0 += 1;
        e.1 += s.procurement_readiness_score;
    }
    acc.into_iter()
        .map(|(sector, (rows, sum))| SectorReadiness {
            sector: sector.to_string(),
            rows,
            mean_score: sum / rows as f64,
        })
        .collect()
}

pub struct SummaryInputs {
    pub passenger: Vec<TrafficRecord>,
    pub cargo: Vec<TrafficRecord>,
    pub tourism: Vec<TrafficRecord>,
    pub governance: Vec<GovernanceRecord>,
    pub scores: Vec<ScoreView>,
}

impl SummaryInputs {
    /// Reads every table through the non-failing accessors.
    pub fn read(data_dir: &Path) -> Self {
        Self {
            passenger: storage::read_traffic(data_dir, TableKind::PassengerFlow),
            cargo: storage::read_traffic(data_dir, TableKind::CargoFlow),
            tourism: storage::read_traffic(data_dir, TableKind::TourismInbound),
            governance: storage::read_governance_flags(data_dir),
            scores: storage::read_opportunity_scores(data_dir),
        }
    }
}

pub fn summarize(inputs: SummaryInputs, country: Option<&str>) -> SummaryReport {
    let countries: BTreeSet<String> = inputs
        .passenger
        .iter()
        .chain(&inputs.cargo)
        .map(|r| r.country.clone())
        .chain(inputs.governance.iter().map(|r| r.country.clone()))
        .chain(inputs.scores.iter().map(|r| r.country.clone()))
        .filter(|c| !c.is_empty())
        .collect();

    let governance = filter_governance(inputs.governance, country);
    let high_count = governance
        .iter()
        .filter(|g| g.governance_flag == GovernanceFlag::High)
        .count();
    let scores = filter_scores(inputs.scores, country, None);

    SummaryReport {
        country: country.unwrap_or(ALL_COUNTRIES).to_string(),
        countries: countries.into_iter().collect(),
        total_passengers: total(&inputs.passenger, country),
        total_cargo: total(&inputs.cargo, country),
        total_inbound_tourists: total(&inputs.tourism, country),
        high_count,
        low_count: governance.len() - high_count,
        sector_readiness: sector_readiness(&scores),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn traffic(rows: &[(&str, f64)]) -> Vec<TrafficRecord> {
        rows.iter()
            .map(|(c, v)| TrafficRecord {
                country: c.to_string(),
                year: 2023,
                value: *v,
            })
            .collect()
    }

    fn score(country: &str, sector: &str, v: f64) -> ScoreView {
        ScoreView {
            country: country.to_string(),
            year: 2023,
            sector: sector.to_string(),
            procurement_readiness_score: v,
        }
    }

    fn inputs() -> SummaryInputs {
        SummaryInputs {
            passenger: traffic(&[("Kenya", 100.7), ("Ghana", 50.6)]),
            cargo: traffic(&[("Egypt", 3.0)]),
            tourism: traffic(&[("Kenya", 9.0), ("Rwanda", 1.0)]),
            governance: vec![
                GovernanceRecord {
                    country: "Kenya".into(),
                    year: 2023,
                    governance_flag: GovernanceFlag::High,
                },
                GovernanceRecord {
                    country: "Ghana".into(),
                    year: 2023,
                    governance_flag: GovernanceFlag::Low,
                },
            ],
            scores: vec![
                score("Kenya", AVIATION, 90.0),
                score("Ghana", AVIATION, 20.0),
                score("Kenya", TOURISM_HOSPITALITY, 50.0),
            ],
        }
    }

    #[test]
    fn all_countries_summary() {
        let s = summarize(inputs(), Some(ALL_COUNTRIES));
        assert_eq!(s.country, "All");
        assert_eq!(s.total_passengers, 151);
        assert_eq!(s.total_cargo, 3);
        assert_eq!(s.total_inbound_tourists, 10);
        assert_eq!((s.high_count, s.low_count), (1, 1));
        // tourism-only countries are not listed
        assert_eq!(s.countries, vec!["Egypt", "Ghana", "Kenya"]);
        assert_eq!(s.sector_readiness[0].sector, AVIATION);
        assert_eq!(s.sector_readiness[0].mean_score, 55.0);
        assert_eq!(s.sector_readiness[1].rows, 1);
    }

    #[test]
    fn country_filter_narrows_metrics() {
        let s = summarize(inputs(), Some("Kenya"));
        assert_eq!(s.total_passengers, 100);
        assert_eq!(s.total_cargo, 0);
        assert_eq!((s.high_count, s.low_count), (1, 0));
        assert_eq!(s.sector_readiness[0].mean_score, 90.0);
        assert_eq!(s.countries.len(), 3);
    }

    #[test]
    fn empty_data_dir_summarizes_to_zero() {
        let dir = TempDir::new().unwrap();
        let s = summarize(SummaryInputs::read(dir.path()), None);
        assert_eq!(s.total_passengers, 0);
        assert!(s.countries.is_empty());
        assert!(s.sector_readiness.is_empty());
    }

    #[test]
    fn legacy_scores_feed_sector_means() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(OPPORTUNITY_OUTPUT_FILE),
            "country,year,aviation_score,tourism_score,combined_opportunity_score\nKenya,2023,70,40,55\n",
        )
        .unwrap();
        let s = summarize(SummaryInputs::read(dir.path()), None);
        assert_eq!(s.countries, vec!["Kenya"]);
        assert_eq!(s.sector_readiness.len(), 2);
        assert_eq!(s.sector_readiness[1].sector, TOURISM_HOSPITALITY);
        assert_eq!(s.sector_readiness[1].mean_score, 40.0);
    }

    #[test]
    fn sector_filter_is_exact() {
        let rows = vec![score("Kenya", AVIATION, 1.0), score("Kenya", TOURISM_HOSPITALITY, 2.0)];
        let out = filter_scores(rows, None, Some(AVIATION));
        assert_eq!(out.len(), 1);
    }
}
