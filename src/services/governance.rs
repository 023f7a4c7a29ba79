use crate::domain::errors::ScoringError;
use crate::domain::models::IndicatorFlags;
use crate::services::config::{IndicatorWeights, ScoringConfig};
use std::collections::BTreeMap;

/// Scores governance indicator flags and sectors against fixed tables.
///
/// The tables are validated once in [`GovernanceScorer::new`]; scoring calls
/// are pure and never fail.
#[derive(Debug, Clone)]
pub struct GovernanceScorer {
    weights: IndicatorWeights,
    sectors: BTreeMap<String, f64>,
    default_sector_score: f64,
}

impl GovernanceScorer {
    pub fn new(
        weights: IndicatorWeights,
        sectors: BTreeMap<String, f64>,
        default_sector_score: f64,
    ) -> Result<Self, ScoringError> {
        weights.validate()?;
        Ok(Self {
            weights,
            sectors,
            default_sector_score,
        })
    }

    pub fn from_config(cfg: &ScoringConfig) -> Result<Self, ScoringError> {
        Self::new(
            cfg.weights.clone(),
            cfg.sectors.clone(),
            cfg.default_sector_score,
        )
    }

    /// Sum of the weights of known indicators that are present and true.
    pub fn governance_score(&self, flags: &IndicatorFlags) -> f64 {
        self.weights
            .entries()
            .iter()
            .filter(|(name, _)| flags.get(*name).copied().unwrap_or(false))
            .map(|(_, w)| w)
            .sum()
    }

    pub fn sector_score(&self, sector: &str) -> f64 {
        self.sectors
            .get(sector)
            .copied()
            .unwrap_or(self.default_sector_score)
    }

    /// `sector_score * governance_score * country_modifier`, rounded to three
    /// decimals. The modifier is not clamped.
    pub fn ai_procurement_index(
        &self,
        sector: &str,
        flags: &IndicatorFlags,
        country_modifier: f64,
    ) -> f64 {
        round3(self.sector_score(sector) * self.governance_score(flags) * country_modifier)
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constants::*;

    fn scorer() -> GovernanceScorer {
        GovernanceScorer::from_config(&ScoringConfig::default()).unwrap()
    }

    fn flags(pairs: &[(&str, bool)]) -> IndicatorFlags {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_flags_score_zero() {
        assert_eq!(scorer().governance_score(&IndicatorFlags::new()), 0.0);
    }

    #[test]
    fn all_flags_score_one() {
        let all = flags(&[
            (DIGITAL_PROCUREMENT, true),
            (OPEN_CONTRACTING, true),
            (AI_POLICY, true),
            (VENDOR_TRANSPARENCY, true),
        ]);
        assert!((scorer().governance_score(&all) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_and_false_flags_contribute_nothing() {
        let f = flags(&[
            (DIGITAL_PROCUREMENT, true),
            (AI_POLICY, false),
            ("blockchain_registry", true),
        ]);
        assert!((scorer().governance_score(&f) - 0.30).abs() < 1e-12);
    }

    #[test]
    fn governance_score_stays_in_unit_range() {
        let s = scorer();
        let names = [DIGITAL_PROCUREMENT, OPEN_CONTRACTING, AI_POLICY, VENDOR_TRANSPARENCY];
        for mask in 0u8..16 {
            let f: IndicatorFlags = names
                .iter()
                .enumerate()
                .map(|(i, n)| (n.to_string(), mask & (1 << i) != 0))
                .collect();
            let g = s.governance_score(&f);
            assert!((0.0..=1.0 + 1e-12).contains(&g), "mask {mask} gave {g}");
        }
    }

    #[test]
    fn sector_lookup_and_fallback() {
        let s = scorer();
        assert_eq!(s.sector_score(AVIATION), 0.85);
        assert_eq!(s.sector_score(TOURISM_HOSPITALITY), 0.75);
        assert_eq!(s.sector_score("Finance"), 0.88);
        assert_eq!(s.sector_score("Unknown Sector"), 0.50);
    }

    #[test]
    fn aviation_index_without_ai_policy() {
        let f = flags(&[
            (DIGITAL_PROCUREMENT, true),
            (OPEN_CONTRACTING, true),
            (AI_POLICY, false),
            (VENDOR_TRANSPARENCY, true),
        ]);
        assert_eq!(scorer().ai_procurement_index(AVIATION, &f, 1.0), 0.68);
    }

    #[test]
    fn modifier_scales_without_clamping() {
        let f = flags(&[
            (DIGITAL_PROCUREMENT, true),
            (OPEN_CONTRACTING, true),
            (AI_POLICY, true),
            (VENDOR_TRANSPARENCY, true),
        ]);
        assert_eq!(scorer().ai_procurement_index("Health", &f, 2.5), 2.25);
    }

    #[test]
    fn invalid_weights_fail_at_construction() {
        let weights = IndicatorWeights {
            ai_policy: 0.9,
            ..IndicatorWeights::default()
        };
        assert!(GovernanceScorer::new(weights, BTreeMap::new(), 0.5).is_err());
    }
}
