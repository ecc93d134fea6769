//! Analysis knobs for data health and scoring, with safe defaults.
//!
//! Defaults reproduce the reference scoring exactly:
//! vacancy > 10 % costs 1.2 pt per point over; span outside 3..=10 costs 10;
//! leadership > 20 % costs 10; duplicates / orphans / self-reports cost
//! 8 / 8 / 6. Managers with >= 10 direct reports are flagged as heavy.
//!
//! Percent thresholds are whole percents; the vacancy weight is in tenths
//! (12 == 1.2). Everything stays integer so the scorer can work in
//! hundredths of a point.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct HealthParams {
    pub heavy_manager_threshold: u32,
    pub span_min: u32,
    pub span_max: u32,
    pub leadership_max_pct: u8,
    pub vacancy_threshold_pct: u8,
    pub vacancy_weight_tenths: u32,
    pub span_penalty: u32,
    pub leadership_penalty: u32,
    pub duplicate_penalty: u32,
    pub orphan_penalty: u32,
    pub self_report_penalty: u32,
}

impl Default for HealthParams {
    fn default() -> Self {
        Self {
            heavy_manager_threshold: 10,
            span_min: 3,
            span_max: 10,
            leadership_max_pct: 20,
            vacancy_threshold_pct: 10,
            vacancy_weight_tenths: 12,
            span_penalty: 10,
            leadership_penalty: 10,
            duplicate_penalty: 8,
            orphan_penalty: 8,
            self_report_penalty: 6,
        }
    }
}

impl HealthParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.heavy_manager_threshold == 0 {
            return Err(CoreError::DomainOutOfRange("heavy_manager_threshold"));
        }
        if self.span_min > self.span_max {
            return Err(CoreError::DomainOutOfRange("span_min > span_max"));
        }
        if self.leadership_max_pct > 100 {
            return Err(CoreError::DomainOutOfRange("leadership_max_pct"));
        }
        if self.vacancy_threshold_pct > 100 {
            return Err(CoreError::DomainOutOfRange("vacancy_threshold_pct"));
        }
        let flat = [
            ("span_penalty", self.span_penalty),
            ("leadership_penalty", self.leadership_penalty),
            ("duplicate_penalty", self.duplicate_penalty),
            ("orphan_penalty", self.orphan_penalty),
            ("self_report_penalty", self.self_report_penalty),
        ];
        for (name, v) in flat {
            if v > 100 {
                return Err(CoreError::DomainOutOfRange(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(HealthParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_span_band() {
        let p = HealthParams { span_min: 12, ..HealthParams::default() };
        assert_eq!(p.validate(), Err(CoreError::DomainOutOfRange("span_min > span_max")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let p: HealthParams = serde_json::from_str(r#"{"heavy_manager_threshold": 6}"#).unwrap();
        assert_eq!(p.heavy_manager_threshold, 6);
        assert_eq!(p.span_max, 10);
        assert!(serde_json::from_str::<HealthParams>(r#"{"bogus": 1}"#).is_err());
    }
}
