//! Work-mix: four independent effort percentages per role.
//!
//! Each field is clamped to [0, 100] on its own; the four are a directional
//! indicator and are NOT required to sum to 100.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grade::Grade;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkMix {
    pub strategic: f64,
    pub tactical: f64,
    pub operational: f64,
    pub admin: f64,
}

/// Partially specified mix as it arrives from forms, CSV rows, or old stores.
/// `None` means "absent or not a number".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartialWorkMix {
    pub strategic: Option<f64>,
    pub tactical: Option<f64>,
    pub operational: Option<f64>,
    pub admin: Option<f64>,
}

impl WorkMix {
    pub const ZERO: WorkMix = WorkMix { strategic: 0.0, tactical: 0.0, operational: 0.0, admin: 0.0 };

    pub const fn new(strategic: f64, tactical: f64, operational: f64, admin: f64) -> Self {
        Self { strategic, tactical, operational, admin }
    }

    /// Re-clamp every field; identity on an already normalized mix.
    pub fn normalized(self) -> WorkMix {
        normalize_mix(Some(&PartialWorkMix::from(self)))
    }

    pub fn total(&self) -> f64 {
        self.strategic + self.tactical + self.operational + self.admin
    }
}

impl From<WorkMix> for PartialWorkMix {
    fn from(m: WorkMix) -> Self {
        Self {
            strategic: Some(m.strategic),
            tactical: Some(m.tactical),
            operational: Some(m.operational),
            admin: Some(m.admin),
        }
    }
}

/// NaN -> 0; everything else clamped into [0, 100].
#[inline]
pub fn clamp_pct(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 100.0) }
}

/// Complete a partial (or absent) mix: missing fields become 0, every field
/// lands in [0, 100]. Pure and idempotent.
pub fn normalize_mix(mix: Option<&PartialWorkMix>) -> WorkMix {
    let m = mix.copied().unwrap_or_default();
    WorkMix {
        strategic: clamp_pct(m.strategic.unwrap_or(0.0)),
        tactical: clamp_pct(m.tactical.unwrap_or(0.0)),
        operational: clamp_pct(m.operational.unwrap_or(0.0)),
        admin: clamp_pct(m.admin.unwrap_or(0.0)),
    }
}

pub fn default_mix_for_grade(grade: Grade) -> WorkMix {
    match grade {
        Grade::G7 => WorkMix::new(80.0, 15.0, 5.0, 0.0),
        Grade::G6 => WorkMix::new(65.0, 20.0, 10.0, 5.0),
        Grade::G5 => WorkMix::new(45.0, 30.0, 15.0, 10.0),
        Grade::G4 => WorkMix::new(30.0, 35.0, 25.0, 10.0),
        Grade::G3 => WorkMix::new(20.0, 30.0, 30.0, 20.0),
        Grade::G2 => WorkMix::new(15.0, 30.0, 40.0, 15.0),
        Grade::G1 => WorkMix::new(5.0, 20.0, 55.0, 20.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn absent_mix_is_all_zero() {
        assert_eq!(normalize_mix(None), WorkMix::ZERO);
    }

    #[test]
    fn clamps_each_field_independently() {
        let p = PartialWorkMix {
            strategic: Some(140.0),
            tactical: Some(-5.0),
            operational: Some(f64::NAN),
            admin: None,
        };
        assert_eq!(normalize_mix(Some(&p)), WorkMix::new(100.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn no_sum_constraint() {
        let m = WorkMix::new(90.0, 90.0, 90.0, 90.0).normalized();
        assert_eq!(m.total(), 360.0);
    }

    #[test]
    fn grade_defaults_are_already_normal() {
        for g in Grade::ALL {
            let m = default_mix_for_grade(g);
            assert_eq!(m.normalized(), m);
        }
    }

    fn any_component() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            Just(None),
            Just(Some(f64::NAN)),
            Just(Some(f64::INFINITY)),
            Just(Some(f64::NEG_INFINITY)),
            (-1.0e6f64..1.0e6).prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent_and_bounded(
            s in any_component(), t in any_component(), o in any_component(), a in any_component()
        ) {
            let p = PartialWorkMix { strategic: s, tactical: t, operational: o, admin: a };
            let once = normalize_mix(Some(&p));
            let twice = normalize_mix(Some(&PartialWorkMix::from(once)));
            prop_assert_eq!(once, twice);
            for v in [once.strategic, once.tactical, once.operational, once.admin] {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }
    }
}
