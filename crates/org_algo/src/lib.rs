// crates/org_algo/src/lib.rs
//! Pure analysis over an immutable snapshot of role records.
//!
//! Two independent pipelines read the same collection:
//! - chart: `resolve` → `forest` (roots, orphans, cycle breaks)
//! - analytics: `metrics` → `health` → `score`
//!
//! Nothing here mutates its input except `sweep`, the reference-maintenance
//! step the owning collection must run on every rename / archive / delete.
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod forest;
pub mod health;
pub mod metrics;
pub mod resolve;
pub mod score;
pub mod sweep;

// Tight, explicit re-exports (pipeline imports these from crate root).
pub use forest::{build_forest, Forest, TreeNode};
pub use health::{compute_data_health, compute_data_health_with, DataHealth, HeavyManager, OrphanRef};
pub use metrics::{compute_stats, Stats};
pub use resolve::{Resolution, TitleIndex};
pub use score::{
    compute_health_score, compute_health_score_with, score_breakdown, HealthBand, Penalty,
    PenaltyKind, ScoreBreakdown,
};
pub use sweep::sweep_title_references;
