//! org_core — Core types, grade domain, work-mix normalization, params, and
//! integer-first rounding for the org-structure engine.
//!
//! This crate is **I/O-free**. It defines the stable types shared by the
//! rest of the workspace (`org_algo`, `org_io`, `org_pipeline`,
//! `org_report`, `org_cli`).
//!
//! - Identifiers: `NodeId`
//! - Grade domain: `Grade` (G7 highest … G1 lowest), levels, locations
//! - Role record: `OrgNode`, `Reporting`, `WorkMix`
//! - Analysis knobs: `HealthParams`
//! - Integer-first one-decimal values: `OneDecimal`
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod determinism;
pub mod errors;
pub mod grade;
pub mod ids;
pub mod mix;
pub mod node;
pub mod params;
pub mod rounding;
pub mod seed;

pub use errors::CoreError;
pub use grade::Grade;
pub use ids::NodeId;
pub use mix::{default_mix_for_grade, normalize_mix, PartialWorkMix, WorkMix};
pub use node::{OrgNode, Reporting};
pub use params::HealthParams;
pub use rounding::OneDecimal;
