//! org_pipeline — the owning layer around the pure analysis core.
//!
//! - `directory`: `OrgDirectory`, the single writer. Every mutation that can
//!   remove a title (rename, archive, hard delete, title patch) runs the
//!   reference sweep before it returns.
//! - `visibility` / `search`: business-unit scoping, active set, list views.
//! - `analyze`: scope → stats → data health → score, plus a snapshot digest.
//! - `load`: store / CSV / seed sources resolved into a node collection.
//!
//! Analysis itself is delegated to `org_algo`; file formats to `org_io`.

use thiserror::Error;

pub mod activity;
pub mod analyze;
pub mod clock;
pub mod directory;
pub mod load;
pub mod search;
pub mod visibility;

pub use activity::{ActivityEntry, ActivityLog, ACTIVITY_CAP};
pub use analyze::{analyze, analyze_scoped, Analysis};
pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{DirectoryError, OrgDirectory};
pub use load::{load_nodes, save_nodes, Source};
pub use search::{group_by_grade, search, NodeQuery};
pub use visibility::{active_nodes, BusinessUnitFilter, BUSINESS_UNITS};

/// Single error surface for orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] org_io::IoError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("invalid parameters: {0}")]
    Params(org_core::CoreError),

    #[error("empty collection: {0}")]
    Empty(String),
}

impl PipelineError {
    /// True for failures caused by the caller's input rather than the filesystem.
    pub fn is_validation(&self) -> bool {
        match self {
            PipelineError::Io(e) => !matches!(e, org_io::IoError::Path(_)),
            PipelineError::Directory(_) | PipelineError::Params(_) | PipelineError::Empty(_) => true,
        }
    }
}
