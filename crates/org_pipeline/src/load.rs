//! Resolve a node source (store file, CSV file, or the built-in seed) into
//! a collection, and write collections back as store documents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use org_core::seed::seed_nodes;
use org_core::OrgNode;
use org_io::csv::import_csv_text;
use org_io::store::{load_store, save_store, StoreData};
use org_io::IoError;

use crate::clock::Clock;
use crate::PipelineError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Store(PathBuf),
    Csv(PathBuf),
    Seed,
}

/// Load a collection. With `seed_if_missing`, a store that does not exist,
/// holds no roles, or is in no recognised shape yields the seed catalogue
/// instead of an error.
pub fn load_nodes(source: &Source, clock: &dyn Clock, seed_if_missing: bool) -> Result<Vec<OrgNode>, PipelineError> {
    let now = clock.now_rfc3339();
    match source {
        Source::Seed => Ok(seed_nodes(&now)),
        Source::Store(path) => match load_store(path, &now) {
            Ok(store) if !store.nodes().is_empty() => {
                info!(path = %path.display(), roles = store.nodes().len(), "loaded store");
                Ok(store.into_nodes())
            }
            Ok(_) if seed_if_missing => {
                warn!(path = %path.display(), "store holds no roles; using seed");
                Ok(seed_nodes(&now))
            }
            Ok(_) => Err(PipelineError::Empty(path.display().to_string())),
            Err(IoError::Path(_)) if seed_if_missing && !path.exists() => {
                info!(path = %path.display(), "no store yet; using seed");
                Ok(seed_nodes(&now))
            }
            Err(IoError::Migration(msg)) if seed_if_missing => {
                warn!(path = %path.display(), %msg, "unrecognised store; using seed");
                Ok(seed_nodes(&now))
            }
            Err(e) => Err(e.into()),
        },
        Source::Csv(path) => {
            let text = read_text(path)?;
            let nodes = import_csv_text(&text, &now)?;
            info!(path = %path.display(), roles = nodes.len(), "imported CSV");
            Ok(nodes)
        }
    }
}

/// Write `nodes` as a v4 store document.
pub fn save_nodes(path: &Path, nodes: &[OrgNode], now: &str) -> Result<(), PipelineError> {
    save_store(path, &StoreData::new(nodes.to_vec(), now))?;
    info!(path = %path.display(), roles = nodes.len(), "saved store");
    Ok(())
}

fn read_text(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))
}
