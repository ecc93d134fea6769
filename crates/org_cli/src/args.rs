// crates/org_cli/src/args.rs
//
// Argument surface for `orgchart`.
// - Input: --store <json> or --csv <file>; neither means the built-in seed.
// - Edits (rename/archive/restore/delete/import-csv/seed) write back to --store.
// - Paths must be local (no scheme://).

use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use org_core::{Grade, NodeId};
use org_pipeline::{BusinessUnitFilter, Source};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "orgchart",
    version,
    disable_help_subcommand = true,
    about = "Offline org-structure analysis: reporting chart, data health, health score"
)]
pub struct Args {
    /// Role store (JSON, v4 or an older shape).
    #[arg(long, global = true, conflicts_with = "csv")]
    pub store: Option<PathBuf>,

    /// Read roles from a CSV export instead of a store.
    #[arg(long, global = true)]
    pub csv: Option<PathBuf>,

    /// Use the seed catalogue when the store is missing, empty, or unreadable.
    #[arg(long, global = true)]
    pub seed_if_missing: bool,

    /// Only warnings and errors on stderr.
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Stats, data health and health score for the active roles.
    Analyze(AnalyzeArgs),
    /// Reporting chart (roots, unlinked roles, cycle breaks).
    Tree(TreeArgs),
    /// Search roles by free text and grade.
    Search(SearchArgs),
    /// Export the active roles as CSV.
    ExportCsv(ExportArgs),
    /// Replace the store's roles with a CSV import.
    ImportCsv(ImportArgs),
    /// Write the seed catalogue to --store.
    Seed(SeedArgs),
    /// Rename a role; references to the old title are cleared.
    Rename(RenameArgs),
    /// Archive a role; references to its title are cleared.
    Archive(IdArg),
    /// Un-archive a role.
    Restore(IdArg),
    /// Delete a role permanently; references to its title are cleared.
    Delete(IdArg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct ScopeArgs {
    /// Business unit (e.g. GL, Rail) or ALL.
    #[arg(long, default_value = "ALL")]
    pub bu: String,
}

impl ScopeArgs {
    pub fn filter(&self) -> BusinessUnitFilter {
        self.bu.parse().unwrap_or_default()
    }
}

#[derive(Debug, ClapArgs, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
    /// HealthParams JSON; omitted fields keep their defaults.
    #[arg(long)]
    pub params: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Write the report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Exit with code 3 when the score is below this value.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_below: Option<u8>,
    /// Fail unless the analyzed snapshot has this SHA-256 (64 hex chars).
    #[arg(long, value_parser = parse_digest)]
    pub expect_digest: Option<String>,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct TreeArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct SearchArgs {
    /// Case-insensitive text; empty matches everything.
    #[arg(default_value = "")]
    pub text: String,
    #[command(flatten)]
    pub scope: ScopeArgs,
    #[arg(long, value_parser = parse_grade)]
    pub grade: Option<Grade>,
    #[arg(long)]
    pub include_archived: bool,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct ImportArgs {
    /// CSV file to import.
    pub input: PathBuf,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct SeedArgs {
    /// Overwrite an existing store.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct RenameArgs {
    #[arg(value_parser = parse_id)]
    pub id: NodeId,
    pub title: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct IdArg {
    #[arg(value_parser = parse_id)]
    pub id: NodeId,
}

/// Argument-level failures that clap cannot express.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("path must be a local file (no scheme): {0}")]
    NonLocalPath(String),
    #[error("{0} requires --store")]
    StoreRequired(&'static str),
}

impl Args {
    /// Where roles are read from.
    pub fn source(&self) -> Source {
        match (&self.csv, &self.store) {
            (Some(csv), _) => Source::Csv(csv.clone()),
            (None, Some(store)) => Source::Store(store.clone()),
            (None, None) => Source::Seed,
        }
    }

    /// The store edits are written back to.
    pub fn require_store(&self, command: &'static str) -> Result<&Path, CliError> {
        self.store.as_deref().ok_or(CliError::StoreRequired(command))
    }

    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

pub fn parse_and_validate() -> Result<Args, clap::Error> {
    Args::try_parse()
}

/// Reject scheme-qualified paths on every path-like flag.
pub fn check_paths(args: &Args) -> Result<(), CliError> {
    let mut paths: Vec<&Path> = [args.store.as_deref(), args.csv.as_deref()].into_iter().flatten().collect();
    match &args.cmd {
        Command::Analyze(a) => paths.extend(a.params.as_deref().into_iter().chain(a.out.as_deref())),
        Command::Tree(t) => paths.extend(t.out.as_deref()),
        Command::ExportCsv(e) => paths.extend(e.out.as_deref()),
        Command::ImportCsv(i) => paths.push(&i.input),
        _ => {}
    }
    for p in paths {
        ensure_local_path(p)?;
    }
    Ok(())
}

#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

fn parse_id(s: &str) -> Result<NodeId, String> {
    s.parse().map_err(|e: org_core::CoreError| e.to_string())
}

fn parse_grade(s: &str) -> Result<Grade, String> {
    s.trim().to_ascii_uppercase().parse().map_err(|e: org_core::CoreError| e.to_string())
}

fn parse_digest(s: &str) -> Result<String, String> {
    let s = s.trim().to_ascii_lowercase();
    if s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(s)
    } else {
        Err("expected 64 hex characters".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(argv)
    }

    #[test]
    fn source_precedence() {
        let a = parse(&["orgchart", "analyze"]).unwrap();
        assert_eq!(a.source(), Source::Seed);
        let a = parse(&["orgchart", "--csv", "roles.csv", "tree"]).unwrap();
        assert_eq!(a.source(), Source::Csv("roles.csv".into()));
        let a = parse(&["orgchart", "analyze", "--store", "org.json"]).unwrap();
        assert_eq!(a.source(), Source::Store("org.json".into()));
        assert!(parse(&["orgchart", "--store", "a.json", "--csv", "b.csv", "tree"]).is_err());
    }

    #[test]
    fn analyze_flags() {
        let a = parse(&["orgchart", "analyze", "--bu", "Rail", "--format", "json", "--fail-below", "70"]).unwrap();
        let Command::Analyze(an) = a.cmd else { panic!("expected analyze") };
        assert_eq!(an.scope.filter(), BusinessUnitFilter::Unit("Rail".into()));
        assert_eq!(an.format, Format::Json);
        assert_eq!(an.fail_below, Some(70));
        assert!(parse(&["orgchart", "analyze", "--fail-below", "101"]).is_err());
        assert!(parse(&["orgchart", "analyze", "--expect-digest", "abc"]).is_err());
    }

    #[test]
    fn ids_and_grades_validated() {
        assert!(parse(&["orgchart", "rename", " ", "X"]).is_err());
        let a = parse(&["orgchart", "search", "lead", "--grade", "g3"]).unwrap();
        let Command::Search(s) = a.cmd else { panic!("expected search") };
        assert_eq!(s.grade, Some(Grade::G3));
    }

    #[test]
    fn schemes_rejected() {
        let a = parse(&["orgchart", "--store", "https://x/org.json", "analyze"]).unwrap();
        assert!(matches!(check_paths(&a), Err(CliError::NonLocalPath(_))));
        assert_eq!(a.log_level(), "info");
    }
}
