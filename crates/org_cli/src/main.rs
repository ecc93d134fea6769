// crates/org_cli/src/main.rs
//
// `orgchart`: load → (edit | analyze | chart | export) → write.
// Exit codes: 0 ok, 2 usage/validation, 3 score below --fail-below, 4 I/O.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const BELOW_THRESHOLD: u8 = 3;
    pub const IO: u8 = 4;
}

use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::process::ExitCode;

use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate, AnalyzeArgs, Args, CliError, Command, Format, SearchArgs, SeedArgs, TreeArgs};
use org_algo::build_forest;
use org_core::seed::seed_nodes;
use org_core::{HealthParams, OrgNode};
use org_io::canonical_json::write_atomic;
use org_io::csv::{import_csv_text, to_csv};
use org_pipeline::{
    active_nodes, analyze_scoped, load_nodes, save_nodes, search, Clock, DirectoryError, NodeQuery, OrgDirectory,
    PipelineError, Source, SystemClock,
};
use org_report::{build_model, render_forest_text, render_text, ForestView, ReportModel};

#[derive(Debug, Error)]
enum MainError {
    #[error("{0}")]
    Validation(String),
    #[error("health score {score} is below {min}")]
    BelowThreshold { score: u8, min: u8 },
    #[error("{0}")]
    Io(String),
}

impl MainError {
    fn exit_code(&self) -> u8 {
        match self {
            MainError::Validation(_) => exitcodes::VALIDATION,
            MainError::BelowThreshold { .. } => exitcodes::BELOW_THRESHOLD,
            MainError::Io(_) => exitcodes::IO,
        }
    }
}

impl From<PipelineError> for MainError {
    fn from(e: PipelineError) -> Self {
        if e.is_validation() {
            MainError::Validation(e.to_string())
        } else {
            MainError::Io(e.to_string())
        }
    }
}

impl From<DirectoryError> for MainError {
    fn from(e: DirectoryError) -> Self {
        MainError::Validation(e.to_string())
    }
}

impl From<CliError> for MainError {
    fn from(e: CliError) -> Self {
        MainError::Validation(e.to_string())
    }
}

impl From<org_io::IoError> for MainError {
    fn from(e: org_io::IoError) -> Self {
        PipelineError::from(e).into()
    }
}

fn main() -> ExitCode {
    let args = match parse_and_validate() {
        Ok(a) => a,
        Err(e) => {
            // --help / --version also arrive here, on stdout.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { exitcodes::VALIDATION } else { exitcodes::OK });
        }
    };
    init_tracing(&args);

    match run(&args) {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            eprintln!("orgchart: error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// `RUST_LOG` wins; otherwise --quiet / --verbose pick the level.
fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), MainError> {
    args::check_paths(args)?;
    let clock = SystemClock;

    match &args.cmd {
        Command::Analyze(a) => run_analyze(args, a, &clock),
        Command::Tree(t) => run_tree(args, t, &clock),
        Command::Search(s) => run_search(args, s, &clock),
        Command::ExportCsv(e) => {
            let nodes = load(args, &clock)?;
            let active = active_nodes(&nodes, &e.scope.filter());
            info!(roles = active.len(), "export CSV");
            emit(e.out.as_deref(), &to_csv(&active))
        }
        Command::ImportCsv(i) => {
            let store = args.require_store("import-csv")?;
            let text = fs::read_to_string(&i.input)
                .map_err(|e| MainError::Io(format!("{}: {e}", i.input.display())))?;
            let now = clock.now_rfc3339();
            let imported = import_csv_text(&text, &now)?;
            let mut dir = OrgDirectory::new(Vec::new());
            dir.replace_all(imported);
            save_nodes(store, dir.nodes(), &now)?;
            Ok(())
        }
        Command::Seed(s) => run_seed(args, s, &clock),
        Command::Rename(r) => edit(args, "rename", &clock, |d| d.rename(&r.id, &r.title)),
        Command::Archive(a) => edit(args, "archive", &clock, |d| d.archive(&a.id)),
        Command::Restore(a) => edit(args, "restore", &clock, |d| d.restore(&a.id)),
        Command::Delete(a) => edit(args, "delete", &clock, |d| d.delete_hard(&a.id).map(|_| ())),
    }
}

fn load(args: &Args, clock: &dyn Clock) -> Result<Vec<OrgNode>, MainError> {
    let source = args.source();
    debug!(?source, "loading roles");
    Ok(load_nodes(&source, clock, args.seed_if_missing)?)
}

fn load_params(path: Option<&Path>) -> Result<HealthParams, MainError> {
    let Some(path) = path else {
        return Ok(HealthParams::default());
    };
    let text = fs::read_to_string(path).map_err(|e| MainError::Io(format!("{}: {e}", path.display())))?;
    let params: HealthParams = serde_json::from_str(&text)
        .map_err(|e| MainError::Validation(format!("params {}: {e}", path.display())))?;
    params
        .validate()
        .map_err(|e| MainError::Validation(format!("params {}: {e}", path.display())))?;
    Ok(params)
}

fn run_analyze(args: &Args, a: &AnalyzeArgs, clock: &dyn Clock) -> Result<(), MainError> {
    let params = load_params(a.params.as_deref())?;
    let nodes = load(args, clock)?;
    let analysis = analyze_scoped(&nodes, &a.scope.filter(), &params)?;

    if let Some(expected) = &a.expect_digest {
        if *expected != analysis.snapshot_sha256 {
            return Err(MainError::Validation(format!(
                "snapshot digest mismatch: expected {expected}, got {}",
                analysis.snapshot_sha256
            )));
        }
    }

    let model = build_model(&analysis, &params, &clock.now_rfc3339());
    let rendered = match a.format {
        Format::Text => render_text(&model),
        Format::Json => report_json(&model)?,
    };
    emit(a.out.as_deref(), &rendered)?;

    match a.fail_below {
        Some(min) if analysis.score < min => {
            warn!(score = analysis.score, min, "health score below threshold");
            Err(MainError::BelowThreshold { score: analysis.score, min })
        }
        _ => Ok(()),
    }
}

fn run_tree(args: &Args, t: &TreeArgs, clock: &dyn Clock) -> Result<(), MainError> {
    let nodes = load(args, clock)?;
    let forest = build_forest(&active_nodes(&nodes, &t.scope.filter()));
    if !forest.cycle_breaks.is_empty() {
        warn!(count = forest.cycle_breaks.len(), "reporting cycles broken");
    }
    let rendered = match t.format {
        Format::Text => render_forest_text(&forest),
        Format::Json => forest_json(&ForestView::from(&forest))?,
    };
    emit(t.out.as_deref(), &rendered)
}

fn run_search(args: &Args, s: &SearchArgs, clock: &dyn Clock) -> Result<(), MainError> {
    let nodes = load(args, clock)?;
    let query = NodeQuery {
        text: s.text.clone(),
        grade: s.grade,
        unit: s.scope.filter(),
        include_archived: s.include_archived,
    };
    let mut out = String::new();
    for n in search(&nodes, &query) {
        let who = if n.is_vacant() { "(vacant)" } else { n.incumbent_name.trim() };
        let flag = if n.archived { "\tarchived" } else { "" };
        out.push_str(&format!("{}\t{}\t{}\t{}\t{}{}\n", n.id, n.grade, n.title, n.bu_name, who, flag));
    }
    emit(None, &out)
}

fn run_seed(args: &Args, s: &SeedArgs, clock: &dyn Clock) -> Result<(), MainError> {
    let store = args.require_store("seed")?;
    if store.exists() && !s.force {
        return Err(MainError::Validation(format!("{} exists (use --force to overwrite)", store.display())));
    }
    let now = clock.now_rfc3339();
    save_nodes(store, &seed_nodes(&now), &now)?;
    Ok(())
}

/// Load the store, apply one directory edit, write the store back.
fn edit<F>(args: &Args, command: &'static str, clock: &dyn Clock, op: F) -> Result<(), MainError>
where
    F: FnOnce(&mut OrgDirectory) -> Result<(), DirectoryError>,
{
    let store = args.require_store(command)?;
    let nodes = load_nodes(&Source::Store(store.to_path_buf()), clock, args.seed_if_missing)?;
    let mut dir = OrgDirectory::new(nodes);
    op(&mut dir)?;
    if let Some(entry) = dir.activity().latest() {
        info!(action = %entry.action, detail = %entry.detail, "applied");
    }
    save_nodes(store, dir.nodes(), &clock.now_rfc3339())?;
    Ok(())
}

fn emit(out: Option<&Path>, text: &str) -> Result<(), MainError> {
    match out {
        Some(path) => {
            write_atomic(path, text.as_bytes())?;
            info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| MainError::Io(format!("stdout: {e}")))
        }
    }
}

fn report_json(model: &ReportModel) -> Result<String, MainError> {
    #[cfg(feature = "report-json")]
    {
        org_report::render_json(model).map_err(|e| MainError::Io(e.to_string()))
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = model;
        Err(MainError::Validation("json output not enabled (build with feature `report-json`)".into()))
    }
}

fn forest_json(view: &ForestView) -> Result<String, MainError> {
    #[cfg(feature = "report-json")]
    {
        org_report::render_forest_json(view).map_err(|e| MainError::Io(e.to_string()))
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = view;
        Err(MainError::Validation("json output not enabled (build with feature `report-json`)".into()))
    }
}
