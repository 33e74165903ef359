use crate::error::{CliError, FileContext, Result};
use crate::ui;
use report::{load_reports, render_report, JsonDatabase, ReportConfig};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub reports: PathBuf,
    pub database: PathBuf,
    pub output: PathBuf,
    pub name: String,
    pub config: Option<PathBuf>,
    pub archive: bool,
    pub verbose: bool,
}

fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::InputNotFound(path.to_path_buf()))
    }
}

pub fn execute(args: RenderArgs) -> Result<()> {
    require_file(&args.reports)?;
    require_file(&args.database)?;

    let config = match &args.config {
        Some(path) => ReportConfig::load_from_file(path).for_file("load configuration", path)?,
        None => ReportConfig::default(),
    };

    ui::stage("Loading test reports");
    let reports = load_reports(&args.reports).for_file("load", &args.reports)?;
    if reports.is_empty() {
        ui::empty_run();
    }

    ui::stage("Loading results database");
    let db = JsonDatabase::load_from_file(&args.database).for_file("load", &args.database)?;
    tracing::debug!(
        tests = reports.len(),
        histories = db.len(),
        output = %args.output.display(),
        "rendering"
    );
    ui::run_summary(&reports, db.len(), args.verbose);

    ui::stage("Rendering dashboard");
    let written = render_report(&args.output, &args.name, &reports, &db, config, args.archive)
        .for_file("render report into", &args.output)?;

    for page in &written {
        ui::page_written(page);
    }
    Ok(())
}
