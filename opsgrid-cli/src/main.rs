mod error;
mod paths;
mod table;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::Parser;
use opsgrid::{Dataset, Grid, GridConfig, PaginationMode};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::{CliError, Result};

/// Render a `{columns, data}` dataset as a text grid.
#[derive(Parser, Debug)]
#[command(name = "opsgrid", about = "Render a dataset as a text grid")]
struct Args {
    /// Dataset JSON (`{"columns": [...], "data": [...]}`).
    #[arg(long)]
    data: PathBuf,

    /// Grid config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page to show (0-based).
    #[arg(long, default_value_t = 0)]
    page: usize,

    /// Toggle the sort on a column (repeat to cycle asc → desc → none).
    #[arg(long = "sort", value_name = "COLUMN")]
    sort: Vec<String>,

    /// Collapse a row (repeatable).
    #[arg(long = "collapse", value_name = "ROW")]
    collapse: Vec<String>,

    /// Apply the config's default pin set.
    #[arg(long)]
    pin: bool,

    /// Check a row (repeatable).
    #[arg(long = "check", value_name = "ROW")]
    check: Vec<String>,

    /// Report a measured header width, `<column>=<width>` (repeatable).
    #[arg(long = "measure", value_name = "COLUMN=WIDTH")]
    measure: Vec<String>,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<GridConfig> {
    let Some(path) = path else {
        return Ok(GridConfig::default());
    };
    GridConfig::from_json(&read(path)?).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_measure(value: &str) -> Result<(&str, f32)> {
    let (column, width) = value
        .split_once('=')
        .ok_or_else(|| CliError::Measure(value.to_string()))?;
    let width = width
        .trim()
        .parse()
        .map_err(|_| CliError::Measure(value.to_string()))?;
    Ok((column.trim(), width))
}

fn run(args: Args) -> Result<()> {
    let (dataset, warnings) = Dataset::from_json(&read(&args.data)?)?;
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }

    let mut config = load_config(args.config.as_deref())?;
    if let (PaginationMode::Server { .. }, Some(total_count)) =
        (config.pagination, dataset.total_count)
    {
        config.pagination = PaginationMode::Server { total_count };
    }
    if !args.check.is_empty() {
        config.checkable = true;
    }
    log::debug!("[cli] {:?}", config);

    let grid = Grid::new(config);
    // First render resolves the columns the handlers check against.
    grid.render(&dataset.columns, &dataset.rows);

    for value in &args.measure {
        let (column, width) = parse_measure(value)?;
        grid.report_width(column, width);
    }
    grid.measure_now();

    if args.pin {
        grid.set_pinning(true);
    }
    for id in &args.collapse {
        if grid.toggle_expand(id).is_none() {
            eprintln!("warning: --collapse {id} ignored");
        }
    }
    for key in &args.sort {
        if grid.toggle_sort(key).is_none() {
            eprintln!("warning: column '{key}' is not sortable");
        }
    }
    for id in &args.check {
        grid.toggle_check(id);
    }
    grid.set_page(args.page);

    let frame = grid.render(&dataset.columns, &dataset.rows);
    print!("{}", table::render_text(&frame));

    let checked = grid.checked_ids();
    if !checked.is_empty() {
        println!("checked: {}", checked.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let log_path = paths::log_file();
    let log_file = File::create(&log_path).expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let args = Args::parse();
    log::info!("[cli] rendering {}", args.data.display());

    if let Err(e) = run(args) {
        log::error!("[cli] {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
