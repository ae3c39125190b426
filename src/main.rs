/*!
# dye-diary

Command-line notebook for hair dye formulas.

## Usage

```
dye-diary [OPTIONS] <COMMAND>

Commands:
  add     Record a new dye session
  edit    Change an existing entry; omitted fields keep their stored value
  delete  Delete an entry
  show    Print one notebook spread
  list    List all entries, oldest first
  browse  Leaf through the notebook interactively

Options:
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Log output format [possible values: text, json]
  -h, --help                     Print help
  -V, --version                  Print version
```

## Configuration

- `DYE_DIARY_DIR`: data directory (defaults to "~/.local/share/dye-diary")
- `DYE_DIARY_LANDING`: `last` (default) or `first`
- `DYE_DIARY_LOG_FORMAT`: `text` (default) or `json`
- `RUST_LOG`: log filter, overriding the default level
*/

use chrono::{Local, NaiveDate};
use clap::Parser;
use dye_diary::browse::run_browse;
use dye_diary::cli::{CliArgs, Command};
use dye_diary::config::{Config, LogFormat};
use dye_diary::constants::{
    DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME, VERBOSE_LOG_LEVEL,
};
use dye_diary::diary_core::{EntryDraft, EntryId};
use dye_diary::errors::{AppError, AppResult};
use dye_diary::render::{render_entry_line, render_spread};
use dye_diary::DiaryApp;
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Sets up the global tracing subscriber writing to stderr.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` is honoured with
/// info as the fallback.
fn init_logging(format: LogFormat, verbose: bool) -> AppResult<()> {
    let filter = if verbose {
        EnvFilter::try_new(VERBOSE_LOG_LEVEL)
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
    }
    .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
    };
    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}

fn main() -> ExitCode {
    // Obtain the current date once at the beginning
    let today = Local::now().date_naive();
    let args = CliArgs::parse();

    let config = Config::load();
    let log_format = match (&args.log_format, &config) {
        (Some(raw), _) => raw.parse().unwrap_or_default(),
        (None, Ok(config)) => config.log_format,
        (None, Err(_)) => LogFormat::default(),
    };
    if let Err(e) = init_logging(log_format, args.verbose) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let correlation_id = Uuid::new_v4();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    match config.and_then(|config| run(args.command, &config, today)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config, today: NaiveDate) -> AppResult<()> {
    config.validate()?;
    debug!(?config, "Loaded configuration");
    let mut app = DiaryApp::open(config)?;

    match command {
        Command::Add { name, fields } => {
            let mut draft = EntryDraft::blank();
            draft.name = name;
            fields.apply_to(&mut draft)?;
            let id = app.submit_new(draft, today)?;
            info!(%id, "Entry added");
            println!("Added entry {}", id);
        }
        Command::Edit { id, name, fields } => {
            let id = EntryId::from(id);
            let mut draft = match app.entry(&id) {
                Some(entry) => EntryDraft::from_entry(entry),
                None => return Err(AppError::NotFound(id.to_string())),
            };
            if let Some(name) = name {
                draft.name = name;
            }
            fields.apply_to(&mut draft)?;
            if !app.submit_edit(&id, draft, today)? {
                return Err(AppError::NotFound(id.to_string()));
            }
            println!("Updated entry {}", id);
        }
        Command::Delete { id } => {
            let id = EntryId::from(id);
            if !app.delete(&id)? {
                return Err(AppError::NotFound(id.to_string()));
            }
            println!("Deleted entry {}", id);
        }
        Command::Show { page } => {
            if let Some(page) = page {
                app.jump_to_page(page.saturating_sub(1));
            }
            print!("{}", render_spread(&app.spread()));
        }
        Command::List => {
            if app.entries().is_empty() {
                println!("No entries yet.");
            }
            for entry in app.entries() {
                println!("{}", render_entry_line(entry));
            }
        }
        Command::Browse => {
            run_browse(&mut app, io::stdin().lock(), io::stdout().lock())?;
        }
    }
    Ok(())
}
