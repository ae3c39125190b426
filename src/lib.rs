/*!
# dye-diary

dye-diary is a small notebook for hair dye sessions: which shades were mixed
in what ratio, how much developer went in, how long it processed and how it
turned out. Entries are kept oldest first in a single JSON document and shown
two to a spread, like the facing pages of a paper notebook.

## Architecture

- `diary_core`: the entry model, form coercion and the pagination state machine (no I/O)
- `storage`: the key-value backend (a JSON file per key, or memory for tests)
- `store`: the entry collection persisted under one storage key
- `app`: the controller tying one store to one pager
- `render`: plain-text output of spreads and entry lines
- `browse`: the interactive page-turning loop
- `cli`: command-line interface handling using clap
- `config`: configuration loading and validation
- `errors`: error handling infrastructure

## Usage Example

```rust,no_run
use chrono::Local;
use dye_diary::diary_core::{EntryDraft, FormulaDraft};
use dye_diary::render::render_spread;
use dye_diary::{Config, DiaryApp};

fn main() -> dye_diary::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;
    let mut app = DiaryApp::open(&config)?;

    let mut draft = EntryDraft::blank();
    draft.name = "Root touch-up".to_string();
    draft.formulas = vec![FormulaDraft::parse_spec("6N:1:30")?];
    app.submit_new(draft, Local::now().date_naive())?;

    print!("{}", render_spread(&app.spread()));
    Ok(())
}
```
*/

/// The controller owning the entry store and the pager
pub mod app;
/// Interactive browsing of the notebook
pub mod browse;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
pub mod constants;
/// Entry model, form coercion and pagination without I/O
pub mod diary_core;
/// Error types and utilities for error handling
pub mod errors;
pub mod render;
/// Key-value storage backends
pub mod storage;
/// The persisted entry collection
pub mod store;

// Re-export important types for convenience
pub use app::DiaryApp;
pub use cli::CliArgs;
pub use config::Config;
pub use diary_core::{Entry, EntryDraft, EntryId, Pager};
pub use errors::{AppError, AppResult};
pub use store::EntryStore;
