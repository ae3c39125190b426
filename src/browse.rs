//! Interactive notebook browsing.
//!
//! Reads one command per line, applies it to the [`DiaryApp`] and redraws the
//! current spread. While a page turn is in flight the loop ticks the pager
//! until it settles, so rapid `n n n` input turns one page per command at most.

use crate::app::DiaryApp;
use crate::constants::BROWSE_TICK_MS;
use crate::diary_core::{EntryId, PagerEffect, Photo, PhotoSlot};
use crate::errors::{AppError, AppResult};
use crate::render::render_spread;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  n, next                          turn to the next page
  p, prev                          turn to the previous page
  d <id>                           delete an entry
  attach <id> before|after|photo <file>
                                   attach a photo for this session
  s, show                          redraw the current spread
  h, help                          show this help
  q, quit                          leave the notebook";

#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Next,
    Previous,
    Delete(EntryId),
    Attach {
        id: EntryId,
        slot: PhotoSlot,
        path: PathBuf,
    },
    Show,
    Help,
    Quit,
}

impl BrowseCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        match command {
            "n" | "next" => Ok(BrowseCommand::Next),
            "p" | "prev" | "previous" => Ok(BrowseCommand::Previous),
            "s" | "show" | "" => Ok(BrowseCommand::Show),
            "h" | "help" | "?" => Ok(BrowseCommand::Help),
            "q" | "quit" | "exit" => Ok(BrowseCommand::Quit),
            "d" | "delete" => match words.next() {
                Some(id) => Ok(BrowseCommand::Delete(EntryId::from(id))),
                None => Err("Usage: d <id>".to_string()),
            },
            "attach" => {
                let usage = "Usage: attach <id> before|after|photo <file>";
                let id = words.next().ok_or(usage)?;
                let slot = words
                    .next()
                    .ok_or(usage)?
                    .parse::<PhotoSlot>()?;
                let rest: Vec<&str> = words.collect();
                if rest.is_empty() {
                    return Err(usage.to_string());
                }
                Ok(BrowseCommand::Attach {
                    id: EntryId::from(id),
                    slot,
                    path: PathBuf::from(rest.join(" ")),
                })
            }
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

/// Runs the browse loop until `q` or end of input.
///
/// # Errors
///
/// Returns an error only if writing to `output` or reading `input` fails.
/// Failures of individual commands are reported inline and browsing goes on.
pub fn run_browse<R: BufRead, W: Write>(
    app: &mut DiaryApp,
    input: R,
    mut output: W,
) -> AppResult<()> {
    write!(output, "{}", render_spread(&app.spread()))?;
    prompt(&mut output)?;

    for line in input.lines() {
        let line = line?;
        let command = match BrowseCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{}", message)?;
                prompt(&mut output)?;
                continue;
            }
        };
        debug!(?command, "browse command");
        let forward = command == BrowseCommand::Next;

        match command {
            BrowseCommand::Quit => return Ok(()),
            BrowseCommand::Help => writeln!(output, "{}", HELP)?,
            BrowseCommand::Show => write!(output, "{}", render_spread(&app.spread()))?,
            BrowseCommand::Next | BrowseCommand::Previous => {
                let effects = if forward {
                    app.next_page()
                } else {
                    app.previous_page()
                };
                if effects.is_empty() {
                    writeln!(output, "No more pages in that direction.")?;
                } else {
                    settle(app);
                    write!(output, "{}", render_spread(&app.spread()))?;
                }
            }
            BrowseCommand::Delete(id) => match app.delete(&id) {
                Ok(true) => write!(output, "{}", render_spread(&app.spread()))?,
                Ok(false) => writeln!(output, "{}", AppError::NotFound(id.to_string()))?,
                Err(e) => report(&mut output, &e)?,
            },
            BrowseCommand::Attach { id, slot, path } => match attach(app, &id, slot, &path) {
                Ok(true) => write!(output, "{}", render_spread(&app.spread()))?,
                Ok(false) => writeln!(output, "{}", AppError::NotFound(id.to_string()))?,
                Err(e) => report(&mut output, &e)?,
            },
        }
        prompt(&mut output)?;
    }
    Ok(())
}

fn attach(app: &mut DiaryApp, id: &EntryId, slot: PhotoSlot, path: &Path) -> AppResult<bool> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    app.upload_photo(id, slot, Photo::new(file_name, bytes))
}

/// Ticks the pager until the current transition has settled.
fn settle(app: &mut DiaryApp) {
    let interval = Duration::from_millis(BROWSE_TICK_MS);
    while app.is_transitioning() {
        let effects = app.tick();
        if effects.contains(&PagerEffect::Settled) {
            break;
        }
        thread::sleep(interval);
    }
}

fn report<W: Write>(output: &mut W, error: &AppError) -> AppResult<()> {
    warn!(error = %error, "browse command failed");
    writeln!(output, "Error: {}", error)?;
    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> AppResult<()> {
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diary_core::{
        EntryDraft, FormulaDraft, LandingPolicy, ManualClock, PageTiming, Pager, PagerConfig,
    };
    use crate::storage::MemoryStorage;
    use crate::store::EntryStore;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn app(names: &[&str]) -> (DiaryApp, Vec<EntryId>) {
        let pager = Pager::new(
            PagerConfig {
                timing: PageTiming::instant(),
                landing: LandingPolicy::First,
            },
            Box::new(ManualClock::new()),
        );
        let mut app = DiaryApp::new(EntryStore::new(Box::new(MemoryStorage::new())), pager);
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let ids = names
            .iter()
            .map(|name| {
                let draft = EntryDraft {
                    name: name.to_string(),
                    formulas: vec![FormulaDraft::parse_spec("5A:1:40").unwrap()],
                    ..EntryDraft::blank()
                };
                app.submit_new(draft, today).unwrap()
            })
            .collect();
        (app, ids)
    }

    fn run(app: &mut DiaryApp, script: &str) -> String {
        let mut out = Vec::new();
        run_browse(app, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(BrowseCommand::parse("n"), Ok(BrowseCommand::Next));
        assert_eq!(BrowseCommand::parse("  prev "), Ok(BrowseCommand::Previous));
        assert_eq!(
            BrowseCommand::parse("d abc"),
            Ok(BrowseCommand::Delete(EntryId::from("abc")))
        );
        assert_eq!(
            BrowseCommand::parse("attach abc after my photo.jpg"),
            Ok(BrowseCommand::Attach {
                id: EntryId::from("abc"),
                slot: PhotoSlot::After,
                path: PathBuf::from("my photo.jpg"),
            })
        );
        assert!(BrowseCommand::parse("d").is_err());
        assert!(BrowseCommand::parse("attach abc sideways x.jpg").is_err());
        assert!(BrowseCommand::parse("attach abc before").is_err());
        assert!(BrowseCommand::parse("dance").is_err());
    }

    #[test]
    fn test_browse_turns_pages() {
        let (mut app, _) = app(&["one", "two", "three"]);
        let out = run(&mut app, "n\nn\np\nq\n");

        assert_eq!(app.pager().current_page(), 0);
        assert!(out.contains("three"));
        assert!(out.contains("No more pages in that direction."));
        assert!(!app.is_transitioning());
    }

    #[test]
    fn test_browse_delete_and_unknown() {
        let (mut app, ids) = app(&["one", "two"]);
        let out = run(&mut app, &format!("d {}\nd ghost\nbogus\n", ids[0]));

        assert_eq!(app.entries().len(), 1);
        assert!(out.contains("No entry with id 'ghost'"));
        assert!(out.contains("Unknown command 'bogus'"));
    }

    #[test]
    fn test_browse_attach_photo() {
        let dir = tempdir().unwrap();
        let photo = dir.path().join("after.jpg");
        fs::write(&photo, [0xffu8, 0xd8]).unwrap();

        let (mut app, ids) = app(&["one"]);
        let script = format!(
            "attach {} after {}\nattach {} before {}\n",
            ids[0],
            photo.display(),
            ids[0],
            dir.path().join("missing.jpg").display()
        );
        let out = run(&mut app, &script);

        let entry = app.entry(&ids[0]).unwrap();
        assert_eq!(entry.photo(PhotoSlot::After).unwrap().bytes.len(), 2);
        assert!(entry.photo(PhotoSlot::Before).is_none());
        assert!(out.contains("After: after.jpg"));
        assert!(out.contains("Error:"));
    }
}
