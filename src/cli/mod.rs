use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::diary_core::{EntryDraft, FormulaDraft};
use crate::errors::EntryError;
use clap::{Args, Parser, Subcommand};

/// A notebook for hair dye formulas and how they turned out
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format (overrides DYE_DIARY_LOG_FORMAT)
    #[arg(long, global = true, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Record a new dye session
    Add {
        /// Label for the session, e.g. "Spring refresh"
        #[arg(short = 'n', long)]
        name: String,

        #[command(flatten)]
        fields: EntryFields,
    },
    /// Change an existing entry; omitted fields keep their stored value
    Edit {
        /// Id of the entry, as shown by `list`
        id: String,

        #[arg(short = 'n', long)]
        name: Option<String>,

        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an entry
    Delete {
        /// Id of the entry, as shown by `list`
        id: String,
    },
    /// Print one notebook spread
    Show {
        /// Page to show, starting at 1 (defaults to the landing page)
        #[arg(short = 'p', long)]
        page: Option<usize>,
    },
    /// List all entries, oldest first
    List,
    /// Leaf through the notebook interactively
    Browse,
}

/// Form fields shared by `add` and `edit`.
#[derive(Args, Debug, Default, PartialEq)]
pub struct EntryFields {
    /// Session date (format: YYYY-MM-DD or YYYYMMDD, defaults to today)
    #[arg(short = 'd', long)]
    pub date: Option<String>,

    /// Formula line as SHADE:PARTS:GRAMS; repeat for several lines
    #[arg(short = 'f', long = "formula", value_name = "SHADE:PARTS:GRAMS")]
    pub formulas: Vec<String>,

    /// Developer weight in grams
    #[arg(long, value_name = "GRAMS")]
    pub developer: Option<String>,

    /// Processing time in minutes
    #[arg(short = 't', long = "time", value_name = "MINUTES")]
    pub processing_time: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl EntryFields {
    /// Overwrites the draft fields that were given on the command line.
    ///
    /// Formula lines replace the draft's rows as a whole.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::InvalidFormula` if a formula line is not
    /// `SHADE:PARTS:GRAMS`.
    pub fn apply_to(&self, draft: &mut EntryDraft) -> Result<(), EntryError> {
        if let Some(date) = &self.date {
            draft.date = date.clone();
        }
        if !self.formulas.is_empty() {
            draft.formulas = self
                .formulas
                .iter()
                .map(|spec| FormulaDraft::parse_spec(spec))
                .collect::<Result<_, _>>()?;
        }
        if let Some(developer) = &self.developer {
            draft.developer = developer.clone();
        }
        if let Some(time) = &self.processing_time {
            draft.processing_time = time.clone();
        }
        if let Some(notes) = &self.notes {
            draft.notes = notes.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_args() {
        let args = CliArgs::parse_from([
            "dye-diary",
            "add",
            "--name",
            "Spring refresh",
            "-f",
            "6N:1:30",
            "--formula",
            "7G:2:15.5",
            "--developer",
            "45",
            "-t",
            "35",
        ]);
        assert!(!args.verbose);
        assert_eq!(args.log_format, None);
        match args.command {
            Command::Add { name, fields } => {
                assert_eq!(name, "Spring refresh");
                assert_eq!(fields.formulas, vec!["6N:1:30", "7G:2:15.5"]);
                assert_eq!(fields.developer.as_deref(), Some("45"));
                assert_eq!(fields.processing_time.as_deref(), Some("35"));
                assert_eq!(fields.date, None);
            }
            other => panic!("Expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_add_requires_name() {
        assert!(CliArgs::try_parse_from(["dye-diary", "add", "-f", "6N:1:30"]).is_err());
    }

    #[test]
    fn test_edit_and_delete_args() {
        let args = CliArgs::parse_from(["dye-diary", "edit", "abc", "--notes", "too warm"]);
        assert_eq!(
            args.command,
            Command::Edit {
                id: "abc".to_string(),
                name: None,
                fields: EntryFields {
                    notes: Some("too warm".to_string()),
                    ..EntryFields::default()
                },
            }
        );

        let args = CliArgs::parse_from(["dye-diary", "delete", "abc"]);
        assert_eq!(
            args.command,
            Command::Delete {
                id: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["dye-diary", "list", "-v", "--log-format", "json"]);
        assert!(args.verbose);
        assert_eq!(args.log_format.as_deref(), Some("json"));
        assert_eq!(args.command, Command::List);

        let args = CliArgs::parse_from(["dye-diary", "--verbose", "show", "--page", "2"]);
        assert!(args.verbose);
        assert_eq!(args.command, Command::Show { page: Some(2) });

        assert!(CliArgs::try_parse_from(["dye-diary", "--log-format", "xml", "list"]).is_err());
        assert!(CliArgs::try_parse_from(["dye-diary"]).is_err());
    }

    #[test]
    fn test_apply_to_overwrites_given_fields() {
        let mut draft = EntryDraft {
            name: "Gloss".to_string(),
            date: "2024-01-01".to_string(),
            notes: "keep me".to_string(),
            formulas: vec![FormulaDraft::parse_spec("9V:1:20").unwrap()],
            ..EntryDraft::blank()
        };
        let fields = EntryFields {
            date: Some("20240202".to_string()),
            formulas: vec!["6N:1:30".to_string(), "7G:2:15".to_string()],
            ..EntryFields::default()
        };

        fields.apply_to(&mut draft).unwrap();

        assert_eq!(draft.date, "20240202");
        assert_eq!(draft.formulas.len(), 2);
        assert_eq!(draft.formulas[0].shade, "6N");
        assert_eq!(draft.notes, "keep me");
        assert_eq!(draft.name, "Gloss");
    }

    #[test]
    fn test_apply_to_rejects_bad_formula() {
        let fields = EntryFields {
            formulas: vec!["just-a-shade".to_string()],
            ..EntryFields::default()
        };
        let mut draft = EntryDraft::blank();
        assert!(matches!(
            fields.apply_to(&mut draft),
            Err(EntryError::InvalidFormula(_))
        ));
    }
}
