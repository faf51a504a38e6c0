use std::path::PathBuf;

use sifter_core::{ExportDestination, ExportOutcome, Msg, ParseFormat};

/// One line of shell input, parsed. This is the stand-in for the external
/// collaborators (file chooser, save dialog) the session expects.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Dispatch(Msg),
    Show,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub const HELP: &str = "commands:
  open <path>       parse a .json/.ndjson file
  format csv|json   output format for the next parse
  save <path>       export the held result to a file
  save              (no path: the save chooser was dismissed)
  copy              export the held result to the clipboard
  show              re-print the current session state
  help              this text
  quit              exit";

pub fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "open" => {
            if rest.is_empty() {
                ShellCommand::Invalid("open needs a file path".to_string())
            } else {
                ShellCommand::Dispatch(Msg::FileChosen(PathBuf::from(rest)))
            }
        }
        "format" => match rest {
            "csv" => ShellCommand::Dispatch(Msg::FormatChanged(ParseFormat::Csv)),
            "json" => ShellCommand::Dispatch(Msg::FormatChanged(ParseFormat::Json)),
            other => ShellCommand::Invalid(format!("format must be csv or json, got {other:?}")),
        },
        "save" => {
            if rest.is_empty() {
                // A dismissed destination chooser: a no-op, not an error.
                ShellCommand::Dispatch(Msg::ExportFinished(ExportOutcome::Cancelled))
            } else {
                ShellCommand::Dispatch(Msg::ExportRequested(ExportDestination::File(
                    PathBuf::from(rest),
                )))
            }
        }
        "copy" => ShellCommand::Dispatch(Msg::ExportRequested(ExportDestination::Clipboard)),
        "show" => ShellCommand::Show,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => ShellCommand::Invalid(format!("unknown command: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, ShellCommand};
    use sifter_core::{ExportDestination, ExportOutcome, Msg, ParseFormat};
    use std::path::PathBuf;

    #[test]
    fn open_takes_the_rest_of_the_line_as_path() {
        assert_eq!(
            parse_command("open /data/my export.ndjson"),
            ShellCommand::Dispatch(Msg::FileChosen(PathBuf::from("/data/my export.ndjson")))
        );
    }

    #[test]
    fn format_accepts_both_formats() {
        assert_eq!(
            parse_command("format json"),
            ShellCommand::Dispatch(Msg::FormatChanged(ParseFormat::Json))
        );
        assert!(matches!(
            parse_command("format xml"),
            ShellCommand::Invalid(_)
        ));
    }

    #[test]
    fn bare_save_is_a_cancelled_chooser() {
        assert_eq!(
            parse_command("save"),
            ShellCommand::Dispatch(Msg::ExportFinished(ExportOutcome::Cancelled))
        );
        assert_eq!(
            parse_command("save /out/final.csv"),
            ShellCommand::Dispatch(Msg::ExportRequested(ExportDestination::File(
                PathBuf::from("/out/final.csv")
            )))
        );
    }

    #[test]
    fn blank_lines_and_unknown_words_are_handled() {
        assert_eq!(parse_command("   "), ShellCommand::Empty);
        assert!(matches!(parse_command("frobnicate"), ShellCommand::Invalid(_)));
        assert_eq!(parse_command("quit"), ShellCommand::Quit);
    }
}
