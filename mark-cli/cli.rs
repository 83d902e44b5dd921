use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
  pub list_commands: bool,
  pub command:       Option<String>,
  pub file:          Option<PathBuf>,
  pub selection:     Option<(usize, usize)>,
  pub markers:       bool,
  pub json:          bool,
  pub verbosity:     u8,
  pub log_file:      Option<PathBuf>,
  pub config_file:   Option<PathBuf>,
}

impl CliOptions {
  pub fn parse() -> Result<Self> {
    let raw = RawCli::parse();
    raw.try_into()
  }
}

#[derive(Parser, Debug)]
#[command(name = "mark", about, version, long_about = None)]
struct RawCli {
  /// List the available command identifiers
  #[arg(long = "list-commands")]
  list_commands: bool,

  /// Command to apply, e.g. `bold`, `h2` or `ordered-list`
  #[arg(value_name = "COMMAND", required_unless_present = "list_commands")]
  command: Option<String>,

  /// File to read; standard input when omitted
  #[arg(value_name = "FILE")]
  file: Option<PathBuf>,

  /// Selection as char offsets, `START` for a caret or `START:END`
  #[arg(short = 's', long = "selection", value_name = "START[:END]", value_parser = parse_selection)]
  selection: Option<(usize, usize)>,

  /// Read and write the selection as `<` and `>` markers in the text
  #[arg(short = 'm', long = "markers")]
  markers: bool,

  /// Print the result as JSON
  #[arg(long = "json")]
  json: bool,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,
}

impl TryFrom<RawCli> for CliOptions {
  type Error = anyhow::Error;

  fn try_from(raw: RawCli) -> Result<Self> {
    if raw.markers && raw.selection.is_some() {
      bail!("--selection cannot be combined with --markers");
    }

    Ok(Self {
      list_commands: raw.list_commands,
      command:       raw.command,
      file:          raw.file,
      selection:     raw.selection,
      markers:       raw.markers,
      json:          raw.json,
      verbosity:     raw.verbosity,
      log_file:      raw.log_file,
      config_file:   raw.config_file,
    })
  }
}

fn parse_selection(value: &str) -> std::result::Result<(usize, usize), String> {
  let parse = |part: &str| {
    part
      .trim()
      .parse::<usize>()
      .map_err(|_| format!("invalid offset '{part}' in selection '{value}'"))
  };

  match value.split_once(':') {
    Some((start, end)) => Ok((parse(start)?, parse(end)?)),
    None => {
      let caret = parse(value)?;
      Ok((caret, caret))
    },
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn parse(args: &[&str]) -> Result<CliOptions> {
    let raw = RawCli::try_parse_from(std::iter::once("mark").chain(args.iter().copied()))?;
    raw.try_into()
  }

  #[test]
  fn command_and_file() {
    let options = parse(&["bold", "notes.md", "-s", "2:5", "-vv"]).unwrap();
    assert_eq!(options.command.as_deref(), Some("bold"));
    assert_eq!(options.file, Some(PathBuf::from("notes.md")));
    assert_eq!(options.selection, Some((2, 5)));
    assert_eq!(options.verbosity, 2);
    assert!(!options.markers);
  }

  #[test]
  fn caret_selection() {
    let options = parse(&["h1", "--selection", "7"]).unwrap();
    assert_eq!(options.selection, Some((7, 7)));
    assert_eq!(options.file, None);
  }

  #[test]
  fn config_and_log_files() {
    let options = parse(&["indent", "-c", "mark.toml", "--log", "mark.log", "--json"]).unwrap();
    assert_eq!(options.config_file, Some(PathBuf::from("mark.toml")));
    assert_eq!(options.log_file, Some(PathBuf::from("mark.log")));
    assert!(options.json);
  }

  #[test]
  fn rejects_bad_arguments() {
    assert!(parse(&[]).is_err());
    assert!(parse(&["bold", "-s", "x:1"]).is_err());
    assert!(parse(&["bold", "-m", "-s", "1"]).is_err());
    assert!(parse(&["--list-commands"]).unwrap().list_commands);
  }
}
