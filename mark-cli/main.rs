use std::{
  fs,
  io::{self, Write},
  path::Path,
};

use anyhow::{Context, Result};
use mark_lib::{Command, Config, Engine, markers};

use crate::cli::CliOptions;

mod cli;

fn main() -> Result<()> {
  let options = CliOptions::parse()?;
  setup_logging(options.verbosity, options.log_file.as_deref())?;

  if options.list_commands {
    let mut stdout = io::stdout().lock();
    for command in Command::ALL {
      writeln!(stdout, "{command}")?;
    }
    return Ok(());
  }

  let config = match &options.config_file {
    Some(path) => Config::load(path)
      .with_context(|| format!("failed to load config from {}", path.display()))?,
    None => Config::default(),
  };
  let engine = Engine::new(config);

  let input = match &options.file {
    Some(path) => {
      fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    },
    None => io::read_to_string(io::stdin()).context("failed to read standard input")?,
  };

  let (text, start, end) = if options.markers {
    markers::parse(&input)
  } else {
    let (start, end) = options.selection.unwrap_or_else(|| {
      let len = input.chars().count();
      (len, len)
    });
    (input, start, end)
  };

  let id = options.command.as_deref().unwrap_or_default();
  log::info!("applying '{id}' over {start}..{end}");
  let result = engine
    .apply_str(id, &text, start, end)
    .with_context(|| format!("failed to apply '{id}'"))?;

  let mut stdout = io::stdout().lock();
  if options.json {
    writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?;
  } else if options.markers {
    write!(
      stdout,
      "{}",
      markers::format(&result.text, result.selection_start, result.selection_end)
    )?;
  } else {
    write!(stdout, "{}", result.text)?;
  }
  stdout.flush()?;
  Ok(())
}

fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
  let level = match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  let dispatch = fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level);

  let dispatch = match log_file {
    Some(path) => {
      let file = fern::log_file(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
      dispatch.chain(file)
    },
    None => dispatch.chain(io::stderr()),
  };

  dispatch.apply().context("failed to install logger")?;
  Ok(())
}
