//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! strict = false
//!
//! [indent]
//! width = 4
//! tabs = false
//!
//! [placeholders]
//! bold = "bold"
//! link-url = "url"
//!
//! [list]
//! bullet = "-"
//!
//! [keys]
//! "C-b" = "bold"
//! ```

use std::{collections::HashMap, fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
  command::Command,
  keymap::{KeyBinding, ParseKeyBindingError},
};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config: {0}")]
  Io(#[from] io::Error),
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("invalid key binding in config: {0}")]
  Key(#[from] ParseKeyBindingError),
  #[error("indent width must be between 1 and 16, got {0}")]
  IndentWidth(usize),
  #[error("list bullet must be one of '-', '*' or '+', got {0:?}")]
  Bullet(char),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
  /// Report unknown command identifiers instead of ignoring them.
  pub strict:       bool,
  pub indent:       IndentConfig,
  pub placeholders: Placeholders,
  pub list:         ListConfig,
  /// Key chords layered over the default keymap.
  pub keys:         HashMap<String, Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct IndentConfig {
  /// Columns per nesting level; also the width a tab counts for.
  pub width: usize,
  /// Indent with a tab instead of `width` spaces.
  pub tabs:  bool,
}

impl Default for IndentConfig {
  fn default() -> Self {
    Self {
      width: 4,
      tabs:  false,
    }
  }
}

impl IndentConfig {
  /// Text inserted for one indentation unit.
  pub fn unit(&self) -> String {
    if self.tabs {
      "\t".to_string()
    } else {
      " ".repeat(self.width)
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Placeholders {
  pub bold:       String,
  pub code:       String,
  pub link_text:  String,
  pub link_url:   String,
  pub image_alt:  String,
  pub image_path: String,
}

impl Default for Placeholders {
  fn default() -> Self {
    Self {
      bold:       "bold".to_string(),
      code:       "code".to_string(),
      link_text:  "example".to_string(),
      link_url:   "url".to_string(),
      image_alt:  "image".to_string(),
      image_path: "image.png".to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ListConfig {
  /// Marker for new unordered items.
  pub bullet: char,
}

impl Default for ListConfig {
  fn default() -> Self {
    Self { bullet: '-' }
  }
}

impl Config {
  pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let text = fs::read_to_string(path)?;
    Self::from_toml(&text)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(1..=16).contains(&self.indent.width) {
      return Err(ConfigError::IndentWidth(self.indent.width));
    }
    if !matches!(self.list.bullet, '-' | '*' | '+') {
      return Err(ConfigError::Bullet(self.list.bullet));
    }
    for chord in self.keys.keys() {
      chord.parse::<KeyBinding>()?;
    }
    Ok(())
  }
}
