use smartstring::{LazyCompact, SmartString};

pub mod binding;
pub mod block;
pub mod command;
pub mod config;
pub mod engine;
pub mod heading;
pub mod indent;
pub mod inline;
pub mod keymap;
pub mod line_index;
pub mod list;
pub mod markers;
pub mod pattern;
pub mod selection;
pub mod surface;
pub mod template;
pub mod transaction;

pub type Tendril = SmartString<LazyCompact>;

pub use binding::MarkdownArea;
pub use command::Command;
pub use config::Config;
pub use engine::{CommandResult, Engine, EngineError};
pub use selection::Range;
