//! Text primitives shared by the markdown engine: line endings, whitespace
//! classes and a few rope helpers.

pub mod chars;
pub mod line_ending;
pub mod rope;
