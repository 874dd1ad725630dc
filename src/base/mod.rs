//! Foundation types for the pysplit pipeline.
//!
//! - [`TextRange`], [`TextSize`] — source positions (byte offsets)
//! - [`SmolStr`] — identifier names (cheap clones, inline for short names)
//! - [`LineCol`], [`LineIndex`] — offset to line/column conversion
//!
//! This module has NO dependencies on other pysplit modules.

mod line_index;

pub use line_index::{LineCol, LineIndex};

// Re-export the name and span types used throughout the crate
pub use smol_str::SmolStr;
pub use text_size::{TextRange, TextSize};
