//! Positions within parsed text, for error reporting.

pub mod source;
