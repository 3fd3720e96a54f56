//! Interned units of measure.
//!
//! Units form an algebra: they can be multiplied, divided, raised to
//! rational powers, renamed and transformed, and any two units of the
//! same dimension can produce a [`units::Converter`] between them.
//! See the [`units`] module for the model.

pub mod error;
pub mod parsing;
pub mod units;

pub use error::Error;
