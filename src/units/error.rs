use super::unit::Unit;
use crate::parsing::source::SourceOffset;

use thiserror::Error;

/// A symbol or label is already bound to a different unit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Symbol '{symbol}' is already bound to a different unit")]
pub struct DuplicateSymbolError {
  pub symbol: String,
}

/// The operation requires a system unit (or a base unit) and was
/// given something else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unsupported operation '{operation}' on unit {unit:?}")]
pub struct UnsupportedOperationError {
  pub operation: &'static str,
  pub unit: Unit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cannot convert from {source_unit} to {target_unit}: incompatible dimensions")]
pub struct IncompatibleUnitsError {
  pub source_unit: Unit,
  pub target_unit: Unit,
}

/// A composite unit needed a single scale factor for an element whose
/// converter is not linear.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Conversion of {unit:?} is not linear")]
pub struct NonLinearConversionError {
  pub unit: Unit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ArithmeticError {
  pub message: &'static str,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to parse unit '{token}' at offset {offset}")]
pub struct UnitParseError {
  pub token: String,
  pub offset: SourceOffset,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid label '{label}'")]
pub struct InvalidLabelError {
  pub label: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConversionError {
  #[error("{0}")]
  IncompatibleUnits(#[from] IncompatibleUnitsError),
  #[error("{0}")]
  NonLinearConversion(#[from] NonLinearConversionError),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlternateError {
  #[error("{0}")]
  UnsupportedOperation(#[from] UnsupportedOperationError),
  #[error("{0}")]
  DuplicateSymbol(#[from] DuplicateSymbolError),
}

impl DuplicateSymbolError {
  pub fn new(symbol: impl Into<String>) -> Self {
    Self { symbol: symbol.into() }
  }
}

impl ArithmeticError {
  pub fn root_of_zero() -> Self {
    Self { message: "Root order of zero" }
  }

  pub fn exponent_overflow() -> Self {
    Self { message: "Exponent out of range" }
  }
}

impl UnitParseError {
  pub fn new(token: impl Into<String>, offset: impl Into<SourceOffset>) -> Self {
    Self { token: token.into(), offset: offset.into() }
  }
}

impl InvalidLabelError {
  pub fn new(label: impl Into<String>) -> Self {
    Self { label: label.into() }
  }
}
