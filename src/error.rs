use crate::units::error::{AlternateError, ArithmeticError, ConversionError, DuplicateSymbolError,
                          IncompatibleUnitsError, InvalidLabelError, NonLinearConversionError,
                          UnitParseError, UnsupportedOperationError};

use thiserror::Error;

/// Every failure the unit subsystem can report, for callers who want
/// a single error type to propagate with `?`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  DuplicateSymbol(#[from] DuplicateSymbolError),
  #[error("{0}")]
  UnsupportedOperation(#[from] UnsupportedOperationError),
  #[error("{0}")]
  IncompatibleUnits(#[from] IncompatibleUnitsError),
  #[error("{0}")]
  NonLinearConversion(#[from] NonLinearConversionError),
  #[error("{0}")]
  Arithmetic(#[from] ArithmeticError),
  #[error("{0}")]
  UnitParse(#[from] UnitParseError),
  #[error("{0}")]
  InvalidLabel(#[from] InvalidLabelError),
}

impl From<ConversionError> for Error {
  fn from(err: ConversionError) -> Self {
    match err {
      ConversionError::IncompatibleUnits(err) => Self::IncompatibleUnits(err),
      ConversionError::NonLinearConversion(err) => Self::NonLinearConversion(err),
    }
  }
}

impl From<AlternateError> for Error {
  fn from(err: AlternateError) -> Self {
    match err {
      AlternateError::UnsupportedOperation(err) => Self::UnsupportedOperation(err),
      AlternateError::DuplicateSymbol(err) => Self::DuplicateSymbol(err),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::{si, Unit};

  use approx::assert_abs_diff_eq;

  fn kelvin_per_second(text: &str) -> Result<f64, Error> {
    let unit: Unit = text.parse()?;
    let converter = unit.converter_to(si::KELVIN.divide(*si::SECOND))?;
    Ok(converter.convert(1.0))
  }

  #[test]
  fn test_question_mark_conversions() {
    assert_abs_diff_eq!(kelvin_per_second("K/min").unwrap(), 1.0 / 60.0, epsilon = 1e-12);
    assert!(matches!(kelvin_per_second("m/s"), Err(Error::IncompatibleUnits(_))));
    assert!(matches!(kelvin_per_second("K/fortnight"), Err(Error::UnitParse(_))));
  }

  #[test]
  fn test_alternate_error_conversion() {
    let kilometer = si::kilo(*si::METER).unwrap();
    let err: Error = kilometer.alternate("kmalt").unwrap_err().into();
    assert!(matches!(err, Error::UnsupportedOperation(_)));
  }
}
