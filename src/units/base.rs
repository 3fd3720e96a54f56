use super::error::DuplicateSymbolError;
use super::registry;
use super::unit::{Unit, UnitKind};

/// A fundamental unit, independent of every other base unit.
///
/// By default, a base unit is its own dimension. The dimension may be
/// rebound with [`Unit::set_dimension`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUnit {
  symbol: String,
}

impl BaseUnit {
  /// Returns the base unit with the given symbol, creating it if
  /// necessary. Fails if the symbol is bound to a unit which is not a
  /// base unit.
  pub fn new(symbol: impl Into<String>) -> Result<Unit, DuplicateSymbolError> {
    registry::intern(UnitKind::Base(BaseUnit { symbol: symbol.into() }))
  }

  pub fn symbol(&self) -> &str {
    &self.symbol
  }
}
