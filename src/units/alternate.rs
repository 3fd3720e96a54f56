use super::error::{AlternateError, UnsupportedOperationError};
use super::registry;
use super::unit::{Unit, UnitKind};

/// A system unit which shares the base units of another system unit
/// but is distinguished from it by a symbol. For instance, radians
/// are an alternate of the dimensionless unit, and newtons are an
/// alternate of `m·kg/s²`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlternateUnit {
  symbol: String,
  base_units: Unit,
}

impl AlternateUnit {
  /// Returns the alternate of `parent` with the given symbol,
  /// creating it if necessary. `parent` must be a system unit.
  pub fn new(symbol: impl Into<String>, parent: Unit) -> Result<Unit, AlternateError> {
    if !parent.is_system_unit() {
      return Err(UnsupportedOperationError { operation: "alternate", unit: parent }.into());
    }
    let kind = UnitKind::Alternate(AlternateUnit {
      symbol: symbol.into(),
      base_units: base_units_of(parent),
    });
    Ok(registry::intern(kind)?)
  }

  pub fn symbol(&self) -> &str {
    &self.symbol
  }

  /// The product of base units this alternate stands for.
  pub fn base_units(&self) -> Unit {
    self.base_units
  }
}

/// Unrolls a system unit into a product of base units.
fn base_units_of(unit: Unit) -> Unit {
  match unit.kind() {
    UnitKind::Base(_) => unit,
    UnitKind::Alternate(alternate) => alternate.base_units,
    UnitKind::Product(product) => {
      product.elements().iter().fold(Unit::one(), |acc, element| {
        acc.multiply(base_units_of(element.unit()).raise(element.pow(), element.root()))
      })
    }
    UnitKind::Transformed(transformed) => base_units_of(transformed.system_unit()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::si;

  #[test]
  fn test_alternate_of_alternate_unrolls_base_units() {
    let UnitKind::Alternate(pascal) = si::PASCAL.kind() else {
      panic!("Expected alternate unit, got {:?}", si::PASCAL.kind());
    };
    let expected = si::KILOGRAM.divide(si::METER.multiply(si::SECOND.pow(2)));
    assert_eq!(pascal.base_units(), expected);
    assert_eq!(pascal.symbol(), "Pa");
  }

  #[test]
  fn test_alternate_is_system_unit() {
    assert!(si::JOULE.is_system_unit());
    assert!(si::RADIAN.is_system_unit());
    assert!(si::RADIAN.is_compatible(Unit::one()));
    assert_ne!(*si::RADIAN, Unit::one());
  }

  #[test]
  fn test_distinct_alternates_of_same_base_units() {
    assert_ne!(*si::GRAY, *si::SIEVERT);
    assert!(si::GRAY.is_compatible(*si::SIEVERT));
  }
}
