//! Resolution of a unit's dimension and of the converter into that
//! dimension.
//!
//! Both are memoized per unit. Since rebinding a base unit's
//! dimension changes the answer for every unit built on top of it,
//! rebinding clears both caches wholesale and bumps a generation
//! counter. Results computed against an older generation are returned
//! to their caller but never stored.

use super::converter::Converter;
use super::error::{NonLinearConversionError, UnsupportedOperationError};
use super::registry;
use super::unit::{Unit, UnitKind};

use log::info;

pub(crate) fn dimension_of(unit: Unit) -> Unit {
  let generation = {
    let registry = registry::lock();
    if let Some(dimension) = registry.dimensions.dimensions.get(&unit) {
      return *dimension;
    }
    registry.dimensions.generation
  };
  let dimension = compute_dimension(unit);
  let mut registry = registry::lock();
  if registry.dimensions.generation == generation {
    registry.dimensions.dimensions.insert(unit, dimension);
  }
  dimension
}

pub(crate) fn to_dimension_of(unit: Unit) -> Result<Converter, NonLinearConversionError> {
  let generation = {
    let registry = registry::lock();
    if let Some(converter) = registry.dimensions.to_dimension.get(&unit) {
      return Ok(converter.clone());
    }
    registry.dimensions.generation
  };
  let converter = compute_to_dimension(unit)?;
  let mut registry = registry::lock();
  if registry.dimensions.generation == generation {
    registry.dimensions.to_dimension.insert(unit, converter.clone());
  }
  Ok(converter)
}

pub(crate) fn rebind(unit: Unit, dimension: Unit, to_dimension: Converter) -> Result<(), UnsupportedOperationError> {
  if !matches!(unit.kind(), UnitKind::Base(_)) {
    return Err(UnsupportedOperationError { operation: "set_dimension", unit });
  }
  if !dimension.is_system_unit() {
    return Err(UnsupportedOperationError { operation: "set_dimension", unit: dimension });
  }
  let mut registry = registry::lock();
  registry.dimensions.rebound.insert(unit, (dimension, to_dimension));
  registry.dimensions.invalidate();
  info!("Rebound dimension of {:?} to {:?}; dimension caches invalidated", unit, dimension);
  Ok(())
}

fn rebound(unit: Unit) -> Option<(Unit, Converter)> {
  registry::lock().dimensions.rebound.get(&unit).cloned()
}

fn compute_dimension(unit: Unit) -> Unit {
  match unit.kind() {
    UnitKind::Base(_) => {
      rebound(unit).map_or(unit, |(dimension, _)| dimension)
    }
    UnitKind::Alternate(alternate) => dimension_of(alternate.base_units()),
    UnitKind::Product(product) => {
      product.elements().iter().fold(Unit::one(), |acc, element| {
        acc.multiply(dimension_of(element.unit()).raise(element.pow(), element.root()))
      })
    }
    UnitKind::Transformed(transformed) => dimension_of(transformed.system_unit()),
  }
}

fn compute_to_dimension(unit: Unit) -> Result<Converter, NonLinearConversionError> {
  match unit.kind() {
    UnitKind::Base(_) => {
      Ok(rebound(unit).map_or(Converter::Identity, |(_, converter)| converter))
    }
    UnitKind::Alternate(alternate) => to_dimension_of(alternate.base_units()),
    UnitKind::Product(product) => product.to_dimension(),
    UnitKind::Transformed(transformed) => {
      let system_to_dimension = to_dimension_of(transformed.system_unit())?;
      Ok(system_to_dimension.concatenate(transformed.to_system()))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::si;
  use crate::units::test_utils::fresh_base;

  use approx::assert_abs_diff_eq;

  #[test]
  fn test_base_unit_is_its_own_dimension() {
    let a = fresh_base("dim");
    assert_eq!(a.dimension(), a);
    assert!(a.to_dimension().unwrap().is_identity());
  }

  #[test]
  fn test_derived_unit_dimension() {
    let expected = si::METER.multiply(*si::KILOGRAM).divide(si::SECOND.pow(2));
    assert_eq!(si::NEWTON.dimension(), expected);
    assert_eq!(si::CELSIUS.dimension(), *si::KELVIN);
    assert_eq!(si::RADIAN.dimension(), Unit::one());
  }

  #[test]
  fn test_rebind_dimension() {
    // Natural units: measure length in units of time via the speed of
    // light.
    let length = fresh_base("len");
    let time = fresh_base("time");
    let speed = length.divide(time);
    assert!(!length.is_compatible(time));
    assert_eq!(speed.dimension(), speed);

    length.set_dimension(time, Converter::Multiply(1.0 / 299_792_458.0)).unwrap();
    assert!(length.is_compatible(time));
    assert_eq!(length.dimension(), time);
    // Cached product dimensions are recomputed after the rebind.
    assert_eq!(speed.dimension(), Unit::one());
    let converter = length.converter_to(time).unwrap();
    assert_abs_diff_eq!(converter.convert(299_792_458.0), 1.0, epsilon = 1e-9);
  }

  #[test]
  fn test_rebind_requires_base_unit() {
    let err = si::NEWTON.set_dimension(*si::SECOND, Converter::Identity).unwrap_err();
    assert_eq!(err.operation, "set_dimension");
    assert_eq!(err.unit, *si::NEWTON);
    let a = fresh_base("rb");
    let err = a.set_dimension(*si::CELSIUS, Converter::Identity).unwrap_err();
    assert_eq!(err.unit, *si::CELSIUS);
  }

  #[test]
  fn test_transformed_to_dimension() {
    let converter = si::CELSIUS.to_dimension().unwrap();
    assert_abs_diff_eq!(converter.convert(0.0), 273.15);
  }
}
