use super::converter::Converter;
use super::error::NonLinearConversionError;
use super::registry;
use super::unit::{Unit, UnitKind};

/// A unit derived from a system unit through a converter, such as
/// degrees Celsius (an offset of kelvins) or kilometers (a multiple
/// of meters).
///
/// Transformed units carry no symbol. Textual names are attached
/// through the label database of [`crate::units::format`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransformedUnit {
  system_unit: Unit,
  to_system: Converter,
}

impl TransformedUnit {
  /// The unit whose values `to_parent` converts into values of
  /// `parent`.
  ///
  /// Transforming by the identity returns `parent` itself, and a
  /// transform which cancels out `parent`'s own conversion returns
  /// the system unit. Fails if `parent` is a product whose conversion
  /// to its system unit is not linear.
  pub fn new(parent: Unit, to_parent: &Converter) -> Result<Unit, NonLinearConversionError> {
    if to_parent.is_identity() {
      return Ok(parent);
    }
    let system_unit = parent.system_unit();
    let to_system = parent.to_system_unit()?.concatenate(to_parent);
    if to_system.is_identity() {
      return Ok(system_unit);
    }
    Ok(registry::intern_anonymous(UnitKind::Transformed(TransformedUnit { system_unit, to_system })))
  }

  pub fn system_unit(&self) -> Unit {
    self.system_unit
  }

  /// The converter from this unit to [`TransformedUnit::system_unit`].
  pub fn to_system(&self) -> &Converter {
    &self.to_system
  }
}
