use super::alternate::AlternateUnit;
use super::base::BaseUnit;
use super::converter::Converter;
use super::dimension;
use super::error::{AlternateError, ArithmeticError, ConversionError, IncompatibleUnitsError,
                   NonLinearConversionError, UnsupportedOperationError};
use super::format::UnitFormat;
use super::product::{self, ProductUnit};
use super::registry::{self, MemoKey};
use super::transformed::TransformedUnit;

use num::pow::Pow;
use once_cell::sync::Lazy;

use std::fmt::{self, Formatter, Display, Debug};
use std::hash::{Hash, Hasher};
use std::ops::{Mul, Div};
use std::ptr;
use std::str::FromStr;

static ONE: Lazy<Unit> = Lazy::new(|| {
  registry::intern_anonymous(UnitKind::Product(ProductUnit::empty()))
});

/// A physical unit.
///
/// Units are interned: every structurally distinct unit exists
/// exactly once in the process, so a `Unit` is a cheap `Copy` handle
/// and equality is identity. Units are created by the constructors on
/// [`BaseUnit`] and [`AlternateUnit`] and by the arithmetic methods
/// on `Unit` itself, and they are never freed.
#[derive(Clone, Copy)]
pub struct Unit(&'static UnitData);

#[derive(Debug)]
pub(crate) struct UnitData {
  id: usize,
  kind: UnitKind,
}

/// The closed set of unit variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnitKind {
  Base(BaseUnit),
  Alternate(AlternateUnit),
  Product(ProductUnit),
  Transformed(TransformedUnit),
}

impl UnitData {
  pub(crate) fn new(id: usize, kind: UnitKind) -> Self {
    Self { id, kind }
  }
}

impl UnitKind {
  pub fn symbol(&self) -> Option<&str> {
    match self {
      UnitKind::Base(base) => Some(base.symbol()),
      UnitKind::Alternate(alternate) => Some(alternate.symbol()),
      UnitKind::Product(_) | UnitKind::Transformed(_) => None,
    }
  }
}

impl Unit {
  pub(crate) fn from_data(data: &'static UnitData) -> Self {
    Unit(data)
  }

  /// The dimensionless unit, the identity for multiplication.
  pub fn one() -> Unit {
    *ONE
  }

  pub fn is_one(self) -> bool {
    self == Unit::one()
  }

  /// Sequence number assigned at registration. Unique within the
  /// process.
  pub fn id(self) -> usize {
    self.0.id
  }

  pub fn kind(self) -> &'static UnitKind {
    &self.0.kind
  }

  pub fn symbol(self) -> Option<&'static str> {
    self.0.kind.symbol()
  }

  /// Looks up the unit bound to the given symbol.
  pub fn search_symbol(symbol: &str) -> Option<Unit> {
    registry::search_symbol(symbol)
  }

  /// The system unit this unit is defined in terms of. Base and
  /// alternate units are their own system units.
  pub fn system_unit(self) -> Unit {
    match self.kind() {
      UnitKind::Base(_) | UnitKind::Alternate(_) => self,
      UnitKind::Product(product) => {
        registry::memoize(MemoKey::SystemUnit(self), || product.system_unit())
      }
      UnitKind::Transformed(transformed) => transformed.system_unit(),
    }
  }

  pub fn is_system_unit(self) -> bool {
    self.system_unit() == self
  }

  /// The converter from this unit to its system unit.
  pub fn to_system_unit(self) -> Result<Converter, NonLinearConversionError> {
    match self.kind() {
      UnitKind::Base(_) | UnitKind::Alternate(_) => Ok(Converter::Identity),
      UnitKind::Product(product) => product.to_system_unit(),
      UnitKind::Transformed(transformed) => Ok(transformed.to_system().clone()),
    }
  }

  /// The unit identifying the physical dimension of this unit. The
  /// answer depends on the current dimension bindings of base units.
  pub fn dimension(self) -> Unit {
    dimension::dimension_of(self)
  }

  /// The converter from this unit to its [`Unit::dimension`].
  pub fn to_dimension(self) -> Result<Converter, NonLinearConversionError> {
    dimension::to_dimension_of(self)
  }

  /// Rebinds the dimension of a base unit. Fails unless `self` is a
  /// base unit and `dimension` is a system unit.
  pub fn set_dimension(self, dimension: Unit, to_dimension: Converter) -> Result<(), UnsupportedOperationError> {
    dimension::rebind(self, dimension, to_dimension)
  }

  pub fn is_compatible(self, other: Unit) -> bool {
    self == other || self.dimension() == other.dimension()
  }

  /// The converter which takes values in this unit to values in
  /// `other`.
  pub fn converter_to(self, other: Unit) -> Result<Converter, ConversionError> {
    if self == other {
      return Ok(Converter::Identity);
    }
    if !self.is_compatible(other) {
      return Err(IncompatibleUnitsError { source_unit: self, target_unit: other }.into());
    }
    let this_to_dimension = self.to_dimension()?;
    let other_to_dimension = other.to_dimension()?;
    Ok(other_to_dimension.inverse().concatenate(&this_to_dimension))
  }

  /// # Panics
  ///
  /// Panics if an exponent of the result does not fit in `i32`. See
  /// [`Unit::checked_multiply`].
  pub fn multiply(self, other: Unit) -> Unit {
    self.checked_multiply(other).unwrap_or_else(|err| panic!("{} in {:?} * {:?}", err, self, other))
  }

  /// # Panics
  ///
  /// Panics if an exponent of the result does not fit in `i32`. See
  /// [`Unit::checked_divide`].
  pub fn divide(self, other: Unit) -> Unit {
    self.checked_divide(other).unwrap_or_else(|err| panic!("{} in {:?} / {:?}", err, self, other))
  }

  pub fn checked_multiply(self, other: Unit) -> Result<Unit, ArithmeticError> {
    registry::try_memoize(MemoKey::Multiply(self, other), || product::product_of(self, other))
  }

  pub fn checked_divide(self, other: Unit) -> Result<Unit, ArithmeticError> {
    registry::try_memoize(MemoKey::Divide(self, other), || product::quotient_of(self, other))
  }

  pub fn inverse(self) -> Unit {
    Unit::one().divide(self)
  }

  /// # Panics
  ///
  /// Panics if an exponent of the result does not fit in `i32`. See
  /// [`Unit::checked_pow`].
  pub fn pow(self, n: i32) -> Unit {
    self.checked_pow(n).unwrap_or_else(|err| panic!("{} in {:?} ^ {}", err, self, n))
  }

  pub fn checked_pow(self, n: i32) -> Result<Unit, ArithmeticError> {
    match n {
      1 => Ok(self),
      0 => Ok(Unit::one()),
      n if n > 1 => registry::try_memoize(MemoKey::Pow(self, n), || product::pow_of(self, n)),
      n => {
        let n = n.checked_neg().ok_or_else(ArithmeticError::exponent_overflow)?;
        Unit::one().checked_divide(self.checked_pow(n)?)
      }
    }
  }

  pub fn root(self, n: i32) -> Result<Unit, ArithmeticError> {
    match n {
      1 => Ok(self),
      0 => Err(ArithmeticError::root_of_zero()),
      n if n > 1 => registry::try_memoize(MemoKey::Root(self, n), || product::root_of(self, n)),
      n => {
        let n = n.checked_neg().ok_or_else(ArithmeticError::exponent_overflow)?;
        Unit::one().checked_divide(self.root(n)?)
      }
    }
  }

  /// `self` raised to the rational power `pow / root`. `root` must be
  /// positive.
  pub(crate) fn raise(self, pow: i32, root: i32) -> Unit {
    debug_assert!(root > 0, "Nonpositive root {}", root);
    let powered = self.pow(pow);
    if root == 1 {
      return powered;
    }
    powered.root(root).unwrap_or_else(|err| panic!("{} in {:?} ^ 1:{}", err, powered, root))
  }

  /// A unit with the same base units as this one, distinguished by
  /// the given symbol. Only system units have alternates.
  pub fn alternate(self, symbol: impl Into<String>) -> Result<Unit, AlternateError> {
    AlternateUnit::new(symbol, self)
  }

  /// A unit whose values are converted to this unit by `converter`.
  pub fn transform(self, converter: &Converter) -> Result<Unit, NonLinearConversionError> {
    TransformedUnit::new(self, converter)
  }

  /// The unit `self + offset`, so that zero in the new unit is
  /// `offset` in this one.
  pub fn add_offset(self, offset: f64) -> Result<Unit, NonLinearConversionError> {
    self.transform(&Converter::offset(offset))
  }

  /// The unit `self * factor`, so that one of the new unit is
  /// `factor` of this one.
  pub fn multiply_scalar(self, factor: f64) -> Result<Unit, NonLinearConversionError> {
    self.transform(&Converter::scale(factor))
  }
}

impl PartialEq for Unit {
  fn eq(&self, other: &Self) -> bool {
    ptr::eq(self.0, other.0)
  }
}

impl Eq for Unit {}

impl Hash for Unit {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.0.id.hash(state);
  }
}

impl Debug for Unit {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self.kind() {
      UnitKind::Base(base) => write!(f, "Unit({})", base.symbol()),
      UnitKind::Alternate(alternate) => write!(f, "Unit({})", alternate.symbol()),
      kind => f.debug_tuple("Unit").field(&self.id()).field(kind).finish(),
    }
  }
}

impl Display for Unit {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", UnitFormat::standard().format(*self))
  }
}

impl FromStr for Unit {
  type Err = super::error::UnitParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    UnitFormat::standard().parse(s)
  }
}

impl Default for Unit {
  fn default() -> Self {
    Unit::one()
  }
}

impl Mul for Unit {
  type Output = Unit;

  fn mul(self, rhs: Unit) -> Unit {
    self.multiply(rhs)
  }
}

impl Div for Unit {
  type Output = Unit;

  fn div(self, rhs: Unit) -> Unit {
    self.divide(rhs)
  }
}

impl Pow<i32> for Unit {
  type Output = Unit;

  fn pow(self, rhs: i32) -> Unit {
    Unit::pow(self, rhs)
  }
}
