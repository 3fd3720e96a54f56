//! Products of units raised to rational powers, kept in a canonical
//! factored form.

use super::converter::Converter;
use super::error::{ArithmeticError, NonLinearConversionError};
use super::registry;
use super::unit::{Unit, UnitKind};

use num::Integer;

use std::hash::{Hash, Hasher};

/// Conversion factors this close to one are snapped to the identity.
const IDENTITY_EPSILON: f64 = 1e-9;

/// A unit raised to the rational power `pow / root`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
  unit: Unit,
  pow: i32,
  root: i32,
}

/// A product of [`Element`]s.
///
/// No two elements share a unit, every exponent is nonzero and in
/// lowest terms, and roots are positive. The empty product is the
/// dimensionless unit [`Unit::one`]. A product is never constructed
/// with a single element whose exponent is one; that case is always
/// the element's bare unit instead.
///
/// Elements keep the order in which they were first combined, which
/// is the order they are printed in. Equality ignores order.
#[derive(Debug, Clone)]
pub struct ProductUnit {
  elements: Vec<Element>,
}

impl Element {
  fn new(unit: Unit, pow: i32, root: i32) -> Self {
    Self { unit, pow, root }
  }

  /// An element with the exponent `pow / root` reduced to lowest
  /// terms. Fails unless both terms fit in `i32` with room to negate.
  fn reduced(unit: Unit, pow: i64, root: i64) -> Result<Self, ArithmeticError> {
    let gcd = pow.gcd(&root);
    let narrow = |n: i64| {
      i32::try_from(n / gcd).ok()
        .filter(|n| *n != i32::MIN)
        .ok_or_else(ArithmeticError::exponent_overflow)
    };
    Ok(Self::new(unit, narrow(pow)?, narrow(root)?))
  }

  pub fn unit(&self) -> Unit {
    self.unit
  }

  pub fn pow(&self) -> i32 {
    self.pow
  }

  pub fn root(&self) -> i32 {
    self.root
  }

  fn negated(self) -> Self {
    Self { pow: - self.pow, ..self }
  }

  fn exponent(&self) -> f64 {
    f64::from(self.pow) / f64::from(self.root)
  }
}

impl ProductUnit {
  pub(crate) fn empty() -> Self {
    Self { elements: Vec::new() }
  }

  pub fn elements(&self) -> &[Element] {
    &self.elements
  }

  pub fn unit_count(&self) -> usize {
    self.elements.len()
  }

  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  /// The product of the system units of every element.
  pub fn system_unit(&self) -> Unit {
    self.elements.iter().fold(Unit::one(), |acc, element| {
      acc.multiply(element.unit.system_unit().raise(element.pow, element.root))
    })
  }

  /// The converter to [`ProductUnit::system_unit`]. Only defined if
  /// every element converts linearly.
  pub fn to_system_unit(&self) -> Result<Converter, NonLinearConversionError> {
    self.combined_factor(Unit::to_system_unit)
  }

  /// The converter to the dimension of this product. Only defined if
  /// every element converts linearly to its own dimension.
  pub fn to_dimension(&self) -> Result<Converter, NonLinearConversionError> {
    self.combined_factor(Unit::to_dimension)
  }

  fn combined_factor<F>(&self, element_converter: F) -> Result<Converter, NonLinearConversionError>
  where F: Fn(Unit) -> Result<Converter, NonLinearConversionError> {
    let mut factor = 1.0;
    for element in &self.elements {
      let converter = element_converter(element.unit)?;
      if !converter.is_linear() {
        return Err(NonLinearConversionError { unit: element.unit });
      }
      factor *= converter.derivative(0.0).powf(element.exponent());
    }
    if (factor - 1.0).abs() < IDENTITY_EPSILON {
      Ok(Converter::Identity)
    } else {
      Ok(Converter::Multiply(factor))
    }
  }
}

impl PartialEq for ProductUnit {
  fn eq(&self, other: &Self) -> bool {
    self.elements.len() == other.elements.len() &&
      self.elements.iter().all(|element| other.elements.contains(element))
  }
}

impl Eq for ProductUnit {}

impl Hash for ProductUnit {
  fn hash<H: Hasher>(&self, state: &mut H) {
    // Order-independent, so that equal products hash equally.
    let code = self.elements.iter().fold(0i64, |acc, element| {
      let weight = i64::from(element.pow) * 3 - i64::from(element.root) * 2;
      acc.wrapping_add((element.unit.id() as i64).wrapping_mul(weight))
    });
    state.write_i64(code);
  }
}

pub(crate) fn product_of(left: Unit, right: Unit) -> Result<Unit, ArithmeticError> {
  merge(&elements_of(left), &elements_of(right))
}

pub(crate) fn quotient_of(left: Unit, right: Unit) -> Result<Unit, ArithmeticError> {
  let right: Vec<_> = elements_of(right).into_iter().map(Element::negated).collect();
  merge(&elements_of(left), &right)
}

/// The `n`th root of `unit`, for positive `n`.
pub(crate) fn root_of(unit: Unit, n: i32) -> Result<Unit, ArithmeticError> {
  debug_assert!(n > 0, "Nonpositive root {}", n);
  let elements = elements_of(unit).into_iter()
    .map(|element| {
      Element::reduced(element.unit, i64::from(element.pow), i64::from(element.root) * i64::from(n))
    })
    .collect::<Result<Vec<_>, _>>()?;
  merge(&elements, &[])
}

/// `unit` raised to the `n`th power, for positive `n`.
pub(crate) fn pow_of(unit: Unit, n: i32) -> Result<Unit, ArithmeticError> {
  debug_assert!(n > 0, "Nonpositive power {}", n);
  let elements = elements_of(unit).into_iter()
    .map(|element| {
      Element::reduced(element.unit, i64::from(element.pow) * i64::from(n), i64::from(element.root))
    })
    .collect::<Result<Vec<_>, _>>()?;
  merge(&elements, &[])
}

fn elements_of(unit: Unit) -> Vec<Element> {
  match unit.kind() {
    UnitKind::Product(product) => product.elements.clone(),
    _ => vec![Element::new(unit, 1, 1)],
  }
}

/// Combines two element lists. Elements on the same unit have their
/// exponents added; elements whose exponent becomes zero are dropped.
/// Exponents are summed in `i64` and only narrowed once reduced.
fn merge(left: &[Element], right: &[Element]) -> Result<Unit, ArithmeticError> {
  let mut result = Vec::with_capacity(left.len() + right.len());
  let mut matched = vec![false; right.len()];
  for element in left {
    match right.iter().position(|other| other.unit == element.unit) {
      Some(index) => {
        matched[index] = true;
        let other = &right[index];
        let pow = i64::from(element.pow) * i64::from(other.root) + i64::from(other.pow) * i64::from(element.root);
        let root = i64::from(element.root) * i64::from(other.root);
        if pow != 0 {
          result.push(Element::reduced(element.unit, pow, root)?);
        }
      }
      None => {
        result.push(*element);
      }
    }
  }
  result.extend(
    right.iter().zip(matched).filter(|(_, matched)| !matched).map(|(element, _)| *element),
  );
  Ok(from_elements(result))
}

fn from_elements(elements: Vec<Element>) -> Unit {
  match elements.as_slice() {
    [] => Unit::one(),
    [single] if single.pow == single.root => single.unit,
    _ => registry::intern_anonymous(UnitKind::Product(ProductUnit { elements })),
  }
}
