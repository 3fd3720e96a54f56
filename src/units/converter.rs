//! One-dimensional numeric transforms, used to move values between a
//! unit and its system unit.

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

use std::fmt::{self, Formatter, Display};
use std::hash::{Hash, Hasher};

/// An immutable function from `f64` to `f64`, together with its
/// derivative and a linearity flag.
///
/// A converter is linear (in the sense of [`Converter::is_linear`])
/// if it preserves both addition and scalar multiplication. In
/// particular, a linear converter always maps zero to zero, which is
/// why [`Converter::Add`] is _not_ considered linear even though its
/// derivative is constant.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Converter {
  /// The identity function.
  Identity,
  /// Adds a constant offset.
  Add(f64),
  /// Multiplies by a constant factor.
  Multiply(f64),
  /// Logarithm with the given base.
  Log(f64),
  /// Exponential with the given base.
  Exp(f64),
  /// Applies the first converter, then the second.
  Compound(Box<Converter>, Box<Converter>),
}

impl Converter {
  /// An additive converter, or the identity if `offset` is zero.
  pub fn offset(offset: f64) -> Self {
    if offset == 0.0 {
      Converter::Identity
    } else {
      Converter::Add(offset)
    }
  }

  /// A multiplicative converter, or the identity if `factor` is
  /// exactly one.
  pub fn scale(factor: f64) -> Self {
    if factor == 1.0 {
      Converter::Identity
    } else {
      Converter::Multiply(factor)
    }
  }

  pub fn is_identity(&self) -> bool {
    matches!(self, Converter::Identity)
  }

  pub fn convert(&self, x: f64) -> f64 {
    match self {
      Converter::Identity => x,
      Converter::Add(offset) => x + offset,
      Converter::Multiply(factor) => x * factor,
      Converter::Log(base) => x.ln() / base.ln(),
      Converter::Exp(base) => base.powf(x),
      Converter::Compound(first, second) => second.convert(first.convert(x)),
    }
  }

  /// The inverse transform. The inverse of a `Multiply` converter
  /// with a zero factor is not meaningful.
  pub fn inverse(&self) -> Converter {
    match self {
      Converter::Identity => Converter::Identity,
      Converter::Add(offset) => Converter::Add(- offset),
      Converter::Multiply(factor) => Converter::Multiply(1.0 / factor),
      Converter::Log(base) => Converter::Exp(*base),
      Converter::Exp(base) => Converter::Log(*base),
      Converter::Compound(first, second) => {
        Converter::Compound(Box::new(second.inverse()), Box::new(first.inverse()))
      }
    }
  }

  /// The derivative of the transform at `x`.
  ///
  /// Note that the derivative of an `Add` converter is always `1.0`,
  /// even though `Add` reports itself as non-linear.
  pub fn derivative(&self, x: f64) -> f64 {
    match self {
      Converter::Identity => 1.0,
      Converter::Add(_) => 1.0,
      Converter::Multiply(factor) => *factor,
      Converter::Log(base) => 1.0 / (x * base.ln()),
      Converter::Exp(base) => base.powf(x) * base.ln(),
      Converter::Compound(first, second) => {
        second.derivative(first.convert(x)) * first.derivative(x)
      }
    }
  }

  pub fn is_linear(&self) -> bool {
    match self {
      Converter::Identity | Converter::Multiply(_) => true,
      Converter::Add(_) | Converter::Log(_) | Converter::Exp(_) => false,
      Converter::Compound(first, second) => first.is_linear() && second.is_linear(),
    }
  }

  /// A converter equivalent to applying `other` first and then
  /// `self`.
  ///
  /// Compound results are chains nested to the right: the first step
  /// of every `Compound` is a single step, and adjacent steps which
  /// can be merged always are.
  pub fn concatenate(&self, other: &Converter) -> Converter {
    match (self, other) {
      (_, Converter::Compound(first, second)) => self.concatenate(second).concatenate(first),
      (_, Converter::Identity) => self.clone(),
      (Converter::Identity, _) => other.clone(),
      (Converter::Compound(first, second), _) => match first.concatenate(other) {
        Converter::Compound(_, _) => Converter::Compound(Box::new(other.clone()), Box::new(self.clone())),
        merged => second.concatenate(&merged),
      },
      (Converter::Add(a), Converter::Add(b)) => Converter::offset(a + b),
      (Converter::Multiply(a), Converter::Multiply(b)) => Converter::scale(a * b),
      (Converter::Log(a), Converter::Exp(b)) | (Converter::Exp(a), Converter::Log(b))
        if single_bits(*a) == single_bits(*b) => Converter::Identity,
      _ => Converter::Compound(Box::new(other.clone()), Box::new(self.clone())),
    }
  }
}

/// Single-precision bit pattern of a double. Converter equality and
/// hashing compare parameters at this precision.
fn single_bits(x: f64) -> u32 {
  (x as f32).to_bits()
}

impl Default for Converter {
  fn default() -> Self {
    Converter::Identity
  }
}

impl PartialEq for Converter {
  fn eq(&self, other: &Self) -> bool {
    if self.is_linear() || other.is_linear() {
      return self.is_linear() && other.is_linear() &&
        single_bits(self.derivative(0.0)) == single_bits(other.derivative(0.0));
    }
    match (self, other) {
      (Converter::Add(a), Converter::Add(b)) => single_bits(*a) == single_bits(*b),
      (Converter::Log(a), Converter::Log(b)) => single_bits(*a) == single_bits(*b),
      (Converter::Exp(a), Converter::Exp(b)) => single_bits(*a) == single_bits(*b),
      (Converter::Compound(a1, b1), Converter::Compound(a2, b2)) => a1 == a2 && b1 == b2,
      _ => false,
    }
  }
}

impl Eq for Converter {}

impl Hash for Converter {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if self.is_linear() {
      0u8.hash(state);
      single_bits(self.derivative(0.0)).hash(state);
      return;
    }
    match self {
      Converter::Add(offset) => {
        1u8.hash(state);
        single_bits(*offset).hash(state);
      }
      Converter::Log(base) => {
        2u8.hash(state);
        single_bits(*base).hash(state);
      }
      Converter::Exp(base) => {
        3u8.hash(state);
        single_bits(*base).hash(state);
      }
      Converter::Compound(first, second) => {
        4u8.hash(state);
        first.hash(state);
        second.hash(state);
      }
      // Linear; handled above.
      Converter::Identity | Converter::Multiply(_) => {}
    }
  }
}

impl Display for Converter {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Converter::Identity => write!(f, "*1"),
      Converter::Add(offset) => write!(f, "+{}", offset),
      Converter::Multiply(factor) => write!(f, "*{}", factor),
      Converter::Log(base) => write!(f, "log{}", base),
      Converter::Exp(base) => write!(f, "exp{}", base),
      Converter::Compound(first, second) => write!(f, "{}{}", first, second),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_abs_diff_eq;

  use std::collections::HashSet;

  fn sample_converters() -> Vec<Converter> {
    vec![
      Converter::Identity,
      Converter::Add(273.15),
      Converter::Multiply(0.3048),
      Converter::Log(10.0),
      Converter::Exp(2.0),
      Converter::Multiply(1.8).concatenate(&Converter::Add(-32.0)),
    ]
  }

  #[test]
  fn test_inverse_law() {
    for converter in sample_converters() {
      let inverse = converter.inverse();
      for x in [0.5, 1.0, 3.25, 10.0, 100.0] {
        assert_abs_diff_eq!(inverse.convert(converter.convert(x)), x, epsilon = 1e-9);
      }
    }
  }

  #[test]
  fn test_concatenate_with_identity() {
    let converter = Converter::Add(3.0);
    assert_eq!(Converter::Identity.concatenate(&converter), converter);
    assert_eq!(converter.concatenate(&Converter::Identity), converter);
  }

  #[test]
  fn test_concatenate_merges_like_converters() {
    let merged = Converter::Add(3.0).concatenate(&Converter::Add(4.5));
    assert!(matches!(merged, Converter::Add(x) if x == 7.5));
    let merged = Converter::Multiply(3.0).concatenate(&Converter::Multiply(0.5));
    assert!(matches!(merged, Converter::Multiply(x) if x == 1.5));
    let merged = Converter::Multiply(4.0).concatenate(&Converter::Multiply(0.25));
    assert!(merged.is_identity());
    let merged = Converter::Add(4.0).concatenate(&Converter::Add(-4.0));
    assert!(merged.is_identity());
    let merged = Converter::Exp(10.0).concatenate(&Converter::Log(10.0));
    assert!(merged.is_identity());
  }

  #[test]
  fn test_concatenate_order() {
    // Multiply first, then add.
    let converter = Converter::Add(10.0).concatenate(&Converter::Multiply(2.0));
    assert_eq!(converter.convert(1.0), 12.0);
    assert!(matches!(converter, Converter::Compound(_, _)));
    // Add first, then multiply.
    let converter = Converter::Multiply(2.0).concatenate(&Converter::Add(10.0));
    assert_eq!(converter.convert(1.0), 22.0);
  }

  #[test]
  fn test_concatenate_builds_right_nested_chains() {
    let first = Converter::Multiply(2.0).concatenate(&Converter::Add(1.0));
    let chain = Converter::Log(10.0).concatenate(&first);
    let Converter::Compound(head, rest) = &chain else {
      panic!("Expected compound converter, got {:?}", chain);
    };
    assert_eq!(**head, Converter::Add(1.0));
    assert!(matches!(**rest, Converter::Compound(_, _)));
    assert_abs_diff_eq!(chain.convert(4.0), 1.0, epsilon = 1e-12);
    // Appending a step one at a time yields the same chain.
    let stepwise = Converter::Log(10.0).concatenate(&Converter::Multiply(2.0)).concatenate(&Converter::Add(1.0));
    assert_eq!(stepwise, chain);
  }

  #[test]
  fn test_concatenate_merges_across_chains() {
    let chain = Converter::Multiply(2.0).concatenate(&Converter::Add(1.0));
    let merged = chain.concatenate(&Converter::Add(-1.0));
    assert_eq!(merged, Converter::Multiply(2.0));
    let merged = Converter::Multiply(0.5).concatenate(&chain);
    assert_eq!(merged, Converter::Add(1.0));
    let nested = Converter::Compound(
      Box::new(Converter::Compound(Box::new(Converter::Identity), Box::new(Converter::Add(3.0)))),
      Box::new(Converter::Multiply(2.0)),
    );
    let normalized = Converter::Identity.concatenate(&nested);
    assert_eq!(normalized, Converter::Multiply(2.0).concatenate(&Converter::Add(3.0)));
  }

  #[test]
  fn test_compound_inverse() {
    let converter = Converter::Multiply(2.0).concatenate(&Converter::Add(10.0));
    let inverse = converter.inverse();
    assert_eq!(inverse.convert(22.0), 1.0);
  }

  #[test]
  fn test_add_converter_quirk() {
    let converter = Converter::Add(273.15);
    assert!(!converter.is_linear());
    assert_eq!(converter.derivative(0.0), 1.0);
    assert_eq!(converter.derivative(500.0), 1.0);
  }

  #[test]
  fn test_linearity() {
    assert!(Converter::Identity.is_linear());
    assert!(Converter::Multiply(3.0).is_linear());
    assert!(!Converter::Log(10.0).is_linear());
    assert!(!Converter::Exp(10.0).is_linear());
    let compound = Converter::Compound(Box::new(Converter::Multiply(2.0)), Box::new(Converter::Multiply(3.0)));
    assert!(compound.is_linear());
    let compound = Converter::Multiply(2.0).concatenate(&Converter::Add(1.0));
    assert!(!compound.is_linear());
  }

  #[test]
  fn test_derivatives() {
    assert_eq!(Converter::Multiply(4.0).derivative(17.0), 4.0);
    assert_abs_diff_eq!(Converter::Log(10.0).derivative(1.0), 1.0 / 10f64.ln(), epsilon = 1e-12);
    assert_abs_diff_eq!(Converter::Exp(2.0).derivative(3.0), 8.0 * 2f64.ln(), epsilon = 1e-12);
    let compound = Converter::Multiply(3.0).concatenate(&Converter::Multiply(2.0));
    assert_eq!(compound.derivative(0.0), 6.0);
  }

  #[test]
  fn test_lossy_equality_absorbs_round_off() {
    let a = Converter::Multiply(0.1 * 3.0);
    let b = Converter::Multiply(0.3);
    assert_eq!(a, b);
    assert_eq!(Converter::Multiply(1.0), Converter::Identity);
    assert_ne!(Converter::Multiply(2.0), Converter::Multiply(3.0));
    assert_ne!(Converter::Add(1.0), Converter::Multiply(1.0));
    assert_eq!(Converter::Add(273.15), Converter::Add(273.15 + 1e-12));
  }

  #[test]
  fn test_hash_agrees_with_equality() {
    let set: HashSet<Converter> = [
      Converter::Identity,
      Converter::Multiply(1.0),
      Converter::Multiply(0.1 * 3.0),
      Converter::Multiply(0.3),
      Converter::Add(5.0),
    ].into_iter().collect();
    assert_eq!(set.len(), 3);
  }

  #[test]
  fn test_display() {
    assert_eq!(Converter::Add(273.15).to_string(), "+273.15");
    assert_eq!(Converter::Multiply(0.3048).to_string(), "*0.3048");
    assert_eq!(Converter::Log(10.0).to_string(), "log10");
  }

  #[cfg(feature = "serde")]
  #[test]
  fn test_serde_round_trip() {
    let converter = Converter::Multiply(1.8).concatenate(&Converter::Add(-32.0));
    let json = serde_json::to_string(&converter).unwrap();
    let restored: Converter = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, converter);
  }
}
