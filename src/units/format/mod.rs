//! Textual rendering and parsing of units.
//!
//! Three renderings are supported, differing only in their glyphs:
//! the standard form (`cm³·A²/kg`), an ASCII form (`cm^3 kg^-1 A^2`)
//! and an HTML form using `<sup>` tags. All of them are accepted by
//! [`UnitFormat::parse`].

pub mod labels;
pub(crate) mod parser;
mod superscript;

use super::converter::Converter;
use super::error::UnitParseError;
use super::product::Element;
use super::transformed::TransformedUnit;
use super::unit::{Unit, UnitKind};
use super::{catalog_init, registry};

use html_escape::encode_text;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FormatStyle {
  /// Unicode separators and superscripts, with negative exponents
  /// after a `/`.
  #[default]
  Standard,
  /// ASCII separators and exponents, every exponent written inline
  /// with its sign. Units whose label is not ASCII are written by an
  /// ASCII alias (`Ohm`, `Cel`, `us`) when they have one.
  Ascii,
  /// Like `Standard`, but exponents are `<sup>` elements and labels
  /// are HTML-escaped.
  Html,
}

/// Formats and parses units in a given [`FormatStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitFormat {
  style: FormatStyle,
}

impl UnitFormat {
  /// A format in the given style. Initializes the unit catalog if
  /// that has not happened yet, so that every catalog label is known.
  pub fn new(style: FormatStyle) -> Self {
    catalog_init();
    Self { style }
  }

  pub fn standard() -> Self {
    Self::new(FormatStyle::Standard)
  }

  pub fn ascii() -> Self {
    Self::new(FormatStyle::Ascii)
  }

  pub fn html() -> Self {
    Self::new(FormatStyle::Html)
  }

  pub fn style(&self) -> FormatStyle {
    self.style
  }

  pub fn format(&self, unit: Unit) -> String {
    if let Some(name) = self.name_for(unit) {
      return self.escape(&name);
    }
    match unit.kind() {
      UnitKind::Product(product) => self.format_elements(product.elements()),
      _ => self.escape(&format!("{:?}", unit)),
    }
  }

  pub fn parse(&self, text: &str) -> Result<Unit, UnitParseError> {
    parser::parse(self, text)
  }

  /// The name of `unit`: its label if it has one, else its symbol.
  /// Unlabelled transformed units get a synthesized name made of
  /// their parent and the step which derives them from it, such as
  /// `[K+273.15]`, `[m*1000]` or `[mWlog10]`. Every synthesized name
  /// parses back to its unit.
  pub fn label_for(&self, unit: Unit) -> Option<String> {
    if let Some(label) = labels::label_of(unit) {
      return Some(label);
    }
    match unit.kind() {
      UnitKind::Base(_) | UnitKind::Alternate(_) => unit.symbol().map(str::to_owned),
      UnitKind::Product(_) => None,
      UnitKind::Transformed(transformed) => self.synthesized_label(transformed),
    }
  }

  /// [`UnitFormat::label_for`], with ASCII aliases substituted in the
  /// ASCII style.
  fn name_for(&self, unit: Unit) -> Option<String> {
    let label = self.label_for(unit)?;
    if self.style == FormatStyle::Ascii && !label.is_ascii() {
      if let Some(alias) = labels::ascii_alias_of(unit) {
        return Some(alias);
      }
    }
    Some(label)
  }

  /// Resolves a single name: labels first, then aliases, then unit
  /// symbols, then bracketed forms.
  pub fn unit_for(&self, name: &str) -> Option<Unit> {
    labels::unit_for_label(name)
      .or_else(|| labels::unit_for_alias(name))
      .or_else(|| registry::search_symbol(name))
      .or_else(|| self.unit_for_bracketed(name))
  }

  fn unit_for_bracketed(&self, name: &str) -> Option<Unit> {
    let inner = name.strip_prefix('[')?.strip_suffix(']')?;
    let (parent, step) = split_last_step(inner)?;
    self.parse(parent).ok()?.transform(&step).ok()
  }

  /// `[parent step]`, where `step` is the first step of the unit's
  /// conversion chain and `parent` is the unit the rest of the chain
  /// converts from.
  fn synthesized_label(&self, transformed: &TransformedUnit) -> Option<String> {
    let system = transformed.system_unit();
    let (parent, step) = match transformed.to_system() {
      Converter::Compound(first, rest) => (system.transform(rest).ok()?, &**first),
      step => (system, step),
    };
    // HTML escaping applies to the label as a whole.
    let style = match self.style {
      FormatStyle::Ascii => FormatStyle::Ascii,
      FormatStyle::Standard | FormatStyle::Html => FormatStyle::Standard,
    };
    Some(format!("[{}{}]", UnitFormat { style }.format(parent), step))
  }

  fn escape(&self, label: &str) -> String {
    match self.style {
      FormatStyle::Html => encode_text(label).into_owned(),
      FormatStyle::Standard | FormatStyle::Ascii => label.to_owned(),
    }
  }

  fn element_label(&self, element: &Element) -> String {
    let unit = element.unit();
    let name = self.name_for(unit).unwrap_or_else(|| format!("{:?}", unit));
    self.escape(&name)
  }

  fn format_elements(&self, elements: &[Element]) -> String {
    if self.style == FormatStyle::Ascii {
      return elements.iter()
        .map(|element| format!("{}{}", self.element_label(element), ascii_exponent(element.pow(), element.root())))
        .join(" ");
    }
    let (positive, negative): (Vec<&Element>, Vec<&Element>) =
      elements.iter().partition(|element| element.pow() > 0);
    let render = |element: &&Element, pow: i32| {
      format!("{}{}", self.element_label(element), self.exponent(pow, element.root()))
    };
    let mut out = positive.iter().map(|element| render(element, element.pow())).join("·");
    if negative.is_empty() {
      return out;
    }
    if positive.is_empty() {
      out.push('1');
    }
    out.push('/');
    let denominator = negative.iter().map(|element| render(element, - element.pow())).join("·");
    if negative.len() > 1 {
      out.push_str(&format!("({})", denominator));
    } else {
      out.push_str(&denominator);
    }
    out
  }

  /// The exponent suffix in the standard and HTML styles. `pow` is
  /// positive.
  fn exponent(&self, pow: i32, root: i32) -> String {
    match (self.style, pow, root) {
      (_, 1, 1) => String::new(),
      (FormatStyle::Html, pow, 1) => format!("<sup>{}</sup>", pow),
      (FormatStyle::Html, pow, root) => format!("<sup>{}:{}</sup>", pow, root),
      (_, 2, 1) => String::from("²"),
      (_, 3, 1) => String::from("³"),
      (_, pow, 1) => format!("^{}", pow),
      (_, pow, root) => format!("^{}:{}", pow, root),
    }
  }
}

impl Default for UnitFormat {
  fn default() -> Self {
    Self::standard()
  }
}

fn ascii_exponent(pow: i32, root: i32) -> String {
  match (pow, root) {
    (1, 1) => String::new(),
    (pow, 1) => format!("^{}", pow),
    (pow, root) => format!("^{}:{}", pow, root),
  }
}

/// Splits the inside of a bracketed name into the parent's text and
/// the conversion step written after it: `+k`, `*f`, `logb` or `expb`.
fn split_last_step(text: &str) -> Option<(&str, Converter)> {
  if let Some((index, operator)) = last_top_level_operator(text) {
    let value: f64 = text[index + operator.len_utf8()..].parse().ok()?;
    let step = match operator {
      '+' => Converter::Add(value),
      _ => Converter::Multiply(value),
    };
    return Some((&text[..index], step));
  }
  // Names contain no digits, so the last occurrence is the step.
  let (index, function) = ["log", "exp"].into_iter()
    .filter_map(|function| text.rfind(function).map(|index| (index, function)))
    .max_by_key(|(index, _)| *index)?;
  let base: f64 = text[index + function.len()..].parse().ok()?;
  let step = match function {
    "log" => Converter::Log(base),
    _ => Converter::Exp(base),
  };
  Some((&text[..index], step))
}

/// The position of the last `+` or `*` outside of any brackets.
fn last_top_level_operator(text: &str) -> Option<(usize, char)> {
  let mut depth = 0usize;
  let mut last = None;
  for (index, c) in text.char_indices() {
    match c {
      '[' => depth += 1,
      ']' => depth = depth.saturating_sub(1),
      '+' | '*' if depth == 0 => last = Some((index, c)),
      _ => {}
    }
  }
  last
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::{si, non_si};
  use crate::units::test_utils::fresh_base;

  fn round_trip(format: &UnitFormat, unit: Unit) {
    let text = format.format(unit);
    assert_eq!(format.parse(&text), Ok(unit), "Round trip failed for {:?} through {:?}", unit, text);
  }

  fn sample_units() -> Vec<Unit> {
    let kilometer = si::kilo(*si::METER).unwrap();
    vec![
      Unit::one(),
      *si::METER,
      *si::NEWTON,
      *si::CELSIUS,
      si::SECOND.inverse(),
      si::METER.pow(2).divide(*si::SECOND),
      si::KILOGRAM.multiply(*si::METER).divide(si::SECOND.pow(2)),
      kilometer.divide(*non_si::HOUR),
      si::METER.root(2).unwrap().divide(si::KILOGRAM.pow(3).multiply(*si::AMPERE)),
      non_si::FAHRENHEIT.pow(2),
      si::CELSIUS.multiply_scalar(2.5).unwrap(),
      non_si::FOOT.add_offset(-12.0).unwrap().pow(-2),
    ]
  }

  #[test]
  fn test_standard_rendering() {
    let format = UnitFormat::standard();
    let centimeter = si::centi(*si::METER).unwrap();
    let unit = centimeter.pow(3).divide(*si::KILOGRAM).multiply(si::AMPERE.pow(2));
    assert_eq!(format.format(unit), "cm³·A²/kg");
    assert_eq!(format.format(si::SECOND.inverse()), "1/s");
    assert_eq!(format.format(si::METER.divide(si::SECOND.multiply(*si::KILOGRAM))), "m/(s·kg)");
    assert_eq!(format.format(si::METER.pow(5)), "m^5");
    assert_eq!(format.format(si::METER.root(2).unwrap()), "m^1:2");
    assert_eq!(format.format(Unit::one()), "");
  }

  #[test]
  fn test_ascii_rendering() {
    let format = UnitFormat::ascii();
    let centimeter = si::centi(*si::METER).unwrap();
    let unit = centimeter.pow(3).divide(*si::KILOGRAM).multiply(si::AMPERE.pow(2));
    assert_eq!(format.format(unit), "cm^3 kg^-1 A^2");
    assert_eq!(format.format(si::METER.pow(-1).root(2).unwrap()), "m^-1:2");
  }

  #[test]
  fn test_html_rendering() {
    let format = UnitFormat::html();
    let unit = si::KILOGRAM.multiply(*si::METER).divide(si::SECOND.pow(2));
    assert_eq!(format.format(unit), "kg·m/s<sup>2</sup>");
    assert_eq!(format.format(*si::OHM), "Ω");
  }

  #[test]
  fn test_parse_newton_expression() {
    let expected = si::KILOGRAM.multiply(*si::METER).divide(si::SECOND.pow(2));
    assert_eq!(UnitFormat::standard().parse("kg·m/s²"), Ok(expected));
    assert_eq!(UnitFormat::ascii().parse("kg m s^-2"), Ok(expected));
    assert_eq!(UnitFormat::html().parse("kg·m/s<sup>2</sup>"), Ok(expected));
  }

  #[test]
  fn test_alternate_names() {
    let format = UnitFormat::standard();
    assert_eq!(format.format(*si::NEWTON), "N");
    assert_eq!(format.format(*si::PASCAL), "Pa");
    assert_eq!(format.format(*si::CELSIUS), "°C");
    assert_eq!(format.parse("°C"), Ok(*si::CELSIUS));
  }

  #[test]
  fn test_round_trip_all_styles() {
    for format in [UnitFormat::standard(), UnitFormat::ascii(), UnitFormat::html()] {
      for unit in sample_units() {
        round_trip(&format, unit);
      }
    }
  }

  #[test]
  fn test_synthesized_labels() {
    let format = UnitFormat::standard();
    let a = fresh_base("syn");
    let scaled = a.multiply_scalar(2.5).unwrap();
    assert_eq!(format.label_for(scaled), Some(format!("[{}*2.5]", a.symbol().unwrap())));
    let shifted = scaled.add_offset(-1.0).unwrap();
    assert_eq!(format.label_for(shifted), Some(format!("[[{}*2.5]+-1]", a.symbol().unwrap())));
    round_trip(&format, scaled);
    round_trip(&format, shifted);
    round_trip(&format, shifted.divide(scaled.pow(2)));
  }

  #[test]
  fn test_non_linear_units_round_trip() {
    let a = fresh_base("log");
    let symbol = a.symbol().unwrap();
    let logarithmic = a.transform(&Converter::Log(10.0)).unwrap();
    let format = UnitFormat::standard();
    assert_eq!(format.label_for(logarithmic), Some(format!("[{}log10]", symbol)));
    let decibel_like = a.multiply_scalar(0.001).unwrap().transform(&Converter::Log(10.0)).unwrap();
    assert_eq!(format.label_for(decibel_like), Some(format!("[[{}*0.001]log10]", symbol)));
    let exponential = logarithmic.transform(&Converter::Exp(2.0)).unwrap();
    assert_eq!(format.label_for(exponential), Some(format!("[[{}log10]exp2]", symbol)));
    for format in [UnitFormat::standard(), UnitFormat::ascii(), UnitFormat::html()] {
      for unit in [logarithmic, decibel_like, exponential, logarithmic.multiply(*si::SECOND).pow(2)] {
        round_trip(&format, unit);
      }
    }
  }

  #[test]
  fn test_step_after_name_containing_log() {
    let format = UnitFormat::standard();
    let a = fresh_base("xlog");
    let unit = a.transform(&Converter::Exp(10.0)).unwrap();
    round_trip(&format, unit);
    round_trip(&format, a.add_offset(3.0).unwrap());
  }

  #[test]
  fn test_ascii_style_prefers_ascii_aliases() {
    let format = UnitFormat::ascii();
    let microsecond = si::micro(*si::SECOND).unwrap();
    assert_eq!(format.format(*si::OHM), "Ohm");
    assert_eq!(format.format(si::kilo(*si::OHM).unwrap()), "kOhm");
    assert_eq!(format.format(*si::CELSIUS), "Cel");
    assert_eq!(format.format(microsecond.inverse()), "us^-1");
    assert_eq!(format.format(non_si::FAHRENHEIT.pow(2)), "degF^2");
    assert_eq!(format.format(si::CELSIUS.multiply_scalar(2.5).unwrap()), "[Cel*2.5]");
    assert_eq!(UnitFormat::standard().format(*si::OHM), "Ω");
    for unit in [*si::OHM, microsecond, *non_si::ANGSTROM, *non_si::DEGREE_ANGLE, *non_si::RANKINE] {
      assert!(format.format(unit).is_ascii(), "Non-ASCII name for {:?}", unit);
      round_trip(&format, unit);
    }
  }

  #[test]
  fn test_unit_for_priority() {
    let format = UnitFormat::standard();
    let a = fresh_base("prio");
    let symbol = a.symbol().unwrap();
    assert_eq!(format.unit_for(symbol), Some(a));
    let alias = format!("{}_alias", symbol);
    labels::alias(a.pow(2), &alias).unwrap();
    assert_eq!(format.unit_for(&alias), Some(a.pow(2)));
    labels::label(a.pow(3), &alias).unwrap();
    assert_eq!(format.unit_for(&alias), Some(a.pow(3)));
    assert_eq!(format.unit_for("definitely_not_a_unit"), None);
  }

  #[test]
  fn test_labelled_product() {
    let format = UnitFormat::standard();
    let a = fresh_base("lp");
    let name = format!("{}_per_second", a.symbol().unwrap());
    let unit = a.divide(*si::SECOND);
    labels::label(unit, &name).unwrap();
    assert_eq!(format.format(unit), name);
    assert_eq!(format.format(unit.pow(2)), format!("{}²/s²", a.symbol().unwrap()));
    round_trip(&format, unit);
  }

  #[test]
  fn test_display_and_from_str() {
    let unit: Unit = "km/h".parse().unwrap();
    assert_eq!(unit, si::kilo(*si::METER).unwrap().divide(*non_si::HOUR));
    assert_eq!(unit.to_string(), "km/h");
  }
}
