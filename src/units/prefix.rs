use super::error::NonLinearConversionError;
use super::unit::Unit;

#[derive(Clone, Debug)]
pub struct MetricPrefix {
  pub prefix_name: &'static str,
  /// Other spellings accepted by the parser.
  pub aliases: &'static [&'static str],
  pub exponent: i32,
}

impl MetricPrefix {
  pub const fn new(prefix_name: &'static str, exponent: i32) -> MetricPrefix {
    MetricPrefix { prefix_name, aliases: &[], exponent }
  }

  pub const fn with_aliases(prefix_name: &'static str, aliases: &'static [&'static str], exponent: i32) -> MetricPrefix {
    MetricPrefix { prefix_name, aliases, exponent }
  }

  /// The factor `10^exponent`.
  pub fn factor(&self) -> f64 {
    // Powers of ten up to 10^22 are exact, so dividing gives the
    // correctly rounded value for negative exponents in that range.
    if self.exponent >= 0 {
      10f64.powi(self.exponent)
    } else {
      1.0 / 10f64.powi(- self.exponent)
    }
  }

  pub fn apply(&self, unit: Unit) -> Result<Unit, NonLinearConversionError> {
    unit.multiply_scalar(self.factor())
  }

  /// The twenty SI prefixes, largest first.
  pub fn si_prefixes() -> &'static [MetricPrefix] {
    SI_PREFIXES
  }

  pub fn by_name(prefix_name: &str) -> Option<&'static MetricPrefix> {
    SI_PREFIXES.iter().find(|prefix| prefix.prefix_name == prefix_name)
  }
}

static SI_PREFIXES: &[MetricPrefix] = &[
  MetricPrefix::new("Y", 24),
  MetricPrefix::new("Z", 21),
  MetricPrefix::new("E", 18),
  MetricPrefix::new("P", 15),
  MetricPrefix::new("T", 12),
  MetricPrefix::new("G", 9),
  MetricPrefix::new("M", 6),
  MetricPrefix::new("k", 3),
  MetricPrefix::new("h", 2),
  MetricPrefix::new("da", 1),
  MetricPrefix::new("d", -1),
  MetricPrefix::new("c", -2),
  MetricPrefix::new("m", -3),
  // Note: The micro sign is canonical; "u" and the Greek letter mu
  // are accepted on input.
  MetricPrefix::with_aliases("µ", &["u", "μ"], -6),
  MetricPrefix::new("n", -9),
  MetricPrefix::new("p", -12),
  MetricPrefix::new("f", -15),
  MetricPrefix::new("a", -18),
  MetricPrefix::new("z", -21),
  MetricPrefix::new("y", -24),
];

macro_rules! prefix_fns {
  ($($name:ident => $prefix:literal),* $(,)?) => {
    $(
      #[doc = concat!("`unit` scaled by the SI prefix `", $prefix, "`.")]
      pub fn $name(unit: Unit) -> Result<Unit, NonLinearConversionError> {
        // unwrap safety: the name is taken from SI_PREFIXES above.
        MetricPrefix::by_name($prefix).unwrap().apply(unit)
      }
    )*
  };
}

prefix_fns! {
  yotta => "Y", zetta => "Z", exa => "E", peta => "P", tera => "T", giga => "G",
  mega => "M", kilo => "k", hecto => "h", deka => "da", deci => "d", centi => "c",
  milli => "m", micro => "µ", nano => "n", pico => "p", femto => "f", atto => "a",
  zepto => "z", yocto => "y",
}
