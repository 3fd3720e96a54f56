//! The International System of Units.
//!
//! Every unit here is created on first use. Prefixed forms of the
//! symbolic units (`km`, `mA`, `GHz`, ...) are labelled for the
//! parser by [`crate::units::catalog_init`].

pub use super::prefix::{yotta, zetta, exa, peta, tera, giga, mega, kilo, hecto, deka,
                        deci, centi, milli, micro, nano, pico, femto, atto, zepto, yocto};

use super::base::BaseUnit;
use super::format::labels::{self, bind_catalog_name};
use super::prefix::MetricPrefix;
use super::unit::Unit;

use once_cell::sync::Lazy;
use log::warn;

use std::iter;

fn base(symbol: &str) -> Unit {
  BaseUnit::new(symbol).expect("SI base unit symbols are distinct")
}

fn alternate(parent: Unit, symbol: &str) -> Unit {
  parent.alternate(symbol).expect("SI derived unit symbols are distinct")
}

// Base units.

pub static AMPERE: Lazy<Unit> = Lazy::new(|| base("A"));
pub static CANDELA: Lazy<Unit> = Lazy::new(|| base("cd"));
pub static KELVIN: Lazy<Unit> = Lazy::new(|| base("K"));
pub static KILOGRAM: Lazy<Unit> = Lazy::new(|| base("kg"));
pub static METER: Lazy<Unit> = Lazy::new(|| base("m"));
pub static MOLE: Lazy<Unit> = Lazy::new(|| base("mol"));
pub static SECOND: Lazy<Unit> = Lazy::new(|| base("s"));

// Dimensionless derived units.

pub static RADIAN: Lazy<Unit> = Lazy::new(|| alternate(Unit::one(), "rad"));
pub static STERADIAN: Lazy<Unit> = Lazy::new(|| alternate(Unit::one(), "sr"));

// Derived units with special names.

pub static HERTZ: Lazy<Unit> = Lazy::new(|| alternate(SECOND.inverse(), "Hz"));
pub static NEWTON: Lazy<Unit> = Lazy::new(|| {
  alternate(METER.multiply(*KILOGRAM).divide(SECOND.pow(2)), "N")
});
pub static PASCAL: Lazy<Unit> = Lazy::new(|| alternate(NEWTON.divide(METER.pow(2)), "Pa"));
pub static JOULE: Lazy<Unit> = Lazy::new(|| alternate(NEWTON.multiply(*METER), "J"));
pub static WATT: Lazy<Unit> = Lazy::new(|| alternate(JOULE.divide(*SECOND), "W"));
pub static COULOMB: Lazy<Unit> = Lazy::new(|| alternate(SECOND.multiply(*AMPERE), "C"));
pub static VOLT: Lazy<Unit> = Lazy::new(|| alternate(WATT.divide(*AMPERE), "V"));
pub static FARAD: Lazy<Unit> = Lazy::new(|| alternate(COULOMB.divide(*VOLT), "F"));
pub static OHM: Lazy<Unit> = Lazy::new(|| alternate(VOLT.divide(*AMPERE), "Ω"));
pub static SIEMENS: Lazy<Unit> = Lazy::new(|| alternate(AMPERE.divide(*VOLT), "S"));
pub static WEBER: Lazy<Unit> = Lazy::new(|| alternate(VOLT.multiply(*SECOND), "Wb"));
pub static TESLA: Lazy<Unit> = Lazy::new(|| alternate(WEBER.divide(METER.pow(2)), "T"));
pub static HENRY: Lazy<Unit> = Lazy::new(|| alternate(WEBER.divide(*AMPERE), "H"));
pub static LUMEN: Lazy<Unit> = Lazy::new(|| alternate(CANDELA.multiply(*STERADIAN), "lm"));
pub static LUX: Lazy<Unit> = Lazy::new(|| alternate(LUMEN.divide(METER.pow(2)), "lx"));
pub static BECQUEREL: Lazy<Unit> = Lazy::new(|| alternate(SECOND.inverse(), "Bq"));
pub static GRAY: Lazy<Unit> = Lazy::new(|| alternate(JOULE.divide(*KILOGRAM), "Gy"));
pub static SIEVERT: Lazy<Unit> = Lazy::new(|| alternate(JOULE.divide(*KILOGRAM), "Sv"));
pub static KATAL: Lazy<Unit> = Lazy::new(|| alternate(MOLE.divide(*SECOND), "kat"));

// Transformed units.

pub static GRAM: Lazy<Unit> = Lazy::new(|| {
  KILOGRAM.multiply_scalar(1e-3).expect("kilograms convert linearly")
});
pub static CELSIUS: Lazy<Unit> = Lazy::new(|| {
  KELVIN.add_offset(273.15).expect("kelvins convert linearly")
});

/// Units which receive a label for every SI prefix. Kilograms are
/// prefixed through grams instead.
fn prefixable_units() -> Vec<Unit> {
  vec![
    *AMPERE, *CANDELA, *KELVIN, *METER, *MOLE, *SECOND, *GRAM,
    *RADIAN, *STERADIAN, *HERTZ, *NEWTON, *PASCAL, *JOULE, *WATT,
    *COULOMB, *VOLT, *FARAD, *OHM, *SIEMENS, *WEBER, *TESLA, *HENRY,
    *LUMEN, *LUX, *BECQUEREL, *GRAY, *SIEVERT, *KATAL,
  ]
}

pub(crate) fn register_labels() {
  bind_catalog_name(*GRAM, "g", &[]);
  bind_catalog_name(*CELSIUS, "°C", &["Cel"]);
  bind_catalog_name(*OHM, "Ω", &["Ohm"]);
  for unit in prefixable_units() {
    let Some(name) = labels::label_of(unit).or_else(|| unit.symbol().map(str::to_owned)) else {
      warn!("SI unit {:?} has no name; its prefixed forms are not labelled", unit);
      continue;
    };
    let ascii_name = labels::ascii_alias_of(unit).filter(|_| !name.is_ascii());
    for prefix in MetricPrefix::si_prefixes() {
      let prefixed = match prefix.apply(unit) {
        Ok(prefixed) => prefixed,
        Err(err) => {
          warn!("Cannot prefix {}: {}", name, err);
          continue;
        }
      };
      let mut aliases: Vec<String> = prefix.aliases.iter().map(|alias| format!("{}{}", alias, name)).collect();
      if let Some(ascii_name) = &ascii_name {
        let prefixes = iter::once(&prefix.prefix_name).chain(prefix.aliases);
        aliases.extend(prefixes.map(|prefix| format!("{}{}", prefix, ascii_name)));
      }
      let aliases: Vec<&str> = aliases.iter().map(String::as_str).collect();
      bind_catalog_name(prefixed, &format!("{}{}", prefix.prefix_name, name), &aliases);
    }
  }
}
