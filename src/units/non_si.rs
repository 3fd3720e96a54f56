//! Units outside the SI which are in common use, defined as exact
//! multiples (or offsets) of SI units wherever the definition is
//! exact.

use super::base::BaseUnit;
use super::format::labels::bind_catalog_name;
use super::si;
use super::unit::Unit;

use once_cell::sync::Lazy;

use std::f64::consts::PI;

fn scaled(unit: Unit, factor: f64) -> Unit {
  unit.multiply_scalar(factor).expect("catalog parents convert linearly")
}

// Length.

pub static INCH: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 0.0254));
pub static FOOT: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 0.3048));
pub static YARD: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 0.9144));
pub static MILE: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 1609.344));
pub static NAUTICAL_MILE: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 1852.0));
pub static ANGSTROM: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 1e-10));
pub static ASTRONOMICAL_UNIT: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 149_597_870_700.0));
pub static LIGHT_YEAR: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 9.460_730_472_580_8e15));
pub static PARSEC: Lazy<Unit> = Lazy::new(|| scaled(*si::METER, 3.085_677_581_491_367e16));

// Mass.

pub static POUND: Lazy<Unit> = Lazy::new(|| scaled(*si::KILOGRAM, 0.453_592_37));
pub static OUNCE: Lazy<Unit> = Lazy::new(|| scaled(*si::KILOGRAM, 0.028_349_523_125));
pub static METRIC_TON: Lazy<Unit> = Lazy::new(|| scaled(*si::KILOGRAM, 1000.0));

// Time.

pub static MINUTE: Lazy<Unit> = Lazy::new(|| scaled(*si::SECOND, 60.0));
pub static HOUR: Lazy<Unit> = Lazy::new(|| scaled(*si::SECOND, 3600.0));
pub static DAY: Lazy<Unit> = Lazy::new(|| scaled(*si::SECOND, 86_400.0));
pub static WEEK: Lazy<Unit> = Lazy::new(|| scaled(*si::SECOND, 604_800.0));
/// The mean Gregorian year, 365.2425 days.
pub static YEAR: Lazy<Unit> = Lazy::new(|| scaled(*si::SECOND, 31_556_952.0));

// Temperature.

pub static RANKINE: Lazy<Unit> = Lazy::new(|| scaled(*si::KELVIN, 5.0 / 9.0));
pub static FAHRENHEIT: Lazy<Unit> = Lazy::new(|| {
  RANKINE.add_offset(459.67).expect("rankines convert linearly")
});

// Angle.

pub static DEGREE_ANGLE: Lazy<Unit> = Lazy::new(|| scaled(*si::RADIAN, PI / 180.0));
pub static REVOLUTION: Lazy<Unit> = Lazy::new(|| scaled(*si::RADIAN, 2.0 * PI));

// Area and volume.

pub static ARE: Lazy<Unit> = Lazy::new(|| scaled(si::METER.pow(2), 100.0));
pub static HECTARE: Lazy<Unit> = Lazy::new(|| scaled(si::METER.pow(2), 10_000.0));
pub static LITER: Lazy<Unit> = Lazy::new(|| scaled(si::METER.pow(3), 1e-3));
/// The US liquid gallon.
pub static GALLON: Lazy<Unit> = Lazy::new(|| scaled(si::METER.pow(3), 3.785_411_784e-3));

// Pressure.

pub static ATMOSPHERE: Lazy<Unit> = Lazy::new(|| scaled(*si::PASCAL, 101_325.0));
pub static BAR: Lazy<Unit> = Lazy::new(|| scaled(*si::PASCAL, 100_000.0));
pub static MILLIMETER_OF_MERCURY: Lazy<Unit> = Lazy::new(|| scaled(*si::PASCAL, 133.322_387_415));

// Energy, force and power.

pub static ELECTRON_VOLT: Lazy<Unit> = Lazy::new(|| scaled(*si::JOULE, 1.602_176_634e-19));
/// The international steam table calorie.
pub static CALORIE: Lazy<Unit> = Lazy::new(|| scaled(*si::JOULE, 4.1868));
pub static ERG: Lazy<Unit> = Lazy::new(|| scaled(*si::JOULE, 1e-7));
pub static DYNE: Lazy<Unit> = Lazy::new(|| scaled(*si::NEWTON, 1e-5));
pub static KILOGRAM_FORCE: Lazy<Unit> = Lazy::new(|| scaled(*si::NEWTON, 9.806_65));
pub static POUND_FORCE: Lazy<Unit> = Lazy::new(|| scaled(*si::NEWTON, 4.448_221_615_260_5));
/// Mechanical horsepower.
pub static HORSEPOWER: Lazy<Unit> = Lazy::new(|| scaled(*si::WATT, 745.699_871_582_270_2));

// Velocity.

pub static KNOT: Lazy<Unit> = Lazy::new(|| scaled(si::METER.divide(*si::SECOND), 1852.0 / 3600.0));
pub static MILES_PER_HOUR: Lazy<Unit> = Lazy::new(|| scaled(si::METER.divide(*si::SECOND), 0.447_04));
pub static SPEED_OF_LIGHT: Lazy<Unit> = Lazy::new(|| scaled(si::METER.divide(*si::SECOND), 299_792_458.0));

// Electromagnetism and radioactivity.

pub static GAUSS: Lazy<Unit> = Lazy::new(|| scaled(*si::TESLA, 1e-4));
pub static CURIE: Lazy<Unit> = Lazy::new(|| scaled(*si::BECQUEREL, 3.7e10));

// Dimensionless and information.

pub static PERCENT: Lazy<Unit> = Lazy::new(|| scaled(Unit::one(), 0.01));
pub static BIT: Lazy<Unit> = Lazy::new(|| {
  BaseUnit::new("bit").expect("the bit symbol is not a catalog label")
});
pub static BYTE: Lazy<Unit> = Lazy::new(|| scaled(*BIT, 8.0));

pub(crate) fn register_labels() {
  let names: &[(Unit, &str, &[&str])] = &[
    (*INCH, "in", &[]),
    (*FOOT, "ft", &[]),
    (*YARD, "yd", &[]),
    (*MILE, "mi", &[]),
    (*NAUTICAL_MILE, "nmi", &[]),
    (*ANGSTROM, "Å", &["Ang"]),
    (*ASTRONOMICAL_UNIT, "au", &["ua"]),
    (*LIGHT_YEAR, "ly", &[]),
    (*PARSEC, "pc", &[]),
    (*POUND, "lb", &[]),
    (*OUNCE, "oz", &[]),
    (*METRIC_TON, "t", &[]),
    (*MINUTE, "min", &[]),
    (*HOUR, "h", &["hr"]),
    (*DAY, "d", &["day"]),
    (*WEEK, "wk", &[]),
    (*YEAR, "yr", &[]),
    (*RANKINE, "°R", &["degR"]),
    (*FAHRENHEIT, "°F", &["degF"]),
    (*DEGREE_ANGLE, "°", &["deg"]),
    (*REVOLUTION, "rev", &[]),
    (*ARE, "a", &[]),
    (*HECTARE, "ha", &[]),
    (*LITER, "L", &["l"]),
    (*GALLON, "gal", &[]),
    (*ATMOSPHERE, "atm", &[]),
    (*BAR, "bar", &[]),
    (*MILLIMETER_OF_MERCURY, "mmHg", &[]),
    (*ELECTRON_VOLT, "eV", &[]),
    (*CALORIE, "cal", &[]),
    (*ERG, "erg", &[]),
    (*DYNE, "dyn", &[]),
    (*KILOGRAM_FORCE, "kgf", &[]),
    (*POUND_FORCE, "lbf", &[]),
    (*HORSEPOWER, "hp", &[]),
    (*KNOT, "kn", &["kt"]),
    (*MILES_PER_HOUR, "mph", &[]),
    (*SPEED_OF_LIGHT, "c", &[]),
    (*GAUSS, "G", &[]),
    (*CURIE, "Ci", &[]),
    (*PERCENT, "%", &[]),
    (*BIT, "bit", &[]),
    (*BYTE, "B", &[]),
  ];
  for &(unit, label, aliases) in names {
    bind_catalog_name(unit, label, aliases);
  }
}
