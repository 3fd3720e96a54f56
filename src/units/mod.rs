//! Units of measure, modeled as an algebra over interned units.
//!
//! Every unit is one of four kinds (see [`UnitKind`]): a base unit,
//! an alternate name for a system unit, a product of units raised to
//! rational powers, or a transform of a system unit through a
//! [`Converter`]. Units are interned, so structurally equal units are
//! the same value, and products are kept in a canonical factored form.
//!
//! The SI and common non-SI units are available in [`si`] and
//! [`non_si`]. Their textual labels are registered by
//! [`catalog_init`], which every [`UnitFormat`] constructor calls.

pub mod alternate;
pub mod base;
pub mod converter;
pub mod error;
pub mod format;
pub mod non_si;
pub mod prefix;
pub mod product;
pub mod si;
pub mod transformed;
pub mod unit;

mod dimension;
mod registry;

pub use alternate::AlternateUnit;
pub use base::BaseUnit;
pub use converter::Converter;
pub use format::{FormatStyle, UnitFormat};
pub use product::{Element, ProductUnit};
pub use transformed::TransformedUnit;
pub use unit::{Unit, UnitKind};

use once_cell::sync::Lazy;
use log::info;

static CATALOG: Lazy<()> = Lazy::new(|| {
  si::register_labels();
  non_si::register_labels();
  info!("Unit catalog initialized");
});

/// Registers the labels of the SI and non-SI catalogs. Idempotent.
pub fn catalog_init() {
  Lazy::force(&CATALOG);
}
