//! The process-wide label database.
//!
//! A label is the unique display name of a unit, used both when
//! formatting and when parsing. An alias is an additional name which
//! is only recognized by the parser. Labels and aliases live in the
//! unit registry, under the same lock as the symbol table, so that a
//! label can never be bound to a string which is concurrently being
//! claimed as a unit symbol.

use super::parser::is_identifier_char;
use crate::units::error::InvalidLabelError;
use crate::units::registry::{self, Registry};
use crate::units::unit::Unit;

use log::{debug, warn};

use std::collections::HashMap;

/// Bidirectional mapping between units and their labels, plus the
/// one-directional alias table.
///
/// Every unit has at most one label and every label names at most one
/// unit. Aliases are many-to-one.
#[derive(Debug, Clone, Default)]
pub(crate) struct LabelTable {
  unit_to_label: HashMap<Unit, String>,
  label_to_unit: HashMap<String, Unit>,
  alias_to_unit: HashMap<String, Unit>,
}

impl LabelTable {
  pub(crate) fn label_of(&self, unit: Unit) -> Option<&str> {
    self.unit_to_label.get(&unit).map(|s| s.as_str())
  }

  pub(crate) fn unit_for_label(&self, label: &str) -> Option<Unit> {
    self.label_to_unit.get(label).copied()
  }

  pub(crate) fn unit_for_alias(&self, alias: &str) -> Option<Unit> {
    self.alias_to_unit.get(alias).copied()
  }

  /// The shortest ASCII alias of `unit`, ties broken alphabetically.
  pub(crate) fn ascii_alias_of(&self, unit: Unit) -> Option<&str> {
    self.alias_to_unit.iter()
      .filter(|(alias, owner)| **owner == unit && alias.is_ascii())
      .map(|(alias, _)| alias.as_str())
      .min_by_key(|alias| (alias.len(), *alias))
  }

  /// Binds `label` to `unit`, replacing the unit's previous label and
  /// detaching the label from whatever unit previously held it.
  fn bind_label(&mut self, unit: Unit, label: String) {
    if let Some(old_label) = self.unit_to_label.remove(&unit) {
      self.label_to_unit.remove(&old_label);
    }
    if let Some(old_unit) = self.label_to_unit.remove(&label) {
      self.unit_to_label.remove(&old_unit);
    }
    self.label_to_unit.insert(label.clone(), unit);
    self.unit_to_label.insert(unit, label);
  }

  fn bind_alias(&mut self, unit: Unit, alias: String) {
    self.alias_to_unit.insert(alias, unit);
  }
}

/// Binds `label` as the display name of `unit`.
///
/// Fails if the label is not a valid unit name, or if it is the symbol
/// of some other unit. A unit may be labelled with its own symbol.
pub fn label(unit: Unit, label: &str) -> Result<(), InvalidLabelError> {
  let mut registry = registry::lock();
  check_name(&registry, unit, label)?;
  registry.labels.bind_label(unit, label.to_owned());
  debug!("Bound label '{}' to {:?}", label, unit);
  Ok(())
}

/// Adds `alias` as an additional name of `unit`, recognized only when
/// parsing.
pub fn alias(unit: Unit, alias: &str) -> Result<(), InvalidLabelError> {
  let mut registry = registry::lock();
  check_name(&registry, unit, alias)?;
  registry.labels.bind_alias(unit, alias.to_owned());
  debug!("Bound alias '{}' to {:?}", alias, unit);
  Ok(())
}

pub(crate) fn label_of(unit: Unit) -> Option<String> {
  registry::lock().labels.label_of(unit).map(str::to_owned)
}

pub(crate) fn unit_for_label(name: &str) -> Option<Unit> {
  registry::lock().labels.unit_for_label(name)
}

pub(crate) fn unit_for_alias(name: &str) -> Option<Unit> {
  registry::lock().labels.unit_for_alias(name)
}

pub(crate) fn ascii_alias_of(unit: Unit) -> Option<String> {
  registry::lock().labels.ascii_alias_of(unit).map(str::to_owned)
}

/// Looks up `name` as a label, then as an alias.
pub(crate) fn unit_for_name(name: &str) -> Option<Unit> {
  let registry = registry::lock();
  registry.labels.unit_for_label(name).or_else(|| registry.labels.unit_for_alias(name))
}

/// Names a catalog unit. If the unit already carries a label (another
/// catalog entry produced the same unit), `label` becomes an alias
/// instead. Names which cannot be bound are logged and skipped.
pub(crate) fn bind_catalog_name(unit: Unit, name: &str, aliases: &[&str]) {
  let existing_label = label_of(unit);
  let result = match (existing_label, unit_for_label(name)) {
    (_, Some(owner)) if owner != unit => {
      warn!("Catalog label '{}' is already bound to {:?}; skipping", name, owner);
      Ok(())
    }
    (Some(existing), _) if existing != name => alias(unit, name),
    _ => label(unit, name),
  };
  if let Err(err) = result {
    warn!("Cannot bind catalog label for {:?}: {}", unit, err);
  }
  for name in aliases {
    if let Err(err) = alias(unit, name) {
      warn!("Cannot bind catalog alias for {:?}: {}", unit, err);
    }
  }
}

fn check_name(registry: &Registry, unit: Unit, name: &str) -> Result<(), InvalidLabelError> {
  if name.is_empty() || !name.chars().all(is_identifier_char) {
    return Err(InvalidLabelError::new(name));
  }
  match registry.symbol_owner(name) {
    Some(owner) if owner != unit => Err(InvalidLabelError::new(name)),
    _ => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::si;
  use crate::units::test_utils::fresh_base;

  #[test]
  fn test_label_overwrites_previous_label() {
    let a = fresh_base("lbl");
    let first = format!("{}_first", a.symbol().unwrap());
    let second = format!("{}_second", a.symbol().unwrap());
    let unit = a.pow(2);
    label(unit, &first).unwrap();
    label(unit, &second).unwrap();
    assert_eq!(label_of(unit), Some(second.clone()));
    assert_eq!(unit_for_label(&first), None);
    assert_eq!(unit_for_label(&second), Some(unit));
  }

  #[test]
  fn test_label_detaches_previous_unit() {
    let a = fresh_base("det");
    let name = format!("{}_shared", a.symbol().unwrap());
    label(a.pow(2), &name).unwrap();
    label(a.pow(3), &name).unwrap();
    assert_eq!(label_of(a.pow(2)), None);
    assert_eq!(unit_for_label(&name), Some(a.pow(3)));
  }

  #[test]
  fn test_label_colliding_with_symbol() {
    let meter = *si::METER;
    let a = fresh_base("col");
    let err = label(a.pow(2), "m").unwrap_err();
    assert_eq!(err, InvalidLabelError::new("m"));
    // A unit may be labelled by its own symbol.
    label(meter, "m").unwrap();
  }

  #[test]
  fn test_invalid_label_characters() {
    let a = fresh_base("inv");
    assert!(label(a, "").is_err());
    assert!(label(a, "m/s").is_err());
    assert!(label(a, "m2").is_err());
    assert!(alias(a, "with space").is_err());
  }

  #[test]
  fn test_alias_lookup() {
    let a = fresh_base("als");
    let first = format!("{}_one", a.symbol().unwrap());
    let second = format!("{}_two", a.symbol().unwrap());
    alias(a, &first).unwrap();
    alias(a, &second).unwrap();
    assert_eq!(unit_for_name(&first), Some(a));
    assert_eq!(unit_for_name(&second), Some(a));
    assert_eq!(label_of(a), None);
  }

  #[test]
  fn test_ascii_alias() {
    let a = fresh_base("asc");
    let unit = a.pow(2);
    assert_eq!(ascii_alias_of(unit), None);
    alias(unit, &format!("µ{}", a.symbol().unwrap())).unwrap();
    assert_eq!(ascii_alias_of(unit), None);
    let long = format!("{}_long", a.symbol().unwrap());
    let short = format!("{}_x", a.symbol().unwrap());
    alias(unit, &long).unwrap();
    alias(unit, &short).unwrap();
    assert_eq!(ascii_alias_of(unit), Some(short));
  }

  #[test]
  fn test_label_takes_priority_over_alias() {
    let a = fresh_base("pri");
    let b = fresh_base("pri");
    let name = format!("{}_name", a.symbol().unwrap());
    alias(a, &name).unwrap();
    label(b, &name).unwrap();
    assert_eq!(unit_for_name(&name), Some(b));
    assert_eq!(unit_for_alias(&name), Some(a));
  }
}
