//! Process-wide unit state: the interning table, the symbol table,
//! the label database, and every memoization cache.
//!
//! All of it lives behind a single mutex. Callers must never hold the
//! lock while performing unit arithmetic, since arithmetic itself
//! takes the lock.

use super::converter::Converter;
use super::error::DuplicateSymbolError;
use super::format::labels::LabelTable;
use super::unit::{Unit, UnitData, UnitKind};

use once_cell::sync::Lazy;
use log::debug;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

static REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::default()));

#[derive(Debug, Default)]
pub(crate) struct Registry {
  units: HashMap<UnitKind, Unit>,
  symbols: HashMap<String, Unit>,
  next_id: usize,
  memo: HashMap<MemoKey, Unit>,
  pub(crate) labels: LabelTable,
  pub(crate) dimensions: DimensionCache,
}

/// Results of unit arithmetic, keyed by operands. These depend only
/// on the structure of the operands, so they are never invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum MemoKey {
  Multiply(Unit, Unit),
  Divide(Unit, Unit),
  Pow(Unit, i32),
  Root(Unit, i32),
  SystemUnit(Unit),
}

/// Context-sensitive dimension data. The caches are cleared, and the
/// generation bumped, whenever a base unit's dimension is rebound.
#[derive(Debug, Default)]
pub(crate) struct DimensionCache {
  pub(crate) generation: u64,
  pub(crate) rebound: HashMap<Unit, (Unit, Converter)>,
  pub(crate) dimensions: HashMap<Unit, Unit>,
  pub(crate) to_dimension: HashMap<Unit, Converter>,
}

pub(crate) fn lock() -> MutexGuard<'static, Registry> {
  REGISTRY.lock().expect("poisoned unit registry")
}

/// Interns a unit which may carry a symbol.
pub(crate) fn intern(kind: UnitKind) -> Result<Unit, DuplicateSymbolError> {
  lock().intern(kind)
}

/// Interns a unit which carries no symbol, and therefore cannot
/// collide with anything.
pub(crate) fn intern_anonymous(kind: UnitKind) -> Unit {
  lock().intern_anonymous(kind)
}

pub(crate) fn search_symbol(symbol: &str) -> Option<Unit> {
  lock().symbols.get(symbol).copied()
}

/// Returns the memoized result for `key`, or computes and stores it.
/// The computation runs without the lock held.
pub(crate) fn memoize(key: MemoKey, compute: impl FnOnce() -> Unit) -> Unit {
  if let Some(unit) = lock().memo.get(&key) {
    return *unit;
  }
  let unit = compute();
  *lock().memo.entry(key).or_insert(unit)
}

/// As [`memoize`], for a computation which may fail. Failures are not
/// stored.
pub(crate) fn try_memoize<E>(key: MemoKey, compute: impl FnOnce() -> Result<Unit, E>) -> Result<Unit, E> {
  if let Some(unit) = lock().memo.get(&key) {
    return Ok(*unit);
  }
  let unit = compute()?;
  Ok(*lock().memo.entry(key).or_insert(unit))
}

impl Registry {
  pub(crate) fn intern(&mut self, kind: UnitKind) -> Result<Unit, DuplicateSymbolError> {
    if let Some(existing) = self.units.get(&kind) {
      return Ok(*existing);
    }
    let Some(symbol) = kind.symbol().map(str::to_owned) else {
      return Ok(self.insert(kind));
    };
    if self.symbols.contains_key(&symbol) || self.labels.unit_for_label(&symbol).is_some() {
      return Err(DuplicateSymbolError::new(symbol));
    }
    let unit = self.insert(kind);
    self.symbols.insert(symbol, unit);
    Ok(unit)
  }

  pub(crate) fn intern_anonymous(&mut self, kind: UnitKind) -> Unit {
    debug_assert!(kind.symbol().is_none(), "Anonymous unit carries a symbol");
    if let Some(existing) = self.units.get(&kind) {
      return *existing;
    }
    self.insert(kind)
  }

  pub(crate) fn symbol_owner(&self, symbol: &str) -> Option<Unit> {
    self.symbols.get(symbol).copied()
  }

  fn insert(&mut self, kind: UnitKind) -> Unit {
    let id = self.next_id;
    self.next_id += 1;
    // Registered units live for the rest of the process.
    let data: &'static UnitData = Box::leak(Box::new(UnitData::new(id, kind.clone())));
    let unit = Unit::from_data(data);
    debug!("Registered unit #{}: {:?}", id, kind);
    self.units.insert(kind, unit);
    unit
  }
}

impl DimensionCache {
  pub(crate) fn invalidate(&mut self) {
    self.generation += 1;
    self.dimensions.clear();
    self.to_dimension.clear();
  }
}
