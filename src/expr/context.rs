
//! Shared construction state: the unique-name counter and the memo
//! cache for applied functions.

use super::Expr;
use super::symbol::Symbol;
use super::function::ApplyKey;

use once_cell::sync::Lazy;
use log::trace;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL_CONTEXT: Lazy<Context> = Lazy::new(Context::new);

static NEXT_CONTEXT: AtomicU64 = AtomicU64::new(0);

/// The state consulted while constructing expressions.
///
/// A `Context` owns a monotonically increasing counter, from which
/// dummy symbols (used by [`Lambda`](super::lambda::Lambda)) and
/// unnamed [`WildFunction`](super::function::wild::WildFunction)s
/// draw their unique ids, and the memo cache for applied-function
/// construction. Two ids drawn from the same context are never equal,
/// and dummies are tagged with the id of the context that minted
/// them, so dummies from different contexts never collide either.
///
/// Most constructors use [`Context::global`]. The `_in` / `_with`
/// variants accept an explicit context, so that tests can observe
/// the counter or the cache in isolation.
#[derive(Debug)]
pub struct Context {
  id: u64,
  counter: AtomicU64,
  cache: Mutex<HashMap<ApplyKey, Expr>>,
}

impl Context {
  pub fn new() -> Self {
    Self {
      id: NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed),
      counter: AtomicU64::new(0),
      cache: Mutex::new(HashMap::new()),
    }
  }

  /// The process-wide default context.
  pub fn global() -> &'static Context {
    &GLOBAL_CONTEXT
  }

  /// Draws the next id from the counter. The first id is 1.
  pub fn next_id(&self) -> u64 {
    self.counter.fetch_add(1, Ordering::SeqCst) + 1
  }

  /// A fresh dummy symbol with the name and assumptions of `like`.
  pub fn dummy(&self, like: &Symbol) -> Symbol {
    like.clone().into_dummy(self.id, self.next_id())
  }

  /// A fresh name for an unnamed wildcard.
  pub fn wild_name(&self) -> String {
    format!("Wf{}", self.next_id())
  }

  pub(crate) fn cached(&self, key: &ApplyKey) -> Option<Expr> {
    let hit = self.lock_cache().get(key).cloned();
    if hit.is_some() {
      trace!("Construction cache hit for {}", key.func().name());
    }
    hit
  }

  pub(crate) fn remember(&self, key: ApplyKey, value: Expr) {
    self.lock_cache().insert(key, value);
  }

  /// Number of memoized constructions.
  pub fn cache_len(&self) -> usize {
    self.lock_cache().len()
  }

  pub fn clear_cache(&self) {
    self.lock_cache().clear();
  }

  fn lock_cache(&self) -> MutexGuard<'_, HashMap<ApplyKey, Expr>> {
    // The cache holds only finished values, so a panic elsewhere
    // cannot leave it half-updated.
    self.cache.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl Default for Context {
  fn default() -> Self {
    Self::new()
  }
}
