//! The signal environment: name-to-value bindings with call scoping.
//!
//! [`Environment`] owns an arena of scope records addressed by [`ScopeId`].
//! The root scope holds the circuit's signal bindings for the whole run;
//! child scopes exist only for the duration of one function call and hold
//! the call's formal-parameter bindings. Reads walk the parent chain; writes
//! always land in the local scope, so a call can never mutate its caller's
//! bindings.

use std::collections::HashMap;

use crate::error::SimError;

/// Opaque ID for a scope record in an [`Environment`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    /// Creates a `ScopeId` from a raw index.
    ///
    /// Crate-private: valid IDs come only from [`Environment::ROOT`] and
    /// [`Environment::child_scope`].
    pub(crate) fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// One scope record: local bindings plus an optional parent.
#[derive(Debug, Clone, Default)]
struct Scope {
    parent: Option<ScopeId>,
    bindings: HashMap<String, bool>,
}

/// A chained mapping from signal name to boolean value.
///
/// One `Environment` exists per simulation run. Scopes are stored in an
/// arena indexed by [`ScopeId`], avoiding parent pointers between caller
/// and callee; a child scope never outlives the call that created it.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    /// The root scope, holding the circuit's signal bindings.
    pub const ROOT: ScopeId = ScopeId(0);

    /// Creates an environment containing only the empty root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Creates a fresh scope whose parent is `parent` and returns its ID.
    ///
    /// Used only for function-call bodies.
    pub fn child_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(parent),
            bindings: HashMap::new(),
        });
        id
    }

    /// Binds or overwrites `name` in the given scope only.
    ///
    /// Writes never walk the parent chain: a child scope's `set` cannot
    /// mutate an ancestor's binding.
    ///
    /// # Panics
    ///
    /// Panics if `scope` was discarded by [`truncate`](Environment::truncate).
    pub fn set(&mut self, scope: ScopeId, name: impl Into<String>, value: bool) {
        self.scopes[scope.as_raw() as usize]
            .bindings
            .insert(name.into(), value);
    }

    /// Reads `name`, walking from the given scope up the parent chain.
    ///
    /// Fails with [`SimError::UndefinedSignal`] if no scope on the chain
    /// binds the name. A scope discarded by [`truncate`](Environment::truncate)
    /// ends the chain, so reading through a stale ID fails the same way.
    pub fn get(&self, scope: ScopeId, name: &str) -> Result<bool, SimError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(record) = self.scopes.get(id.as_raw() as usize) else {
                break;
            };
            if let Some(&value) = record.bindings.get(name) {
                return Ok(value);
            }
            current = record.parent;
        }
        Err(SimError::UndefinedSignal { name: name.into() })
    }

    /// Returns `true` if `name` is bound anywhere on the parent chain.
    pub fn has(&self, scope: ScopeId, name: &str) -> bool {
        self.get(scope, name).is_ok()
    }

    /// Returns the number of live scopes.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Discards every scope allocated at or after `mark`.
    ///
    /// The root scope is never discarded. Callers must not retain IDs of
    /// discarded scopes.
    pub fn truncate(&mut self, mark: usize) {
        self.scopes.truncate(mark.max(1));
    }

    /// Returns a name-sorted snapshot of every binding visible from the
    /// given scope, innermost binding winning on shadowed names.
    ///
    /// This is the enumerable view consumed by external presentation layers.
    pub fn bindings(&self, scope: ScopeId) -> Vec<(String, bool)> {
        let mut seen: HashMap<&str, bool> = HashMap::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(record) = self.scopes.get(id.as_raw() as usize) else {
                break;
            };
            for (name, &value) in &record.bindings {
                seen.entry(name.as_str()).or_insert(value);
            }
            current = record.parent;
        }
        let mut out: Vec<(String, bool)> = seen
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        out.sort();
        out
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
