//! Named function definitions and the definition table.
//!
//! A [`Def`] is a reusable boolean function over formal signal parameters,
//! e.g. `def xor(A, B) = A * /B + /A * B`. Definitions are collected into a
//! [`DefTable`], populated once at circuit-construction time and never
//! mutated during simulation.

use crate::error::IrError;
use crate::expr::Expr;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named, fixed-arity boolean function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Def {
    /// The function name, e.g. `"xor"`.
    pub name: String,
    /// The ordered formal parameter names. Pairwise distinct within one `Def`.
    pub params: Vec<String>,
    /// The body expression, evaluated in a fresh scope holding only the
    /// formal parameter bindings.
    pub body: Expr,
}

impl Def {
    /// Creates a definition, validating that parameter names are pairwise
    /// distinct.
    pub fn new(
        name: impl Into<String>,
        params: Vec<String>,
        body: Expr,
    ) -> Result<Self, IrError> {
        let name = name.into();
        for (i, p) in params.iter().enumerate() {
            if params[..i].contains(p) {
                return Err(IrError::DuplicateParam {
                    function: name,
                    param: p.clone(),
                });
            }
        }
        Ok(Self { name, params, body })
    }

    /// Returns the number of formal parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A flat mapping from function name to [`Def`].
///
/// Lookup is by name only; arity checking happens at call sites in the
/// evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefTable {
    defs: HashMap<String, Def>,
}

impl DefTable {
    /// Creates an empty definition table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, rejecting a duplicate name.
    pub fn insert(&mut self, def: Def) -> Result<(), IrError> {
        if self.defs.contains_key(&def.name) {
            return Err(IrError::DuplicateDef {
                name: def.name.clone(),
            });
        }
        self.defs.insert(def.name.clone(), def);
        Ok(())
    }

    /// Looks up a definition by name.
    pub fn get(&self, name: &str) -> Option<&Def> {
        self.defs.get(name)
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns `true` if the table holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterates over all definitions in arbitrary order.
    pub fn values(&self) -> impl Iterator<Item = &Def> {
        self.defs.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_def() -> Def {
        // xor(A, B) = A * /B + /A * B
        Def::new(
            "xor",
            vec!["A".into(), "B".into()],
            Expr::or(
                Expr::and(Expr::signal("A"), Expr::not(Expr::signal("B"))),
                Expr::and(Expr::not(Expr::signal("A")), Expr::signal("B")),
            ),
        )
        .unwrap()
    }

    #[test]
    fn def_arity() {
        assert_eq!(xor_def().arity(), 2);
    }

    #[test]
    fn duplicate_param_rejected() {
        let err = Def::new(
            "bad",
            vec!["A".into(), "A".into()],
            Expr::signal("A"),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate formal parameter `A` in definition of `bad`"
        );
    }

    #[test]
    fn table_insert_and_get() {
        let mut table = DefTable::new();
        table.insert(xor_def()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("xor").is_some());
        assert!(table.get("nand").is_none());
    }

    #[test]
    fn duplicate_def_rejected() {
        let mut table = DefTable::new();
        table.insert(xor_def()).unwrap();
        let err = table.insert(xor_def()).unwrap_err();
        assert_eq!(err.to_string(), "duplicate definition of function `xor`");
    }

    #[test]
    fn empty_table() {
        let table = DefTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn serde_roundtrip() {
        let mut table = DefTable::new();
        table.insert(xor_def()).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        let back: DefTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, back);
    }
}
