//! Lexical scopes and the symbols the expression binder resolves.
//!
//! Scope construction belongs to an earlier stage; this module only stores
//! what that stage declared so binding can look names up.

use std::collections::HashMap;

use crate::const_eval::ConstValue;
use crate::ids::{ScopeId, TypeId};
use strobe_common::Ident;

/// A named entity visible in a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A net or variable.
    Variable {
        /// Declared type.
        ty: TypeId,
    },
    /// A parameter with its resolved value.
    Parameter {
        /// Declared type.
        ty: TypeId,
        /// Resolved value.
        value: ConstValue,
    },
    /// A clocking block.
    ClockingBlock,
}

/// One level of the scope tree: a module, interface, program or block.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Name of the scope.
    pub name: Ident,
    /// The enclosing scope, `None` for the root.
    pub parent: Option<ScopeId>,
    symbols: HashMap<Ident, Symbol>,
    default_clocking: Option<Ident>,
}

impl Scope {
    /// Creates an empty scope.
    pub fn new(name: Ident, parent: Option<ScopeId>) -> Self {
        Self {
            name,
            parent,
            symbols: HashMap::new(),
            default_clocking: None,
        }
    }

    /// Declares `name`, returning the symbol it shadows in this scope, if any.
    pub fn declare(&mut self, name: Ident, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(name, symbol)
    }

    /// Declares a clocking block, optionally as the scope's default clocking.
    pub fn declare_clocking(&mut self, name: Ident, is_default: bool) {
        self.symbols.insert(name, Symbol::ClockingBlock);
        if is_default {
            self.default_clocking = Some(name);
        }
    }

    /// Looks `name` up in this scope only.
    pub fn get(&self, name: Ident) -> Option<&Symbol> {
        self.symbols.get(&name)
    }

    /// The default clocking block declared directly in this scope.
    pub fn default_clocking(&self) -> Option<Ident> {
        self.default_clocking
    }

    /// Number of symbols declared directly in this scope.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if nothing is declared in this scope.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strobe_common::Interner;

    #[test]
    fn declare_and_get() {
        let interner = Interner::new();
        let clk = interner.get_or_intern("clk");
        let mut scope = Scope::new(interner.get_or_intern("top"), None);
        let ty = TypeId::from_raw(0);
        assert!(scope.declare(clk, Symbol::Variable { ty }).is_none());
        assert_eq!(scope.get(clk), Some(&Symbol::Variable { ty }));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn redeclaration_returns_previous() {
        let interner = Interner::new();
        let n = interner.get_or_intern("N");
        let mut scope = Scope::new(interner.get_or_intern("top"), None);
        let ty = TypeId::from_raw(0);
        scope.declare(
            n,
            Symbol::Parameter {
                ty,
                value: ConstValue::Int(1),
            },
        );
        let prev = scope.declare(n, Symbol::Variable { ty });
        assert!(matches!(prev, Some(Symbol::Parameter { .. })));
    }

    #[test]
    fn default_clocking_only_when_requested() {
        let interner = Interner::new();
        let cb = interner.get_or_intern("cb");
        let other = interner.get_or_intern("cb2");
        let mut scope = Scope::new(interner.get_or_intern("top"), None);
        scope.declare_clocking(other, false);
        assert_eq!(scope.default_clocking(), None);
        scope.declare_clocking(cb, true);
        assert_eq!(scope.default_clocking(), Some(cb));
        assert_eq!(scope.get(other), Some(&Symbol::ClockingBlock));
    }
}
