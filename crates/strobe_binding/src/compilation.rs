//! The [`Compilation`]: owner of every bound node, type and scope.

use crate::arena::Arena;
use crate::expr::Expression;
use crate::ids::{ExprId, ScopeId, TimingId};
use crate::scope::{Scope, Symbol};
use crate::timing::{TimingControl, TimingControlKind, TimingNode};
use crate::types::TypeDb;
use strobe_common::Ident;
use strobe_syntax::TimingControlSyntax;

/// Arena-backed storage for one binding session.
///
/// Nodes are appended and never freed individually; everything is released
/// when the compilation is dropped. `'s` is the lifetime of the syntax tree
/// that bound timing controls point back to.
#[derive(Debug)]
pub struct Compilation<'s> {
    /// Interned types.
    pub types: TypeDb,
    exprs: Arena<ExprId, Expression>,
    timing: Arena<TimingId, TimingNode<'s>>,
    scopes: Arena<ScopeId, Scope>,
    root: ScopeId,
}

impl<'s> Compilation<'s> {
    /// Creates a compilation with a single root scope named `root_name`.
    pub fn new(root_name: Ident) -> Self {
        let mut scopes = Arena::new();
        let root = scopes.alloc(Scope::new(root_name, None));
        Self {
            types: TypeDb::new(),
            exprs: Arena::new(),
            timing: Arena::new(),
            scopes,
            root,
        }
    }

    /// The root scope.
    pub fn root_scope(&self) -> ScopeId {
        self.root
    }

    /// Adds a child scope of `parent`.
    pub fn add_scope(&mut self, name: Ident, parent: ScopeId) -> ScopeId {
        self.scopes.alloc(Scope::new(name, Some(parent)))
    }

    /// Returns a scope.
    pub fn scope(&self, id: ScopeId) -> &Scope {
        self.scopes.get(id)
    }

    /// Returns a scope mutably, for declaring symbols.
    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        self.scopes.get_mut(id)
    }

    /// Resolves `name` starting at `scope` and walking outwards.
    pub fn lookup(&self, scope: ScopeId, name: Ident) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scopes.get(id);
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// The default clocking block in effect for `scope`, if any.
    pub fn default_clocking(&self, scope: ScopeId) -> Option<Ident> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scopes.get(id);
            if let Some(cb) = scope.default_clocking() {
                return Some(cb);
            }
            current = scope.parent;
        }
        None
    }

    /// Stores a bound expression.
    pub fn emplace_expr(&mut self, expr: Expression) -> ExprId {
        self.exprs.alloc(expr)
    }

    /// Returns a bound expression.
    pub fn expr(&self, id: ExprId) -> &Expression {
        self.exprs.get(id)
    }

    /// Stores a timing control without provenance.
    pub fn emplace_timing(&mut self, control: TimingControl) -> TimingId {
        self.timing.alloc(TimingNode {
            control,
            syntax: None,
        })
    }

    /// Returns a timing control together with its provenance.
    pub fn timing(&self, id: TimingId) -> &TimingNode<'s> {
        self.timing.get(id)
    }

    /// Returns a timing control.
    pub fn control(&self, id: TimingId) -> &TimingControl {
        &self.timing.get(id).control
    }

    /// Returns the kind of a timing control.
    pub fn kind(&self, id: TimingId) -> TimingControlKind {
        self.control(id).kind()
    }

    /// Records the syntax a timing control was bound from.
    pub(crate) fn set_syntax(&mut self, id: TimingId, syntax: &'s TimingControlSyntax) {
        let node = self.timing.get_mut(id);
        debug_assert!(node.syntax.is_none(), "provenance stamped twice");
        node.syntax = Some(syntax);
    }

    /// Number of bound expressions.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Number of bound timing controls, including sentinels.
    pub fn timing_count(&self) -> usize {
        self.timing.len()
    }

    /// Calls `f` for every expression reachable from `id`, depth-first in
    /// source order. Children of invalid sentinels are included.
    pub fn visit_exprs<F: FnMut(ExprId)>(&self, id: TimingId, f: &mut F) {
        match self.control(id) {
            TimingControl::Invalid(ctrl) => {
                if let Some(child) = ctrl.child {
                    self.visit_exprs(child, f);
                }
            }
            TimingControl::Delay(ctrl) => f(ctrl.expr),
            TimingControl::CycleDelay(ctrl) => f(ctrl.expr),
            TimingControl::Delay3(ctrl) => {
                f(ctrl.expr1);
                if let Some(e) = ctrl.expr2 {
                    f(e);
                }
                if let Some(e) = ctrl.expr3 {
                    f(e);
                }
            }
            TimingControl::SignalEvent(ctrl) => {
                f(ctrl.expr);
                if let Some(cond) = ctrl.iff_condition {
                    f(cond);
                }
            }
            TimingControl::EventList(ctrl) => {
                for &event in &ctrl.events {
                    self.visit_exprs(event, f);
                }
            }
            TimingControl::RepeatedEvent(ctrl) => {
                f(ctrl.expr);
                self.visit_exprs(ctrl.event, f);
            }
            TimingControl::ImplicitEvent(_) | TimingControl::OneStepDelay(_) => {}
        }
    }
}
