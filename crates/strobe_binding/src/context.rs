//! The binding context threaded through every binding call.

use crate::compilation::Compilation;
use crate::const_eval::{self, ConstValue};
use crate::errors;
use crate::expr::{ExpressionBinder, Expression};
use crate::flags::BindFlags;
use crate::ids::{ExprId, ScopeId, TypeId};
use strobe_common::Interner;
use strobe_config::{BindOptions, LintLevel};
use strobe_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use strobe_syntax::Expr;

/// Everything a binding call needs: where it is, what it may do, and where
/// its results and diagnostics go.
///
/// The compilation is borrowed mutably and the sink by shared reference, so
/// callers that bind several scopes in parallel give each thread its own
/// compilation.
pub struct BindContext<'a, 's> {
    /// Arena, types and scopes.
    pub comp: &'a mut Compilation<'s>,
    /// The scope names are resolved in.
    pub scope: ScopeId,
    /// Contextual flags for this location.
    pub flags: BindFlags,
    /// Where diagnostics go.
    pub sink: &'a DiagnosticSink,
    /// Interner used to print names.
    pub interner: &'a Interner,
    /// The expression binding service.
    pub binder: &'a dyn ExpressionBinder,
    /// Advisory toggles and lint levels.
    pub options: &'a BindOptions,
}

impl<'a, 's> BindContext<'a, 's> {
    /// Creates a context with no flags set.
    pub fn new(
        comp: &'a mut Compilation<'s>,
        scope: ScopeId,
        sink: &'a DiagnosticSink,
        interner: &'a Interner,
        binder: &'a dyn ExpressionBinder,
        options: &'a BindOptions,
    ) -> Self {
        Self {
            comp,
            scope,
            flags: BindFlags::empty(),
            sink,
            interner,
            binder,
            options,
        }
    }

    /// Replaces the contextual flags.
    pub fn with_flags(mut self, flags: BindFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Reports a diagnostic, applying the configured lint levels.
    ///
    /// Errors are always reported. Other diagnostics are dropped when allowed
    /// and raised to errors when denied.
    pub fn add_diag(&self, mut diag: Diagnostic) {
        if !diag.is_error() {
            match self.options.lint.level_for(diag.code) {
                Some(LintLevel::Allow) => return,
                Some(LintLevel::Deny) => diag.severity = Severity::Error,
                None => {}
            }
        }
        self.sink.emit(diag);
    }

    /// Binds an expression with the context flags plus `extra`.
    pub fn bind_expression(&mut self, syntax: &Expr, extra: BindFlags) -> ExprId {
        let binder = self.binder;
        let flags = self.flags | extra;
        binder.bind(syntax, self, flags)
    }

    /// Returns a bound expression.
    pub fn expr(&self, id: ExprId) -> &Expression {
        self.comp.expr(id)
    }

    /// Renders a type for a diagnostic message.
    pub fn type_name(&self, ty: TypeId) -> String {
        self.comp.types.describe(ty, self.interner)
    }

    /// Checks that `id` can be used as a condition, reporting `E308` if not.
    ///
    /// Invalid expressions fail without a further diagnostic.
    pub fn require_boolean_convertible(&self, id: ExprId) -> bool {
        let expr = self.comp.expr(id);
        if expr.is_bad() {
            return false;
        }
        if self.comp.types.is_boolean_convertible(expr.ty) {
            return true;
        }
        self.add_diag(errors::error_not_boolean_convertible(
            &self.type_name(expr.ty),
            expr.span,
        ));
        false
    }

    /// Evaluates `id` if it is a compile-time constant.
    pub fn try_eval(&self, id: ExprId) -> Option<ConstValue> {
        const_eval::try_eval(self.comp, id)
    }
}
