//! Delay controls: `#value`, `#(rise, fall, turn_off)`, `##cycles` and
//! `#1step`.

use crate::context::BindContext;
use crate::errors;
use crate::flags::BindFlags;
use crate::ids::{ExprId, TimingId};
use crate::timing::TimingControl;
use strobe_syntax::{Delay3Syntax, DelaySyntax, Expr, ParamAssignment, ParameterValueAssignment};

/// `#value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayControl {
    /// The delay amount; numeric when the node is valid.
    pub expr: ExprId,
}

/// `#(rise, fall, turn_off)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay3Control {
    /// Rise delay.
    pub expr1: ExprId,
    /// Fall delay.
    pub expr2: Option<ExprId>,
    /// Turn-off delay.
    pub expr3: Option<ExprId>,
}

/// `##value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDelayControl {
    /// Number of clock cycles; integral when the node is valid.
    pub expr: ExprId,
}

/// `#1step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneStepDelayControl;

/// Reports `E301` and returns `false` if `expr` is not numeric.
fn check_numeric(ctx: &BindContext<'_, '_>, expr: ExprId) -> bool {
    let expr = ctx.expr(expr);
    if ctx.comp.types.is_numeric(expr.ty) {
        return true;
    }
    ctx.add_diag(errors::error_delay_not_numeric(
        &ctx.type_name(expr.ty),
        expr.span,
    ));
    false
}

/// The value of a positional entry, or `None` for a named one.
fn ordered_value(param: &ParamAssignment) -> Option<&Expr> {
    match param {
        ParamAssignment::Ordered { expr, .. } => Some(expr),
        ParamAssignment::Named { .. } => None,
    }
}

impl DelayControl {
    /// Binds `#value`.
    pub fn from_syntax(syntax: &DelaySyntax, ctx: &mut BindContext<'_, '_>) -> TimingId {
        let expr = ctx.bind_expression(&syntax.value, BindFlags::empty());
        let result = ctx
            .comp
            .emplace_timing(TimingControl::Delay(DelayControl { expr }));
        if ctx.expr(expr).is_bad() || !check_numeric(ctx, expr) {
            return TimingControl::bad(ctx.comp, Some(result));
        }
        result
    }

    /// Binds a net delay written as a parameter value assignment, e.g. the
    /// `#(5)` of `wire #(5) w;`.
    ///
    /// The list must hold exactly one positional entry; anything else is
    /// reported as `E302`. A bad value fails without a partial node.
    pub fn from_params(
        params: &ParameterValueAssignment,
        ctx: &mut BindContext<'_, '_>,
    ) -> TimingId {
        let value = match params.params.as_slice() {
            [single] => ordered_value(single),
            _ => None,
        };
        let Some(value) = value else {
            ctx.add_diag(errors::error_expected_net_delay(params.span));
            return TimingControl::bad(ctx.comp, None);
        };

        let expr = ctx.bind_expression(value, BindFlags::empty());
        if ctx.expr(expr).is_bad() || !check_numeric(ctx, expr) {
            return TimingControl::bad(ctx.comp, None);
        }
        ctx.comp
            .emplace_timing(TimingControl::Delay(DelayControl { expr }))
    }
}

impl Delay3Control {
    /// Binds `#(rise, fall, turn_off)`.
    ///
    /// All present values are bound before any is checked. Only the first
    /// non-numeric value is reported.
    pub fn from_syntax(syntax: &Delay3Syntax, ctx: &mut BindContext<'_, '_>) -> TimingId {
        let expr1 = ctx.bind_expression(&syntax.delay1, BindFlags::empty());
        let expr2 = syntax
            .delay2
            .as_ref()
            .map(|e| ctx.bind_expression(e, BindFlags::empty()));
        let expr3 = syntax
            .delay3
            .as_ref()
            .map(|e| ctx.bind_expression(e, BindFlags::empty()));

        let result = ctx.comp.emplace_timing(TimingControl::Delay3(Delay3Control {
            expr1,
            expr2,
            expr3,
        }));

        let present: Vec<ExprId> = std::iter::once(expr1).chain(expr2).chain(expr3).collect();
        if present.iter().any(|&e| ctx.expr(e).is_bad())
            || !present.iter().all(|&e| check_numeric(ctx, e))
        {
            return TimingControl::bad(ctx.comp, Some(result));
        }
        result
    }

    /// Binds a net delay of one to three positional values, e.g. the
    /// `#(1, 2)` of `wire #(1, 2) w;`.
    ///
    /// Named entries and lists of the wrong length are reported as `E302`.
    /// The first bad value fails the whole delay without a partial node.
    pub fn from_params(
        params: &ParameterValueAssignment,
        ctx: &mut BindContext<'_, '_>,
    ) -> TimingId {
        if params.params.is_empty() || params.params.len() > 3 {
            ctx.add_diag(errors::error_expected_net_delay(params.span));
            return TimingControl::bad(ctx.comp, None);
        }

        let mut delays = [None; 3];
        for (slot, param) in delays.iter_mut().zip(&params.params) {
            let Some(value) = ordered_value(param) else {
                ctx.add_diag(errors::error_expected_net_delay(param.span()));
                return TimingControl::bad(ctx.comp, None);
            };
            let expr = ctx.bind_expression(value, BindFlags::empty());
            if ctx.expr(expr).is_bad() || !check_numeric(ctx, expr) {
                return TimingControl::bad(ctx.comp, None);
            }
            *slot = Some(expr);
        }

        let [Some(expr1), expr2, expr3] = delays else {
            // the list is non-empty, so the first slot is always filled
            return TimingControl::bad(ctx.comp, None);
        };
        ctx.comp.emplace_timing(TimingControl::Delay3(Delay3Control {
            expr1,
            expr2,
            expr3,
        }))
    }
}

impl CycleDelayControl {
    /// Binds `##value`.
    ///
    /// A missing default clocking block is reported as `W301` but does not
    /// invalidate the node.
    pub fn from_syntax(syntax: &DelaySyntax, ctx: &mut BindContext<'_, '_>) -> TimingId {
        let expr = ctx.bind_expression(&syntax.value, BindFlags::empty());
        let result = ctx
            .comp
            .emplace_timing(TimingControl::CycleDelay(CycleDelayControl { expr }));
        let bound = ctx.expr(expr);
        if bound.is_bad() {
            return TimingControl::bad(ctx.comp, Some(result));
        }
        if !ctx.comp.types.is_integral(bound.ty) {
            ctx.add_diag(errors::error_must_be_integral(
                &ctx.type_name(bound.ty),
                bound.span,
            ));
            return TimingControl::bad(ctx.comp, Some(result));
        }

        if ctx.options.binding.warn_missing_default_clocking
            && ctx.comp.default_clocking(ctx.scope).is_none()
        {
            ctx.add_diag(errors::warn_no_default_clocking(syntax.span));
        }
        result
    }
}

impl OneStepDelayControl {
    /// Binds `#1step`. There is nothing to check.
    pub fn from_syntax(ctx: &mut BindContext<'_, '_>) -> TimingId {
        ctx.comp
            .emplace_timing(TimingControl::OneStepDelay(OneStepDelayControl))
    }
}
