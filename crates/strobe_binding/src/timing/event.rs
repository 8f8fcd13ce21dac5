//! Event controls: `@sig`, `@(posedge clk iff en)`, `@(a or b)`, `@*` and
//! `repeat (n) @(...)`.

use crate::context::BindContext;
use crate::errors;
use crate::flags::BindFlags;
use crate::ids::{ExprId, TimingId};
use crate::timing::{EdgeKind, TimingControl};
use strobe_syntax::{
    EventControlSyntax, EventExpr, ImplicitEventControlSyntax, RepeatedEventControlSyntax,
    SignalEventExpr,
};
use tracing::trace;

/// A single signal event, e.g. `posedge clk iff en`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalEventControl {
    /// Edge polarity.
    pub edge: EdgeKind,
    /// The signal. May be a `void`-typed clocking block reference when
    /// `edge` is [`EdgeKind::None`].
    pub expr: ExprId,
    /// The `iff` guard.
    pub iff_condition: Option<ExprId>,
}

/// Two or more events, flattened from an `or`/`,` tree in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListControl {
    /// The events.
    pub events: Vec<TimingId>,
}

/// `@*`. The sensitivity list is inferred later from the enclosing statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImplicitEventControl;

/// `repeat (expr) event`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatedEventControl {
    /// Repeat count; numeric when the node is valid.
    pub expr: ExprId,
    /// The repeated event.
    pub event: TimingId,
}

impl SignalEventControl {
    /// Binds `[edge] expr [iff cond]` from inside an event expression.
    pub fn from_syntax(syntax: &SignalEventExpr, ctx: &mut BindContext<'_, '_>) -> TimingId {
        let edge = EdgeKind::from_keyword(syntax.edge);
        let expr = ctx.bind_expression(
            &syntax.expr,
            BindFlags::EVENT_EXPRESSION | BindFlags::ALLOW_CLOCKING_BLOCK,
        );
        let iff_condition = syntax
            .iff
            .as_ref()
            .map(|iff| ctx.bind_expression(&iff.condition, BindFlags::EVENT_EXPRESSION));
        Self::from_expr(edge, expr, iff_condition, ctx)
    }

    /// Binds `@name`.
    pub fn from_event_control(
        syntax: &EventControlSyntax,
        ctx: &mut BindContext<'_, '_>,
    ) -> TimingId {
        let expr = ctx.bind_expression(
            &syntax.event_name,
            BindFlags::EVENT_EXPRESSION | BindFlags::ALLOW_CLOCKING_BLOCK,
        );
        Self::from_expr(EdgeKind::None, expr, None, ctx)
    }

    /// Builds and validates a signal event from already bound expressions.
    ///
    /// A constant `expr` is reported as `W300` whether or not the other
    /// checks pass.
    pub fn from_expr(
        edge: EdgeKind,
        expr: ExprId,
        iff_condition: Option<ExprId>,
        ctx: &mut BindContext<'_, '_>,
    ) -> TimingId {
        let result = ctx
            .comp
            .emplace_timing(TimingControl::SignalEvent(SignalEventControl {
                edge,
                expr,
                iff_condition,
            }));
        if ctx.expr(expr).is_bad() {
            return TimingControl::bad(ctx.comp, Some(result));
        }

        let valid = check_signal(edge, expr, iff_condition, ctx);

        if ctx.options.binding.warn_constant_event && ctx.try_eval(expr).is_some() {
            ctx.add_diag(errors::warn_constant_event(ctx.expr(expr).span));
        }

        if valid {
            result
        } else {
            TimingControl::bad(ctx.comp, Some(result))
        }
    }
}

fn check_signal(
    edge: EdgeKind,
    expr: ExprId,
    iff_condition: Option<ExprId>,
    ctx: &BindContext<'_, '_>,
) -> bool {
    let bound = ctx.expr(expr);
    let types = &ctx.comp.types;
    if edge == EdgeKind::None {
        // clocking blocks are void-typed and accepted without an edge
        if types.is_aggregate(bound.ty) || types.is_handle(bound.ty) {
            ctx.add_diag(errors::error_invalid_event_expression(
                &ctx.type_name(bound.ty),
                bound.span,
            ));
            return false;
        }
    } else if !types.is_integral(bound.ty) {
        if types.is_void(bound.ty) {
            ctx.add_diag(errors::error_clocking_block_edge(bound.span));
        } else {
            ctx.add_diag(errors::error_must_be_integral(
                &ctx.type_name(bound.ty),
                bound.span,
            ));
        }
        return false;
    }

    match iff_condition {
        Some(cond) => ctx.require_boolean_convertible(cond),
        None => true,
    }
}

/// Flattens an `or`/`,` tree into its signal leaves, left to right.
fn collect_events(syntax: &EventExpr, ctx: &mut BindContext<'_, '_>, out: &mut Vec<TimingId>) {
    match syntax {
        EventExpr::Paren { inner, .. } => collect_events(inner, ctx, out),
        EventExpr::Signal(signal) => out.push(SignalEventControl::from_syntax(signal, ctx)),
        EventExpr::Binary { left, right, .. } => {
            collect_events(left, ctx, out);
            collect_events(right, ctx, out);
        }
    }
}

impl EventListControl {
    /// Binds the event expression of `@( ... )`.
    ///
    /// A tree with a single leaf yields that leaf directly; only two or more
    /// leaves produce a list. A list containing an invalid event is itself
    /// wrapped in the invalid sentinel.
    pub fn from_syntax(syntax: &EventExpr, ctx: &mut BindContext<'_, '_>) -> TimingId {
        let mut events = Vec::new();
        collect_events(syntax, ctx, &mut events);
        trace!(leaves = events.len(), "flattened event expression");

        if let [single] = events.as_slice() {
            return *single;
        }

        let any_bad = events.iter().any(|&e| ctx.comp.control(e).is_bad());
        let result = ctx
            .comp
            .emplace_timing(TimingControl::EventList(EventListControl { events }));
        if any_bad {
            return TimingControl::bad(ctx.comp, Some(result));
        }
        result
    }
}

impl ImplicitEventControl {
    /// Binds `@*` or `@(*)`.
    pub fn from_syntax(
        _syntax: &ImplicitEventControlSyntax,
        ctx: &mut BindContext<'_, '_>,
    ) -> TimingId {
        ctx.comp
            .emplace_timing(TimingControl::ImplicitEvent(ImplicitEventControl))
    }
}

impl RepeatedEventControl {
    /// Binds `repeat (count) event`.
    ///
    /// The nested clause goes back through [`TimingControl::bind`] and must
    /// come out as an event; delays cannot be repeated.
    pub fn from_syntax<'s>(
        syntax: &'s RepeatedEventControlSyntax,
        ctx: &mut BindContext<'_, 's>,
    ) -> TimingId {
        let Some(nested) = syntax.event_control.as_deref() else {
            ctx.add_diag(errors::error_repeat_requires_event(syntax.span));
            return TimingControl::bad(ctx.comp, None);
        };

        let expr = ctx.bind_expression(&syntax.count, BindFlags::empty());
        let event = TimingControl::bind(nested, ctx);
        let result = ctx
            .comp
            .emplace_timing(TimingControl::RepeatedEvent(RepeatedEventControl { expr, event }));

        let count = ctx.expr(expr);
        if count.is_bad() {
            return TimingControl::bad(ctx.comp, Some(result));
        }
        if !ctx.comp.types.is_numeric(count.ty) {
            ctx.add_diag(errors::error_repeat_not_numeric(
                &ctx.type_name(count.ty),
                count.span,
            ));
            return TimingControl::bad(ctx.comp, Some(result));
        }
        if !ctx.comp.kind(event).is_event() {
            ctx.add_diag(errors::error_repeat_requires_event(nested.span()));
            return TimingControl::bad(ctx.comp, Some(result));
        }
        result
    }
}
