//! Bound timing controls.
//!
//! [`TimingControl::bind`] is the entry point. It rejects timing controls in
//! functions and final blocks, dispatches on the syntax kind to one of the
//! variant constructors in [`delay`] and [`event`], and records which syntax
//! node the result came from.
//!
//! Every failure produces an [`InvalidTimingControl`] sentinel through
//! [`TimingControl::bad`]. A sentinel without a child means the shape itself
//! could not be interpreted; a sentinel with a child wraps the node that was
//! built before a type or legality check failed. Consumers must check
//! [`TimingControl::is_bad`] before using a node for anything semantic.

pub mod delay;
pub mod event;

use std::fmt;

use crate::compilation::Compilation;
use crate::context::BindContext;
use crate::errors;
use crate::flags::BindFlags;
use crate::ids::{ExprId, TimingId};
use serde::{Deserialize, Serialize};
use strobe_syntax::{EdgeKeyword, TimingControlSyntax};
use tracing::debug;

pub use delay::{CycleDelayControl, Delay3Control, DelayControl, OneStepDelayControl};
pub use event::{
    EventListControl, ImplicitEventControl, RepeatedEventControl, SignalEventControl,
};

/// The kind tag of a [`TimingControl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingControlKind {
    /// Failed to bind.
    Invalid,
    /// `#value`
    Delay,
    /// `#(rise, fall, turn_off)`
    Delay3,
    /// A single, optionally edge-qualified, signal.
    SignalEvent,
    /// Two or more events joined by `or` or `,`.
    EventList,
    /// `@*`
    ImplicitEvent,
    /// `repeat (n) @(...)`
    RepeatedEvent,
    /// `#1step`
    OneStepDelay,
    /// `##value`
    CycleDelay,
}

impl TimingControlKind {
    /// Kinds that wait on an event rather than a delay.
    pub fn is_event(self) -> bool {
        matches!(
            self,
            TimingControlKind::SignalEvent
                | TimingControlKind::EventList
                | TimingControlKind::ImplicitEvent
        )
    }

    /// Name used in logs and debug dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            TimingControlKind::Invalid => "Invalid",
            TimingControlKind::Delay => "Delay",
            TimingControlKind::Delay3 => "Delay3",
            TimingControlKind::SignalEvent => "SignalEvent",
            TimingControlKind::EventList => "EventList",
            TimingControlKind::ImplicitEvent => "ImplicitEvent",
            TimingControlKind::RepeatedEvent => "RepeatedEvent",
            TimingControlKind::OneStepDelay => "OneStepDelay",
            TimingControlKind::CycleDelay => "CycleDelay",
        }
    }
}

impl fmt::Display for TimingControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge polarity of a signal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Any change.
    #[default]
    None,
    /// Rising edge.
    PosEdge,
    /// Falling edge.
    NegEdge,
    /// Either edge.
    BothEdges,
}

impl EdgeKind {
    /// Maps an optional edge keyword; no keyword means [`EdgeKind::None`].
    pub fn from_keyword(keyword: Option<EdgeKeyword>) -> Self {
        match keyword {
            None => EdgeKind::None,
            Some(EdgeKeyword::Posedge) => EdgeKind::PosEdge,
            Some(EdgeKeyword::Negedge) => EdgeKind::NegEdge,
            Some(EdgeKeyword::Edge) => EdgeKind::BothEdges,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EdgeKind::None => "none",
            EdgeKind::PosEdge => "posedge",
            EdgeKind::NegEdge => "negedge",
            EdgeKind::BothEdges => "edge",
        })
    }
}

/// A control that failed to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimingControl {
    /// What was built before the failure was detected, kept for tooling only.
    pub child: Option<TimingId>,
}

/// A bound timing control.
#[derive(Debug, Clone, PartialEq)]
pub enum TimingControl {
    /// Failed to bind.
    Invalid(InvalidTimingControl),
    /// `#value`
    Delay(DelayControl),
    /// `#(rise, fall, turn_off)`
    Delay3(Delay3Control),
    /// `@(posedge clk iff en)`
    SignalEvent(SignalEventControl),
    /// `@(a or b)`
    EventList(EventListControl),
    /// `@*`
    ImplicitEvent(ImplicitEventControl),
    /// `repeat (n) @(...)`
    RepeatedEvent(RepeatedEventControl),
    /// `#1step`
    OneStepDelay(OneStepDelayControl),
    /// `##value`
    CycleDelay(CycleDelayControl),
}

/// A timing control stored in the compilation, with its provenance.
#[derive(Debug, Clone)]
pub struct TimingNode<'s> {
    /// The bound control.
    pub control: TimingControl,
    /// The syntax this control was bound from. Set once by the dispatcher;
    /// `None` for sentinels it creates and for leaves inside event lists.
    pub syntax: Option<&'s TimingControlSyntax>,
}

impl TimingControl {
    /// Binds a timing control.
    ///
    /// Never fails: problems are reported through the context and the result
    /// is then an [`Invalid`](TimingControl::Invalid) node.
    pub fn bind<'s>(syntax: &'s TimingControlSyntax, ctx: &mut BindContext<'_, 's>) -> TimingId {
        if ctx.flags.contains(BindFlags::FUNCTION_OR_FINAL) {
            ctx.add_diag(errors::error_timing_not_allowed(syntax.span()));
            return TimingControl::bad(ctx.comp, None);
        }

        let id = match syntax {
            TimingControlSyntax::Delay(s) => DelayControl::from_syntax(s, ctx),
            TimingControlSyntax::Delay3(s) => Delay3Control::from_syntax(s, ctx),
            TimingControlSyntax::EventControl(s) => SignalEventControl::from_event_control(s, ctx),
            TimingControlSyntax::EventControlWithExpression(s) => {
                EventListControl::from_syntax(&s.expr, ctx)
            }
            TimingControlSyntax::ImplicitEventControl(s) => {
                ImplicitEventControl::from_syntax(s, ctx)
            }
            TimingControlSyntax::RepeatedEventControl(s) => {
                RepeatedEventControl::from_syntax(s, ctx)
            }
            TimingControlSyntax::OneStepDelay { .. } => OneStepDelayControl::from_syntax(ctx),
            TimingControlSyntax::CycleDelay(s) => CycleDelayControl::from_syntax(s, ctx),
        };

        ctx.comp.set_syntax(id, syntax);
        debug!(
            kind = %ctx.comp.kind(id),
            id = id.as_raw(),
            "bound timing control"
        );
        id
    }

    /// Allocates the invalid sentinel, optionally wrapping a partial node.
    pub fn bad(comp: &mut Compilation<'_>, child: Option<TimingId>) -> TimingId {
        debug!(
            child = ?child.map(|c| comp.kind(c)),
            "timing control replaced by invalid sentinel"
        );
        comp.emplace_timing(TimingControl::Invalid(InvalidTimingControl { child }))
    }

    /// The kind tag.
    pub fn kind(&self) -> TimingControlKind {
        match self {
            TimingControl::Invalid(_) => TimingControlKind::Invalid,
            TimingControl::Delay(_) => TimingControlKind::Delay,
            TimingControl::Delay3(_) => TimingControlKind::Delay3,
            TimingControl::SignalEvent(_) => TimingControlKind::SignalEvent,
            TimingControl::EventList(_) => TimingControlKind::EventList,
            TimingControl::ImplicitEvent(_) => TimingControlKind::ImplicitEvent,
            TimingControl::RepeatedEvent(_) => TimingControlKind::RepeatedEvent,
            TimingControl::OneStepDelay(_) => TimingControlKind::OneStepDelay,
            TimingControl::CycleDelay(_) => TimingControlKind::CycleDelay,
        }
    }

    /// Returns `true` for the invalid sentinel.
    pub fn is_bad(&self) -> bool {
        matches!(self, TimingControl::Invalid(_))
    }

    /// The wrapped node of an invalid sentinel.
    pub fn invalid_child(&self) -> Option<TimingId> {
        match self {
            TimingControl::Invalid(ctrl) => ctrl.child,
            _ => None,
        }
    }

    /// The single delay or cycle-delay expression, if this control has one.
    pub fn delay_expr(&self) -> Option<ExprId> {
        match self {
            TimingControl::Delay(ctrl) => Some(ctrl.expr),
            TimingControl::CycleDelay(ctrl) => Some(ctrl.expr),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kinds() {
        assert!(TimingControlKind::SignalEvent.is_event());
        assert!(TimingControlKind::EventList.is_event());
        assert!(TimingControlKind::ImplicitEvent.is_event());
        assert!(!TimingControlKind::Delay.is_event());
        assert!(!TimingControlKind::RepeatedEvent.is_event());
        assert!(!TimingControlKind::Invalid.is_event());
    }

    #[test]
    fn edge_from_keyword() {
        assert_eq!(EdgeKind::from_keyword(None), EdgeKind::None);
        assert_eq!(
            EdgeKind::from_keyword(Some(EdgeKeyword::Edge)),
            EdgeKind::BothEdges
        );
        assert_eq!(EdgeKind::BothEdges.to_string(), "edge");
        assert_eq!(EdgeKind::PosEdge.to_string(), "posedge");
    }

    #[test]
    fn kind_display() {
        assert_eq!(TimingControlKind::CycleDelay.to_string(), "CycleDelay");
    }

    #[test]
    fn invalid_helpers() {
        let ctrl = TimingControl::Invalid(InvalidTimingControl {
            child: Some(TimingId::from_raw(4)),
        });
        assert!(ctrl.is_bad());
        assert_eq!(ctrl.kind(), TimingControlKind::Invalid);
        assert_eq!(ctrl.invalid_child(), Some(TimingId::from_raw(4)));
        assert_eq!(ctrl.delay_expr(), None);
    }
}
