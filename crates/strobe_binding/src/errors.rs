//! Diagnostic codes and helper functions for timing-control binding.
//!
//! Error codes `E300`--`E308` cover timing-control legality and typing,
//! `E309`--`E311` come from the expression binder. Warning codes
//! `W300`--`W301` are advisories that never invalidate a node.

use strobe_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};
use strobe_source::Span;

/// Timing control inside a function or final block.
pub const E300: DiagnosticCode = DiagnosticCode::new(Category::Error, 300);

/// Delay value is not numeric.
pub const E301: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);

/// Malformed net delay parameter list.
pub const E302: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);

/// Aggregate or handle used as an edge-less event expression.
pub const E303: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);

/// Clocking block event with an edge specifier.
pub const E304: DiagnosticCode = DiagnosticCode::new(Category::Error, 304);

/// Expression must be integral.
pub const E305: DiagnosticCode = DiagnosticCode::new(Category::Error, 305);

/// Repeat count is not numeric.
pub const E306: DiagnosticCode = DiagnosticCode::new(Category::Error, 306);

/// Repeat control without an event.
pub const E307: DiagnosticCode = DiagnosticCode::new(Category::Error, 307);

/// Condition is not convertible to a boolean.
pub const E308: DiagnosticCode = DiagnosticCode::new(Category::Error, 308);

/// Unknown identifier.
pub const E309: DiagnosticCode = DiagnosticCode::new(Category::Error, 309);

/// Clocking block referenced where one is not allowed.
pub const E310: DiagnosticCode = DiagnosticCode::new(Category::Error, 310);

/// Operand types invalid for an operator.
pub const E311: DiagnosticCode = DiagnosticCode::new(Category::Error, 311);

/// Event expression is a constant.
pub const W300: DiagnosticCode = DiagnosticCode::new(Category::Warning, 300);

/// Cycle delay with no default clocking in scope.
pub const W301: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);

/// Creates a diagnostic for a timing control in a function or final block.
pub fn error_timing_not_allowed(span: Span) -> Diagnostic {
    Diagnostic::error(
        E300,
        "timing controls are not allowed in functions or final blocks",
        span,
    )
    .with_note("functions and final blocks execute in zero simulation time")
}

/// Creates a diagnostic for a delay whose value is not numeric.
pub fn error_delay_not_numeric(ty: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E301,
        format!("delay value must be numeric, found `{ty}`"),
        span,
    )
}

/// Creates a diagnostic for a malformed net delay.
pub fn error_expected_net_delay(span: Span) -> Diagnostic {
    Diagnostic::error(E302, "expected a net delay", span)
        .with_note("a net delay takes one to three positional values")
}

/// Creates a diagnostic for an event expression of a type that cannot trigger.
pub fn error_invalid_event_expression(ty: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E303,
        format!("expression of type `{ty}` cannot be used as an event"),
        span,
    )
}

/// Creates a diagnostic for an edge applied to a clocking block.
pub fn error_clocking_block_edge(span: Span) -> Diagnostic {
    Diagnostic::error(
        E304,
        "clocking block events cannot have an edge specifier",
        span,
    )
}

/// Creates a diagnostic for an expression that must be integral.
pub fn error_must_be_integral(ty: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E305,
        format!("expression must be integral, found `{ty}`"),
        span,
    )
}

/// Creates a diagnostic for a non-numeric repeat count.
pub fn error_repeat_not_numeric(ty: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E306,
        format!("repeat count must be numeric, found `{ty}`"),
        span,
    )
}

/// Creates a diagnostic for a repeat control whose target is not an event.
pub fn error_repeat_requires_event(span: Span) -> Diagnostic {
    Diagnostic::error(E307, "repeat control requires an event control", span)
}

/// Creates a diagnostic for a condition that is not boolean-convertible.
pub fn error_not_boolean_convertible(ty: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E308,
        format!("value of type `{ty}` is not convertible to a boolean"),
        span,
    )
}

/// Creates a diagnostic for an unknown identifier.
pub fn error_unknown_identifier(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E309, format!("unknown identifier `{name}`"), span)
}

/// Creates a diagnostic for a clocking block used as a value.
pub fn error_clocking_block_not_allowed(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E310,
        format!("clocking block `{name}` cannot be used in this context"),
        span,
    )
}

/// Creates a diagnostic for a binary operator applied to invalid operands.
pub fn error_bad_binary_operands(
    op: &str,
    lhs: &str,
    rhs: &str,
    span: Span,
    lhs_span: Span,
    rhs_span: Span,
) -> Diagnostic {
    Diagnostic::error(
        E311,
        format!("invalid operands to binary `{op}`: `{lhs}` and `{rhs}`"),
        span,
    )
    .with_label(Label::secondary(lhs_span, lhs.to_string()))
    .with_label(Label::secondary(rhs_span, rhs.to_string()))
}

/// Creates a diagnostic for a unary operator applied to an invalid operand.
pub fn error_bad_unary_operand(op: &str, ty: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E311,
        format!("invalid operand to unary `{op}`: `{ty}`"),
        span,
    )
}

/// Creates a warning for a constant event expression.
pub fn warn_constant_event(span: Span) -> Diagnostic {
    Diagnostic::warning(
        W300,
        "event expression is constant and will never trigger",
        span,
    )
}

/// Creates a warning for a cycle delay with no default clocking.
pub fn warn_no_default_clocking(span: Span) -> Diagnostic {
    Diagnostic::warning(
        W301,
        "cycle delay used without a default clocking block in scope",
        span,
    )
}
