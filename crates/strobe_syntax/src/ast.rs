//! AST node types for timing controls and the expressions they embed.
//!
//! Every node carries a `Span`. Parse errors inside expressions are
//! represented by [`Expr::Error`]; the timing-control shapes themselves are
//! closed enums so every consumer matches them exhaustively.

use strobe_common::Ident;
use strobe_source::Span;
use serde::{Deserialize, Serialize};

// ============================================================================
// Timing controls
// ============================================================================

/// A timing control prefixing a procedural statement or a net declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TimingControlSyntax {
    /// A single delay value (e.g., `#5`, `#(DELAY)`).
    Delay(DelaySyntax),
    /// A rise/fall/turn-off delay triple (e.g., `#(1, 2, 3)`).
    Delay3(Delay3Syntax),
    /// An event control naming a single signal or event (e.g., `@done`).
    EventControl(EventControlSyntax),
    /// A parenthesized event expression (e.g., `@(posedge clk or negedge rst_n)`).
    EventControlWithExpression(EventControlWithExpressionSyntax),
    /// An implicit event control (`@*` or `@(*)`).
    ImplicitEventControl(ImplicitEventControlSyntax),
    /// A repeated event control (e.g., `repeat (3) @(posedge clk)`).
    RepeatedEventControl(RepeatedEventControlSyntax),
    /// The `#1step` delay.
    OneStepDelay {
        /// Source span.
        span: Span,
    },
    /// A cycle delay (e.g., `##2`).
    CycleDelay(DelaySyntax),
}

impl TimingControlSyntax {
    /// Returns the source span of this timing control.
    pub fn span(&self) -> Span {
        match self {
            TimingControlSyntax::Delay(d) | TimingControlSyntax::CycleDelay(d) => d.span,
            TimingControlSyntax::Delay3(d) => d.span,
            TimingControlSyntax::EventControl(e) => e.span,
            TimingControlSyntax::EventControlWithExpression(e) => e.span,
            TimingControlSyntax::ImplicitEventControl(e) => e.span,
            TimingControlSyntax::RepeatedEventControl(r) => r.span,
            TimingControlSyntax::OneStepDelay { span } => *span,
        }
    }
}

/// `#value` or `##value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelaySyntax {
    /// The delay amount.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

/// `#(rise, fall, turn_off)` with the last two values optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delay3Syntax {
    /// Rise delay.
    pub delay1: Expr,
    /// Fall delay.
    pub delay2: Option<Expr>,
    /// Turn-off delay.
    pub delay3: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// `@name` without parentheses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventControlSyntax {
    /// The named event, signal or clocking block.
    pub event_name: Expr,
    /// Source span.
    pub span: Span,
}

/// `@( event_expression )`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventControlWithExpressionSyntax {
    /// The event expression inside the parentheses.
    pub expr: EventExpr,
    /// Source span.
    pub span: Span,
}

/// `@*` or `@(*)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplicitEventControlSyntax {
    /// Whether the star was written inside parentheses.
    pub parenthesized: bool,
    /// Source span.
    pub span: Span,
}

/// `repeat (count) event_control`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatedEventControlSyntax {
    /// The repetition count.
    pub count: Expr,
    /// The repeated control. `None` when the parser recovered from a missing one.
    pub event_control: Option<Box<TimingControlSyntax>>,
    /// Source span.
    pub span: Span,
}

// ============================================================================
// Event expressions
// ============================================================================

/// An event expression inside `@( ... )`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventExpr {
    /// A single, optionally edge-qualified signal.
    Signal(SignalEventExpr),
    /// Two event expressions joined by `or` or `,`.
    Binary {
        /// Left operand.
        left: Box<EventExpr>,
        /// The separator used.
        separator: EventSeparator,
        /// Right operand.
        right: Box<EventExpr>,
        /// Source span.
        span: Span,
    },
    /// A parenthesized event expression.
    Paren {
        /// The inner expression.
        inner: Box<EventExpr>,
        /// Source span.
        span: Span,
    },
}

impl EventExpr {
    /// Returns the source span of this event expression.
    pub fn span(&self) -> Span {
        match self {
            EventExpr::Signal(s) => s.span,
            EventExpr::Binary { span, .. } | EventExpr::Paren { span, .. } => *span,
        }
    }
}

/// `[edge] expr [iff condition]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEventExpr {
    /// Optional edge keyword.
    pub edge: Option<EdgeKeyword>,
    /// The signal expression.
    pub expr: Expr,
    /// Optional `iff` guard.
    pub iff: Option<IffClause>,
    /// Source span.
    pub span: Span,
}

/// `iff condition` guarding an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IffClause {
    /// The guard condition.
    pub condition: Expr,
    /// Source span, including the `iff` keyword.
    pub span: Span,
}

/// An edge keyword in an event expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKeyword {
    /// `posedge`
    Posedge,
    /// `negedge`
    Negedge,
    /// `edge`
    Edge,
}

/// The token joining two event expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSeparator {
    /// `or`
    Or,
    /// `,`
    Comma,
}

// ============================================================================
// Parameter value assignments (net delays)
// ============================================================================

/// `#( ... )` written where a parameter value assignment is expected,
/// e.g. the delay of `wire #(1, 2) w;`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterValueAssignment {
    /// The assignments in source order.
    pub params: Vec<ParamAssignment>,
    /// Source span.
    pub span: Span,
}

/// One entry of a [`ParameterValueAssignment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParamAssignment {
    /// A positional value.
    Ordered {
        /// The value.
        expr: Expr,
        /// Source span.
        span: Span,
    },
    /// A named value (e.g., `.WIDTH(8)`).
    Named {
        /// The parameter name.
        name: Ident,
        /// The value, if any.
        expr: Option<Expr>,
        /// Source span.
        span: Span,
    },
}

impl ParamAssignment {
    /// Returns the source span of this assignment.
    pub fn span(&self) -> Span {
        match self {
            ParamAssignment::Ordered { span, .. } | ParamAssignment::Named { span, .. } => *span,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// The expression forms that appear inside timing controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    /// A simple identifier.
    Identifier {
        /// The interned identifier.
        name: Ident,
        /// Source span.
        span: Span,
    },
    /// An integer literal. Unsized when `width` is `None` (e.g., `5`),
    /// sized otherwise (e.g., `4'd5`).
    Literal {
        /// The literal value.
        value: i64,
        /// The declared width of a sized literal.
        width: Option<u32>,
        /// Source span.
        span: Span,
    },
    /// A real literal (e.g., `1.5`).
    RealLiteral {
        /// The literal value.
        value: f64,
        /// Source span.
        span: Span,
    },
    /// A string literal.
    StringLiteral {
        /// The unquoted value.
        value: String,
        /// Source span.
        span: Span,
    },
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// The operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A parenthesized expression.
    Paren {
        /// The inner expression.
        inner: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// An error node produced during parser recovery.
    Error(Span),
}

impl Expr {
    /// Returns the source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier { span, .. }
            | Expr::Literal { span, .. }
            | Expr::RealLiteral { span, .. }
            | Expr::StringLiteral { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Paren { span, .. }
            | Expr::Error(span) => *span,
        }
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    LogNot,
    /// `~`
    BitNot,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&&`
    LogAnd,
    /// `||`
    LogOr,
    /// `==`
    Eq,
    /// `!=`
    Neq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl BinaryOp {
    /// Returns the operator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::LogAnd => "&&",
            BinaryOp::LogOr => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

impl UnaryOp {
    /// Returns the operator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::LogNot => "!",
            UnaryOp::BitNot => "~",
        }
    }
}
