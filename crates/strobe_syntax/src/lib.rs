//! Syntax tree for SystemVerilog timing controls.
//!
//! This is the input of the binder: delays (`#5`, `#(1, 2, 3)`, `##2`,
//! `#1step`), event controls (`@clk`, `@(posedge clk or negedge rst_n)`,
//! `@*`), repeated event controls (`repeat (3) @(posedge clk)`) and the
//! parameter-value assignments used for net delays. Producing the tree is the
//! parser's job; the binder only reads it.

#![warn(missing_docs)]

/// Syntax node types.
pub mod ast;

pub use ast::{
    BinaryOp, Delay3Syntax, DelaySyntax, EdgeKeyword, EventControlSyntax,
    EventControlWithExpressionSyntax, EventExpr, EventSeparator, Expr, IffClause,
    ImplicitEventControlSyntax, ParamAssignment, ParameterValueAssignment,
    RepeatedEventControlSyntax, SignalEventExpr, TimingControlSyntax, UnaryOp,
};
