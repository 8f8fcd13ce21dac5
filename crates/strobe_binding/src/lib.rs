//! Semantic binding of SystemVerilog timing controls.
//!
//! Turns timing-control syntax (`#5`, `#(1, 2, 3)`, `@(posedge clk or
//! negedge rst_n)`, `@*`, `repeat (3) @(posedge clk)`, `##2`, `#1step`)
//! into typed nodes stored in a [`Compilation`]'s arena. Binding always
//! produces a node: when something is wrong it reports a diagnostic and
//! returns an [`Invalid`](TimingControl::Invalid) sentinel, so editors and
//! linters still get a best-effort tree.
//!
//! ```ignore
//! let mut ctx = BindContext::new(&mut comp, scope, &sink, &interner, &ScopeBinder, &options);
//! let id = TimingControl::bind(&syntax, &mut ctx);
//! if !comp.control(id).is_bad() { /* ... */ }
//! ```

#![warn(missing_docs)]

pub mod arena;
pub mod compilation;
pub mod const_eval;
pub mod context;
pub mod errors;
pub mod expr;
pub mod flags;
pub mod ids;
pub mod scope;
pub mod serialize;
pub mod timing;
pub mod types;

pub use compilation::Compilation;
pub use const_eval::ConstValue;
pub use context::BindContext;
pub use expr::{ExprKind, Expression, ExpressionBinder, ScopeBinder};
pub use flags::BindFlags;
pub use ids::{ExprId, ScopeId, TimingId, TypeId};
pub use scope::{Scope, Symbol};
pub use serialize::AstSerializer;
pub use timing::{
    CycleDelayControl, Delay3Control, DelayControl, EdgeKind, EventListControl,
    ImplicitEventControl, InvalidTimingControl, OneStepDelayControl, RepeatedEventControl,
    SignalEventControl, TimingControl, TimingControlKind, TimingNode,
};
pub use types::{Type, TypeDb};
