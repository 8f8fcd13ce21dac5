//! Flags describing where an expression or timing control is being bound.

bitflags::bitflags! {
    /// Contextual binding flags carried by [`BindContext`](crate::context::BindContext).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BindFlags: u32 {
        /// Binding inside a function body or a `final` block, where simulation
        /// time cannot advance.
        const FUNCTION_OR_FINAL    = 1 << 0;
        /// The expression is the operand of an event control.
        const EVENT_EXPRESSION     = 1 << 1;
        /// A clocking block name may be referenced as a value.
        const ALLOW_CLOCKING_BLOCK = 1 << 2;
    }
}
