//! Bound expressions and the expression binding service.
//!
//! Timing-control binding only consumes expressions: it asks an
//! [`ExpressionBinder`] to turn syntax into a typed [`Expression`] and then
//! inspects the type, validity and span. [`ScopeBinder`] is the standard
//! binder; tests substitute their own.

use crate::const_eval::ConstValue;
use crate::context::BindContext;
use crate::errors;
use crate::flags::BindFlags;
use crate::ids::{ExprId, TypeId};
use crate::scope::Symbol;
use crate::types::Type;
use serde::{Deserialize, Serialize};
use strobe_common::Ident;
use strobe_source::Span;
use strobe_syntax::{BinaryOp, Expr, UnaryOp};

/// A bound, typed expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    /// What the expression is.
    pub kind: ExprKind,
    /// Its type; the error type when invalid.
    pub ty: TypeId,
    /// Source range.
    pub span: Span,
}

/// The shape of a bound expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    /// A literal.
    Literal(ConstValue),
    /// A reference to a variable or net.
    Variable(Ident),
    /// A reference to a parameter, with its value.
    Parameter {
        /// Parameter name.
        name: Ident,
        /// Resolved value.
        value: ConstValue,
    },
    /// A reference to a clocking block, typed `void`.
    ClockingBlock(Ident),
    /// A unary operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: ExprId,
    },
    /// A binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: ExprId,
        /// Right operand.
        right: ExprId,
    },
    /// An expression that failed to bind, optionally wrapping what was built.
    Invalid {
        /// The partially bound expression.
        child: Option<ExprId>,
    },
}

impl Expression {
    /// Creates an expression.
    pub fn new(kind: ExprKind, ty: TypeId, span: Span) -> Self {
        Self { kind, ty, span }
    }

    /// Returns `true` if the expression failed to bind.
    pub fn is_bad(&self) -> bool {
        matches!(self.kind, ExprKind::Invalid { .. })
    }
}

/// Turns expression syntax into a bound [`Expression`] stored in the
/// context's compilation.
///
/// Implementations report their own diagnostics and always return an id;
/// failures come back as an invalid expression.
pub trait ExpressionBinder {
    /// Binds `syntax` under `flags`.
    fn bind(&self, syntax: &Expr, ctx: &mut BindContext<'_, '_>, flags: BindFlags) -> ExprId;
}

/// The standard binder: resolves names through the scope chain and types
/// literals and operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeBinder;

impl ExpressionBinder for ScopeBinder {
    fn bind(&self, syntax: &Expr, ctx: &mut BindContext<'_, '_>, flags: BindFlags) -> ExprId {
        bind_expr(syntax, ctx, flags)
    }
}

fn invalid(ctx: &mut BindContext<'_, '_>, child: Option<ExprId>, span: Span) -> ExprId {
    let ty = ctx.comp.types.error();
    ctx.comp
        .emplace_expr(Expression::new(ExprKind::Invalid { child }, ty, span))
}

/// Emplaces `kind` with the error type and wraps it in an invalid expression.
fn invalid_op(ctx: &mut BindContext<'_, '_>, kind: ExprKind, span: Span) -> ExprId {
    let ty = ctx.comp.types.error();
    let partial = ctx.comp.emplace_expr(Expression::new(kind, ty, span));
    invalid(ctx, Some(partial), span)
}

fn bind_expr(syntax: &Expr, ctx: &mut BindContext<'_, '_>, flags: BindFlags) -> ExprId {
    match syntax {
        Expr::Identifier { name, span } => bind_identifier(*name, *span, ctx, flags),
        Expr::Literal { value, width, span } => {
            let ty = match width {
                Some(w) => ctx.comp.types.logic(*w),
                None => ctx.comp.types.int(),
            };
            ctx.comp.emplace_expr(Expression::new(
                ExprKind::Literal(ConstValue::Int(*value)),
                ty,
                *span,
            ))
        }
        Expr::RealLiteral { value, span } => {
            let ty = ctx.comp.types.real();
            ctx.comp.emplace_expr(Expression::new(
                ExprKind::Literal(ConstValue::Real(*value)),
                ty,
                *span,
            ))
        }
        Expr::StringLiteral { value, span } => {
            let ty = ctx.comp.types.intern(Type::String);
            ctx.comp.emplace_expr(Expression::new(
                ExprKind::Literal(ConstValue::String(value.clone())),
                ty,
                *span,
            ))
        }
        Expr::Paren { inner, .. } => bind_expr(inner, ctx, flags),
        Expr::Unary { op, operand, span } => {
            let operand = bind_expr(operand, ctx, flags);
            bind_unary(*op, operand, *span, ctx)
        }
        Expr::Binary {
            left,
            op,
            right,
            span,
        } => {
            let left = bind_expr(left, ctx, flags);
            let right = bind_expr(right, ctx, flags);
            bind_binary(*op, left, right, *span, ctx)
        }
        Expr::Error(span) => invalid(ctx, None, *span),
    }
}

fn bind_identifier(
    name: Ident,
    span: Span,
    ctx: &mut BindContext<'_, '_>,
    flags: BindFlags,
) -> ExprId {
    let (kind, ty) = match ctx.comp.lookup(ctx.scope, name).cloned() {
        Some(Symbol::Variable { ty }) => (ExprKind::Variable(name), ty),
        Some(Symbol::Parameter { ty, value }) => (ExprKind::Parameter { name, value }, ty),
        Some(Symbol::ClockingBlock) if flags.contains(BindFlags::ALLOW_CLOCKING_BLOCK) => {
            (ExprKind::ClockingBlock(name), ctx.comp.types.void())
        }
        Some(Symbol::ClockingBlock) => {
            ctx.add_diag(errors::error_clocking_block_not_allowed(
                ctx.interner.resolve(name),
                span,
            ));
            return invalid(ctx, None, span);
        }
        None => {
            ctx.add_diag(errors::error_unknown_identifier(
                ctx.interner.resolve(name),
                span,
            ));
            return invalid(ctx, None, span);
        }
    };
    ctx.comp.emplace_expr(Expression::new(kind, ty, span))
}

fn bind_unary(op: UnaryOp, operand: ExprId, span: Span, ctx: &mut BindContext<'_, '_>) -> ExprId {
    let kind = ExprKind::Unary { op, operand };
    let operand_expr = ctx.comp.expr(operand);
    if operand_expr.is_bad() {
        return invalid_op(ctx, kind, span);
    }
    let operand_ty = operand_expr.ty;
    let types = &mut ctx.comp.types;
    let ty = match op {
        UnaryOp::Plus | UnaryOp::Minus if types.is_numeric(operand_ty) => Some(operand_ty),
        UnaryOp::BitNot => types.integral_shape(operand_ty).map(|shape| {
            types.intern(Type::Integral {
                width: shape.width,
                signed: shape.signed,
                four_state: shape.four_state,
            })
        }),
        UnaryOp::LogNot if types.is_boolean_convertible(operand_ty) => Some(types.logic(1)),
        _ => None,
    };
    match ty {
        Some(ty) => ctx.comp.emplace_expr(Expression::new(kind, ty, span)),
        None => {
            let name = ctx.type_name(operand_ty);
            ctx.add_diag(errors::error_bad_unary_operand(op.as_str(), &name, span));
            invalid_op(ctx, kind, span)
        }
    }
}

fn bind_binary(
    op: BinaryOp,
    left: ExprId,
    right: ExprId,
    span: Span,
    ctx: &mut BindContext<'_, '_>,
) -> ExprId {
    let kind = ExprKind::Binary { op, left, right };
    let (lhs, rhs) = (ctx.comp.expr(left), ctx.comp.expr(right));
    if lhs.is_bad() || rhs.is_bad() {
        return invalid_op(ctx, kind, span);
    }
    let (lhs_ty, lhs_span, rhs_ty, rhs_span) = (lhs.ty, lhs.span, rhs.ty, rhs.span);

    let ty = match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            arithmetic_type(ctx, lhs_ty, rhs_ty)
        }
        BinaryOp::Mod | BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
            merged_integral(ctx, lhs_ty, rhs_ty)
        }
        BinaryOp::LogAnd | BinaryOp::LogOr => {
            let types = &mut ctx.comp.types;
            (types.is_boolean_convertible(lhs_ty) && types.is_boolean_convertible(rhs_ty))
                .then(|| types.logic(1))
        }
        BinaryOp::Eq | BinaryOp::Neq => {
            let types = &mut ctx.comp.types;
            let strings = matches!(types.get(lhs_ty), Type::String)
                && matches!(types.get(rhs_ty), Type::String);
            (strings || (types.is_numeric(lhs_ty) && types.is_numeric(rhs_ty)))
                .then(|| types.logic(1))
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let types = &mut ctx.comp.types;
            (types.is_numeric(lhs_ty) && types.is_numeric(rhs_ty)).then(|| types.logic(1))
        }
    };

    match ty {
        Some(ty) => ctx.comp.emplace_expr(Expression::new(kind, ty, span)),
        None => {
            let (l, r) = (ctx.type_name(lhs_ty), ctx.type_name(rhs_ty));
            ctx.add_diag(errors::error_bad_binary_operands(
                op.as_str(),
                &l,
                &r,
                span,
                lhs_span,
                rhs_span,
            ));
            invalid_op(ctx, kind, span)
        }
    }
}

/// `real` if either side is real, otherwise the merged integral type.
fn arithmetic_type(ctx: &mut BindContext<'_, '_>, lhs: TypeId, rhs: TypeId) -> Option<TypeId> {
    let types = &mut ctx.comp.types;
    if !types.is_numeric(lhs) || !types.is_numeric(rhs) {
        return None;
    }
    if matches!(types.get(lhs), Type::Real) || matches!(types.get(rhs), Type::Real) {
        return Some(types.real());
    }
    merged_integral(ctx, lhs, rhs)
}

/// The wider width, signed only if both are, 4-state if either is.
fn merged_integral(ctx: &mut BindContext<'_, '_>, lhs: TypeId, rhs: TypeId) -> Option<TypeId> {
    let types = &mut ctx.comp.types;
    let a = types.integral_shape(lhs)?;
    let b = types.integral_shape(rhs)?;
    Some(types.intern(Type::Integral {
        width: a.width.max(b.width),
        signed: a.signed && b.signed,
        four_state: a.four_state || b.four_state,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::Compilation;
    use crate::errors::{E309, E311};
    use strobe_common::Interner;
    use strobe_config::BindOptions;
    use strobe_diagnostics::DiagnosticSink;

    fn lit(value: i64) -> Expr {
        Expr::Literal {
            value,
            width: None,
            span: Span::DUMMY,
        }
    }

    fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span: Span::DUMMY,
        }
    }

    struct Setup {
        interner: Interner,
        sink: DiagnosticSink,
        options: BindOptions,
    }

    impl Setup {
        fn new() -> Self {
            Self {
                interner: Interner::new(),
                sink: DiagnosticSink::new(),
                options: BindOptions::default(),
            }
        }
    }

    #[test]
    fn literal_types() {
        let s = Setup::new();
        let mut comp = Compilation::new(s.interner.get_or_intern("top"));
        let root = comp.root_scope();
        let mut ctx = BindContext::new(
            &mut comp,
            root,
            &s.sink,
            &s.interner,
            &ScopeBinder,
            &s.options,
        );

        let unsized_lit = ctx.bind_expression(&lit(5), BindFlags::empty());
        assert_eq!(ctx.type_name(ctx.expr(unsized_lit).ty), "int");

        let sized = Expr::Literal {
            value: 5,
            width: Some(4),
            span: Span::DUMMY,
        };
        let sized = ctx.bind_expression(&sized, BindFlags::empty());
        assert_eq!(ctx.type_name(ctx.expr(sized).ty), "logic[3:0]");

        let real = Expr::RealLiteral {
            value: 1.5,
            span: Span::DUMMY,
        };
        let real = ctx.bind_expression(&real, BindFlags::empty());
        assert_eq!(ctx.type_name(ctx.expr(real).ty), "real");
        assert!(s.sink.is_empty());
    }

    #[test]
    fn parentheses_are_transparent() {
        let s = Setup::new();
        let mut comp = Compilation::new(s.interner.get_or_intern("top"));
        let root = comp.root_scope();
        let mut ctx = BindContext::new(
            &mut comp,
            root,
            &s.sink,
            &s.interner,
            &ScopeBinder,
            &s.options,
        );
        let paren = Expr::Paren {
            inner: Box::new(lit(3)),
            span: Span::DUMMY,
        };
        let id = ctx.bind_expression(&paren, BindFlags::empty());
        assert!(matches!(ctx.expr(id).kind, ExprKind::Literal(ConstValue::Int(3))));
    }

    #[test]
    fn mixed_arithmetic_is_real() {
        let s = Setup::new();
        let mut comp = Compilation::new(s.interner.get_or_intern("top"));
        let root = comp.root_scope();
        let mut ctx = BindContext::new(
            &mut comp,
            root,
            &s.sink,
            &s.interner,
            &ScopeBinder,
            &s.options,
        );
        let e = binary(
            lit(1),
            BinaryOp::Add,
            Expr::RealLiteral {
                value: 0.5,
                span: Span::DUMMY,
            },
        );
        let id = ctx.bind_expression(&e, BindFlags::empty());
        assert_eq!(ctx.type_name(ctx.expr(id).ty), "real");
    }

    #[test]
    fn string_arithmetic_reports_e311() {
        let s = Setup::new();
        let mut comp = Compilation::new(s.interner.get_or_intern("top"));
        let root = comp.root_scope();
        let mut ctx = BindContext::new(
            &mut comp,
            root,
            &s.sink,
            &s.interner,
            &ScopeBinder,
            &s.options,
        );
        let e = binary(
            Expr::StringLiteral {
                value: "a".to_string(),
                span: Span::DUMMY,
            },
            BinaryOp::Add,
            lit(1),
        );
        let id = ctx.bind_expression(&e, BindFlags::empty());
        assert!(ctx.expr(id).is_bad());
        assert_eq!(s.sink.codes(), vec![E311]);
    }

    #[test]
    fn bad_operand_propagates_silently() {
        let s = Setup::new();
        let mut comp = Compilation::new(s.interner.get_or_intern("top"));
        let root = comp.root_scope();
        let mut ctx = BindContext::new(
            &mut comp,
            root,
            &s.sink,
            &s.interner,
            &ScopeBinder,
            &s.options,
        );
        let ghost = Expr::Identifier {
            name: s.interner.get_or_intern("ghost"),
            span: Span::DUMMY,
        };
        let e = binary(ghost, BinaryOp::Add, lit(1));
        let id = ctx.bind_expression(&e, BindFlags::empty());
        assert!(ctx.expr(id).is_bad());
        assert!(ctx.comp.types.is_error(ctx.expr(id).ty));
        assert_eq!(s.sink.codes(), vec![E309]);
    }

    #[test]
    fn parse_error_is_silent() {
        let s = Setup::new();
        let mut comp = Compilation::new(s.interner.get_or_intern("top"));
        let root = comp.root_scope();
        let mut ctx = BindContext::new(
            &mut comp,
            root,
            &s.sink,
            &s.interner,
            &ScopeBinder,
            &s.options,
        );
        let id = ctx.bind_expression(&Expr::Error(Span::DUMMY), BindFlags::empty());
        assert!(ctx.expr(id).is_bad());
        assert!(s.sink.is_empty());
    }

    #[test]
    fn parameters_carry_their_value() {
        let s = Setup::new();
        let mut comp = Compilation::new(s.interner.get_or_intern("top"));
        let root = comp.root_scope();
        let int = comp.types.int();
        let n = s.interner.get_or_intern("N");
        comp.scope_mut(root).declare(
            n,
            Symbol::Parameter {
                ty: int,
                value: ConstValue::Int(7),
            },
        );
        let mut ctx = BindContext::new(
            &mut comp,
            root,
            &s.sink,
            &s.interner,
            &ScopeBinder,
            &s.options,
        );
        let e = binary(
            Expr::Identifier {
                name: n,
                span: Span::DUMMY,
            },
            BinaryOp::Mul,
            lit(2),
        );
        let id = ctx.bind_expression(&e, BindFlags::empty());
        assert_eq!(ctx.try_eval(id), Some(ConstValue::Int(14)));
    }

    #[test]
    fn bit_not_requires_integral() {
        let s = Setup::new();
        let mut comp = Compilation::new(s.interner.get_or_intern("top"));
        let root = comp.root_scope();
        let mut ctx = BindContext::new(
            &mut comp,
            root,
            &s.sink,
            &s.interner,
            &ScopeBinder,
            &s.options,
        );
        let e = Expr::Unary {
            op: UnaryOp::BitNot,
            operand: Box::new(Expr::RealLiteral {
                value: 2.0,
                span: Span::DUMMY,
            }),
            span: Span::DUMMY,
        };
        let id = ctx.bind_expression(&e, BindFlags::empty());
        assert!(ctx.expr(id).is_bad());
        assert_eq!(s.sink.codes(), vec![E311]);
    }
}
