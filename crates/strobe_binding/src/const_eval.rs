//! Compile-time evaluation of bound expressions.
//!
//! Folds literals, parameter references and operators over them. Anything
//! that depends on a variable, a clocking block or an invalid expression is
//! not constant. Division or remainder by zero is treated as not constant
//! rather than as an error.

use crate::compilation::Compilation;
use crate::expr::ExprKind;
use crate::ids::ExprId;
use serde::{Deserialize, Serialize};
use strobe_syntax::{BinaryOp, UnaryOp};

/// The value of a constant expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    /// An integer value.
    Int(i64),
    /// A real value.
    Real(f64),
    /// A string value.
    String(String),
}

impl ConstValue {
    /// Truthiness as used by the logical operators.
    pub fn is_true(&self) -> Option<bool> {
        match self {
            ConstValue::Int(n) => Some(*n != 0),
            ConstValue::Real(f) => Some(*f != 0.0),
            ConstValue::String(_) => None,
        }
    }

    fn as_real(&self) -> Option<f64> {
        match self {
            ConstValue::Int(n) => Some(*n as f64),
            ConstValue::Real(f) => Some(*f),
            ConstValue::String(_) => None,
        }
    }
}

/// Evaluates `id` if it is a compile-time constant.
pub fn try_eval(comp: &Compilation<'_>, id: ExprId) -> Option<ConstValue> {
    match &comp.expr(id).kind {
        ExprKind::Literal(value) => Some(value.clone()),
        ExprKind::Parameter { value, .. } => Some(value.clone()),
        ExprKind::Variable(_) | ExprKind::ClockingBlock(_) | ExprKind::Invalid { .. } => None,
        ExprKind::Unary { op, operand } => eval_unary(*op, try_eval(comp, *operand)?),
        ExprKind::Binary { op, left, right } => {
            let lhs = try_eval(comp, *left)?;
            let rhs = try_eval(comp, *right)?;
            eval_binary(*op, lhs, rhs)
        }
    }
}

fn bool_value(b: bool) -> ConstValue {
    ConstValue::Int(b as i64)
}

fn eval_unary(op: UnaryOp, value: ConstValue) -> Option<ConstValue> {
    match (op, value) {
        (UnaryOp::Plus, v @ (ConstValue::Int(_) | ConstValue::Real(_))) => Some(v),
        (UnaryOp::Minus, ConstValue::Int(n)) => Some(ConstValue::Int(n.wrapping_neg())),
        (UnaryOp::Minus, ConstValue::Real(f)) => Some(ConstValue::Real(-f)),
        (UnaryOp::BitNot, ConstValue::Int(n)) => Some(ConstValue::Int(!n)),
        (UnaryOp::LogNot, v) => Some(bool_value(!v.is_true()?)),
        _ => None,
    }
}

fn eval_binary(op: BinaryOp, lhs: ConstValue, rhs: ConstValue) -> Option<ConstValue> {
    match op {
        BinaryOp::LogAnd => return Some(bool_value(lhs.is_true()? && rhs.is_true()?)),
        BinaryOp::LogOr => return Some(bool_value(lhs.is_true()? || rhs.is_true()?)),
        _ => {}
    }

    if let (ConstValue::String(a), ConstValue::String(b)) = (&lhs, &rhs) {
        return match op {
            BinaryOp::Eq => Some(bool_value(a == b)),
            BinaryOp::Neq => Some(bool_value(a != b)),
            _ => None,
        };
    }

    if let (ConstValue::Int(a), ConstValue::Int(b)) = (&lhs, &rhs) {
        let (a, b) = (*a, *b);
        let value = match op {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Div => a.checked_div(b)?,
            BinaryOp::Mod => a.checked_rem(b)?,
            BinaryOp::BitAnd => a & b,
            BinaryOp::BitOr => a | b,
            BinaryOp::BitXor => a ^ b,
            BinaryOp::Eq => (a == b) as i64,
            BinaryOp::Neq => (a != b) as i64,
            BinaryOp::Lt => (a < b) as i64,
            BinaryOp::Le => (a <= b) as i64,
            BinaryOp::Gt => (a > b) as i64,
            BinaryOp::Ge => (a >= b) as i64,
            BinaryOp::LogAnd => (a != 0 && b != 0) as i64,
            BinaryOp::LogOr => (a != 0 || b != 0) as i64,
        };
        return Some(ConstValue::Int(value));
    }

    let (a, b) = (lhs.as_real()?, rhs.as_real()?);
    match op {
        BinaryOp::Add => Some(ConstValue::Real(a + b)),
        BinaryOp::Sub => Some(ConstValue::Real(a - b)),
        BinaryOp::Mul => Some(ConstValue::Real(a * b)),
        BinaryOp::Div if b != 0.0 => Some(ConstValue::Real(a / b)),
        BinaryOp::Eq => Some(bool_value(a == b)),
        BinaryOp::Neq => Some(bool_value(a != b)),
        BinaryOp::Lt => Some(bool_value(a < b)),
        BinaryOp::Le => Some(bool_value(a <= b)),
        BinaryOp::Gt => Some(bool_value(a > b)),
        BinaryOp::Ge => Some(bool_value(a >= b)),
        _ => None,
    }
}
