//! JSON debug dumps of bound timing controls.
//!
//! [`AstSerializer`] builds a `serde_json::Value` tree with a small
//! write/array API that each node drives from its `serialize_to` method.
//! Dumps are for inspection and tooling; nothing reads them back.

use crate::compilation::Compilation;
use crate::const_eval::ConstValue;
use crate::expr::ExprKind;
use crate::ids::{ExprId, TimingId};
use crate::timing::TimingControl;
use serde_json::{Map, Value};
use strobe_common::Interner;

#[derive(Debug)]
enum Frame {
    Object(Map<String, Value>),
    Array(String, Vec<Value>),
}

/// Incrementally builds a JSON dump of bound nodes.
pub struct AstSerializer<'c, 's> {
    comp: &'c Compilation<'s>,
    interner: &'c Interner,
    stack: Vec<Frame>,
}

impl<'c, 's> AstSerializer<'c, 's> {
    /// Creates a serializer with an empty root object.
    pub fn new(comp: &'c Compilation<'s>, interner: &'c Interner) -> Self {
        Self {
            comp,
            interner,
            stack: vec![Frame::Object(Map::new())],
        }
    }

    /// Writes a field into the current object, or appends to the current array.
    pub fn write(&mut self, name: &str, value: impl Into<Value>) {
        match self.stack.last_mut() {
            Some(Frame::Object(map)) => {
                map.insert(name.to_string(), value.into());
            }
            Some(Frame::Array(_, items)) => items.push(value.into()),
            None => {}
        }
    }

    /// Writes a bound expression.
    pub fn write_expr(&mut self, name: &str, id: ExprId) {
        let value = self.expr_value(id);
        self.write(name, value);
    }

    /// Writes a bound timing control as a nested object.
    pub fn write_timing(&mut self, name: &str, id: TimingId) {
        let value = Value::Object(self.timing_object(id));
        self.write(name, value);
    }

    /// Opens an array field; values written until [`end_array`](Self::end_array)
    /// become its elements.
    pub fn start_array(&mut self, name: &str) {
        self.stack.push(Frame::Array(name.to_string(), Vec::new()));
    }

    /// Closes the array opened by the matching [`start_array`](Self::start_array).
    pub fn end_array(&mut self) {
        if let Some(Frame::Array(name, items)) = self.stack.pop() {
            self.write(&name, Value::Array(items));
        } else {
            debug_assert!(false, "end_array without start_array");
        }
    }

    /// Serializes a timing control: appended as an element inside an array,
    /// merged into the current object otherwise.
    pub fn serialize(&mut self, id: TimingId) {
        let object = self.timing_object(id);
        match self.stack.last_mut() {
            Some(Frame::Array(_, items)) => items.push(Value::Object(object)),
            Some(Frame::Object(map)) => map.extend(object),
            None => {}
        }
    }

    /// Returns the finished dump.
    pub fn finish(mut self) -> Value {
        match self.stack.pop() {
            Some(Frame::Object(map)) if self.stack.is_empty() => Value::Object(map),
            _ => {
                debug_assert!(false, "unbalanced serializer frames");
                Value::Null
            }
        }
    }

    fn timing_object(&mut self, id: TimingId) -> Map<String, Value> {
        let comp = self.comp;
        let control = comp.control(id);
        self.stack.push(Frame::Object(Map::new()));
        self.write("kind", control.kind().as_str());
        control.serialize_to(self);
        match self.stack.pop() {
            Some(Frame::Object(map)) => map,
            _ => {
                debug_assert!(false, "unbalanced serializer frames");
                Map::new()
            }
        }
    }

    fn expr_value(&self, id: ExprId) -> Value {
        let expr = self.comp.expr(id);
        let mut map = Map::new();
        let kind = match &expr.kind {
            ExprKind::Literal(value) => {
                map.insert("value".into(), const_value(value));
                "Literal"
            }
            ExprKind::Variable(name) => {
                map.insert("symbol".into(), self.interner.resolve(*name).into());
                "Variable"
            }
            ExprKind::Parameter { name, value } => {
                map.insert("symbol".into(), self.interner.resolve(*name).into());
                map.insert("value".into(), const_value(value));
                "Parameter"
            }
            ExprKind::ClockingBlock(name) => {
                map.insert("symbol".into(), self.interner.resolve(*name).into());
                "ClockingBlock"
            }
            ExprKind::Unary { op, operand } => {
                map.insert("op".into(), op.as_str().into());
                map.insert("operand".into(), self.expr_value(*operand));
                "Unary"
            }
            ExprKind::Binary { op, left, right } => {
                map.insert("op".into(), op.as_str().into());
                map.insert("left".into(), self.expr_value(*left));
                map.insert("right".into(), self.expr_value(*right));
                "Binary"
            }
            ExprKind::Invalid { child } => {
                if let Some(child) = child {
                    map.insert("child".into(), self.expr_value(*child));
                }
                "Invalid"
            }
        };
        map.insert("kind".into(), kind.into());
        map.insert(
            "type".into(),
            self.comp.types.describe(expr.ty, self.interner).into(),
        );
        Value::Object(map)
    }
}

fn const_value(value: &ConstValue) -> Value {
    match value {
        ConstValue::Int(n) => (*n).into(),
        ConstValue::Real(f) => (*f).into(),
        ConstValue::String(s) => s.clone().into(),
    }
}

impl TimingControl {
    /// Writes this control's fields. The `kind` field is written by the
    /// serializer itself.
    pub fn serialize_to(&self, serializer: &mut AstSerializer<'_, '_>) {
        match self {
            TimingControl::Invalid(ctrl) => {
                if let Some(child) = ctrl.child {
                    serializer.write_timing("child", child);
                }
            }
            TimingControl::Delay(ctrl) => serializer.write_expr("expr", ctrl.expr),
            TimingControl::Delay3(ctrl) => {
                serializer.write_expr("expr1", ctrl.expr1);
                if let Some(e) = ctrl.expr2 {
                    serializer.write_expr("expr2", e);
                }
                if let Some(e) = ctrl.expr3 {
                    serializer.write_expr("expr3", e);
                }
            }
            TimingControl::SignalEvent(ctrl) => {
                serializer.write_expr("expr", ctrl.expr);
                serializer.write("edge", ctrl.edge.to_string());
                if let Some(cond) = ctrl.iff_condition {
                    serializer.write_expr("iff", cond);
                }
            }
            TimingControl::EventList(ctrl) => {
                serializer.start_array("events");
                for &event in &ctrl.events {
                    serializer.serialize(event);
                }
                serializer.end_array();
            }
            TimingControl::RepeatedEvent(ctrl) => {
                serializer.write_expr("expr", ctrl.expr);
                serializer.write_timing("event", ctrl.event);
            }
            TimingControl::CycleDelay(ctrl) => serializer.write_expr("expr", ctrl.expr),
            TimingControl::ImplicitEvent(_) | TimingControl::OneStepDelay(_) => {}
        }
    }
}

impl Compilation<'_> {
    /// Dumps a timing control and everything it references as JSON.
    pub fn dump_timing(&self, id: TimingId, interner: &Interner) -> Value {
        let mut serializer = AstSerializer::new(self, interner);
        serializer.serialize(id);
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expression;
    use crate::timing::{
        DelayControl, EdgeKind, EventListControl, InvalidTimingControl, OneStepDelayControl,
        SignalEventControl,
    };
    use serde_json::json;
    use strobe_source::Span;

    #[test]
    fn delay_dump() {
        let interner = Interner::new();
        let mut comp = Compilation::new(interner.get_or_intern("top"));
        let ty = comp.types.int();
        let e = comp.emplace_expr(Expression::new(
            ExprKind::Literal(ConstValue::Int(5)),
            ty,
            Span::DUMMY,
        ));
        let id = comp.emplace_timing(TimingControl::Delay(DelayControl { expr: e }));
        assert_eq!(
            comp.dump_timing(id, &interner),
            json!({
                "kind": "Delay",
                "expr": { "kind": "Literal", "type": "int", "value": 5 }
            })
        );
    }

    #[test]
    fn event_list_inside_invalid() {
        let interner = Interner::new();
        let mut comp = Compilation::new(interner.get_or_intern("top"));
        let ty = comp.types.logic(1);
        let a = comp.emplace_expr(Expression::new(
            ExprKind::Variable(interner.get_or_intern("a")),
            ty,
            Span::DUMMY,
        ));
        let sig = comp.emplace_timing(TimingControl::SignalEvent(SignalEventControl {
            edge: EdgeKind::NegEdge,
            expr: a,
            iff_condition: None,
        }));
        let step = comp.emplace_timing(TimingControl::OneStepDelay(OneStepDelayControl));
        let list = comp.emplace_timing(TimingControl::EventList(EventListControl {
            events: vec![sig, step],
        }));
        let bad = comp.emplace_timing(TimingControl::Invalid(InvalidTimingControl {
            child: Some(list),
        }));
        assert_eq!(
            comp.dump_timing(bad, &interner),
            json!({
                "kind": "Invalid",
                "child": {
                    "kind": "EventList",
                    "events": [
                        {
                            "kind": "SignalEvent",
                            "edge": "negedge",
                            "expr": { "kind": "Variable", "type": "logic", "symbol": "a" }
                        },
                        { "kind": "OneStepDelay" }
                    ]
                }
            })
        );
    }

    #[test]
    fn childless_invalid_dump() {
        let interner = Interner::new();
        let mut comp = Compilation::new(interner.get_or_intern("top"));
        let bad = comp.emplace_timing(TimingControl::Invalid(InvalidTimingControl { child: None }));
        assert_eq!(comp.dump_timing(bad, &interner), json!({ "kind": "Invalid" }));
    }
}
