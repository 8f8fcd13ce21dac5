//! Shared fixture and syntax builders for timing-control binding tests.

#![allow(dead_code)]

use strobe_binding::{
    BindContext, BindFlags, Compilation, ConstValue, ExpressionBinder, ScopeBinder, ScopeId,
    Symbol, TimingControl, TimingControlKind, TimingId, Type,
};
use strobe_common::{Ident, Interner};
use strobe_config::BindOptions;
use strobe_diagnostics::{DiagnosticCode, DiagnosticSink};
use strobe_source::{FileId, Span};
use strobe_syntax::{
    BinaryOp, Delay3Syntax, DelaySyntax, EdgeKeyword, EventControlSyntax,
    EventControlWithExpressionSyntax, EventExpr, EventSeparator, Expr, IffClause,
    ImplicitEventControlSyntax, ParamAssignment, ParameterValueAssignment,
    RepeatedEventControlSyntax, SignalEventExpr, TimingControlSyntax,
};

/// A module scope with a representative set of declarations:
///
/// | name    | declared as                    |
/// |---------|--------------------------------|
/// | clk, rst_n, a, b, c, en | `logic`        |
/// | data    | `logic [7:0]`                  |
/// | count   | `int`                          |
/// | period  | `real`                         |
/// | label   | `string`                       |
/// | ev      | `event`                        |
/// | h       | `chandle`                      |
/// | mem     | `logic [7:0] mem [4]`          |
/// | cfg     | unpacked struct                |
/// | N       | `parameter int N = 3`          |
/// | cb      | clocking block (not default)   |
pub struct Fixture<'a> {
    pub interner: &'a Interner,
    pub sink: DiagnosticSink,
    pub options: BindOptions,
    pub comp: Compilation<'a>,
    pub scope: ScopeId,
    pub flags: BindFlags,
}

impl<'a> Fixture<'a> {
    pub fn new(interner: &'a Interner) -> Self {
        let mut comp = Compilation::new(interner.get_or_intern("top"));
        let scope = comp.root_scope();

        let logic = comp.types.logic(1);
        let byte = comp.types.logic(8);
        let int = comp.types.int();
        let real = comp.types.real();
        let string = comp.types.intern(Type::String);
        let event = comp.types.intern(Type::Event);
        let handle = comp.types.intern(Type::CHandle);
        let mem = comp.types.intern(Type::UnpackedArray {
            element: byte,
            size: 4,
        });
        let cfg = comp.types.intern(Type::Struct {
            name: interner.get_or_intern("cfg_t"),
            packed: false,
            fields: vec![(interner.get_or_intern("mode"), byte)],
        });

        let s = comp.scope_mut(scope);
        for name in ["clk", "rst_n", "a", "b", "c", "en"] {
            s.declare(interner.get_or_intern(name), Symbol::Variable { ty: logic });
        }
        let vars = [
            ("data", byte),
            ("count", int),
            ("period", real),
            ("label", string),
            ("ev", event),
            ("h", handle),
            ("mem", mem),
            ("cfg", cfg),
        ];
        for (name, ty) in vars {
            s.declare(interner.get_or_intern(name), Symbol::Variable { ty });
        }
        s.declare(
            interner.get_or_intern("N"),
            Symbol::Parameter {
                ty: int,
                value: ConstValue::Int(3),
            },
        );
        s.declare_clocking(interner.get_or_intern("cb"), false);

        Self {
            interner,
            sink: DiagnosticSink::new(),
            options: BindOptions::default(),
            comp,
            scope,
            flags: BindFlags::empty(),
        }
    }

    /// Declares `cb` as the default clocking of the root scope.
    pub fn with_default_clocking(mut self) -> Self {
        let cb = self.interner.get_or_intern("cb");
        self.comp.scope_mut(self.scope).declare_clocking(cb, true);
        self
    }

    pub fn bind(&mut self, syntax: &'a TimingControlSyntax) -> TimingId {
        self.bind_with(syntax, &ScopeBinder)
    }

    pub fn bind_with(
        &mut self,
        syntax: &'a TimingControlSyntax,
        binder: &dyn ExpressionBinder,
    ) -> TimingId {
        let mut ctx = BindContext::new(
            &mut self.comp,
            self.scope,
            &self.sink,
            self.interner,
            binder,
            &self.options,
        )
        .with_flags(self.flags);
        TimingControl::bind(syntax, &mut ctx)
    }

    /// Runs `f` with a context over this fixture, for the alternate
    /// constructors that do not go through the dispatcher.
    pub fn with_ctx<R>(&mut self, f: impl FnOnce(&mut BindContext<'_, 'a>) -> R) -> R {
        let mut ctx = BindContext::new(
            &mut self.comp,
            self.scope,
            &self.sink,
            self.interner,
            &ScopeBinder,
            &self.options,
        )
        .with_flags(self.flags);
        f(&mut ctx)
    }

    pub fn kind(&self, id: TimingId) -> TimingControlKind {
        self.comp.kind(id)
    }

    pub fn control(&self, id: TimingId) -> &TimingControl {
        self.comp.control(id)
    }

    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.sink.codes()
    }

    pub fn type_of(&self, expr: strobe_binding::ExprId) -> String {
        self.comp
            .types
            .describe(self.comp.expr(expr).ty, self.interner)
    }

    pub fn name(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }
}

pub fn span(start: u32, end: u32) -> Span {
    Span::new(FileId::from_raw(0), start, end)
}

// Expressions

pub fn ident(interner: &Interner, name: &str) -> Expr {
    Expr::Identifier {
        name: interner.get_or_intern(name),
        span: Span::DUMMY,
    }
}

pub fn lit(value: i64) -> Expr {
    Expr::Literal {
        value,
        width: None,
        span: Span::DUMMY,
    }
}

pub fn lit_at(value: i64, span: Span) -> Expr {
    Expr::Literal {
        value,
        width: None,
        span,
    }
}

pub fn real(value: f64) -> Expr {
    Expr::RealLiteral {
        value,
        span: Span::DUMMY,
    }
}

pub fn string(value: &str) -> Expr {
    Expr::StringLiteral {
        value: value.to_string(),
        span: Span::DUMMY,
    }
}

pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
        span: Span::DUMMY,
    }
}

// Event expressions

pub fn signal(edge: Option<EdgeKeyword>, expr: Expr) -> EventExpr {
    EventExpr::Signal(SignalEventExpr {
        edge,
        expr,
        iff: None,
        span: Span::DUMMY,
    })
}

pub fn signal_iff(edge: Option<EdgeKeyword>, expr: Expr, condition: Expr) -> EventExpr {
    EventExpr::Signal(SignalEventExpr {
        edge,
        expr,
        iff: Some(IffClause {
            condition,
            span: Span::DUMMY,
        }),
        span: Span::DUMMY,
    })
}

pub fn posedge(expr: Expr) -> EventExpr {
    signal(Some(EdgeKeyword::Posedge), expr)
}

pub fn negedge(expr: Expr) -> EventExpr {
    signal(Some(EdgeKeyword::Negedge), expr)
}

pub fn or(left: EventExpr, right: EventExpr) -> EventExpr {
    EventExpr::Binary {
        left: Box::new(left),
        separator: EventSeparator::Or,
        right: Box::new(right),
        span: Span::DUMMY,
    }
}

pub fn comma(left: EventExpr, right: EventExpr) -> EventExpr {
    EventExpr::Binary {
        left: Box::new(left),
        separator: EventSeparator::Comma,
        right: Box::new(right),
        span: Span::DUMMY,
    }
}

pub fn paren(inner: EventExpr) -> EventExpr {
    EventExpr::Paren {
        inner: Box::new(inner),
        span: Span::DUMMY,
    }
}

// Timing controls

pub fn delay(value: Expr) -> TimingControlSyntax {
    TimingControlSyntax::Delay(DelaySyntax {
        value,
        span: Span::DUMMY,
    })
}

pub fn delay_at(value: Expr, span: Span) -> TimingControlSyntax {
    TimingControlSyntax::Delay(DelaySyntax { value, span })
}

pub fn delay3(d1: Expr, d2: Option<Expr>, d3: Option<Expr>) -> TimingControlSyntax {
    TimingControlSyntax::Delay3(Delay3Syntax {
        delay1: d1,
        delay2: d2,
        delay3: d3,
        span: Span::DUMMY,
    })
}

pub fn cycle_delay_at(value: Expr, span: Span) -> TimingControlSyntax {
    TimingControlSyntax::CycleDelay(DelaySyntax { value, span })
}

pub fn cycle_delay(value: Expr) -> TimingControlSyntax {
    cycle_delay_at(value, Span::DUMMY)
}

pub fn at_name(expr: Expr) -> TimingControlSyntax {
    TimingControlSyntax::EventControl(EventControlSyntax {
        event_name: expr,
        span: Span::DUMMY,
    })
}

pub fn at(expr: EventExpr) -> TimingControlSyntax {
    TimingControlSyntax::EventControlWithExpression(EventControlWithExpressionSyntax {
        expr,
        span: Span::DUMMY,
    })
}

pub fn implicit() -> TimingControlSyntax {
    TimingControlSyntax::ImplicitEventControl(ImplicitEventControlSyntax {
        parenthesized: false,
        span: Span::DUMMY,
    })
}

pub fn one_step() -> TimingControlSyntax {
    TimingControlSyntax::OneStepDelay { span: Span::DUMMY }
}

pub fn repeat_at(
    count: Expr,
    event: Option<TimingControlSyntax>,
    span: Span,
) -> TimingControlSyntax {
    TimingControlSyntax::RepeatedEventControl(RepeatedEventControlSyntax {
        count,
        event_control: event.map(Box::new),
        span,
    })
}

pub fn repeat(count: Expr, event: TimingControlSyntax) -> TimingControlSyntax {
    repeat_at(count, Some(event), Span::DUMMY)
}

// Net delays

pub fn ordered(expr: Expr) -> ParamAssignment {
    ParamAssignment::Ordered {
        expr,
        span: Span::DUMMY,
    }
}

pub fn named(interner: &Interner, name: &str, expr: Expr) -> ParamAssignment {
    ParamAssignment::Named {
        name: interner.get_or_intern(name),
        expr: Some(expr),
        span: Span::DUMMY,
    }
}

pub fn param_list(params: Vec<ParamAssignment>) -> ParameterValueAssignment {
    ParameterValueAssignment {
        params,
        span: Span::DUMMY,
    }
}
