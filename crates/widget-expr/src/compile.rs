//! Expression compilation to Kotlin, Swift and TypeScript source.
//!
//! Every expression compiles to one source expression. In value mode the
//! output has the expression's [`Kind`]; in condition mode it is always a
//! boolean. Calls rejected by [`Call::check`] compile to a commented
//! placeholder that behaves like the evaluator's fallback.
//!
//! Swift output calls a few file-level helpers (`formatNumber`, `isTruthy`,
//! `jsSubstring`, `firstNonEmpty`) that the SwiftUI file shell defines.

use std::borrow::Cow;

use widget_core::value::format_number;
use widget_core::{
    Call, Condition, Diagnostics, Expression, Literal, Operator, PropertyValue, ResolvedPath, Root,
    Scope, Segment, Template, Warning,
};

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Kotlin,
    Swift,
    TypeScript,
}

/// Whether an expression is compiled for its value or its truthiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Value,
    Condition,
}

/// Static type of a compiled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Text,
    Number,
    Bool,
}

/// A piece of a string template.
enum Piece<'a> {
    Text(Cow<'a, str>),
    Code(String, Kind),
}

/// Compiles expressions for one target and scope.
pub struct Compiler<'d> {
    target: Target,
    scope: Scope,
    diag: &'d mut Diagnostics,
}

impl<'d> Compiler<'d> {
    pub fn new(target: Target, scope: Scope, diag: &'d mut Diagnostics) -> Self {
        Self {
            target,
            scope,
            diag,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Compile an expression in the given mode.
    pub fn compile(&mut self, expr: &Expression, mode: Mode) -> String {
        match mode {
            Mode::Value => self.value(expr),
            Mode::Condition => self.condition(expr),
        }
    }

    /// Compile a property value for its value.
    pub fn compile_property(&mut self, value: &PropertyValue) -> String {
        match value {
            PropertyValue::Literal(lit) => self.literal(lit),
            PropertyValue::Binding(template) => self.compile_template(template),
            PropertyValue::Expression(expr) => self.value(expr),
        }
    }

    /// Compile a property value to a string-typed expression.
    pub fn compile_text(&mut self, value: &PropertyValue) -> String {
        match value {
            PropertyValue::Literal(lit) => self.string_literal(&literal_text(lit)),
            PropertyValue::Binding(template) => self.compile_template(template),
            PropertyValue::Expression(expr) => self.text(expr),
        }
    }

    /// Compile a property value to a numeric expression (`Double` in Kotlin).
    pub fn compile_number(&mut self, value: &PropertyValue) -> String {
        let expr = match value {
            PropertyValue::Literal(lit) => Expression::Literal(lit.clone()),
            PropertyValue::Expression(expr) => expr.clone(),
            PropertyValue::Binding(template) => match template.single_binding() {
                Some(path) => Expression::get(path),
                None => {
                    let text = self.compile_template(template);
                    return match self.target {
                        Target::Kotlin => format!("({}.toDoubleOrNull() ?: Double.NaN)", wrap(&text)),
                        Target::Swift => format!("(Double({text}) ?? .nan)"),
                        Target::TypeScript => format!("Number({text})"),
                    };
                }
            },
        };
        match self.target {
            Target::Kotlin | Target::Swift => self.number(&expr),
            Target::TypeScript => self.ts_number(&expr),
        }
    }

    /// Compile a condition; unparsable condition strings compile to `false`.
    pub fn compile_condition(&mut self, condition: &Condition) -> String {
        let expr = condition.resolve(self.diag);
        self.condition(&expr)
    }

    /// Access expression for a data path.
    pub fn compile_path(&self, path: &str) -> String {
        let resolved = ResolvedPath::resolve(path, self.scope);
        let root = resolved.root.name();
        match (self.target, resolved.root) {
            (Target::Kotlin, Root::Size) if is_dimension(&resolved) => {
                format!("{root}.{}.value", resolved.segments[0])
            }
            (Target::Swift, Root::Size) if is_dimension(&resolved) => resolved.segments[0].clone(),
            (Target::Kotlin | Target::Swift, _) | (Target::TypeScript, Root::Size) => {
                resolved.dotted()
            }
            (Target::TypeScript, _) => {
                let mut out = root.to_string();
                for (i, segment) in resolved.segments.iter().enumerate() {
                    out.push_str(if i == 0 { "." } else { "?." });
                    out.push_str(segment);
                }
                out
            }
        }
    }

    /// Static kind of the value at `path`.
    pub fn path_kind(&self, path: &str) -> Kind {
        let resolved = ResolvedPath::resolve(path, self.scope);
        if resolved.root == Root::Size && is_dimension(&resolved) {
            Kind::Number
        } else {
            Kind::Text
        }
    }

    /// Compile a `{{path}}` template to a string-typed expression.
    pub fn compile_template(&mut self, template: &Template) -> String {
        if let Some(path) = template.single_binding() {
            if self.path_kind(path) == Kind::Text {
                let access = self.compile_path(path);
                return match self.target {
                    Target::Kotlin | Target::Swift => access,
                    Target::TypeScript => format!("({access} ?? '')"),
                };
            }
        }
        let pieces = template
            .segments()
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => Piece::Text(Cow::Borrowed(text.as_str())),
                Segment::Binding(path) => Piece::Code(self.compile_path(path), self.path_kind(path)),
            })
            .collect();
        self.join(pieces)
    }

    /// Static kind of an expression's value.
    pub fn kind(&self, expr: &Expression) -> Kind {
        let call = match expr {
            Expression::Literal(Literal::Bool(_)) => return Kind::Bool,
            Expression::Literal(Literal::Number(_)) => return Kind::Number,
            Expression::Literal(_) => return Kind::Text,
            Expression::Call(call) => call,
        };
        if call.check().is_err() {
            return Kind::Text;
        }
        match &call.op {
            Operator::Get => self.path_kind(call.string_arg(0).unwrap_or_default()),
            Operator::Has | Operator::All | Operator::Any | Operator::Not => Kind::Bool,
            op if op.is_comparison() => Kind::Bool,
            Operator::Add => {
                let (left, right) = (self.kind(&call.args[0]), self.kind(&call.args[1]));
                if left == Kind::Text || right == Kind::Text {
                    Kind::Text
                } else {
                    Kind::Number
                }
            }
            Operator::Sub | Operator::Mul | Operator::Div => Kind::Number,
            Operator::Case => call
                .args
                .get(1)
                .or(call.args.first())
                .map_or(Kind::Text, |value| self.kind(value)),
            Operator::Coalesce => call.args.first().map_or(Kind::Text, |arg| self.kind(arg)),
            _ => Kind::Text,
        }
    }

    fn value(&mut self, expr: &Expression) -> String {
        let call = match expr {
            Expression::Literal(lit) => return self.literal(lit),
            Expression::Call(call) => call,
        };
        if let Err(warning) = call.check() {
            return self.fallback(warning, Mode::Value);
        }
        let args = &call.args;
        match &call.op {
            Operator::Get => self.compile_path(call.string_arg(0).unwrap_or_default()),
            Operator::All | Operator::Any if self.target == Target::TypeScript => {
                ts_boolean(&self.condition(expr))
            }
            Operator::Has | Operator::All | Operator::Any | Operator::Not => self.condition(expr),
            Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge | Operator::Eq | Operator::Ne => {
                self.condition(expr)
            }
            Operator::Case => self.case(args, Mode::Value),
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div => self.arithmetic(call),
            Operator::Concat => {
                let pieces = args.iter().map(|arg| self.piece(arg)).collect();
                self.join(pieces)
            }
            Operator::Upcase | Operator::Downcase => {
                let text = self.text(&args[0]);
                let method = match (self.target, &call.op) {
                    (Target::Kotlin, Operator::Upcase) => "uppercase",
                    (Target::Kotlin, _) => "lowercase",
                    (Target::Swift, Operator::Upcase) => "uppercased",
                    (Target::Swift, _) => "lowercased",
                    (Target::TypeScript, Operator::Upcase) => "toUpperCase",
                    (Target::TypeScript, _) => "toLowerCase",
                };
                format!("{}.{method}()", wrap(&text))
            }
            Operator::Interpolate => {
                let template = Template::parse(call.string_arg(0).unwrap_or_default());
                let pieces = template
                    .segments()
                    .iter()
                    .map(|segment| match segment {
                        Segment::Text(text) => Piece::Text(Cow::Owned(text.clone())),
                        Segment::Binding(path) => {
                            Piece::Code(self.compile_path(path), self.path_kind(path))
                        }
                    })
                    .collect();
                self.join(pieces)
            }
            Operator::Coalesce => self.coalesce(args),
            Operator::Substring => self.substring(args),
            Operator::Unknown(op) => self.fallback(Warning::UnknownOperator { op: op.clone() }, Mode::Value),
        }
    }

    fn condition(&mut self, expr: &Expression) -> String {
        let call = match expr {
            Expression::Literal(lit) => return lit.is_truthy().to_string(),
            Expression::Call(call) => call,
        };
        if let Err(warning) = call.check() {
            return self.fallback(warning, Mode::Condition);
        }
        match &call.op {
            Operator::Has => self.has(call.string_arg(0).unwrap_or_default()),
            Operator::All => self.junction(&call.args, "&&", "true"),
            Operator::Any => self.junction(&call.args, "||", "false"),
            Operator::Not => format!("!({})", self.condition(&call.args[0])),
            op if op.is_comparison() => self.comparison(op, &call.args[0], &call.args[1]),
            Operator::Case => self.case(&call.args, Mode::Condition),
            _ => {
                let kind = self.kind(expr);
                let code = self.value(expr);
                self.truthy(&code, kind)
            }
        }
    }

    fn fallback(&mut self, warning: Warning, mode: Mode) -> String {
        let note = match &warning {
            Warning::UnknownOperator { op } => format!("unknown op: {op}"),
            Warning::MalformedCall { op, .. } => format!("malformed {op}"),
            other => other.to_string(),
        }
        .replace("*/", "* /");
        self.diag.warn(warning);
        let placeholder = match (mode, self.target) {
            (Mode::Condition, _) => "false",
            (Mode::Value, Target::Kotlin | Target::Swift) => "\"\"",
            (Mode::Value, Target::TypeScript) => "''",
        };
        format!("/* {note} */ {placeholder}")
    }

    fn literal(&self, lit: &Literal) -> String {
        match (self.target, lit) {
            (Target::Kotlin | Target::Swift, Literal::Null) => "\"\"".to_string(),
            (Target::TypeScript, Literal::Null) => "null".to_string(),
            (_, Literal::Bool(b)) => b.to_string(),
            (Target::TypeScript, Literal::Number(n)) => format_number(*n),
            (_, Literal::Number(n)) => self.double_literal(*n),
            (_, Literal::String(s)) => self.string_literal(s),
        }
    }

    fn string_literal(&self, s: &str) -> String {
        format!("\"{}\"", escape(s, self.target))
    }

    /// `Double` literal in Kotlin or Swift.
    fn double_literal(&self, n: f64) -> String {
        match self.target {
            Target::Swift => swift_double(n),
            _ => kotlin_double(n),
        }
    }

    /// String-typed form of an expression.
    fn text(&mut self, expr: &Expression) -> String {
        if let Expression::Literal(lit) = expr {
            return self.string_literal(&literal_text(lit));
        }
        let kind = self.kind(expr);
        let code = self.value(expr);
        match (self.target, kind) {
            (Target::Kotlin | Target::Swift, Kind::Text) => code,
            (Target::Kotlin, Kind::Number) => kotlin_number_text(&code),
            (Target::Kotlin, Kind::Bool) => format!("{}.toString()", wrap(&code)),
            (Target::Swift, Kind::Number) => format!("formatNumber({code})"),
            (Target::Swift, Kind::Bool) => format!("String({code})"),
            (Target::TypeScript, Kind::Text) if always_string(expr) => code,
            (Target::TypeScript, _) => format!("String({code} ?? '')"),
        }
    }

    /// Double-typed Kotlin or Swift form of an expression.
    fn number(&mut self, expr: &Expression) -> String {
        match expr {
            Expression::Literal(Literal::String(s)) => {
                return self.double_literal(widget_core::value::string_to_number(s))
            }
            Expression::Literal(Literal::Bool(b)) => {
                return self.double_literal(f64::from(u8::from(*b)))
            }
            Expression::Literal(Literal::Null) => return self.double_literal(0.0),
            _ => {}
        }
        let kind = self.kind(expr);
        let code = self.value(expr);
        match (self.target, kind) {
            (_, Kind::Number) => code,
            (Target::Swift, Kind::Text) => format!("(Double({code}) ?? .nan)"),
            (Target::Swift, Kind::Bool) => format!("({code} ? 1.0 : 0.0)"),
            (_, Kind::Text) => format!("({}.toDoubleOrNull() ?: Double.NaN)", wrap(&code)),
            (_, Kind::Bool) => format!("(if ({code}) 1.0 else 0.0)"),
        }
    }

    fn piece<'e>(&mut self, expr: &'e Expression) -> Piece<'e> {
        match expr {
            Expression::Literal(Literal::String(s)) => Piece::Text(Cow::Borrowed(s.as_str())),
            Expression::Literal(lit) => Piece::Text(Cow::Owned(literal_text(lit))),
            _ => {
                let kind = self.kind(expr);
                Piece::Code(self.value(expr), kind)
            }
        }
    }

    /// Join pieces into a string template.
    fn join(&self, pieces: Vec<Piece<'_>>) -> String {
        let quote = match self.target {
            Target::Kotlin | Target::Swift => '"',
            Target::TypeScript => '`',
        };
        let mut out = String::new();
        out.push(quote);
        for piece in pieces {
            match (self.target, piece) {
                (Target::TypeScript, Piece::Text(text)) => out.push_str(&escape_template(&text)),
                (target, Piece::Text(text)) => out.push_str(&escape(&text, target)),
                (Target::Kotlin, Piece::Code(code, Kind::Number)) => {
                    out.push_str(&format!("${{{}}}", kotlin_number_text(&code)));
                }
                (Target::Kotlin, Piece::Code(code, _)) => out.push_str(&format!("${{{code}}}")),
                (Target::Swift, Piece::Code(code, Kind::Number)) => {
                    out.push_str(&format!("\\(formatNumber({code}))"));
                }
                (Target::Swift, Piece::Code(code, _)) => out.push_str(&format!("\\({code})")),
                (Target::TypeScript, Piece::Code(code, Kind::Text)) => {
                    out.push_str(&format!("${{{code} ?? ''}}"));
                }
                (Target::TypeScript, Piece::Code(code, _)) => out.push_str(&format!("${{{code}}}")),
            }
        }
        out.push(quote);
        out
    }

    fn has(&self, path: &str) -> String {
        let resolved = ResolvedPath::resolve(path, self.scope);
        if resolved.root == Root::Size {
            let present = resolved.segments.is_empty() || is_dimension(&resolved);
            return present.to_string();
        }
        let access = self.compile_path(path);
        match self.target {
            Target::Kotlin => format!("{access}.isNotEmpty()"),
            Target::Swift => format!("!{access}.isEmpty"),
            Target::TypeScript => format!(
                "({access} !== undefined && {access} !== null && {access} !== '')"
            ),
        }
    }

    fn junction(&mut self, args: &[Expression], op: &str, empty: &str) -> String {
        let mut parts: Vec<String> = args.iter().map(|arg| self.condition(arg)).collect();
        match parts.len() {
            0 => empty.to_string(),
            1 => parts.remove(0),
            _ => format!("({})", parts.join(&format!(" {op} "))),
        }
    }

    fn truthy(&self, code: &str, kind: Kind) -> String {
        match (self.target, kind) {
            (Target::Kotlin, Kind::Text) => format!("{}.isNotEmpty()", wrap(code)),
            (Target::Kotlin, Kind::Number) => format!(
                "({}.toDouble().let {{ it != 0.0 && !it.isNaN() }})",
                wrap(code)
            ),
            (Target::Swift, Kind::Text) => format!("!{}.isEmpty", wrap(code)),
            (Target::Swift, Kind::Number) => format!("isTruthy({code})"),
            _ => code.to_string(),
        }
    }

    fn comparison(&mut self, op: &Operator, left: &Expression, right: &Expression) -> String {
        let symbol = op.name();
        if self.target == Target::TypeScript {
            let (l, r) = (self.value(left), self.value(right));
            return format!("({l} {symbol} {r})");
        }

        let (lk, rk) = (self.kind(left), self.kind(right));
        let equality = matches!(op, Operator::Eq | Operator::Ne);
        let native = (lk == Kind::Text && rk == Kind::Text)
            || (lk == Kind::Bool && rk == Kind::Bool && equality);
        if native {
            let (l, r) = (self.value(left), self.value(right));
            return format!("({l} {symbol} {r})");
        }
        let (l, r) = if equality {
            (self.double(left), self.double(right))
        } else {
            (self.number(left), self.number(right))
        };
        format!("({l} {symbol} {r})")
    }

    /// Kotlin `Double` for equality, where `Float == Double` does not compile.
    fn double(&mut self, expr: &Expression) -> String {
        if self.target == Target::Kotlin
            && matches!(expr, Expression::Call(_))
            && self.kind(expr) == Kind::Number
        {
            format!("{}.toDouble()", wrap(&self.value(expr)))
        } else {
            self.number(expr)
        }
    }

    fn arithmetic(&mut self, call: &Call) -> String {
        let (left, right) = (&call.args[0], &call.args[1]);
        let symbol = call.op.name();
        match self.target {
            Target::TypeScript => {
                let (l, r) = (self.value(left), self.value(right));
                format!("({l} {symbol} {r})")
            }
            Target::Kotlin | Target::Swift
                if call.op == Operator::Add
                    && (self.kind(left) == Kind::Text || self.kind(right) == Kind::Text) =>
            {
                let pieces = vec![self.piece(left), self.piece(right)];
                self.join(pieces)
            }
            Target::Kotlin | Target::Swift => {
                let (l, r) = (self.number(left), self.number(right));
                format!("({l} {symbol} {r})")
            }
        }
    }

    fn case(&mut self, args: &[Expression], mode: Mode) -> String {
        let mut branches = Vec::new();
        let mut default = None;
        for chunk in args.chunks(2) {
            match chunk {
                [condition, value] => {
                    let condition = self.condition(condition);
                    branches.push((condition, self.compile(value, mode)));
                }
                [value] => default = Some(self.compile(value, mode)),
                _ => {}
            }
        }
        let default = default.unwrap_or_else(|| {
            match (mode, self.target) {
                (Mode::Condition, _) => "false",
                (Mode::Value, Target::Kotlin | Target::Swift) => "\"\"",
                (Mode::Value, Target::TypeScript) => "undefined",
            }
            .to_string()
        });
        if branches.is_empty() {
            return default;
        }

        match self.target {
            Target::Kotlin => {
                let arms: Vec<String> = branches
                    .iter()
                    .map(|(condition, value)| format!("{condition} -> {value}"))
                    .collect();
                format!("when {{ {}; else -> {default} }}", arms.join("; "))
            }
            Target::Swift | Target::TypeScript => branches
                .into_iter()
                .rev()
                .fold(default, |rest, (condition, value)| {
                    format!("({condition} ? {value} : {rest})")
                }),
        }
    }

    fn coalesce(&mut self, args: &[Expression]) -> String {
        match self.target {
            Target::Kotlin => {
                let mut chain = Vec::new();
                for arg in args {
                    let kind = self.kind(arg);
                    chain.push(self.value(arg));
                    if kind != Kind::Text {
                        break;
                    }
                }
                let mut codes = chain.into_iter().rev();
                let last = codes.next().unwrap_or_else(|| "\"\"".to_string());
                codes.fold(last, |rest, code| {
                    format!("{}.ifEmpty {{ {rest} }}", wrap(&code))
                })
            }
            Target::Swift => {
                let mut chain = Vec::new();
                for (i, arg) in args.iter().enumerate() {
                    let kind = self.kind(arg);
                    if kind == Kind::Text {
                        chain.push(self.value(arg));
                        continue;
                    }
                    if i == 0 {
                        return self.value(arg);
                    }
                    chain.push(self.text(arg));
                    break;
                }
                match chain.len() {
                    0 => "\"\"".to_string(),
                    1 => chain.remove(0),
                    _ => format!("firstNonEmpty({})", chain.join(", ")),
                }
            }
            Target::TypeScript => {
                let items: Vec<String> = args.iter().map(|arg| self.value(arg)).collect();
                format!(
                    "([{}].find((v) => v !== undefined && v !== null && v !== ''))",
                    items.join(", ")
                )
            }
        }
    }

    fn substring(&mut self, args: &[Expression]) -> String {
        let text = self.text(&args[0]);
        let start = &args[1];
        let length = args.get(2);
        match self.target {
            Target::Kotlin => {
                let from = self.int(start);
                let to = match length {
                    None => "it.length".to_string(),
                    Some(length) => match (literal_number(start), literal_number(length)) {
                        (Some(a), Some(b)) => kotlin_int(a + b),
                        _ => format!(
                            "({} + {}).toInt()",
                            self.number(start),
                            self.number(length)
                        ),
                    },
                };
                format!(
                    "{}.let {{ val a = {}.coerceIn(0, it.length); val b = {}.coerceIn(0, it.length); \
                     it.substring(minOf(a, b), maxOf(a, b)) }}",
                    wrap(&text),
                    wrap(&from),
                    wrap(&to)
                )
            }
            Target::Swift => {
                let from = self.number(start);
                let to = match length {
                    None => "nil".to_string(),
                    Some(length) => match (literal_number(start), literal_number(length)) {
                        (Some(a), Some(b)) => swift_double(a + b),
                        _ => format!("({from} + {})", self.number(length)),
                    },
                };
                format!("jsSubstring({text}, {from}, {to})")
            }
            Target::TypeScript => {
                let from = self.ts_number(start);
                match length {
                    None => format!("{}.substring({from})", wrap(&text)),
                    Some(length) => {
                        let to = match (literal_number(start), literal_number(length)) {
                            (Some(a), Some(b)) => format_number(a + b),
                            _ => format!("{} + {}", wrap(&from), wrap(&self.ts_number(length))),
                        };
                        format!("{}.substring({from}, {to})", wrap(&text))
                    }
                }
            }
        }
    }

    /// Kotlin `Int`, truncated toward zero.
    fn int(&mut self, expr: &Expression) -> String {
        match literal_number(expr) {
            Some(n) => kotlin_int(n),
            None => format!("{}.toInt()", wrap(&self.number(expr))),
        }
    }

    /// TypeScript number for an expression of any kind.
    fn ts_number(&mut self, expr: &Expression) -> String {
        if let Some(n) = literal_number(expr) {
            return format_number(n);
        }
        let kind = self.kind(expr);
        let code = self.value(expr);
        match kind {
            Kind::Number => code,
            _ => format!("Number({code})"),
        }
    }
}

fn is_dimension(path: &ResolvedPath) -> bool {
    matches!(path.segments.as_slice(), [field] if field == "width" || field == "height")
}

fn literal_number(expr: &Expression) -> Option<f64> {
    expr.as_literal().and_then(Literal::as_number)
}

/// Display text of a literal.
fn literal_text(lit: &Literal) -> String {
    match lit {
        Literal::Null => String::new(),
        Literal::Bool(b) => b.to_string(),
        Literal::Number(n) => format_number(*n),
        Literal::String(s) => s.clone(),
    }
}

/// TypeScript expressions that always produce a string.
fn always_string(expr: &Expression) -> bool {
    match expr {
        Expression::Literal(Literal::String(_)) => true,
        Expression::Call(call) => matches!(
            call.op,
            Operator::Concat
                | Operator::Upcase
                | Operator::Downcase
                | Operator::Interpolate
                | Operator::Substring
                | Operator::Add
        ),
        Expression::Literal(_) => false,
    }
}

/// Kotlin `Int` literal; `NaN` becomes 0 as `Double.toInt()` does.
fn kotlin_int(n: f64) -> String {
    if n.is_nan() {
        return "0".to_string();
    }
    let n = n.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i64;
    n.to_string()
}

/// TypeScript `boolean` for a condition whose operands may be returned as is.
fn ts_boolean(code: &str) -> String {
    if code == "true" || code == "false" {
        code.to_string()
    } else if code.starts_with('(') && is_grouped(code) {
        format!("Boolean{code}")
    } else {
        format!("Boolean({code})")
    }
}

fn swift_double(n: f64) -> String {
    if n.is_nan() {
        "Double.nan".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Double.infinity".to_string()
        } else {
            "-Double.infinity".to_string()
        }
    } else {
        format!("{n:?}")
    }
}

fn kotlin_double(n: f64) -> String {
    if n.is_nan() {
        "Double.NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Double.POSITIVE_INFINITY".to_string()
        } else {
            "Double.NEGATIVE_INFINITY".to_string()
        }
    } else {
        format!("{n:?}")
    }
}

/// Kotlin `Double` or `Float` rendered the way JavaScript prints numbers.
fn kotlin_number_text(code: &str) -> String {
    format!(
        "{}.let {{ if (it % 1.0 == 0.0) it.toLong().toString() else it.toString() }}",
        wrap(code)
    )
}

/// Escape for a double-quoted string literal. Kotlin also escapes `$`.
fn escape(s: &str, target: Target) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' if target == Target::Kotlin => out.push_str("\\$"),
            c if c.is_control() && target == Target::Swift => {
                out.push_str(&format!("\\u{{{:x}}}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Escape for a JavaScript template literal.
fn escape_template(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}

/// Parenthesize `code` unless it is a plain path or already one group.
pub fn wrap(code: &str) -> String {
    let plain = !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '?' | '$'));
    if plain || is_grouped(code) {
        code.to_string()
    } else {
        format!("({code})")
    }
}

/// Whether `code` is one parenthesized group, optionally preceded by a
/// function name, as in `(a + b)` or `String(x ?? '')`.
fn is_grouped(code: &str) -> bool {
    let open = code
        .find(|c: char| !(c.is_alphanumeric() || c == '.' || c == '_'))
        .unwrap_or(code.len());
    let group = &code[open..];
    if !group.starts_with('(') || !group.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in group.char_indices() {
        if let Some(q) = quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                _ if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1 == group.len();
                }
            }
            _ => {}
        }
    }
    false
}
