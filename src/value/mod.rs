use crate::ast;
use crate::builtins::Builtin;
use crate::environment::Env;
use indexmap::IndexMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

mod eval_error;
pub use eval_error::EvalError;

pub type Result<T> = std::result::Result<T, EvalError>;

pub type DictValue = IndexMap<String, Value>;

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    List(Vec<Value>),
    Dict(DictValue),
    Function(Rc<FunctionObject>),
    Builtin(Builtin),
    Nil,
}

/// Double-quotes `s`, escaping only quotes, backslashes and control
/// characters so Tamil text keeps its combining marks.
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_control() => quoted.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Integral numbers print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{}", s),
            Self::Boolean(b) => write!(f, "{}", if *b { "unmai" } else { "poi" }),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(Value::repr).collect();

                write!(f, "[{}]", items.join(", "))
            }
            Self::Dict(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", quote(key), value.repr()))
                    .collect();

                write!(f, "{{{}}}", pairs.join(", "))
            }
            Self::Function(func) => write!(f, "<seyal {}>", func.name),
            Self::Builtin(builtin) => write!(f, "<native {}>", builtin.name),
            Self::Nil => write!(f, "nil"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Dict(a), Self::Dict(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a.name == b.name,
            (Self::Nil, Self::Nil) => true,
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Nil
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<DictValue> for Value {
    fn from(pairs: DictValue) -> Self {
        Self::Dict(pairs)
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "NUMBER",
            Self::String(_) => "STRING",
            Self::Boolean(_) => "BOOLEAN",
            Self::List(_) => "LIST",
            Self::Dict(_) => "DICT",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
            Self::Nil => "NIL",
        }
    }

    /// Text used for a value nested inside a list or dictionary, where
    /// strings keep their quotes.
    pub fn repr(&self) -> String {
        match self {
            Self::String(s) => quote(s),
            other => other.to_string(),
        }
    }

    /// Whether the value agrees with a `vaippu` type hint.
    pub fn matches_hint(&self, hint: crate::token::Keyword) -> bool {
        use crate::token::Keyword;

        match (hint, self) {
            (Keyword::Ennam, Self::Number(_)) => true,
            (Keyword::Ezhuthu, Self::String(_)) => true,
            (Keyword::UnmaiPoi, Self::Boolean(_)) => true,
            _ => false,
        }
    }
}

pub struct FunctionObject {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: ast::BlockStatement,
    pub env: Env,
}

// The closure environment usually holds the function itself, so it is left
// out to keep formatting finite.
impl Debug for FunctionObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FunctionObject")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}
