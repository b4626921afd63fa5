use crate::value::{format_number, Value};
use custom_error::custom_error;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub NativeError

    IncorrectArity{got: usize, want: usize} = "wrong number of arguments. got={got}, want={want}",
    UnsupportedArgType{type_name: &'static str} = "argument not supported, got {type_name}",
    InvalidArgument{detail: String} = "{detail}",
}

pub type NativeFn = fn(Vec<Value>) -> Result<Value, NativeError>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: NativeFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

fn check_arity(args: &[Value], want: usize) -> Result<(), NativeError> {
    if args.len() != want {
        return Err(NativeError::IncorrectArity {
            got: args.len(),
            want,
        });
    }
    Ok(())
}

fn unsupported(value: &Value) -> NativeError {
    NativeError::UnsupportedArgType {
        type_name: value.type_name(),
    }
}

fn neelam(args: Vec<Value>) -> Result<Value, NativeError> {
    check_arity(&args, 1)?;

    match &args[0] {
        Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
        Value::List(items) => Ok(Value::Number(items.len() as f64)),
        Value::Dict(pairs) => Ok(Value::Number(pairs.len() as f64)),
        other => Err(unsupported(other)),
    }
}

fn seru(args: Vec<Value>) -> Result<Value, NativeError> {
    check_arity(&args, 2)?;

    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(Value::List(mut items)), Some(item)) => {
            items.push(item);
            Ok(Value::List(items))
        }
        (Some(other), _) => Err(unsupported(&other)),
        _ => Err(NativeError::IncorrectArity { got: 0, want: 2 }),
    }
}

fn thoguppu(args: Vec<Value>) -> Result<Value, NativeError> {
    check_arity(&args, 1)?;

    match &args[0] {
        Value::List(items) => items.iter().try_fold(Value::Number(0.0), |acc, item| {
            match (acc, item) {
                (Value::Number(total), Value::Number(n)) => Ok(Value::Number(total + n)),
                (_, other) => Err(unsupported(other)),
            }
        }),
        other => Err(unsupported(other)),
    }
}

fn as_integer(value: &Value) -> Result<i64, NativeError> {
    match value {
        Value::Number(n) if n.fract() == 0.0 => Ok(*n as i64),
        Value::Number(n) => Err(NativeError::InvalidArgument {
            detail: format!("expected a whole number, got {}", format_number(*n)),
        }),
        other => Err(unsupported(other)),
    }
}

/// Longest list `varambu` will build in one call.
pub const MAX_RANGE_LEN: i64 = 1_000_000;

fn varambu(args: Vec<Value>) -> Result<Value, NativeError> {
    check_arity(&args, 2)?;

    let start = as_integer(&args[0])?;
    let end = as_integer(&args[1])?;
    if end.saturating_sub(start) > MAX_RANGE_LEN {
        return Err(NativeError::InvalidArgument {
            detail: format!(
                "range of {} to {} is longer than {} elements",
                start, end, MAX_RANGE_LEN
            ),
        });
    }
    Ok(Value::List((start..end).map(Value::from).collect()))
}

fn ezhuthu(args: Vec<Value>) -> Result<Value, NativeError> {
    check_arity(&args, 1)?;

    Ok(Value::String(args[0].to_string()))
}

fn ennam(args: Vec<Value>) -> Result<Value, NativeError> {
    check_arity(&args, 1)?;

    match &args[0] {
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| NativeError::InvalidArgument {
                detail: format!("cannot convert \"{}\" to a number", s),
            }),
        other => Err(unsupported(other)),
    }
}

fn kanakku_math(args: Vec<Value>) -> Result<Value, NativeError> {
    check_arity(&args, 2)?;

    let n = match &args[1] {
        Value::Number(n) => *n,
        other => return Err(unsupported(other)),
    };
    let result = match &args[0] {
        Value::String(op) => match op.as_str() {
            "sqrt" if n < 0.0 => {
                return Err(NativeError::InvalidArgument {
                    detail: format!("cannot take the square root of {}", format_number(n)),
                })
            }
            "sqrt" => n.sqrt(),
            "abs" => n.abs(),
            "floor" => n.floor(),
            "ceil" => n.ceil(),
            "round" => n.round(),
            _ => {
                return Err(NativeError::InvalidArgument {
                    detail: format!("unknown operation \"{}\"", op),
                })
            }
        },
        other => return Err(unsupported(other)),
    };
    Ok(Value::Number(result))
}

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = vec![
        Builtin { name: "neelam", func: neelam },
        Builtin { name: "seru", func: seru },
        Builtin { name: "thoguppu", func: thoguppu },
        Builtin { name: "varambu", func: varambu },
        Builtin { name: "ezhuthu", func: ezhuthu },
        Builtin { name: "ennam", func: ennam },
        Builtin { name: "kanakku_math", func: kanakku_math },
    ]
    .into_iter()
    .map(|builtin| (builtin.name, builtin))
    .collect();
}

/// The native functions visible to one interpreter. Starts from
/// [`BUILTINS`]; hosts add their own with [`Natives::register`].
#[derive(Debug, Clone)]
pub struct Natives {
    table: HashMap<&'static str, Builtin>,
}

impl Default for Natives {
    fn default() -> Self {
        Self {
            table: BUILTINS.clone(),
        }
    }
}

impl Natives {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, func: NativeFn) {
        tracing::debug!(name, "registering native function");
        self.table.insert(name, Builtin { name, func });
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.table.get(name).copied()
    }
}
