use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub EvalError

    NameError{line: usize, name: String} = "NameError at line {line}: '{name}' is not defined",
    TypeError{line: usize, detail: String} = "TypeError at line {line}: {detail}",
    ZeroDivisionError{line: usize} = "ZeroDivisionError at line {line}: division by zero",
    ArityError{line: usize, name: String, want: usize, got: usize} = "ArityError at line {line}: {name} expects {want} argument(s), got {got}",
    IndexError{line: usize, index: String, len: usize} = "IndexError at line {line}: index {index} out of range for length {len}",
    KeyError{line: usize, key: String} = "KeyError at line {line}: key \"{key}\" not found",
    RuntimeError{line: usize, detail: String} = "RuntimeError at line {line}: {detail}",
    StepLimitExceeded{line: usize, limit: u64} = "RuntimeError at line {line}: execution step limit of {limit} exceeded",
    DepthLimitExceeded{line: usize, limit: usize} = "RuntimeError at line {line}: maximum call depth of {limit} exceeded",
}

impl EvalError {
    pub fn type_error(line: usize, detail: impl Into<String>) -> Self {
        Self::TypeError {
            line,
            detail: detail.into(),
        }
    }

    /// Reports an operator applied to operands it does not support.
    pub fn binary_op_error(
        line: usize,
        left: &'static str,
        operator: crate::ast::Operator,
        right: &'static str,
    ) -> Self {
        Self::type_error(
            line,
            format!("unsupported operand types: {} {} {}", left, operator, right),
        )
    }
}
