#[cfg(test)]
mod tests;

use crate::ast::{self, Expression, Operator, Statement};
use crate::builtins::{NativeError, NativeFn, Natives};
use crate::config::Config;
use crate::environment::{Env, Environment};
use crate::error::Error;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::stack::ensure_sufficient_stack;
use crate::value::{format_number, DictValue, EvalError, FunctionObject, Result, Value};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// How a statement finished: fall through to the next one, or unwind to the
/// nearest call site carrying a `thiruppu` value.
#[derive(Debug)]
enum Flow {
    Next,
    Return(Value),
}

/// One isolated Tanglish run: its own global scope, output buffer, native
/// table and execution budget.
pub struct Interpreter {
    env: Env,
    /// Non-global scopes that a `seyal` was declared in. Each one holds a
    /// function that holds it back.
    closure_scopes: Vec<Weak<RefCell<Environment>>>,
    natives: Natives,
    output: String,
    config: Config,
    steps: u64,
    depth: usize,
    line: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl Drop for Interpreter {
    // Functions capture the scope they are declared in; clearing those scopes
    // breaks the cycles.
    fn drop(&mut self) {
        for scope in self.closure_scopes.drain(..) {
            if let Some(scope) = scope.upgrade() {
                if let Ok(mut scope) = scope.try_borrow_mut() {
                    scope.clear();
                }
            }
        }
        if let Ok(mut env) = self.env.try_borrow_mut() {
            env.clear();
        }
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            env: Environment::new(),
            closure_scopes: vec![],
            natives: Natives::default(),
            output: String::new(),
            config,
            steps: 0,
            depth: 0,
            line: 0,
        }
    }

    pub fn register_native(&mut self, name: &'static str, func: NativeFn) {
        self.natives.register(name, func);
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Lexes, parses and evaluates `source` against this interpreter's
    /// global scope. Output produced before a runtime error is kept.
    pub fn run(&mut self, source: &str) -> std::result::Result<(), Error> {
        let tokens = tokenize(source)?;
        let program = parse(tokens)?;
        self.evaluate(&program)?;
        Ok(())
    }

    pub fn evaluate(&mut self, program: &ast::Program) -> Result<()> {
        tracing::debug!(statements = program.statements.len(), "evaluating program");
        self.steps = 0;
        self.depth = 0;

        let env = Rc::clone(&self.env);
        for stmt in program.statements.iter() {
            if let Flow::Return(_) = self.eval_statement(stmt, &env)? {
                break;
            }
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        self.steps += 1;
        match self.config.step_limit {
            Some(limit) if self.steps > limit => Err(EvalError::StepLimitExceeded {
                line: self.line,
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn eval_statements(&mut self, statements: &[Statement], env: &Env) -> Result<Flow> {
        for stmt in statements.iter() {
            if let Flow::Return(value) = self.eval_statement(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn eval_block(&mut self, block: &ast::BlockStatement, env: &Env) -> Result<Flow> {
        let scope = Environment::with_enclosed(env);
        ensure_sufficient_stack(|| self.eval_statements(&block.statements, &scope))
    }

    fn eval_statement(&mut self, stmt: &Statement, env: &Env) -> Result<Flow> {
        self.line = stmt.line();
        self.tick()?;
        tracing::trace!(line = self.line, "executing statement");

        match stmt {
            Statement::VarDecl(decl) => {
                let value = self.eval_expression(&decl.value, env)?;
                if let Some(hint) = decl.type_hint {
                    if !value.matches_hint(hint) {
                        tracing::warn!(
                            line = decl.line,
                            name = %decl.name,
                            hint = %hint,
                            actual = value.type_name(),
                            "type hint does not match value"
                        );
                    }
                }
                env.borrow_mut().define(&decl.name, value);
            }
            Statement::Assign(assign) => {
                let value = self.eval_expression(&assign.value, env)?;
                self.assign(&assign.target, value, env)?;
            }
            Statement::Print(print) => {
                let value = self.eval_expression(&print.value, env)?;
                self.output.push_str(&value.to_string());
                self.output.push('\n');
            }
            Statement::If(stmt) => {
                for branch in stmt.branches.iter() {
                    self.line = branch.line;
                    if self.eval_condition(&branch.condition, env)? {
                        return self.eval_block(&branch.consequence, env);
                    }
                }
                if let Some(alternative) = &stmt.alternative {
                    return self.eval_block(alternative, env);
                }
            }
            Statement::While(stmt) => loop {
                self.line = stmt.line;
                if !self.eval_condition(&stmt.condition, env)? {
                    break;
                }
                self.tick()?;
                if let Flow::Return(value) = self.eval_block(&stmt.body, env)? {
                    return Ok(Flow::Return(value));
                }
            },
            Statement::For(stmt) => return self.eval_for_statement(stmt, env),
            Statement::Function(stmt) => {
                let func = FunctionObject {
                    name: stmt.name.clone(),
                    parameters: stmt.parameters.clone(),
                    body: stmt.body.clone(),
                    env: Rc::clone(env),
                };
                if !Rc::ptr_eq(env, &self.env) {
                    self.track_closure_scope(env);
                }
                env.borrow_mut()
                    .define(&stmt.name, Value::Function(Rc::new(func)));
            }
            Statement::Return(ret) => {
                let value = match &ret.value {
                    Some(expr) => self.eval_expression(expr, env)?,
                    None => Value::Nil,
                };
                return Ok(Flow::Return(value));
            }
            Statement::Expr(stmt) => {
                self.eval_expression(&stmt.expression, env)?;
            }
            Statement::Block(block) => return self.eval_block(block, env),
        }
        Ok(Flow::Next)
    }

    fn track_closure_scope(&mut self, scope: &Env) {
        if self.closure_scopes.len() == self.closure_scopes.capacity() {
            self.closure_scopes.retain(|weak| weak.strong_count() > 0);
        }
        self.closure_scopes.push(Rc::downgrade(scope));
    }

    fn eval_for_statement(&mut self, stmt: &ast::ForStatement, env: &Env) -> Result<Flow> {
        let items: Vec<Value> = match self.eval_expression(&stmt.iterable, env)? {
            Value::List(items) => items,
            Value::Dict(pairs) => pairs.into_iter().map(|(key, _)| Value::String(key)).collect(),
            Value::String(s) => s.chars().map(|c| Value::String(c.to_string())).collect(),
            other => {
                return Err(EvalError::type_error(
                    self.line,
                    format!("cannot iterate over {}", other.type_name()),
                ))
            }
        };

        for item in items.into_iter() {
            self.line = stmt.line;
            self.tick()?;
            let scope = Environment::with_enclosed(env);
            scope.borrow_mut().define(&stmt.variable, item);
            if let Flow::Return(value) = self.eval_statements(&stmt.body.statements, &scope)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn eval_condition(&mut self, condition: &Expression, env: &Env) -> Result<bool> {
        match self.eval_expression(condition, env)? {
            Value::Boolean(b) => Ok(b),
            other => Err(EvalError::type_error(
                self.line,
                format!("condition must be unmai or poi, got {}", other.type_name()),
            )),
        }
    }

    fn assign(&mut self, target: &Expression, value: Value, env: &Env) -> Result<()> {
        let mut index_exprs = vec![];
        let mut root = target;
        while let Expression::Index(index) = root {
            index_exprs.push(index.index.as_ref());
            root = index.left.as_ref();
        }

        let name = match root {
            Expression::Identifier(name) => name,
            other => {
                return Err(EvalError::RuntimeError {
                    line: self.line,
                    detail: format!("cannot assign to {}", other),
                })
            }
        };

        if index_exprs.is_empty() {
            env.borrow_mut().assign(name, value);
            return Ok(());
        }

        let mut keys = vec![];
        for expr in index_exprs.into_iter().rev() {
            keys.push(self.eval_expression(expr, env)?);
        }

        let line = self.line;
        let updated = env
            .borrow_mut()
            .with_binding_mut(name, |slot| set_path(line, slot, &keys, value));
        match updated {
            Some(result) => result,
            None => Err(EvalError::NameError {
                line,
                name: name.clone(),
            }),
        }
    }

    fn eval_expression(&mut self, expr: &Expression, env: &Env) -> Result<Value> {
        ensure_sufficient_stack(|| match expr {
            Expression::Identifier(name) => self.lookup(name, env),
            Expression::Number(n) => Ok(Value::Number(*n)),
            Expression::String(s) => Ok(Value::String(s.clone())),
            Expression::Boolean(b) => Ok(Value::Boolean(b.0)),
            Expression::Prefix(prefix) => {
                let right = self.eval_expression(&prefix.right, env)?;
                eval_prefix_expression(self.line, prefix.operator, right)
            }
            Expression::Infix(infix) => {
                let left = self.eval_expression(&infix.left, env)?;
                let right = self.eval_expression(&infix.right, env)?;
                eval_infix_expression(self.line, infix.operator, left, right)
            }
            Expression::Call(call) => {
                let function = self.eval_expression(&call.function, env)?;
                let arguments = self.eval_expressions(&call.arguments, env)?;
                self.apply_function(function, arguments)
            }
            Expression::List(list) => Ok(Value::List(self.eval_expressions(&list.elements, env)?)),
            Expression::Dict(dict) => {
                let mut pairs = DictValue::new();
                for (key_expr, value_expr) in dict.pairs.iter() {
                    let key = match self.eval_expression(key_expr, env)? {
                        Value::String(key) => key,
                        other => {
                            return Err(EvalError::type_error(
                                self.line,
                                format!("dictionary keys must be STRING, got {}", other.type_name()),
                            ))
                        }
                    };
                    let value = self.eval_expression(value_expr, env)?;
                    pairs.insert(key, value);
                }
                Ok(Value::Dict(pairs))
            }
            Expression::Index(index) => {
                // Index a bound variable in place rather than copying the collection.
                if let Expression::Identifier(name) = index.left.as_ref() {
                    if env.borrow().is_bound(name) {
                        let key = self.eval_expression(&index.index, env)?;
                        let line = self.line;
                        let found = env
                            .borrow()
                            .with_binding(name, |left| eval_index_expression(line, left, &key));
                        return match found {
                            Some(result) => result,
                            None => Err(EvalError::NameError {
                                line,
                                name: name.clone(),
                            }),
                        };
                    }
                }
                let left = self.eval_expression(&index.left, env)?;
                let key = self.eval_expression(&index.index, env)?;
                eval_index_expression(self.line, &left, &key)
            }
        })
    }

    fn eval_expressions(&mut self, exprs: &[Expression], env: &Env) -> Result<Vec<Value>> {
        exprs
            .iter()
            .map(|expr| self.eval_expression(expr, env))
            .collect()
    }

    /// User bindings win over natives, so a program may redefine `neelam`.
    fn lookup(&self, name: &str, env: &Env) -> Result<Value> {
        if let Some(value) = env.borrow().get(name) {
            return Ok(value);
        }
        match self.natives.get(name) {
            Some(builtin) => Ok(Value::Builtin(builtin)),
            None => Err(EvalError::NameError {
                line: self.line,
                name: name.to_owned(),
            }),
        }
    }

    fn apply_function(&mut self, function: Value, arguments: Vec<Value>) -> Result<Value> {
        match function {
            Value::Function(func) => self.call_function(&func, arguments),
            Value::Builtin(builtin) => {
                tracing::debug!(name = builtin.name, "calling native function");
                (builtin.func)(arguments).map_err(|err| self.native_error(builtin.name, err))
            }
            other => Err(EvalError::type_error(
                self.line,
                format!("not a function: {}", other.type_name()),
            )),
        }
    }

    fn call_function(&mut self, func: &Rc<FunctionObject>, arguments: Vec<Value>) -> Result<Value> {
        if arguments.len() != func.parameters.len() {
            return Err(EvalError::ArityError {
                line: self.line,
                name: func.name.clone(),
                want: func.parameters.len(),
                got: arguments.len(),
            });
        }
        if self.depth >= self.config.max_depth {
            return Err(EvalError::DepthLimitExceeded {
                line: self.line,
                limit: self.config.max_depth,
            });
        }
        tracing::debug!(name = %func.name, depth = self.depth, "calling function");

        let scope = Environment::with_enclosed(&func.env);
        for (param, arg) in func.parameters.iter().zip(arguments.into_iter()) {
            scope.borrow_mut().define(param, arg);
        }

        let call_line = self.line;
        self.depth += 1;
        let flow = self.eval_statements(&func.body.statements, &scope);
        self.depth -= 1;
        self.line = call_line;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Next => Ok(Value::Nil),
        }
    }

    fn native_error(&self, name: &str, err: NativeError) -> EvalError {
        match err {
            NativeError::IncorrectArity { got, want } => EvalError::ArityError {
                line: self.line,
                name: name.to_owned(),
                want,
                got,
            },
            NativeError::UnsupportedArgType { type_name } => EvalError::type_error(
                self.line,
                format!("argument to `{}` not supported, got {}", name, type_name),
            ),
            NativeError::InvalidArgument { detail } => EvalError::RuntimeError {
                line: self.line,
                detail: format!("{}: {}", name, detail),
            },
        }
    }
}

fn eval_prefix_expression(line: usize, operator: Operator, right: Value) -> Result<Value> {
    match (operator, right) {
        (Operator::Minus, Value::Number(n)) => Ok(Value::Number(-n)),
        (Operator::Bang, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (operator, right) => Err(EvalError::type_error(
            line,
            format!("unsupported operand type for {}: {}", operator, right.type_name()),
        )),
    }
}

fn eval_infix_expression(line: usize, operator: Operator, left: Value, right: Value) -> Result<Value> {
    match operator {
        Operator::Eq => Ok(Value::Boolean(left == right)),
        Operator::NotEq => Ok(Value::Boolean(left != right)),
        Operator::Plus => match (left, right) {
            (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x + y)),
            (Value::String(x), y) => Ok(Value::String(x + &y.to_string())),
            (x, Value::String(y)) => Ok(Value::String(x.to_string() + &y)),
            (Value::List(mut x), Value::List(y)) => {
                x.extend(y);
                Ok(Value::List(x))
            }
            (x, y) => Err(EvalError::binary_op_error(
                line,
                x.type_name(),
                operator,
                y.type_name(),
            )),
        },
        op => match (&left, &right) {
            (Value::Number(x), Value::Number(y)) => eval_number_infix_expression(line, op, *x, *y),
            (Value::String(x), Value::String(y)) if is_comparison(op) => {
                Ok(Value::Boolean(compare(op, x, y)))
            }
            _ => Err(EvalError::binary_op_error(
                line,
                left.type_name(),
                op,
                right.type_name(),
            )),
        },
    }
}

fn is_comparison(operator: Operator) -> bool {
    matches!(
        operator,
        Operator::LT | Operator::GT | Operator::LTEq | Operator::GTEq
    )
}

fn compare<T: PartialOrd + ?Sized>(operator: Operator, left: &T, right: &T) -> bool {
    match operator {
        Operator::LT => left < right,
        Operator::GT => left > right,
        Operator::LTEq => left <= right,
        _ => left >= right,
    }
}

fn eval_number_infix_expression(line: usize, operator: Operator, left: f64, right: f64) -> Result<Value> {
    match operator {
        Operator::Minus => Ok(Value::Number(left - right)),
        Operator::Asterisk => Ok(Value::Number(left * right)),
        Operator::Slash | Operator::Percent if right == 0.0 => {
            Err(EvalError::ZeroDivisionError { line })
        }
        Operator::Slash => Ok(Value::Number(left / right)),
        Operator::Percent => Ok(Value::Number(left % right)),
        op if is_comparison(op) => Ok(Value::Boolean(compare(op, &left, &right))),
        op => Err(EvalError::binary_op_error(line, "NUMBER", op, "NUMBER")),
    }
}

/// Resolves a list position, rejecting fractions and out-of-range values.
fn list_position(line: usize, index: f64, len: usize) -> Result<usize> {
    if index.fract() != 0.0 {
        return Err(EvalError::type_error(
            line,
            format!("index must be a whole number, got {}", format_number(index)),
        ));
    }
    if index < 0.0 || index >= len as f64 {
        return Err(EvalError::IndexError {
            line,
            index: format_number(index),
            len,
        });
    }
    Ok(index as usize)
}

fn eval_index_expression(line: usize, left: &Value, index: &Value) -> Result<Value> {
    match (left, index) {
        (Value::List(items), Value::Number(n)) => {
            let position = list_position(line, *n, items.len())?;
            Ok(items[position].clone())
        }
        (Value::String(s), Value::Number(n)) => {
            let chars: Vec<char> = s.chars().collect();
            let position = list_position(line, *n, chars.len())?;
            Ok(Value::String(chars[position].to_string()))
        }
        (Value::Dict(pairs), Value::String(key)) => match pairs.get(key) {
            Some(value) => Ok(value.clone()),
            None => Err(EvalError::KeyError {
                line,
                key: key.clone(),
            }),
        },
        (Value::List(_), other) | (Value::String(_), other) => Err(EvalError::type_error(
            line,
            format!("index must be NUMBER, got {}", other.type_name()),
        )),
        (Value::Dict(_), other) => Err(EvalError::type_error(
            line,
            format!("dictionary keys must be STRING, got {}", other.type_name()),
        )),
        (other, _) => Err(EvalError::type_error(
            line,
            format!("index operator not supported: {}", other.type_name()),
        )),
    }
}

/// Writes `value` into `container` at the nested position named by `keys`.
fn set_path(line: usize, container: &mut Value, keys: &[Value], value: Value) -> Result<()> {
    let (key, rest) = match keys.split_first() {
        Some(split) => split,
        None => {
            *container = value;
            return Ok(());
        }
    };

    match (container, key) {
        (Value::List(items), Value::Number(n)) => {
            let position = list_position(line, *n, items.len())?;
            set_path(line, &mut items[position], rest, value)
        }
        (Value::Dict(pairs), Value::String(k)) => {
            if rest.is_empty() {
                pairs.insert(k.clone(), value);
                return Ok(());
            }
            match pairs.get_mut(k) {
                Some(slot) => set_path(line, slot, rest, value),
                None => Err(EvalError::KeyError {
                    line,
                    key: k.clone(),
                }),
            }
        }
        (Value::List(_), other) => Err(EvalError::type_error(
            line,
            format!("index must be NUMBER, got {}", other.type_name()),
        )),
        (Value::Dict(_), other) => Err(EvalError::type_error(
            line,
            format!("dictionary keys must be STRING, got {}", other.type_name()),
        )),
        (other, _) => Err(EvalError::type_error(
            line,
            format!("index assignment not supported: {}", other.type_name()),
        )),
    }
}
