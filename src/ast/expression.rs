use crate::token::TokenType;
use derive_more::Display;
use std::fmt::{Display, Formatter};

#[derive(Display, Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    Number(f64),
    #[display(fmt = "{:?}", _0)]
    String(String),
    Boolean(Boolean),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Call(CallExpression),
    List(ListLiteral),
    Dict(DictLiteral),
    Index(IndexExpression),
}

impl Expression {
    /// The variable an assignment to this expression ultimately writes to,
    /// or `None` when the expression is not assignable.
    pub fn assignment_root(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            Self::Index(index) => index.left.assignment_root(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Operator {
    #[strum(to_string = "!")]
    Bang,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "*")]
    Asterisk,
    #[strum(to_string = "/")]
    Slash,
    #[strum(to_string = "%")]
    Percent,
    #[strum(to_string = "<")]
    LT,
    #[strum(to_string = ">")]
    GT,
    #[strum(to_string = "<=")]
    LTEq,
    #[strum(to_string = ">=")]
    GTEq,
    #[strum(to_string = "==")]
    Eq,
    #[strum(to_string = "!=")]
    NotEq,
}

impl Operator {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        Some(match token_type {
            TokenType::Bang => Self::Bang,
            TokenType::Minus => Self::Minus,
            TokenType::Plus => Self::Plus,
            TokenType::Asterisk => Self::Asterisk,
            TokenType::Slash => Self::Slash,
            TokenType::Percent => Self::Percent,
            TokenType::LT => Self::LT,
            TokenType::GT => Self::GT,
            TokenType::LTEq => Self::LTEq,
            TokenType::GTEq => Self::GTEq,
            TokenType::Eq => Self::Eq,
            TokenType::NotEq => Self::NotEq,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub operator: Operator,
    pub right: Box<Expression>,
}

impl Display for PrefixExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: Operator,
    pub right: Box<Expression>,
}

impl Display for InfixExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boolean(pub bool);

impl Display for Boolean {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", if self.0 { "unmai" } else { "poi" })
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let argument_names: Vec<String> =
            self.arguments.iter().map(Expression::to_string).collect();

        write!(f, "{}({})", self.function, argument_names.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListLiteral {
    pub elements: Vec<Expression>,
}

impl Display for ListLiteral {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let elements: Vec<String> = self.elements.iter().map(Expression::to_string).collect();

        write!(f, "[{}]", elements.join(", "))
    }
}

impl From<Vec<Expression>> for ListLiteral {
    fn from(elements: Vec<Expression>) -> Self {
        Self { elements }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl Display for IndexExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictLiteral {
    pub pairs: Vec<(Expression, Expression)>,
}

impl Display for DictLiteral {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let pairs: Vec<String> = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        write!(f, "agarathi {{{}}}", pairs.join(", "))
    }
}

impl From<Vec<(Expression, Expression)>> for DictLiteral {
    fn from(pairs: Vec<(Expression, Expression)>) -> Self {
        Self { pairs }
    }
}
