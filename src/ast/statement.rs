use super::Expression;
use crate::token::Keyword;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VarDecl(VarDeclStatement),
    Assign(AssignStatement),
    Print(PrintStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Function(FunctionStatement),
    Return(ReturnStatement),
    Expr(ExpressionStatement),
    Block(BlockStatement),
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::VarDecl(stmt) => write!(f, "{}", stmt),
            Self::Assign(stmt) => write!(f, "{}", stmt),
            Self::Print(stmt) => write!(f, "{}", stmt),
            Self::If(stmt) => write!(f, "{}", stmt),
            Self::While(stmt) => write!(f, "{}", stmt),
            Self::For(stmt) => write!(f, "{}", stmt),
            Self::Function(stmt) => write!(f, "{}", stmt),
            Self::Return(stmt) => write!(f, "{}", stmt),
            Self::Expr(stmt) => write!(f, "{}", stmt),
            Self::Block(stmt) => write!(f, "{}", stmt),
        }
    }
}

impl Statement {
    pub fn line(&self) -> usize {
        match self {
            Self::VarDecl(stmt) => stmt.line,
            Self::Assign(stmt) => stmt.line,
            Self::Print(stmt) => stmt.line,
            Self::If(stmt) => stmt.line,
            Self::While(stmt) => stmt.line,
            Self::For(stmt) => stmt.line,
            Self::Function(stmt) => stmt.line,
            Self::Return(stmt) => stmt.line,
            Self::Expr(stmt) => stmt.line,
            Self::Block(stmt) => stmt.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStatement {
    pub line: usize,
    pub name: String,
    pub type_hint: Option<Keyword>,
    pub value: Expression,
}

impl Display for VarDeclStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.type_hint {
            Some(hint) => write!(f, "vaippu {} {} = {}", hint, self.name, self.value),
            None => write!(f, "vaippu {} = {}", self.name, self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    pub line: usize,
    pub target: Expression,
    pub value: Expression,
}

impl Display for AssignStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub line: usize,
    pub value: Expression,
}

impl Display for PrintStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "kaattu {}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub line: usize,
    /// `endraal` followed by every `illai endraal`, in source order.
    pub branches: Vec<ConditionalBranch>,
    pub alternative: Option<BlockStatement>,
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                write!(f, " illai ")?;
            }
            write!(f, "endraal {} {}", branch.condition, branch.consequence)?;
        }
        if let Some(alt) = &self.alternative {
            write!(f, " illai {}", alt)?;
        }
        Ok(())
    }
}

/// One guarded block of an `endraal` chain. `line` is where its condition
/// starts, which may differ from the line of the chain itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    pub line: usize,
    pub condition: Expression,
    pub consequence: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub line: usize,
    pub condition: Expression,
    pub body: BlockStatement,
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "thirumba {} {}", self.condition, self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub line: usize,
    pub variable: String,
    pub iterable: Expression,
    pub body: BlockStatement,
}

impl Display for ForStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "foru {} in {} {}", self.variable, self.iterable, self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatement {
    pub line: usize,
    pub name: String,
    pub parameters: Vec<String>,
    pub body: BlockStatement,
}

impl Display for FunctionStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "seyal {}({}) {}",
            self.name,
            self.parameters.join(", "),
            self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub line: usize,
    pub value: Option<Expression>,
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "thiruppu {}", value),
            None => write!(f, "thiruppu"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub line: usize,
    pub expression: Expression,
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub line: usize,
    pub statements: Vec<Statement>,
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let statements: Vec<String> = self.statements.iter().map(Statement::to_string).collect();
        if statements.is_empty() {
            write!(f, "{{}}")
        } else {
            write!(f, "{{ {} }}", statements.join("; "))
        }
    }
}
