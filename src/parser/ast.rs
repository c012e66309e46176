use super::error::ParseError;
use super::locations::{Locatable, Span};
use super::tokenizer::{Token, TokenType as TT};
use derivative::Derivative;

#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq)]
pub enum Statement {
    Print(
        Expression,
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
    Declaration(
        DeclaredType,
        Name,
        Expression,
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
    Assignment(
        Name,
        Expression,
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
    If(
        Expression,
        Box<Statement>,         // then branch
        Option<Box<Statement>>, // else branch
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
    While(
        Expression,
        Box<Statement>,
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
    Block(
        Vec<Statement>,
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
}

#[derive(Derivative, Clone)]
#[derivative(PartialEq)]
pub struct Name {
    pub name: String,
    #[derivative(PartialEq = "ignore")]
    pub span: Span,
}

impl Name {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            span: Span::default(),
        }
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name(\"{}\")", self.name)
    }
}

impl From<Token> for Name {
    fn from(value: Token) -> Self {
        match value.typ {
            TT::NAME => Self {
                name: value.lexeme,
                span: value.span,
            },
            _ => unreachable!(),
        }
    }
}

/// Type named by a declaration; the initializer is coerced into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    Int,
    Float,
    String,
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
        }
    }
}

impl From<Token> for DeclaredType {
    fn from(value: Token) -> Self {
        match value.typ {
            TT::INT_TYPE => Self::Int,
            TT::FLOAT_TYPE => Self::Float,
            TT::STRING_TYPE => Self::String,
            _ => unreachable!(),
        }
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq)]
pub enum Expression {
    Number(
        Number,
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
    String(
        String,
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
    Name(Name),
    BinaryOperation(
        Operator,
        Box<(Expression, Expression)>,
        #[derivative(Debug = "ignore", PartialEq = "ignore")] Span,
    ),
}

impl Expression {
    pub(crate) fn binary(op: Operator, lhs: Expression, rhs: Expression) -> Self {
        let span = lhs.span().till(&rhs);
        Self::BinaryOperation(op, Box::new((lhs, rhs)), span)
    }
}

// Operand trees of long operator chains are deep; free them without recursion.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        if let Self::BinaryOperation(_, operands, _) = self {
            stack.push(std::mem::replace(operands.as_mut(), leaves()));
        }
        while let Some((mut lhs, mut rhs)) = stack.pop() {
            for child in [&mut lhs, &mut rhs] {
                if let Self::BinaryOperation(_, operands, _) = child {
                    stack.push(std::mem::replace(operands.as_mut(), leaves()));
                }
            }
        }
    }
}

fn leaves() -> (Expression, Expression) {
    (
        Expression::Number(Number::Int(0), Span::default()),
        Expression::Number(Number::Int(0), Span::default()),
    )
}

/// Numeric literal. The presence of a decimal point in the source decides
/// between the two variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl TryFrom<&Token> for Number {
    type Error = ParseError;

    fn try_from(value: &Token) -> Result<Self, Self::Error> {
        let invalid = || ParseError::InvalidNumber {
            lexeme: value.lexeme.clone(),
            span: value.span,
        };
        if value.lexeme.contains('.') {
            value.lexeme.parse().map(Self::Float).map_err(|_| invalid())
        } else {
            value.lexeme.parse().map(Self::Int).map_err(|_| invalid())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThanEqual,
    LessThan,
    GreaterThanEqual,
    GreaterThan,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThanEqual => "<=",
            Self::LessThan => "<",
            Self::GreaterThanEqual => ">=",
            Self::GreaterThan => ">",
        };
        write!(f, "{}", symbol)
    }
}

impl From<Token> for Operator {
    fn from(value: Token) -> Self {
        match value.typ {
            TT::PLUS => Self::Plus,
            TT::MINUS => Self::Minus,
            TT::STAR => Self::Times,
            TT::SLASH => Self::Divide,
            TT::PERCENT => Self::Modulo,
            TT::EQEQUAL => Self::Equal,
            TT::NOTEQUAL => Self::NotEqual,
            TT::LESSEQUAL => Self::LessThanEqual,
            TT::LESS => Self::LessThan,
            TT::GREATEREQUAL => Self::GreaterThanEqual,
            TT::GREATER => Self::GreaterThan,
            _ => unreachable!(),
        }
    }
}
