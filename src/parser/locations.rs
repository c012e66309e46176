use super::ast::*;
use super::tokenizer::Token;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

pub trait Locatable {
    fn span(&self) -> Span;
}

/// Region of the source text a token or syntax node was built from.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub(crate) fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start: Location {
                line: start_line,
                column: start_col,
            },
            end: Location {
                line: end_line,
                column: end_col,
            },
        }
    }

    pub(crate) fn between(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    pub fn till<R: Locatable>(&self, other: &R) -> Self {
        Self {
            start: self.start,
            end: other.span().end,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)
    }
}

impl Locatable for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl Locatable for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl<R> Locatable for Box<R>
where
    R: Locatable,
{
    fn span(&self) -> Span {
        (**self).span()
    }
}

impl Locatable for Name {
    fn span(&self) -> Span {
        self.span
    }
}

impl Locatable for Statement {
    fn span(&self) -> Span {
        match self {
            Self::Print(_, s) => *s,
            Self::Declaration(_, _, _, s) => *s,
            Self::Assignment(_, _, s) => *s,
            Self::If(_, _, _, s) => *s,
            Self::While(_, _, s) => *s,
            Self::Block(_, s) => *s,
        }
    }
}

impl Locatable for Expression {
    fn span(&self) -> Span {
        match self {
            Self::Number(_, s) => *s,
            Self::String(_, s) => *s,
            Self::Name(name) => name.span(),
            Self::BinaryOperation(_, _, s) => *s,
        }
    }
}
