use super::locations::{Location, Span};
use super::tokenizer::{Token, TokenType};

#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnterminatedString { start: Location },
    UnterminatedCharacter { span: Span },
    MalformedNumber { lexeme: String, span: Span },
    UnexpectedCharacter { chr: char, span: Span },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedString { start } => {
                write!(f, "Unterminated string literal starting at {}", start)
            }
            Self::UnterminatedCharacter { span } => {
                write!(f, "Unterminated character literal at {}", span)
            }
            Self::MalformedNumber { lexeme, span } => {
                write!(f, "Malformed number literal '{}' at {}", lexeme, span)
            }
            Self::UnexpectedCharacter { chr, span } => {
                write!(f, "Unexpected character {:?} at {}", chr, span)
            }
        }
    }
}

impl std::error::Error for LexError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedToken {
        lexeme: String,
        typ: TokenType,
        span: Span,
    },
    UnexpectedEnd,
    InvalidNumber {
        lexeme: String,
        span: Span,
    },
}

impl ParseError {
    pub(super) fn unexpected(token: &Token) -> Self {
        match token.typ {
            TokenType::ENDMARKER => Self::UnexpectedEnd,
            typ => Self::UnexpectedToken {
                lexeme: token.lexeme.clone(),
                typ,
                span: token.span,
            },
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { lexeme, typ, span } => {
                write!(f, "Unexpected token '{}' ({:?}) at {}", lexeme, typ, span)
            }
            Self::UnexpectedEnd => write!(f, "Unexpected end of input"),
            Self::InvalidNumber { lexeme, span } => {
                write!(f, "Number literal '{}' out of range at {}", lexeme, span)
            }
        }
    }
}

impl std::error::Error for ParseError {}
