use super::value::ValueKind;
use crate::parser::{DeclaredType, Operator, Span};

#[derive(Debug)]
pub enum RuntimeError {
    UndefinedVariable {
        name: String,
        span: Span,
    },
    /// An operator was applied to operands it does not accept.
    OperandType {
        operator: Operator,
        left: ValueKind,
        right: ValueKind,
        span: Span,
    },
    /// A declaration's initializer cannot be coerced into the declared type.
    DeclarationType {
        declared: DeclaredType,
        found: ValueKind,
        span: Span,
    },
    ConditionType {
        found: ValueKind,
        span: Span,
    },
    Output(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, span } => {
                write!(f, "Undefined variable: {} at {}", name, span)
            }
            Self::OperandType {
                operator,
                left,
                right,
                span,
            } => write!(
                f,
                "Type mismatch: cannot apply '{}' to {} and {} at {}",
                operator, left, right, span
            ),
            Self::DeclarationType {
                declared,
                found,
                span,
            } => write!(
                f,
                "Type mismatch assigning {} to {} variable at {}",
                found, declared, span
            ),
            Self::ConditionType { found, span } => {
                write!(f, "Condition must be numeric, found {} at {}", found, span)
            }
            Self::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}
