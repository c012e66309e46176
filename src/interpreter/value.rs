use super::error::RuntimeError;
use crate::parser::{DeclaredType, Number, Operator, Span};

/// A runtime value. Every expression evaluates to exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Str,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "string"),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(i) => Self::Integer(i),
            Number::Float(x) => Self::Float(x),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            Self::Str(_) => None,
        }
    }

    /// Nonzero numbers are true. Strings have no truth value.
    pub fn truthy(&self, span: Span) -> Result<bool, RuntimeError> {
        match self {
            Self::Integer(i) => Ok(*i != 0),
            Self::Float(x) => Ok(*x != 0.0),
            Self::Str(_) => Err(RuntimeError::ConditionType {
                found: self.kind(),
                span,
            }),
        }
    }

    /// Converts an initializer into the type named by its declaration.
    pub fn coerce(self, target: DeclaredType, span: Span) -> Result<Value, RuntimeError> {
        match (target, self) {
            (DeclaredType::Int, Self::Integer(i)) => Ok(Self::Integer(i)),
            // `as` truncates toward zero and saturates at the bounds.
            (DeclaredType::Int, Self::Float(x)) => Ok(Self::Integer(x as i64)),
            (DeclaredType::Float, Self::Integer(i)) => Ok(Self::Float(i as f64)),
            (DeclaredType::Float, Self::Float(x)) => Ok(Self::Float(x)),
            (DeclaredType::String, Self::Str(s)) => Ok(Self::Str(s)),
            (DeclaredType::Int, found @ Self::Str(_))
            | (DeclaredType::Float, found @ Self::Str(_))
            | (DeclaredType::String, found @ Self::Integer(_))
            | (DeclaredType::String, found @ Self::Float(_)) => Err(RuntimeError::DeclarationType {
                declared: target,
                found: found.kind(),
                span,
            }),
        }
    }

    /// Applies a binary operator. `+` concatenates two strings; every other
    /// combination is computed on the operands widened to `f64`.
    /// Comparisons yield the integers 1 and 0.
    pub fn binary(op: Operator, lhs: Value, rhs: Value, span: Span) -> Result<Value, RuntimeError> {
        if let (Operator::Plus, Self::Str(l), Self::Str(r)) = (op, &lhs, &rhs) {
            return Ok(Self::Str(format!("{}{}", l, r)));
        }
        let (Some(l), Some(r)) = (lhs.as_f64(), rhs.as_f64()) else {
            return Err(RuntimeError::OperandType {
                operator: op,
                left: lhs.kind(),
                right: rhs.kind(),
                span,
            });
        };
        let result = match op {
            Operator::Plus => Self::Float(l + r),
            Operator::Minus => Self::Float(l - r),
            Operator::Times => Self::Float(l * r),
            Operator::Divide => Self::Float(l / r),
            Operator::Modulo => Self::Float(l % r),
            Operator::Equal => Self::from_bool(l == r),
            Operator::NotEqual => Self::from_bool(l != r),
            Operator::LessThan => Self::from_bool(l < r),
            Operator::LessThanEqual => Self::from_bool(l <= r),
            Operator::GreaterThan => Self::from_bool(l > r),
            Operator::GreaterThanEqual => Self::from_bool(l >= r),
        };
        Ok(result)
    }

    fn from_bool(b: bool) -> Self {
        Self::Integer(i64::from(b))
    }
}
