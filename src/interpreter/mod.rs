use std::io::Write;

use crate::parser::{Expression, Locatable, Statement};

mod environment;
mod error;
mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use value::{Value, ValueKind};

/// Walks statements against one global environment, writing printed
/// values to `output`.
pub struct Interpreter<W: Write> {
    environment: Environment,
    output: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(output: W) -> Self {
        Self {
            environment: Environment::new(),
            output,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs `program` top to bottom and stops at the first error. Lines
    /// printed before the error stay written.
    pub fn interpret(&mut self, program: &[Statement]) -> Result<(), RuntimeError> {
        let result = program.iter().try_for_each(|statement| self.execute(statement));
        let flushed = self.output.flush();
        result?;
        flushed?;
        Ok(())
    }

    fn execute(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        log::trace!("executing statement at {}", statement.span());
        match statement {
            Statement::Print(expr, _) => {
                let value = self.evaluate(expr)?;
                writeln!(self.output, "{}", value)?;
            }
            Statement::Declaration(typ, name, expr, span) => {
                let value = self.evaluate(expr)?.coerce(*typ, *span)?;
                self.environment.set(&name.name, value);
            }
            // No check against the type the name was declared with.
            Statement::Assignment(name, expr, _) => {
                let value = self.evaluate(expr)?;
                self.environment.set(&name.name, value);
            }
            Statement::If(condition, then, els, _) => {
                if self.evaluate(condition)?.truthy(condition.span())? {
                    self.execute(then)?;
                } else if let Some(els) = els {
                    self.execute(els)?;
                }
            }
            Statement::While(condition, body, _) => {
                while self.evaluate(condition)?.truthy(condition.span())? {
                    self.execute(body)?;
                }
            }
            Statement::Block(statements, _) => {
                for statement in statements {
                    self.execute(statement)?;
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, expression: &Expression) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Number(number, _) => Ok(Value::from(*number)),
            Expression::String(s, _) => Ok(Value::Str(s.clone())),
            Expression::Name(name) => self.environment.get(&name.name).cloned().ok_or_else(|| {
                RuntimeError::UndefinedVariable {
                    name: name.name.clone(),
                    span: name.span,
                }
            }),
            Expression::BinaryOperation(..) => {
                // `1 + 2 + 3` nests on the left; fold that spine in a loop.
                let mut pending = Vec::new();
                let mut leftmost = expression;
                while let Expression::BinaryOperation(op, operands, span) = leftmost {
                    pending.push((*op, &operands.1, *span));
                    leftmost = &operands.0;
                }
                let mut value = self.evaluate(leftmost)?;
                for (op, rhs, span) in pending.into_iter().rev() {
                    let rhs = self.evaluate(rhs)?;
                    value = Value::binary(op, value, rhs, span)?;
                }
                Ok(value)
            }
        }
    }
}
