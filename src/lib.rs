//! Tokenizer, parser and tree-walking evaluator for HappyScript, a small
//! imperative scripting language with `int`, `float` and `string` variables,
//! `smile` (print), `ana`/`elsa` (if/else), `while` loops and blocks.

mod parser;
pub use parser::tokenizer::{ParserState, Token, TokenType, Tokenizer};
pub use parser::{
    parse, tokenize_string, DeclaredType, Expression, LexError, Locatable, Location, Name,
    Number, Operator, ParseError, Span, Statement,
};

mod interpreter;
pub use interpreter::{Environment, Interpreter, RuntimeError, Value, ValueKind};

pub mod config;

mod error;
pub use error::Error;

/// Tokenizes, parses and executes `source`, writing printed lines to
/// `output`.
pub fn run<W: std::io::Write>(source: &str, output: W) -> Result<(), Error> {
    let mut interpreter = Interpreter::new(output);
    run_with(&mut interpreter, source, false)
}

/// Runs `source` against an existing interpreter, so variables defined by
/// earlier programs remain visible.
pub fn run_with<W: std::io::Write>(
    interpreter: &mut Interpreter<W>,
    source: &str,
    strict: bool,
) -> Result<(), Error> {
    let tokens = tokenize_string(source, strict)?;
    let program = parse(&tokens)?;
    log::debug!("program: {:#?}", program);
    interpreter.interpret(&program)?;
    Ok(())
}
