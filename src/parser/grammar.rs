// # ========================= START OF THE GRAMMAR =========================
//
// # General grammatical elements and rules:
// #
// # * Strings with single quotes (') denote keywords and punctuation
// # * Upper case names (NAME, NUMBER, STRING) denote tokens
// # * `~` commits to the current alternative: a failure after it is reported
// #   at the offending token instead of backtracking.
// # * Binary operators are left associative; precedence grows downwards.

use super::ast::*;
use super::combinators::*;
use super::error::ParseError;
use super::tokenizer::{Token, TokenType as TT};

pub fn parse(input: &[Token]) -> Result<Vec<Statement>, ParseError> {
    let statements = program.parse(ParserInput::new(input)).into_result()?;
    log::debug!("parsed {} top-level statements", statements.len());
    Ok(statements)
}

// # STARTING RULES
// # ==============

// program: statement* ENDMARKER
fn program(input: ParserInput) -> ParseResult<Vec<Statement>> {
    left(zero_or_more(statement), cut(tok(TT::ENDMARKER))).parse(input)
}

// # STATEMENTS
// # ==========

// statement:
//     | declaration
//     | assignment
//     | print_stmt
//     | if_stmt
//     | while_stmt
//     | block
fn statement(input: ParserInput) -> ParseResult<Statement> {
    declaration
        .or(assignment)
        .or(print_stmt)
        .or(if_stmt)
        .or(while_stmt)
        .or(block)
        .parse(input)
}

// declaration: ('int' | 'float' | 'string') ~ NAME '=' expression ';'
fn declaration(input: ParserInput) -> ParseResult<Statement> {
    pair(
        one_of(&[TT::INT_TYPE, TT::FLOAT_TYPE, TT::STRING_TYPE]),
        cut(pair(
            left(name, tok(TT::EQUAL)),
            pair(expression, tok(TT::SEMI)),
        )),
    )
    .map(|(typ, (name, (value, semi)))| {
        let span = typ.span.till(&semi);
        Statement::Declaration(DeclaredType::from(typ), name, value, span)
    })
    .parse(input)
}

// assignment: NAME '=' ~ expression ';'
fn assignment(input: ParserInput) -> ParseResult<Statement> {
    pair(
        left(name, tok(TT::EQUAL)),
        cut(pair(expression, tok(TT::SEMI))),
    )
    .map(|(name, (value, semi))| {
        let span = name.span.till(&semi);
        Statement::Assignment(name, value, span)
    })
    .parse(input)
}

// print_stmt: 'smile' ~ '(' expression ')' ';'
fn print_stmt(input: ParserInput) -> ParseResult<Statement> {
    pair(
        tok(TT::PRINT),
        cut(pair(parenthesized, tok(TT::SEMI))),
    )
    .map(|(keyword, (expr, semi))| Statement::Print(expr, keyword.span.till(&semi)))
    .parse(input)
}

// if_stmt: 'ana' ~ '(' expression ')' statement ['elsa' ~ statement]
fn if_stmt(input: ParserInput) -> ParseResult<Statement> {
    pair(
        tok(TT::IF),
        cut(pair(
            pair(parenthesized, statement),
            maybe(right(tok(TT::ELSE), cut(statement))),
        )),
    )
    .map(|(keyword, ((condition, then), els))| {
        let span = match &els {
            Some(els) => keyword.span.till(els),
            None => keyword.span.till(&then),
        };
        Statement::If(condition, Box::new(then), els.map(Box::new), span)
    })
    .parse(input)
}

// while_stmt: 'while' ~ '(' expression ')' statement
fn while_stmt(input: ParserInput) -> ParseResult<Statement> {
    pair(tok(TT::WHILE), cut(pair(parenthesized, statement)))
        .map(|(keyword, (condition, body))| {
            let span = keyword.span.till(&body);
            Statement::While(condition, Box::new(body), span)
        })
        .parse(input)
}

// block: '{' ~ statement* '}'
fn block(input: ParserInput) -> ParseResult<Statement> {
    pair(
        tok(TT::LBRACE),
        cut(pair(zero_or_more(statement), tok(TT::RBRACE))),
    )
    .map(|(open, (statements, close))| Statement::Block(statements, open.span.till(&close)))
    .parse(input)
}

// # EXPRESSIONS
// # ===========

// expression: equality
fn expression(input: ParserInput) -> ParseResult<Expression> {
    equality(input)
}

// equality: comparison (('==' | '!=') comparison)*
fn equality(input: ParserInput) -> ParseResult<Expression> {
    chain_left(
        comparison,
        one_of(&[TT::EQEQUAL, TT::NOTEQUAL]).map(Operator::from),
        Expression::binary,
    )
    .parse(input)
}

// comparison: sum (('<' | '<=' | '>' | '>=') sum)*
fn comparison(input: ParserInput) -> ParseResult<Expression> {
    chain_left(
        sum,
        one_of(&[TT::LESS, TT::LESSEQUAL, TT::GREATER, TT::GREATEREQUAL]).map(Operator::from),
        Expression::binary,
    )
    .parse(input)
}

// sum: term (('+' | '-') term)*
fn sum(input: ParserInput) -> ParseResult<Expression> {
    chain_left(
        term,
        one_of(&[TT::PLUS, TT::MINUS]).map(Operator::from),
        Expression::binary,
    )
    .parse(input)
}

// term: factor (('*' | '/' | '%') factor)*
fn term(input: ParserInput) -> ParseResult<Expression> {
    chain_left(
        factor,
        one_of(&[TT::STAR, TT::SLASH, TT::PERCENT]).map(Operator::from),
        Expression::binary,
    )
    .parse(input)
}

// factor:
//     | NUMBER
//     | STRING
//     | NAME
//     | '(' ~ expression ')'
fn factor(input: ParserInput) -> ParseResult<Expression> {
    number
        .or(string)
        .or(name.map(Expression::Name))
        .or(parenthesized)
        .parse(input)
}

fn number(input: ParserInput) -> ParseResult<Expression> {
    tok(TT::NUMBER)
        .parse(input)
        .and_then(|(token, rest)| match Number::try_from(&token) {
            Ok(number) => ParseResult::Ok((Expression::Number(number, token.span), rest)),
            Err(e) => ParseResult::Fatal(e),
        })
}

fn string(input: ParserInput) -> ParseResult<Expression> {
    tok(TT::STRING)
        .map(|token| Expression::String(token.lexeme, token.span))
        .parse(input)
}

fn name(input: ParserInput) -> ParseResult<Name> {
    tok(TT::NAME).map(Name::from).parse(input)
}

fn parenthesized(input: ParserInput) -> ParseResult<Expression> {
    right(tok(TT::LPAR), cut(left(expression, tok(TT::RPAR)))).parse(input)
}
