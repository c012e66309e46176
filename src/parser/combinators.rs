use super::error::ParseError;
use super::tokenizer::{Token, TokenType};

/// Outcome of applying a parser.
///
/// `Err` is a soft failure: the alternative did not match and the caller may
/// try another one. It keeps the position the parser got stuck at. `Fatal` is
/// raised once a rule has committed (see [`cut`]) and aborts the whole parse.
#[derive(Debug)]
pub enum ParseResult<'a, Output> {
    Ok((Output, ParserInput<'a>)),
    Err(ParserInput<'a>),
    Fatal(ParseError),
}

#[derive(Debug, Clone, Copy)]
pub struct ParserInput<'a>(&'a [Token]);

impl<'a> ParserInput<'a> {
    pub fn new(input: &'a [Token]) -> Self {
        Self(input)
    }

    /// Whichever of the two positions lies further into the token stream.
    fn furthest(self, other: Self) -> Self {
        if other.0.len() < self.0.len() {
            other
        } else {
            self
        }
    }

    pub(super) fn unexpected(&self) -> ParseError {
        match self.0.first() {
            Some(token) => ParseError::unexpected(token),
            None => ParseError::UnexpectedEnd,
        }
    }
}

impl<'a, T> ParseResult<'a, T> {
    pub(super) fn or_else<O>(self, op: O) -> Self
    where
        O: FnOnce() -> Self,
    {
        match self {
            Self::Err(failed_at) => match op() {
                Self::Err(other) => Self::Err(failed_at.furthest(other)),
                result => result,
            },
            result => result,
        }
    }
    pub(super) fn map<U, F>(self, op: F) -> ParseResult<'a, U>
    where
        F: FnOnce((T, ParserInput<'a>)) -> (U, ParserInput<'a>),
    {
        match self {
            Self::Ok(inner) => ParseResult::Ok(op(inner)),
            Self::Err(failed_at) => ParseResult::Err(failed_at),
            Self::Fatal(e) => ParseResult::Fatal(e),
        }
    }
    pub(super) fn and_then<U, F>(self, op: F) -> ParseResult<'a, U>
    where
        F: FnOnce((T, ParserInput<'a>)) -> ParseResult<'a, U>,
    {
        match self {
            Self::Ok(inner) => op(inner),
            Self::Err(failed_at) => ParseResult::Err(failed_at),
            Self::Fatal(e) => ParseResult::Fatal(e),
        }
    }
    pub(super) fn into_result(self) -> Result<T, ParseError> {
        match self {
            Self::Ok((output, _)) => Ok(output),
            Self::Err(failed_at) => Err(failed_at.unexpected()),
            Self::Fatal(e) => Err(e),
        }
    }
}

pub(super) trait Parser<'a, Output> {
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output>;
    fn map<F, MappedOutput>(self, map_fn: F) -> BoxedParser<'a, MappedOutput>
    where
        Self: Sized + 'a,
        Output: 'a,
        MappedOutput: 'a,
        F: Fn(Output) -> MappedOutput + 'a,
    {
        BoxedParser::new(map(self, map_fn))
    }
    fn or(self, parser: impl Parser<'a, Output> + 'a) -> BoxedParser<'a, Output>
    where
        Self: Sized + 'a,
        Output: 'a,
    {
        let alternative = move |input| self.parse(input).or_else(|| parser.parse(input));
        BoxedParser::new(alternative)
    }
}

impl<'a, F, Output> Parser<'a, Output> for F
where
    F: Fn(ParserInput<'a>) -> ParseResult<'a, Output>,
{
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output> {
        self(input)
    }
}

pub(super) struct BoxedParser<'a, Output> {
    parser: Box<dyn Parser<'a, Output> + 'a>,
}

impl<'a, Output> BoxedParser<'a, Output> {
    fn new(parser: impl Parser<'a, Output> + 'a) -> Self {
        Self {
            parser: Box::new(parser),
        }
    }
}

impl<'a, Output> Parser<'a, Output> for BoxedParser<'a, Output> {
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output> {
        self.parser.parse(input)
    }
}

pub(super) fn pair<'a, R1, R2>(
    parser1: impl Parser<'a, R1>,
    parser2: impl Parser<'a, R2>,
) -> impl Parser<'a, (R1, R2)> {
    move |input| {
        parser1.parse(input).and_then(|(result1, next_input)| {
            parser2
                .parse(next_input)
                .map(|(result2, rest)| ((result1, result2), rest))
        })
    }
}

pub(super) fn map<'a, F, A, B>(
    parser: impl Parser<'a, A>,
    map_fn: F,
) -> impl Fn(ParserInput<'a>) -> ParseResult<'a, B>
where
    F: Fn(A) -> B,
{
    move |input| {
        parser
            .parse(input)
            .map(|(result, rest)| (map_fn(result), rest))
    }
}

pub(super) fn left<'a, A, B>(
    left_parser: impl Parser<'a, A>,
    right_parser: impl Parser<'a, B>,
) -> impl Parser<'a, A> {
    map(pair(left_parser, right_parser), |(left, _right)| left)
}

pub(super) fn right<'a, A, B>(
    left_parser: impl Parser<'a, A>,
    right_parser: impl Parser<'a, B>,
) -> impl Parser<'a, B> {
    map(pair(left_parser, right_parser), |(_left, right)| right)
}

pub(super) fn zero_or_more<'a, R>(parser: impl Parser<'a, R>) -> impl Parser<'a, Vec<R>> {
    move |input| {
        let mut result = Vec::new();
        let mut tmp_input = input;
        loop {
            match parser.parse(tmp_input) {
                ParseResult::Ok((next, rest)) => {
                    tmp_input = rest;
                    result.push(next);
                }
                ParseResult::Err(_) => return ParseResult::Ok((result, tmp_input)),
                ParseResult::Fatal(e) => return ParseResult::Fatal(e),
            }
        }
    }
}

pub(super) fn maybe<'a, R>(parser: impl Parser<'a, R>) -> impl Parser<'a, Option<R>> {
    move |input| match parser.parse(input) {
        ParseResult::Ok((value, rest)) => ParseResult::Ok((Some(value), rest)),
        ParseResult::Err(_) => ParseResult::Ok((None, input)),
        ParseResult::Fatal(e) => ParseResult::Fatal(e),
    }
}

/// Commits to the current alternative: a soft failure inside `parser`
/// becomes a fatal error reported at the token where it occurred.
pub(super) fn cut<'a, R>(parser: impl Parser<'a, R>) -> impl Parser<'a, R> {
    move |input| match parser.parse(input) {
        ParseResult::Err(failed_at) => ParseResult::Fatal(failed_at.unexpected()),
        result => result,
    }
}

/// `operand (operator operand)*`, folded to the left. An operator must be
/// followed by an operand.
pub(super) fn chain_left<'a, R, O, F>(
    operand: impl Parser<'a, R>,
    operator: impl Parser<'a, O>,
    combine: F,
) -> impl Parser<'a, R>
where
    F: Fn(O, R, R) -> R,
{
    move |input| {
        operand.parse(input).and_then(|(first, rest)| {
            let mut result = first;
            let mut tmp_input = rest;
            loop {
                match operator.parse(tmp_input) {
                    ParseResult::Ok((op, next_input)) => match operand.parse(next_input) {
                        ParseResult::Ok((rhs, rest)) => {
                            result = combine(op, result, rhs);
                            tmp_input = rest;
                        }
                        ParseResult::Err(failed_at) => {
                            return ParseResult::Fatal(failed_at.unexpected())
                        }
                        ParseResult::Fatal(e) => return ParseResult::Fatal(e),
                    },
                    ParseResult::Err(_) => return ParseResult::Ok((result, tmp_input)),
                    ParseResult::Fatal(e) => return ParseResult::Fatal(e),
                }
            }
        })
    }
}

pub(super) fn tok<'a>(expected_type: TokenType) -> impl Fn(ParserInput<'a>) -> ParseResult<'a, Token> {
    move |input| match input.0.first() {
        Some(token) if token.typ == expected_type => {
            ParseResult::Ok((token.clone(), ParserInput(&input.0[1..])))
        }
        _ => ParseResult::Err(input),
    }
}

pub(super) fn one_of<'a>(
    expected_types: &'static [TokenType],
) -> impl Fn(ParserInput<'a>) -> ParseResult<'a, Token> {
    move |input| match input.0.first() {
        Some(token) if expected_types.contains(&token.typ) => {
            ParseResult::Ok((token.clone(), ParserInput(&input.0[1..])))
        }
        _ => ParseResult::Err(input),
    }
}
