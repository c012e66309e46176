use super::error::LexError;
use super::locations::{Location, Span};
use const_format::concatcp;
use derivative::Derivative;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq)]
pub struct Token {
    pub typ: TokenType,
    pub lexeme: String,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    pub span: Span,
}

impl Token {
    #[cfg(test)]
    pub(crate) fn new(typ: TokenType, lexeme: &str) -> Self {
        Self {
            typ,
            lexeme: lexeme.to_string(),
            span: Span::default(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme)
    }
}

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenType {
    ENDMARKER,
    NAME,
    NUMBER,
    STRING,
    PRINT,
    IF,
    ELSE,
    WHILE,
    INT_TYPE,
    FLOAT_TYPE,
    STRING_TYPE,
    LPAR,
    RPAR,
    LBRACE,
    RBRACE,
    SEMI,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    LESS,
    GREATER,
    EQUAL,
    EQEQUAL,
    NOTEQUAL,
    LESSEQUAL,
    GREATEREQUAL,
}

const EQEQUAL: (&str, TokenType) = ("==", TokenType::EQEQUAL);
const NOTEQUAL: (&str, TokenType) = ("!=", TokenType::NOTEQUAL);
const LESSEQUAL: (&str, TokenType) = ("<=", TokenType::LESSEQUAL);
const GREATEREQUAL: (&str, TokenType) = (">=", TokenType::GREATEREQUAL);
const LPAR: (&str, TokenType) = ("(", TokenType::LPAR);
const RPAR: (&str, TokenType) = (")", TokenType::RPAR);
const LBRACE: (&str, TokenType) = ("{", TokenType::LBRACE);
const RBRACE: (&str, TokenType) = ("}", TokenType::RBRACE);
const SEMI: (&str, TokenType) = (";", TokenType::SEMI);
const PLUS: (&str, TokenType) = ("+", TokenType::PLUS);
const MINUS: (&str, TokenType) = ("-", TokenType::MINUS);
const STAR: (&str, TokenType) = ("*", TokenType::STAR);
const SLASH: (&str, TokenType) = ("/", TokenType::SLASH);
const PERCENT: (&str, TokenType) = ("%", TokenType::PERCENT);
const LESS: (&str, TokenType) = ("<", TokenType::LESS);
const GREATER: (&str, TokenType) = (">", TokenType::GREATER);
const EQUAL: (&str, TokenType) = ("=", TokenType::EQUAL);

// Two-character operators come first so matching is greedy.
const SIMPLE_TOKENS: [(&str, TokenType); 17] = [
    EQEQUAL,
    NOTEQUAL,
    LESSEQUAL,
    GREATEREQUAL,
    LPAR,
    RPAR,
    LBRACE,
    RBRACE,
    SEMI,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    LESS,
    GREATER,
    EQUAL,
];

const KEYWORDS: [(&str, TokenType); 7] = [
    ("smile", TokenType::PRINT),
    ("ana", TokenType::IF),
    ("elsa", TokenType::ELSE),
    ("while", TokenType::WHILE),
    ("int", TokenType::INT_TYPE),
    ("float", TokenType::FLOAT_TYPE),
    ("string", TokenType::STRING_TYPE),
];

const S_WHITESPACE: &str = r"^\s+";
const S_NAME: &str = r"^[A-Za-z][A-Za-z0-9]*";
const S_DIGITS: &str = r"[0-9]+";
const S_INTNUMBER: &str = S_DIGITS;
const S_FLOATNUMBER: &str = concatcp!(S_DIGITS, r"\.[0-9]*");
const S_WHOLE_INTNUMBER: &str = concatcp!("^", S_INTNUMBER, "$");
const S_WHOLE_FLOATNUMBER: &str = concatcp!("^", S_FLOATNUMBER, "$");
const S_NUMBER: &str = r"^[0-9][0-9.]*";
const S_STRING: &str = r#"^"([^"]*)""#;
const S_CHARACTER: &str = r"^'(\\.|[^\\])'";

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHITESPACE).expect("Error compiling regex."));
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(S_NAME).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));
static INTNUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHOLE_INTNUMBER).expect("Error compiling regex."));
static FLOATNUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHOLE_FLOATNUMBER).expect("Error compiling regex."));
static STRING: Lazy<Regex> = Lazy::new(|| Regex::new(S_STRING).expect("Error compiling regex."));
static CHARACTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_CHARACTER).expect("Error compiling regex."));

/// Converts source text into tokens, one line at a time.
///
/// String literals and bracket nesting may continue over several lines, so
/// the tokenizer keeps that state between lines. Call [`Tokenizer::finalize`]
/// once the input is exhausted to obtain the token stream.
pub struct Tokenizer {
    tokens: Vec<Token>,
    lineno: usize,
    line_end: usize,
    paren_lvl: isize,
    string_start: Option<Location>,
    current_string: String,
    strict: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            tokens: vec![],
            lineno: 0,
            line_end: 1,
            paren_lvl: 0,
            string_start: None,
            current_string: String::new(),
            strict: false,
        }
    }

    /// Reject unrecognized characters instead of skipping them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn tokenize(&mut self, input: impl Iterator<Item = String>) -> ParserState {
        for line in input {
            self.lineno += 1;
            if let Err(e) = self.tokenize_line(line.as_str()) {
                return ParserState::Error(e);
            }
        }
        if self.is_pending() {
            return ParserState::ContinuationNeeded;
        }
        ParserState::Ok
    }

    /// Whether a string literal or bracket is still open.
    pub fn is_pending(&self) -> bool {
        self.string_start.is_some() || self.paren_lvl > 0
    }

    pub fn finalize(mut self) -> Result<Vec<Token>, LexError> {
        if let Some(start) = self.string_start {
            return Err(LexError::UnterminatedString { start });
        }
        let line = self.lineno.max(1);
        self.tokens.push(Token {
            typ: TokenType::ENDMARKER,
            lexeme: "".to_string(),
            span: Span::new(line, self.line_end, line, self.line_end),
        });
        Ok(self.tokens)
    }

    fn tokenize_line(&mut self, line: &str) -> Result<(), LexError> {
        let mut start = 0;
        self.line_end = line.len() + 1;

        if let Some(string_start) = self.string_start {
            match line.find('"') {
                Some(end) => {
                    self.current_string.push_str(&line[..end]);
                    let lexeme = std::mem::take(&mut self.current_string);
                    let span = Span::between(
                        string_start,
                        Location {
                            line: self.lineno,
                            column: end + 2,
                        },
                    );
                    self.push(TokenType::STRING, lexeme, span);
                    self.string_start = None;
                    start = end + 1;
                }
                None => {
                    self.current_string.push_str(line);
                    self.current_string.push('\n');
                    return Ok(());
                }
            }
        }

        while start < line.len() {
            let rest = &line[start..];

            if let Some(m) = WHITESPACE.find(rest) {
                start += m.end();
                continue;
            }

            if let Some(m) = NUMBER.find(rest) {
                let lexeme = m.as_str();
                let span = self.span(start, start + m.end());
                if !INTNUMBER.is_match(lexeme) && !FLOATNUMBER.is_match(lexeme) {
                    return Err(LexError::MalformedNumber {
                        lexeme: lexeme.to_string(),
                        span,
                    });
                }
                self.push(TokenType::NUMBER, lexeme.to_string(), span);
                start += m.end();
                continue;
            }

            if let Some(m) = NAME.find(rest) {
                let lexeme = m.as_str();
                let typ = KEYWORDS
                    .iter()
                    .find(|(keyword, _)| *keyword == lexeme)
                    .map_or(TokenType::NAME, |(_, typ)| *typ);
                self.push(typ, lexeme.to_string(), self.span(start, start + m.end()));
                start += m.end();
                continue;
            }

            if rest.starts_with('"') {
                match STRING.captures(rest) {
                    Some(caps) => {
                        let end = start + caps[0].len();
                        self.push(TokenType::STRING, caps[1].to_string(), self.span(start, end));
                        start = end;
                    }
                    None => {
                        // The literal continues on the next line.
                        self.string_start = Some(Location {
                            line: self.lineno,
                            column: start + 1,
                        });
                        self.current_string = rest[1..].to_string();
                        self.current_string.push('\n');
                        return Ok(());
                    }
                }
                continue;
            }

            if rest.starts_with('\'') {
                let Some(caps) = CHARACTER.captures(rest) else {
                    return Err(LexError::UnterminatedCharacter {
                        span: self.span(start, line.len()),
                    });
                };
                let end = start + caps[0].len();
                let lexeme = unescape(&caps[1]).to_string();
                self.push(TokenType::STRING, lexeme, self.span(start, end));
                start = end;
                continue;
            }

            if let Some((lexeme, tok_type)) = SIMPLE_TOKENS
                .iter()
                .find(|(lexeme, _)| rest.starts_with(lexeme))
            {
                let end = start + lexeme.len();
                self.push(*tok_type, lexeme.to_string(), self.span(start, end));
                match tok_type {
                    TokenType::LPAR | TokenType::LBRACE => self.paren_lvl += 1,
                    TokenType::RPAR | TokenType::RBRACE => self.paren_lvl -= 1,
                    _ => {}
                }
                start = end;
                continue;
            }

            let chr = rest.chars().next().unwrap_or_default();
            let span = self.span(start, start + chr.len_utf8());
            if chr == '!' {
                log::debug!("dropping lone '!' at {}", span);
            } else if self.strict {
                return Err(LexError::UnexpectedCharacter { chr, span });
            } else {
                log::warn!("skipping unrecognized character {:?} at {}", chr, span);
            }
            start += chr.len_utf8();
        }
        Ok(())
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.lineno, start + 1, self.lineno, end + 1)
    }

    fn push(&mut self, typ: TokenType, lexeme: String, span: Span) {
        let token = Token { typ, lexeme, span };
        log::trace!("{}", token);
        self.tokens.push(token);
    }
}

fn unescape(literal: &str) -> char {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some('\\'), Some('n')) => '\n',
        (Some('\\'), Some('t')) => '\t',
        (Some('\\'), Some('r')) => '\r',
        (Some('\\'), Some('0')) => '\0',
        (Some('\\'), Some(escaped)) => escaped,
        (Some(chr), _) => chr,
        (None, _) => '\0',
    }
}

pub fn tokenize_string(input: &str, strict: bool) -> Result<Vec<Token>, LexError> {
    let mut tokenizer = Tokenizer::new().strict(strict);
    // Only '\n' ends a line; a '\r' before it stays part of a string literal.
    if let ParserState::Error(e) = tokenizer.tokenize(input.split('\n').map(str::to_string)) {
        return Err(e);
    }
    let tokens = tokenizer.finalize()?;
    log::debug!("{} tokens", tokens.len());
    Ok(tokens)
}

pub enum ParserState {
    Ok,
    ContinuationNeeded,
    Error(LexError),
}
