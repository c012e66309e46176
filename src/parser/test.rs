use super::error::{LexError, ParseError};
use super::tokenizer::{tokenize_string, ParserState, Token, Tokenizer, TokenType as TT};
use super::{parse, DeclaredType, Expression, Locatable, Location, Name, Number, Statement};

fn parse_string(input: &str) -> Result<Vec<Statement>, String> {
    let tokens = tokenize_string(input, false).map_err(|e| e.to_string())?;
    parse(&tokens).map_err(|e| e.to_string())
}

fn parse_tree_matches(input: &str, tree_repr: &str) {
    let result = parse_string(input);
    assert!(result.is_ok(), "\nFailed to parse \"{}\": {:?}\n", input, result);
    if let Ok(ref tree) = result {
        let result_repr = format!("{tree:?}");
        assert!(
            result_repr.contains(tree_repr),
            "\nFailed to parse \"{}\":\nexpected \"{}\" somewhere in \"{}\"\n",
            input,
            tree_repr,
            result_repr
        )
    }
}

fn parse_error(input: &str) -> ParseError {
    let tokens = tokenize_string(input, false).expect("tokenizer failed");
    match parse(&tokens) {
        Err(e) => e,
        Ok(tree) => panic!("\n\"{}\" parsed unexpectedly: {:?}\n", input, tree),
    }
}

fn assert_unexpected(input: &str, lexeme: &str, typ: TT) {
    match parse_error(input) {
        ParseError::UnexpectedToken {
            lexeme: ref found,
            typ: found_typ,
            ..
        } => {
            assert_eq!((found.as_str(), found_typ), (lexeme, typ), "while parsing \"{}\"", input)
        }
        e => panic!("\nexpected unexpected token '{}' in \"{}\", got {:?}\n", lexeme, input, e),
    }
}

fn token_types(input: &str) -> Vec<TT> {
    tokenize_string(input, false)
        .expect("tokenizer failed")
        .iter()
        .map(|t| t.typ)
        .collect()
}

#[test]
fn test_tokenize_declaration() {
    assert_eq!(
        token_types("int x = 7;"),
        vec![TT::INT_TYPE, TT::NAME, TT::EQUAL, TT::NUMBER, TT::SEMI, TT::ENDMARKER]
    );
    let tokens = tokenize_string("float ratio = 2.5;", false).unwrap();
    assert_eq!(tokens[0], Token::new(TT::FLOAT_TYPE, "float"));
    assert_eq!(tokens[1], Token::new(TT::NAME, "ratio"));
    assert_eq!(tokens[3], Token::new(TT::NUMBER, "2.5"));
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        token_types("smile ana elsa while int float string smiles"),
        vec![
            TT::PRINT,
            TT::IF,
            TT::ELSE,
            TT::WHILE,
            TT::INT_TYPE,
            TT::FLOAT_TYPE,
            TT::STRING_TYPE,
            TT::NAME,
            TT::ENDMARKER
        ]
    );
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        token_types("== != <= >= < > = + - * / % ( ) { } ;"),
        vec![
            TT::EQEQUAL,
            TT::NOTEQUAL,
            TT::LESSEQUAL,
            TT::GREATEREQUAL,
            TT::LESS,
            TT::GREATER,
            TT::EQUAL,
            TT::PLUS,
            TT::MINUS,
            TT::STAR,
            TT::SLASH,
            TT::PERCENT,
            TT::LPAR,
            TT::RPAR,
            TT::LBRACE,
            TT::RBRACE,
            TT::SEMI,
            TT::ENDMARKER
        ]
    );
    assert_eq!(token_types("a<=b"), vec![TT::NAME, TT::LESSEQUAL, TT::NAME, TT::ENDMARKER]);
    assert_eq!(token_types("x===y"), vec![TT::NAME, TT::EQEQUAL, TT::EQUAL, TT::NAME, TT::ENDMARKER]);
}

#[test]
fn test_lone_bang_is_dropped() {
    assert_eq!(token_types("!x"), vec![TT::NAME, TT::ENDMARKER]);
    assert_eq!(token_types("! ="), vec![TT::EQUAL, TT::ENDMARKER]);
    assert!(tokenize_string("!x", true).is_ok());
}

#[test]
fn test_unknown_characters() {
    assert_eq!(token_types("x @ y # $"), vec![TT::NAME, TT::NAME, TT::ENDMARKER]);
    assert_eq!(token_types("my_var"), vec![TT::NAME, TT::NAME, TT::ENDMARKER]);
    assert!(matches!(
        tokenize_string("x @ y", true),
        Err(LexError::UnexpectedCharacter { chr: '@', span }) if span.start == Location { line: 1, column: 3 }
    ));
}

#[test]
fn test_string_literals() {
    let tokens = tokenize_string(r#"smile("a\nb c");"#, false).unwrap();
    assert_eq!(tokens[2], Token::new(TT::STRING, r"a\nb c"));
    let tokens = tokenize_string("\"first\nsecond\" x", false).unwrap();
    assert_eq!(tokens[0], Token::new(TT::STRING, "first\nsecond"));
    assert_eq!(tokens[0].span.start, Location { line: 1, column: 1 });
    assert_eq!(tokens[0].span.end, Location { line: 2, column: 8 });
    assert_eq!(tokens[1], Token::new(TT::NAME, "x"));
    assert_eq!(tokenize_string(r#""""#, false).unwrap()[0], Token::new(TT::STRING, ""));
}

#[test]
fn test_carriage_returns() {
    let tokens = tokenize_string("x = \"a\r\nb\";\r\nsmile(x);\r\n", false).unwrap();
    assert_eq!(tokens[2], Token::new(TT::STRING, "a\r\nb"));
    assert_eq!(tokens[4], Token::new(TT::PRINT, "smile"));
    assert_eq!(tokens[4].span.start, Location { line: 3, column: 1 });
    assert_eq!(tokens.len(), 10);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        tokenize_string("smile(\"oops);\nsmile(1);", false),
        Err(LexError::UnterminatedString {
            start: Location { line: 1, column: 7 }
        })
    );
}

#[test]
fn test_character_literals() {
    let tokens = tokenize_string(r"'a' '\n' '\'' '\q' ''' ' '", false).unwrap();
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["a", "\n", "'", "q", "'", " ", ""]);
    assert!(tokens[..6].iter().all(|t| t.typ == TT::STRING));
    assert!(matches!(
        tokenize_string("'ab'", false),
        Err(LexError::UnterminatedCharacter { .. })
    ));
    assert!(matches!(
        tokenize_string("'a", false),
        Err(LexError::UnterminatedCharacter { .. })
    ));
}

#[test]
fn test_number_literals() {
    assert_eq!(token_types("12 3.25 5."), vec![TT::NUMBER, TT::NUMBER, TT::NUMBER, TT::ENDMARKER]);
    assert!(matches!(
        tokenize_string("x = 1.2.3;", false),
        Err(LexError::MalformedNumber { ref lexeme, .. }) if lexeme == "1.2.3"
    ));
}

#[test]
fn test_token_spans() {
    let tokens = tokenize_string("int x = 1;\n  smile(x);", false).unwrap();
    assert_eq!(tokens[1].span.start, Location { line: 1, column: 5 });
    assert_eq!(tokens[5].span.start, Location { line: 2, column: 3 });
    assert_eq!(tokens[5].span.end, Location { line: 2, column: 8 });
    assert_eq!(tokens.last().unwrap().typ, TT::ENDMARKER);
}

#[test]
fn test_continuation() {
    let mut tokenizer = Tokenizer::new();
    assert!(matches!(
        tokenizer.tokenize(std::iter::once("while (x != 3) {".to_string())),
        ParserState::ContinuationNeeded
    ));
    assert!(matches!(
        tokenizer.tokenize(std::iter::once("smile(\"multi".to_string())),
        ParserState::ContinuationNeeded
    ));
    assert!(matches!(
        tokenizer.tokenize(std::iter::once("line\"); }".to_string())),
        ParserState::Ok
    ));
    let tokens = tokenizer.finalize().unwrap();
    assert_eq!(tokens[9], Token::new(TT::STRING, "multi\nline"));
}

#[test]
fn test_empty_program() {
    assert!(parse_string("").unwrap().is_empty());
    assert!(parse_string("  \n\t ").unwrap().is_empty());
}

#[test]
fn test_declarations() {
    parse_tree_matches("int x = 7;", "Declaration(Int, Name(\"x\"), Number(Int(7)))");
    parse_tree_matches("float y = 2.5;", "Declaration(Float, Name(\"y\"), Number(Float(2.5)))");
    parse_tree_matches("float y = 5.;", "Number(Float(5.0))");
    parse_tree_matches(
        "string s = \"hi\";",
        "Declaration(String, Name(\"s\"), String(\"hi\"))",
    );
}

#[test]
fn test_assignment_tree() {
    assert_eq!(
        parse_string("x = \"hi\";").unwrap(),
        vec![Statement::Assignment(
            Name::new("x"),
            Expression::String("hi".to_string(), Default::default()),
            Default::default()
        )]
    );
    assert_eq!(
        parse_string("int x = y;").unwrap(),
        vec![Statement::Declaration(
            DeclaredType::Int,
            Name::new("x"),
            Expression::Name(Name::new("y")),
            Default::default()
        )]
    );
}

#[test]
fn test_print() {
    parse_tree_matches("smile(x);", "Print(Name(Name(\"x\")))");
    parse_tree_matches("smile('c');", "Print(String(\"c\"))");
}

#[test]
fn test_precedence() {
    parse_tree_matches(
        "smile(1 + 2 * 3);",
        "BinaryOperation(Plus, (Number(Int(1)), BinaryOperation(Times, (Number(Int(2)), Number(Int(3))))))",
    );
    parse_tree_matches(
        "smile((1 + 2) * 3);",
        "BinaryOperation(Times, (BinaryOperation(Plus, (Number(Int(1)), Number(Int(2)))), Number(Int(3))))",
    );
    parse_tree_matches(
        "smile(1 < 2 == 3 >= 4);",
        "BinaryOperation(Equal, (BinaryOperation(LessThan, (Number(Int(1)), Number(Int(2)))), BinaryOperation(GreaterThanEqual, (Number(Int(3)), Number(Int(4))))))",
    );
    parse_tree_matches(
        "smile(a - b % c);",
        "BinaryOperation(Minus, (Name(Name(\"a\")), BinaryOperation(Modulo, (Name(Name(\"b\")), Name(Name(\"c\"))))))",
    );
}

#[test]
fn test_left_associativity() {
    parse_tree_matches(
        "smile(1 - 2 - 3);",
        "BinaryOperation(Minus, (BinaryOperation(Minus, (Number(Int(1)), Number(Int(2)))), Number(Int(3))))",
    );
    parse_tree_matches(
        "smile(\"a\" + \"b\" + \"c\");",
        "BinaryOperation(Plus, (BinaryOperation(Plus, (String(\"a\"), String(\"b\"))), String(\"c\")))",
    );
    parse_tree_matches(
        "smile(8 / 4 / 2);",
        "BinaryOperation(Divide, (BinaryOperation(Divide, (Number(Int(8)), Number(Int(4)))), Number(Int(2))))",
    );
}

#[test]
fn test_if_stmt() {
    parse_tree_matches(
        "ana (x) smile(1);",
        "If(Name(Name(\"x\")), Print(Number(Int(1))), None)",
    );
    parse_tree_matches(
        "ana (0) smile(\"no\"); elsa smile(\"yes\");",
        "If(Number(Int(0)), Print(String(\"no\")), Some(Print(String(\"yes\"))))",
    );
    // `elsa` belongs to the nearest `ana`
    parse_tree_matches(
        "ana (a) ana (b) smile(1); elsa smile(2);",
        "If(Name(Name(\"a\")), If(Name(Name(\"b\")), Print(Number(Int(1))), Some(Print(Number(Int(2))))), None)",
    );
}

#[test]
fn test_while_and_blocks() {
    parse_tree_matches(
        "while (x != 3) { smile(x); x = x + 1; }",
        "While(BinaryOperation(NotEqual, (Name(Name(\"x\")), Number(Int(3)))), Block([Print(Name(Name(\"x\"))), Assignment(Name(\"x\"), BinaryOperation(Plus, (Name(Name(\"x\")), Number(Int(1)))))]))",
    );
    parse_tree_matches("{ }", "Block([])");
    parse_tree_matches("{ { int a = 1; } }", "Block([Block([Declaration(Int");
}

#[test]
fn test_statement_spans() {
    let program = parse_string("int x = 1;\nsmile(x);").unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program[1].span().start, Location { line: 2, column: 1 });
    assert_eq!(program[1].span().end, Location { line: 2, column: 10 });
    match &program[0] {
        Statement::Declaration(_, _, Expression::Number(Number::Int(1), span), _) => {
            assert_eq!(span.start, Location { line: 1, column: 9 })
        }
        s => panic!("unexpected statement {:?}", s),
    }
}

#[test]
fn test_syntax_errors() {
    assert_unexpected("x;", "x", TT::NAME);
    assert_unexpected("5;", "5", TT::NUMBER);
    assert_unexpected("int x 5;", "5", TT::NUMBER);
    assert_unexpected("int = 5;", "=", TT::EQUAL);
    assert_unexpected("x = ;", ";", TT::SEMI);
    assert_unexpected("smile(1 +);", ")", TT::RPAR);
    assert_unexpected("smile(1 2);", "2", TT::NUMBER);
    assert_unexpected("smile 1;", "1", TT::NUMBER);
    assert_unexpected("elsa smile(1);", "elsa", TT::ELSE);
    assert_unexpected("ana (1) }", "}", TT::RBRACE);
    assert_unexpected("smile(1) x = 2;", "x", TT::NAME);
    assert_unexpected("smile((1);", ";", TT::SEMI);
}

#[test]
fn test_unexpected_end() {
    assert_eq!(parse_error("ana (1)"), ParseError::UnexpectedEnd);
    assert_eq!(parse_error("{ smile(1);"), ParseError::UnexpectedEnd);
    assert_eq!(parse_error("int x = 1"), ParseError::UnexpectedEnd);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        parse_error("smile(1 +);").to_string(),
        "Unexpected token ')' (RPAR) at line 1, column 10"
    );
    assert!(matches!(
        parse_error("int x = 99999999999999999999;"),
        ParseError::InvalidNumber { ref lexeme, .. } if lexeme == "99999999999999999999"
    ));
}
