use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;

use happyscript::config::{Config, USAGE};
use happyscript::{parse, run_with, Error, Interpreter, ParserState, Tokenizer};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};

fn main() -> ExitCode {
    env_logger::init();
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };
    if config.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }
    let result = match &config.script {
        Some(path) => run_script(path, &config),
        None if io::stdin().is_terminal() => {
            if let Err(err) = run_repl(&config) {
                eprintln!("Error: {:?}", err);
                return ExitCode::FAILURE;
            }
            Ok(())
        }
        None => run_stdin(&config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn run_script(path: &Path, config: &Config) -> Result<(), String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("Could not open file: {} ({})", path.display(), e))?;
    let mut interpreter = Interpreter::new(io::stdout());
    run_with(&mut interpreter, &source, config.strict).map_err(|e| e.to_string())
}

fn run_stdin(config: &Config) -> Result<(), String> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .map_err(|e| format!("Could not read standard input: {}", e))?;
    if source.trim().is_empty() {
        eprintln!("No input detected.");
        return Ok(());
    }
    let mut interpreter = Interpreter::new(io::stdout());
    run_with(&mut interpreter, &source, config.strict).map_err(|e| e.to_string())
}

fn run_repl(config: &Config) -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    let mut interpreter = Interpreter::new(io::stdout());
    let mut tokenizer = Tokenizer::new().strict(config.strict);
    println!("HappyScript Interpreter! Ctrl-D to quit.");
    loop {
        let prompt = if tokenizer.is_pending() { ".. " } else { ">> " };
        match rl.readline(prompt) {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                match tokenizer.tokenize(std::iter::once(line)) {
                    ParserState::ContinuationNeeded => continue,
                    ParserState::Error(e) => eprintln!("Error: {}", e),
                    ParserState::Ok => {
                        let finished = std::mem::replace(
                            &mut tokenizer,
                            Tokenizer::new().strict(config.strict),
                        );
                        if let Err(e) = execute_entry(&mut interpreter, finished) {
                            eprintln!("Error: {}", e);
                        }
                        continue;
                    }
                }
                tokenizer = Tokenizer::new().strict(config.strict);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }
    Ok(())
}

fn execute_entry(
    interpreter: &mut Interpreter<io::Stdout>,
    tokenizer: Tokenizer,
) -> Result<(), Error> {
    let tokens = tokenizer.finalize()?;
    let program = parse(&tokens)?;
    interpreter.interpret(&program)?;
    Ok(())
}
