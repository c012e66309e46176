use std::path::PathBuf;

pub const USAGE: &str = "Usage: happyscript [--strict] [SCRIPT]

Runs SCRIPT, or the program read from standard input. Without a script on
an interactive terminal, starts a session that runs each entry as it is
completed.

Options:
    --strict    reject unrecognized characters instead of skipping them
    -h, --help  print this message

Set RUST_LOG (e.g. RUST_LOG=debug) to see tokenizer and parser logs.";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub script: Option<PathBuf>,
    pub strict: bool,
    pub help: bool,
}

impl Config {
    /// Reads the configuration from command line arguments, program name
    /// excluded.
    pub fn from_args(args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut config = Self::default();
        for arg in args {
            match arg.as_str() {
                "--strict" => config.strict = true,
                "-h" | "--help" => config.help = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(format!("Unknown option: {}", flag))
                }
                path => {
                    if config.script.is_some() {
                        return Err(format!("Unexpected argument: {}", path));
                    }
                    config.script = Some(PathBuf::from(path));
                }
            }
        }
        Ok(config)
    }
}
