pub mod ast;
pub mod builtins;
pub mod config;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
mod stack;
pub mod token;
pub mod value;

use std::sync::Once;

pub use builtins::{NativeError, NativeFn};
pub use config::Config;
pub use error::Error;
pub use evaluator::Interpreter;
pub use lexer::tokenize;
pub use parser::parse;
pub use value::Value;

static TRACING_INIT: Once = Once::new();

/// Everything a program printed, plus the first error that stopped it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    pub output: String,
    pub error: Option<String>,
}

/// Runs `source` in a fresh interpreter with the default configuration.
///
/// Lexing and parsing finish before anything executes, so a lex or parse
/// error always comes back with empty output. A runtime error keeps whatever
/// was printed before it.
pub fn run(source: &str) -> Outcome {
    run_with_config(source, Config::default())
}

pub fn run_with_config(source: &str, config: Config) -> Outcome {
    let mut interpreter = Interpreter::with_config(config);
    let result = interpreter.run(source);
    let output = interpreter.take_output();

    match result {
        Ok(()) => Outcome {
            output,
            error: None,
        },
        Err(err) => {
            tracing::debug!(error = %err, "program failed");
            Outcome {
                output,
                error: Some(err.to_string()),
            }
        }
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`. Does nothing when
/// the variable is unset, and only ever runs once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
