use crate::config::Config;
use crate::evaluator::Interpreter;
use crate::lexer::{tokenize, LexError};
use crate::token::TokenType;
use std::io::{self, BufRead, Write};

static PROMPT: &str = ">> ";
static CONTINUATION_PROMPT: &str = ".. ";

/// Reads programs from stdin until end of input. Definitions persist between
/// entries, and an entry spans lines until its braces balance.
pub fn start(config: Config) {
    let mut interpreter = Interpreter::with_config(config);
    let stdin = io::stdin();
    let mut buffer = String::new();

    loop {
        print!("{}", if buffer.is_empty() { PROMPT } else { CONTINUATION_PROMPT });
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        buffer.push_str(&line);

        if !is_complete(&buffer) {
            continue;
        }

        let result = interpreter.run(&buffer);
        print!("{}", interpreter.take_output());
        if let Err(err) = result {
            println!("ERROR: {}", err);
        }
        buffer.clear();
    }
}

/// Whether `source` can be run as is, or needs more lines first. Anything
/// that fails to lex for another reason is complete so the error surfaces.
pub fn is_complete(source: &str) -> bool {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(LexError::UnterminatedString { .. }) => return false,
        Err(_) => return true,
    };

    let depth = tokens.iter().fold(0i64, |depth, token| match token.token_type {
        TokenType::LBrace => depth + 1,
        TokenType::RBrace => depth - 1,
        _ => depth,
    });
    depth <= 0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_complete() {
        let cases = vec![
            ("kaattu 1\n", true),
            ("", true),
            ("seyal f(x) {\n", false),
            ("seyal f(x) {\n  thiruppu x\n}\n", true),
            ("endraal unmai { endraal unmai {\n}\n", false),
            ("kaattu \"open\n", false),
            ("kaattu \"{\"\n", true),
            ("}\n", true),
            ("kaattu @\n", true),
        ];

        for (input, expected) in cases.into_iter() {
            assert_eq!(is_complete(input), expected, "{:?}", input);
        }
    }
}
