use std::env;
use std::time::Instant;
use tanglish::{parse, tokenize, Interpreter};

static FIBONACCI: &str = "seyal fibonacci(x) {
    endraal x < 2 {
        thiruppu x
    }
    thiruppu fibonacci(x - 1) + fibonacci(x - 2)
}";

fn main() {
    tanglish::init_tracing();

    let n: u32 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(25);
    let source = format!("{}\nkaattu fibonacci({})", FIBONACCI, n);

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    let program = match parse(tokens) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };

    let mut interpreter = Interpreter::new();
    let start = Instant::now();
    let result = interpreter.evaluate(&program);
    let duration = start.elapsed();

    match result {
        Ok(()) => println!(
            "n={}, result={}, duration={}",
            n,
            interpreter.output().trim_end(),
            duration.as_secs_f64(),
        ),
        Err(err) => eprintln!("{}", err),
    }
}
