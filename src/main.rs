use std::env;
use std::fs;
use std::process;
use tanglish::{repl, Config};

fn main() {
    tanglish::init_tracing();
    let config = Config::from_env();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            println!("Vanakkam! This is the Tanglish programming language!");
            println!("Feel free to type in commands");
            repl::start(config);
            return;
        }
    };

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot read {}: {}", path, err);
            process::exit(2);
        }
    };

    let outcome = tanglish::run_with_config(&source, config);
    print!("{}", outcome.output);
    if let Some(error) = outcome.error {
        eprintln!("{}", error);
        process::exit(1);
    }
}
