use std::env;
use std::fs;

use tinybasic::config::Config;
use tinybasic::interpreter::Interpreter;
use tinybasic::io::{FsPersistence, NullMemoryPort, StdioPort};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::from_args(&args);
    let program_path = args.iter().find(|a| !a.starts_with("--"));

    let mut interp = Interpreter::new(config, StdioPort::new(), NullMemoryPort, FsPersistence);

    if let Some(path) = program_path {
        let source = fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("failed to read {path}: {err}");
            std::process::exit(1);
        });
        for line in source.lines() {
            if line.trim().is_empty() {
                continue;
            }
            interp.store.pending_reset();
            for b in line.bytes() {
                if !interp.store.pending_push(b) {
                    break;
                }
            }
            if let Err(e) = interp.store.store_pending_line() {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        interp.run();
    } else {
        interp.shell_loop();
    }
}
