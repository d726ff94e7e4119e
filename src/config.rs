//! Runtime tunables (spec.md §6): code store capacity, the evaluator's
//! token ceiling, and the largest acceptable line number. The teacher has
//! no equivalent — LC-3's address space is fixed by the architecture, not a
//! knob — so this struct and its manual flag parser are new, built in the
//! teacher's own unadorned argument-handling style from `main.rs` rather
//! than pulling in `clap`.

use crate::store::{DEFAULT_CODE_MEMORY_SIZE, DEFAULT_MAX_LINENUM};

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub code_memory_size: usize,
    pub expr_max_tokens: usize,
    pub max_linenum: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            code_memory_size: DEFAULT_CODE_MEMORY_SIZE,
            expr_max_tokens: 64,
            max_linenum: DEFAULT_MAX_LINENUM,
        }
    }
}

impl Config {
    /// Parse `--code-memory-size N`, `--max-tokens N`, `--max-linenum N`
    /// flags out of an argument list, falling back to defaults for anything
    /// not given. Unrecognized arguments are left untouched for the caller
    /// (e.g. a program file path) to consume.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Config::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--code-memory-size" => {
                    if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                        config.code_memory_size = v;
                    }
                    i += 2;
                }
                "--max-tokens" => {
                    if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                        config.expr_max_tokens = v;
                    }
                    i += 2;
                }
                "--max-linenum" => {
                    if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                        config.max_linenum = v;
                    }
                    i += 2;
                }
                _ => i += 1,
            }
        }
        config
    }
}
