//! Interactive front-end: a `crossterm` raw-mode terminal driving the
//! `tinybasic` interpreter core over its `CharIoPort` trait (spec.md §6,
//! §4.12). Plays the same role the teacher's `lc3-sim` plays for the
//! assembler — a standalone binary depending on the core crate as a
//! library — minus the TUI widgets `lc3-sim` would have used `ratatui` for,
//! since a line-oriented BASIC prompt has no panes to lay out; raw-mode
//! `crossterm` alone is enough (see DESIGN.md for the dropped dependency).

use crossterm::terminal;
use tinybasic::config::Config;
use tinybasic::interpreter::Interpreter;
use tinybasic::io::{CharIoPort, FsPersistence, NullMemoryPort};

/// Reads and echoes keystrokes itself, since raw mode suppresses the
/// terminal's own echo. Backspace is translated to the single `\b` (0x08)
/// byte the core understands (spec.md §6); everything else passes through
/// unmodified. Echo policy lives here, not in the interpreter core — see
/// spec.md §1's scope note assigning "echo policy" to the I/O driver.
struct RawTerminalPort;

impl CharIoPort for RawTerminalPort {
    fn read_char(&mut self) -> u8 {
        use crossterm::event::{self, Event, KeyCode, KeyEventKind};
        loop {
            let Ok(Event::Key(key)) = event::read() else { continue };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => {
                    print!("\r\n");
                    flush();
                    return b'\n';
                }
                KeyCode::Backspace => {
                    print!("\x08 \x08");
                    flush();
                    return 0x08;
                }
                KeyCode::Char(c) if c.is_ascii() => {
                    print!("{c}");
                    flush();
                    return c as u8;
                }
                _ => continue,
            }
        }
    }

    fn write_char(&mut self, byte: u8) {
        if byte == b'\n' {
            print!("\r\n");
        } else {
            print!("{}", byte as char);
        }
        flush();
    }
}

fn flush() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_args(&args);

    terminal::enable_raw_mode().unwrap_or_else(|err| {
        eprintln!("failed to enable raw mode: {err}");
        std::process::exit(1);
    });

    let mut interp = Interpreter::new(config, RawTerminalPort, NullMemoryPort, FsPersistence);
    interp.shell_loop();

    let _ = terminal::disable_raw_mode();
}
