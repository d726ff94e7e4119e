//! External interfaces the interpreter core is driven through (spec.md §6):
//! character I/O, the optional memory bridge, and the optional persistence
//! adapter. The core never touches a terminal or the filesystem directly —
//! it only calls through these traits, the way the teacher's `Assembler`
//! takes its source as an in-memory `&str` rather than opening files itself.

/// Single-character I/O, injected into the interpreter rather than hard-wired
/// to stdio. Echo policy belongs to the implementation, not the core: a
/// batch-mode port over a pipe echoes nothing, while the interactive
/// raw-terminal port (see the `shell` crate) echoes each keystroke itself as
/// part of reading it.
pub trait CharIoPort {
    /// Block until one byte is available and return it.
    fn read_char(&mut self) -> u8;

    fn write_char(&mut self, byte: u8);

    /// Polled once per statement by the run loop (spec.md §4.11 step 2) to
    /// support breaking out of a runaway program. Defaults to never firing.
    fn kill_requested(&mut self) -> bool {
        false
    }

    /// Whether the input source is exhausted. Only meaningful for
    /// non-interactive ports reading from a file or pipe; the interactive
    /// shell never returns `true`. Used by the shell loop to end cleanly
    /// instead of spinning on phantom newlines once stdin is closed.
    fn is_eof(&mut self) -> bool {
        false
    }
}

pub fn write_str(port: &mut dyn CharIoPort, s: &str) {
    for b in s.bytes() {
        port.write_char(b);
    }
}

/// `PEEK`/`POKE`/`PEEKB`/`POKEB` memory bridge (optional, spec.md §4.4/§6).
/// The byte-sized variants default to masking/truncating through the
/// word-sized ones, since most implementations (including [`NullMemoryPort`])
/// have no reason to treat the two widths differently.
pub trait MemoryPort {
    fn peek(&mut self, addr: i32) -> i32;
    fn poke(&mut self, addr: i32, value: i32);

    fn peek_byte(&mut self, addr: i32) -> i32 {
        self.peek(addr) & 0xFF
    }

    fn poke_byte(&mut self, addr: i32, value: i32) {
        self.poke(addr, value & 0xFF);
    }
}

/// Default bridge for both binaries: no real peekable memory exists, so
/// every address reads as zero and every write is discarded.
pub struct NullMemoryPort;

impl MemoryPort for NullMemoryPort {
    fn peek(&mut self, _addr: i32) -> i32 {
        0
    }

    fn poke(&mut self, _addr: i32, _value: i32) {}
}

/// `SAVE`/`LOAD` persistence (optional, spec.md §6). A trait rather than a
/// direct `std::fs` call so integration tests can swap in an in-memory
/// double instead of touching the filesystem.
pub trait PersistenceAdapter {
    fn write_text(&mut self, name: &str, text: &str) -> Result<(), String>;
    fn read_text(&mut self, name: &str) -> Result<String, String>;
}

/// `std::fs`-backed adapter used by both binaries, generalizing the
/// teacher's own `fs::read_to_string` call in `main.rs` into a trait impl.
pub struct FsPersistence;

impl PersistenceAdapter for FsPersistence {
    fn write_text(&mut self, name: &str, text: &str) -> Result<(), String> {
        std::fs::write(name, text).map_err(|e| e.to_string())
    }

    fn read_text(&mut self, name: &str) -> Result<String, String> {
        std::fs::read_to_string(name).map_err(|e| e.to_string())
    }
}

/// Line-buffered character port over stdio, used by the non-interactive
/// binary. The terminal (when not in raw mode) echoes typed characters on
/// its own, so this port does not echo.
pub struct StdioPort {
    input: std::io::BufReader<std::io::Stdin>,
}

impl StdioPort {
    pub fn new() -> Self {
        StdioPort { input: std::io::BufReader::new(std::io::stdin()) }
    }
}

impl Default for StdioPort {
    fn default() -> Self {
        Self::new()
    }
}

impl CharIoPort for StdioPort {
    fn read_char(&mut self) -> u8 {
        use std::io::Read;
        let mut byte = [0u8; 1];
        match self.input.read(&mut byte) {
            Ok(1) => byte[0],
            _ => b'\n',
        }
    }

    fn write_char(&mut self, byte: u8) {
        use std::io::Write;
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(&[byte]);
        let _ = stdout.flush();
    }

    fn is_eof(&mut self) -> bool {
        use std::io::BufRead;
        matches!(self.input.fill_buf(), Ok(buf) if buf.is_empty())
    }
}

/// In-memory port for unit/integration tests: reads from a fixed keystroke
/// buffer, records every written byte. Not `cfg(test)`-gated because
/// `tests/integration_tests.rs` compiles against this crate as an ordinary
/// dependency and needs it too.
pub struct MemoryIoPort {
    input: std::collections::VecDeque<u8>,
    pub output: Vec<u8>,
}

impl MemoryIoPort {
    pub fn new(input: &[u8]) -> Self {
        MemoryIoPort { input: input.iter().copied().collect(), output: Vec::new() }
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl CharIoPort for MemoryIoPort {
    fn read_char(&mut self) -> u8 {
        self.input.pop_front().unwrap_or(b'\n')
    }

    fn write_char(&mut self, byte: u8) {
        self.output.push(byte);
    }

    fn is_eof(&mut self) -> bool {
        self.input.is_empty()
    }
}

/// In-memory `PersistenceAdapter` for tests: a named-file table held in
/// memory instead of on disk.
#[derive(Default)]
pub struct MemoryPersistence {
    files: std::collections::HashMap<String, String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceAdapter for MemoryPersistence {
    fn write_text(&mut self, name: &str, text: &str) -> Result<(), String> {
        self.files.insert(name.to_string(), text.to_string());
        Ok(())
    }

    fn read_text(&mut self, name: &str) -> Result<String, String> {
        self.files.get(name).cloned().ok_or_else(|| format!("no such file: {name}"))
    }
}
