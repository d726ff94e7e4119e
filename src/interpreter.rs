//! Ties the code store, variable table, and statement dispatcher together
//! into the run loop and shell/line editor (spec.md §4.11, §4.12).
//!
//! Grounded in the teacher's top-level `Assembler` struct (`first_pass` +
//! `second_pass` driven from one owning object holding the symbol table and
//! program image). This interpreter is generic over its three injected
//! ports rather than boxing them, the way the teacher's `Assembler` is
//! generic over nothing only because it has no injected dependencies at
//! all — here the equivalent no-dynamic-dispatch default is a type
//! parameter per port, monomorphized per binary.

use crate::config::Config;
use crate::dispatch::{self, Directive};
use crate::error::{ErrorKind, InterpError, Span};
use crate::io::{write_str, CharIoPort, MemoryPort, PersistenceAdapter};
use crate::store::CodeStore;
use crate::vars::Variables;

pub struct Interpreter<IO, MEM, PER>
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    pub store: CodeStore,
    pub vars: Variables,
    /// `0` in direct mode, the executing line number while `RUN` is active.
    pub current_line: u16,
    pub config: Config,
    pub io: IO,
    pub mem: MEM,
    pub persist: PER,
}

impl<IO, MEM, PER> Interpreter<IO, MEM, PER>
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    pub fn new(config: Config, io: IO, mem: MEM, persist: PER) -> Self {
        let store = CodeStore::new(config.code_memory_size, config.max_linenum);
        Interpreter { store, vars: Variables::new(), current_line: 0, config, io, mem, persist }
    }

    /// Print an error banner and log it internally (spec.md §7).
    pub fn report_error(&mut self, err: InterpError) {
        tracing::warn!(kind = ?err.kind, line = err.span.line, "runtime error");
        write_str(&mut self.io, &err.to_string());
        self.io.write_char(b'\n');
    }

    /// Execute the stored program starting at its lowest line number
    /// (spec.md §4.11). No-op if the store is empty.
    ///
    /// `body_at` borrows `self.store` immutably while `dispatch` needs
    /// `&mut self`, so each iteration has to copy the statement body off
    /// that borrow before dispatching it. `scratch` is allocated once per
    /// `RUN`, sized to the store's own capacity, and reused for every
    /// iteration after that — spec.md §5's zero-allocation budget applies
    /// to the per-statement hot path, not to starting a run.
    pub fn run(&mut self) {
        if self.store.code_end() == 0 {
            return;
        }
        tracing::debug!(bytes = self.store.code_end(), "RUN started");
        let mut scratch = vec![0u8; self.store.capacity()];
        let mut header = 0usize;
        self.current_line = self.store.header_linenum(header);
        loop {
            if self.io.kill_requested() {
                let _ = self.io.read_char();
                break;
            }
            let index = CodeStore::body_offset_of_header(header);
            let body_src = self.store.body_at(index);
            let body_len = body_src.len();
            scratch[..body_len].copy_from_slice(body_src);
            match dispatch::dispatch(self, &scratch[..body_len]) {
                Directive::Terminate => break,
                Directive::Continue => {
                    let next_header = self.store.next_record_header(index);
                    if next_header >= self.store.code_end() {
                        break;
                    }
                    header = next_header;
                    self.current_line = self.store.header_linenum(header);
                }
                Directive::Goto(n) => {
                    let target = self.store.find_line(n);
                    if target == self.store.code_end() + 2 {
                        let err = InterpError::new(
                            ErrorKind::LineNotFound,
                            "LINE NOT FOUND",
                            Span::at(self.current_line),
                            format!("{n}"),
                        );
                        self.report_error(err);
                        break;
                    }
                    header = target - 2;
                    self.current_line = n;
                }
            }
        }
        tracing::debug!("RUN finished");
        self.current_line = 0;
    }

    /// Read one line of keystrokes into the pending-input region, then
    /// either store it (line starts with a digit) or dispatch it directly
    /// (spec.md §4.12). Returns `false` once the input source is exhausted.
    pub fn shell_step(&mut self) -> bool {
        if self.io.is_eof() {
            return false;
        }
        self.store.pending_reset();
        loop {
            let b = self.io.read_char();
            match b {
                b'\n' => break,
                0x08 => {
                    self.store.pending_backspace();
                }
                _ => {
                    if !self.store.pending_push(b) {
                        break;
                    }
                }
            }
        }
        let pending: Vec<u8> = self.store.pending().to_vec();
        match pending.iter().position(|&b| b != b' ' && b != b'\t') {
            Some(start) if pending[start].is_ascii_digit() => {
                if let Err(e) = self.store.store_pending_line() {
                    self.report_error(e);
                }
            }
            Some(start) => {
                let body = pending[start..].to_vec();
                dispatch::dispatch(self, &body);
                self.store.pending_reset();
            }
            None => self.store.pending_reset(),
        }
        true
    }

    pub fn shell_loop(&mut self) {
        while self.shell_step() {}
    }
}
