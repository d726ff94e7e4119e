//! Statement dispatcher (spec.md §4.4): recognize the keyword a statement
//! body begins with and hand the remainder to its handler.
//!
//! Grounded in the teacher's `first_pass` keyword recognition (a chain of
//! `if` checks against the instruction mnemonic table, case-insensitive,
//! bounded at a token boundary) rather than a generated match or a hash
//! lookup — this dialect's keyword set is small and fixed, so a linear
//! chain reads the same way the teacher's does.

pub mod handlers;


use crate::io::{CharIoPort, MemoryPort, PersistenceAdapter};
use crate::interpreter::Interpreter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Continue,
    Goto(u16),
    Terminate,
}

/// `body` is positioned at the first non-blank byte of the statement; both
/// callers (the run loop reading a stored record, the shell dispatching a
/// direct-mode line) already skip leading blanks before reaching here.
pub fn dispatch<IO, MEM, PER>(interp: &mut Interpreter<IO, MEM, PER>, body: &[u8]) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    if match_keyword(body, "LET") {
        return handlers::let_stmt(interp, after_keyword(body, "LET"), body);
    }
    if match_keyword(body, "PRINT") {
        return handlers::print_stmt(interp, after_keyword(body, "PRINT"), body);
    }
    if match_keyword(body, "IF") {
        return handlers::if_stmt(interp, after_keyword(body, "IF"), body);
    }
    if match_keyword(body, "GOTO") {
        return handlers::goto_stmt(interp, after_keyword(body, "GOTO"), body);
    }
    if match_keyword(body, "INPUT") {
        return handlers::input_stmt(interp, after_keyword(body, "INPUT"), body);
    }
    if match_keyword(body, "REM") {
        return Directive::Continue;
    }
    if match_keyword(body, "CLEAR") {
        crate::io::write_str(&mut interp.io, "\x1b[2J\x1b[H");
        return Directive::Continue;
    }
    if match_keyword(body, "END") {
        return Directive::Terminate;
    }
    if match_keyword(body, "RUN") {
        return handlers::run_stmt(interp, body);
    }
    if match_keyword(body, "LIST") {
        return handlers::list_stmt(interp, body);
    }
    if match_keyword(body, "NEW") {
        return handlers::new_stmt(interp, body);
    }
    if match_keyword(body, "MEMORY") {
        return handlers::memory_stmt(interp, body);
    }
    if match_keyword(body, "SAVE") {
        return handlers::save_stmt(interp, after_keyword(body, "SAVE"), body);
    }
    if match_keyword(body, "LOAD") {
        return handlers::load_stmt(interp, after_keyword(body, "LOAD"), body);
    }
    if match_keyword(body, "PEEKB") {
        return handlers::peek_stmt(interp, after_keyword(body, "PEEKB"), body, true);
    }
    if match_keyword(body, "PEEK") {
        return handlers::peek_stmt(interp, after_keyword(body, "PEEK"), body, false);
    }
    if match_keyword(body, "POKEB") {
        return handlers::poke_stmt(interp, after_keyword(body, "POKEB"), body, true);
    }
    if match_keyword(body, "POKE") {
        return handlers::poke_stmt(interp, after_keyword(body, "POKE"), body, false);
    }
    if match_keyword(body, "CHAR") {
        return handlers::char_stmt(interp, after_keyword(body, "CHAR"), body);
    }
    // `LET` keyword optional: a bare `<letter> = <expr>` or `<letter> <expr>`
    // is also an assignment. Checked last, after every explicit keyword, so
    // a keyword that happens to start with a letter is never mistaken for
    // one (not that any collision is actually possible here: the full
    // keyword always has to match, not just its first letter).
    if body.first().is_some_and(|b| b.is_ascii_alphabetic())
        && matches!(body.get(1), Some(b' ') | Some(b'='))
    {
        return handlers::let_stmt(interp, body, body);
    }
    handlers::unknown_command(interp, body)
}

/// Does `body` begin with `kw`, case-insensitively, followed by a blank or
/// the end of the body?
pub(crate) fn match_keyword(body: &[u8], kw: &str) -> bool {
    let kwb = kw.as_bytes();
    body.len() >= kwb.len()
        && body[..kwb.len()].eq_ignore_ascii_case(kwb)
        && matches!(body.get(kwb.len()), None | Some(&b' '))
}

/// `body` with `kw` and the one blank separating it from its operand (if
/// any) stripped off the front.
pub(crate) fn after_keyword<'a>(body: &'a [u8], kw: &str) -> &'a [u8] {
    let rest = &body[kw.len()..];
    if rest.first() == Some(&b' ') {
        &rest[1..]
    } else {
        rest
    }
}

/// Find a case-insensitive, token-bounded occurrence of `kw` inside
/// `haystack` (used by `IF` to locate `THEN`, which is not anchored to the
/// start of the statement).
pub(crate) fn find_keyword(haystack: &[u8], kw: &str) -> Option<usize> {
    let kwb = kw.as_bytes();
    if haystack.len() < kwb.len() {
        return None;
    }
    (0..=haystack.len() - kwb.len()).find(|&start| {
        haystack[start..start + kwb.len()].eq_ignore_ascii_case(kwb)
            && (start == 0 || haystack[start - 1] == b' ')
            && matches!(haystack.get(start + kwb.len()), None | Some(&b' '))
    })
}

pub(crate) fn skip_blanks(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    i
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}
