//! Statement handlers (spec.md §4.5-§4.10, plus the supplemented SAVE/LOAD,
//! PEEK/POKE, CHAR statements of SPEC_FULL.md §11). Each returns a
//! [`Directive`] telling the run loop / shell what to do next.

use super::{find_keyword, lossy, skip_blanks, Directive};
use crate::error::{ErrorKind, InterpError, Span};
use crate::eval::evaluate;
use crate::interpreter::Interpreter;
use crate::io::{write_str, CharIoPort, MemoryPort, PersistenceAdapter};

fn fail<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    kind: ErrorKind,
    message: &str,
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let err = InterpError::new(kind, message, Span::at(interp.current_line), lossy(source));
    interp.report_error(err);
    Directive::Terminate
}

/// Commands rejected while a program is running (spec.md §4.4: `RUN`,
/// `LIST`, `NEW`, `MEMORY`, `SAVE`, `LOAD`). Execution still terminates, per
/// spec.md §7, even though the violation is not an expression error.
fn mode_check<IO, MEM, PER>(interp: &mut Interpreter<IO, MEM, PER>, source: &[u8]) -> Option<Directive>
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    if interp.current_line != 0 {
        Some(fail(interp, ErrorKind::ModeViolation, "NOT ALLOWED WHILE RUNNING", source))
    } else {
        None
    }
}

fn write_number<IO, MEM, PER>(interp: &mut Interpreter<IO, MEM, PER>, value: i32)
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    write_str(&mut interp.io, &value.to_string());
}

pub fn unknown_command<IO, MEM, PER>(interp: &mut Interpreter<IO, MEM, PER>, body: &[u8]) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    fail(interp, ErrorKind::UnknownCommand, "UNKNOWN COMMAND", body)
}

/// `LET <letter> = <expr>` (spec.md §4.5), also reached directly when the
/// `LET` keyword is omitted.
pub fn let_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let mut i = skip_blanks(text, 0);
    let var = match text.get(i) {
        Some(&b) if b.is_ascii_alphabetic() => b,
        _ => return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED VARIABLE", source),
    };
    i = skip_blanks(text, i + 1);
    if text.get(i) != Some(&b'=') {
        return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED '='", source);
    }
    i += 1;

    match evaluate(&text[i..], &interp.vars, interp.config.expr_max_tokens, Span::at(interp.current_line), &lossy(source)) {
        Ok(value) => {
            interp.vars.set(var, value);
            Directive::Continue
        }
        Err(e) => {
            interp.report_error(e);
            Directive::Terminate
        }
    }
}

/// `PRINT <item> (: <item>)*` (spec.md §4.6). An item is either a
/// double-quoted string (printed verbatim) or an expression. A trailing `:`
/// immediately followed by end-of-statement suppresses the newline normally
/// emitted after the last item.
pub fn print_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let mut i = 0;
    let mut suppress_newline = false;
    loop {
        i = skip_blanks(text, i);
        if i >= text.len() {
            break;
        }
        if text[i] == b'"' {
            let start = i + 1;
            let end = match text[start..].iter().position(|&b| b == b'"') {
                Some(p) => start + p,
                None => return fail(interp, ErrorKind::UnclosedString, "UNCLOSED STRING", source),
            };
            for &b in &text[start..end] {
                interp.io.write_char(b);
            }
            i = end + 1;
        } else {
            let expr_end = text[i..].iter().position(|&b| b == b':').map(|p| i + p).unwrap_or(text.len());
            match evaluate(&text[i..expr_end], &interp.vars, interp.config.expr_max_tokens, Span::at(interp.current_line), &lossy(source)) {
                Ok(v) => write_number(interp, v),
                Err(e) => {
                    interp.report_error(e);
                    return Directive::Terminate;
                }
            }
            i = expr_end;
        }
        i = skip_blanks(text, i);
        if i >= text.len() {
            break;
        }
        if text[i] == b':' {
            i += 1;
            if skip_blanks(text, i) >= text.len() {
                suppress_newline = true;
                break;
            }
        } else {
            return fail(interp, ErrorKind::GarbageAfterStatement, "GARBAGE AFTER STATEMENT", source);
        }
    }
    if !suppress_newline {
        interp.io.write_char(b'\n');
    }
    Directive::Continue
}

#[derive(Clone, Copy)]
enum Cmp {
    Eq,
    Ne,
    Lt,
    Gt,
}

/// `IF <expr> (= | <> | < | >) <expr> THEN <stmt>` (spec.md §4.7).
pub fn if_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let Some(lhs_end) = text.iter().position(|&b| matches!(b, b'<' | b'>' | b'=')) else {
        return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED COMPARISON", source);
    };
    let (cmp, cmp_len) = if text[lhs_end..].starts_with(b"<>") {
        (Cmp::Ne, 2)
    } else {
        match text[lhs_end] {
            b'=' => (Cmp::Eq, 1),
            b'<' => (Cmp::Lt, 1),
            b'>' => (Cmp::Gt, 1),
            _ => unreachable!(),
        }
    };
    let after_cmp = lhs_end + cmp_len;
    let Some(then_pos) = find_keyword(&text[after_cmp..], "THEN") else {
        return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED THEN", source);
    };
    let then_pos = after_cmp + then_pos;

    let lhs = match evaluate(&text[..lhs_end], &interp.vars, interp.config.expr_max_tokens, Span::at(interp.current_line), &lossy(source)) {
        Ok(v) => v,
        Err(e) => {
            interp.report_error(e);
            return Directive::Terminate;
        }
    };
    let rhs = match evaluate(&text[after_cmp..then_pos], &interp.vars, interp.config.expr_max_tokens, Span::at(interp.current_line), &lossy(source)) {
        Ok(v) => v,
        Err(e) => {
            interp.report_error(e);
            return Directive::Terminate;
        }
    };
    let truth = match cmp {
        Cmp::Eq => lhs == rhs,
        Cmp::Ne => lhs != rhs,
        Cmp::Lt => lhs < rhs,
        Cmp::Gt => lhs > rhs,
    };
    if !truth {
        return Directive::Continue;
    }
    let stmt_start = skip_blanks(text, then_pos + "THEN".len());
    super::dispatch(interp, &text[stmt_start..])
}

/// `GOTO <line-expr>` (spec.md §4.8).
pub fn goto_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let lit = crate::literal::read_literal(text);
    if lit.error || lit.consumed == 0 || lit.value < 1 || lit.value >= interp.config.max_linenum as i32 {
        return fail(interp, ErrorKind::InvalidLineNumber, "INVALID LINE NUMBER", source);
    }
    Directive::Goto(lit.value as u16)
}

/// `INPUT <letter>` (spec.md §4.9): read a line of keystrokes into the
/// pending-input region, then evaluate it as an expression and assign.
pub fn input_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let i = skip_blanks(text, 0);
    let var = match text.get(i) {
        Some(&b) if b.is_ascii_alphabetic() => b,
        _ => return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED VARIABLE", source),
    };
    if skip_blanks(text, i + 1) != text.len() {
        return fail(interp, ErrorKind::GarbageAfterStatement, "GARBAGE AFTER INPUT", source);
    }

    interp.store.pending_reset();
    loop {
        match interp.io.read_char() {
            b'\n' => break,
            0x08 => {
                interp.store.pending_backspace();
            }
            b => {
                if !interp.store.pending_push(b) {
                    break;
                }
            }
        }
    }
    let raw: Vec<u8> = interp.store.pending().to_vec();
    interp.store.pending_reset();

    match evaluate(&raw, &interp.vars, interp.config.expr_max_tokens, Span::at(interp.current_line), &lossy(&raw)) {
        Ok(value) => {
            interp.vars.set(var, value);
            Directive::Continue
        }
        Err(e) => {
            interp.report_error(e);
            Directive::Terminate
        }
    }
}

/// `RUN` (spec.md §4.10): rejected while a program is already executing.
pub fn run_stmt<IO, MEM, PER>(interp: &mut Interpreter<IO, MEM, PER>, source: &[u8]) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    if let Some(d) = mode_check(interp, source) {
        return d;
    }
    interp.run();
    Directive::Terminate
}

/// `LIST` (spec.md §4.10): print every stored line in ascending order.
pub fn list_stmt<IO, MEM, PER>(interp: &mut Interpreter<IO, MEM, PER>, source: &[u8]) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    if let Some(d) = mode_check(interp, source) {
        return d;
    }
    let lines: Vec<(u16, Vec<u8>)> = interp.store.iter().map(|(n, b)| (n, b.to_vec())).collect();
    for (n, body) in lines {
        write_number(interp, n as i32);
        interp.io.write_char(b' ');
        for b in body {
            interp.io.write_char(b);
        }
        interp.io.write_char(b'\n');
    }
    Directive::Continue
}

/// `NEW` (spec.md §4.10): wipe the stored program after confirmation.
pub fn new_stmt<IO, MEM, PER>(interp: &mut Interpreter<IO, MEM, PER>, source: &[u8]) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    if let Some(d) = mode_check(interp, source) {
        return d;
    }
    write_str(&mut interp.io, "ARE YOU SURE? (Y/N) ");
    let resp = interp.io.read_char();
    if resp.eq_ignore_ascii_case(&b'Y') {
        interp.store.clear();
        write_str(&mut interp.io, "\nOK\n");
    } else {
        write_str(&mut interp.io, "\nCANCELLED\n");
    }
    Directive::Continue
}

/// `MEMORY` (spec.md §4.10): print the number of free code-store bytes.
pub fn memory_stmt<IO, MEM, PER>(interp: &mut Interpreter<IO, MEM, PER>, source: &[u8]) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    if let Some(d) = mode_check(interp, source) {
        return d;
    }
    write_number(interp, interp.store.free_bytes() as i32);
    interp.io.write_char(b'\n');
    Directive::Continue
}

/// `SAVE <name>` (SPEC_FULL.md §11): write every stored line to a text file
/// as `"<linenum> <body>\n"`.
pub fn save_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    if let Some(d) = mode_check(interp, source) {
        return d;
    }
    let name = lossy(text);
    let mut content = String::new();
    for (n, body) in interp.store.iter() {
        content.push_str(&n.to_string());
        content.push(' ');
        content.push_str(&String::from_utf8_lossy(body));
        content.push('\n');
    }
    match interp.persist.write_text(&name, &content) {
        Ok(()) => Directive::Continue,
        Err(e) => fail(interp, ErrorKind::Io, &e, source),
    }
}

/// `LOAD <name>` (SPEC_FULL.md §11): merge every digit-led line of a text
/// file into the store, skipping anything else.
pub fn load_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    if let Some(d) = mode_check(interp, source) {
        return d;
    }
    let name = lossy(text);
    let content = match interp.persist.read_text(&name) {
        Ok(c) => c,
        Err(e) => return fail(interp, ErrorKind::Io, &e, source),
    };
    for line in content.lines() {
        if !line.bytes().find(|b| *b != b' ' && *b != b'\t').is_some_and(|b| b.is_ascii_digit()) {
            continue;
        }
        interp.store.pending_reset();
        for b in line.bytes() {
            if !interp.store.pending_push(b) {
                break;
            }
        }
        if let Err(e) = interp.store.store_pending_line() {
            interp.report_error(e);
            return Directive::Terminate;
        }
    }
    Directive::Continue
}

/// `PEEK <addr-expr>, <variable>` / `PEEKB <addr-expr>, <variable>`
/// (SPEC_FULL.md §11): read through the memory bridge and assign into the
/// target variable, mirroring `LET`'s own assignment rather than printing.
/// `byte_size` selects `PEEKB`'s single-byte width over `PEEK`'s full word.
pub fn peek_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
    byte_size: bool,
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let Some(comma) = text.iter().position(|&b| b == b',') else {
        return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED ','", source);
    };
    let addr = match evaluate(&text[..comma], &interp.vars, interp.config.expr_max_tokens, Span::at(interp.current_line), &lossy(source)) {
        Ok(v) => v,
        Err(e) => {
            interp.report_error(e);
            return Directive::Terminate;
        }
    };
    let i = skip_blanks(text, comma + 1);
    let var = match text.get(i) {
        Some(&b) if b.is_ascii_alphabetic() => b,
        _ => return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED VARIABLE", source),
    };
    if skip_blanks(text, i + 1) != text.len() {
        return fail(interp, ErrorKind::GarbageAfterStatement, "GARBAGE AFTER PEEK", source);
    }
    let value = if byte_size { interp.mem.peek_byte(addr) } else { interp.mem.peek(addr) };
    interp.vars.set(var, value);
    Directive::Continue
}

/// `POKE <addr-expr> , <value-expr>` / `POKEB <addr-expr> , <value-expr>`
/// (SPEC_FULL.md §11). `byte_size` selects `POKEB`'s single-byte width.
pub fn poke_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
    byte_size: bool,
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let Some(comma) = text.iter().position(|&b| b == b',') else {
        return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED ','", source);
    };
    let addr = match evaluate(&text[..comma], &interp.vars, interp.config.expr_max_tokens, Span::at(interp.current_line), &lossy(source)) {
        Ok(v) => v,
        Err(e) => {
            interp.report_error(e);
            return Directive::Terminate;
        }
    };
    let value = match evaluate(&text[comma + 1..], &interp.vars, interp.config.expr_max_tokens, Span::at(interp.current_line), &lossy(source)) {
        Ok(v) => v,
        Err(e) => {
            interp.report_error(e);
            return Directive::Terminate;
        }
    };
    if byte_size {
        interp.mem.poke_byte(addr, value);
    } else {
        interp.mem.poke(addr, value);
    }
    Directive::Continue
}

/// `CHAR <variable>` (SPEC_FULL.md §11): print the single variable's value
/// as a raw character. Not expression-grammar — a bare letter only, with
/// anything after it rejected as garbage, matching the reference
/// interpreter's `handle_char`.
pub fn char_stmt<IO, MEM, PER>(
    interp: &mut Interpreter<IO, MEM, PER>,
    text: &[u8],
    source: &[u8],
) -> Directive
where
    IO: CharIoPort,
    MEM: MemoryPort,
    PER: PersistenceAdapter,
{
    let i = skip_blanks(text, 0);
    let var = match text.get(i) {
        Some(&b) if b.is_ascii_alphabetic() => b,
        _ => return fail(interp, ErrorKind::ExpressionSyntax, "EXPECTED VARIABLE", source),
    };
    if skip_blanks(text, i + 1) != text.len() {
        return fail(interp, ErrorKind::GarbageAfterStatement, "GARBAGE AFTER VARIABLE", source);
    }
    let value = interp.vars.get(var);
    interp.io.write_char((value & 0xFF) as u8);
    Directive::Continue
}
