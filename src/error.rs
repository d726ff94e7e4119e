//! Interpreter error type.
//!
//! Mirrors the teacher assembler's hand-rolled `AsmError`/`ErrorKind`: a
//! plain struct plus enum, no `thiserror`. Every user-facing failure in this
//! crate (bad line number, evaluator syntax error, unknown command, ...)
//! becomes one of these and is handed to the interpreter's error reporter,
//! never a `panic!` on user input.

/// The line number an error occurred on, if known.
///
/// `0` means direct mode (no program line is executing). Carried separately
/// from `ErrorKind` so the printer in spec.md §7 ("errors MUST include
/// context: the current line number when `current_line != 0`") has a single
/// place to read it from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u16,
}

impl Span {
    pub const NONE: Span = Span { line: 0 };

    pub fn at(line: u16) -> Self {
        Span { line }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidLineNumber,
    OutOfMemory,
    ExpressionSyntax,
    UnclosedString,
    GarbageAfterStatement,
    UnknownCommand,
    LineNotFound,
    ModeViolation,
    /// SAVE/LOAD persistence failure. Not part of the core dialect's error
    /// table; added for the optional persistence adapter (see DESIGN.md).
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    /// The offending source text, echoed per spec.md §7.
    pub source_text: String,
}

impl InterpError {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        span: Span,
        source_text: impl Into<String>,
    ) -> Self {
        InterpError {
            kind,
            message: message.into(),
            span,
            source_text: source_text.into(),
        }
    }
}

impl std::fmt::Display for InterpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.span.line != 0 {
            write!(
                f,
                "?{} AT LINE {}: {}",
                self.message, self.span.line, self.source_text
            )
        } else {
            write!(f, "?{}: {}", self.message, self.source_text)
        }
    }
}
