//! Token shapes for the expression evaluator (spec.md §4.3).
//!
//! Grounded in the teacher lexer's `token.rs` (a `TokenKind` enum plus
//! per-kind payload). The teacher keeps a `Span` on every token for error
//! reporting; this evaluator's tokens instead carry a `precedence` slot
//! because spec.md's reduce phase needs it baked in before reduction starts.
//! `Tok` itself has no tombstone/`NONE` variant — unary erasure wraps it in
//! `Option<Tok>` scoped to that one phase (see `mod.rs`'s `resolve_unary`)
//! rather than threading a tombstone variant through every later phase.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Invert,
    Open,
    Close,
}

impl Op {
    /// `p` from spec.md §4.3 Phase 3: 1 for bitwise, 2 for add/sub, 3 for
    /// mul/div/rem. Unused for `Invert`/`Open`/`Close`.
    pub fn precedence_class(self) -> i16 {
        match self {
            Op::And | Op::Or | Op::Xor => 1,
            Op::Add | Op::Sub => 2,
            Op::Mul | Op::Div | Op::Rem => 3,
            Op::Invert | Op::Open | Op::Close => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tok {
    Value(i32),
    Operator { op: Op, precedence: i16 },
}

impl Tok {
    pub fn operator(op: Op) -> Tok {
        Tok::Operator { op, precedence: 0 }
    }
}
