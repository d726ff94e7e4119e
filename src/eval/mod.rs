//! Expression evaluator (spec.md §4.3).
//!
//! Five phases, no recursion, grounded in the teacher's `first_pass` module
//! — specifically its explicit `AssemblerState` state machine walked in a
//! single `for` loop rather than a recursive-descent parser. This evaluator
//! is the same shape: tokenize, then four more flat passes over a token
//! buffer, each one a plain loop with an accumulator, exactly the style
//! `first_pass::first_pass` uses for its location-counter walk.
//!
//! The token buffer itself is [`TokenBuf`], a fixed-capacity stack array
//! rather than a `Vec` — spec.md §5 calls every expression solve a hot path
//! with a zero-allocation budget, the same reason the reference
//! interpreter's `expr_tokens` is a plain `ExprToken[EXPR_MAX_TOKENS]`
//! global, not a growable array.

pub mod token;

#[cfg(test)]
mod tests;

use crate::error::{ErrorKind, InterpError, Span};
use crate::literal::read_literal;
use crate::vars::Variables;
use token::{Op, Tok};

/// Compile-time capacity of the token workspace, mirroring the reference
/// interpreter's `EXPR_MAX_TOKENS`. `Config::expr_max_tokens` may lower the
/// effective limit at runtime but never raises it past this.
const MAX_EXPR_TOKENS: usize = 64;

/// Fixed-capacity token workspace: a stack array plus a live-length counter,
/// standing in for a `Vec<Tok>` everywhere in this module so no phase
/// allocates.
#[derive(Clone, Copy)]
struct TokenBuf {
    buf: [Tok; MAX_EXPR_TOKENS],
    len: usize,
}

impl TokenBuf {
    fn new() -> Self {
        TokenBuf { buf: [Tok::Value(0); MAX_EXPR_TOKENS], len: 0 }
    }

    fn push(&mut self, t: Tok) -> bool {
        if self.len >= MAX_EXPR_TOKENS {
            return false;
        }
        self.buf[self.len] = t;
        self.len += 1;
        true
    }

    fn as_slice(&self) -> &[Tok] {
        &self.buf[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [Tok] {
        &mut self.buf[..self.len]
    }

    /// Shift everything after `idx` left by one, as `Vec::remove` would, but
    /// in place on the stack array.
    fn remove(&mut self, idx: usize) {
        for j in idx..self.len - 1 {
            self.buf[j] = self.buf[j + 1];
        }
        self.len -= 1;
    }
}

/// Internal syntax-error marker threaded through the five phases; translated
/// to a user-facing [`InterpError`] only once, by [`evaluate`], which is the
/// only place that has the context (current line, source text) to attach.
struct Syntax(&'static str);

type Phase<T> = Result<T, Syntax>;

pub fn evaluate(
    span: &[u8],
    vars: &Variables,
    max_tokens: usize,
    context: Span,
    source_text: &str,
) -> Result<i32, InterpError> {
    tokenize(span, vars, max_tokens)
        .and_then(resolve_unary)
        .and_then(assign_precedence)
        .map(filter_brackets)
        .and_then(reduce)
        .map_err(|Syntax(msg)| InterpError::new(ErrorKind::ExpressionSyntax, msg, context, source_text))
}

fn tokenize(span: &[u8], vars: &Variables, max_tokens: usize) -> Phase<TokenBuf> {
    let effective_max = max_tokens.min(MAX_EXPR_TOKENS);
    let mut tokens = TokenBuf::new();
    let mut i = 0;
    while i < span.len() {
        if tokens.len >= effective_max {
            break;
        }
        let b = span[i];
        match b {
            b' ' | b'\t' => i += 1,
            b'0'..=b'9' => {
                let lit = read_literal(&span[i..]);
                if lit.error {
                    return Err(Syntax("INVALID NUMBER"));
                }
                tokens.push(Tok::Value(lit.value));
                i += lit.consumed.max(1);
            }
            _ if b.is_ascii_alphabetic() => {
                tokens.push(Tok::Value(vars.get(b)));
                i += 1;
            }
            b'+' => {
                tokens.push(Tok::operator(Op::Add));
                i += 1;
            }
            b'-' => {
                tokens.push(Tok::operator(Op::Sub));
                i += 1;
            }
            b'*' => {
                tokens.push(Tok::operator(Op::Mul));
                i += 1;
            }
            b'/' => {
                tokens.push(Tok::operator(Op::Div));
                i += 1;
            }
            b'%' => {
                tokens.push(Tok::operator(Op::Rem));
                i += 1;
            }
            b'&' => {
                tokens.push(Tok::operator(Op::And));
                i += 1;
            }
            b'|' => {
                tokens.push(Tok::operator(Op::Or));
                i += 1;
            }
            b'^' => {
                tokens.push(Tok::operator(Op::Xor));
                i += 1;
            }
            b'!' => {
                tokens.push(Tok::operator(Op::Invert));
                i += 1;
            }
            b'(' => {
                tokens.push(Tok::operator(Op::Open));
                i += 1;
            }
            b')' => {
                tokens.push(Tok::operator(Op::Close));
                i += 1;
            }
            _ => return Err(Syntax("SYNTAX ERROR")),
        }
    }
    Ok(tokens)
}

/// Phase 2. Uses `Option<Tok>` tombstones over a second fixed array rather
/// than `TokenBuf::remove` because the legality of a unary operator
/// (spec.md: "must be followed by a VALUE") is checked against physical
/// adjacency — `--5` must stay illegal even though resolving the inner `-5`
/// first would otherwise leave the outer `-` directly next to a
/// freshly-collapsed value. A tombstoned slot still blocks that adjacency;
/// a removed one wouldn't.
fn resolve_unary(tokens: TokenBuf) -> Phase<TokenBuf> {
    let mut slots: [Option<Tok>; MAX_EXPR_TOKENS] = [None; MAX_EXPR_TOKENS];
    let len = tokens.len;
    for (idx, &t) in tokens.as_slice().iter().enumerate() {
        slots[idx] = Some(t);
    }
    let mut i = len;
    while i > 0 {
        i -= 1;
        let Some(Tok::Operator { op, .. }) = slots[i] else {
            continue;
        };
        if !matches!(op, Op::Add | Op::Sub | Op::Invert) {
            continue;
        }
        let blocked_by_prev = i == 0
            || !matches!(
                slots[i - 1],
                Some(Tok::Value(_)) | Some(Tok::Operator { op: Op::Close, .. })
            );
        if !blocked_by_prev {
            continue;
        }
        match slots.get(i + 1).copied().flatten() {
            Some(Tok::Value(v)) => {
                let resolved = match op {
                    Op::Add => v,
                    Op::Sub => v.wrapping_neg(),
                    Op::Invert => !v,
                    _ => unreachable!(),
                };
                slots[i + 1] = Some(Tok::Value(resolved));
                slots[i] = None;
            }
            _ => return Err(Syntax("SYNTAX ERROR (UNARY)")),
        }
    }
    let mut out = TokenBuf::new();
    for slot in slots.into_iter().take(len).flatten() {
        out.push(slot);
    }
    Ok(out)
}

fn assign_precedence(mut tokens: TokenBuf) -> Phase<TokenBuf> {
    let mut base: i16 = 0;
    for t in tokens.as_mut_slice().iter_mut() {
        if let Tok::Operator { op, precedence } = t {
            match op {
                Op::Open => base += 4,
                Op::Close => {
                    base -= 4;
                    if base < 0 {
                        return Err(Syntax("UNBALANCED PARENS"));
                    }
                }
                _ => *precedence = base + op.precedence_class(),
            }
        }
    }
    if base != 0 {
        return Err(Syntax("UNBALANCED PARENS"));
    }
    Ok(tokens)
}

fn filter_brackets(tokens: TokenBuf) -> TokenBuf {
    let mut out = TokenBuf::new();
    for &t in tokens.as_slice() {
        if !matches!(t, Tok::Operator { op: Op::Open | Op::Close, .. }) {
            out.push(t);
        }
    }
    out
}

fn reduce(mut tokens: TokenBuf) -> Phase<i32> {
    while tokens.len > 1 {
        let mut best_idx = None;
        let mut best_prec: i16 = 0;
        for (idx, t) in tokens.as_slice().iter().enumerate() {
            if let Tok::Operator { precedence, .. } = t {
                if *precedence > best_prec {
                    best_prec = *precedence;
                    best_idx = Some(idx);
                }
            }
        }
        let idx = best_idx.ok_or(Syntax("SYNTAX ERROR"))?;
        let op = match tokens.buf[idx] {
            Tok::Operator { op, .. } => op,
            _ => unreachable!(),
        };
        let left = match (idx > 0).then(|| tokens.buf[idx - 1]) {
            Some(Tok::Value(v)) => v,
            _ => return Err(Syntax("SYNTAX ERROR")),
        };
        let right = match tokens.as_slice().get(idx + 1) {
            Some(Tok::Value(v)) => *v,
            _ => return Err(Syntax("SYNTAX ERROR")),
        };
        let result = apply(op, left, right)?;
        tokens.buf[idx - 1] = Tok::Value(result);
        tokens.remove(idx + 1);
        tokens.remove(idx);
    }
    match tokens.as_slice().first() {
        Some(Tok::Value(v)) => Ok(*v),
        _ => Err(Syntax("SYNTAX ERROR")),
    }
}

fn apply(op: Op, left: i32, right: i32) -> Phase<i32> {
    match op {
        Op::Add => Ok(left.wrapping_add(right)),
        Op::Sub => Ok(left.wrapping_sub(right)),
        Op::Mul => Ok(left.wrapping_mul(right)),
        Op::Div => {
            if right == 0 {
                Err(Syntax("DIVISION BY ZERO"))
            } else {
                Ok(left.wrapping_div(right))
            }
        }
        Op::Rem => {
            if right == 0 {
                Err(Syntax("DIVISION BY ZERO"))
            } else {
                Ok(left.wrapping_rem(right))
            }
        }
        Op::And => Ok(left & right),
        Op::Or => Ok(left | right),
        Op::Xor => Ok(left ^ right),
        Op::Invert | Op::Open | Op::Close => unreachable!("not a binary operator"),
    }
}
