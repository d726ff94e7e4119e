//! Numeric literal reader (spec.md §4.1).
//!
//! Parses decimal, `0b…` binary, `0x…` hex, and leading-zero octal integer
//! literals out of a byte span. Mirrors the teacher lexer's
//! `lex_decimal`/`lex_hex`/`lex_binary` family: scan a run of alphanumerics,
//! pick a radix from its prefix, parse digit-by-digit rather than handing
//! the slice to a generic parser. Unlike the teacher's `u16_to_twos_complement`
//! helper (which exists because LC-3 literals are always 16-bit), this
//! reader produces a plain `i32` — Tiny BASIC has no fixed literal width.
//!
//! The digit loop walks a *category* (ASCII digit for decimal/octal/binary,
//! ASCII hex digit for hex), not the radix itself, matching
//! `get_literal_number` in the reference interpreter: a byte outside the
//! category simply ends the digit loop rather than erroring, so `12a4`
//! reads as `12` with the scan stopping at `a`. `error` is reserved for a
//! byte that's in-category but out of range for the radix — `018` (octal)
//! or `0b12` (binary) — which the reference implementation does treat as a
//! hard error. `consumed` always spans the *whole* alphanumeric run
//! (digits plus whatever follows them in-run), since that's what a caller
//! tokenizing an expression advances past regardless of how many of those
//! bytes actually contributed to the value.
//!
//! Leading `+`/`-` is never consumed here; the evaluator's unary-resolution
//! phase (spec.md §4.3 Phase 2) owns sign handling.

/// Outcome of reading one literal starting at the front of `span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralResult {
    pub value: i32,
    pub error: bool,
    /// Number of bytes consumed from the front of `span` (the run of
    /// alphanumerics that made up the literal).
    pub consumed: usize,
}

#[inline]
fn is_alnum(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Read one literal from the front of `span`. `span` need not be
/// NUL-terminated; the run of alphanumeric bytes determines its extent.
#[must_use]
pub fn read_literal(span: &[u8]) -> LiteralResult {
    let run_len = span.iter().take_while(|&&b| is_alnum(b)).count();
    let run = &span[..run_len];

    let (digits, radix) = if run_len > 2 && run[0] == b'0' && run[1] == b'b' {
        (&run[2..], 2)
    } else if run_len > 2 && run[0] == b'0' && run[1] == b'x' {
        (&run[2..], 16)
    } else if run_len > 1 && run[0] == b'0' {
        (&run[1..], 8)
    } else {
        (run, 10)
    };

    let (value, error) = parse_radix(digits, radix);

    LiteralResult { value: if error { 0 } else { value }, error, consumed: run_len }
}

/// Walk `digits` accumulating a value in `radix`, stopping (not erroring) at
/// the first byte outside the digit category, but erroring on a byte that's
/// category-valid yet out of range for the radix (`018` octal, `0b12`
/// binary).
fn parse_radix(digits: &[u8], radix: u32) -> (i32, bool) {
    let mut value: i32 = 0;

    for &b in digits {
        let in_category = if radix == 16 { (b as char).is_ascii_hexdigit() } else { b.is_ascii_digit() };
        if !in_category {
            break;
        }
        let digit = (b as char).to_digit(16).expect("category check above guarantees a hex digit");
        if digit >= radix {
            return (0, true);
        }
        value = value.wrapping_mul(radix as i32).wrapping_add(digit as i32);
    }

    (value, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal() {
        let r = read_literal(b"1234rest");
        assert_eq!(r, LiteralResult { value: 1234, error: false, consumed: 4 });
    }

    #[test]
    fn binary_prefix() {
        let r = read_literal(b"0b1011");
        assert_eq!(r.value, 0b1011);
        assert!(!r.error);
        assert_eq!(r.consumed, 6);
    }

    #[test]
    fn hex_prefix_mixed_case() {
        let r = read_literal(b"0x1Ff");
        assert_eq!(r.value, 0x1FF);
        assert!(!r.error);
    }

    #[test]
    fn octal_leading_zero() {
        let r = read_literal(b"011");
        assert_eq!(r.value, 0o11);
        assert!(!r.error);
    }

    #[test]
    fn bare_zero_is_decimal() {
        let r = read_literal(b"0");
        assert_eq!(r.value, 0);
        assert!(!r.error);
        assert_eq!(r.consumed, 1);
    }

    #[test]
    fn stray_digit_out_of_radix_errors() {
        // '2' is a valid ASCII digit (so the binary loop doesn't just stop)
        // but out of range for radix 2.
        let r = read_literal(b"0b102");
        assert!(r.error);
        assert_eq!(r.value, 0);
    }

    #[test]
    fn octal_digit_out_of_range_errors() {
        let r = read_literal(b"018");
        assert!(r.error);
        assert_eq!(r.value, 0);
    }

    #[test]
    fn non_digit_byte_stops_the_scan_without_erroring() {
        // 'a' isn't an ASCII digit, so the decimal loop just stops there;
        // the whole alphanumeric run is still consumed.
        let r = read_literal(b"12a4");
        assert!(!r.error);
        assert_eq!(r.value, 12);
        assert_eq!(r.consumed, 4);
    }

    #[test]
    fn stops_at_non_alnum() {
        let r = read_literal(b"42+7");
        assert_eq!(r.consumed, 2);
        assert_eq!(r.value, 42);
    }
}
