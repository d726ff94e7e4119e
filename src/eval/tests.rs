use super::*;

fn solve(expr: &str) -> Result<i32, InterpError> {
    let vars = Variables::new();
    evaluate(expr.as_bytes(), &vars, 64, Span::NONE, expr)
}

fn solve_with(expr: &str, vars: &Variables) -> Result<i32, InterpError> {
    evaluate(expr.as_bytes(), vars, 64, Span::NONE, expr)
}

#[test]
fn simple_precedence() {
    assert_eq!(solve("2 + 3 * 4").unwrap(), 14);
}

#[test]
fn parens_override_precedence() {
    assert_eq!(solve("(2 + 3) * 4").unwrap(), 20);
}

#[test]
fn bitwise_and() {
    assert_eq!(solve("0xFF & 0x0F").unwrap(), 0x0F);
}

#[test]
fn bitwise_same_precedence_is_left_to_right() {
    // (5|2)^3 = 7^3 = 4, not right-to-left (5|2)^3 vs 5|(2^3)=5|1=5.
    assert_eq!(solve("5 | 2 ^ 3").unwrap(), 4);
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(solve("10 - 2 - 3").unwrap(), 5);
}

#[test]
fn division_is_left_associative() {
    assert_eq!(solve("100 / 10 / 2").unwrap(), 5);
}

#[test]
fn unary_minus_and_multiplication() {
    assert_eq!(solve("-3 * -4").unwrap(), 12);
}

#[test]
fn unary_invert() {
    assert_eq!(solve("!0").unwrap(), -1);
}

#[test]
fn unary_plus_is_a_no_op() {
    assert_eq!(solve("+5").unwrap(), 5);
}

#[test]
fn chained_unary_is_a_syntax_error() {
    assert!(solve("--5").is_err());
}

#[test]
fn mixed_radix_literals() {
    assert_eq!(solve("0b1011 + 0x10 + 011").unwrap(), 11 + 16 + 9);
}

#[test]
fn variable_reference() {
    let mut vars = Variables::new();
    vars.set(b'A', 7);
    assert_eq!(solve_with("A + 1", &vars).unwrap(), 8);
}

#[test]
fn unbalanced_open_paren_is_syntax_error() {
    assert!(solve("(1 + 2").is_err());
}

#[test]
fn unbalanced_close_paren_is_syntax_error() {
    assert!(solve("1 + 2)").is_err());
}

#[test]
fn division_by_zero_is_an_error() {
    assert!(solve("1 / 0").is_err());
}

#[test]
fn modulo() {
    assert_eq!(solve("17 % 5").unwrap(), 2);
}

#[test]
fn unknown_byte_is_a_syntax_error() {
    assert!(solve("1 @ 2").is_err());
}

#[test]
fn nested_parens() {
    assert_eq!(solve("((1 + 2) * (3 + 4))").unwrap(), 21);
}

#[test]
fn empty_expression_is_a_syntax_error() {
    assert!(solve("").is_err());
}
