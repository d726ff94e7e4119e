//! End-to-end keystroke-session tests, grounded in the style of the
//! teacher's `tests/integration_tests.rs` (drive the public pipeline, assert
//! on the result) but over a `CharIoPort` session instead of a source file:
//! a Tiny BASIC program is interactive, not a static document to parse.

use tinybasic::config::Config;
use tinybasic::interpreter::Interpreter;
use tinybasic::io::{MemoryIoPort, MemoryPersistence, NullMemoryPort};

type TestInterp = Interpreter<MemoryIoPort, NullMemoryPort, MemoryPersistence>;

fn run_session(program: &str) -> TestInterp {
    let mut interp = Interpreter::new(
        Config::default(),
        MemoryIoPort::new(program.as_bytes()),
        NullMemoryPort,
        MemoryPersistence::new(),
    );
    interp.shell_loop();
    interp
}

fn output(interp: &TestInterp) -> String {
    interp.io.output_str()
}

#[test]
fn s1_accumulator_loop() {
    let interp = run_session(
        "10 LET A = 0\n20 LET A = A + 1\n30 IF A < 5 THEN GOTO 20\n40 PRINT A\nRUN\n",
    );
    assert_eq!(output(&interp), "5\n");
}

#[test]
fn s2_precedence_and_bitwise() {
    let interp = run_session(
        "PRINT 2 + 3 * 4\nPRINT (2 + 3) * 4\nPRINT 0xFF & 0x0F\nPRINT 5 | 2 ^ 3\n",
    );
    // (5|2)^3 = 7^3 = 4: same-precedence operators reduce left-to-right.
    assert_eq!(output(&interp), "14\n20\n15\n4\n");
}

#[test]
fn s3_unary_and_invert() {
    let interp = run_session("PRINT -3 * -4\nPRINT !0\n");
    assert_eq!(output(&interp), "12\n-1\n");
}

#[test]
fn s4_editing_replace_and_delete() {
    let interp = run_session(
        "10 PRINT \"A\"\n20 PRINT \"B\"\n10 PRINT \"C\"\n20\nLIST\n",
    );
    assert_eq!(output(&interp), "10 PRINT \"C\"\n");
}

#[test]
fn s5_if_false_path_skips_goto() {
    let interp = run_session("10 IF 1 = 2 THEN GOTO 99\n20 PRINT \"ok\"\nRUN\n");
    assert_eq!(output(&interp), "ok\n");
}

#[test]
fn s5_goto_missing_line_aborts_run_without_reaching_ok() {
    let interp = run_session("10 IF 1 = 1 THEN GOTO 99\n20 PRINT \"ok\"\nRUN\n");
    let out = output(&interp);
    assert!(!out.contains("ok"));
    assert!(out.contains("LINE NOT FOUND"));
}

#[test]
fn s6_literal_radixes() {
    let interp = run_session("PRINT 0b1011 + 0x10 + 011\n");
    assert_eq!(output(&interp), "36\n");
}

#[test]
fn division_by_zero_reports_an_error_and_does_not_crash() {
    let interp = run_session("PRINT 1 / 0\n");
    assert!(output(&interp).contains("DIVISION BY ZERO"));
}

#[test]
fn program_survives_across_multiple_runs_with_persistent_variables() {
    let interp = run_session("10 LET A = A + 1\nRUN\nRUN\nPRINT A\n");
    assert_eq!(output(&interp), "2\n");
}

#[test]
fn out_of_order_insertion_lists_in_ascending_order() {
    let interp = run_session("30 PRINT \"C\"\n10 PRINT \"A\"\n20 PRINT \"B\"\nLIST\n");
    assert_eq!(output(&interp), "10 PRINT \"A\"\n20 PRINT \"B\"\n30 PRINT \"C\"\n");
}

#[test]
fn input_statement_reads_a_typed_expression() {
    let interp = run_session("10 INPUT A\n20 PRINT A * 2\nRUN\n21\n");
    assert_eq!(output(&interp), "42\n");
}

#[test]
fn save_and_load_round_trip_a_program() {
    let interp = run_session(
        "10 PRINT \"HI\"\nSAVE demo.bas\nNEW\nY\nLOAD demo.bas\nLIST\n",
    );
    assert_eq!(output(&interp), "ARE YOU SURE? (Y/N) \nOK\n10 PRINT \"HI\"\n");
}
