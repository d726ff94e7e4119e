use super::*;

fn store() -> CodeStore {
    CodeStore::new(DEFAULT_CODE_MEMORY_SIZE, DEFAULT_MAX_LINENUM)
}

fn type_line(s: &mut CodeStore, text: &str) {
    for &b in text.as_bytes() {
        assert!(s.pending_push(b));
    }
}

fn bodies(s: &CodeStore) -> Vec<(u16, String)> {
    s.iter()
        .map(|(n, b)| (n, String::from_utf8_lossy(b).to_string()))
        .collect()
}

#[test]
fn insert_ascending_order_regardless_of_entry_order() {
    let mut s = store();
    for line in ["20 PRINT 2", "10 PRINT 1", "30 PRINT 3"] {
        type_line(&mut s, line);
        s.store_pending_line().unwrap();
    }
    assert_eq!(
        bodies(&s),
        vec![
            (10, "PRINT 1".to_string()),
            (20, "PRINT 2".to_string()),
            (30, "PRINT 3".to_string()),
        ]
    );
}

#[test]
fn reinsert_same_line_replaces() {
    let mut s = store();
    type_line(&mut s, "10 PRINT 1");
    s.store_pending_line().unwrap();
    let size_before = s.code_end();

    type_line(&mut s, "10 PRINT 99999");
    s.store_pending_line().unwrap();

    assert_eq!(bodies(&s), vec![(10, "PRINT 99999".to_string())]);
    assert_eq!(s.code_end(), size_before + "PRINT 99999".len() - "PRINT 1".len());
}

#[test]
fn empty_body_deletes_line() {
    let mut s = store();
    type_line(&mut s, "10 PRINT 1");
    s.store_pending_line().unwrap();
    type_line(&mut s, "20 PRINT 2");
    s.store_pending_line().unwrap();

    type_line(&mut s, "10");
    s.store_pending_line().unwrap();

    assert_eq!(bodies(&s), vec![(20, "PRINT 2".to_string())]);
}

#[test]
fn code_end_tracks_sum_of_record_sizes() {
    let mut s = store();
    for line in ["10 LET A = 1", "20 PRINT A", "5 REM HELLO"] {
        type_line(&mut s, line);
        s.store_pending_line().unwrap();
    }
    let expected: usize = s.iter().map(|(_, b)| b.len() + 3).sum();
    assert_eq!(s.code_end(), expected);
}

#[test]
fn rejects_line_number_zero() {
    let mut s = store();
    type_line(&mut s, "0 PRINT 1");
    let err = s.store_pending_line().unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLineNumber);
}

#[test]
fn rejects_line_number_at_max() {
    let mut s = store();
    type_line(&mut s, "10000 PRINT 1");
    let err = s.store_pending_line().unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLineNumber);
}

#[test]
fn out_of_memory_when_body_does_not_fit() {
    // A single-digit line number costs 1 typed byte but the stored record
    // needs linenum(2) + NUL(1) = 3, one more than the digit + following
    // space it replaces — so a buffer sized to exactly hold the typed text
    // is one byte too small once it's packed into a record.
    let line = "5 PRINT 123456789";
    let mut s = CodeStore::new(line.len(), DEFAULT_MAX_LINENUM);
    type_line(&mut s, line);
    let err = s.store_pending_line().unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfMemory);
}

#[test]
fn leading_zero_line_number_is_decimal_not_octal() {
    let mut s = store();
    type_line(&mut s, "010 PRINT 1");
    s.store_pending_line().unwrap();
    assert_eq!(bodies(&s), vec![(10, "PRINT 1".to_string())]);
}

#[test]
fn trailing_whitespace_stripped_from_body() {
    let mut s = store();
    type_line(&mut s, "10 PRINT 1   ");
    s.store_pending_line().unwrap();
    assert_eq!(bodies(&s), vec![(10, "PRINT 1".to_string())]);
}

#[test]
fn find_line_sentinel_for_missing_line() {
    let s = store();
    assert_eq!(s.find_line(5), s.code_end() + 2);
}

#[test]
fn backspace_erases_pending_byte() {
    let mut s = store();
    type_line(&mut s, "10 PRINT");
    assert!(s.pending_backspace());
    assert_eq!(s.pending(), b"10 PRIN");
    s.pending_reset();
    assert!(!s.pending_backspace());
}

#[test]
fn clear_wipes_store() {
    let mut s = store();
    type_line(&mut s, "10 PRINT 1");
    s.store_pending_line().unwrap();
    s.clear();
    assert_eq!(s.code_end(), 0);
    assert!(s.iter().next().is_none());
}

#[test]
fn body_longer_than_a_small_fixed_cap_is_accepted_if_it_fits() {
    // REM bodies well past the historical 256-byte staging size used to be
    // rejected even though DEFAULT_CODE_MEMORY_SIZE has room to spare.
    let mut s = store();
    let long_comment = "X".repeat(500);
    type_line(&mut s, &format!("10 REM {long_comment}"));
    s.store_pending_line().unwrap();
    assert_eq!(bodies(&s), vec![(10, format!("REM {long_comment}"))]);
}
