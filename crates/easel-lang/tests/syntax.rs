//! Parser and syntax-check tests.
//!
//! Covers tree shape for each block construct and error collection through
//! the public `check()` API.

use easel_lang::syntax::ast::{Arg, CmpOp, Command, Stmt};
use easel_lang::syntax::parser::Parser;
use easel_lang::{check, ErrorKind, ScriptError};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn parse(src: &str) -> Vec<Stmt> {
    Parser::from_source(src).parse_all().unwrap_or_else(|errs| {
        panic!("expected parse to succeed, got errors: {errs:#?}");
    })
}

fn errs(src: &str) -> Vec<ScriptError> {
    match check(src) {
        Ok(())  => panic!("expected check to fail but it succeeded"),
        Err(e) => e,
    }
}

fn lines(errs: &[ScriptError]) -> Vec<usize> {
    errs.iter().map(|e| e.line).collect()
}

// ─── Tree shape ──────────────────────────────────────────────────────────────

#[test]
fn leaf_statements() {
    let stmts = parse("size = 10\nmoveto size, 20\ncall box");
    assert!(matches!(&stmts[0], Stmt::Assign { name, value: Arg::Int(10), .. } if name == "size"));
    assert!(matches!(
        &stmts[1],
        Stmt::Draw { command: Command::MoveTo(Arg::Var(v), Arg::Int(20)), .. } if v == "size"
    ));
    assert!(matches!(&stmts[2], Stmt::Call { name, .. } if name == "box"));
}

#[test]
fn if_block_holds_its_body() {
    let stmts = parse("if a >= 1\ncircle 1\nendif\ncircle 2");
    assert_eq!(stmts.len(), 2);
    let Stmt::If(i) = &stmts[0] else { panic!("expected if, got {:?}", stmts[0]) };
    assert_eq!(i.condition.op, CmpOp::GtEq);
    assert_eq!(i.body.len(), 1);
    assert_eq!(i.span.raw, "if a >= 1");
}

#[test]
fn second_if_becomes_a_sibling() {
    let stmts = parse("if a > 1\ncircle 1\nif b < 2\ncircle 2\nendif");
    assert_eq!(stmts.len(), 2);
    assert!(stmts.iter().all(|s| matches!(s, Stmt::If(i) if i.body.len() == 1)));
}

#[test]
fn endloop_closes_an_open_if_inside_the_loop() {
    let stmts = parse("loop 2\nif a > 1\ncircle 1\nendloop\ncircle 2");
    assert_eq!(stmts.len(), 2);
    let Stmt::Loop(l) = &stmts[0] else { panic!("expected loop") };
    assert!(matches!(&l.body[..], [Stmt::If(i)] if i.body.len() == 1));
}

#[test]
fn method_body_is_parsed_once() {
    let stmts = parse("method Box\nrectangle 4 4\nloop 2\ncircle 1\nendloop\nendmethod");
    let Stmt::MethodDef(m) = &stmts[0] else { panic!("expected method") };
    assert_eq!(m.name, "Box");
    assert_eq!(m.body.len(), 2);
}

#[test]
fn bad_body_line_stays_in_place() {
    let results: Vec<_> = Parser::from_source("if a > 1\ncircle 1\ndrw 1 2\nx = 1 2\nendif").collect();
    let [Ok(Stmt::If(i))] = &results[..] else { panic!("expected one if, got {results:?}") };
    assert!(matches!(&i.body[0], Stmt::Draw { .. }));
    assert!(matches!(
        &i.body[1],
        Stmt::Invalid { error, gated: true, .. } if error.kind == ErrorKind::UnknownCommand
    ));
    assert!(matches!(&i.body[2], Stmt::Invalid { gated: false, span, .. } if span.line == 4));
}

#[test]
fn stray_endif_produces_nothing() {
    assert!(parse("endif").is_empty());
}

#[test]
fn keywords_are_case_insensitive() {
    let stmts = parse("LOOP 2\nCircle 1\nEndLoop");
    assert!(matches!(&stmts[0], Stmt::Loop(l) if l.count == Arg::Int(2)));
}

// ─── Error collection ────────────────────────────────────────────────────────

#[test]
fn check_accepts_valid_script() {
    assert_eq!(check("moveto 10,10\r\ndrawto 20,20\r\n"), Ok(()));
}

#[test]
fn check_reports_every_error_in_line_order() {
    let e = errs("crcle 1\nmoveto 1\ncircle 2\nfoo");
    assert_eq!(lines(&e), vec![1, 2, 4]);
    assert_eq!(e[0].kind, ErrorKind::UnknownCommand);
    assert_eq!(e[1].kind, ErrorKind::Parse);
}

#[test]
fn check_reports_errors_inside_method_bodies() {
    let e = errs("method m\ncircle 1\ncrcle 2\nendmethod");
    assert_eq!(lines(&e), vec![3]);
}

#[test]
fn check_recovers_inside_blocks() {
    let e = errs("loop 2\ncrcle 1\nmoveto 1\nendloop\ncircle 5\nbar");
    assert_eq!(lines(&e), vec![2, 3, 6]);
}

#[test]
fn bad_header_and_bad_body_are_both_reported() {
    let e = errs("loop x y\ncrcle 1\nendloop");
    assert_eq!(lines(&e), vec![1, 2]);
}

#[test]
fn unterminated_blocks() {
    let e = errs("loop 3\ncircle 1");
    assert_eq!(e[0].kind, ErrorKind::UnterminatedBlock);
    assert_eq!(e[0].raw, "loop 3");

    let e = errs("method m\ncircle 1");
    assert_eq!(e[0].kind, ErrorKind::UnterminatedBlock);
}

#[test]
fn open_if_is_unterminated_only_interactively() {
    assert_eq!(check("if a > 1\ncircle 1"), Ok(()));
    let results: Vec<_> = Parser::from_source("if a > 1\ncircle 1").interactive().collect();
    assert!(matches!(&results[..], [Err(e)] if e.kind == ErrorKind::UnterminatedBlock));
}

#[test]
fn stray_closers_are_errors() {
    assert_eq!(errs("endloop")[0].kind, ErrorKind::Parse);
    assert_eq!(errs("endmethod")[0].kind, ErrorKind::Parse);
}

#[test]
fn methods_not_inside_loops_or_methods() {
    let e = errs("loop 2\nmethod m\ncircle 1\nendmethod\nendloop");
    assert_eq!(e[0].kind, ErrorKind::Parse);
    assert_eq!(e[0].line, 2);

    let e = errs("method a\nmethod b\ncircle 1\nendmethod\nendmethod");
    assert_eq!(e[0].line, 2);

    assert_eq!(check("if a > 1\nmethod m\ncircle 1\nendmethod\nendif"), Ok(()));
}

#[test]
fn comparison_operator_must_be_known() {
    let e = errs("if a == b\ncircle 1\nendif");
    assert!(e[0].message.contains("`==`"));
}

#[test]
fn bad_assignments() {
    for src in ["x = 1 2", "5 = 3", "circle = 4", "x = 1.5"] {
        let e = errs(src);
        assert_eq!(e[0].kind, ErrorKind::Parse, "{src}");
    }
}

#[test]
fn negative_literal_loop_count() {
    let e = errs("loop -2\ncircle 1\nendloop");
    assert!(e[0].message.contains("negative"));
}
