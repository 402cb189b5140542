//! Builds the statement tree from tokenized lines.
//!
//! The parser is pulled one top-level statement at a time so the interpreter
//! can run each statement before the next one is parsed: a bad line late in a
//! script does not stop the lines before it from drawing. A bad line inside a
//! block body becomes a `Stmt::Invalid` at its position, so the block still
//! runs up to that line.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::canvas::PenColor;
use crate::error::{ErrorKind, ScriptError};
use crate::syntax::ast::*;
use crate::syntax::lexer::{split_lines, Line};
use crate::syntax::token::{is_identifier, keyword, Keyword};

/// Which blocks enclose the line being parsed.
#[derive(Debug, Clone, Copy, Default)]
struct Scope {
    in_loop: bool,
    in_method: bool,
}

pub struct Parser {
    lines: Vec<Line>,
    pos: usize,
    /// Errors on block closer lines, placed right after the block.
    trailing: Vec<ScriptError>,
    /// Errors inside bodies that were dropped because their block failed.
    /// Only `parse_all` reports them.
    diagnostics: Vec<ScriptError>,
    /// Errors waiting to be handed out by `next`.
    deferred: VecDeque<ScriptError>,
    /// When set, an `if` still open at the end of input is reported as
    /// unterminated instead of being closed implicitly.
    interactive: bool,
}

impl Parser {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            pos: 0,
            trailing: Vec::new(),
            diagnostics: Vec::new(),
            deferred: VecDeque::new(),
            interactive: false,
        }
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(split_lines(source))
    }

    /// Treat every open block, including `if`, as incomplete at end of input.
    /// Used for line-by-line entry where more lines are still to come.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Parse everything, collecting every error in line order instead of
    /// stopping at the first.
    pub fn parse_all(mut self) -> Result<Vec<Stmt>, Vec<ScriptError>> {
        let mut stmts = Vec::new();
        let mut errors = Vec::new();
        for item in self.by_ref() {
            match item {
                Ok(s) => {
                    s.collect_errors(&mut errors);
                    stmts.push(s);
                }
                Err(e) => errors.push(e),
            }
        }
        errors.append(&mut self.diagnostics);
        if errors.is_empty() {
            return Ok(stmts);
        }
        errors.sort_by_key(|e| e.line);
        Err(errors)
    }

    // ─── Primitives ──────────────────────────────────────────────────────────

    fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    fn advance(&mut self) -> Line {
        let line = self.lines[self.pos].clone();
        self.pos += 1;
        line
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    // ─── Statements ──────────────────────────────────────────────────────────

    /// Parses the line at the cursor. `Ok(None)` means the line is consumed but
    /// produces nothing (a stray `endif`).
    fn parse_stmt(&mut self, scope: Scope) -> Result<Option<Stmt>, ScriptError> {
        let line = self.advance();

        if line.is_assignment() {
            return parse_assign(&line).map(Some);
        }

        let word = line.keyword();
        let Some(kw) = keyword(&word) else {
            return Err(err(ErrorKind::UnknownCommand, &line, format!(
                "unknown command `{word}`; valid commands are: {}", Keyword::listing()
            )));
        };

        match kw {
            Keyword::If        => self.parse_if(line, scope).map(Some),
            Keyword::Loop      => self.parse_loop(line, scope).map(Some),
            Keyword::Method    => self.parse_method(line, scope).map(Some),
            Keyword::EndIf     => {
                // An `endif` with nothing open resets a flag that is already clear.
                check_argc(&line, kw, 0)?;
                Ok(None)
            }
            Keyword::EndLoop | Keyword::EndMethod => {
                let opener = if kw == Keyword::EndLoop { "loop" } else { "method" };
                Err(err(ErrorKind::Parse, &line, format!("`{}` without a matching `{opener}`", kw.as_str())))
            }
            Keyword::Call => {
                check_argc(&line, kw, 1)?;
                let name = parse_name(&line, kw, &line.tokens[1])?;
                Ok(Some(Stmt::Call { name, span: span_of(&line) }))
            }
            _ => {
                let command = parse_command(kw, &line)?;
                Ok(Some(Stmt::Draw { command, span: span_of(&line) }))
            }
        }
    }

    fn parse_if(&mut self, line: Line, scope: Scope) -> Result<Stmt, ScriptError> {
        let condition = parse_condition(&line);
        let body = self.parse_body(&line, Keyword::If, scope);
        let (condition, body) = self.join(condition, body)?;
        Ok(Stmt::If(IfStmt { condition, body, span: span_of(&line) }))
    }

    fn parse_loop(&mut self, line: Line, scope: Scope) -> Result<Stmt, ScriptError> {
        let count = if scope.in_loop {
            Err(err(ErrorKind::Parse, &line, "a loop cannot be nested inside another loop"))
        } else {
            parse_loop_count(&line)
        };
        let body = self.parse_body(&line, Keyword::Loop, Scope { in_loop: true, ..scope });
        let (count, body) = self.join(count, body)?;
        Ok(Stmt::Loop(LoopStmt { count, body, span: span_of(&line) }))
    }

    fn parse_method(&mut self, line: Line, scope: Scope) -> Result<Stmt, ScriptError> {
        let name = if scope.in_loop || scope.in_method {
            Err(err(ErrorKind::Parse, &line, "methods cannot be defined inside a loop or another method"))
        } else {
            check_argc(&line, Keyword::Method, 1)
                .and_then(|_| parse_name(&line, Keyword::Method, &line.tokens[1]))
        };
        let body = self.parse_body(&line, Keyword::Method, Scope { in_method: true, ..scope });
        let (name, body) = self.join(name, body)?;
        Ok(Stmt::MethodDef(MethodDef { name, body: Rc::new(body), span: span_of(&line) }))
    }

    /// Combines a block header with its body. When the header failed, the
    /// body's own errors are kept for `parse_all`.
    fn join<T>(
        &mut self,
        header: Result<T, ScriptError>,
        body: Result<Vec<Stmt>, ScriptError>,
    ) -> Result<(T, Vec<Stmt>), ScriptError> {
        match (header, body) {
            (Ok(h), Ok(b)) => Ok((h, b)),
            (Ok(_), Err(e)) => Err(e),
            (Err(h), Ok(b)) => {
                self.discard(&b);
                Err(h)
            }
            (Err(h), Err(b)) => {
                self.diagnostics.push(b);
                Err(h)
            }
        }
    }

    fn discard(&mut self, body: &[Stmt]) {
        for stmt in body {
            stmt.collect_errors(&mut self.diagnostics);
        }
    }

    /// Parses lines up to the closer of `opener`. A line that fails becomes a
    /// `Stmt::Invalid` in place and parsing carries on to the closer, so the
    /// caller resumes after the whole block.
    fn parse_body(&mut self, header: &Line, opener: Keyword, scope: Scope) -> Result<Vec<Stmt>, ScriptError> {
        let mut body = Vec::new();

        while let Some(line) = self.peek() {
            let kw = keyword(&line.keyword()).filter(|_| !line.is_assignment());
            // Drawing lines and unknown commands are skipped under a false `if`.
            let gated = !line.is_assignment() && kw.is_none_or(|k| !k.is_control());
            match (opener, kw) {
                (Keyword::If, Some(Keyword::EndIf))
                | (Keyword::Loop, Some(Keyword::EndLoop))
                | (Keyword::Method, Some(Keyword::EndMethod)) => {
                    let closer = self.advance();
                    if let Err(e) = check_argc(&closer, kw.unwrap_or(opener), 0) {
                        self.trailing.push(e);
                    }
                    return Ok(body);
                }
                // A new `if` replaces the open one instead of nesting in it.
                (Keyword::If, Some(Keyword::If)) => return Ok(body),
                // The enclosing block closes; the open `if` ends with it.
                (Keyword::If, Some(Keyword::EndLoop)) if scope.in_loop => return Ok(body),
                (Keyword::If, Some(Keyword::EndMethod)) if scope.in_method => return Ok(body),
                _ => {}
            }

            match self.parse_stmt(scope) {
                Ok(Some(stmt)) => body.push(stmt),
                Ok(None) => {}
                Err(error) => body.push(invalid(error, gated)),
            }
            body.extend(self.trailing.drain(..).map(|e| invalid(e, false)));
        }

        if opener == Keyword::If && !self.interactive {
            return Ok(body);
        }
        self.discard(&body);
        let closer = match opener {
            Keyword::If   => "endif",
            Keyword::Loop => "endloop",
            _             => "endmethod",
        };
        Err(err(ErrorKind::UnterminatedBlock, header, format!(
            "`{}` is never closed; expected `{closer}`", opener.as_str()
        )))
    }
}

impl Iterator for Parser {
    type Item = Result<Stmt, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.deferred.pop_front() {
                return Some(Err(e));
            }
            if self.is_at_end() {
                return None;
            }

            let result = self.parse_stmt(Scope::default());
            self.deferred.extend(self.trailing.drain(..));
            match result {
                Ok(Some(stmt)) => return Some(Ok(stmt)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

// ─── Line parsers ────────────────────────────────────────────────────────────

fn span_of(line: &Line) -> Span {
    Span::new(line.number, line.raw.clone())
}

fn err(kind: ErrorKind, line: &Line, message: impl Into<String>) -> ScriptError {
    ScriptError::new(kind, line.number, line.raw.clone(), message)
}

fn invalid(error: ScriptError, gated: bool) -> Stmt {
    let span = Span::new(error.line, error.raw.clone());
    Stmt::Invalid { error, gated, span }
}

fn check_argc(line: &Line, kw: Keyword, expected: usize) -> Result<(), ScriptError> {
    let got = line.args().len();
    if got == expected {
        return Ok(());
    }
    let plural = if expected == 1 { "" } else { "s" };
    Err(err(ErrorKind::Parse, line, format!(
        "`{}` expects {expected} argument{plural}, got {got}; {}", kw.as_str(), kw.usage()
    )))
}

/// Integer literal or variable name.
fn parse_arg(line: &Line, usage: &str, token: &str) -> Result<Arg, ScriptError> {
    if let Ok(n) = token.parse::<i32>() {
        return Ok(Arg::Int(n));
    }
    if is_identifier(token) {
        return Ok(Arg::Var(token.to_string()));
    }
    let digits = token.trim_start_matches(['-', '+']);
    let looks_numeric = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    let reason = if looks_numeric { "is out of range" } else { "is not a number or variable name" };
    Err(err(ErrorKind::Parse, line, format!("`{token}` {reason}; {usage}")))
}

fn parse_args(line: &Line, kw: Keyword, expected: usize) -> Result<Vec<Arg>, ScriptError> {
    check_argc(line, kw, expected)?;
    line.args().iter().map(|t| parse_arg(line, kw.usage(), t)).collect()
}

fn parse_name(line: &Line, kw: Keyword, token: &str) -> Result<String, ScriptError> {
    if is_identifier(token) {
        Ok(token.to_string())
    } else {
        Err(err(ErrorKind::Parse, line, format!("`{token}` is not a valid name; {}", kw.usage())))
    }
}

fn parse_assign(line: &Line) -> Result<Stmt, ScriptError> {
    const USAGE: &str = "usage: <name> = <number|variable>";
    if line.tokens.len() != 3 {
        return Err(err(ErrorKind::Parse, line, format!(
            "assignment takes exactly one value; {USAGE}"
        )));
    }
    let name = &line.tokens[0];
    if !is_identifier(name) {
        return Err(err(ErrorKind::Parse, line, format!("`{name}` is not a valid variable name; {USAGE}")));
    }
    if keyword(&name.to_lowercase()).is_some() {
        return Err(err(ErrorKind::Parse, line, format!("`{name}` is a command and cannot be used as a variable")));
    }
    let value = parse_arg(line, USAGE, &line.tokens[2])?;
    Ok(Stmt::Assign { name: name.clone(), value, span: span_of(line) })
}

fn parse_condition(line: &Line) -> Result<Condition, ScriptError> {
    let kw = Keyword::If;
    check_argc(line, kw, 3)?;
    let args = line.args();
    let op = CmpOp::from_symbol(&args[1]).ok_or_else(|| err(ErrorKind::Parse, line, format!(
        "`{}` is not a comparison operator; {}", args[1], kw.usage()
    )))?;
    Ok(Condition {
        left: parse_arg(line, kw.usage(), &args[0])?,
        op,
        right: parse_arg(line, kw.usage(), &args[2])?,
    })
}

fn parse_loop_count(line: &Line) -> Result<Arg, ScriptError> {
    let mut args = parse_args(line, Keyword::Loop, 1)?;
    let count = args.remove(0);
    if let Arg::Int(n) = count {
        if n < 0 {
            return Err(err(ErrorKind::Parse, line, format!(
                "loop count must not be negative, got {n}; {}", Keyword::Loop.usage()
            )));
        }
    }
    Ok(count)
}

fn parse_command(kw: Keyword, line: &Line) -> Result<Command, ScriptError> {
    let command = match kw {
        Keyword::MoveTo => {
            let [x, y] = take(parse_args(line, kw, 2)?);
            Command::MoveTo(x, y)
        }
        Keyword::DrawTo => {
            let [x, y] = take(parse_args(line, kw, 2)?);
            Command::DrawTo(x, y)
        }
        Keyword::Pen => {
            check_argc(line, kw, 1)?;
            let word = line.args()[0].to_lowercase();
            let color = PenColor::from_name(&word).ok_or_else(|| err(ErrorKind::Parse, line, format!(
                "unknown pen color `{word}`; {}", kw.usage()
            )))?;
            Command::Pen(color)
        }
        Keyword::Fill => {
            check_argc(line, kw, 1)?;
            match line.args()[0].to_lowercase().as_str() {
                "on"  => Command::Fill(true),
                "off" => Command::Fill(false),
                other => return Err(err(ErrorKind::Parse, line, format!(
                    "unknown fill mode `{other}`; {}", kw.usage()
                ))),
            }
        }
        Keyword::Clear => { check_argc(line, kw, 0)?; Command::Clear }
        Keyword::Reset => { check_argc(line, kw, 0)?; Command::Reset }
        Keyword::Circle => {
            let [r] = take(parse_args(line, kw, 1)?);
            Command::Circle(r)
        }
        Keyword::Rectangle => {
            let [w, h] = take(parse_args(line, kw, 2)?);
            Command::Rectangle(w, h)
        }
        Keyword::Triangle => {
            let [adj, base, hyp] = take(parse_args(line, kw, 3)?);
            Command::Triangle(adj, base, hyp)
        }
        Keyword::DrawShape => {
            let n = line.args().len();
            if n == 0 {
                return Err(err(ErrorKind::Parse, line, format!(
                    "`drawshape` needs at least one value; {}", kw.usage()
                )));
            }
            if n > 3 && n % 2 != 0 {
                return Err(err(ErrorKind::Parse, line, format!(
                    "a polygon needs x/y pairs, got {n} values; {}", kw.usage()
                )));
            }
            let args = line.args().iter()
                .map(|t| parse_arg(line, kw.usage(), t))
                .collect::<Result<_, _>>()?;
            Command::DrawShape(args)
        }
        _ => unreachable!("control keywords are handled by the statement parser"),
    };
    Ok(command)
}

/// Moves a vector whose length `check_argc` has already fixed into an array.
fn take<const N: usize>(args: Vec<Arg>) -> [Arg; N] {
    match args.try_into() {
        Ok(arr) => arr,
        Err(_) => unreachable!("argument count checked before conversion"),
    }
}
