use std::rc::Rc;

use crate::canvas::PenColor;
use crate::error::ScriptError;

/// Where a statement came from, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub line: usize,
    pub raw: String,
}

impl Span {
    pub fn new(line: usize, raw: impl Into<String>) -> Self {
        Self { line, raw: raw.into() }
    }
}

// ─── Values ──────────────────────────────────────────────────────────────────

/// A numeric argument: an integer literal or a variable looked up at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i32),
    Var(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp { Lt, Gt, Eq, GtEq, LtEq, NotEq }

impl CmpOp {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "<"  => Some(Self::Lt),
            ">"  => Some(Self::Gt),
            "="  => Some(Self::Eq),
            ">=" => Some(Self::GtEq),
            "<=" => Some(Self::LtEq),
            "!=" => Some(Self::NotEq),
            _    => None,
        }
    }

    pub fn apply(self, l: i32, r: i32) -> bool {
        match self {
            Self::Lt    => l < r,
            Self::Gt    => l > r,
            Self::Eq    => l == r,
            Self::GtEq  => l >= r,
            Self::LtEq  => l <= r,
            Self::NotEq => l != r,
        }
    }
}

/// `<left> <op> <right>`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: Arg,
    pub op: CmpOp,
    pub right: Arg,
}

// ─── Commands ────────────────────────────────────────────────────────────────

/// A drawing command with its arguments still unevaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MoveTo(Arg, Arg),
    DrawTo(Arg, Arg),
    Pen(PenColor),
    Fill(bool),
    Clear,
    Reset,
    Circle(Arg),
    Rectangle(Arg, Arg),
    Triangle(Arg, Arg, Arg),
    DrawShape(Vec<Arg>),
}

// ─── Statements ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `x = 5` or `x = y`
    Assign { name: String, value: Arg, span: Span },
    /// `circle 10`, `moveto x y`, …
    Draw { command: Command, span: Span },
    /// `if a > b` … `endif`
    If(IfStmt),
    /// `loop n` … `endloop`
    Loop(LoopStmt),
    /// `method name` … `endmethod`
    MethodDef(MethodDef),
    /// `call name`
    Call { name: String, span: Span },
    /// A line inside a block body that failed to parse. It is raised when
    /// execution reaches it; `gated` lines are skipped under a false `if`.
    Invalid { error: ScriptError, gated: bool, span: Span },
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Assign { span, .. }
            | Stmt::Draw { span, .. }
            | Stmt::Call { span, .. }
            | Stmt::Invalid { span, .. } => span,
            Stmt::If(i)        => &i.span,
            Stmt::Loop(l)      => &l.span,
            Stmt::MethodDef(m) => &m.span,
        }
    }

    /// Appends the errors of every `Invalid` statement in this subtree.
    pub fn collect_errors(&self, out: &mut Vec<ScriptError>) {
        let body: &[Stmt] = match self {
            Stmt::Invalid { error, .. } => {
                out.push(error.clone());
                return;
            }
            Stmt::If(i)        => &i.body,
            Stmt::Loop(l)      => &l.body,
            Stmt::MethodDef(m) => &m.body,
            _ => return,
        };
        for stmt in body {
            stmt.collect_errors(out);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Condition,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopStmt {
    pub count: Arg,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Bodies are shared with the method registry, so a call does not copy them.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub body: Rc<Vec<Stmt>>,
    pub span: Span,
}
