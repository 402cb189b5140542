//! Tree-walking evaluator. Control flow (conditions, loops, method calls)
//! lives here; drawing commands go through `dispatch`.
//!
//! A false `if` closes the drawing gate for its body. Assignments, loops,
//! method definitions and calls inside it are still evaluated; only drawing
//! commands (and bad lines that would have been drawing commands) are skipped.

use tracing::debug;

use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::{ErrorKind, ScriptError};
use crate::runtime::context::Context;
use crate::runtime::dispatch::{dispatch, resolve};
use crate::syntax::ast::{Condition, IfStmt, LoopStmt, MethodDef, Span, Stmt};

pub struct Interpreter<'a> {
    ctx: &'a mut Context,
    canvas: &'a mut dyn Canvas,
    config: Config,
    steps: u64,
    /// Cleared while inside the body of a false `if`.
    active: bool,
    /// Lower-cased names of the methods currently executing, outermost first.
    call_stack: Vec<String>,
}

impl<'a> Interpreter<'a> {
    pub fn new(ctx: &'a mut Context, canvas: &'a mut dyn Canvas, config: Config) -> Self {
        Self { ctx, canvas, config, steps: 0, active: true, call_stack: Vec::new() }
    }

    /// Statements evaluated so far.
    pub fn steps(&self) -> u64 { self.steps }

    fn err(span: &Span, kind: ErrorKind, msg: impl Into<String>) -> ScriptError {
        ScriptError::new(kind, span.line, span.raw.clone(), msg)
    }

    // ─── Statements ───────────────────────────────────────────────────────────

    pub fn exec_block(&mut self, stmts: &[Stmt]) -> Result<(), ScriptError> {
        for stmt in stmts {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), ScriptError> {
        self.tick(stmt.span())?;

        match stmt {
            Stmt::Assign { name, value, span } => {
                let v = resolve(value, &self.ctx.variables, span, None)?;
                self.ctx.variables.set(name, v);
            }

            Stmt::Draw { command, span } => {
                if self.active {
                    dispatch(command, span, &self.ctx.variables, self.canvas)?;
                }
            }

            Stmt::If(IfStmt { condition, body, span }) => {
                let holds = self.eval_condition(condition, span)?;
                let outer = self.active;
                self.active = outer && holds;
                let result = self.exec_block(body);
                self.active = outer;
                result?;
            }

            Stmt::Loop(LoopStmt { count, body, span }) => {
                let n = resolve(count, &self.ctx.variables, span, None)?;
                if n < 0 {
                    return Err(Self::err(span, ErrorKind::Parse, format!(
                        "loop count must not be negative, got {n}"
                    )));
                }
                for _ in 0..n {
                    self.exec_block(body)?;
                }
            }

            Stmt::MethodDef(MethodDef { name, body, span }) => {
                if !self.ctx.methods.define(name, body.clone()) {
                    return Err(Self::err(span, ErrorKind::DuplicateDefinition, format!(
                        "method `{name}` is already defined"
                    )));
                }
                debug!(method = %name, lines = body.len(), "method defined");
            }

            Stmt::Call { name, span } => self.call(name, span)?,

            Stmt::Invalid { error, gated, .. } => {
                if self.active || !*gated {
                    return Err(error.clone());
                }
            }
        }
        Ok(())
    }

    fn tick(&mut self, span: &Span) -> Result<(), ScriptError> {
        self.steps += 1;
        if self.steps > self.config.max_steps {
            return Err(Self::err(span, ErrorKind::StepLimit, format!(
                "stopped after {} steps", self.config.max_steps
            )));
        }
        Ok(())
    }

    // ─── Calls ────────────────────────────────────────────────────────────────

    fn call(&mut self, name: &str, span: &Span) -> Result<(), ScriptError> {
        let Some(body) = self.ctx.methods.get(name) else {
            return Err(Self::err(span, ErrorKind::UnknownMethod, format!("method `{name}` is not defined")));
        };

        let key = name.to_lowercase();
        if self.call_stack.contains(&key) {
            let mut chain = self.call_stack.clone();
            chain.push(key);
            return Err(Self::err(span, ErrorKind::CyclicCall, format!(
                "method `{name}` calls itself: {}", chain.join(" -> ")
            )));
        }
        if self.call_stack.len() >= self.config.max_call_depth {
            return Err(Self::err(span, ErrorKind::StepLimit, format!(
                "call depth limit of {} reached", self.config.max_call_depth
            )));
        }

        debug!(method = %key, depth = self.call_stack.len(), "call");
        self.call_stack.push(key);
        let result = self.exec_block(&body);
        self.call_stack.pop();
        result
    }

    // ─── Conditions ───────────────────────────────────────────────────────────

    fn eval_condition(&self, cond: &Condition, span: &Span) -> Result<bool, ScriptError> {
        let l = resolve(&cond.left, &self.ctx.variables, span, None)?;
        let r = resolve(&cond.right, &self.ctx.variables, span, None)?;
        Ok(cond.op.apply(l, r))
    }
}
