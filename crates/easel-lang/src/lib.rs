pub mod syntax;
pub mod types;
pub mod runtime;
pub mod canvas;
pub mod config;
pub mod error;

pub use canvas::{Canvas, PenColor, PenState, Recorder, Triangle};
pub use config::Config;
pub use error::{ErrorKind, ScriptError};
pub use runtime::context::{Context, Methods, Variables};
pub use types::draw::{triangulate, DrawCommand, RenderMode, ShapeData, ShapeDesc};

use tracing::debug;

use runtime::interpreter::Interpreter;
use syntax::lexer::{split_lines, tokenize, Line};
use syntax::parser::Parser;

// ─── Public API ───────────────────────────────────────────────────────────────

/// Parse a script without running it. Returns every error found, in line order.
pub fn check(source: &str) -> Result<(), Vec<ScriptError>> {
    Parser::from_source(source).parse_all().map(|_| ())
}

/// Outcome of feeding a single line with `Session::run_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// The line (and any block it closed) has run.
    Executed,
    /// A block is still open; the line is held until it closes.
    Pending,
}

// ─── Session ──────────────────────────────────────────────────────────────────

/// One interpreter session. Variables and methods persist across submissions
/// until the session is dropped or `reset`.
///
/// Lifecycle:
///   1. `Session::new()` or `Session::with_config(config)`.
///   2. `session.run(script, canvas)` per submitted script, or
///      `session.run_line(line, canvas)` for line-by-line entry.
#[derive(Debug, Default)]
pub struct Session {
    ctx: Context,
    config: Config,
    /// Lines of an interactive block still waiting for its closer.
    pending: Vec<String>,
}

impl Session {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: Config) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn variables(&self) -> &Variables { &self.ctx.variables }

    pub fn methods(&self) -> &Methods { &self.ctx.methods }

    pub fn is_pending(&self) -> bool { !self.pending.is_empty() }

    /// Forget all variables, methods and pending lines.
    pub fn reset(&mut self) {
        self.ctx = Context::default();
        self.pending.clear();
    }

    /// Run a whole script. Stops at the first error; everything before it
    /// keeps its effect.
    pub fn run(&mut self, source: &str, canvas: &mut dyn Canvas) -> Result<(), ScriptError> {
        self.run_lines(split_lines(source), canvas)
    }

    /// Feed one line. Lines opening a block are held until the block closes,
    /// then the whole block runs as one submission.
    pub fn run_line(&mut self, line: &str, canvas: &mut dyn Canvas) -> Result<LineStatus, ScriptError> {
        if tokenize(line).is_empty() {
            return Ok(if self.is_pending() { LineStatus::Pending } else { LineStatus::Executed });
        }
        self.pending.push(line.trim().to_string());
        let lines = split_lines(&self.pending.join("\n"));

        let mut open = false;
        for result in Parser::new(lines.clone()).interactive() {
            match result {
                Err(e) if e.kind == ErrorKind::UnterminatedBlock => open = true,
                Err(e) => {
                    self.pending.clear();
                    return Err(e);
                }
                Ok(_) => {}
            }
        }
        if open {
            return Ok(LineStatus::Pending);
        }

        self.pending.clear();
        self.run_lines(lines, canvas).map(|_| LineStatus::Executed)
    }

    fn run_lines(&mut self, lines: Vec<Line>, canvas: &mut dyn Canvas) -> Result<(), ScriptError> {
        debug!(lines = lines.len(), "run");
        let mut interp = Interpreter::new(&mut self.ctx, canvas, self.config);
        let result = Parser::new(lines).try_for_each(|stmt| interp.exec_stmt(&stmt?));
        debug!(steps = interp.steps(), ok = result.is_ok(), "run finished");
        result
    }
}
