//! Drawing commands → canvas calls.

use tracing::trace;

use crate::canvas::{Canvas, Triangle};
use crate::error::{ErrorKind, ScriptError};
use crate::runtime::context::Variables;
use crate::syntax::ast::{Arg, Command, Span};
use crate::syntax::token::Keyword;

/// Evaluates an argument against the variable store.
/// `usage`, when given, is appended to the "unknown variable" message.
pub(crate) fn resolve(arg: &Arg, vars: &Variables, span: &Span, usage: Option<&str>) -> Result<i32, ScriptError> {
    match arg {
        Arg::Int(n) => Ok(*n),
        Arg::Var(name) => vars.get(name).ok_or_else(|| {
            let message = match usage {
                Some(usage) => format!("unknown variable `{name}`; {usage}"),
                None        => format!("unknown variable `{name}`"),
            };
            ScriptError::new(ErrorKind::UnknownVariable, span.line, span.raw.clone(), message)
        }),
    }
}

fn keyword_of(command: &Command) -> Keyword {
    match command {
        Command::MoveTo(..)    => Keyword::MoveTo,
        Command::DrawTo(..)    => Keyword::DrawTo,
        Command::Pen(_)        => Keyword::Pen,
        Command::Fill(_)       => Keyword::Fill,
        Command::Clear         => Keyword::Clear,
        Command::Reset         => Keyword::Reset,
        Command::Circle(_)     => Keyword::Circle,
        Command::Rectangle(..) => Keyword::Rectangle,
        Command::Triangle(..)  => Keyword::Triangle,
        Command::DrawShape(_)  => Keyword::DrawShape,
    }
}

/// Runs one drawing command.
pub fn dispatch(command: &Command, span: &Span, vars: &Variables, canvas: &mut dyn Canvas) -> Result<(), ScriptError> {
    let kw = keyword_of(command);
    let usage = kw.usage();
    let val = |arg: &Arg| resolve(arg, vars, span, Some(usage));
    trace!(line = span.line, command = kw.as_str(), "dispatch");

    match command {
        Command::MoveTo(x, y) => canvas.set_pen_position(val(x)?, val(y)?),
        Command::DrawTo(x, y) => canvas.draw_line_to(val(x)?, val(y)?),
        Command::Pen(color)   => canvas.set_pen_color(*color),
        Command::Fill(on)     => canvas.set_fill_enabled(*on),
        Command::Clear => {
            canvas.clear_canvas();
            canvas.reset_pen_state();
        }
        Command::Reset => canvas.reset_pen_state(),
        Command::Circle(r) => circle(canvas, val(r)?, span, usage)?,
        Command::Rectangle(w, h) => rectangle(canvas, val(w)?, val(h)?, span, usage)?,
        Command::Triangle(adj, base, hyp) => {
            triangle(canvas, val(adj)?, val(base)?, val(hyp)?, span, usage)?
        }
        Command::DrawShape(args) => {
            let values = args.iter().map(val).collect::<Result<Vec<_>, _>>()?;
            match values[..] {
                [r]               => circle(canvas, r, span, usage)?,
                [w, h]            => rectangle(canvas, w, h, span, usage)?,
                [adj, base, hyp]  => triangle(canvas, adj, base, hyp, span, usage)?,
                _ => {
                    let points: Vec<(i32, i32)> = values.chunks_exact(2).map(|p| (p[0], p[1])).collect();
                    canvas.draw_polygon(&points);
                }
            }
        }
    }
    Ok(())
}

// ─── Shapes ───────────────────────────────────────────────────────────────────

fn invalid(span: &Span, message: String) -> ScriptError {
    ScriptError::new(ErrorKind::Parse, span.line, span.raw.clone(), message)
}

fn non_negative(what: &str, value: i32, span: &Span, usage: &str) -> Result<(), ScriptError> {
    if value < 0 {
        return Err(invalid(span, format!("{what} must not be negative, got {value}; {usage}")));
    }
    Ok(())
}

fn circle(canvas: &mut dyn Canvas, radius: i32, span: &Span, usage: &str) -> Result<(), ScriptError> {
    non_negative("radius", radius, span, usage)?;
    canvas.draw_circle(radius);
    Ok(())
}

fn rectangle(canvas: &mut dyn Canvas, width: i32, height: i32, span: &Span, usage: &str) -> Result<(), ScriptError> {
    non_negative("width", width, span, usage)?;
    non_negative("height", height, span, usage)?;
    canvas.draw_rectangle(width, height);
    Ok(())
}

fn triangle(canvas: &mut dyn Canvas, adj: i32, base: i32, hyp: i32, span: &Span, usage: &str) -> Result<(), ScriptError> {
    non_negative("base", base, span, usage)?;
    non_negative("hypotenuse", hyp, span, usage)?;
    let tri = Triangle::new(adj, base, hyp).ok_or_else(|| ScriptError::new(
        ErrorKind::Geometry, span.line, span.raw.clone(),
        format!("a hypotenuse of {hyp} is too short for a base of {base}; the triangle has no real height"),
    ))?;
    canvas.draw_triangle(&tri);
    Ok(())
}
