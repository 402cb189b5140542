//! The drawing surface the interpreter drives.
//!
//! The interpreter never renders. It calls `Canvas` methods synchronously and
//! expects their effect (pen position in particular) to be visible to the
//! next command. `Recorder` is the in-crate implementation used by tests and
//! by hosts that paint from a command list.

pub mod recorder;

pub use recorder::Recorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenColor {
    Red,
    Green,
    #[default]
    Black,
}

impl PenColor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "red"   => Some(Self::Red),
            "green" => Some(Self::Green),
            "black" => Some(Self::Black),
            _       => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red   => "red",
            Self::Green => "green",
            Self::Black => "black",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Red   => (220, 40, 40),
            Self::Green => (40, 170, 60),
            Self::Black => (0, 0, 0),
        }
    }
}

/// Pen position, color and fill flag. `Default` is the reset state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenState {
    pub x: i32,
    pub y: i32,
    pub color: PenColor,
    pub fill: bool,
}

/// A triangle with a horizontal base centered on the pen and its apex
/// `height` above it, where `height = sqrt(hyp² - (base/2)²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub adj: i32,
    pub base: i32,
    pub hyp: i32,
    pub height: f64,
}

impl Triangle {
    /// `None` when the height would not be a real number.
    pub fn new(adj: i32, base: i32, hyp: i32) -> Option<Self> {
        let half = base as f64 / 2.0;
        let radicand = (hyp as f64).powi(2) - half * half;
        if radicand < 0.0 {
            return None;
        }
        Some(Self { adj, base, hyp, height: radicand.sqrt() })
    }

    /// Vertices for a pen at `(x, y)` on a y-down surface:
    /// base left, base right, apex.
    pub fn vertices(&self, x: i32, y: i32) -> [(f64, f64); 3] {
        let (x, y) = (x as f64, y as f64);
        let half = self.base as f64 / 2.0;
        [(x - half, y), (x + half, y), (x, y - self.height)]
    }
}

/// Drawing primitives the interpreter needs.
pub trait Canvas {
    /// Move the pen without drawing.
    fn set_pen_position(&mut self, x: i32, y: i32);
    /// Draw from the pen to `(x, y)`; the pen ends at `(x, y)`.
    fn draw_line_to(&mut self, x: i32, y: i32);
    fn draw_circle(&mut self, radius: i32);
    fn draw_rectangle(&mut self, width: i32, height: i32);
    fn draw_triangle(&mut self, triangle: &Triangle);
    fn draw_polygon(&mut self, points: &[(i32, i32)]);
    fn set_pen_color(&mut self, color: PenColor);
    fn set_fill_enabled(&mut self, enabled: bool);
    /// Erase everything drawn so far.
    fn clear_canvas(&mut self);
    /// Back to `PenState::default()`.
    fn reset_pen_state(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_height_from_hypotenuse() {
        let t = Triangle::new(0, 6, 5).unwrap();
        assert_eq!(t.height, 4.0);
        assert_eq!(t.vertices(10, 10), [(7.0, 10.0), (13.0, 10.0), (10.0, 6.0)]);
    }

    #[test]
    fn degenerate_triangle_is_flat() {
        let t = Triangle::new(10, 10, 5).unwrap();
        assert_eq!(t.height, 0.0);
    }

    #[test]
    fn imaginary_height_is_rejected() {
        assert!(Triangle::new(10, 10, 1).is_none());
    }

    #[test]
    fn pen_color_names() {
        assert_eq!(PenColor::from_name("green"), Some(PenColor::Green));
        assert_eq!(PenColor::from_name("blue"), None);
        assert_eq!(PenColor::default().name(), "black");
    }
}
