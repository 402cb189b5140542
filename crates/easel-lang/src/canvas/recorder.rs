use crate::types::draw::{DrawCommand, RenderMode, ShapeData, ShapeDesc};
use super::{Canvas, PenColor, PenState, Triangle};

/// A canvas that keeps pen state and the list of shapes drawn, in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pen: PenState,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self { Self::default() }

    pub fn pen(&self) -> PenState { self.pen }

    pub fn commands(&self) -> &[DrawCommand] { &self.commands }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn emit(&mut self, desc: ShapeDesc) {
        let mode = match desc {
            ShapeDesc::Line { .. } => RenderMode::Outline,
            _ => RenderMode::from_fill(self.pen.fill),
        };
        self.commands.push(DrawCommand::DrawShape(ShapeData::new(desc, mode, self.pen.color)));
    }

    fn center(&self) -> (f64, f64) {
        (self.pen.x as f64, self.pen.y as f64)
    }
}

impl Canvas for Recorder {
    fn set_pen_position(&mut self, x: i32, y: i32) {
        self.pen.x = x;
        self.pen.y = y;
    }

    fn draw_line_to(&mut self, x: i32, y: i32) {
        let from = self.center();
        self.emit(ShapeDesc::Line { from, to: (x as f64, y as f64) });
        self.set_pen_position(x, y);
    }

    fn draw_circle(&mut self, radius: i32) {
        self.emit(ShapeDesc::Circle { center: self.center(), radius: radius as f64 });
    }

    fn draw_rectangle(&mut self, width: i32, height: i32) {
        self.emit(ShapeDesc::Rect { center: self.center(), size: (width as f64, height as f64) });
    }

    fn draw_triangle(&mut self, triangle: &Triangle) {
        let verts = triangle.vertices(self.pen.x, self.pen.y);
        self.emit(ShapeDesc::Polygon(verts.to_vec()));
    }

    fn draw_polygon(&mut self, points: &[(i32, i32)]) {
        let pts = points.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
        self.emit(ShapeDesc::Polygon(pts));
    }

    fn set_pen_color(&mut self, color: PenColor) {
        self.pen.color = color;
    }

    fn set_fill_enabled(&mut self, enabled: bool) {
        self.pen.fill = enabled;
    }

    fn clear_canvas(&mut self) {
        self.commands.clear();
    }

    fn reset_pen_state(&mut self) {
        self.pen = PenState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_moves_pen() {
        let mut r = Recorder::new();
        r.set_pen_position(5, 5);
        r.draw_line_to(10, 20);
        assert_eq!((r.pen().x, r.pen().y), (10, 20));
        assert_eq!(
            r.commands()[0].shape().desc,
            ShapeDesc::Line { from: (5.0, 5.0), to: (10.0, 20.0) }
        );
    }

    #[test]
    fn shapes_take_pen_color_and_fill() {
        let mut r = Recorder::new();
        r.set_pen_color(PenColor::Red);
        r.set_fill_enabled(true);
        r.draw_circle(3);
        let shape = r.commands()[0].shape();
        assert_eq!(shape.color, PenColor::Red);
        assert_eq!(shape.render_mode, RenderMode::Fill);
    }

    #[test]
    fn clear_and_reset() {
        let mut r = Recorder::new();
        r.set_pen_position(1, 2);
        r.set_fill_enabled(true);
        r.draw_rectangle(4, 4);
        r.clear_canvas();
        assert!(r.commands().is_empty());
        assert_eq!(r.pen().x, 1);
        r.reset_pen_state();
        assert_eq!(r.pen(), PenState::default());
    }
}
