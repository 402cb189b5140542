use crate::canvas::PenColor;

// ─── Shape description ────────────────────────────────────────────────────────

/// Semantic shape in canvas pixels (0,0 = top-left, y-down). Not
/// tessellated; the host turns circles into vertices at paint time.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDesc {
    Circle   { center: (f64, f64), radius: f64 },
    Rect     { center: (f64, f64), size: (f64, f64) },
    Line     { from: (f64, f64), to: (f64, f64) },
    Polygon(Vec<(f64, f64)>),
}

impl ShapeDesc {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Rect { .. }   => "rectangle",
            Self::Line { .. }   => "line",
            Self::Polygon(pts) if pts.len() == 3 => "triangle",
            Self::Polygon(_)    => "polygon",
        }
    }

    /// Outline vertices. Circles are approximated with `segments` points.
    pub fn vertices(&self, segments: usize) -> Vec<(f64, f64)> {
        match self {
            Self::Circle { center, radius } => (0..segments)
                .map(|i| {
                    let t = i as f64 / segments as f64 * std::f64::consts::TAU;
                    (center.0 + radius * t.cos(), center.1 + radius * t.sin())
                })
                .collect(),
            Self::Rect { center, size } => {
                let (hw, hh) = (size.0 / 2.0, size.1 / 2.0);
                vec![
                    (center.0 - hw, center.1 - hh), (center.0 + hw, center.1 - hh),
                    (center.0 + hw, center.1 + hh), (center.0 - hw, center.1 + hh),
                ]
            }
            Self::Line { from, to } => vec![*from, *to],
            Self::Polygon(pts) => pts.clone(),
        }
    }
}

// ─── Triangulation ───────────────────────────────────────────────────────────

/// Splits a simple polygon into triangles by ear clipping, returning vertex
/// index triples. Works for concave outlines; a self-intersecting outline
/// yields only the triangles found before clipping gets stuck.
pub fn triangulate(points: &[(f64, f64)]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let doubled_area: f64 = (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.0 * b.1 - b.0 * a.1
        })
        .sum();
    let winding = doubled_area.signum();

    let mut ring: Vec<usize> = (0..n).collect();
    let mut tris = Vec::with_capacity(n - 2);
    while ring.len() > 3 {
        let m = ring.len();
        let corner = |i: usize| (ring[(i + m - 1) % m], ring[i], ring[(i + 1) % m]);

        let ear = (0..m).find(|&i| {
            let (a, b, c) = corner(i);
            let turn = cross(points[a], points[b], points[c]) * winding;
            turn > 0.0
                && !ring.iter().any(|&p| {
                    p != a && p != b && p != c && in_triangle(points[p], points[a], points[b], points[c])
                })
        });
        match ear {
            Some(i) => {
                let (a, b, c) = corner(i);
                tris.push([a, b, c]);
                ring.remove(i);
            }
            None => {
                // Collinear corners add no area; drop one and retry.
                let Some(i) = (0..m).find(|&i| {
                    let (a, b, c) = corner(i);
                    cross(points[a], points[b], points[c]) == 0.0
                }) else {
                    break;
                };
                ring.remove(i);
            }
        }
    }
    if let [a, b, c] = ring[..] {
        if cross(points[a], points[b], points[c]) != 0.0 {
            tris.push([a, b, c]);
        }
    }
    tris
}

fn cross(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

fn in_triangle(p: (f64, f64), a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> bool {
    let (d1, d2, d3) = (cross(a, b, p), cross(b, c, p), cross(c, a, p));
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

// ─── Render mode ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    Fill,
    #[default]
    Outline,
}

impl RenderMode {
    pub fn from_fill(fill: bool) -> Self {
        if fill { Self::Fill } else { Self::Outline }
    }
}

// ─── Shape data ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeData {
    pub desc:        ShapeDesc,
    pub render_mode: RenderMode,
    pub color:       PenColor,
}

impl ShapeData {
    pub fn new(desc: ShapeDesc, render_mode: RenderMode, color: PenColor) -> Self {
        Self { desc, render_mode, color }
    }
}

// ─── Draw command ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    DrawShape(ShapeData),
}

impl DrawCommand {
    pub fn shape(&self) -> &ShapeData {
        let DrawCommand::DrawShape(data) = self;
        data
    }
}
