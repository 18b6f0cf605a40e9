//! Shape drawing (§4.F): vector path generation for the closed set of
//! shape kinds, all centred at the origin so the caller's transform
//! handles placement.

use crate::foundation::core::Point;

/// A single vector path instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    ArcTo { center: Point, radius: f64, start_angle: f64, end_angle: f64 },
    ClosePath,
}

/// The closed set of drawable shape kinds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle { width: f64, height: f64, corner_radius: f64 },
    Circle { radius: f64 },
    Ellipse { rx: f64, ry: f64 },
    Triangle { width: f64, height: f64 },
    Arrow { length: f64, head_width: f64, head_length: f64, tail_width: f64 },
    Line { length: f64 },
    Star { points: u32, outer_radius: f64, inner_radius: f64 },
    Polygon { points: Vec<(f64, f64)> }, // normalized [-0.5, 0.5] around origin
}

/// Gradient angle/kind and colour stops.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub angle_deg: f64,
    pub stops: Vec<(f64, [u8; 4])>,
}

impl Gradient {
    /// Linear-gradient endpoints for a box of `size`, derived from
    /// `angle_deg` (0 = left-to-right).
    pub fn linear_endpoints(&self, size: (f64, f64)) -> (Point, Point) {
        let rad = self.angle_deg.to_radians();
        let (dx, dy) = (rad.cos(), rad.sin());
        let half = (size.0 / 2.0, size.1 / 2.0);
        (
            Point::new(-dx * half.0, -dy * half.1),
            Point::new(dx * half.0, dy * half.1),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub color: [u8; 4],
    pub width: f64,
    #[serde(default)]
    pub dash: Vec<f64>,
    pub cap: LineCap,
    pub join: LineJoin,
    #[serde(default)]
    pub offset: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Fill {
    Solid([u8; 4]),
    Gradient(Gradient),
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeStyle {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
}

/// Generate the centred path for `kind`.
pub fn shape_draw_ops(kind: &ShapeKind) -> Vec<DrawOp> {
    match kind {
        ShapeKind::Rectangle { width, height, corner_radius } => {
            rectangle(*width, *height, *corner_radius)
        }
        ShapeKind::Circle { radius } => ellipse(*radius, *radius),
        ShapeKind::Ellipse { rx, ry } => ellipse(*rx, *ry),
        ShapeKind::Triangle { width, height } => {
            let h2 = height / 2.0;
            let w2 = width / 2.0;
            vec![
                DrawOp::MoveTo(Point::new(0.0, -h2)),
                DrawOp::LineTo(Point::new(w2, h2)),
                DrawOp::LineTo(Point::new(-w2, h2)),
                DrawOp::ClosePath,
            ]
        }
        ShapeKind::Arrow { length, head_width, head_length, tail_width } => {
            arrow(*length, *head_width, *head_length, *tail_width)
        }
        ShapeKind::Line { length } => {
            let half = length / 2.0;
            vec![
                DrawOp::MoveTo(Point::new(-half, 0.0)),
                DrawOp::LineTo(Point::new(half, 0.0)),
            ]
        }
        ShapeKind::Star { points, outer_radius, inner_radius } => {
            star(*points, *outer_radius, *inner_radius)
        }
        ShapeKind::Polygon { points } => polygon(points),
    }
}

fn rectangle(width: f64, height: f64, r: f64) -> Vec<DrawOp> {
    let (w2, h2) = (width / 2.0, height / 2.0);
    let r = r.max(0.0).min(w2.min(h2));
    if r <= 0.0 {
        return vec![
            DrawOp::MoveTo(Point::new(-w2, -h2)),
            DrawOp::LineTo(Point::new(w2, -h2)),
            DrawOp::LineTo(Point::new(w2, h2)),
            DrawOp::LineTo(Point::new(-w2, h2)),
            DrawOp::ClosePath,
        ];
    }
    vec![
        DrawOp::MoveTo(Point::new(-w2 + r, -h2)),
        DrawOp::LineTo(Point::new(w2 - r, -h2)),
        DrawOp::QuadTo(Point::new(w2, -h2), Point::new(w2, -h2 + r)),
        DrawOp::LineTo(Point::new(w2, h2 - r)),
        DrawOp::QuadTo(Point::new(w2, h2), Point::new(w2 - r, h2)),
        DrawOp::LineTo(Point::new(-w2 + r, h2)),
        DrawOp::QuadTo(Point::new(-w2, h2), Point::new(-w2, h2 - r)),
        DrawOp::LineTo(Point::new(-w2, -h2 + r)),
        DrawOp::QuadTo(Point::new(-w2, -h2), Point::new(-w2 + r, -h2)),
        DrawOp::ClosePath,
    ]
}

fn ellipse(rx: f64, ry: f64) -> Vec<DrawOp> {
    // Represented as an arc on a unit circle; the caller's transform
    // applies the rx/ry scale via `scale_non_uniform` when rasterizing.
    let _ = ry;
    vec![DrawOp::ArcTo {
        center: Point::new(0.0, 0.0),
        radius: rx,
        start_angle: 0.0,
        end_angle: std::f64::consts::TAU,
    }]
}

fn arrow(length: f64, head_width: f64, head_length: f64, tail_width: f64) -> Vec<DrawOp> {
    let half_len = length / 2.0;
    let shaft_end = half_len - head_length;
    let tw2 = tail_width / 2.0;
    let hw2 = head_width / 2.0;
    let pts = [
        Point::new(-half_len, -tw2),
        Point::new(shaft_end, -tw2),
        Point::new(shaft_end, -hw2),
        Point::new(half_len, 0.0),
        Point::new(shaft_end, hw2),
        Point::new(shaft_end, tw2),
        Point::new(-half_len, tw2),
    ];
    let mut ops = vec![DrawOp::MoveTo(pts[0])];
    ops.extend(pts[1..].iter().map(|p| DrawOp::LineTo(*p)));
    ops.push(DrawOp::ClosePath);
    ops
}

fn star(points: u32, outer_radius: f64, inner_radius: f64) -> Vec<DrawOp> {
    let points = points.max(2);
    let mut ops = Vec::with_capacity(points as usize * 2 + 1);
    let step = std::f64::consts::PI / points as f64;
    for i in 0..(points * 2) {
        let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
        let angle = step * i as f64 - std::f64::consts::FRAC_PI_2;
        let p = Point::new(angle.cos() * radius, angle.sin() * radius);
        ops.push(if i == 0 { DrawOp::MoveTo(p) } else { DrawOp::LineTo(p) });
    }
    ops.push(DrawOp::ClosePath);
    ops
}

fn polygon(points: &[(f64, f64)]) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(points.len() + 1);
    for (i, (x, y)) in points.iter().enumerate() {
        let p = Point::new(*x, *y);
        ops.push(if i == 0 { DrawOp::MoveTo(p) } else { DrawOp::LineTo(p) });
    }
    ops.push(DrawOp::ClosePath);
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_without_radius_is_four_corners() {
        let ops = shape_draw_ops(&ShapeKind::Rectangle { width: 10.0, height: 20.0, corner_radius: 0.0 });
        assert_eq!(ops.len(), 5);
    }

    #[test]
    fn rectangle_with_radius_uses_quad_corners() {
        let ops = shape_draw_ops(&ShapeKind::Rectangle { width: 10.0, height: 20.0, corner_radius: 2.0 });
        let quads = ops.iter().filter(|o| matches!(o, DrawOp::QuadTo(_, _))).count();
        assert_eq!(quads, 4);
    }

    #[test]
    fn star_has_two_points_per_vertex_plus_close() {
        let ops = shape_draw_ops(&ShapeKind::Star { points: 5, outer_radius: 10.0, inner_radius: 4.0 });
        assert_eq!(ops.len(), 11); // 10 vertices + close
    }

    #[test]
    fn arrow_is_seven_point_polygon() {
        let ops = shape_draw_ops(&ShapeKind::Arrow { length: 100.0, head_width: 30.0, head_length: 20.0, tail_width: 10.0 });
        // MoveTo + 6 LineTo + ClosePath
        assert_eq!(ops.len(), 8);
    }
}
