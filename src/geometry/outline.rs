use crate::foundation::core::{Point, Rect, Vec2};
use crate::geometry::mask::Shape;

/// A [`Shape`] placed inside a rectangle, queried by signed distance.
///
/// Negative distances are inside the shape, positive ones outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShapeOutline {
    pub(crate) shape: Shape,
    pub(crate) rect: Rect,
}

impl ShapeOutline {
    pub(crate) fn new(shape: Shape, rect: Rect) -> Self {
        Self { shape, rect }
    }

    pub(crate) fn signed_distance(&self, p: Point) -> f64 {
        match self.shape {
            Shape::Circle => {
                let radius = self.rect.width().min(self.rect.height()) / 2.0;
                circle_distance(p, self.rect.center(), radius)
            }
            Shape::RoundedRect { corner_radius } => {
                rounded_rect_distance(p, self.rect, corner_radius)
            }
        }
    }
}

pub(crate) fn circle_distance(p: Point, center: Point, radius: f64) -> f64 {
    (p - center).hypot() - radius
}

/// Exact signed distance to a rounded rectangle; the radius is clamped to half the
/// shorter side.
pub(crate) fn rounded_rect_distance(p: Point, rect: Rect, radius: f64) -> f64 {
    let half_w = rect.width() / 2.0;
    let half_h = rect.height() / 2.0;
    let r = radius.max(0.0).min(half_w.min(half_h));
    let c = rect.center();

    let qx = (p.x - c.x).abs() - (half_w - r);
    let qy = (p.y - c.y).abs() - (half_h - r);
    let outside = Vec2::new(qx.max(0.0), qy.max(0.0)).hypot();
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

/// Center of pixel `(x, y)` in continuous coordinates.
pub(crate) fn pixel_center(x: i64, y: i64) -> Point {
    Point::new(x as f64 + 0.5, y as f64 + 0.5)
}
