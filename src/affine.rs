use crate::error::GraticuleError;
use crate::geom::{Point, Rectangle};

/// A 2D affine transform between projected and screen coordinates.
///
///   u = a * x + b * y + c
///   v = d * x + e * y + f
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Axis-aligned transform taking corner `(x1, y1)` of `src` to corner
    /// `(x1, y1)` of `dst` and `(x2, y2)` to `(x2, y2)`.
    ///
    /// Corners are used as given, so a `dst` with `y1 > y2` flips the
    /// vertical axis.
    pub fn from_rects(src: &Rectangle, dst: &Rectangle) -> Result<Self, GraticuleError> {
        let src_w = src.x2 - src.x1;
        let src_h = src.y2 - src.y1;
        if src_w.abs() < f64::EPSILON || src_h.abs() < f64::EPSILON {
            return Err(GraticuleError::Affine(format!(
                "Source rectangle has zero extent: {src:?}"
            )));
        }
        let sx = (dst.x2 - dst.x1) / src_w;
        let sy = (dst.y2 - dst.y1) / src_h;
        Ok(Self {
            a: sx,
            b: 0.0,
            c: dst.x1 - src.x1 * sx,
            d: 0.0,
            e: sy,
            f: dst.y1 - src.y1 * sy,
        })
    }

    /// Horizontal scale factor; exact for axis-aligned transforms.
    pub fn scale_x(&self) -> f64 {
        self.a
    }

    pub fn scale_y(&self) -> f64 {
        self.e
    }

    /// Apply the forward transform: (x, y) -> (u, v).
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        let u = self.a * x + self.b * y + self.c;
        let v = self.d * x + self.e * y + self.f;
        (u, v)
    }

    pub fn forward_point(&self, p: Point) -> Point {
        let (u, v) = self.forward(p.x, p.y);
        Point::new(u, v)
    }
}
