//! Diagonal clip boundary for a split percentage.

use crate::{
    fit::policy::FitPolicy,
    foundation::core::{BezPath, ContentSize, Point},
};

/// Closed triangular clip region. The foreground layer is drawn inside it.
///
/// Vertices are `(0, h)`, `(0, -offset)` and `(w + offset * w / h, h)`; the closing edge
/// back to the first vertex is implicit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SplitPolygon {
    vertices: [Point; 3],
}

impl SplitPolygon {
    pub fn vertices(&self) -> [Point; 3] {
        self.vertices
    }

    /// Signed area (shoelace). Zero means a degenerate triangle.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
    }

    pub fn to_path(&self) -> BezPath {
        let [a, b, c] = self.vertices;
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        path.line_to(c);
        path.close_path();
        path
    }
}

/// Inputs the generator reads besides the percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitGeometry {
    /// Larger of the two layers' intrinsic sizes; `None` unless both layers are present.
    pub content_max: Option<ContentSize>,
    pub view_w: i32,
    pub view_h: i32,
    pub policy: FitPolicy,
}

/// Build the clip polygon for `percent`, or `None` when there is nothing to clip.
///
/// `percent` must already be validated to `[0, 100]`.
pub fn generate(percent: u8, geom: &SplitGeometry) -> Option<SplitPolygon> {
    let content = geom.content_max.filter(|c| c.is_positive())?;

    let (width, height) = if geom.policy.is_fill() {
        (geom.view_w, geom.view_h)
    } else {
        (content.width, content.height)
    };
    if height == 0 {
        return None;
    }

    let (w, h) = (f64::from(width), f64::from(height));
    let aspect_ratio = w / h;
    let max = w.max(h);
    let offset = -max + (max * 2.0) * (f64::from(percent) / 100.0);

    Some(SplitPolygon {
        vertices: [
            Point::new(0.0, h),
            Point::new(0.0, -offset),
            Point::new(w + offset * aspect_ratio, h),
        ],
    })
}

#[cfg(test)]
#[path = "../../tests/unit/split/path.rs"]
mod tests;
