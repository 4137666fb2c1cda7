use crate::foundation::error::{SplitError, SplitResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Lowest accepted split percentage.
pub const MIN_PERCENT: u8 = 0;
/// Highest accepted split percentage.
pub const MAX_PERCENT: u8 = 100;

/// Validate a raw percentage and narrow it to `u8`.
pub fn checked_percent(p: i32) -> SplitResult<u8> {
    if (i32::from(MIN_PERCENT)..=i32::from(MAX_PERCENT)).contains(&p) {
        Ok(p as u8)
    } else {
        Err(SplitError::InvalidPercent(p))
    }
}

/// Intrinsic content size in pixels. Negative components mean "unknown".
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContentSize {
    pub width: i32,
    pub height: i32,
}

impl ContentSize {
    pub const UNKNOWN: Self = Self {
        width: -1,
        height: -1,
    };

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both axes known and strictly positive.
    pub fn is_positive(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Component-wise max; used to track the larger of the two layers.
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Widget frame as handed over by the host layout system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub padding: Padding,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Width available to content (frame minus horizontal padding).
    pub fn inner_width(self) -> i32 {
        let pad = self.padding.left.saturating_add(self.padding.right);
        self.width.saturating_sub(pad).min(i32::MAX as u32) as i32
    }

    /// Height available to content (frame minus vertical padding).
    pub fn inner_height(self) -> i32 {
        let pad = self.padding.top.saturating_add(self.padding.bottom);
        self.height.saturating_sub(pad).min(i32::MAX as u32) as i32
    }

    /// Translation from the frame origin to the content box origin.
    pub fn content_origin(self) -> Vec2 {
        Vec2::new(f64::from(self.padding.left), f64::from(self.padding.top))
    }

    /// Content box in frame coordinates.
    pub fn content_rect(self) -> Rect {
        let o = self.content_origin();
        Rect::new(
            o.x,
            o.y,
            o.x + f64::from(self.inner_width()),
            o.y + f64::from(self.inner_height()),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
