//! Single write path for the split percentage.

use crate::{
    foundation::core::checked_percent,
    foundation::error::SplitResult,
    split::path::{SplitGeometry, SplitPolygon, generate},
};

/// Default split when nothing else is configured.
pub const DEFAULT_SPLIT_PERCENT: u8 = 50;

/// Current percentage plus the boundary derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitState {
    percent: u8,
    boundary: Option<SplitPolygon>,
}

impl Default for SplitState {
    fn default() -> Self {
        Self {
            percent: DEFAULT_SPLIT_PERCENT,
            boundary: None,
        }
    }
}

impl SplitState {
    pub fn new(percent: i32) -> SplitResult<Self> {
        Ok(Self {
            percent: checked_percent(percent)?,
            boundary: None,
        })
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn boundary(&self) -> Option<&SplitPolygon> {
        self.boundary.as_ref()
    }

    /// Validate and store `p`, then rebuild the boundary. On error nothing changes.
    pub fn set(&mut self, p: i32, geom: &SplitGeometry) -> SplitResult<()> {
        self.percent = checked_percent(p)?;
        self.regenerate(geom);
        Ok(())
    }

    /// Rebuild the boundary for the stored percentage (geometry changed).
    pub fn regenerate(&mut self, geom: &SplitGeometry) {
        self.boundary = generate(self.percent, geom);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/split/controller.rs"]
mod tests;
