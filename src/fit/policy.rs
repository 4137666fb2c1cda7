use crate::foundation::error::{SplitError, SplitResult};

/// How layer content is mapped into the viewport content box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Use the caller-supplied matrix verbatim.
    RawMatrix,
    /// Stretch both layers to the content box, ignoring aspect ratio.
    Fill,
    /// Uniform fit, anchored at the top/left.
    AlignStart,
    /// Uniform fit, centered on the slack axis.
    #[default]
    AlignCenter,
    /// Uniform fit, anchored at the bottom/right.
    AlignEnd,
    /// Center without scaling.
    CenterNoScale,
    /// Uniform scale so content covers the box, then center.
    CenterCrop,
    /// Uniform downscale (never up) so content fits, then center.
    CenterInside,
}

/// Anchor used by the rect-to-rect policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Center,
    End,
}

impl FitPolicy {
    pub const ALL: [FitPolicy; 8] = [
        FitPolicy::RawMatrix,
        FitPolicy::Fill,
        FitPolicy::AlignStart,
        FitPolicy::AlignCenter,
        FitPolicy::AlignEnd,
        FitPolicy::CenterNoScale,
        FitPolicy::CenterCrop,
        FitPolicy::CenterInside,
    ];

    /// Parse a policy name. Accepts the snake_case names plus the common
    /// `object-fit`/scale-type spellings (`fit_xy`, `fit_center`, `center`, ...).
    pub fn parse(name: &str) -> SplitResult<Self> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");
        if key.is_empty() {
            return Err(SplitError::validation("fit policy must be non-empty"));
        }
        match key.as_str() {
            "raw_matrix" | "matrix" => Ok(Self::RawMatrix),
            "fill" | "fit_xy" | "fitxy" => Ok(Self::Fill),
            "align_start" | "fit_start" | "fitstart" => Ok(Self::AlignStart),
            "align_center" | "fit_center" | "fitcenter" | "contain" => Ok(Self::AlignCenter),
            "align_end" | "fit_end" | "fitend" => Ok(Self::AlignEnd),
            "center_no_scale" | "center" | "none" => Ok(Self::CenterNoScale),
            "center_crop" | "centercrop" | "cover" => Ok(Self::CenterCrop),
            "center_inside" | "centerinside" | "scale_down" => Ok(Self::CenterInside),
            other => Err(SplitError::validation(format!(
                "unknown fit policy '{other}'"
            ))),
        }
    }

    pub fn is_fill(self) -> bool {
        self == Self::Fill
    }

    pub(crate) fn anchor(self) -> Option<Anchor> {
        match self {
            Self::AlignStart => Some(Anchor::Start),
            Self::AlignCenter => Some(Anchor::Center),
            Self::AlignEnd => Some(Anchor::End),
            _ => None,
        }
    }
}

impl std::str::FromStr for FitPolicy {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fit/policy.rs"]
mod tests;
