use crate::{
    fit::policy::FitPolicy,
    foundation::core::{Affine, checked_percent},
    foundation::error::{SplitError, SplitResult},
    split::controller::DEFAULT_SPLIT_PERCENT,
};

/// Default length of one automatic sweep (`100 -> 0` or `0 -> 100`).
pub const DEFAULT_AUTOMATIC_DURATION_MS: u64 = 600;

/// Declarative view settings, usually loaded from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SplitViewConfig {
    pub split_percent: i32,
    pub unveil_on_touch: bool,
    pub snap_to_bounds: bool,
    pub fit_policy: FitPolicy,
    /// Affine coefficients `[a, b, c, d, e, f]`, used by [`FitPolicy::RawMatrix`].
    pub explicit_matrix: Option<[f64; 6]>,
    pub automatic_animation: bool,
    pub automatic_animation_duration_ms: u64,
    pub debug_outline: bool,
    pub crop_to_padding: bool,
}

impl Default for SplitViewConfig {
    fn default() -> Self {
        Self {
            split_percent: i32::from(DEFAULT_SPLIT_PERCENT),
            unveil_on_touch: true,
            snap_to_bounds: true,
            fit_policy: FitPolicy::default(),
            explicit_matrix: None,
            automatic_animation: false,
            automatic_animation_duration_ms: DEFAULT_AUTOMATIC_DURATION_MS,
            debug_outline: false,
            crop_to_padding: false,
        }
    }
}

impl SplitViewConfig {
    pub fn from_json(s: &str) -> SplitResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| SplitError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> SplitResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SplitError::serde(e.to_string()))
    }

    pub fn validate(&self) -> SplitResult<()> {
        checked_percent(self.split_percent)?;
        if self.automatic_animation_duration_ms == 0 {
            return Err(SplitError::validation(
                "automatic_animation_duration_ms must be > 0",
            ));
        }
        if let Some(m) = self.explicit_matrix
            && m.iter().any(|c| !c.is_finite())
        {
            return Err(SplitError::validation(
                "explicit_matrix coefficients must be finite",
            ));
        }
        Ok(())
    }

    pub fn explicit_affine(&self) -> Option<Affine> {
        self.explicit_matrix.map(Affine::new)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/config.rs"]
mod tests;
