//! Splitview renders two stacked layers inside a viewport and reveals the foreground
//! through a diagonal boundary driven by a split percentage (0-100).
//!
//! # Pipeline overview
//!
//! 1. **Fit**: `content size + viewport + FitPolicy -> FitResolution` (draw box and matrix)
//! 2. **Split**: `percent + geometry -> SplitPolygon` (triangular clip region)
//! 3. **Drive**: drag gestures and clock ticks feed the percentage through [`SplitView`],
//!    which owns the [`AnimationEngine`] (drag, snap-to-edge, automatic oscillation)
//! 4. **Render**: the host pulls a [`RenderFrame`] and composites the two layers
//!
//! Loading content, measuring, compositing and persistence belong to the host and
//! are reached through the traits in this crate ([`Drawable`], [`FrameHost`],
//! [`ContentResolver`]).
//!
//! Everything runs on one logical thread: no locks, no blocking, and every mutation
//! is validated before it touches state. Invalid input is logged through `tracing`
//! and ignored rather than returned as a fault.
#![forbid(unsafe_code)]

mod animation;
mod fit;
mod foundation;
mod gesture;
mod split;
mod view;

pub use animation::engine::AnimationEngine;
pub use animation::session::{
    AnimationMode, AnimationSession, Leg, SNAP_MARGIN_PERCENT, SNAP_MS_PER_MARGIN, Step,
    snap_target,
};
pub use fit::policy::FitPolicy;
pub use fit::resolver::{FitResolution, resolve};
pub use foundation::core::{
    Affine, BezPath, ContentSize, MAX_PERCENT, MIN_PERCENT, Padding, Point, Rect, Size, Vec2,
    Viewport, checked_percent,
};
pub use foundation::error::{SplitError, SplitResult};
pub use gesture::interpreter::{DragGate, percent_for_pointer};
pub use split::controller::{DEFAULT_SPLIT_PERCENT, SplitState};
pub use split::path::{SplitGeometry, SplitPolygon, generate};
pub use view::config::{DEFAULT_AUTOMATIC_DURATION_MS, SplitViewConfig};
pub use view::host::{ContentResolver, Drawable, FrameHost, LayerSlot, NullHost};
pub use view::widget::{Layer, RenderFrame, SavedState, SplitView};
