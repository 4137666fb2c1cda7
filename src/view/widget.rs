//! The split view: owns both layers, the percentage and the animation engine, and
//! funnels every mutation through validate -> mutate -> refit -> regenerate -> redraw.

use crate::{
    animation::engine::AnimationEngine,
    animation::session::{AnimationMode, AnimationSession},
    fit::policy::FitPolicy,
    fit::resolver::{FitResolution, resolve},
    foundation::core::{Affine, ContentSize, Point, Rect, Vec2, Viewport},
    foundation::error::{SplitError, SplitResult},
    gesture::interpreter::{DragGate, percent_for_pointer},
    split::controller::SplitState,
    split::path::{SplitGeometry, SplitPolygon},
    view::config::SplitViewConfig,
    view::host::{ContentResolver, Drawable, FrameHost, LayerSlot},
};

/// An attached drawable plus the box it is asked to draw into.
#[derive(Clone, Debug)]
pub struct Layer<D> {
    handle: D,
    size: ContentSize,
    draw_box: Rect,
}

impl<D> Layer<D> {
    pub fn handle(&self) -> &D {
        &self.handle
    }

    pub fn intrinsic_size(&self) -> ContentSize {
        self.size
    }

    /// Bounds in content-box coordinates, before the fit transform.
    pub fn draw_box(&self) -> Rect {
        self.draw_box
    }
}

/// Everything the renderer needs for one frame. Draw order:
/// translate by `origin`, clip to `clip`, concat `transform`, draw `background`,
/// clip to `boundary`, draw `foreground`, then stroke `debug_outline`.
#[derive(Debug)]
pub struct RenderFrame<'a, D> {
    pub origin: Vec2,
    pub clip: Option<Rect>,
    pub transform: Option<Affine>,
    pub boundary: Option<&'a SplitPolygon>,
    pub background: Option<&'a Layer<D>>,
    pub foreground: Option<&'a Layer<D>>,
    pub debug_outline: Option<&'a SplitPolygon>,
}

/// Value persisted across a host lifecycle boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SavedState {
    pub split_percent: u8,
}

pub struct SplitView<D, H> {
    host: H,
    background: Option<Layer<D>>,
    foreground: Option<Layer<D>>,
    content_max: ContentSize,
    viewport: Option<Viewport>,
    policy: FitPolicy,
    explicit_matrix: Option<Affine>,
    fit: Option<FitResolution>,
    split: SplitState,
    engine: AnimationEngine,
    unveil_on_touch: bool,
    snap_to_bounds: bool,
    automatic_enabled: bool,
    automatic_duration_ms: u64,
    debug_outline: bool,
    crop_to_padding: bool,
}

impl<D, H> std::fmt::Debug for SplitView<D, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitView")
            .field("percent", &self.split.percent())
            .field("policy", &self.policy)
            .field("viewport", &self.viewport)
            .field("content_max", &self.content_max)
            .field("state", &self.engine.state())
            .finish_non_exhaustive()
    }
}

impl<D: Drawable, H: FrameHost> SplitView<D, H> {
    pub fn new(host: H) -> Self {
        let cfg = SplitViewConfig::default();
        Self {
            host,
            background: None,
            foreground: None,
            content_max: ContentSize::UNKNOWN,
            viewport: None,
            policy: cfg.fit_policy,
            explicit_matrix: None,
            fit: None,
            split: SplitState::default(),
            engine: AnimationEngine::new(),
            unveil_on_touch: cfg.unveil_on_touch,
            snap_to_bounds: cfg.snap_to_bounds,
            automatic_enabled: cfg.automatic_animation,
            automatic_duration_ms: cfg.automatic_animation_duration_ms,
            debug_outline: cfg.debug_outline,
            crop_to_padding: cfg.crop_to_padding,
        }
    }

    /// Build a view from a config. Unlike the runtime setters, an invalid config is an error.
    pub fn from_config(cfg: &SplitViewConfig, host: H) -> SplitResult<Self> {
        cfg.validate()?;
        let mut view = Self::new(host);
        view.split = SplitState::new(cfg.split_percent)?;
        view.policy = cfg.fit_policy;
        view.explicit_matrix = cfg.explicit_affine().filter(|m| *m != Affine::IDENTITY);
        view.unveil_on_touch = cfg.unveil_on_touch;
        view.snap_to_bounds = cfg.snap_to_bounds;
        view.automatic_enabled = cfg.automatic_animation;
        view.automatic_duration_ms = cfg.automatic_animation_duration_ms;
        view.debug_outline = cfg.debug_outline;
        view.crop_to_padding = cfg.crop_to_padding;
        Ok(view)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn percent(&self) -> u8 {
        self.split.percent()
    }

    pub fn boundary(&self) -> Option<&SplitPolygon> {
        self.split.boundary()
    }

    pub fn fit(&self) -> Option<&FitResolution> {
        self.fit.as_ref()
    }

    pub fn fit_policy(&self) -> FitPolicy {
        self.policy
    }

    pub fn explicit_matrix(&self) -> Option<Affine> {
        self.explicit_matrix
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn layer(&self, slot: LayerSlot) -> Option<&Layer<D>> {
        match slot {
            LayerSlot::Background => self.background.as_ref(),
            LayerSlot::Foreground => self.foreground.as_ref(),
        }
    }

    /// Larger of the two layers' intrinsic sizes (`-1` on an axis when unknown).
    pub fn content_max(&self) -> ContentSize {
        self.content_max
    }

    pub fn animation_state(&self) -> AnimationMode {
        self.engine.state()
    }

    pub fn animation_session(&self) -> Option<&AnimationSession> {
        self.engine.session()
    }

    pub fn unveil_on_touch(&self) -> bool {
        self.unveil_on_touch
    }

    pub fn snap_to_bounds(&self) -> bool {
        self.snap_to_bounds
    }

    pub fn automatic_animation_enabled(&self) -> bool {
        self.automatic_enabled
    }

    pub fn automatic_animation_duration_ms(&self) -> u64 {
        self.automatic_duration_ms
    }

    pub fn debug_outline(&self) -> bool {
        self.debug_outline
    }

    pub fn crop_to_padding(&self) -> bool {
        self.crop_to_padding
    }

    fn has_both_layers(&self) -> bool {
        self.background.is_some() && self.foreground.is_some()
    }

    fn geometry(&self) -> SplitGeometry {
        let both_known = self
            .background
            .iter()
            .chain(self.foreground.iter())
            .filter(|l| l.size.is_positive())
            .count()
            == 2;
        let (view_w, view_h) = self
            .viewport
            .map(|v| (v.inner_width(), v.inner_height()))
            .unwrap_or((0, 0));
        SplitGeometry {
            content_max: both_known.then_some(self.content_max),
            view_w,
            view_h,
            policy: self.policy,
        }
    }

    fn refit(&mut self) {
        let Some(vp) = self.viewport else {
            return;
        };
        if self.background.is_none() && self.foreground.is_none() {
            self.fit = None;
            return;
        }
        let content = if self.has_both_layers() {
            self.content_max
        } else {
            ContentSize::UNKNOWN
        };
        let fit = resolve(
            content,
            vp.inner_width(),
            vp.inner_height(),
            self.policy,
            self.explicit_matrix,
        );
        let draw_box = Rect::from_origin_size(Point::ORIGIN, fit.draw_size);
        for layer in [self.background.as_mut(), self.foreground.as_mut()]
            .into_iter()
            .flatten()
        {
            layer.draw_box = draw_box;
        }
        self.fit = Some(fit);
    }

    fn regenerate(&mut self) {
        let geom = self.geometry();
        self.split.regenerate(&geom);
    }

    /// Geometry inputs changed: refit, rebuild the boundary, then ask for a redraw.
    fn relayout(&mut self) {
        self.refit();
        self.regenerate();
        self.host.request_redraw();
    }

    fn apply_percent(&mut self, p: i32) -> SplitResult<()> {
        let geom = self.geometry();
        self.split.set(p, &geom)?;
        self.host.request_redraw();
        Ok(())
    }

    /// Set the split directly. Out-of-range values are logged and ignored.
    pub fn set_percent(&mut self, p: i32) -> bool {
        match self.apply_percent(p) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "split percent rejected");
                false
            }
        }
    }

    /// Replace the content of `slot`. The previous handle is hidden and handed back.
    #[tracing::instrument(skip(self, content))]
    pub fn set_content(&mut self, slot: LayerSlot, content: Option<D>) -> Option<D> {
        let layer = content.map(|mut handle| {
            handle.set_visible(true);
            let size = handle.intrinsic_size();
            Layer {
                handle,
                size,
                draw_box: Rect::ZERO,
            }
        });
        let target = match slot {
            LayerSlot::Background => &mut self.background,
            LayerSlot::Foreground => &mut self.foreground,
        };
        let old = std::mem::replace(target, layer).map(|mut l| {
            l.handle.set_visible(false);
            l.handle
        });

        let old_max = self.content_max;
        self.content_max = self
            .background
            .iter()
            .chain(self.foreground.iter())
            .map(|l| l.size)
            .fold(ContentSize::UNKNOWN, ContentSize::max);
        tracing::debug!(?slot, content_max = ?self.content_max, "layer content replaced");

        self.refit();
        self.regenerate();
        if self.content_max.width > old_max.width || self.content_max.height > old_max.height {
            self.host.request_layout();
        }
        self.host.request_redraw();

        if self.automatic_enabled {
            self.restart_automatic();
        }
        old
    }

    /// Resolve `uri` through the host and attach the result. On failure the slot is left
    /// empty and the failure is logged.
    pub fn set_content_uri<R>(&mut self, slot: LayerSlot, uri: &str, resolver: &mut R) -> Option<D>
    where
        R: ContentResolver<D> + ?Sized,
    {
        let content = match resolver.resolve(uri).map_err(SplitError::from) {
            Ok(d) => Some(d),
            Err(err) => {
                tracing::warn!(?slot, uri, error = %err, "unable to resolve layer content");
                None
            }
        };
        self.set_content(slot, content)
    }

    /// New frame from the layout system.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == Some(viewport) {
            return;
        }
        self.viewport = Some(viewport);
        self.relayout();
    }

    /// Returns `false` when `policy` is already active (nothing is recomputed).
    pub fn set_fit_policy(&mut self, policy: FitPolicy) -> bool {
        if self.policy == policy {
            return false;
        }
        self.policy = policy;
        self.refit();
        self.regenerate();
        self.host.request_layout();
        self.host.request_redraw();
        true
    }

    /// Matrix used by [`FitPolicy::RawMatrix`]. Identity is stored as `None`.
    pub fn set_explicit_matrix(&mut self, matrix: Option<Affine>) -> bool {
        let matrix = matrix.filter(|m| *m != Affine::IDENTITY);
        if self.explicit_matrix == matrix {
            return false;
        }
        self.explicit_matrix = matrix;
        self.relayout();
        true
    }

    pub fn set_snap_to_bounds(&mut self, snap: bool) {
        self.snap_to_bounds = snap;
    }

    pub fn set_unveil_on_touch(&mut self, unveil: bool) {
        self.unveil_on_touch = unveil;
    }

    pub fn set_debug_outline(&mut self, enabled: bool) {
        if self.debug_outline != enabled {
            self.debug_outline = enabled;
            self.host.request_redraw();
        }
    }

    pub fn set_crop_to_padding(&mut self, crop: bool) {
        if self.crop_to_padding != crop {
            self.crop_to_padding = crop;
            self.host.request_layout();
            self.host.request_redraw();
        }
    }

    /// Duration used by the next automatic start; a running sequence keeps its timing.
    pub fn set_automatic_animation_duration(&mut self, duration_ms: u64) -> bool {
        if duration_ms == 0 {
            tracing::warn!("automatic animation duration must be > 0");
            return false;
        }
        self.automatic_duration_ms = duration_ms;
        true
    }

    /// Enable (restarting from the current percent) or disable the automatic oscillation.
    /// Disabling freezes the percent at its last animated value and always succeeds; a zero
    /// `duration_ms` only rejects enabling.
    pub fn set_automatic_animation(&mut self, enabled: bool, duration_ms: u64) -> bool {
        if !enabled {
            if duration_ms > 0 {
                self.automatic_duration_ms = duration_ms;
            }
            if std::mem::take(&mut self.automatic_enabled)
                && self.engine.state() == AnimationMode::Automatic
            {
                self.engine.cancel();
            }
            return true;
        }
        if !self.set_automatic_animation_duration(duration_ms) {
            return false;
        }
        self.automatic_enabled = true;
        self.restart_automatic();
        true
    }

    #[tracing::instrument(skip(self))]
    fn restart_automatic(&mut self) {
        if !self.has_both_layers() {
            if self.engine.state() == AnimationMode::Automatic {
                self.engine.cancel();
            }
            return;
        }
        if let Err(err) = self.engine.start_automatic(
            i32::from(self.split.percent()),
            self.automatic_duration_ms,
        ) {
            tracing::warn!(%err, "automatic animation not started");
        }
    }

    /// Stop whatever is running; the percent stays where it is. Does not clear the
    /// automatic flag, so new content restarts the oscillation.
    pub fn cancel_animation(&mut self) -> AnimationMode {
        self.engine.cancel()
    }

    /// Advance timed animations by `delta_ms`. Returns the percent applied, if any.
    pub fn tick(&mut self, delta_ms: u64) -> Option<u8> {
        let p = self.engine.tick(delta_ms)?;
        if let Err(err) = self.apply_percent(i32::from(p)) {
            tracing::warn!(%err, "animated percent rejected");
            return None;
        }
        Some(p)
    }

    fn drag_gate(&self) -> DragGate {
        DragGate {
            unveil_on_touch: self.unveil_on_touch,
            automatic_enabled: self.automatic_enabled,
            has_both_layers: self.has_both_layers(),
            session_running: self.engine.is_running(),
        }
    }

    /// Pointer down. Returns whether the view consumes the gesture.
    pub fn on_drag_start(&mut self, _pos: Point) -> bool {
        self.unveil_on_touch
    }

    /// Pointer moved while down; `pos` is relative to the frame's top-left.
    pub fn on_drag_move(&mut self, pos: Point) -> bool {
        if !self.drag_gate().allows_drag() {
            return self.unveil_on_touch;
        }
        let Some(vp) = self.viewport else {
            return self.unveil_on_touch;
        };
        let Some(p) = percent_for_pointer(pos, f64::from(vp.width), f64::from(vp.height)) else {
            return self.unveil_on_touch;
        };
        if !self.engine.begin_drag() {
            return self.unveil_on_touch;
        }
        match self.apply_percent(p) {
            Ok(()) => tracing::trace!(percent = p, "split percent dragged"),
            Err(err) => tracing::warn!(%err, "dragged split percent rejected"),
        }
        self.unveil_on_touch
    }

    /// Pointer released. Near an edge (and with snapping on) this starts a snap.
    pub fn on_drag_end(&mut self, _pos: Point) -> bool {
        let snap = self.snap_to_bounds && self.unveil_on_touch;
        if let Err(err) = self.engine.end_drag(self.split.percent(), snap) {
            tracing::warn!(%err, "snap animation not started");
        }
        self.unveil_on_touch
    }

    pub fn render(&self) -> Option<RenderFrame<'_, D>> {
        if self.background.is_none() && self.foreground.is_none() {
            return None;
        }
        if self.content_max.width == 0 || self.content_max.height == 0 {
            return None;
        }
        let vp = self.viewport.unwrap_or_default();
        let boundary = self.split.boundary();
        Some(RenderFrame {
            origin: vp.content_origin(),
            clip: self.crop_to_padding.then(|| vp.content_rect()),
            transform: self.fit.and_then(|f| f.transform),
            boundary,
            background: self.background.as_ref(),
            foreground: self.foreground.as_ref(),
            debug_outline: boundary.filter(|_| self.debug_outline),
        })
    }

    /// Snapshot for persistence. Nothing is saved while the automatic animation owns
    /// the percent.
    pub fn save_state(&self) -> Option<SavedState> {
        (!self.automatic_enabled).then(|| SavedState {
            split_percent: self.split.percent(),
        })
    }

    pub fn restore_state(&mut self, state: SavedState) -> bool {
        if state.split_percent == self.split.percent() {
            return true;
        }
        self.set_percent(i32::from(state.split_percent))
    }
}

impl<D: Drawable, H: FrameHost + Default> Default for SplitView<D, H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/widget.rs"]
mod tests;
