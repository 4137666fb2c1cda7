use super::*;
use crate::foundation::core::Padding;

#[derive(Clone, Debug, PartialEq)]
struct FakeImage {
    size: ContentSize,
    visible: bool,
}

impl FakeImage {
    fn new(w: i32, h: i32) -> Self {
        Self {
            size: ContentSize::new(w, h),
            visible: false,
        }
    }
}

impl Drawable for FakeImage {
    fn intrinsic_size(&self) -> ContentSize {
        self.size
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[derive(Debug, Default)]
struct RecordingHost {
    redraws: usize,
    layouts: usize,
}

impl FrameHost for RecordingHost {
    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn request_layout(&mut self) {
        self.layouts += 1;
    }
}

type View = SplitView<FakeImage, RecordingHost>;

fn ready_view() -> View {
    let mut v = View::default();
    v.set_viewport(Viewport::new(200, 100));
    v.set_content(LayerSlot::Background, Some(FakeImage::new(200, 100)));
    v.set_content(LayerSlot::Foreground, Some(FakeImage::new(200, 100)));
    v
}

/// Point straight above the bottom-left corner at `fraction` of the 200x100 diagonal.
fn along_left_edge(fraction: f64) -> Point {
    Point::new(0.0, 100.0 - 200f64.hypot(100.0) * fraction)
}

#[test]
fn set_percent_reads_back_and_rejects_out_of_range() {
    let mut v = ready_view();
    for p in 0..=100 {
        assert!(v.set_percent(p));
        assert_eq!(i32::from(v.percent()), p);
    }
    v.set_percent(42);
    let redraws = v.host().redraws;
    assert!(!v.set_percent(101));
    assert!(!v.set_percent(-1));
    assert_eq!(v.percent(), 42);
    assert_eq!(v.host().redraws, redraws);
}

#[test]
fn set_percent_regenerates_boundary_and_redraws() {
    let mut v = ready_view();
    let before = v.host().redraws;
    v.set_percent(50);
    assert_eq!(v.host().redraws, before + 1);
    assert_eq!(
        v.boundary().unwrap().vertices(),
        [
            Point::new(0.0, 100.0),
            Point::new(0.0, 0.0),
            Point::new(200.0, 100.0),
        ]
    );
}

#[test]
fn boundary_requires_both_layers_with_known_size() {
    let mut v = View::default();
    v.set_viewport(Viewport::new(100, 100));
    v.set_content(LayerSlot::Background, Some(FakeImage::new(100, 100)));
    assert!(v.boundary().is_none());

    v.set_content(LayerSlot::Foreground, Some(FakeImage::new(-1, -1)));
    assert!(v.boundary().is_none());

    v.set_content(LayerSlot::Foreground, Some(FakeImage::new(80, 60)));
    assert!(v.boundary().is_some());

    v.set_content(LayerSlot::Background, None);
    assert!(v.boundary().is_none());
}

#[test]
fn replacing_content_hides_and_returns_old_handle() {
    let mut v = ready_view();
    assert!(v.layer(LayerSlot::Foreground).unwrap().handle().visible);

    let old = v
        .set_content(LayerSlot::Foreground, Some(FakeImage::new(50, 50)))
        .unwrap();
    assert_eq!(old.size, ContentSize::new(200, 100));
    assert!(!old.visible);
    assert_eq!(
        v.layer(LayerSlot::Foreground).unwrap().intrinsic_size(),
        ContentSize::new(50, 50)
    );
}

#[test]
fn growing_content_requests_layout() {
    let mut v = View::default();
    v.set_viewport(Viewport::new(100, 100));
    v.set_content(LayerSlot::Background, Some(FakeImage::new(10, 10)));
    let layouts = v.host().layouts;

    v.set_content(LayerSlot::Foreground, Some(FakeImage::new(5, 5)));
    assert_eq!(v.host().layouts, layouts);

    v.set_content(LayerSlot::Foreground, Some(FakeImage::new(5, 50)));
    assert_eq!(v.host().layouts, layouts + 1);
    assert_eq!(v.content_max(), ContentSize::new(10, 50));
}

#[test]
fn fit_policy_is_idempotent() {
    let mut v = ready_view();
    let (redraws, layouts) = (v.host().redraws, v.host().layouts);
    assert!(!v.set_fit_policy(FitPolicy::AlignCenter));
    assert_eq!(v.host().redraws, redraws);
    assert_eq!(v.host().layouts, layouts);

    assert!(v.set_fit_policy(FitPolicy::CenterCrop));
    assert_eq!(v.host().redraws, redraws + 1);
    assert_eq!(v.host().layouts, layouts + 1);
}

#[test]
fn toggling_fill_rebuilds_boundary_from_view_size() {
    let mut v = View::default();
    v.set_viewport(Viewport::new(300, 150));
    v.set_content(LayerSlot::Background, Some(FakeImage::new(200, 100)));
    v.set_content(LayerSlot::Foreground, Some(FakeImage::new(200, 100)));
    assert_eq!(v.boundary().unwrap().vertices()[2], Point::new(200.0, 100.0));

    v.set_fit_policy(FitPolicy::Fill);
    assert_eq!(v.boundary().unwrap().vertices()[2], Point::new(300.0, 150.0));
    let layer = v.layer(LayerSlot::Background).unwrap();
    assert_eq!(layer.draw_box(), Rect::new(0.0, 0.0, 300.0, 150.0));

    v.set_fit_policy(FitPolicy::AlignStart);
    assert_eq!(v.boundary().unwrap().vertices()[2], Point::new(200.0, 100.0));
    let layer = v.layer(LayerSlot::Background).unwrap();
    assert_eq!(layer.draw_box(), Rect::new(0.0, 0.0, 200.0, 100.0));
}

#[test]
fn single_layer_is_stretched() {
    let mut v = View::default();
    v.set_viewport(Viewport::new(120, 90));
    v.set_fit_policy(FitPolicy::CenterInside);
    v.set_content(LayerSlot::Background, Some(FakeImage::new(40, 30)));
    let fit = v.fit().unwrap();
    assert_eq!(fit.transform, None);
    assert_eq!(fit.draw_size, kurbo::Size::new(120.0, 90.0));
}

#[test]
fn explicit_matrix_only_used_by_raw_policy() {
    let mut v = ready_view();
    v.set_viewport(Viewport::new(400, 400));
    assert!(v.set_explicit_matrix(Some(Affine::scale(3.0))));
    assert!(!v.set_explicit_matrix(Some(Affine::scale(3.0))));
    assert_ne!(v.fit().unwrap().transform, Some(Affine::scale(3.0)));

    v.set_fit_policy(FitPolicy::RawMatrix);
    assert_eq!(v.fit().unwrap().transform, Some(Affine::scale(3.0)));

    assert!(v.set_explicit_matrix(Some(Affine::IDENTITY)));
    assert_eq!(v.explicit_matrix(), None);
    assert_eq!(v.fit().unwrap().transform, None);
}

#[test]
fn drag_moves_percent_and_snaps_on_release() {
    let mut v = ready_view();
    assert!(v.on_drag_start(Point::new(0.0, 100.0)));
    let pos = along_left_edge(0.105);
    assert!(v.on_drag_move(pos));
    assert_eq!(v.percent(), 10);
    assert_eq!(v.animation_state(), AnimationMode::Drag);

    assert!(v.on_drag_end(pos));
    assert_eq!(v.animation_state(), AnimationMode::Snap);
    let s = v.animation_session().unwrap();
    assert_eq!(s.to_percent(), Some(0));
    assert_eq!(s.duration_ms(), Some(200));

    assert_eq!(v.tick(100), Some(5));
    assert_eq!(v.tick(100), Some(0));
    assert_eq!(v.percent(), 0);
    assert_eq!(v.animation_state(), AnimationMode::Idle);
}

#[test]
fn release_mid_range_does_not_snap() {
    let mut v = ready_view();
    let pos = along_left_edge(0.505);
    v.on_drag_start(pos);
    v.on_drag_move(pos);
    assert_eq!(v.percent(), 50);
    v.on_drag_end(pos);
    assert_eq!(v.animation_state(), AnimationMode::Idle);
    assert!(v.animation_session().is_none());
}

#[test]
fn drag_ignored_while_snapping_or_disabled() {
    let mut v = ready_view();
    v.set_percent(90);
    v.on_drag_move(Point::new(200.0, 0.0));
    v.on_drag_end(Point::new(200.0, 0.0));
    assert_eq!(v.animation_state(), AnimationMode::Idle);
    assert_eq!(v.percent(), 100);

    v.set_percent(95);
    v.on_drag_move(along_left_edge(0.955));
    v.on_drag_end(along_left_edge(0.955));
    assert_eq!(v.animation_state(), AnimationMode::Snap);
    let during = v.percent();
    v.on_drag_move(Point::new(0.0, 100.0));
    assert_eq!(v.percent(), during);

    v.cancel_animation();
    v.set_unveil_on_touch(false);
    assert!(!v.on_drag_move(Point::new(0.0, 100.0)));
    assert_eq!(v.percent(), during);
}

#[test]
fn drag_without_both_layers_is_ignored() {
    let mut v = View::default();
    v.set_viewport(Viewport::new(100, 100));
    v.set_content(LayerSlot::Background, Some(FakeImage::new(100, 100)));
    v.on_drag_move(Point::new(0.0, 100.0));
    assert_eq!(v.percent(), 50);
    assert_eq!(v.animation_state(), AnimationMode::Idle);
}

#[test]
fn pointer_outside_frame_is_rejected() {
    let mut v = ready_view();
    v.set_percent(40);
    v.on_drag_move(Point::new(500.0, -300.0));
    assert_eq!(v.percent(), 40);
}

#[test]
fn automatic_animation_lifecycle() {
    let mut v = ready_view();
    v.set_percent(30);
    assert!(v.set_automatic_animation(true, 1000));
    assert_eq!(v.animation_state(), AnimationMode::Automatic);
    let s = v.animation_session().unwrap();
    assert_eq!(s.from_percent(), Some(30));
    assert_eq!(s.to_percent(), Some(100));
    assert_eq!(s.duration_ms(), Some(700));

    assert_eq!(v.tick(350), Some(65));
    assert!(v.set_automatic_animation(false, 1000));
    assert_eq!(v.animation_state(), AnimationMode::Idle);
    assert_eq!(v.tick(350), None);
    assert_eq!(v.percent(), 65);

    v.set_automatic_animation(true, 1000);
    let s = v.animation_session().unwrap();
    assert_eq!(s.from_percent(), Some(65));
    assert_eq!(s.duration_ms(), Some(350));
}

#[test]
fn automatic_suppresses_drag_and_save() {
    let mut v = ready_view();
    v.set_automatic_animation(true, 600);
    let p = v.percent();
    v.on_drag_move(Point::new(0.0, 100.0));
    assert_eq!(v.percent(), p);
    assert!(v.save_state().is_none());
}

#[test]
fn automatic_waits_for_both_layers() {
    let mut v = View::default();
    v.set_viewport(Viewport::new(100, 100));
    assert!(v.set_automatic_animation(true, 500));
    assert_eq!(v.animation_state(), AnimationMode::Idle);

    v.set_content(LayerSlot::Background, Some(FakeImage::new(10, 10)));
    assert_eq!(v.animation_state(), AnimationMode::Idle);
    v.set_content(LayerSlot::Foreground, Some(FakeImage::new(10, 10)));
    assert_eq!(v.animation_state(), AnimationMode::Automatic);

    v.set_content(LayerSlot::Foreground, None);
    assert_eq!(v.animation_state(), AnimationMode::Idle);
}

#[test]
fn automatic_rejects_zero_duration() {
    let mut v = ready_view();
    assert!(!v.set_automatic_animation(true, 0));
    assert!(!v.automatic_animation_enabled());
    assert_eq!(v.animation_state(), AnimationMode::Idle);
}

#[test]
fn disable_automatic_ignores_zero_duration() {
    let mut v = ready_view();
    assert!(v.set_automatic_animation(true, 1000));
    v.tick(100);
    let p = v.percent();

    assert!(v.set_automatic_animation(false, 0));
    assert!(!v.automatic_animation_enabled());
    assert_eq!(v.animation_state(), AnimationMode::Idle);
    assert_eq!(v.automatic_animation_duration_ms(), 1000);
    assert_eq!(v.tick(100), None);
    assert_eq!(v.percent(), p);
}

#[test]
fn cancel_keeps_automatic_flag() {
    let mut v = ready_view();
    v.set_automatic_animation(true, 600);
    assert_eq!(v.cancel_animation(), AnimationMode::Automatic);
    assert!(v.automatic_animation_enabled());
    assert_eq!(v.animation_state(), AnimationMode::Idle);

    v.set_content(LayerSlot::Background, Some(FakeImage::new(200, 100)));
    assert_eq!(v.animation_state(), AnimationMode::Automatic);
}

#[test]
fn render_frame_carries_geometry() {
    let mut v = View::default();
    assert!(v.render().is_none());

    v.set_viewport(Viewport::new(120, 120).with_padding(Padding {
        left: 10,
        top: 10,
        right: 10,
        bottom: 10,
    }));
    v.set_fit_policy(FitPolicy::CenterNoScale);
    v.set_content(LayerSlot::Background, Some(FakeImage::new(50, 50)));
    v.set_content(LayerSlot::Foreground, Some(FakeImage::new(50, 50)));

    let frame = v.render().unwrap();
    assert_eq!(frame.origin, Vec2::new(10.0, 10.0));
    assert_eq!(frame.clip, None);
    assert_eq!(frame.transform, Some(Affine::translate((25.0, 25.0))));
    assert!(frame.boundary.is_some());
    assert!(frame.debug_outline.is_none());
    assert!(frame.background.is_some() && frame.foreground.is_some());

    v.set_debug_outline(true);
    v.set_crop_to_padding(true);
    let frame = v.render().unwrap();
    assert_eq!(frame.debug_outline, frame.boundary);
    assert_eq!(frame.clip, Some(Rect::new(10.0, 10.0, 110.0, 110.0)));
}

#[test]
fn render_skips_empty_content() {
    let mut v = View::default();
    v.set_viewport(Viewport::new(100, 100));
    v.set_content(LayerSlot::Background, Some(FakeImage::new(0, 40)));
    assert!(v.render().is_none());
}

#[test]
fn save_and_restore_roundtrip() {
    let mut v = ready_view();
    v.set_percent(77);
    let saved = v.save_state().unwrap();
    assert_eq!(saved.split_percent, 77);

    let mut fresh = ready_view();
    let redraws = fresh.host().redraws;
    assert!(fresh.restore_state(saved));
    assert_eq!(fresh.percent(), 77);
    assert_eq!(fresh.host().redraws, redraws + 1);

    assert!(fresh.restore_state(saved));
    assert_eq!(fresh.host().redraws, redraws + 1);

    assert!(!fresh.restore_state(SavedState { split_percent: 200 }));
    assert_eq!(fresh.percent(), 77);
}

#[test]
fn uri_resolution_failure_leaves_slot_empty() {
    let mut v = View::default();
    let mut failing =
        |uri: &str| -> anyhow::Result<FakeImage> { anyhow::bail!("no such file: {uri}") };
    assert!(v
        .set_content_uri(LayerSlot::Background, "file:///missing.png", &mut failing)
        .is_none());
    assert!(v.layer(LayerSlot::Background).is_none());

    let mut ok = |_uri: &str| -> anyhow::Result<FakeImage> { Ok(FakeImage::new(8, 8)) };
    v.set_content_uri(LayerSlot::Background, "file:///a.png", &mut ok);
    assert_eq!(
        v.layer(LayerSlot::Background).unwrap().intrinsic_size(),
        ContentSize::new(8, 8)
    );
}

#[test]
fn from_config_applies_settings_and_rejects_bad_percent() {
    let cfg = SplitViewConfig {
        split_percent: 100,
        snap_to_bounds: false,
        fit_policy: FitPolicy::Fill,
        automatic_animation_duration_ms: 2000,
        ..SplitViewConfig::default()
    };
    let v = View::from_config(&cfg, RecordingHost::default()).unwrap();
    assert_eq!(v.percent(), 100);
    assert!(!v.snap_to_bounds());
    assert_eq!(v.fit_policy(), FitPolicy::Fill);
    assert_eq!(v.automatic_animation_duration_ms(), 2000);

    let bad = SplitViewConfig {
        split_percent: -4,
        ..SplitViewConfig::default()
    };
    assert!(View::from_config(&bad, RecordingHost::default()).is_err());
}
