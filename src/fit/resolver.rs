//! Fit resolution: where and how large each layer is drawn inside the viewport.

use crate::{
    fit::policy::{Anchor, FitPolicy},
    foundation::core::{Affine, ContentSize, Size, Vec2},
};

/// Result of fitting content into a viewport.
///
/// `draw_size` is the box each layer is asked to draw into (before `transform`).
/// `transform == None` means "draw unmodified"; an identity matrix is never stored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitResolution {
    pub draw_size: Size,
    pub transform: Option<Affine>,
}

impl FitResolution {
    fn stretched(view_w: i32, view_h: i32) -> Self {
        Self {
            draw_size: Size::new(f64::from(view_w), f64::from(view_h)),
            transform: None,
        }
    }

    /// The effective matrix, with `None` expanded to identity.
    pub fn affine(&self) -> Affine {
        self.transform.unwrap_or(Affine::IDENTITY)
    }
}

/// Map `content` into a `view_w x view_h` box under `policy`.
///
/// Unknown (negative) or zero content sizes never fail; they degrade to a stretched,
/// untransformed draw. Pass [`ContentSize::UNKNOWN`] when either layer is missing.
pub fn resolve(
    content: ContentSize,
    view_w: i32,
    view_h: i32,
    policy: FitPolicy,
    explicit: Option<Affine>,
) -> FitResolution {
    let (dw, dh) = (content.width, content.height);

    if dw <= 0 || dh <= 0 || policy == FitPolicy::Fill {
        return FitResolution::stretched(view_w, view_h);
    }

    let draw_size = Size::new(f64::from(dw), f64::from(dh));
    let fits = (dw < 0 || view_w == dw) && (dh < 0 || view_h == dh);

    let transform = match policy {
        FitPolicy::RawMatrix => explicit.filter(|m| *m != Affine::IDENTITY),
        _ if fits => None,
        FitPolicy::CenterNoScale => Some(center_no_scale(dw, dh, view_w, view_h)),
        FitPolicy::CenterCrop => Some(center_crop(dw, dh, view_w, view_h)),
        FitPolicy::CenterInside => Some(center_inside(dw, dh, view_w, view_h)),
        FitPolicy::AlignStart | FitPolicy::AlignCenter | FitPolicy::AlignEnd => {
            let anchor = policy.anchor().unwrap_or(Anchor::Center);
            Some(rect_to_rect(
                draw_size,
                Size::new(f64::from(view_w), f64::from(view_h)),
                anchor,
            ))
        }
        FitPolicy::Fill => None,
    };

    FitResolution {
        draw_size,
        transform: transform.filter(|m| *m != Affine::IDENTITY),
    }
}

/// Pixel snap used for centering offsets: add one half, then truncate toward zero.
fn snap(v: f64) -> f64 {
    (v + 0.5).trunc()
}

fn center_no_scale(dw: i32, dh: i32, vw: i32, vh: i32) -> Affine {
    let dx = snap(f64::from(vw - dw) * 0.5);
    let dy = snap(f64::from(vh - dh) * 0.5);
    Affine::translate(Vec2::new(dx, dy))
}

fn center_crop(dw: i32, dh: i32, vw: i32, vh: i32) -> Affine {
    let (dw_f, dh_f) = (f64::from(dw), f64::from(dh));
    let (vw_f, vh_f) = (f64::from(vw), f64::from(vh));

    let (scale, dx, dy) = if i64::from(dw) * i64::from(vh) > i64::from(vw) * i64::from(dh) {
        let scale = vh_f / dh_f;
        (scale, (vw_f - dw_f * scale) * 0.5, 0.0)
    } else {
        let scale = vw_f / dw_f;
        (scale, 0.0, (vh_f - dh_f * scale) * 0.5)
    };

    Affine::translate(Vec2::new(snap(dx), snap(dy))) * Affine::scale(scale)
}

fn center_inside(dw: i32, dh: i32, vw: i32, vh: i32) -> Affine {
    let (dw_f, dh_f) = (f64::from(dw), f64::from(dh));
    let (vw_f, vh_f) = (f64::from(vw), f64::from(vh));

    let scale = if dw <= vw && dh <= vh {
        1.0
    } else {
        (vw_f / dw_f).min(vh_f / dh_f)
    };
    let dx = snap((vw_f - dw_f * scale) * 0.5);
    let dy = snap((vh_f - dh_f * scale) * 0.5);

    Affine::translate(Vec2::new(dx, dy)) * Affine::scale(scale)
}

/// Uniform rect-to-rect mapping. The smaller of the two axis ratios wins; the
/// leftover space on the other axis is distributed according to `anchor`.
pub(crate) fn rect_to_rect(src: Size, dst: Size, anchor: Anchor) -> Affine {
    if src.width <= 0.0 || src.height <= 0.0 {
        return Affine::IDENTITY;
    }

    let sx = dst.width / src.width;
    let sy = dst.height / src.height;
    let x_larger = sx > sy;
    let scale = sx.min(sy);

    let slack = if x_larger {
        dst.width - src.width * scale
    } else {
        dst.height - src.height * scale
    };
    let shift = match anchor {
        Anchor::Start => 0.0,
        Anchor::Center => slack * 0.5,
        Anchor::End => slack,
    };
    let offset = if x_larger {
        Vec2::new(shift, 0.0)
    } else {
        Vec2::new(0.0, shift)
    };

    Affine::translate(offset) * Affine::scale(scale)
}

#[cfg(test)]
#[path = "../../tests/unit/fit/resolver.rs"]
mod tests;
