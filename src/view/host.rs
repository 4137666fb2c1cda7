//! Seams to the embedding host: drawables, redraw scheduling, content loading.

use crate::foundation::core::ContentSize;

/// Which of the two stacked layers an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSlot {
    /// Drawn first, revealed where the foreground is clipped away.
    Background,
    /// Drawn inside the split boundary.
    Foreground,
}

/// Opaque drawable handle owned by the view while attached.
pub trait Drawable {
    /// Intrinsic size; negative components mean unknown.
    fn intrinsic_size(&self) -> ContentSize;

    fn set_visible(&mut self, _visible: bool) {}
}

/// A bare size stands in for content in tools and tests.
impl Drawable for ContentSize {
    fn intrinsic_size(&self) -> ContentSize {
        *self
    }
}

/// Fire-and-forget requests to the embedding host. The host may coalesce them.
pub trait FrameHost {
    fn request_redraw(&mut self);

    fn request_layout(&mut self) {}
}

/// Host that drops every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl FrameHost for NullHost {
    fn request_redraw(&mut self) {}
}

/// Turns a resource identifier into a drawable. Loading is entirely the host's business.
pub trait ContentResolver<D> {
    fn resolve(&mut self, uri: &str) -> anyhow::Result<D>;
}

impl<D, F> ContentResolver<D> for F
where
    F: FnMut(&str) -> anyhow::Result<D>,
{
    fn resolve(&mut self, uri: &str) -> anyhow::Result<D> {
        self(uri)
    }
}
