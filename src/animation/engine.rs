//! Split animation state machine.
//!
//! ```text
//! Idle --first drag move--> Drag --release near edge--> Snap --done--> Idle
//!                            \--release elsewhere-----> Idle
//! Idle/Drag --automatic enabled--> Automatic --disable/cancel--> Idle
//! ```
//!
//! The engine never writes the percentage itself: [`AnimationEngine::tick`] returns the
//! value for the owner to push through the percentage controller.

use crate::{
    animation::session::{AnimationMode, AnimationSession, snap_target},
    foundation::error::SplitResult,
};

#[derive(Clone, Debug, Default)]
pub struct AnimationEngine {
    dragging: bool,
    session: Option<AnimationSession>,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnimationMode {
        match &self.session {
            Some(s) => s.mode(),
            None if self.dragging => AnimationMode::Drag,
            None => AnimationMode::Idle,
        }
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    /// A timed session (snap or automatic) is in flight.
    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Enter `Drag`. Ignored while a timed session runs.
    pub fn begin_drag(&mut self) -> bool {
        if self.session.is_some() {
            return false;
        }
        if !self.dragging {
            tracing::debug!("split animation: idle -> drag");
        }
        self.dragging = true;
        true
    }

    /// Leave `Drag`. Starts a snap toward the nearer edge when `snap_enabled` and the
    /// current `percent` is within the margin. Returns whether a snap session started.
    pub fn end_drag(&mut self, percent: u8, snap_enabled: bool) -> SplitResult<bool> {
        if !std::mem::take(&mut self.dragging) {
            return Ok(false);
        }
        match snap_target(percent).filter(|_| snap_enabled) {
            Some(target) => {
                self.start_snap(i32::from(percent), i32::from(target))?;
                Ok(true)
            }
            None => {
                tracing::debug!(percent, "split animation: drag -> idle");
                Ok(false)
            }
        }
    }

    /// Start a snap session, replacing whatever was running.
    pub fn start_snap(&mut self, from: i32, to: i32) -> SplitResult<()> {
        let session = AnimationSession::snap(from, to)?;
        self.install(session);
        Ok(())
    }

    /// Start the automatic oscillation from `from`, replacing whatever was running.
    pub fn start_automatic(&mut self, from: i32, duration_ms: u64) -> SplitResult<()> {
        let session = AnimationSession::automatic(from, duration_ms)?;
        self.install(session);
        Ok(())
    }

    fn install(&mut self, session: AnimationSession) {
        self.cancel();
        tracing::debug!(
            mode = ?session.mode(),
            from = ?session.from_percent(),
            to = ?session.to_percent(),
            duration_ms = ?session.duration_ms(),
            "split animation: session started"
        );
        self.session = Some(session);
    }

    /// Drop any session and drag; returns the mode that was active.
    pub fn cancel(&mut self) -> AnimationMode {
        let prev = self.state();
        self.dragging = false;
        if self.session.take().is_some() {
            tracing::debug!(mode = ?prev, "split animation: session cancelled");
        }
        prev
    }

    /// Advance the running session. Returns the percentage to apply, if any.
    pub fn tick(&mut self, delta_ms: u64) -> Option<u8> {
        let session = self.session.as_mut()?;
        let step = session.advance(delta_ms);
        if step.finished {
            tracing::debug!(
                mode = ?session.mode(),
                percent = step.percent,
                "split animation: session finished"
            );
            self.session = None;
        }
        Some(step.percent)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
