use std::collections::VecDeque;

use crate::{
    foundation::core::{MAX_PERCENT, MIN_PERCENT, checked_percent},
    foundation::error::{SplitError, SplitResult},
};

/// Distance from either edge within which a released drag snaps to that edge.
pub const SNAP_MARGIN_PERCENT: u8 = 15;
/// Snap speed: this many milliseconds per [`SNAP_MARGIN_PERCENT`] points travelled.
pub const SNAP_MS_PER_MARGIN: u64 = 300;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    #[default]
    Idle,
    Drag,
    Snap,
    Automatic,
}

/// One linear stretch of an animation: `from -> to` over `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Leg {
    from: u8,
    to: u8,
    duration_ms: u64,
}

impl Leg {
    pub fn new(from: i32, to: i32, duration_ms: u64) -> SplitResult<Self> {
        let (Ok(from), Ok(to)) = (checked_percent(from), checked_percent(to)) else {
            return Err(SplitError::animation(format!(
                "leg bounds must be within 0..=100 (got {from} -> {to})"
            )));
        };
        Ok(Self {
            from,
            to,
            duration_ms,
        })
    }

    pub fn from_percent(&self) -> u8 {
        self.from
    }

    pub fn to_percent(&self) -> u8 {
        self.to
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Integer percent at `elapsed_ms`, truncating toward `from`; `to` once the leg is over.
    pub fn sample(&self, elapsed_ms: u64) -> u8 {
        if elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let t = elapsed_ms as f64 / self.duration_ms as f64;
        let delta = (f64::from(self.to) - f64::from(self.from)) * t;
        (i32::from(self.from) + delta.trunc() as i32)
            .clamp(i32::from(MIN_PERCENT), i32::from(MAX_PERCENT)) as u8
    }
}

/// Where the session stands after a clock step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub percent: u8,
    pub finished: bool,
}

/// A timed animation: a queue of legs consumed front to back, optionally refilled
/// from `cycle` forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationSession {
    mode: AnimationMode,
    legs: VecDeque<Leg>,
    cycle: Vec<Leg>,
    elapsed_ms: u64,
}

impl AnimationSession {
    /// Snap from `from` to `to` at the fixed snap speed.
    pub fn snap(from: i32, to: i32) -> SplitResult<Self> {
        let distance = u64::from(from.abs_diff(to));
        let duration = SNAP_MS_PER_MARGIN * distance / u64::from(SNAP_MARGIN_PERCENT);
        let leg = Leg::new(from, to, duration)?;
        Ok(Self {
            mode: AnimationMode::Snap,
            legs: VecDeque::from([leg]),
            cycle: Vec::new(),
            elapsed_ms: 0,
        })
    }

    /// Run `from -> 100` at the automatic speed, then `100 -> 0 -> 100` forever.
    pub fn automatic(from: i32, duration_ms: u64) -> SplitResult<Self> {
        if duration_ms == 0 {
            return Err(SplitError::animation(
                "automatic animation duration must be > 0",
            ));
        }
        let max = i32::from(MAX_PERCENT);
        let min = i32::from(MIN_PERCENT);
        let intro_ms = duration_ms * u64::from(max.abs_diff(from)) / 100;
        let intro = Leg::new(from, max, intro_ms)?;

        let mut legs = VecDeque::with_capacity(2);
        if intro.duration_ms > 0 {
            legs.push_back(intro);
        }
        let cycle = vec![
            Leg::new(max, min, duration_ms)?,
            Leg::new(min, max, duration_ms)?,
        ];
        if legs.is_empty() {
            legs.extend(cycle.iter().copied());
        }

        Ok(Self {
            mode: AnimationMode::Automatic,
            legs,
            cycle,
            elapsed_ms: 0,
        })
    }

    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// The leg currently being played.
    pub fn current_leg(&self) -> Option<&Leg> {
        self.legs.front()
    }

    pub fn from_percent(&self) -> Option<u8> {
        self.current_leg().map(Leg::from_percent)
    }

    pub fn to_percent(&self) -> Option<u8> {
        self.current_leg().map(Leg::to_percent)
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.current_leg().map(Leg::duration_ms)
    }

    /// Time spent in the current leg.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn repeats(&self) -> bool {
        !self.cycle.is_empty()
    }

    /// Advance the clock by `delta_ms`, carrying leftover time into following legs.
    pub(crate) fn advance(&mut self, delta_ms: u64) -> Step {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        let mut last = None;

        while let Some(leg) = self.legs.front().copied() {
            if self.elapsed_ms < leg.duration_ms {
                return Step {
                    percent: leg.sample(self.elapsed_ms),
                    finished: false,
                };
            }
            self.elapsed_ms -= leg.duration_ms;
            self.legs.pop_front();
            last = Some(leg.to);

            if self.legs.is_empty() && !self.cycle.is_empty() {
                let period: u64 = self.cycle.iter().map(|l| l.duration_ms).sum();
                if period > 0 {
                    self.elapsed_ms %= period;
                }
                self.legs.extend(self.cycle.iter().copied());
            }
        }

        self.elapsed_ms = 0;
        Step {
            percent: last.unwrap_or(MAX_PERCENT),
            finished: true,
        }
    }
}

/// Nearest edge for a released drag, if `percent` lies within the snap margin and
/// is not already on that edge.
pub fn snap_target(percent: u8) -> Option<u8> {
    let target = if percent <= SNAP_MARGIN_PERCENT {
        MIN_PERCENT
    } else if percent >= MAX_PERCENT - SNAP_MARGIN_PERCENT {
        MAX_PERCENT
    } else {
        return None;
    };
    (target != percent).then_some(target)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/session.rs"]
mod tests;
