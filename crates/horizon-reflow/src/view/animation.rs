//! Cell animations.
//!
//! Each committed batch gives the cells it touches a [`CellAnimation`]:
//! inserted cells fade in, removed cells fade out, cells whose slot changed
//! slide to their new frame and reloaded cells cross-fade to their new
//! content. The view drives them with explicit time steps, so behavior is
//! deterministic and independent of a frame clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    #[default]
    EaseInOut,
    /// Cubic ease-out (more pronounced than quadratic).
    EaseOutCubic,
}

/// Apply an easing function to a progress value.
///
/// # Example
///
/// ```
/// use horizon_reflow::view::{Easing, ease};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
    }
}

/// Interpolate between two values using an easing function.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}

/// How a cell's opacity changes during an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    /// From hidden to fully visible.
    In,
    /// From fully visible to hidden.
    Out,
    /// Dips out and back in while the content is swapped.
    Cross,
}

/// A running animation on one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellAnimation {
    slide: Option<(f32, f32)>,
    fade: Option<Fade>,
    easing: Easing,
    duration: Duration,
    elapsed: Duration,
}

impl CellAnimation {
    /// Creates an animation that changes nothing until a slide or fade is added.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            slide: None,
            fade: None,
            easing,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Slides the cell's top edge from `from_y` to `to_y`.
    pub fn with_slide(mut self, from_y: f32, to_y: f32) -> Self {
        self.slide = Some((from_y, to_y));
        self
    }

    /// Adds an opacity change.
    pub fn with_fade(mut self, fade: Fade) -> Self {
        self.fade = Some(fade);
        self
    }

    /// Returns `true` if the animation changes neither frame nor opacity.
    pub fn is_noop(&self) -> bool {
        self.slide.is_none() && self.fade.is_none()
    }

    /// The fade, if any.
    pub fn fade(&self) -> Option<Fade> {
        self.fade
    }

    /// Advances the clock by `delta`. Returns `true` once finished.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.is_finished()
    }

    /// Jumps to the end state.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    /// Returns `true` once the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        }
    }

    /// Top edge at the current progress, if the cell slides.
    pub fn y(&self) -> Option<f32> {
        self.slide
            .map(|(from, to)| lerp_eased(self.easing, from, to, self.progress()))
    }

    /// Opacity at the current progress.
    pub fn opacity(&self) -> f32 {
        let t = ease(self.easing, self.progress());
        match self.fade {
            Some(Fade::In) => t,
            Some(Fade::Out) => 1.0 - t,
            Some(Fade::Cross) => (1.0 - 2.0 * t).abs(),
            None => 1.0,
        }
    }
}
