//! Time-bounded interpolation of scene and overlay properties.
//!
//! A property that can be animated lives in an [`Animated`] slot. Each slot
//! holds at most one in-flight [`Tween`]: starting a new tween on a slot cancels
//! whatever was running there, and the new tween begins from the value the slot
//! currently shows. That makes the last writer win on every property.
//!
//! [`Timeline`] places several `from_to` tweens relative to each other, either
//! appended after the previous one or starting together with it.

use glam::Vec3;

use crate::color::Color;

/// Easing functions for smooth transitions.
///
/// These control the acceleration curve of tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed throughout.
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate. The default curve for every tween.
    #[default]
    EaseOut,
    /// Start slow, speed up, then slow down.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
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
        }
    }
}

/// Values that can be interpolated component-wise.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Color {
    fn lerp(self, to: Self, t: f32) -> Self {
        Color::rgba(
            self.r.lerp(to.r, t),
            self.g.lerp(to.g, t),
            self.b.lerp(to.b, t),
            self.a.lerp(to.a, t),
        )
    }
}

/// Duration and easing applied to tweens that don't say otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenDefaults {
    /// Duration in seconds.
    pub duration: f32,
    pub easing: Easing,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self {
            duration: 0.8,
            easing: Easing::EaseOut,
        }
    }
}

/// A single interpolation from `from` to `to` starting at an absolute time.
#[derive(Clone, Copy, Debug)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    /// Session time in seconds at which the tween starts moving.
    pub start: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start: f32, defaults: TweenDefaults) -> Self {
        Self {
            from,
            to,
            start,
            duration: defaults.duration,
            easing: defaults.easing,
        }
    }

    /// Linear progress at `time`, clamped to 0.0..=1.0.
    pub fn progress(&self, time: f32) -> f32 {
        if self.duration <= 0.0 {
            return if time >= self.start { 1.0 } else { 0.0 };
        }
        ((time - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, time: f32) -> T {
        let t = self.easing.apply(self.progress(time));
        if t >= 1.0 {
            self.to
        } else {
            self.from.lerp(self.to, t)
        }
    }

    pub fn is_finished(&self, time: f32) -> bool {
        self.progress(time) >= 1.0
    }
}

/// A property slot holding its current value and at most one in-flight tween.
#[derive(Clone, Debug)]
pub struct Animated<T> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    /// The value as of the last [`update`](Self::update) or write.
    pub fn value(&self) -> T {
        self.value
    }

    /// Overwrite the value, cancelling any in-flight tween.
    pub fn set(&mut self, value: T) {
        self.tween = None;
        self.value = value;
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// The in-flight tween's destination, if any.
    pub fn target(&self) -> Option<T> {
        self.tween.map(|t| t.to)
    }

    /// Tween from `from` to `to`, showing `from` immediately even when `start`
    /// lies in the future. Cancels any in-flight tween.
    pub fn from_to(&mut self, from: T, to: T, start: f32, defaults: TweenDefaults) {
        self.value = from;
        self.tween = Some(Tween::new(from, to, start, defaults));
    }

    /// Tween from the current value to `to`, starting at `now`.
    ///
    /// Cancels any in-flight tween first; returns `true` when one was cancelled.
    pub fn animate_to(&mut self, to: T, now: f32, defaults: TweenDefaults) -> bool {
        let cancelled = self.tween.take().is_some();
        self.tween = Some(Tween::new(self.value, to, now, defaults));
        cancelled
    }

    /// Advance to `time` and return the resulting value.
    pub fn update(&mut self, time: f32) -> T {
        if let Some(tween) = self.tween {
            self.value = tween.value_at(time);
            if tween.is_finished(time) {
                self.tween = None;
            }
        }
        self.value
    }
}

/// Where a timeline entry starts relative to the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// Start when the previous entry ends.
    Append,
    /// Start together with the previous entry.
    #[default]
    WithPrevious,
}

/// Places `from_to` tweens on a shared time axis.
#[derive(Clone, Debug)]
pub struct Timeline {
    origin: f32,
    defaults: TweenDefaults,
    last_start: f32,
    end: f32,
}

impl Timeline {
    /// A timeline beginning at session time `origin`.
    pub fn new(origin: f32, defaults: TweenDefaults) -> Self {
        Self {
            origin,
            defaults,
            last_start: 0.0,
            end: 0.0,
        }
    }

    /// Add a tween on `slot` at `position`.
    pub fn from_to<T: Lerp>(
        &mut self,
        slot: &mut Animated<T>,
        from: T,
        to: T,
        position: Position,
    ) -> &mut Self {
        let offset = match position {
            Position::Append => self.end,
            Position::WithPrevious => self.last_start,
        };
        slot.from_to(from, to, self.origin + offset, self.defaults);
        self.last_start = offset;
        self.end = self.end.max(offset + self.defaults.duration);
        self
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f32 {
        self.end
    }
}
