//! Repetition detection.
//!
//! Every exercise mode is counted by the same two-state hysteresis latch:
//!
//! ```text
//!            rising condition holds (count += 1)
//!   ┌───────┐ ─────────────────────────────────▶ ┌──────────┐
//!   │ Below │                                    │ Exceeded │
//!   └───────┘ ◀───────────────────────────────── └──────────┘
//!            falling condition holds
//! ```
//!
//! Only the thresholds differ between modes. They live in [`THRESHOLDS`],
//! one [`ThresholdSpec`] per [`ExerciseMode`].

use crate::sample::AccelerationSample;
use repcount_proto::{ExerciseMode, MODE_COUNT};

/// Accelerometer axis a condition reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    #[must_use]
    pub fn read(self, sample: &AccelerationSample) -> f32 {
        match self {
            Axis::X => sample.ax,
            Axis::Y => sample.ay,
            Axis::Z => sample.az,
        }
    }
}

/// Comparison between an axis value and a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Comparison {
    /// `value > threshold`
    Above,
    /// `value >= threshold`
    AtLeast,
    /// `value < threshold`
    Below,
    /// `value <= threshold`
    AtMost,
}

/// A single `axis <cmp> threshold` test.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Condition {
    pub axis: Axis,
    pub cmp: Comparison,
    pub threshold: f32,
}

impl Condition {
    #[must_use]
    pub const fn new(axis: Axis, cmp: Comparison, threshold: f32) -> Self {
        Self {
            axis,
            cmp,
            threshold,
        }
    }

    /// Evaluate the condition. Always `false` for NaN.
    #[inline]
    #[must_use]
    pub fn holds(&self, sample: &AccelerationSample) -> bool {
        let value = self.axis.read(sample);
        match self.cmp {
            Comparison::Above => value > self.threshold,
            Comparison::AtLeast => value >= self.threshold,
            Comparison::Below => value < self.threshold,
            Comparison::AtMost => value <= self.threshold,
        }
    }
}

/// Thresholds for one exercise mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdSpec {
    /// All must hold to leave [`RepetitionState::Below`].
    pub rising: &'static [Condition],
    /// Must hold to leave [`RepetitionState::Exceeded`].
    pub falling: Condition,
}

impl ThresholdSpec {
    #[inline]
    #[must_use]
    pub fn is_rising(&self, sample: &AccelerationSample) -> bool {
        self.rising.iter().all(|c| c.holds(sample))
    }

    #[inline]
    #[must_use]
    pub fn is_falling(&self, sample: &AccelerationSample) -> bool {
        self.falling.holds(sample)
    }
}

use Axis::{X, Y, Z};
use Comparison::{Above, AtLeast, AtMost, Below};

/// Per-mode thresholds, indexed by [`ExerciseMode::index`].
pub const THRESHOLDS: [ThresholdSpec; MODE_COUNT as usize] = [
    // Walking
    ThresholdSpec {
        rising: &[Condition::new(X, Above, 1.1)],
        falling: Condition::new(X, Below, 0.8),
    },
    // Jumping jacks
    ThresholdSpec {
        rising: &[Condition::new(Y, AtMost, 0.0)],
        falling: Condition::new(Y, Above, 0.5),
    },
    // Side shoulder stretch (Z)
    ThresholdSpec {
        rising: &[Condition::new(Z, AtLeast, 0.5)],
        falling: Condition::new(Z, Below, 0.0),
    },
    // Side shoulder stretch (Y and Z)
    ThresholdSpec {
        rising: &[Condition::new(Y, AtLeast, 0.5), Condition::new(Z, AtMost, 0.0)],
        falling: Condition::new(Z, Above, 0.25),
    },
    // Overhead shoulder stretch
    ThresholdSpec {
        rising: &[Condition::new(X, AtLeast, 0.5)],
        falling: Condition::new(X, Below, 0.25),
    },
];

/// Thresholds for `mode`.
#[inline]
#[must_use]
pub fn threshold_spec(mode: ExerciseMode) -> &'static ThresholdSpec {
    &THRESHOLDS[mode.index()]
}

/// Hysteresis latch state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RepetitionState {
    #[default]
    Below,
    Exceeded,
}

/// Result of feeding one sample through the latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub struct Step {
    pub next: RepetitionState,
    /// `true` on a Below → Exceeded edge.
    pub counted: bool,
}

/// Advance the latch by one sample.
///
/// Non-finite samples leave the state unchanged and never count.
pub fn step(spec: &ThresholdSpec, state: RepetitionState, sample: &AccelerationSample) -> Step {
    if !sample.is_finite() {
        return Step {
            next: state,
            counted: false,
        };
    }

    match state {
        RepetitionState::Below if spec.is_rising(sample) => Step {
            next: RepetitionState::Exceeded,
            counted: true,
        },
        RepetitionState::Exceeded if spec.is_falling(sample) => Step {
            next: RepetitionState::Below,
            counted: false,
        },
        _ => Step {
            next: state,
            counted: false,
        },
    }
}

/// Latch state plus the repetition counter for the current mode epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepetitionDetector {
    state: RepetitionState,
    count: u16,
}

impl RepetitionDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: RepetitionState::Below,
            count: 0,
        }
    }

    /// Feed one sample. Returns `true` if a repetition was counted.
    ///
    /// The counter saturates at `u16::MAX`.
    pub fn process(&mut self, mode: ExerciseMode, sample: &AccelerationSample) -> bool {
        let Step { next, counted } = step(threshold_spec(mode), self.state, sample);
        self.state = next;
        if counted {
            self.count = self.count.saturating_add(1);
        }
        counted
    }

    /// Back to `(0, Below)`. Called on every mode change.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> u16 {
        self.count
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> RepetitionState {
        self.state
    }
}
