//! Accelerometer samples.

/// Full-scale range of the accelerometer in g (±2 g).
pub const FULL_SCALE_G: f32 = 2.0;

/// Raw counts spanning one half of the full-scale range.
const COUNTS_PER_RANGE: f32 = 32768.0;

/// Raw signed 16-bit counts for the three axes, as read from the sensor.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawAcceleration {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawAcceleration {
    #[must_use]
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Acceleration vector in g.
///
/// Ephemeral: produced once per loop iteration and consumed by the detector.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelerationSample {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
}

impl AccelerationSample {
    #[must_use]
    pub const fn new(ax: f32, ay: f32, az: f32) -> Self {
        Self { ax, ay, az }
    }

    /// Convert raw counts to g using the fixed ±2 g range.
    #[must_use]
    pub fn from_raw(raw: RawAcceleration) -> Self {
        Self {
            ax: counts_to_g(raw.x),
            ay: counts_to_g(raw.y),
            az: counts_to_g(raw.z),
        }
    }

    /// `true` when every component is a finite number.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.ax.is_finite() && self.ay.is_finite() && self.az.is_finite()
    }
}

impl From<RawAcceleration> for AccelerationSample {
    fn from(raw: RawAcceleration) -> Self {
        Self::from_raw(raw)
    }
}

#[inline]
fn counts_to_g(counts: i16) -> f32 {
    f32::from(counts) * FULL_SCALE_G / COUNTS_PER_RANGE
}
