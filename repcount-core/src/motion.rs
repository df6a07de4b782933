//! Motion sample source trait and error types.

use core::future::Future;

use crate::sample::{AccelerationSample, RawAcceleration};

/// Error type for accelerometer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// I2C/SPI bus error.
    Bus,
    /// Device did not identify as the expected part.
    UnexpectedDevice(u8),
    /// Device has not been initialised.
    NotReady,
}

/// Async trait for accelerometers.
///
/// Implementations return raw counts at the fixed ±2 g range; the conversion
/// to g is done by [`AccelerationSample::from_raw`].
pub trait MotionSource {
    /// Wake and configure the sensor.
    fn init(&mut self) -> impl Future<Output = Result<(), SensorError>>;

    /// Read the three acceleration axes as raw signed counts.
    fn read_raw(&mut self) -> impl Future<Output = Result<RawAcceleration, SensorError>>;

    /// Read one sample converted to g.
    fn read_sample(&mut self) -> impl Future<Output = Result<AccelerationSample, SensorError>> {
        async move { self.read_raw().await.map(AccelerationSample::from_raw) }
    }
}
