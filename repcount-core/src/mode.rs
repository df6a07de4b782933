//! Exercise mode selection from the mode button.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use repcount_proto::ExerciseMode;

use crate::config::DEFAULT_DEBOUNCE_MS;

/// Owns the current exercise mode and the mode button.
///
/// The button is active-low (pull-up, pressed = low). A press is accepted
/// once per released → pressed edge: the pin must still read low after the
/// debounce interval. Holding the button does not repeat.
pub struct ModeController<P> {
    pin: P,
    mode: ExerciseMode,
    debounce_ms: u32,
    /// Debounced level from the last accepted press until release.
    latched: bool,
}

impl<P: InputPin> ModeController<P> {
    /// Create a controller starting in [`ExerciseMode::Walking`].
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self::with_debounce(pin, DEFAULT_DEBOUNCE_MS)
    }

    /// Create a controller with a custom debounce interval.
    #[must_use]
    pub fn with_debounce(pin: P, debounce_ms: u32) -> Self {
        Self {
            pin,
            mode: ExerciseMode::default(),
            debounce_ms,
            latched: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ExerciseMode {
        self.mode
    }

    /// Sample the button once.
    ///
    /// On a new press this awaits the debounce interval, which pauses the
    /// caller's loop, and returns the newly selected mode.
    pub async fn poll<D: DelayNs>(&mut self, delay: &mut D) -> Option<ExerciseMode> {
        if !self.is_pressed() {
            self.latched = false;
            return None;
        }
        if self.latched {
            return None;
        }

        delay.delay_ms(self.debounce_ms).await;
        if !self.is_pressed() {
            trace!("Mode button bounce ignored");
            return None;
        }

        self.latched = true;
        self.mode = self.mode.next();
        info!("Exercise mode -> {:?}", self.mode);
        Some(self.mode)
    }

    /// Read errors count as released.
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(_) => {
                warn!("Mode button read failed");
                false
            }
        }
    }

    /// Release the button pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}
