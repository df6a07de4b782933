//! Platform-agnostic repetition counting and telemetry logic.
//!
//! This crate holds everything the two tracker nodes do that is not tied to
//! a particular board. Hardware is reached through three traits, so the
//! same logic runs on the RP2040 firmware and in host tests.
//!
//! # Overview
//!
//! - [`sample`]: raw and scaled accelerometer readings
//! - [`detector`]: per-mode thresholds and the hysteresis latch ([`RepetitionDetector`])
//! - [`mode`]: debounced mode button ([`ModeController`])
//! - [`transmitter`]: send path and delivery tracking ([`TelemetryTransmitter`])
//! - [`receiver`]: receive path and screen layout ([`TelemetryReceiver`])
//! - [`node`]: the transmitter unit's main loop ([`TransmitterNode`])
//! - [`flag`]: interrupt-to-loop handoff ([`EventFlag`])
//!
//! Collaborators are abstracted by [`MotionSource`], [`RadioLink`] and
//! [`TextDisplay`].
//!
//! # Example
//!
//! ```rust
//! use repcount_core::{AccelerationSample, ExerciseMode, RepetitionDetector};
//!
//! let mut detector = RepetitionDetector::new();
//! for ax in [0.5, 1.2, 0.9, 0.7, 1.3] {
//!     detector.process(ExerciseMode::Walking, &AccelerationSample::new(ax, 0.0, 0.0));
//! }
//! assert_eq!(detector.count(), 2);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Route internal logging through the `log` facade

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Must come first so the logging macros are visible to every module.
mod fmt;

pub mod config;
pub mod detector;
pub mod display;
pub mod error;
pub mod flag;
pub mod mode;
pub mod motion;
pub mod node;
pub mod radio;
pub mod receiver;
pub mod sample;
pub mod transmitter;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use config::{SendPolicy, TrackerConfig, DEFAULT_CONFIG, DEFAULT_DEBOUNCE_MS};
pub use detector::{threshold_spec, RepetitionDetector, RepetitionState, ThresholdSpec, THRESHOLDS};
pub use display::{DisplayError, TextDisplay};
pub use error::NodeError;
pub use flag::EventFlag;
pub use mode::ModeController;
pub use motion::{MotionSource, SensorError};
pub use node::TransmitterNode;
pub use radio::{RadioError, RadioLink, MAX_PAYLOAD_LEN};
pub use receiver::{render_idle, render_packet, TelemetryReceiver};
pub use sample::{AccelerationSample, RawAcceleration};
pub use transmitter::{
    DeliveryReport, LinkStats, TelemetryTransmitter, TransmissionOutcome, TransmitState,
};

pub use repcount_proto::{ExerciseMode, TelemetryPacket, RADIO_ADDRESS, RADIO_PIPE};
