//! Compile-time tracker configuration.

/// Debounce interval applied after the mode button is first seen pressed.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// When the transmitter pushes a telemetry packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendPolicy {
    /// Only after a mode change, carrying the new mode and a zero count.
    #[default]
    ModeChange,
    /// After a mode change and after every counted repetition.
    EveryRepetition,
}

/// Tunables for the transmitter node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerConfig {
    /// Debounce interval in milliseconds. The node loop is paused for this long.
    pub debounce_ms: u32,
    pub send_policy: SendPolicy,
}

/// Configuration matching the reference hardware.
pub const DEFAULT_CONFIG: TrackerConfig = TrackerConfig {
    debounce_ms: DEFAULT_DEBOUNCE_MS,
    send_policy: SendPolicy::ModeChange,
};

impl Default for TrackerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
