//! Telemetry transmission and delivery tracking.

use repcount_proto::{Address, TelemetryPacket, RADIO_ADDRESS, RADIO_PIPE};

use crate::radio::{RadioError, RadioLink};

/// Delivery outcome reported by the radio after a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmissionOutcome {
    Success,
    Failure,
}

/// Transmit lifecycle.
///
/// `Delivered` and `Dropped` record how the last packet ended; both accept a
/// new send just like `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitState {
    #[default]
    Idle,
    InFlight,
    Delivered,
    Dropped,
}

/// Running link counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Packets handed to the radio.
    pub sent: u32,
    /// Packets acknowledged by the receiver.
    pub delivered: u32,
    /// Packets that exhausted the radio's retransmits.
    pub dropped: u32,
}

/// A settled transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeliveryReport {
    pub packet: TelemetryPacket,
    pub outcome: TransmissionOutcome,
}

/// Sends [`TelemetryPacket`]s to the fixed radio address.
///
/// There is no retry: a failed delivery is counted and dropped, and the
/// next send proceeds normally.
pub struct TelemetryTransmitter<R> {
    radio: R,
    address: Address,
    state: TransmitState,
    in_flight: Option<TelemetryPacket>,
    stats: LinkStats,
}

impl<R: RadioLink> TelemetryTransmitter<R> {
    /// Create a transmitter sending to [`RADIO_ADDRESS`].
    pub fn new(radio: R) -> Self {
        Self {
            radio,
            address: RADIO_ADDRESS,
            state: TransmitState::Idle,
            in_flight: None,
            stats: LinkStats::default(),
        }
    }

    /// Point the acknowledgement pipe at the destination address.
    pub async fn init(&mut self) -> Result<(), RadioError> {
        self.radio
            .configure_address(RADIO_PIPE, &self.address)
            .await
    }

    /// Encode `packet` and hand it to the radio.
    ///
    /// Accepted in every state. A packet still in flight is superseded and
    /// the next outcome is attributed to `packet`.
    pub async fn send(&mut self, packet: TelemetryPacket) -> Result<(), RadioError> {
        let payload = packet.encode();
        self.radio.transmit(&self.address, &payload).await?;

        if let Some(previous) = self.in_flight.replace(packet) {
            debug!("Superseding in-flight packet {:?}", previous);
        }
        self.state = TransmitState::InFlight;
        self.stats.sent = self.stats.sent.saturating_add(1);
        trace!("Sent {:?}", packet);
        Ok(())
    }

    /// Consume the radio's delivery outcome after its interrupt fired.
    ///
    /// Returns `None` when nothing was in flight. On success the outgoing
    /// buffer is flushed, whether or not a packet was being tracked; on
    /// failure it is left alone.
    pub async fn handle_interrupt(&mut self) -> Result<Option<DeliveryReport>, RadioError> {
        let succeeded = self.radio.transmit_succeeded().await?;

        let Some(packet) = self.in_flight.take() else {
            if succeeded {
                self.radio.flush_outgoing().await?;
            }
            return Ok(None);
        };

        let outcome = if succeeded {
            self.state = TransmitState::Delivered;
            self.stats.delivered = self.stats.delivered.saturating_add(1);
            TransmissionOutcome::Success
        } else {
            self.state = TransmitState::Dropped;
            self.stats.dropped = self.stats.dropped.saturating_add(1);
            TransmissionOutcome::Failure
        };

        if outcome == TransmissionOutcome::Success {
            self.radio.flush_outgoing().await?;
        }

        Ok(Some(DeliveryReport { packet, outcome }))
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> TransmitState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// The packet awaiting an outcome, if any.
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<&TelemetryPacket> {
        self.in_flight.as_ref()
    }

    /// Get a reference to the radio.
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Get a mutable reference to the radio.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Release the radio.
    pub fn into_inner(self) -> R {
        self.radio
    }
}
