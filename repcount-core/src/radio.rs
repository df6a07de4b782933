//! Radio link trait and error types.

use core::future::Future;

use repcount_proto::Address;

/// Largest payload a radio link has to accept.
pub const MAX_PAYLOAD_LEN: usize = 32;

/// Error type for radio operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// SPI bus error.
    Bus,
    /// Chip-enable or other control pin error.
    Pin,
    /// Pipe number not supported by the transceiver.
    InvalidPipe(u8),
    /// Payload longer than [`MAX_PAYLOAD_LEN`].
    PayloadTooLarge(usize),
    /// Receive buffer shorter than the pending payload.
    BufferTooSmall,
}

/// Async trait for a short-range packet radio.
///
/// Delivery is asynchronous: [`transmit`](Self::transmit) only queues the
/// payload. The transceiver later raises its interrupt line, after which the
/// outcome is read with [`transmit_succeeded`](Self::transmit_succeeded).
/// Reception is signalled on the same interrupt line.
pub trait RadioLink {
    /// Set the receive address of `pipe`.
    fn configure_address(
        &mut self,
        pipe: u8,
        address: &Address,
    ) -> impl Future<Output = Result<(), RadioError>>;

    /// Enter receive mode, accepting packets addressed to `address` on `pipe`.
    fn listen(&mut self, pipe: u8, address: &Address)
        -> impl Future<Output = Result<(), RadioError>>;

    /// Queue `payload` for transmission to `address`.
    fn transmit(
        &mut self,
        address: &Address,
        payload: &[u8],
    ) -> impl Future<Output = Result<(), RadioError>>;

    /// Whether the last transmission was acknowledged.
    ///
    /// Clears the transceiver's pending transmit status.
    fn transmit_succeeded(&mut self) -> impl Future<Output = Result<bool, RadioError>>;

    /// Drop everything still queued for transmission.
    fn flush_outgoing(&mut self) -> impl Future<Output = Result<(), RadioError>>;

    /// Whether a received payload is waiting to be read.
    fn data_available(&mut self) -> impl Future<Output = Result<bool, RadioError>>;

    /// Read the oldest received payload into `buf`, returning its length.
    fn read_received(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<usize, RadioError>>;
}
