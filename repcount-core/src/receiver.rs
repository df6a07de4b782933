//! Telemetry reception and rendering.

use embassy_futures::yield_now;
use repcount_proto::{TelemetryPacket, RADIO_ADDRESS, RADIO_PIPE};

use crate::display::{DisplayError, TextDisplay};
use crate::error::NodeError;
use crate::flag::EventFlag;
use crate::radio::{RadioLink, MAX_PAYLOAD_LEN};

/// Header shown on the first row from start-up onwards.
pub const HEADER: &str = "Select exercise mode:";

/// Prefix of the mode row.
pub const MODE_PREFIX: &str = "Exercise mode: ";

/// Prefix of the count row.
pub const COUNT_PREFIX: &str = "Exercise count: ";

const HEADER_ROW: u8 = 0;
const MODE_ROW: u8 = 16;
const COUNT_ROW: u8 = 32;

/// Upper bound on payloads read per interrupt (receive FIFO depth).
const MAX_DRAIN: usize = 3;

/// Draw the header-only start-up screen.
pub async fn render_idle<D: TextDisplay>(display: &mut D) -> Result<(), DisplayError> {
    display.clear();
    display.set_cursor(0, HEADER_ROW)?;
    display.print_str(HEADER)?;
    display.update().await
}

/// Draw the screen for `packet`.
pub async fn render_packet<D: TextDisplay>(
    display: &mut D,
    packet: &TelemetryPacket,
) -> Result<(), DisplayError> {
    display.clear();
    display.set_cursor(0, HEADER_ROW)?;
    display.print_str(HEADER)?;

    display.set_cursor(0, MODE_ROW)?;
    display.print_str(MODE_PREFIX)?;
    display.print_str(packet.label())?;

    display.set_cursor(0, COUNT_ROW)?;
    display.print_str(COUNT_PREFIX)?;
    display.print_int(packet.count)?;

    display.update().await
}

/// Receiver node: listens on the fixed address and shows each update.
pub struct TelemetryReceiver<R, D> {
    radio: R,
    display: D,
    last: Option<TelemetryPacket>,
}

impl<R: RadioLink, D: TextDisplay> TelemetryReceiver<R, D> {
    pub fn new(radio: R, display: D) -> Self {
        Self {
            radio,
            display,
            last: None,
        }
    }

    /// Show the start-up screen and start listening.
    pub async fn init(&mut self) -> Result<(), NodeError> {
        self.display.init().await?;
        render_idle(&mut self.display).await?;
        self.radio.listen(RADIO_PIPE, &RADIO_ADDRESS).await?;
        info!("Receiver listening on pipe {}", RADIO_PIPE);
        Ok(())
    }

    /// Drain the receive queue after the radio interrupt fired.
    ///
    /// Every decoded packet is rendered in arrival order. A failed render is
    /// logged and the drain carries on with the next payload. Returns the
    /// number of packets accepted; zero when no data was available.
    pub async fn handle_interrupt(&mut self) -> Result<usize, NodeError> {
        let mut rendered = 0;

        for _ in 0..MAX_DRAIN {
            if !self.radio.data_available().await? {
                break;
            }

            let mut buf = [0u8; MAX_PAYLOAD_LEN];
            let len = self.radio.read_received(&mut buf).await?;

            match TelemetryPacket::try_from(&buf[..len]) {
                Ok(packet) => {
                    if let Err(e) = render_packet(&mut self.display, &packet).await {
                        error!("Render failed: {:?}", e);
                    }
                    info!("{} ({}): {}", packet.label(), packet.mode, packet.count);
                    self.last = Some(packet);
                    rendered += 1;
                }
                Err(e) => warn!("Discarding payload: {:?}", e),
            }
        }

        Ok(rendered)
    }

    /// Run one loop iteration: drain the interrupt flag and react to it.
    pub async fn poll_once(&mut self, irq: &EventFlag) -> Result<usize, NodeError> {
        if !irq.take() {
            return Ok(0);
        }
        self.handle_interrupt().await
    }

    /// Run the receiver loop indefinitely.
    ///
    /// Errors are logged and the loop continues.
    pub async fn run(&mut self, irq: &EventFlag) -> ! {
        loop {
            if let Err(e) = self.poll_once(irq).await {
                error!("Receiver error: {:?}", e);
            }
            yield_now().await;
        }
    }

    /// The most recently rendered packet.
    #[inline]
    #[must_use]
    pub fn last_packet(&self) -> Option<&TelemetryPacket> {
        self.last.as_ref()
    }

    /// Get a reference to the radio.
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Get a reference to the display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Decompose the receiver into its radio and display.
    pub fn into_parts(self) -> (R, D) {
        (self.radio, self.display)
    }
}
