//! Transmitter node: ties the button, detector and radio into one loop.

use embassy_futures::yield_now;
use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use repcount_proto::{ExerciseMode, TelemetryPacket};

use crate::config::{SendPolicy, TrackerConfig, DEFAULT_CONFIG};
use crate::detector::RepetitionDetector;
use crate::error::NodeError;
use crate::flag::EventFlag;
use crate::mode::ModeController;
use crate::motion::MotionSource;
use crate::radio::RadioLink;
use crate::transmitter::{TelemetryTransmitter, TransmissionOutcome};

/// The transmitter unit's main loop.
///
/// Each [`poll_once`](Self::poll_once) runs, in order:
///
/// 1. mode button (a new press resets the detector and queues a send),
/// 2. queued send,
/// 3. radio interrupt flag (delivery outcome),
/// 4. one accelerometer sample through the detector.
///
/// Mode, count and latch state are only touched here; the interrupt side
/// only raises the [`EventFlag`].
pub struct TransmitterNode<M, R, P, D> {
    motion: M,
    transmitter: TelemetryTransmitter<R>,
    controller: ModeController<P>,
    detector: RepetitionDetector,
    delay: D,
    send_policy: SendPolicy,
    send_pending: bool,
}

impl<M, R, P, D> TransmitterNode<M, R, P, D>
where
    M: MotionSource,
    R: RadioLink,
    P: InputPin,
    D: DelayNs,
{
    /// Create a node with [`DEFAULT_CONFIG`].
    pub fn new(motion: M, radio: R, button: P, delay: D) -> Self {
        Self::with_config(motion, radio, button, delay, DEFAULT_CONFIG)
    }

    /// Create a node with a custom configuration.
    pub fn with_config(motion: M, radio: R, button: P, delay: D, config: TrackerConfig) -> Self {
        Self {
            motion,
            transmitter: TelemetryTransmitter::new(radio),
            controller: ModeController::with_debounce(button, config.debounce_ms),
            detector: RepetitionDetector::new(),
            delay,
            send_policy: config.send_policy,
            send_pending: false,
        }
    }

    /// Initialise the sensor and radio.
    pub async fn init(&mut self) -> Result<(), NodeError> {
        self.motion.init().await?;
        self.transmitter.init().await?;
        info!(
            "Transmitter ready, mode {:?}, policy {:?}",
            self.controller.mode(),
            self.send_policy
        );
        Ok(())
    }

    /// Run one loop iteration.
    ///
    /// Collaborator errors are logged and skip only the affected step.
    pub async fn poll_once(&mut self, irq: &EventFlag) {
        if self.controller.poll(&mut self.delay).await.is_some() {
            self.detector.reset();
            self.send_pending = true;
        }

        if core::mem::take(&mut self.send_pending) {
            let packet = self.current_packet();
            if let Err(e) = self.transmitter.send(packet).await {
                error!("Transmit failed: {:?}", e);
            }
        }

        if irq.take() {
            self.handle_radio_interrupt().await;
        }

        match self.motion.read_sample().await {
            Ok(sample) => {
                if self.detector.process(self.controller.mode(), &sample) {
                    debug!("Repetition {}", self.detector.count());
                    if self.send_policy == SendPolicy::EveryRepetition {
                        self.send_pending = true;
                    }
                }
            }
            Err(e) => warn!("Sensor read failed: {:?}", e),
        }
    }

    async fn handle_radio_interrupt(&mut self) {
        match self.transmitter.handle_interrupt().await {
            Ok(Some(report)) => {
                let stats = self.transmitter.stats();
                match report.outcome {
                    TransmissionOutcome::Success => debug!(
                        "Delivered {:?} ({} sent, {} dropped)",
                        report.packet,
                        stats.sent,
                        stats.dropped
                    ),
                    TransmissionOutcome::Failure => warn!(
                        "Dropped {:?} ({} sent, {} dropped)",
                        report.packet,
                        stats.sent,
                        stats.dropped
                    ),
                }
            }
            Ok(None) => trace!("Radio interrupt with nothing in flight"),
            Err(e) => error!("Radio status read failed: {:?}", e),
        }
    }

    /// Run the loop indefinitely.
    pub async fn run(&mut self, irq: &EventFlag) -> ! {
        loop {
            self.poll_once(irq).await;
            yield_now().await;
        }
    }

    /// The (mode, count) pair the next send would carry.
    #[must_use]
    pub fn current_packet(&self) -> TelemetryPacket {
        TelemetryPacket::new(self.controller.mode(), self.detector.count())
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ExerciseMode {
        self.controller.mode()
    }

    #[inline]
    #[must_use]
    pub fn detector(&self) -> &RepetitionDetector {
        &self.detector
    }

    #[inline]
    #[must_use]
    pub fn transmitter(&self) -> &TelemetryTransmitter<R> {
        &self.transmitter
    }
}
