//! Mock collaborators shared by the unit tests.

extern crate std;

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin};
use embedded_hal_async::delay::DelayNs;
use repcount_proto::Address;

use crate::display::{DisplayError, TextDisplay};
use crate::motion::{MotionSource, SensorError};
use crate::radio::{RadioError, RadioLink};
use crate::sample::RawAcceleration;

/// Drive a future to completion with a no-op waker.
///
/// Mocks never wait on anything; a `Pending` only comes from a cooperative
/// yield, so the future is simply polled again.
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    for _ in 0..1000 {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
    panic!("Mock future never completed");
}

// --- Button pin ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
struct PinState {
    levels: VecDeque<bool>,
    last: bool,
    failing: bool,
}

/// Input pin replaying queued levels (`true` = high = released).
///
/// Once the queue is empty the last level is repeated.
#[derive(Clone)]
pub struct MockPin {
    state: Rc<RefCell<PinState>>,
}

impl MockPin {
    pub fn new(levels: &[bool]) -> Self {
        let pin = Self {
            state: Rc::new(RefCell::new(PinState {
                last: true,
                ..PinState::default()
            })),
        };
        pin.set_levels(levels);
        pin
    }

    pub fn failing() -> Self {
        let pin = Self::new(&[]);
        pin.state.borrow_mut().failing = true;
        pin
    }

    pub fn set_levels(&self, levels: &[bool]) {
        let mut state = self.state.borrow_mut();
        state.levels = levels.iter().copied().collect();
        if let Some(&last) = levels.last() {
            state.last = last;
        }
    }

    fn read(&self) -> Result<bool, MockPinError> {
        let mut state = self.state.borrow_mut();
        if state.failing {
            return Err(MockPinError);
        }
        let level = state.levels.pop_front().unwrap_or(state.last);
        Ok(level)
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.read()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.read().map(|high| !high)
    }
}

// --- Delay ---

/// Delay that returns immediately and records the requested time.
#[derive(Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn total_ms(&self) -> u32 {
        (self.total_ns / 1_000_000) as u32
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// --- Motion source ---

#[derive(Default)]
struct MotionState {
    samples: VecDeque<Result<RawAcceleration, SensorError>>,
    initialised: bool,
}

/// Accelerometer replaying queued samples, then reading 1 g on Z.
#[derive(Clone, Default)]
pub struct MockMotion {
    state: Rc<RefCell<MotionState>>,
}

impl MockMotion {
    /// Queue a sample given in g.
    pub fn push_g(&self, ax: f32, ay: f32, az: f32) {
        let to_raw = |g: f32| (g * 16384.0) as i16;
        self.state
            .borrow_mut()
            .samples
            .push_back(Ok(RawAcceleration::new(to_raw(ax), to_raw(ay), to_raw(az))));
    }

    pub fn push_error(&self, err: SensorError) {
        self.state.borrow_mut().samples.push_back(Err(err));
    }

    pub fn is_initialised(&self) -> bool {
        self.state.borrow().initialised
    }
}

impl MotionSource for MockMotion {
    async fn init(&mut self) -> Result<(), SensorError> {
        self.state.borrow_mut().initialised = true;
        Ok(())
    }

    async fn read_raw(&mut self) -> Result<RawAcceleration, SensorError> {
        self.state
            .borrow_mut()
            .samples
            .pop_front()
            .unwrap_or(Ok(RawAcceleration::new(0, 0, 16384)))
    }
}

// --- Radio ---

#[derive(Default)]
pub struct RadioState {
    pub configured: Vec<(u8, Address)>,
    pub listening: Option<(u8, Address)>,
    pub transmitted: Vec<(Address, Vec<u8>)>,
    /// Outcomes returned by `transmit_succeeded`, oldest first (default: success).
    pub outcomes: VecDeque<bool>,
    pub outcome_checks: usize,
    pub flushes: usize,
    pub received: VecDeque<Vec<u8>>,
    pub fail_transmit: bool,
}

/// In-memory radio with a shared, inspectable state.
#[derive(Clone, Default)]
pub struct MockRadio {
    pub state: Rc<RefCell<RadioState>>,
}

impl MockRadio {
    pub fn push_outcome(&self, success: bool) {
        self.state.borrow_mut().outcomes.push_back(success);
    }

    pub fn push_received(&self, payload: &[u8]) {
        self.state.borrow_mut().received.push_back(payload.to_vec());
    }

    pub fn transmitted(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .transmitted
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    pub fn flushes(&self) -> usize {
        self.state.borrow().flushes
    }
}

impl RadioLink for MockRadio {
    async fn configure_address(&mut self, pipe: u8, address: &Address) -> Result<(), RadioError> {
        self.state.borrow_mut().configured.push((pipe, *address));
        Ok(())
    }

    async fn listen(&mut self, pipe: u8, address: &Address) -> Result<(), RadioError> {
        self.state.borrow_mut().listening = Some((pipe, *address));
        Ok(())
    }

    async fn transmit(&mut self, address: &Address, payload: &[u8]) -> Result<(), RadioError> {
        let mut state = self.state.borrow_mut();
        if state.fail_transmit {
            return Err(RadioError::Bus);
        }
        state.transmitted.push((*address, payload.to_vec()));
        Ok(())
    }

    async fn transmit_succeeded(&mut self) -> Result<bool, RadioError> {
        let mut state = self.state.borrow_mut();
        state.outcome_checks += 1;
        Ok(state.outcomes.pop_front().unwrap_or(true))
    }

    async fn flush_outgoing(&mut self) -> Result<(), RadioError> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }

    async fn data_available(&mut self) -> Result<bool, RadioError> {
        Ok(!self.state.borrow().received.is_empty())
    }

    async fn read_received(&mut self, buf: &mut [u8]) -> Result<usize, RadioError> {
        let payload = self
            .state
            .borrow_mut()
            .received
            .pop_front()
            .unwrap_or_default();
        let out = buf
            .get_mut(..payload.len())
            .ok_or(RadioError::BufferTooSmall)?;
        out.copy_from_slice(&payload);
        Ok(payload.len())
    }
}

// --- Display ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Init,
    Clear,
    Cursor(u8, u8),
    Text(String),
    Update,
}

/// Display recording every call.
#[derive(Clone, Default)]
pub struct MockDisplay {
    pub ops: Rc<RefCell<Vec<DisplayOp>>>,
    /// When set, `update` records the call and then fails with a bus error.
    pub fail_updates: Rc<Cell<bool>>,
}

impl MockDisplay {
    pub fn ops(&self) -> Vec<DisplayOp> {
        self.ops.borrow().clone()
    }

    /// Text drawn after the most recent clear, concatenated per cursor row.
    pub fn screen(&self) -> Vec<(u8, String)> {
        let ops = self.ops.borrow();
        let start = ops
            .iter()
            .rposition(|op| *op == DisplayOp::Clear)
            .map_or(0, |i| i + 1);

        let mut rows: Vec<(u8, String)> = Vec::new();
        let mut row = 0;
        for op in &ops[start..] {
            match op {
                DisplayOp::Cursor(_, y) => {
                    row = *y;
                    rows.push((row, String::new()));
                }
                DisplayOp::Text(text) => match rows.last_mut() {
                    Some((_, line)) => line.push_str(text),
                    None => rows.push((row, text.clone())),
                },
                _ => {}
            }
        }
        rows
    }

    pub fn updates(&self) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| **op == DisplayOp::Update)
            .count()
    }
}

impl TextDisplay for MockDisplay {
    async fn init(&mut self) -> Result<(), DisplayError> {
        self.ops.borrow_mut().push(DisplayOp::Init);
        Ok(())
    }

    fn clear(&mut self) {
        self.ops.borrow_mut().push(DisplayOp::Clear);
    }

    fn set_cursor(&mut self, x: u8, y: u8) -> Result<(), DisplayError> {
        self.ops.borrow_mut().push(DisplayOp::Cursor(x, y));
        Ok(())
    }

    fn print_str(&mut self, text: &str) -> Result<(), DisplayError> {
        self.ops.borrow_mut().push(DisplayOp::Text(text.to_string()));
        Ok(())
    }

    fn print_int(&mut self, value: u16) -> Result<(), DisplayError> {
        self.ops
            .borrow_mut()
            .push(DisplayOp::Text(value.to_string()));
        Ok(())
    }

    async fn update(&mut self) -> Result<(), DisplayError> {
        self.ops.borrow_mut().push(DisplayOp::Update);
        if self.fail_updates.get() {
            return Err(DisplayError::Bus);
        }
        Ok(())
    }
}

/// Pin that is never pressed, for tests that don't exercise the button.
pub struct ReleasedPin;

impl ErrorType for ReleasedPin {
    type Error = Infallible;
}

impl InputPin for ReleasedPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}
