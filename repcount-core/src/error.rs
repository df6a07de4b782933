//! Node-level error type.

use crate::display::DisplayError;
use crate::motion::SensorError;
use crate::radio::RadioError;
use repcount_proto::DecodeError;

/// Any collaborator error surfaced inside a node loop.
///
/// Node loops log these and carry on; nothing escalates past the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError {
    Sensor(SensorError),
    Radio(RadioError),
    Display(DisplayError),
    Decode(DecodeError),
}

impl From<SensorError> for NodeError {
    fn from(err: SensorError) -> Self {
        NodeError::Sensor(err)
    }
}

impl From<RadioError> for NodeError {
    fn from(err: RadioError) -> Self {
        NodeError::Radio(err)
    }
}

impl From<DisplayError> for NodeError {
    fn from(err: DisplayError) -> Self {
        NodeError::Display(err)
    }
}

impl From<DecodeError> for NodeError {
    fn from(err: DecodeError) -> Self {
        NodeError::Decode(err)
    }
}
