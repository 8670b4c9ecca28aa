mod cdev;
mod controller;
mod error;
mod mmio;
mod platform;
mod provider;
mod toggle;

pub use cdev::*;
pub use controller::Controller;
pub use error::*;
pub use mmio::*;
pub use platform::*;
pub use provider::*;
pub use toggle::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinValue {
    High,
    Low,
}

impl PinValue {
    pub fn toggled(self) -> Self {
        match self {
            PinValue::High => PinValue::Low,
            PinValue::Low => PinValue::High,
        }
    }
}

impl From<bool> for PinValue {
    fn from(value: bool) -> Self {
        if value {
            PinValue::High
        } else {
            PinValue::Low
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveMode {
    Input,
    InputPullUp,
    Output,
}

/// Access point to one GPIO subsystem. Opened pins are owned exclusively
/// until dropped.
pub trait GpioController {
    type Pin: GpioPin;

    /// Number of lines, when the backend knows it up front.
    fn pin_count(&self) -> Option<u32>;

    fn open_pin(&mut self, line: u32) -> Result<Self::Pin, Error>;
}

pub trait GpioPin {
    fn line(&self) -> u32;

    fn is_drive_mode_supported(&self, mode: DriveMode) -> bool;

    fn set_drive_mode(&mut self, mode: DriveMode) -> Result<(), Error>;

    /// Drive the line. The pin must be in [`DriveMode::Output`] first.
    fn write(&mut self, value: PinValue) -> Result<(), Error>;

    fn read(&mut self) -> Result<PinValue, Error>;
}
