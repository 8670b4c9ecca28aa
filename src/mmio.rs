use rppal::gpio::{self, Gpio, IoPin, Level, Mode, Bias};

use crate::{AcceleratedProvider, DriveMode, Error, GpioController, GpioPin, PinValue, Soc};

/// Drives the SoC GPIO block directly through `/dev/gpiomem`.
pub struct MmioController {
    gpio: Gpio,
    soc: Soc,
}

impl MmioController {
    pub fn open(provider: &AcceleratedProvider) -> Option<Self> {
        match Gpio::new() {
            Ok(gpio) => Some(Self {
                gpio,
                soc: provider.soc(),
            }),
            Err(e) => {
                log::debug!("mapping the GPIO block failed: {e}");
                None
            }
        }
    }
}

fn bcm_line(soc: Soc, line: u32) -> Result<u8, Error> {
    match u8::try_from(line) {
        Ok(bcm) if line < soc.pin_count() => Ok(bcm),
        _ => Err(Error::InvalidLine(line)),
    }
}

fn acquisition_error(line: u32, e: gpio::Error) -> Error {
    match e {
        gpio::Error::PinUsed(_) => Error::PinInUse(line),
        gpio::Error::PinNotAvailable(_) => Error::InvalidLine(line),
        e => Error::Accelerated(e),
    }
}

impl GpioController for MmioController {
    type Pin = MmioPin;

    fn pin_count(&self) -> Option<u32> {
        Some(self.soc.pin_count())
    }

    fn open_pin(&mut self, line: u32) -> Result<MmioPin, Error> {
        let bcm = bcm_line(self.soc, line)?;
        let pin = self
            .gpio
            .get(bcm)
            .map_err(|e| acquisition_error(line, e))?;
        // Keep whatever function the line already has until a drive mode is set.
        let mode = pin.mode();
        Ok(MmioPin {
            pin: pin.into_io(mode),
            line,
        })
    }
}

pub struct MmioPin {
    pin: IoPin,
    line: u32,
}

impl GpioPin for MmioPin {
    fn line(&self) -> u32 {
        self.line
    }

    fn is_drive_mode_supported(&self, _mode: DriveMode) -> bool {
        true
    }

    fn set_drive_mode(&mut self, mode: DriveMode) -> Result<(), Error> {
        match mode {
            DriveMode::Input => {
                self.pin.set_mode(Mode::Input);
                self.pin.set_bias(Bias::Off);
            }
            DriveMode::InputPullUp => {
                self.pin.set_mode(Mode::Input);
                self.pin.set_bias(Bias::PullUp);
            }
            DriveMode::Output => self.pin.set_mode(Mode::Output),
        }
        Ok(())
    }

    #[inline(always)]
    fn write(&mut self, value: PinValue) -> Result<(), Error> {
        match value {
            PinValue::High => self.pin.set_high(),
            PinValue::Low => self.pin.set_low(),
        }
        Ok(())
    }

    fn read(&mut self) -> Result<PinValue, Error> {
        Ok(PinValue::from(self.pin.read() == Level::High))
    }
}
