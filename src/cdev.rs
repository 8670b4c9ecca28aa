use std::path::Path;

use gpiocdev::chip::Chip;
use gpiocdev::line::{Bias, Value};
use gpiocdev::Request;

use crate::{DriveMode, Error, GpioController, GpioPin, PinValue, Platform};

const CONSUMER: &str = "gpio_perf";

/// The kernel GPIO character device. Every write is an ioctl.
pub struct CdevController {
    chip: Chip,
}

impl CdevController {
    pub fn open(platform: &Platform) -> Option<Self> {
        Self::open_chip(&platform.gpiochip())
    }

    pub fn open_chip(path: &Path) -> Option<Self> {
        match Chip::from_path(path) {
            Ok(chip) => Some(Self { chip }),
            Err(e) => {
                log::debug!("opening {} failed: {e}", path.display());
                None
            }
        }
    }
}

impl GpioController for CdevController {
    type Pin = CdevPin;

    fn pin_count(&self) -> Option<u32> {
        self.chip.info().ok().map(|info| info.num_lines)
    }

    fn open_pin(&mut self, line: u32) -> Result<CdevPin, Error> {
        if self.pin_count().is_some_and(|count| line >= count) {
            return Err(Error::InvalidLine(line));
        }
        if self.chip.line_info(line)?.used {
            return Err(Error::PinInUse(line));
        }
        // Requested as-is; the drive mode is applied separately.
        let request = Request::builder()
            .on_chip(self.chip.path())
            .with_consumer(CONSUMER)
            .with_line(line)
            .request()?;
        Ok(CdevPin {
            request,
            line,
            mode: None,
        })
    }
}

pub struct CdevPin {
    request: Request,
    line: u32,
    mode: Option<DriveMode>,
}

impl CdevPin {
    pub fn drive_mode(&self) -> Option<DriveMode> {
        self.mode
    }
}

impl GpioPin for CdevPin {
    fn line(&self) -> u32 {
        self.line
    }

    fn is_drive_mode_supported(&self, _mode: DriveMode) -> bool {
        true
    }

    fn set_drive_mode(&mut self, mode: DriveMode) -> Result<(), Error> {
        let mut config = self.request.config();
        let line = config.with_line(self.line);
        match mode {
            DriveMode::Input => line.as_input().with_bias(Bias::Disabled),
            DriveMode::InputPullUp => line.as_input().with_bias(Bias::PullUp),
            DriveMode::Output => line.as_output(Value::Inactive),
        };
        self.request.reconfigure(&config)?;
        self.mode = Some(mode);
        Ok(())
    }

    #[inline(always)]
    fn write(&mut self, value: PinValue) -> Result<(), Error> {
        let value = match value {
            PinValue::High => Value::Active,
            PinValue::Low => Value::Inactive,
        };
        self.request.set_value(self.line, value)?;
        Ok(())
    }

    fn read(&mut self) -> Result<PinValue, Error> {
        Ok(PinValue::from(
            self.request.value(self.line)? == Value::Active,
        ))
    }
}
