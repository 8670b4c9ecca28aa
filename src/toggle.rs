use std::convert::Infallible;

use crate::{Controller, DriveMode, Error, GpioController, GpioPin, PinValue, Platform, Provider};

/// Line the harness drives. The square wave is measured on it externally.
pub const BENCHMARK_LINE: u32 = 5;

/// Acquires the default controller for `provider` and toggles `line` forever.
///
/// Returns `Ok(())` only when no controller is available. Acquisition and
/// configuration errors are returned as is.
pub fn run_toggle_benchmark(
    platform: &Platform,
    provider: &Provider,
    line: u32,
) -> Result<(), Error> {
    match Controller::get_default(platform, provider) {
        Some(Controller::Accelerated(controller)) => match drive(controller, line)? {},
        Some(Controller::Fallback(controller)) => match drive(controller, line)? {},
        None => {
            log::warn!("No GPIO Controller found.");
            Ok(())
        }
    }
}

/// Opens `line` on `controller`, makes it an output and toggles it until a
/// pin call fails.
pub fn drive<C: GpioController>(mut controller: C, line: u32) -> Result<Infallible, Error> {
    let mut pin = controller.open_pin(line)?;
    pin.set_drive_mode(DriveMode::Output)?;
    toggle_forever(&mut pin)
}

// Nothing but the two writes may happen in here.
fn toggle_forever<P: GpioPin>(pin: &mut P) -> Result<Infallible, Error> {
    loop {
        pin.write(PinValue::High)?;
        pin.write(PinValue::Low)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;
    use std::sync::Once;

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
    }

    // Keeps records per test thread so parallel tests don't see each other.
    struct Capture;

    impl Log for Capture {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            RECORDS.with(|records| {
                records
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;

    fn capture_logs() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            log::set_logger(&CAPTURE).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });
        RECORDS.with(|records| records.borrow_mut().clear());
    }

    fn logged() -> Vec<(Level, String)> {
        RECORDS.with(|records| records.borrow().clone())
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Event {
        Open(u32),
        DriveMode(DriveMode),
        Write(PinValue),
    }

    type Trace = Rc<RefCell<Vec<Event>>>;

    struct MockController {
        trace: Trace,
        claimed: Vec<u32>,
        budget: usize,
    }

    struct MockPin {
        trace: Trace,
        line: u32,
        budget: usize,
    }

    impl GpioController for MockController {
        type Pin = MockPin;

        fn pin_count(&self) -> Option<u32> {
            None
        }

        fn open_pin(&mut self, line: u32) -> Result<MockPin, Error> {
            self.trace.borrow_mut().push(Event::Open(line));
            if self.claimed.contains(&line) {
                return Err(Error::PinInUse(line));
            }
            Ok(MockPin {
                trace: Rc::clone(&self.trace),
                line,
                budget: self.budget,
            })
        }
    }

    impl GpioPin for MockPin {
        fn line(&self) -> u32 {
            self.line
        }

        fn is_drive_mode_supported(&self, _mode: DriveMode) -> bool {
            true
        }

        fn set_drive_mode(&mut self, mode: DriveMode) -> Result<(), Error> {
            self.trace.borrow_mut().push(Event::DriveMode(mode));
            Ok(())
        }

        // Runs out after `budget` writes, which is the only way out of the loop.
        fn write(&mut self, value: PinValue) -> Result<(), Error> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "write budget spent").into());
            }
            self.budget -= 1;
            self.trace.borrow_mut().push(Event::Write(value));
            Ok(())
        }

        fn read(&mut self) -> Result<PinValue, Error> {
            unimplemented!()
        }
    }

    fn mock(claimed: Vec<u32>, budget: usize) -> (Trace, MockController) {
        let trace = Trace::default();
        let controller = MockController {
            trace: Rc::clone(&trace),
            claimed,
            budget,
        };
        (trace, controller)
    }

    #[test]
    fn absent_controller_logs_once_and_returns() {
        capture_logs();
        let dir = tempfile::tempdir().unwrap();
        let platform = Platform::with_root(dir.path());
        assert!(run_toggle_benchmark(&platform, &Provider::Fallback, BENCHMARK_LINE).is_ok());
        assert_eq!(
            logged()
                .into_iter()
                .filter(|(level, _)| *level <= Level::Info)
                .collect::<Vec<_>>(),
            vec![(Level::Warn, "No GPIO Controller found.".to_string())]
        );
    }

    #[test]
    fn configures_then_alternates_from_high() {
        let (trace, controller) = mock(vec![], 7);
        assert!(matches!(drive(controller, BENCHMARK_LINE), Err(Error::Io(_))));

        let trace = trace.borrow();
        assert_eq!(trace[0], Event::Open(BENCHMARK_LINE));
        assert_eq!(trace[1], Event::DriveMode(DriveMode::Output));
        let writes: Vec<_> = trace[2..].to_vec();
        assert_eq!(writes.len(), 7);
        for (i, event) in writes.iter().enumerate() {
            let expected = if i % 2 == 0 {
                PinValue::High
            } else {
                PinValue::Low
            };
            assert_eq!(*event, Event::Write(expected));
        }
    }

    #[test]
    fn configures_even_when_no_write_lands() {
        let (trace, controller) = mock(vec![], 0);
        assert!(matches!(drive(controller, BENCHMARK_LINE), Err(Error::Io(_))));
        assert_eq!(
            *trace.borrow(),
            vec![
                Event::Open(BENCHMARK_LINE),
                Event::DriveMode(DriveMode::Output)
            ]
        );
    }

    #[test]
    fn claimed_line_stops_before_configuration() {
        let (trace, controller) = mock(vec![BENCHMARK_LINE], 7);
        assert!(matches!(
            drive(controller, BENCHMARK_LINE),
            Err(Error::PinInUse(BENCHMARK_LINE))
        ));
        assert_eq!(*trace.borrow(), vec![Event::Open(BENCHMARK_LINE)]);
    }

    #[test]
    fn toggling_logs_nothing() {
        capture_logs();
        let (_trace, controller) = mock(vec![], 4);
        assert!(drive(controller, BENCHMARK_LINE).is_err());
        assert!(logged().is_empty());
    }
}
