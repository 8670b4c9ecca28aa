use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("GPIO line {0} is already claimed by another owner")]
    PinInUse(u32),
    #[error("GPIO line {0} does not exist on this controller")]
    InvalidLine(u32),
    #[error("register access failed: {0}")]
    Accelerated(rppal::gpio::Error),
    #[error("character device access failed: {0}")]
    Cdev(#[from] gpiocdev::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
