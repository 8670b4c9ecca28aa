use crate::{CdevController, MmioController, Platform, Provider};

/// The default controller for whichever provider was selected. Matched once
/// by the caller so pin calls go straight to the concrete backend.
pub enum Controller {
    Accelerated(MmioController),
    Fallback(CdevController),
}

impl Controller {
    /// Returns `None` when the provider has no usable GPIO subsystem on this
    /// device.
    pub fn get_default(platform: &Platform, provider: &Provider) -> Option<Self> {
        match provider {
            Provider::Accelerated(accelerated) => {
                MmioController::open(accelerated).map(Controller::Accelerated)
            }
            Provider::Fallback => CdevController::open(platform).map(Controller::Fallback),
        }
    }
}
