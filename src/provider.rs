use std::fs;

use readformat::readf1;

use crate::Platform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderStatus {
    Accelerated,
    Fallback,
}

/// SoCs whose GPIO block can be driven directly through `/dev/gpiomem`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Soc {
    Bcm2835,
    Bcm2836,
    Bcm2837,
    Bcm2711,
}

impl Soc {
    fn from_compatible(name: &str) -> Option<Self> {
        match name {
            // Downstream kernels before 4.9 report the bcm27xx names.
            "bcm2835" | "bcm2708" => Some(Soc::Bcm2835),
            "bcm2836" | "bcm2709" => Some(Soc::Bcm2836),
            "bcm2837" | "bcm2710" => Some(Soc::Bcm2837),
            "bcm2711" => Some(Soc::Bcm2711),
            _ => None,
        }
    }

    pub fn pin_count(&self) -> u32 {
        match self {
            Soc::Bcm2711 => 58,
            _ => 54,
        }
    }
}

/// The register-level provider, bundling everything the accelerated controller
/// needs to map the GPIO block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceleratedProvider {
    soc: Soc,
}

impl AcceleratedProvider {
    pub fn new(soc: Soc) -> Self {
        Self { soc }
    }

    pub fn soc(&self) -> Soc {
        self.soc
    }

    pub fn is_enabled(platform: &Platform) -> bool {
        Self::probe(platform).is_some()
    }

    pub fn probe(platform: &Platform) -> Option<Self> {
        if !platform.gpiomem().exists() {
            return None;
        }
        let compatible = fs::read(platform.device_tree_compatible()).ok()?;
        String::from_utf8_lossy(&compatible)
            .split('\0')
            .filter_map(|entry| readf1("brcm,{}", entry.trim()))
            .find_map(|name| Soc::from_compatible(&name))
            .map(Self::new)
    }
}

/// The hardware-access backend controllers are acquired through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Accelerated(AcceleratedProvider),
    Fallback,
}

impl Provider {
    pub fn status(&self) -> ProviderStatus {
        match self {
            Provider::Accelerated(_) => ProviderStatus::Accelerated,
            Provider::Fallback => ProviderStatus::Fallback,
        }
    }
}

/// Probes for the accelerated provider and returns whichever provider
/// controllers should be acquired through. Calling it again repeats the probe
/// and yields the same answer.
pub fn select_and_install_fastest_provider(platform: &Platform) -> Provider {
    match AcceleratedProvider::probe(platform) {
        Some(accelerated) => {
            log::info!("Using accelerated provider ({:?})", accelerated.soc());
            Provider::Accelerated(accelerated)
        }
        None => {
            log::warn!("Accelerated provider NOT supported, using default provider");
            Provider::Fallback
        }
    }
}
