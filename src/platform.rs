use std::path::{Path, PathBuf};

/// Filesystem root that device probes and the character device backend
/// resolve their paths under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    root: PathBuf,
}

impl Platform {
    pub fn system() -> Self {
        Self::with_root("/")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn gpiomem(&self) -> PathBuf {
        self.path("dev/gpiomem")
    }

    pub fn device_tree_compatible(&self) -> PathBuf {
        self.path("proc/device-tree/compatible")
    }

    /// The chip carrying the SoC's own lines, where line numbers are chip
    /// offsets rather than global sysfs numbers.
    pub fn gpiochip(&self) -> PathBuf {
        self.path("dev/gpiochip0")
    }
}
