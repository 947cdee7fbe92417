//! Device integrity probing.

use std::path::PathBuf;

/// Reports whether the device the kit runs on has been tampered with.
pub trait IntegrityChecker {
    fn is_compromised(&self) -> bool;
}

impl<F: Fn() -> bool> IntegrityChecker for F {
    fn is_compromised(&self) -> bool {
        self()
    }
}

/// Flags a device as compromised when any of a set of paths exists.
///
/// The default path is the package manager directory left behind by a
/// jailbreak.
#[derive(Debug, Clone)]
pub struct FilesystemIntegrityChecker {
    pub paths: Vec<PathBuf>,
}

impl Default for FilesystemIntegrityChecker {
    fn default() -> Self {
        FilesystemIntegrityChecker {
            paths: vec![PathBuf::from("/private/var/lib/apt/")],
        }
    }
}

impl FilesystemIntegrityChecker {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        FilesystemIntegrityChecker {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntegrityChecker for FilesystemIntegrityChecker {
    fn is_compromised(&self) -> bool {
        self.paths.iter().any(|p| p.exists())
    }
}
