//! Package lookup through the ament resource index

use crate::error::{LaunchError, Result};
use std::path::{Path, PathBuf};

const PACKAGES_RESOURCE: &str = "share/ament_index/resource_index/packages";

/// Ordered set of install prefixes searched for ROS 2 packages.
///
/// A package is registered in a prefix when the marker file
/// `<prefix>/share/ament_index/resource_index/packages/<name>` exists.
/// Earlier prefixes shadow later ones, as with `AMENT_PREFIX_PATH`.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    prefixes: Vec<PathBuf>,
}

impl PackageIndex {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Build the index from `AMENT_PREFIX_PATH`.
    pub fn from_env() -> Self {
        let prefixes = std::env::var_os("AMENT_PREFIX_PATH")
            .map(|value| {
                std::env::split_paths(&value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let index = Self::new(prefixes);
        if index.prefixes.is_empty() {
            log::warn!("AMENT_PREFIX_PATH is empty; no packages can be resolved");
        }
        index
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// Install prefix that registers `package`, if any.
    pub fn prefix_of(&self, package: &str) -> Option<&Path> {
        self.prefixes
            .iter()
            .find(|prefix| prefix.join(PACKAGES_RESOURCE).join(package).is_file())
            .map(PathBuf::as_path)
    }

    /// Equivalent of `get_package_share_directory`.
    pub fn share_directory(&self, package: &str) -> Result<PathBuf> {
        let prefix = self
            .prefix_of(package)
            .ok_or_else(|| LaunchError::PackageNotFound(package.to_string()))?;
        let share = prefix.join("share").join(package);
        log::debug!("Resolved package {} -> {}", package, share.display());
        Ok(share)
    }

    /// Directory holding the package's executables (`<prefix>/lib/<package>`).
    pub fn lib_directory(&self, package: &str) -> Result<PathBuf> {
        let prefix = self
            .prefix_of(package)
            .ok_or_else(|| LaunchError::PackageNotFound(package.to_string()))?;
        Ok(prefix.join("lib").join(package))
    }

    /// All package names registered in any prefix, sorted and deduplicated.
    pub fn packages(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .prefixes
            .iter()
            .filter_map(|prefix| std::fs::read_dir(prefix.join(PACKAGES_RESOURCE)).ok())
            .flat_map(|entries| entries.filter_map(|entry| entry.ok()))
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
