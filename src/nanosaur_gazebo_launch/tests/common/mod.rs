//! Install prefix fixtures shared by the integration tests

#![allow(dead_code)]

use nanosaur_gazebo_launch::PackageIndex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PACKAGES: &[&str] = &["nanosaur_gazebo", "gazebo_ros", "robot_state_publisher"];

/// A temporary install prefix with the given packages registered.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    /// Registers every package the nanosaur launch needs and installs the fixture templates.
    pub fn new() -> Self {
        let workspace = Self::empty();
        for package in PACKAGES {
            workspace.register(package);
        }
        copy_dir(&fixture_dir(), &workspace.share("nanosaur_gazebo"));
        workspace
    }

    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn prefix(&self) -> &Path {
        self.dir.path()
    }

    pub fn share(&self, package: &str) -> PathBuf {
        self.prefix().join("share").join(package)
    }

    pub fn register(&self, package: &str) {
        let marker_dir = self
            .prefix()
            .join("share/ament_index/resource_index/packages");
        fs::create_dir_all(&marker_dir).unwrap();
        fs::write(marker_dir.join(package), "").unwrap();
        fs::create_dir_all(self.share(package)).unwrap();
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.prefix().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn index(&self) -> PackageIndex {
        PackageIndex::new(vec![self.prefix().to_path_buf()])
    }
}

pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/nanosaur_gazebo")
}

pub fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}
