//! record.json data structures

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root structure for record.json: the evaluated launch plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub arguments: Vec<ArgumentRecord>,
    pub node: Vec<NodeRecord>,
    pub include: Vec<IncludeRecord>,
}

impl LaunchRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the record as pretty JSON to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Resolved value of a declared argument
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| arg.value.as_str())
    }

    /// First node record with the given executable
    pub fn find_node(&self, executable: &str) -> Option<&NodeRecord> {
        self.node.iter().find(|node| node.executable == executable)
    }

    /// First include record whose file name ends with `suffix`
    pub fn find_include(&self, suffix: &str) -> Option<&IncludeRecord> {
        self.include.iter().find(|inc| inc.file.ends_with(suffix))
    }
}

/// A declared launch argument with its resolved value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    pub name: String,
    pub value: String,
    pub default: Option<String>,
    pub description: Option<String>,
}

/// Node record structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub executable: String,
    pub package: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub output: Option<String>,
    pub params: Vec<(String, String)>,
    pub args: Option<Vec<String>>,
    pub cmd: Vec<String>,
}

impl NodeRecord {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An included launch file with its forwarded arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludeRecord {
    pub file: String,
    pub args: Vec<(String, String)>,
}

impl IncludeRecord {
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
