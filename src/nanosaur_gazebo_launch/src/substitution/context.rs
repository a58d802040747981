//! Launch context for managing configurations

use std::collections::HashMap;

/// Metadata of a declared launch argument, with its default already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentMetadata {
    pub name: String,
    pub default: Option<String>,
    pub description: Option<String>,
}

/// Launch context holding configurations and declared arguments
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    configurations: HashMap<String, String>,
    declared_arguments: Vec<ArgumentMetadata>,
}

impl LaunchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_configuration(&mut self, name: String, value: String) {
        self.configurations.insert(name, value);
    }

    pub fn get_configuration(&self, name: &str) -> Option<String> {
        self.configurations.get(name).cloned()
    }

    /// Record a declared argument. Re-declaring a name replaces its metadata.
    pub fn declare_argument(&mut self, metadata: ArgumentMetadata) {
        match self
            .declared_arguments
            .iter_mut()
            .find(|existing| existing.name == metadata.name)
        {
            Some(existing) => *existing = metadata,
            None => self.declared_arguments.push(metadata),
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared_arguments.iter().any(|arg| arg.name == name)
    }

    /// Declared arguments in declaration order
    pub fn declared_arguments(&self) -> &[ArgumentMetadata] {
        &self.declared_arguments
    }
}
