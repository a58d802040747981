//! Error types for the nanosaur_gazebo_launch

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Required launch argument '{0}' was not provided")]
    MissingArgument(String),

    #[error("Robot description error: {0}")]
    Xacro(#[from] XacroError),

    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    #[error("Record generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SubstitutionError {
    #[error("Undefined variable: '{0}'. Did you forget to declare it as a launch argument?")]
    UndefinedVariable(String),

    #[error("Invalid condition value '{0}': expected one of true, false, 1, 0")]
    InvalidCondition(String),
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),
}

#[derive(Error, Debug)]
pub enum XacroError {
    #[error("Robot description template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Failed to expand {path}: {message}")]
    Expansion { path: PathBuf, message: String },

    #[error("Expanded {path} is not valid XML: {source}")]
    InvalidOutput {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Expanded {path} has root element <{root}>, expected <robot>")]
    NotARobot { path: PathBuf, root: String },
}

pub type Result<T> = std::result::Result<T, LaunchError>;
