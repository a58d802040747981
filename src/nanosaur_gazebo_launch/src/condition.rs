//! Condition evaluation for conditional actions

use crate::{
    error::SubstitutionError,
    substitution::{resolve_substitutions, LaunchContext, Substitution},
};

/// Condition gating an action's execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `IfCondition`: execute when the expression evaluates to truthy.
    If(Vec<Substitution>),
    /// `UnlessCondition`: execute when the expression evaluates to falsy.
    Unless(Vec<Substitution>),
}

impl Condition {
    /// Evaluate the condition against the current configurations
    pub fn evaluate(&self, context: &LaunchContext) -> Result<bool, SubstitutionError> {
        match self {
            Condition::If(expr) => parse_condition_value(&resolve_substitutions(expr, context)?),
            Condition::Unless(expr) => {
                parse_condition_value(&resolve_substitutions(expr, context)?).map(|value| !value)
            }
        }
    }
}

/// Interpret a resolved condition string: `true`/`1` or `false`/`0`, case-insensitive.
pub(crate) fn parse_condition_value(value: &str) -> Result<bool, SubstitutionError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SubstitutionError::InvalidCondition(value.to_string())),
    }
}
