//! Substitution types

use crate::error::SubstitutionError;
use crate::substitution::context::LaunchContext;

/// A fragment of a launch string, resolved lazily against a `LaunchContext`
#[derive(Debug, Clone, PartialEq)]
pub enum Substitution {
    /// Plain text (no substitution)
    Text(String),
    /// `LaunchConfiguration(name, default=...)` - launch configuration variable
    LaunchConfiguration {
        name: String,
        default: Option<String>,
    },
}

impl Substitution {
    pub fn text(value: impl Into<String>) -> Self {
        Substitution::Text(value.into())
    }

    pub fn configuration(name: impl Into<String>) -> Self {
        Substitution::LaunchConfiguration {
            name: name.into(),
            default: None,
        }
    }

    pub fn configuration_or(name: impl Into<String>, default: impl Into<String>) -> Self {
        Substitution::LaunchConfiguration {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    /// Resolve substitution to string value
    pub fn resolve(&self, context: &LaunchContext) -> Result<String, SubstitutionError> {
        match self {
            Substitution::Text(s) => Ok(s.clone()),
            Substitution::LaunchConfiguration { name, default } => context
                .get_configuration(name)
                .or_else(|| default.clone())
                .ok_or_else(|| SubstitutionError::UndefinedVariable(name.clone())),
        }
    }
}

/// Resolve list of substitutions to single string
pub fn resolve_substitutions(
    subs: &[Substitution],
    context: &LaunchContext,
) -> Result<String, SubstitutionError> {
    let mut result = String::new();
    for sub in subs {
        result.push_str(&sub.resolve(context)?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_substitution() {
        let sub = Substitution::text("hello");
        let context = LaunchContext::new();
        assert_eq!(sub.resolve(&context).unwrap(), "hello");
    }

    #[test]
    fn test_launch_configuration() {
        let sub = Substitution::configuration("my_var");
        let mut context = LaunchContext::new();
        context.set_configuration("my_var".to_string(), "value123".to_string());
        assert_eq!(sub.resolve(&context).unwrap(), "value123");
    }

    #[test]
    fn test_undefined_variable() {
        let sub = Substitution::configuration("undefined");
        let context = LaunchContext::new();
        assert!(matches!(
            sub.resolve(&context),
            Err(SubstitutionError::UndefinedVariable(ref name)) if name == "undefined"
        ));
    }

    #[test]
    fn test_inline_default() {
        let sub = Substitution::configuration_or("use_sim_time", "true");
        let mut context = LaunchContext::new();
        assert_eq!(sub.resolve(&context).unwrap(), "true");

        // A configured value takes precedence over the inline default
        context.set_configuration("use_sim_time".to_string(), "false".to_string());
        assert_eq!(sub.resolve(&context).unwrap(), "false");
    }

    #[test]
    fn test_resolve_multiple() {
        let subs = vec![
            Substitution::text("/share/pkg"),
            Substitution::text("/worlds/"),
            Substitution::configuration("world"),
        ];
        let mut context = LaunchContext::new();
        context.set_configuration("world".to_string(), "foo.world".to_string());
        assert_eq!(
            resolve_substitutions(&subs, &context).unwrap(),
            "/share/pkg/worlds/foo.world"
        );
    }
}
