//! Launch evaluator: walks a `LaunchDescription`, resolves expressions, and produces records.

use crate::{
    description::{Action, ActionKind, LaunchDescription},
    error::{LaunchError, Result},
    package::PackageIndex,
    record::{ArgumentRecord, CommandGenerator, LaunchRecord},
    substitution::{ArgumentMetadata, LaunchContext},
};
use std::collections::HashMap;

/// Evaluates launch descriptions against launch arguments given as `key:=value`.
pub struct LaunchEvaluator<'a> {
    context: LaunchContext,
    index: &'a PackageIndex,
    cli_args: HashMap<String, String>,
    record: LaunchRecord,
}

impl<'a> LaunchEvaluator<'a> {
    pub fn new(cli_args: HashMap<String, String>, index: &'a PackageIndex) -> Self {
        let mut context = LaunchContext::new();
        // Apply CLI args as initial configurations
        for (k, v) in &cli_args {
            context.set_configuration(k.clone(), v.clone());
        }

        Self {
            context,
            index,
            cli_args,
            record: LaunchRecord::new(),
        }
    }

    /// Evaluate every action of `description` in insertion order.
    pub fn evaluate(&mut self, description: &LaunchDescription) -> Result<()> {
        for action in description.actions() {
            self.evaluate_action(action)?;
        }

        let mut undeclared: Vec<&String> = self
            .cli_args
            .keys()
            .filter(|name| !self.context.is_declared(name))
            .collect();
        undeclared.sort();
        for name in undeclared {
            log::warn!("Launch argument '{}' is not declared by this launch file", name);
        }
        Ok(())
    }

    fn evaluate_action(&mut self, action: &Action) -> Result<()> {
        // Check condition
        if let Some(condition) = &action.condition {
            if !condition.evaluate(&self.context)? {
                log::debug!("Skipping {} due to condition", action.label());
                return Ok(());
            }
        }

        match &action.kind {
            ActionKind::DeclareArgument {
                name,
                default,
                description,
            } => {
                // Resolve default value if present
                let resolved_default = match default {
                    Some(expr) => Some(expr.resolve(&self.context)?),
                    None => None,
                };

                let value = match self.context.get_configuration(name) {
                    Some(value) => value,
                    None => {
                        let value = resolved_default
                            .clone()
                            .ok_or_else(|| LaunchError::MissingArgument(name.clone()))?;
                        self.context.set_configuration(name.clone(), value.clone());
                        value
                    }
                };
                log::debug!("Launch argument {} = {}", name, value);

                self.context.declare_argument(ArgumentMetadata {
                    name: name.clone(),
                    default: resolved_default.clone(),
                    description: description.clone(),
                });
                self.record.arguments.retain(|arg| &arg.name != name);
                self.record.arguments.push(ArgumentRecord {
                    name: name.clone(),
                    value,
                    default: resolved_default,
                    description: description.clone(),
                });
            }

            ActionKind::IncludeLaunchDescription { source, args } => {
                let include = CommandGenerator::generate_include_record(source, args, &self.context)?;
                log::info!("Including launch file: {}", include.file);
                self.record.include.push(include);
            }

            ActionKind::Node(node) => {
                let record = CommandGenerator::generate_node_record(node, &self.context, self.index)?;
                log::info!(
                    "Node {} from package {}",
                    record.executable,
                    record.package.as_deref().unwrap_or("?")
                );
                self.record.node.push(record);
            }
        }

        Ok(())
    }

    pub fn context(&self) -> &LaunchContext {
        &self.context
    }

    pub fn into_record(self) -> LaunchRecord {
        self.record
    }
}

/// Evaluate a launch description and return the resulting record.
pub fn evaluate_launch_description(
    description: &LaunchDescription,
    cli_args: HashMap<String, String>,
    index: &PackageIndex,
) -> Result<LaunchRecord> {
    let mut evaluator = LaunchEvaluator::new(cli_args, index);
    evaluator.evaluate(description)?;
    Ok(evaluator.into_record())
}
