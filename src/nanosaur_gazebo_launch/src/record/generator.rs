//! Command-line and record generation

use crate::description::{Expr, IncludeArg, NodeAction};
use crate::error::GenerationError;
use crate::package::PackageIndex;
use crate::record::types::{IncludeRecord, NodeRecord};
use crate::substitution::LaunchContext;

pub struct CommandGenerator;

impl CommandGenerator {
    pub fn generate_node_record(
        node: &NodeAction,
        context: &LaunchContext,
        index: &PackageIndex,
    ) -> Result<NodeRecord, GenerationError> {
        let cmd = Self::generate_node_command(node, context, index)?;

        let package = node.package.resolve(context)?;
        let executable = node.executable.resolve(context)?;

        let name = match &node.name {
            Some(expr) => Some(expr.resolve(context)?),
            None => None,
        };

        let params = node
            .parameters
            .iter()
            .map(|p| Ok((p.name.clone(), p.value.resolve(context)?)))
            .collect::<Result<Vec<_>, GenerationError>>()?;

        let args = if node.arguments.is_empty() {
            None
        } else {
            Some(
                node.arguments
                    .iter()
                    .map(|a| a.resolve(context))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };

        Ok(NodeRecord {
            executable,
            package: Some(package),
            name,
            namespace: Some("/".to_string()),
            output: node.output.clone(),
            params,
            args,
            cmd,
        })
    }

    /// Build the process command line the way `launch_ros` does:
    /// executable, plain arguments, then the `--ros-args` section.
    pub fn generate_node_command(
        node: &NodeAction,
        context: &LaunchContext,
        index: &PackageIndex,
    ) -> Result<Vec<String>, GenerationError> {
        let mut cmd = Vec::new();

        // 1. Resolve executable path
        let package = node.package.resolve(context)?;
        let executable = node.executable.resolve(context)?;
        cmd.push(Self::resolve_executable_path(index, &package, &executable));

        // 2. Plain arguments
        for arg in &node.arguments {
            cmd.push(arg.resolve(context)?);
        }

        // 3. ROS args delimiter
        cmd.push("--ros-args".to_string());

        // 4. Node name
        if let Some(name_expr) = &node.name {
            cmd.push("-r".to_string());
            cmd.push(format!("__node:={}", name_expr.resolve(context)?));
        }

        // 5. Parameters
        for param in &node.parameters {
            let value = param.value.resolve(context)?;
            cmd.push("-p".to_string());
            cmd.push(format!("{}:={}", param.name, value));
        }

        Ok(cmd)
    }

    fn resolve_executable_path(index: &PackageIndex, package: &str, executable: &str) -> String {
        match index.lib_directory(package) {
            Ok(lib) => lib.join(executable).to_string_lossy().into_owned(),
            Err(_) => {
                log::warn!(
                    "Package {} is not in the package index; using bare executable name {}",
                    package,
                    executable
                );
                executable.to_string()
            }
        }
    }

    pub fn generate_include_record(
        source: &Expr,
        args: &[IncludeArg],
        context: &LaunchContext,
    ) -> Result<IncludeRecord, GenerationError> {
        let file = source.resolve(context)?;
        let args = args
            .iter()
            .map(|arg| Ok((arg.name.clone(), arg.value.resolve(context)?)))
            .collect::<Result<Vec<_>, GenerationError>>()?;

        Ok(IncludeRecord { file, args })
    }
}
