//! Launch description: the unevaluated launch plan
//!
//! Preserves conditions and substitution expressions so the same plan can be
//! inspected statically or evaluated against different launch arguments.

use crate::{
    condition::Condition,
    error::SubstitutionError,
    substitution::{resolve_substitutions, LaunchContext, Substitution},
};

/// A lazy string expression (unevaluated substitution chain).
/// Evaluate with a `LaunchContext` to resolve to a concrete string.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr(pub Vec<Substitution>);

impl Expr {
    /// Create an `Expr` from a literal string (no substitutions).
    pub fn literal(s: impl Into<String>) -> Self {
        Expr(vec![Substitution::Text(s.into())])
    }

    /// If this expression is a literal, return its value.
    pub fn as_literal(&self) -> Option<&str> {
        match self.0.as_slice() {
            [Substitution::Text(s)] => Some(s.as_str()),
            _ => None,
        }
    }

    /// Resolve this expression against a `LaunchContext`.
    pub fn resolve(&self, context: &LaunchContext) -> Result<String, SubstitutionError> {
        resolve_substitutions(&self.0, context)
    }
}

impl From<Vec<Substitution>> for Expr {
    fn from(subs: Vec<Substitution>) -> Self {
        Expr(subs)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::literal(s)
    }
}

/// A single action with an optional condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub condition: Option<Condition>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Short label used in logs.
    pub fn label(&self) -> String {
        match &self.kind {
            ActionKind::DeclareArgument { name, .. } => format!("DeclareLaunchArgument({})", name),
            ActionKind::IncludeLaunchDescription { source, .. } => format!(
                "IncludeLaunchDescription({})",
                source.as_literal().unwrap_or("<substituted>")
            ),
            ActionKind::Node(node) => format!(
                "Node({}/{})",
                node.package.as_literal().unwrap_or("<substituted>"),
                node.executable.as_literal().unwrap_or("<substituted>")
            ),
        }
    }
}

/// Launch action types used by the assembler.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    /// `DeclareLaunchArgument`: declares a launch argument with optional default.
    DeclareArgument {
        name: String,
        default: Option<Expr>,
        description: Option<String>,
    },

    /// `IncludeLaunchDescription`: includes another launch file with forwarded arguments.
    IncludeLaunchDescription { source: Expr, args: Vec<IncludeArg> },

    /// `Node`: starts a ROS 2 node process.
    Node(NodeAction),
}

/// A ROS 2 node process with its parameters and command-line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAction {
    pub package: Expr,
    pub executable: Expr,
    pub name: Option<Expr>,
    /// Where process output goes (`screen` or `log`); `None` leaves the runtime default.
    pub output: Option<String>,
    pub parameters: Vec<ParamDecl>,
    /// Arguments placed before `--ros-args`.
    pub arguments: Vec<Expr>,
}

/// An argument passed to an include.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeArg {
    pub name: String,
    pub value: Expr,
}

/// An inline parameter declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub value: Expr,
}

/// The launch plan: actions in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchDescription {
    actions: Vec<Action>,
}

impl LaunchDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Declared argument names in declaration order.
    pub fn arguments(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| match &action.kind {
                ActionKind::DeclareArgument { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Configurations referenced before (or without) a matching declaration.
    ///
    /// References carrying an inline default are not reported.
    pub fn undeclared_configurations(&self) -> Vec<String> {
        let mut declared: Vec<&str> = Vec::new();
        let mut missing = Vec::new();

        for action in &self.actions {
            let mut refs: Vec<&[Substitution]> = Vec::new();
            if let Some(Condition::If(subs) | Condition::Unless(subs)) = &action.condition {
                refs.push(subs);
            }
            match &action.kind {
                ActionKind::DeclareArgument { name, default, .. } => {
                    refs.extend(default.iter().map(|expr| expr.0.as_slice()));
                    collect_missing(&refs, &declared, &mut missing);
                    declared.push(name);
                    continue;
                }
                ActionKind::IncludeLaunchDescription { source, args } => {
                    refs.push(&source.0);
                    refs.extend(args.iter().map(|arg| arg.value.0.as_slice()));
                }
                ActionKind::Node(node) => {
                    refs.push(&node.package.0);
                    refs.push(&node.executable.0);
                    refs.extend(node.name.iter().map(|expr| expr.0.as_slice()));
                    refs.extend(node.parameters.iter().map(|param| param.value.0.as_slice()));
                    refs.extend(node.arguments.iter().map(|expr| expr.0.as_slice()));
                }
            }
            collect_missing(&refs, &declared, &mut missing);
        }

        missing
    }
}

fn collect_missing(refs: &[&[Substitution]], declared: &[&str], missing: &mut Vec<String>) {
    for sub in refs.iter().flat_map(|subs| subs.iter()) {
        if let Substitution::LaunchConfiguration {
            name,
            default: None,
        } = sub
        {
            if !declared.contains(&name.as_str()) && !missing.contains(name) {
                missing.push(name.clone());
            }
        }
    }
}
