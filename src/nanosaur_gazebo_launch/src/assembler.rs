//! Launch description for the nanosaur robot in Gazebo
//!
//! Starts `gzserver` and `gzclient` through the `gazebo_ros` launch files,
//! publishes the robot description, and spawns the robot into the world.

use crate::{
    condition::Condition,
    description::{Action, ActionKind, Expr, IncludeArg, LaunchDescription, NodeAction, ParamDecl},
    error::{Result, XacroError},
    package::PackageIndex,
    substitution::Substitution,
};
use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

pub const PACKAGE_NAME: &str = "nanosaur_gazebo";
pub const GAZEBO_ROS_PACKAGE: &str = "gazebo_ros";

/// Robot description template, relative to the package share directory
pub const ROBOT_DESCRIPTION_FILE: &str = "urdf/nanosaur.urdf.xacro";

pub const ENTITY_NAME: &str = "nanosaur";
pub const DEFAULT_WORLD_FILE: &str = "empty_world.world";

/// Serializes every template expansion that rewrites `AMENT_PREFIX_PATH`
static AMENT_PREFIX_PATH_LOCK: Mutex<()> = Mutex::new(());

/// Expand the nanosaur xacro into URDF text.
pub fn robot_description(index: &PackageIndex) -> Result<String> {
    let package_dir = index.share_directory(PACKAGE_NAME)?;
    let xacro_path = package_dir.join(ROBOT_DESCRIPTION_FILE);
    Ok(expand_xacro(&xacro_path, index)?)
}

/// Run `xacro_rs` on `path` with `$(find ...)` resolving through `index`.
///
/// The result must parse as XML with a `<robot>` root.
pub fn expand_xacro(path: &Path, index: &PackageIndex) -> std::result::Result<String, XacroError> {
    if !path.is_file() {
        return Err(XacroError::TemplateNotFound(path.to_path_buf()));
    }
    log::debug!("Processing xacro file: {}", path.display());

    let prefixes = std::env::join_paths(index.prefixes()).map_err(|e| XacroError::Expansion {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let expanded = {
        let _prefix_path = ScopedPrefixPath::set(prefixes);
        xacro_rs::process_file(path)
    };
    let urdf = expanded.map_err(|e| XacroError::Expansion {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let doc = roxmltree::Document::parse(&urdf).map_err(|source| XacroError::InvalidOutput {
        path: path.to_path_buf(),
        source,
    })?;
    let root = doc.root_element().tag_name().name();
    if root != "robot" {
        return Err(XacroError::NotARobot {
            path: path.to_path_buf(),
            root: root.to_string(),
        });
    }
    Ok(urdf)
}

/// Points `AMENT_PREFIX_PATH` at the index prefixes until dropped.
struct ScopedPrefixPath {
    previous: Option<OsString>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl ScopedPrefixPath {
    fn set(value: OsString) -> Self {
        let lock = AMENT_PREFIX_PATH_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = std::env::var_os("AMENT_PREFIX_PATH");
        std::env::set_var("AMENT_PREFIX_PATH", value);
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for ScopedPrefixPath {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => std::env::set_var("AMENT_PREFIX_PATH", value),
            None => std::env::remove_var("AMENT_PREFIX_PATH"),
        }
    }
}

/// Build the nanosaur Gazebo launch plan.
///
/// Package lookups and the robot description are resolved here, so any
/// failure surfaces before a single action exists.
pub fn generate_launch_description(index: &PackageIndex) -> Result<LaunchDescription> {
    let package_gazebo = index.share_directory(PACKAGE_NAME)?;
    let gazebo_ros_path = index.share_directory(GAZEBO_ROS_PACKAGE)?;

    // spawn_entity reads the robot from /robot_description, so the whole
    // URDF is passed to the state publisher as a string parameter
    let xml = robot_description(index)?;
    log::debug!("Robot description: {} bytes", xml.len());

    let gazebo_gui_cmd = declare_argument("gui", "true", "Set to \"false\" to run headless.");
    let gazebo_server_cmd =
        declare_argument("server", "true", "Set to \"false\" not to run gzserver.");
    let world_file_name_cmd =
        declare_argument("world_file_name", DEFAULT_WORLD_FILE, "Load gazebo world.");

    let robot_state_publisher_node = Action::new(ActionKind::Node(NodeAction {
        package: Expr::literal("robot_state_publisher"),
        executable: Expr::literal("robot_state_publisher"),
        name: None,
        output: None,
        parameters: vec![
            ParamDecl {
                name: "use_sim_time".to_string(),
                value: Expr(vec![Substitution::configuration_or("use_sim_time", "true")]),
            },
            ParamDecl {
                name: "robot_description".to_string(),
                value: Expr::literal(xml),
            },
        ],
        arguments: vec![],
    }));

    let spawn_robot = Action::new(ActionKind::Node(NodeAction {
        package: Expr::literal(GAZEBO_ROS_PACKAGE),
        executable: Expr::literal("spawn_entity.py"),
        name: Some(Expr::literal("spawn_entity")),
        output: Some("screen".to_string()),
        parameters: vec![],
        arguments: [
            "-entity",
            ENTITY_NAME,
            "-topic",
            "/robot_description",
            "-x",
            "0",
            "-y",
            "0",
            "-z",
            "0",
        ]
        .into_iter()
        .map(Expr::literal)
        .collect(),
    }));

    // libgazebo_ros_factory.so provides /spawn_entity; gzserver.launch.py loads it by default
    let gazebo_server = Action::new(ActionKind::IncludeLaunchDescription {
        source: launch_file(&gazebo_ros_path, "gzserver.launch.py"),
        args: vec![
            IncludeArg {
                name: "world".to_string(),
                value: Expr(vec![
                    Substitution::text(package_gazebo.to_string_lossy()),
                    Substitution::text("/worlds/"),
                    Substitution::configuration("world_file_name"),
                ]),
            },
            IncludeArg {
                name: "verbose".to_string(),
                value: Expr::literal("true"),
            },
            IncludeArg {
                name: "init".to_string(),
                value: Expr::literal("false"),
            },
        ],
    })
    .with_condition(Condition::If(vec![Substitution::configuration("server")]));

    let gazebo_gui = Action::new(ActionKind::IncludeLaunchDescription {
        source: launch_file(&gazebo_ros_path, "gzclient.launch.py"),
        args: vec![],
    })
    .with_condition(Condition::If(vec![Substitution::configuration("gui")]));

    let mut ld = LaunchDescription::new();
    ld.add_action(gazebo_gui_cmd);
    ld.add_action(gazebo_server_cmd);
    ld.add_action(world_file_name_cmd);
    ld.add_action(gazebo_server);
    ld.add_action(gazebo_gui);
    ld.add_action(robot_state_publisher_node);
    ld.add_action(spawn_robot);

    Ok(ld)
}

/// Warn about world file names that step outside `<package>/worlds`.
///
/// The name is still forwarded verbatim; gzserver reports a missing world itself.
pub fn check_world_file_name(world_file_name: &str) {
    if world_file_name.contains(['/', '\\']) || world_file_name == ".." {
        log::warn!(
            "world_file_name '{}' is not a plain file name; it is appended to the worlds/ directory as-is",
            world_file_name
        );
    } else if world_file_name.is_empty() {
        log::warn!("world_file_name is empty; gzserver will be pointed at the worlds/ directory");
    }
}

fn declare_argument(name: &str, default: &str, description: &str) -> Action {
    Action::new(ActionKind::DeclareArgument {
        name: name.to_string(),
        default: Some(Expr::literal(default)),
        description: Some(description.to_string()),
    })
}

fn launch_file(package_dir: &Path, file: &str) -> Expr {
    Expr::literal(format!("{}/{}", package_dir.join("launch").display(), file))
}
