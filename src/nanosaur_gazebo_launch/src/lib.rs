//! nanosaur_gazebo_launch library

pub mod assembler;
pub mod condition;
pub mod description;
pub mod error;
pub mod evaluator;
pub mod package;
pub mod record;
pub mod substitution;

pub use assembler::generate_launch_description;
pub use description::LaunchDescription;
pub use error::{LaunchError, Result};
pub use evaluator::evaluate_launch_description;
pub use package::PackageIndex;
pub use record::LaunchRecord;

use std::collections::HashMap;

/// Assemble the nanosaur Gazebo launch plan and evaluate it against `cli_args`.
pub fn launch(cli_args: HashMap<String, String>, index: &PackageIndex) -> Result<LaunchRecord> {
    let description = generate_launch_description(index)?;
    log::debug!("Launch description has {} actions", description.len());

    let record = evaluate_launch_description(&description, cli_args, index)?;
    if let Some(world_file_name) = record.argument("world_file_name") {
        assembler::check_world_file_name(world_file_name);
    }

    log::info!(
        "{} nodes, {} included launch files",
        record.node.len(),
        record.include.len()
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const MINIMAL_XACRO: &str = r#"<?xml version="1.0"?>
<robot name="nanosaur" xmlns:xacro="http://www.ros.org/wiki/xacro">
  <xacro:property name="wheel_radius" value="0.0325"/>
  <link name="base_link"/>
  <link name="wheel"><visual><geometry><cylinder radius="${wheel_radius}" length="0.02"/></geometry></visual></link>
</robot>
"#;

    fn register(prefix: &Path, package: &str) {
        let marker_dir = prefix.join("share/ament_index/resource_index/packages");
        fs::create_dir_all(&marker_dir).unwrap();
        fs::write(marker_dir.join(package), "").unwrap();
        fs::create_dir_all(prefix.join("share").join(package)).unwrap();
    }

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        for package in ["nanosaur_gazebo", "gazebo_ros", "robot_state_publisher"] {
            register(dir.path(), package);
        }
        let urdf = dir.path().join("share/nanosaur_gazebo/urdf");
        fs::create_dir_all(&urdf).unwrap();
        fs::write(urdf.join("nanosaur.urdf.xacro"), MINIMAL_XACRO).unwrap();
        dir
    }

    #[test]
    fn test_launch_defaults() {
        let dir = workspace();
        let index = PackageIndex::new(vec![dir.path().to_path_buf()]);

        let record = launch(HashMap::new(), &index).unwrap();
        assert_eq!(record.argument("gui"), Some("true"));
        assert_eq!(record.argument("server"), Some("true"));
        assert_eq!(record.argument("world_file_name"), Some("empty_world.world"));
        assert_eq!(record.include.len(), 2);
        assert_eq!(record.node.len(), 2);

        let rsp = record.find_node("robot_state_publisher").unwrap();
        let description = rsp.param("robot_description").unwrap();
        let doc = roxmltree::Document::parse(description).unwrap();
        let radius: f64 = doc
            .descendants()
            .find(|n| n.has_tag_name("cylinder"))
            .and_then(|n| n.attribute("radius"))
            .unwrap()
            .parse()
            .unwrap();
        assert!((radius - 0.0325).abs() < 1e-12);
    }

    #[test]
    fn test_launch_headless() {
        let dir = workspace();
        let index = PackageIndex::new(vec![dir.path().to_path_buf()]);

        let mut args = HashMap::new();
        args.insert("gui".to_string(), "false".to_string());
        let record = launch(args, &index).unwrap();

        assert_eq!(record.include.len(), 1);
        assert!(record.find_include("gzserver.launch.py").is_some());
        assert!(record.find_include("gzclient.launch.py").is_none());
    }

    #[test]
    fn test_launch_missing_package() {
        let dir = TempDir::new().unwrap();
        register(dir.path(), "gazebo_ros");
        let index = PackageIndex::new(vec![dir.path().to_path_buf()]);

        let result = launch(HashMap::new(), &index);
        assert!(matches!(result, Err(LaunchError::PackageNotFound(ref p)) if p == "nanosaur_gazebo"));
    }
}
