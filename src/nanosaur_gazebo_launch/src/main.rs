//! nanosaur_gazebo_launch CLI

use clap::{Parser, Subcommand};
use nanosaur_gazebo_launch::{
    assembler, description::ActionKind, generate_launch_description, launch, PackageIndex, Result,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "nanosaur_gazebo_launch")]
#[command(about = "Assemble the nanosaur Gazebo simulation launch plan", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,

    /// Install prefix to search for packages (repeatable, replaces AMENT_PREFIX_PATH)
    #[arg(long = "prefix", global = true)]
    prefixes: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the launch plan and write it as JSON
    Record {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_launch_arg)]
        args: Vec<(String, String)>,

        /// Output file path (default: record.json)
        #[arg(short, long, default_value = "record.json")]
        output: PathBuf,
    },

    /// List the declared launch arguments
    ShowArgs,

    /// Print the expanded robot description
    Describe,
}

fn parse_launch_arg(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once(":=") {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Invalid launch argument format: {}", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let index = if cli.prefixes.is_empty() {
        PackageIndex::from_env()
    } else {
        PackageIndex::new(cli.prefixes)
    };
    for prefix in index.prefixes() {
        log::debug!("Install prefix: {}", prefix.display());
    }
    log::debug!("{} packages indexed", index.packages().len());

    let result = match cli.command {
        Commands::Record { args, output } => {
            let cli_args: HashMap<String, String> = args.into_iter().collect();
            record_and_write(&index, cli_args, &output)
        }
        Commands::ShowArgs => show_args(&index),
        Commands::Describe => describe(&index),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn record_and_write(
    index: &PackageIndex,
    cli_args: HashMap<String, String>,
    output: &Path,
) -> Result<()> {
    let record = launch(cli_args, index)?;

    // Write to output file
    record.write_json(output)?;

    log::info!("Generated record.json: {}", output.display());
    Ok(())
}

fn show_args(index: &PackageIndex) -> Result<()> {
    let description = generate_launch_description(index)?;
    for action in description.actions() {
        if let ActionKind::DeclareArgument {
            name,
            default,
            description,
        } = &action.kind
        {
            let default = default
                .as_ref()
                .and_then(|expr| expr.as_literal())
                .unwrap_or("<required>");
            println!("{} (default: '{}')", name, default);
            if let Some(description) = description {
                println!("    {}", description);
            }
        }
    }
    Ok(())
}

fn describe(index: &PackageIndex) -> Result<()> {
    let xml = assembler::robot_description(index)?;
    println!("{}", xml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_launch_arg() {
        assert_eq!(
            parse_launch_arg("gui:=false").unwrap(),
            ("gui".to_string(), "false".to_string())
        );
        assert_eq!(
            parse_launch_arg("world_file_name:=").unwrap(),
            ("world_file_name".to_string(), String::new())
        );
        assert!(parse_launch_arg("gui=false").is_err());
        assert!(parse_launch_arg(":=x").is_err());
    }
}
