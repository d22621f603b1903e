//! Coursepack CLI - export course trees and convert archive layouts.
//!
//! Commands:
//! - `coursepack export --snapshot <file.json> --course <key> --root <dir> --course-dir <name> [--config <export.toml>]`
//! - `coursepack convert <source> <target>`
//! - `coursepack version <course-dir>`

mod commands;
mod format;
mod parse;

use std::path::Path;
use std::process;

use coursepack_archive::{convert_between_versions, get_version, XmlSerializer};
use coursepack_engine::{
    export_course_with, ExportConfig, MemoryAssetStore, MemoryTreeStore, Snapshot,
};
use tracing::Level;

use commands::build_cli;
use format::{format_error, format_export_info, format_version, OutputMode};
use parse::{matches_to_action, CliAction};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let result = matches_to_action(&matches).and_then(|action| run(action, mode));
    match result {
        Ok(output) => println!("{}", output),
        Err(message) => {
            eprintln!("{}", format_error(&message, mode));
            process::exit(1);
        }
    }
}

fn run(action: CliAction, mode: OutputMode) -> Result<String, String> {
    match action {
        CliAction::Export {
            snapshot,
            course,
            root,
            course_dir,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let snapshot = Snapshot::load(&snapshot)
                .map_err(|e| format!("Failed to load snapshot '{}': {}", snapshot.display(), e))?;
            let store = MemoryTreeStore::from_snapshot(&snapshot);
            let assets = MemoryAssetStore::from_snapshot(&snapshot).map_err(|e| e.to_string())?;

            let info = export_course_with(
                &store,
                Some(&assets),
                &course,
                &root,
                &course_dir,
                &config,
                &XmlSerializer::default(),
            )
            .map_err(|e| e.to_string())?;
            Ok(format_export_info(&info, mode))
        }
        CliAction::Convert { source, target } => {
            let version = convert_between_versions(&source, &target).map_err(|e| e.to_string())?;
            Ok(format_version(Some(i64::from(version)), mode))
        }
        CliAction::Version { course_dir } => {
            let version = get_version(&course_dir).map_err(|e| e.to_string())?;
            Ok(format_version(version, mode))
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ExportConfig, String> {
    match path {
        Some(path) => ExportConfig::from_file(path)
            .map_err(|e| format!("Failed to load config '{}': {}", path.display(), e)),
        None => Ok(ExportConfig::default()),
    }
}
