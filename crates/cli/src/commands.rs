//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("coursepack")
        .about("Export course trees to archives and convert archive layouts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log at debug level")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_export())
        .subcommand(build_convert())
        .subcommand(build_version())
}

// =========================================================================
// Export
// =========================================================================

fn build_export() -> Command {
    Command::new("export")
        .about("Export a course from a JSON snapshot into an archive directory")
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .required(true)
                .help("Course snapshot file (JSON)"),
        )
        .arg(
            Arg::new("course")
                .long("course")
                .required(true)
                .help("Course key, e.g. edX/DemoX/2024 or course-v1:edX+DemoX+2024"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .required(true)
                .help("Directory the course directory is created in"),
        )
        .arg(
            Arg::new("course-dir")
                .long("course-dir")
                .required(true)
                .help("Name of the course directory"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Export configuration file (default: built-in settings)"),
        )
}

// =========================================================================
// Convert / version
// =========================================================================

fn build_convert() -> Command {
    Command::new("convert")
        .about("Convert an archive between layout versions 0 and 1")
        .arg(
            Arg::new("source")
                .required(true)
                .help("Directory holding exactly one course directory"),
        )
        .arg(
            Arg::new("target")
                .required(true)
                .help("Directory the converted course directory is written to"),
        )
}

fn build_version() -> Command {
    Command::new("version")
        .about("Print the layout version of a course directory")
        .arg(Arg::new("course-dir").required(true).help("Course directory"))
}
