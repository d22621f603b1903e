//! ArgMatches → CliAction conversion.

use clap::ArgMatches;
use coursepack_core::CourseKey;
use std::path::PathBuf;

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// Export a course from a snapshot file.
    Export {
        snapshot: PathBuf,
        course: CourseKey,
        root: PathBuf,
        course_dir: String,
        config: Option<PathBuf>,
    },
    /// Convert an archive between layout versions.
    Convert { source: PathBuf, target: PathBuf },
    /// Detect the layout version of a course directory.
    Version { course_dir: PathBuf },
}

/// Translate parsed arguments into an action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    match matches.subcommand() {
        Some(("export", sub)) => {
            let course = required(sub, "course")?;
            Ok(CliAction::Export {
                snapshot: PathBuf::from(required(sub, "snapshot")?),
                course: course
                    .parse()
                    .map_err(|e| format!("Invalid course key '{}': {}", course, e))?,
                root: PathBuf::from(required(sub, "root")?),
                course_dir: required(sub, "course-dir")?.to_string(),
                config: sub.get_one::<String>("config").map(PathBuf::from),
            })
        }
        Some(("convert", sub)) => Ok(CliAction::Convert {
            source: PathBuf::from(required(sub, "source")?),
            target: PathBuf::from(required(sub, "target")?),
        }),
        Some(("version", sub)) => Ok(CliAction::Version {
            course_dir: PathBuf::from(required(sub, "course-dir")?),
        }),
        Some((other, _)) => Err(format!("Unknown command: {}", other)),
        None => Err("No command given".to_string()),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing argument: {}", name))
}
