// CLI command implementations
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

use euphory::mp4::RawAtom;
use euphory::{detect, AudioFile, Tag, TagFormat, TagMap, TagService};

use super::output::OutputFormatter;

#[derive(Serialize)]
struct DetectReport<'a> {
    path: &'a str,
    format: TagFormat,
    supported: bool,
}

#[derive(Serialize)]
struct ReadReport<'a> {
    path: &'a str,
    format: TagFormat,
    tag: Option<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unparsed: Option<Vec<RawAtom>>,
}

#[derive(Serialize)]
struct InfoReport<'a> {
    path: &'a str,
    size: u64,
    modified: Option<String>,
    format: TagFormat,
    supported: bool,
    writable: bool,
}

/// Detect tag formats
pub fn command_detect(files: &[String], formatter: &OutputFormatter) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let mut failures = 0;

    for file_path in files {
        match detect::detect(Path::new(file_path)) {
            Ok(format) => {
                let report = DetectReport {
                    path: file_path,
                    format,
                    supported: format.is_supported(),
                };
                formatter.output(&report, &mut stdout)?;
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", file_path, e));
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} file(s) could not be inspected", failures);
    }
    Ok(())
}

/// Read tags from files
pub fn command_read(
    files: &[String],
    output: Option<&str>,
    raw: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    };
    let mut failures = 0;

    for file_path in files {
        match read_report(file_path, raw) {
            Ok(report) => formatter.output(&report, &mut writer)?,
            Err(e) => {
                formatter.print_error(&format!("{}: {:#}", file_path, e));
                failures += 1;
            }
        }
    }
    writer.flush()?;

    if failures > 0 {
        bail!("{} file(s) could not be read", failures);
    }
    Ok(())
}

fn read_report(path: &str, raw: bool) -> Result<ReadReport<'_>> {
    let audio = AudioFile::open(path)?;
    let tag = audio.read_tag()?;
    let unparsed = if raw {
        Some(audio.unparsed_atoms()?)
    } else {
        None
    };
    Ok(ReadReport {
        path,
        format: audio.format(),
        tag,
        unparsed,
    })
}

/// Write tags to a file
pub fn command_write(
    file: &str,
    format: TagFormat,
    metadata: Option<String>,
    from_file: Option<&str>,
    default_genre: u8,
    formatter: &OutputFormatter,
) -> Result<()> {
    let metadata_json = match (from_file, metadata) {
        (Some(from_path), _) => std::fs::read_to_string(from_path)
            .with_context(|| format!("cannot read {}", from_path))?,
        (None, Some(json)) => json,
        (None, None) => bail!("no metadata given"),
    };

    let fields: TagMap = serde_json::from_str(&metadata_json)
        .context("metadata must be a JSON object of string values")?;

    let mut audio = AudioFile::open(file).with_context(|| format!("failed to open {}", file))?;
    debug!(file, detected = %audio.format(), requested = %format, "writing tag");
    let policy = audio
        .write_fields(format, &fields, default_genre)
        .with_context(|| format!("failed to write {} tag to {}", format, file))?;

    formatter.print_success(&format!("Wrote {} tag to {} ({:?})", format, file, policy));
    Ok(())
}

/// Show the album view of a mix
pub fn command_album(file: &str, formatter: &OutputFormatter) -> Result<()> {
    match TagService::new().load_album_view(file) {
        Some(view) => formatter.output(&view, &mut io::stdout().lock()),
        None => {
            formatter.print_info(&format!("{}: no data", file));
            Ok(())
        }
    }
}

/// Show the track view of a file
pub fn command_track(file: &str, formatter: &OutputFormatter) -> Result<()> {
    match TagService::new().load_track_view(file) {
        Some(view) => formatter.output(&view, &mut io::stdout().lock()),
        None => {
            formatter.print_info(&format!("{}: no data", file));
            Ok(())
        }
    }
}

/// Detect every file in a directory matching a pattern
pub fn command_batch(directory: &str, pattern: &str, formatter: &OutputFormatter) -> Result<()> {
    let files = find_files(directory, pattern)?;

    let total = files.len();
    if total == 0 {
        formatter.print_info("No files found matching pattern");
        return Ok(());
    }
    formatter.print_info(&format!("Processing {} files...", total));

    let mut success_count = 0;
    let mut error_count = 0;
    for file_path in &files {
        match detect::detect(Path::new(file_path)) {
            Ok(format) => {
                formatter.print_success(&format!("{}: {}", file_path, format));
                success_count += 1;
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", file_path, e));
                error_count += 1;
            }
        }
    }

    formatter.print_info(&format!(
        "Completed: {} successful, {} errors",
        success_count, error_count
    ));
    Ok(())
}

/// Expand `pattern` under `directory`. A pattern without wildcards matches
/// that file name at any depth.
pub fn find_files(directory: &str, pattern: &str) -> Result<Vec<String>> {
    let glob_pattern = if pattern.contains('*') || pattern.contains('?') {
        format!("{}/{}", directory, pattern)
    } else {
        format!("{}/**/{}", directory, pattern)
    };

    let mut files = Vec::new();
    for entry in glob::glob(&glob_pattern).context("invalid glob pattern")? {
        let path = entry?;
        if path.is_file() {
            files.push(path.to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}

/// Show file information
pub fn command_info(files: &[String], formatter: &OutputFormatter) -> Result<()> {
    let mut stdout = io::stdout().lock();

    for file_path in files {
        let metadata = match std::fs::metadata(file_path) {
            Ok(m) => m,
            Err(e) => {
                formatter.print_error(&format!("{}: {}", file_path, e));
                continue;
            }
        };

        let modified = metadata.modified().ok().map(|mtime| {
            DateTime::<Local>::from(mtime)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        });
        let format = detect::detect(Path::new(file_path))?;

        let report = InfoReport {
            path: file_path,
            size: metadata.len(),
            modified,
            format,
            supported: format.is_supported(),
            writable: format.has_writer(),
        };
        formatter.output(&report, &mut stdout)?;
    }

    Ok(())
}
