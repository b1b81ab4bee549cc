//! Per-file processing: read, transform, write to the mirrored path

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::transform::Transform;
use super::walker::mirrored_path;
use super::BuildRoots;
use crate::logger;

/// Stage at which a single file failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Read,
    Transform,
    /// Destination directory creation or file write
    Write,
}

/// A per-file failure. Never aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub kind: FailureKind,
    /// Source file that could not be emitted
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.kind {
            FailureKind::Read => "reading",
            FailureKind::Transform => "minifying",
            FailureKind::Write => "writing",
        };
        write!(f, "Error {action} {}: {}", self.path.display(), self.message)
    }
}

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written at this destination path
    Written(PathBuf),
    Failed(FileFailure),
}

/// Read `file`, transform it, and write the output under `roots.dest`.
///
/// Missing destination directories are created first. Failures are logged
/// and returned as `FileOutcome::Failed`.
pub fn process_file<T>(file: &Path, roots: &BuildRoots, transform: &T) -> FileOutcome
where
    T: Transform + ?Sized,
{
    let code = match fs::read_to_string(file) {
        Ok(code) => code,
        Err(err) => return fail(FailureKind::Read, file, err.to_string()),
    };

    let minified = match transform.transform(&code) {
        Ok(minified) => minified,
        Err(err) => return fail(FailureKind::Transform, file, err.to_string()),
    };

    let Some(output_path) = mirrored_path(&roots.source, &roots.dest, file) else {
        return fail(
            FailureKind::Write,
            file,
            format!("not under source root {}", roots.source.display()),
        );
    };

    match write_output(&output_path, &minified) {
        Ok(()) => FileOutcome::Written(output_path),
        Err(err) => fail(FailureKind::Write, file, err.to_string()),
    }
}

fn write_output(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

fn fail(kind: FailureKind, path: &Path, message: String) -> FileOutcome {
    let failure = FileFailure {
        kind,
        path: path.to_path_buf(),
        message,
    };
    logger::log_error_line(&failure);
    FileOutcome::Failed(failure)
}
