//! Build orchestration: validate, enumerate, process every file

use std::path::PathBuf;
use std::process::ExitCode;

use super::processor::{process_file, FileFailure, FileOutcome};
use super::transform::Transform;
use super::walker::js_files;
use super::{BuildError, BuildRoots};
use crate::logger;

/// Summary of a completed run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Destination paths written, in processing order
    pub written: Vec<PathBuf>,
    /// Files that could not be emitted
    pub failed: Vec<FileFailure>,
}

impl BuildReport {
    /// Number of `.js` files found under the source root
    pub fn discovered(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Run a full build.
///
/// Fails only on `DirectoryNotFound`, `NoFilesFound` or a broken walk; per-file
/// failures are collected into the report and the remaining files still run.
/// Nothing is written before enumeration has finished, and stale files
/// already in the destination tree are left alone.
pub fn run<T>(roots: &BuildRoots, transform: &T) -> Result<BuildReport, BuildError>
where
    T: Transform + ?Sized,
{
    let files = js_files(&roots.source)?.collect::<Result<Vec<_>, _>>()?;
    if files.is_empty() {
        return Err(BuildError::NoFilesFound(roots.source.clone()));
    }

    logger::log_debug(&format!(
        "Found {} .js files under {}",
        files.len(),
        roots.source.display()
    ));

    let mut report = BuildReport::default();
    for file in &files {
        match process_file(file, roots, transform) {
            FileOutcome::Written(path) => report.written.push(path),
            FileOutcome::Failed(failure) => report.failed.push(failure),
        }
    }

    Ok(report)
}

/// Report the end of a run and pick the process exit status.
///
/// `Build completed.` and success once every file has been attempted, even if
/// some failed; otherwise the error goes to the error stream and the status
/// is failure.
pub fn finish(result: &Result<BuildReport, BuildError>) -> ExitCode {
    match result {
        Ok(_) => {
            logger::log_build_completed();
            ExitCode::SUCCESS
        }
        Err(err) => {
            logger::log_error_line(err);
            ExitCode::FAILURE
        }
    }
}
