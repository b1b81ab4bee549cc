//! Tree mirror builder
//!
//! Finds every `.js` file below a source root, minifies it, and writes the
//! result to the same relative path below a destination root:
//! - `walker`: lazy depth-first enumeration and mirrored path computation
//! - `transform`: the minifier seam and its swc-backed implementation
//! - `processor`: read, transform and write for a single file
//! - `runner`: validate, enumerate, process everything

mod processor;
mod runner;
mod transform;
mod walker;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use processor::{process_file, FailureKind, FileFailure, FileOutcome};
pub use runner::{finish, run, BuildReport};
pub use transform::{JsMinifier, MangleOptions, MinifyOptions, OutputOptions, Transform, TransformError};
pub use walker::{js_files, mirrored_path, JsFiles, JS_EXTENSION};

/// Source and destination roots of a build run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRoots {
    /// Tree scanned for `.js` files, never written
    pub source: PathBuf,
    /// Tree receiving the minified output, never read
    pub dest: PathBuf,
}

impl BuildRoots {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Roots used by `jsdist-build`: `assets/src` and `assets/dist` next to `Cargo.toml`
    pub fn project_default() -> Self {
        let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        Self::new(assets.join("src"), assets.join("dist"))
    }
}

/// Errors that abort a whole build run
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No .js files found in {}", .0.display())]
    NoFilesFound(PathBuf),

    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
