//! Recursive `.js` file enumeration

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::BuildError;

/// File name suffix recognized as JavaScript (case-sensitive)
pub const JS_EXTENSION: &str = ".js";

/// Lazy depth-first sequence of `.js` files below a root.
///
/// Entries come in directory listing order; a subdirectory's files appear at
/// the position of the subdirectory itself. The order is whatever the file
/// system returns and is not sorted.
pub struct JsFiles {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl Iterator for JsFiles {
    type Item = Result<PathBuf, BuildError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    return Some(Err(BuildError::Walk { path, source: err }));
                }
            };

            // Links are followed, so this is the type of the link target
            if entry.file_type().is_file() && has_js_suffix(entry.file_name()) {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

/// Start enumerating `.js` files below `root`.
///
/// Fails with `DirectoryNotFound` when `root` is missing or is not a directory.
pub fn js_files(root: &Path) -> Result<JsFiles, BuildError> {
    if !root.is_dir() {
        return Err(BuildError::DirectoryNotFound(root.to_path_buf()));
    }

    let inner = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .into_iter();

    Ok(JsFiles {
        root: root.to_path_buf(),
        inner,
    })
}

/// Destination path for `file`: the `source_root` prefix replaced by `dest_root`.
///
/// Returns `None` when `file` does not live under `source_root`.
pub fn mirrored_path(source_root: &Path, dest_root: &Path, file: &Path) -> Option<PathBuf> {
    file.strip_prefix(source_root)
        .ok()
        .map(|relative| dest_root.join(relative))
}

fn has_js_suffix(name: &OsStr) -> bool {
    name.to_string_lossy().ends_with(JS_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn collect_relative(root: &Path) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = js_files(root)
            .unwrap()
            .map(|entry| entry.unwrap().strip_prefix(root).unwrap().to_path_buf())
            .collect();
        found.sort();
        found
    }

    #[test]
    fn test_finds_nested_js_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.js", "var a;");
        write(dir.path(), "sub/b.js", "var b;");
        write(dir.path(), "sub/deeper/c.min.js", "var c;");

        assert_eq!(
            collect_relative(dir.path()),
            vec![
                PathBuf::from("a.js"),
                PathBuf::from("sub/b.js"),
                PathBuf::from("sub/deeper/c.min.js"),
            ]
        );
    }

    #[test]
    fn test_skips_other_extensions_silently() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.txt", "hello");
        write(dir.path(), "upper.JS", "var u;");
        write(dir.path(), "module.mjs", "export {}");
        write(dir.path(), "data.json", "{}");
        write(dir.path(), "keep.js", "var k;");

        assert_eq!(collect_relative(dir.path()), vec![PathBuf::from("keep.js")]);
    }

    #[test]
    fn test_directory_named_like_js_is_descended_not_yielded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "vendor.js/readme.txt", "docs");
        write(dir.path(), "vendor.js/inner.js", "var i;");

        assert_eq!(
            collect_relative(dir.path()),
            vec![PathBuf::from("vendor.js/inner.js")]
        );
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty/nested")).unwrap();

        assert!(collect_relative(dir.path()).is_empty());
    }

    /// Depth-first `.js` paths, each directory expanded where it is listed
    fn listing_order(dir: &Path, found: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                listing_order(&path, found);
            } else if has_js_suffix(path.file_name().unwrap()) {
                found.push(path);
            }
        }
    }

    #[test]
    fn test_order_follows_directory_listing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.js", "");
        write(dir.path(), "sub/one.js", "");
        write(dir.path(), "sub/two.js", "");
        write(dir.path(), "sub/inner/three.js", "");
        write(dir.path(), "m.js", "");
        write(dir.path(), "other/four.js", "");
        write(dir.path(), "z.js", "");

        let walked: Vec<PathBuf> = js_files(dir.path())
            .unwrap()
            .map(Result::unwrap)
            .collect();

        let mut expected = Vec::new();
        listing_order(dir.path(), &mut expected);

        assert_eq!(walked.len(), 7);
        assert_eq!(walked, expected);
    }

    #[test]
    fn test_missing_root_is_directory_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        assert!(matches!(
            js_files(&missing),
            Err(BuildError::DirectoryNotFound(path)) if path == missing
        ));
    }

    #[test]
    fn test_file_root_is_directory_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "single.js", "var s;");

        assert!(matches!(
            js_files(&dir.path().join("single.js")),
            Err(BuildError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_mirrored_path_swaps_prefix() {
        let mirrored = mirrored_path(
            Path::new("/project/src"),
            Path::new("/project/dist"),
            Path::new("/project/src/routes/user.js"),
        );
        assert_eq!(mirrored, Some(PathBuf::from("/project/dist/routes/user.js")));
    }

    #[test]
    fn test_mirrored_path_outside_source_root() {
        let mirrored = mirrored_path(
            Path::new("/project/src"),
            Path::new("/project/dist"),
            Path::new("/elsewhere/user.js"),
        );
        assert_eq!(mirrored, None);
    }
}
