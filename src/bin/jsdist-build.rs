//! Minify every `.js` file under `assets/src` into `assets/dist`.
//!
//! Takes no arguments. Prints "Build completed." and exits 0 once every file
//! has been attempted, even if some of them failed; exits 1 when the source
//! directory is missing or holds no `.js` files.

use std::process::ExitCode;

use jsdist::build::{self, BuildRoots, JsMinifier, MinifyOptions};

fn main() -> ExitCode {
    let roots = BuildRoots::project_default();
    let minifier = JsMinifier::new(MinifyOptions::default());

    build::finish(&build::run(&roots, &minifier))
}
