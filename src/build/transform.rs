//! Source transformation seam
//!
//! The build treats minification as an opaque function from source text to
//! output text or an error. `JsMinifier` is the production implementation.

use swc_core::common::comments::{Comments, SingleThreadedComments};
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, Globals, Mark, SourceMap, Spanned, GLOBALS};
use swc_core::ecma::ast::Program;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config as CodegenConfig, Emitter, Node};
use swc_core::ecma::minifier::optimize;
use swc_core::ecma::minifier::option::{
    CompressOptions, ExtraOptions, MangleOptions as SwcMangleOptions, MinifyOptions as SwcMinifyOptions,
};
use swc_core::ecma::parser::{error::Error as ParseError, parse_file_as_script};
use swc_core::ecma::transforms::base::{fixer::fixer, resolver};
use swc_core::ecma::visit::VisitMutWith;
use thiserror::Error;

/// Per-file transformation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Pure function from source text to transformed text
pub trait Transform {
    fn transform(&self, source: &str) -> Result<String, TransformError>;
}

/// Minifier configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Run the optimization passes. Whitespace and comments are handled by
    /// `output` either way.
    pub compress: bool,
    pub mangle: MangleOptions,
    pub output: OutputOptions,
}

/// Identifier renaming options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MangleOptions {
    /// Names never given to or taken from a binding, local ones included
    pub reserved: Vec<String>,
}

/// Output formatting options
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputOptions {
    /// Indented, spaced output instead of the compact form
    pub beautify: bool,
    /// Keep source comments
    pub comments: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            compress: true,
            mangle: MangleOptions::default(),
            output: OutputOptions::default(),
        }
    }
}

impl Default for MangleOptions {
    fn default() -> Self {
        Self {
            reserved: ["require", "module", "exports"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// JavaScript minifier backed by the swc minifier.
///
/// Input is parsed as a classic script, so top-level bindings are globals and
/// keep their names. Locals are mangled except for the reserved names.
#[derive(Debug, Clone)]
pub struct JsMinifier {
    options: MinifyOptions,
}

impl JsMinifier {
    pub const fn new(options: MinifyOptions) -> Self {
        Self { options }
    }

    fn swc_options(&self) -> SwcMinifyOptions {
        SwcMinifyOptions {
            compress: self.options.compress.then(CompressOptions::default),
            mangle: Some(SwcMangleOptions {
                reserved: self
                    .options
                    .mangle
                    .reserved
                    .iter()
                    .map(|name| name.as_str().into())
                    .collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Parse, optimize and print one script. Needs swc's `GLOBALS` in scope.
    fn minify_script(&self, source: &str) -> Result<String, TransformError> {
        let cm = Lrc::new(SourceMap::default());
        let fm = cm.new_source_file(FileName::Anon.into(), source.to_owned());

        let store = SingleThreadedComments::default();
        let comments: Option<&dyn Comments> = if self.options.output.comments {
            Some(&store)
        } else {
            None
        };

        let mut recovered = Vec::new();
        let script = parse_file_as_script(&fm, Default::default(), Default::default(), comments, &mut recovered)
            .map_err(|err| syntax_error(&cm, &err))?;
        if let Some(err) = recovered.first() {
            return Err(syntax_error(&cm, err));
        }

        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();
        let mut program = Program::Script(script);
        program.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, false));

        let mut program = optimize(
            program,
            cm.clone(),
            comments,
            None,
            &self.swc_options(),
            &ExtraOptions {
                unresolved_mark,
                top_level_mark,
            },
        );
        program.visit_mut_with(&mut fixer(comments));

        let mut output = Vec::new();
        {
            let mut emitter = Emitter {
                cfg: CodegenConfig::default().with_minify(!self.options.output.beautify),
                cm: cm.clone(),
                comments,
                wr: JsWriter::new(cm.clone(), "\n", &mut output, None),
            };
            program
                .emit_with(&mut emitter)
                .map_err(|err| TransformError::new(format!("failed to print output: {err}")))?;
        }

        String::from_utf8(output)
            .map_err(|err| TransformError::new(format!("minifier produced invalid UTF-8: {err}")))
    }
}

impl Transform for JsMinifier {
    fn transform(&self, source: &str) -> Result<String, TransformError> {
        GLOBALS.set(&Globals::new(), || self.minify_script(source))
    }
}

/// `<message> (line L, column C)`, both 1-based
fn syntax_error(cm: &SourceMap, err: &ParseError) -> TransformError {
    let loc = cm.lookup_char_pos(err.span().lo);
    TransformError::new(format!(
        "{} (line {}, column {})",
        err.kind().msg(),
        loc.line,
        loc.col_display + 1
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minifier() -> JsMinifier {
        JsMinifier::new(MinifyOptions::default())
    }

    fn with_options(compress: bool, beautify: bool, comments: bool) -> JsMinifier {
        JsMinifier::new(MinifyOptions {
            compress,
            output: OutputOptions { beautify, comments },
            ..MinifyOptions::default()
        })
    }

    #[test]
    fn test_default_options() {
        let options = MinifyOptions::default();
        assert!(options.compress);
        assert_eq!(options.mangle.reserved, vec!["require", "module", "exports"]);
        assert!(!options.output.beautify);
        assert!(!options.output.comments);
    }

    #[test]
    fn test_minifies_function() {
        let source = "function f(value) {\n    return value + 1;\n}\n";
        let output = minifier().transform(source).unwrap();
        assert!(output.len() < source.len());
        assert!(output.contains("function f("));
        assert!(!output.contains("value"));
        assert!(!output.contains("  "));
    }

    #[test]
    fn test_strips_comments_and_whitespace() {
        let source = "// configuration value\nvar y = 2;\n/* trailing note */\nconsole.log(y);\n";
        let output = minifier().transform(source).unwrap();
        assert!(!output.contains("configuration"));
        assert!(!output.contains("trailing note"));
        assert!(!output.contains(" = "));
    }

    #[test]
    fn test_function_declaration_stays_constructible() {
        let source = "function Point(x) { this.x = x; }\nconsole.log(new Point(3).x);\n";
        let output = minifier().transform(source).unwrap();
        assert!(output.contains("function Point("));
        assert!(output.contains("new Point("));
        assert!(!output.contains("=>"));
    }

    #[test]
    fn test_arguments_keeps_its_function() {
        let source = "function sum() {\n  var total = 0;\n  for (var i = 0; i < arguments.length; i++) total += arguments[i];\n  return total;\n}\nconsole.log(sum(1, 2));\n";
        let output = minifier().transform(source).unwrap();
        assert!(output.contains("function sum("));
        assert!(output.contains("arguments"));
        assert!(!output.contains("=>"));
    }

    #[test]
    fn test_getters_stay_accessors() {
        let source = "class A { get p() { return 3; } }\nvar o = { get v() { return 9; } };\nconsole.log(new A().p, o.v);\n";
        let output = minifier().transform(source).unwrap();
        assert!(output.contains("get p("));
        assert!(output.contains("get v("));
    }

    #[test]
    fn test_reserved_local_binding_is_not_renamed() {
        let source = "function h(require) { return require + 1; }\nconsole.log(h(1));\n";
        let output = minifier().transform(source).unwrap();
        assert!(output.contains("require"));
    }

    #[test]
    fn test_unreserved_local_binding_is_renamed() {
        let options = MinifyOptions {
            mangle: MangleOptions { reserved: Vec::new() },
            ..MinifyOptions::default()
        };
        let source = "function h(require) { return require + 1; }\nconsole.log(h(1));\n";
        let output = JsMinifier::new(options).transform(source).unwrap();
        assert!(!output.contains("require"));
    }

    #[test]
    fn test_keeps_commonjs_globals() {
        let source = "var express = require(\"express\");\nmodule.exports = express;\n";
        let output = minifier().transform(source).unwrap();
        assert!(output.contains("require("));
        assert!(output.contains("module.exports"));
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = minifier().transform("var ok = 1;\nfunction (").unwrap_err();
        assert!(err.message().contains("(line 2, column "), "{}", err.message());
    }

    #[test]
    fn test_compress_disabled_still_strips() {
        let source = "var y = 2; // kept\nconsole.log(y);\n";
        let output = with_options(false, false, false).transform(source).unwrap();
        assert!(!output.contains("kept"));
        assert!(output.contains("y=2"));
    }

    #[test]
    fn test_beautify_spaces_output() {
        let source = "var y=2;console.log(y);";
        let output = with_options(true, true, false).transform(source).unwrap();
        assert!(output.contains(" = "));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_comments_kept_when_enabled() {
        let source = "/*! banner */\nvar y = 2;\nconsole.log(y);\n";
        let output = with_options(false, false, true).transform(source).unwrap();
        assert!(output.contains("banner"));
    }
}
