//! Asset minification for JS and CSS bundles.
//!
//! Uses oxc for JavaScript and lightningcss for CSS.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier as OxcMinifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::Minifier;
use crate::core::AssetKind;
use crate::error::MinifyError;

/// Default minifier: oxc for scripts, lightningcss for stylesheets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetMinifier;

impl Minifier for AssetMinifier {
    fn minify(&self, source: &str, kind: AssetKind) -> Result<String, MinifyError> {
        match kind {
            AssetKind::Script => minify_js(source),
            AssetKind::Stylesheet => minify_css(source),
            AssetKind::Unknown => Err(MinifyError::new("cannot minify an asset of unknown type")),
        }
    }
}

/// Minify JavaScript source code.
///
/// Parsed as a classic script: bundles are concatenated globals, and the
/// top-level `Bunch` binding must survive mangling.
fn minify_js(source: &str) -> Result<String, MinifyError> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs().with_script(true);
    let ret = Parser::new(&allocator, source, source_type).parse();
    if let Some(err) = ret.errors.first() {
        return Err(MinifyError::new(err.to_string()));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = OxcMinifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code.
fn minify_css(source: &str) -> Result<String, MinifyError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|err| MinifyError::new(err.to_string()))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|err| MinifyError::new(err.to_string()))?;
    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_js() {
        let source = "var Bunch = Bunch || {};\nBunch.variables = {};\n\nvar answer = 40 + 2;\n";
        let out = minify_js(source).unwrap();
        assert!(out.len() < source.len());
        assert!(out.contains("Bunch"));
        assert!(out.contains("answer"));
    }

    #[test]
    fn test_minify_js_rejects_invalid_source() {
        let err = minify_js("i am not valid javascript;] {{").unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_minify_css() {
        let out = minify_css(".a {\n  color: red;\n}\n").unwrap();
        assert_eq!(out, ".a{color:red}");
    }

    #[test]
    fn test_minify_css_rejects_invalid_selector() {
        assert!(minify_css("..broken { color: red }").is_err());
    }

    #[test]
    fn test_minifier_dispatches_by_kind() {
        let minifier = AssetMinifier;
        assert_eq!(
            minifier.minify("b { color: red; }", AssetKind::Stylesheet).unwrap(),
            "b{color:red}"
        );
        assert!(minifier.minify("x", AssetKind::Unknown).is_err());
    }
}
