//! Render pipeline: preprocess, minify, write.
//!
//! ```text
//! stylesheet: text → Preprocessor → [Minifier] → write_out
//! script:     text →                [Minifier] → write_out
//! ```
//!
//! A failed pass never produces a fresh artifact. In monitor mode the error
//! is appended as a banner to the artifact left over from the previous pass.

mod less;
mod minify;
mod write;

pub use less::LessPreprocessor;
pub use minify::AssetMinifier;
pub use write::{append_banner, write_out};

use std::path::Path;

use crate::bundle::diagnostic;
use crate::context::BuildContext;
use crate::core::{AssetKind, BuildMode};
use crate::error::{BuildError, MinifyError, PreprocessError};

/// Stylesheet preprocessing capability.
pub trait Preprocessor: Send + Sync {
    fn process(&self, source: &str) -> Result<String, PreprocessError>;
}

/// Minification capability; `kind` is a hint for the syntax of `source`.
pub trait Minifier: Send + Sync {
    fn minify(&self, source: &str, kind: AssetKind) -> Result<String, MinifyError>;
}

pub struct Renderer<'a> {
    ctx: &'a BuildContext,
    mode: BuildMode,
}

impl<'a> Renderer<'a> {
    pub fn new(ctx: &'a BuildContext, mode: BuildMode) -> Self {
        Self { ctx, mode }
    }

    /// Render assembled `text` of `kind` to `output`.
    pub async fn render(
        &self,
        text: String,
        kind: AssetKind,
        output: &Path,
        compress: bool,
    ) -> Result<(), BuildError> {
        match self.transform(text, kind, compress) {
            Ok(rendered) => write_out(output, &rendered).await,
            Err(err) => {
                if self.mode.is_monitor() {
                    let message = format!("Failed to build bundle {}: {err}", output.display());
                    if let Err(banner_err) =
                        append_banner(output, &diagnostic::banner(kind, &message)).await
                    {
                        self.ctx
                            .reporter()
                            .report(&[banner_err.name(), &banner_err.detail()]);
                    }
                }
                Err(err)
            }
        }
    }

    fn transform(&self, text: String, kind: AssetKind, compress: bool) -> Result<String, BuildError> {
        let text = match kind {
            AssetKind::Stylesheet => self.ctx.preprocessor().process(&text)?,
            AssetKind::Script | AssetKind::Unknown => text,
        };
        if !compress {
            return Ok(text);
        }
        Ok(self.ctx.minifier().minify(&text, kind)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use std::sync::Arc;

    /// Minifier that always fails, for exercising the failure path.
    struct BrokenMinifier;

    impl Minifier for BrokenMinifier {
        fn minify(&self, _: &str, _: AssetKind) -> Result<String, MinifyError> {
            Err(MinifyError::new("minifier crashed"))
        }
    }

    #[tokio::test]
    async fn test_stylesheet_is_preprocessed() {
        let fx = Fixture::new();
        let ctx = fx.ctx();
        let output = fx.path("css/bin/site.css");
        std::fs::create_dir_all(fx.path("css")).unwrap();

        Renderer::new(&ctx, BuildMode::PACK)
            .render("@w: 2px;\n.a { width: @w; }\n".into(), AssetKind::Stylesheet, &output, false)
            .await
            .unwrap();
        assert_eq!(fx.read("css/bin/site.css"), ".a { width: 2px; }\n");
    }

    #[tokio::test]
    async fn test_stylesheet_compressed() {
        let fx = Fixture::new();
        let ctx = fx.ctx();
        let output = fx.path("css/bin/site.css");
        std::fs::create_dir_all(fx.path("css")).unwrap();

        Renderer::new(&ctx, BuildMode::PACK)
            .render(".a {\n  color: red;\n}\n".into(), AssetKind::Stylesheet, &output, true)
            .await
            .unwrap();
        assert_eq!(fx.read("css/bin/site.css"), ".a{color:red}");
    }

    #[tokio::test]
    async fn test_script_skips_preprocessing() {
        let fx = Fixture::new();
        let ctx = fx.ctx();
        let output = fx.path("js/bin/app.js");
        std::fs::create_dir_all(fx.path("js")).unwrap();

        // `@x` would be an undefined LESS variable
        Renderer::new(&ctx, BuildMode::PACK)
            .render("var x = '@x';\n".into(), AssetKind::Script, &output, false)
            .await
            .unwrap();
        assert_eq!(fx.read("js/bin/app.js"), "var x = '@x';\n");
    }

    #[tokio::test]
    async fn test_preprocess_failure_leaves_artifact_in_pack_mode() {
        let fx = Fixture::new();
        fx.write("css/bin/site.css", "previous");
        let ctx = fx.ctx();

        let err = Renderer::new(&ctx, BuildMode::PACK)
            .render(".a { width: @nope; }".into(), AssetKind::Stylesheet, &fx.path("css/bin/site.css"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Preprocess(_)));
        assert_eq!(fx.read("css/bin/site.css"), "previous");
    }

    #[tokio::test]
    async fn test_preprocess_failure_appends_banner_in_monitor_mode() {
        let fx = Fixture::new();
        fx.write("css/bin/site.css", "previous");
        let ctx = fx.ctx();

        let err = Renderer::new(&ctx, BuildMode::MONITOR)
            .render(".a {\n  width: @nope;\n}".into(), AssetKind::Stylesheet, &fx.path("css/bin/site.css"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Preprocess(_)));

        let artifact = fx.read("css/bin/site.css");
        assert!(artifact.starts_with("previous\nbody:before {"));
        assert!(artifact.contains("Syntax Error on line 2"));
    }

    #[tokio::test]
    async fn test_minify_failure_aborts_write() {
        let fx = Fixture::new();
        fx.write("js/bin/app.js", "previous");
        let ctx = fx.ctx().with_minifier(Arc::new(BrokenMinifier));

        let err = Renderer::new(&ctx, BuildMode::PACK)
            .render("var a;".into(), AssetKind::Script, &fx.path("js/bin/app.js"), true)
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Minify(_)));
        assert_eq!(fx.read("js/bin/app.js"), "previous");

        let err = Renderer::new(&ctx, BuildMode::MONITOR)
            .render("var a;".into(), AssetKind::Script, &fx.path("js/bin/app.js"), true)
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Minify(_)));
        let artifact = fx.read("js/bin/app.js");
        assert!(artifact.starts_with("previous\nconsole.error("));
        assert!(artifact.contains("minifier crashed"));
    }

    #[tokio::test]
    async fn test_uncompressed_skips_minifier() {
        let fx = Fixture::new();
        std::fs::create_dir_all(fx.path("js")).unwrap();
        let ctx = fx.ctx().with_minifier(Arc::new(BrokenMinifier));

        Renderer::new(&ctx, BuildMode::PACK)
            .render("var a;".into(), AssetKind::Script, &fx.path("js/bin/app.js"), false)
            .await
            .unwrap();
        assert_eq!(fx.read("js/bin/app.js"), "var a;");
    }
}
