//! Embedded static resources.

mod template;

pub use template::{Template, TemplateVars};

/// Variables for the starter Bunchfile.
pub struct ManifestVars<'a> {
    pub version: &'a str,
}

impl TemplateVars for ManifestVars<'_> {
    fn apply(&self, content: &str) -> String {
        content.replace("__VERSION__", self.version)
    }
}

/// Starter manifest written by `bunch init`.
pub const BUNCHFILE: Template<ManifestVars<'static>> = Template::new(include_str!("Bunchfile"));

/// Render the starter manifest for this build.
pub fn starter_manifest() -> String {
    BUNCHFILE.render(&ManifestVars {
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BunchConfig;

    #[test]
    fn test_starter_manifest_is_loadable() {
        let content = starter_manifest();
        assert!(content.contains(env!("CARGO_PKG_VERSION")));
        assert!(!content.contains("__VERSION__"));

        let mut config = BunchConfig::default();
        config.load_str(&content).unwrap();
        assert_eq!(config.bundle_names().collect::<Vec<_>>(), ["site.js", "site.css"]);
        assert_eq!(config.variables["gutter"], "12px");
    }
}
