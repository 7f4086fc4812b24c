//! Asset kind classification by file extension.

use std::fmt;
use std::path::Path;

/// Kind of bundle or bundle member, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// `.js`
    Script,
    /// `.css`, or `.less` preprocessor source.
    Stylesheet,
    /// Anything else.
    Unknown,
}

impl AssetKind {
    /// Classify a file name, a bare extension (`css`) or a dotted one (`.css`).
    pub fn classify(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_else(|| name.trim_start_matches('.'));

        if ext.eq_ignore_ascii_case("js") {
            Self::Script
        } else if ext.eq_ignore_ascii_case("css") || ext.eq_ignore_ascii_case("less") {
            Self::Stylesheet
        } else {
            Self::Unknown
        }
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script => f.write_str("script"),
            Self::Stylesheet => f.write_str("stylesheet"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_file_names() {
        assert_eq!(AssetKind::classify("app.js"), AssetKind::Script);
        assert_eq!(AssetKind::classify("vendor/jquery.js"), AssetKind::Script);
        assert_eq!(AssetKind::classify("reset.css"), AssetKind::Stylesheet);
        assert_eq!(AssetKind::classify("theme.less"), AssetKind::Stylesheet);
        assert_eq!(AssetKind::classify("notes.txt"), AssetKind::Unknown);
        assert_eq!(AssetKind::classify("Makefile"), AssetKind::Unknown);
    }

    #[test]
    fn test_classify_extensions() {
        assert_eq!(AssetKind::classify("js"), AssetKind::Script);
        assert_eq!(AssetKind::classify(".css"), AssetKind::Stylesheet);
        assert_eq!(AssetKind::classify(".less"), AssetKind::Stylesheet);
        assert_eq!(AssetKind::classify(".coffee"), AssetKind::Unknown);
        assert_eq!(AssetKind::classify(""), AssetKind::Unknown);
    }

    #[test]
    fn test_classify_ignores_case() {
        assert_eq!(AssetKind::classify("APP.JS"), AssetKind::Script);
        assert_eq!(AssetKind::classify("Site.Less"), AssetKind::Stylesheet);
    }
}
