//! Build mode for one-shot packing vs. monitor rebuilds.

/// Build mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Substitute in-band diagnostics for missing members and append
    /// error banners to artifacts, so a broken dependency stays visible
    /// to whoever consumes the artifact.
    pub inline_diagnostics: bool,
}

impl BuildMode {
    /// `bunch pack`: missing members are skipped, failed bundles untouched.
    pub const PACK: Self = Self {
        inline_diagnostics: false,
    };

    /// `bunch monitor`: errors degrade to inline diagnostics.
    pub const MONITOR: Self = Self {
        inline_diagnostics: true,
    };

    #[inline]
    pub const fn is_monitor(&self) -> bool {
        self.inline_diagnostics
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::PACK
    }
}
