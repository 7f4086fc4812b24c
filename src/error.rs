//! Build error types.
//!
//! File-scoped and bundle-scoped errors never abort sibling work; they are
//! collected into the [`BuildResult`](crate::packager::BuildResult) of the
//! invocation. Only [`PackError`] ends an invocation.

use crate::config::ConfigError;
use crate::packager::BuildResult;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Capability errors
// ============================================================================

/// Structured stylesheet preprocessing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessError {
    pub message: String,
    /// 1-based line, when known.
    pub line: Option<u32>,
    /// 1-based column, when known.
    pub column: Option<u32>,
}

impl PreprocessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(
                f,
                "Syntax Error on line {line}, column {column}: {}",
                self.message
            ),
            (Some(line), None) => write!(f, "Syntax Error on line {line}: {}", self.message),
            _ => write!(f, "Syntax Error: {}", self.message),
        }
    }
}

impl std::error::Error for PreprocessError {}

/// Minification failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Minify Error: {message}")]
pub struct MinifyError {
    pub message: String,
}

impl MinifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// BuildError
// ============================================================================

/// Per-file or per-bundle build failure.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("bundle `{0}` is not declared in the manifest")]
    UnknownBundle(String),

    #[error("cannot tell whether `{0}` is a script or a stylesheet")]
    UnknownFileType(String),

    #[error("could not find file {} (member `{member}`)", .path.display())]
    MissingSourceFile { member: String, path: PathBuf },

    #[error("could not read `{}`", .0.display())]
    Read(PathBuf, #[source] io::Error),

    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Minify(#[from] MinifyError),

    #[error("could not create output directory `{}`", .0.display())]
    OutputDir(PathBuf, #[source] io::Error),

    #[error("could not write `{}`", .0.display())]
    Write(PathBuf, #[source] io::Error),
}

impl BuildError {
    /// Stable classification name, reported alongside the message.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UnknownBundle(_) => "UnknownBundleError",
            Self::UnknownFileType(_) => "UnknownFileTypeError",
            Self::MissingSourceFile { .. } => "MissingSourceFileError",
            Self::Read(..) => "ReadError",
            Self::Preprocess(_) => "PreprocessError",
            Self::Minify(_) => "MinifyError",
            Self::OutputDir(..) => "OutputDirectoryError",
            Self::Write(..) => "WriteError",
        }
    }

    /// Permission failures on the output directory end the whole invocation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutputDir(_, err) if err.kind() == io::ErrorKind::PermissionDenied)
    }

    /// Message including the source chain (`could not read x: No such file`).
    pub fn detail(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}

// ============================================================================
// PackError
// ============================================================================

/// Invocation-fatal errors.
#[derive(Debug, Error)]
pub enum PackError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("bundle `{bundle}`: {source}")]
    OutputDirectory {
        bundle: String,
        #[source]
        source: BuildError,
        /// Outcomes of the other bundles of the invocation.
        result: BuildResult,
    },
}
