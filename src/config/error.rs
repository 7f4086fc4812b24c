//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest loading errors. Fatal to the load call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Manifest parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Manifest syntax error: {0}")]
    Syntax(#[from] serde_json5::Error),
}

impl ConfigError {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Io(..) => "ConfigReadError",
            Self::Parse(_) | Self::Syntax(_) => "ConfigParseError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("Bunchfile"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("Bunchfile"));
        assert_eq!(io_err.name(), "ConfigReadError");

        let parse_err = ConfigError::from(serde_json::from_str::<u8>("{").unwrap_err());
        assert!(parse_err.to_string().starts_with("Manifest parsing error"));
        assert_eq!(parse_err.name(), "ConfigParseError");

        let syntax_err = ConfigError::from(serde_json5::from_str::<u8>("{").unwrap_err());
        assert!(syntax_err.to_string().starts_with("Manifest syntax error"));
        assert_eq!(syntax_err.name(), "ConfigParseError");
    }
}
