//! Bundle assembly: preamble plus member files in declared order.
//!
//! Members are read one after another, never fanned out, so the output order
//! is the manifest order regardless of how long each read takes. A member that
//! cannot be read is reported and does not stop the bundle:
//!
//! | Mode      | Missing member                                  |
//! |-----------|-------------------------------------------------|
//! | `pack`    | omitted                                         |
//! | `monitor` | replaced by an inline diagnostic fragment       |

pub mod diagnostic;
mod preamble;

pub use preamble::{script_preamble, stylesheet_preamble};

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::{BunchConfig, PathResolver};
use crate::context::BuildContext;
use crate::core::{AssetKind, BuildMode};
use crate::error::BuildError;
use crate::report::Reporter;
use diagnostic::Level;

/// Assembles bundles of one configuration.
pub struct Assembler<'a> {
    config: &'a BunchConfig,
    ctx: &'a BuildContext,
    mode: BuildMode,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a BunchConfig, ctx: &'a BuildContext, mode: BuildMode) -> Self {
        Self { config, ctx, mode }
    }

    /// Preamble for a bundle of `kind`.
    pub fn preamble(&self, kind: AssetKind) -> String {
        match kind {
            AssetKind::Script => script_preamble(&self.config.variables),
            AssetKind::Stylesheet => {
                stylesheet_preamble(&self.config.variables, self.ctx.reporter())
            }
            AssetKind::Unknown => String::new(),
        }
    }

    /// Concatenate `bundle` into a single text blob.
    pub async fn assemble(&self, bundle: &str) -> Result<String, BuildError> {
        let members = self
            .config
            .members(bundle)
            .ok_or_else(|| BuildError::UnknownBundle(bundle.to_string()))?;

        let kind = AssetKind::classify(bundle);
        if !kind.is_known() {
            return Err(BuildError::UnknownFileType(bundle.to_string()));
        }

        let resolver = self.config.resolver(self.ctx.root());
        let mut out = self.preamble(kind);

        for member in members {
            match read_member(&resolver, member, self.ctx.reporter()).await {
                Ok(content) => out.push_str(&content),
                Err(err) => {
                    self.ctx.reporter().report(&[err.name(), &err.detail()]);
                    let inline = self.mode.is_monitor()
                        && !matches!(err, BuildError::UnknownFileType(_));
                    if !inline {
                        continue;
                    }
                    out.push_str(&diagnostic::fragment(kind, Level::Warning, &err.to_string()));
                }
            }
            out.push('\n');
        }

        Ok(out)
    }
}

/// Read a member as text. Invalid UTF-8 is replaced with U+FFFD and
/// reported, so the member still lands in the bundle.
async fn read_member(
    resolver: &PathResolver<'_>,
    member: &str,
    reporter: &dyn Reporter,
) -> Result<String, BuildError> {
    let path: PathBuf = resolver.resolve_source_path(member)?;
    match tokio::fs::read(&path).await {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(err) => {
                reporter.report(&[
                    "Invalid UTF-8:",
                    &format!("`{member}` ({}), bytes replaced", path.display()),
                ]);
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => Err(BuildError::MissingSourceFile {
            member: member.to_string(),
            path,
        }),
        Err(err) => Err(BuildError::Read(path, err)),
    }
}
