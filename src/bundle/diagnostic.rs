//! In-band diagnostics written into artifacts in monitor mode.
//!
//! A script gets a console statement, a stylesheet gets a banner rule that
//! renders on top of the page. Both are valid syntax for their bundle type.

use crate::core::AssetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

/// Diagnostic fragment in the syntax of `kind`.
pub fn fragment(kind: AssetKind, level: Level, message: &str) -> String {
    let text = format!("Bunch: {message}");
    match kind {
        AssetKind::Stylesheet => {
            let background = match level {
                Level::Warning => "#b36b00",
                Level::Error => "#c00",
            };
            format!(
                "body:before {{ display: block; padding: 8px; background: {background}; color: #fff; font: 12px monospace; white-space: pre-wrap; content: {}; }}",
                css_string(&text)
            )
        }
        AssetKind::Script | AssetKind::Unknown => {
            let call = match level {
                Level::Warning => "console.warn",
                Level::Error => "console.error",
            };
            let literal = serde_json::to_string(&text).unwrap_or_else(|_| "\"\"".to_string());
            format!("{call}({literal});")
        }
    }
}

/// Banner appended to an existing artifact after a failed render pass.
pub fn banner(kind: AssetKind, message: &str) -> String {
    format!("\n{}\n", fragment(kind, Level::Error, message))
}

/// Quote `text` as a CSS string literal.
fn css_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\A "),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
