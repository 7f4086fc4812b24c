//! LESS variable preprocessor.
//!
//! Supports the subset of LESS that bundles rely on:
//! - `@name: value;` declarations (removed from the output)
//! - `@name` references, substituted with the declared value
//! - `//` line comments (removed), `/* */` comments (kept)
//!
//! An undeclared `@name` that starts a statement, or any vendor-prefixed
//! `@-name`, is a directive and passes through untouched, like everything
//! else. Undefined variables, unterminated strings or comments and
//! unbalanced braces are reported with their 1-based line and column.

use rustc_hash::FxHashMap;

use super::Preprocessor;
use crate::error::PreprocessError;

/// CSS at-rules that are never variable references.
const AT_RULES: &[&str] = &[
    "charset",
    "container",
    "counter-style",
    "document",
    "font-face",
    "font-feature-values",
    "import",
    "keyframes",
    "-webkit-keyframes",
    "-moz-keyframes",
    "layer",
    "media",
    "namespace",
    "page",
    "property",
    "scope",
    "starting-style",
    "supports",
    "viewport",
];

/// Default stylesheet preprocessor.
#[derive(Debug, Clone, Copy, Default)]
pub struct LessPreprocessor;

impl Preprocessor for LessPreprocessor {
    fn process(&self, source: &str) -> Result<String, PreprocessError> {
        Scanner::new(source).run()
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    out: String,
    vars: FxHashMap<String, String>,
    /// Positions of currently open `{`.
    open: Vec<(u32, u32)>,
    /// Nothing but whitespace or comments since the last `{`, `}` or `;`.
    statement_start: bool,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            out: String::with_capacity(source.len()),
            vars: FxHashMap::default(),
            open: Vec::new(),
            statement_start: true,
        }
    }

    fn run(mut self) -> Result<String, PreprocessError> {
        while let Some(c) = self.peek(0) {
            match c {
                '"' | '\'' => {
                    let literal = self.string()?;
                    self.out.push_str(&literal);
                    self.statement_start = false;
                }
                '/' if self.peek(1) == Some('*') => {
                    let comment = self.block_comment()?;
                    self.out.push_str(&comment);
                }
                '/' if self.peek(1) == Some('/') && self.line_comment_allowed() => {
                    self.skip_line_comment();
                }
                '{' => {
                    self.open.push((self.line, self.column));
                    self.bump();
                    self.out.push('{');
                    self.statement_start = true;
                }
                '}' => {
                    if self.open.pop().is_none() {
                        return Err(self.error_here("unexpected `}`"));
                    }
                    self.bump();
                    self.out.push('}');
                    self.statement_start = true;
                }
                '@' => self.at_keyword()?,
                _ => {
                    self.bump();
                    self.out.push(c);
                    if c == ';' {
                        self.statement_start = true;
                    } else if !c.is_whitespace() {
                        self.statement_start = false;
                    }
                }
            }
        }

        if let Some(&(line, column)) = self.open.last() {
            return Err(PreprocessError::new("missing closing `}`").at(line, column));
        }
        Ok(self.out)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error_here(&self, message: &str) -> PreprocessError {
        PreprocessError::new(message).at(self.line, self.column)
    }

    /// `//` starts a comment only after whitespace or a delimiter, so
    /// `url(http://…)` is left alone.
    fn line_comment_allowed(&self) -> bool {
        match self.pos.checked_sub(1).and_then(|i| self.chars.get(i)) {
            None => true,
            Some(prev) => prev.is_whitespace() || matches!(prev, ';' | '{' | '}'),
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self) -> Result<String, PreprocessError> {
        let (line, column) = (self.line, self.column);
        let mut text = String::from("/*");
        self.bump();
        self.bump();
        loop {
            match self.bump() {
                Some('*') if self.peek(0) == Some('/') => {
                    self.bump();
                    text.push_str("*/");
                    return Ok(text);
                }
                Some(c) => text.push(c),
                None => {
                    return Err(PreprocessError::new("unterminated comment").at(line, column));
                }
            }
        }
    }

    fn string(&mut self) -> Result<String, PreprocessError> {
        let (line, column) = (self.line, self.column);
        let quote = self.bump().unwrap_or('"');
        let mut text = String::from(quote);
        loop {
            match self.bump() {
                Some('\\') => {
                    text.push('\\');
                    if let Some(escaped) = self.bump() {
                        text.push(escaped);
                    }
                }
                Some('\n') | None => {
                    return Err(PreprocessError::new("unterminated string").at(line, column));
                }
                Some(c) => {
                    text.push(c);
                    if c == quote {
                        return Ok(text);
                    }
                }
            }
        }
    }

    fn ident(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek(0) {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        name
    }

    /// Handle `@…`: at-rule, declaration, or variable reference.
    fn at_keyword(&mut self) -> Result<(), PreprocessError> {
        let (line, column) = (self.line, self.column);
        self.bump();
        let name = self.ident();

        if name.is_empty() {
            self.out.push('@');
            self.statement_start = false;
            return Ok(());
        }

        if self.declaration_follows() {
            while self.bump().is_some_and(|c| c != ':') {}
            let raw = self.value()?;
            let value = self.substitute(raw.trim(), line, column)?;
            self.vars.insert(name, value);
            while matches!(self.peek(0), Some(' ' | '\t' | '\r')) {
                self.bump();
            }
            if self.peek(0) == Some('\n') {
                self.bump();
            }
            return Ok(());
        }

        let directive = AT_RULES.contains(&name.to_ascii_lowercase().as_str())
            || (!self.vars.contains_key(&name)
                && (name.starts_with('-') || self.statement_start));
        self.statement_start = false;

        if directive {
            self.out.push('@');
            self.out.push_str(&name);
            return Ok(());
        }

        match self.vars.get(&name) {
            Some(value) => {
                self.out.push_str(value);
                Ok(())
            }
            None => Err(undefined(&name, line, column)),
        }
    }

    fn declaration_follows(&self) -> bool {
        let mut i = self.pos;
        while let Some(c) = self.chars.get(i) {
            match c {
                ':' => return true,
                c if c.is_whitespace() => i += 1,
                _ => return false,
            }
        }
        false
    }

    /// Declaration value up to `;` (consumed) or `}` / end of input (not consumed).
    fn value(&mut self) -> Result<String, PreprocessError> {
        let mut text = String::new();
        while let Some(c) = self.peek(0) {
            match c {
                ';' => {
                    self.bump();
                    break;
                }
                '}' => break,
                '"' | '\'' => text.push_str(&self.string()?),
                _ => {
                    text.push(c);
                    self.bump();
                }
            }
        }
        Ok(text)
    }

    /// Replace `@name` references inside a declaration value.
    fn substitute(&self, raw: &str, line: u32, column: u32) -> Result<String, PreprocessError> {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();
        let mut quote = None;

        while let Some(c) = chars.next() {
            match (quote, c) {
                (Some(q), c) if c == q => {
                    quote = None;
                    out.push(c);
                }
                (Some(_), '\\') => {
                    out.push(c);
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                (Some(_), c) => out.push(c),
                (None, '"' | '\'') => {
                    quote = Some(c);
                    out.push(c);
                }
                (None, '@') => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if n.is_ascii_alphanumeric() || n == '-' || n == '_' {
                            name.push(n);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    if name.is_empty() {
                        out.push('@');
                        continue;
                    }
                    let value = self
                        .vars
                        .get(&name)
                        .ok_or_else(|| undefined(&name, line, column))?;
                    out.push_str(value);
                }
                (None, c) => out.push(c),
            }
        }
        Ok(out)
    }
}

fn undefined(name: &str, line: u32, column: u32) -> PreprocessError {
    PreprocessError::new(format!("variable @{name} is undefined")).at(line, column)
}
