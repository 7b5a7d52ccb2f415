//! Localized string bundle.
//!
//! [`I18nBundle`] maps message keys to localized text loaded from
//! Java-style `.properties` files. A bundle for a locale is built by reading
//! the base file and overlaying the more specific files on top of it:
//!
//! ```text
//! assets/i18n/i18n.properties        (base, required)
//! assets/i18n/i18n_de.properties     (language)
//! assets/i18n/i18n_de_AT.properties  (language + country)
//! ```
//!
//! Messages may contain `{n}` placeholders that [`I18nBundle::format`]
//! replaces with its arguments. A pair of single quotes (`''`) is a literal
//! quote, and text enclosed in single quotes is copied verbatim.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised while loading a bundle from disk.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("failed to read bundle file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid unicode escape in {path} at line {line}")]
    InvalidEscape { path: PathBuf, line: usize },
}

/// Localized messages for a single locale.
#[derive(Resource, Debug, Clone, Default)]
pub struct I18nBundle {
    locale: String,
    messages: FxHashMap<String, String>,
}

impl I18nBundle {
    /// Parse a bundle from the text of a `.properties` file.
    pub fn from_properties(text: &str) -> Result<Self, I18nError> {
        let mut bundle = Self::default();
        bundle.merge_properties(text, Path::new("<memory>"))?;
        Ok(bundle)
    }

    /// Load `<base>.properties` from `dir` and overlay the files for `locale`.
    ///
    /// `locale` uses `lang` or `lang_COUNTRY` form (`-` is accepted as a
    /// separator). An empty locale loads only the base file. Missing
    /// locale-specific files are skipped; a missing base file is an error.
    pub fn load(dir: impl AsRef<Path>, base: &str, locale: &str) -> Result<Self, I18nError> {
        let dir = dir.as_ref();
        let mut bundle = Self::default();

        let base_path = dir.join(format!("{base}.properties"));
        bundle.merge_file(&base_path)?;

        let locale = locale.replace('-', "_");
        let mut suffix = String::new();
        for part in locale.split('_').filter(|p| !p.is_empty()) {
            suffix.push('_');
            suffix.push_str(part);
            let path = dir.join(format!("{base}{suffix}.properties"));
            if path.is_file() {
                bundle.merge_file(&path)?;
            }
        }
        bundle.locale = locale;

        info!(
            "Loaded i18n bundle '{}' for locale '{}' ({} messages)",
            base,
            bundle.locale,
            bundle.messages.len()
        );
        Ok(bundle)
    }

    /// Locale tag the bundle was loaded for (empty for the base bundle).
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Raw message for `key`.
    pub fn try_get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Message for `key`, or `???key???` when the key is missing.
    pub fn get(&self, key: &str) -> String {
        match self.try_get(key) {
            Some(msg) => unquote(msg),
            None => missing(key),
        }
    }

    /// Message for `key` with `{n}` placeholders replaced by `args[n]`.
    ///
    /// Placeholders without a matching argument are kept as written.
    pub fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        match self.try_get(key) {
            Some(msg) => format_message(msg, args),
            None => missing(key),
        }
    }

    /// Insert or replace a message.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), I18nError> {
        let text = std::fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_properties(&text, path)
    }

    fn merge_properties(&mut self, text: &str, path: &Path) -> Result<(), I18nError> {
        let mut lines = text.lines().enumerate();
        while let Some((index, line)) = lines.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            // Join continuation lines (odd number of trailing backslashes).
            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_key_value(&logical);
            let key = unescape(key).ok_or_else(|| I18nError::InvalidEscape {
                path: path.to_path_buf(),
                line: index + 1,
            })?;
            let value = unescape(value).ok_or_else(|| I18nError::InvalidEscape {
                path: path.to_path_buf(),
                line: index + 1,
            })?;
            self.messages.insert(key, value);
        }
        Ok(())
    }
}

fn missing(key: &str) -> String {
    warn!("Missing i18n key '{}'", key);
    format!("???{key}???")
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], line[i + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (&line[..i], rest.trim_start());
            }
            _ => {}
        }
    }
    (line, "")
}

/// Resolve backslash escapes. Returns `None` on a malformed `\u` escape.
fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Some(out)
}

/// Apply quoting rules to a message without placeholders.
fn unquote(msg: &str) -> String {
    format_message(msg, &[])
}

fn format_message(msg: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(msg.len() + 8);
    let mut chars = msg.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            '{' if !quoted => {
                let mut placeholder = String::new();
                let mut closed = false;
                for p in chars.by_ref() {
                    if p == '}' {
                        closed = true;
                        break;
                    }
                    placeholder.push(p);
                }
                let arg = placeholder
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| args.get(i));
                match (arg, closed) {
                    (Some(arg), true) => out.push_str(&arg.to_string()),
                    _ => {
                        out.push('{');
                        out.push_str(&placeholder);
                        if closed {
                            out.push('}');
                        }
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}
