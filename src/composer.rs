/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

use std::fmt::Write;

use crate::{SanitizeOptions,
            SgrCode,
            StyleConfig,
            StyleRole,
            palette::emit::write_role_fg,
            sanitize::sanitize_impl::sanitize_into};

/// Fluent builder that accumulates one styled output string. Style-setting operations
/// resolve [StyleRole]s through the config's palette and emit [SgrCode] primitives;
/// content operations route through the sanitizer so control characters and decode
/// failures stay visible. Every operation consumes the builder and returns it, and the
/// result is finalized with [AnsiComposer::into_string].
///
/// No operation panics or rejects input: malformed characters are substituted, never
/// dropped.
///
/// # Example usage:
///
/// ```rust
/// use r3bl_ansi_styler::{AnsiComposer, ColorMode, StyleConfig, StyleRole};
///
/// let config = StyleConfig::new(ColorMode::Standard);
/// let styled = AnsiComposer::new(config)
///     .fg(StyleRole::Destination)
///     .text("orders")
///     .reset()
///     .into_string();
/// assert_eq!(styled, "\x1b[38;5;43morders");
///
/// // Under ColorMode::Off the same chain emits pure text.
/// let config = StyleConfig::new(ColorMode::Off);
/// let plain = AnsiComposer::new(config)
///     .fg(StyleRole::Destination)
///     .text("orders")
///     .reset()
///     .into_string();
/// assert_eq!(plain, "orders");
/// ```
#[derive(Clone, Debug)]
pub struct AnsiComposer {
    buffer: String,
    config: StyleConfig,
    current_role: StyleRole,
}

impl Default for AnsiComposer {
    fn default() -> Self { AnsiComposer::new(StyleConfig::default()) }
}

pub mod composer_impl {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    impl AnsiComposer {
        /// Start an empty composer. The config decides everything downstream: whether
        /// escapes are emitted at all, and which palette roles resolve through.
        #[must_use]
        pub fn new(config: StyleConfig) -> AnsiComposer {
            AnsiComposer {
                buffer: String::new(),
                config,
                current_role: StyleRole::Default,
            }
        }

        #[must_use]
        pub fn config(&self) -> &StyleConfig { &self.config }

        /// The role most recently set via [AnsiComposer::fg]. Used to know which
        /// foreground to restore after a transient substitution.
        #[must_use]
        pub fn current_role(&self) -> StyleRole { self.current_role }

        /// Make `role` the current role and emit its foreground (intensity attribute
        /// first when the resolved style carries one). When the mode is off this only
        /// records the role.
        #[must_use]
        pub fn fg(mut self, role: StyleRole) -> AnsiComposer {
            self.current_role = role;
            if self.config.is_on() {
                write_role_fg(&mut self.buffer, self.config.resolve(role));
            }
            self
        }

        /// Emit a raw ANSI 256 foreground, bypassing role resolution. Does not change
        /// the current role.
        #[must_use]
        pub fn fg_ansi256(mut self, index: u8) -> AnsiComposer {
            if self.config.is_on() {
                let _ = write!(self.buffer, "{}", SgrCode::ForegroundAnsi256(index));
            }
            self
        }

        /// Restore the terminal default foreground. Does not change the current role.
        #[must_use]
        pub fn fg_default(mut self) -> AnsiComposer {
            if self.config.is_on() {
                let _ = write!(self.buffer, "{}", SgrCode::ForegroundDefault);
            }
            self
        }

        #[must_use]
        pub fn dim(mut self) -> AnsiComposer {
            if self.config.is_on() {
                let _ = write!(self.buffer, "{}", SgrCode::Dim);
            }
            self
        }

        #[must_use]
        pub fn italic(mut self) -> AnsiComposer {
            if self.config.is_on() {
                let _ = write!(self.buffer, "{}", SgrCode::Italic);
            }
            self
        }

        /// Append verbatim, no sanitization. Only for content that is already fully
        /// formed escape text.
        #[must_use]
        pub fn raw(mut self, arg_text: impl AsRef<str>) -> AnsiComposer {
            self.buffer.push_str(arg_text.as_ref());
            self
        }

        /// Serialize `other` and embed its output unmodified.
        #[must_use]
        pub fn append(self, other: AnsiComposer) -> AnsiComposer {
            let rendered = other.into_string();
            self.raw(rendered)
        }

        /// Append one character through the sanitizer.
        #[must_use]
        pub fn push(self, c: char) -> AnsiComposer {
            let mut utf8_buf = [0u8; 4];
            let encoded: &str = c.encode_utf8(&mut utf8_buf);
            self.text_with(encoded, SanitizeOptions::default())
        }

        /// Append a boolean as its textual form, through the sanitizer.
        #[must_use]
        pub fn push_bool(self, b: bool) -> AnsiComposer {
            self.text(if b { "true" } else { "false" })
        }

        /// Append text through the sanitizer with default options (tab and line feed
        /// stay literal, no punctuation highlighting).
        #[must_use]
        pub fn text(self, arg_text: impl AsRef<str>) -> AnsiComposer {
            self.text_with(arg_text, SanitizeOptions::default())
        }

        /// Append text through the sanitizer with explicit [SanitizeOptions].
        #[must_use]
        pub fn text_with(
            mut self,
            arg_text: impl AsRef<str>,
            options: SanitizeOptions,
        ) -> AnsiComposer {
            sanitize_into(
                &mut self.buffer,
                arg_text.as_ref(),
                options,
                &self.config,
                self.current_role,
            );
            self
        }

        /// Emit a full style reset, then reassert the `Default` role's foreground if
        /// the palette gives it a concrete color. No-op when the mode is off.
        #[must_use]
        pub fn reset(mut self) -> AnsiComposer {
            self.buffer.push_str(&self.config.reset_sequence());
            self
        }

        /// Render text in the `Error` role, then reset. When the mode is off the text
        /// is appended verbatim instead.
        #[must_use]
        pub fn invalid(self, arg_text: impl AsRef<str>) -> AnsiComposer {
            if self.config.is_on() {
                self.fg(StyleRole::Error).text(arg_text).reset()
            } else {
                self.raw(arg_text)
            }
        }

        /// Render an error as `<TypeName> - <message>` through
        /// [AnsiComposer::invalid].
        #[must_use]
        pub fn error_text<E: std::error::Error>(self, error: &E) -> AnsiComposer {
            let kind = simple_type_name::<E>();
            let formatted = format!("{kind} - {error}");
            self.invalid(formatted)
        }

        /// Finalize into the styled output string. Any trailing reset-to-default tail
        /// is trimmed, repeatedly, so callers that end with one or more [Self::reset]
        /// calls get identical bytes. Callers that want a trailing reset in the final
        /// artifact must add it themselves after serialization.
        #[must_use]
        pub fn into_string(self) -> String {
            let mut output = self.buffer;
            let tail = self.config.reset_sequence();
            if !tail.is_empty() {
                while output.ends_with(tail.as_str()) {
                    output.truncate(output.len() - tail.len());
                }
            }
            output
        }
    }

    /// Last path segment of a type's name, generic arguments stripped.
    fn simple_type_name<T>() -> &'static str {
        let full = std::any::type_name::<T>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }
}
