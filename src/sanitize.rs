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

//! Per-character rewriting of appended text so that control characters, decode
//! failures, and (optionally) structural punctuation are rendered visibly and safely.
//! Nothing here mutates composer state; the current role is read-only context used to
//! restore the foreground after a styled substitution.

use std::fmt::Write;

use crate::{SgrCode, StyleConfig, StyleRole, palette::emit::write_role_fg};

/// Replaces NUL (0x00), always.
pub const NULL_GLYPH: char = '∅';

/// Replaces every other control character that is not passed through literally.
pub const CONTROL_GLYPH: char = '·';

/// Replaces U+FFFD, the marker a lossy decode leaves behind.
pub const DECODE_ERROR_GLYPH: char = '¿';

/// Foreground for [DECODE_ERROR_GLYPH], white, legible on the error background.
const DECODE_ERROR_FG: u8 = 231;

/// Flags for one append call.
///
/// - `compact`: also replace tab and line feed with [CONTROL_GLYPH] instead of passing
///   them through, for single-line rendering.
/// - `styled`: highlight bracket-like characters in the `Brace` role and de-emphasize
///   sentence punctuation that is followed by whitespace. Only takes effect when the
///   mode emits escapes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SanitizeOptions {
    pub compact: bool,
    pub styled: bool,
}

mod sizing {
    use smallstr::SmallString;

    /// Large enough to hold the longest substitution escape sequence inline.
    pub const MAX_SUBSTITUTION_SEQ_SIZE: usize = 64;
    pub type InlineSubstitutionSeq = SmallString<[u8; MAX_SUBSTITUTION_SEQ_SIZE]>;
}

pub mod sanitize_impl {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    /// Append `text` to `buf`, one character at a time, per the rules:
    ///
    /// 1. Control characters (below 0x20, plus DEL) become visible: NUL is always
    ///    [NULL_GLYPH]; tab and line feed stay literal unless `compact`; everything
    ///    else becomes [CONTROL_GLYPH] regardless of `compact`.
    /// 2. U+FFFD becomes a styled [DECODE_ERROR_GLYPH] marker. The marker is built
    ///    once per call and reused for every occurrence, since it is identical for
    ///    all of them.
    /// 3. With `styled` and an active mode, bracket-like characters are wrapped in
    ///    the `Brace` role, and `, ; . :` followed by whitespace (one character of
    ///    lookahead) are rendered through a style reset. Both restore the current
    ///    role's foreground afterwards.
    /// 4. Everything else passes through unchanged.
    pub(crate) fn sanitize_into(
        buf: &mut String,
        text: &str,
        options: SanitizeOptions,
        config: &StyleConfig,
        current_role: StyleRole,
    ) {
        let mut replacement: Option<sizing::InlineSubstitutionSeq> = None;
        let mut iter = text.chars().peekable();
        while let Some(c) = iter.next() {
            if is_control(c) {
                if options.compact || !matches!(c, '\t' | '\n') {
                    if c == '\0' {
                        // Make NUL stand out from the other control characters.
                        buf.push(NULL_GLYPH);
                    } else {
                        buf.push(CONTROL_GLYPH);
                    }
                } else {
                    // Tab and line feed stay literal when not compacting.
                    buf.push(c);
                }
            } else if c == char::REPLACEMENT_CHARACTER {
                let marker = replacement
                    .get_or_insert_with(|| decode_error_marker(config, current_role));
                buf.push_str(marker);
            } else if options.styled && config.is_on() {
                if is_mirrored(c) {
                    write_role_fg(buf, config.resolve(StyleRole::Brace));
                    buf.push(c);
                    write_role_fg(buf, config.resolve(current_role));
                } else if matches!(c, ',' | ';' | '.' | ':')
                    && iter.peek().is_some_and(|next| next.is_whitespace())
                {
                    buf.push_str(&config.reset_sequence());
                    buf.push(c);
                    write_role_fg(buf, config.resolve(current_role));
                } else {
                    buf.push(c);
                }
            } else {
                buf.push(c);
            }
        }
    }

    fn is_control(c: char) -> bool { (c as u32) < 0x20 || c == '\u{7f}' }

    /// Bracket-like mirrored pairs worth highlighting in structured payload text.
    fn is_mirrored(c: char) -> bool {
        matches!(
            c,
            '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>' | '«' | '»'
        )
    }

    /// The substitution for one decode-failure character: reset, error background,
    /// white [DECODE_ERROR_GLYPH], default background, then the current role's
    /// foreground color so the following characters stay correctly styled. Under an
    /// inactive mode this is the bare glyph.
    fn decode_error_marker(
        config: &StyleConfig,
        current_role: StyleRole,
    ) -> sizing::InlineSubstitutionSeq {
        let mut seq = sizing::InlineSubstitutionSeq::new();
        if config.is_on() {
            let _ = write!(seq, "{}", SgrCode::Reset);
            let bg = match config.resolve(StyleRole::Error).color {
                Some(index) => SgrCode::BackgroundAnsi256(index),
                None => SgrCode::BackgroundDefault,
            };
            let _ = write!(seq, "{bg}");
            let _ = write!(seq, "{}", SgrCode::ForegroundAnsi256(DECODE_ERROR_FG));
            seq.push(DECODE_ERROR_GLYPH);
            let _ = write!(seq, "{}", SgrCode::BackgroundDefault);
            let fg = match config.resolve(current_role).color {
                Some(index) => SgrCode::ForegroundAnsi256(index),
                None => SgrCode::ForegroundDefault,
            };
            let _ = write!(seq, "{fg}");
        } else {
            seq.push(DECODE_ERROR_GLYPH);
        }
        seq
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::{sanitize_impl::sanitize_into, *};
    use crate::ColorMode;

    fn sanitize(
        text: &str,
        options: SanitizeOptions,
        mode: ColorMode,
        current_role: StyleRole,
    ) -> String {
        let config = StyleConfig::new(mode);
        let mut buf = String::new();
        sanitize_into(&mut buf, text, options, &config, current_role);
        buf
    }

    fn plain(text: &str, mode: ColorMode) -> String {
        sanitize(text, SanitizeOptions::default(), mode, StyleRole::Default)
    }

    #[test]
    fn empty_input_produces_empty_output() {
        assert_eq!(plain("", ColorMode::Standard), "");
        assert_eq!(plain("", ColorMode::Off), "");
    }

    #[test_case(ColorMode::Off)]
    #[test_case(ColorMode::Minimal)]
    #[test_case(ColorMode::Standard)]
    #[test_case(ColorMode::Vivid)]
    #[test_case(ColorMode::Light)]
    fn nul_becomes_the_null_glyph_in_every_mode(mode: ColorMode) {
        assert_eq!(plain("ab\u{0}cd", mode), "ab∅cd");
    }

    #[test]
    fn tab_and_line_feed_stay_literal_without_compact() {
        assert_eq!(plain("line1\nline2", ColorMode::Standard), "line1\nline2");
        assert_eq!(plain("a\tb", ColorMode::Standard), "a\tb");
    }

    #[test]
    fn compact_replaces_tab_and_line_feed_with_dots() {
        let options = SanitizeOptions {
            compact: true,
            styled: false,
        };
        assert_eq!(
            sanitize(
                "line1\nline2",
                options,
                ColorMode::Standard,
                StyleRole::Default
            ),
            "line1·line2"
        );
        assert_eq!(
            sanitize("a\tb", options, ColorMode::Standard, StyleRole::Default),
            "a·b"
        );
    }

    #[test_case('\r'; "carriage return")]
    #[test_case('\u{1}'; "start of heading")]
    #[test_case('\u{1b}'; "escape byte itself")]
    #[test_case('\u{7f}'; "delete")]
    fn other_control_characters_are_always_dots(c: char) {
        let text = format!("a{c}b");
        assert_eq!(plain(&text, ColorMode::Standard), "a·b");
        let compact = SanitizeOptions {
            compact: true,
            styled: false,
        };
        assert_eq!(
            sanitize(&text, compact, ColorMode::Standard, StyleRole::Default),
            "a·b"
        );
    }

    #[test]
    fn all_control_input_yields_one_placeholder_per_character() {
        assert_eq!(plain("\u{0}\u{1}\u{2}", ColorMode::Standard), "∅··");
        assert_eq!(plain("\r\r\r", ColorMode::Off), "···");
    }

    #[test]
    fn decode_error_marker_is_bare_glyph_when_off() {
        let out = plain("ab\u{fffd}cd", ColorMode::Off);
        assert_eq!(out, "ab¿cd");
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn decode_error_marker_standard_mode_exact_bytes() {
        let out = plain("ab\u{fffd}cd", ColorMode::Standard);
        assert_eq!(
            out,
            "ab\x1b[0m\x1b[48;5;196m\x1b[38;5;231m¿\x1b[49m\x1b[39mcd"
        );
    }

    #[test]
    fn decode_error_marker_restores_the_current_role_color() {
        let out = sanitize(
            "x\u{fffd}y",
            SanitizeOptions::default(),
            ColorMode::Standard,
            StyleRole::Destination,
        );
        assert_eq!(
            out,
            "x\x1b[0m\x1b[48;5;196m\x1b[38;5;231m¿\x1b[49m\x1b[38;5;43my"
        );
    }

    #[test]
    fn decode_error_marker_is_reused_for_every_occurrence() {
        let out = plain("\u{fffd}\u{fffd}", ColorMode::Standard);
        let marker = "\x1b[0m\x1b[48;5;196m\x1b[38;5;231m¿\x1b[49m\x1b[39m";
        assert_eq!(out, format!("{marker}{marker}"));
    }

    #[test]
    fn exactly_one_marker_glyph_per_replacement_character() {
        let out = plain("ab\u{fffd}cd", ColorMode::Vivid);
        assert_eq!(out.chars().filter(|c| *c == DECODE_ERROR_GLYPH).count(), 1);
        assert_eq!(strip_ansi_escapes::strip_str(&out), "ab¿cd");
    }

    #[test]
    fn styled_wraps_brackets_in_the_brace_role() {
        let options = SanitizeOptions {
            compact: false,
            styled: true,
        };
        let out = sanitize("(a)", options, ColorMode::Standard, StyleRole::Destination);
        assert_eq!(
            out,
            "\x1b[38;5;108m(\x1b[38;5;43ma\x1b[38;5;108m)\x1b[38;5;43m"
        );
    }

    #[test]
    fn brace_highlighting_is_limited_to_the_fixed_bracket_set() {
        let options = SanitizeOptions {
            compact: false,
            styled: true,
        };
        let inside = sanitize("«a»", options, ColorMode::Standard, StyleRole::Destination);
        assert_eq!(
            inside,
            "\x1b[38;5;108m«\x1b[38;5;43ma\x1b[38;5;108m»\x1b[38;5;43m"
        );
        let outside = sanitize("⟨a⟩", options, ColorMode::Standard, StyleRole::Destination);
        assert_eq!(outside, "⟨a⟩");
    }

    #[test]
    fn styled_resets_punctuation_followed_by_whitespace() {
        let options = SanitizeOptions {
            compact: false,
            styled: true,
        };
        let out = sanitize("a, b", options, ColorMode::Standard, StyleRole::Destination);
        assert_eq!(out, "a\x1b[0m,\x1b[38;5;43m b");
    }

    #[test]
    fn styled_punctuation_reset_reasserts_default_color_in_light_mode() {
        let options = SanitizeOptions {
            compact: false,
            styled: true,
        };
        let out = sanitize("a. b", options, ColorMode::Light, StyleRole::Destination);
        assert_eq!(out, "a\x1b[0m\x1b[38;5;236m.\x1b[38;5;30m b");
    }

    #[test]
    fn punctuation_without_following_whitespace_is_untouched() {
        let options = SanitizeOptions {
            compact: false,
            styled: true,
        };
        assert_eq!(
            sanitize("a,b", options, ColorMode::Standard, StyleRole::Default),
            "a,b"
        );
        assert_eq!(
            sanitize("ab.", options, ColorMode::Standard, StyleRole::Default),
            "ab."
        );
    }

    #[test]
    fn styled_is_inert_when_the_mode_is_off() {
        let options = SanitizeOptions {
            compact: false,
            styled: true,
        };
        let out = sanitize("(a, b)", options, ColorMode::Off, StyleRole::Default);
        assert_eq!(out, "(a, b)");
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn sanitizing_in_two_calls_equals_one_call_on_the_concatenation() {
        let config = StyleConfig::new(ColorMode::Standard);
        let options = SanitizeOptions::default();
        let mut split = String::new();
        sanitize_into(&mut split, "ab\u{0}", options, &config, StyleRole::Default);
        sanitize_into(&mut split, "cd\r", options, &config, StyleRole::Default);
        let mut whole = String::new();
        sanitize_into(
            &mut whole,
            "ab\u{0}cd\r",
            options,
            &config,
            StyleRole::Default,
        );
        assert_eq!(split, whole);
    }
}
