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

//! Coloring for hierarchical `a/b/c` topic strings: one fixed destination color per
//! level in most modes, or a palette gradient per level under [ColorMode::Vivid].

use crate::{AnsiComposer, ColorMode, StyleRole};

pub const TOPIC_LEVEL_SEPARATOR: char = '/';

/// The rainbow gradient palette, ordered for a smooth walk around the ANSI 256 color
/// cube. More info: <https://github.com/topics/256-colors>.
#[rustfmt::skip]
pub static RAINBOW_COLOR_TABLE: [u8; 26] = [
    // Greens into cyan.
    82, 83, 84, 85, 86, 87,
    // Blues.
    81, 75, 69, 63,
    // Purples into magenta.
    93, 129, 165, 201,
    // Pinks into red.
    200, 199, 198, 197,
    // Oranges into yellow.
    203, 209, 215, 221, 227,
    // Back around to green.
    191, 155, 119,
];

/// Where level 0 starts in [RAINBOW_COLOR_TABLE].
pub const RAINBOW_START_INDEX: usize = 5;

const RAINBOW_STEP_MIN: f64 = 1.0;
const RAINBOW_STEP_MAX: f64 = 3.0;

/// How far apart successive levels sit in the palette. Dividing by the historical
/// maximum depth spreads shallow topic trees across more of the palette; the clamp
/// keeps neighboring levels distinguishable without wrapping too fast.
#[must_use]
pub fn rainbow_step(max_depth: usize) -> f64 {
    (RAINBOW_COLOR_TABLE.len() as f64 / max_depth.max(1) as f64)
        .clamp(RAINBOW_STEP_MIN, RAINBOW_STEP_MAX)
}

/// Palette index for a 0-based level index at the given step, wrapping around the
/// table.
#[must_use]
pub fn rainbow_palette_index(level_index: usize, step: f64) -> usize {
    (RAINBOW_START_INDEX + (step * level_index as f64) as usize)
        % RAINBOW_COLOR_TABLE.len()
}

mod sizing {
    use smallvec::SmallVec;

    /// Most topics have fewer levels than this; deeper ones spill to the heap.
    pub const MAX_INLINE_TOPIC_LEVELS: usize = 16;
    pub type InlineVecLevels<'a> = SmallVec<[&'a str; MAX_INLINE_TOPIC_LEVELS]>;
}

pub mod colorize_topic_impl {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    impl AnsiComposer {
        /// Append a colorized topic string. Levels are split on
        /// [TOPIC_LEVEL_SEPARATOR]; adjacent and trailing separators produce empty
        /// levels, which are preserved so the plain text always reconstructs the
        /// input. An empty topic has zero levels and appends nothing.
        ///
        /// Under [ColorMode::Vivid] each level gets its own gradient color; every
        /// other mode renders all levels in the `Destination` role.
        #[must_use]
        pub fn colorize_topic(self, arg_topic: impl AsRef<str>) -> AnsiComposer {
            let topic = arg_topic.as_ref();
            if topic.is_empty() {
                return self;
            }
            if self.config().mode() == ColorMode::Vivid {
                self.colorize_topic_rainbow(topic)
            } else {
                self.colorize_topic_plain(topic)
            }
        }

        fn colorize_topic_plain(mut self, topic: &str) -> AnsiComposer {
            let levels: sizing::InlineVecLevels<'_> =
                topic.split(TOPIC_LEVEL_SEPARATOR).collect();
            for (index, level) in levels.iter().enumerate() {
                self = self.fg(StyleRole::Destination).text(*level);
                if index < levels.len() - 1 {
                    self = self
                        .fg(StyleRole::TopicSeparator)
                        .push(TOPIC_LEVEL_SEPARATOR);
                }
            }
            self
        }

        /// The topic's own depth is recorded first, so it participates in the step
        /// for this very call. Levels get a direct color assignment and are appended
        /// raw; they do not go through role resolution and do not disturb the
        /// current role. Each separator is followed by a reset since the next level
        /// asserts its own color anyway.
        fn colorize_topic_rainbow(mut self, topic: &str) -> AnsiComposer {
            let levels: sizing::InlineVecLevels<'_> =
                topic.split(TOPIC_LEVEL_SEPARATOR).collect();
            self.config().depth_tracker().record_depth(levels.len());
            let step = rainbow_step(self.config().depth_tracker().current_max());
            for (index, level) in levels.iter().enumerate() {
                let color = RAINBOW_COLOR_TABLE[rainbow_palette_index(index, step)];
                self = self.fg_ansi256(color).raw(*level);
                if index < levels.len() - 1 {
                    self = self
                        .fg(StyleRole::TopicSeparator)
                        .push(TOPIC_LEVEL_SEPARATOR)
                        .reset();
                }
            }
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::StyleConfig;

    fn composer(mode: ColorMode) -> AnsiComposer {
        AnsiComposer::new(StyleConfig::new(mode))
    }

    #[test]
    fn plain_topic_standard_mode_exact_bytes() {
        let out = composer(ColorMode::Standard)
            .colorize_topic("a/b/c")
            .into_string();
        assert_eq!(
            out,
            "\x1b[38;5;43ma\
             \x1b[2m\x1b[38;5;245m/\
             \x1b[38;5;43mb\
             \x1b[2m\x1b[38;5;245m/\
             \x1b[38;5;43mc"
        );
    }

    #[test]
    fn single_level_topic_has_no_separator() {
        let out = composer(ColorMode::Standard)
            .colorize_topic("solo")
            .into_string();
        assert_eq!(out, "\x1b[38;5;43msolo");
    }

    #[test]
    fn empty_topic_appends_nothing() {
        for mode in [ColorMode::Off, ColorMode::Standard, ColorMode::Vivid] {
            assert_eq!(composer(mode).colorize_topic("").into_string(), "");
        }
    }

    #[test_case("a/b/c")]
    #[test_case("apps/editor/buffer")]
    #[test_case("x")]
    #[test_case("/a//b/")]
    #[test_case("a/")]
    fn colorized_topics_round_trip_after_stripping_escapes(topic: &str) {
        for mode in [
            ColorMode::Off,
            ColorMode::Minimal,
            ColorMode::Standard,
            ColorMode::Vivid,
            ColorMode::Light,
        ] {
            let out = composer(mode).colorize_topic(topic).into_string();
            assert_eq!(
                strip_ansi_escapes::strip_str(&out),
                topic,
                "mode: {mode}, topic: {topic}"
            );
        }
    }

    #[test]
    fn off_mode_topic_is_the_plain_text() {
        let out = composer(ColorMode::Off)
            .colorize_topic("a/b/c")
            .into_string();
        assert_eq!(out, "a/b/c");
    }

    #[test]
    fn rainbow_step_scales_with_the_maximum_depth() {
        assert_eq!(rainbow_step(0), 3.0);
        assert_eq!(rainbow_step(1), 3.0);
        assert_eq!(rainbow_step(13), 2.0);
        assert_eq!(rainbow_step(26), 1.0);
        assert_eq!(rainbow_step(100), 1.0);
    }

    #[test]
    fn rainbow_palette_index_steps_and_wraps() {
        assert_eq!(rainbow_palette_index(0, 3.0), 5);
        assert_eq!(rainbow_palette_index(1, 3.0), 8);
        assert_eq!(rainbow_palette_index(2, 3.0), 11);
        // 5 + 3 * 8 = 29 wraps around the 26-entry table.
        assert_eq!(rainbow_palette_index(8, 3.0), 3);
        // The fractional part of the offset is truncated.
        assert_eq!(rainbow_palette_index(3, 2.888), 13);
    }

    #[test]
    fn rainbow_first_call_exact_bytes() {
        let out = composer(ColorMode::Vivid)
            .colorize_topic("a/b/c")
            .into_string();
        assert_eq!(
            out,
            "\x1b[38;5;87ma\
             \x1b[2m\x1b[38;5;247m/\x1b[0m\
             \x1b[38;5;69mb\
             \x1b[2m\x1b[38;5;247m/\x1b[0m\
             \x1b[38;5;129mc"
        );
    }

    #[test]
    fn rainbow_records_depth_before_computing_the_step() {
        let config = StyleConfig::new(ColorMode::Vivid);
        let _ = AnsiComposer::new(config.clone())
            .colorize_topic("a/b/c/d/e/f/g/h/i/j/k/l/m")
            .into_string();
        assert_eq!(config.depth_tracker().current_max(), 13);
    }

    #[test]
    fn a_deep_topic_coarsens_the_gradient_for_later_calls() {
        let config = StyleConfig::new(ColorMode::Vivid);
        config.depth_tracker().record_depth(26);
        let out = AnsiComposer::new(config)
            .colorize_topic("a/b/c")
            .into_string();
        // Step 1: palette indices 5, 6, 7.
        assert_eq!(
            out,
            "\x1b[38;5;87ma\
             \x1b[2m\x1b[38;5;247m/\x1b[0m\
             \x1b[38;5;81mb\
             \x1b[2m\x1b[38;5;247m/\x1b[0m\
             \x1b[38;5;75mc"
        );
    }

    #[test]
    fn identical_history_and_topic_produce_identical_output() {
        let config = StyleConfig::new(ColorMode::Vivid);
        let first = AnsiComposer::new(config.clone())
            .colorize_topic("a/b/c")
            .into_string();
        let second = AnsiComposer::new(config)
            .colorize_topic("a/b/c")
            .into_string();
        assert_eq!(first, second);
    }

    #[test]
    fn the_gradient_never_resets_to_finer_steps() {
        let config = StyleConfig::new(ColorMode::Vivid);
        config.depth_tracker().record_depth(26);
        let shallow = AnsiComposer::new(config.clone())
            .colorize_topic("a")
            .into_string();
        // Even a depth-1 topic still sees step 1, not step 3.
        assert_eq!(shallow, "\x1b[38;5;87ma");
        assert_eq!(config.depth_tracker().current_max(), 26);
    }

    #[test]
    fn rainbow_is_reserved_for_vivid_mode() {
        let out = composer(ColorMode::Standard)
            .colorize_topic("a/b/c")
            .into_string();
        assert!(out.contains("\x1b[38;5;43m"));
        assert!(!out.contains("\x1b[38;5;87m"));
    }

    #[test]
    fn topic_coloring_composes_with_other_content() {
        let out = composer(ColorMode::Standard)
            .text("Destination: ")
            .colorize_topic("a/b")
            .reset()
            .text(" done")
            .into_string();
        assert_eq!(
            out,
            "Destination: \
             \x1b[38;5;43ma\
             \x1b[2m\x1b[38;5;245m/\
             \x1b[38;5;43mb\
             \x1b[0m done"
        );
    }
}
