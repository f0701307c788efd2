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

use std::env;

use strum_macros::{Display, EnumCount, EnumString};

/// The environment variable that selects the initial [ColorMode]. Accepted values are
/// the variant names, ASCII case-insensitive: `off`, `minimal`, `standard`, `vivid`,
/// `light`.
pub const COLOR_MODE_ENV_VAR: &str = "R3BL_STYLER_COLORS";

/// How aggressively styled output is rendered. This is decided once, when a
/// [crate::StyleConfig] is built, and stays fixed for every composer that shares that
/// config.
///
/// [ColorMode::Off] does not just mute colors, it guarantees that no escape bytes are
/// emitted at all. Content operations still run, so control characters are still made
/// visible as placeholder glyphs.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Display, EnumCount, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ColorMode {
    Off,
    Minimal,
    #[default]
    Standard,
    Vivid,
    Light,
}

pub mod color_mode_impl {
    use super::*;

    impl ColorMode {
        /// Read the mode from [COLOR_MODE_ENV_VAR]. An absent variable yields the
        /// default. An unrecognized value also yields the default, silently as far as
        /// the caller is concerned; the rejected value is only visible as a debug
        /// event.
        #[must_use]
        pub fn from_env() -> ColorMode {
            match env::var(COLOR_MODE_ENV_VAR) {
                Ok(value) => match value.parse::<ColorMode>() {
                    Ok(mode) => mode,
                    Err(_) => {
                        // % is Display, ? is Debug.
                        tracing::debug!(
                            message = "ignoring unrecognized color mode override",
                            value = %value
                        );
                        ColorMode::default()
                    }
                },
                Err(_) => ColorMode::default(),
            }
        }

        /// `true` for every mode except [ColorMode::Off].
        #[must_use]
        pub fn emits_escapes(&self) -> bool { !matches!(self, ColorMode::Off) }
    }
}
