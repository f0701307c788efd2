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

use std::{fmt::{Debug, Formatter, Result, Write},
          sync::Arc};

use crate::{ColorMode,
            PaletteResolver,
            RoleStyle,
            SgrCode,
            StyleRole,
            TopicDepthTracker};

/// Everything a [crate::AnsiComposer] needs to make styling decisions: the
/// [ColorMode], the [PaletteResolver] that mode selects, and a shared
/// [TopicDepthTracker] handle.
///
/// This value is threaded into every composer explicitly, there is no process-wide
/// singleton. Clone it freely: that copies the mode, shares the palette (a `&'static`
/// implementation), and bumps the tracker's `Arc`, so all composers built from clones
/// of one config observe the same depth history.
#[derive(Clone)]
pub struct StyleConfig {
    mode: ColorMode,
    palette: &'static dyn PaletteResolver,
    depth_tracker: Arc<TopicDepthTracker>,
}

impl Default for StyleConfig {
    fn default() -> Self { StyleConfig::new(ColorMode::default()) }
}

impl Debug for StyleConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StyleConfig: [mode: {}, max_depth: {}]",
            self.mode,
            self.depth_tracker.current_max()
        )
    }
}

pub mod style_config_impl {
    use super::*;

    impl StyleConfig {
        /// Build a config for the given mode, with a fresh depth tracker. The palette
        /// implementation is selected here, once; changing modes means building a new
        /// config.
        #[must_use]
        pub fn new(mode: ColorMode) -> StyleConfig {
            StyleConfig::with_depth_tracker(mode, Arc::new(TopicDepthTracker::new()))
        }

        /// Like [StyleConfig::new], but sharing an existing depth tracker. Use this
        /// when configs are rebuilt during the life of a process and the rainbow
        /// gradient must keep its accumulated depth history.
        #[must_use]
        pub fn with_depth_tracker(
            mode: ColorMode,
            depth_tracker: Arc<TopicDepthTracker>,
        ) -> StyleConfig {
            StyleConfig {
                mode,
                palette: mode.palette(),
                depth_tracker,
            }
        }

        /// Build a config from the [crate::COLOR_MODE_ENV_VAR] environment override,
        /// falling back to [ColorMode::Standard].
        #[must_use]
        pub fn from_env() -> StyleConfig { StyleConfig::new(ColorMode::from_env()) }

        #[must_use]
        pub fn mode(&self) -> ColorMode { self.mode }

        #[must_use]
        pub fn depth_tracker(&self) -> &TopicDepthTracker { &self.depth_tracker }

        /// Resolve a role through the palette this config selected at construction.
        #[must_use]
        pub fn resolve(&self, role: StyleRole) -> RoleStyle {
            self.palette.resolve(role)
        }

        pub(crate) fn is_on(&self) -> bool { self.mode.emits_escapes() }

        /// The byte sequence a full style reset emits under this config: the reset
        /// itself, then the `Default` role's foreground if the palette gives it a
        /// concrete color (so "reset" never strands subsequent default text without
        /// its configured color). Empty when the mode is [ColorMode::Off].
        pub(crate) fn reset_sequence(&self) -> String {
            let mut seq = String::new();
            if self.is_on() {
                let _ = write!(seq, "{}", SgrCode::Reset);
                if let Some(index) = self.resolve(StyleRole::Default).color {
                    let _ = write!(seq, "{}", SgrCode::ForegroundAnsi256(index));
                }
            }
            seq
        }
    }
}
