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

//! Semantic style roles and their per-mode resolution to concrete ANSI 256 colors.
//! Color values come from <https://www.ditig.com/256-colors-cheat-sheet>.

use strum_macros::{Display, EnumCount};

use crate::{ColorMode, SgrCode};

/// A semantic styling category, independent of any concrete color value. Roles are
/// stable identities; what they look like is decided by the [PaletteResolver] that the
/// active [ColorMode] selects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumCount)]
pub enum StyleRole {
    Default,
    Destination,
    TopicSeparator,
    Error,
    NullMarker,
    Brace,
}

/// What a [StyleRole] resolves to: an ANSI 256 foreground color, or `None` for the
/// terminal default foreground, plus at most one intensity attribute. When both flags
/// are set, dim wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleStyle {
    pub color: Option<u8>,
    pub dim: bool,
    pub italic: bool,
}

pub mod role_style_impl {
    use super::*;

    impl RoleStyle {
        #[must_use]
        pub const fn new() -> RoleStyle {
            RoleStyle {
                color: None,
                dim: false,
                italic: false,
            }
        }

        #[must_use]
        pub const fn color(index: u8) -> RoleStyle {
            RoleStyle {
                color: Some(index),
                dim: false,
                italic: false,
            }
        }

        #[must_use]
        pub const fn dim(mut self) -> RoleStyle {
            self.dim = true;
            self
        }

        #[must_use]
        pub const fn italic(mut self) -> RoleStyle {
            self.italic = true;
            self
        }
    }
}

/// Capability consumed by the composer: map a role to its [RoleStyle]. One
/// implementation exists per [ColorMode] and is selected once, when a
/// [crate::StyleConfig] is built.
pub trait PaletteResolver: Send + Sync {
    fn resolve(&self, role: StyleRole) -> RoleStyle;
}

/// Resolves every role to the terminal default with no attributes, so nothing styled
/// can leak out even if an emission gate is bypassed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffPalette;

/// A sparse palette: only destination and error text get a color of their own.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MinimalPalette;

/// The everyday palette, tuned for dark terminal backgrounds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StandardPalette;

/// Brighter variant of [StandardPalette]. This is also the only mode in which topics
/// are colorized with the rainbow gradient.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VividPalette;

/// Darker colors for light terminal backgrounds. The only palette that gives the
/// `Default` role a concrete color, so plain text stays legible on white.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LightPalette;

pub mod palette_resolver_impl {
    use super::*;

    impl PaletteResolver for OffPalette {
        fn resolve(&self, _role: StyleRole) -> RoleStyle { RoleStyle::new() }
    }

    impl PaletteResolver for MinimalPalette {
        #[rustfmt::skip]
        fn resolve(&self, role: StyleRole) -> RoleStyle {
            match role {
                StyleRole::Default        => RoleStyle::new(),
                StyleRole::Destination    => RoleStyle::color(36),
                StyleRole::TopicSeparator => RoleStyle::new().dim(),
                StyleRole::Error          => RoleStyle::color(160),
                StyleRole::NullMarker     => RoleStyle::new().italic(),
                StyleRole::Brace          => RoleStyle::new(),
            }
        }
    }

    impl PaletteResolver for StandardPalette {
        #[rustfmt::skip]
        fn resolve(&self, role: StyleRole) -> RoleStyle {
            match role {
                StyleRole::Default        => RoleStyle::new(),
                StyleRole::Destination    => RoleStyle::color(43),
                StyleRole::TopicSeparator => RoleStyle::color(245).dim(),
                StyleRole::Error          => RoleStyle::color(196),
                StyleRole::NullMarker     => RoleStyle::color(99).italic(),
                StyleRole::Brace          => RoleStyle::color(108),
            }
        }
    }

    impl PaletteResolver for VividPalette {
        #[rustfmt::skip]
        fn resolve(&self, role: StyleRole) -> RoleStyle {
            match role {
                StyleRole::Default        => RoleStyle::new(),
                StyleRole::Destination    => RoleStyle::color(49),
                StyleRole::TopicSeparator => RoleStyle::color(247).dim(),
                StyleRole::Error          => RoleStyle::color(196),
                StyleRole::NullMarker     => RoleStyle::color(135).italic(),
                StyleRole::Brace          => RoleStyle::color(158),
            }
        }
    }

    impl PaletteResolver for LightPalette {
        #[rustfmt::skip]
        fn resolve(&self, role: StyleRole) -> RoleStyle {
            match role {
                StyleRole::Default        => RoleStyle::color(236),
                StyleRole::Destination    => RoleStyle::color(30),
                StyleRole::TopicSeparator => RoleStyle::color(240).dim(),
                StyleRole::Error          => RoleStyle::color(124),
                StyleRole::NullMarker     => RoleStyle::color(55).italic(),
                StyleRole::Brace          => RoleStyle::color(22),
            }
        }
    }
}

pub mod mode_to_palette {
    use super::*;

    static OFF_PALETTE: OffPalette = OffPalette;
    static MINIMAL_PALETTE: MinimalPalette = MinimalPalette;
    static STANDARD_PALETTE: StandardPalette = StandardPalette;
    static VIVID_PALETTE: VividPalette = VividPalette;
    static LIGHT_PALETTE: LightPalette = LightPalette;

    impl ColorMode {
        /// Select the [PaletteResolver] implementation for this mode.
        #[must_use]
        #[rustfmt::skip]
        pub fn palette(&self) -> &'static dyn PaletteResolver {
            match self {
                ColorMode::Off      => &OFF_PALETTE,
                ColorMode::Minimal  => &MINIMAL_PALETTE,
                ColorMode::Standard => &STANDARD_PALETTE,
                ColorMode::Vivid    => &VIVID_PALETTE,
                ColorMode::Light    => &LIGHT_PALETTE,
            }
        }
    }
}

pub mod emit {
    use std::fmt::Write;

    use super::*;

    /// Write the escape sequence that makes `role_style` the active foreground: the
    /// intensity attribute first (dim wins over italic), then the color, where `None`
    /// means the terminal default foreground.
    pub(crate) fn write_role_fg(buf: &mut String, role_style: RoleStyle) {
        if role_style.dim {
            let _ = write!(buf, "{}", SgrCode::Dim);
        } else if role_style.italic {
            let _ = write!(buf, "{}", SgrCode::Italic);
        }
        let code = match role_style.color {
            Some(index) => SgrCode::ForegroundAnsi256(index),
            None => SgrCode::ForegroundDefault,
        };
        let _ = write!(buf, "{code}");
    }
}
