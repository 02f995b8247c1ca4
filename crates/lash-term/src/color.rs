// SPDX-License-Identifier: MIT
//
// Palette colors.
//
// lash paints with the 256-color palette only. A color is either a palette
// index or the terminal's own default, and the default is its own variant
// so it can never be confused with index 0 (black). Painting with the
// default color emits no escape at all.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// A 256-color palette entry, or the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Inherit whatever the terminal is already using.
    #[default]
    Default,
    /// A palette index, 0–255.
    Indexed(u8),
}

impl Color {
    pub const DEFAULT: Self = Self::Default;
    pub const BLACK: Self = Self::Indexed(0);
    pub const RED: Self = Self::Indexed(1);
    pub const GREEN: Self = Self::Indexed(2);
    pub const YELLOW: Self = Self::Indexed(3);
    pub const BLUE: Self = Self::Indexed(4);
    pub const MAGENTA: Self = Self::Indexed(5);
    pub const CYAN: Self = Self::Indexed(6);
    pub const WHITE: Self = Self::Indexed(7);

    /// Names accepted by [`FromStr`], paired with their colors.
    const NAMED: [(&'static str, Self); 9] = [
        ("default", Self::DEFAULT),
        ("black", Self::BLACK),
        ("red", Self::RED),
        ("green", Self::GREEN),
        ("yellow", Self::YELLOW),
        ("blue", Self::BLUE),
        ("magenta", Self::MAGENTA),
        ("cyan", Self::CYAN),
        ("white", Self::WHITE),
    ];

    /// A palette color. Never the default.
    #[inline]
    #[must_use]
    pub const fn indexed(idx: u8) -> Self {
        Self::Indexed(idx)
    }

    /// Whether this is the terminal default.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// The palette index, or `None` for the default.
    #[inline]
    #[must_use]
    pub const fn index(self) -> Option<u8> {
        match self {
            Self::Indexed(idx) => Some(idx),
            Self::Default => None,
        }
    }
}

/// `-1` is the default sentinel; `0..=255` are palette entries.
impl TryFrom<i64> for Color {
    type Error = ColorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == -1 {
            return Ok(Self::Default);
        }
        u8::try_from(value)
            .map(Self::Indexed)
            .map_err(|_| ColorError::OutOfRange(value))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parse a color name (case-insensitive) or a decimal palette index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(&(_, color)) = Self::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
        {
            return Ok(color);
        }
        match s.parse::<i64>() {
            Ok(n) => Self::try_from(n),
            Err(_) => Err(ColorError::Unknown(s.to_owned())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(&(name, _)) = Self::NAMED.iter().find(|(_, c)| c == self) {
            return f.write_str(name);
        }
        match self {
            Self::Indexed(idx) => write!(f, "{idx}"),
            Self::Default => f.write_str("default"),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_default() {
        assert!(Color::DEFAULT.is_default());
        assert!(Color::default().is_default());
    }

    #[test]
    fn every_palette_index_is_not_default() {
        for idx in 0..=u8::MAX {
            assert!(!Color::indexed(idx).is_default(), "index {idx}");
        }
    }

    #[test]
    fn default_is_distinct_from_black() {
        assert_ne!(Color::DEFAULT, Color::BLACK);
        assert_eq!(Color::DEFAULT.index(), None);
        assert_eq!(Color::BLACK.index(), Some(0));
    }

    #[test]
    fn named_constants_follow_palette_order() {
        let named = [
            Color::BLACK,
            Color::RED,
            Color::GREEN,
            Color::YELLOW,
            Color::BLUE,
            Color::MAGENTA,
            Color::CYAN,
            Color::WHITE,
        ];
        for (i, c) in named.iter().enumerate() {
            assert_eq!(c.index(), Some(u8::try_from(i).unwrap()));
        }
    }

    // ── Conversions ─────────────────────────────────────────────────────

    #[test]
    fn try_from_sentinel() {
        assert_eq!(Color::try_from(-1_i64), Ok(Color::DEFAULT));
    }

    #[test]
    fn try_from_non_negative_is_never_default() {
        for n in 0..=255_i64 {
            let c = Color::try_from(n).unwrap();
            assert!(!c.is_default());
        }
    }

    #[test]
    fn try_from_out_of_range() {
        assert_eq!(Color::try_from(256_i64), Err(ColorError::OutOfRange(256)));
        assert_eq!(Color::try_from(-2_i64), Err(ColorError::OutOfRange(-2)));
    }

    #[test]
    fn parse_names() {
        assert_eq!("red".parse::<Color>(), Ok(Color::RED));
        assert_eq!("Black".parse::<Color>(), Ok(Color::BLACK));
        assert_eq!(" DEFAULT ".parse::<Color>(), Ok(Color::DEFAULT));
    }

    #[test]
    fn parse_numbers() {
        assert_eq!("196".parse::<Color>(), Ok(Color::indexed(196)));
        assert_eq!("-1".parse::<Color>(), Ok(Color::DEFAULT));
        assert_eq!("300".parse::<Color>(), Err(ColorError::OutOfRange(300)));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "chartreuse".parse::<Color>(),
            Err(ColorError::Unknown("chartreuse".into()))
        );
    }

    #[test]
    fn display_round_trips_names() {
        assert_eq!(Color::MAGENTA.to_string(), "magenta");
        assert_eq!(Color::indexed(42).to_string(), "42");
        assert_eq!(Color::DEFAULT.to_string(), "default");
    }
}
