//! The startup splash.
//!
//! A pre-authored block of text, at most [`SPLASH_WIDTH`] × [`SPLASH_HEIGHT`]
//! cells, read once at startup and drawn centered on the terminal. The asset
//! may carry its own color escapes; they don't count toward its width.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use lash_term::{Size, Surface};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::error::{SplashDefect, ViewError};

/// Width of the splash block in cells.
pub const SPLASH_WIDTH: u16 = 49;
/// Height of the splash block in rows.
pub const SPLASH_HEIGHT: u16 = 12;

/// Top-left cell (0-based `(col, row)`) that centers the splash block.
///
/// Terminals smaller than the block pin it to the origin.
#[must_use]
pub const fn splash_origin(size: Size) -> (u16, u16) {
    (
        size.cols.saturating_sub(SPLASH_WIDTH) / 2,
        size.rows.saturating_sub(SPLASH_HEIGHT) / 2,
    )
}

/// A validated splash asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splash {
    lines: Vec<String>,
}

impl Splash {
    /// Read and validate a splash file.
    ///
    /// # Errors
    ///
    /// - [`ViewError::SplashMissing`] if the file doesn't exist.
    /// - [`ViewError::SplashUnreadable`] for any other I/O failure.
    /// - [`ViewError::SplashMalformed`] if the contents don't fit the block.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ViewError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ViewError::SplashMissing {
                    path: path.to_owned(),
                    source,
                }
            } else {
                ViewError::SplashUnreadable {
                    path: path.to_owned(),
                    source,
                }
            }
        })?;

        let malformed = |defect| ViewError::SplashMalformed {
            path: path.to_owned(),
            defect,
        };
        let text = String::from_utf8(bytes).map_err(|_| malformed(SplashDefect::NotUtf8))?;
        let splash = Self::parse(&text).map_err(malformed)?;
        debug!(path = %path.display(), lines = splash.lines.len(), "splash loaded");
        Ok(splash)
    }

    /// Validate splash text.
    ///
    /// # Errors
    ///
    /// Returns the [`SplashDefect`] if the text is empty, has more than
    /// [`SPLASH_HEIGHT`] lines, or a line wider than [`SPLASH_WIDTH`].
    pub fn parse(text: &str) -> Result<Self, SplashDefect> {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();

        if lines.iter().all(|l| l.trim().is_empty()) {
            return Err(SplashDefect::Empty);
        }
        if lines.len() > usize::from(SPLASH_HEIGHT) {
            return Err(SplashDefect::TooTall {
                lines: lines.len(),
                max: SPLASH_HEIGHT,
            });
        }
        if let Some((i, width)) = lines
            .iter()
            .map(|l| visible_width(l))
            .enumerate()
            .find(|&(_, w)| w > usize::from(SPLASH_WIDTH))
        {
            return Err(SplashDefect::TooWide {
                line: i + 1,
                width,
                max: SPLASH_WIDTH,
            });
        }

        Ok(Self { lines })
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Draw the splash centered on a terminal of `size`.
    ///
    /// # Errors
    ///
    /// Propagates write errors from the surface.
    pub fn draw<W: Write>(&self, surface: &mut Surface<W>, size: Size) -> io::Result<()> {
        let (col, row) = splash_origin(size);
        let col = u32::from(col) + 1;
        for (line, top) in self.lines.iter().zip(u32::from(row) + 1..) {
            surface.move_cursor(top, col)?;
            surface.write_text(line)?;
        }
        // The asset may leave its own colors switched on.
        surface.reset_attributes()
    }
}

/// Display width of a line, not counting escape sequences.
fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // CSI: ESC [ params final-byte. Anything else: ESC + one char.
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        width += c.width().unwrap_or(0);
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;

    fn block(cols: usize, rows: usize) -> String {
        let line = "x".repeat(cols);
        let mut text = String::new();
        for _ in 0..rows {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }

    #[test]
    fn origin_on_80_by_24() {
        assert_eq!(splash_origin(Size::new(80, 24)), (15, 6));
    }

    #[test]
    fn origin_on_small_terminal_is_pinned() {
        assert_eq!(splash_origin(Size::new(40, 10)), (0, 0));
    }

    #[test]
    fn origin_on_exact_fit() {
        assert_eq!(splash_origin(Size::new(49, 12)), (0, 0));
    }

    // ── parse ───────────────────────────────────────────────────────────

    #[test]
    fn parse_full_block() {
        let splash = Splash::parse(&block(49, 12)).unwrap();
        assert_eq!(splash.lines().len(), 12);
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Splash::parse(""), Err(SplashDefect::Empty));
        assert_eq!(Splash::parse("\n  \n"), Err(SplashDefect::Empty));
    }

    #[test]
    fn parse_rejects_too_tall() {
        assert_eq!(
            Splash::parse(&block(10, 13)),
            Err(SplashDefect::TooTall { lines: 13, max: 12 })
        );
    }

    #[test]
    fn parse_rejects_too_wide() {
        let text = format!("ok\n{}\n", "y".repeat(50));
        assert_eq!(
            Splash::parse(&text),
            Err(SplashDefect::TooWide { line: 2, width: 50, max: 49 })
        );
    }

    #[test]
    fn escapes_do_not_count_toward_width() {
        let line = format!("\x1b[38;5;196m{}\x1b[0m", "#".repeat(49));
        assert_eq!(visible_width(&line), 49);
        assert!(Splash::parse(&line).is_ok());
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(visible_width("日本"), 4);
    }

    #[test]
    fn crlf_lines() {
        let splash = Splash::parse("ab\r\ncd\r\n").unwrap();
        assert_eq!(splash.lines(), ["ab", "cd"]);
    }

    // ── load ────────────────────────────────────────────────────────────

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Splash::load(dir.path().join("ascii.color")).unwrap_err();
        assert!(matches!(err, ViewError::SplashMissing { .. }));
    }

    #[test]
    fn load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(block(49, 12).as_bytes()).unwrap();
        let splash = Splash::load(file.path()).unwrap();
        assert_eq!(splash.lines().len(), 12);
    }

    #[test]
    fn load_binary_file_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();
        let err = Splash::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ViewError::SplashMalformed { defect: SplashDefect::NotUtf8, .. }
        ));
    }

    // ── draw ────────────────────────────────────────────────────────────

    #[test]
    fn draw_centers_each_line() {
        let splash = Splash::parse("ab\ncd\n").unwrap();
        let mut surface = Surface::new(Vec::new());
        splash.draw(&mut surface, Size::new(80, 24)).unwrap();
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out, "\x1b[7;16Hab\x1b[8;16Hcd\x1b[0m");
    }
}
