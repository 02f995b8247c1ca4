// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no flushing; that's the `Surface`'s job. This module just knows the
// byte-level encoding of the handful of terminal commands lash needs.
//
// Cursor positions here are already 1-based: callers convert from region
// coordinates before they get this far. Values are passed through as-is;
// what the terminal does with an out-of-range position is its business.
//
// Colors always use the 256-color extended form (`38;5;N` / `48;5;N`), even
// for the first 16 palette entries. `Color::Default` writes nothing at all:
// "default" means whatever the terminal already has, not SGR 39/49.

use std::io::{self, Write};

use crate::color::Color;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor using the CUP (Cursor Position) sequence.
///
/// Both `row` and `col` are 1-based terminal coordinates.
#[inline]
pub fn cursor_to(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    write!(w, "\x1b[{row};{col}H")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set the foreground (text) color. Writes nothing for [`Color::Default`].
pub fn fg(w: &mut impl Write, color: Color) -> io::Result<()> {
    match color.index() {
        Some(idx) => write!(w, "\x1b[38;5;{idx}m"),
        None => Ok(()),
    }
}

/// Set the background color. Writes nothing for [`Color::Default`].
pub fn bg(w: &mut impl Write, color: Color) -> io::Result<()> {
    match color.index() {
        Some(idx) => write!(w, "\x1b[48;5;{idx}m"),
        None => Ok(()),
    }
}

// ─── Alternate Screen ───────────────────────────────────────────────────────

/// Enter the alternate screen buffer (DEC Private Mode 1049).
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer and restore original content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
