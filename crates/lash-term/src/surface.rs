// SPDX-License-Identifier: MIT
//
// The drawing surface: escape sequences out, one flush per operation.
//
// Safety: the panic hook writes straight to fd 1 with `libc::write`. That is
// the only unsafe code here, and it exists so a panic in the middle of a
// paint (while the stdout lock is held) can't deadlock the restore.
#![allow(unsafe_code)]
//
// There is no frame buffer in lash. Every operation writes its escape and
// flushes before returning, so each sequence reaches the terminal in the
// order it was issued and the next cursor move lands where it should.
//
// Terminal modes (alternate screen, hidden cursor) are process-wide state
// that must be put back no matter how we leave. `Surface::enter` hands out a
// `Screen` guard for that: it switches modes on creation and switches them
// back on drop, so an early `?` return restores the terminal just like a
// normal exit does. A panic takes the hook path instead.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::sync::Once;

use tracing::trace;

use crate::ansi;
use crate::color::Color;

// ─── Surface ────────────────────────────────────────────────────────────────

/// An unbuffered ANSI drawing surface over any writer.
///
/// ```
/// use lash_term::color::Color;
/// use lash_term::surface::Surface;
///
/// let mut surface = Surface::new(Vec::new());
/// surface.move_cursor(1, 1)?;
/// surface.set_background(Color::RED)?;
/// surface.write_text("*")?;
/// assert_eq!(surface.get_ref().as_slice(), b"\x1b[1;1H\x1b[48;5;1m*");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Surface<W: Write> {
    out: W,
}

impl<W: Write> Surface<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the surface, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one sequence (or run of text) and flush it.
    fn emit<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        f(&mut self.out)?;
        self.out.flush()
    }

    /// Move the cursor. `row` and `col` are 1-based and passed through unchecked.
    ///
    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn move_cursor(&mut self, row: u32, col: u32) -> io::Result<()> {
        self.emit(|w| ansi::cursor_to(w, row, col))
    }

    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn enter_alternate_screen(&mut self) -> io::Result<()> {
        self.emit(|w| ansi::enter_alt_screen(w))
    }

    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn leave_alternate_screen(&mut self) -> io::Result<()> {
        self.emit(|w| ansi::exit_alt_screen(w))
    }

    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.emit(|w| ansi::cursor_hide(w))
    }

    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.emit(|w| ansi::cursor_show(w))
    }

    /// Reset all SGR attributes so no color bleeds into later output.
    ///
    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn reset_attributes(&mut self) -> io::Result<()> {
        self.emit(|w| ansi::reset(w))
    }

    /// Set the background color. Emits nothing for [`Color::Default`].
    ///
    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn set_background(&mut self, color: Color) -> io::Result<()> {
        if color.is_default() {
            return Ok(());
        }
        self.emit(|w| ansi::bg(w, color))
    }

    /// Set the foreground color. Emits nothing for [`Color::Default`].
    ///
    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        if color.is_default() {
            return Ok(());
        }
        self.emit(|w| ansi::fg(w, color))
    }

    /// Write literal text at the current cursor position.
    ///
    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.emit(|w| w.write_all(text.as_bytes()))
    }

    /// Switch to the alternate screen and hide the cursor.
    ///
    /// Both are undone when the returned [`Screen`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if either sequence can't be written. If the alternate
    /// screen was entered but hiding the cursor failed, the screen is left
    /// again before returning.
    pub fn enter(&mut self) -> io::Result<Screen<'_, W>> {
        self.enter_alternate_screen()?;
        let mut screen = Screen {
            surface: self,
            active: true,
        };
        screen.hide_cursor()?;
        trace!("entered alternate screen");
        Ok(screen)
    }
}

// ─── Screen ─────────────────────────────────────────────────────────────────

/// Scoped alternate-screen + hidden-cursor mode.
///
/// Derefs to the [`Surface`] so drawing goes through the guard. Dropping it
/// shows the cursor and leaves the alternate screen, exactly once.
#[derive(Debug)]
pub struct Screen<'a, W: Write> {
    surface: &'a mut Surface<W>,
    active: bool,
}

impl<W: Write> Screen<'_, W> {
    /// Restore the terminal now and report any write error.
    ///
    /// Dropping the guard does the same thing but has to swallow errors.
    ///
    /// # Errors
    ///
    /// Propagates write/flush errors from the underlying writer.
    pub fn leave(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        // Cursor first, alternate screen last: the shell's own screen comes
        // back with a visible cursor and nothing of ours on it.
        let shown = self.surface.show_cursor();
        let left = self.surface.leave_alternate_screen();
        trace!("left alternate screen");
        shown.and(left)
    }
}

impl<W: Write> Deref for Screen<'_, W> {
    type Target = Surface<W>;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl<W: Write> DerefMut for Screen<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl<W: Write> Drop for Screen<'_, W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

// ─── Panic-Safe Restore ─────────────────────────────────────────────────────

/// Restore sequence for emergency use: reset SGR, show cursor, exit the
/// alternate screen. Alternate screen exit is last.
pub(crate) const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?1049l";

/// Panic hook guard. Ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// A panic unwinds through [`Screen`]'s `Drop` too, but the hook runs first,
/// so without it the panic message would print onto the alternate screen
/// and vanish with it.
pub fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

/// Write [`EMERGENCY_RESTORE`] directly to stdout's file descriptor,
/// bypassing Rust's `io::stdout()` lock.
pub(crate) fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
