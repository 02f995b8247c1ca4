// SPDX-License-Identifier: MIT
//
// The shell loop.
//
//   enter screen → splash (held) → banner + regions → `$ ` prompt loop
//
// The loop doesn't parse or run anything. It echoes the prompt and reads
// lines until one of them, trimmed, is `exit`, or stdin runs dry. Both end
// the session the same way: the `Screen` guard hands the terminal back.
// Errors take the same route, since the guard lives on the stack of `run`.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use lash_term::{Geometry, Surface};
use lash_view::{Region, RowSpan, Splash};

/// Printed before every line read.
pub const PROMPT: &str = "$ ";
/// The one command the loop understands.
pub const EXIT_COMMAND: &str = "exit";
/// Drawn at the origin before the regions.
pub const BANNER: &str = "========";

/// Why the prompt loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user typed `exit`.
    Command,
    /// stdin reached end-of-file.
    EndOfInput,
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub exit: Exit,
    /// Lines read, including the one that ended the loop.
    pub lines: usize,
}

pub struct Shell<G> {
    geometry: G,
    row_span: RowSpan,
    splash: Option<(Splash, Duration)>,
    views: Vec<Region>,
}

impl<G: Geometry> Shell<G> {
    pub const fn new(geometry: G, row_span: RowSpan) -> Self {
        Self {
            geometry,
            row_span,
            splash: None,
            views: Vec::new(),
        }
    }

    /// Show `splash` for `hold` before anything else is drawn.
    #[must_use]
    pub fn with_splash(mut self, splash: Splash, hold: Duration) -> Self {
        self.splash = Some((splash, hold));
        self
    }

    /// Append a region. Regions are drawn in insertion order.
    pub fn add_view(&mut self, region: Region) {
        self.views.push(region);
    }

    pub fn views(&self) -> &[Region] {
        &self.views
    }

    /// Run one session against `input` and `output`.
    ///
    /// # Errors
    ///
    /// Terminal geometry failures and I/O errors on either stream. The
    /// terminal is restored before the error reaches the caller.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, output: W) -> Result<Session> {
        let mut surface = Surface::new(output);
        let mut screen = surface.enter().context("entering the alternate screen")?;

        if let Some((splash, hold)) = &self.splash {
            let size = self.geometry.size().context("sizing the splash")?;
            splash.draw(&mut *screen, size)?;
            thread::sleep(*hold);
        }

        self.render(&mut *screen)?;

        let mut lines = 0;
        let mut line = String::new();
        let exit = loop {
            screen.write_text(PROMPT)?;
            line.clear();
            if input.read_line(&mut line).context("reading a command")? == 0 {
                break Exit::EndOfInput;
            }
            lines += 1;
            let command = line.trim();
            if command == EXIT_COMMAND {
                break Exit::Command;
            }
            debug!(command, "ignoring input");
        };

        screen.leave().context("leaving the alternate screen")?;
        info!(?exit, lines, "session ended");
        Ok(Session { exit, lines })
    }

    /// Draw the banner and every region once.
    ///
    /// Regions that would cross the terminal edge are skipped.
    fn render<W: Write>(&self, surface: &mut Surface<W>) -> Result<()> {
        let size = self.geometry.size().context("sizing the regions")?;

        surface.move_cursor(1, 1)?;
        surface.write_text(BANNER)?;

        for view in &self.views {
            match view.check_within(size, self.row_span) {
                Ok(()) => view.render(surface, self.row_span)?,
                Err(err) => warn!(%err, "skipping region"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lash_term::{Color, EnvironmentError, FixedGeometry, Size};
    use lash_view::Rect;
    use pretty_assertions::assert_eq;

    fn shell() -> Shell<FixedGeometry> {
        Shell::new(FixedGeometry(Size::new(80, 24)), RowSpan::Inclusive)
    }

    fn run(shell: &Shell<impl Geometry>, input: &str) -> (Result<Session>, String) {
        let mut out = Vec::new();
        let result = shell.run(input.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    /// Geometry whose queries always fail.
    struct NoTerminal;

    impl Geometry for NoTerminal {
        fn columns(&self) -> Result<u16, EnvironmentError> {
            Err(EnvironmentError::Zero {
                program: "tput".into(),
                query: "cols",
            })
        }

        fn rows(&self) -> Result<u16, EnvironmentError> {
            Err(EnvironmentError::Zero {
                program: "tput".into(),
                query: "lines",
            })
        }
    }

    // ── Prompt loop ─────────────────────────────────────────────────────

    #[test]
    fn stops_only_at_exit() {
        let (result, out) = run(&shell(), "  \nls\nexit\nnever read\n");
        assert_eq!(
            result.unwrap(),
            Session {
                exit: Exit::Command,
                lines: 3
            }
        );
        assert_eq!(out.matches(PROMPT).count(), 3);
    }

    #[test]
    fn exit_is_trimmed() {
        let (result, _) = run(&shell(), "   exit  \n");
        assert_eq!(result.unwrap().exit, Exit::Command);
    }

    #[test]
    fn exit_must_match_exactly() {
        let (result, _) = run(&shell(), "exit now\nEXIT\n");
        let session = result.unwrap();
        assert_eq!(session.exit, Exit::EndOfInput);
        assert_eq!(session.lines, 2);
    }

    #[test]
    fn end_of_input_acts_like_exit() {
        let (result, out) = run(&shell(), "");
        assert_eq!(
            result.unwrap(),
            Session {
                exit: Exit::EndOfInput,
                lines: 0
            }
        );
        assert!(out.ends_with("$ \x1b[?25h\x1b[?1049l"));
    }

    #[test]
    fn last_line_without_newline() {
        let (result, _) = run(&shell(), "ls\nexit");
        assert_eq!(result.unwrap().exit, Exit::Command);
    }

    // ── Terminal modes ──────────────────────────────────────────────────

    #[test]
    fn enters_and_leaves_exactly_once() {
        let mut s = shell();
        for x in 0..4 {
            let mut r = Region::plain(Rect::new(x * 6, 2, 5, 3)).unwrap();
            r.set_bg(Color::RED);
            s.add_view(r);
        }
        let (result, out) = run(&s, "exit\n");
        result.unwrap();
        assert!(out.starts_with("\x1b[?1049h\x1b[?25l"));
        assert!(out.ends_with("\x1b[?25h\x1b[?1049l"));
        assert_eq!(out.matches("\x1b[?1049h").count(), 1);
        assert_eq!(out.matches("\x1b[?1049l").count(), 1);
    }

    #[test]
    fn geometry_failure_still_restores_terminal() {
        let s = Shell::new(NoTerminal, RowSpan::Inclusive);
        let (result, out) = run(&s, "exit\n");
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("zero-sized"));
        assert!(out.ends_with("\x1b[?25h\x1b[?1049l"));
        assert!(!out.contains(PROMPT));
    }

    // ── Drawing ─────────────────────────────────────────────────────────

    #[test]
    fn banner_then_regions_then_prompt() {
        let mut s = shell();
        let mut r = Region::plain(Rect::new(0, 0, 5, 3)).unwrap();
        r.set_bg(Color::RED);
        r.set_fg(Color::BLACK);
        s.add_view(r);

        let (result, out) = run(&s, "exit\n");
        result.unwrap();

        let banner = out.find("\x1b[1;1H========").unwrap();
        let region = out.find("*****").unwrap();
        let prompt = out.find(PROMPT).unwrap();
        assert!(banner < region && region < prompt);
        assert_eq!(out.matches("*****").count(), 4);
    }

    #[test]
    fn out_of_bounds_regions_are_skipped() {
        let mut s = shell();
        s.add_view(Region::plain(Rect::new(78, 0, 5, 1)).unwrap());
        s.add_view(Region::bordered("ok", Rect::new(0, 5, 4, 1)).unwrap());
        let (result, out) = run(&s, "exit\n");
        result.unwrap();
        assert!(!out.contains("*****"));
        assert!(out.contains("+--+"));
        assert_eq!(s.views().len(), 2);
    }

    #[test]
    fn splash_is_drawn_centered_first() {
        let splash = Splash::parse(&"x".repeat(49)).unwrap();
        let s = shell().with_splash(splash, Duration::ZERO);
        let (result, out) = run(&s, "exit\n");
        result.unwrap();
        let splash_at = out.find("\x1b[7;16Hxxxx").unwrap();
        let banner_at = out.find(BANNER).unwrap();
        assert!(splash_at < banner_at);
    }
}
