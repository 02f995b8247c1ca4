// SPDX-License-Identifier: MIT
//
// Terminal geometry: how many columns and rows are there right now?
//
// The size is asked for on every call. Nothing here caches: the terminal
// can be resized between two queries and the caller should see that, even
// though lash doesn't react to resizes on its own.
//
// The production source shells out to `tput`, exactly like a user would
// at the prompt. Tests use `FixedGeometry` so they don't depend on a
// controlling terminal.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::EnvironmentError;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

// ─── Geometry ───────────────────────────────────────────────────────────────

/// A source of terminal dimensions.
pub trait Geometry {
    /// Current column count.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError`] if the size can't be determined.
    fn columns(&self) -> Result<u16, EnvironmentError>;

    /// Current row count.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError`] if the size can't be determined.
    fn rows(&self) -> Result<u16, EnvironmentError>;

    /// Both dimensions, queried back to back.
    ///
    /// # Errors
    ///
    /// Returns the first [`EnvironmentError`] from either query.
    fn size(&self) -> Result<Size, EnvironmentError> {
        Ok(Size {
            cols: self.columns()?,
            rows: self.rows()?,
        })
    }
}

impl<G: Geometry + ?Sized> Geometry for &G {
    fn columns(&self) -> Result<u16, EnvironmentError> {
        (**self).columns()
    }

    fn rows(&self) -> Result<u16, EnvironmentError> {
        (**self).rows()
    }
}

// ─── Tput ───────────────────────────────────────────────────────────────────

/// Queries the terminal through the `tput` utility (`tput cols`, `tput lines`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tput {
    program: String,
}

impl Tput {
    /// Use a specific program instead of `tput` from `$PATH`.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program this source runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn query(&self, query: &'static str) -> Result<u16, EnvironmentError> {
        // stderr stays attached: `tput` falls back to it to find the tty
        // when stdout is the pipe we're reading from.
        let output = Command::new(&self.program)
            .arg(query)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| EnvironmentError::Unavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(EnvironmentError::Failed {
                program: self.program.clone(),
                query,
                status: output.status,
            });
        }

        let value = parse_dimension(&self.program, query, &output.stdout)?;
        debug!(program = %self.program, query, value, "terminal query");
        Ok(value)
    }
}

impl Default for Tput {
    fn default() -> Self {
        Self::with_program("tput")
    }
}

impl Geometry for Tput {
    fn columns(&self) -> Result<u16, EnvironmentError> {
        self.query("cols")
    }

    fn rows(&self) -> Result<u16, EnvironmentError> {
        self.query("lines")
    }
}

/// Parse a utility's stdout as a positive cell count.
fn parse_dimension(
    program: &str,
    query: &'static str,
    stdout: &[u8],
) -> Result<u16, EnvironmentError> {
    let text = String::from_utf8_lossy(stdout);
    let trimmed = text.trim();
    let value: u16 = trimmed
        .parse()
        .map_err(|_| EnvironmentError::NotANumber {
            program: program.to_owned(),
            query,
            output: trimmed.to_owned(),
        })?;

    if value == 0 {
        return Err(EnvironmentError::Zero {
            program: program.to_owned(),
            query,
        });
    }
    Ok(value)
}

/// Current column count via `tput cols`.
///
/// # Errors
///
/// Returns [`EnvironmentError`] if `tput` is missing or its output is unusable.
pub fn query_columns() -> Result<u16, EnvironmentError> {
    Tput::default().columns()
}

/// Current row count via `tput lines`.
///
/// # Errors
///
/// Returns [`EnvironmentError`] if `tput` is missing or its output is unusable.
pub fn query_rows() -> Result<u16, EnvironmentError> {
    Tput::default().rows()
}

// ─── FixedGeometry ──────────────────────────────────────────────────────────

/// A geometry source that always reports the same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedGeometry(pub Size);

impl Geometry for FixedGeometry {
    fn columns(&self) -> Result<u16, EnvironmentError> {
        Ok(self.0.cols)
    }

    fn rows(&self) -> Result<u16, EnvironmentError> {
        Ok(self.0.rows)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_dimension ─────────────────────────────────────────────────

    #[test]
    fn parse_plain_number() {
        assert_eq!(parse_dimension("tput", "cols", b"80\n").unwrap(), 80);
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        assert_eq!(parse_dimension("tput", "lines", b"  24 \r\n").unwrap(), 24);
    }

    #[test]
    fn parse_rejects_text() {
        let err = parse_dimension("tput", "cols", b"unknown terminal\n").unwrap_err();
        assert!(matches!(err, EnvironmentError::NotANumber { ref output, .. } if output == "unknown terminal"));
    }

    #[test]
    fn parse_rejects_empty() {
        let err = parse_dimension("tput", "cols", b"").unwrap_err();
        assert!(matches!(err, EnvironmentError::NotANumber { .. }));
    }

    #[test]
    fn parse_rejects_negative() {
        let err = parse_dimension("tput", "cols", b"-5").unwrap_err();
        assert!(matches!(err, EnvironmentError::NotANumber { .. }));
    }

    #[test]
    fn parse_rejects_zero() {
        let err = parse_dimension("tput", "lines", b"0\n").unwrap_err();
        assert!(matches!(err, EnvironmentError::Zero { query: "lines", .. }));
    }

    // ── Tput ────────────────────────────────────────────────────────────

    #[test]
    fn tput_default_program() {
        assert_eq!(Tput::default().program(), "tput");
    }

    #[test]
    fn tput_missing_program_is_unavailable() {
        let tput = Tput::with_program("lash-no-such-utility");
        let err = tput.columns().unwrap_err();
        assert!(matches!(err, EnvironmentError::Unavailable { .. }));
        assert!(err.to_string().contains("lash-no-such-utility"));
    }

    #[cfg(unix)]
    #[test]
    fn tput_failing_program_reports_status() {
        let err = Tput::with_program("false").rows().unwrap_err();
        assert!(matches!(err, EnvironmentError::Failed { query: "lines", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn tput_non_numeric_output() {
        // `echo cols` prints "cols", which is not a number.
        let err = Tput::with_program("echo").columns().unwrap_err();
        assert!(matches!(err, EnvironmentError::NotANumber { ref output, .. } if output == "cols"));
    }

    #[test]
    fn free_queries_do_not_panic() {
        // Outcome depends on the host (tput installed? a terminal attached?).
        let _ = query_columns();
        let _ = query_rows();
    }

    // ── FixedGeometry ───────────────────────────────────────────────────

    #[test]
    fn fixed_geometry_reports_size() {
        let g = FixedGeometry(Size::new(80, 24));
        assert_eq!(g.columns().unwrap(), 80);
        assert_eq!(g.rows().unwrap(), 24);
        assert_eq!(g.size().unwrap(), Size { cols: 80, rows: 24 });
    }

    #[test]
    fn geometry_through_reference() {
        let g = FixedGeometry(Size::new(120, 40));
        let r = &g;
        assert_eq!(Geometry::size(&r).unwrap(), Size::new(120, 40));
    }
}
