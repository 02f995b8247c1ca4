// SPDX-License-Identifier: MIT
//
// Error types for the terminal surface.
//
// Raw terminal writes return `io::Result` straight from the writer. The
// errors here cover the two things that can go wrong before a single byte
// is painted: asking the environment how big the terminal is, and turning
// user input into a palette color.

use std::io;

use thiserror::Error;

/// The terminal geometry could not be determined.
///
/// Always fatal at startup: there is no retry and no fallback size.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    /// The query utility could not be spawned (usually: not installed).
    #[error("terminal query utility `{program}` is unavailable")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The utility ran but exited unsuccessfully.
    #[error("`{program} {query}` failed with {status}")]
    Failed {
        program: String,
        query: &'static str,
        status: std::process::ExitStatus,
    },

    /// The utility printed something that isn't a cell count.
    #[error("`{program} {query}` returned non-numeric output {output:?}")]
    NotANumber {
        program: String,
        query: &'static str,
        output: String,
    },

    /// A zero-sized dimension. Nothing can be drawn on it.
    #[error("`{program} {query}` reported a zero-sized terminal")]
    Zero {
        program: String,
        query: &'static str,
    },
}

/// A value that can't be turned into a [`Color`](crate::color::Color).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Outside `-1..=255` (`-1` being the default sentinel).
    #[error("color index {0} is outside the 256-color palette")]
    OutOfRange(i64),

    /// Neither a known color name nor a number.
    #[error("unknown color {0:?}")]
    Unknown(String),
}
