//! Errors raised while building regions and loading the splash.

use std::io;
use std::path::PathBuf;

use lash_term::Size;
use thiserror::Error;

use crate::region::Rect;

#[derive(Debug, Error)]
pub enum ViewError {
    /// A region was constructed with geometry it can't be drawn with.
    #[error("invalid region {rect}: {reason}")]
    InvalidArgument { rect: Rect, reason: &'static str },

    /// The painted rectangle doesn't fit on the terminal.
    #[error("region {rect} ({rows} painted rows) does not fit a {}x{} terminal", .size.cols, .size.rows)]
    OutOfBounds { rect: Rect, rows: u32, size: Size },

    #[error("splash file {} not found", .path.display())]
    SplashMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read splash file {}", .path.display())]
    SplashUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed splash file {}", .path.display())]
    SplashMalformed {
        path: PathBuf,
        #[source]
        defect: SplashDefect,
    },
}

/// What's wrong with a splash asset's contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplashDefect {
    #[error("the file is not valid UTF-8")]
    NotUtf8,

    #[error("the file is empty")]
    Empty,

    #[error("{lines} lines, at most {max} allowed")]
    TooTall { lines: usize, max: u16 },

    #[error("line {line} is {width} columns wide, at most {max} allowed")]
    TooWide { line: usize, width: usize, max: u16 },
}
