// SPDX-License-Identifier: MIT
//
// lash-term: the terminal surface under lash.
//
// Everything lash puts on screen goes through here: the terminal's size
// (asked of `tput` on every query), 256-color palette values, cursor and
// color escape sequences, and the scoped alternate-screen mode that is
// always given back to the user's shell on the way out.
//
// There is no frame buffer and no diffing. Every escape is written and
// flushed the moment it's issued, in the order it's issued.

pub mod ansi;
pub mod color;
pub mod error;
pub mod geometry;
pub mod interrupt;
pub mod surface;

pub use color::Color;
pub use error::{ColorError, EnvironmentError};
pub use geometry::{FixedGeometry, Geometry, Size, Tput};
pub use surface::{Screen, Surface};
