//! # lash-view: what lash draws
//!
//! - **[`region`]**: `Region`: plain, bordered, eye and close-button
//!   rectangles, their colors, focus and bounds contract, and how they
//!   paint themselves onto a [`lash_term::Surface`]
//! - **[`splash`]**: loading, validating and centering the startup splash
//! - **[`error`]**: `ViewError` for both

pub mod error;
pub mod region;
pub mod splash;

pub use error::{SplashDefect, ViewError};
pub use region::{Rect, Region, RegionKind, RowSpan, Style};
pub use splash::Splash;
