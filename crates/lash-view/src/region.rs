//! Regions: colored rectangles painted straight onto the terminal.
//!
//! A [`Region`] is a rectangle anchored at a 0-based cell position, with a
//! normal and a "selected" color pair. It comes in two kinds:
//!
//! - **Plain**: every cell is the fill glyph `*`.
//! - **Bordered**: each row is `+`, `width - 2` dashes, `+`. Carries a
//!   free-form identifier; the close button is a bordered region whose
//!   identifier is always [`CLOSE_ID`].
//!
//! Rendering walks the rows top to bottom. For each row it moves the cursor,
//! resets attributes, sets background then foreground (skipped for the
//! default color), writes the row and resets again, so nothing bleeds into
//! the next row's cursor move.
//!
//! # Row span
//!
//! Regions have always painted `height + 1` rows: the bottom edge is
//! inclusive. [`RowSpan::Inclusive`] keeps that output; [`RowSpan::Exact`]
//! paints exactly `height` rows.

use std::fmt;
use std::io::{self, Write};

use lash_term::{Color, Size, Surface};

use crate::error::ViewError;

/// Glyph filling a plain region.
pub const FILL_GLYPH: char = '*';
/// Glyph at both ends of a bordered row.
pub const BORDER_GLYPH: char = '+';
/// Glyph between the borders of a bordered row.
pub const BORDER_FILL_GLYPH: char = '-';
/// Height of an eye region.
pub const EYE_HEIGHT: u16 = 5;
/// Identifier of the close button.
pub const CLOSE_ID: &str = "close";

// ---------------------------------------------------------------------------
// RowSpan
// ---------------------------------------------------------------------------

/// How many rows a region of a given height paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowSpan {
    /// `height + 1` rows, bottom edge included.
    #[default]
    Inclusive,
    /// Exactly `height` rows.
    Exact,
}

impl RowSpan {
    /// Number of rows painted for `height`.
    #[inline]
    #[must_use]
    pub const fn rows(self, height: u16) -> u32 {
        match self {
            Self::Inclusive => height as u32 + 1,
            Self::Exact => height as u32,
        }
    }
}

// ---------------------------------------------------------------------------
// Rect / Style
// ---------------------------------------------------------------------------

/// A rectangle in 0-based terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@({},{})", self.width, self.height, self.x, self.y)
    }
}

/// A background/foreground pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub bg: Color,
    pub fg: Color,
}

impl Style {
    #[inline]
    #[must_use]
    pub const fn new(bg: Color, fg: Color) -> Self {
        Self { bg, fg }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// What a region's rows look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionKind {
    Plain,
    Bordered { id: String },
}

/// A paintable rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    rect: Rect,
    kind: RegionKind,
    style: Style,
    /// Colors used instead of `style` while focused.
    selected: Style,
    focused: bool,
}

impl Region {
    /// Selection colors every region starts with.
    pub const DEFAULT_SELECTED: Style = Style::new(Color::BLACK, Color::RED);

    fn build(rect: Rect, kind: RegionKind) -> Result<Self, ViewError> {
        if rect.width == 0 || rect.height == 0 {
            return Err(ViewError::InvalidArgument {
                rect,
                reason: "width and height must be positive",
            });
        }
        if matches!(kind, RegionKind::Bordered { .. }) && rect.width < 2 {
            return Err(ViewError::InvalidArgument {
                rect,
                reason: "bordered regions need a width of at least 2",
            });
        }
        Ok(Self {
            rect,
            kind,
            style: Style::default(),
            selected: Self::DEFAULT_SELECTED,
            focused: false,
        })
    }

    /// A solid `*` rectangle in the terminal's default colors.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidArgument`] if width or height is zero.
    pub fn plain(rect: Rect) -> Result<Self, ViewError> {
        Self::build(rect, RegionKind::Plain)
    }

    /// A `+---+` bordered rectangle.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidArgument`] if height is zero or width is below 2.
    pub fn bordered(id: impl Into<String>, rect: Rect) -> Result<Self, ViewError> {
        Self::build(rect, RegionKind::Bordered { id: id.into() })
    }

    /// An "eye": a bordered region at the origin, [`EYE_HEIGHT`] rows tall,
    /// red on black.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidArgument`] if `width` is below 2.
    pub fn eye(id: impl Into<String>, width: u16) -> Result<Self, ViewError> {
        let mut region = Self::bordered(id, Rect::new(0, 0, width, EYE_HEIGHT))?;
        region.set_bg(Color::BLACK);
        region.set_fg(Color::RED);
        Ok(region)
    }

    /// The close affordance: a bordered region identified as [`CLOSE_ID`].
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidArgument`] if height is zero or width is below 2.
    pub fn close_button(rect: Rect) -> Result<Self, ViewError> {
        Self::bordered(CLOSE_ID, rect)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &RegionKind {
        &self.kind
    }

    /// The identifier of a bordered region, `None` for plain ones.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match &self.kind {
            RegionKind::Bordered { id } => Some(id),
            RegionKind::Plain => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn style(&self) -> Style {
        self.style
    }

    #[inline]
    #[must_use]
    pub const fn selected_style(&self) -> Style {
        self.selected
    }

    #[inline]
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// The colors `render` will paint with right now.
    #[inline]
    #[must_use]
    pub const fn active_style(&self) -> Style {
        if self.focused {
            self.selected
        } else {
            self.style
        }
    }

    // ── Setters ─────────────────────────────────────────────────────────

    pub const fn set_position(&mut self, x: u16, y: u16) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub const fn set_bg(&mut self, color: Color) {
        self.style.bg = color;
    }

    pub const fn set_fg(&mut self, color: Color) {
        self.style.fg = color;
    }

    pub const fn set_selected_bg(&mut self, color: Color) {
        self.selected.bg = color;
    }

    pub const fn set_selected_fg(&mut self, color: Color) {
        self.selected.fg = color;
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    // ── Geometry ────────────────────────────────────────────────────────

    /// One row of content, exactly `width` characters.
    #[must_use]
    pub fn row_content(&self) -> String {
        let width = usize::from(self.rect.width);
        match self.kind {
            RegionKind::Plain => std::iter::repeat_n(FILL_GLYPH, width).collect(),
            RegionKind::Bordered { .. } => {
                let mut row = String::with_capacity(width);
                row.push(BORDER_GLYPH);
                row.extend(std::iter::repeat_n(BORDER_FILL_GLYPH, width - 2));
                row.push(BORDER_GLYPH);
                row
            }
        }
    }

    /// Check that every painted cell lands inside a terminal of `size`.
    ///
    /// # Errors
    ///
    /// [`ViewError::OutOfBounds`] if the painted rectangle crosses the right
    /// or bottom edge.
    pub fn check_within(&self, size: Size, span: RowSpan) -> Result<(), ViewError> {
        let rows = span.rows(self.rect.height);
        let right = u32::from(self.rect.x) + u32::from(self.rect.width);
        let bottom = u32::from(self.rect.y) + rows;
        if right > u32::from(size.cols) || bottom > u32::from(size.rows) {
            return Err(ViewError::OutOfBounds {
                rect: self.rect,
                rows,
                size,
            });
        }
        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Paint the region. No bounds check: the terminal clips or wraps
    /// whatever falls off the edge.
    ///
    /// # Errors
    ///
    /// Propagates write errors from the surface.
    pub fn render<W: Write>(&self, surface: &mut Surface<W>, span: RowSpan) -> io::Result<()> {
        let style = self.active_style();
        let content = self.row_content();
        let col = u32::from(self.rect.x) + 1;
        let top = u32::from(self.rect.y) + 1;

        for i in 0..span.rows(self.rect.height) {
            surface.move_cursor(top + i, col)?;
            surface.reset_attributes()?;
            surface.set_background(style.bg)?;
            surface.set_foreground(style.fg)?;
            surface.write_text(&content)?;
            surface.reset_attributes()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
