//! Page geometry for the client report, in millimetres from the top-left.

/// A4 portrait.
pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

pub const MARGIN: f64 = 10.0;
/// Indent of wrapped recommendation lines.
pub const LIST_INDENT: f64 = 12.0;
/// Recommendation lines below this break to a new page.
pub const LIST_LIMIT: f64 = 280.0;
/// Space kept free under every section.
pub const SECTION_GAP: f64 = 10.0;
/// Minimum room left on a page before a chart caption is placed.
pub const CHART_MIN_SPACE: f64 = 20.0;
pub const CAPTION_HEIGHT: f64 = 6.0;
/// Pixel density assumed for embedded bitmaps.
pub const IMAGE_DPI: f64 = 300.0;

/// Typographic point in millimetres.
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Vertical write position on the current page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub y: f64,
    page_height: f64,
}

impl Cursor {
    pub fn new(page_height: f64) -> Self {
        Self {
            y: MARGIN,
            page_height,
        }
    }

    pub fn advance(&mut self, by: f64) {
        self.y += by;
    }

    /// Whether a block of `height` fits above the bottom margin.
    pub fn fits(&self, height: f64) -> bool {
        self.y + height <= self.page_height - MARGIN
    }

    pub fn reset(&mut self) {
        self.y = MARGIN;
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }
}

/// Size of a `px_width`×`px_height` bitmap scaled to `max_width`, aspect kept and
/// height capped at `max_height`.
pub fn fit_image(px_width: u32, px_height: u32, max_width: f64, max_height: f64) -> (f64, f64) {
    if px_width == 0 || px_height == 0 {
        return (0.0, 0.0);
    }
    let aspect = px_width as f64 / px_height as f64;
    let mut width = max_width;
    let mut height = width / aspect;
    if height > max_height {
        height = max_height;
        width = height * aspect;
    }
    (width, height)
}
