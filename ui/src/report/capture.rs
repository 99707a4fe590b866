//! Finding chart regions in the page and turning them into bitmaps.

use futures::future::LocalBoxFuture;

use super::ReportError;

/// A chart region as found in the page.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartNode {
    /// Serialized `<svg>` markup.
    Vector { markup: String },
    /// Any other element, rasterized from an off-screen clone.
    Element { element_id: String },
}

/// Encoded PNG plus its pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

pub trait ChartPage {
    /// `Ok(None)` when no element with `id` is mounted; `Err` when it is
    /// mounted but could not be read.
    fn locate(&self, id: &str) -> Result<Option<ChartNode>, ReportError>;
}

pub trait Rasterizer {
    fn rasterize<'a>(&'a self, node: &'a ChartNode) -> LocalBoxFuture<'a, Result<Bitmap, ReportError>>;
}
