//! Chart capture without a DOM: charts are rebuilt from the rows and drawn
//! with `resvg`.

use std::collections::HashMap;
use std::sync::Arc;

use api::VacancyRow;
use futures::future::LocalBoxFuture;
use once_cell::sync::Lazy;
use tiny_skia::{Color, Pixmap, Transform};
use usvg::fontdb::Database;

use super::capture::{Bitmap, ChartNode, ChartPage, Rasterizer};
use super::fonts::REPORT_FONT;
use super::ReportError;
use crate::results::ChartSet;

/// Oversampling applied to the SVG's intrinsic size.
const SCALE: f32 = 3.0;

/// System faces plus the report face, scanned once per process.
static FONT_DB: Lazy<Arc<Database>> = Lazy::new(|| {
    let mut db = Database::new();
    db.load_system_fonts();
    db.load_font_data(REPORT_FONT.to_vec());
    Arc::new(db)
});

/// Chart markup keyed by element id.
#[derive(Debug, Default, Clone)]
pub struct StaticPage {
    nodes: HashMap<String, ChartNode>,
}

impl StaticPage {
    pub fn from_rows(rows: &[VacancyRow]) -> Self {
        let mut page = Self::default();
        for (id, markup) in ChartSet::build(rows).into_entries() {
            if let Some(markup) = markup {
                page.insert(id, ChartNode::Vector { markup });
            }
        }
        page
    }

    pub fn insert(&mut self, id: impl Into<String>, node: ChartNode) {
        self.nodes.insert(id.into(), node);
    }
}

impl ChartPage for StaticPage {
    fn locate(&self, id: &str) -> Result<Option<ChartNode>, ReportError> {
        Ok(self.nodes.get(id).cloned())
    }
}

pub struct ResvgRasterizer {
    fontdb: Arc<Database>,
}

impl ResvgRasterizer {
    pub fn new() -> Self {
        Self {
            fontdb: Arc::clone(&FONT_DB),
        }
    }

    fn render(&self, markup: &str) -> Result<Bitmap, ReportError> {
        let mut options = usvg::Options::default();
        options.fontdb = self.fontdb.clone();

        let tree = usvg::Tree::from_str(markup, &options)
            .map_err(|err| ReportError::Rasterize(err.to_string()))?;
        let size = tree
            .size()
            .to_int_size()
            .scale_by(SCALE)
            .ok_or_else(|| ReportError::Rasterize("chart has no size".into()))?;
        let mut pixmap = Pixmap::new(size.width(), size.height())
            .ok_or_else(|| ReportError::Rasterize("could not allocate canvas".into()))?;
        pixmap.fill(Color::WHITE);
        resvg::render(&tree, Transform::from_scale(SCALE, SCALE), &mut pixmap.as_mut());

        let png = pixmap
            .encode_png()
            .map_err(|err| ReportError::Rasterize(err.to_string()))?;
        Ok(Bitmap {
            width: pixmap.width(),
            height: pixmap.height(),
            png,
        })
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize<'a>(
        &'a self,
        node: &'a ChartNode,
    ) -> LocalBoxFuture<'a, Result<Bitmap, ReportError>> {
        Box::pin(async move {
            match node {
                ChartNode::Vector { markup } => self.render(markup),
                ChartNode::Element { element_id } => Err(ReportError::Rasterize(format!(
                    "{element_id}: only SVG charts can be drawn outside a browser"
                ))),
            }
        })
    }
}
