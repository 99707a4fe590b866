//! Writes [`ReportContent`] onto a [`ReportSink`], embedding chart snapshots.

use dioxus::logger::tracing::{debug, warn};

use super::capture::{ChartPage, Rasterizer};
use super::content::ReportContent;
use super::layout::{
    fit_image, Cursor, CAPTION_HEIGHT, CHART_MIN_SPACE, LIST_INDENT, LIST_LIMIT, MARGIN,
    SECTION_GAP,
};
use super::sink::{Align, ReportSink, TableSpec};
use super::ReportError;

const TITLE_SIZE: f64 = 16.0;
const HEADING_SIZE: f64 = 12.0;
const BODY_SIZE: f64 = 10.0;
const BODY_LINE: f64 = 5.0;
const HEADING_LINE: f64 = 6.0;

/// What happened to each chart region.
#[derive(Debug, Default)]
pub struct AssemblyReport {
    pub embedded: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    pub failed: Vec<(&'static str, ReportError)>,
}

fn ensure_room<S: ReportSink + ?Sized>(sink: &mut S, cursor: &mut Cursor, height: f64) {
    if !cursor.fits(height) {
        sink.add_page();
        cursor.reset();
    }
}

fn section_table<S: ReportSink + ?Sized>(
    sink: &mut S,
    cursor: &mut Cursor,
    heading: &str,
    table: &TableSpec,
) {
    ensure_room(sink, cursor, HEADING_LINE + SECTION_GAP);
    sink.set_font_size(HEADING_SIZE);
    sink.text(heading, MARGIN, cursor.y, Align::Left);
    cursor.advance(HEADING_LINE);
    cursor.y = sink.table(cursor.y, table) + SECTION_GAP;
}

pub async fn assemble<S, P, R>(
    sink: &mut S,
    page: &P,
    rasterizer: &R,
    content: &ReportContent,
) -> AssemblyReport
where
    S: ReportSink + ?Sized,
    P: ChartPage + ?Sized,
    R: Rasterizer + ?Sized,
{
    let (page_width, page_height) = sink.page_size();
    let usable_width = page_width - 2.0 * MARGIN;
    let mut cursor = Cursor::new(page_height);
    let mut report = AssemblyReport::default();

    sink.set_font_size(TITLE_SIZE);
    sink.text(&content.title, page_width / 2.0, cursor.y, Align::Center);
    cursor.advance(SECTION_GAP);

    sink.set_font_size(HEADING_SIZE);
    sink.text(&content.filters_heading, MARGIN, cursor.y, Align::Left);
    cursor.advance(HEADING_LINE);
    sink.set_font_size(BODY_SIZE);
    for line in &content.filter_lines {
        ensure_room(sink, &mut cursor, BODY_LINE);
        sink.text(line, MARGIN, cursor.y, Align::Left);
        cursor.advance(BODY_LINE);
    }
    cursor.advance(BODY_LINE);

    if !content.recommendations.is_empty() {
        ensure_room(sink, &mut cursor, HEADING_LINE + BODY_LINE);
        sink.set_font_size(HEADING_SIZE);
        sink.text(&content.recommendations_heading, MARGIN, cursor.y, Align::Left);
        cursor.advance(HEADING_LINE);

        sink.set_font_size(BODY_SIZE);
        for item in &content.recommendations {
            for line in sink.split_to_width(&format!("- {item}"), usable_width) {
                if cursor.y > LIST_LIMIT {
                    sink.add_page();
                    cursor.reset();
                }
                sink.text(&line, LIST_INDENT, cursor.y, Align::Left);
                cursor.advance(BODY_LINE);
            }
            cursor.advance(2.0);
        }
        cursor.advance(BODY_LINE);
    }

    if let Some(table) = &content.region_table {
        section_table(sink, &mut cursor, &content.regions_heading, table);
    }
    if let Some(table) = &content.row_table {
        section_table(sink, &mut cursor, &content.rows_heading, table);
    }

    for chart in &content.charts {
        let node = match page.locate(chart.id) {
            Ok(Some(node)) => node,
            Ok(None) => {
                debug!(id = chart.id, "chart region not found; skipped");
                report.skipped.push(chart.id);
                continue;
            }
            Err(err) => {
                warn!(id = chart.id, %err, "chart region unreadable");
                report.failed.push((chart.id, err));
                continue;
            }
        };

        let bitmap = match rasterizer.rasterize(&node).await {
            Ok(bitmap) => bitmap,
            Err(err) => {
                warn!(id = chart.id, %err, "chart capture failed");
                report.failed.push((chart.id, err));
                continue;
            }
        };

        let max_height = page_height - 2.0 * MARGIN - CAPTION_HEIGHT;
        let (width, height) = fit_image(bitmap.width, bitmap.height, usable_width, max_height);
        if cursor.y > page_height - CHART_MIN_SPACE || !cursor.fits(CAPTION_HEIGHT + height) {
            sink.add_page();
            cursor.reset();
        }

        sink.set_font_size(HEADING_SIZE);
        sink.text(&chart.caption, MARGIN, cursor.y, Align::Left);
        cursor.advance(CAPTION_HEIGHT);

        match sink.image(&bitmap, MARGIN, cursor.y, width, height) {
            Ok(()) => {
                cursor.advance(height + SECTION_GAP);
                report.embedded.push(chart.id);
            }
            Err(err) => {
                warn!(id = chart.id, %err, "chart embedding failed");
                report.failed.push((chart.id, err));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use futures::executor::block_on;
    use futures::future::LocalBoxFuture;

    use super::*;
    use crate::report::capture::{Bitmap, ChartNode};
    use crate::report::content::ChartSection;
    use crate::report::layout::{PAGE_HEIGHT, PAGE_WIDTH};
    use crate::report::sink::TableStyle;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        AddPage,
        Text(String, f64),
        Image { y: f64, width: f64, height: f64 },
    }

    #[derive(Default)]
    struct RecordingSink {
        ops: Vec<Op>,
        size: f64,
    }

    impl RecordingSink {
        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, _) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn position_of(&self, needle: &str) -> usize {
            self.ops
                .iter()
                .position(|op| matches!(op, Op::Text(t, _) if t == needle))
                .unwrap_or_else(|| panic!("{needle} not written"))
        }
    }

    impl ReportSink for RecordingSink {
        fn page_size(&self) -> (f64, f64) {
            (PAGE_WIDTH, PAGE_HEIGHT)
        }
        fn add_page(&mut self) {
            self.ops.push(Op::AddPage);
        }
        fn set_font_size(&mut self, size_pt: f64) {
            self.size = size_pt;
        }
        fn font_size(&self) -> f64 {
            self.size
        }
        fn text(&mut self, text: &str, _x: f64, y: f64, _align: Align) {
            self.ops.push(Op::Text(text.to_string(), y));
        }
        fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, _rgb: [u8; 3]) {}
        fn stroke_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, _rgb: [u8; 3]) {}
        fn image(
            &mut self,
            _bitmap: &Bitmap,
            _x: f64,
            y: f64,
            width: f64,
            height: f64,
        ) -> Result<(), ReportError> {
            self.ops.push(Op::Image { y, width, height });
            Ok(())
        }
    }

    /// Markup `"unreadable"` stands for a mounted chart that cannot be read.
    struct FakePage(HashMap<&'static str, ChartNode>);

    impl ChartPage for FakePage {
        fn locate(&self, id: &str) -> Result<Option<ChartNode>, ReportError> {
            match self.0.get(id) {
                Some(ChartNode::Vector { markup }) if markup == "unreadable" => {
                    Err(ReportError::Capture(format!("{id}: serializer failed")))
                }
                node => Ok(node.cloned()),
            }
        }
    }

    /// Markup `"<w>x<h>"` becomes a bitmap of that size; `"broken"` fails.
    struct FakeRasterizer;

    impl Rasterizer for FakeRasterizer {
        fn rasterize<'a>(
            &'a self,
            node: &'a ChartNode,
        ) -> LocalBoxFuture<'a, Result<Bitmap, ReportError>> {
            Box::pin(async move {
                let ChartNode::Vector { markup } = node else {
                    return Err(ReportError::Rasterize("element".into()));
                };
                let (w, h) = markup
                    .split_once('x')
                    .ok_or_else(|| ReportError::Rasterize(markup.clone()))?;
                Ok(Bitmap {
                    width: w.parse().map_err(|_| ReportError::Rasterize(markup.clone()))?,
                    height: h.parse().map_err(|_| ReportError::Rasterize(markup.clone()))?,
                    png: Vec::new(),
                })
            })
        }
    }

    fn vector(markup: &str) -> ChartNode {
        ChartNode::Vector {
            markup: markup.to_string(),
        }
    }

    fn content(recommendations: usize, rows: usize) -> ReportContent {
        let table = |n: usize| TableSpec {
            head: vec!["Head A".into(), "Head B".into()],
            body: (0..n).map(|i| vec![format!("cell {i}"), "x".into()]).collect(),
            style: TableStyle {
                font_size: 8.0,
                head_fill: [0, 0, 0],
                column_widths: vec![None, None],
            },
        };
        ReportContent {
            title: "Title".into(),
            filters_heading: "Filters".into(),
            filter_lines: vec!["Salary".into(), "Position".into()],
            recommendations_heading: "Recommendations".into(),
            recommendations: (0..recommendations).map(|i| format!("tip {i}")).collect(),
            regions_heading: "Regions".into(),
            region_table: (rows > 0).then(|| table(2)),
            rows_heading: "Rows".into(),
            row_table: (rows > 0).then(|| table(rows)),
            charts: vec![
                ChartSection { id: "trend-chart", caption: "Trend".into() },
                ChartSection { id: "comparison-chart", caption: "Comparison".into() },
                ChartSection { id: "heatmap-chart", caption: "Heatmap".into() },
            ],
        }
    }

    #[test]
    fn missing_chart_region_is_skipped_and_order_kept() {
        let page = FakePage(HashMap::from([
            ("trend-chart", vector("500x300")),
            ("heatmap-chart", vector("1000x300")),
        ]));
        let mut sink = RecordingSink::default();

        let report = block_on(assemble(&mut sink, &page, &FakeRasterizer, &content(0, 0)));

        assert_eq!(report.embedded, vec!["trend-chart", "heatmap-chart"]);
        assert_eq!(report.skipped, vec!["comparison-chart"]);
        assert!(report.failed.is_empty());
        assert!(!sink.texts().contains(&"Comparison"));
        assert!(sink.position_of("Trend") < sink.position_of("Heatmap"));
        let images = sink.ops.iter().filter(|op| matches!(op, Op::Image { .. })).count();
        assert_eq!(images, 2);
    }

    #[test]
    fn failed_rasterization_does_not_stop_later_charts() {
        let page = FakePage(HashMap::from([
            ("trend-chart", vector("broken")),
            ("comparison-chart", vector("500x300")),
            (
                "heatmap-chart",
                ChartNode::Element { element_id: "heatmap-chart".into() },
            ),
        ]));
        let mut sink = RecordingSink::default();

        let report = block_on(assemble(&mut sink, &page, &FakeRasterizer, &content(0, 0)));

        assert_eq!(report.embedded, vec!["comparison-chart"]);
        let failed: Vec<&str> = report.failed.iter().map(|(id, _)| *id).collect();
        assert_eq!(failed, vec!["trend-chart", "heatmap-chart"]);
    }

    #[test]
    fn unreadable_chart_is_a_failure_not_a_skip() {
        let page = FakePage(HashMap::from([
            ("trend-chart", vector("500x300")),
            ("comparison-chart", vector("unreadable")),
            ("heatmap-chart", vector("400x400")),
        ]));
        let mut sink = RecordingSink::default();

        let report = block_on(assemble(&mut sink, &page, &FakeRasterizer, &content(0, 0)));

        assert!(report.skipped.is_empty());
        assert_eq!(report.embedded, vec!["trend-chart", "heatmap-chart"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "comparison-chart");
        assert!(matches!(report.failed[0].1, ReportError::Capture(_)));
    }

    #[test]
    fn sections_are_written_in_order() {
        let page = FakePage(HashMap::new());
        let mut sink = RecordingSink::default();

        block_on(assemble(&mut sink, &page, &FakeRasterizer, &content(1, 3)));

        let order = ["Title", "Filters", "Salary", "Recommendations", "Regions", "Rows"];
        let positions: Vec<usize> = order.iter().map(|t| sink.position_of(t)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert!(sink.texts().contains(&"- tip 0"));
        assert_eq!(sink.texts().iter().filter(|t| **t == "Head A").count(), 2);
    }

    #[test]
    fn long_recommendation_list_breaks_pages() {
        let page = FakePage(HashMap::new());
        let mut sink = RecordingSink::default();

        block_on(assemble(&mut sink, &page, &FakeRasterizer, &content(80, 0)));

        assert!(sink.ops.contains(&Op::AddPage));
        for op in &sink.ops {
            if let Op::Text(text, y) = op {
                if text.starts_with("- tip") {
                    assert!(*y <= LIST_LIMIT + BODY_LINE, "{text} at {y}");
                }
            }
        }
    }

    #[test]
    fn chart_that_does_not_fit_starts_a_new_page_with_its_caption() {
        let page = FakePage(HashMap::from([
            ("trend-chart", vector("500x300")),
            ("comparison-chart", vector("500x300")),
            ("heatmap-chart", vector("500x300")),
        ]));
        let mut sink = RecordingSink::default();

        let report = block_on(assemble(&mut sink, &page, &FakeRasterizer, &content(0, 0)));
        assert_eq!(report.embedded.len(), 3);

        // Each 500x300 chart is 114mm tall at full width, so only one fits
        // below the filter block on the first page.
        let caption = sink.position_of("Comparison");
        assert_eq!(sink.ops[caption - 1], Op::AddPage);
        assert_eq!(sink.ops[caption], Op::Text("Comparison".into(), MARGIN));
        let pages = sink.ops.iter().filter(|op| **op == Op::AddPage).count();
        assert_eq!(pages, 1);
        for op in &sink.ops {
            if let Op::Image { y, height, .. } = op {
                assert!(y + height <= PAGE_HEIGHT - MARGIN + 1e-9);
            }
        }
    }
}
