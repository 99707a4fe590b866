//! Drawing surface the report is written onto.
//!
//! Coordinates are millimetres measured from the top-left corner of the page;
//! text is positioned by its baseline.

use super::capture::Bitmap;
use super::fonts::{self, Fonts};
use super::layout::MARGIN;
use super::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub font_size: f64,
    pub head_fill: [u8; 3],
    /// Fixed widths in millimetres; `None` shares the remaining width.
    pub column_widths: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
    pub style: TableStyle,
}

const CELL_PADDING: f64 = 1.5;
const GRID_GRAY: [u8; 3] = [200, 200, 200];

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    pub x: f64,
    pub width: f64,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub y: f64,
    pub height: f64,
    pub header: bool,
    pub cells: Vec<PlacedCell>,
}

/// Rows grouped by page. The first page is the one the table starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub pages: Vec<Vec<PlacedRow>>,
    pub end_y: f64,
}

pub fn column_widths(style: &TableStyle, columns: usize, total: f64) -> Vec<f64> {
    let fixed: f64 = style.column_widths.iter().take(columns).flatten().sum();
    let auto = (0..columns)
        .filter(|idx| style.column_widths.get(*idx).copied().flatten().is_none())
        .count();
    let share = if auto == 0 {
        0.0
    } else {
        ((total - fixed) / auto as f64).max(0.0)
    };
    (0..columns)
        .map(|idx| style.column_widths.get(idx).copied().flatten().unwrap_or(share))
        .collect()
}

/// Place a grid table starting at `start_y`, repeating the header on every page.
pub fn layout_table(
    spec: &TableSpec,
    start_y: f64,
    page: (f64, f64),
    fonts: &Fonts,
) -> TableLayout {
    let (page_width, page_height) = page;
    let columns = spec.head.len();
    let widths = column_widths(&spec.style, columns, page_width - 2.0 * MARGIN);
    let line_h = fonts.metrics(spec.style.font_size).line_h;
    let bottom = page_height - MARGIN;

    let place = |cells: &[String], y: f64, header: bool| -> PlacedRow {
        let mut x = MARGIN;
        let placed: Vec<PlacedCell> = widths
            .iter()
            .enumerate()
            .map(|(idx, width)| {
                let text = cells.get(idx).map(String::as_str).unwrap_or("");
                let cell = PlacedCell {
                    x,
                    width: *width,
                    lines: fonts.wrap(text, spec.style.font_size, width - 2.0 * CELL_PADDING),
                };
                x += width;
                cell
            })
            .collect();
        let max_lines = placed.iter().map(|c| c.lines.len()).max().unwrap_or(1);
        PlacedRow {
            y,
            height: max_lines as f64 * line_h + 2.0 * CELL_PADDING,
            header,
            cells: placed,
        }
    };

    let mut pages: Vec<Vec<PlacedRow>> = vec![Vec::new()];
    let mut y = start_y;

    let mut head = place(&spec.head, y, true);
    if y + head.height > bottom {
        pages.push(Vec::new());
        y = MARGIN;
        head.y = y;
    }
    y += head.height;
    if let Some(current) = pages.last_mut() {
        current.push(head);
    }

    for cells in &spec.body {
        let mut row = place(cells, y, false);
        if y + row.height > bottom {
            pages.push(Vec::new());
            let repeated = place(&spec.head, MARGIN, true);
            y = MARGIN + repeated.height;
            row.y = y;
            if let Some(current) = pages.last_mut() {
                current.push(repeated);
            }
        }
        y += row.height;
        if let Some(current) = pages.last_mut() {
            current.push(row);
        }
    }

    TableLayout { pages, end_y: y }
}

pub trait ReportSink {
    /// Page width and height in millimetres.
    fn page_size(&self) -> (f64, f64);
    fn add_page(&mut self);
    fn set_font_size(&mut self, size_pt: f64);
    fn font_size(&self) -> f64;
    fn text(&mut self, text: &str, x: f64, y: f64, align: Align);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, rgb: [u8; 3]);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, rgb: [u8; 3]);
    fn image(
        &mut self,
        bitmap: &Bitmap,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), ReportError>;

    fn split_to_width(&self, text: &str, max_width: f64) -> Vec<String> {
        fonts::shared().wrap(text, self.font_size(), max_width)
    }

    /// Draw a grid table and return the cursor just below it.
    fn table(&mut self, start_y: f64, spec: &TableSpec) -> f64 {
        let fonts = fonts::shared();
        let layout = layout_table(spec, start_y, self.page_size(), fonts);
        let metrics = fonts.metrics(spec.style.font_size);
        let previous_size = self.font_size();
        self.set_font_size(spec.style.font_size);

        for (page_idx, rows) in layout.pages.iter().enumerate() {
            if page_idx > 0 {
                self.add_page();
            }
            for row in rows {
                for cell in &row.cells {
                    if row.header {
                        self.fill_rect(cell.x, row.y, cell.width, row.height, spec.style.head_fill);
                    }
                    self.stroke_rect(cell.x, row.y, cell.width, row.height, GRID_GRAY);
                    for (line_idx, line) in cell.lines.iter().enumerate() {
                        let baseline =
                            row.y + CELL_PADDING + metrics.asc + line_idx as f64 * metrics.line_h;
                        self.text(line, cell.x + CELL_PADDING, baseline, Align::Left);
                    }
                }
            }
        }

        self.set_font_size(previous_size);
        layout.end_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::{PAGE_HEIGHT, PAGE_WIDTH};

    fn spec(rows: usize) -> TableSpec {
        TableSpec {
            head: vec!["Region".into(), "Average".into(), "Count".into()],
            body: (0..rows)
                .map(|i| vec![format!("Region {i}"), "100 000 ₽".into(), i.to_string()])
                .collect(),
            style: TableStyle {
                font_size: 9.0,
                head_fill: [41, 128, 185],
                column_widths: vec![None, Some(40.0), Some(20.0)],
            },
        }
    }

    #[test]
    fn widths_share_what_fixed_columns_leave() {
        let widths = column_widths(&spec(0).style, 3, 190.0);
        assert_eq!(widths, vec![130.0, 40.0, 20.0]);
    }

    #[test]
    fn short_table_stays_on_one_page() {
        let fonts = Fonts::load();
        let layout = layout_table(&spec(3), 50.0, (PAGE_WIDTH, PAGE_HEIGHT), &fonts);
        assert_eq!(layout.pages.len(), 1);
        assert_eq!(layout.pages[0].len(), 4);
        assert!(layout.pages[0][0].header);
        let last = layout.pages[0].last().unwrap();
        assert!((layout.end_y - (last.y + last.height)).abs() < 1e-9);
    }

    #[test]
    fn long_table_repeats_header_on_each_page() {
        let fonts = Fonts::load();
        let layout = layout_table(&spec(120), 200.0, (PAGE_WIDTH, PAGE_HEIGHT), &fonts);
        assert!(layout.pages.len() > 1);
        for page in &layout.pages {
            assert!(page[0].header);
            assert_eq!(page.iter().filter(|r| r.header).count(), 1);
            for row in page {
                assert!(row.y + row.height <= PAGE_HEIGHT - MARGIN + 1e-9);
            }
        }
        for page in &layout.pages[1..] {
            assert_eq!(page[0].y, MARGIN);
        }
        let body_rows: usize = layout.pages.iter().map(|p| p.len() - 1).sum();
        assert_eq!(body_rows, 120);
    }

    #[test]
    fn header_that_does_not_fit_moves_to_next_page() {
        let fonts = Fonts::load();
        let layout = layout_table(&spec(1), PAGE_HEIGHT - MARGIN - 1.0, (PAGE_WIDTH, PAGE_HEIGHT), &fonts);
        assert!(layout.pages[0].is_empty());
        assert_eq!(layout.pages[1][0].y, MARGIN);
    }
}
