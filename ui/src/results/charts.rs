//! Inline SVG charts built from the vacancy rows.
//!
//! Each chart is a self-contained `<svg>` document carrying its own id, so the
//! report can find it in the page and serialize it as-is.

use std::fmt::Write;

use dioxus::prelude::*;

use crate::core::stats::{experience_breakdown, region_breakdown, title_breakdown, GroupSummary};
use crate::t;
use api::VacancyRow;

pub const TREND_CHART_ID: &str = "trend-chart";
pub const COMPARISON_CHART_ID: &str = "comparison-chart";
pub const HEATMAP_CHART_ID: &str = "heatmap-chart";

/// Chart regions captured by the report, in document order.
pub const REPORT_CHART_IDS: [&str; 3] = [TREND_CHART_ID, COMPARISON_CHART_ID, HEATMAP_CHART_ID];

const MEDIAN_COLOR: &str = "#36a2eb";
const MEAN_COLOR: &str = "#ff6384";
const BAR_COLOR: &str = "rgba(75,192,192,0.6)";
const FONT: &str = "font-family='Helvetica, Arial, sans-serif'";

struct Frame {
    width: f64,
    height: f64,
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Frame {
    fn plot_bottom(&self) -> f64 {
        self.height - self.bottom
    }

    fn plot_right(&self) -> f64 {
        self.width - self.right
    }

    /// Map a value in `[lo, hi]` onto the vertical plot range.
    fn y(&self, value: f64, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return self.plot_bottom();
        }
        let t = (value - lo) / (hi - lo);
        self.plot_bottom() - t * (self.plot_bottom() - self.top)
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Short axis label: `150000` → `150k`.
pub fn compact_amount(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{}k", (value / 1_000.0).round() as i64)
    } else {
        format!("{}", value.round() as i64)
    }
}

fn open_svg(out: &mut String, id: &str, frame: &Frame) {
    let _ = write!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' id='{id}' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>\
         <rect width='{w}' height='{h}' fill='#ffffff'/>",
        w = frame.width,
        h = frame.height,
    );
}

fn y_axis(out: &mut String, frame: &Frame, lo: f64, hi: f64) {
    const TICKS: usize = 5;
    let _ = write!(
        out,
        "<line x1='{x}' y1='{top}' x2='{x}' y2='{bottom}' stroke='#9ca3af'/>",
        x = frame.left,
        top = frame.top,
        bottom = frame.plot_bottom(),
    );
    for i in 0..=TICKS {
        let value = lo + (hi - lo) * i as f64 / TICKS as f64;
        let y = frame.y(value, lo, hi);
        let _ = write!(
            out,
            "<line x1='{x0}' y1='{y:.1}' x2='{x1}' y2='{y:.1}' stroke='#e5e7eb'/>\
             <text x='{tx}' y='{ty:.1}' text-anchor='end' font-size='10' fill='#4b5563' {FONT}>{label}</text>",
            x0 = frame.left,
            x1 = frame.plot_right(),
            tx = frame.left - 6.0,
            ty = y + 3.0,
            label = compact_amount(value),
        );
    }
}

fn x_axis(out: &mut String, frame: &Frame) {
    let _ = write!(
        out,
        "<line x1='{x0}' y1='{y}' x2='{x1}' y2='{y}' stroke='#9ca3af'/>",
        x0 = frame.left,
        x1 = frame.plot_right(),
        y = frame.plot_bottom(),
    );
}

/// Mean and median salary by years of experience.
pub fn trend_chart_svg(
    groups: &[GroupSummary<u32>],
    median_label: &str,
    mean_label: &str,
    years_label: &str,
) -> Option<String> {
    if groups.is_empty() {
        return None;
    }

    let frame = Frame {
        width: 500.0,
        height: 300.0,
        top: 20.0,
        right: 30.0,
        bottom: 40.0,
        left: 50.0,
    };
    let lo = groups
        .iter()
        .map(|g| g.mean.min(g.median))
        .fold(f64::INFINITY, f64::min)
        * 0.9;
    let hi = groups
        .iter()
        .map(|g| g.mean.max(g.median))
        .fold(f64::NEG_INFINITY, f64::max)
        * 1.1;

    let span = frame.plot_right() - frame.left;
    let x_at = |idx: usize| {
        if groups.len() == 1 {
            frame.left + span / 2.0
        } else {
            frame.left + span * idx as f64 / (groups.len() - 1) as f64
        }
    };

    let mut out = String::new();
    open_svg(&mut out, TREND_CHART_ID, &frame);
    y_axis(&mut out, &frame, lo, hi);
    x_axis(&mut out, &frame);

    for (idx, group) in groups.iter().enumerate() {
        let _ = write!(
            out,
            "<text x='{x:.1}' y='{y}' text-anchor='middle' font-size='10' fill='#4b5563' {FONT}>{years}</text>",
            x = x_at(idx),
            y = frame.plot_bottom() + 14.0,
            years = group.key,
        );
    }
    let _ = write!(
        out,
        "<text x='{x:.1}' y='{y}' text-anchor='middle' font-size='10' fill='#6b7280' {FONT}>{label}</text>",
        x = frame.left + span / 2.0,
        y = frame.height - 6.0,
        label = escape_xml(years_label),
    );

    for (color, use_mean) in [(MEDIAN_COLOR, false), (MEAN_COLOR, true)] {
        let points: Vec<(f64, f64)> = groups
            .iter()
            .enumerate()
            .map(|(idx, g)| {
                let value = if use_mean { g.mean } else { g.median };
                (x_at(idx), frame.y(value, lo, hi))
            })
            .collect();
        let path: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect();
        let _ = write!(
            out,
            "<polyline fill='none' stroke='{color}' stroke-width='2' points='{}'/>",
            path.join(" ")
        );
        for (cx, cy) in points {
            let _ = write!(out, "<circle cx='{cx:.1}' cy='{cy:.1}' r='3' fill='{color}'/>");
        }
    }

    for (row, (color, label)) in [(MEDIAN_COLOR, median_label), (MEAN_COLOR, mean_label)]
        .into_iter()
        .enumerate()
    {
        let y = frame.top + row as f64 * 14.0;
        let _ = write!(
            out,
            "<rect x='{x}' y='{ry}' width='10' height='10' fill='{color}'/>\
             <text x='{tx}' y='{ty}' font-size='10' fill='#111827' {FONT}>{label}</text>",
            x = frame.plot_right() - 90.0,
            ry = y - 8.0,
            tx = frame.plot_right() - 76.0,
            ty = y + 1.0,
            label = escape_xml(label),
        );
    }

    out.push_str("</svg>");
    Some(out)
}

/// Average salary per position title.
pub fn comparison_chart_svg(groups: &[GroupSummary<String>]) -> Option<String> {
    if groups.is_empty() {
        return None;
    }

    let frame = Frame {
        width: 500.0,
        height: 300.0,
        top: 20.0,
        right: 20.0,
        bottom: 60.0,
        left: 60.0,
    };
    let hi = groups.iter().map(|g| g.mean).fold(0.0, f64::max).max(1.0);
    let band = (frame.plot_right() - frame.left) / groups.len() as f64;
    let bar = band * 0.8;

    let mut out = String::new();
    open_svg(&mut out, COMPARISON_CHART_ID, &frame);
    y_axis(&mut out, &frame, 0.0, hi);
    x_axis(&mut out, &frame);

    for (idx, group) in groups.iter().enumerate() {
        let x = frame.left + band * idx as f64 + (band - bar) / 2.0;
        let y = frame.y(group.mean, 0.0, hi);
        let label_x = x + bar / 2.0;
        let label_y = frame.plot_bottom() + 12.0;
        let _ = write!(
            out,
            "<rect x='{x:.1}' y='{y:.1}' width='{bar:.1}' height='{h:.1}' fill='{BAR_COLOR}'/>\
             <text x='{label_x:.1}' y='{label_y:.1}' font-size='10' fill='#4b5563' {FONT} \
             transform='rotate(15 {label_x:.1} {label_y:.1})'>{label}</text>",
            h = frame.plot_bottom() - y,
            label = escape_xml(&group.key),
        );
    }

    out.push_str("</svg>");
    Some(out)
}

/// Fill color for a heatmap cell; `ratio` is the region average over the maximum.
pub fn heat_color(ratio: f64) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let red = (255.0 * ratio).round() as u8;
    let green = (255.0 * (1.0 - ratio)).round() as u8;
    format!("rgb({red}, {green}, 50)")
}

/// Regions as a grid of cells colored by average salary.
pub fn heatmap_svg(regions: &[GroupSummary<String>], separator: &str) -> Option<String> {
    if regions.is_empty() {
        return None;
    }

    const WIDTH: f64 = 1000.0;
    const CELL: f64 = 150.0;
    let cols = (WIDTH / CELL).floor() as usize;
    let rows = regions.len().div_ceil(cols);
    let frame = Frame {
        width: WIDTH,
        height: rows as f64 * CELL,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };
    let max = regions.iter().map(|r| r.mean).fold(0.0, f64::max).max(1.0);

    let mut out = String::new();
    open_svg(&mut out, HEATMAP_CHART_ID, &frame);
    for (idx, region) in regions.iter().enumerate() {
        let x = (idx % cols) as f64 * CELL;
        let y = (idx / cols) as f64 * CELL;
        let inner = CELL - 10.0;
        let _ = write!(
            out,
            "<g transform='translate({x},{y})'>\
             <rect width='{inner}' height='{inner}' rx='10' ry='10' fill='{color}'/>\
             <text x='{mid}' y='20' text-anchor='middle' font-size='12' font-weight='bold' fill='#ffffff' {FONT}>{name}</text>\
             <text x='{mid}' y='40' text-anchor='middle' font-size='11' fill='#ffffff' {FONT}>{amount} ₽</text>\
             <text x='{mid}' y='58' text-anchor='middle' font-size='10' fill='#ffffff' {FONT}>n = {count}</text>\
             </g>",
            color = heat_color(region.mean / max),
            mid = inner / 2.0,
            name = escape_xml(&region.key),
            amount = escape_xml(&crate::core::format::format_amount(region.mean, separator)),
            count = region.count,
        );
    }
    out.push_str("</svg>");
    Some(out)
}

/// Markup of every chart for one result set; `None` where there is nothing to draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSet {
    pub trend: Option<String>,
    pub comparison: Option<String>,
    pub heatmap: Option<String>,
}

impl ChartSet {
    pub fn build(rows: &[VacancyRow]) -> Self {
        Self {
            trend: trend_chart_svg(
                &experience_breakdown(rows),
                &t!("charts-legend-median"),
                &t!("charts-legend-mean"),
                &t!("charts-axis-years"),
            ),
            comparison: comparison_chart_svg(&title_breakdown(rows)),
            heatmap: heatmap_svg(&region_breakdown(rows), &crate::i18n::thousands_separator()),
        }
    }

    /// Charts keyed by their element id, in report order.
    pub fn into_entries(self) -> [(&'static str, Option<String>); 3] {
        [
            (TREND_CHART_ID, self.trend),
            (COMPARISON_CHART_ID, self.comparison),
            (HEATMAP_CHART_ID, self.heatmap),
        ]
    }
}

/// Chart cards for the results view.
#[component]
pub fn AnalyticsCharts(rows: Vec<VacancyRow>) -> Element {
    let ChartSet {
        trend,
        comparison,
        heatmap,
    } = ChartSet::build(&rows);

    if trend.is_none() && comparison.is_none() && heatmap.is_none() {
        return rsx! {
            p { class: "results-card__placeholder", {t!("charts-empty")} }
        };
    }

    rsx! {
        div { class: "results-charts",
            if let Some(svg) = trend {
                figure { class: "results-chart",
                    figcaption { {t!("charts-trend-title")} }
                    div { class: "results-chart__canvas", dangerous_inner_html: "{svg}" }
                }
            }
            if let Some(svg) = comparison {
                figure { class: "results-chart",
                    figcaption { {t!("charts-comparison-title")} }
                    div { class: "results-chart__canvas", dangerous_inner_html: "{svg}" }
                }
            }
            if let Some(svg) = heatmap {
                figure { class: "results-chart results-chart--wide",
                    figcaption { {t!("charts-heatmap-title")} }
                    div { class: "results-chart__canvas", dangerous_inner_html: "{svg}" }
                }
            }
        }
    }
}
