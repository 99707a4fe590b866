//! Localized text and tables that make up the client report.

use api::{FilterSelection, VacancyRow};

use super::sink::{TableSpec, TableStyle};
use crate::core::format::{format_amount, format_rubles};
use crate::core::stats::{notable_regions, region_breakdown};
use crate::i18n;
use crate::results::{COMPARISON_CHART_ID, HEATMAP_CHART_ID, TREND_CHART_ID};
use crate::t;

/// Relative deviation from the overall average that earns a recommendation.
const NOTABLE_DEVIATION: f64 = 0.1;

const REGION_HEAD_FILL: [u8; 3] = [41, 128, 185];
const DETAIL_HEAD_FILL: [u8; 3] = [39, 174, 96];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSection {
    pub id: &'static str,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportContent {
    pub title: String,
    pub filters_heading: String,
    pub filter_lines: Vec<String>,
    pub recommendations_heading: String,
    pub recommendations: Vec<String>,
    pub regions_heading: String,
    pub region_table: Option<TableSpec>,
    pub rows_heading: String,
    pub row_table: Option<TableSpec>,
    pub charts: Vec<ChartSection>,
}

fn or_all(values: &[String]) -> String {
    if values.is_empty() {
        t!("report-filter-all")
    } else {
        values.join(", ")
    }
}

impl ReportContent {
    pub fn build(filters: &FilterSelection, rows: &[VacancyRow]) -> Self {
        let separator = i18n::thousands_separator();
        let [salary_min, salary_max] = filters.salary_range;
        let [exp_min, exp_max] = filters.experience_range;
        let position = if filters.position.is_empty() {
            t!("report-filter-all")
        } else {
            filters.position.clone()
        };
        let sources: Vec<String> = filters.sources.iter().map(|s| s.name.clone()).collect();

        let filter_lines = vec![
            t!(
                "report-filter-salary",
                min = format_amount(salary_min as f64, &separator),
                max = format_amount(salary_max as f64, &separator)
            ),
            t!("report-filter-position", value = position),
            t!("report-filter-experience", min = exp_min, max = exp_max),
            t!("report-filter-regions", value = or_all(&filters.regions)),
            t!("report-filter-companies", value = or_all(&filters.companies)),
            t!("report-filter-sources", value = or_all(&sources)),
        ];

        let recommendations = notable_regions(rows, NOTABLE_DEVIATION)
            .into_iter()
            .map(|(region, deviation)| {
                let percent = (deviation.abs() * 100.0).round() as i64;
                if deviation > 0.0 {
                    t!("report-recommendation-above", region = region.key, percent = percent)
                } else {
                    t!("report-recommendation-below", region = region.key, percent = percent)
                }
            })
            .collect();

        let regions = region_breakdown(rows);
        let region_table = (!regions.is_empty()).then(|| TableSpec {
            head: vec![
                t!("report-col-region"),
                t!("report-col-average"),
                t!("report-col-median"),
                t!("report-col-count"),
            ],
            body: regions
                .iter()
                .map(|r| {
                    vec![
                        r.key.clone(),
                        format_rubles(r.mean, &separator),
                        format_rubles(r.median, &separator),
                        r.count.to_string(),
                    ]
                })
                .collect(),
            style: TableStyle {
                font_size: 9.0,
                head_fill: REGION_HEAD_FILL,
                column_widths: vec![None; 4],
            },
        });

        let row_table = (!rows.is_empty()).then(|| TableSpec {
            head: vec![
                t!("report-col-position"),
                t!("report-col-salary"),
                t!("report-col-region"),
                t!("report-col-experience"),
            ],
            body: rows
                .iter()
                .map(|row| {
                    vec![
                        row.title.clone(),
                        format_rubles(row.salary as f64, &separator),
                        row.region.clone(),
                        row.experience.to_string(),
                    ]
                })
                .collect(),
            style: TableStyle {
                font_size: 8.0,
                head_fill: DETAIL_HEAD_FILL,
                column_widths: vec![None, Some(30.0), None, Some(20.0)],
            },
        });

        Self {
            title: t!("report-title"),
            filters_heading: t!("report-filters-heading"),
            filter_lines,
            recommendations_heading: t!("report-recommendations-heading"),
            recommendations,
            regions_heading: t!("report-regions-heading"),
            region_table,
            rows_heading: t!("report-rows-heading"),
            row_table,
            charts: vec![
                ChartSection {
                    id: TREND_CHART_ID,
                    caption: t!("report-chart-trend"),
                },
                ChartSection {
                    id: COMPARISON_CHART_ID,
                    caption: t!("report-chart-comparison"),
                },
                ChartSection {
                    id: HEATMAP_CHART_ID,
                    caption: t!("report-chart-heatmap"),
                },
            ],
        }
    }
}
