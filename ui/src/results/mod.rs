//! Rendering of a relayed analysis: statistics, gallery, downloads, charts and
//! the vacancy table.

mod charts;
pub use charts::{
    comparison_chart_svg, heatmap_svg, trend_chart_svg, AnalyticsCharts, ChartSet, COMPARISON_CHART_ID,
    HEATMAP_CHART_ID, REPORT_CHART_IDS, TREND_CHART_ID,
};

mod downloads;
pub use downloads::ReportDownloads;

mod gallery;
pub use gallery::ImageGallery;

mod table;
pub use table::VacancyTable;

pub mod view_model;
pub use view_model::{DownloadSlot, GalleryItem, ReadyView, ResultsView};

use dioxus::prelude::*;

use crate::core::format::format_rubles;
use crate::core::submission::SubmittedAnalysis;
use crate::i18n;
use crate::report::ReportPanel;
use crate::t;

#[component]
pub fn AnalyticsResults(submitted: SubmittedAnalysis) -> Element {
    match ResultsView::build(&submitted) {
        ResultsView::Failed { message } => rsx! {
            section { class: "results-card results-card--error", role: "alert",
                h2 { {t!("results-error-title")} }
                p { "{message}" }
            }
        },
        ResultsView::Ready(view) => {
            let separator = i18n::thousands_separator();
            let ReadyView {
                stats,
                gallery,
                summary_pdf,
                full_pdf,
                rows,
                filters,
            } = *view;

            rsx! {
                section { class: "results-card results-analytics",
                    div { class: "results-card__header",
                        h2 { {t!("results-title")} }
                    }

                    div { class: "results-highlights",
                        div { class: "results-highlight",
                            span { class: "results-highlight__label", {t!("results-stat-count")} }
                            strong { class: "results-highlight__value", "{stats.count}" }
                        }
                        div { class: "results-highlight",
                            span { class: "results-highlight__label", {t!("results-stat-mean")} }
                            strong { class: "results-highlight__value", {format_rubles(stats.mean, &separator)} }
                        }
                        div { class: "results-highlight",
                            span { class: "results-highlight__label", {t!("results-stat-median")} }
                            strong { class: "results-highlight__value", {format_rubles(stats.median, &separator)} }
                        }
                    }

                    h3 { class: "results-card__subtitle", {t!("results-images")} }
                    ImageGallery { items: gallery }

                    ReportDownloads {
                        summary: summary_pdf,
                        full: full_pdf,
                        summary_label: t!("results-download-summary"),
                        full_label: t!("results-download-full"),
                        summary_missing: t!("results-summary-missing"),
                        full_missing: t!("results-full-missing"),
                    }

                    h3 { class: "results-card__subtitle", {t!("results-charts")} }
                    AnalyticsCharts { rows: rows.clone() }

                    h3 { class: "results-card__subtitle", {t!("results-vacancies")} }
                    VacancyTable { rows: rows.clone() }
                }

                ReportPanel { filters, rows }
            }
        }
    }
}
