//! Client-side PDF report: text blocks, tables and snapshots of the charts
//! currently on screen.

pub mod assemble;
pub mod capture;
pub mod content;
pub mod fonts;
pub mod layout;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;
pub mod pdf;
pub mod sink;
#[cfg(target_arch = "wasm32")]
pub mod web;

use api::{FilterSelection, VacancyRow};
use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;
use thiserror::Error;

use crate::core::download::{download_bytes, timestamp_slug};
use crate::t;
use assemble::assemble;
use content::ReportContent;
use pdf::PdfSink;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("chart capture failed: {0}")]
    Capture(String),
    #[error("chart rasterization failed: {0}")]
    Rasterize(String),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("saving the report failed: {0}")]
    Download(String),
}

/// Result of a finished report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    /// Saved file path on native targets; `None` when the browser took the download.
    pub saved: Option<String>,
    /// Chart regions that were missing or could not be captured.
    pub charts_left_out: usize,
}

/// Build the report for `rows`, capture the charts and hand the PDF to the user.
pub async fn generate_report(
    filters: FilterSelection,
    rows: Vec<VacancyRow>,
) -> Result<ReportOutcome, ReportError> {
    let content = ReportContent::build(&filters, &rows);
    let mut sink = PdfSink::new(&content.title)?;

    #[cfg(target_arch = "wasm32")]
    let summary = {
        let page = web::DomPage::current()?;
        assemble(&mut sink, &page, &web::CanvasRasterizer, &content).await
    };
    #[cfg(not(target_arch = "wasm32"))]
    let summary = {
        let page = native::StaticPage::from_rows(&rows);
        assemble(&mut sink, &page, &native::ResvgRasterizer::new(), &content).await
    };

    for (id, err) in &summary.failed {
        error!(id = *id, %err, "chart left out of the report");
    }

    let bytes = sink.finish()?;
    let filename = format!("vacancy-report-{}.pdf", timestamp_slug());
    let saved =
        download_bytes(&filename, "application/pdf", bytes).map_err(ReportError::Download)?;
    info!(
        embedded = summary.embedded.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "report delivered"
    );

    Ok(ReportOutcome {
        saved,
        charts_left_out: summary.skipped.len() + summary.failed.len(),
    })
}

#[derive(Clone, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

fn done_message(outcome: &ReportOutcome) -> String {
    let mut message = match &outcome.saved {
        Some(path) => t!("report-panel-saved", path = path.clone()),
        None => t!("report-panel-done"),
    };
    if outcome.charts_left_out > 0 {
        message.push(' ');
        message.push_str(&t!(
            "report-panel-charts-skipped",
            count = outcome.charts_left_out
        ));
    }
    message
}

#[component]
pub fn ReportPanel(filters: FilterSelection, rows: Vec<VacancyRow>) -> Element {
    let mut status = use_signal(|| ExportStatus::Idle);
    let mut busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some((
            "results-card__meta".to_string(),
            format!("{}…", t!("report-panel-working")),
        )),
        ExportStatus::Done(message) => Some((
            "results-card__meta results-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "results-card__meta results-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let generate = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        status.set(ExportStatus::Working);

        let filters = filters.clone();
        let rows = rows.clone();
        spawn(async move {
            match generate_report(filters, rows).await {
                Ok(outcome) => status.set(ExportStatus::Done(done_message(&outcome))),
                Err(err) => {
                    warn!(%err, "report generation failed");
                    status.set(ExportStatus::Error(t!(
                        "report-panel-error",
                        message = err.to_string()
                    )));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        section { class: "results-card results-export",
            div { class: "results-card__header",
                h2 { {t!("report-panel-title")} }
            }
            p { {t!("report-panel-intro")} }

            div { class: "results-export__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: generate,
                    {t!("report-panel-button")}
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", role: "status", "{message}" }
            }
        }
    }
}
