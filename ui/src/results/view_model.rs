//! What the results view shows for one relayed analysis.

use api::{AnalysisResult, FilterSelection, ImageArtifact, SalaryStats, VacancyRow};
use base64::Engine;

use crate::core::format::format_kilobytes;
use crate::core::submission::SubmittedAnalysis;

/// 1×1 transparent PNG shown when image data cannot be decoded.
pub const PLACEHOLDER_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub const SUMMARY_FILENAME: &str = "analytics-report.pdf";
pub const FULL_FILENAME: &str = "analytics-report-full.pdf";

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// The backend reported a failure; nothing else is shown.
    Failed { message: String },
    Ready(Box<ReadyView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    pub stats: SalaryStats,
    pub gallery: Vec<GalleryItem>,
    pub summary_pdf: DownloadSlot,
    pub full_pdf: DownloadSlot,
    pub rows: Vec<VacancyRow>,
    pub filters: FilterSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSlot {
    Link { href: String, filename: &'static str },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub name: String,
    pub size_label: String,
    /// `data:` URL ready for an `img` element.
    pub src: String,
}

impl ResultsView {
    pub fn build(submitted: &SubmittedAnalysis) -> Self {
        let result: &AnalysisResult = &submitted.result;
        if let Some(message) = result.failure_message() {
            return Self::Failed {
                message: message.to_string(),
            };
        }

        Self::Ready(Box::new(ReadyView {
            stats: result.stats.clone(),
            gallery: result.images.iter().map(GalleryItem::from_artifact).collect(),
            summary_pdf: DownloadSlot::from_base64(&result.pdf_summary, SUMMARY_FILENAME),
            full_pdf: DownloadSlot::from_base64(&result.pdf_full, FULL_FILENAME),
            rows: result.rows.clone(),
            filters: submitted.filters.clone(),
        }))
    }
}

impl DownloadSlot {
    fn from_base64(data: &str, filename: &'static str) -> Self {
        let data = data.trim();
        if data.is_empty() {
            Self::Missing
        } else {
            Self::Link {
                href: format!("data:application/pdf;base64,{data}"),
                filename,
            }
        }
    }
}

impl GalleryItem {
    fn from_artifact(image: &ImageArtifact) -> Self {
        Self {
            name: image.name.clone(),
            size_label: format_kilobytes(image.size_bytes),
            src: png_data_url(&image.data),
        }
    }
}

/// Data URL for a base64 PNG, or the placeholder when the payload is not base64.
pub fn png_data_url(data: &str) -> String {
    let data = data.trim();
    let payload = match base64::engine::general_purpose::STANDARD.decode(data) {
        Ok(bytes) if !bytes.is_empty() => data,
        _ => PLACEHOLDER_PNG,
    };
    format!("data:image/png;base64,{payload}")
}
