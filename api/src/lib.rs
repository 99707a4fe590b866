//! Server functions and wire types for the Vacancyscope dashboard.

use dioxus::prelude::server_fn::codec::Json;
use dioxus::prelude::*;

pub mod model;
pub use model::{
    AnalysisResult, FilterSelection, ImageArtifact, SalaryStats, SourceRef, VacancyRow,
};

#[cfg(feature = "server")]
pub mod proxy;

/// Forward a filter selection to the analytics backend (`POST /api/analytics`).
///
/// Arguments travel as a JSON body; URL encoding drops empty lists.
/// Backend failures are normalized into a single error message; the JSON body
/// of a successful call is relayed as-is.
#[server(endpoint = "analytics", input = Json)]
pub async fn run_analysis(filters: FilterSelection) -> Result<AnalysisResult, ServerFnError> {
    use dioxus::logger::tracing::error;

    let proxy = proxy::AnalyticsProxy::shared().map_err(|err| {
        error!(%err, "analytics proxy misconfigured");
        ServerFnError::new(err.to_string())
    })?;

    proxy.forward(&filters).await.map_err(|err| {
        error!(%err, "analytics API error");
        ServerFnError::new(err.to_string())
    })
}
