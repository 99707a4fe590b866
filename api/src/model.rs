//! Wire types shared between the dashboard client and the analytics proxy.
//!
//! Field names on the wire follow the analytics backend; the Rust names follow
//! what the dashboard does with them.

use serde::{Deserialize, Serialize};

/// Default salary bounds applied when the dashboard mounts.
pub const DEFAULT_SALARY_RANGE: [u32; 2] = [50_000, 200_000];
/// Default experience bounds (years) applied when the dashboard mounts.
pub const DEFAULT_EXPERIENCE_RANGE: [u32; 2] = [0, 5];

/// The complete filter selection submitted for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(rename = "salaryRange")]
    pub salary_range: [u32; 2],
    #[serde(rename = "positions")]
    pub position: String,
    #[serde(rename = "experience")]
    pub experience_range: [u32; 2],
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            salary_range: DEFAULT_SALARY_RANGE,
            position: String::new(),
            experience_range: DEFAULT_EXPERIENCE_RANGE,
            regions: Vec::new(),
            companies: Vec::new(),
            sources: Vec::new(),
        }
    }
}

/// A vacancy data source offered by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: u32,
    pub name: String,
    pub url: String,
    #[serde(alias = "av")]
    pub availability: bool,
}

impl SourceRef {
    pub fn new(id: u32, name: &str, url: &str, availability: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            url: url.to_string(),
            availability,
        }
    }
}

/// Result of one analysis run as produced by the backend.
///
/// Every field is optional on the wire; the backend omits empty values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
    #[serde(rename = "pdf_data", deserialize_with = "null_as_default")]
    pub pdf_summary: String,
    #[serde(rename = "pdf_full_data", deserialize_with = "null_as_default")]
    pub pdf_full: String,
    pub images: Vec<ImageArtifact>,
    #[serde(rename = "items")]
    pub stats: SalaryStats,
    #[serde(rename = "tables")]
    pub rows: Vec<VacancyRow>,
}

impl AnalysisResult {
    /// A logical failure reported by the backend (`success: false` with a message).
    pub fn failure_message(&self) -> Option<&str> {
        if !self.success && !self.error.trim().is_empty() {
            Some(self.error.as_str())
        } else {
            None
        }
    }
}

/// The backend sends `null` for absent strings as often as it omits them.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageArtifact {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u32,
    /// Base64 PNG payload.
    pub data: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryStats {
    #[serde(rename = "total_number")]
    pub count: u32,
    #[serde(rename = "average")]
    pub mean: f64,
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VacancyRow {
    #[serde(rename = "name")]
    pub title: String,
    pub link: String,
    pub salary: u32,
    pub experience: u32,
    pub region: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn default_selection_serializes_to_backend_shape() {
        let body = serde_json::to_value(FilterSelection::default()).unwrap();
        let Value::Object(map) = &body else {
            panic!("request body must be an object");
        };

        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "companies",
                "experience",
                "positions",
                "regions",
                "salaryRange",
                "sources"
            ]
        );
        assert_eq!(
            body,
            json!({
                "salaryRange": [50000, 200000],
                "positions": "",
                "experience": [0, 5],
                "regions": [],
                "companies": [],
                "sources": [],
            })
        );
    }

    #[test]
    fn sources_serialize_as_records() {
        let mut filters = FilterSelection::default();
        filters
            .sources
            .push(SourceRef::new(1, "hh.ru", "https://hh.ru", true));
        let body = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            body["sources"],
            json!([{ "id": 1, "name": "hh.ru", "url": "https://hh.ru", "availability": true }])
        );
    }

    #[test]
    fn source_accepts_short_availability_key() {
        let source: SourceRef =
            serde_json::from_value(json!({ "id": 3, "name": "superjob.ru", "url": "", "av": false }))
                .unwrap();
        assert!(!source.availability);
    }

    #[test]
    fn sparse_backend_response_decodes() {
        let result: AnalysisResult =
            serde_json::from_value(json!({ "success": false, "error": "no data" })).unwrap();
        assert_eq!(result.failure_message(), Some("no data"));
        assert!(result.rows.is_empty());
        assert_eq!(result.stats, SalaryStats::default());
    }

    #[test]
    fn full_backend_response_maps_fields() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "success": true,
            "pdf_data": "",
            "pdf_full_data": "JVBERi0x",
            "images": [{ "name": "salary.png", "type": 1, "data": "iVBOR", "size": 2048 }],
            "items": { "total_number": 12, "average": 165000.5, "median": 160000 },
            "tables": [{ "name": "Rust Developer", "salary": 220000, "link": "https://hh.ru/vacancy/1", "experience": 4, "region": "Москва" }]
        }))
        .unwrap();

        assert!(result.failure_message().is_none());
        assert_eq!(result.pdf_full, "JVBERi0x");
        assert_eq!(result.images[0].kind, 1);
        assert_eq!(result.images[0].size_bytes, 2048);
        assert_eq!(result.stats.count, 12);
        assert_eq!(result.rows[0].title, "Rust Developer");
        assert_eq!(result.rows[0].region, "Москва");
    }

    #[test]
    fn null_artifacts_decode_as_missing() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "success": true,
            "error": null,
            "pdf_data": null,
            "pdf_full_data": "JVBERi0x"
        }))
        .unwrap();
        assert!(result.pdf_summary.is_empty());
        assert!(result.error.is_empty());
    }

    #[test]
    fn success_false_without_message_is_not_a_failure() {
        let result = AnalysisResult::default();
        assert!(result.failure_message().is_none());
    }
}
