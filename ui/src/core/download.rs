//! Delivering a generated report file to the user.
//!
//! In the browser the PDF is handed over as a one-shot anchor download. On
//! native targets it is written to `<data dir>/reports/`, and the path is
//! shown in the report panel's status line.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// Deliver `bytes` as `filename`. Returns the saved path on native targets,
/// `None` in the browser where the download is handled by the user agent.
pub fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        browser_download(filename, mime, &bytes)?;
        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let path = save_report(&export_dir()?, filename, &bytes)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_download(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
        .map_err(|_| "could not wrap the report in a blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "could not create a download link".to_string())?;

    let result = (|| {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("document unavailable")?;
        let body = document.body().ok_or("document has no body")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "could not create a download link")?
            .dyn_into()
            .map_err(|_| "download link is not an anchor")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();
        body.append_child(&anchor)
            .map_err(|_| "could not attach the download link")?;
        anchor.click();
        anchor.remove();
        Ok::<(), &str>(())
    })();

    Url::revoke_object_url(&url).ok();
    result.map_err(str::to_string)
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Vacancyscope", "Vacancyscope")
        .ok_or("could not determine the reports directory")?;
    Ok(dirs.data_dir().join("reports"))
}

/// Write a report into `dir`, creating it when needed.
#[cfg(not(target_arch = "wasm32"))]
fn save_report(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|err| format!("could not create {}: {err}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes).map_err(|err| format!("could not write {}: {err}", path.display()))?;
    Ok(path)
}

/// UTC timestamp used in report file names, e.g. `20260118_141503`.
pub fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "report".into())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn report_is_written_into_a_fresh_directory() {
        let dir = std::env::temp_dir()
            .join(format!("vacancyscope-reports-{}", uuid::Uuid::new_v4()))
            .join("reports");
        let path = save_report(&dir, "vacancy-report.pdf", b"%PDF-1.3").unwrap();

        assert_eq!(path, dir.join("vacancy-report.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3");
        std::fs::remove_dir_all(dir.parent().unwrap()).ok();
    }

    #[test]
    fn timestamp_slug_is_file_name_safe() {
        let slug = timestamp_slug();
        assert_eq!(slug.len(), 15);
        assert!(slug.chars().all(|c| c.is_ascii_digit() || c == '_'));
        assert_eq!(slug.as_bytes()[8], b'_');
    }
}
