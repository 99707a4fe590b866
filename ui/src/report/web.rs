//! Chart capture from the live page: SVG charts are serialized, anything else
//! is cloned off-screen and wrapped in a `foreignObject`, then drawn onto a
//! canvas.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::LocalBoxFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, Document, Element, HtmlCanvasElement,
    HtmlElement, HtmlImageElement, Url, XmlSerializer,
};

use super::capture::{Bitmap, ChartNode, ChartPage, Rasterizer};
use super::ReportError;

const SCALE: f64 = 2.0;
const PNG_PREFIX: &str = "data:image/png;base64,";

fn rasterize_err(context: &'static str) -> impl Fn(JsValue) -> ReportError {
    move |err| ReportError::Rasterize(format!("{context}: {err:?}"))
}

fn capture_err(context: &'static str) -> impl Fn(JsValue) -> ReportError {
    move |err| ReportError::Capture(format!("{context}: {err:?}"))
}

fn document() -> Result<Document, ReportError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ReportError::Capture("document unavailable".into()))
}

/// The mounted document.
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn current() -> Result<Self, ReportError> {
        Ok(Self {
            document: document()?,
        })
    }
}

impl ChartPage for DomPage {
    fn locate(&self, id: &str) -> Result<Option<ChartNode>, ReportError> {
        let Some(element) = self.document.get_element_by_id(id) else {
            return Ok(None);
        };
        if element.tag_name().eq_ignore_ascii_case("svg") {
            let markup = XmlSerializer::new()
                .and_then(|s| s.serialize_to_string(&element))
                .map_err(capture_err("serialize svg"))?;
            Ok(Some(ChartNode::Vector { markup }))
        } else {
            Ok(Some(ChartNode::Element {
                element_id: id.to_string(),
            }))
        }
    }
}

/// Object URL revoked on drop.
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_svg(markup: &str) -> Result<Self, ReportError> {
        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str(markup));
        let opts = BlobPropertyBag::new();
        opts.set_type("image/svg+xml;charset=utf-8");
        let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
            .map_err(rasterize_err("blob"))?;
        Url::create_object_url_with_blob(&blob)
            .map(Self)
            .map_err(rasterize_err("object url"))
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.0);
    }
}

/// Off-screen clone removed from the document on drop.
struct Detached(Element);

impl Drop for Detached {
    fn drop(&mut self) {
        self.0.remove();
    }
}

async fn svg_to_png(markup: &str) -> Result<Bitmap, ReportError> {
    let document = document()?;
    let url = ObjectUrl::for_svg(markup)?;

    let image = HtmlImageElement::new().map_err(rasterize_err("image"))?;
    image.set_src(&url.0);
    JsFuture::from(image.decode())
        .await
        .map_err(rasterize_err("decode"))?;

    let width = (image.natural_width() as f64 * SCALE).round() as u32;
    let height = (image.natural_height() as f64 * SCALE).round() as u32;
    if width == 0 || height == 0 {
        return Err(ReportError::Rasterize("chart has no size".into()));
    }

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(rasterize_err("canvas"))?
        .dyn_into()
        .map_err(|_| ReportError::Rasterize("canvas cast failed".into()))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(rasterize_err("context"))?
        .ok_or_else(|| ReportError::Rasterize("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| ReportError::Rasterize("context cast failed".into()))?;

    context.set_fill_style_str("#ffffff");
    context.fill_rect(0.0, 0.0, width as f64, height as f64);
    context
        .draw_image_with_html_image_element_and_dw_and_dh(
            &image,
            0.0,
            0.0,
            width as f64,
            height as f64,
        )
        .map_err(rasterize_err("draw"))?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(rasterize_err("encode"))?;
    let encoded = data_url
        .strip_prefix(PNG_PREFIX)
        .ok_or_else(|| ReportError::Rasterize("canvas did not produce a PNG".into()))?;
    let png = STANDARD
        .decode(encoded)
        .map_err(|err| ReportError::Rasterize(err.to_string()))?;

    Ok(Bitmap { width, height, png })
}

/// Serialize an off-screen deep clone of `element_id` inside an SVG wrapper.
fn element_markup(element_id: &str) -> Result<String, ReportError> {
    let document = document()?;
    let original = document
        .get_element_by_id(element_id)
        .ok_or_else(|| ReportError::Capture(format!("{element_id} is not mounted")))?;
    let rect = original.get_bounding_client_rect();
    let (width, height) = (rect.width().ceil(), rect.height().ceil());

    let clone: HtmlElement = original
        .clone_node_with_deep(true)
        .map_err(capture_err("clone"))?
        .dyn_into()
        .map_err(|_| ReportError::Capture(format!("{element_id} is not an HTML element")))?;
    clone.remove_attribute("id").map_err(capture_err("clone id"))?;
    let style = clone.style();
    for (name, value) in [
        ("position", "fixed".to_string()),
        ("left", "-10000px".to_string()),
        ("top", "0".to_string()),
        ("width", format!("{width}px")),
    ] {
        style
            .set_property(name, &value)
            .map_err(capture_err("clone style"))?;
    }

    let body = document
        .body()
        .ok_or_else(|| ReportError::Capture("missing body".into()))?;
    body.append_child(&clone).map_err(capture_err("attach clone"))?;
    let clone = Detached(clone.into());

    let inner = XmlSerializer::new()
        .and_then(|s| s.serialize_to_string(&clone.0))
        .map_err(capture_err("serialize"))?;
    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><foreignObject width="100%" height="100%"><div xmlns="http://www.w3.org/1999/xhtml">{inner}</div></foreignObject></svg>"#
    ))
}

#[derive(Default)]
pub struct CanvasRasterizer;

impl Rasterizer for CanvasRasterizer {
    fn rasterize<'a>(
        &'a self,
        node: &'a ChartNode,
    ) -> LocalBoxFuture<'a, Result<Bitmap, ReportError>> {
        Box::pin(async move {
            match node {
                ChartNode::Vector { markup } => svg_to_png(markup).await,
                ChartNode::Element { element_id } => {
                    let markup = element_markup(element_id)?;
                    svg_to_png(&markup).await
                }
            }
        })
    }
}
