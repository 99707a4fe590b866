//! [`ReportSink`] backed by `printpdf`, A4 portrait.

use std::io::Cursor as ByteCursor;

use dioxus::logger::tracing::warn;
use printpdf::path::PaintMode;
use printpdf::image_crate::{self, DynamicImage};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Rect, Rgb,
};

use super::capture::Bitmap;
use super::fonts;
use super::layout::{IMAGE_DPI, PAGE_HEIGHT, PAGE_WIDTH};
use super::sink::{Align, ReportSink};
use super::ReportError;

const LAYER: &str = "Layer 1";
const TEXT_BLACK: [u8; 3] = [0, 0, 0];

fn rgb(color: [u8; 3]) -> Color {
    let [r, g, b] = color;
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

/// Coordinates passed in are top-left based; PDF's origin is bottom-left.
pub struct PdfSink {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_size: f64,
}

impl PdfSink {
    pub fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), LAYER);
        let layer = doc.get_page(page).get_layer(layer);

        let external = fonts::shared()
            .pdf_font_bytes()
            .and_then(|bytes| match doc.add_external_font(ByteCursor::new(bytes)) {
                Ok(font) => Some(font),
                Err(err) => {
                    warn!(%err, "could not embed report font");
                    None
                }
            });
        let font = match external {
            Some(font) => font,
            None => {
                warn!("falling back to builtin Helvetica; non-Latin text will be dropped");
                doc.add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(|err| ReportError::Pdf(err.to_string()))?
            }
        };

        Ok(Self {
            doc,
            layer,
            font,
            font_size: 10.0,
        })
    }

    pub fn finish(self) -> Result<Vec<u8>, ReportError> {
        self.doc
            .save_to_bytes()
            .map_err(|err| ReportError::Pdf(err.to_string()))
    }

    fn flip(&self, y: f64) -> Mm {
        Mm((PAGE_HEIGHT - y) as f32)
    }

    fn rect(&self, x: f64, y: f64, width: f64, height: f64, mode: PaintMode) -> Rect {
        Rect::new(
            Mm(x as f32),
            self.flip(y + height),
            Mm((x + width) as f32),
            self.flip(y),
        )
        .with_mode(mode)
    }
}

impl ReportSink for PdfSink {
    fn page_size(&self) -> (f64, f64) {
        (PAGE_WIDTH, PAGE_HEIGHT)
    }

    fn add_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    fn set_font_size(&mut self, size_pt: f64) {
        self.font_size = size_pt;
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: Align) {
        let x = match align {
            Align::Left => x,
            Align::Center => x - fonts::shared().text_width(text, self.font_size) / 2.0,
        };
        self.layer.set_fill_color(rgb(TEXT_BLACK));
        self.layer.use_text(
            text,
            self.font_size as f32,
            Mm(x as f32),
            self.flip(y),
            &self.font,
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: [u8; 3]) {
        self.layer.set_fill_color(rgb(color));
        self.layer
            .add_rect(self.rect(x, y, width, height, PaintMode::Fill));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: [u8; 3]) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(0.3);
        self.layer
            .add_rect(self.rect(x, y, width, height, PaintMode::Stroke));
    }

    fn image(
        &mut self,
        bitmap: &Bitmap,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), ReportError> {
        let decoded = image_crate::load_from_memory(&bitmap.png)
            .map_err(|err| ReportError::Pdf(err.to_string()))?;
        // PDF images carry no alpha; charts are rendered on white anyway.
        let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(decoded.to_rgb8()));

        let native_width = bitmap.width as f64 / IMAGE_DPI * 25.4;
        let native_height = bitmap.height as f64 / IMAGE_DPI * 25.4;
        if native_width <= 0.0 || native_height <= 0.0 {
            return Err(ReportError::Pdf("empty bitmap".into()));
        }

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x as f32)),
                translate_y: Some(self.flip(y + height)),
                scale_x: Some((width / native_width) as f32),
                scale_y: Some((height / native_height) as f32),
                dpi: Some(IMAGE_DPI as f32),
                ..Default::default()
            },
        );
        Ok(())
    }
}
