//! Font and text measurement for the PDF report.
//!
//! The report embeds `assets/fonts/Roboto-Medium.ttf` on every target so that
//! Cyrillic text and the ruble sign reach the PDF; builtin PDF fonts only carry
//! WinAnsi. Text is measured with `fontdue` against the same face. If the face
//! cannot be parsed, widths fall back to Helvetica-like estimates.

use dioxus::logger::tracing::warn;
use once_cell::sync::Lazy;

use super::layout::PT_TO_MM;

/// TrueType data embedded in every generated report.
pub const REPORT_FONT: &[u8] = include_bytes!("../../assets/fonts/Roboto-Medium.ttf");

/// Vertical metrics in millimetres for one font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub line_h: f64,
    pub asc: f64,
    pub desc: f64,
}

pub struct Fonts {
    face: Option<fontdue::Font>,
}

static FONTS: Lazy<Fonts> = Lazy::new(Fonts::load);

pub fn shared() -> &'static Fonts {
    &FONTS
}

impl Fonts {
    pub fn load() -> Self {
        let face = fontdue::Font::from_bytes(REPORT_FONT, fontdue::FontSettings::default())
            .map_err(|err| warn!(%err, "embedded report font unreadable"))
            .ok();
        Fonts { face }
    }

    /// Parsed report face, when the embedded data is usable.
    pub fn face(&self) -> Option<&fontdue::Font> {
        self.face.as_ref()
    }

    pub fn metrics(&self, size_pt: f64) -> TextMetrics {
        let size = size_pt * PT_TO_MM;
        let line_h = size * 1.28;
        let asc = size * 0.92;
        let desc = (line_h - asc).max(size * 0.08);
        TextMetrics { line_h, asc, desc }
    }

    /// Advance width of `text` in millimetres.
    pub fn text_width(&self, text: &str, size_pt: f64) -> f64 {
        if let Some(face) = &self.face {
            let px = size_pt as f32;
            let width: f32 = text
                .chars()
                .map(|ch| face.metrics(ch, px).advance_width)
                .sum();
            return width as f64 * PT_TO_MM;
        }

        let em: f64 = text.chars().map(advance_em).sum();
        em * size_pt * PT_TO_MM
    }

    /// Greedy word wrap to `max_width` millimetres. Words wider than a line
    /// are split between characters.
    pub fn wrap(&self, text: &str, size_pt: f64, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();

        for word in text.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if self.text_width(&candidate, size_pt) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            for ch in word.chars() {
                line.push(ch);
                if self.text_width(&line, size_pt) > max_width && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(ch);
                }
            }
        }

        if !line.is_empty() || lines.is_empty() {
            lines.push(line);
        }
        lines
    }

    /// TrueType data to embed in the PDF, if the face parsed.
    pub fn pdf_font_bytes(&self) -> Option<&'static [u8]> {
        self.face.as_ref().map(|_| REPORT_FONT)
    }
}

/// Approximate Helvetica advance widths, in em.
fn advance_em(ch: char) -> f64 {
    match ch {
        ' ' => 0.278,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.25,
        'f' | 't' | 'r' | '(' | ')' | '-' | '[' | ']' => 0.333,
        'm' | 'w' | 'M' | 'W' | 'ш' | 'щ' | 'ж' | 'ю' | 'Ш' | 'Щ' | 'Ж' | 'Ю' | 'Ы' | 'ы' => 0.833,
        '0'..='9' | '₽' => 0.556,
        c if c.is_uppercase() => 0.667,
        _ => 0.5,
    }
}
