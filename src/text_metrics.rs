//! Text measurement backends for label placement.
//!
//! The placement algorithm only needs the axis-aligned box a word occupies
//! when drawn at a position with a font size. `FontTextMetrics` measures
//! real glyph advances via the system font database; `HeuristicTextMetrics`
//! uses a calibrated per-character width table and no host dependencies,
//! which is what the tests use.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

use crate::engine::placement::TextMetrics;
use crate::engine::types::AxisAlignedBox;

// Fraction of the font size above the baseline a text box extends.
const ASCENT_FACTOR: f32 = 0.8;

fn baseline_box(position: (f32, f32), width: f32, font_size: f32) -> AxisAlignedBox {
    AxisAlignedBox {
        x: position.0,
        y: position.1 - font_size * ASCENT_FACTOR,
        width,
        height: font_size,
    }
}

/// Metric-table measurement: per-character width factors calibrated against
/// a common sans-serif stack at a 16px baseline.
pub struct HeuristicTextMetrics;

impl TextMetrics for HeuristicTextMetrics {
    fn measure(&self, text: &str, font_size: f32, position: (f32, f32)) -> AxisAlignedBox {
        let width: f32 = text.chars().map(char_width_factor).sum::<f32>() * font_size;
        baseline_box(position, width, font_size)
    }
}

pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        '.' | ',' | ':' | ';' | '!' | '(' | ')' | '[' | ']' => 0.321,
        'i' | 'j' | 'l' => 0.237,
        'f' | 't' | 'r' => 0.336,
        'm' | 'w' => 0.839,
        'I' => 0.272,
        'M' | 'W' => 0.930,
        'a'..='z' => 0.560,
        'A'..='Z' => 0.670,
        '0'..='9' => 0.596,
        _ => 0.568,
    }
}

/// Font-backed measurement using the first system face matching the family.
pub struct FontTextMetrics {
    family: String,
}

impl FontTextMetrics {
    pub fn new(family: &str) -> Self {
        Self {
            family: family.to_string(),
        }
    }
}

impl TextMetrics for FontTextMetrics {
    fn measure(&self, text: &str, font_size: f32, position: (f32, f32)) -> AxisAlignedBox {
        let width = measure_text_width(text, font_size, &self.family).unwrap_or_else(|| {
            HeuristicTextMetrics
                .measure(text, font_size, position)
                .width
        });
        baseline_box(position, width, font_size)
    }
}

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FaceMetrics>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = font_family.trim().to_string();
        if !self.cache.contains_key(&key) {
            let metrics = self.load_metrics(font_family);
            self.cache.insert(key.clone(), metrics);
        }
        let metrics = self.cache.get(&key).and_then(|m| m.as_ref())?;
        Some(metrics.width(text, font_size))
    }

    fn load_metrics(&mut self, font_family: &str) -> Option<FaceMetrics> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let mut names: Vec<String> = Vec::new();
        let mut families: Vec<Family<'_>> = Vec::new();
        for part in font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            match raw.to_ascii_lowercase().as_str() {
                "serif" => families.push(Family::Serif),
                "sans-serif" | "system-ui" => families.push(Family::SansSerif),
                "monospace" => families.push(Family::Monospace),
                _ => names.push(raw.to_string()),
            }
        }
        let mut query_families: Vec<Family<'_>> =
            names.iter().map(|name| Family::Name(name)).collect();
        query_families.extend(families);
        query_families.push(Family::SansSerif);

        let id = self.db.query(&Query {
            families: &query_families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })?;

        let mut metrics = None;
        self.db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                metrics = Some(FaceMetrics::from_face(&face));
            }
        });
        metrics
    }
}

/// Advance widths extracted from a parsed face, in font units.
struct FaceMetrics {
    units_per_em: u16,
    ascii_advances: [u16; 128],
}

impl FaceMetrics {
    fn from_face(face: &Face<'_>) -> Self {
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        Self {
            units_per_em: face.units_per_em().max(1),
            ascii_advances,
        }
    }

    fn width(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;
        text.chars()
            .map(|ch| {
                let advance = if ch.is_ascii() {
                    self.ascii_advances[ch as usize]
                } else {
                    0
                };
                if advance == 0 {
                    fallback
                } else {
                    advance as f32 * scale
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_width_scales_with_font_size() {
        let small = HeuristicTextMetrics.measure("piano", 10.0, (0.0, 0.0));
        let large = HeuristicTextMetrics.measure("piano", 20.0, (0.0, 0.0));
        assert!((large.width - small.width * 2.0).abs() < 1e-3);
    }

    #[test]
    fn box_extends_above_baseline() {
        let bbox = HeuristicTextMetrics.measure("piano", 20.0, (100.0, 200.0));
        assert_eq!(bbox.x, 100.0);
        assert!(bbox.y < 200.0);
        assert_eq!(bbox.height, 20.0);
    }

    #[test]
    fn empty_text_has_zero_width() {
        let bbox = HeuristicTextMetrics.measure("", 20.0, (0.0, 0.0));
        assert_eq!(bbox.width, 0.0);
    }
}
