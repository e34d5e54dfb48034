use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use ttf_parser::Face;

/// Ratio used whenever a glyph advance is unavailable. Also the basis of the
/// heuristic provider, so both paths degrade to the same widths.
pub const HEURISTIC_CHAR_WIDTH: f32 = 0.55;

static FONT_DB: Lazy<Mutex<Database>> = Lazy::new(|| {
    let mut db = Database::new();
    db.load_system_fonts();
    Mutex::new(db)
});

/// Measures the rendered width of a string at a given font size. Both
/// implementations are deterministic and side-effect free per call, so
/// layout results are reproducible for identical inputs.
pub trait TextMetrics: Send + Sync {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed average-character-width approximation, used when no measurement
/// facility is available on the platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMetrics;

impl TextMetrics for HeuristicMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        if font_size <= 0.0 {
            return 0.0;
        }
        let count = text.chars().filter(|ch| *ch != '\n').count();
        count as f32 * font_size * HEURISTIC_CHAR_WIDTH
    }
}

/// Precise glyph-advance measurement backed by a system font face.
pub struct FontMetrics {
    data: Vec<u8>,
    index: u32,
    units_per_em: f32,
    ascii_advances: [u16; 128],
}

impl FontMetrics {
    /// Queries the system font database for `font_family` (a CSS-style,
    /// comma-separated family list). Returns `None` when no usable face is
    /// found; callers substitute [`HeuristicMetrics`] in that case.
    pub fn load(font_family: &str) -> Option<Self> {
        let mut names: Vec<String> = Vec::new();
        let mut generics: Vec<Family<'static>> = Vec::new();
        for part in font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            match raw.to_ascii_lowercase().as_str() {
                "serif" => generics.push(Family::Serif),
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    generics.push(Family::SansSerif)
                }
                "monospace" | "ui-monospace" => generics.push(Family::Monospace),
                "cursive" => generics.push(Family::Cursive),
                "fantasy" => generics.push(Family::Fantasy),
                _ => names.push(raw.to_string()),
            }
        }

        let mut families: Vec<Family<'_>> =
            names.iter().map(|name| Family::Name(name.as_str())).collect();
        families.extend(generics);
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        let db = FONT_DB.lock().ok()?;
        let id = db.query(&Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })?;

        let mut loaded: Option<FontMetrics> = None;
        db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                let units_per_em = face.units_per_em().max(1) as f32;
                let mut ascii_advances = [0u16; 128];
                for byte in 0u8..=127 {
                    if let Some(glyph) = face.glyph_index(byte as char) {
                        ascii_advances[byte as usize] =
                            face.glyph_hor_advance(glyph).unwrap_or(0);
                    }
                }
                loaded = Some(FontMetrics {
                    data: data.to_vec(),
                    index,
                    units_per_em,
                    ascii_advances,
                });
            }
        });
        loaded
    }
}

impl TextMetrics for FontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }
        let scale = font_size / self.units_per_em;
        let fallback = font_size * HEURISTIC_CHAR_WIDTH;

        if text.is_ascii() {
            let mut width = 0.0f32;
            for byte in text.as_bytes() {
                if *byte == b'\n' {
                    continue;
                }
                let advance = self.ascii_advances[*byte as usize];
                width += if advance == 0 {
                    fallback
                } else {
                    advance as f32 * scale
                };
            }
            return width.max(0.0);
        }

        // Non-ASCII labels are rare enough that re-parsing the face per call
        // beats carrying a self-referential cache.
        let face = match Face::parse(&self.data, self.index) {
            Ok(face) => face,
            Err(_) => return text.chars().count() as f32 * fallback,
        };
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = face
                .glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph));
            width += match advance {
                Some(advance) if advance > 0 => advance as f32 * scale,
                _ => fallback,
            };
        }
        width.max(0.0)
    }
}

/// Selects the precise provider when a face for `font_family` can be loaded,
/// falling back to the heuristic otherwise. `fast` forces the heuristic.
pub fn metrics_for(font_family: &str, fast: bool) -> Box<dyn TextMetrics> {
    if !fast && let Some(metrics) = FontMetrics::load(font_family) {
        return Box::new(metrics);
    }
    Box::new(HeuristicMetrics)
}
