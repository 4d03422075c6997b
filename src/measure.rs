use crate::config::Config;
use crate::params::SvgParams;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static FONT_STORE: Lazy<Mutex<FontStore>> = Lazy::new(|| Mutex::new(FontStore::new()));

/// Sizes `params` from its text the way the badge endpoint does: padding of
/// `padding_factor * font_size` on every side, width no smaller than
/// `min_width`, one line-height step per extra line. Only unset dimensions
/// are filled in, and the text doubles as the accessibility label.
pub fn apply_badge_size(params: &mut SvgParams, config: &Config) {
    let text = params.text.clone().unwrap_or_default();
    let font_size = params.font_size.unwrap_or(config.defaults.font_size);
    let font_family = params
        .font_family
        .clone()
        .unwrap_or_else(|| config.defaults.font_family.clone());

    let padding = (font_size * config.badge.padding_factor).round();
    let widest = text
        .split('\n')
        .map(|line| line_width(line, font_size, &font_family, config.badge.fallback_char_factor))
        .fold(0.0, f32::max);
    let extra_lines = text.split('\n').count().saturating_sub(1) as f32;

    if params.width.is_none() {
        params.width = Some((widest.round() + 2.0 * padding).max(config.badge.min_width));
    }
    if params.height.is_none() {
        params.height = Some(
            font_size + 2.0 * padding + extra_lines * font_size * config.defaults.line_height,
        );
    }
    if params.aria_label.is_none() && !text.is_empty() {
        params.aria_label = Some(text);
    }
}

/// Measures one line of text in user units. Glyph advances come from the
/// best-matching system font; characters the font lacks, and systems with no
/// matching font at all, fall back to `fallback_char_factor * font_size` per
/// character.
pub fn line_width(line: &str, font_size: f32, font_family: &str, fallback_char_factor: f32) -> f32 {
    let per_char = font_size * fallback_char_factor;
    let heuristic = per_char * line.chars().count() as f32;
    if line.is_empty() || font_size <= 0.0 {
        return 0.0;
    }

    let Ok(mut store) = FONT_STORE.lock() else {
        return heuristic;
    };
    let Some((data, index)) = store.face_data(font_family) else {
        return heuristic;
    };
    let Ok(face) = Face::parse(&data, index) else {
        return heuristic;
    };

    let scale = font_size / face.units_per_em().max(1) as f32;
    let mut width = 0.0f32;
    for ch in line.chars() {
        match face
            .glyph_index(ch)
            .and_then(|glyph| face.glyph_hor_advance(glyph))
        {
            Some(advance) if advance > 0 => width += advance as f32 * scale,
            _ => width += per_char,
        }
    }
    width
}

struct FontStore {
    db: Database,
    loaded_system_fonts: bool,
    // family key -> raw font data + face index, None when nothing matched
    cache: HashMap<String, Option<(Vec<u8>, u32)>>,
}

impl FontStore {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn face_data(&mut self, font_family: &str) -> Option<(Vec<u8>, u32)> {
        let key = font_family.trim().to_ascii_lowercase();
        if let Some(entry) = self.cache.get(&key) {
            return entry.clone();
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    Family::SansSerif
                }
                "monospace" | "ui-monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                _ => Family::Name(name.as_str()),
            })
            .collect();
        let families = if families.is_empty() {
            vec![Family::SansSerif]
        } else {
            families
        };

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let entry = self.db.query(&query).and_then(|id| {
            let mut data = None;
            self.db.with_face_data(id, |bytes, index| {
                data = Some((bytes.to_vec(), index));
            });
            data
        });

        self.cache.insert(key, entry.clone());
        entry
    }
}
