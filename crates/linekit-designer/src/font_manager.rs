use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt, fs,
    sync::{Mutex, OnceLock},
};

/// Generic font family a `.lin` text style renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Sans,
    Serif,
    Monospace,
}

impl FontFamily {
    /// Family for a text style name. `ROMANS`/`ROMANTIC` are serif,
    /// `MONOTXT` is monospace, everything else sans.
    pub fn for_style(style: &str) -> Self {
        match style.trim().to_ascii_uppercase().as_str() {
            "ROMANS" | "ROMANTIC" => Self::Serif,
            "MONOTXT" => Self::Monospace,
            _ => Self::Sans,
        }
    }

    /// CSS generic family name, used by the SVG writer.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Sans => "sans-serif",
            Self::Serif => "serif",
            Self::Monospace => "monospace",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css_name())
    }
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        db
    })
}

/// System font for `family`, or `None` when no face is installed.
///
/// Lookups (including misses) are cached for the life of the process.
pub fn font_for(family: FontFamily) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontFamily, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&family) {
        return *font;
    }

    let loaded = load_font_from_system(family);
    if loaded.is_none() {
        tracing::warn!("No system font for {} text, using approximate metrics", family);
    }
    let font_ref: Option<&'static Font<'static>> =
        loaded.map(|font| &*Box::leak(Box::new(font)));

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(family, font_ref);
    font_ref
}

fn load_font_from_system(family: FontFamily) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family {
        FontFamily::Sans => vec![Family::Name("Arial"), Family::SansSerif],
        FontFamily::Serif => vec![Family::Name("Times New Roman"), Family::Serif],
        FontFamily::Monospace => vec![Family::Name("Courier New"), Family::Monospace],
    };

    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}
