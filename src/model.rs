use std::path::PathBuf;

/// Solid text color. The compositor never blends; glyph coverage does the
/// anti-aliasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Horizontal placement rule for one text run.
///
/// Margins are measured in pixels from the named canvas edge; `Center`
/// carries no margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HAnchor {
    Left(u32),
    Right(u32),
    Center,
}

impl HAnchor {
    /// Decodes the signed-offset convention used by the card presets:
    /// negative is a left margin, positive a right margin, zero centered.
    pub fn from_offset(offset: i32) -> Self {
        if offset < 0 {
            Self::Left(offset.unsigned_abs())
        } else if offset > 0 {
            Self::Right(offset as u32)
        } else {
            Self::Center
        }
    }

    /// Resolves the x origin for a run of measured width `text_w`.
    pub fn resolve(self, canvas_w: u32, text_w: u32) -> i32 {
        match self {
            Self::Left(margin) => margin as i32,
            Self::Right(margin) => canvas_w as i32 - text_w as i32 - margin as i32,
            Self::Center => (canvas_w as i32 - text_w as i32) / 2,
        }
    }
}

/// Vertical placement rule for one text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VAnchor {
    Top(u32),
    Middle,
    Bottom(u32),
}

impl VAnchor {
    /// Decodes an anchor name; anything unrecognized falls back to `Bottom`.
    pub fn from_name(name: &str, offset: u32) -> Self {
        match name {
            "top" => Self::Top(offset),
            "middle" => Self::Middle,
            _ => Self::Bottom(offset),
        }
    }

    /// Resolves the y origin for a run drawn at `size` pixels.
    ///
    /// `Middle` approximates the baseline at the vertical center plus half
    /// the font size rather than true font-metric centering.
    pub fn resolve(self, canvas_h: u32, size: f32) -> i32 {
        match self {
            Self::Top(offset) => offset as i32,
            Self::Middle => (canvas_h / 2) as i32 + (size / 2.0) as i32,
            Self::Bottom(offset) => canvas_h as i32 - offset as i32,
        }
    }
}

/// One text run to burn onto the canvas: content, size, anchor rules, color.
///
/// Directives are painted in list order; later runs overwrite earlier ones
/// where they overlap.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlacementDirective {
    pub text: String,
    pub size: f32,
    pub v: VAnchor,
    pub h: HAnchor,
    pub color: Rgb,
}

impl PlacementDirective {
    pub fn new(text: impl Into<String>, size: f32, v: VAnchor, h: HAnchor, color: Rgb) -> Self {
        Self {
            text: text.into(),
            size,
            v,
            h,
            color,
        }
    }
}

/// Pipeline configuration.
///
/// Defaults reproduce the original card presentation (1080x1277 canvas,
/// 21-character quote cutoff, 80/30 pixel quote insets); every constant is
/// overridable from a JSON file.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_url: String,
    pub font_cache_path: PathBuf,
    pub background_list_url: String,
    /// Quotes longer than this many characters are split into two lines.
    pub quote_split_threshold: usize,
    /// Left inset of the first quote line.
    pub quote_line1_inset: u32,
    /// Left inset of the continuation line.
    pub quote_line2_inset: u32,
    /// Bottom offset of the first quote line.
    pub quote_line1_offset: u32,
    /// Bottom offset of the continuation line.
    pub quote_line2_offset: u32,
    /// Substituted when the quote collaborator fails.
    pub quote_fallback: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1080,
            canvas_height: 1277,
            font_url: "https://api.luoh-an.me/storage/ttf/font.ttf".to_string(),
            font_cache_path: std::env::temp_dir().join("daycard-font.ttf"),
            background_list_url: "https://cdn.s3.luoh-an.me/luoh-an-api/daysign/images/images.txt"
                .to_string(),
            quote_split_threshold: 21,
            quote_line1_inset: 80,
            quote_line2_inset: 30,
            quote_line1_offset: 300,
            quote_line2_offset: 250,
            quote_fallback: "天之道，损有余而补不足。".to_string(),
        }
    }
}
