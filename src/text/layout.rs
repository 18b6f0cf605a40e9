//! Text measurement and layout (§4.D, measurement half).
//!
//! Glyph widths come from a host-supplied [`TextMetrics`] service (§6); the
//! layout algorithm itself — line splitting, word boundaries, per-char
//! advance — is pure and deterministic given that service's answers.

use crate::foundation::error::{CoreError, CoreResult};

/// Host-supplied glyph measurement service.
pub trait TextMetrics {
    /// Measure the rendered width of `text` set in `font` at `size_px`
    /// with the given `weight` (100-900).
    fn width(&self, text: &str, font: &str, size_px: f32, weight: u16) -> f64;
}

/// `parley`-backed default [`TextMetrics`]: shapes `text` with a real font
/// and measures the resulting layout, the way the teacher's
/// `assets::store::TextLayoutEngine` builds layouts for the render path.
/// Fonts must be registered with [`register_font`](Self::register_font)
/// before their family name is usable as `width`'s `font` argument.
pub struct ParleyTextMetrics {
    font_ctx: std::sync::Mutex<parley::FontContext>,
    layout_ctx: std::sync::Mutex<parley::LayoutContext<()>>,
}

impl ParleyTextMetrics {
    pub fn new() -> Self {
        Self {
            font_ctx: std::sync::Mutex::new(parley::FontContext::default()),
            layout_ctx: std::sync::Mutex::new(parley::LayoutContext::new()),
        }
    }

    /// Register a font's raw bytes, returning the family name under which
    /// it was registered (pass that name as `width`'s `font` argument).
    pub fn register_font(&self, font_bytes: &[u8]) -> Option<String> {
        let mut font_ctx = self.font_ctx.lock().unwrap();
        let families = font_ctx.collection.register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id)?;
        font_ctx.collection.family_name(family_id).map(str::to_string)
    }
}

impl Default for ParleyTextMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetrics for ParleyTextMetrics {
    fn width(&self, text: &str, font: &str, size_px: f32, _weight: u16) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let mut font_ctx = self.font_ctx.lock().unwrap();
        let mut layout_ctx = self.layout_ctx.lock().unwrap();
        let mut builder = layout_ctx.ranged_builder(&mut font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(parley::style::FontStack::Source(
            std::borrow::Cow::Borrowed(font),
        )));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        f64::from(layout.width())
    }
}

/// Per-character layout record.
#[derive(Clone, Debug, PartialEq)]
pub struct CharLayout {
    pub ch: char,
    pub global_index: usize,
    pub line_index: usize,
    pub char_index_in_line: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A word: a run of non-whitespace characters, aggregating its chars.
#[derive(Clone, Debug, PartialEq)]
pub struct WordLayout {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize, // exclusive
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// A wrapped line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayout {
    pub start_char: usize,
    pub end_char: usize, // exclusive
    pub y: f64,
    pub width: f64,
}

/// Full measured layout for a block of styled text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub characters: Vec<CharLayout>,
    pub words: Vec<WordLayout>,
    pub lines: Vec<LineLayout>,
    pub total_width: f64,
    pub total_height: f64,
}

/// Style inputs to [`measure_text`].
#[derive(Clone, Debug)]
pub struct TextStyle {
    pub font: String,
    pub size_px: f32,
    pub weight: u16,
    pub letter_spacing: f64,
    pub line_height: f64, // multiplier of size_px
}

/// Measure `text`, splitting on `\n` into lines and on whitespace runs
/// into words (whitespace itself is a separator, not emitted as a word).
pub fn measure_text(
    text: &str,
    style: &TextStyle,
    metrics: &dyn TextMetrics,
) -> CoreResult<TextLayout> {
    if !style.size_px.is_finite() || style.size_px <= 0.0 {
        return Err(CoreError::schema_invalid("text size_px must be > 0"));
    }

    let mut characters = Vec::new();
    let mut words = Vec::new();
    let mut lines = Vec::new();

    let mut global_index = 0usize;
    let mut y = 0.0f64;

    for raw_line in text.split('\n') {
        let line_y = y;
        let mut x = 0.0f64;
        let mut char_index_in_line = 0usize;
        let line_start_char = global_index;

        let mut word_start: Option<(usize, f64)> = None;
        let mut word_text = String::new();

        for ch in raw_line.chars() {
            let glyph_w = metrics.width(&ch.to_string(), &style.font, style.size_px, style.weight);
            let glyph_h = f64::from(style.size_px);

            characters.push(CharLayout {
                ch,
                global_index,
                line_index: lines.len(),
                char_index_in_line,
                x,
                y: line_y,
                width: glyph_w,
                height: glyph_h,
            });

            if ch.is_whitespace() {
                if let Some((start, start_x)) = word_start.take() {
                    words.push(WordLayout {
                        text: std::mem::take(&mut word_text),
                        start_char: start,
                        end_char: global_index,
                        x: start_x,
                        y: line_y,
                        width: x - start_x,
                    });
                }
            } else {
                if word_start.is_none() {
                    word_start = Some((global_index, x));
                }
                word_text.push(ch);
            }

            x += glyph_w + style.letter_spacing;
            global_index += 1;
            char_index_in_line += 1;
        }

        if let Some((start, start_x)) = word_start.take() {
            words.push(WordLayout {
                text: word_text,
                start_char: start,
                end_char: global_index,
                x: start_x,
                y: line_y,
                width: x - start_x,
            });
        }

        lines.push(LineLayout {
            start_char: line_start_char,
            end_char: global_index,
            y: line_y,
            width: x.max(0.0),
        });

        y += f64::from(style.size_px) * style.line_height;
    }

    let total_width = lines.iter().map(|l| l.width).fold(0.0, f64::max);
    let total_height = y;

    Ok(TextLayout {
        characters,
        words,
        lines,
        total_width,
        total_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedWidth(f64);
    impl TextMetrics for FixedWidth {
        fn width(&self, _text: &str, _font: &str, _size_px: f32, _weight: u16) -> f64 {
            self.0
        }
    }

    fn style() -> TextStyle {
        TextStyle {
            font: "sans".into(),
            size_px: 10.0,
            weight: 400,
            letter_spacing: 1.0,
            line_height: 1.2,
        }
    }

    #[test]
    fn splits_lines_and_words() {
        let metrics = FixedWidth(5.0);
        let layout = measure_text("Hi there\nBye", &style(), &metrics).unwrap();
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.words.iter().map(|w| w.text.clone()).collect::<Vec<_>>(), vec!["Hi", "there", "Bye"]);
    }

    #[test]
    fn chars_advance_by_width_plus_letter_spacing() {
        let metrics = FixedWidth(5.0);
        let layout = measure_text("ab", &style(), &metrics).unwrap();
        assert_eq!(layout.characters[0].x, 0.0);
        assert_eq!(layout.characters[1].x, 6.0); // 5 width + 1 letter spacing
    }

    #[test]
    fn rejects_non_positive_size() {
        let metrics = FixedWidth(5.0);
        let mut s = style();
        s.size_px = 0.0;
        assert!(measure_text("x", &s, &metrics).is_err());
    }

    #[test]
    fn parley_metrics_register_font_rejects_garbage_bytes() {
        let metrics = ParleyTextMetrics::new();
        assert!(metrics.register_font(b"not a font").is_none());
    }
}
