use std::any::Any;
use std::sync::Arc;

use fontsheet_core::{
    Alignment, BitmapFormat, Color, DrawingContext, Font, FontMetrics, FontSource, Glyph,
    GlyphProvider, GlyphWidth, Layer, LayoutConfig, Rect, RecordingPainter, Surface, Vector,
};
use proptest::prelude::*;

const CELL: f32 = 8.0;

/// Covers ASCII lowercase and space; uppercase is deliberately missing
struct Alphabet {
    mode: GlyphWidth,
    surface: Arc<Surface>,
}

fn advance_for(ch: char) -> f32 {
    (ch as u32 % 7 + 2) as f32
}

impl GlyphProvider for Alphabet {
    fn name(&self) -> &'static str {
        "alphabet"
    }

    fn glyph(&self, ch: char) -> Option<Glyph> {
        if !(ch.is_ascii_lowercase() || ch == ' ') {
            return None;
        }
        let advance = match self.mode {
            GlyphWidth::Fixed => CELL,
            GlyphWidth::Variable => advance_for(ch),
        };
        Some(Glyph {
            advance,
            offset: Vector::ZERO,
            surface_index: 0,
            rect: Rect::new(0.0, 0.0, advance, CELL),
        })
    }

    fn surface(&self, _layer: Layer, index: usize) -> Option<Arc<Surface>> {
        (index == 0).then(|| self.surface.clone())
    }

    fn surface_count(&self) -> usize {
        1
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn font(mode: GlyphWidth, rtl: bool) -> Arc<Font> {
    let surface = Surface::new(1, 1, BitmapFormat::Rgba8, vec![255; 4]).unwrap();
    Arc::new(Font::new(
        FontSource::bitmap("alphabet.toml", mode, 0),
        FontMetrics {
            line_height: 11.0,
            char_width: CELL,
            shadow_size: 0,
            border: 0,
            rtl,
            glyph_width: mode,
        },
        LayoutConfig::default(),
        Box::new(Alphabet {
            mode,
            surface: Arc::new(surface),
        }),
    ))
}

fn draw_xs(font: &Arc<Font>, text: &str) -> Vec<f32> {
    let mut context = DrawingContext::new();
    context.draw_text(font, text, Vector::ZERO, Alignment::Left, 0, Color::white());
    let mut painter = RecordingPainter::new();
    context.do_drawing(&mut painter);
    painter.commands.iter().map(|c| c.dest.x).collect()
}

/// The part of `original` between `head` and `overflow` must be whitespace
fn assert_reconstructs(original: &str, head: &str, overflow: &str) -> Result<(), TestCaseError> {
    prop_assert!(original.starts_with(head), "{:?} does not start with {:?}", original, head);
    prop_assert!(original.ends_with(overflow), "{:?} does not end with {:?}", original, overflow);
    prop_assert!(head.len() + overflow.len() <= original.len());
    let gap = &original[head.len()..original.len() - overflow.len()];
    prop_assert!(gap.chars().all(char::is_whitespace), "consumed {:?}", gap);
    Ok(())
}

#[test]
fn wraps_at_whitespace_or_hard_breaks() {
    assert_eq!(
        Font::wrap_to_chars("hello world", 8),
        ("hello".to_string(), "world".to_string())
    );
    assert_eq!(
        Font::wrap_to_chars("helloworld", 5),
        ("hello".to_string(), "world".to_string())
    );
}

proptest! {
    #[test]
    fn prop_single_line_height_is_line_height(text in "[^\n]*") {
        let font = font(GlyphWidth::Variable, false);
        prop_assert_eq!(font.text_height(&text), font.height());
    }
}

proptest! {
    #[test]
    fn prop_height_counts_line_breaks(text in "[a-z \n]{0,40}") {
        let font = font(GlyphWidth::Variable, false);
        let breaks = text.matches('\n').count();
        prop_assert_eq!(font.text_height(&text), 11.0 * (1 + breaks) as f32);
    }
}

proptest! {
    #[test]
    fn prop_wrapping_nothing_yields_nothing(max in 0usize..200) {
        prop_assert_eq!(Font::wrap_to_chars("", max), (String::new(), String::new()));
    }
}

proptest! {
    #[test]
    fn prop_short_words_fit_whole(text in "\\PZ{0,20}", slack in 0usize..10) {
        prop_assume!(!text.chars().any(char::is_whitespace));
        let max = text.chars().count() + slack;
        prop_assert_eq!(Font::wrap_to_chars(&text, max), (text.clone(), String::new()));
    }
}

proptest! {
    #[test]
    fn prop_char_wrap_reconstructs(text in "[a-zä日 \n]{0,40}", max in 0usize..30) {
        let (head, overflow) = Font::wrap_to_chars(&text, max);
        assert_reconstructs(&text, &head, &overflow)?;
        if !overflow.is_empty() {
            prop_assert!(head.chars().count() <= max);
        }
    }
}

proptest! {
    #[test]
    fn prop_width_wrap_reconstructs_and_fits(text in "[a-z ]{0,40}", budget in 0.0f32..120.0) {
        let font = font(GlyphWidth::Variable, false);
        let (head, overflow) = font.wrap_to_width(&text, budget);
        assert_reconstructs(&text, &head, &overflow)?;
        if !overflow.is_empty() {
            let hard_single_char = head.chars().count() == 1;
            prop_assert!(font.text_width(&head) <= budget || hard_single_char);
            prop_assert!(!head.is_empty());
        }
    }
}

proptest! {
    #[test]
    fn prop_has_all_glyphs_matches_lookup(text in "[a-zA-Z ]{0,20}") {
        let font = font(GlyphWidth::Variable, false);
        let expected = text.chars().all(|ch| ch.is_ascii_lowercase() || ch == ' ');
        prop_assert_eq!(font.has_all_glyphs(&text), expected);
    }
}

proptest! {
    #[test]
    fn prop_variable_advances_add_up(a in "[a-z]", b in "[a-z]") {
        let font = font(GlyphWidth::Variable, false);
        let pair = format!("{a}{b}");
        let a = a.chars().next().unwrap();
        let b = b.chars().next().unwrap();
        prop_assert_eq!(font.text_width(&pair), advance_for(a) + advance_for(b));
    }
}

proptest! {
    #[test]
    fn prop_fixed_advances_ignore_the_glyph(text in "[a-z ]{2}") {
        let font = font(GlyphWidth::Fixed, false);
        prop_assert_eq!(font.text_width(&text), 2.0 * CELL);
    }
}

proptest! {
    #[test]
    fn prop_right_to_left_mirrors_left_to_right(a in "[a-z]", b in "[a-z]") {
        let pair = format!("{a}{b}");
        let ltr = draw_xs(&font(GlyphWidth::Variable, false), &pair);
        let rtl = draw_xs(&font(GlyphWidth::Variable, true), &pair);
        let (wa, wb) = (advance_for(a.chars().next().unwrap()), advance_for(b.chars().next().unwrap()));

        prop_assert_eq!(ltr, vec![0.0, wa]);
        prop_assert_eq!(&rtl, &vec![wb, 0.0]);
        prop_assert!(rtl[1] < rtl[0], "b must sit left of a");
    }
}
