//! Turning a string into painter calls
//!
//! Two passes per request: the shadow (when the font has one) goes down
//! first so the foreground lands on top of it. Each pass walks every line,
//! places the cursor according to alignment and direction, and issues one
//! crop-and-blit per drawable glyph.

use crate::font::Font;
use crate::glyph::Glyph;
use crate::traits::Painter;
use crate::types::{Alignment, DrawingEffect, Layer, Vector};
use crate::Color;

/// What differs between the shadow and the foreground pass
struct Pass {
    layer: Layer,
    offset: Vector,
    color: Color,
}

/// Everything about one request that stays fixed across lines
struct Stroke {
    effect: DrawingEffect,
    alpha: f32,
}

impl Font {
    /// Draw `text` with its anchor at `position`
    ///
    /// Only [`crate::DrawingContext`] calls this, so every draw goes through
    /// frame batching.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn draw_text<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        text: &str,
        position: Vector,
        alignment: Alignment,
        effect: DrawingEffect,
        color: Color,
        alpha: f32,
    ) {
        let stroke = Stroke { effect, alpha };

        let shadow_size = self.shadow_size();
        if shadow_size > 0 {
            let s = shadow_size as f32;
            let shadow = Pass {
                layer: Layer::Shadow,
                offset: Vector::new(s, s),
                color: Color::black(),
            };
            self.draw_pass(painter, text, position, alignment, &stroke, &shadow);
        }

        let foreground = Pass {
            layer: Layer::Glyph,
            offset: Vector::ZERO,
            color,
        };
        self.draw_pass(painter, text, position, alignment, &stroke, &foreground);
    }

    fn draw_pass<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        text: &str,
        position: Vector,
        alignment: Alignment,
        stroke: &Stroke,
        pass: &Pass,
    ) {
        let line_height = self.height();
        for (i, line) in text.split('\n').enumerate() {
            let width = self.text_width(line);
            let x = match alignment {
                Alignment::Left => position.x,
                Alignment::Center => position.x - width / 2.0,
                Alignment::Right => position.x - width,
            };
            let origin = Vector::new(x.floor(), position.y + i as f32 * line_height);
            self.draw_line(painter, line, origin, stroke, pass);
        }
    }

    fn draw_line<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        line: &str,
        origin: Vector,
        stroke: &Stroke,
        pass: &Pass,
    ) {
        let missing = self.missing_glyph_advance();
        let advance_of = |glyph: &Option<Glyph>| glyph.map_or(missing, |g| g.advance);
        let rtl = self.is_rtl();

        let mut cursor = origin;
        if rtl {
            cursor.x += line
                .chars()
                .map(|ch| advance_of(&self.glyph(ch)))
                .sum::<f32>();
        }

        let border = self.border() as f32;
        let border = Vector::new(border, border);

        for ch in line.chars() {
            let glyph = self.glyph(ch);
            let advance = advance_of(&glyph);
            if rtl {
                cursor.x -= advance;
            }
            match glyph {
                Some(glyph) => {
                    let dest = cursor + glyph.offset - border + pass.offset;
                    self.draw_glyph(painter, &glyph, dest, stroke, pass);
                }
                None => log::trace!("No glyph for {:?}, leaving a gap", ch),
            }
            if !rtl {
                cursor.x += advance;
            }
        }
    }

    fn draw_glyph<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        glyph: &Glyph,
        dest: Vector,
        stroke: &Stroke,
        pass: &Pass,
    ) {
        if glyph.rect.is_empty() {
            return;
        }
        let Some(surface) = self.provider().surface(pass.layer, glyph.surface_index) else {
            log::debug!(
                "{} has no {:?} surface at index {}, skipping glyph",
                self.file_name().display(),
                pass.layer,
                glyph.surface_index
            );
            return;
        };
        painter.draw_cropped_image(
            &surface,
            glyph.rect,
            dest,
            pass.color,
            stroke.alpha,
            stroke.effect,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::sync::Arc;

    use super::*;
    use crate::config::LayoutConfig;
    use crate::font::{FontMetrics, FontSource};
    use crate::surface::{BitmapFormat, Surface};
    use crate::traits::{GlyphProvider, RecordingPainter};
    use crate::types::{GlyphWidth, Rect};

    /// 'a' is 6px wide with a 1px offset, 'b' 4px, ' ' 3px, 'e' has no pixels
    struct Sheet {
        glyphs: Arc<Surface>,
        shadows: Arc<Surface>,
    }

    impl Sheet {
        fn new() -> Self {
            let surface = || Arc::new(Surface::new(4, 4, BitmapFormat::Gray8, vec![0; 16]).unwrap());
            Self {
                glyphs: surface(),
                shadows: surface(),
            }
        }
    }

    impl GlyphProvider for Sheet {
        fn name(&self) -> &'static str {
            "sheet"
        }

        fn glyph(&self, ch: char) -> Option<Glyph> {
            let (advance, offset, w) = match ch {
                'a' => (6.0, Vector::new(1.0, 2.0), 5.0),
                'b' => (4.0, Vector::ZERO, 4.0),
                ' ' => (3.0, Vector::ZERO, 3.0),
                'e' => (2.0, Vector::ZERO, 0.0),
                _ => return None,
            };
            Some(Glyph {
                advance,
                offset,
                surface_index: 0,
                rect: Rect::new(ch as u32 as f32, 0.0, w, 8.0),
            })
        }

        fn surface(&self, layer: Layer, index: usize) -> Option<Arc<Surface>> {
            match (layer, index) {
                (Layer::Glyph, 0) => Some(self.glyphs.clone()),
                (Layer::Shadow, 0) => Some(self.shadows.clone()),
                _ => None,
            }
        }

        fn surface_count(&self) -> usize {
            1
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn font(shadow_size: u32, border: u32, rtl: bool) -> Font {
        Font::new(
            FontSource::bitmap("sheet.toml", GlyphWidth::Variable, shadow_size),
            FontMetrics {
                line_height: 10.0,
                char_width: 8.0,
                shadow_size,
                border,
                rtl,
                glyph_width: GlyphWidth::Variable,
            },
            LayoutConfig::default(),
            Box::new(Sheet::new()),
        )
    }

    fn draw(font: &Font, text: &str, position: Vector, alignment: Alignment) -> RecordingPainter {
        let mut painter = RecordingPainter::new();
        font.draw_text(
            &mut painter,
            text,
            position,
            alignment,
            DrawingEffect::None,
            Color::white(),
            1.0,
        );
        painter
    }

    fn dests(painter: &RecordingPainter) -> Vec<(f32, f32)> {
        painter.commands.iter().map(|c| (c.dest.x, c.dest.y)).collect()
    }

    #[test]
    fn left_to_right_accumulates_advances() {
        let painter = draw(&font(0, 0, false), "ab", Vector::new(10.0, 20.0), Alignment::Left);
        assert_eq!(dests(&painter), vec![(11.0, 22.0), (16.0, 20.0)]);
    }

    #[test]
    fn lines_step_by_line_height() {
        let painter = draw(&font(0, 0, false), "b\nb", Vector::new(0.0, 0.0), Alignment::Left);
        assert_eq!(dests(&painter), vec![(0.0, 0.0), (0.0, 10.0)]);
    }

    #[test]
    fn alignment_uses_line_width_and_snaps() {
        let font = font(0, 0, false);
        // "ab" is 10px wide, "b" 4px
        let centered = draw(&font, "ab\nb", Vector::new(20.5, 0.0), Alignment::Center);
        assert_eq!(dests(&centered), vec![(16.0, 2.0), (21.0, 0.0), (18.0, 10.0)]);

        let right = draw(&font, "b", Vector::new(20.0, 0.0), Alignment::Right);
        assert_eq!(dests(&right), vec![(16.0, 0.0)]);
    }

    #[test]
    fn shadow_pass_comes_first_in_black() {
        let font = font(2, 0, false);
        let painter = draw(&font, "b", Vector::ZERO, Alignment::Left);
        let sheet = font.backend::<Sheet>().unwrap();

        assert_eq!(painter.commands.len(), 2);
        let (shadow, glyph) = (&painter.commands[0], &painter.commands[1]);
        assert_eq!(shadow.surface, sheet.shadows.id());
        assert_eq!(shadow.color, Color::black());
        assert_eq!((shadow.dest.x, shadow.dest.y), (2.0, 2.0));
        assert_eq!(glyph.surface, sheet.glyphs.id());
        assert_eq!(glyph.color, Color::white());
        assert_eq!((glyph.dest.x, glyph.dest.y), (0.0, 0.0));
    }

    #[test]
    fn border_shifts_destination_back() {
        let painter = draw(&font(0, 2, false), "b", Vector::new(5.0, 5.0), Alignment::Left);
        assert_eq!(dests(&painter), vec![(3.0, 3.0)]);
    }

    #[test]
    fn missing_glyphs_leave_a_space_sized_gap() {
        let painter = draw(&font(0, 0, false), "b?b", Vector::ZERO, Alignment::Left);
        assert_eq!(dests(&painter), vec![(0.0, 0.0), (7.0, 0.0)]);
    }

    #[test]
    fn empty_rects_are_not_drawn_but_advance() {
        let painter = draw(&font(0, 0, false), "eb", Vector::ZERO, Alignment::Left);
        assert_eq!(dests(&painter), vec![(2.0, 0.0)]);
    }

    #[test]
    fn right_to_left_mirrors_the_pair() {
        let painter = draw(&font(0, 0, true), "ab", Vector::ZERO, Alignment::Left);
        // b at the left edge, a after it (plus its 1px offset)
        assert_eq!(dests(&painter), vec![(5.0, 2.0), (0.0, 0.0)]);
    }

    #[test]
    fn effect_and_alpha_reach_the_painter() {
        let font = font(0, 0, false);
        let mut painter = RecordingPainter::new();
        font.draw_text(
            &mut painter,
            "a",
            Vector::ZERO,
            Alignment::Left,
            DrawingEffect::HorizontalFlip,
            Color::rgba(1, 2, 3, 4),
            0.5,
        );
        let command = &painter.commands[0];
        assert_eq!(command.effect, DrawingEffect::HorizontalFlip);
        assert_eq!(command.alpha, 0.5);
        assert_eq!(command.color, Color::rgba(1, 2, 3, 4));
        assert_eq!(command.source, Rect::new(97.0, 0.0, 5.0, 8.0));
    }
}
