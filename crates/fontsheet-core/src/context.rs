//! Per-frame batching of text draws
//!
//! Game code queues text from wherever it likes during a frame. The context
//! remembers each request along with the alpha and effect in force at the
//! time, then replays everything in layer order when the frame is flushed.

use std::sync::Arc;

use crate::font::Font;
use crate::traits::Painter;
use crate::types::{Alignment, DrawingEffect, Vector};
use crate::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawState {
    alpha: f32,
    effect: DrawingEffect,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            effect: DrawingEffect::None,
        }
    }
}

#[derive(Debug)]
struct TextRequest {
    font: Arc<Font>,
    text: String,
    position: Vector,
    alignment: Alignment,
    layer: i32,
    color: Color,
    state: DrawState,
}

/// Queue of text draws for one frame
#[derive(Debug, Default)]
pub struct DrawingContext {
    requests: Vec<TextRequest>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl DrawingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `text` for drawing on `layer` (higher layers end up on top)
    pub fn draw_text(
        &mut self,
        font: &Arc<Font>,
        text: &str,
        position: Vector,
        alignment: Alignment,
        layer: i32,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        self.requests.push(TextRequest {
            font: Arc::clone(font),
            text: text.to_string(),
            position,
            alignment,
            layer,
            color,
            state: self.state,
        });
    }

    /// Opacity for requests queued from now on, clamped to `0.0..=1.0`
    pub fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn alpha(&self) -> f32 {
        self.state.alpha
    }

    pub fn set_drawing_effect(&mut self, effect: DrawingEffect) {
        self.state.effect = effect;
    }

    pub fn drawing_effect(&self) -> DrawingEffect {
        self.state.effect
    }

    /// Save the current alpha and effect
    pub fn push_state(&mut self) {
        self.stack.push(self.state);
    }

    /// Restore what the matching [`push_state`](Self::push_state) saved
    pub fn pop_state(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => log::warn!("pop_state without matching push_state, ignoring"),
        }
    }

    /// Number of queued requests
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Drop everything queued without drawing it
    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Flush the frame: every request, lowest layer first, into `painter`
    ///
    /// Requests on the same layer keep their queue order.
    pub fn do_drawing<P: Painter + ?Sized>(&mut self, painter: &mut P) {
        self.requests.sort_by_key(|request| request.layer);
        log::trace!("Drawing {} text requests", self.requests.len());

        for request in self.requests.drain(..) {
            request.font.draw_text(
                painter,
                &request.text,
                request.position,
                request.alignment,
                request.state.effect,
                request.color,
                request.state.alpha,
            );
        }
    }
}
