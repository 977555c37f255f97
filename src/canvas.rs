use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::geometry::Rect;
use crate::log_warn;
use crate::ops::blend::blend_pixel_over_opaque;

// ============================================================================
// LAYER
// ============================================================================

/// One independently visible pixel buffer in the compositing stack.
///
/// Layers are created once when the canvas is built and live for the whole
/// session; drawing tools mutate their pixels, nothing ever removes them.
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub pixels: RgbaImage,
}

impl Layer {
    fn new(name: String, width: u32, height: u32) -> Self {
        Self {
            name,
            visible: true,
            pixels: RgbaImage::new(width, height),
        }
    }
}

// ============================================================================
// CANVAS STATE — the fixed layer stack plus dirty-region bookkeeping
// ============================================================================

/// The layer stack and everything the shell needs to schedule redraws.
/// Index 0 is the layer furthest back.
pub struct CanvasState {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Layer>,
    pub active_layer_index: usize,
    /// Composited behind all layers; alpha is ignored (the flattened output
    /// is always fully opaque). Defaults to white.
    pub background: Rgba<u8>,
    /// Region touched since the last composite, if any. Merged on each
    /// `mark_dirty` so pending updates are never lost.
    pub dirty_rect: Option<Rect>,
    /// Monotonically increasing counter, bumped on each mark_dirty call.
    pub dirty_generation: u64,
}

impl CanvasState {
    /// Build a canvas with `layer_count` transparent layers.
    /// Zero-sized canvases and empty stacks are contract violations.
    pub fn new(width: u32, height: u32, layer_count: usize) -> Self {
        assert!(width > 0 && height > 0, "canvas dimensions must be positive");
        assert!(layer_count > 0, "canvas needs at least one layer");
        let layers = (0..layer_count)
            .map(|i| Layer::new(format!("Layer {}", i + 1), width, height))
            .collect();
        Self {
            width,
            height,
            layers,
            active_layer_index: 0,
            background: Rgba([255, 255, 255, 255]),
            dirty_rect: None,
            dirty_generation: 0,
        }
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active_layer_index]
    }

    pub fn active_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active_layer_index]
    }

    /// Replace a layer's pixels wholesale (e.g. after an import or a whole
    /// -buffer operation). The new buffer must match the canvas dimensions.
    pub fn set_layer_pixels(&mut self, index: usize, pixels: RgbaImage) {
        assert_eq!(
            (pixels.width(), pixels.height()),
            (self.width, self.height),
            "layer buffer must match canvas dimensions"
        );
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.pixels = pixels;
                self.mark_dirty(None);
            }
            None => log_warn!("set_layer_pixels: layer index {} out of bounds", index),
        }
    }

    pub fn set_layer_visible(&mut self, index: usize, visible: bool) {
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.visible = visible;
                self.mark_dirty(None);
            }
            None => log_warn!("set_layer_visible: layer index {} out of bounds", index),
        }
    }

    /// Clear a layer back to fully transparent. Layers are never removed.
    pub fn clear_layer(&mut self, index: usize) {
        match self.layers.get_mut(index) {
            Some(layer) => {
                crate::ops::adjustments::erase_buffer(&mut layer.pixels);
                self.mark_dirty(None);
            }
            None => log_warn!("clear_layer: layer index {} out of bounds", index),
        }
    }

    /// Record that `rect` (or the whole canvas when `None`) changed.
    /// Merges with any pending dirty rect so no update is lost.
    pub fn mark_dirty(&mut self, rect: Option<Rect>) {
        let full = Rect::new(0, 0, self.width as i32, self.height as i32);
        let incoming = match rect {
            Some(r) => Rect::intersect(r, full),
            None => full,
        };
        if !incoming.is_empty() {
            self.dirty_rect = Some(match self.dirty_rect {
                Some(existing) => Rect::union(existing, incoming),
                None => incoming,
            });
        }
        self.dirty_generation = self.dirty_generation.wrapping_add(1);
    }

    /// Consume the pending dirty rect (the shell calls this right before a
    /// re-composite).
    pub fn take_dirty_rect(&mut self) -> Option<Rect> {
        self.dirty_rect.take()
    }

    // ========================================================================
    // COMPOSITING
    // ========================================================================

    /// Flatten every visible layer, back to front, into one fully opaque
    /// image over the background color.
    ///
    /// Rows are processed in parallel; within a row each visible layer is
    /// blended with the opaque-destination law, which is bit-identical to
    /// blending the layers one at a time with the general alpha law.
    pub fn composite(&self) -> RgbaImage {
        let (w, h) = (self.width, self.height);
        // `pixels` is a pub field, so a caller can swap in a buffer without
        // going through set_layer_pixels; a mismatch here would misalign
        // the row slicing below, so check every layer before touching pixels.
        for layer in &self.layers {
            assert_eq!(
                (layer.pixels.width(), layer.pixels.height()),
                (w, h),
                "layer \"{}\" buffer does not match canvas dimensions",
                layer.name
            );
        }
        let visible: Vec<&RgbaImage> = self
            .layers
            .iter()
            .filter(|l| l.visible)
            .map(|l| &l.pixels)
            .collect();

        let bg = Rgba([self.background[0], self.background[1], self.background[2], 255]);
        let mut result = RgbaImage::from_pixel(w, h, bg);

        let row_bytes = w as usize * 4;
        result
            .par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| {
                for layer in &visible {
                    let src_row = &layer.as_raw()[y * row_bytes..(y + 1) * row_bytes];
                    for x in 0..w as usize {
                        let i = x * 4;
                        let src = Rgba([src_row[i], src_row[i + 1], src_row[i + 2], src_row[i + 3]]);
                        if src[3] == 0 {
                            continue;
                        }
                        let dst = Rgba([row[i], row[i + 1], row[i + 2], row[i + 3]]);
                        let out = blend_pixel_over_opaque(dst, src);
                        row[i..i + 4].copy_from_slice(&out.0);
                    }
                }
            });

        result
    }
}
