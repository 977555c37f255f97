// ============================================================================
// MASK OPERATIONS — color keying, stencil composite, destination-out
// ============================================================================

use image::{Rgba, RgbaImage};

use super::assert_same_size;

/// Extract the pixels of `src` that exactly match `target` into `dst`.
///
/// A pixel passes only when it is fully opaque AND its RGB channels equal
/// `target`'s (target alpha is ignored). Passing pixels are written fully
/// opaque; everything else becomes transparent black.
/// Panics on dimension mismatch.
pub fn mask_image(src: &RgbaImage, target: Rgba<u8>, dst: &mut RgbaImage) {
    assert_same_size(src, dst);
    for (s, d) in src.pixels().zip(dst.pixels_mut()) {
        *d = if s[3] == 255 && s[0] == target[0] && s[1] == target[1] && s[2] == target[2] {
            Rgba([s[0], s[1], s[2], 255])
        } else {
            Rgba([0, 0, 0, 0])
        };
    }
}

/// Stencil copy: wherever `mask` alpha is 255 (or ≠255 when `invert`),
/// copy the `src` pixel into `dst` verbatim, alpha included. All other
/// `dst` pixels keep their previous value.
/// Panics if the three buffers do not share dimensions.
pub fn composite_with_mask(src: &RgbaImage, mask: &RgbaImage, invert: bool, dst: &mut RgbaImage) {
    assert_same_size(src, mask);
    assert_same_size(src, dst);
    for ((s, m), d) in src.pixels().zip(mask.pixels()).zip(dst.pixels_mut()) {
        if (m[3] == 255) != invert {
            *d = *s;
        }
    }
}

/// Punch holes in `dst`: wherever `src` is fully opaque, force the `dst`
/// pixel to transparent black; elsewhere `dst` is unchanged.
/// Panics on dimension mismatch.
pub fn destination_out(src: &RgbaImage, dst: &mut RgbaImage) {
    assert_same_size(src, dst);
    for (s, d) in src.pixels().zip(dst.pixels_mut()) {
        if s[3] == 255 {
            *d = Rgba([0, 0, 0, 0]);
        }
    }
}
