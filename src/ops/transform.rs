// ============================================================================
// TRANSFORM OPERATIONS — mirror / flip, verbatim pixel reorder
// ============================================================================

use image::RgbaImage;

use super::assert_same_size;

/// Mirror left↔right into `dst`. Color and alpha copied verbatim.
/// Panics on dimension mismatch.
pub fn mirror_horizontal(src: &RgbaImage, dst: &mut RgbaImage) {
    assert_same_size(src, dst);
    let w = src.width();
    for (x, y, px) in src.enumerate_pixels() {
        dst.put_pixel(w - 1 - x, y, *px);
    }
}

/// Mirror top↕bottom into `dst`. Color and alpha copied verbatim.
/// Panics on dimension mismatch.
pub fn flip_vertical(src: &RgbaImage, dst: &mut RgbaImage) {
    assert_same_size(src, dst);
    let h = src.height();
    for (x, y, px) in src.enumerate_pixels() {
        dst.put_pixel(x, h - 1 - y, *px);
    }
}
