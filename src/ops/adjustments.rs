// ============================================================================
// ADJUSTMENT OPERATIONS — guide overlay, alpha rewrites, layer clearing
// ============================================================================

use image::{Rgba, RgbaImage};

use super::assert_same_size;

/// Half-transparent alpha used for every guide pixel.
const GUIDE_ALPHA: u8 = 128;

/// Neutral gray substituted when an inversion would land on pure white or
/// pure black (both would vanish against common background colors).
const GUIDE_NEUTRAL: [u8; 3] = [128, 128, 128];

/// Build a tracing-guide overlay from `src` into `dst`.
///
/// Every non-transparent source pixel gets its RGB inverted and its alpha
/// forced to 128. Inversions that come out pure white or pure black are
/// replaced with neutral gray. Transparent source pixels leave `dst`
/// untouched.
/// Panics on dimension mismatch.
pub fn guide_image(src: &RgbaImage, dst: &mut RgbaImage) {
    assert_same_size(src, dst);
    for (s, d) in src.pixels().zip(dst.pixels_mut()) {
        if s[3] == 0 {
            continue;
        }
        let inv = [255 - s[0], 255 - s[1], 255 - s[2]];
        let rgb = if inv == [255, 255, 255] || inv == [0, 0, 0] {
            GUIDE_NEUTRAL
        } else {
            inv
        };
        *d = Rgba([rgb[0], rgb[1], rgb[2], GUIDE_ALPHA]);
    }
}

/// Rewrite every pixel's alpha in place: fully-transparent pixels become
/// transparent black (zeroed color channels), everything else gets
/// `new_alpha` verbatim with color untouched.
///
/// Panics when `new_alpha == 0` — collapsing the whole buffer to alpha 0
/// would be non-reversible and is a contract violation.
pub fn opaque_ize(buffer: &mut RgbaImage, new_alpha: u8) {
    assert!(new_alpha > 0, "opaque_ize: new_alpha must be positive");
    for p in buffer.pixels_mut() {
        if p[3] == 0 {
            *p = Rgba([0, 0, 0, 0]);
        } else {
            p[3] = new_alpha;
        }
    }
}

/// Reset every pixel to transparent black. Layers are never destroyed,
/// only cleared with this.
pub fn erase_buffer(buffer: &mut RgbaImage) {
    for p in buffer.pixels_mut() {
        *p = Rgba([0, 0, 0, 0]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_inverts_and_half_fades() {
        let src = RgbaImage::from_pixel(1, 1, Rgba([10, 250, 0, 255]));
        let mut dst = RgbaImage::new(1, 1);
        guide_image(&src, &mut dst);
        assert_eq!(*dst.get_pixel(0, 0), Rgba([245, 5, 255, 128]));
    }

    #[test]
    fn guide_substitutes_gray_for_white_and_black_inversions() {
        let mut src = RgbaImage::new(2, 1);
        src.put_pixel(0, 0, Rgba([0, 0, 0, 200])); // inverts to white
        src.put_pixel(1, 0, Rgba([255, 255, 255, 200])); // inverts to black
        let mut dst = RgbaImage::new(2, 1);
        guide_image(&src, &mut dst);
        assert_eq!(*dst.get_pixel(0, 0), Rgba([128, 128, 128, 128]));
        assert_eq!(*dst.get_pixel(1, 0), Rgba([128, 128, 128, 128]));
    }

    #[test]
    fn guide_skips_transparent_pixels() {
        let src = RgbaImage::from_pixel(3, 3, Rgba([70, 80, 90, 0]));
        let mut dst = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 4]));
        guide_image(&src, &mut dst);
        assert!(dst.pixels().all(|p| *p == Rgba([1, 2, 3, 4])));
    }

    #[test]
    fn opaque_ize_rewrites_alpha_and_zeroes_transparent_color() {
        let mut buf = RgbaImage::new(2, 1);
        buf.put_pixel(0, 0, Rgba([10, 20, 30, 77]));
        buf.put_pixel(1, 0, Rgba([10, 20, 30, 0]));
        opaque_ize(&mut buf, 255);
        assert_eq!(*buf.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
        assert_eq!(*buf.get_pixel(1, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    #[should_panic]
    fn opaque_ize_rejects_zero_alpha() {
        let mut buf = RgbaImage::new(1, 1);
        opaque_ize(&mut buf, 0);
    }

    #[test]
    fn erase_leaves_transparent_black() {
        let mut buf = RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 6]));
        erase_buffer(&mut buf);
        assert!(buf.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }
}
