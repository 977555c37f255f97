// ============================================================================
// ALPHA BLENDING — the one blend law shared by tools and the compositor
// ============================================================================

use image::{Rgba, RgbaImage};

use super::assert_same_size;

/// Paint `src` over `dst` ("source over" with straight alpha), all integer
/// math, all divisions floored.
///
/// * src alpha 0   → dst unchanged
/// * src alpha 255 → src copied, fully opaque
/// * otherwise the joint alpha is `1 − (1−srcA)(1−dstA)`; kept scaled by
///   255² so every intermediate stays exact until the final floor division.
///
/// Because rounding happens once per pixel, painting a layer one stroke at
/// a time yields bit-identical output to blending the whole layer at once.
pub fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return Rgba([src[0], src[1], src[2], 255]);
    }
    let da = dst[3] as u32;
    // 255² × joint alpha; strictly positive because sa > 0 here
    let ja = 255 * 255 - (255 - sa) * (255 - da);
    let mut out = [0u8; 4];
    for c in 0..3 {
        let num = dst[c] as u32 * (255 - sa) * da + src[c] as u32 * sa * 255;
        out[c] = (num / ja) as u8;
    }
    out[3] = (ja / 255) as u8;
    Rgba(out)
}

/// [`blend_pixel`] specialized for an always-opaque destination (the
/// compositor's running output): `out = (dst·(255−sa) + src·sa) / 255`,
/// alpha forced to 255. Algebraically the dstA = 255 case of the general
/// law, so the two never disagree.
pub fn blend_pixel_over_opaque(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    if sa == 0 {
        return Rgba([dst[0], dst[1], dst[2], 255]);
    }
    if sa == 255 {
        return Rgba([src[0], src[1], src[2], 255]);
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = ((dst[c] as u32 * (255 - sa) + src[c] as u32 * sa) / 255) as u8;
    }
    out[3] = 255;
    Rgba(out)
}

/// Blend every pixel of `src` over `dst` in place.
/// Panics on dimension mismatch.
pub fn alpha_blend(src: &RgbaImage, dst: &mut RgbaImage) {
    assert_same_size(src, dst);
    for (s, d) in src.pixels().zip(dst.pixels_mut()) {
        *d = blend_pixel(*d, *s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    #[test]
    fn transparent_source_leaves_dst_byte_identical() {
        let src = buf(4, 3, [200, 10, 30, 0]);
        let mut dst = buf(4, 3, [1, 2, 3, 4]);
        let before = dst.clone();
        alpha_blend(&src, &mut dst);
        assert_eq!(dst.as_raw(), before.as_raw());
    }

    #[test]
    fn opaque_source_replaces_dst_exactly() {
        let src = buf(4, 3, [200, 10, 30, 255]);
        let mut dst = buf(4, 3, [1, 2, 3, 40]);
        alpha_blend(&src, &mut dst);
        assert_eq!(dst.as_raw(), src.as_raw());
    }

    #[test]
    fn blending_onto_transparent_yields_source() {
        let out = blend_pixel(Rgba([0, 0, 0, 0]), Rgba([90, 120, 60, 100]));
        assert_eq!(out, Rgba([90, 120, 60, 100]));
    }

    #[test]
    fn half_alpha_over_opaque_matches_specialized_law() {
        let dst = Rgba([10, 200, 40, 255]);
        let src = Rgba([250, 20, 100, 128]);
        assert_eq!(blend_pixel(dst, src), blend_pixel_over_opaque(dst, src));
    }

    #[test]
    fn joint_alpha_grows_monotonically() {
        // Two 50% coats are more opaque than one, never fully opaque
        let once = blend_pixel(Rgba([0, 0, 0, 0]), Rgba([50, 50, 50, 128]));
        let twice = blend_pixel(once, Rgba([50, 50, 50, 128]));
        assert!(twice[3] > once[3]);
        assert!(twice[3] < 255);
        // 1 − (127/255)² scaled to 255, floored
        assert_eq!(twice[3], ((255 * 255 - 127 * 127) / 255) as u8);
    }

    #[test]
    #[should_panic]
    fn dimension_mismatch_panics() {
        let src = buf(4, 4, [0, 0, 0, 255]);
        let mut dst = buf(5, 4, [0, 0, 0, 255]);
        alpha_blend(&src, &mut dst);
    }
}
