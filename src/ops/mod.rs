// ============================================================================
// PIXEL OPERATIONS — pure per-pixel transforms over RGBA buffers
// ============================================================================

pub mod adjustments;
pub mod blend;
pub mod mask;
pub mod transform;

use image::RgbaImage;

/// Every two-buffer operation requires equal dimensions; a mismatch is a
/// programmer error in the calling component, not a runtime condition.
pub(crate) fn assert_same_size(a: &RgbaImage, b: &RgbaImage) {
    assert_eq!(
        (a.width(), a.height()),
        (b.width(), b.height()),
        "buffer dimension mismatch: {}×{} vs {}×{}",
        a.width(),
        a.height(),
        b.width(),
        b.height()
    );
}
