// ============================================================================
// PATCH ENGINE — rectangular snapshots for preview/undo during a gesture
// ============================================================================

use image::RgbaImage;

use crate::geometry::{Point, Rect};

/// An immutable rectangular snapshot of a buffer region.
///
/// The snapshot buffer is sized to the *unclipped* bounding rect of the
/// point cloud (plus margin), so patches captured near an edge keep
/// consistent dimensions; portions outside the source stay fully
/// transparent and are clipped again on placement.
pub struct Patch {
    pixels: RgbaImage,
    /// Unclipped logical rect the snapshot was captured from.
    rect: Rect,
    points: Vec<Point>,
    margin: i32,
}

impl Patch {
    /// Snapshot the region of `source` covered by `points` expanded by
    /// `margin`. Returns `None` for an empty point set.
    pub fn capture(source: &RgbaImage, points: &[Point], margin: i32) -> Option<Patch> {
        assert!(margin >= 0, "Patch::capture: margin must be non-negative");
        let rect = Rect::bounding(points, margin)?;
        let mut pixels = RgbaImage::new(rect.width as u32, rect.height as u32);

        let full = Rect::new(0, 0, source.width() as i32, source.height() as i32);
        let overlap = Rect::intersect(rect, full);
        for y in 0..overlap.height.max(0) {
            for x in 0..overlap.width.max(0) {
                let px = *source.get_pixel((overlap.x + x) as u32, (overlap.y + y) as u32);
                pixels.put_pixel(
                    (overlap.x - rect.x + x) as u32,
                    (overlap.y - rect.y + y) as u32,
                    px,
                );
            }
        }

        Some(Patch {
            pixels,
            rect,
            points: points.to_vec(),
            margin,
        })
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    /// Draw the snapshot onto `dest` centered at `target`, clipped to the
    /// destination bounds. Snapshot pixels with zero alpha never overwrite
    /// the destination; all others copy verbatim. Placing entirely outside
    /// the destination is a no-op.
    pub fn place(&self, target: Point, dest: &mut RgbaImage) {
        let origin = Point::new(
            target.x - self.rect.width / 2,
            target.y - self.rect.height / 2,
        );
        self.draw_at(origin, dest, false);
    }

    /// Redraw the snapshot verbatim (transparent pixels included) at its
    /// original captured location — undoes a speculative edit preview.
    pub fn restore(&self, dest: &mut RgbaImage) {
        self.draw_at(Point::new(self.rect.x, self.rect.y), dest, true);
    }

    fn draw_at(&self, origin: Point, dest: &mut RgbaImage, overwrite_transparent: bool) {
        let dest_rect = Rect::new(origin.x, origin.y, self.rect.width, self.rect.height);
        let full = Rect::new(0, 0, dest.width() as i32, dest.height() as i32);
        let overlap = Rect::intersect(dest_rect, full);
        if overlap.is_empty() {
            return;
        }
        for y in 0..overlap.height {
            for x in 0..overlap.width {
                let px = *self
                    .pixels
                    .get_pixel((overlap.x - origin.x + x) as u32, (overlap.y - origin.y + y) as u32);
                if px[3] == 0 && !overwrite_transparent {
                    continue;
                }
                dest.put_pixel((overlap.x + x) as u32, (overlap.y + y) as u32, px);
            }
        }
    }
}

// ============================================================================
// EDIT SESSION — the per-gesture capture → preview → discard state machine
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum SessionState {
    #[default]
    Idle,
    Captured,
    Previewing,
}

/// Tracks the single live [`Patch`] of an interactive edit gesture.
///
/// Idle → Captured (`begin`) → Previewing (`place_preview`, repeatable) →
/// Idle (`finish`/`cancel`). At most one patch is live per gesture;
/// beginning a second capture, or previewing without one, is a programmer
/// error and panics.
#[derive(Default)]
pub struct EditSession {
    patch: Option<Patch>,
    state: SessionState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        self.patch.is_some()
    }

    pub fn patch(&self) -> Option<&Patch> {
        self.patch.as_ref()
    }

    /// Capture a patch for this gesture. An empty point set is a boundary
    /// condition (returns false, stays Idle), but beginning while a patch
    /// is already live is a contract violation.
    pub fn begin(&mut self, source: &RgbaImage, points: &[Point], margin: i32) -> bool {
        assert!(
            self.patch.is_none(),
            "EditSession::begin: a patch is already live for this gesture"
        );
        match Patch::capture(source, points, margin) {
            Some(patch) => {
                self.patch = Some(patch);
                self.state = SessionState::Captured;
                true
            }
            None => false,
        }
    }

    /// Undo the current preview by redrawing the captured region verbatim.
    pub fn restore_preview(&self, dest: &mut RgbaImage) {
        let patch = self
            .patch
            .as_ref()
            .expect("EditSession::restore_preview: no live patch");
        patch.restore(dest);
    }

    /// Place the patch centered at `target`, first restoring the previous
    /// preview if one is on screen.
    pub fn place_preview(&mut self, target: Point, dest: &mut RgbaImage) {
        let patch = self
            .patch
            .as_ref()
            .expect("EditSession::place_preview: no live patch");
        if self.state == SessionState::Previewing {
            patch.restore(dest);
        }
        patch.place(target, dest);
        self.state = SessionState::Previewing;
    }

    /// Commit the gesture: the preview stays, the patch is discarded.
    pub fn finish(&mut self) {
        self.patch = None;
        self.state = SessionState::Idle;
    }

    /// Abort the gesture, restoring the captured region if a preview was
    /// drawn. Safe to call with no live patch (pointer-up cleanup).
    pub fn cancel(&mut self, dest: &mut RgbaImage) {
        if let Some(patch) = self.patch.take()
            && self.state == SessionState::Previewing
        {
            patch.restore(dest);
        }
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([200, 50, 25, 255])
            } else {
                Rgba([10, 220, 130, 128])
            }
        })
    }

    #[test]
    fn capture_sizes_buffer_to_unclipped_rect() {
        let source = checker(10, 10);
        // Bounding rect (-2,-2,7,7) sticks out past the top-left corner
        let patch = Patch::capture(&source, &[Point::new(0, 0), Point::new(2, 2)], 2).unwrap();
        assert_eq!(patch.rect(), Rect::new(-2, -2, 7, 7));
        assert_eq!((patch.pixels().width(), patch.pixels().height()), (7, 7));
        // Out-of-bounds portion stays transparent
        assert_eq!(*patch.pixels().get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        // In-bounds portion copied verbatim
        assert_eq!(*patch.pixels().get_pixel(2, 2), *source.get_pixel(0, 0));
    }

    #[test]
    fn capture_of_no_points_is_none() {
        let source = checker(4, 4);
        assert!(Patch::capture(&source, &[], 3).is_none());
    }

    #[test]
    fn capture_then_place_at_original_center_round_trips() {
        let source = checker(12, 12);
        let pts = [Point::new(4, 4), Point::new(7, 6)];
        let patch = Patch::capture(&source, &pts, 1).unwrap();
        let rect = patch.rect();

        let mut dest = source.clone();
        // Scribble over the captured region
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                dest.put_pixel(x as u32, y as u32, Rgba([0, 0, 0, 255]));
            }
        }
        let center = Point::new(rect.x + rect.width / 2, rect.y + rect.height / 2);
        patch.place(center, &mut dest);
        // Zero-alpha patch pixels skip, but the source had none in range here
        assert_eq!(dest.as_raw(), source.as_raw());
    }

    #[test]
    fn place_skips_zero_alpha_pixels() {
        let mut source = RgbaImage::from_pixel(6, 6, Rgba([40, 40, 40, 255]));
        source.put_pixel(2, 2, Rgba([99, 99, 99, 0]));
        let patch = Patch::capture(&source, &[Point::new(1, 1), Point::new(3, 3)], 0).unwrap();

        let mut dest = RgbaImage::from_pixel(6, 6, Rgba([7, 7, 7, 7]));
        patch.place(Point::new(2, 2), &mut dest);
        // Transparent snapshot pixel left the destination alone
        assert_eq!(*dest.get_pixel(2, 2), Rgba([7, 7, 7, 7]));
        assert_eq!(*dest.get_pixel(1, 1), Rgba([40, 40, 40, 255]));
    }

    #[test]
    fn place_entirely_off_canvas_is_a_no_op() {
        let source = checker(8, 8);
        let patch = Patch::capture(&source, &[Point::new(1, 1), Point::new(3, 3)], 0).unwrap();
        let mut dest = checker(8, 8);
        let before = dest.clone();
        patch.place(Point::new(500, 500), &mut dest);
        assert_eq!(dest.as_raw(), before.as_raw());
    }

    #[test]
    fn restore_overwrites_transparent_pixels_too() {
        let mut source = RgbaImage::from_pixel(5, 5, Rgba([1, 2, 3, 0]));
        source.put_pixel(2, 2, Rgba([50, 60, 70, 255]));
        let patch = Patch::capture(&source, &[Point::new(0, 0), Point::new(4, 4)], 0).unwrap();

        let mut dest = RgbaImage::from_pixel(5, 5, Rgba([255, 0, 0, 255]));
        patch.restore(&mut dest);
        assert_eq!(dest.as_raw(), source.as_raw());
    }

    #[test]
    fn session_walks_idle_captured_previewing() {
        let source = checker(10, 10);
        let mut dest = source.clone();
        let mut session = EditSession::new();
        assert!(!session.is_live());

        assert!(session.begin(&source, &[Point::new(3, 3), Point::new(5, 5)], 1));
        assert!(session.is_live());

        session.place_preview(Point::new(4, 4), &mut dest);
        session.place_preview(Point::new(5, 5), &mut dest);
        session.finish();
        assert!(!session.is_live());
    }

    #[test]
    fn cancel_restores_the_preview() {
        let source = checker(10, 10);
        let mut dest = source.clone();
        let mut session = EditSession::new();
        session.begin(&source, &[Point::new(3, 3), Point::new(6, 6)], 1);
        session.place_preview(Point::new(5, 5), &mut dest);
        session.cancel(&mut dest);
        // Preview placement stayed inside the captured rect, so restoring
        // the capture brings the buffer back exactly
        assert_eq!(dest.as_raw(), source.as_raw());
        assert!(!session.is_live());
        // Cancel with nothing live is cleanup, not an error
        session.cancel(&mut dest);
    }

    #[test]
    fn begin_with_empty_stroke_is_a_no_op() {
        let source = checker(4, 4);
        let mut session = EditSession::new();
        assert!(!session.begin(&source, &[], 2));
        assert!(!session.is_live());
    }

    #[test]
    #[should_panic(expected = "already live")]
    fn double_capture_panics() {
        let source = checker(4, 4);
        let mut session = EditSession::new();
        session.begin(&source, &[Point::new(1, 1)], 0);
        session.begin(&source, &[Point::new(2, 2)], 0);
    }

    #[test]
    #[should_panic(expected = "no live patch")]
    fn previewing_without_capture_panics() {
        let mut dest = checker(4, 4);
        let mut session = EditSession::new();
        session.place_preview(Point::new(1, 1), &mut dest);
    }
}
