// ============================================================================
// GEOMETRY — integer points and rectangles shared by every pixel operation
// ============================================================================

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chessboard metric: max(|dx|, |dy|).
    pub fn chebyshev_distance(&self, other: Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Taxicab metric: |dx| + |dy|.
    pub fn manhattan_distance(&self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Axis-aligned integer rectangle.
///
/// `width`/`height` may be zero (empty) and, for `intersect` results on
/// disjoint inputs, negative — callers must treat non-positive dimensions
/// as "no overlap" via [`Rect::is_empty`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rect covering `points`, expanded by `margin` on every side.
    /// Returns `None` for an empty point set.
    ///
    /// Inclusive-corner encoding: a single point with margin 0 yields a
    /// 1×1 rect.
    pub fn bounding(points: &[Point], margin: i32) -> Option<Rect> {
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect {
            x: min_x - margin,
            y: min_y - margin,
            width: max_x - min_x + 1 + 2 * margin,
            height: max_y - min_y + 1 + 2 * margin,
        })
    }

    /// Overlap of two rects. Width/height of the result are non-positive
    /// when the inputs are disjoint.
    pub fn intersect(a: Rect, b: Rect) -> Rect {
        let x = a.x.max(b.x);
        let y = a.y.max(b.y);
        Rect {
            x,
            y,
            width: (a.x + a.width).min(b.x + b.width) - x,
            height: (a.y + a.height).min(b.y + b.height) - y,
        }
    }

    /// Smallest rect covering both inputs.
    pub fn union(a: Rect, b: Rect) -> Rect {
        if a.is_empty() {
            return b;
        }
        if b.is_empty() {
            return a;
        }
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Rect {
            x,
            y,
            width: (a.x + a.width).max(b.x + b.width) - x,
            height: (a.y + a.height).max(b.y + b.height) - y,
        }
    }

    /// Clamp this rect into a `width`×`height` buffer.
    ///
    /// The two inclusive corners are clamped independently into
    /// [0, width-1]×[0, height-1] and the dimensions re-derived
    /// (width = x2 − x1 + 1), so the result always lies inside the buffer.
    ///
    /// A rect entirely outside the buffer degenerates to a 1×1 sliver
    /// pinned at the nearest edge, never an empty rect. Callers that need
    /// "fully outside means nothing to do" must check [`Rect::overlaps`]
    /// against the buffer rect (or test [`Rect::intersect`] for emptiness)
    /// before trusting the clipped result, as the patch engine does.
    pub fn clip_to_bounds(&self, width: u32, height: u32) -> Rect {
        let x1 = self.x.clamp(0, width as i32 - 1);
        let y1 = self.y.clamp(0, height as i32 - 1);
        let x2 = (self.x + self.width - 1).clamp(0, width as i32 - 1);
        let y2 = (self.y + self.height - 1).clamp(0, height as i32 - 1);
        Rect {
            x: x1,
            y: y1,
            width: x2 - x1 + 1,
            height: y2 - y1 + 1,
        }
    }

    /// Half-open containment test: x ∈ [x, x+width), y ∈ [y, y+height).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// True iff the rects share at least one pixel (half-open semantics
    /// matching [`Rect::contains`]).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
