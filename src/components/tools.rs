// ============================================================================
// TOOL ROUTING — pointer events dispatched to pluggable drawing tools
// ============================================================================

use crate::canvas::CanvasState;
use crate::components::history::EditSession;
use crate::geometry::Point;

/// Pointer state handed to tools alongside each event. Owned by the
/// [`DrawingSurface`], never a process-wide singleton.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub position: Point,
    pub pressed: bool,
}

/// Everything a tool may touch while handling one event: the layer stack,
/// the pointer, the stroke so far, and the gesture's edit session.
pub struct DrawContext<'a> {
    pub canvas: &'a mut CanvasState,
    pub pointer: &'a PointerState,
    pub stroke: &'a [Point],
    pub session: &'a mut EditSession,
}

/// A drawing tool. All handlers default to no-ops so tools implement only
/// the events they care about; the surface never probes for handler
/// existence.
pub trait Drawer {
    fn on_draw_start(&mut self, _ctx: &mut DrawContext<'_>) {}
    fn on_drawing(&mut self, _ctx: &mut DrawContext<'_>) {}
    fn on_draw_end(&mut self, _ctx: &mut DrawContext<'_>) {}
}

/// Routes raw pointer events to the active [`Drawer`].
///
/// Events are synchronous and strictly ordered: start → zero-or-more move
/// → end. The `dragging` flag gates gestures so only one can be active at
/// a time; a second pointer-down during a gesture, or a move/up with no
/// gesture, is dropped. Pointer-up anywhere ends the gesture and drops any
/// patch the tool left live.
#[derive(Default)]
pub struct DrawingSurface {
    pointer: PointerState,
    dragging: bool,
    stroke: Vec<Point>,
    session: EditSession,
}

impl DrawingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Points of the gesture in progress, oldest first.
    pub fn stroke(&self) -> &[Point] {
        &self.stroke
    }

    pub fn pointer_down(&mut self, pos: Point, canvas: &mut CanvasState, drawer: &mut dyn Drawer) {
        if self.dragging {
            return;
        }
        self.dragging = true;
        self.pointer = PointerState {
            position: pos,
            pressed: true,
        };
        self.stroke.clear();
        self.stroke.push(pos);
        let mut ctx = DrawContext {
            canvas,
            pointer: &self.pointer,
            stroke: &self.stroke,
            session: &mut self.session,
        };
        drawer.on_draw_start(&mut ctx);
    }

    pub fn pointer_move(&mut self, pos: Point, canvas: &mut CanvasState, drawer: &mut dyn Drawer) {
        if !self.dragging {
            return;
        }
        self.pointer.position = pos;
        self.stroke.push(pos);
        let mut ctx = DrawContext {
            canvas,
            pointer: &self.pointer,
            stroke: &self.stroke,
            session: &mut self.session,
        };
        drawer.on_drawing(&mut ctx);
    }

    pub fn pointer_up(&mut self, pos: Point, canvas: &mut CanvasState, drawer: &mut dyn Drawer) {
        if !self.dragging {
            return;
        }
        self.pointer = PointerState {
            position: pos,
            pressed: false,
        };
        self.stroke.push(pos);
        let mut ctx = DrawContext {
            canvas,
            pointer: &self.pointer,
            stroke: &self.stroke,
            session: &mut self.session,
        };
        drawer.on_draw_end(&mut ctx);

        // Gesture-scoped cleanup: a tool that left a patch live gets it
        // discarded here, restoring any on-screen preview.
        if self.session.is_live() {
            let buf = &mut canvas.layers[canvas.active_layer_index].pixels;
            self.session.cancel(buf);
        }
        self.dragging = false;
        self.stroke.clear();
    }
}
