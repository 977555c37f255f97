//! PaintCore — the layered compositing and patch-undo engine behind a
//! desktop painting application.
//!
//! The crate owns the pure pixel-buffer algorithms: alpha-correct blending,
//! mirroring and masking over raw RGBA buffers ([`ops`]), flattening an
//! ordered layer stack into one opaque image ([`canvas`]), rectangular
//! snapshot capture/restore for interactive previews ([`components::history`]),
//! and pointer-event routing to pluggable tools ([`components::tools`]).
//! Window bootstrap, dialogs, and file I/O belong to the host shell, which
//! hands the core pixel buffers and rectangles and gets processed buffers
//! back.
//!
//! Buffers are `image::RgbaImage` (row-major RGBA, 4 bytes per pixel). The
//! flattened composite is always fully opaque. Mismatched buffer dimensions
//! and misuse of the gesture state machine are programmer errors and panic;
//! empty point sets, disjoint rectangles, and off-canvas placements are
//! ordinary boundary conditions handled as no-ops or `None`.

pub mod canvas;
pub mod components;
pub mod geometry;
pub mod logger;
pub mod ops;

pub use canvas::{CanvasState, Layer};
pub use components::history::{EditSession, Patch};
pub use components::tools::{DrawContext, Drawer, DrawingSurface, PointerState};
pub use geometry::{Point, Rect};
