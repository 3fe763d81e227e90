//! Easel core library.
//!
//! Platform-agnostic shape model and interaction logic for the easel
//! drawing surface: the committed shape list with linear undo/redo, the
//! view transform, freehand and parametric shape construction, hit-testing,
//! and selection/drag/marquee handling. Rendering lives in `easel-render`;
//! picker UI, file chrome, and raster decoding are the host's concern.

pub mod camera;
pub mod canvas;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, Document, ImportTicket, SurfaceConfig};
pub use input::{Modifiers, PointerEvent};
pub use selection::Selection;
pub use shapes::{Raster, Rgba, Shape, ShapeOps, ShapeStyle};
pub use tools::{ToolKind, ToolState};
