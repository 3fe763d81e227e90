//! Canvas document, linear history, and the event-driven controller.

use crate::camera::Camera;
use crate::input::{Modifiers, PointerEvent};
use crate::selection::{boxes_overlap, Selection};
use crate::shapes::{
    Ellipse, Freehand, Image, Line, Raster, Rectangle, Rgba, Shape, ShapeStyle, Triangle,
};
use crate::tools::{
    constrain_end, stroke_color, stroke_width, ParametricKind, ToolKind, ToolState,
};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Surface dimensions and background color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    pub background: Rgba,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background: Rgba::white(),
        }
    }
}

impl SurfaceConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// The committed shape list plus the redo buffer.
///
/// The shape list is z-ordered: later entries draw on top. A shape lives in
/// exactly one of the two lists. Any commit invalidates the redo buffer;
/// history is linear and non-branching.
#[derive(Debug, Clone, Default)]
pub struct Document {
    shapes: Vec<Shape>,
    undone: Vec<Shape>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes in z-order, back to front.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Append a finished shape and invalidate the redo buffer.
    pub fn commit(&mut self, shape: Shape) {
        self.shapes.push(shape);
        self.undone.clear();
    }

    /// Move the topmost shape to the redo buffer. No-op on an empty list.
    pub fn undo(&mut self) -> bool {
        match self.shapes.pop() {
            Some(shape) => {
                self.undone.push(shape);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone shape back. No-op on an empty buffer.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(shape) => {
                self.shapes.push(shape);
                true
            }
            None => false,
        }
    }

    /// Destroy all shapes and the redo buffer.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.undone.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.shapes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Topmost shape containing the point, tested front to back.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.shapes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, shape)| shape.hit_test(point))
            .map(|(index, _)| index)
    }

    /// Indices of every shape whose bounding box overlaps `rect`.
    pub fn shapes_in_rect(&self, rect: Rect) -> Vec<usize> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| boxes_overlap(shape.bounds(), rect))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Ticket identifying one pending image decode. A newer ticket supersedes
/// older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTicket(u64);

/// The single in-progress operation, if any.
#[derive(Debug, Clone)]
enum Session {
    Idle,
    /// Capturing a freehand stroke.
    Stroking(Freehand),
    /// Previewing a two-corner shape.
    Shaping {
        kind: ParametricKind,
        start: Point,
        end: Point,
    },
    /// Dragging the selection; `anchor` is the press point minus the hit
    /// shape's reference point.
    Dragging { anchor: Vec2 },
    /// Sweeping a marquee rectangle.
    Marqueeing { start: Point, end: Point },
}

/// The drawing surface controller.
///
/// Owns all mutable state and is driven from a single thread; every handler
/// is a total function over valid state. A pointer release outside the
/// surface bounds still finalizes the operation in flight.
#[derive(Debug)]
pub struct Canvas {
    pub document: Document,
    pub camera: Camera,
    pub selection: Selection,
    config: SurfaceConfig,
    tools: ToolState,
    session: Session,
    pending_import: Option<u64>,
    import_serial: u64,
    pinch_distance: Option<f64>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

impl Canvas {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            document: Document::new(),
            camera: Camera::new(),
            selection: Selection::new(),
            config,
            tools: ToolState::default(),
            session: Session::Idle,
            pending_import: None,
            import_serial: 0,
            pinch_distance: None,
        }
    }

    pub fn config(&self) -> SurfaceConfig {
        self.config
    }

    pub fn background(&self) -> Rgba {
        self.config.background
    }

    pub fn tool_state(&self) -> ToolState {
        self.tools
    }

    /// Apply a picker update. While the select tool is active with a
    /// non-empty selection, a color change recolors every selected shape
    /// immediately.
    pub fn set_tool_state(&mut self, state: ToolState) {
        let color_changed = state.color != self.tools.color;
        if state.tool != self.tools.tool {
            self.session = Session::Idle;
        }
        self.tools = state;
        if color_changed && state.tool == ToolKind::Select && !self.selection.is_empty() {
            for &index in self.selection.indices() {
                if let Some(shape) = self.document.shape_mut(index) {
                    shape.set_color(state.color);
                }
            }
            log::debug!(
                "recolored {} selected shape(s) in place",
                self.selection.len()
            );
        }
    }

    /// Route a pointer event to the matching handler.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                modifiers,
            } => self.pointer_down(position, modifiers),
            PointerEvent::Move {
                position,
                modifiers,
            } => self.pointer_move(position, modifiers),
            PointerEvent::Up {
                position,
                modifiers,
            } => self.pointer_up(position, modifiers),
            PointerEvent::Wheel {
                position,
                delta,
                modifiers,
            } => self.wheel(position, delta, modifiers),
            PointerEvent::Pinch { distance } => self.pinch_update(distance),
            PointerEvent::PinchEnd => self.pinch_end(),
        }
    }

    pub fn pointer_down(&mut self, screen: Point, modifiers: Modifiers) {
        let pos = self.camera.screen_to_drawing(screen);
        let tool = self.tools.tool;
        if tool.is_freehand() {
            let style = ShapeStyle::new(
                stroke_color(tool, self.tools.color, self.config.background),
                stroke_width(tool, self.tools.width),
            );
            self.session = Session::Stroking(Freehand::begin(pos, style));
        } else if let Some(kind) = tool.parametric() {
            self.session = Session::Shaping {
                kind,
                start: pos,
                end: pos,
            };
        } else {
            self.select_down(pos, modifiers);
        }
    }

    pub fn pointer_move(&mut self, screen: Point, modifiers: Modifiers) {
        let pos = self.camera.screen_to_drawing(screen);
        match &mut self.session {
            Session::Idle => {}
            Session::Stroking(stroke) => stroke.add_point(pos),
            Session::Shaping { kind, start, end } => {
                *end = constrain_end(*start, pos, *kind, modifiers.shift);
            }
            Session::Dragging { anchor } => {
                let target = pos - *anchor;
                Self::drag_selection_to(&mut self.document, &self.selection, target);
            }
            Session::Marqueeing { end, .. } => *end = pos,
        }
    }

    pub fn pointer_up(&mut self, screen: Point, modifiers: Modifiers) {
        let pos = self.camera.screen_to_drawing(screen);
        match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Idle => {}
            Session::Stroking(stroke) => {
                // A click without a drag leaves a single point; discard it.
                if stroke.len() >= 2 {
                    log::debug!("committing stroke with {} points", stroke.len());
                    self.document.commit(Shape::Freehand(stroke));
                }
            }
            Session::Shaping { kind, start, .. } => {
                let end = constrain_end(start, pos, kind, modifiers.shift);
                let style = ShapeStyle::new(self.tools.color, self.tools.width);
                log::debug!("committing {kind:?} shape");
                self.document.commit(build_parametric(kind, start, end, style));
            }
            Session::Dragging { .. } => {}
            Session::Marqueeing { start, end: _ } => {
                let rect = Rect::from_points(start, pos);
                let hits = self.document.shapes_in_rect(rect);
                self.selection.replace(hits);
            }
        }
    }

    /// Select-tool press: hit-test, then drag, toggle, or start a marquee.
    fn select_down(&mut self, pos: Point, modifiers: Modifiers) {
        match self.document.hit_test(pos) {
            Some(index) => {
                if self.selection.contains(index) {
                    // Press on the existing selection drags it wholesale.
                } else if modifiers.shift {
                    self.selection.toggle(index);
                } else {
                    self.selection.select_only(index);
                }
                // Anchor against the hit shape even when a shift-toggle just
                // removed it from the selection.
                let reference = self.document.shapes()[index].reference_point();
                self.session = Session::Dragging {
                    anchor: pos - reference,
                };
            }
            None => {
                self.selection.clear();
                self.session = Session::Marqueeing {
                    start: pos,
                    end: pos,
                };
            }
        }
    }

    /// Translate every selected shape so its own reference point lands on
    /// `target`. Mixed-kind selections converge rather than moving rigidly;
    /// that is the documented behavior.
    fn drag_selection_to(document: &mut Document, selection: &Selection, target: Point) {
        for &index in selection.indices() {
            if let Some(shape) = document.shape_mut(index) {
                let delta = target - shape.reference_point();
                shape.translate(delta);
            }
        }
    }

    pub fn wheel(&mut self, position: Point, delta: f64, modifiers: Modifiers) {
        if modifiers.zoom_key() {
            self.camera.wheel_zoom(position, delta);
        }
    }

    /// Two-contact gesture update. The first distance sample is the
    /// baseline; each further sample scales the zoom by the ratio.
    pub fn pinch_update(&mut self, distance: f64) {
        if let Some(previous) = self.pinch_distance {
            if previous > 0.0 {
                self.camera.pinch_scale(distance / previous);
            }
        }
        self.pinch_distance = Some(distance);
    }

    pub fn pinch_end(&mut self) {
        self.pinch_distance = None;
    }

    /// Empty the shape list and the redo buffer.
    pub fn clear(&mut self) {
        log::debug!("clearing {} shape(s)", self.document.len());
        self.document.clear();
        self.selection.clear();
    }

    /// Move the last committed shape to the redo buffer. The selection is
    /// cleared because its indices no longer line up.
    pub fn undo(&mut self) -> bool {
        let did = self.document.undo();
        if did {
            self.selection.clear();
            log::debug!("undo -> {} shape(s)", self.document.len());
        }
        did
    }

    /// Restore the most recently undone shape.
    pub fn redo(&mut self) -> bool {
        let did = self.document.redo();
        if did {
            self.selection.clear();
            log::debug!("redo -> {} shape(s)", self.document.len());
        }
        did
    }

    /// Announce an image decode in flight. Supersedes any pending import:
    /// only the newest ticket can complete.
    pub fn begin_import(&mut self) -> ImportTicket {
        self.import_serial += 1;
        self.pending_import = Some(self.import_serial);
        log::debug!("image import pending (ticket {})", self.import_serial);
        ImportTicket(self.import_serial)
    }

    /// Commit the decoded raster as one image shape, fitted to the surface
    /// and centered. Stale tickets are ignored; a decode that never
    /// completes leaves all state unchanged.
    pub fn complete_import(&mut self, ticket: ImportTicket, raster: Arc<Raster>) -> bool {
        if self.pending_import != Some(ticket.0) {
            log::debug!("ignoring superseded import ticket {}", ticket.0);
            return false;
        }
        self.pending_import = None;
        let image = Image::fitted(raster, self.config.size());
        log::debug!("committing imported image at {:?}", image.rect);
        self.document.commit(Shape::Image(image));
        true
    }

    pub fn has_pending_import(&self) -> bool {
        self.pending_import.is_some()
    }

    /// The uncommitted parametric shape under construction, built with the
    /// active style. Drawn with the same per-kind routines as committed
    /// shapes.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.session {
            Session::Shaping { kind, start, end } => {
                let style = ShapeStyle::new(self.tools.color, self.tools.width);
                Some(build_parametric(kind, start, end, style))
            }
            _ => None,
        }
    }

    /// The stroke currently being captured, if any.
    pub fn current_stroke(&self) -> Option<&Freehand> {
        match &self.session {
            Session::Stroking(stroke) => Some(stroke),
            _ => None,
        }
    }

    /// The active marquee rectangle in drawing space, if any.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self.session {
            Session::Marqueeing { start, end } => Some(Rect::from_points(start, end)),
            _ => None,
        }
    }
}

/// Build a two-corner shape of the given kind.
fn build_parametric(kind: ParametricKind, start: Point, end: Point, style: ShapeStyle) -> Shape {
    match kind {
        ParametricKind::Ellipse => Shape::Ellipse(Ellipse::new(start, end, style)),
        ParametricKind::Rectangle => Shape::Rectangle(Rectangle::new(start, end, style)),
        ParametricKind::Triangle => Shape::Triangle(Triangle::new(start, end, style)),
        ParametricKind::Line => Shape::Line(Line::new(start, end, style)),
    }
}
