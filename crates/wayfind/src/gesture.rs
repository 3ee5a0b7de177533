//! Floating dock button: drag gesture with corner snapping.
//!
//! The active [`DragGesture`] is the only writer of the transient position
//! while a drag is in flight; [`DockState`] is written exactly once per
//! gesture, at the end, by the snap routine. Hosts render the transient
//! position during the drag and the canonical resting point otherwise.

use serde::{Deserialize, Serialize};

/// Movement below this distance is a tap, not a drag.
pub const TAP_THRESHOLD: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// The four snap targets, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Resting point for this corner, inset by the snap margin. Always
    /// inside the viewport, even when the viewport is smaller than the
    /// margin on a side.
    pub fn resting_point(&self, viewport: Viewport, margin: f64) -> Point {
        let right = (viewport.width - margin).max(margin);
        let bottom = (viewport.height - margin).max(margin);
        let point = match self {
            Corner::TopLeft => Point::new(margin, margin),
            Corner::TopRight => Point::new(right, margin),
            Corner::BottomLeft => Point::new(margin, bottom),
            Corner::BottomRight => Point::new(right, bottom),
        };
        Point::new(
            point.x.clamp(0.0, viewport.width),
            point.y.clamp(0.0, viewport.height),
        )
    }
}

/// Canonical dock position: which corner the button rests in, and where.
///
/// Only [`DockState::settle`] (gesture end) and [`DockState::resize`]
/// (viewport change) write this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockState {
    corner: Corner,
    resting: Point,
    snap_margin: f64,
}

impl DockState {
    pub fn new(corner: Corner, snap_margin: f64, viewport: Viewport) -> Self {
        Self {
            corner,
            resting: corner.resting_point(viewport, snap_margin),
            snap_margin,
        }
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn resting(&self) -> Point {
        self.resting
    }

    pub fn snap_margin(&self) -> f64 {
        self.snap_margin
    }

    /// Reconcile a finished gesture into the canonical state.
    pub fn settle(&mut self, corner: Corner, viewport: Viewport) {
        self.corner = corner;
        self.resting = corner.resting_point(viewport, self.snap_margin);
    }

    /// Re-clamp the resting point to the stored corner after a resize.
    pub fn resize(&mut self, viewport: Viewport) {
        self.resting = self.corner.resting_point(viewport, self.snap_margin);
    }
}

/// Outcome of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Pointer never left the tap threshold; the dock stays put.
    Tap,
    /// The button snapped to a corner.
    Snapped(Corner),
}

/// An in-flight drag. Exclusive owner of the transient position.
#[derive(Debug, Clone, Copy)]
pub struct DragGesture {
    origin: Point,
    start_pointer: Point,
    current: Point,
}

impl DragGesture {
    pub fn begin(origin: Point, pointer: Point) -> Self {
        Self {
            origin,
            start_pointer: pointer,
            current: origin,
        }
    }

    /// Fast-path position update. Returns the transient position for the
    /// host to render; the canonical store is untouched.
    pub fn update(&mut self, pointer: Point) -> Point {
        self.current = Point::new(
            self.origin.x + (pointer.x - self.start_pointer.x),
            self.origin.y + (pointer.y - self.start_pointer.y),
        );
        self.current
    }

    pub fn position(&self) -> Point {
        self.current
    }

    /// Ends the gesture, reconciling into `dock` when it was a real drag.
    pub fn finish(self, dock: &mut DockState, viewport: Viewport) -> DragOutcome {
        if self.current.distance_to(self.origin) < TAP_THRESHOLD {
            return DragOutcome::Tap;
        }
        let corner = nearest_corner(self.current, viewport, dock.snap_margin());
        dock.settle(corner, viewport);
        DragOutcome::Snapped(corner)
    }
}

/// Nearest corner by Euclidean distance to each resting point. Ties resolve
/// in [`Corner::ALL`] order.
fn nearest_corner(position: Point, viewport: Viewport, margin: f64) -> Corner {
    let mut best = Corner::TopLeft;
    let mut best_distance = f64::INFINITY;
    for corner in Corner::ALL {
        let distance = position.distance_to(corner.resting_point(viewport, margin));
        if distance < best_distance {
            best = corner;
            best_distance = distance;
        }
    }
    best
}
