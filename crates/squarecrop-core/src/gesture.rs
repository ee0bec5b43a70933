//! Gesture vocabulary for the cropping widget.
//!
//! The widget consumes a plain stream of pointer events plus pinch updates;
//! the platform adapter is responsible for nothing beyond forwarding them.
//! [`PinchDetector`] is provided for adapters whose platform does not ship a
//! two-finger scale detector of its own.

use serde::{Deserialize, Serialize};

/// Radius of the circular rotate hotspot in viewport pixels.
const HOTSPOT_RADIUS: f64 = 60.0;

/// Margin between the hotspot and the viewport's bottom-right corner.
const HOTSPOT_MARGIN: f64 = 30.0;

/// Finger spans below this are too noisy to derive a scale factor from.
const MIN_PINCH_SPAN: f64 = 10.0;

/// Which interaction currently owns the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureMode {
    /// No pointer down; animations may own the transform.
    #[default]
    None,
    /// Single pointer down, panning.
    Drag,
    /// Second pointer down, pinch-zooming.
    Zoom,
}

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// First pointer down.
    Down { x: f64, y: f64 },
    /// An additional pointer down while one is already held.
    SecondDown { x: f64, y: f64 },
    /// Primary pointer moved.
    Move { x: f64, y: f64 },
    /// All pointers released.
    Up { x: f64, y: f64 },
}

impl PointerEvent {
    /// The event's position in viewport coordinates.
    pub fn position(&self) -> (f64, f64) {
        match *self {
            PointerEvent::Down { x, y }
            | PointerEvent::SecondDown { x, y }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y } => (x, y),
        }
    }
}

/// One pinch update: an incremental scale factor about a focus point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pinch {
    /// Scale factor relative to the previous update (1.0 = no change).
    pub factor: f64,
    /// Focus (finger midpoint) x in viewport coordinates.
    pub focus_x: f64,
    /// Focus (finger midpoint) y in viewport coordinates.
    pub focus_y: f64,
}

/// Converts successive two-finger positions into incremental [`Pinch`]
/// updates.
///
/// Feed it both pointer positions every frame while two fingers are down and
/// call [`PinchDetector::end`] when either lifts. The first update after a
/// reset only records the span and produces nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinchDetector {
    last_span: Option<f64>,
}

impl PinchDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the current positions of both fingers.
    pub fn update(&mut self, p0: (f64, f64), p1: (f64, f64)) -> Option<Pinch> {
        let span = ((p1.0 - p0.0).powi(2) + (p1.1 - p0.1).powi(2)).sqrt();
        if span < MIN_PINCH_SPAN {
            return None;
        }

        let last = self.last_span.replace(span)?;
        Some(Pinch {
            factor: span / last,
            focus_x: (p0.0 + p1.0) / 2.0,
            focus_y: (p0.1 + p1.1) / 2.0,
        })
    }

    /// Forget the tracked span; the next update starts a fresh gesture.
    pub fn end(&mut self) {
        self.last_span = None;
    }
}

/// The circular tap target that triggers rotation.
///
/// Sits inside the bottom-right corner of the viewport, independent of the
/// image. Events inside it are consumed before gesture dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateHotspot {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl RotateHotspot {
    /// Place the hotspot for a viewport of the given dimensions.
    pub fn for_viewport(view_width: u32, view_height: u32) -> Self {
        Self {
            cx: view_width as f64 - HOTSPOT_RADIUS - HOTSPOT_MARGIN,
            cy: view_height as f64 - HOTSPOT_RADIUS - HOTSPOT_MARGIN,
            radius: HOTSPOT_RADIUS,
        }
    }

    /// Hit test a viewport position against the circle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_position() {
        assert_eq!(PointerEvent::Down { x: 3.0, y: 4.0 }.position(), (3.0, 4.0));
        assert_eq!(PointerEvent::Up { x: -1.0, y: 0.5 }.position(), (-1.0, 0.5));
    }

    #[test]
    fn test_pinch_detector_first_update_yields_nothing() {
        let mut detector = PinchDetector::new();
        assert!(detector.update((0.0, 0.0), (100.0, 0.0)).is_none());
    }

    #[test]
    fn test_pinch_detector_factor_from_span_ratio() {
        let mut detector = PinchDetector::new();
        detector.update((0.0, 0.0), (100.0, 0.0));

        let pinch = detector.update((0.0, 0.0), (150.0, 0.0)).unwrap();
        assert!((pinch.factor - 1.5).abs() < 1e-9);
        assert_eq!((pinch.focus_x, pinch.focus_y), (75.0, 0.0));
    }

    #[test]
    fn test_pinch_detector_contracting_fingers() {
        let mut detector = PinchDetector::new();
        detector.update((0.0, 0.0), (200.0, 0.0));

        let pinch = detector.update((0.0, 0.0), (100.0, 0.0)).unwrap();
        assert!((pinch.factor - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_pinch_detector_ignores_tiny_spans() {
        let mut detector = PinchDetector::new();
        detector.update((0.0, 0.0), (100.0, 0.0));
        assert!(detector.update((0.0, 0.0), (5.0, 0.0)).is_none());
    }

    #[test]
    fn test_pinch_detector_end_resets() {
        let mut detector = PinchDetector::new();
        detector.update((0.0, 0.0), (100.0, 0.0));
        detector.end();
        assert!(detector.update((0.0, 0.0), (120.0, 0.0)).is_none());
    }

    #[test]
    fn test_hotspot_placement() {
        let hotspot = RotateHotspot::for_viewport(1000, 800);
        assert_eq!(hotspot.cx, 910.0);
        assert_eq!(hotspot.cy, 710.0);
        assert_eq!(hotspot.radius, 60.0);
    }

    #[test]
    fn test_hotspot_hit_test() {
        let hotspot = RotateHotspot::for_viewport(1000, 1000);
        assert!(hotspot.contains(hotspot.cx, hotspot.cy));
        assert!(hotspot.contains(hotspot.cx + 59.0, hotspot.cy));
        assert!(!hotspot.contains(hotspot.cx + 61.0, hotspot.cy));
        assert!(!hotspot.contains(0.0, 0.0));
    }
}
