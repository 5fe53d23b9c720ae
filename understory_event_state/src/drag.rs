// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and resize sessions for movable, resizable boxes.
//!
//! A session starts on pointer press with a [`Grip`] (free move, or one of eight
//! [`ResizeEdge`]s), the press position and the box rectangle at press time.
//! Every pointer move yields the new rectangle computed from the total offset
//! since the press, never from the previous move, so rounding never drifts.
//!
//! | Grip          | left      | top       | width     | height    |
//! |---------------|-----------|-----------|-----------|-----------|
//! | `Move`        | `+dx`     | `+dy`     |           |           |
//! | `Top`         |           | `+dy`     |           | `-dy`     |
//! | `Bottom`      |           |           |           | `+dy`     |
//! | `Left`        | `+dx`     |           | `-dx`     |           |
//! | `Right`       |           |           | `+dx`     |           |
//! | `TopLeft`     | `+dx`     | `+dy`     | `-dx`     | `-dy`     |
//! | `TopRight`    |           | `+dy`     | `+dx`     | `-dy`     |
//! | `BottomLeft`  | `+dx`     |           | `-dx`     | `+dy`     |
//! | `BottomRight` |           |           | `+dx`     | `+dy`     |
//!
//! Sizes are not floored: dragging an edge past the opposite one produces a
//! negative width or height, and the returned [`Rect`] is left unnormalized.
//! Configure [`DragResizeState::with_min_size`] to clamp instead; the edge
//! opposite the grip then stays put.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_event_state::drag::{DragResizeState, Grip, ResizeEdge};
//!
//! let mut session = DragResizeState::new();
//! let dialog = Rect::new(100.0, 50.0, 700.0, 450.0);
//!
//! session.begin(Grip::Resize(ResizeEdge::BottomRight), Point::new(700.0, 450.0), dialog);
//! let r = session.update(Point::new(740.0, 465.0)).unwrap();
//! assert_eq!((r.x0, r.y0, r.width(), r.height()), (100.0, 50.0, 640.0, 415.0));
//!
//! assert_eq!(session.end(), Some(Grip::Resize(ResizeEdge::BottomRight)));
//! assert!(session.update(Point::new(0.0, 0.0)).is_none());
//! ```

use kurbo::{Point, Rect, Size};

/// One of the eight resize handles around a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl ResizeEdge {
    /// All handles, edges first.
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Lowercase handle name, e.g. `"topleft"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        }
    }

    /// Parses a name produced by [`ResizeEdge::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// CSS cursor shown while this handle is active.
    #[must_use]
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::Top | Self::Bottom => "ns-resize",
            Self::Left | Self::Right => "ew-resize",
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
        }
    }

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub const fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub const fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub const fn grows_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub const fn grows_down(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// What a press grabbed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Grip {
    /// Free move of the whole box.
    Move,
    /// Resize from one handle.
    Resize(ResizeEdge),
}

impl Grip {
    /// CSS cursor shown while this grip is active.
    #[must_use]
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::Move => "pointer",
            Self::Resize(edge) => edge.cursor(),
        }
    }
}

/// Maps a point to the grip under it.
///
/// Handles are `thickness` wide bands along the inside of `bounds`; corners
/// are `thickness` squares and win over edges. Any other point inside the box
/// is [`Grip::Move`]. Points outside `bounds` return `None`.
#[must_use]
pub fn hit_grip(bounds: Rect, point: Point, thickness: f64) -> Option<Grip> {
    if !bounds.contains(point) {
        return None;
    }
    let top = point.y < bounds.y0 + thickness;
    let bottom = point.y >= bounds.y1 - thickness;
    let left = point.x < bounds.x0 + thickness;
    let right = point.x >= bounds.x1 - thickness;
    let edge = match (top, bottom, left, right) {
        (true, _, true, _) => ResizeEdge::TopLeft,
        (true, _, _, true) => ResizeEdge::TopRight,
        (_, true, true, _) => ResizeEdge::BottomLeft,
        (_, true, _, true) => ResizeEdge::BottomRight,
        (true, ..) => ResizeEdge::Top,
        (_, true, ..) => ResizeEdge::Bottom,
        (_, _, true, _) => ResizeEdge::Left,
        (.., true) => ResizeEdge::Right,
        _ => return Some(Grip::Move),
    };
    Some(Grip::Resize(edge))
}

#[derive(Copy, Clone, Debug)]
struct Session {
    grip: Grip,
    origin: Point,
    rect: Rect,
}

/// Tracks one press-move-release cycle on a movable, resizable box.
#[derive(Copy, Clone, Debug, Default)]
pub struct DragResizeState {
    session: Option<Session>,
    min_size: Option<Size>,
}

impl DragResizeState {
    /// Creates an idle state with no size floor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamps resized boxes to at least `min`.
    #[must_use]
    pub fn with_min_size(mut self, min: Size) -> Self {
        self.min_size = Some(min);
        self
    }

    /// Starts a session. Any running session is replaced.
    pub fn begin(&mut self, grip: Grip, pointer: Point, rect: Rect) {
        self.session = Some(Session {
            grip,
            origin: pointer,
            rect,
        });
    }

    /// Computes the box rectangle for the current pointer position.
    ///
    /// Returns `None` while idle.
    pub fn update(&mut self, pointer: Point) -> Option<Rect> {
        let Session { grip, origin, rect } = self.session?;
        let d = pointer - origin;
        let (mut left, mut top) = (rect.x0, rect.y0);
        let (mut width, mut height) = (rect.width(), rect.height());

        match grip {
            Grip::Move => {
                left += d.x;
                top += d.y;
            }
            Grip::Resize(edge) => {
                if edge.moves_left() {
                    left += d.x;
                    width -= d.x;
                }
                if edge.grows_right() {
                    width += d.x;
                }
                if edge.moves_top() {
                    top += d.y;
                    height -= d.y;
                }
                if edge.grows_down() {
                    height += d.y;
                }
                if let Some(min) = self.min_size {
                    if width < min.width {
                        width = min.width;
                        if edge.moves_left() {
                            left = rect.x0 + rect.width() - width;
                        }
                    }
                    if height < min.height {
                        height = min.height;
                        if edge.moves_top() {
                            top = rect.y0 + rect.height() - height;
                        }
                    }
                }
            }
        }
        Some(Rect::new(left, top, left + width, top + height))
    }

    /// Ends the session, returning the grip that was active.
    pub fn end(&mut self) -> Option<Grip> {
        self.session.take().map(|s| s.grip)
    }

    /// Returns `true` while a session is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The active grip, if any.
    #[must_use]
    pub fn grip(&self) -> Option<Grip> {
        self.session.map(|s| s.grip)
    }

    /// The box rectangle captured at press time.
    #[must_use]
    pub fn origin_rect(&self) -> Option<Rect> {
        self.session.map(|s| s.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(100.0, 50.0, 700.0, 450.0);

    fn ltwh(r: Rect) -> (f64, f64, f64, f64) {
        (r.x0, r.y0, r.width(), r.height())
    }

    fn drag(grip: Grip, dx: f64, dy: f64) -> (f64, f64, f64, f64) {
        let mut s = DragResizeState::new();
        let press = Point::new(300.0, 200.0);
        s.begin(grip, press, RECT);
        ltwh(s.update(press + kurbo::Vec2::new(dx, dy)).unwrap())
    }

    #[test]
    fn idle_update_is_none() {
        let mut s = DragResizeState::new();
        assert!(!s.is_active());
        assert!(s.update(Point::ZERO).is_none());
        assert_eq!(s.end(), None);
    }

    #[test]
    fn bottom_right_grows() {
        let r = drag(Grip::Resize(ResizeEdge::BottomRight), 40.0, 15.0);
        assert_eq!(r, (100.0, 50.0, 640.0, 415.0));
    }

    #[test]
    fn top_left_shrinks_and_shifts() {
        let r = drag(Grip::Resize(ResizeEdge::TopLeft), 40.0, 15.0);
        assert_eq!(r, (140.0, 65.0, 560.0, 385.0));
    }

    #[test]
    fn every_grip_follows_its_formula() {
        use ResizeEdge::*;
        let (dx, dy) = (10.0, 20.0);
        let cases = [
            (Grip::Move, (110.0, 70.0, 600.0, 400.0)),
            (Grip::Resize(Top), (100.0, 70.0, 600.0, 380.0)),
            (Grip::Resize(Bottom), (100.0, 50.0, 600.0, 420.0)),
            (Grip::Resize(Left), (110.0, 50.0, 590.0, 400.0)),
            (Grip::Resize(Right), (100.0, 50.0, 610.0, 400.0)),
            (Grip::Resize(TopLeft), (110.0, 70.0, 590.0, 380.0)),
            (Grip::Resize(TopRight), (100.0, 70.0, 610.0, 380.0)),
            (Grip::Resize(BottomLeft), (110.0, 50.0, 590.0, 420.0)),
            (Grip::Resize(BottomRight), (100.0, 50.0, 610.0, 420.0)),
        ];
        for (grip, expected) in cases {
            assert_eq!(drag(grip, dx, dy), expected, "{grip:?}");
        }
    }

    #[test]
    fn updates_are_relative_to_the_press() {
        let mut s = DragResizeState::new();
        s.begin(Grip::Move, Point::new(0.0, 0.0), RECT);
        s.update(Point::new(50.0, 50.0));
        let r = s.update(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(ltwh(r), (105.0, 55.0, 600.0, 400.0));
    }

    #[test]
    fn no_floor_by_default() {
        let r = drag(Grip::Resize(ResizeEdge::Right), -700.0, 0.0);
        assert_eq!(r.2, -100.0);
    }

    #[test]
    fn min_size_keeps_opposite_edge() {
        let mut s = DragResizeState::new().with_min_size(Size::new(50.0, 40.0));
        s.begin(Grip::Resize(ResizeEdge::TopLeft), Point::ZERO, RECT);
        let r = s.update(Point::new(1000.0, 1000.0)).unwrap();
        assert_eq!(ltwh(r), (650.0, 410.0, 50.0, 40.0));
        assert_eq!(r.x1, RECT.x1);
        assert_eq!(r.y1, RECT.y1);
    }

    #[test]
    fn hit_regions() {
        let b = Rect::new(0.0, 0.0, 100.0, 100.0);
        let at = |x, y| hit_grip(b, Point::new(x, y), 10.0);
        assert_eq!(at(2.0, 2.0), Some(Grip::Resize(ResizeEdge::TopLeft)));
        assert_eq!(at(98.0, 2.0), Some(Grip::Resize(ResizeEdge::TopRight)));
        assert_eq!(at(2.0, 98.0), Some(Grip::Resize(ResizeEdge::BottomLeft)));
        assert_eq!(at(98.0, 98.0), Some(Grip::Resize(ResizeEdge::BottomRight)));
        assert_eq!(at(50.0, 2.0), Some(Grip::Resize(ResizeEdge::Top)));
        assert_eq!(at(50.0, 95.0), Some(Grip::Resize(ResizeEdge::Bottom)));
        assert_eq!(at(5.0, 50.0), Some(Grip::Resize(ResizeEdge::Left)));
        assert_eq!(at(95.0, 50.0), Some(Grip::Resize(ResizeEdge::Right)));
        assert_eq!(at(50.0, 50.0), Some(Grip::Move));
        assert_eq!(at(150.0, 50.0), None);
    }

    #[test]
    fn names_and_cursors() {
        for edge in ResizeEdge::ALL {
            assert_eq!(ResizeEdge::from_name(edge.name()), Some(edge));
        }
        assert_eq!(Grip::Move.cursor(), "pointer");
        assert_eq!(Grip::Resize(ResizeEdge::TopRight).cursor(), "nesw-resize");
        assert_eq!(ResizeEdge::from_name("middle"), None);
    }
}
