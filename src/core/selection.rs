//! Interactive ROI selection as an explicit state machine.
//!
//! A front end (GUI, CLI, test) feeds it events: an image was opened, a draw
//! mode was armed, a point was clicked, the selection was cleared. Two clicks
//! in an armed state place a rectangle.
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Point, RoiRect, RoiShape};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SelectionState {
    NoImage,
    /// An image is shown, nothing armed and no rectangle
    Ready,
    AwaitingFirstCorner {
        shape: RoiShape,
    },
    AwaitingSecondCorner {
        shape: RoiShape,
        start: Point,
    },
    Placed {
        rect: RoiRect,
    },
}

#[derive(Debug, Clone)]
pub struct RoiSelector {
    state: SelectionState,
}

impl Default for RoiSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RoiSelector {
    pub fn new() -> Self {
        Self {
            state: SelectionState::NoImage,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn rect(&self) -> Option<RoiRect> {
        match self.state {
            SelectionState::Placed { rect } => Some(rect),
            _ => None,
        }
    }

    /// Showing a new image drops any selection in progress.
    pub fn open_image(&mut self) {
        self.transition(SelectionState::Ready);
    }

    /// Arm a draw mode; the next two clicks define the rectangle.
    pub fn arm(&mut self, shape: RoiShape) -> Result<()> {
        match self.state {
            SelectionState::NoImage => Err(Error::Selection(
                "cannot draw before an image is opened".to_string(),
            )),
            _ => {
                self.transition(SelectionState::AwaitingFirstCorner { shape });
                Ok(())
            }
        }
    }

    /// Disarm without placing anything.
    pub fn cancel(&mut self) {
        if let SelectionState::AwaitingFirstCorner { .. }
        | SelectionState::AwaitingSecondCorner { .. } = self.state
        {
            self.transition(SelectionState::Ready);
        }
    }

    pub fn clear(&mut self) {
        if self.state != SelectionState::NoImage {
            self.transition(SelectionState::Ready);
        }
    }

    /// Feed a click. Returns the rectangle when this click completes one.
    pub fn click(&mut self, point: Point) -> Option<RoiRect> {
        match self.state {
            SelectionState::AwaitingFirstCorner { shape } => {
                self.transition(SelectionState::AwaitingSecondCorner {
                    shape,
                    start: point,
                });
                None
            }
            SelectionState::AwaitingSecondCorner { shape, start } => {
                let end = match shape {
                    RoiShape::Rectangle => point,
                    RoiShape::Square => square_corner(start, point),
                };
                let rect = RoiRect::from_corners(start, end);
                self.transition(SelectionState::Placed { rect });
                Some(rect)
            }
            _ => None,
        }
    }

    fn transition(&mut self, next: SelectionState) {
        debug!("ROI selection: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

// Side is the larger signed extent; a side pointing up/left saturates at zero.
fn square_corner(start: Point, point: Point) -> Point {
    let d_row = point.row as isize - start.row as isize;
    let d_col = point.col as isize - start.col as isize;
    let side = d_row.max(d_col);
    let shift = |v: usize| (v as isize + side).max(0) as usize;
    Point::new(shift(start.row), shift(start.col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_image() {
        let mut sel = RoiSelector::new();
        assert_eq!(sel.state(), SelectionState::NoImage);
        assert!(sel.arm(RoiShape::Rectangle).is_err());
        assert_eq!(sel.click(Point::new(1, 1)), None);
        sel.clear();
        assert_eq!(sel.state(), SelectionState::NoImage);
    }

    #[test]
    fn rectangle_takes_two_clicks() {
        let mut sel = RoiSelector::new();
        sel.open_image();
        assert_eq!(sel.click(Point::new(1, 1)), None);
        assert_eq!(sel.state(), SelectionState::Ready);

        sel.arm(RoiShape::Rectangle).unwrap();
        assert_eq!(sel.click(Point::new(30, 10)), None);
        assert!(matches!(
            sel.state(),
            SelectionState::AwaitingSecondCorner { .. }
        ));
        let rect = sel.click(Point::new(5, 40)).unwrap();
        assert_eq!(
            rect,
            RoiRect {
                top: 5,
                left: 10,
                bottom: 30,
                right: 40
            }
        );
        assert_eq!(sel.rect(), Some(rect));

        // placed rectangles ignore further clicks until re-armed
        assert_eq!(sel.click(Point::new(0, 0)), None);
        assert_eq!(sel.rect(), Some(rect));
    }

    #[test]
    fn square_uses_larger_extent() {
        let mut sel = RoiSelector::new();
        sel.open_image();
        sel.arm(RoiShape::Square).unwrap();
        sel.click(Point::new(10, 10));
        let rect = sel.click(Point::new(14, 30)).unwrap();
        assert_eq!(rect.height(), 20);
        assert_eq!(rect.width(), 20);
        assert_eq!((rect.top, rect.left), (10, 10));
    }

    #[test]
    fn square_towards_origin_saturates() {
        assert_eq!(square_corner(Point::new(5, 5), Point::new(0, 2)), Point::new(2, 2));
        assert_eq!(square_corner(Point::new(3, 3), Point::new(0, 0)), Point::new(0, 0));
    }

    #[test]
    fn clear_and_cancel_return_to_ready() {
        let mut sel = RoiSelector::new();
        sel.open_image();
        sel.arm(RoiShape::Rectangle).unwrap();
        sel.click(Point::new(0, 0));
        sel.cancel();
        assert_eq!(sel.state(), SelectionState::Ready);

        sel.arm(RoiShape::Rectangle).unwrap();
        sel.click(Point::new(0, 0));
        sel.click(Point::new(4, 4));
        sel.cancel();
        assert!(sel.rect().is_some());
        sel.clear();
        assert_eq!(sel.rect(), None);
        assert_eq!(sel.state(), SelectionState::Ready);
    }

    #[test]
    fn opening_image_resets() {
        let mut sel = RoiSelector::new();
        sel.open_image();
        sel.arm(RoiShape::Square).unwrap();
        sel.open_image();
        assert_eq!(sel.state(), SelectionState::Ready);
    }
}
