//! Snap guidelines for moving blocks.
//!
//! At the start of a move gesture every unfocused block, plus the container
//! itself, contributes five horizontal and five vertical candidates sized
//! against the dragged (anchor) block. While moving, each axis locks onto the
//! first candidate within tolerance.

use egui::{Rect, Vec2};

/// Default snap distance in pixels
pub const SNAP_TOLERANCE: f32 = 5.0;

/// Candidate for the anchor's `top`, shown as a horizontal line at `show_top`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalLine {
    pub top: f32,
    pub show_top: f32,
}

/// Candidate for the anchor's `left`, shown as a vertical line at `show_left`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalLine {
    pub left: f32,
    pub show_left: f32,
}

/// Guides currently displayed: at most one per axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GuideMarks {
    /// `show_left` of the matched vertical line
    pub x: Option<f32>,
    /// `show_top` of the matched horizontal line
    pub y: Option<f32>,
}

impl GuideMarks {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Candidate set for one gesture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkLines {
    pub x: Vec<VerticalLine>,
    pub y: Vec<HorizontalLine>,
}

impl MarkLines {
    /// Builds the candidates for an anchor of size `anchor` against
    /// `references`, in iteration order. Callers append the container rect last.
    pub fn collect(anchor: Vec2, references: impl IntoIterator<Item = Rect>) -> Self {
        let (width, height) = (anchor.x, anchor.y);
        let mut lines = Self::default();
        for reference in references {
            let (t, l) = (reference.top(), reference.left());
            let (w, h) = (reference.width(), reference.height());

            lines.y.extend([
                // top to top
                HorizontalLine { top: t, show_top: t },
                // top to bottom
                HorizontalLine { top: t + h, show_top: t + h },
                // middle to middle
                HorizontalLine { top: t + h / 2.0 - height / 2.0, show_top: t + h / 2.0 },
                // bottom to top
                HorizontalLine { top: t - height, show_top: t },
                // bottom to bottom
                HorizontalLine { top: t + h - height, show_top: t + h },
            ]);
            lines.x.extend([
                VerticalLine { left: l, show_left: l },
                VerticalLine { left: l + w, show_left: l + w },
                VerticalLine { left: l + w / 2.0 - width / 2.0, show_left: l + w / 2.0 },
                VerticalLine { left: l - width, show_left: l },
                VerticalLine { left: l + w - width, show_left: l + w },
            ]);
        }
        lines
    }

    /// First horizontal candidate strictly closer than `tolerance` to `top`
    pub fn snap_top(&self, top: f32, tolerance: f32) -> Option<HorizontalLine> {
        self.y
            .iter()
            .find(|line| (line.top - top).abs() < tolerance)
            .copied()
    }

    /// First vertical candidate strictly closer than `tolerance` to `left`
    pub fn snap_left(&self, left: f32, tolerance: f32) -> Option<VerticalLine> {
        self.x
            .iter()
            .find(|line| (line.left - left).abs() < tolerance)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.x.len() + self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }
}
