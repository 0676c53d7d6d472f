//! # Drawing Surface
//!
//! The only drawing capability the core needs: one ellipse per live renderer.

use crate::ecs::{Color, Renderer};

/// An ellipse outline (or arc) draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Bounding box width.
    pub width: i32,
    /// Bounding box height.
    pub height: i32,
    /// Stroke width.
    pub line_width: i32,
    /// Arc start in degrees.
    pub start_angle: f32,
    /// Arc end in degrees.
    pub end_angle: f32,
    /// Stroke color.
    pub color: Color,
}

impl From<&Renderer> for Ellipse {
    fn from(r: &Renderer) -> Self {
        Self {
            x: r.pos_x,
            y: r.pos_y,
            width: r.width,
            height: r.height,
            line_width: r.line_width,
            start_angle: r.start_angle,
            end_angle: r.end_angle,
            color: r.color,
        }
    }
}

/// Something the draw pass can draw into.
pub trait Surface {
    /// Draws one ellipse.
    fn draw_ellipse(&mut self, ellipse: &Ellipse);
}

/// A [`Surface`] that records every call.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    ellipses: Vec<Ellipse>,
}

impl DrawList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list that will not reallocate below `capacity` draws.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ellipses: Vec::with_capacity(capacity),
        }
    }

    /// Recorded ellipses in draw order.
    #[must_use]
    pub fn ellipses(&self) -> &[Ellipse] {
        &self.ellipses
    }

    /// Forgets recorded draws, keeping the allocation.
    pub fn clear(&mut self) {
        self.ellipses.clear();
    }
}

impl Surface for DrawList {
    fn draw_ellipse(&mut self, ellipse: &Ellipse) {
        self.ellipses.push(*ellipse);
    }
}
