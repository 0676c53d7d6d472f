//! # Component Types
//!
//! Components are plain data. Liveness is tracked by the pool that holds
//! them, not by the records themselves.

use serde::{Deserialize, Serialize};

/// Marker trait for records stored in a [`ComponentPool`](crate::ComponentPool).
///
/// Records must be:
/// - `Copy`: slot reuse is a plain overwrite
/// - `Default`: every slot is filled at pool creation
pub trait Component: Copy + Default + 'static {
    /// Name of the component kind, used in errors and logs.
    const NAME: &'static str;
}

/// Solid drawing colors of the 1-bit display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Pixel on.
    #[default]
    Black,
    /// Pixel off.
    White,
    /// Leave the pixel as it is.
    Clear,
    /// Invert the pixel.
    Xor,
}

/// Visual shape of an entity: an ellipse outline (or arc) in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Renderer {
    /// Left edge in pixels.
    pub pos_x: i32,
    /// Top edge in pixels.
    pub pos_y: i32,
    /// Bounding box width in pixels.
    pub width: i32,
    /// Bounding box height in pixels.
    pub height: i32,
    /// Stroke width in pixels.
    pub line_width: i32,
    /// Arc start in degrees.
    pub start_angle: f32,
    /// Arc end in degrees.
    pub end_angle: f32,
    /// Stroke color.
    pub color: Color,
}

impl Component for Renderer {
    const NAME: &'static str = "renderer";
}

impl Renderer {
    /// Moves the shape by a pixel offset.
    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.pos_x = self.pos_x.saturating_add(dx);
        self.pos_y = self.pos_y.saturating_add(dy);
    }

    /// Sets both dimensions to the same value.
    #[inline]
    pub fn set_size(&mut self, size: i32) {
        self.width = size;
        self.height = size;
    }
}

/// Scalar driver for the size of a linked renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Resizer {
    /// Current driven size.
    pub size: f32,
}

impl Component for Resizer {
    const NAME: &'static str = "resizer";
}

/// Per-tick movement step applied while the D-pad is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controller {
    /// Horizontal step in pixels.
    pub dx: i32,
    /// Vertical step in pixels.
    pub dy: i32,
}

impl Component for Controller {
    const NAME: &'static str = "controller";
}
