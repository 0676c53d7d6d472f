//! # Bouncing Text
//!
//! A text box drifting across the screen, reflecting off the edges.

use serde::{Deserialize, Serialize};

/// Screen and text-box geometry plus the initial velocity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BounceConfig {
    /// Text to draw.
    pub text: String,
    /// Display width in pixels.
    pub screen_width: i32,
    /// Display height in pixels.
    pub screen_height: i32,
    /// Width of the rendered text.
    pub text_width: i32,
    /// Height of the rendered text.
    pub text_height: i32,
    /// Horizontal pixels per tick.
    pub dx: i32,
    /// Vertical pixels per tick.
    pub dy: i32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            text: "Goodbye World!".to_owned(),
            screen_width: 400,
            screen_height: 240,
            text_width: 86,
            text_height: 16,
            dx: 1,
            dy: 2,
        }
    }
}

impl BounceConfig {
    /// Returns a message if the text box does not fit on screen.
    #[must_use]
    pub fn problem(&self) -> Option<String> {
        if self.text_width <= 0 || self.text_height <= 0 {
            return Some(format!(
                "bounce text box must be positive, got {}x{}",
                self.text_width, self.text_height
            ));
        }
        if self.text_width > self.screen_width || self.text_height > self.screen_height {
            return Some(format!(
                "bounce text box {}x{} does not fit the {}x{} screen",
                self.text_width, self.text_height, self.screen_width, self.screen_height
            ));
        }
        None
    }
}

/// Position and velocity of the bouncing text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextBouncer {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    max_x: i32,
    max_y: i32,
}

impl TextBouncer {
    /// Starts the text centered on screen.
    #[must_use]
    pub fn new(config: &BounceConfig) -> Self {
        let max_x = config.screen_width - config.text_width;
        let max_y = config.screen_height - config.text_height;
        Self {
            x: max_x / 2,
            y: max_y / 2,
            dx: config.dx,
            dy: config.dy,
            max_x,
            max_y,
        }
    }

    /// Current top-left corner.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub const fn velocity(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// Moves one tick, then flips the velocity on any axis that left the
    /// screen. The position is not clamped, so the text may overshoot an
    /// edge by up to one step before coming back.
    pub fn step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;

        if self.x < 0 || self.x > self.max_x {
            self.dx = -self.dx;
        }
        if self.y < 0 || self.y > self.max_y {
            self.dy = -self.dy;
        }
    }
}
