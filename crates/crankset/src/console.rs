//! # Host Console
//!
//! Everything the game needs from the device beyond what the core asks for:
//! fonts, text, clearing and the FPS overlay.

use crankset_core::{Color, InputSource, Surface};
use thiserror::Error;

/// A font loaded by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Failures reported by the console.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// The font file is missing or unreadable.
    #[error("couldn't load font {path}: {reason}")]
    FontLoad {
        /// Requested font path.
        path: String,
        /// Console's explanation.
        reason: String,
    },
}

/// The host device: input, the core's drawing seam, and the cosmetic calls
/// of the demo frame.
pub trait Console: Surface + InputSource {
    /// Loads a font. Only called at startup.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::FontLoad`] if the font cannot be loaded.
    fn load_font(&mut self, path: &str) -> Result<FontHandle, ConsoleError>;

    /// Selects the font for subsequent text.
    fn set_font(&mut self, font: FontHandle);

    /// Fills the screen.
    fn clear(&mut self, color: Color);

    /// Draws ASCII text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Draws the frame-rate overlay.
    fn draw_fps(&mut self, x: i32, y: i32);
}
