//! # Headless Console
//!
//! A [`Console`] with no screen: draw calls are recorded per frame, input
//! is pushed in by the caller. Used by tests and the `crankset_sim` binary.
//!
//! [`InputScript`] describes a run as a list of held-button frames:
//!
//! ```toml
//! [[frames]]
//! held = "A"
//!
//! [[frames]]
//! held = "RIGHT | DOWN"
//! crank = 90.0
//! repeat = 30
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crankset_core::{ButtonState, Buttons, Color, Ellipse, InputSource, Surface};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::DEFAULT_FONT_PATH;
use crate::console::{Console, ConsoleError, FontHandle};

/// One recorded console call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Screen filled.
    Clear(Color),
    /// Font selected.
    SetFont(FontHandle),
    /// Text drawn.
    Text {
        /// The string.
        text: String,
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
    },
    /// Ellipse drawn by the core.
    Ellipse(Ellipse),
    /// FPS overlay drawn.
    Fps {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
    },
}

/// Console double that records instead of drawing.
///
/// [`Console::clear`] starts a new frame, so [`commands`](Self::commands)
/// always holds the calls since the last clear.
#[derive(Debug, Clone)]
pub struct HeadlessConsole {
    fonts: Vec<String>,
    loaded: Vec<String>,
    current: FontHandle,
    buttons: ButtonState,
    crank: f32,
    commands: Vec<DrawCommand>,
}

impl Default for HeadlessConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessConsole {
    /// A console that can load the stock font.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fonts([DEFAULT_FONT_PATH])
    }

    /// A console that can load exactly the given font paths.
    pub fn with_fonts<I, P>(fonts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            fonts: fonts.into_iter().map(Into::into).collect(),
            loaded: Vec::new(),
            current: FontHandle(0),
            buttons: ButtonState::default(),
            crank: 0.0,
            commands: Vec::with_capacity(16),
        }
    }

    /// Sets the input for the next frame. Edges are derived from the
    /// previous call's held mask.
    pub fn set_input(&mut self, held: Buttons, crank_angle: f32) {
        self.buttons = ButtonState::from_transition(self.buttons.current, held);
        self.crank = crank_angle;
    }

    /// Calls recorded since the last clear.
    #[inline]
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded calls, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Ellipses in the current frame.
    pub fn ellipses(&self) -> impl Iterator<Item = &Ellipse> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Ellipse(ellipse) => Some(ellipse),
            _ => None,
        })
    }

    /// Text calls in the current frame as `(text, x, y)`.
    pub fn texts(&self) -> impl Iterator<Item = (&str, i32, i32)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, x, y } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }

    /// Font currently selected.
    #[inline]
    #[must_use]
    pub const fn current_font(&self) -> FontHandle {
        self.current
    }
}

impl InputSource for HeadlessConsole {
    fn button_state(&self) -> ButtonState {
        self.buttons
    }

    fn crank_angle(&self) -> f32 {
        self.crank
    }
}

impl Surface for HeadlessConsole {
    fn draw_ellipse(&mut self, ellipse: &Ellipse) {
        self.commands.push(DrawCommand::Ellipse(*ellipse));
    }
}

impl Console for HeadlessConsole {
    fn load_font(&mut self, path: &str) -> Result<FontHandle, ConsoleError> {
        if !self.fonts.iter().any(|font| font == path) {
            return Err(ConsoleError::FontLoad {
                path: path.to_owned(),
                reason: "no such file".to_owned(),
            });
        }

        let index = match self.loaded.iter().position(|font| font == path) {
            Some(index) => index,
            None => {
                self.loaded.push(path.to_owned());
                self.loaded.len() - 1
            }
        };
        let handle = FontHandle(u32::try_from(index).unwrap_or(u32::MAX));
        debug!(path, ?handle, "font loaded");
        Ok(handle)
    }

    fn set_font(&mut self, font: FontHandle) {
        self.current = font;
        self.commands.push(DrawCommand::SetFont(font));
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn draw_fps(&mut self, x: i32, y: i32) {
        self.commands.push(DrawCommand::Fps { x, y });
    }
}

// ============================================================================
// INPUT SCRIPTS
// ============================================================================

/// Failures loading an [`InputScript`].
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read input script {path}")]
    Io {
        /// Script path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or unknown keys.
    #[error("failed to parse input script: {0}")]
    Parse(#[from] toml::de::Error),

    /// A `held` string is not a button expression.
    #[error("frame {frame}: bad button expression {held:?}: {reason}")]
    Buttons {
        /// Zero-based frame index.
        frame: usize,
        /// The offending string.
        held: String,
        /// Parser message.
        reason: String,
    },

    /// The script has no frames to play.
    #[error("input script has no frames")]
    Empty,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScript {
    #[serde(default)]
    frames: Vec<RawFrame>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFrame {
    #[serde(default)]
    held: String,
    #[serde(default)]
    crank: f32,
    #[serde(default = "one")]
    repeat: usize,
}

const fn one() -> usize {
    1
}

/// One run of identical input frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptFrame {
    /// Buttons held.
    pub held: Buttons,
    /// Crank angle in degrees.
    pub crank: f32,
    /// Number of consecutive frames.
    pub repeat: usize,
}

/// A sequence of input frames for a headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct InputScript {
    frames: Vec<ScriptFrame>,
}

impl InputScript {
    /// Builds a script from frames.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Empty`] if no frame would play.
    pub fn new(frames: Vec<ScriptFrame>) -> Result<Self, ScriptError> {
        if frames.iter().all(|frame| frame.repeat == 0) {
            return Err(ScriptError::Empty);
        }
        Ok(Self { frames })
    }

    /// Parses a TOML script. `held` uses the button names joined by `|`.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Parse`], [`ScriptError::Buttons`] or
    /// [`ScriptError::Empty`].
    pub fn from_toml_str(text: &str) -> Result<Self, ScriptError> {
        let raw: RawScript = toml::from_str(text)?;
        let frames = raw
            .frames
            .into_iter()
            .enumerate()
            .map(|(frame, raw)| {
                let held = bitflags::parser::from_str::<Buttons>(raw.held.trim()).map_err(|error| {
                    ScriptError::Buttons {
                        frame,
                        held: raw.held.clone(),
                        reason: error.to_string(),
                    }
                })?;
                Ok(ScriptFrame {
                    held,
                    crank: raw.crank,
                    repeat: raw.repeat,
                })
            })
            .collect::<Result<Vec<_>, ScriptError>>()?;
        Self::new(frames)
    }

    /// Reads and parses a TOML script file.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Io`] if the file can't be read, otherwise as
    /// [`InputScript::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Built-in run: spawn a few objects, steer them around, sweep the
    /// crank, then despawn.
    #[must_use]
    pub fn demo() -> Self {
        let frame = |held, crank, repeat| ScriptFrame {
            held,
            crank,
            repeat,
        };
        Self {
            frames: vec![
                frame(Buttons::A, 0.0, 1),
                frame(Buttons::empty(), 30.0, 10),
                frame(Buttons::A, 60.0, 1),
                frame(Buttons::empty(), 90.0, 10),
                frame(Buttons::RIGHT, 120.0, 20),
                frame(Buttons::DOWN, 150.0, 20),
                frame(Buttons::LEFT | Buttons::UP, 180.0, 20),
                frame(Buttons::A, 210.0, 1),
                frame(Buttons::empty(), 240.0, 10),
                frame(Buttons::B, 270.0, 1),
                frame(Buttons::empty(), 300.0, 10),
                frame(Buttons::B, 330.0, 1),
                frame(Buttons::empty(), 0.0, 10),
            ],
        }
    }

    /// Runs in file order.
    #[inline]
    #[must_use]
    pub fn runs(&self) -> &[ScriptFrame] {
        &self.frames
    }

    /// Number of frames one pass plays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.iter().map(|frame| frame.repeat).sum()
    }

    /// Whether one pass plays no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every frame of one pass as `(held, crank)`.
    pub fn frames(&self) -> impl Iterator<Item = (Buttons, f32)> + Clone + '_ {
        self.frames
            .iter()
            .flat_map(|frame| std::iter::repeat((frame.held, frame.crank)).take(frame.repeat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crankset_core::Renderer;

    #[test]
    fn test_edges_follow_set_input() {
        let mut console = HeadlessConsole::new();

        console.set_input(Buttons::A, 12.0);
        assert_eq!(console.button_state().pushed, Buttons::A);
        assert!((console.crank_angle() - 12.0).abs() < f32::EPSILON);

        console.set_input(Buttons::A | Buttons::LEFT, 12.0);
        let state = console.button_state();
        assert_eq!(state.current, Buttons::A | Buttons::LEFT);
        assert_eq!(state.pushed, Buttons::LEFT);

        console.set_input(Buttons::empty(), 0.0);
        assert_eq!(console.button_state().released, Buttons::A | Buttons::LEFT);
    }

    #[test]
    fn test_fonts() {
        let mut console = HeadlessConsole::with_fonts(["a.pft", "b.pft"]);
        let a = console.load_font("a.pft").unwrap();
        let b = console.load_font("b.pft").unwrap();
        assert_ne!(a, b);
        assert_eq!(console.load_font("a.pft").unwrap(), a);
        assert!(matches!(
            console.load_font("c.pft"),
            Err(ConsoleError::FontLoad { path, .. }) if path == "c.pft"
        ));
    }

    #[test]
    fn test_clear_starts_a_frame() {
        let mut console = HeadlessConsole::new();
        console.draw_text("stale", 0, 0);
        console.clear(Color::White);
        console.draw_ellipse(&Ellipse::from(&Renderer::default()));
        console.draw_fps(0, 0);

        assert_eq!(console.commands()[0], DrawCommand::Clear(Color::White));
        assert_eq!(console.texts().count(), 0);
        assert_eq!(console.ellipses().count(), 1);

        let taken = console.take_commands();
        assert_eq!(taken.len(), 3);
        assert!(console.commands().is_empty());
    }

    #[test]
    fn test_script_parse() {
        let script = InputScript::from_toml_str(
            r#"
            [[frames]]
            held = "A"

            [[frames]]
            held = "RIGHT | DOWN"
            crank = 90.0
            repeat = 3

            [[frames]]
            repeat = 2
            "#,
        )
        .unwrap();

        assert_eq!(script.len(), 6);
        let frames: Vec<_> = script.frames().collect();
        assert_eq!(frames[0].0, Buttons::A);
        assert_eq!(frames[1].0, Buttons::RIGHT | Buttons::DOWN);
        assert!((frames[3].1 - 90.0).abs() < f32::EPSILON);
        assert_eq!(frames[5].0, Buttons::empty());
    }

    #[test]
    fn test_script_errors() {
        assert!(matches!(
            InputScript::from_toml_str("[[frames]]\nheld = \"X\""),
            Err(ScriptError::Buttons { frame: 0, .. })
        ));
        assert!(matches!(InputScript::from_toml_str(""), Err(ScriptError::Empty)));
        assert!(matches!(
            InputScript::from_toml_str("[[frames]]\nrepeat = 0"),
            Err(ScriptError::Empty)
        ));
        assert!(matches!(
            InputScript::from_toml_str("[[frames]]\npressed = \"A\""),
            Err(ScriptError::Parse(_))
        ));
    }

    #[test]
    fn test_demo_script_plays() {
        let script = InputScript::demo();
        assert!(!script.is_empty());
        assert_eq!(script.frames().count(), script.len());
        assert_eq!(script.frames().filter(|(held, _)| held.contains(Buttons::A)).count(), 3);
    }
}
