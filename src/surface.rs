use std::io;

use ratatui::layout::Alignment;
use ratatui::style::Color;

use crate::creature::Point;

/// Sprite drawn at a world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned square centred on the position.
    Square { size: f64 },
    /// Leaf outline anchored at the position.
    Leaf,
}

/// Text appearance hint; surfaces map it onto what they can display.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Font {
    pub size: u16,
    pub bold: bool,
}

impl Font {
    #[must_use]
    pub const fn regular(size: u16) -> Self {
        Self { size, bold: false }
    }

    #[must_use]
    pub const fn bold(size: u16) -> Self {
        Self { size, bold: true }
    }
}

/// One queued drawing operation of the current frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Shape {
        kind: ShapeKind,
        position: Point,
        color: Color,
    },
    Text {
        text: String,
        position: Point,
        alignment: Alignment,
        font: Font,
    },
}

/// Bounded 2D canvas in world coordinates (origin at the centre, y up).
///
/// Drawing calls queue work for the current frame; `present_frame` shows it
/// and starts a new, empty frame.
pub trait RenderSurface {
    fn create_window(&mut self, width: f64, height: f64, background: Color) -> io::Result<()>;

    fn draw_shape(&mut self, kind: ShapeKind, position: Point, color: Color);

    fn draw_text(&mut self, text: &str, position: Point, alignment: Alignment, font: Font);

    fn get_window_dimensions(&self) -> (f64, f64);

    fn present_frame(&mut self) -> io::Result<()>;
}

/// Surface that keeps presented frames in memory instead of displaying them.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    width: f64,
    height: f64,
    background: Option<Color>,
    pending: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames: usize,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the most recently presented frame.
    #[must_use]
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.presented
    }

    /// Texts of the most recently presented frame, in drawing order.
    #[must_use]
    pub fn last_frame_texts(&self) -> Vec<&str> {
        self.presented
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Shape { .. } => None,
            })
            .collect()
    }

    #[must_use]
    pub fn frames_presented(&self) -> usize {
        self.frames
    }

    #[must_use]
    pub fn background(&self) -> Option<Color> {
        self.background
    }
}

impl RenderSurface for HeadlessSurface {
    fn create_window(&mut self, width: f64, height: f64, background: Color) -> io::Result<()> {
        self.width = width;
        self.height = height;
        self.background = Some(background);
        Ok(())
    }

    fn draw_shape(&mut self, kind: ShapeKind, position: Point, color: Color) {
        self.pending.push(DrawCommand::Shape {
            kind,
            position,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, alignment: Alignment, font: Font) {
        self.pending.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            alignment,
            font,
        });
    }

    fn get_window_dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn present_frame(&mut self) -> io::Result<()> {
        self.presented = std::mem::take(&mut self.pending);
        self.frames += 1;
        Ok(())
    }
}
