use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Rectangle};
use unicode_width::UnicodeWidthStr;

use crate::config::{LEAF_OUTLINE, TEXT};
use crate::creature::Point;
use crate::surface::{DrawCommand, Font, RenderSurface, ShapeKind};

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Restores the terminal after a panic or an early exit.
pub fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// Render surface that paints world coordinates onto a ratatui canvas
/// stretched over the whole terminal.
pub struct TerminalSurface {
    session: TerminalSession,
    width: f64,
    height: f64,
    background: Color,
    pending: Vec<DrawCommand>,
}

impl TerminalSurface {
    #[must_use]
    pub fn new(session: TerminalSession) -> Self {
        Self {
            session,
            width: 0.0,
            height: 0.0,
            background: Color::Reset,
            pending: Vec::new(),
        }
    }
}

impl RenderSurface for TerminalSurface {
    fn create_window(&mut self, width: f64, height: f64, background: Color) -> io::Result<()> {
        self.width = width;
        self.height = height;
        self.background = background;
        self.pending.clear();
        self.session.terminal_mut().clear()
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
        let commands = std::mem::take(&mut self.pending);
        let (width, height, background) = (self.width, self.height, self.background);

        self.session.terminal_mut().draw(|frame| {
            let area = frame.area();
            let canvas = Canvas::default()
                .background_color(background)
                .marker(Marker::HalfBlock)
                .x_bounds([-width / 2.0, width / 2.0])
                .y_bounds([-height / 2.0, height / 2.0])
                .paint(|ctx| paint(ctx, &commands, units_per_column(width, area)));
            frame.render_widget(canvas, area);
        })?;

        Ok(())
    }
}

fn units_per_column(width: f64, area: Rect) -> f64 {
    if area.width == 0 {
        return 0.0;
    }
    width / f64::from(area.width)
}

fn paint(ctx: &mut Context<'_>, commands: &[DrawCommand], column_width: f64) {
    for command in commands {
        match command {
            DrawCommand::Shape {
                kind: ShapeKind::Square { size },
                position,
                color,
            } => ctx.draw(&Rectangle {
                x: position.x - size / 2.0,
                y: position.y - size / 2.0,
                width: *size,
                height: *size,
                color: *color,
            }),
            DrawCommand::Shape {
                kind: ShapeKind::Leaf,
                position,
                color,
            } => {
                for (index, (x1, y1)) in LEAF_OUTLINE.iter().enumerate() {
                    let (x2, y2) = LEAF_OUTLINE[(index + 1) % LEAF_OUTLINE.len()];
                    ctx.draw(&CanvasLine::new(
                        position.x + x1,
                        position.y + y1,
                        position.x + x2,
                        position.y + y2,
                        *color,
                    ));
                }
            }
            DrawCommand::Text {
                text,
                position,
                alignment,
                font,
            } => {
                // Text is layered above every shape drawn so far.
                ctx.layer();
                let span_width = text.width() as f64 * column_width;
                let x = match alignment {
                    Alignment::Left => position.x,
                    Alignment::Center => position.x - span_width / 2.0,
                    Alignment::Right => position.x - span_width,
                };
                ctx.print(x, position.y, Line::styled(text.clone(), text_style(*font)));
            }
        }
    }
}

fn text_style(font: Font) -> Style {
    let style = Style::new().fg(TEXT);
    if font.bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}
