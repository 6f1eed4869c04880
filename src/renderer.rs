use std::io;

use ratatui::layout::Alignment;

use crate::config::{HEAD_COLOR, LEAF_COLOR, SEGMENT_COLORS, SEGMENT_SIZE};
use crate::creature::Point;
use crate::game::{Game, GameOverSummary, Phase};
use crate::surface::{Font, RenderSurface, ShapeKind};

const HUD_INSET_X: f64 = 50.0;
const HUD_INSET_Y: f64 = 40.0;
const LINE_SPACING: f64 = 30.0;

const HUD_FONT: Font = Font::bold(16);
const TITLE_FONT: Font = Font::bold(36);
const BANNER_FONT: Font = Font::bold(30);
const HIGHLIGHT_FONT: Font = Font::bold(20);
const BODY_FONT: Font = Font::regular(16);

/// Draws the full game frame from immutable state and presents it.
pub fn render<S: RenderSurface + ?Sized>(surface: &mut S, game: &Game) -> io::Result<()> {
    let phase = game.phase();

    if phase != Phase::Idle {
        render_item(surface, game);
        render_creature(surface, game);
    }

    render_hud(surface, game);

    match phase {
        Phase::Idle => render_idle_screen(surface, game),
        Phase::Paused => {
            surface.draw_text("PAUSED", Point::ORIGIN, Alignment::Center, BANNER_FONT);
        }
        Phase::Running => {}
    }

    surface.present_frame()
}

fn render_item<S: RenderSurface + ?Sized>(surface: &mut S, game: &Game) {
    if let Some(item) = game.spawner.item() {
        surface.draw_shape(ShapeKind::Leaf, item.position, LEAF_COLOR);
    }
}

fn render_creature<S: RenderSurface + ?Sized>(surface: &mut S, game: &Game) {
    let square = ShapeKind::Square { size: SEGMENT_SIZE };
    let segments: Vec<Point> = game.creature.segments().copied().collect();

    // Tail first so the head ends up on top.
    for (index, segment) in segments.iter().enumerate().rev() {
        surface.draw_shape(square, *segment, SEGMENT_COLORS[index % SEGMENT_COLORS.len()]);
    }
    surface.draw_shape(square, game.creature.head(), HEAD_COLOR);
}

fn render_hud<S: RenderSurface + ?Sized>(surface: &mut S, game: &Game) {
    let field = game.playfield();
    let y = field.half_height() - HUD_INSET_Y;

    surface.draw_text(
        &format!("Score: {}", game.state.score),
        Point::new(-field.half_width() + HUD_INSET_X, y),
        Alignment::Left,
        HUD_FONT,
    );
    surface.draw_text(
        &format!("Difficulty: {}", game.state.difficulty.label()),
        Point::new(0.0, y),
        Alignment::Center,
        HUD_FONT,
    );
    surface.draw_text(
        &format!("High Score: {}", game.state.high_score),
        Point::new(field.half_width() - HUD_INSET_X, y),
        Alignment::Right,
        HUD_FONT,
    );
}

fn render_idle_screen<S: RenderSurface + ?Sized>(surface: &mut S, game: &Game) {
    let start_line = match game.last_game_over {
        Some(summary) => {
            render_game_over_banner(surface, game, summary);
            "Press SPACE to restart"
        }
        None => {
            surface.draw_text(
                "CATERPILLAR GAME",
                Point::new(0.0, 100.0),
                Alignment::Center,
                TITLE_FONT,
            );
            "Press SPACE to start"
        }
    };

    let current = format!("Current difficulty: {}", game.state.difficulty.label());
    let lines = [
        start_line,
        "Arrow keys to move",
        "P to pause",
        "Difficulty: 1-Easy, 2-Normal, 3-Hard",
        current.as_str(),
    ];

    for (index, line) in lines.iter().enumerate() {
        let y = 20.0 - index as f64 * LINE_SPACING;
        surface.draw_text(line, Point::new(0.0, y), Alignment::Center, BODY_FONT);
    }
}

fn render_game_over_banner<S: RenderSurface + ?Sized>(
    surface: &mut S,
    game: &Game,
    summary: GameOverSummary,
) {
    surface.draw_text(
        "GAME OVER",
        Point::new(0.0, 100.0),
        Alignment::Center,
        TITLE_FONT,
    );

    if summary.new_high_score {
        surface.draw_text(
            &format!("NEW HIGH SCORE: {}!", game.state.high_score),
            Point::new(0.0, 60.0),
            Alignment::Center,
            HIGHLIGHT_FONT,
        );
    }
}
