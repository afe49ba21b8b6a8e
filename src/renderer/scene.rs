//! Per-screen drawing
//!
//! Exactly one screen is drawn per frame, chosen by the active `GameState`.
//! Sizes are given at the 800x600 design resolution and scaled.

use glam::Vec2;

use super::colors::{self, BLACK, GREEN, RED, WHITE, YELLOW};
use super::{Align, Color, Surface, shapes};
use crate::consts::*;
use crate::sim::{
    Card, Game, GameContext, GameState, HIT_TEXT, PackOpeningSession, Rect, Viewport,
    layout_collection,
};

/// Seconds left at which the timer turns red
const TIMER_WARNING: f32 = 10.0;

/// Draw the active screen. The caller presents the frame.
pub fn render(game: &Game, surface: &mut impl Surface) {
    surface.clear(BLACK);
    let ctx = &game.ctx;
    match &game.state {
        GameState::Start => start_screen(surface, ctx),
        GameState::Shooting => shooting(surface, ctx),
        GameState::PackOpening(session) => {
            if session.is_opened {
                opened_cards(surface, ctx, session);
            } else {
                tearing_pack(surface, session);
            }
        }
        GameState::CardCollection { cards } => collection(surface, ctx.viewport, cards),
        GameState::Result => result_screen(surface, ctx),
    }
}

/// Text centered horizontally; `size` is at design resolution
fn centered(surface: &mut impl Surface, v: Viewport, text: &str, y: f32, size: f32, color: Color) {
    surface.text(text, Vec2::new(v.width / 2.0, y), v.px(size), Align::Center, color);
}

fn start_screen(surface: &mut impl Surface, ctx: &GameContext) {
    let v = ctx.viewport;
    centered(surface, v, "Shoot down the card packs!", v.px(80.0), 40.0, YELLOW);

    let budget = format!(
        "{} shots, {} seconds",
        ctx.settings.initial_ammo, ctx.settings.time_limit
    );
    let packs = format!("{} packs in all", TARGET_COUNT);
    let rules: [&str; 10] = [
        "How to play",
        "",
        "Arrow keys: move the crosshair",
        "Space: fire (or click a pack)",
        "",
        "Hit the moving packs!",
        "Every pack you hit is yours to open",
        "",
        &budget,
        &packs,
    ];
    for (i, rule) in rules.iter().enumerate() {
        if rule.is_empty() {
            continue;
        }
        let color = if i == 0 { GREEN } else { WHITE };
        centered(surface, v, rule, v.px(150.0 + 28.0 * i as f32), 18.0, color);
    }

    centered(surface, v, "Press SPACE to start!", v.height - v.px(60.0), 24.0, GREEN);
}

fn shooting(surface: &mut impl Surface, ctx: &GameContext) {
    let v = ctx.viewport;
    for pack in ctx.packs.iter().filter(|p| !p.destroyed) {
        shapes::pack(surface, pack.image.as_ref(), pack.rect(), v.scale);
    }
    for effect in &ctx.effects {
        let color = colors::with_alpha(YELLOW, effect.alpha());
        surface.text(HIT_TEXT, effect.pos, effect.font_size(), Align::Center, color);
    }
    shapes::crosshair(surface, &ctx.crosshair);
    hud(surface, ctx);
}

fn hud(surface: &mut impl Surface, ctx: &GameContext) {
    let v = ctx.viewport;
    let run = &ctx.run;
    let size = v.px(22.0);
    let line = v.px(30.0);
    let row = |i: f32| Vec2::new(10.0, 10.0 + line * i + size / 2.0);

    let remaining = run.time_remaining();
    let time_color = if remaining <= TIMER_WARNING { RED } else { WHITE };
    surface.text(&format!("Ammo: {}", run.ammo_remaining), row(0.0), size, Align::Left, WHITE);
    surface.text(
        &format!("Packs: {}/{}", run.destroyed_count, ctx.packs.len()),
        row(1.0),
        size,
        Align::Left,
        WHITE,
    );
    surface.text(&format!("Time: {:.1}s", remaining), row(2.0), size, Align::Left, time_color);

    centered(surface, v, "Arrows: move  Space: fire", v.height - v.px(20.0), 18.0, YELLOW);
}

fn result_screen(surface: &mut impl Surface, ctx: &GameContext) {
    let v = ctx.viewport;
    let run = &ctx.run;
    let mid = v.height / 2.0;

    if run.is_cleared {
        centered(surface, v, "Cleared! Nice shooting!", mid - v.px(50.0), 36.0, GREEN);
    } else {
        centered(surface, v, "Too bad!", mid - v.px(50.0), 36.0, RED);
    }
    centered(
        surface,
        v,
        &format!("Packs: {} / {}", run.destroyed_count, ctx.packs.len()),
        mid + v.px(20.0),
        22.0,
        WHITE,
    );

    let restart_y = match run.clear_time.filter(|_| run.is_cleared) {
        Some(time) => {
            centered(surface, v, &format!("Clear time: {:.2}s", time), mid + v.px(60.0), 22.0, YELLOW);
            mid + v.px(110.0)
        }
        None => mid + v.px(70.0),
    };
    centered(surface, v, "Press R to play again", restart_y, 22.0, YELLOW);
}

fn tearing_pack(surface: &mut impl Surface, session: &PackOpeningSession) {
    let v = session.viewport();
    centered(
        surface,
        v,
        &format!("Pack {}/{}", session.pack_index + 1, session.total_packs),
        v.px(30.0),
        28.0,
        WHITE,
    );

    let tear = session.tear();
    let image = session.pack_image.as_ref();
    if tear.body.height() > 0.0 {
        shapes::pack(surface, image, tear.body, v.scale);
    }
    if let Some(flap) = tear.flap {
        shapes::pack(surface, image, flap, v.scale);
    }

    centered(surface, v, "Hold an arrow key to tear it open!", v.height - v.px(50.0), 18.0, WHITE);

    let pack = session.pack_rect();
    let bar_size = Vec2::new(v.px(300.0), v.px(20.0));
    let bar = Rect {
        pos: Vec2::new(
            v.width / 2.0 - bar_size.x / 2.0,
            v.height / 2.0 + pack.height() / 2.0 + v.px(50.0),
        ),
        size: bar_size,
    };
    shapes::progress_bar(surface, bar, session.progress / OPEN_COMPLETE, v.scale);
}

fn opened_cards(surface: &mut impl Surface, ctx: &GameContext, session: &PackOpeningSession) {
    let v = session.viewport();
    centered(surface, v, "Pack opened!", v.px(50.0), 28.0, YELLOW);

    for (card, slot) in session.current_cards.iter().zip(session.card_slots()) {
        if card.is_flipped() {
            shapes::card_face(surface, card, slot);
        } else {
            shapes::card_back(surface, ctx.assets.card_back(), slot);
        }
    }

    if !session.all_flipped() {
        centered(surface, v, "Click the cards to flip them!", v.px(80.0), 18.0, YELLOW);
    } else {
        let prompt = if session.is_last() {
            "SPACE: see your cards"
        } else {
            "SPACE: next pack"
        };
        centered(surface, v, prompt, v.height - v.px(50.0), 18.0, GREEN);
    }
}

/// Area the collection grid may use
pub fn collection_area(v: Viewport) -> Rect {
    let header = v.px(COLLECTION_HEADER);
    let footer = v.px(COLLECTION_FOOTER);
    let margin = v.px(COLLECTION_MARGIN);
    Rect::new(
        margin / 2.0,
        header,
        v.width - margin,
        v.height - header - footer,
    )
}

fn collection(surface: &mut impl Surface, v: Viewport, cards: &[Card]) {
    centered(surface, v, "Your cards!", v.px(30.0), 28.0, YELLOW);
    centered(surface, v, &format!("{} cards in total", cards.len()), v.px(70.0), 18.0, WHITE);

    let layout = layout_collection(
        cards.len(),
        collection_area(v),
        v.px(COLLECTION_SPACING),
        v.px(COLLECTION_MIN_CARD_HEIGHT),
    );
    if let Some(layout) = layout {
        for (i, card) in cards.iter().enumerate() {
            shapes::card_face(surface, card, layout.slot(i));
        }
    }

    centered(surface, v, "SPACE: back to start", v.height - v.px(25.0), 18.0, WHITE);
}
