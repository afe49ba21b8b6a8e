//! Input dispatch and fixed timestep update
//!
//! Every handler matches on the active `GameState`; only the active screen
//! sees input or advances.

use glam::Vec2;

use super::collision::{Rect, Viewport};
use super::crosshair::{Crosshair, Directions};
use super::effect::{HitEffect, update_effects};
use super::opening::{Advance, PackOpeningSession};
use super::state::{Game, GameContext, GameState, InputEvent, TickInput};
use super::target::relayout_packs;
use crate::assets::AssetLibrary;
use crate::settings::Settings;

impl Game {
    /// New game on the title screen. Uses the configured seed, or a random one.
    pub fn new(settings: Settings, assets: AssetLibrary, viewport: Viewport) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, assets, viewport, seed)
    }

    pub fn with_seed(settings: Settings, assets: AssetLibrary, viewport: Viewport, seed: u64) -> Self {
        log::info!(
            "New game: {}x{} seed {}",
            viewport.width,
            viewport.height,
            seed
        );
        Self {
            ctx: GameContext::new(settings.sanitized(), assets, viewport, seed),
            state: GameState::Start,
        }
    }

    fn set_state(&mut self, next: GameState) {
        log::info!("State {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// Apply one discrete input event to the active screen
    pub fn handle_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            self.resize(width, height);
            return;
        }

        let next = match (&mut self.state, event) {
            (GameState::Start, InputEvent::Confirm) => {
                self.ctx.run.elapsed = 0.0;
                Some(GameState::Shooting)
            }
            (GameState::Shooting, InputEvent::Confirm) => {
                let aim = self.ctx.crosshair.hit_rect();
                fire(&mut self.ctx, aim);
                None
            }
            (GameState::Shooting, InputEvent::Click { x, y }) => {
                let aim = Crosshair::hit_rect_at(Vec2::new(x, y), self.ctx.crosshair.size);
                fire(&mut self.ctx, aim);
                None
            }
            (GameState::PackOpening(session), InputEvent::Click { x, y }) => {
                if let Some(index) = session.handle_reveal(Vec2::new(x, y)) {
                    log::debug!("Flipped card {} of pack {}", index, session.pack_index + 1);
                }
                None
            }
            (GameState::PackOpening(session), InputEvent::Confirm) => {
                match session.advance(&self.ctx.assets, &mut self.ctx.rng) {
                    Advance::Complete => Some(GameState::CardCollection {
                        cards: std::mem::take(&mut session.collected),
                    }),
                    Advance::NextPack | Advance::Rejected => None,
                }
            }
            (
                GameState::CardCollection { .. } | GameState::Result,
                InputEvent::Confirm | InputEvent::Restart,
            ) => {
                self.ctx.new_run();
                Some(GameState::Start)
            }
            _ => None,
        };

        if let Some(next) = next {
            self.set_state(next);
        }
    }

    /// Advance the active screen by one tick
    pub fn update(&mut self, held: Directions, dt: f32) {
        match &mut self.state {
            GameState::Shooting => {}
            GameState::PackOpening(session) => {
                session.handle_open_input(held);
                return;
            }
            GameState::Start | GameState::CardCollection { .. } | GameState::Result => return,
        }

        let ctx = &mut self.ctx;
        ctx.run.elapsed += dt;
        ctx.crosshair.update(held);
        for pack in &mut ctx.packs {
            pack.update();
        }
        update_effects(&mut ctx.effects);

        if shooting_over(ctx) {
            let next = self.finish_shooting();
            self.set_state(next);
        }
    }

    /// Leave the shooting phase for the opening sequence or the result screen
    fn finish_shooting(&mut self) -> GameState {
        let ctx = &mut self.ctx;
        ctx.effects.clear();
        let run = &ctx.run;
        log::info!(
            "Shooting over: {} destroyed, {} ammo left, {:.2}s, cleared: {}",
            run.destroyed_count,
            run.ammo_remaining,
            run.elapsed,
            run.is_cleared
        );

        if run.destroyed_count > 0 {
            GameState::PackOpening(PackOpeningSession::new(
                run.destroyed_count,
                ctx.viewport,
                ctx.settings.open_step,
                &ctx.assets,
                &mut ctx.rng,
            ))
        } else {
            GameState::Result
        }
    }

    /// Recompute every scale-dependent piece for a new screen size
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        log::info!("Resize to {}x{} (scale {:.3})", viewport.width, viewport.height, viewport.scale);

        let ctx = &mut self.ctx;
        ctx.viewport = viewport;
        ctx.crosshair.resize(viewport);
        relayout_packs(&mut ctx.packs, viewport);
        if let GameState::PackOpening(session) = &mut self.state {
            session.resize(viewport, &ctx.assets, &mut ctx.rng);
        }
    }
}

/// Spend one shot on `aim`; the first live pack in layout order it touches
/// is destroyed
fn fire(ctx: &mut GameContext, aim: Rect) {
    if ctx.run.ammo_remaining == 0 {
        return;
    }
    ctx.run.ammo_remaining -= 1;

    let Some(pack) = ctx.packs.iter_mut().find(|p| p.collides_with(&aim)) else {
        log::debug!("Miss, {} ammo left", ctx.run.ammo_remaining);
        return;
    };
    if !pack.destroy() {
        return;
    }
    ctx.effects.push(HitEffect::new(pack.center(), ctx.viewport.scale));
    ctx.run.destroyed_count += 1;
    log::debug!(
        "Hit at ({:.0}, {:.0}), {} destroyed",
        pack.center().x,
        pack.center().y,
        ctx.run.destroyed_count
    );

    if ctx.all_destroyed() {
        ctx.run.clear_time = Some(ctx.run.elapsed);
    }
}

/// Check the end conditions; a clear wins over running out of ammo on the
/// same shot
fn shooting_over(ctx: &mut GameContext) -> bool {
    if ctx.all_destroyed() {
        ctx.run.is_cleared = true;
        return true;
    }
    ctx.run.ammo_remaining == 0 || ctx.run.elapsed >= ctx.run.time_limit
}

/// Advance the game by one fixed timestep: queued events first, then the update
pub fn tick(game: &mut Game, input: &TickInput, dt: f32) {
    for event in &input.events {
        game.handle_input(*event);
    }
    game.update(input.held, dt);
}
