//! Game state and run bookkeeping
//!
//! `GameContext` owns everything that outlives a single screen: the
//! viewport, settings, RNG, assets and the shooting-field entities.
//! `GameState` is the active screen and carries only what that screen owns.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::card::Card;
use super::collision::Viewport;
use super::crosshair::{Crosshair, Directions};
use super::effect::HitEffect;
use super::opening::PackOpeningSession;
use super::target::{CardPack, spawn_packs};
use crate::assets::AssetLibrary;
use crate::settings::Settings;

/// Active screen
#[derive(Debug, Clone)]
pub enum GameState {
    /// Title screen, waiting for confirm
    Start,
    /// Aiming and firing at the packs
    Shooting,
    /// Tearing open the destroyed packs one by one
    PackOpening(PackOpeningSession),
    /// Every card collected this run
    CardCollection { cards: Vec<Card> },
    /// Run ended without destroying anything
    Result,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Start => "start",
            GameState::Shooting => "shooting",
            GameState::PackOpening(_) => "pack_opening",
            GameState::CardCollection { .. } => "card_collection",
            GameState::Result => "result",
        }
    }
}

/// Discrete input events, applied before the tick's update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Start, shoot, or move on
    Confirm,
    /// Back to the title screen
    Restart,
    /// Pointer click in screen pixels
    Click { x: f32, y: f32 },
    /// New screen size in pixels
    Resize { width: f32, height: f32 },
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directions held this tick
    pub held: Directions,
    /// Events since the previous tick, in arrival order
    pub events: Vec<InputEvent>,
}

/// Ammo, timer and score for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunTotals {
    pub ammo_remaining: u32,
    /// Seconds spent in the shooting phase
    pub elapsed: f32,
    pub time_limit: f32,
    pub destroyed_count: usize,
    /// Every pack was destroyed
    pub is_cleared: bool,
    /// Elapsed time when the last pack went down
    pub clear_time: Option<f32>,
}

impl RunTotals {
    pub fn new(settings: &Settings) -> Self {
        Self {
            ammo_remaining: settings.initial_ammo,
            elapsed: 0.0,
            time_limit: settings.time_limit,
            destroyed_count: 0,
            is_cleared: false,
            clear_time: None,
        }
    }

    /// Seconds left on the countdown
    pub fn time_remaining(&self) -> f32 {
        (self.time_limit - self.elapsed).max(0.0)
    }
}

/// Everything the screens share
#[derive(Debug)]
pub struct GameContext {
    pub viewport: Viewport,
    pub settings: Settings,
    /// Seed the RNG started from
    pub seed: u64,
    pub rng: Pcg32,
    pub assets: AssetLibrary,
    pub crosshair: Crosshair,
    /// Targets in layout order
    pub packs: Vec<CardPack>,
    pub effects: Vec<HitEffect>,
    pub run: RunTotals,
}

impl GameContext {
    pub fn new(settings: Settings, assets: AssetLibrary, viewport: Viewport, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let packs = spawn_packs(viewport, &assets, &mut rng);
        Self {
            viewport,
            crosshair: Crosshair::new(viewport),
            run: RunTotals::new(&settings),
            settings,
            seed,
            rng,
            assets,
            packs,
            effects: Vec::new(),
        }
    }

    /// Fresh targets, crosshair and totals; the RNG stream continues
    pub fn new_run(&mut self) {
        self.packs = spawn_packs(self.viewport, &self.assets, &mut self.rng);
        self.crosshair = Crosshair::new(self.viewport);
        self.effects.clear();
        self.run = RunTotals::new(&self.settings);
    }

    pub fn all_destroyed(&self) -> bool {
        self.packs.iter().all(|p| p.destroyed)
    }
}

/// The whole game: shared context plus the active screen
#[derive(Debug)]
pub struct Game {
    pub ctx: GameContext,
    pub state: GameState,
}
