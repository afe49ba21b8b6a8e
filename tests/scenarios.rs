//! Whole-run scenarios driven through `tick`

use pack_shooter::consts::*;
use pack_shooter::sim::{Directions, GameState, Viewport};
use pack_shooter::{AssetLibrary, Game, InputEvent, Settings, TickInput, tick};
use proptest::prelude::*;

fn new_game(seed: u64) -> Game {
    Game::with_seed(
        Settings::default(),
        AssetLibrary::default(),
        Viewport::new(800.0, 600.0),
        seed,
    )
}

fn press(event: InputEvent) -> TickInput {
    TickInput {
        events: vec![event],
        ..Default::default()
    }
}

fn click_at(x: f32, y: f32) -> TickInput {
    press(InputEvent::Click { x, y })
}

fn start(game: &mut Game) {
    tick(game, &press(InputEvent::Confirm), SIM_DT);
    assert!(matches!(game.state, GameState::Shooting));
}

/// Click the given packs, then waste the remaining ammo in an empty corner
fn shoot_packs(game: &mut Game, indices: &[usize]) {
    for &i in indices {
        let c = game.ctx.packs[i].center();
        tick(game, &click_at(c.x, c.y), SIM_DT);
    }
    while matches!(game.state, GameState::Shooting) {
        tick(game, &click_at(1.0, 1.0), SIM_DT);
    }
}

fn hold() -> TickInput {
    TickInput {
        held: Directions {
            up: true,
            ..Default::default()
        },
        events: vec![],
    }
}

fn open_and_flip(game: &mut Game) {
    while matches!(&game.state, GameState::PackOpening(s) if !s.is_opened) {
        tick(game, &hold(), SIM_DT);
    }
    let GameState::PackOpening(session) = &game.state else {
        panic!("expected pack opening, got {}", game.state.name());
    };
    let events = session
        .card_slots()
        .iter()
        .map(|slot| InputEvent::Click {
            x: slot.center().x,
            y: slot.center().y,
        })
        .collect();
    tick(
        game,
        &TickInput {
            held: Directions::default(),
            events,
        },
        SIM_DT,
    );
}

#[test]
fn scenario_all_shots_miss() {
    let mut game = new_game(100);
    start(&mut game);

    // The screen center is clear of every pack's sway
    for shot in 1..=INITIAL_AMMO {
        tick(&mut game, &press(InputEvent::Confirm), SIM_DT);
        assert_eq!(game.ctx.run.ammo_remaining, INITIAL_AMMO - shot);
    }

    assert!(matches!(game.state, GameState::Result));
    assert_eq!(game.ctx.run.destroyed_count, 0);
    assert!(!game.ctx.run.is_cleared);
    assert_eq!(game.ctx.run.clear_time, None);
}

#[test]
fn scenario_clear_every_pack() {
    let mut game = new_game(200);
    start(&mut game);

    let mut last_shot_at = 0.0;
    while let Some(pack) = game.ctx.packs.iter().find(|p| !p.destroyed) {
        let c = pack.center();
        last_shot_at = game.ctx.run.elapsed;
        tick(&mut game, &click_at(c.x, c.y), SIM_DT);
    }

    assert!(game.ctx.run.is_cleared);
    assert_eq!(game.ctx.run.destroyed_count, TARGET_COUNT);
    assert_eq!(game.ctx.run.clear_time, Some(last_shot_at));
    match &game.state {
        GameState::PackOpening(session) => {
            assert_eq!(session.total_packs, TARGET_COUNT);
            assert_eq!(session.pack_index, 0);
            assert!(!session.is_opened);
        }
        other => panic!("expected pack opening, got {}", other.name()),
    }
}

#[test]
fn scenario_advance_between_sessions() {
    let mut game = new_game(300);
    start(&mut game);
    shoot_packs(&mut game, &[0, 4, 9]);
    assert_eq!(game.ctx.run.destroyed_count, 3);

    open_and_flip(&mut game);
    tick(&mut game, &press(InputEvent::Confirm), SIM_DT);

    let GameState::PackOpening(session) = &game.state else {
        panic!("expected pack opening, got {}", game.state.name());
    };
    assert_eq!(session.pack_index, 1);
    assert_eq!(session.progress, 0.0);
    assert!(!session.is_opened);
    assert_eq!(session.current_cards.len(), CARDS_PER_PACK);
    assert!(session.current_cards.iter().all(|c| !c.is_flipped()));
    assert_eq!(session.collected.len(), CARDS_PER_PACK);

    open_and_flip(&mut game);
    tick(&mut game, &press(InputEvent::Confirm), SIM_DT);
    open_and_flip(&mut game);
    tick(&mut game, &press(InputEvent::Confirm), SIM_DT);

    let GameState::CardCollection { cards } = &game.state else {
        panic!("expected collection, got {}", game.state.name());
    };
    assert_eq!(cards.len(), 3 * CARDS_PER_PACK);

    // Confirm on the collection screen starts over
    tick(&mut game, &press(InputEvent::Confirm), SIM_DT);
    assert!(matches!(game.state, GameState::Start));
}

#[test]
fn scenario_resize_mid_shooting() {
    let mut game = new_game(400);
    start(&mut game);

    // Park the crosshair in the bottom-right corner
    let corner = TickInput {
        held: Directions {
            right: true,
            down: true,
            ..Default::default()
        },
        events: vec![],
    };
    for _ in 0..200 {
        tick(&mut game, &corner, SIM_DT);
    }

    for (w, h) in [(400.0, 300.0), (1600.0, 500.0), (320.0, 1000.0), (800.0, 600.0)] {
        tick(&mut game, &press(InputEvent::Resize { width: w, height: h }), SIM_DT);
        let v = game.ctx.viewport;
        assert_eq!((v.width, v.height), (w, h));

        let crosshair = &game.ctx.crosshair;
        assert_eq!(crosshair.size, 20.0 * v.scale);
        assert_eq!(crosshair.speed, (5.0 * v.scale).round().max(3.0));
        assert!(crosshair.bounds().within(&v.bounds()));
        for pack in &game.ctx.packs {
            assert!(pack.rect().within(&v.bounds()));
        }
    }
}

#[test]
fn scenario_resize_during_opening_moves_cards() {
    let mut game = new_game(500);
    start(&mut game);
    shoot_packs(&mut game, &[2]);
    while matches!(&game.state, GameState::PackOpening(s) if !s.is_opened) {
        tick(&mut game, &hold(), SIM_DT);
    }

    tick(&mut game, &press(InputEvent::Resize { width: 1200.0, height: 900.0 }), SIM_DT);
    let GameState::PackOpening(session) = &game.state else {
        panic!("expected pack opening");
    };
    let bounds = game.ctx.viewport.bounds();
    for slot in session.card_slots() {
        assert!(slot.within(&bounds));
    }
    // Clicks land on the resized slots
    open_and_flip(&mut game);
    let GameState::PackOpening(session) = &game.state else {
        panic!("expected pack opening");
    };
    assert!(session.all_flipped());
}

#[test]
fn scenario_same_seed_same_run() {
    let play = |seed| {
        let mut game = new_game(seed);
        start(&mut game);
        shoot_packs(&mut game, &[1, 3, 5]);
        open_and_flip(&mut game);
        let GameState::PackOpening(session) = &game.state else {
            panic!("expected pack opening");
        };
        session.current_cards.iter().map(|c| c.id).collect::<Vec<_>>()
    };
    assert_eq!(play(77), play(77));
}

fn arb_event() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        Just(InputEvent::Confirm),
        Just(InputEvent::Restart),
        (0.0f32..1600.0, 0.0f32..1200.0).prop_map(|(x, y)| InputEvent::Click { x, y }),
        (50.0f32..1600.0, 50.0f32..1200.0)
            .prop_map(|(width, height)| InputEvent::Resize { width, height }),
    ]
}

fn arb_input() -> impl Strategy<Value = TickInput> {
    (
        any::<[bool; 4]>(),
        prop::collection::vec(arb_event(), 0..3),
    )
        .prop_map(|(d, events)| TickInput {
            held: Directions {
                left: d[0],
                right: d[1],
                up: d[2],
                down: d[3],
            },
            events,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_run_invariants(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..300)) {
        let mut game = new_game(seed);
        for input in &inputs {
            tick(&mut game, input, SIM_DT);

            let ctx = &game.ctx;
            let bounds = ctx.viewport.bounds();
            prop_assert!(ctx.crosshair.bounds().within(&bounds));
            prop_assert!(ctx.run.ammo_remaining <= INITIAL_AMMO);
            let destroyed = ctx.packs.iter().filter(|p| p.destroyed).count();
            prop_assert_eq!(destroyed, ctx.run.destroyed_count);
            prop_assert!(INITIAL_AMMO - ctx.run.ammo_remaining >= destroyed as u32);
            for pack in &ctx.packs {
                prop_assert!((pack.pos.x - pack.initial_x).abs() <= pack.move_range + 1e-3);
            }
            if let GameState::PackOpening(session) = &game.state {
                prop_assert!(session.pack_index < session.total_packs);
                prop_assert!((0.0..=OPEN_COMPLETE).contains(&session.progress));
                prop_assert_eq!(session.is_opened, session.progress >= OPEN_COMPLETE);
            }
        }
    }
}
