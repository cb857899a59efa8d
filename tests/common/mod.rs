//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use rust_tcg::cards::{CardDefinition, Color};
use rust_tcg::core::{GameRng, GameState, InstanceId, Phase, PlayerId};
use rust_tcg::engine::{Engine, EngineBuilder, PlayerSetup};
use rust_tcg::zones::{Zone, ZonePosition};

/// A legal 50/10 deck pair: 13 blue/white units at 4 copies (truncated to
/// 50) and three colorless resources.
pub fn legal_setup(name: &str) -> PlayerSetup {
    let mut main = Vec::new();
    for i in 0..13 {
        let color = if i % 2 == 0 { Color::Blue } else { Color::White };
        let card = Arc::new(CardDefinition::unit(
            format!("ST01-{i:03}"),
            format!("Unit {i}"),
            color,
            1,
            1,
            2,
            2,
        ));
        main.extend(std::iter::repeat(card).take(4));
    }
    main.truncate(50);

    let mut resources = Vec::new();
    for i in 0..3 {
        let card = Arc::new(CardDefinition::resource(format!("R-{i}"), "Resource"));
        resources.extend(std::iter::repeat(card).take(4));
    }
    resources.truncate(10);

    PlayerSetup::new(name, main, resources)
}

/// Engine over two legal decks.
pub fn new_engine(seed: u64) -> Engine {
    EngineBuilder::new(legal_setup("Amuro"), legal_setup("Char"))
        .seed(seed)
        .build()
        .unwrap()
}

/// Advance start -> draw -> resource -> main.
pub fn to_main(engine: &mut Engine) {
    for _ in 0..3 {
        engine.advance_to_next_phase().unwrap();
    }
    assert_eq!(engine.state().phase, Phase::Main);
}

/// Engine in the starting player's first main phase.
pub fn main_phase_engine() -> Engine {
    let mut engine = new_engine(7);
    to_main(&mut engine);
    engine
}

/// Rebuild the engine around a modified snapshot.
pub fn stage(engine: &Engine, edit: impl FnOnce(&mut GameState)) -> Engine {
    let mut state = engine.snapshot();
    edit(&mut state);
    Engine::from_state(state, GameRng::new(0), engine.scripts().clone())
}

/// Put a new card into a zone.
pub fn give(state: &mut GameState, owner: PlayerId, definition: CardDefinition, zone: Zone) -> InstanceId {
    state.create_instance(owner, Arc::new(definition), zone).unwrap()
}

/// Put a unit that has been in play since before this turn.
pub fn veteran(state: &mut GameState, owner: PlayerId, attack: i32, health: i32) -> InstanceId {
    let id = give(
        state,
        owner,
        CardDefinition::unit("VET", format!("Veteran {attack}/{health}"), Color::Blue, 0, 0, attack, health),
        Zone::BattleArea,
    );
    state.instance_mut(id).unwrap().entered_turn = Some(0);
    id
}

/// Remove a player's base and shields.
pub fn strip_defenses(state: &mut GameState, player: PlayerId) {
    if let Some(base) = state.zones(player).base {
        state.move_instance(base, Zone::Discard, ZonePosition::Top).unwrap();
    }
    for shield in state.zones(player).ids(Zone::Shields) {
        state.move_instance(shield, Zone::Discard, ZonePosition::Top).unwrap();
    }
}

/// Cost-0 command with the given text.
pub fn command(id: &str, text: &str) -> CardDefinition {
    CardDefinition::command(id, id, Color::Blue, 0, text)
}
