//! Legal-action enumeration, recommendations and automated play.

mod common;

use proptest::prelude::*;
use rust_tcg::core::{AttackTarget, GameAction, GameRng, InstanceId, PlayOptions, PlayerId};
use rust_tcg::zones::Zone;
use rust_tcg::Engine;

use common::{command, give, main_phase_engine, new_engine, stage, strip_defenses, veteran};

fn fork(engine: &Engine) -> Engine {
    Engine::from_state(engine.snapshot(), GameRng::new(0), engine.scripts().clone())
}

/// Apply every listed action to a copy of the engine; all must succeed.
fn assert_all_accepted(engine: &Engine) {
    for player in PlayerId::all() {
        for action in engine.get_legal_actions(player) {
            let mut copy = fork(engine);
            if let Err(e) = copy.apply(player, &action) {
                panic!("{player} was offered {action:?} but it failed: {e}");
            }
        }
    }
}

// =============================================================================
// Enumeration
// =============================================================================

/// Only the player the engine is waiting for has anything to do.
#[test]
fn test_only_awaited_player_has_actions() {
    let engine = main_phase_engine();
    assert_eq!(engine.awaiting_player(), Some(PlayerId::ONE));
    assert!(engine.get_legal_actions(PlayerId::TWO).is_empty());

    let actions = engine.get_legal_actions(PlayerId::ONE);
    assert_eq!(actions.last(), Some(&GameAction::PassPriority));
    assert!(actions
        .iter()
        .any(|a| matches!(a, GameAction::PlayCard { .. })));
}

/// Outside windows the only choice is to advance.
#[test]
fn test_start_phase_offers_advance() {
    let engine = new_engine(5);
    assert_eq!(engine.get_legal_actions(PlayerId::ONE), vec![GameAction::AdvancePhase]);
    assert!(engine.get_legal_actions(PlayerId::TWO).is_empty());
}

/// Listed actions are always accepted, all the way through a game.
#[test]
fn test_listed_actions_are_accepted_throughout() {
    let mut engine = new_engine(21);
    for _ in 0..300 {
        assert_all_accepted(&engine);
        let report = engine.autoplay(1).unwrap();
        if report.game_over || report.steps == 0 {
            break;
        }
    }
}

// =============================================================================
// Recommendations
// =============================================================================

/// With the opponent defenceless, the advisor attacks for the win.
#[test]
fn test_recommends_lethal_attack() {
    let engine = main_phase_engine();
    let mut attacker = None;
    let engine = stage(&engine, |s| {
        strip_defenses(s, PlayerId::TWO);
        attacker = Some(veteran(s, PlayerId::ONE, 1, 1));
    });

    let rec = engine.recommend_action(PlayerId::ONE).unwrap();
    assert_eq!(
        rec.action,
        GameAction::DeclareAttack {
            attacker: attacker.unwrap(),
            target: AttackTarget::Player
        }
    );
    assert_eq!(rec.score, 1000);
}

/// Facing lethal, the defender blocks.
#[test]
fn test_recommends_survival_block() {
    let engine = main_phase_engine();
    let (mut attacker, mut blocker) = (None, None);
    let mut engine = stage(&engine, |s| {
        strip_defenses(s, PlayerId::TWO);
        attacker = Some(veteran(s, PlayerId::ONE, 1, 1));
        blocker = Some(veteran(s, PlayerId::TWO, 1, 1));
    });
    engine
        .declare_attack(PlayerId::ONE, attacker.unwrap(), AttackTarget::Player)
        .unwrap();

    let rec = engine.recommend_action(PlayerId::TWO).unwrap();
    assert_eq!(rec.action, GameAction::DeclareBlock { blocker });
    assert!(!rec.rationale.is_empty());
}

/// Damage far beyond any health is scored and resolved without overflow.
#[test]
fn test_oversized_damage_command() {
    let engine = main_phase_engine();
    let (mut card, mut enemy) = (None, None);
    let mut engine = stage(&engine, |s| {
        card = Some(give(
            s,
            PlayerId::ONE,
            command("C-HUGE", "Deal 4000000000 damage to target enemy unit."),
            Zone::Hand,
        ));
        let id = veteran(s, PlayerId::TWO, 1, 5);
        s.instance_mut(id).unwrap().damage = 1;
        enemy = Some(id);
    });
    let (card, enemy) = (card.unwrap(), enemy.unwrap());

    assert!(engine.recommend_action(PlayerId::ONE).is_some());

    engine.play_card(PlayerId::ONE, card, PlayOptions::target(enemy)).unwrap();
    engine.pass_priority(PlayerId::TWO).unwrap();
    engine.pass_priority(PlayerId::ONE).unwrap();

    assert_eq!(engine.state().locate(enemy), Some((PlayerId::TWO, Zone::Discard)));
}

/// Nobody is recommended anything once the game is over.
#[test]
fn test_no_recommendation_after_game_over() {
    let mut engine = new_engine(8);
    let report = engine.autoplay(20_000).unwrap();
    assert!(report.game_over);
    assert!(PlayerId::all().all(|p| engine.recommend_action(p).is_none()));
}

// =============================================================================
// Automated play
// =============================================================================

/// Two advisors finish a game with a winner.
#[test]
fn test_autoplay_finishes() {
    let mut engine = new_engine(42);
    let report = engine.autoplay(20_000).unwrap();
    assert!(report.game_over);
    let winner = report.winner.unwrap();
    assert_eq!(engine.state().winner, Some(winner));
    assert!(engine.state().players[winner.opponent()].defeated);
    assert!(report.steps > 0);
}

/// Autoplay stops at the step budget.
#[test]
fn test_autoplay_respects_budget() {
    let mut engine = new_engine(42);
    let report = engine.autoplay(10).unwrap();
    assert_eq!(report.steps, 10);
    assert!(!report.game_over);
    assert_eq!(engine.state().history.len(), 10);
}

// =============================================================================
// Rejections
// =============================================================================

fn arbitrary_action(engine: &Engine, kind: u8, pick: usize, other: usize) -> GameAction {
    let ids: Vec<InstanceId> = engine.state().instances.keys().copied().collect();
    let card = ids[pick % ids.len()];
    let second = ids[other % ids.len()];
    match kind % 7 {
        0 => GameAction::AdvancePhase,
        1 => GameAction::PlayCard {
            card,
            options: PlayOptions::none(),
        },
        2 => GameAction::PlayCard {
            card,
            options: PlayOptions::target(second),
        },
        3 => GameAction::DeclareAttack {
            attacker: card,
            target: AttackTarget::Unit(second),
        },
        4 => GameAction::DeclareBlock { blocker: Some(card) },
        5 => GameAction::PassPriority,
        _ => GameAction::DiscardForHandLimit { card },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A rejected action leaves the state byte-for-byte unchanged.
    #[test]
    fn prop_rejections_change_nothing(
        seed in 0u64..1000,
        warmup in 0usize..120,
        seat in 0u8..2,
        kind in any::<u8>(),
        pick in any::<usize>(),
        other in any::<usize>(),
    ) {
        let mut engine = new_engine(seed);
        engine.autoplay(warmup).unwrap();
        let action = arbitrary_action(&engine, kind, pick, other);
        let before = engine.snapshot().to_bytes().unwrap();

        if engine.apply(PlayerId::new(seat), &action).is_err() {
            let after = engine.state().to_bytes().unwrap();
            prop_assert_eq!(before, after);
        }
    }
}
