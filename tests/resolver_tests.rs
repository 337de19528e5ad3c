//! Modifier resolution tests.
//!
//! Covers the priority fold end to end through `MatchContext`:
//! - Additive bonuses and roll remaps in one pass
//! - Bonuses from several effects accumulating
//! - SetDamage overriding earlier bonuses
//! - Stable priority ordering and remap ranges (property tests)

mod common;

use freelancer_engine::cards::{CardId, CardKind, SupportCard};
use freelancer_engine::conditions::{Condition, ConditionKind};
use freelancer_engine::core::{ActionKind, ActionMask, AuxParameters};
use freelancer_engine::effects::{Modifier, ModifierLogic, StatKind};
use proptest::prelude::*;

use common::{catalogue, duel};

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_additive_and_result_map_on_roll() {
    let card = SupportCard::new()
        .with_duration(2)
        .with_modifier(Modifier::additive(StatKind::AttackDice, 2))
        .with_modifier(Modifier::result_map(1, 1, 3));
    let (mut ctx, a, _) = duel(catalogue(vec![(1, CardKind::Skill, card)]));
    ctx.on_card_played(a, CardId::new(1), None).unwrap();

    let out = ctx.resolve_action(ActionKind::Roll, a, None, AuxParameters::roll(1));

    assert_eq!(out.context.delta(StatKind::AttackDice), 2);
    assert_eq!(out.roll(), Some(3));
    assert_eq!(out.context.raw_roll, Some(1));
    // Remap runs after the bonus.
    assert_eq!(out.applied[0].logic, ModifierLogic::Additive);
    assert_eq!(out.applied[1].logic, ModifierLogic::ResultMap);
}

#[test]
fn test_result_map_outside_range_leaves_roll() {
    let card = SupportCard::new().with_duration(2).with_modifier(Modifier::result_map(1, 2, 6));
    let (mut ctx, a, _) = duel(catalogue(vec![(1, CardKind::Skill, card)]));
    ctx.on_card_played(a, CardId::new(1), None).unwrap();

    let out = ctx.resolve_action(ActionKind::Roll, a, None, AuxParameters::roll(4));
    assert_eq!(out.roll(), Some(4));
    assert!(out.applied.is_empty());
}

#[test]
fn test_two_additive_damage_effects_accumulate() {
    let bonus = || SupportCard::new().with_duration(2).with_modifier(Modifier::additive(StatKind::Damage, 1));
    let (mut ctx, a, b) = duel(catalogue(vec![
        (1, CardKind::Skill, bonus()),
        (2, CardKind::Strategy, bonus()),
    ]));
    ctx.on_card_played(a, CardId::new(1), None).unwrap();
    ctx.on_card_played(a, CardId::new(2), None).unwrap();

    let out = ctx.resolve_action(ActionKind::Attack, a, Some(b), AuxParameters::roll(3));
    assert_eq!(out.context.delta(StatKind::Damage), 2);
}

#[test]
fn test_set_damage_overrides_additive() {
    let card = SupportCard::new()
        .with_duration(2)
        .with_modifier(Modifier::additive(StatKind::Damage, 3))
        .with_modifier(Modifier::set_damage(5).with_priority(2));
    let (mut ctx, a, b) = duel(catalogue(vec![(1, CardKind::Skill, card)]));
    ctx.on_card_played(a, CardId::new(1), None).unwrap();

    let out = ctx.resolve_action(ActionKind::Attack, a, Some(b), AuxParameters::roll(3));
    assert_eq!(out.damage(), 5);
}

#[test]
fn test_ineligible_card_contributes_nothing() {
    let card = SupportCard::new()
        .with_duration(2)
        .with_condition(Condition::new(ConditionKind::HasLeaderTarget))
        .with_modifier(Modifier::additive(StatKind::Damage, 4));
    let (mut ctx, a, b) = duel(catalogue(vec![(1, CardKind::Skill, card)]));
    ctx.on_card_played(a, CardId::new(1), None).unwrap();

    let out = ctx.resolve_action(ActionKind::Attack, a, Some(b), AuxParameters::roll(3));
    assert!(out.is_unmodified());
    assert_eq!(out.damage(), 1);
}

#[test]
fn test_effect_on_defender_uses_defender_as_subject() {
    // Holds only while the carrier has not moved.
    let guard = SupportCard::new()
        .with_duration(3)
        .with_condition(Condition::new(ConditionKind::HasNotMoved))
        .with_modifier(Modifier::additive(StatKind::DamageReduction, 1).triggered_by(ActionMask::ATTACK));
    let (mut ctx, a, b) = duel(catalogue(vec![(1, CardKind::Strategy, guard)]));
    ctx.on_card_played(b, CardId::new(1), None).unwrap();

    // The attacker moving does not matter.
    ctx.resolve_action(ActionKind::Move, a, None, AuxParameters::default());
    let out = ctx.resolve_action(ActionKind::Attack, a, Some(b), AuxParameters::roll(2));
    assert_eq!(out.context.get(StatKind::DamageReduction), 1);

    ctx.state_mut().get_mut(b).unwrap().has_moved = true;
    let out = ctx.resolve_action(ActionKind::Attack, a, Some(b), AuxParameters::roll(2));
    assert_eq!(out.context.get(StatKind::DamageReduction), 0);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_set_damage_follows_stable_priority_order(priorities in prop::collection::vec(-5i32..5, 1..8)) {
        let mut card = SupportCard::new().with_duration(2);
        for (i, &p) in priorities.iter().enumerate() {
            card = card.with_modifier(Modifier::set_damage(i as i64).with_priority(p));
        }
        let (mut ctx, a, _) = duel(catalogue(vec![(1, CardKind::Skill, card)]));
        ctx.on_card_played(a, CardId::new(1), None).unwrap();

        let out = ctx.resolve_action(ActionKind::Attack, a, None, AuxParameters::default());

        // Last writer: highest priority, latest declaration among ties.
        let max = *priorities.iter().max().unwrap();
        let last = priorities.iter().rposition(|&p| p == max).unwrap();
        prop_assert_eq!(out.damage(), last as i64);

        let applied: Vec<i32> = out.applied.iter().map(|m| m.priority).collect();
        prop_assert!(applied.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(applied.len(), priorities.len());
    }

    #[test]
    fn prop_result_map_only_touches_rolls_in_range(
        roll in -3i64..12,
        min in 0i64..6,
        span in 0i64..4,
        new_result in 1i64..7,
    ) {
        let max = min + span;
        let card = SupportCard::new().with_duration(2).with_modifier(Modifier::result_map(min, max, new_result));
        let (mut ctx, a, _) = duel(catalogue(vec![(1, CardKind::Skill, card)]));
        ctx.on_card_played(a, CardId::new(1), None).unwrap();

        let out = ctx.resolve_action(ActionKind::Roll, a, None, AuxParameters::roll(roll));
        let expected = if (min..=max).contains(&roll) { new_result } else { roll };
        prop_assert_eq!(out.roll(), Some(expected));
    }
}
