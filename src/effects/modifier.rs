//! Declarative modifiers carried by support cards.
//!
//! A modifier is a flat record: what it does (`ModifierLogic`), which stat
//! it touches, when it fires (`trigger_on`) and when a one-shot carrier is
//! used up (`consumed_by`). Modifiers are folded in ascending priority
//! order; ties keep declaration order.

use serde::{Deserialize, Serialize};

use super::targeting::EffectTarget;
use crate::cards::{CardId, CardKind};
use crate::core::ActionMask;

/// Named quantities a modifier can touch.
///
/// Flags such as `ForbidAttack` use non-zero as true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKind {
    AttackDice,
    DefenseDice,
    Movement,
    WeaponRange,
    #[default]
    Damage,
    ForbidAttack,
    DamageScale,
    AllowWallbang,
    ForbidWallbang,
    WallbangDamage,
    DamageReduction,
    EnergyTransfer,
    CounterAttack,
    RequiresAllyTarget,
    ActionCharges,
    EnergyEquipMode,
    SprayTransfer,
    PreFireRoll,
    CardDraw,
}

impl StatKind {
    pub const ALL: [StatKind; 19] = [
        StatKind::AttackDice,
        StatKind::DefenseDice,
        StatKind::Movement,
        StatKind::WeaponRange,
        StatKind::Damage,
        StatKind::ForbidAttack,
        StatKind::DamageScale,
        StatKind::AllowWallbang,
        StatKind::ForbidWallbang,
        StatKind::WallbangDamage,
        StatKind::DamageReduction,
        StatKind::EnergyTransfer,
        StatKind::CounterAttack,
        StatKind::RequiresAllyTarget,
        StatKind::ActionCharges,
        StatKind::EnergyEquipMode,
        StatKind::SprayTransfer,
        StatKind::PreFireRoll,
        StatKind::CardDraw,
    ];
}

/// What a modifier does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierLogic {
    /// `stat += value`.
    Additive,
    /// Replace a roll inside `[min_roll, max_roll]` with `new_result`.
    ResultMap,
    /// `Damage = value`.
    SetDamage,
    /// Create an active effect of `effect_to_apply` on the resolved targets.
    ApplyEffect,
    /// Pull a card of `card_kind_to_search` out of the draw pile.
    SearchDeck,
}

impl ModifierLogic {
    /// Priority used when a record does not specify one.
    ///
    /// Roll remaps run late so they see every dice bonus first.
    #[must_use]
    pub const fn default_priority(self) -> i32 {
        match self {
            ModifierLogic::ResultMap => 10,
            _ => 1,
        }
    }
}

/// A single modifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    /// Lower runs first.
    pub priority: i32,
    pub logic: ModifierLogic,
    pub stat: StatKind,
    pub value: i64,
    /// Actions that consume a one-shot carrier when this modifier fires.
    pub consumed_by: ActionMask,
    pub min_roll: i64,
    pub max_roll: i64,
    pub new_result: i64,
    pub effect_to_apply: Option<CardId>,
    pub target: EffectTarget,
    /// Actions this modifier reacts to.
    pub trigger_on: ActionMask,
    pub card_kind_to_search: Option<CardKind>,
}

impl Modifier {
    fn with_logic(logic: ModifierLogic) -> Self {
        Self {
            priority: logic.default_priority(),
            logic,
            stat: StatKind::default(),
            value: 0,
            consumed_by: ActionMask::ANY,
            min_roll: 0,
            max_roll: 0,
            new_result: 0,
            effect_to_apply: None,
            target: EffectTarget::default(),
            trigger_on: ActionMask::ANY,
            card_kind_to_search: None,
        }
    }

    /// `stat += value`.
    #[must_use]
    pub fn additive(stat: StatKind, value: i64) -> Self {
        Self {
            stat,
            value,
            ..Self::with_logic(ModifierLogic::Additive)
        }
    }

    /// Remap rolls in `[min_roll, max_roll]` to `new_result`.
    #[must_use]
    pub fn result_map(min_roll: i64, max_roll: i64, new_result: i64) -> Self {
        Self {
            min_roll,
            max_roll,
            new_result,
            ..Self::with_logic(ModifierLogic::ResultMap)
        }
    }

    /// Overwrite damage.
    #[must_use]
    pub fn set_damage(value: i64) -> Self {
        Self {
            stat: StatKind::Damage,
            value,
            ..Self::with_logic(ModifierLogic::SetDamage)
        }
    }

    /// Apply another support card as an active effect.
    #[must_use]
    pub fn apply_effect(card: CardId, target: EffectTarget) -> Self {
        Self {
            effect_to_apply: Some(card),
            target,
            ..Self::with_logic(ModifierLogic::ApplyEffect)
        }
    }

    /// Search the owner's draw pile for a card of the given kind.
    #[must_use]
    pub fn search_deck(kind: CardKind) -> Self {
        Self {
            card_kind_to_search: Some(kind),
            ..Self::with_logic(ModifierLogic::SearchDeck)
        }
    }

    /// Set the priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the trigger mask (builder pattern).
    #[must_use]
    pub fn triggered_by(mut self, mask: ActionMask) -> Self {
        self.trigger_on = mask;
        self
    }

    /// Set the consumption mask (builder pattern).
    #[must_use]
    pub fn consumed_by(mut self, mask: ActionMask) -> Self {
        self.consumed_by = mask;
        self
    }

    /// Set the target selector (builder pattern).
    #[must_use]
    pub fn targeting(mut self, target: EffectTarget) -> Self {
        self.target = target;
        self
    }

    /// Whether a roll falls inside this modifier's remap range.
    #[must_use]
    pub fn remaps(&self, roll: i64) -> bool {
        (self.min_roll..=self.max_roll).contains(&roll)
    }
}
