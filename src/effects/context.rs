//! The stat map a resolution pass folds modifiers into.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::modifier::StatKind;
use crate::core::FreelancerInstance;

/// Working values for one action.
///
/// Seeded from the acting freelancer's base stats (defense dice come from
/// the defender when there is one) and the raw roll. Stats never seeded
/// read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionContext {
    stats: FxHashMap<StatKind, i64>,
    base: FxHashMap<StatKind, i64>,
    /// Current roll, after remaps.
    pub roll: Option<i64>,
    /// Roll as supplied with the action.
    pub raw_roll: Option<i64>,
    /// Set when the source's stored pre-fire roll replaced the roll.
    pub used_stored_roll: bool,
}

impl ResolutionContext {
    /// Seed a context from the action's parties.
    pub fn seed(source: &FreelancerInstance, target: Option<&FreelancerInstance>, roll: Option<i64>) -> Self {
        let stats = &source.stats;
        let defense = target.map_or(stats.defense_dice, |t| t.stats.defense_dice);

        let mut base = FxHashMap::default();
        base.insert(StatKind::AttackDice, stats.attack_dice);
        base.insert(StatKind::DefenseDice, defense);
        base.insert(StatKind::Movement, stats.movement);
        base.insert(StatKind::WeaponRange, stats.weapon_range);
        base.insert(StatKind::Damage, stats.damage);
        base.insert(StatKind::ActionCharges, source.action_charges);

        Self {
            stats: base.clone(),
            base,
            roll,
            raw_roll: roll,
            used_stored_roll: false,
        }
    }

    /// Current value of a stat.
    #[must_use]
    pub fn get(&self, stat: StatKind) -> i64 {
        self.stats.get(&stat).copied().unwrap_or(0)
    }

    /// Seeded value of a stat.
    #[must_use]
    pub fn base(&self, stat: StatKind) -> i64 {
        self.base.get(&stat).copied().unwrap_or(0)
    }

    /// Change relative to the seeded value.
    #[must_use]
    pub fn delta(&self, stat: StatKind) -> i64 {
        self.get(stat) - self.base(stat)
    }

    pub fn add(&mut self, stat: StatKind, value: i64) {
        *self.stats.entry(stat).or_insert(0) += value;
    }

    pub fn set(&mut self, stat: StatKind, value: i64) {
        self.stats.insert(stat, value);
    }

    /// Read a flag stat (non-zero is set).
    #[must_use]
    pub fn flag(&self, stat: StatKind) -> bool {
        self.get(stat) != 0
    }

    /// Stats that differ from their seeded value, in `StatKind` order.
    #[must_use]
    pub fn changed(&self) -> Vec<(StatKind, i64)> {
        StatKind::ALL
            .into_iter()
            .filter(|&s| self.delta(s) != 0)
            .map(|s| (s, self.get(s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::{FreelancerId, FreelancerStats, Side};

    fn unit(id: u32, defense: i64) -> FreelancerInstance {
        let stats = FreelancerStats {
            defense_dice: defense,
            ..FreelancerStats::default()
        };
        FreelancerInstance::new(FreelancerId(id), Side::One, CardId::new(0), stats)
    }

    #[test]
    fn test_seed_takes_defense_from_target() {
        let attacker = unit(0, 1);
        let defender = unit(1, 4);

        let ctx = ResolutionContext::seed(&attacker, Some(&defender), Some(2));
        assert_eq!(ctx.get(StatKind::DefenseDice), 4);
        assert_eq!(ctx.get(StatKind::AttackDice), 2);
        assert_eq!(ctx.roll, Some(2));

        let alone = ResolutionContext::seed(&attacker, None, None);
        assert_eq!(alone.get(StatKind::DefenseDice), 1);
    }

    #[test]
    fn test_add_set_and_delta() {
        let mut ctx = ResolutionContext::seed(&unit(0, 1), None, None);
        ctx.add(StatKind::Damage, 3);
        assert_eq!(ctx.delta(StatKind::Damage), 3);

        ctx.set(StatKind::Damage, 5);
        assert_eq!(ctx.get(StatKind::Damage), 5);
        assert_eq!(ctx.base(StatKind::Damage), 1);

        assert!(!ctx.flag(StatKind::ForbidAttack));
        ctx.add(StatKind::ForbidAttack, 1);
        assert!(ctx.flag(StatKind::ForbidAttack));

        assert_eq!(ctx.changed(), vec![(StatKind::Damage, 5), (StatKind::ForbidAttack, 1)]);
    }
}
