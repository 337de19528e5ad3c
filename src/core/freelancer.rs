//! Freelancer instances - the units acted upon during a match.
//!
//! Base stats come from the unit card the freelancer was built from.
//! Everything else (HP, per-turn flags, equipment, active effects) is
//! runtime state owned by the match.

use serde::{Deserialize, Serialize};

use super::entity::FreelancerId;
use super::side::Side;
use crate::cards::CardId;
use crate::effects::ActiveEffect;

/// Base combat stats of a freelancer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreelancerStats {
    pub max_hp: i64,
    pub attack_dice: i64,
    pub defense_dice: i64,
    pub movement: i64,
    pub weapon_range: i64,
    pub damage: i64,
    /// Automatic weapons enable spray-style card effects.
    #[serde(default)]
    pub automatic_weapon: bool,
}

impl Default for FreelancerStats {
    fn default() -> Self {
        Self {
            max_hp: 10,
            attack_dice: 2,
            defense_dice: 1,
            movement: 3,
            weapon_range: 4,
            damage: 1,
            automatic_weapon: false,
        }
    }
}

/// Tactical role assigned at match setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Standard,
    /// The side's damage carry.
    Carry,
    /// The side's leader.
    Leader,
}

/// A freelancer in a running match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreelancerInstance {
    pub id: FreelancerId,
    pub side: Side,
    /// Unit card this freelancer was built from.
    pub template: CardId,
    pub stats: FreelancerStats,
    pub role: Role,

    pub current_hp: i64,
    pub alive: bool,

    // === Per-turn flags ===
    pub has_moved: bool,
    pub has_acted: bool,
    pub used_skill: bool,

    /// Economy mode skips card draws in exchange for action charges.
    pub eco_mode: bool,

    pub equipped_energy: Vec<CardId>,
    pub active_effects: Vec<ActiveEffect>,
    pub action_charges: i64,
    pub stored_dice_result: Option<i64>,
}

impl FreelancerInstance {
    /// Create a fresh freelancer at full HP.
    #[must_use]
    pub fn new(id: FreelancerId, side: Side, template: CardId, stats: FreelancerStats) -> Self {
        Self {
            id,
            side,
            template,
            current_hp: stats.max_hp,
            stats,
            role: Role::Standard,
            alive: true,
            has_moved: false,
            has_acted: false,
            used_skill: false,
            eco_mode: false,
            equipped_energy: Vec::new(),
            active_effects: Vec::new(),
            action_charges: 1,
            stored_dice_result: None,
        }
    }

    /// Set the role (builder pattern).
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Clear the per-turn flags.
    pub fn reset_turn_flags(&mut self) {
        self.has_moved = false;
        self.has_acted = false;
        self.used_skill = false;
    }

    /// Apply damage, returning true if this eliminated the freelancer.
    pub fn take_damage(&mut self, amount: i64) -> bool {
        if !self.alive || amount <= 0 {
            return false;
        }
        self.current_hp = (self.current_hp - amount).max(0);
        if self.current_hp == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Check whether this freelancer carries an effect from the given card.
    #[must_use]
    pub fn has_effect(&self, card: CardId) -> bool {
        self.active_effects.iter().any(|e| e.card == card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scout() -> FreelancerInstance {
        FreelancerInstance::new(FreelancerId(1), Side::One, CardId::new(100), FreelancerStats::default())
    }

    #[test]
    fn test_new_starts_at_full_hp() {
        let f = scout();
        assert_eq!(f.current_hp, f.stats.max_hp);
        assert!(f.alive);
        assert_eq!(f.role, Role::Standard);
    }

    #[test]
    fn test_take_damage_eliminates() {
        let mut f = scout();
        assert!(!f.take_damage(4));
        assert_eq!(f.current_hp, 6);

        assert!(f.take_damage(20));
        assert_eq!(f.current_hp, 0);
        assert!(!f.alive);

        // Already eliminated
        assert!(!f.take_damage(1));
    }

    #[test]
    fn test_reset_turn_flags() {
        let mut f = scout();
        f.has_moved = true;
        f.has_acted = true;
        f.used_skill = true;

        f.reset_turn_flags();

        assert!(!f.has_moved && !f.has_acted && !f.used_skill);
    }
}
