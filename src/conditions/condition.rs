//! Conditions gating support-card modifiers.
//!
//! A condition reads one fact off the match (turn history, positions, HP,
//! equipment) and compares it with its `required_state`. All non-passive
//! conditions of a card must hold for its modifiers to be eligible.
//! Passive conditions never gate anything; they are reported so the host
//! can show or hide the card's status icon.
//!
//! Facts are read relative to the *subject*, the freelancer carrying the
//! effect, and the *other* party of the action, if any.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{FreelancerId, FreelancerInstance, MatchState, Role};

/// The closed set of condition kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    /// The subject's side has scored no kill this round.
    NoKillsThisRound,
    /// The subject is the only living freelancer of its side.
    LastUnitStanding,
    /// The other party stands on an objective tile.
    TargetOnObjective,
    /// An ally died this round within `value` tiles (default 1).
    ProximityToAllyDeath,
    /// Every living ally is at least `value` tiles away (default 2).
    MinDistanceToAllies,
    /// No freelancer of the subject's side has been eliminated.
    AllAlliesAlive,
    HasNotActed,
    /// The subject's side has not acted yet this turn.
    FirstTeamAction,
    HasNotMoved,
    /// At least `value` energy cards equipped (default 1).
    HasEquippedEnergy,
    /// The other party is a carry.
    HasCarryTarget,
    /// The other party is a leader.
    HasLeaderTarget,
    UsesAutomaticWeapon,
    NotInEconomyMode,
}

/// A single condition record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub kind: ConditionKind,
    /// Optional numeric threshold.
    #[serde(default)]
    pub value: Option<i64>,
    /// Polarity: the condition holds when the fact equals this.
    #[serde(default = "default_required_state")]
    pub required_state: bool,
    /// Passive conditions only drive the status icon.
    #[serde(default)]
    pub is_passive: bool,
}

fn default_required_state() -> bool {
    true
}

impl Condition {
    /// A condition that holds when the fact is true.
    #[must_use]
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            value: None,
            required_state: true,
            is_passive: false,
        }
    }

    /// A condition that holds when the fact is false.
    #[must_use]
    pub fn not(kind: ConditionKind) -> Self {
        Self {
            required_state: false,
            ..Self::new(kind)
        }
    }

    /// Set the threshold (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Make the condition passive (builder pattern).
    #[must_use]
    pub fn passive(mut self) -> Self {
        self.is_passive = true;
        self
    }
}

/// Facts available to condition evaluation.
pub struct ConditionContext<'a> {
    /// Freelancer carrying the effect.
    pub subject: FreelancerId,
    /// Other party of the action.
    pub other: Option<FreelancerId>,
    pub state: &'a MatchState,
    pub board: &'a dyn Board,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(
        subject: FreelancerId,
        other: Option<FreelancerId>,
        state: &'a MatchState,
        board: &'a dyn Board,
    ) -> Self {
        Self {
            subject,
            other,
            state,
            board,
        }
    }

    fn other_instance(&self) -> Option<&'a FreelancerInstance> {
        self.other.and_then(|id| self.state.get(id))
    }
}

/// State of a passive condition, for status-icon display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveStatus {
    pub kind: ConditionKind,
    pub active: bool,
}

/// Outcome of evaluating a card's condition list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionReport {
    /// True when every non-passive condition holds.
    pub eligible: bool,
    /// Passive conditions in declaration order.
    pub passive: SmallVec<[PassiveStatus; 2]>,
}

/// Evaluator for condition lists.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Evaluate a condition list.
    ///
    /// Pure: reads the context, never caches, never mutates.
    pub fn evaluate(conditions: &[Condition], ctx: &ConditionContext) -> ConditionReport {
        let mut eligible = true;
        let mut passive = SmallVec::new();

        for condition in conditions {
            let holds = Self::holds(condition, ctx);
            if condition.is_passive {
                passive.push(PassiveStatus {
                    kind: condition.kind,
                    active: holds,
                });
            } else if !holds {
                eligible = false;
            }
        }

        ConditionReport { eligible, passive }
    }

    /// Check a single condition, polarity included.
    pub fn holds(condition: &Condition, ctx: &ConditionContext) -> bool {
        match Self::fact(condition.kind, condition.value, ctx) {
            Some(fact) => fact == condition.required_state,
            // Unknown subject: nothing can be established.
            None => false,
        }
    }

    /// Read the raw fact behind a condition kind.
    fn fact(kind: ConditionKind, value: Option<i64>, ctx: &ConditionContext) -> Option<bool> {
        let state = ctx.state;
        let subject = state.get(ctx.subject)?;

        let fact = match kind {
            ConditionKind::NoKillsThisRound => state.kills_this_round(subject.side) == 0,

            ConditionKind::LastUnitStanding => {
                subject.alive && state.living_on(subject.side).count() == 1
            }

            ConditionKind::TargetOnObjective => ctx
                .other
                .and_then(|id| ctx.board.position(id))
                .is_some_and(|tile| ctx.board.is_objective(tile)),

            ConditionKind::ProximityToAllyDeath => {
                let radius = threshold(value, 1);
                match ctx.board.position(subject.id) {
                    Some(here) => state
                        .deaths_this_round(subject.side)
                        .filter(|e| e.freelancer != subject.id)
                        .filter_map(|e| e.tile)
                        .any(|tile| ctx.board.distance(here, tile) <= radius),
                    None => false,
                }
            }

            ConditionKind::MinDistanceToAllies => {
                let min = threshold(value, 2);
                match ctx.board.position(subject.id) {
                    Some(here) => state
                        .living_allies_of(subject.id)
                        .filter_map(|ally| ctx.board.position(ally.id))
                        .all(|tile| ctx.board.distance(here, tile) >= min),
                    None => false,
                }
            }

            ConditionKind::AllAlliesAlive => state.on_side(subject.side).all(|f| f.alive),

            ConditionKind::HasNotActed => !subject.has_acted,

            ConditionKind::FirstTeamAction => state.is_first_team_action(subject.side),

            ConditionKind::HasNotMoved => !subject.has_moved,

            ConditionKind::HasEquippedEnergy => {
                subject.equipped_energy.len() as u64 >= u64::from(threshold(value, 1))
            }

            ConditionKind::HasCarryTarget => {
                ctx.other_instance().is_some_and(|f| f.role == Role::Carry)
            }

            ConditionKind::HasLeaderTarget => {
                ctx.other_instance().is_some_and(|f| f.role == Role::Leader)
            }

            ConditionKind::UsesAutomaticWeapon => subject.stats.automatic_weapon,

            ConditionKind::NotInEconomyMode => !subject.eco_mode,
        };

        Some(fact)
    }
}

/// Non-negative threshold with a default.
fn threshold(value: Option<i64>, default: u32) -> u32 {
    value.map_or(default, |v| v.clamp(0, i64::from(u32::MAX)) as u32)
}
