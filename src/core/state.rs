//! Match state: the freelancer table and the turn tracker.
//!
//! ## Freelancer table
//!
//! Every freelancer lives in one `FxHashMap` keyed by `FreelancerId`.
//! Each side also keeps its turn order, which `NextAlly` targeting and
//! deterministic iteration rely on.
//!
//! ## Turn tracker
//!
//! The tracker records whose turn it is, the round number, kills and
//! eliminations per round, and the action history. Conditions read these
//! facts; only the engine writes them.
//!
//! History uses `im::Vector`, so cloning a state snapshot for broadcast
//! is cheap.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, ActionRecord};
use super::entity::{FreelancerId, TileIndex};
use super::freelancer::{FreelancerInstance, FreelancerStats};
use super::side::{Side, SideMap};
use crate::cards::CardId;

/// An elimination recorded by the turn tracker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub freelancer: FreelancerId,
    pub side: Side,
    /// Tile the freelancer died on, if the board knew it.
    pub tile: Option<TileIndex>,
    pub round: u32,
}

/// Complete state of a match as seen by the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    freelancers: FxHashMap<FreelancerId, FreelancerInstance>,
    turn_order: SideMap<Vec<FreelancerId>>,
    next_id: u32,

    // === Turn tracker ===
    /// Side whose turn it is.
    pub current_side: Side,
    /// Round number (starts at 1, advances after both sides played).
    pub round: u32,
    /// Turn number (starts at 1, advances on every end of turn).
    pub turn_number: u32,
    /// Actions committed this turn.
    pub action_sequence: u32,
    /// Kills scored by each side this round.
    pub round_kills: SideMap<u32>,
    /// All eliminations so far.
    pub eliminations: Vector<Elimination>,
    /// All committed actions.
    pub history: Vector<ActionRecord>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Create an empty match with side one to act.
    #[must_use]
    pub fn new() -> Self {
        Self {
            freelancers: FxHashMap::default(),
            turn_order: SideMap::with_default(),
            next_id: 0,
            current_side: Side::One,
            round: 1,
            turn_number: 1,
            action_sequence: 0,
            round_kills: SideMap::with_value(0),
            eliminations: Vector::new(),
            history: Vector::new(),
        }
    }

    // === Freelancer table ===

    /// Spawn a freelancer and append it to its side's turn order.
    pub fn spawn(&mut self, side: Side, template: CardId, stats: FreelancerStats) -> FreelancerId {
        let id = FreelancerId(self.next_id);
        self.insert(FreelancerInstance::new(id, side, template, stats));
        id
    }

    /// Insert a prepared freelancer instance.
    ///
    /// Replaces any existing freelancer with the same ID.
    pub fn insert(&mut self, freelancer: FreelancerInstance) {
        let id = freelancer.id;
        let side = freelancer.side;
        self.next_id = self.next_id.max(id.0 + 1);
        if self.freelancers.insert(id, freelancer).is_none() {
            self.turn_order[side].push(id);
        }
    }

    /// Get a freelancer.
    #[must_use]
    pub fn get(&self, id: FreelancerId) -> Option<&FreelancerInstance> {
        self.freelancers.get(&id)
    }

    /// Get a mutable freelancer.
    pub fn get_mut(&mut self, id: FreelancerId) -> Option<&mut FreelancerInstance> {
        self.freelancers.get_mut(&id)
    }

    /// Number of freelancers in the match, alive or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.freelancers.len()
    }

    /// Check if the match has no freelancers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.freelancers.is_empty()
    }

    /// A side's turn order.
    #[must_use]
    pub fn turn_order(&self, side: Side) -> &[FreelancerId] {
        &self.turn_order[side]
    }

    /// Freelancers of a side in turn order.
    pub fn on_side(&self, side: Side) -> impl Iterator<Item = &FreelancerInstance> {
        self.turn_order[side].iter().filter_map(|id| self.freelancers.get(id))
    }

    /// Living freelancers of a side in turn order.
    pub fn living_on(&self, side: Side) -> impl Iterator<Item = &FreelancerInstance> {
        self.on_side(side).filter(|f| f.alive)
    }

    /// Living allies of a freelancer, excluding itself.
    pub fn living_allies_of(&self, id: FreelancerId) -> impl Iterator<Item = &FreelancerInstance> {
        let side = self.get(id).map(|f| f.side);
        side.into_iter()
            .flat_map(move |s| self.living_on(s))
            .filter(move |f| f.id != id)
    }

    /// Iterate over every freelancer in both turn orders.
    pub fn iter(&self) -> impl Iterator<Item = &FreelancerInstance> {
        Side::ALL.into_iter().flat_map(move |s| self.on_side(s))
    }

    // === Turn tracker ===

    /// Append a committed action to the history.
    pub fn record_action(&mut self, kind: ActionKind, source: FreelancerId, target: Option<FreelancerId>) {
        let Some(side) = self.get(source).map(|f| f.side) else {
            return;
        };
        let record = ActionRecord {
            side,
            kind,
            source,
            target,
            turn: self.turn_number,
            sequence: self.action_sequence,
        };
        self.action_sequence += 1;
        self.history.push_back(record);
    }

    /// Record an elimination, crediting the opposing side with the kill.
    pub fn record_elimination(&mut self, id: FreelancerId, tile: Option<TileIndex>) {
        let Some(side) = self.get(id).map(|f| f.side) else {
            return;
        };
        self.round_kills[side.opponent()] += 1;
        self.eliminations.push_back(Elimination {
            freelancer: id,
            side,
            tile,
            round: self.round,
        });
    }

    /// Kills a side has scored this round.
    #[must_use]
    pub fn kills_this_round(&self, side: Side) -> u32 {
        self.round_kills[side]
    }

    /// Eliminations of a side's freelancers during the current round.
    pub fn deaths_this_round(&self, side: Side) -> impl Iterator<Item = &Elimination> {
        let round = self.round;
        self.eliminations
            .iter()
            .filter(move |e| e.side == side && e.round == round)
    }

    /// Check whether a side has committed no action this turn.
    #[must_use]
    pub fn is_first_team_action(&self, side: Side) -> bool {
        let turn = self.turn_number;
        !self
            .history
            .iter()
            .rev()
            .take_while(|r| r.turn == turn)
            .any(|r| r.side == side && r.kind != ActionKind::EndTurn)
    }

    /// Pass the turn to the other side.
    ///
    /// Clears the per-turn flags of the side that just finished. The round
    /// advances (and per-round kills reset) once both sides have played.
    pub fn advance_turn(&mut self) {
        let ending = self.current_side;
        for id in self.turn_order[ending].clone() {
            if let Some(f) = self.freelancers.get_mut(&id) {
                f.reset_turn_flags();
            }
        }

        self.turn_number += 1;
        self.action_sequence = 0;
        self.current_side = ending.opponent();
        if self.current_side == Side::One {
            self.round += 1;
            self.round_kills = SideMap::with_value(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_v_one() -> (MatchState, FreelancerId, FreelancerId, FreelancerId) {
        let mut state = MatchState::new();
        let a = state.spawn(Side::One, CardId::new(100), FreelancerStats::default());
        let b = state.spawn(Side::One, CardId::new(100), FreelancerStats::default());
        let c = state.spawn(Side::Two, CardId::new(101), FreelancerStats::default());
        (state, a, b, c)
    }

    #[test]
    fn test_spawn_allocates_sequential_ids() {
        let (state, a, b, c) = two_v_one();
        assert_eq!((a, b, c), (FreelancerId(0), FreelancerId(1), FreelancerId(2)));
        assert_eq!(state.turn_order(Side::One), &[a, b]);
        assert_eq!(state.turn_order(Side::Two), &[c]);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_living_allies_excludes_self_and_dead() {
        let (mut state, a, b, _) = two_v_one();
        let extra = state.spawn(Side::One, CardId::new(100), FreelancerStats::default());
        state.get_mut(extra).unwrap().alive = false;

        let allies: Vec<_> = state.living_allies_of(a).map(|f| f.id).collect();
        assert_eq!(allies, vec![b]);
    }

    #[test]
    fn test_record_elimination_credits_opponent() {
        let (mut state, _, _, c) = two_v_one();
        state.record_elimination(c, Some(TileIndex(4)));

        assert_eq!(state.kills_this_round(Side::One), 1);
        assert_eq!(state.kills_this_round(Side::Two), 0);
        assert_eq!(state.deaths_this_round(Side::Two).count(), 1);
    }

    #[test]
    fn test_first_team_action() {
        let (mut state, a, _, c) = two_v_one();
        assert!(state.is_first_team_action(Side::One));

        state.record_action(ActionKind::Move, a, None);
        assert!(!state.is_first_team_action(Side::One));
        assert!(state.is_first_team_action(Side::Two));

        state.advance_turn();
        state.record_action(ActionKind::Attack, c, Some(a));
        state.advance_turn();
        assert!(state.is_first_team_action(Side::One));
    }

    #[test]
    fn test_advance_turn_resets_round_state() {
        let (mut state, a, _, c) = two_v_one();
        state.get_mut(a).unwrap().has_acted = true;
        state.record_elimination(c, None);

        state.advance_turn();
        assert_eq!(state.current_side, Side::Two);
        assert_eq!(state.round, 1);
        assert!(!state.get(a).unwrap().has_acted);
        assert_eq!(state.kills_this_round(Side::One), 1);

        state.advance_turn();
        assert_eq!(state.current_side, Side::One);
        assert_eq!(state.round, 2);
        assert_eq!(state.turn_number, 3);
        assert_eq!(state.kills_this_round(Side::One), 0);
        assert_eq!(state.deaths_this_round(Side::Two).count(), 0);
    }
}
