//! Effect targeting.
//!
//! `EffectTarget` names who an `ApplyEffect` modifier lands on; the
//! `TargetResolver` turns that into concrete freelancers using the match
//! state and the board. An empty result is a valid no-op.
//!
//! Side-wide selectors only ever return living freelancers. `Target` and
//! `TargetedAlly` return exactly what was named, provided it exists and is
//! alive.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{FreelancerId, MatchState, Side};

/// Concrete set of affected freelancers.
pub type TargetSet = SmallVec<[FreelancerId; 4]>;

/// Who an effect-applying modifier targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The acting freelancer.
    #[default]
    #[serde(rename = "Self")]
    Self_,
    /// The explicit target of the action.
    Target,
    /// Every living freelancer of the source's side.
    AllAllies,
    /// Every living freelancer of the opposing side.
    AllEnemies,
    /// Living allies within the area radius of the explicit target.
    AllyInArea,
    /// Living enemies within the area radius of the explicit target.
    EnemyInArea,
    /// Next ally in turn order that has not acted yet.
    NextAlly,
    /// The ally chosen when the card was played.
    TargetedAlly,
}

/// Expands an `EffectTarget` into freelancers.
pub struct TargetResolver<'a> {
    state: &'a MatchState,
    board: &'a dyn Board,
    area_radius: u32,
}

impl<'a> TargetResolver<'a> {
    /// Create a resolver.
    pub fn new(state: &'a MatchState, board: &'a dyn Board, area_radius: u32) -> Self {
        Self {
            state,
            board,
            area_radius,
        }
    }

    /// Resolve a target selector.
    ///
    /// `explicit` is the action's target; `chosen_ally` the ally picked
    /// when the carrying card was played.
    pub fn resolve(
        &self,
        target: EffectTarget,
        source: FreelancerId,
        explicit: Option<FreelancerId>,
        chosen_ally: Option<FreelancerId>,
    ) -> TargetSet {
        let Some(side) = self.state.get(source).map(|f| f.side) else {
            return TargetSet::new();
        };

        match target {
            EffectTarget::Self_ => self.living(Some(source)),
            EffectTarget::Target => self.living(explicit),
            EffectTarget::AllAllies => self.side_members(side),
            EffectTarget::AllEnemies => self.side_members(side.opponent()),
            EffectTarget::AllyInArea => self.in_area(side, source, explicit),
            EffectTarget::EnemyInArea => self.in_area(side.opponent(), source, explicit),
            EffectTarget::NextAlly => self.next_ally(side, source),
            EffectTarget::TargetedAlly => {
                let ally = chosen_ally.filter(|&id| self.state.get(id).is_some_and(|f| f.side == side));
                self.living(ally)
            }
        }
    }

    fn living(&self, id: Option<FreelancerId>) -> TargetSet {
        id.filter(|&id| self.state.get(id).is_some_and(|f| f.alive))
            .into_iter()
            .collect()
    }

    fn side_members(&self, side: Side) -> TargetSet {
        self.state.living_on(side).map(|f| f.id).collect()
    }

    fn in_area(&self, side: Side, source: FreelancerId, explicit: Option<FreelancerId>) -> TargetSet {
        // Centred on the explicit target, falling back to the source.
        let centre = explicit
            .and_then(|id| self.board.position(id))
            .or_else(|| self.board.position(source));
        let Some(centre) = centre else {
            return TargetSet::new();
        };

        let candidates: Vec<FreelancerId> = self.state.living_on(side).map(|f| f.id).collect();
        self.board
            .within_radius(centre, self.area_radius, &candidates)
            .into_iter()
            .collect()
    }

    fn next_ally(&self, side: Side, source: FreelancerId) -> TargetSet {
        let order = self.state.turn_order(side);
        let start = order.iter().position(|&id| id == source).map_or(0, |i| i + 1);

        order
            .iter()
            .cycle()
            .skip(start)
            .take(order.len())
            .copied()
            .filter(|&id| id != source)
            .find(|&id| self.state.get(id).is_some_and(|f| f.alive && !f.has_acted))
            .into_iter()
            .collect()
    }
}
