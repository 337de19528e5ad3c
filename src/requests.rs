//! Network action-request surface.
//!
//! Clients never resolve effects. They send `ActionRequest`s; the host
//! queues them in arrival order, validates the requester's authority and
//! only then hands them to the `MatchContext`. Requests and results travel
//! as bincode.
//!
//! ```
//! use freelancer_engine::core::FreelancerId;
//! use freelancer_engine::requests::{decode, encode, ActionRequest};
//!
//! let request = ActionRequest::Attack { attacker: FreelancerId(0), target: FreelancerId(3) };
//! let bytes = encode(&request).unwrap();
//! let back: ActionRequest = decode(&bytes).unwrap();
//! assert_eq!(back, request);
//! ```

use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::CardId;
use crate::core::{ActionKind, AuxParameters, FreelancerId, MatchState, RollKind, Side, TileIndex};
use crate::effects::ResolvedEffects;
use crate::engine::MatchContext;
use crate::error::{AuthorityError, CodecError};

/// An action as sent by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionRequest {
    Move {
        freelancer: FreelancerId,
        destination: TileIndex,
    },
    Attack {
        attacker: FreelancerId,
        target: FreelancerId,
    },
    EndTurn,
    Roll {
        requester: FreelancerId,
        kind: RollKind,
    },
    UseCard {
        owner: FreelancerId,
        card: CardId,
        target: Option<FreelancerId>,
        auxiliary: AuxParameters,
    },
}

impl ActionRequest {
    /// The freelancer the request acts for, if any.
    #[must_use]
    pub fn actor(&self) -> Option<FreelancerId> {
        match self {
            ActionRequest::Move { freelancer, .. } => Some(*freelancer),
            ActionRequest::Attack { attacker, .. } => Some(*attacker),
            ActionRequest::Roll { requester, .. } => Some(*requester),
            ActionRequest::UseCard { owner, .. } => Some(*owner),
            ActionRequest::EndTurn => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::Move { .. } => ActionKind::Move,
            ActionRequest::Attack { .. } => ActionKind::Attack,
            ActionRequest::EndTurn => ActionKind::EndTurn,
            ActionRequest::Roll { .. } => ActionKind::Roll,
            ActionRequest::UseCard { .. } => ActionKind::UseCard,
        }
    }
}

/// Check that `requester` may issue `request` in the current state.
pub fn validate(request: &ActionRequest, requester: Side, state: &MatchState) -> Result<(), AuthorityError> {
    if state.current_side != requester {
        return Err(AuthorityError::NotYourTurn {
            requester,
            current: state.current_side,
        });
    }

    let Some(actor) = request.actor() else {
        return Ok(());
    };
    let freelancer = state.get(actor).ok_or(AuthorityError::UnknownFreelancer(actor))?;
    if freelancer.side != requester {
        return Err(AuthorityError::NotYourFreelancer {
            freelancer: actor,
            requester,
        });
    }
    if !freelancer.alive {
        return Err(AuthorityError::Eliminated(actor));
    }

    match request {
        ActionRequest::Move { .. } if freelancer.has_moved => Err(AuthorityError::AlreadyMoved(actor)),
        ActionRequest::Attack { target, .. } => {
            if freelancer.has_acted {
                return Err(AuthorityError::AlreadyActed(actor));
            }
            match state.get(*target) {
                None => Err(AuthorityError::UnknownFreelancer(*target)),
                Some(t) if !t.alive => Err(AuthorityError::Eliminated(*target)),
                Some(_) => Ok(()),
            }
        }
        ActionRequest::UseCard { target: Some(target), .. } if state.get(*target).is_none() => {
            Err(AuthorityError::UnknownFreelancer(*target))
        }
        _ => Ok(()),
    }
}

/// What a processed request produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestOutcome {
    Resolved(Box<ResolvedEffects>),
    TurnEnded { next: Side, round: u32 },
}

/// A request waiting for the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedRequest {
    pub requester: Side,
    pub request: ActionRequest,
}

/// Requests in arrival order.
#[derive(Clone, Debug, Default)]
pub struct RequestQueue {
    pending: VecDeque<QueuedRequest>,
}

impl RequestQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, requester: Side, request: ActionRequest) {
        self.pending.push_back(QueuedRequest { requester, request });
    }

    pub fn pop(&mut self) -> Option<QueuedRequest> {
        self.pending.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Process every queued request, oldest first.
    pub fn drain_into<B: Board>(
        &mut self,
        ctx: &mut MatchContext<B>,
    ) -> Vec<Result<RequestOutcome, AuthorityError>> {
        let mut results = Vec::with_capacity(self.pending.len());
        while let Some(queued) = self.pop() {
            results.push(ctx.submit(queued.requester, queued.request));
        }
        results
    }
}

impl<B: Board> MatchContext<B> {
    /// Validate a request and hand it to the engine.
    pub fn submit(&mut self, requester: Side, request: ActionRequest) -> Result<RequestOutcome, AuthorityError> {
        if let Err(err) = validate(&request, requester, self.state()) {
            tracing::warn!(%requester, ?request, %err, "Rejected request");
            return Err(err);
        }

        let resolved = match request {
            ActionRequest::Move { freelancer, destination } => self.resolve_move(freelancer, destination),

            ActionRequest::Attack { attacker, target } => {
                let roll = self.roll_die();
                self.resolve_action(ActionKind::Attack, attacker, Some(target), AuxParameters::roll(roll))
            }

            ActionRequest::Roll { requester: id, kind } => {
                let roll = self.roll_die();
                self.resolve_action(ActionKind::Roll, id, None, AuxParameters::roll(roll).with_roll_kind(kind))
            }

            ActionRequest::UseCard { owner, card, target, auxiliary } => {
                if !self.decks_mut().discard_from_hand(requester, card) {
                    return Err(AuthorityError::CardNotInHand { card, side: requester });
                }

                let played = self.on_card_played(owner, card, target);
                let mut resolved = self.resolve_action(ActionKind::UseCard, owner, target, auxiliary.with_card(card));
                if let Err(diagnostic) = played {
                    resolved.diagnostics.insert(0, diagnostic);
                }
                resolved
            }

            ActionRequest::EndTurn => {
                self.end_turn();
                return Ok(RequestOutcome::TurnEnded {
                    next: self.state().current_side,
                    round: self.state().round,
                });
            }
        };

        Ok(RequestOutcome::Resolved(Box::new(resolved)))
    }
}

// === Codec ===

/// Encode a wire payload.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serialize(value)?)
}

/// Decode a wire payload.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    Ok(bincode::deserialize(bytes)?)
}
