//! Error taxonomy.
//!
//! Only loading and transport can fail hard. Everything that happens
//! during a match degrades to "no effect" and leaves a `Diagnostic`
//! behind, so a bad catalogue reference or an empty draw pile never
//! aborts a turn.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardId;
use crate::core::{FreelancerId, Side, TileIndex};

/// Failure while building a catalogue from its schema.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("malformed catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate card name `{0}`")]
    DuplicateName(String),

    #[error("card `{card}` references unknown card `{reference}`")]
    UnknownReference { card: String, reference: String },

    #[error("card `{card}` applies non-support card `{reference}`")]
    NotASupportCard { card: String, reference: String },
}

/// Invalid engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A request rejected before it reaches the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AuthorityError {
    #[error("{requester} cannot act during the turn of {current}")]
    NotYourTurn { requester: Side, current: Side },

    #[error("{0} does not exist")]
    UnknownFreelancer(FreelancerId),

    #[error("{freelancer} is not controlled by {requester}")]
    NotYourFreelancer { freelancer: FreelancerId, requester: Side },

    #[error("{0} has been eliminated")]
    Eliminated(FreelancerId),

    #[error("{0} has already moved this turn")]
    AlreadyMoved(FreelancerId),

    #[error("{0} has already acted this turn")]
    AlreadyActed(FreelancerId),

    #[error("{card} is not in the hand of {side}")]
    CardNotInHand { card: CardId, side: Side },
}

/// Failure encoding or decoding a wire payload.
#[derive(Debug, Error)]
#[error("codec failure: {0}")]
pub struct CodecError(#[from] pub bincode::Error);

/// A non-fatal problem noticed while resolving or committing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A card ID was not found in the catalogue.
    MissingCard(CardId),
    /// A freelancer ID was not found in the match.
    MissingFreelancer(FreelancerId),
    /// A side had no deck profile to build from.
    MissingDeckProfile(Side),
    /// A draw was attempted on an empty pile.
    EmptyDrawPile(Side),
    /// A non-stackable effect was already present on the carrier.
    StackingRejected { card: CardId, carrier: FreelancerId },
    /// A deck search found nothing of the requested kind.
    SearchFoundNothing(Side),
    /// An apply-effect modifier had nothing to apply.
    NothingToApply(CardId),
    /// A card of the wrong kind was used.
    WrongCardKind(CardId),
    /// A move beyond the freelancer's movement.
    OutOfRange { freelancer: FreelancerId, tile: TileIndex },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_error_messages() {
        let err = CatalogueError::UnknownReference {
            card: "Overwatch".into(),
            reference: "Ghost".into(),
        };
        assert_eq!(err.to_string(), "card `Overwatch` references unknown card `Ghost`");
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<u32>("x").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(err.to_string().starts_with("malformed config"));
    }

    #[test]
    fn test_authority_error_messages() {
        let err = AuthorityError::NotYourFreelancer {
            freelancer: FreelancerId(3),
            requester: Side::Two,
        };
        assert_eq!(err.to_string(), "Freelancer(3) is not controlled by Player 2");
    }
}
