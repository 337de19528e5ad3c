//! Deck search and draw tests.
//!
//! - SearchDeck only ever yields the requested card kind
//! - Search destination follows the configuration
//! - Chooser and request-level picks
//! - Empty draws leave the discard pile alone

mod common;

use std::sync::Arc;

use freelancer_engine::cards::{Card, CardId, CardKind, Catalogue, CatalogueBuilder, SupportCard};
use freelancer_engine::core::{ActionKind, AuxParameters, EngineConfig, FreelancerStats, SearchDestination, Side};
use freelancer_engine::deck::DeckProfile;
use freelancer_engine::effects::{DeckMutation, Modifier, StatKind};
use freelancer_engine::error::Diagnostic;

use common::{duel, duel_with, UNIT};

const SCOUT: CardId = CardId(1);
const RELOAD: CardId = CardId(2);
const SPRINT: CardId = CardId(3);
const BATTERY: CardId = CardId(4);
const SUPPLY: CardId = CardId(5);

fn catalogue() -> Arc<Catalogue> {
    let mut b = CatalogueBuilder::new();
    b.register(Card::unit(UNIT, "Vex", FreelancerStats::default()));
    b.register(Card::support(
        SCOUT,
        "Scout Ahead",
        CardKind::Skill,
        SupportCard::new().with_modifier(Modifier::search_deck(CardKind::Action)),
    ));
    b.register(Card::energy(RELOAD, "Reload", CardKind::Utility));
    b.register(Card::energy(SPRINT, "Sprint", CardKind::Action));
    b.register(Card::energy(BATTERY, "Battery", CardKind::Aura));
    b.register(Card::support(
        SUPPLY,
        "Supply Drop",
        CardKind::Strategy,
        SupportCard::new().with_modifier(Modifier::additive(StatKind::CardDraw, 1)),
    ));
    b.build()
}

fn profile() -> DeckProfile {
    DeckProfile::new()
        .with_copies(RELOAD, 3)
        .with_copies(SPRINT, 1)
        .with_copies(BATTERY, 2)
}

#[test]
fn test_search_takes_requested_kind_into_hand() {
    let (mut ctx, a, _) = duel(catalogue());
    ctx.build_deck(Side::One, Some(&profile()));
    ctx.on_card_played(a, SCOUT, None).unwrap();

    let out = ctx.resolve_action(ActionKind::UseCard, a, None, AuxParameters::default());

    assert_eq!(
        out.deck_mutations,
        vec![DeckMutation::Take { side: Side::One, card: SPRINT, destination: SearchDestination::Hand }]
    );
    assert_eq!(ctx.decks().hand(Side::One), &[SPRINT]);
    assert_eq!(ctx.decks().draw_pile(Side::One).len(), 5);
    assert!(!ctx.decks().draw_pile(Side::One).contains(&SPRINT));
}

#[test]
fn test_search_to_discard() {
    let config = EngineConfig::default().with_search_destination(SearchDestination::Discard);
    let (mut ctx, a, _) = duel_with(catalogue(), config);
    ctx.build_deck(Side::One, Some(&profile()));
    ctx.on_card_played(a, SCOUT, None).unwrap();

    ctx.resolve_action(ActionKind::UseCard, a, None, AuxParameters::default());
    assert_eq!(ctx.decks().discard(Side::One), &[SPRINT]);
    assert!(ctx.decks().hand(Side::One).is_empty());
}

#[test]
fn test_search_with_no_match_is_a_no_op() {
    let (mut ctx, a, _) = duel(catalogue());
    let deck = DeckProfile::new().with_copies(RELOAD, 2);
    ctx.build_deck(Side::One, Some(&deck));
    ctx.on_card_played(a, SCOUT, None).unwrap();

    let out = ctx.resolve_action(ActionKind::UseCard, a, None, AuxParameters::default());
    assert!(out.deck_mutations.is_empty());
    assert_eq!(out.diagnostics, vec![Diagnostic::SearchFoundNothing(Side::One)]);
    assert_eq!(ctx.decks().draw_pile(Side::One).len(), 2);
}

#[test]
fn test_custom_chooser_and_request_pick() {
    let mut b = CatalogueBuilder::new();
    b.register(Card::unit(UNIT, "Vex", FreelancerStats::default()));
    b.register(Card::support(
        SCOUT,
        "Scout Ahead",
        CardKind::Skill,
        SupportCard::new().with_modifier(Modifier::search_deck(CardKind::Utility)),
    ));
    b.register(Card::energy(RELOAD, "Reload", CardKind::Utility));
    b.register(Card::energy(CardId(6), "Patch", CardKind::Utility));
    let (ctx, a, _) = duel(b.build());
    let mut ctx = ctx.with_chooser(|_: Side, candidates: &[CardId]| candidates.last().copied());

    let deck = DeckProfile::new().with_copies(RELOAD, 1).with_copies(CardId(6), 1);
    ctx.build_deck(Side::One, Some(&deck));
    let bottom = ctx.decks().draw_pile(Side::One)[0];

    // Candidates are listed top first, so `last` is the bottom card.
    ctx.on_card_played(a, SCOUT, None).unwrap();
    ctx.resolve_action(ActionKind::UseCard, a, None, AuxParameters::default());
    assert_eq!(ctx.decks().hand(Side::One), &[bottom]);

    // A pick sent with the request wins when valid.
    ctx.build_deck(Side::One, Some(&deck));
    let top = *ctx.decks().draw_pile(Side::One).last().unwrap();
    ctx.on_card_played(a, SCOUT, None).unwrap();
    ctx.resolve_action(ActionKind::UseCard, a, None, AuxParameters::default().with_search_choice(top));
    assert_eq!(ctx.decks().hand(Side::One), &[top]);
}

#[test]
fn test_empty_draw_leaves_discard_unchanged() {
    let (mut ctx, a, _) = duel(catalogue());
    ctx.build_deck(Side::One, Some(&DeckProfile::new()));
    ctx.on_card_played(a, SUPPLY, None).unwrap();

    let out = ctx.resolve_action(ActionKind::UseCard, a, None, AuxParameters::default());
    assert_eq!(out.diagnostics, vec![Diagnostic::EmptyDrawPile(Side::One)]);
    assert!(ctx.decks().discard(Side::One).is_empty());
    assert!(ctx.decks().hand(Side::One).is_empty());
}

#[test]
fn test_missing_profile_reported() {
    let (mut ctx, _, _) = duel(catalogue());
    assert_eq!(ctx.build_deck(Side::Two, None), vec![Diagnostic::MissingDeckProfile(Side::Two)]);
    assert_eq!(ctx.decks_mut().draw(Side::Two), None);
}
