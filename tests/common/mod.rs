//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use freelancer_engine::board::{Board, GridBoard};
use freelancer_engine::cards::{Card, CardId, CardKind, Catalogue, CatalogueBuilder, SupportCard};
use freelancer_engine::core::{EngineConfig, FreelancerId, FreelancerStats, Side};
use freelancer_engine::engine::MatchContext;

pub const UNIT: CardId = CardId(0);

/// Route engine logs to the test output. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Catalogue with a default unit card plus the given support cards.
pub fn catalogue(cards: Vec<(u32, CardKind, SupportCard)>) -> Arc<Catalogue> {
    let mut builder = CatalogueBuilder::new();
    builder.register(Card::unit(UNIT, "Vex", FreelancerStats::default()));
    for (id, kind, support) in cards {
        builder.register(Card::support(CardId::new(id), format!("Card {id}"), kind, support));
    }
    builder.build()
}

/// A match with one freelancer per side, three tiles apart.
pub fn duel(catalogue: Arc<Catalogue>) -> (MatchContext<GridBoard>, FreelancerId, FreelancerId) {
    duel_with(catalogue, EngineConfig::default())
}

pub fn duel_with(
    catalogue: Arc<Catalogue>,
    config: EngineConfig,
) -> (MatchContext<GridBoard>, FreelancerId, FreelancerId) {
    init_tracing();
    let mut ctx = MatchContext::new(catalogue, GridBoard::new(8, 8), config);
    let a = ctx.spawn(Side::One, UNIT, None).expect("unit card");
    let b = ctx.spawn(Side::Two, UNIT, None).expect("unit card");
    let (ta, tb) = (ctx.board().tile(0, 0), ctx.board().tile(3, 0));
    ctx.board_mut().place(a, ta);
    ctx.board_mut().place(b, tb);
    (ctx, a, b)
}
