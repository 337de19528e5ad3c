//! End-to-end match flow from a JSON catalogue.
//!
//! Drives a short match through the request surface: deck setup, card
//! play, attacks with condition-gated bonuses, eliminations feeding later
//! conditions, and passive status icons.

mod common;

use freelancer_engine::board::{Board, GridBoard};
use freelancer_engine::cards::load_catalogue;
use freelancer_engine::core::{AuxParameters, EngineConfig, Role, Side};
use freelancer_engine::deck::DeckProfile;
use freelancer_engine::effects::StatKind;
use freelancer_engine::engine::MatchContext;
use freelancer_engine::requests::{ActionRequest, RequestOutcome, RequestQueue};

const CATALOGUE: &str = r#"{
  "cards": [
    { "name": "Vex", "kind": "Freelancer",
      "stats": { "max_hp": 6, "attack_dice": 2, "defense_dice": 1, "movement": 3, "weapon_range": 4, "damage": 2 } },
    { "name": "Headhunter", "kind": "Skill", "duration": 2,
      "custom_status_icon": "crosshair",
      "conditions": [
        { "kind": "HasLeaderTarget" },
        { "kind": "NoKillsThisRound", "is_passive": true }
      ],
      "modifiers": [ { "logic": "Additive", "stat": "Damage", "value": 3, "trigger_on": 2 } ] },
    { "name": "Avenger", "kind": "Strategy", "duration": 3,
      "complex_effects": [ { "kind": "Vengeance", "per_death": 2 } ] },
    { "name": "Reload", "kind": "Utility" }
  ]
}"#;

struct Match {
    ctx: MatchContext<GridBoard>,
    ids: [freelancer_engine::core::FreelancerId; 4],
}

fn setup() -> Match {
    common::init_tracing();
    let catalogue = load_catalogue(CATALOGUE).unwrap();
    let vex = catalogue.by_name("Vex").unwrap().id;
    let headhunter = catalogue.by_name("Headhunter").unwrap().id;
    let avenger = catalogue.by_name("Avenger").unwrap().id;

    let config = EngineConfig::default().with_shuffle_seed(11).with_starting_hand_size(2);
    let mut ctx = MatchContext::new(catalogue, GridBoard::new(8, 8), config);
    let tiles = [(0, 0), (1, 0), (4, 0), (5, 0)].map(|(x, y)| ctx.board().tile(x, y));
    let ids = [
        ctx.spawn(Side::One, vex, Some(tiles[0])).unwrap(),
        ctx.spawn(Side::One, vex, Some(tiles[1])).unwrap(),
        ctx.spawn(Side::Two, vex, Some(tiles[2])).unwrap(),
        ctx.spawn(Side::Two, vex, Some(tiles[3])).unwrap(),
    ];
    ctx.state_mut().get_mut(ids[2]).unwrap().role = Role::Leader;

    let side_one = DeckProfile::new().with_copies(headhunter, 1).with_copies(avenger, 1);
    assert!(ctx.build_deck(Side::One, Some(&side_one)).is_empty());
    ctx.build_deck(Side::Two, Some(&DeckProfile::new().with_copies(avenger, 2)));
    ctx.deal_starting_hands();

    Match { ctx, ids }
}

fn resolved(outcome: RequestOutcome) -> Box<freelancer_engine::effects::ResolvedEffects> {
    match outcome {
        RequestOutcome::Resolved(r) => r,
        other => panic!("expected a resolution, got {other:?}"),
    }
}

#[test]
fn test_condition_gated_bonus_against_leader_only() {
    let mut m = setup();
    let [a1, a2, leader, grunt] = m.ids;
    let headhunter = m.ctx.catalogue().by_name("Headhunter").unwrap().id;

    let play = ActionRequest::UseCard {
        owner: a1,
        card: headhunter,
        target: None,
        auxiliary: AuxParameters::default(),
    };
    let out = resolved(m.ctx.submit(Side::One, play).unwrap());
    // Passive condition holds: no kills yet, icon visible.
    assert!(out.passive[0].icon_visible());

    // Headhunter sits on a1, who has now acted; the ally attacks instead.
    let attack = resolved(m.ctx.submit(Side::One, ActionRequest::Attack { attacker: a2, target: grunt }).unwrap());
    assert_eq!(attack.damage(), 2);

    m.ctx.state_mut().get_mut(a1).unwrap().has_acted = false;
    let attack = resolved(m.ctx.submit(Side::One, ActionRequest::Attack { attacker: a1, target: leader }).unwrap());
    assert_eq!(attack.damage(), 5);
}

#[test]
fn test_elimination_feeds_vengeance() {
    let mut m = setup();
    let [a1, _, _, grunt] = m.ids;
    let avenger = m.ctx.catalogue().by_name("Avenger").unwrap().id;

    // Side one ends its turn; side two plays Avenger and loses a unit.
    m.ctx.submit(Side::One, ActionRequest::EndTurn).unwrap();
    let [_, _, leader, _] = m.ids;
    m.ctx
        .submit(
            Side::Two,
            ActionRequest::UseCard { owner: leader, card: avenger, target: None, auxiliary: AuxParameters::default() },
        )
        .unwrap();
    assert!(m.ctx.apply_damage(grunt, 100));
    assert_eq!(m.ctx.state().kills_this_round(Side::One), 1);

    m.ctx.state_mut().get_mut(leader).unwrap().has_acted = false;
    let out = resolved(m.ctx.submit(Side::Two, ActionRequest::Attack { attacker: leader, target: a1 }).unwrap());
    assert_eq!(out.damage(), 2 + 2);
    assert_eq!(out.context.base(StatKind::Damage), 2);
}

#[test]
fn test_queue_serializes_conflicting_requests() {
    let mut m = setup();
    let [a1, _, leader, grunt] = m.ids;

    let mut queue = RequestQueue::new();
    queue.push(Side::One, ActionRequest::Attack { attacker: a1, target: leader });
    queue.push(Side::One, ActionRequest::Attack { attacker: a1, target: grunt });
    let results = queue.drain_into(&mut m.ctx);

    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert_eq!(m.ctx.state().history.len(), 1);
}

#[test]
fn test_move_request_places_freelancer() {
    let mut m = setup();
    let [a1, ..] = m.ids;
    let dest = m.ctx.board().tile(0, 3);

    resolved(m.ctx.submit(Side::One, ActionRequest::Move { freelancer: a1, destination: dest }).unwrap());
    assert_eq!(m.ctx.board().position(a1), Some(dest));
    assert!(m.ctx.state().get(a1).unwrap().has_moved);
}

#[test]
fn test_refused_move_commits_nothing() {
    let mut m = setup();
    let [a1, ..] = m.ids;
    let start = m.ctx.board().position(a1);
    let far = m.ctx.board().tile(7, 7);

    let out = resolved(m.ctx.submit(Side::One, ActionRequest::Move { freelancer: a1, destination: far }).unwrap());
    assert!(out
        .diagnostics
        .iter()
        .any(|d| matches!(d, freelancer_engine::error::Diagnostic::OutOfRange { .. })));
    assert!(out.new_effects.is_empty() && out.consumed.is_empty());

    assert_eq!(m.ctx.board().position(a1), start);
    assert!(!m.ctx.state().get(a1).unwrap().has_moved);
    assert!(m.ctx.state().history.is_empty());

    // A legal retry is still allowed.
    let near = m.ctx.board().tile(0, 2);
    resolved(m.ctx.submit(Side::One, ActionRequest::Move { freelancer: a1, destination: near }).unwrap());
    assert_eq!(m.ctx.board().position(a1), Some(near));
}
