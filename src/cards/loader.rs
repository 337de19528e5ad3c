//! JSON catalogue loader.
//!
//! The schema is a flat list of card records. Conditions and modifiers
//! are flat records of primitive fields; a modifier that applies another
//! card names it, and the loader resolves the name to a `CardId` once
//! every card has been assigned one.
//!
//! ```
//! use freelancer_engine::cards::load_catalogue;
//!
//! let json = r#"{
//!   "cards": [
//!     { "name": "Steady Aim", "kind": "Skill", "duration": 1,
//!       "modifiers": [ { "logic": "Additive", "stat": "AttackDice", "value": 1, "trigger_on": 2 } ] }
//!   ]
//! }"#;
//!
//! let catalogue = load_catalogue(json).unwrap();
//! let card = catalogue.by_name("Steady Aim").unwrap();
//! assert_eq!(card.as_support().unwrap().modifiers[0].value, 1);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, CardKind, CardPayload, SupportCard};
use super::registry::{Catalogue, CatalogueBuilder};
use crate::conditions::Condition;
use crate::core::{ActionMask, FreelancerStats};
use crate::effects::{ComplexEffect, EffectTarget, Modifier, ModifierLogic, StatKind};
use crate::error::CatalogueError;

/// Top-level catalogue document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogueSchema {
    pub cards: Vec<CardRecord>,
}

/// One card as stored in the catalogue document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub kind: CardKind,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub can_stack: bool,
    #[serde(default)]
    pub custom_status_icon: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub modifiers: Vec<ModifierRecord>,
    #[serde(default)]
    pub complex_effects: Vec<ComplexEffect>,
    /// Base stats, for unit cards.
    #[serde(default)]
    pub stats: Option<FreelancerStats>,
}

fn default_duration() -> u32 {
    1
}

/// A modifier as stored in the catalogue document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModifierRecord {
    /// Falls back to the logic's default priority.
    #[serde(default)]
    pub priority: Option<i32>,
    pub logic: ModifierLogic,
    #[serde(default)]
    pub stat: StatKind,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub consumed_by: ActionMask,
    #[serde(default)]
    pub min_roll: i64,
    #[serde(default)]
    pub max_roll: i64,
    #[serde(default)]
    pub new_result: i64,
    /// Name of the card to apply.
    #[serde(default)]
    pub effect_to_apply: Option<String>,
    #[serde(default)]
    pub target: EffectTarget,
    #[serde(default)]
    pub trigger_on: ActionMask,
    #[serde(default)]
    pub card_kind_to_search: Option<CardKind>,
}

/// Parse a catalogue document and build the catalogue.
pub fn load_catalogue(json: &str) -> Result<Arc<Catalogue>, CatalogueError> {
    let schema: CatalogueSchema = serde_json::from_str(json)?;
    build_catalogue(&schema)
}

/// Build a catalogue from an already parsed schema.
pub fn build_catalogue(schema: &CatalogueSchema) -> Result<Arc<Catalogue>, CatalogueError> {
    // First pass: names to IDs, so modifiers can reference any card.
    let mut ids = rustc_hash::FxHashMap::default();
    for (index, record) in schema.cards.iter().enumerate() {
        if ids.insert(record.name.as_str(), (CardId::new(index as u32), record.kind)).is_some() {
            return Err(CatalogueError::DuplicateName(record.name.clone()));
        }
    }

    let mut builder = CatalogueBuilder::new();
    for (index, record) in schema.cards.iter().enumerate() {
        let id = CardId::new(index as u32);
        let payload = if record.kind.is_support() {
            let mut modifiers = Vec::with_capacity(record.modifiers.len());
            for m in &record.modifiers {
                let effect_to_apply = match &m.effect_to_apply {
                    Some(name) => {
                        let (target_id, kind) = ids.get(name.as_str()).copied().ok_or_else(|| {
                            CatalogueError::UnknownReference {
                                card: record.name.clone(),
                                reference: name.clone(),
                            }
                        })?;
                        if !kind.is_support() {
                            return Err(CatalogueError::NotASupportCard {
                                card: record.name.clone(),
                                reference: name.clone(),
                            });
                        }
                        Some(target_id)
                    }
                    None => None,
                };
                modifiers.push(Modifier {
                    priority: m.priority.unwrap_or_else(|| m.logic.default_priority()),
                    logic: m.logic,
                    stat: m.stat,
                    value: m.value,
                    consumed_by: m.consumed_by,
                    min_roll: m.min_roll,
                    max_roll: m.max_roll,
                    new_result: m.new_result,
                    effect_to_apply,
                    target: m.target,
                    trigger_on: m.trigger_on,
                    card_kind_to_search: m.card_kind_to_search,
                });
            }
            if record.duration == 0 {
                tracing::warn!(card = %record.name, "Support card with zero duration, clamping to 1");
            }
            CardPayload::Support(SupportCard {
                conditions: record.conditions.clone(),
                modifiers,
                duration: record.duration.max(1),
                can_stack: record.can_stack,
                custom_status_icon: record.custom_status_icon.clone(),
                complex_effects: record.complex_effects.clone(),
            })
        } else if record.kind.is_unit() {
            CardPayload::Unit(record.stats.clone().unwrap_or_else(|| {
                tracing::warn!(card = %record.name, "Unit card without stats, using defaults");
                FreelancerStats::default()
            }))
        } else {
            CardPayload::Energy
        };

        builder.register(Card {
            id,
            name: record.name.clone(),
            kind: record.kind,
            symbol: record.symbol.clone(),
            description: record.description.clone(),
            payload,
        });
    }

    let catalogue = builder.build();
    tracing::debug!(cards = catalogue.len(), "Loaded card catalogue");
    Ok(catalogue)
}
