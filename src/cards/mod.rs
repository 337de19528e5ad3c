//! Card catalogue: definitions, registry and loader.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardKind`: Closed set of card kinds (energy, support, unit)
//! - `Card`: Immutable definition with a kind-specific payload
//! - `SupportCard`: Conditions, modifiers, duration and stacking rule
//! - `Catalogue`: Frozen lookup table shared by `Arc`

pub mod definition;
pub mod registry;
pub mod loader;

pub use definition::{Card, CardId, CardKind, CardPayload, SupportCard};
pub use registry::{Catalogue, CatalogueBuilder};
pub use loader::{build_catalogue, load_catalogue, CardRecord, CatalogueSchema, ModifierRecord};
