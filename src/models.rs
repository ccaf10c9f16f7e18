//! Data models for preset documents and resolved items

use serde::{Deserialize, Serialize};

/// Nominal number of positional inventory slots.
pub const INVENTORY_CAPACITY: usize = 28;

/// Nominal number of positional equipment slots.
pub const EQUIPMENT_CAPACITY: usize = 13;

/// A single equipment/inventory/support-item position.
///
/// A slot with no label (or an empty one) is "empty" and never produces
/// a draw task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub breakdown_notes: Option<String>,
}

impl Slot {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            breakdown_notes: None,
        }
    }

    /// A slot is filled iff it carries a non-empty label.
    pub fn is_filled(&self) -> bool {
        self.label.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// Primary support items plus optional substitutes shown in a
/// conditionally-rendered "Alternatives" block.
///
/// Stored documents name these fields `primaryRelics`/`alternativeRelics`
/// (and the familiar equivalents); the aliases accept both spellings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SupportList {
    #[serde(
        default,
        alias = "primaryRelics",
        alias = "primaryFamiliars"
    )]
    pub primary: Vec<Option<Slot>>,
    #[serde(
        default,
        alias = "alternativeRelics",
        alias = "alternativeFamiliars"
    )]
    pub alternative: Vec<Option<Slot>>,
}

/// A raw preset document as fetched from the document store.
///
/// Slot arrays are sparse; the normalizer pads them to their nominal
/// capacities. Order is positional: slot index maps to a grid cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PresetRecord {
    pub preset_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub preset_notes: Option<String>,
    #[serde(default)]
    pub inventory_slots: Vec<Option<Slot>>,
    #[serde(default)]
    pub equipment_slots: Vec<Option<Slot>>,
    #[serde(default)]
    pub relics: SupportList,
    #[serde(default)]
    pub familiars: SupportList,
}

/// Display metadata for one item, keyed by label in the catalog.
///
/// Catalog datasets use `name`/`image` for the display name and icon URI;
/// the aliases accept both spellings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub label: String,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(alias = "image")]
    pub icon_uri: String,
    #[serde(default)]
    pub is_fallback_sprite: bool,
}

/// A slot whose label has been resolved against the item catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSlot {
    pub item: ItemMetadata,
    pub breakdown_notes: Option<String>,
}

/// Support lists after label resolution. Empty entries are preserved so
/// that "filled primary" counts stay meaningful for layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSupport {
    pub primary: Vec<Option<NormalizedSlot>>,
    pub alternative: Vec<Option<NormalizedSlot>>,
}

impl NormalizedSupport {
    /// Filled primary entries, contiguously from the top.
    pub fn filled_primary(&self) -> Vec<&NormalizedSlot> {
        self.primary.iter().flatten().collect()
    }

    /// Filled alternative entries, contiguously from the top.
    pub fn filled_alternative(&self) -> Vec<&NormalizedSlot> {
        self.alternative.iter().flatten().collect()
    }
}

/// The fixed-shape, fully-resolved in-memory model consumed by the
/// layout engine and the asset resolution pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPreset {
    pub preset_name: String,
    pub preset_notes: Option<String>,
    /// Exactly [`INVENTORY_CAPACITY`] positional entries.
    pub inventory: Vec<Option<NormalizedSlot>>,
    /// Exactly [`EQUIPMENT_CAPACITY`] positional entries.
    pub equipment: Vec<Option<NormalizedSlot>>,
    pub relics: NormalizedSupport,
    pub familiars: NormalizedSupport,
}
