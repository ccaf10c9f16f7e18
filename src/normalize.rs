//! Preset normalization: sparse documents into the fixed-shape model

use crate::catalog::ItemCatalog;
use crate::models::{
    NormalizedPreset, NormalizedSlot, NormalizedSupport, PresetRecord, Slot, SupportList,
    EQUIPMENT_CAPACITY, INVENTORY_CAPACITY,
};

/// Map a raw preset record into a fully-resolved in-memory model.
///
/// Positional slot arrays are padded (or truncated) to their nominal
/// capacities, preserving the index-to-grid-cell mapping; every filled
/// slot has its label resolved through the catalog, with misses
/// substituting the unknown-item entry. Pure transform, no I/O.
pub fn normalize(raw: &PresetRecord, catalog: &ItemCatalog) -> NormalizedPreset {
    NormalizedPreset {
        preset_name: raw.preset_name.clone(),
        preset_notes: raw.preset_notes.clone(),
        inventory: pad_positional(&raw.inventory_slots, INVENTORY_CAPACITY, catalog),
        equipment: pad_positional(&raw.equipment_slots, EQUIPMENT_CAPACITY, catalog),
        relics: resolve_support(&raw.relics, catalog),
        familiars: resolve_support(&raw.familiars, catalog),
    }
}

fn resolve_slot(slot: &Slot, catalog: &ItemCatalog) -> NormalizedSlot {
    let label = slot.label.as_deref().unwrap_or_default();
    NormalizedSlot {
        item: catalog.resolve(label).clone(),
        breakdown_notes: slot.breakdown_notes.clone(),
    }
}

fn pad_positional(
    slots: &[Option<Slot>],
    capacity: usize,
    catalog: &ItemCatalog,
) -> Vec<Option<NormalizedSlot>> {
    (0..capacity)
        .map(|i| {
            slots
                .get(i)
                .and_then(|s| s.as_ref())
                .filter(|s| s.is_filled())
                .map(|s| resolve_slot(s, catalog))
        })
        .collect()
}

fn resolve_support(list: &SupportList, catalog: &ItemCatalog) -> NormalizedSupport {
    let map = |slots: &[Option<Slot>]| {
        slots
            .iter()
            .map(|entry| {
                entry
                    .as_ref()
                    .filter(|s| s.is_filled())
                    .map(|s| resolve_slot(s, catalog))
            })
            .collect()
    };
    NormalizedSupport {
        primary: map(&list.primary),
        alternative: map(&list.alternative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UNKNOWN_ITEM_LABEL;
    use crate::models::ItemMetadata;

    fn item(label: &str) -> ItemMetadata {
        ItemMetadata {
            label: label.to_string(),
            display_name: label.to_uppercase(),
            icon_uri: format!("icons/{label}.png"),
            is_fallback_sprite: label == UNKNOWN_ITEM_LABEL,
        }
    }

    fn catalog() -> ItemCatalog {
        ItemCatalog::new(vec![item("404item"), item("shark"), item("helm")]).unwrap()
    }

    fn record() -> PresetRecord {
        PresetRecord {
            preset_name: "Test".to_string(),
            preset_notes: None,
            inventory_slots: vec![Some(Slot::new("shark")), None, Some(Slot::new("helm"))],
            equipment_slots: vec![],
            relics: SupportList::default(),
            familiars: SupportList::default(),
        }
    }

    #[test]
    fn test_pads_inventory_to_capacity() {
        let normalized = normalize(&record(), &catalog());
        assert_eq!(normalized.inventory.len(), INVENTORY_CAPACITY);
        assert_eq!(normalized.equipment.len(), EQUIPMENT_CAPACITY);
        // Index meaning is preserved.
        assert!(normalized.inventory[0].is_some());
        assert!(normalized.inventory[1].is_none());
        assert!(normalized.inventory[2].is_some());
        assert!(normalized.inventory[27].is_none());
    }

    #[test]
    fn test_truncates_oversized_arrays() {
        let mut raw = record();
        raw.inventory_slots = (0..40).map(|_| Some(Slot::new("shark"))).collect();
        let normalized = normalize(&raw, &catalog());
        assert_eq!(normalized.inventory.len(), INVENTORY_CAPACITY);
    }

    #[test]
    fn test_unknown_label_resolves_to_fallback_entry() {
        let mut raw = record();
        raw.inventory_slots = vec![Some(Slot::new("no-such-item"))];
        let normalized = normalize(&raw, &catalog());
        let slot = normalized.inventory[0].as_ref().unwrap();
        assert_eq!(slot.item.label, UNKNOWN_ITEM_LABEL);
        assert!(slot.item.is_fallback_sprite);
    }

    #[test]
    fn test_breakdown_notes_carried_over() {
        let mut raw = record();
        raw.inventory_slots = vec![Some(Slot {
            label: Some("shark".to_string()),
            breakdown_notes: Some("eat under 50%".to_string()),
        })];
        let normalized = normalize(&raw, &catalog());
        let slot = normalized.inventory[0].as_ref().unwrap();
        assert_eq!(slot.breakdown_notes.as_deref(), Some("eat under 50%"));
    }

    #[test]
    fn test_support_lists_resolve_without_padding() {
        let mut raw = record();
        raw.relics = SupportList {
            primary: vec![Some(Slot::new("shark")), None],
            alternative: vec![Some(Slot::new("nope"))],
        };
        let normalized = normalize(&raw, &catalog());
        assert_eq!(normalized.relics.primary.len(), 2);
        assert_eq!(normalized.relics.filled_primary().len(), 1);
        let alt = normalized.relics.filled_alternative();
        assert_eq!(alt.len(), 1);
        assert_eq!(alt[0].item.label, UNKNOWN_ITEM_LABEL);
    }

    #[test]
    fn test_empty_labels_stay_empty() {
        let mut raw = record();
        raw.inventory_slots = vec![Some(Slot {
            label: Some(String::new()),
            breakdown_notes: None,
        })];
        let normalized = normalize(&raw, &catalog());
        assert!(normalized.inventory[0].is_none());
    }
}
