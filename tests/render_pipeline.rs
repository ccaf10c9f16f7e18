//! End-to-end render pipeline tests with in-memory store and icons.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};

use presetcard::catalog::ItemCatalog;
use presetcard::compositor::Theme;
use presetcard::fetch::{FetchError, IconSource};
use presetcard::models::{ItemMetadata, PresetRecord, Slot, SupportList};
use presetcard::render::{render, PresetStore, RenderError, StoreError};

const PANEL_HEIGHT: u32 = 160;

struct FakeStore {
    presets: HashMap<String, PresetRecord>,
}

impl PresetStore for FakeStore {
    async fn fetch(&self, id: &str) -> Result<Option<PresetRecord>, StoreError> {
        Ok(self.presets.get(id).cloned())
    }
}

#[derive(Default)]
struct FakeIcons {
    delays_ms: HashMap<String, u64>,
    failing: HashSet<String>,
}

impl IconSource for FakeIcons {
    async fn fetch(&self, uri: &str) -> Result<RgbaImage, FetchError> {
        if let Some(ms) = self.delays_ms.get(uri) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.failing.contains(uri) {
            return Err(FetchError::Request(format!("unavailable: {uri}")));
        }
        let shade = (uri.len() * 31 % 256) as u8;
        Ok(RgbaImage::from_pixel(16, 16, Rgba([shade, 128, 64, 255])))
    }
}

fn item(label: &str) -> ItemMetadata {
    ItemMetadata {
        label: label.to_string(),
        display_name: label.to_uppercase(),
        icon_uri: format!("icons/{label}.png"),
        is_fallback_sprite: label == "404item",
    }
}

fn catalog() -> ItemCatalog {
    ItemCatalog::new(vec![
        item("404item"),
        item("shark"),
        item("helm"),
        item("conservation"),
        item("fury"),
        item("steel-titan"),
    ])
    .unwrap()
}

fn theme() -> Theme {
    Theme {
        background: RgbaImage::from_pixel(64, 64, Rgba([12, 14, 28, 255])),
        panel: RgbaImage::from_pixel(510, PANEL_HEIGHT, Rgba([24, 28, 44, 255])),
        slot: RgbaImage::from_pixel(32, 32, Rgba([40, 44, 60, 255])),
    }
}

fn preset() -> PresetRecord {
    PresetRecord {
        preset_name: "Melee opener".to_string(),
        preset_notes: None,
        inventory_slots: vec![Some(Slot::new("shark")), None, Some(Slot::new("shark"))],
        equipment_slots: vec![Some(Slot::new("helm"))],
        relics: SupportList {
            primary: vec![Some(Slot::new("conservation"))],
            alternative: vec![Some(Slot::new("fury")), Some(Slot::new("fury"))],
        },
        familiars: SupportList {
            primary: vec![Some(Slot::new("steel-titan"))],
            alternative: vec![],
        },
    }
}

fn store() -> FakeStore {
    FakeStore {
        presets: HashMap::from([("melee".to_string(), preset())]),
    }
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

#[tokio::test]
async fn test_missing_preset_is_not_found() {
    let err = render(
        &store(),
        &catalog(),
        &FakeIcons::default(),
        &theme(),
        "no-such-id",
        false,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RenderError::NotFound(id) if id == "no-such-id"));
}

#[tokio::test]
async fn test_canvas_size_grows_with_alternates() {
    // 1 filled primary relic and 2 alternates: the relic column is the
    // tallest content, so the card grows past the grid-only height.
    let bytes = render(
        &store(),
        &catalog(),
        &FakeIcons::default(),
        &theme(),
        "melee",
        false,
    )
    .await
    .unwrap();
    let canvas = decode(&bytes);
    assert_eq!(canvas.width(), 540);
    assert_eq!(canvas.height(), 408);
}

#[tokio::test]
async fn test_render_is_deterministic() {
    let bytes_a = render(
        &store(),
        &catalog(),
        &FakeIcons::default(),
        &theme(),
        "melee",
        false,
    )
    .await
    .unwrap();
    let bytes_b = render(
        &store(),
        &catalog(),
        &FakeIcons::default(),
        &theme(),
        "melee",
        false,
    )
    .await
    .unwrap();
    assert_eq!(Sha256::digest(&bytes_a), Sha256::digest(&bytes_b));
}

#[tokio::test]
async fn test_fetch_latency_does_not_move_pixels() {
    // Reversed completion order must produce the identical image.
    let slow_first = FakeIcons {
        delays_ms: HashMap::from([
            ("icons/shark.png".to_string(), 40),
            ("icons/helm.png".to_string(), 1),
        ]),
        failing: HashSet::new(),
    };
    let fast = render(
        &store(),
        &catalog(),
        &FakeIcons::default(),
        &theme(),
        "melee",
        false,
    )
    .await
    .unwrap();
    let slow = render(&store(), &catalog(), &slow_first, &theme(), "melee", false)
        .await
        .unwrap();
    assert_eq!(Sha256::digest(&fast), Sha256::digest(&slow));
}

#[tokio::test]
async fn test_failed_icon_falls_back_and_still_renders() {
    let flaky = FakeIcons {
        delays_ms: HashMap::new(),
        failing: HashSet::from(["icons/shark.png".to_string()]),
    };
    let bytes = render(&store(), &catalog(), &flaky, &theme(), "melee", false)
        .await
        .unwrap();
    let canvas = decode(&bytes);
    // Same geometry as the healthy render, different inventory pixels.
    assert_eq!(canvas.dimensions(), (540, 408));
    let healthy = decode(
        &render(
            &store(),
            &catalog(),
            &FakeIcons::default(),
            &theme(),
            "melee",
            false,
        )
        .await
        .unwrap(),
    );
    assert_ne!(canvas.as_raw(), healthy.as_raw());
}

#[tokio::test]
async fn test_double_failure_drops_slot_silently() {
    let broken = FakeIcons {
        delays_ms: HashMap::new(),
        failing: HashSet::from([
            "icons/shark.png".to_string(),
            "icons/404item.png".to_string(),
        ]),
    };
    // Render succeeds; the dropped slots just leave their cells bare.
    let bytes = render(&store(), &catalog(), &broken, &theme(), "melee", false)
        .await
        .unwrap();
    assert_eq!(decode(&bytes).dimensions(), (540, 408));
}

#[tokio::test]
async fn test_unknown_label_uses_fallback_entry() {
    let mut record = preset();
    record.inventory_slots = vec![Some(Slot::new("not-in-catalog"))];
    let store = FakeStore {
        presets: HashMap::from([("odd".to_string(), record)]),
    };
    let bytes = render(
        &store,
        &catalog(),
        &FakeIcons::default(),
        &theme(),
        "odd",
        false,
    )
    .await
    .unwrap();
    assert_eq!(decode(&bytes).width(), 540);
}

#[tokio::test]
async fn test_empty_lists_shrink_canvas_to_grids() {
    let mut record = preset();
    record.relics = SupportList::default();
    record.familiars = SupportList::default();
    let store = FakeStore {
        presets: HashMap::from([("bare".to_string(), record)]),
    };
    let bytes = render(
        &store,
        &catalog(),
        &FakeIcons::default(),
        &theme(),
        "bare",
        false,
    )
    .await
    .unwrap();
    // Equipment grid bottom (204) plus the bottom gutter.
    assert_eq!(decode(&bytes).height(), 219);
}

#[tokio::test]
async fn test_relic_only_preset_produces_three_list_tasks() {
    use presetcard::fetch::{resolve_grid_tasks, resolve_list_tasks};
    use presetcard::layout::compute_layout;
    use presetcard::normalize::normalize;

    let record = PresetRecord {
        preset_name: "Relics only".to_string(),
        preset_notes: None,
        inventory_slots: vec![None; 28],
        equipment_slots: vec![None; 13],
        relics: SupportList {
            primary: vec![Some(Slot::new("conservation"))],
            alternative: vec![Some(Slot::new("fury")), Some(Slot::new("fury"))],
        },
        familiars: SupportList::default(),
    };
    let catalog = catalog();
    let icons = FakeIcons::default();
    let preset = normalize(&record, &catalog);
    let layout = compute_layout(&preset, PANEL_HEIGHT);

    let inventory = resolve_grid_tasks(&preset.inventory, &layout.inventory, &catalog, &icons).await;
    let equipment = resolve_grid_tasks(&preset.equipment, &layout.equipment, &catalog, &icons).await;
    let primary = preset.relics.filled_primary();
    let alternative = preset.relics.filled_alternative();
    let alt_zone = layout.relics.alternates.unwrap().zone;
    let mut relics = resolve_list_tasks(&primary, &layout.relics.zone, &catalog, &icons).await;
    relics.extend(resolve_list_tasks(&alternative, &alt_zone, &catalog, &icons).await);

    assert!(inventory.is_empty());
    assert!(equipment.is_empty());
    assert_eq!(relics.len(), 3);
    assert_eq!(layout.canvas_height, 408);
}

#[tokio::test]
async fn test_debug_overlay_is_additive() {
    let plain = decode(
        &render(
            &store(),
            &catalog(),
            &FakeIcons::default(),
            &theme(),
            "melee",
            false,
        )
        .await
        .unwrap(),
    );
    let debug = decode(
        &render(
            &store(),
            &catalog(),
            &FakeIcons::default(),
            &theme(),
            "melee",
            true,
        )
        .await
        .unwrap(),
    );
    assert_eq!(plain.dimensions(), debug.dimensions());
    assert_ne!(plain.as_raw(), debug.as_raw());
}
